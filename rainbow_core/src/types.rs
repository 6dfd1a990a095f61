//! Core domain types for the Munch food log.
//!
//! This module defines the fundamental types used throughout the system:
//! - Macro categories and meal types
//! - Food entries, meal slots and day logs
//! - App settings
//! - Scanned products (transient classifier output)
//!
//! Field names serialize in camelCase so stored blobs stay readable by the
//! web app that produced the original data.

use crate::{Error, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Categories and Meals
// ============================================================================

/// One of the seven color groups an entry can be tagged with.
///
/// Variant order is the registry order and drives `Ord`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MacroCategory {
    Protein,
    Carbs,
    Veggies,
    Fruits,
    Fats,
    Dairy,
    Hydration,
}

impl MacroCategory {
    pub const ALL: [MacroCategory; 7] = [
        MacroCategory::Protein,
        MacroCategory::Carbs,
        MacroCategory::Veggies,
        MacroCategory::Fruits,
        MacroCategory::Fats,
        MacroCategory::Dairy,
        MacroCategory::Hydration,
    ];

    /// Stable key used in storage and on the command line
    pub fn key(self) -> &'static str {
        match self {
            MacroCategory::Protein => "protein",
            MacroCategory::Carbs => "carbs",
            MacroCategory::Veggies => "veggies",
            MacroCategory::Fruits => "fruits",
            MacroCategory::Fats => "fats",
            MacroCategory::Dairy => "dairy",
            MacroCategory::Hydration => "hydration",
        }
    }
}

impl fmt::Display for MacroCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.key())
    }
}

impl FromStr for MacroCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        crate::categories::lookup(s)
            .map(|info| info.key)
            .ok_or_else(|| Error::Validation(format!("Unknown category: {}", s)))
    }
}

/// The four fixed meal-time buckets of a day
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealType {
    /// Canonical slot order within a day log
    pub const ALL: [MealType; 4] = [
        MealType::Breakfast,
        MealType::Lunch,
        MealType::Dinner,
        MealType::Snack,
    ];

    pub fn key(self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
            MealType::Snack => "snack",
        }
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.key())
    }
}

impl FromStr for MealType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "breakfast" => Ok(MealType::Breakfast),
            "lunch" => Ok(MealType::Lunch),
            "dinner" => Ok(MealType::Dinner),
            "snack" => Ok(MealType::Snack),
            other => Err(Error::Validation(format!(
                "Unknown meal type: {} (expected breakfast, lunch, dinner or snack)",
                other
            ))),
        }
    }
}

// ============================================================================
// Entries and Logs
// ============================================================================

/// Optional numeric detail attached to one category of an entry
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct MacroDetail {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grams: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories: Option<f64>,
}

impl MacroDetail {
    pub fn grams(grams: f64) -> Self {
        Self {
            grams: Some(grams),
            calories: None,
        }
    }
}

pub type MacroDetails = BTreeMap<MacroCategory, MacroDetail>;

/// A single logged food item
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FoodEntry {
    pub id: String,
    pub name: String,
    pub categories: Vec<MacroCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub macro_details: Option<MacroDetails>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub barcode: Option<String>,
    /// Creation time in epoch milliseconds
    pub timestamp: i64,
}

/// One meal bucket and its entries, in insertion order
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct MealSlot {
    #[serde(rename = "type")]
    pub meal_type: MealType,
    #[serde(default)]
    pub entries: Vec<FoodEntry>,
}

impl MealSlot {
    pub fn empty(meal_type: MealType) -> Self {
        Self {
            meal_type,
            entries: Vec::new(),
        }
    }
}

/// Everything logged on one calendar date
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DayLog {
    /// Serialized as `YYYY-MM-DD`
    pub date: NaiveDate,
    pub meals: Vec<MealSlot>,
}

impl DayLog {
    /// A day with the four slots present and empty
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            meals: MealType::ALL.iter().copied().map(MealSlot::empty).collect(),
        }
    }

    pub fn slot(&self, meal_type: MealType) -> Option<&MealSlot> {
        self.meals.iter().find(|m| m.meal_type == meal_type)
    }

    pub fn slot_mut(&mut self, meal_type: MealType) -> Option<&mut MealSlot> {
        self.meals.iter_mut().find(|m| m.meal_type == meal_type)
    }

    /// Rebuild `meals` as exactly the four slots in canonical order.
    ///
    /// Entries from duplicated slots are merged in the order they appear.
    pub fn normalize(&mut self) {
        let mut slots: Vec<MealSlot> = MealType::ALL.iter().copied().map(MealSlot::empty).collect();
        for meal in self.meals.drain(..) {
            if let Some(slot) = slots.iter_mut().find(|s| s.meal_type == meal.meal_type) {
                slot.entries.extend(meal.entries);
            }
        }
        self.meals = slots;
    }
}

// ============================================================================
// Settings
// ============================================================================

/// User preferences, persisted as a single record
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    #[serde(default)]
    pub show_macro_details: bool,
    #[serde(default)]
    pub has_completed_onboarding: bool,
}

/// Partial settings update; `None` fields keep their current value
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SettingsPatch {
    pub show_macro_details: Option<bool>,
    pub has_completed_onboarding: Option<bool>,
}

impl SettingsPatch {
    pub fn is_empty(&self) -> bool {
        self.show_macro_details.is_none() && self.has_completed_onboarding.is_none()
    }
}

// ============================================================================
// Scanned Product
// ============================================================================

/// Classifier output for a looked-up barcode. Never persisted directly.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScannedProduct {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    pub categories: Vec<MacroCategory>,
    #[serde(default)]
    pub macro_details: MacroDetails,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub barcode: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_day_has_four_slots_in_order() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        let day = DayLog::empty(date);
        let types: Vec<_> = day.meals.iter().map(|m| m.meal_type).collect();
        assert_eq!(types, MealType::ALL.to_vec());
        assert!(day.meals.iter().all(|m| m.entries.is_empty()));
    }

    #[test]
    fn test_day_log_json_shape() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        let json = serde_json::to_value(DayLog::empty(date)).unwrap();
        assert_eq!(json["date"], "2024-03-09");
        assert_eq!(json["meals"][0]["type"], "breakfast");
        assert_eq!(json["meals"][3]["type"], "snack");
    }

    #[test]
    fn test_entry_json_uses_camel_case_and_omits_absent_fields() {
        let mut details = MacroDetails::new();
        details.insert(MacroCategory::Protein, MacroDetail::grams(12.0));
        let entry = FoodEntry {
            id: "1".into(),
            name: "Eggs".into(),
            categories: vec![MacroCategory::Protein],
            macro_details: Some(details),
            barcode: None,
            timestamp: 1_700_000_000_000,
        };

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["macroDetails"]["protein"]["grams"], 12.0);
        assert!(json.get("barcode").is_none());
        assert!(json["macroDetails"]["protein"].get("calories").is_none());
    }

    #[test]
    fn test_normalize_restores_missing_and_merges_duplicate_slots() {
        let json = r#"{
            "date": "2024-03-09",
            "meals": [
                {"type": "snack", "entries": [
                    {"id": "a", "name": "Apple", "categories": ["fruits"], "timestamp": 1}
                ]},
                {"type": "snack", "entries": [
                    {"id": "b", "name": "Tea", "categories": ["hydration"], "timestamp": 2}
                ]}
            ]
        }"#;
        let mut day: DayLog = serde_json::from_str(json).unwrap();
        day.normalize();

        assert_eq!(day.meals.len(), 4);
        assert_eq!(day.meals[0].meal_type, MealType::Breakfast);
        let snack = day.slot(MealType::Snack).unwrap();
        let ids: Vec<_> = snack.entries.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_meal_type_parsing() {
        assert_eq!("Lunch".parse::<MealType>().unwrap(), MealType::Lunch);
        assert!(matches!(
            "brunch".parse::<MealType>(),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn test_settings_missing_fields_default_to_false() {
        let settings: AppSettings = serde_json::from_str(r#"{"showMacroDetails": true}"#).unwrap();
        assert!(settings.show_macro_details);
        assert!(!settings.has_completed_onboarding);
    }
}
