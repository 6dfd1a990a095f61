//! Per-day color summaries (the daily mosaic and weekly dots).

use crate::{DayLog, FoodEntry, MacroCategory};
use std::collections::BTreeMap;

impl DayLog {
    pub fn entries(&self) -> impl Iterator<Item = &FoodEntry> {
        self.meals.iter().flat_map(|m| m.entries.iter())
    }

    pub fn total_entries(&self) -> usize {
        self.meals.iter().map(|m| m.entries.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total_entries() == 0
    }

    /// Number of entries carrying each category; all seven keys are present
    pub fn category_counts(&self) -> BTreeMap<MacroCategory, usize> {
        let mut counts: BTreeMap<MacroCategory, usize> =
            MacroCategory::ALL.iter().map(|c| (*c, 0)).collect();
        for entry in self.entries() {
            for category in &entry.categories {
                *counts.entry(*category).or_insert(0) += 1;
            }
        }
        counts
    }

    /// How many distinct colors were eaten today
    pub fn unique_colors(&self) -> usize {
        self.category_counts().values().filter(|n| **n > 0).count()
    }

    /// Distinct categories present, in registry order
    pub fn categories_present(&self) -> Vec<MacroCategory> {
        self.category_counts()
            .into_iter()
            .filter(|(_, n)| *n > 0)
            .map(|(c, _)| c)
            .collect()
    }

    pub fn find_entry(&self, id: &str) -> Option<&FoodEntry> {
        self.entries().find(|e| e.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MealType;
    use chrono::NaiveDate;

    fn entry(id: &str, categories: &[MacroCategory]) -> FoodEntry {
        FoodEntry {
            id: id.into(),
            name: id.into(),
            categories: categories.to_vec(),
            macro_details: None,
            barcode: None,
            timestamp: 0,
        }
    }

    fn sample_day() -> DayLog {
        let mut day = DayLog::empty(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
        day.slot_mut(MealType::Breakfast).unwrap().entries.extend([
            entry("oats", &[MacroCategory::Carbs, MacroCategory::Fruits]),
            entry("coffee", &[MacroCategory::Hydration]),
        ]);
        day.slot_mut(MealType::Dinner)
            .unwrap()
            .entries
            .push(entry("stir fry", &[MacroCategory::Veggies, MacroCategory::Carbs]));
        day
    }

    #[test]
    fn test_empty_day_summary() {
        let day = DayLog::empty(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
        assert!(day.is_empty());
        assert_eq!(day.unique_colors(), 0);
        assert_eq!(day.category_counts().len(), 7);
        assert!(day.categories_present().is_empty());
    }

    #[test]
    fn test_counts_and_colors() {
        let day = sample_day();
        assert_eq!(day.total_entries(), 3);

        let counts = day.category_counts();
        assert_eq!(counts[&MacroCategory::Carbs], 2);
        assert_eq!(counts[&MacroCategory::Protein], 0);
        assert_eq!(day.unique_colors(), 4);
    }

    #[test]
    fn test_categories_present_in_registry_order() {
        let day = sample_day();
        assert_eq!(
            day.categories_present(),
            vec![
                MacroCategory::Carbs,
                MacroCategory::Veggies,
                MacroCategory::Fruits,
                MacroCategory::Hydration,
            ]
        );
    }

    #[test]
    fn test_find_entry() {
        let day = sample_day();
        assert_eq!(day.find_entry("coffee").unwrap().name, "coffee");
        assert!(day.find_entry("cake").is_none());
    }
}
