//! Construction of new food entries.
//!
//! Entries are immutable once created, so every rule about what a valid
//! entry looks like lives here.

use crate::categories;
use crate::{Error, FoodEntry, MacroCategory, MacroDetails, Result, ScannedProduct};
use chrono::Utc;
use uuid::Uuid;

impl FoodEntry {
    /// Create a new entry with a fresh id and the current timestamp.
    ///
    /// Duplicate categories are dropped (first occurrence wins). A blank name
    /// is replaced by the category labels joined with `" + "`.
    pub fn new(name: &str, categories: &[MacroCategory]) -> Result<Self> {
        let categories = dedup_categories(categories);
        if categories.is_empty() {
            return Err(Error::Validation(
                "Pick at least one category for the entry".into(),
            ));
        }

        let name = match name.trim() {
            "" => default_name(&categories),
            trimmed => trimmed.to_string(),
        };

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            name,
            categories,
            macro_details: None,
            barcode: None,
            timestamp: Utc::now().timestamp_millis(),
        })
    }

    /// Build an entry pre-filled from a barcode scan.
    ///
    /// Gram details are only carried over when `with_details` is set, which
    /// mirrors the "show macro details" preference.
    pub fn from_scanned(product: &ScannedProduct, with_details: bool) -> Result<Self> {
        let name = match product.brand.as_deref().map(str::trim) {
            Some(brand) if !brand.is_empty() => format!("{} {}", brand, product.name),
            _ => product.name.clone(),
        };

        let mut entry = Self::new(&name, &product.categories)?.with_barcode(&product.barcode);
        if with_details {
            entry = entry.with_details(product.macro_details.clone());
        }
        Ok(entry)
    }

    /// Attach per-category details.
    ///
    /// Details for categories the entry does not carry, or without any numeric
    /// value, are discarded. An empty result leaves `macro_details` unset.
    pub fn with_details(mut self, details: MacroDetails) -> Self {
        let kept: MacroDetails = details
            .into_iter()
            .filter(|(category, detail)| {
                self.categories.contains(category)
                    && (detail.grams.is_some() || detail.calories.is_some())
            })
            .collect();
        self.macro_details = if kept.is_empty() { None } else { Some(kept) };
        self
    }

    pub fn with_barcode(mut self, barcode: &str) -> Self {
        let barcode = barcode.trim();
        self.barcode = if barcode.is_empty() {
            None
        } else {
            Some(barcode.to_string())
        };
        self
    }
}

fn dedup_categories(categories: &[MacroCategory]) -> Vec<MacroCategory> {
    let mut unique = Vec::with_capacity(categories.len());
    for category in categories {
        if !unique.contains(category) {
            unique.push(*category);
        }
    }
    unique
}

fn default_name(categories: &[MacroCategory]) -> String {
    categories
        .iter()
        .map(|c| categories::info(*c).label)
        .collect::<Vec<_>>()
        .join(" + ")
}
