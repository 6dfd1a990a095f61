//! Product-to-category classification.
//!
//! Maps the nutrient figures and category tags of a product database record
//! onto macro categories. Rules, applied in order (all values per 100 g):
//!
//! 1. protein ≥ 5 g → protein (with grams)
//! 2. carbohydrates ≥ 15 g → carbs (with grams)
//! 3. fat ≥ 5 g → fats (with grams)
//! 4. dairy words in the tags, or calcium ≥ 100 → dairy
//! 5. fruit words in the tags → fruits
//! 6. vegetable words in the tags → veggies
//! 7. drink words in the tags → hydration
//!
//! When nothing fires, the largest of protein, carbs and fat wins, with ties
//! going to protein, then carbs.

use crate::{MacroCategory, MacroDetail, MacroDetails, ScannedProduct};
use serde::{Deserialize, Deserializer};

pub const PROTEIN_MIN_G: f64 = 5.0;
pub const CARBS_MIN_G: f64 = 15.0;
pub const FAT_MIN_G: f64 = 5.0;
pub const CALCIUM_MIN: f64 = 100.0;

const DAIRY_WORDS: &[&str] = &["dairy", "milk", "cheese", "yogurt"];
const FRUIT_WORDS: &[&str] = &["fruit", "juice", "smoothie"];
const VEGGIE_WORDS: &[&str] = &["vegetable", "salad", "legume"];
const HYDRATION_WORDS: &[&str] = &["water", "tea", "coffee", "beverage"];

/// Nutrient figures per 100 g. Missing or non-numeric values are `None`.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct Nutriments {
    #[serde(default, deserialize_with = "lenient_number")]
    pub proteins_100g: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub carbohydrates_100g: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub fat_100g: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub calcium_100g: Option<f64>,
}

/// The subset of a product database record the classifier reads
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct Product {
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub brands: Option<String>,
    #[serde(default)]
    pub nutriments: Option<Nutriments>,
    #[serde(default)]
    pub categories_tags: Option<Vec<String>>,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Numbers sometimes arrive as strings ("5.2"); anything unparseable is absent.
fn lenient_number<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_f64(),
        Some(serde_json::Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|v| v.is_finite()))
}

fn non_blank(s: Option<&str>) -> Option<String> {
    s.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn push_unique(categories: &mut Vec<MacroCategory>, category: MacroCategory) {
    if !categories.contains(&category) {
        categories.push(category);
    }
}

fn mentions_any(haystack: &str, words: &[&str]) -> bool {
    words.iter().any(|w| haystack.contains(w))
}

/// Classify a product record. Returns `None` when the product has no name.
pub fn classify(product: &Product, barcode: &str) -> Option<ScannedProduct> {
    let name = non_blank(product.product_name.as_deref())?;

    let n = product.nutriments.clone().unwrap_or_default();
    let mut categories = Vec::new();
    let mut macro_details = MacroDetails::new();

    let thresholds = [
        (MacroCategory::Protein, n.proteins_100g, PROTEIN_MIN_G),
        (MacroCategory::Carbs, n.carbohydrates_100g, CARBS_MIN_G),
        (MacroCategory::Fats, n.fat_100g, FAT_MIN_G),
    ];
    for (category, value, min) in thresholds {
        if let Some(grams) = value.filter(|g| *g >= min) {
            push_unique(&mut categories, category);
            macro_details.insert(category, MacroDetail::grams(grams.round()));
        }
    }

    let tags = product
        .categories_tags
        .as_deref()
        .unwrap_or_default()
        .join(" ")
        .to_lowercase();

    let calcium_rich = n.calcium_100g.is_some_and(|c| c >= CALCIUM_MIN);
    if mentions_any(&tags, DAIRY_WORDS) || calcium_rich {
        push_unique(&mut categories, MacroCategory::Dairy);
    }
    if mentions_any(&tags, FRUIT_WORDS) {
        push_unique(&mut categories, MacroCategory::Fruits);
    }
    if mentions_any(&tags, VEGGIE_WORDS) {
        push_unique(&mut categories, MacroCategory::Veggies);
    }
    if mentions_any(&tags, HYDRATION_WORDS) {
        push_unique(&mut categories, MacroCategory::Hydration);
    }

    if categories.is_empty() {
        let fallback = dominant_macro(&n);
        tracing::debug!("No rule matched for {}, falling back to {}", barcode, fallback);
        categories.push(fallback);
    }

    tracing::debug!("Classified {} ({}) as {:?}", name, barcode, categories);

    Some(ScannedProduct {
        name,
        brand: non_blank(product.brands.as_deref()),
        categories,
        macro_details,
        image_url: non_blank(product.image_url.as_deref()),
        barcode: barcode.to_string(),
    })
}

/// Largest of protein, carbs and fat; ties favour protein, then carbs
fn dominant_macro(n: &Nutriments) -> MacroCategory {
    let protein = n.proteins_100g.unwrap_or(0.0);
    let carbs = n.carbohydrates_100g.unwrap_or(0.0);
    let fat = n.fat_100g.unwrap_or(0.0);
    let max = protein.max(carbs).max(fat);

    if max == protein {
        MacroCategory::Protein
    } else if max == carbs {
        MacroCategory::Carbs
    } else {
        MacroCategory::Fats
    }
}
