//! Built-in registry of macro categories and meals.
//!
//! The category key is the join key used by entries, details and the
//! classifier; the rest of each descriptor is display metadata.

use crate::types::{MacroCategory, MealType};
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Display metadata for one macro category
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CategoryInfo {
    pub key: MacroCategory,
    pub label: &'static str,
    pub emoji: &'static str,
    pub description: &'static str,
}

/// Display metadata for one meal slot
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MealInfo {
    pub meal_type: MealType,
    pub label: &'static str,
    pub emoji: &'static str,
    pub time_hint: &'static str,
}

/// All categories, in registry order (matches `MacroCategory::ALL`)
pub static CATEGORIES: [CategoryInfo; 7] = [
    CategoryInfo {
        key: MacroCategory::Protein,
        label: "Protein",
        emoji: "🥩",
        description: "Meat, fish, eggs, beans, tofu, nuts",
    },
    CategoryInfo {
        key: MacroCategory::Carbs,
        label: "Carbs",
        emoji: "🍞",
        description: "Bread, rice, pasta, grains, potatoes",
    },
    CategoryInfo {
        key: MacroCategory::Veggies,
        label: "Veggies",
        emoji: "🥦",
        description: "All vegetables and greens",
    },
    CategoryInfo {
        key: MacroCategory::Fruits,
        label: "Fruits",
        emoji: "🍊",
        description: "Fresh, dried, or frozen fruits",
    },
    CategoryInfo {
        key: MacroCategory::Fats,
        label: "Healthy Fats",
        emoji: "🥑",
        description: "Avocado, olive oil, nuts, seeds",
    },
    CategoryInfo {
        key: MacroCategory::Dairy,
        label: "Dairy / Calcium",
        emoji: "🧀",
        description: "Milk, cheese, yogurt, fortified alternatives",
    },
    CategoryInfo {
        key: MacroCategory::Hydration,
        label: "Hydration",
        emoji: "💧",
        description: "Water, tea, coffee, juice",
    },
];

pub static MEALS: [MealInfo; 4] = [
    MealInfo {
        meal_type: MealType::Breakfast,
        label: "Breakfast",
        emoji: "🌅",
        time_hint: "Morning",
    },
    MealInfo {
        meal_type: MealType::Lunch,
        label: "Lunch",
        emoji: "☀️",
        time_hint: "Midday",
    },
    MealInfo {
        meal_type: MealType::Dinner,
        label: "Dinner",
        emoji: "🌙",
        time_hint: "Evening",
    },
    MealInfo {
        meal_type: MealType::Snack,
        label: "Snack",
        emoji: "✨",
        time_hint: "Anytime",
    },
];

/// String key index, built once on first use
static BY_KEY: Lazy<HashMap<&'static str, &'static CategoryInfo>> =
    Lazy::new(|| CATEGORIES.iter().map(|c| (c.key.key(), c)).collect());

/// Descriptor for a category. Registry order equals enum order.
pub fn info(category: MacroCategory) -> &'static CategoryInfo {
    &CATEGORIES[category as usize]
}

/// Look up a category by its storage key (case-insensitive)
pub fn lookup(key: &str) -> Option<&'static CategoryInfo> {
    let key = key.trim();
    BY_KEY
        .get(key)
        .or_else(|| BY_KEY.get(key.to_lowercase().as_str()))
        .copied()
}

pub fn meal_info(meal_type: MealType) -> &'static MealInfo {
    &MEALS[meal_type as usize]
}
