#![forbid(unsafe_code)]

//! Core domain model and persistence for the Munch food log.
//!
//! This crate provides:
//! - Domain types (categories, entries, day logs, settings)
//! - Category and meal registry
//! - Persistence (key-value backend, day log and settings stores)
//! - Barcode lookup and product classification
//! - Encouragement quotes

pub mod types;
pub mod error;
pub mod categories;
pub mod config;
pub mod logging;
pub mod kv;
pub mod entry;
pub mod summary;
pub mod day_log;
pub mod settings;
pub mod classifier;
pub mod lookup;
pub mod quotes;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use config::Config;
pub use kv::{FileStore, KeyValueStore, MemoryStore};
pub use day_log::{date_key, parse_date, DayLogStore};
pub use settings::SettingsStore;
pub use classifier::{classify, Product};
pub use lookup::{lookup_barcode, OpenFoodFacts, ProductSource};
pub use quotes::QuotePicker;
