//! Per-date meal log persistence.
//!
//! The whole date → day log mapping lives in memory and is written back in
//! full under [`DAY_LOGS_KEY`] after every change. A missing or unparseable
//! record reads as an empty mapping. Inside a readable record each day is
//! decoded on its own, and unreadable slots or entries are dropped without
//! taking the rest of the history with them.

use crate::kv::{load_json_or_default, KeyValueStore, DAY_LOGS_KEY};
use crate::{DayLog, Error, FoodEntry, MealSlot, MealType, Result};
use chrono::{Days, Local, NaiveDate};
use serde_json::Value;
use std::collections::BTreeMap;

/// Number of days covered by the weekly overview
pub const WEEK_DAYS: u64 = 7;

/// Format a date as the `YYYY-MM-DD` storage key
pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|e| Error::Validation(format!("Invalid date {:?} (expected YYYY-MM-DD): {}", s, e)))
}

fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

pub struct DayLogStore<S: KeyValueStore> {
    store: S,
    logs: BTreeMap<String, DayLog>,
    clock: Box<dyn Fn() -> NaiveDate>,
}

impl<S: KeyValueStore> DayLogStore<S> {
    /// Load the mapping from `store`, using the local system date as "today"
    pub fn open(store: S) -> Self {
        let logs = load_logs(&store);
        Self {
            store,
            logs,
            clock: Box::new(local_today),
        }
    }

    /// Replace the source of "today" (used for week projections and defaults)
    pub fn with_clock(mut self, clock: impl Fn() -> NaiveDate + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn today(&self) -> NaiveDate {
        (self.clock)()
    }

    /// Today's date as `YYYY-MM-DD`
    pub fn get_today(&self) -> String {
        date_key(self.today())
    }

    /// Log for `date` (default today), or an empty day if nothing is stored.
    ///
    /// The empty default is not persisted.
    pub fn get_day_log(&self, date: Option<NaiveDate>) -> DayLog {
        let date = date.unwrap_or_else(|| self.today());
        self.logs
            .get(&date_key(date))
            .cloned()
            .unwrap_or_else(|| DayLog::empty(date))
    }

    /// Append `entry` to the `meal_type` slot of `date` and persist.
    pub fn add_entry(
        &mut self,
        meal_type: MealType,
        entry: FoodEntry,
        date: Option<NaiveDate>,
    ) -> Result<()> {
        if entry.categories.is_empty() {
            return Err(Error::Validation(format!(
                "Entry {:?} has no categories",
                entry.name
            )));
        }

        let date = date.unwrap_or_else(|| self.today());
        let day = self
            .logs
            .entry(date_key(date))
            .or_insert_with(|| DayLog::empty(date));

        if day.slot(meal_type).is_none() {
            day.normalize();
        }
        let slot = day.slot_mut(meal_type).ok_or_else(|| {
            Error::Other(format!("Day {} is missing the {} slot", date, meal_type))
        })?;

        tracing::debug!("Adding entry {} to {} on {}", entry.id, meal_type, date);
        slot.entries.push(entry);
        self.save()
    }

    /// Remove the entry with `entry_id` from the slot.
    ///
    /// Returns `false` (and writes nothing) when the day or entry is absent.
    pub fn remove_entry(
        &mut self,
        meal_type: MealType,
        entry_id: &str,
        date: Option<NaiveDate>,
    ) -> Result<bool> {
        let date = date.unwrap_or_else(|| self.today());
        let Some(slot) = self
            .logs
            .get_mut(&date_key(date))
            .and_then(|day| day.slot_mut(meal_type))
        else {
            tracing::debug!("No {} log on {}, nothing to remove", meal_type, date);
            return Ok(false);
        };

        let before = slot.entries.len();
        slot.entries.retain(|e| e.id != entry_id);
        if slot.entries.len() == before {
            tracing::debug!("Entry {} not found in {} on {}", entry_id, meal_type, date);
            return Ok(false);
        }

        self.save()?;
        Ok(true)
    }

    /// The seven days ending today, oldest first. Never persists.
    pub fn get_week_logs(&self) -> Vec<DayLog> {
        self.week_ending(self.today())
    }

    /// The seven days ending on `last`, oldest first
    pub fn week_ending(&self, last: NaiveDate) -> Vec<DayLog> {
        (0..WEEK_DAYS)
            .rev()
            .map(|offset| {
                let date = last.checked_sub_days(Days::new(offset)).unwrap_or(last);
                self.get_day_log(Some(date))
            })
            .collect()
    }

    /// Dates that have a stored log, oldest first
    pub fn logged_dates(&self) -> Vec<NaiveDate> {
        self.logs.values().map(|d| d.date).collect()
    }

    /// Delete every day log and reload the (now empty) state.
    ///
    /// Only the day-log record is removed; settings are left alone.
    pub fn clear_all(&mut self) -> Result<()> {
        self.store.remove(DAY_LOGS_KEY)?;
        self.logs = load_logs(&self.store);
        tracing::info!("Cleared all day logs");
        Ok(())
    }

    fn save(&mut self) -> Result<()> {
        let contents = serde_json::to_string(&self.logs)?;
        self.store.set(DAY_LOGS_KEY, &contents)?;
        tracing::debug!("Saved {} day logs", self.logs.len());
        Ok(())
    }
}

fn load_logs<S: KeyValueStore>(store: &S) -> BTreeMap<String, DayLog> {
    let raw: BTreeMap<String, Value> =
        load_json_or_default(store, DAY_LOGS_KEY).unwrap_or_default();

    let mut logs = BTreeMap::new();
    for (key, value) in raw {
        let date = match parse_date(&key) {
            Ok(date) => date,
            Err(e) => {
                tracing::warn!("Dropping day log under unreadable key: {}", e);
                continue;
            }
        };
        let mut day = decode_day(date, value);
        day.normalize();
        logs.insert(key, day);
    }
    tracing::debug!("Loaded {} day logs", logs.len());
    logs
}

/// Decode one day, falling back to slot-by-slot and entry-by-entry recovery
fn decode_day(date: NaiveDate, value: Value) -> DayLog {
    let err = match serde_json::from_value::<DayLog>(value.clone()) {
        Ok(day) => return day,
        Err(e) => e,
    };
    tracing::warn!("Day log {} is partly unreadable ({}), salvaging", date, err);

    let mut day = DayLog {
        date,
        meals: Vec::new(),
    };
    let meals = value.get("meals").and_then(Value::as_array).into_iter().flatten();
    for meal in meals {
        let meal_type = meal
            .get("type")
            .cloned()
            .and_then(|t| serde_json::from_value::<MealType>(t).ok());
        let Some(meal_type) = meal_type else {
            tracing::warn!("Dropping slot with unknown type on {}: {}", date, meal);
            continue;
        };

        let mut slot = MealSlot::empty(meal_type);
        let entries = meal.get("entries").and_then(Value::as_array).into_iter().flatten();
        for raw in entries {
            match serde_json::from_value::<FoodEntry>(raw.clone()) {
                Ok(entry) => slot.entries.push(entry),
                Err(e) => tracing::warn!("Dropping unreadable {} entry on {}: {}", meal_type, date, e),
            }
        }
        day.meals.push(slot);
    }
    day
}
