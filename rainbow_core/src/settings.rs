//! Persisted user preferences.

use crate::kv::{load_json_or_default, KeyValueStore, SETTINGS_KEY};
use crate::{AppSettings, Result, SettingsPatch};

pub struct SettingsStore<S: KeyValueStore> {
    store: S,
    settings: AppSettings,
}

impl<S: KeyValueStore> SettingsStore<S> {
    /// Load settings, falling back to defaults when absent or unreadable
    pub fn open(store: S) -> Self {
        let settings: AppSettings = load_json_or_default(&store, SETTINGS_KEY).unwrap_or_default();
        Self { store, settings }
    }

    pub fn get_settings(&self) -> AppSettings {
        self.settings
    }

    /// Merge `patch` into the current settings and persist the full record
    pub fn update_settings(&mut self, patch: SettingsPatch) -> Result<AppSettings> {
        let mut updated = self.settings;
        if let Some(show) = patch.show_macro_details {
            updated.show_macro_details = show;
        }
        if let Some(done) = patch.has_completed_onboarding {
            updated.has_completed_onboarding = done;
        }

        let contents = serde_json::to_string(&updated)?;
        self.store.set(SETTINGS_KEY, &contents)?;
        self.settings = updated;

        tracing::debug!("Saved settings {:?}", self.settings);
        Ok(self.settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemoryStore;

    #[test]
    fn test_defaults_when_nothing_stored() {
        let store = SettingsStore::open(MemoryStore::new());
        assert_eq!(
            store.get_settings(),
            AppSettings {
                show_macro_details: false,
                has_completed_onboarding: false,
            }
        );
    }

    #[test]
    fn test_defaults_when_corrupt() {
        crate::logging::init_test();
        let mut backend = MemoryStore::new();
        backend.set(SETTINGS_KEY, "not json at all").unwrap();

        let store = SettingsStore::open(backend);
        assert_eq!(store.get_settings(), AppSettings::default());
    }

    #[test]
    fn test_partial_update_merges_and_persists() {
        let backend = MemoryStore::new();
        let mut store = SettingsStore::open(backend.clone());

        store
            .update_settings(SettingsPatch {
                has_completed_onboarding: Some(true),
                ..Default::default()
            })
            .unwrap();
        let merged = store
            .update_settings(SettingsPatch {
                show_macro_details: Some(true),
                ..Default::default()
            })
            .unwrap();

        assert!(merged.show_macro_details);
        assert!(merged.has_completed_onboarding);

        let raw = backend.get(SETTINGS_KEY).unwrap().unwrap();
        let stored: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(stored["showMacroDetails"], true);
        assert_eq!(stored["hasCompletedOnboarding"], true);

        let reopened = SettingsStore::open(backend);
        assert_eq!(reopened.get_settings(), merged);
    }

    #[test]
    fn test_empty_patch_still_writes_full_record() {
        let backend = MemoryStore::new();
        let mut store = SettingsStore::open(backend.clone());
        store.update_settings(SettingsPatch::default()).unwrap();

        let raw = backend.get(SETTINGS_KEY).unwrap().unwrap();
        assert_eq!(
            raw,
            r#"{"showMacroDetails":false,"hasCompletedOnboarding":false}"#
        );
    }
}
