use std::{fs, path::PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// What survives between sessions. Nothing here affects the statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Preferences {
    pub last_source_url: Option<String>,
    pub dark_mode: bool,
    pub accent: String,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            last_source_url: None,
            dark_mode: true,
            accent: "amber".into(),
        }
    }
}

pub struct PreferencesStore {
    path: PathBuf,
    data: Preferences,
}

impl PreferencesStore {
    /// A missing or unreadable file yields defaults.
    pub fn open(path: PathBuf) -> Self {
        let data = fs::read_to_string(&path)
            .ok()
            .and_then(|contents| serde_json::from_str(&contents).ok())
            .unwrap_or_default();

        Self { path, data }
    }

    pub fn preferences(&self) -> &Preferences {
        &self.data
    }

    pub fn remember_source_url(&mut self, url: &str) -> Result<()> {
        self.data.last_source_url = Some(url.to_string());
        self.persist()
    }

    pub fn update_theme(&mut self, dark_mode: bool, accent: Option<&str>) -> Result<()> {
        self.data.dark_mode = dark_mode;
        if let Some(accent) = accent {
            self.data.accent = accent.to_string();
        }
        self.persist()
    }

    fn persist(&self) -> Result<()> {
        let serialized = serde_json::to_string_pretty(&self.data)?;
        fs::write(&self.path, serialized)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preferences_survive_reopening() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");

        let mut store = PreferencesStore::open(path.clone());
        assert_eq!(store.preferences(), &Preferences::default());
        store
            .remember_source_url("https://example.com/ratings.csv")
            .unwrap();
        store.update_theme(false, Some("teal")).unwrap();

        let reopened = PreferencesStore::open(path);
        assert_eq!(
            reopened.preferences().last_source_url.as_deref(),
            Some("https://example.com/ratings.csv")
        );
        assert!(!reopened.preferences().dark_mode);
        assert_eq!(reopened.preferences().accent, "teal");
    }

    #[test]
    fn corrupt_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, "{not json").unwrap();

        assert_eq!(
            PreferencesStore::open(path).preferences(),
            &Preferences::default()
        );
    }
}
