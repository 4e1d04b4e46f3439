//! Player-facing preferences
//!
//! Persisted in LocalStorage on wasm, defaults elsewhere. Unknown or missing
//! fields fall back to defaults so older saved blobs keep loading.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Speak problems and results aloud
    pub speech: bool,
    /// Play the short correct/wrong chimes
    pub chimes: bool,
    /// Master volume for chimes (0.0 - 1.0)
    pub volume: f32,
    /// Draw the background art (flat fill when off)
    pub background_art: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            speech: true,
            chimes: true,
            volume: 0.8,
            background_art: true,
        }
    }
}

impl Settings {
    const STORAGE_KEY: &'static str = "mathfall_settings";

    /// Load settings from LocalStorage (wasm only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(settings) = serde_json::from_str(&json) {
                    log::info!("loaded settings from LocalStorage");
                    return settings;
                }
            }
        }

        log::info!("using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (wasm only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let mut settings = Settings::default();
        settings.speech = false;
        settings.volume = 0.25;
        let json = serde_json::to_string(&settings).unwrap();
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert!(!back.speech);
        assert_eq!(back.volume, 0.25);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let back: Settings = serde_json::from_str(r#"{"speech": false}"#).unwrap();
        assert!(!back.speech);
        assert!(back.chimes);
        assert_eq!(back.volume, 0.8);
    }
}
