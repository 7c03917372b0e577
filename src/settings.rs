//! User preferences
//!
//! Persisted in LocalStorage; flips and stats are never persisted.

use serde::{Deserialize, Serialize};

use crate::coins;
use crate::consts::DEFAULT_BATCH;
use crate::export::BatchLabels;
use crate::interpret::{DEFAULT_MODEL, GeminiInterpreter};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Coin design id
    pub coin: String,

    // === Batch ===
    /// Requested batch size (clamped when a batch runs)
    pub batch_count: i64,
    pub heads_label: String,
    pub tails_label: String,
    /// Separator as typed; `\n` means newline
    pub separator: String,

    // === Feedback ===
    pub sound: bool,

    // === Interpretation ===
    /// Gemini API key; none means interpretations are disabled
    pub api_key: Option<String>,
    pub model: String,
}

impl Default for Settings {
    fn default() -> Self {
        let labels = BatchLabels::default();
        Self {
            coin: coins::default_coin().id.to_string(),

            batch_count: DEFAULT_BATCH as i64,
            heads_label: labels.heads,
            tails_label: labels.tails,
            separator: labels.separator,

            sound: true,

            api_key: None,
            model: DEFAULT_MODEL.to_string(),
        }
    }
}

impl Settings {
    /// Labels for batch export
    pub fn batch_labels(&self) -> BatchLabels {
        BatchLabels::new(&self.heads_label, &self.tails_label, &self.separator)
    }

    /// API key, if one is set and non-blank
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().map(str::trim).filter(|k| !k.is_empty())
    }

    /// Gemini client for the configured key and model; none without a key
    pub fn gemini(&self) -> Option<GeminiInterpreter> {
        let model = self.model.trim();
        let model = if model.is_empty() { DEFAULT_MODEL } else { model };
        self.api_key().map(|key| GeminiInterpreter::new(key, model))
    }

    /// Parse stored JSON, falling back to defaults for missing fields
    pub fn from_json(json: &str) -> Option<Self> {
        serde_json::from_str(json).ok()
    }

    /// Storage format, also handed to the page as-is
    pub fn to_json(&self) -> Option<String> {
        serde_json::to_string(self)
            .map_err(|e| log::warn!("Failed to serialize settings: {}", e))
            .ok()
    }

    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "cosmic_coin_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Some(settings) = Self::from_json(&json) {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Some(json) = self.to_json() {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native: defaults, with the API key taken from the environment
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let mut settings = Self::default();
        settings.api_key = std::env::var("COSMIC_COIN_API_KEY").ok();
        settings
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.coin, "usd");
        assert_eq!(settings.batch_count, 10);
        assert_eq!(settings.batch_labels(), BatchLabels::default());
        assert_eq!(settings.api_key(), None);
        assert_eq!(settings.model, "gemini-2.5-flash");
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{"heads_label":"Yes","separator":"\\n"}"#).unwrap();
        assert_eq!(settings.heads_label, "Yes");
        assert_eq!(settings.tails_label, "Tails");
        assert_eq!(settings.batch_labels().effective_separator(), "\n");
        assert!(settings.sound);
    }

    #[test]
    fn test_garbage_json_rejected() {
        assert!(Settings::from_json("{not json").is_none());
    }

    #[test]
    fn test_blank_api_key_ignored() {
        let settings = Settings {
            api_key: Some("   ".to_string()),
            ..Settings::default()
        };
        assert_eq!(settings.api_key(), None);

        let settings = Settings {
            api_key: Some("abc".to_string()),
            ..Settings::default()
        };
        assert_eq!(settings.api_key(), Some("abc"));
    }

    #[test]
    fn test_roundtrip_through_storage_format() {
        let settings = Settings {
            coin: "btc".to_string(),
            batch_count: 500,
            ..Settings::default()
        };
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json), Some(settings));
    }

    #[test]
    fn test_json_exposes_batch_preferences() {
        let settings = Settings {
            batch_count: 250,
            heads_label: "H".to_string(),
            tails_label: "T".to_string(),
            separator: "\\n".to_string(),
            ..Settings::default()
        };
        let json: serde_json::Value = serde_json::from_str(&settings.to_json().unwrap()).unwrap();
        assert_eq!(json["batch_count"], 250);
        assert_eq!(json["heads_label"], "H");
        assert_eq!(json["tails_label"], "T");
        assert_eq!(json["separator"], "\\n");
    }

    #[test]
    fn test_gemini_follows_key_and_model() {
        assert_eq!(Settings::default().gemini(), None);

        let settings = Settings {
            api_key: Some("  abc ".to_string()),
            model: "gemini-2.0-pro".to_string(),
            ..Settings::default()
        };
        assert_eq!(settings.gemini(), Some(GeminiInterpreter::new("abc", "gemini-2.0-pro")));

        let settings = Settings {
            api_key: Some("abc".to_string()),
            model: " ".to_string(),
            ..Settings::default()
        };
        assert_eq!(settings.gemini().map(|g| g.model), Some(DEFAULT_MODEL.to_string()));

        let settings = Settings {
            api_key: Some("   ".to_string()),
            ..Settings::default()
        };
        assert_eq!(settings.gemini(), None);
    }
}
