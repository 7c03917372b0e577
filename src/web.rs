//! Browser bindings
//!
//! The page owns timing, rendering and sound; it drives one `CoinFlipApp`
//! and exchanges plain JSON strings with it.

use wasm_bindgen::prelude::*;

use crate::coins::COINS;
use crate::engine::{Side, parse_batch_count};
use crate::export::ExportFormat;
use crate::interpret::{FAILURE_MESSAGE, OfflineInterpreter, interpret_or_fallback};
use crate::session::FlipSession;
use crate::settings::Settings;
use crate::now_ms;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
    log::info!("Cosmic Coin Flip loaded");
}

fn to_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| {
        log::warn!("Serialization failed: {}", e);
        "null".to_string()
    })
}

#[wasm_bindgen]
pub struct CoinFlipApp {
    session: FlipSession,
    settings: Settings,
}

#[wasm_bindgen]
impl CoinFlipApp {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        let seed = js_sys::Date::now() as u64;
        let mut settings = Settings::load();
        let mut session = FlipSession::new(seed);
        settings.coin = session.restore_coin(&settings.coin).id.to_string();
        log::info!("Session started with seed: {}", seed);
        Self { session, settings }
    }

    /// Start a flip; `{"side","rotation"}` or `null` while one is in flight
    pub fn flip(&mut self, question: Option<String>) -> String {
        match self.session.begin_flip(question.as_deref()) {
            Some((side, rotation)) => to_json(&serde_json::json!({
                "side": side,
                "rotation": rotation,
            })),
            None => "null".to_string(),
        }
    }

    /// Settle the in-flight flip; the new record or `null`
    pub fn settle(&mut self) -> String {
        let record = self.session.settle(now_ms());
        to_json(&record)
    }

    #[wasm_bindgen(getter)]
    pub fn flipping(&self) -> bool {
        self.session.is_flipping()
    }

    #[wasm_bindgen(getter)]
    pub fn rotation(&self) -> f64 {
        self.session.rotation()
    }

    #[wasm_bindgen(getter)]
    pub fn side(&self) -> String {
        self.session.shown_side().to_string()
    }

    pub fn stats(&self) -> String {
        let stats = self.session.stats();
        to_json(&serde_json::json!({
            "stats": stats,
            "headsPercent": stats.heads_percent(),
            "tailsPercent": stats.tails_percent(),
            "hotStreak": stats.is_hot_streak(),
        }))
    }

    pub fn history(&self) -> String {
        to_json(&self.session.history())
    }

    pub fn reset(&mut self) {
        self.session.reset();
    }

    /// Ids are exposed to JS as plain numbers
    pub fn attach_interpretation(&mut self, id: f64, text: String) -> bool {
        self.session.attach_interpretation(id as u64, text)
    }

    pub fn coins(&self) -> String {
        let coins: Vec<_> = COINS
            .iter()
            .map(|c| serde_json::json!({ "id": c.id, "label": c.display_name() }))
            .collect();
        to_json(&coins)
    }

    pub fn select_coin(&mut self, id: &str) -> bool {
        if !self.session.select_coin(id) {
            return false;
        }
        self.settings.coin = id.to_string();
        self.settings.save();
        true
    }

    /// Run a batch from the raw count field text
    pub fn run_batch(&mut self, count: &str) -> String {
        let count = parse_batch_count(count);
        self.settings.batch_count = count as i64;
        self.settings.save();
        let batch = self.session.run_batch(count as i64);
        to_json(&serde_json::json!({
            "batch": batch,
            "headsPercent": batch.heads_percent(),
            "tailsPercent": batch.tails_percent(),
        }))
    }

    pub fn set_labels(&mut self, heads: String, tails: String, separator: String) {
        self.settings.heads_label = heads;
        self.settings.tails_label = tails;
        self.settings.separator = separator;
        self.settings.save();
    }

    /// Export the current batch as `"text"` or `"csv"`
    pub fn export(&self, format: &str) -> Option<String> {
        let format = ExportFormat::from_str(format)?;
        Some(self.session.export_batch(format, &self.settings.batch_labels()))
    }

    pub fn export_file_name(&self, format: &str) -> Option<String> {
        ExportFormat::from_str(format).map(|f| f.file_name().to_string())
    }

    pub fn export_mime_type(&self, format: &str) -> Option<String> {
        ExportFormat::from_str(format).map(|f| f.mime_type().to_string())
    }

    pub fn share_text(&self) -> Option<String> {
        let url = web_sys::window()
            .and_then(|w| w.location().href().ok())
            .unwrap_or_default();
        self.session.share_text(&url)
    }

    /// Queued feedback events; empty when sound is off
    pub fn drain_events(&mut self) -> String {
        let events = self.session.drain_events();
        if self.settings.sound {
            to_json(&events)
        } else {
            "[]".to_string()
        }
    }

    pub fn set_sound(&mut self, on: bool) {
        self.settings.sound = on;
        self.settings.save();
    }

    pub fn set_api_key(&mut self, key: Option<String>) {
        self.settings.api_key = key;
        self.settings.save();
    }

    #[wasm_bindgen(getter)]
    pub fn api_key(&self) -> Option<String> {
        self.settings.api_key().map(str::to_string)
    }

    #[wasm_bindgen(getter)]
    pub fn model(&self) -> String {
        self.settings.model.clone()
    }

    /// Current preferences, for populating the page's controls
    pub fn settings(&self) -> String {
        self.settings.to_json().unwrap_or_else(|| "null".to_string())
    }

    #[wasm_bindgen(getter)]
    pub fn coin(&self) -> String {
        self.settings.coin.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn batch_count(&self) -> f64 {
        self.settings.batch_count as f64
    }

    #[wasm_bindgen(getter)]
    pub fn heads_label(&self) -> String {
        self.settings.heads_label.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn tails_label(&self) -> String {
        self.settings.tails_label.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn separator(&self) -> String {
        self.settings.separator.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn sound(&self) -> bool {
        self.settings.sound
    }

    /// Interpret a settled flip with the configured key and model
    ///
    /// The promise always resolves to display text.
    pub fn interpret(&self, side: String, question: String) -> js_sys::Promise {
        let gemini = self.settings.gemini();
        wasm_bindgen_futures::future_to_promise(async move {
            let Some(side) = Side::from_str(&side) else {
                log::warn!("Cannot interpret unknown side: {}", side);
                return Ok(JsValue::from_str(FAILURE_MESSAGE));
            };
            let text = match gemini {
                Some(gemini) => interpret_or_fallback(&gemini, side, &question).await,
                None => interpret_or_fallback(&OfflineInterpreter, side, &question).await,
            };
            Ok(JsValue::from_str(&text))
        })
    }
}

impl Default for CoinFlipApp {
    fn default() -> Self {
        Self::new()
    }
}
