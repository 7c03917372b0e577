//! Optional AI interpretation of a flip
//!
//! The session never waits on this: a settled flip is recorded first, and the
//! interpretation is attached to that one record whenever (and if) it arrives.
//! Every failure collapses into a fixed placeholder via `interpret_or_fallback`.

use std::future::Future;

use serde::Deserialize;
use serde_json::{Value, json};
use thiserror::Error;

use crate::engine::Side;

/// Shown when no API key is configured
pub const MISSING_KEY_MESSAGE: &str = "The stars are silent (API Key missing).";
/// Shown when the service fails for any other reason
pub const FAILURE_MESSAGE: &str = "The cosmos is clouded right now. Try again later.";

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InterpretError {
    #[error("no API key configured")]
    MissingApiKey,
    #[error("request failed: {0}")]
    Transport(String),
    #[error("service returned HTTP {0}")]
    Status(u16),
    #[error("malformed response: {0}")]
    Malformed(String),
    #[error("response contained no text")]
    EmptyResponse,
}

/// Something that can read meaning into a flip
pub trait Interpreter {
    fn interpret(
        &self,
        side: Side,
        question: &str,
    ) -> impl Future<Output = Result<String, InterpretError>>;
}

/// Default capability: no service configured
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineInterpreter;

impl Interpreter for OfflineInterpreter {
    async fn interpret(&self, _side: Side, _question: &str) -> Result<String, InterpretError> {
        Err(InterpretError::MissingApiKey)
    }
}

/// Best-effort interpretation: never fails, degrades to a placeholder
pub async fn interpret_or_fallback<I: Interpreter>(
    interpreter: &I,
    side: Side,
    question: &str,
) -> String {
    match interpreter.interpret(side, question).await {
        Ok(text) => text,
        Err(InterpretError::MissingApiKey) => MISSING_KEY_MESSAGE.to_string(),
        Err(e) => {
            log::warn!("Interpretation failed: {e}");
            FAILURE_MESSAGE.to_string()
        }
    }
}

/// Fortune-teller prompt for one flip
pub fn build_prompt(side: Side, question: &str) -> String {
    format!(
        "The user just flipped a coin.\n\
         Result: {side}\n\
         User's Question/Dilemma: \"{question}\"\n\n\
         Act as a mystical, slightly witty, and modern fortune teller.\n\
         Interpret this coin flip result specifically for their question.\n\
         Keep it short (max 2 sentences). Be decisive but fun."
    )
}

/// Google Gemini `generateContent` client
///
/// Requests go out through the browser's `fetch`, so `Interpreter` is only
/// implemented on wasm32.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeminiInterpreter {
    pub api_key: String,
    pub model: String,
}

impl GeminiInterpreter {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}/{}:generateContent", API_BASE, self.model)
    }

    pub fn request_body(&self, side: Side, question: &str) -> Value {
        json!({
            "contents": [{
                "parts": [{ "text": build_prompt(side, question) }]
            }]
        })
    }
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Deserialize)]
struct Part {
    text: Option<String>,
}

/// Extract the trimmed text of the first candidate
pub fn parse_response(body: &str) -> Result<String, InterpretError> {
    let response: GenerateResponse =
        serde_json::from_str(body).map_err(|e| InterpretError::Malformed(e.to_string()))?;
    let text: String = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();
    let text = text.trim();
    if text.is_empty() {
        return Err(InterpretError::EmptyResponse);
    }
    Ok(text.to_string())
}

#[cfg(target_arch = "wasm32")]
fn js_transport(err: wasm_bindgen::JsValue) -> InterpretError {
    InterpretError::Transport(format!("{:?}", err))
}

#[cfg(target_arch = "wasm32")]
impl Interpreter for GeminiInterpreter {
    async fn interpret(&self, side: Side, question: &str) -> Result<String, InterpretError> {
        use wasm_bindgen::{JsCast, JsValue};
        use wasm_bindgen_futures::JsFuture;
        use web_sys::{Request, RequestInit, RequestMode, Response};

        if self.api_key.is_empty() {
            return Err(InterpretError::MissingApiKey);
        }

        let body = self.request_body(side, question).to_string();
        let opts = RequestInit::new();
        opts.set_method("POST");
        opts.set_mode(RequestMode::Cors);
        opts.set_body(&JsValue::from_str(&body));

        let request = Request::new_with_str_and_init(&self.endpoint(), &opts).map_err(js_transport)?;
        let headers = request.headers();
        headers.set("Content-Type", "application/json").map_err(js_transport)?;
        headers.set("x-goog-api-key", &self.api_key).map_err(js_transport)?;

        let window = web_sys::window().ok_or_else(|| InterpretError::Transport("no window".to_string()))?;
        let response = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(js_transport)?;
        let response: Response = response.dyn_into().map_err(js_transport)?;
        if !response.ok() {
            return Err(InterpretError::Status(response.status()));
        }

        let text = JsFuture::from(response.text().map_err(js_transport)?)
            .await
            .map_err(js_transport)?;
        let text = text.as_string().ok_or(InterpretError::EmptyResponse)?;
        parse_response(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Canned interpreter for exercising the fallback path
    struct Scripted(Result<String, InterpretError>);

    impl Interpreter for Scripted {
        async fn interpret(&self, _side: Side, _question: &str) -> Result<String, InterpretError> {
            self.0.clone()
        }
    }

    #[test]
    fn test_offline_falls_back_to_missing_key() {
        let text = pollster::block_on(interpret_or_fallback(&OfflineInterpreter, Side::Heads, "Pizza?"));
        assert_eq!(text, MISSING_KEY_MESSAGE);
    }

    #[test]
    fn test_failure_falls_back_to_clouded() {
        let interpreter = Scripted(Err(InterpretError::Status(503)));
        let text = pollster::block_on(interpret_or_fallback(&interpreter, Side::Tails, "Move?"));
        assert_eq!(text, FAILURE_MESSAGE);
    }

    #[test]
    fn test_success_passes_through() {
        let interpreter = Scripted(Ok("Order the pizza.".to_string()));
        let text = pollster::block_on(interpret_or_fallback(&interpreter, Side::Heads, "Pizza?"));
        assert_eq!(text, "Order the pizza.");
    }

    #[test]
    fn test_prompt_mentions_side_and_question() {
        let prompt = build_prompt(Side::Tails, "Should I quit?");
        assert!(prompt.contains("Result: TAILS"));
        assert!(prompt.contains("\"Should I quit?\""));
        assert!(prompt.contains("max 2 sentences"));
    }

    #[test]
    fn test_request_shape() {
        let gemini = GeminiInterpreter::new("key", DEFAULT_MODEL);
        assert_eq!(
            gemini.endpoint(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
        );
        let body = gemini.request_body(Side::Heads, "Go?");
        let text = body["contents"][0]["parts"][0]["text"].as_str().unwrap();
        assert!(text.contains("Result: HEADS"));
    }

    #[test]
    fn test_parse_response() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"  Heads says yes.\n"}]}}]}"#;
        assert_eq!(parse_response(body), Ok("Heads says yes.".to_string()));

        assert_eq!(parse_response(r#"{"candidates":[]}"#), Err(InterpretError::EmptyResponse));
        assert!(matches!(parse_response("not json"), Err(InterpretError::Malformed(_))));
    }
}
