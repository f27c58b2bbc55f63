//! Input normalizer.
//!
//! The hook payload is a JSON object carrying the prompt under `prompt`, or
//! under `message` for older hosts. Anything else (empty input, non-JSON,
//! a non-object, blank text) yields `None`. The caller treats that as
//! "no route" and writes nothing.

use serde_json::Value;

use lyra_types::routing::PromptContext;

/// Payload keys accepted, in priority order.
pub const PROMPT_KEYS: &[&str] = &["prompt", "message"];

/// Extract the prompt text from a raw payload.
pub fn extract_prompt(payload: &str) -> Option<String> {
    let value: Value = match serde_json::from_str(payload) {
        Ok(v) => v,
        Err(e) => {
            tracing::debug!(error = %e, "hook payload is not JSON");
            return None;
        }
    };

    let prompt = PROMPT_KEYS
        .iter()
        .filter_map(|key| value.get(key).and_then(Value::as_str))
        .map(str::trim)
        .find(|text| !text.is_empty());

    if prompt.is_none() {
        tracing::debug!("hook payload has no usable prompt field");
    }
    prompt.map(str::to_string)
}

/// Build the [`PromptContext`] for a payload, or `None` when unusable.
pub fn normalize_payload(payload: &str, has_managed_project: bool) -> Option<PromptContext> {
    extract_prompt(payload).map(|text| PromptContext::new(&text, has_managed_project))
}
