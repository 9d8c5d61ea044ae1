use serde_json::Value;

use crate::{extract, normalize};

/// Reply used when neither the payload nor the raw response yields text.
pub const FALLBACK_REPLY: &str = "Sorry — I had trouble generating a response.";

/// Unwrap a `{"response": {...}}` envelope one level, if present.
pub fn unwrap_envelope(mut value: Value) -> Value {
	if value.get("response").is_some_and(Value::is_object)
		&& let Some(inner) = value.get_mut("response")
	{
		return inner.take();
	}

	value
}

/// Resolve the structured payload from a raw engine response.
///
/// A raw value that already carries a structured `response` object is used
/// directly without re-extraction; anything else is flattened to text and
/// run through the embedded-object extractor, unwrapping one envelope
/// level from whatever that recovers.
pub fn resolve(raw: &Value) -> Option<Value> {
	if let Some(response) = raw.get("response").filter(|value| value.is_object()) {
		return Some(response.clone());
	}

	let text = normalize::to_text(raw);

	extract::extract_object(&text).map(unwrap_envelope)
}

/// Resolve the user-facing reply: the payload's non-empty `reply` string,
/// else the non-empty normalized raw text, else [`FALLBACK_REPLY`]. The
/// result is never empty.
pub fn resolve_reply(payload: Option<&Value>, raw: &Value) -> String {
	if let Some(reply) = payload.and_then(|payload| payload.get("reply")).and_then(Value::as_str)
		&& !reply.is_empty()
	{
		return reply.to_string();
	}

	let text = normalize::to_text(raw);

	if text.is_empty() { FALLBACK_REPLY.to_string() } else { text }
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	#[test]
	fn structured_envelope_is_used_directly() {
		let raw = json!({
			"response": { "reply": "Here is your plan.", "memory_update": { "goals": ["x"] } },
			"usage": { "tokens": 12 },
		});
		let payload = resolve(&raw).expect("Expected a payload.");

		assert_eq!(payload["reply"], "Here is your plan.");
		assert_eq!(payload["memory_update"]["goals"][0], "x");
	}

	#[test]
	fn text_responses_go_through_extraction() {
		let raw = json!("Sure thing. {\"reply\":\"Day 1: read ch.1\"}");
		let payload = resolve(&raw).expect("Expected a payload.");

		assert_eq!(payload["reply"], "Day 1: read ch.1");
	}

	#[test]
	fn extracted_envelope_is_unwrapped() {
		let raw = json!("{\"response\":{\"reply\":\"unwrapped\"}}");
		let payload = resolve(&raw).expect("Expected a payload.");

		assert_eq!(payload["reply"], "unwrapped");
	}

	#[test]
	fn string_response_field_is_not_an_envelope() {
		// A string under `response` is a text wrapper, not a structured
		// payload; it normalizes to text and fails extraction.
		let raw = json!({ "response": "plain prose with no braces" });

		assert!(resolve(&raw).is_none());
	}

	#[test]
	fn malformed_text_yields_no_payload() {
		let raw = json!("Sorry, I cannot help with that {invalid json");

		assert!(resolve(&raw).is_none());
	}

	#[test]
	fn reply_prefers_payload_field() {
		let payload = json!({ "reply": "Sure, when is it due?" });
		let raw = json!("ignored raw text");

		assert_eq!(resolve_reply(Some(&payload), &raw), "Sure, when is it due?");
	}

	#[test]
	fn reply_falls_back_to_raw_text() {
		let raw = json!("Sorry, I cannot help with that {invalid json");

		assert_eq!(resolve_reply(None, &raw), "Sorry, I cannot help with that {invalid json");

		// A payload without a string reply falls through the same way.
		let payload = json!({ "memory_update": { "goals": [] } });

		assert_eq!(
			resolve_reply(Some(&payload), &raw),
			"Sorry, I cannot help with that {invalid json"
		);
	}

	#[test]
	fn empty_reply_field_falls_through() {
		let payload = json!({ "reply": "" });
		let raw = json!("raw text");

		assert_eq!(resolve_reply(Some(&payload), &raw), "raw text");
	}

	#[test]
	fn fallback_reply_when_everything_is_empty() {
		let payload = json!({ "reply": 7 });
		let raw = json!("");

		assert_eq!(resolve_reply(Some(&payload), &raw), FALLBACK_REPLY);
	}
}
