use serde_json::Value;

/// Display-side unwrapping for replies that leaked structure through the
/// boundary: a reply that is (or contains, from its first brace onward) a
/// JSON object carrying a `reply` string — directly or one level under a
/// `response` envelope — surfaces that string. Everything else, including
/// any parse failure, passes through unchanged.
pub fn sanitize_reply(reply: &str) -> String {
	let trimmed = reply.trim();

	if trimmed.starts_with('{')
		&& trimmed.ends_with('}')
		&& let Ok(value) = serde_json::from_str::<Value>(trimmed)
		&& let Some(inner) = reply_field(&value)
	{
		return inner.to_string();
	}

	if let Some(start) = trimmed.find('{')
		&& let Ok(value) = serde_json::from_str::<Value>(&trimmed[start..])
		&& let Some(inner) = reply_field(&value)
	{
		return inner.to_string();
	}

	reply.to_string()
}

fn reply_field(value: &Value) -> Option<&str> {
	if let Some(reply) = value.get("reply").and_then(Value::as_str) {
		return Some(reply);
	}

	value.get("response").and_then(|response| response.get("reply")).and_then(Value::as_str)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn plain_text_passes_through() {
		assert_eq!(sanitize_reply("Day 1: read ch.1"), "Day 1: read ch.1");
	}

	#[test]
	fn unwraps_json_object_reply() {
		assert_eq!(sanitize_reply(r#"{"reply":"Here is your plan."}"#), "Here is your plan.");
	}

	#[test]
	fn unwraps_enveloped_reply() {
		assert_eq!(
			sanitize_reply(r#"{"response":{"reply":"Nested but fine."}}"#),
			"Nested but fine."
		);
	}

	#[test]
	fn unwraps_object_after_leading_prose() {
		assert_eq!(sanitize_reply(r#"Sure! {"reply":"Trailing object."}"#), "Trailing object.");
	}

	#[test]
	fn parse_failures_fall_through() {
		assert_eq!(sanitize_reply("{broken json"), "{broken json");
		assert_eq!(sanitize_reply(r#"{"status":"ok"}"#), r#"{"status":"ok"}"#);
	}

	#[test]
	fn untrimmed_input_is_returned_verbatim_on_fallthrough() {
		assert_eq!(sanitize_reply("  spaced out  "), "  spaced out  ");
	}
}
