use serde_json::Value;

/// Recognized shapes of a generation-engine response, in resolution order.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ResponseShape<'a> {
	/// The value is already plain text.
	Text(&'a str),
	/// An object with a top-level string under a known wrapper name.
	Wrapped(&'a str),
	/// An object with a nested `message.content` string.
	MessageContent(&'a str),
	/// An object with an OpenAI-style `choices[0].message.content` string.
	ChoiceContent(&'a str),
	/// Anything else; rendered by serializing the whole value.
	Opaque,
}

/// Top-level wrapper fields probed in priority order.
const WRAPPER_FIELDS: [&str; 3] = ["response", "result", "output_text"];

pub fn classify(value: &Value) -> ResponseShape<'_> {
	if let Value::String(text) = value {
		return ResponseShape::Text(text);
	}

	if let Value::Object(map) = value {
		for field in WRAPPER_FIELDS {
			if let Some(text) = map.get(field).and_then(Value::as_str) {
				return ResponseShape::Wrapped(text);
			}
		}

		if let Some(text) =
			map.get("message").and_then(|message| message.get("content")).and_then(Value::as_str)
		{
			return ResponseShape::MessageContent(text);
		}
		if let Some(text) = map
			.get("choices")
			.and_then(|choices| choices.get(0))
			.and_then(|choice| choice.get("message"))
			.and_then(|message| message.get("content"))
			.and_then(Value::as_str)
		{
			return ResponseShape::ChoiceContent(text);
		}
	}

	ResponseShape::Opaque
}

/// Best-effort plain-text rendition of an engine response.
///
/// Total over every input: unrecognized values serialize wholesale, and
/// `null` renders as the literal `null` placeholder.
pub fn to_text(value: &Value) -> String {
	match classify(value) {
		ResponseShape::Text(text)
		| ResponseShape::Wrapped(text)
		| ResponseShape::MessageContent(text)
		| ResponseShape::ChoiceContent(text) => text.to_string(),
		ResponseShape::Opaque => value.to_string(),
	}
}
