use serde_json::Value;

/// Recover a JSON object embedded anywhere in `text`, or `None`.
///
/// A direct full-text parse is tried first; failing that, a depth-counting
/// scan starts at the first `{` and attempts a parse at every position
/// where brace nesting returns to zero, returning the first candidate that
/// parses as an object. The scan counts `{`/`}` without tracking string
/// literals, so a brace inside a quoted value can defeat it; callers fall
/// back to the raw text in that case.
pub fn extract_object(text: &str) -> Option<Value> {
	if let Ok(value) = serde_json::from_str::<Value>(text)
		&& value.is_object()
	{
		return Some(value);
	}

	let start = text.find('{')?;
	let mut depth = 0_i64;

	for (offset, ch) in text.char_indices() {
		if offset < start {
			continue;
		}

		match ch {
			'{' => depth += 1,
			'}' => depth -= 1,
			_ => {},
		}

		if depth == 0
			&& let Ok(value) = serde_json::from_str::<Value>(&text[start..offset + ch.len_utf8()])
			&& value.is_object()
		{
			return Some(value);
		}
	}

	None
}
