use std::time::Duration;

use color_eyre::Result;
use reqwest::Client;
use serde_json::Value;

/// One chat-completion call against the configured engine endpoint.
///
/// The returned value's shape is deliberately unconstrained: the body is
/// decoded as JSON when possible and kept as raw text otherwise. Shape
/// recognition is the caller's concern. No retries; a failed call fails
/// the turn.
pub async fn generate(cfg: &sage_config::LlmProviderConfig, messages: &[Value]) -> Result<Value> {
	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let url = format!("{}{}", cfg.api_base, cfg.path);
	let body = serde_json::json!({
		"model": cfg.model,
		"temperature": cfg.temperature,
		"max_tokens": cfg.max_tokens,
		"messages": messages,
	});
	let res = client
		.post(&url)
		.headers(crate::auth_headers(&cfg.api_key, &cfg.default_headers)?)
		.json(&body)
		.send()
		.await?;
	let text = res.error_for_status()?.text().await?;

	match serde_json::from_str::<Value>(&text) {
		Ok(value) => Ok(value),
		Err(_) => Ok(Value::String(text)),
	}
}
