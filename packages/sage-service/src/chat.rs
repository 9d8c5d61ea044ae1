use std::time::Duration;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tokio::time as tokio_time;

use sage_domain::memory::{MemorySnapshot, MemoryUpdate, Role};
use sage_domain::payload;
use sage_storage::sessions;

use crate::{Error, Result, SageService, prompt};

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ChatRequest {
	pub session_key: String,
	pub message: String,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ChatResponse {
	pub reply: String,
	pub memory: MemorySnapshot,
}

impl SageService {
	/// Run one turn: load the session's memory, consult the engine, merge
	/// any memory update, append the exchange to the transcript, and
	/// persist. Every failure is terminal for the turn; memory is written
	/// all-or-nothing.
	pub async fn chat(&self, req: ChatRequest) -> Result<ChatResponse> {
		let session_key = req.session_key.trim().to_string();
		let message = req.message.trim().to_string();

		if session_key.is_empty() {
			return Err(Error::InvalidRequest { message: "session_key is required.".to_string() });
		}
		if message.is_empty() {
			return Err(Error::InvalidRequest { message: "message is required.".to_string() });
		}

		let _turn = self.sessions.acquire(&session_key).await;
		let mut memory =
			sessions::load_memory(&self.db.pool, &session_key).await?.unwrap_or_default();
		let messages = prompt::build_messages(&memory, &message);
		let llm = &self.cfg.providers.llm;
		let raw = match tokio_time::timeout(
			Duration::from_millis(llm.timeout_ms),
			self.providers.generation.generate(llm, &messages),
		)
		.await
		{
			Ok(Ok(value)) => value,
			Ok(Err(err)) => return Err(Error::Generation { message: err.to_string() }),
			Err(_) => return Err(Error::GenerationTimeout { timeout_ms: llm.timeout_ms }),
		};
		let resolved = payload::resolve(&raw);

		if resolved.is_none() {
			tracing::debug!(
				%session_key,
				"Generation output carried no structured payload; replying with raw text."
			);
		}

		let reply = payload::resolve_reply(resolved.as_ref(), &raw);

		if let Some(update) = resolved.as_ref().and_then(|payload| payload.get("memory_update")) {
			memory.merge(MemoryUpdate::from_value(update));
		}

		memory.push_turn(Role::User, message);
		memory.push_turn(Role::Assistant, reply.clone());

		let snapshot = memory.snapshot();

		sessions::save_memory(&self.db.pool, &session_key, &memory, OffsetDateTime::now_utc())
			.await?;

		Ok(ChatResponse { reply, memory: snapshot })
	}
}
