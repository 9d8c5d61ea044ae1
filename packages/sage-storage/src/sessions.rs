use sqlx::SqlitePool;
use time::OffsetDateTime;

use sage_domain::memory::Memory;

use crate::{Error, Result};

/// Load the memory record for a session key, or `None` when the session
/// has never been persisted.
pub async fn load_memory(pool: &SqlitePool, session_key: &str) -> Result<Option<Memory>> {
	let raw: Option<String> =
		sqlx::query_scalar("SELECT memory FROM session_memory WHERE session_key = ?1")
			.bind(session_key)
			.fetch_optional(pool)
			.await?;

	raw.map(|raw| serde_json::from_str(&raw).map_err(|err| Error::Decode(err.to_string())))
		.transpose()
}

/// Persist the full memory record for a session key, replacing any prior
/// record in one statement.
pub async fn save_memory(
	pool: &SqlitePool,
	session_key: &str,
	memory: &Memory,
	now: OffsetDateTime,
) -> Result<()> {
	let raw = serde_json::to_string(memory).map_err(|err| Error::Encode(err.to_string()))?;

	sqlx::query(
		"\
INSERT INTO session_memory (session_key, memory, updated_at)
VALUES (?1, ?2, ?3)
ON CONFLICT(session_key) DO UPDATE SET
	memory = excluded.memory,
	updated_at = excluded.updated_at",
	)
	.bind(session_key)
	.bind(raw.as_str())
	.bind(now)
	.execute(pool)
	.await?;

	Ok(())
}
