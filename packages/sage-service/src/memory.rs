use sage_domain::memory::MemorySnapshot;
use sage_storage::sessions;

use crate::{Error, Result, SageService};

impl SageService {
	/// Chat-free snapshot of a session's memory. A key that was never
	/// persisted yields the empty default.
	pub async fn memory(&self, session_key: &str) -> Result<MemorySnapshot> {
		let session_key = session_key.trim();

		if session_key.is_empty() {
			return Err(Error::InvalidRequest { message: "session_key is required.".to_string() });
		}

		let memory =
			sessions::load_memory(&self.db.pool, session_key).await?.unwrap_or_default();

		Ok(memory.snapshot())
	}
}
