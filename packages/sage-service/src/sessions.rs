use std::{
	collections::HashMap,
	sync::{Arc, Mutex},
};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// One logical actor per session key: the guard returned by
/// [`acquire`](SessionLocks::acquire) keeps at most one turn in flight for
/// a key, while turns for distinct keys proceed independently.
#[derive(Default)]
pub struct SessionLocks {
	inner: Mutex<HashMap<String, Arc<AsyncMutex<()>>>>,
}
impl SessionLocks {
	pub async fn acquire(&self, session_key: &str) -> OwnedMutexGuard<()> {
		let lock = {
			let mut inner = self.inner.lock().unwrap_or_else(|err| err.into_inner());

			inner.entry(session_key.to_string()).or_default().clone()
		};

		lock.lock_owned().await
	}
}
