use std::{
	fs,
	path::{Path, PathBuf},
};

use color_eyre::Result;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const STATE_FILE: &str = "session.toml";

/// The client's persistent session identity. One identity maps to one
/// memory record on the server; discarding it abandons the old session
/// rather than deleting anything.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct SessionState {
	pub session_id: String,
}

pub fn default_path() -> PathBuf {
	dirs::config_dir()
		.or_else(|| dirs::home_dir().map(|home| home.join(".config")))
		.unwrap_or_else(|| PathBuf::from(".config"))
		.join("sage")
		.join(STATE_FILE)
}

/// Load the stored identity, minting and persisting a fresh one when the
/// state file is missing or unreadable.
pub fn load_or_create(path: &Path) -> Result<SessionState> {
	if path.exists() {
		let raw = fs::read_to_string(path)?;

		if let Ok(state) = toml::from_str::<SessionState>(&raw) {
			return Ok(state);
		}
	}

	reset(path)
}

/// Overwrite the stored identity with a fresh one.
pub fn reset(path: &Path) -> Result<SessionState> {
	let state = SessionState { session_id: Uuid::new_v4().to_string() };

	if let Some(parent) = path.parent() {
		fs::create_dir_all(parent)?;
	}

	fs::write(path, toml::to_string(&state)?)?;

	Ok(state)
}
