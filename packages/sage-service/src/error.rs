pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
	#[error("Generation failed: {message}")]
	Generation { message: String },
	#[error("Generation timed out after {timeout_ms} ms.")]
	GenerationTimeout { timeout_ms: u64 },
	#[error("Storage error: {message}")]
	Storage { message: String },
}
impl From<sage_storage::Error> for Error {
	fn from(err: sage_storage::Error) -> Self {
		Self::Storage { message: err.to_string() }
	}
}
