#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error(transparent)]
	Sqlx(#[from] sqlx::Error),
	#[error("Invalid memory record: {0}")]
	Decode(String),
	#[error("Failed to encode memory record: {0}")]
	Encode(String),
}
