mod error;

pub use error::{Error, Result};

use std::{env, fs, io, path::PathBuf};

use uuid::Uuid;

/// A throwaway SQLite database file in the system temp directory.
///
/// Each instance gets a unique filename, so tests can run concurrently
/// without sharing state. Call [`cleanup`](TestDatabase::cleanup) at the
/// end of the test; `Drop` removes leftovers best-effort.
pub struct TestDatabase {
	path: PathBuf,
	dsn: String,
	cleaned: bool,
}
impl TestDatabase {
	pub fn new() -> Result<Self> {
		let path = env::temp_dir().join(format!("sage_test_{}.db", Uuid::new_v4().simple()));
		let dsn = format!("sqlite://{}", path.display());

		Ok(Self { path, dsn, cleaned: false })
	}

	pub fn dsn(&self) -> &str {
		&self.dsn
	}

	pub fn cleanup(mut self) -> Result<()> {
		self.cleanup_inner()
	}

	fn cleanup_inner(&mut self) -> Result<()> {
		if self.cleaned {
			return Ok(());
		}

		// SQLite may leave WAL and shared-memory siblings next to the
		// database file.
		for suffix in ["", "-wal", "-shm"] {
			let mut file = self.path.clone().into_os_string();

			file.push(suffix);

			match fs::remove_file(&file) {
				Ok(()) => {},
				Err(err) if err.kind() == io::ErrorKind::NotFound => {},
				Err(err) =>
					return Err(Error::Message(format!(
						"Failed to remove test database file {file:?}: {err}."
					))),
			}
		}

		self.cleaned = true;

		Ok(())
	}
}
impl Drop for TestDatabase {
	fn drop(&mut self) {
		if self.cleaned {
			return;
		}
		if let Err(err) = self.cleanup_inner() {
			eprintln!("Test database cleanup failed: {err}");
		}
	}
}
