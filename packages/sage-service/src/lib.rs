pub mod chat;
pub mod memory;
pub mod prompt;
pub mod sessions;

mod error;

pub use chat::{ChatRequest, ChatResponse};
pub use error::{Error, Result};

use std::{future::Future, pin::Pin, sync::Arc};

use serde_json::Value;

use sage_config::{Config, LlmProviderConfig};
use sage_providers::generate;
use sage_storage::db::Db;

use crate::sessions::SessionLocks;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// The generation engine behind one chat turn. The returned value's shape
/// is unconstrained; the reconciler normalizes whatever comes back.
pub trait GenerationProvider
where
	Self: Send + Sync,
{
	fn generate<'a>(
		&'a self,
		cfg: &'a LlmProviderConfig,
		messages: &'a [Value],
	) -> BoxFuture<'a, color_eyre::Result<Value>>;
}

#[derive(Clone)]
pub struct Providers {
	pub generation: Arc<dyn GenerationProvider>,
}

pub struct SageService {
	pub cfg: Config,
	pub db: Db,
	pub providers: Providers,
	pub(crate) sessions: SessionLocks,
}

struct DefaultProviders;

impl GenerationProvider for DefaultProviders {
	fn generate<'a>(
		&'a self,
		cfg: &'a LlmProviderConfig,
		messages: &'a [Value],
	) -> BoxFuture<'a, color_eyre::Result<Value>> {
		Box::pin(generate::generate(cfg, messages))
	}
}

impl Providers {
	pub fn new(generation: Arc<dyn GenerationProvider>) -> Self {
		Self { generation }
	}
}

impl Default for Providers {
	fn default() -> Self {
		Self { generation: Arc::new(DefaultProviders) }
	}
}

impl SageService {
	pub fn new(cfg: Config, db: Db) -> Self {
		Self { cfg, db, providers: Providers::default(), sessions: SessionLocks::default() }
	}

	pub fn with_providers(cfg: Config, db: Db, providers: Providers) -> Self {
		Self { cfg, db, providers, sessions: SessionLocks::default() }
	}
}
