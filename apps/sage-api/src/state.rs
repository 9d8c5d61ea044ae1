use std::sync::Arc;

use sage_service::SageService;
use sage_storage::db::Db;

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<SageService>,
}
impl AppState {
	pub async fn new(config: sage_config::Config) -> color_eyre::Result<Self> {
		let db = Db::connect(&config.storage.sqlite).await?;

		db.ensure_schema().await?;

		let service = SageService::new(config, db);

		Ok(Self { service: Arc::new(service) })
	}
}
