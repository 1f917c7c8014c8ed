use std::sync::Arc;

use vicinity_service::VicinityService;
use vicinity_storage::db::Db;

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<VicinityService>,
}
impl AppState {
	pub async fn new(config: vicinity_config::Config) -> color_eyre::Result<Self> {
		let db = Db::connect(&config.storage.postgres).await?;

		db.ensure_schema(config.providers.embedding.dimensions).await?;

		let service = VicinityService::new(config, db);

		Ok(Self { service: Arc::new(service) })
	}

	pub fn with_service(service: VicinityService) -> Self {
		Self { service: Arc::new(service) }
	}
}
