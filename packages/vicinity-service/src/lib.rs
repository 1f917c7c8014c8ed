pub mod distance;
pub mod search;
pub mod time_serde;

mod error;

pub use distance::{DistanceDestination, DistanceEntry, DistanceRequest, DistanceResponse};
pub use error::{Error as ServiceError, Result as ServiceResult};
pub use search::{SearchRequest, SearchResponse};

use std::{future::Future, pin::Pin, sync::Arc};

use serde_json::Value;

use vicinity_config::{Config, EmbeddingProviderConfig, LlmProviderConfig, ProviderConfig};
use vicinity_domain::Coordinates;
use uuid::Uuid;
use vicinity_providers::{
	distance as distance_provider, embedding, generator,
	places::{self, PlaceHit},
};
use vicinity_storage::{
	db::Db,
	models::{BusinessRow, ReviewRow, SimilarityRow},
	queries,
};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub use vicinity_providers::distance::TravelMetrics;

pub trait EmbeddingProvider
where
	Self: Send + Sync,
{
	fn embed<'a>(
		&'a self,
		cfg: &'a EmbeddingProviderConfig,
		texts: &'a [String],
	) -> BoxFuture<'a, color_eyre::Result<Vec<Vec<f32>>>>;
}

pub trait PlaceSearchProvider
where
	Self: Send + Sync,
{
	fn search<'a>(
		&'a self,
		cfg: &'a ProviderConfig,
		query: &'a str,
		origin: Coordinates,
		radius_miles: f64,
	) -> BoxFuture<'a, color_eyre::Result<Vec<PlaceHit>>>;
}

pub trait DistanceProvider
where
	Self: Send + Sync,
{
	fn matrix<'a>(
		&'a self,
		cfg: &'a ProviderConfig,
		origin: Coordinates,
		destinations: &'a [Coordinates],
	) -> BoxFuture<'a, color_eyre::Result<Vec<Option<TravelMetrics>>>>;
}

pub trait ListingGenerator
where
	Self: Send + Sync,
{
	fn generate<'a>(
		&'a self,
		cfg: &'a LlmProviderConfig,
		prompt: &'a str,
		count: u32,
	) -> BoxFuture<'a, color_eyre::Result<Vec<Value>>>;
}

/// The embedding-match source's view of the store: one similarity search and
/// two batched hydrates.
pub trait SimilaritySource
where
	Self: Send + Sync,
{
	fn similarity_search<'a>(
		&'a self,
		query_vec: &'a [f32],
		threshold: f32,
		limit: u32,
	) -> BoxFuture<'a, vicinity_storage::Result<Vec<SimilarityRow>>>;

	fn businesses_by_ids<'a>(
		&'a self,
		ids: &'a [Uuid],
	) -> BoxFuture<'a, vicinity_storage::Result<Vec<BusinessRow>>>;

	fn reviews_by_business_ids<'a>(
		&'a self,
		ids: &'a [Uuid],
	) -> BoxFuture<'a, vicinity_storage::Result<Vec<ReviewRow>>>;
}

/// Injected dependency bundle. Defaults to the real HTTP clients and the
/// sqlx-backed store; tests swap in fakes without touching the pipeline.
#[derive(Clone)]
pub struct Providers {
	pub embedding: Arc<dyn EmbeddingProvider>,
	pub places: Arc<dyn PlaceSearchProvider>,
	pub distance: Arc<dyn DistanceProvider>,
	pub generator: Arc<dyn ListingGenerator>,
	pub store: Arc<dyn SimilaritySource>,
}
impl Providers {
	pub fn new(
		embedding: Arc<dyn EmbeddingProvider>,
		places: Arc<dyn PlaceSearchProvider>,
		distance: Arc<dyn DistanceProvider>,
		generator: Arc<dyn ListingGenerator>,
		store: Arc<dyn SimilaritySource>,
	) -> Self {
		Self { embedding, places, distance, generator, store }
	}

	pub fn with_store(store: Arc<dyn SimilaritySource>) -> Self {
		let provider = Arc::new(DefaultProviders);

		Self {
			embedding: provider.clone(),
			places: provider.clone(),
			distance: provider.clone(),
			generator: provider,
			store,
		}
	}
}

pub struct VicinityService {
	pub cfg: Config,
	pub providers: Providers,
}
impl VicinityService {
	pub fn new(cfg: Config, db: Db) -> Self {
		Self { cfg, providers: Providers::with_store(Arc::new(DbStore::new(db))) }
	}

	pub fn with_providers(cfg: Config, providers: Providers) -> Self {
		Self { cfg, providers }
	}
}

/// Production store: delegates straight to the sqlx query helpers.
pub struct DbStore {
	db: Db,
}
impl DbStore {
	pub fn new(db: Db) -> Self {
		Self { db }
	}
}
impl SimilaritySource for DbStore {
	fn similarity_search<'a>(
		&'a self,
		query_vec: &'a [f32],
		threshold: f32,
		limit: u32,
	) -> BoxFuture<'a, vicinity_storage::Result<Vec<SimilarityRow>>> {
		Box::pin(queries::similarity_search(&self.db.pool, query_vec, threshold, limit))
	}

	fn businesses_by_ids<'a>(
		&'a self,
		ids: &'a [Uuid],
	) -> BoxFuture<'a, vicinity_storage::Result<Vec<BusinessRow>>> {
		Box::pin(queries::businesses_by_ids(&self.db.pool, ids))
	}

	fn reviews_by_business_ids<'a>(
		&'a self,
		ids: &'a [Uuid],
	) -> BoxFuture<'a, vicinity_storage::Result<Vec<ReviewRow>>> {
		Box::pin(queries::reviews_by_business_ids(&self.db.pool, ids))
	}
}

struct DefaultProviders;

impl EmbeddingProvider for DefaultProviders {
	fn embed<'a>(
		&'a self,
		cfg: &'a EmbeddingProviderConfig,
		texts: &'a [String],
	) -> BoxFuture<'a, color_eyre::Result<Vec<Vec<f32>>>> {
		Box::pin(embedding::embed(cfg, texts))
	}
}

impl PlaceSearchProvider for DefaultProviders {
	fn search<'a>(
		&'a self,
		cfg: &'a ProviderConfig,
		query: &'a str,
		origin: Coordinates,
		radius_miles: f64,
	) -> BoxFuture<'a, color_eyre::Result<Vec<PlaceHit>>> {
		Box::pin(places::search(cfg, query, origin, radius_miles))
	}
}

impl DistanceProvider for DefaultProviders {
	fn matrix<'a>(
		&'a self,
		cfg: &'a ProviderConfig,
		origin: Coordinates,
		destinations: &'a [Coordinates],
	) -> BoxFuture<'a, color_eyre::Result<Vec<Option<TravelMetrics>>>> {
		Box::pin(distance_provider::matrix(cfg, origin, destinations))
	}
}

impl ListingGenerator for DefaultProviders {
	fn generate<'a>(
		&'a self,
		cfg: &'a LlmProviderConfig,
		prompt: &'a str,
		count: u32,
	) -> BoxFuture<'a, color_eyre::Result<Vec<Value>>> {
		Box::pin(generator::generate(cfg, prompt, count))
	}
}
