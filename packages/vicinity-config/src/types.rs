use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub storage: Storage,
	pub providers: Providers,
	#[serde(default)]
	pub search: Search,
	#[serde(default)]
	pub distance: DistanceFallback,
}

#[derive(Debug, Deserialize)]
pub struct Service {
	pub http_bind: String,
	pub log_level: String,
}

#[derive(Debug, Deserialize)]
pub struct Storage {
	pub postgres: Postgres,
}

#[derive(Debug, Deserialize)]
pub struct Postgres {
	pub dsn: String,
	pub pool_max_conns: u32,
}

#[derive(Debug, Deserialize)]
pub struct Providers {
	pub embedding: EmbeddingProviderConfig,
	pub places: ProviderConfig,
	pub distance: ProviderConfig,
	pub generator: LlmProviderConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddingProviderConfig {
	pub provider_id: String,
	pub api_base: String,
	pub api_key: String,
	pub path: String,
	pub model: String,
	pub dimensions: u32,
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

/// Key-in-query providers (place search, distance matrix).
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
	pub provider_id: String,
	pub api_base: String,
	pub api_key: String,
	pub path: String,
	pub timeout_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmProviderConfig {
	pub provider_id: String,
	pub api_base: String,
	pub api_key: String,
	pub path: String,
	pub model: String,
	pub temperature: f32,
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Search {
	pub match_threshold: f32,
	pub match_count: u32,
	pub max_match_count: u32,
	pub radius_miles: f64,
	pub place_result_cap: u32,
	pub place_score_floor: f32,
	pub ai_default_similarity: f32,
	pub ai_fallback_similarity_low: f32,
	pub ai_fallback_similarity_high: f32,
}
impl Default for Search {
	fn default() -> Self {
		Self {
			match_threshold: 0.35,
			match_count: 10,
			max_match_count: 20,
			radius_miles: 10.0,
			place_result_cap: 15,
			place_score_floor: 0.3,
			ai_default_similarity: 0.7,
			ai_fallback_similarity_low: 0.6,
			ai_fallback_similarity_high: 0.9,
		}
	}
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DistanceFallback {
	pub fallback_distance_low: f64,
	pub fallback_distance_high: f64,
	pub fallback_duration_low: u32,
	pub fallback_duration_high: u32,
}
impl Default for DistanceFallback {
	fn default() -> Self {
		Self {
			fallback_distance_low: 1.0,
			fallback_distance_high: 5.0,
			fallback_duration_low: 5,
			fallback_duration_high: 15,
		}
	}
}
