mod error;
mod types;

pub use error::{Error, Result};
pub use types::{
	Config, DistanceFallback, EmbeddingProviderConfig, LlmProviderConfig, Postgres, ProviderConfig,
	Providers, Search, Service, Storage,
};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.http_bind.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.http_bind must be non-empty.".to_string(),
		});
	}
	if cfg.storage.postgres.dsn.trim().is_empty() {
		return Err(Error::Validation {
			message: "storage.postgres.dsn must be non-empty.".to_string(),
		});
	}
	if cfg.providers.embedding.dimensions == 0 {
		return Err(Error::Validation {
			message: "providers.embedding.dimensions must be greater than zero.".to_string(),
		});
	}

	for (label, key) in [
		("embedding", &cfg.providers.embedding.api_key),
		("places", &cfg.providers.places.api_key),
		("distance", &cfg.providers.distance.api_key),
		("generator", &cfg.providers.generator.api_key),
	] {
		if key.trim().is_empty() {
			return Err(Error::Validation {
				message: format!("Provider {label} api_key must be non-empty."),
			});
		}
	}

	if !(0.0..=1.0).contains(&cfg.search.match_threshold) {
		return Err(Error::Validation {
			message: "search.match_threshold must be in the range 0.0-1.0.".to_string(),
		});
	}
	if cfg.search.max_match_count == 0 || cfg.search.max_match_count > 20 {
		return Err(Error::Validation {
			message: "search.max_match_count must be in the range 1-20.".to_string(),
		});
	}
	if cfg.search.match_count == 0 || cfg.search.match_count > cfg.search.max_match_count {
		return Err(Error::Validation {
			message: "search.match_count must be in the range 1-max_match_count.".to_string(),
		});
	}
	if !cfg.search.radius_miles.is_finite() || cfg.search.radius_miles <= 0.0 {
		return Err(Error::Validation {
			message: "search.radius_miles must be greater than zero.".to_string(),
		});
	}
	if cfg.search.place_result_cap == 0 || cfg.search.place_result_cap > cfg.search.max_match_count
	{
		return Err(Error::Validation {
			message: "search.place_result_cap must be in the range 1-max_match_count.".to_string(),
		});
	}
	if !(0.0..=1.0).contains(&cfg.search.place_score_floor) {
		return Err(Error::Validation {
			message: "search.place_score_floor must be in the range 0.0-1.0.".to_string(),
		});
	}
	if !(0.0..=1.0).contains(&cfg.search.ai_default_similarity) {
		return Err(Error::Validation {
			message: "search.ai_default_similarity must be in the range 0.0-1.0.".to_string(),
		});
	}
	if cfg.search.ai_fallback_similarity_low < 0.0
		|| cfg.search.ai_fallback_similarity_high > 1.0
		|| cfg.search.ai_fallback_similarity_low >= cfg.search.ai_fallback_similarity_high
	{
		return Err(Error::Validation {
			message: "search.ai_fallback_similarity_low/high must be an increasing range inside 0.0-1.0."
				.to_string(),
		});
	}
	if cfg.distance.fallback_distance_low <= 0.0
		|| cfg.distance.fallback_distance_low >= cfg.distance.fallback_distance_high
	{
		return Err(Error::Validation {
			message: "distance.fallback_distance_low/high must be an increasing positive range."
				.to_string(),
		});
	}
	if cfg.distance.fallback_duration_low == 0
		|| cfg.distance.fallback_duration_low >= cfg.distance.fallback_duration_high
	{
		return Err(Error::Validation {
			message: "distance.fallback_duration_low/high must be an increasing positive range."
				.to_string(),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	for base in [
		&mut cfg.providers.embedding.api_base,
		&mut cfg.providers.places.api_base,
		&mut cfg.providers.distance.api_base,
		&mut cfg.providers.generator.api_base,
	] {
		while base.ends_with('/') {
			base.pop();
		}
	}
}
