mod ai_generated;
mod dedupe;
mod enrich;
mod external_place;
mod rank;

pub use dedupe::dedupe;
pub use rank::{normalize_score, rank, sort_by_display_distance};

mod embedding_match;

use serde::{Deserialize, Serialize};
use tracing::warn;

use vicinity_domain::{Candidate, Coordinates};

use crate::{ServiceError, ServiceResult, VicinityService};

pub const NO_MATCHES_MESSAGE: &str = "No matches found. Try different search terms.";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
	/// Defaulted so an absent field fails the same non-empty validation as a
	/// blank one, instead of bouncing at the deserializer.
	#[serde(default)]
	pub query: String,
	pub latitude: Option<f64>,
	pub longitude: Option<f64>,
	pub match_threshold: Option<f32>,
	pub match_count: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
	pub success: bool,
	pub results: Vec<Candidate>,
	pub query: String,
	pub match_count: u32,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub message: Option<String>,
	#[serde(with = "crate::time_serde")]
	pub timestamp: time::OffsetDateTime,
}

impl VicinityService {
	/// The full aggregation pipeline: validate, embed the query, fan out to
	/// the real sources, dedupe, fill from the generator, enrich distances,
	/// rank. Every source failure degrades the result set, never the request.
	pub async fn search(&self, req: SearchRequest) -> ServiceResult<SearchResponse> {
		let query = req.query.trim().to_string();

		if query.is_empty() {
			return Err(ServiceError::InvalidRequest {
				message: "query must be non-empty.".to_string(),
			});
		}

		// Clamp before any provider call so a hostile match_count cannot fan
		// out into unbounded upstream cost.
		let threshold =
			req.match_threshold.unwrap_or(self.cfg.search.match_threshold).clamp(0.0, 1.0);
		let count =
			req.match_count.unwrap_or(self.cfg.search.match_count).clamp(1, self.cfg.search.max_match_count);
		let origin = match (req.latitude, req.longitude) {
			(Some(latitude), Some(longitude)) => Some(Coordinates { latitude, longitude }),
			_ => None,
		};

		let query_vec = match self
			.providers
			.embedding
			.embed(&self.cfg.providers.embedding, std::slice::from_ref(&query))
			.await
		{
			Ok(mut vectors) if !vectors.is_empty() => Some(vectors.remove(0)),
			Ok(_) => {
				warn!("Embedding provider returned no vectors; skipping embedding-match source.");

				None
			},
			Err(err) => {
				warn!(error = %err, "Query embedding failed; skipping embedding-match source.");

				None
			},
		};

		let (embedding_result, place_result) = tokio::join!(
			embedding_match::collect(self, query_vec.as_deref(), threshold, count),
			external_place::collect(self, &query, origin, query_vec.as_deref(), count),
		);
		let mut candidates = Vec::new();

		match embedding_result {
			Ok(batch) => candidates.extend(batch),
			Err(err) => warn!(error = %err, "Embedding-match source failed; continuing without it."),
		}
		match place_result {
			Ok(batch) => candidates.extend(batch),
			Err(err) => warn!(error = %err, "Place source failed; continuing without it."),
		}

		let mut candidates = dedupe(candidates, &self.cfg.search);

		if (candidates.len() as u32) < count {
			let needed = count - candidates.len() as u32;

			match ai_generated::collect(self, &query, needed).await {
				Ok(batch) => candidates.extend(batch),
				Err(err) => warn!(error = %err, "Generator source failed; continuing without it."),
			}
		}

		if let Some(origin) = origin {
			enrich::enrich(self, &mut candidates, origin).await;
		}

		rank(&mut candidates, &self.cfg.search);
		candidates.truncate(count as usize);

		let message = candidates.is_empty().then(|| NO_MATCHES_MESSAGE.to_string());

		Ok(SearchResponse {
			success: true,
			results: candidates,
			query,
			match_count: count,
			message,
			timestamp: time::OffsetDateTime::now_utc(),
		})
	}
}
