use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::geo::Coordinates;

/// Sentinel distance/duration for candidates the distance provider could not
/// resolve. Sorts after every real distance and is excluded by radius filters.
pub const UNREACHABLE: f64 = 999_999.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
	EmbeddingMatch,
	ExternalPlace,
	AiGenerated,
}

/// A search result in flight through the pipeline. Built fresh per request,
/// mutated in place by each stage, discarded after serialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
	/// Internal business id or external place id; the deduplication key.
	pub identity: String,
	pub source: SourceKind,
	/// Scale depends on `source`; never exposed as the final score.
	pub raw_score: f32,
	/// `None` until the ranker runs, then always inside [0, 1].
	#[serde(skip_serializing_if = "Option::is_none")]
	pub normalized_score: Option<f32>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub coordinates: Option<Coordinates>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub distance_miles: Option<f64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub eta_minutes: Option<f64>,
	/// True when the score is a degraded stand-in rather than provider data.
	#[serde(default)]
	pub score_fallback: bool,
	/// True when the distance is the sentinel or another degraded stand-in.
	#[serde(default)]
	pub distance_fallback: bool,
	/// Opaque business/offering attributes the pipeline passes through.
	pub payload: Value,
}
impl Candidate {
	pub fn new(identity: impl Into<String>, source: SourceKind, raw_score: f32) -> Self {
		Self {
			identity: identity.into(),
			source,
			raw_score,
			normalized_score: None,
			coordinates: None,
			distance_miles: None,
			eta_minutes: None,
			score_fallback: false,
			distance_fallback: false,
			payload: Value::Null,
		}
	}

	pub fn is_unreachable(&self) -> bool {
		self.distance_miles.map(|miles| miles >= UNREACHABLE).unwrap_or(false)
	}
}
