use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::warn;

use vicinity_domain::Coordinates;

use crate::{ServiceError, ServiceResult, VicinityService};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistanceDestination {
	pub latitude: f64,
	pub longitude: f64,
	pub business_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistanceRequest {
	pub origin: Coordinates,
	pub destinations: Vec<DistanceDestination>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistanceEntry {
	pub business_id: String,
	/// Miles, one decimal.
	pub distance: f64,
	/// Whole minutes.
	pub duration: u32,
	pub distance_text: String,
	pub duration_text: String,
	/// True when the provider failed for this destination and the values are
	/// randomized plausible stand-ins.
	pub estimated: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistanceResponse {
	pub success: bool,
	pub results: Vec<DistanceEntry>,
	#[serde(with = "crate::time_serde")]
	pub timestamp: time::OffsetDateTime,
}

impl VicinityService {
	/// Resolves travel metrics for a destination list in one provider call.
	/// Every destination gets an entry: per-destination failures (and total
	/// provider failure) produce flagged fallback values so callers can
	/// always index the result set by business id.
	pub async fn resolve_distances(&self, req: DistanceRequest) -> ServiceResult<DistanceResponse> {
		if req.destinations.is_empty() {
			return Err(ServiceError::InvalidRequest {
				message: "destinations must be a non-empty array.".to_string(),
			});
		}

		let coordinates: Vec<Coordinates> = req
			.destinations
			.iter()
			.map(|dest| Coordinates { latitude: dest.latitude, longitude: dest.longitude })
			.collect();
		let metrics = match self
			.providers
			.distance
			.matrix(&self.cfg.providers.distance, req.origin, &coordinates)
			.await
		{
			Ok(metrics) => metrics,
			Err(err) => {
				warn!(error = %err, "Distance provider failed; every entry is a fallback.");

				vec![None; req.destinations.len()]
			},
		};
		let results = req
			.destinations
			.into_iter()
			.zip(metrics)
			.map(|(dest, metric)| match metric {
				Some(metric) => {
					let distance = round_one_decimal(metric.miles);
					let duration = metric.minutes.max(0.0).round() as u32;

					DistanceEntry {
						business_id: dest.business_id,
						distance,
						duration,
						distance_text: non_empty_or(metric.distance_text, || {
							format!("{distance:.1} miles")
						}),
						duration_text: non_empty_or(metric.duration_text, || {
							format!("{duration} mins")
						}),
						estimated: false,
					}
				},
				None => {
					warn!(
						business_id = %dest.business_id,
						"No travel metrics for destination; using randomized fallback."
					);

					fallback_entry(dest.business_id, &self.cfg.distance)
				},
			})
			.collect();

		Ok(DistanceResponse {
			success: true,
			results,
			timestamp: time::OffsetDateTime::now_utc(),
		})
	}
}

fn fallback_entry(business_id: String, cfg: &vicinity_config::DistanceFallback) -> DistanceEntry {
	let mut rng = rand::thread_rng();
	let distance =
		round_one_decimal(rng.gen_range(cfg.fallback_distance_low..cfg.fallback_distance_high));
	let duration = rng.gen_range(cfg.fallback_duration_low..=cfg.fallback_duration_high);

	DistanceEntry {
		business_id,
		distance,
		duration,
		distance_text: format!("{distance:.1} miles"),
		duration_text: format!("{duration} mins"),
		estimated: true,
	}
}

fn round_one_decimal(value: f64) -> f64 {
	(value * 10.0).round() / 10.0
}

fn non_empty_or(value: String, default: impl FnOnce() -> String) -> String {
	if value.trim().is_empty() { default() } else { value }
}
