use rand::Rng;
use tracing::{error, warn};

use vicinity_domain::{Candidate, Coordinates, SourceKind, geo, similarity};
use vicinity_providers::places::PlaceHit;

use crate::{ServiceResult, VicinityService};

/// Live place-search source. Hits are re-checked against the radius locally,
/// then scored by cosine against the query in one batched embed call; when
/// that batch fails the survivors keep a randomized degraded similarity
/// instead of being discarded.
pub(super) async fn collect(
	service: &VicinityService,
	query: &str,
	origin: Option<Coordinates>,
	query_vec: Option<&[f32]>,
	requested: u32,
) -> ServiceResult<Vec<Candidate>> {
	let Some(origin) = origin else {
		return Ok(Vec::new());
	};

	let radius = service.cfg.search.radius_miles;
	let hits = service
		.providers
		.places
		.search(&service.cfg.providers.places, query, origin, radius)
		.await?;
	let mut survivors: Vec<(PlaceHit, f64)> = hits
		.into_iter()
		.filter_map(|hit| {
			let miles = geo::haversine_miles(origin, hit.coordinates);

			(miles <= radius).then_some((hit, miles))
		})
		.collect();

	survivors.truncate(requested.min(service.cfg.search.place_result_cap) as usize);

	if survivors.is_empty() {
		return Ok(Vec::new());
	}

	let scores = score_survivors(service, query_vec, &survivors).await;
	let mut out = Vec::with_capacity(survivors.len());

	for (index, (hit, _)) in survivors.iter().enumerate() {
		let (raw_score, score_fallback) = match scores.as_ref().and_then(|s| s[index]) {
			Some(score) => (score, false),
			None => (random_fallback_similarity(&service.cfg.search), true),
		};
		let mut candidate = Candidate::new(hit.place_id.clone(), SourceKind::ExternalPlace, raw_score);

		candidate.score_fallback = score_fallback;
		candidate.coordinates = Some(hit.coordinates);
		candidate.payload = serde_json::json!({
			"name": hit.name,
			"category": hit.kinds.first().cloned().unwrap_or_default(),
			"tags": hit.kinds,
			"rating": hit.rating,
			"user_ratings_total": hit.user_ratings_total,
			"address": hit.address,
			"isOpen": hit.open_now,
		});

		out.push(candidate);
	}

	Ok(out)
}

/// One batch embed for every survivor's descriptive text. `None` entries mean
/// "use the degraded fallback"; a `None` return means the whole batch did.
async fn score_survivors(
	service: &VicinityService,
	query_vec: Option<&[f32]>,
	survivors: &[(PlaceHit, f64)],
) -> Option<Vec<Option<f32>>> {
	let query_vec = query_vec?;
	let texts: Vec<String> =
		survivors.iter().map(|(hit, _)| describe_hit(hit)).collect();

	match service.providers.embedding.embed(&service.cfg.providers.embedding, &texts).await {
		Ok(vectors) if vectors.len() == texts.len() => Some(
			vectors
				.iter()
				.map(|vec| match similarity::cosine(query_vec, vec) {
					Ok(score) => Some(score),
					Err(err) => {
						// Dimension mismatch inside one request is a bug, not
						// a provider hiccup.
						error!(error = %err, "Cosine dimension mismatch while scoring places.");

						None
					},
				})
				.collect(),
		),
		Ok(vectors) => {
			warn!(
				expected = texts.len(),
				got = vectors.len(),
				"Place scoring batch came back short; using fallback similarities."
			);

			None
		},
		Err(err) => {
			warn!(error = %err, "Place scoring batch failed; using fallback similarities.");

			None
		},
	}
}

fn describe_hit(hit: &PlaceHit) -> String {
	let mut text = hit.name.clone();

	if !hit.kinds.is_empty() {
		text.push(' ');
		text.push_str(&hit.kinds.join(" "));
	}
	if let Some(rating) = hit.rating {
		text.push_str(&format!(" rated {rating}"));
	}
	if let Some(address) = hit.address.as_deref() {
		text.push(' ');
		text.push_str(address);
	}

	text
}

fn random_fallback_similarity(cfg: &vicinity_config::Search) -> f32 {
	rand::thread_rng().gen_range(cfg.ai_fallback_similarity_low..cfg.ai_fallback_similarity_high)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn hit(name: &str) -> PlaceHit {
		PlaceHit {
			place_id: "p-1".to_string(),
			name: name.to_string(),
			rating: Some(4.5),
			user_ratings_total: Some(10),
			kinds: vec!["cafe".to_string()],
			address: Some("1 Main St".to_string()),
			coordinates: Coordinates { latitude: 0.0, longitude: 0.0 },
			open_now: Some(true),
		}
	}

	#[test]
	fn describes_hits_with_available_fields() {
		let text = describe_hit(&hit("Fog City Coffee"));

		assert!(text.starts_with("Fog City Coffee cafe"));
		assert!(text.contains("rated 4.5"));
		assert!(text.contains("1 Main St"));
	}

	#[test]
	fn fallback_similarity_stays_in_configured_range() {
		let cfg = vicinity_config::Search::default();

		for _ in 0..64 {
			let score = random_fallback_similarity(&cfg);

			assert!(score >= cfg.ai_fallback_similarity_low);
			assert!(score < cfg.ai_fallback_similarity_high);
		}
	}
}
