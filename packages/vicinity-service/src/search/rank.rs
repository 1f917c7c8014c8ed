use std::cmp::Ordering;

use vicinity_domain::{Candidate, SourceKind, UNREACHABLE};

/// Maps a source-specific raw score onto [0, 1]. External-place scores are
/// floor-clamped: a place that surfaced from a targeted text search at all is
/// treated as at least marginally relevant.
pub fn normalize_score(source: SourceKind, raw_score: f32, cfg: &vicinity_config::Search) -> f32 {
	match source {
		SourceKind::EmbeddingMatch | SourceKind::AiGenerated => raw_score.clamp(0.0, 1.0),
		SourceKind::ExternalPlace => raw_score.clamp(cfg.place_score_floor, 1.0),
	}
}

/// Normalizes every candidate and orders by normalized score descending.
/// Equal scores keep their input order, so repeated calls with identical
/// input produce identical output. Distance never drives this ordering.
pub fn rank(candidates: &mut [Candidate], cfg: &vicinity_config::Search) {
	for candidate in candidates.iter_mut() {
		candidate.normalized_score =
			Some(normalize_score(candidate.source, candidate.raw_score, cfg));
	}

	// sort_by is stable, which is the documented tie-break.
	candidates.sort_by(|a, b| {
		cmp_f32_desc(a.normalized_score.unwrap_or(0.0), b.normalized_score.unwrap_or(0.0))
	});
}

/// Display-only helper: ascending travel distance, with unknown/sentinel
/// distances after every real one. The pipeline itself never applies this.
pub fn sort_by_display_distance(candidates: &mut [Candidate]) {
	candidates.sort_by(|a, b| {
		let lhs = a.distance_miles.unwrap_or(UNREACHABLE);
		let rhs = b.distance_miles.unwrap_or(UNREACHABLE);

		lhs.partial_cmp(&rhs).unwrap_or(Ordering::Equal)
	});
}

pub(crate) fn cmp_f32_desc(a: f32, b: f32) -> Ordering {
	match (a.is_nan(), b.is_nan()) {
		(true, true) => Ordering::Equal,
		(true, false) => Ordering::Greater,
		(false, true) => Ordering::Less,
		(false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
	}
}

#[cfg(test)]
mod tests {
	use vicinity_domain::Coordinates;

	use super::*;

	fn candidate(identity: &str, source: SourceKind, raw_score: f32) -> Candidate {
		Candidate::new(identity, source, raw_score)
	}

	#[test]
	fn normalized_scores_stay_inside_unit_interval() {
		let cfg = vicinity_config::Search::default();
		let mut candidates = vec![
			candidate("a", SourceKind::EmbeddingMatch, -0.8),
			candidate("b", SourceKind::EmbeddingMatch, 1.7),
			candidate("c", SourceKind::ExternalPlace, -1.0),
			candidate("d", SourceKind::AiGenerated, 2.0),
		];

		rank(&mut candidates, &cfg);

		for candidate in &candidates {
			let score = candidate.normalized_score.expect("score missing after rank");

			assert!((0.0..=1.0).contains(&score));
		}
	}

	#[test]
	fn external_place_scores_are_floor_clamped() {
		let cfg = vicinity_config::Search::default();

		assert_eq!(normalize_score(SourceKind::ExternalPlace, 0.05, &cfg), cfg.place_score_floor);
		assert_eq!(normalize_score(SourceKind::ExternalPlace, 0.8, &cfg), 0.8);
	}

	#[test]
	fn equal_scores_keep_input_order() {
		let cfg = vicinity_config::Search::default();
		let mut candidates = vec![
			candidate("first", SourceKind::EmbeddingMatch, 0.5),
			candidate("second", SourceKind::EmbeddingMatch, 0.5),
			candidate("third", SourceKind::EmbeddingMatch, 0.5),
		];

		rank(&mut candidates, &cfg);

		let order: Vec<&str> = candidates.iter().map(|c| c.identity.as_str()).collect();

		assert_eq!(order, vec!["first", "second", "third"]);
	}

	#[test]
	fn rank_is_deterministic_across_repeated_calls() {
		let cfg = vicinity_config::Search::default();
		let base = vec![
			candidate("a", SourceKind::AiGenerated, 0.7),
			candidate("b", SourceKind::EmbeddingMatch, 0.9),
			candidate("c", SourceKind::ExternalPlace, 0.7),
			candidate("d", SourceKind::EmbeddingMatch, 0.7),
		];
		let mut first = base.clone();
		let mut second = base.clone();

		rank(&mut first, &cfg);
		rank(&mut second, &cfg);

		let left: Vec<&str> = first.iter().map(|c| c.identity.as_str()).collect();
		let right: Vec<&str> = second.iter().map(|c| c.identity.as_str()).collect();

		assert_eq!(left, right);
		assert_eq!(left[0], "b");
	}

	#[test]
	fn display_distance_sorts_sentinel_last() {
		let mut candidates = vec![
			candidate("far", SourceKind::ExternalPlace, 0.5),
			candidate("unknown", SourceKind::AiGenerated, 0.9),
			candidate("near", SourceKind::ExternalPlace, 0.4),
		];

		candidates[0].distance_miles = Some(8.0);
		candidates[0].coordinates = Some(Coordinates { latitude: 0.0, longitude: 0.0 });
		candidates[1].distance_miles = Some(UNREACHABLE);
		candidates[2].distance_miles = Some(1.5);

		sort_by_display_distance(&mut candidates);

		let order: Vec<&str> = candidates.iter().map(|c| c.identity.as_str()).collect();

		assert_eq!(order, vec!["near", "far", "unknown"]);
	}
}
