use std::collections::{HashMap, hash_map::Entry};

use vicinity_domain::Candidate;

use super::rank::normalize_score;

/// Merges candidates from every source into one list unique by identity,
/// keeping the duplicate whose normalized raw score is higher. AI-generated
/// candidates carry generated ids, so they only ever collide with themselves.
/// Output preserves first-seen order; the ranker imposes the final order.
pub fn dedupe(candidates: Vec<Candidate>, cfg: &vicinity_config::Search) -> Vec<Candidate> {
	let mut order: Vec<String> = Vec::with_capacity(candidates.len());
	let mut by_identity: HashMap<String, Candidate> = HashMap::with_capacity(candidates.len());

	for candidate in candidates {
		match by_identity.entry(candidate.identity.clone()) {
			Entry::Occupied(mut slot) => {
				let held = normalize_score(slot.get().source, slot.get().raw_score, cfg);
				let incoming = normalize_score(candidate.source, candidate.raw_score, cfg);

				if incoming > held {
					slot.insert(candidate);
				}
			},
			Entry::Vacant(slot) => {
				order.push(candidate.identity.clone());
				slot.insert(candidate);
			},
		}
	}

	order.into_iter().filter_map(|identity| by_identity.remove(&identity)).collect()
}
