use std::collections::HashMap;

use serde_json::Value;
use uuid::Uuid;

use vicinity_domain::{Candidate, Coordinates, SourceKind};
use vicinity_storage::models::BusinessRow;

use crate::{ServiceResult, VicinityService};

/// Hard cap on how many similarity hits a single request may pull, independent
/// of what the caller asked for.
const SIMILARITY_LIMIT: u32 = 20;

/// Vector-similarity source: one similarity search, one batched hydrate, one
/// batched review fetch.
pub(super) async fn collect(
	service: &VicinityService,
	query_vec: Option<&[f32]>,
	threshold: f32,
	count: u32,
) -> ServiceResult<Vec<Candidate>> {
	let Some(query_vec) = query_vec else {
		return Ok(Vec::new());
	};

	let limit = count.min(SIMILARITY_LIMIT);
	let store = &service.providers.store;
	let hits = store.similarity_search(query_vec, threshold, limit).await?;

	if hits.is_empty() {
		return Ok(Vec::new());
	}

	let ids: Vec<Uuid> = hits.iter().map(|hit| hit.business_id).collect();
	let businesses = store.businesses_by_ids(&ids).await?;
	let reviews = store.reviews_by_business_ids(&ids).await?;
	let mut reviews_by_business: HashMap<Uuid, Vec<Value>> = HashMap::new();

	for review in reviews {
		reviews_by_business.entry(review.business_id).or_default().push(serde_json::json!({
			"author": review.author,
			"rating": review.rating,
			"body": review.body,
		}));
	}

	let by_id: HashMap<Uuid, BusinessRow> =
		businesses.into_iter().map(|row| (row.business_id, row)).collect();
	let mut out = Vec::with_capacity(hits.len());

	// Hits arrive ordered by similarity; keep that order.
	for hit in hits {
		let Some(row) = by_id.get(&hit.business_id) else {
			tracing::warn!(business_id = %hit.business_id, "Similarity hit has no business row.");

			continue;
		};
		let mut candidate =
			Candidate::new(row.business_id.to_string(), SourceKind::EmbeddingMatch, hit.similarity);

		candidate.coordinates = match (row.latitude, row.longitude) {
			(Some(latitude), Some(longitude)) => Some(Coordinates { latitude, longitude }),
			_ => None,
		};
		candidate.payload = serde_json::json!({
			"name": row.name,
			"category": row.category,
			"description": row.description,
			"address": row.address,
			"rating": row.rating,
			"image": row.image_url,
			"tags": row.tags,
			"reviews": reviews_by_business.remove(&row.business_id).unwrap_or_default(),
		});

		out.push(candidate);
	}

	Ok(out)
}
