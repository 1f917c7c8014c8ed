use sqlx::PgPool;
use uuid::Uuid;

use crate::{
	Result,
	models::{BusinessRow, ReviewRow, SimilarityRow},
};

/// Renders a float slice as a pgvector literal, e.g. `[0.1,0.2]`.
pub fn vector_literal(vec: &[f32]) -> String {
	let mut out = String::with_capacity(vec.len() * 8);
	out.push('[');

	for (i, value) in vec.iter().enumerate() {
		if i > 0 {
			out.push(',');
		}
		out.push_str(&value.to_string());
	}

	out.push(']');

	out
}

/// Cosine similarity search over stored business embeddings. Threshold and
/// limit apply server-side; rows come back ordered by similarity descending.
pub async fn similarity_search(
	pool: &PgPool,
	query_vec: &[f32],
	threshold: f32,
	limit: u32,
) -> Result<Vec<SimilarityRow>> {
	if query_vec.is_empty() {
		return Err(crate::Error::InvalidArgument("Query vector must be non-empty.".to_string()));
	}

	let vec_text = vector_literal(query_vec);
	let rows = sqlx::query_as::<_, SimilarityRow>(
		"\
SELECT
	business_id,
	(1 - (vec <=> $1::text::vector))::real AS similarity
FROM business_embeddings
WHERE (1 - (vec <=> $1::text::vector))::real >= $2
ORDER BY vec <=> $1::text::vector
LIMIT $3",
	)
	.bind(vec_text.as_str())
	.bind(threshold)
	.bind(i64::from(limit))
	.fetch_all(pool)
	.await?;

	Ok(rows)
}

/// One batched hydrate for a similarity hit list. Never issue per-id fetches.
pub async fn businesses_by_ids(pool: &PgPool, ids: &[Uuid]) -> Result<Vec<BusinessRow>> {
	if ids.is_empty() {
		return Ok(Vec::new());
	}

	let rows = sqlx::query_as::<_, BusinessRow>(
		"\
SELECT
	business_id,
	name,
	category,
	description,
	address,
	latitude,
	longitude,
	rating,
	image_url,
	tags,
	created_at,
	updated_at
FROM businesses
WHERE business_id = ANY($1)",
	)
	.bind(ids)
	.fetch_all(pool)
	.await?;

	Ok(rows)
}

/// One batched review fetch keyed by the same id list; callers group rows
/// into a per-business map.
pub async fn reviews_by_business_ids(pool: &PgPool, ids: &[Uuid]) -> Result<Vec<ReviewRow>> {
	if ids.is_empty() {
		return Ok(Vec::new());
	}

	let rows = sqlx::query_as::<_, ReviewRow>(
		"\
SELECT
	review_id,
	business_id,
	author,
	rating,
	body,
	created_at
FROM reviews
WHERE business_id = ANY($1)
ORDER BY created_at DESC",
	)
	.bind(ids)
	.fetch_all(pool)
	.await?;

	Ok(rows)
}
