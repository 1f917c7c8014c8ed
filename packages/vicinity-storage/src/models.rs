use serde_json::Value;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BusinessRow {
	pub business_id: Uuid,
	pub name: String,
	pub category: String,
	pub description: String,
	pub address: String,
	pub latitude: Option<f64>,
	pub longitude: Option<f64>,
	pub rating: Option<f32>,
	pub image_url: Option<String>,
	pub tags: Value,
	pub created_at: OffsetDateTime,
	pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ReviewRow {
	pub review_id: Uuid,
	pub business_id: Uuid,
	pub author: String,
	pub rating: Option<f32>,
	pub body: String,
	pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SimilarityRow {
	pub business_id: Uuid,
	pub similarity: f32,
}
