use rand::Rng;
use serde_json::{Map, Value};
use uuid::Uuid;

use vicinity_domain::{Candidate, SourceKind};

use crate::{ServiceResult, VicinityService};

const PLACEHOLDER_IMAGE: &str = "https://placehold.co/600x400?text=Local+Business";
const DEFAULT_HOURS: &str = "9:00 AM - 9:00 PM";

/// Last-resort filler: asks the generator for exactly the shortfall and
/// guarantees every emitted candidate has the full required field set.
pub(super) async fn collect(
	service: &VicinityService,
	query: &str,
	needed: u32,
) -> ServiceResult<Vec<Candidate>> {
	let prompt = format!(
		"Suggest {needed} local businesses matching this vibe: {query}. Favor variety in category \
		 and price."
	);
	let items = service
		.providers
		.generator
		.generate(&service.cfg.providers.generator, &prompt, needed)
		.await?;

	Ok(items
		.into_iter()
		.take(needed as usize)
		.map(|item| complete_listing(item, &service.cfg.search))
		.collect())
}

/// Fills any missing required field with a safe default. A listing never
/// leaves this function incomplete.
fn complete_listing(item: Value, cfg: &vicinity_config::Search) -> Candidate {
	let mut obj = match item {
		Value::Object(map) => map,
		_ => Map::new(),
	};
	let identity = obj
		.get("id")
		.and_then(|v| v.as_str())
		.map(str::trim)
		.filter(|id| !id.is_empty())
		.map(str::to_string)
		.unwrap_or_else(|| format!("ai-{}", Uuid::new_v4().simple()));
	let raw_score = obj
		.get("similarity")
		.and_then(|v| v.as_f64())
		.map(|v| v as f32)
		.filter(|v| (0.0..=1.0).contains(v))
		.unwrap_or(cfg.ai_default_similarity);

	obj.insert("id".to_string(), Value::String(identity.clone()));
	fill_string(&mut obj, "name", "Suggested spot");
	fill_string(&mut obj, "image", PLACEHOLDER_IMAGE);
	fill_string(&mut obj, "hours", DEFAULT_HOURS);
	fill_string(&mut obj, "address", "");

	if !obj.get("isOpen").map(Value::is_boolean).unwrap_or(false) {
		obj.insert("isOpen".to_string(), Value::Bool(true));
	}
	if !obj.get("reviews").map(Value::is_array).unwrap_or(false) {
		obj.insert("reviews".to_string(), Value::Array(Vec::new()));
	}
	if !obj.get("tags").map(Value::is_array).unwrap_or(false) {
		obj.insert("tags".to_string(), Value::Array(Vec::new()));
	}
	if !obj.get("rating").map(Value::is_object).unwrap_or(false) {
		obj.insert("rating".to_string(), random_rating());
	}

	let mut candidate = Candidate::new(identity, SourceKind::AiGenerated, raw_score);

	candidate.payload = Value::Object(obj);

	candidate
}

fn fill_string(obj: &mut Map<String, Value>, key: &str, default: &str) {
	let present = obj.get(key).map(Value::is_string).unwrap_or(false);

	if !present {
		obj.insert(key.to_string(), Value::String(default.to_string()));
	}
}

fn random_rating() -> Value {
	let mut rng = rand::thread_rng();

	serde_json::json!({
		"thumbsUp": rng.gen_range(10..150),
		"thumbsDown": rng.gen_range(0..25),
		"sentimentScore": (rng.gen_range(0.60..0.95f64) * 100.0).round() / 100.0,
	})
}
