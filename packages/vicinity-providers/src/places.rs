use std::time::Duration;

use color_eyre::{Result, eyre};
use reqwest::Client;
use serde_json::Value;

use vicinity_domain::Coordinates;

#[derive(Debug, Clone)]
pub struct PlaceHit {
	pub place_id: String,
	pub name: String,
	pub rating: Option<f32>,
	pub user_ratings_total: Option<u32>,
	pub kinds: Vec<String>,
	pub address: Option<String>,
	pub coordinates: Coordinates,
	pub open_now: Option<bool>,
}

/// One proximity-ranked text search against the place provider. The caller
/// re-checks every hit against the radius locally; the provider's own
/// filtering is not trusted.
pub async fn search(
	cfg: &vicinity_config::ProviderConfig,
	query: &str,
	origin: Coordinates,
	radius_miles: f64,
) -> Result<Vec<PlaceHit>> {
	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let url = format!("{}{}", cfg.api_base, cfg.path);
	let location = format!("{},{}", origin.latitude, origin.longitude);
	let radius_meters = format!("{}", (radius_miles * 1609.34).round() as u64);
	let res = client
		.get(url)
		.query(&[
			("query", query),
			("location", location.as_str()),
			("radius", radius_meters.as_str()),
			("key", cfg.api_key.as_str()),
		])
		.send()
		.await?;
	let json: Value = res.error_for_status()?.json().await?;

	parse_place_response(json)
}

fn parse_place_response(json: Value) -> Result<Vec<PlaceHit>> {
	let status = json.get("status").and_then(|v| v.as_str()).unwrap_or("UNKNOWN");

	if status != "OK" && status != "ZERO_RESULTS" {
		return Err(eyre::eyre!("Place provider returned status {status}."));
	}

	let results = json.get("results").and_then(|v| v.as_array());
	let Some(results) = results else {
		return Ok(Vec::new());
	};

	let mut hits = Vec::with_capacity(results.len());

	for item in results {
		let Some(place_id) = item.get("place_id").and_then(|v| v.as_str()) else {
			continue;
		};
		let Some(name) = item.get("name").and_then(|v| v.as_str()) else {
			continue;
		};
		let location = item.get("geometry").and_then(|g| g.get("location"));
		let latitude = location.and_then(|l| l.get("lat")).and_then(|v| v.as_f64());
		let longitude = location.and_then(|l| l.get("lng")).and_then(|v| v.as_f64());
		let (Some(latitude), Some(longitude)) = (latitude, longitude) else {
			continue;
		};
		let kinds = item
			.get("types")
			.and_then(|v| v.as_array())
			.map(|arr| {
				arr.iter().filter_map(|v| v.as_str()).map(str::to_string).collect::<Vec<_>>()
			})
			.unwrap_or_default();

		hits.push(PlaceHit {
			place_id: place_id.to_string(),
			name: name.to_string(),
			rating: item.get("rating").and_then(|v| v.as_f64()).map(|v| v as f32),
			user_ratings_total: item
				.get("user_ratings_total")
				.and_then(|v| v.as_u64())
				.map(|v| v as u32),
			kinds,
			address: item
				.get("formatted_address")
				.or_else(|| item.get("vicinity"))
				.and_then(|v| v.as_str())
				.map(str::to_string),
			coordinates: Coordinates { latitude, longitude },
			open_now: item
				.get("opening_hours")
				.and_then(|h| h.get("open_now"))
				.and_then(|v| v.as_bool()),
		});
	}

	Ok(hits)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_hits_and_skips_incomplete_entries() {
		let json = serde_json::json!({
			"status": "OK",
			"results": [
				{
					"place_id": "p-1",
					"name": "Golden Gate Coffee",
					"rating": 4.5,
					"user_ratings_total": 120,
					"types": ["cafe", "food"],
					"formatted_address": "123 Fog St",
					"geometry": { "location": { "lat": 37.77, "lng": -122.41 } },
					"opening_hours": { "open_now": true }
				},
				{ "place_id": "p-2", "name": "No Geometry" }
			]
		});
		let hits = parse_place_response(json).expect("parse failed");

		assert_eq!(hits.len(), 1);
		assert_eq!(hits[0].place_id, "p-1");
		assert_eq!(hits[0].kinds, vec!["cafe".to_string(), "food".to_string()]);
		assert_eq!(hits[0].open_now, Some(true));
	}

	#[test]
	fn zero_results_is_empty_not_error() {
		let json = serde_json::json!({ "status": "ZERO_RESULTS", "results": [] });

		assert!(parse_place_response(json).expect("parse failed").is_empty());
	}

	#[test]
	fn non_ok_status_is_error() {
		let json = serde_json::json!({ "status": "REQUEST_DENIED" });

		assert!(parse_place_response(json).is_err());
	}
}
