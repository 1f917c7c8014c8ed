use std::time::Duration;

use color_eyre::{Result, eyre};
use reqwest::Client;
use serde_json::Value;

use vicinity_domain::Coordinates;

const METERS_PER_MILE: f64 = 1609.34;

#[derive(Debug, Clone)]
pub struct TravelMetrics {
	pub miles: f64,
	pub minutes: f64,
	pub distance_text: String,
	pub duration_text: String,
}

/// One matrix call for the whole destination list. The result is positional:
/// `out[i]` corresponds to `destinations[i]`, with `None` marking a
/// per-destination failure the caller must fall back for.
pub async fn matrix(
	cfg: &vicinity_config::ProviderConfig,
	origin: Coordinates,
	destinations: &[Coordinates],
) -> Result<Vec<Option<TravelMetrics>>> {
	if destinations.is_empty() {
		return Ok(Vec::new());
	}

	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let url = format!("{}{}", cfg.api_base, cfg.path);
	let origins = format!("{},{}", origin.latitude, origin.longitude);
	let dests = destinations
		.iter()
		.map(|c| format!("{},{}", c.latitude, c.longitude))
		.collect::<Vec<_>>()
		.join("|");
	let res = client
		.get(url)
		.query(&[
			("origins", origins.as_str()),
			("destinations", dests.as_str()),
			("units", "imperial"),
			("key", cfg.api_key.as_str()),
		])
		.send()
		.await?;
	let json: Value = res.error_for_status()?.json().await?;

	parse_matrix_response(json, destinations.len())
}

fn parse_matrix_response(json: Value, destination_count: usize) -> Result<Vec<Option<TravelMetrics>>> {
	let status = json.get("status").and_then(|v| v.as_str()).unwrap_or("UNKNOWN");

	if status != "OK" {
		return Err(eyre::eyre!("Distance provider returned status {status}."));
	}

	let elements = json
		.get("rows")
		.and_then(|v| v.as_array())
		.and_then(|rows| rows.first())
		.and_then(|row| row.get("elements"))
		.and_then(|v| v.as_array())
		.ok_or_else(|| eyre::eyre!("Distance response is missing elements."))?;

	let mut out = vec![None; destination_count];

	for (index, element) in elements.iter().enumerate().take(destination_count) {
		let element_status = element.get("status").and_then(|v| v.as_str()).unwrap_or("UNKNOWN");

		if element_status != "OK" {
			continue;
		}

		let meters = element.get("distance").and_then(|d| d.get("value")).and_then(|v| v.as_f64());
		let seconds = element.get("duration").and_then(|d| d.get("value")).and_then(|v| v.as_f64());
		let (Some(meters), Some(seconds)) = (meters, seconds) else {
			continue;
		};

		out[index] = Some(TravelMetrics {
			miles: meters / METERS_PER_MILE,
			minutes: (seconds / 60.0).round(),
			distance_text: element
				.get("distance")
				.and_then(|d| d.get("text"))
				.and_then(|v| v.as_str())
				.unwrap_or_default()
				.to_string(),
			duration_text: element
				.get("duration")
				.and_then(|d| d.get("text"))
				.and_then(|v| v.as_str())
				.unwrap_or_default()
				.to_string(),
		});
	}

	Ok(out)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_elements_positionally() {
		let json = serde_json::json!({
			"status": "OK",
			"rows": [{
				"elements": [
					{
						"status": "OK",
						"distance": { "text": "3.2 mi", "value": 5150.0 },
						"duration": { "text": "12 mins", "value": 730.0 }
					},
					{ "status": "NOT_FOUND" }
				]
			}]
		});
		let parsed = parse_matrix_response(json, 2).expect("parse failed");

		assert_eq!(parsed.len(), 2);

		let first = parsed[0].as_ref().expect("first element missing");

		assert!((first.miles - 3.2).abs() < 0.05);
		assert_eq!(first.minutes, 12.0);
		assert!(parsed[1].is_none());
	}

	#[test]
	fn non_ok_status_is_error() {
		let json = serde_json::json!({ "status": "OVER_QUERY_LIMIT" });

		assert!(parse_matrix_response(json, 1).is_err());
	}
}
