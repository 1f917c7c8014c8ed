use std::time::Duration;

use color_eyre::{Result, eyre};
use regex::Regex;
use reqwest::Client;
use serde_json::Value;

use crate::ParseError;

/// Ask the LLM for synthetic listings matching a vibe prompt. Output parsing
/// defends in depth; a response that survives none of the fallback stages
/// surfaces as a typed [`ParseError`] instead of a panic.
pub async fn generate(
	cfg: &vicinity_config::LlmProviderConfig,
	prompt: &str,
	count: u32,
) -> Result<Vec<Value>> {
	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let url = format!("{}{}", cfg.api_base, cfg.path);
	let messages = build_messages(prompt, count);

	let mut last_err = None;

	for _ in 0..3 {
		let body = serde_json::json!({
			"model": cfg.model,
			"temperature": cfg.temperature,
			"messages": messages,
		});
		let res = client
			.post(&url)
			.headers(crate::auth_headers(&cfg.api_key, &cfg.default_headers)?)
			.json(&body)
			.send()
			.await?;
		let json: Value = res.error_for_status()?.json().await?;
		let Some(content) = json
			.get("choices")
			.and_then(|v| v.as_array())
			.and_then(|arr| arr.first())
			.and_then(|choice| choice.get("message"))
			.and_then(|msg| msg.get("content"))
			.and_then(|c| c.as_str())
		else {
			last_err = Some(eyre::eyre!("Generator response is missing message content."));

			continue;
		};

		match parse_listings(content) {
			Ok(items) => return Ok(items),
			Err(err) => last_err = Some(err.into()),
		}
	}

	Err(last_err.unwrap_or_else(|| eyre::eyre!("Generator returned no usable output.")))
}

pub fn build_messages(prompt: &str, count: u32) -> Vec<Value> {
	let system = format!(
		"You generate fictional local-business listings. Respond with a JSON array of exactly \
		 {count} objects and nothing else. Each object has: id (string), name (string), rating \
		 (object with thumbsUp, thumbsDown, sentimentScore), image (URL string), isOpen (bool), \
		 hours (string), address (string), reviews (array of strings), tags (array of strings), \
		 similarity (number 0-1 for how well it matches the request)."
	);

	vec![
		serde_json::json!({ "role": "system", "content": system }),
		serde_json::json!({ "role": "user", "content": prompt }),
	]
}

/// Direct parse, then fenced-block strip, then first-array extraction.
pub fn parse_listings(content: &str) -> Result<Vec<Value>, ParseError> {
	if let Some(items) = parse_as_array(content) {
		return Ok(items);
	}

	let stripped = strip_code_fences(content);

	if let Some(items) = parse_as_array(&stripped) {
		return Ok(items);
	}

	// Last resort: the model wrapped the array in prose.
	if let Some(found) = Regex::new(r"\[[\s\S]*\]").ok().and_then(|re| re.find(&stripped).map(|m| m.as_str().to_string()))
		&& let Some(items) = parse_as_array(&found)
	{
		return Ok(items);
	}

	Err(ParseError::Listing { message: format!("no JSON array in {} chars of output", content.len()) })
}

fn parse_as_array(text: &str) -> Option<Vec<Value>> {
	match serde_json::from_str::<Value>(text.trim()).ok()? {
		Value::Array(items) => Some(items),
		Value::Object(map) => {
			// Some models wrap the array in a single-field object.
			map.into_iter().find_map(|(_, value)| match value {
				Value::Array(items) => Some(items),
				_ => None,
			})
		},
		_ => None,
	}
}

fn strip_code_fences(content: &str) -> String {
	let trimmed = content.trim();
	let Some(rest) = trimmed.strip_prefix("```") else {
		return trimmed.to_string();
	};
	let rest = rest.strip_prefix("json").unwrap_or(rest);

	rest.strip_suffix("```").unwrap_or(rest).trim().to_string()
}
