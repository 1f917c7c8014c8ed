#[derive(Debug, thiserror::Error)]
#[error("Vector dimensions do not match: {left} vs {right}.")]
pub struct DimensionMismatch {
	pub left: usize,
	pub right: usize,
}

/// Cosine similarity of two equal-length vectors. A zero-magnitude vector is a
/// degenerate input, not an error; it yields 0.0.
pub fn cosine(a: &[f32], b: &[f32]) -> Result<f32, DimensionMismatch> {
	if a.len() != b.len() {
		return Err(DimensionMismatch { left: a.len(), right: b.len() });
	}

	let mut dot = 0.0f32;
	let mut norm_a = 0.0f32;
	let mut norm_b = 0.0f32;

	for (x, y) in a.iter().zip(b) {
		dot += x * y;
		norm_a += x * x;
		norm_b += y * y;
	}

	if norm_a == 0.0 || norm_b == 0.0 {
		return Ok(0.0);
	}

	Ok(dot / (norm_a.sqrt() * norm_b.sqrt()))
}
