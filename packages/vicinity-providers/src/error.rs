/// Malformed structured output from the listing generator. Recovered upstream
/// by the fallback extraction chain; surfaced only when every stage fails.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
	#[error("Listing generator returned unparseable output: {message}")]
	Listing { message: String },
}
