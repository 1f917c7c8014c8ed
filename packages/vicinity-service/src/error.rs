pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
	#[error("Configuration error: {message}")]
	Configuration { message: String },
	#[error("Provider error: {message}")]
	Provider { message: String },
	#[error("Storage error: {message}")]
	Storage { message: String },
	#[error("Parse error: {message}")]
	Parse { message: String },
}
impl From<sqlx::Error> for Error {
	fn from(err: sqlx::Error) -> Self {
		Self::Storage { message: err.to_string() }
	}
}

impl From<vicinity_storage::Error> for Error {
	fn from(err: vicinity_storage::Error) -> Self {
		match err {
			vicinity_storage::Error::Sqlx(inner) => Self::Storage { message: inner.to_string() },
			vicinity_storage::Error::InvalidArgument(message) => Self::InvalidRequest { message },
		}
	}
}

impl From<color_eyre::Report> for Error {
	fn from(err: color_eyre::Report) -> Self {
		Self::Provider { message: err.to_string() }
	}
}

impl From<vicinity_providers::ParseError> for Error {
	fn from(err: vicinity_providers::ParseError) -> Self {
		Self::Parse { message: err.to_string() }
	}
}
