use axum::{
	Json, Router,
	extract::State,
	http::StatusCode,
	response::{IntoResponse, Response},
	routing::{get, post},
};
use serde::Serialize;
use tower_http::cors::CorsLayer;

use vicinity_service::{
	DistanceRequest, DistanceResponse, SearchRequest, SearchResponse, ServiceError,
};

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/v1/search", post(search))
		.route("/v1/distance", post(distance))
		.layer(CorsLayer::permissive())
		.with_state(state)
}

async fn health() -> StatusCode {
	StatusCode::OK
}

async fn search(
	State(state): State<AppState>,
	Json(payload): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, ApiError> {
	let response = state.service.search(payload).await?;

	Ok(Json(response))
}

async fn distance(
	State(state): State<AppState>,
	Json(payload): Json<DistanceRequest>,
) -> Result<Json<DistanceResponse>, ApiError> {
	let response = state.service.resolve_distances(payload).await?;

	Ok(Json(response))
}

#[derive(Debug, Serialize)]
struct ErrorBody {
	error: String,
	message: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	troubleshooting: Option<Vec<String>>,
}

#[derive(Debug)]
pub struct ApiError {
	status: StatusCode,
	error: String,
	message: String,
	troubleshooting: Option<Vec<String>>,
}
impl From<ServiceError> for ApiError {
	fn from(err: ServiceError) -> Self {
		let message = err.to_string();

		match err {
			ServiceError::InvalidRequest { .. } => Self {
				status: StatusCode::BAD_REQUEST,
				error: "invalid_request".to_string(),
				message,
				troubleshooting: None,
			},
			ServiceError::Configuration { .. } => Self {
				status: StatusCode::INTERNAL_SERVER_ERROR,
				error: "configuration".to_string(),
				message,
				troubleshooting: Some(vec![
					"Check that every provider section has an api_key set.".to_string(),
					"Check that the embedding dimensions match the stored vectors.".to_string(),
					"Check that storage.postgres.dsn points at a reachable database.".to_string(),
				]),
			},
			ServiceError::Provider { .. } => Self {
				status: StatusCode::INTERNAL_SERVER_ERROR,
				error: "provider".to_string(),
				message,
				troubleshooting: None,
			},
			ServiceError::Storage { .. } => Self {
				status: StatusCode::INTERNAL_SERVER_ERROR,
				error: "storage".to_string(),
				message,
				troubleshooting: None,
			},
			ServiceError::Parse { .. } => Self {
				status: StatusCode::INTERNAL_SERVER_ERROR,
				error: "parse".to_string(),
				message,
				troubleshooting: None,
			},
		}
	}
}

impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		let body = ErrorBody {
			error: self.error,
			message: self.message,
			troubleshooting: self.troubleshooting,
		};

		(self.status, Json(body)).into_response()
	}
}
