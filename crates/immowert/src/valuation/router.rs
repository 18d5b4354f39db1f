use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde_json::json;

use super::domain::EvaluationRequest;
use super::engine::ValuationEngine;
use super::validate::validate;

/// Router builder exposing the evaluation pipeline as one HTTP endpoint.
pub fn valuation_router(engine: Arc<ValuationEngine>) -> Router {
    Router::new()
        .route("/api/v1/valuations", post(evaluate_handler))
        .with_state(engine)
}

pub(crate) async fn evaluate_handler(
    State(engine): State<Arc<ValuationEngine>>,
    axum::Json(request): axum::Json<EvaluationRequest>,
) -> Response {
    match validate(request).and_then(|input| engine.appraise(&input)) {
        Ok(result) => (StatusCode::OK, axum::Json(result)).into_response(),
        // Every evaluation failure is a property of the submitted input.
        Err(error) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
    }
}
