use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde_json::json;

use super::classifier::ClassificationInput;
use super::repository::{AbbreviationStore, EntityDirectory, RecordRepository};
use super::service::{CertificateIntakeService, IntakeOutcome, IntakeRequest, IntakeServiceError};

/// Router exposing classification and the full intake assessment.
pub fn certificate_router<R, S, E>(service: Arc<CertificateIntakeService<R, S, E>>) -> Router
where
    R: RecordRepository + 'static,
    S: AbbreviationStore + 'static,
    E: EntityDirectory + 'static,
{
    Router::new()
        .route(
            "/api/v1/certificates/classify",
            post(classify_handler::<R, S, E>),
        )
        .route("/api/v1/certificates/assess", post(assess_handler::<R, S, E>))
        .with_state(service)
}

pub(crate) async fn classify_handler<R, S, E>(
    State(service): State<Arc<CertificateIntakeService<R, S, E>>>,
    axum::Json(input): axum::Json<ClassificationInput>,
) -> Response
where
    R: RecordRepository + 'static,
    S: AbbreviationStore + 'static,
    E: EntityDirectory + 'static,
{
    let result = service.classify(&input);
    (StatusCode::OK, axum::Json(result)).into_response()
}

pub(crate) async fn assess_handler<R, S, E>(
    State(service): State<Arc<CertificateIntakeService<R, S, E>>>,
    axum::Json(request): axum::Json<IntakeRequest>,
) -> Response
where
    R: RecordRepository + 'static,
    S: AbbreviationStore + 'static,
    E: EntityDirectory + 'static,
{
    match service.assess(request) {
        Ok(decision) => {
            let status = match decision.outcome {
                IntakeOutcome::Accepted => StatusCode::OK,
                IntakeOutcome::Duplicate => StatusCode::CONFLICT,
                IntakeOutcome::Blocked => StatusCode::UNPROCESSABLE_ENTITY,
            };
            (status, axum::Json(decision)).into_response()
        }
        Err(IntakeServiceError::EntityNotFound(entity_id)) => {
            let payload = json!({
                "error": "entity not found",
                "entity_id": entity_id,
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
