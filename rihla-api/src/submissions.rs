use axum::{extract::State, http::StatusCode, routing::post, Form, Json, Router};
use rihla_core::{FieldMap, SubmissionKind};
use rihla_submit::{project, Rejection, SubmissionOutcome, SubmissionReply};

use crate::state::AppState;

/// Field the client challenge widget writes the verification token into.
pub const TOKEN_FIELD: &str = "g-recaptcha-response";

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/submissions/contact", post(submit_contact))
        .route("/v1/submissions/flight", post(submit_flight))
        .route("/v1/submissions/custom-package", post(submit_custom_package))
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /v1/submissions/contact
async fn submit_contact(
    State(state): State<AppState>,
    Form(fields): Form<FieldMap>,
) -> (StatusCode, Json<SubmissionReply>) {
    submit(state, SubmissionKind::Contact, fields).await
}

/// POST /v1/submissions/flight
async fn submit_flight(
    State(state): State<AppState>,
    Form(fields): Form<FieldMap>,
) -> (StatusCode, Json<SubmissionReply>) {
    submit(state, SubmissionKind::FlightInquiry, fields).await
}

/// POST /v1/submissions/custom-package
async fn submit_custom_package(
    State(state): State<AppState>,
    Form(fields): Form<FieldMap>,
) -> (StatusCode, Json<SubmissionReply>) {
    submit(state, SubmissionKind::CustomPackage, fields).await
}

/// The token travels in the field map; it is pulled out before the
/// remaining fields go through the pipeline. The JSON body is the contract;
/// the status code just mirrors the outcome class.
async fn submit(
    state: AppState,
    kind: SubmissionKind,
    mut fields: FieldMap,
) -> (StatusCode, Json<SubmissionReply>) {
    let token = fields.remove(TOKEN_FIELD);
    let outcome = state.pipeline.submit(kind, &fields, token.as_deref()).await;

    let status = match &outcome {
        SubmissionOutcome::Succeeded(_) => StatusCode::OK,
        SubmissionOutcome::Rejected(Rejection::InvalidInput(_)) => StatusCode::UNPROCESSABLE_ENTITY,
        SubmissionOutcome::Rejected(_) => StatusCode::BAD_REQUEST,
        SubmissionOutcome::Failed(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    (status, Json(project(&outcome)))
}
