//! # API REST
//!
//! REST API implementation for qform.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON bodies, CORS, download headers)
//!
//! Uses `api-shared` for wire types and `qform-core` for all behaviour.

#![warn(rust_2018_idioms)]

pub mod error;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::header,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use api_shared::{
    HealthRes, HealthService, NoteActionReq, NoteActionRes, ProblemRes, ProgressRes, ResolveReq,
    ResolveRes, TransitionReq, TransitionRes, ValidateDocumentReq, ValidateDocumentRes,
};
use qform_core::{
    authorize_note_action,
    config::{date_format_from_env_value, default_language_from_env_value},
    constants::XLSX_CONTENT_TYPE,
    is_missing, validate_document, CoreConfig, ExportService, FeedbackStatus, NoteAction,
    OperatorRole, Resolver, SubmissionExport,
};

pub use error::ApiError;

/// Application state shared across REST API handlers.
#[derive(Clone)]
pub struct AppState {
    cfg: Arc<CoreConfig>,
    export_service: ExportService,
}

impl AppState {
    pub fn new(cfg: Arc<CoreConfig>) -> Self {
        Self {
            export_service: ExportService::new(cfg.clone()),
            cfg,
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health,
        resolve_text,
        export_submission,
        submission_progress,
        validate_questionnaire,
        feedback_transition,
        authorize_note,
    ),
    components(schemas(
        api_shared::HealthRes,
        api_shared::ResolveReq,
        api_shared::ResolveRes,
        api_shared::ValidateDocumentReq,
        api_shared::ValidateDocumentRes,
        api_shared::ProblemRes,
        api_shared::ProgressRes,
        api_shared::TransitionReq,
        api_shared::TransitionRes,
        api_shared::NoteActionReq,
        api_shared::NoteActionRes,
        api_shared::ErrorRes,
    ))
)]
pub struct ApiDoc;

/// Build the core configuration from environment variables.
///
/// # Environment Variables
/// - `QFORM_DEFAULT_LANGUAGE`: fallback language for text resolution (default: "it")
/// - `QFORM_DATE_FORMAT`: `strftime` pattern for exported timestamps (default: "%d/%m/%Y %H:%M")
///
/// # Errors
/// Returns an error if either value is malformed.
pub fn core_config_from_env() -> anyhow::Result<CoreConfig> {
    let default_language =
        default_language_from_env_value(std::env::var("QFORM_DEFAULT_LANGUAGE").ok())?;
    let date_format = date_format_from_env_value(std::env::var("QFORM_DATE_FORMAT").ok());
    Ok(CoreConfig::new(default_language, date_format)?)
}

/// Build the REST router with Swagger UI and permissive CORS.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/resolve", post(resolve_text))
        .route("/exports", post(export_submission))
        .route("/submissions/progress", post(submission_progress))
        .route("/documents/validate", post(validate_questionnaire))
        .route("/feedback/transitions", post(feedback_transition))
        .route("/notes/authorize", post(authorize_note))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
///
/// Used for monitoring and load balancer health checks.
#[axum::debug_handler]
async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    post,
    path = "/resolve",
    request_body = ResolveReq,
    responses(
        (status = 200, description = "Resolved display text", body = ResolveRes),
        (status = 400, description = "Bad request", body = api_shared::ErrorRes),
        (status = 422, description = "Malformed text map or language", body = api_shared::ErrorRes)
    )
)]
/// Resolve a localized text map for one language
///
/// Falls back to the configured default language and then to any other populated language.
/// `missing` is true when the map exists but holds no usable text.
#[axum::debug_handler]
async fn resolve_text(
    State(state): State<AppState>,
    payload: Result<Json<ResolveReq>, JsonRejection>,
) -> Result<Json<ResolveRes>, ApiError> {
    let Json(req) = payload?;
    let resolver = Resolver::new(state.cfg.default_language());
    let text = resolver.resolve(req.text.as_ref(), &req.language);

    Ok(Json(ResolveRes {
        missing: is_missing(text),
        text: text.to_owned(),
    }))
}

#[utoipa::path(
    post,
    path = "/exports",
    request_body(content = serde_json::Value, content_type = "application/json"),
    responses(
        (status = 200, description = "XLSX workbook download (application/vnd.openxmlformats-officedocument.spreadsheetml.sheet)"),
        (status = 400, description = "Bad request", body = api_shared::ErrorRes),
        (status = 422, description = "Submission does not match the schema", body = api_shared::ErrorRes),
        (status = 500, description = "Spreadsheet generation failed", body = api_shared::ErrorRes)
    )
)]
/// Export a submission as a spreadsheet
///
/// The body is a full submission: questionnaire document, answers, notes, export language and
/// metadata. The response is the `.xlsx` file with a `submission_<subjectCode>_<date>.xlsx`
/// download name. Generation runs on the blocking pool.
#[axum::debug_handler]
async fn export_submission(
    State(state): State<AppState>,
    payload: Result<Json<SubmissionExport>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(submission) = payload?;
    let export_id = uuid::Uuid::new_v4();
    let filename = submission.filename(chrono::Utc::now().date_naive());

    tracing::info!(
        "export {} started for submission {} ({} questions, language {})",
        export_id,
        submission.metadata.id,
        submission.document.question_count(),
        submission.language
    );

    let service = state.export_service.clone();
    let bytes = tokio::task::spawn_blocking(move || service.export(&submission))
        .await
        .map_err(|e| {
            tracing::error!("export {} task failed: {:?}", export_id, e);
            ApiError::Internal("Internal error".into())
        })??;

    Ok((
        [
            (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_owned()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        bytes,
    )
        .into_response())
}

#[utoipa::path(
    post,
    path = "/submissions/progress",
    request_body(content = serde_json::Value, content_type = "application/json"),
    responses(
        (status = 200, description = "Answered and missing questions", body = ProgressRes),
        (status = 422, description = "Submission does not match the schema", body = api_shared::ErrorRes)
    )
)]
/// Report how far a submission has got
#[axum::debug_handler]
async fn submission_progress(
    State(_state): State<AppState>,
    payload: Result<Json<SubmissionExport>, JsonRejection>,
) -> Result<Json<ProgressRes>, ApiError> {
    let Json(submission) = payload?;
    Ok(Json(submission.progress().into()))
}

#[utoipa::path(
    post,
    path = "/documents/validate",
    request_body = ValidateDocumentReq,
    responses(
        (status = 200, description = "Structural problems found, if any", body = ValidateDocumentRes),
        (status = 422, description = "Document does not match the schema", body = api_shared::ErrorRes)
    )
)]
/// Check a questionnaire document for structural problems
///
/// Reports duplicate identifiers, multiple-choice questions without options, bad rating bounds
/// and text that is blank in every language.
#[axum::debug_handler]
async fn validate_questionnaire(
    State(_state): State<AppState>,
    payload: Result<Json<ValidateDocumentReq>, JsonRejection>,
) -> Result<Json<ValidateDocumentRes>, ApiError> {
    let Json(req) = payload?;
    let problems: Vec<ProblemRes> = validate_document(&req.document)
        .iter()
        .map(ProblemRes::from)
        .collect();

    Ok(Json(ValidateDocumentRes {
        valid: problems.is_empty(),
        problems,
    }))
}

#[utoipa::path(
    post,
    path = "/feedback/transitions",
    request_body = TransitionReq,
    responses(
        (status = 200, description = "Change allowed", body = TransitionRes),
        (status = 400, description = "Unknown status", body = api_shared::ErrorRes),
        (status = 409, description = "Change not allowed from the current status", body = api_shared::ErrorRes)
    )
)]
/// Apply a feedback status change against the canonical transition table
#[axum::debug_handler]
async fn feedback_transition(
    State(_state): State<AppState>,
    payload: Result<Json<TransitionReq>, JsonRejection>,
) -> Result<Json<TransitionRes>, ApiError> {
    let Json(req) = payload?;
    let from = FeedbackStatus::parse(&req.from)?;
    let to = FeedbackStatus::parse(&req.to)?;

    let status = from.transition(to)?;

    Ok(Json(TransitionRes {
        status: status.as_str().to_owned(),
        next: status.next().iter().map(|s| s.as_str().to_owned()).collect(),
    }))
}

#[utoipa::path(
    post,
    path = "/notes/authorize",
    request_body = NoteActionReq,
    responses(
        (status = 200, description = "Action permitted", body = NoteActionRes),
        (status = 400, description = "Unknown role or action", body = api_shared::ErrorRes),
        (status = 403, description = "Action not permitted", body = api_shared::ErrorRes)
    )
)]
/// Check whether an operator may edit or delete a note
#[axum::debug_handler]
async fn authorize_note(
    State(_state): State<AppState>,
    payload: Result<Json<NoteActionReq>, JsonRejection>,
) -> Result<Json<NoteActionRes>, ApiError> {
    let Json(req) = payload?;
    let role = OperatorRole::parse(&req.role)?;
    let action = NoteAction::parse(&req.action)?;
    authorize_note_action(&req.actor, role, &req.note_author, action)?;

    Ok(Json(NoteActionRes { allowed: true }))
}
