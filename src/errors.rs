use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error; // Use thiserror for cleaner error definitions

// --- Domain/Infrastructure Errors ---

#[derive(Error, Debug)]
pub enum RepoError {
    #[error("Idea not found with ID: {0}")]
    NotFound(i64),

    #[error("Database backend error: {0}")]
    BackendError(#[from] anyhow::Error), // Wrap Anyhow errors from DB layer
}

/// A single field that failed its constraint.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    #[error("{field} exceeds maximum length of {max} characters")]
    TooLong { field: &'static str, max: usize },
}

impl FieldError {
    pub fn field(&self) -> &'static str {
        match self {
            FieldError::Empty { field } | FieldError::TooLong { field, .. } => *field,
        }
    }
}

/// Every field of a request body that failed validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Validation failed for {}", join_fields(.errors))]
pub struct ValidationError {
    errors: Vec<FieldError>,
}

impl ValidationError {
    /// Returns `None` when nothing failed.
    pub fn from_errors(errors: Vec<FieldError>) -> Option<Self> {
        if errors.is_empty() {
            None
        } else {
            Some(Self { errors })
        }
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn fields(&self) -> Vec<&'static str> {
        self.errors.iter().map(FieldError::field).collect()
    }
}

fn join_fields(errors: &[FieldError]) -> String {
    errors.iter().map(FieldError::field).collect::<Vec<_>>().join(", ")
}

#[derive(Serialize)]
struct FieldDetail {
    field: &'static str,
    message: String,
}

// --- Web Layer Error ---

#[derive(Error, Debug)]
pub enum AppError {
    // Input validation errors
    #[error(transparent)]
    Validation(#[from] ValidationError),

    // Domain/Service level errors (mapped from RepoError)
    #[error("Idea not found with ID: {0}")]
    IdeaNotFound(i64),
    #[error("Could not access idea data")]
    RepositoryError(#[source] RepoError), // Source allows seeing underlying RepoError

    // Configuration / Startup errors
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Initialization error: {0}")]
    InitError(String),

    // Generic Internal Server Error
    #[error("Internal server error: {0}")]
    InternalServerError(String),
}

// --- Conversions from Domain Errors to AppError ---

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(id) => AppError::IdeaNotFound(id),
            e @ RepoError::BackendError(_) => AppError::RepositoryError(e),
        }
    }
}

impl From<crate::config::ConfigError> for AppError {
    fn from(err: crate::config::ConfigError) -> Self {
        AppError::ConfigError(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::InternalServerError(format!("IO error: {}", err))
    }
}

// --- Axum Response Implementation ---

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            // 4xx Client Errors
            AppError::Validation(e) => {
                tracing::debug!(fields = ?e.fields(), "Rejecting invalid idea payload");
                let detail: Vec<FieldDetail> = e
                    .errors()
                    .iter()
                    .map(|fe| FieldDetail {
                        field: fe.field(),
                        message: fe.to_string(),
                    })
                    .collect();
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    serde_json::json!({ "error": "validation failed", "detail": detail }),
                )
            }
            AppError::IdeaNotFound(id) => {
                tracing::debug!(idea_id = %id, "Idea not found");
                (StatusCode::NOT_FOUND, serde_json::json!({ "error": "idea not found" }))
            }

            // 5xx Server Errors
            AppError::RepositoryError(e) => {
                tracing::error!(error.source = ?e, "Repository error occurred");
                internal("Database operation failed")
            }
            AppError::ConfigError(msg) => {
                tracing::error!("Configuration error: {}", msg);
                internal("Server configuration error")
            }
            AppError::InitError(msg) => {
                tracing::error!("Initialization error: {}", msg);
                internal("Server initialization error")
            }
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal server error: {}", msg);
                internal("An internal server error occurred")
            }
        };

        (status, Json(body)).into_response()
    }
}

fn internal(message: &str) -> (StatusCode, serde_json::Value) {
    (StatusCode::INTERNAL_SERVER_ERROR, serde_json::json!({ "error": message }))
}
