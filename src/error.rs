/*
 * Responsibility
 * - アプリ共通の AppError 定義
 * - IntoResponse 実装 (HTTP status / JSON error body)
 * - validation / menu / extractor rejection を統一的に変換
 */
use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::services::menu::MenuError;
use crate::validation::{FieldError, ValidationError};

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldError>,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{code}: {message}")]
    BadRequest { code: &'static str, message: String },
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("unauthorized")]
    Unauthorized,
    #[error("forbidden")]
    Forbidden,
    #[error("not found: {resource}")]
    NotFound { resource: &'static str },
    #[error("payload too large")]
    PayloadTooLarge,
    #[error("rejected request ({status}): {message}")]
    Rejected { status: StatusCode, message: String },
    #[error("internal server error")]
    Internal,
}

impl AppError {
    pub fn bad_request(code: &'static str, message: impl Into<String>) -> Self {
        Self::BadRequest {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &'static str) -> Self {
        Self::NotFound { resource }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest { .. } | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Rejected { status, .. } => *status,
            AppError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (code, message, fields) = match self {
            AppError::BadRequest { code, message } => (code, message, Vec::new()),
            AppError::Validation(ValidationError::InvalidFields(fields)) => {
                ("VALIDATION_ERROR", "validation failed".into(), fields)
            }
            AppError::Validation(ValidationError::UnknownType) => (
                "UNKNOWN_MENU_TYPE",
                "menuType must be one of FOOD, DRINK".into(),
                Vec::new(),
            ),
            AppError::Unauthorized => ("UNAUTHORIZED", "unauthorized".into(), Vec::new()),
            AppError::Forbidden => ("FORBIDDEN", "forbidden".into(), Vec::new()),
            AppError::NotFound { resource } => {
                ("not_found", format!("{resource} not found."), Vec::new())
            }
            AppError::PayloadTooLarge => (
                "PAYLOAD_TOO_LARGE",
                "request body is too large".into(),
                Vec::new(),
            ),
            AppError::Rejected { message, .. } => ("INVALID_REQUEST", message, Vec::new()),
            AppError::Internal => (
                "INTERNAL_SERVER_ERROR",
                "internal server error".into(),
                Vec::new(),
            ),
        };

        let body = ErrorResponse {
            error: ErrorBody {
                code,
                message,
                fields,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<MenuError> for AppError {
    fn from(e: MenuError) -> Self {
        match e {
            MenuError::Validation(v) => AppError::Validation(v),
            MenuError::NotFound => AppError::not_found("menu item"),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(e: JsonRejection) -> Self {
        match e {
            JsonRejection::JsonDataError(_)
            | JsonRejection::JsonSyntaxError(_)
            | JsonRejection::MissingJsonContentType(_) => {
                AppError::bad_request("INVALID_JSON", e.body_text())
            }
            // Body could not be read (size limit, broken stream)
            other => match other.status() {
                StatusCode::PAYLOAD_TOO_LARGE => AppError::PayloadTooLarge,
                status => AppError::Rejected {
                    status,
                    message: other.body_text(),
                },
            },
        }
    }
}

impl From<QueryRejection> for AppError {
    fn from(e: QueryRejection) -> Self {
        AppError::bad_request("INVALID_QUERY", e.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(e: PathRejection) -> Self {
        AppError::bad_request("INVALID_ID", e.body_text())
    }
}
