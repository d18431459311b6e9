use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use finder_core::SearchError;
use serde_json::json;

#[derive(Debug)]
pub enum AppError {
    ValidationError(String),
    ProviderError(String),
    NotFoundError(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::ProviderError(_) => StatusCode::BAD_GATEWAY,
            AppError::NotFoundError(_) => StatusCode::NOT_FOUND,
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            AppError::ValidationError(msg)
            | AppError::ProviderError(msg)
            | AppError::NotFoundError(msg) => msg.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(json!({
            "error": self.user_message(),
        }));

        (status, body).into_response()
    }
}

impl From<SearchError> for AppError {
    fn from(err: SearchError) -> Self {
        match &err {
            SearchError::Validation(_) => AppError::ValidationError(err.to_string()),
            SearchError::Provider(_) => {
                tracing::warn!("Provider failure: {}", err);
                AppError::ProviderError(err.to_string())
            }
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!("Rejected JSON body: {}", rejection.body_text());
        AppError::ValidationError(rejection.body_text())
    }
}
