use crate::application::{ApplicationError, ErrorKind};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::types::ErrorResponse;

/// API層のエラー型
///
/// アプリケーション層のエラーをラップし、HTTPレスポンスへのマッピングを提供する。
#[derive(Debug)]
pub enum ApiError {
    /// アプリケーション層のエラー
    Application(ApplicationError),
    /// リクエスト自体の不備（ヘッダー欠落、過去日時など）
    BadRequest(String),
}

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        ApiError::Application(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            ApiError::Application(err) => match err.kind() {
                // 404 Not Found - 存在しない、または閲覧権限がない
                ErrorKind::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND", err.to_string()),

                // 400 Bad Request - 入力・ビジネスルール違反
                ErrorKind::Validation => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_FAILED", err.to_string())
                }

                // 500 Internal Server Error
                // 内部エラーの詳細はログに記録し、ポート障害ではクライアントに一般的なメッセージのみを返す
                ErrorKind::Internal => {
                    tracing::error!(error = ?err, "internal error: {}", err);
                    let message = match err {
                        ApplicationError::Internal(msg) => msg,
                        _ => "An unexpected error occurred".to_string(),
                    };
                    (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", message)
                }
            },
        };

        let body = Json(ErrorResponse::new(error_type, message));
        (status, body).into_response()
    }
}
