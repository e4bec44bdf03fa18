//! Unified error handling for the API.
//!
//! Every handler returns [`AppError`], which maps onto the wire format the
//! API promises: validation problems arrive as `{"error": ...}` with a 400,
//! everything else as `{"message": ...}` with the matching status code.
//! Internal failures are logged and redacted to a generic message.

use axum::Json;
use axum::extract::{FromRequest, Multipart, Request};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

use crate::db::RepositoryError;
use crate::models::ValidationError;

/// Application error type covering all handler failure modes.
#[derive(Debug, Error)]
pub enum AppError {
    /// Book payload failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Request was syntactically malformed (bad JSON, bad multipart).
    #[error("{0}")]
    BadRequest(String),

    /// Path id is not a valid 24-character hex object id.
    #[error("Invalid book ID")]
    InvalidBookId,

    /// No book exists with the requested id.
    #[error("Book not found")]
    BookNotFound,

    /// The backing store failed.
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// Writing an uploaded file to disk failed.
    #[error("File upload failed: {0}")]
    UploadFailed(#[from] std::io::Error),
}

#[derive(Serialize)]
struct ValidationBody {
    error: String,
}

#[derive(Serialize)]
struct MessageBody {
    message: &'static str,
}

fn validation_response(status: StatusCode, error: String) -> Response {
    (status, Json(ValidationBody { error })).into_response()
}

fn message_response(status: StatusCode, message: &'static str) -> Response {
    (status, Json(MessageBody { message })).into_response()
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            Self::Validation(err) => {
                validation_response(StatusCode::BAD_REQUEST, err.to_string())
            }
            Self::BadRequest(detail) => validation_response(StatusCode::BAD_REQUEST, detail),
            Self::InvalidBookId => {
                message_response(StatusCode::BAD_REQUEST, "Invalid book ID")
            }
            Self::BookNotFound => message_response(StatusCode::NOT_FOUND, "Book not found"),
            Self::Repository(err) => {
                tracing::error!(error = %err, "Repository error");
                message_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
            Self::UploadFailed(err) => {
                tracing::error!(error = %err, "File upload failed");
                message_response(StatusCode::INTERNAL_SERVER_ERROR, "File upload failed")
            }
        }
    }
}

/// JSON extractor that reports rejections in the API's error body format.
#[derive(Debug)]
pub struct AppJson<T>(pub T);

impl<S, T> FromRequest<S> for AppJson<T>
where
    T: serde::de::DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(AppError::BadRequest(rejection.body_text())),
        }
    }
}

/// Multipart extractor that reports rejections in the API's error body format.
pub struct AppMultipart(pub Multipart);

impl<S> FromRequest<S> for AppMultipart
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Multipart::from_request(req, state).await {
            Ok(multipart) => Ok(Self(multipart)),
            Err(rejection) => Err(AppError::BadRequest(rejection.body_text())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_is_bad_request() {
        let err = AppError::Validation(ValidationError(vec!["bookname is required".to_string()]));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_bad_request_status() {
        let err = AppError::BadRequest("unparseable body".to_string());
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_invalid_book_id_is_bad_request() {
        assert_eq!(
            AppError::InvalidBookId.into_response().status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_book_not_found_is_not_found() {
        assert_eq!(
            AppError::BookNotFound.into_response().status(),
            StatusCode::NOT_FOUND
        );
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read response body");
        serde_json::from_slice(&bytes).expect("Response body is not JSON")
    }

    #[tokio::test]
    async fn test_repository_error_is_internal() {
        let err = AppError::Repository(RepositoryError::DataCorruption(
            "missing inserted id".to_string(),
        ));
        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["message"], "Internal server error");
        // The backend detail is logged, never sent
        assert!(!body.to_string().contains("missing inserted id"));
    }

    #[tokio::test]
    async fn test_upload_error_is_internal() {
        let err = AppError::UploadFailed(std::io::Error::other("disk full"));
        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["message"], "File upload failed");
        assert!(!body.to_string().contains("disk full"));
    }
}
