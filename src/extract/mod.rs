//! Request extractors that reject with [`ApiError`]
//!
//! axum's built-in `Json` and `Path` extractors answer malformed input with
//! 415/422 and plain-text bodies. These wrappers fold every decode failure into
//! a 400 with the standard JSON error body.

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// JSON request body, decoded regardless of `Content-Type`
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|rejection| {
            tracing::debug!(reason = %rejection.body_text(), "Failed to read request body");
            invalid_input()
        })?;

        let value: serde_json::Value = serde_json::from_slice(&bytes).map_err(|err| {
            tracing::debug!(error = %err, "Failed to parse request body");
            invalid_input()
        })?;

        // Derived struct deserializers also accept arrays in field order
        if !value.is_object() {
            tracing::debug!("Request body is not a JSON object");
            return Err(invalid_input());
        }

        serde_json::from_value(value).map(JsonBody).map_err(|err| {
            tracing::debug!(error = %err, "Failed to decode request body");
            invalid_input()
        })
    }
}

fn invalid_input() -> ApiError {
    ApiError::BadRequest("Invalid input".to_string())
}

/// The `{id}` path segment, parsed as a user id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserId(pub i32);

#[async_trait]
impl<S> FromRequestParts<S> for UserId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| invalid_user_id())?;

        raw.parse::<i32>().map(UserId).map_err(|_| invalid_user_id())
    }
}

fn invalid_user_id() -> ApiError {
    ApiError::BadRequest("Invalid user ID".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request as HttpRequest, StatusCode},
        routing::get,
        Router,
    };
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Payload {
        name: String,
    }

    async fn decode(body: &'static str, content_type: Option<&str>) -> Result<Payload, ApiError> {
        let mut builder = HttpRequest::builder().method("POST").uri("/");
        if let Some(ct) = content_type {
            builder = builder.header("content-type", ct);
        }
        let req = builder.body(Body::from(body)).unwrap();
        JsonBody::<Payload>::from_request(req, &())
            .await
            .map(|JsonBody(p)| p)
    }

    #[tokio::test]
    async fn test_json_body_decodes() {
        let payload = decode(r#"{"name":"Ann"}"#, Some("application/json"))
            .await
            .unwrap();
        assert_eq!(payload.name, "Ann");
    }

    #[tokio::test]
    async fn test_json_body_without_content_type() {
        let payload = decode(r#"{"name":"Ann"}"#, None).await.unwrap();
        assert_eq!(payload.name, "Ann");
    }

    #[tokio::test]
    async fn test_json_body_malformed() {
        let err = decode("{not json", Some("application/json"))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), "Invalid input");
    }

    #[tokio::test]
    async fn test_json_body_wrong_shape() {
        let err = decode(r#"{"name": 12}"#, Some("application/json"))
            .await
            .unwrap_err();
        assert_eq!(err.message(), "Invalid input");

        let err = decode(r#"["Ann"]"#, Some("application/json")).await.unwrap_err();
        assert_eq!(err.message(), "Invalid input");
    }

    #[tokio::test]
    async fn test_json_body_rejects_non_objects() {
        for body in [r#""Ann""#, "42", "null", "true", "[]"] {
            let err = decode(body, Some("application/json")).await.unwrap_err();
            assert_eq!(err.status_code(), StatusCode::BAD_REQUEST, "body {}", body);
        }
    }

    async fn id_status(uri: &str) -> (StatusCode, String) {
        let app = Router::new().route(
            "/items/:id",
            get(|UserId(id): UserId| async move { id.to_string() }),
        );
        let resp = app
            .oneshot(HttpRequest::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = resp.status();
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8_lossy(&body).to_string())
    }

    #[tokio::test]
    async fn test_user_id_parses() {
        assert_eq!(id_status("/items/42").await, (StatusCode::OK, "42".to_string()));
        assert_eq!(id_status("/items/-3").await, (StatusCode::OK, "-3".to_string()));
    }

    #[tokio::test]
    async fn test_user_id_rejects_non_integer() {
        for uri in ["/items/abc", "/items/1.5", "/items/99999999999"] {
            let (status, body) = id_status(uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "uri {}", uri);
            assert!(body.contains("Invalid user ID"));
        }
    }
}
