//! Required-header middleware.
//!
//! Rejects with 400 any request whose header does not exactly equal the
//! configured value. Used to require `Content-Type: application/json` on
//! write endpoints.

use crate::error::AppError;
use axum::{
    extract::{Request, State},
    http::{HeaderName, HeaderValue, header::CONTENT_TYPE},
    middleware::Next,
    response::Response,
};

#[derive(Debug, Clone)]
pub struct RequiredHeader {
    name: HeaderName,
    value: HeaderValue,
}

impl RequiredHeader {
    pub fn new(name: HeaderName, value: HeaderValue) -> Self {
        Self { name, value }
    }

    pub fn json_content_type() -> Self {
        Self::new(CONTENT_TYPE, HeaderValue::from_static("application/json"))
    }
}

pub async fn check_header(
    State(required): State<RequiredHeader>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if request.headers().get(&required.name) != Some(&required.value) {
        return Err(AppError::InvalidRequest(format!(
            "header {} must be {:?}",
            required.name, required.value
        )));
    }

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode},
        middleware::from_fn_with_state,
        routing::post,
    };
    use tower::ServiceExt;

    async fn status_for(content_type: Option<&str>) -> StatusCode {
        let app = Router::new()
            .route("/", post(|| async { "ok" }))
            .route_layer(from_fn_with_state(
                RequiredHeader::json_content_type(),
                check_header,
            ));

        let mut request = Request::builder().method("POST").uri("/");
        if let Some(value) = content_type {
            request = request.header(CONTENT_TYPE, value);
        }

        app.oneshot(request.body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn exact_value_passes() {
        assert_eq!(status_for(Some("application/json")).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn missing_or_different_value_is_bad_request() {
        assert_eq!(status_for(None).await, StatusCode::BAD_REQUEST);
        assert_eq!(status_for(Some("text/plain")).await, StatusCode::BAD_REQUEST);
        assert_eq!(
            status_for(Some("application/json; charset=utf-8")).await,
            StatusCode::BAD_REQUEST
        );
    }
}
