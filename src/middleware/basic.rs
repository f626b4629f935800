//! HTTP Basic authentication middleware.
//!
//! This middleware intercepts every administrative request to:
//! 1. Extract the credentials from the `Authorization: Basic ...` header
//! 2. Ask the injected [`Authorizer`] whether they are acceptable
//! 3. Forward the request untouched, or reject it with HTTP 401
//!
//! Nothing is remembered between requests: no session, no cookie.

use crate::error::AppError;
use async_trait::async_trait;
use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use base64::{Engine, engine::general_purpose::STANDARD};
use std::sync::Arc;

/// Credential predicate consulted by [`basic_auth`].
#[async_trait]
pub trait Authorizer: Send + Sync + 'static {
    async fn authorize(&self, login: &str, password: &str) -> bool;
}

/// Shared handle passed to the middleware as state.
pub type SharedAuthorizer = Arc<dyn Authorizer>;

/// Split an `Authorization` header value into `(login, password)`.
///
/// The value must be exactly `Basic <base64>` (two space-separated parts)
/// and the decoded payload exactly two colon-separated fields. Anything
/// else yields `None`.
pub fn parse_basic_credentials(value: &str) -> Option<(String, String)> {
    let parts: Vec<&str> = value.split(' ').collect();
    let [scheme, encoded] = parts.as_slice() else {
        return None;
    };
    if !scheme.eq_ignore_ascii_case("Basic") {
        return None;
    }

    let decoded = String::from_utf8(STANDARD.decode(encoded).ok()?).ok()?;
    let fields: Vec<&str> = decoded.split(':').collect();
    let [login, password] = fields.as_slice() else {
        return None;
    };

    Some((login.to_string(), password.to_string()))
}

/// Basic-auth middleware function.
///
/// # Flow
///
/// 1. Read the `Authorization` header (missing or non-ASCII → 401)
/// 2. Parse it with [`parse_basic_credentials`] (malformed → 401)
/// 3. Call the authorizer (false → 401)
/// 4. Call the next handler with the request unmodified
pub async fn basic_auth(
    State(authorizer): State<SharedAuthorizer>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(AppError::Unauthorized)?;

    let (login, password) = parse_basic_credentials(header).ok_or_else(|| {
        tracing::debug!("malformed basic authorization header");
        AppError::Unauthorized
    })?;

    if !authorizer.authorize(&login, &password).await {
        tracing::debug!(login = %login, "basic credentials rejected");
        return Err(AppError::Unauthorized);
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
        routing::get,
    };
    use tower::ServiceExt;

    struct Fixed;

    #[async_trait]
    impl Authorizer for Fixed {
        async fn authorize(&self, login: &str, password: &str) -> bool {
            login == "admin" && password == "secret"
        }
    }

    fn encode(raw: &str) -> String {
        format!("Basic {}", STANDARD.encode(raw))
    }

    async fn status_for(header: Option<&str>) -> StatusCode {
        let authorizer: SharedAuthorizer = Arc::new(Fixed);
        let app = Router::new()
            .route("/", get(|| async { "inner" }))
            .route_layer(from_fn_with_state(authorizer, basic_auth));

        let mut request = Request::builder().uri("/");
        if let Some(value) = header {
            request = request.header(AUTHORIZATION, value);
        }

        app.oneshot(request.body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[test]
    fn parses_well_formed_header() {
        assert_eq!(
            parse_basic_credentials(&encode("admin:secret")),
            Some(("admin".to_string(), "secret".to_string()))
        );
    }

    #[test]
    fn rejects_malformed_headers() {
        assert_eq!(parse_basic_credentials("Basic"), None);
        assert_eq!(parse_basic_credentials("BasicYWRtaW46c2VjcmV0"), None);
        assert_eq!(parse_basic_credentials("Basic  YWRtaW46c2VjcmV0"), None);
        assert_eq!(parse_basic_credentials("Bearer YWRtaW46c2VjcmV0"), None);
        assert_eq!(parse_basic_credentials("Basic !!!not-base64!!!"), None);
        assert_eq!(parse_basic_credentials(&encode("no-colon")), None);
        assert_eq!(parse_basic_credentials(&encode("a:b:c")), None);
    }

    #[tokio::test]
    async fn missing_header_is_unauthorized() {
        assert_eq!(status_for(None).await, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn malformed_header_is_unauthorized() {
        assert_eq!(status_for(Some("Basic")).await, StatusCode::UNAUTHORIZED);
        assert_eq!(
            status_for(Some(&encode("nocolon"))).await,
            StatusCode::UNAUTHORIZED
        );
    }

    #[tokio::test]
    async fn rejected_credentials_are_unauthorized() {
        assert_eq!(
            status_for(Some(&encode("admin:wrong"))).await,
            StatusCode::UNAUTHORIZED
        );
    }

    #[tokio::test]
    async fn accepted_credentials_reach_the_handler() {
        assert_eq!(
            status_for(Some(&encode("admin:secret"))).await,
            StatusCode::OK
        );
    }
}
