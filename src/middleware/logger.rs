//! Request logging middleware.
//!
//! Emits one line when a request enters the stack and one when its response
//! leaves. Never changes the request or the response.

use axum::{extract::Request, middleware::Next, response::Response};

pub async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();

    tracing::info!("START: {} {}", method, path);
    let response = next.run(request).await;
    tracing::info!(status = response.status().as_u16(), "END: {} {}", method, path);

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Router,
        body::Body,
        http::{self, StatusCode},
        middleware::from_fn,
        routing::get,
    };
    use http_body_util::BodyExt;
    use std::{
        io,
        sync::{Arc, Mutex},
    };
    use tower::ServiceExt;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Captured {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn app() -> Router {
        Router::new()
            .route("/items", get(|| async { (StatusCode::CREATED, "body") }))
            .layer(from_fn(log_request))
    }

    #[tokio::test]
    async fn response_passes_through_unchanged() {
        let response = app()
            .oneshot(http::Request::get("/items").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"body");
    }

    #[tokio::test]
    async fn logs_start_and_end_lines() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let response = app()
            .oneshot(http::Request::get("/items").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let output = captured.text();
        let start = output.find("START: GET /items").expect("start line");
        let end = output.find("END: GET /items").expect("end line");
        assert!(start < end);
        assert!(output.contains("status=201"));
    }
}
