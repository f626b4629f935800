//! Route table and middleware composition.
//!
//! Request pipeline, outermost first:
//! 1. `TraceLayer` span
//! 2. `log_request` START/END lines
//! 3. group gate: Basic-auth for `/customers...`, none for `/api/...`
//! 4. `check_header` on JSON write routes
//! 5. handler

use crate::{
    AppState, handlers,
    middleware::{
        basic::{SharedAuthorizer, basic_auth},
        check_header::{RequiredHeader, check_header},
        logger::log_request,
    },
};
use axum::{
    Router,
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

pub fn router(state: AppState) -> Router {
    let authorizer: SharedAuthorizer = std::sync::Arc::new(state.auth.clone());
    let json_only = from_fn_with_state(RequiredHeader::json_content_type(), check_header);

    // Administrative routes, manager credentials required
    let admin_routes = Router::new()
        .route(
            "/customers",
            get(handlers::customers::get_all_customers)
                .merge(post(handlers::customers::save_customer).layer(json_only.clone())),
        )
        .route(
            "/customers/active",
            get(handlers::customers::get_all_active_customers),
        )
        .route(
            "/customers/{id}",
            get(handlers::customers::get_customer_by_id)
                .delete(handlers::customers::remove_customer_by_id),
        )
        .route(
            "/customers/{id}/block",
            post(handlers::customers::block_customer_by_id)
                .delete(handlers::customers::unblock_customer_by_id),
        )
        .route_layer(from_fn_with_state(authorizer, basic_auth));

    // Public customer API
    let api_routes = Router::new()
        .route("/api/customers", post(handlers::api::register_customer))
        .route("/api/customers/token", post(handlers::api::issue_token))
        .route(
            "/api/customers/token/validate",
            post(handlers::api::validate_token),
        )
        .route_layer(json_only);

    Router::new()
        .route("/health", get(handlers::health::health_check))
        .merge(admin_routes)
        .merge(api_routes)
        .layer(from_fn(log_request))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
