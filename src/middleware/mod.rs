//! HTTP middleware components.
//!
//! Each middleware is one stage of the request pipeline. A stage either
//! short-circuits with a terminal response or forwards to the next one:
//! - log the request
//! - authenticate administrative requests (Basic-auth)
//! - require a header value on write endpoints

/// HTTP Basic authentication middleware
pub mod basic;
/// Required-header check
pub mod check_header;
/// Start/end request logging
pub mod logger;
