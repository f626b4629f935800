//! HTTP request handlers (route handlers).
//!
//! Each handler is an async function that:
//! 1. Receives HTTP request data (JSON body, URL params, etc.)
//! 2. Calls into a service
//! 3. Returns HTTP response (JSON, status code)

/// Public registration and token endpoints
pub mod api;
/// Administrative customer endpoints
pub mod customers;
/// Service health endpoint
pub mod health;
