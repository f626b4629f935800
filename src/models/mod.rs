//! Data models representing database entities.
//!
//! This module contains all data structures that map to database tables,
//! plus the request/response bodies built from them.

/// Customer model
pub mod customer;
/// Customer token model
pub mod token;
