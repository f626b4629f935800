//! Business logic services.
//!
//! Services contain core business logic separated from HTTP handlers.
//! Each one is constructed with the store handle it works against.

pub mod auth_service;
pub mod customer_service;
pub mod password;
pub mod token_sweeper;
