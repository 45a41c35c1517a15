//! Networking modules for the invoice REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` owns the single configured HTTP client and its interceptors, `error`
//! is the failure taxonomy callers match on, and `types` defines the wire
//! schema.

pub mod api;
pub mod error;
pub mod types;

pub use api::{ApiClient, SessionExpired};
pub use error::ApiError;
