//! HTTP transport and endpoint bindings.
//!
//! `ApiClient` owns the shared HTTP client, the session interceptor, and
//! the typed endpoint wrappers compiled from the endpoint table. Every
//! failure a caller sees normalizes to `ApiError`.

pub mod client;
pub mod endpoints;
pub mod error;

pub use client::{ApiClient, Request};
pub use endpoints::{TokenProfileResponse, TokenResponse};
pub use error::ApiError;
