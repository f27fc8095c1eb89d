//! tokenport - a typed client for token-authenticated HTTP services.
//!
//! This crate provides the `ApiClient` for talking to services that issue
//! bearer tokens through their `/Token` endpoints. It owns the shared HTTP
//! transport, a file-backed session store, the interceptor that attaches
//! the stored token to outgoing requests, and typed endpoint bindings
//! compiled from a declarative endpoint table.
//!
//! A session is obtained once via [`ApiClient::login`] and then attached
//! automatically; the token-issue endpoint itself is never authorized.

pub mod api;
pub mod auth;
pub mod config;
pub mod utils;

pub use api::{ApiClient, ApiError, Request};
pub use auth::{SessionStore, SessionToken};
pub use config::Config;
