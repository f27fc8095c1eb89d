//! Session token management and persistence.
//!
//! This module provides:
//! - `SessionToken`: the persisted credential bundle with expiry derivation
//! - `SessionStore`: file-backed persistence with failure-tolerant loading
//!
//! Sessions are written wholesale on login and replaced, never mutated in
//! place. Login state is derived from the store, not cached in memory.

pub mod session;
pub mod store;

pub use session::{SessionToken, TokenProfile};
pub use store::SessionStore;
