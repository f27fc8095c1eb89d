//! Shared pure helpers.

pub mod url;

// Re-export commonly used functions at module level
pub use url::{append_query_param, join_url};
