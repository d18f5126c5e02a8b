//! CLI command implementations.

mod search;

pub use search::cmd_search;
