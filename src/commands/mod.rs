//! Command handlers for the CLI
//!
//! - `serve`  runs the HTTP API for one or all services
//! - `models` prints the categorized upstream model catalogue

pub mod models;
pub mod serve;
