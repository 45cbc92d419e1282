//! Configuration module for Shelf-Scout
//!
//! This module handles loading, parsing, and validating the optional TOML
//! service configuration. Every key has a default, so the service can run
//! without a file at all.
//!
//! # Example
//!
//! ```no_run
//! use shelf_scout::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("shelf-scout.toml")).unwrap();
//! println!("Listening on {}", config.server.bind);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    CallbackConfig, Config, DefaultsConfig, FetcherConfig, ServerConfig, ALLOWED_ORIGINS_ENV,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
pub(crate) use types::{default_concurrency, default_request_timeout_ms};
