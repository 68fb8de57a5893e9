//! Shared types, error model, and configuration for mdaggregate.
//!
//! This crate is the foundation depended on by all other mdaggregate crates.
//! It provides:
//! - [`MdAggregateError`] — the unified error type
//! - Domain types ([`CandidateFile`], [`Section`], [`SectionMap`], [`AggregateReport`])
//! - Configuration ([`AppConfig`], config loading)

pub mod config;
pub mod error;
pub mod paths;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, DefaultsConfig, config_dir, config_file_path, load_config, load_config_from,
};
pub use error::{MdAggregateError, Result};
pub use paths::resolve_against;
pub use types::{AggregateReport, CandidateFile, ROOT_SECTION_KEY, Section, SectionMap};
