//! cachetree - build cache forest viewer and pruner
//!
//! Rebuilds the parent/child graph of the BuildKit build cache from the
//! builder's flat text report, renders it as an indented forest, and
//! completes age-based prunes by removing ancestor chains no surviving
//! record depends on.

pub mod builder;
pub mod cli;
pub mod config;
pub mod error;
pub mod forest;
pub mod prune;
pub mod render;
pub mod report;
pub mod ui;
pub mod workflow;

pub use error::{CacheTreeError, CacheTreeResult};
