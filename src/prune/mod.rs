//! Prune completion
//!
//! Works out which records an age-based prune left behind even though
//! nothing still alive depends on them.

mod analyzer;

pub use analyzer::extra_prunable;
