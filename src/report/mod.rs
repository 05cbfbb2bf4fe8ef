//! Adapter over the builder's textual cache report
//!
//! The rest of the crate only sees [`Forest`](crate::forest::Forest); the
//! exact spelling of the report format stays in this module.

mod parser;

pub use parser::parse;
