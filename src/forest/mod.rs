//! In-memory model of the build cache graph
//!
//! Cache records form a DAG through their parent links: a record may have
//! several parents and several records may share one. The model is rebuilt
//! from scratch for every report.

mod entry;
mod model;

pub use entry::Entry;
pub use model::{ChildIndex, Forest};
