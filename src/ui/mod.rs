//! Terminal UI helpers
//!
//! Status lines, spinners and prune progress use `cliclack`/`indicatif` in
//! an interactive terminal and fall back to plain lines in CI or when piped.
//! Everything here writes to stderr.

mod context;
mod output;
mod progress;

pub use context::UiContext;
pub use output::{remark, section, step_ok, step_warn};
pub use progress::{PruneProgress, TaskSpinner};
