//! Build cache collaborators
//!
//! The rest of the crate talks to the builder through [`BuildCache`]: one
//! inventory call and two prune calls, all returning the builder's textual
//! report. The `docker buildx` implementation lives in `buildx`.

mod buildx;
mod cutoff;

pub use buildx::{BuildxCache, LineObserver};
pub use cutoff::{Cutoff, CutoffKind};

use crate::config::Config;
use crate::error::CacheTreeResult;
use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader};

/// Max number of output lines kept in collaborator error messages.
const ERROR_TAIL_LINES: usize = 50;

/// Access to a builder's cache
#[async_trait]
pub trait BuildCache: Send + Sync {
    /// Report of every cache record, ending with a total line
    async fn inventory(&self) -> CacheTreeResult<String>;

    /// Remove records unused since `cutoff`; report what was removed
    async fn prune_until(&self, cutoff: &Cutoff) -> CacheTreeResult<String>;

    /// Remove exactly `ids`; report what was removed.
    ///
    /// With `simulate` set, or no ids, nothing is removed and the report is
    /// empty.
    async fn prune_ids(&self, ids: &[String], simulate: bool) -> CacheTreeResult<String>;

    /// Human-readable name for display
    fn name(&self) -> String;
}

/// Create the builder collaborator from configuration.
///
/// `builder` overrides the configured builder name.
pub fn create_cache(config: &Config, builder: Option<&str>) -> BuildxCache {
    let name = builder
        .map(str::to_string)
        .or_else(|| config.builder.name.clone());
    BuildxCache::new(config.builder.binary.clone(), name)
}

/// Keep the useful tail of command output for error diagnostics.
pub(crate) fn error_output(stdout: &str, stderr: &str) -> String {
    let lines: Vec<&str> = stdout.lines().chain(stderr.lines()).collect();
    let start = lines.len().saturating_sub(ERROR_TAIL_LINES);
    lines[start..].join("\n")
}

/// Read stdout and stderr of a child to the end, calling `on_stdout` for
/// each stdout line.
///
/// Returns the collected `(stdout, stderr)` text. Pipes that were not set up
/// read as empty.
pub(crate) async fn stream_child_output(
    child: &mut tokio::process::Child,
    on_stdout: &(dyn Fn(&str) + Send + Sync),
) -> (String, String) {
    let mut stdout = String::new();
    let mut stderr = String::new();

    let (Some(out), Some(err)) = (child.stdout.take(), child.stderr.take()) else {
        return (stdout, stderr);
    };

    let mut stdout_reader = BufReader::new(out).lines();
    let mut stderr_reader = BufReader::new(err).lines();
    let mut stdout_done = false;
    let mut stderr_done = false;

    while !stdout_done || !stderr_done {
        tokio::select! {
            line = stdout_reader.next_line(), if !stdout_done => {
                match line {
                    Ok(Some(line)) => {
                        on_stdout(&line);
                        stdout.push_str(&line);
                        stdout.push('\n');
                    }
                    _ => stdout_done = true,
                }
            }
            line = stderr_reader.next_line(), if !stderr_done => {
                match line {
                    Ok(Some(line)) => {
                        stderr.push_str(&line);
                        stderr.push('\n');
                    }
                    _ => stderr_done = true,
                }
            }
        }
    }

    (stdout, stderr)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_output_keeps_tail() {
        let stdout: String = (0..60).map(|i| format!("out {i}\n")).collect();
        let tail = error_output(&stdout, "boom\n");
        let lines: Vec<&str> = tail.lines().collect();
        assert_eq!(lines.len(), ERROR_TAIL_LINES);
        assert_eq!(lines.last(), Some(&"boom"));
        assert_eq!(lines[0], "out 11");
    }

    #[test]
    fn error_output_short() {
        assert_eq!(error_output("a\n", "b\n"), "a\nb");
        assert_eq!(error_output("", ""), "");
    }

    #[test]
    fn create_cache_prefers_cli_builder() {
        let mut config = Config::default();
        config.builder.name = Some("from-config".to_string());

        let cache = create_cache(&config, Some("from-cli"));
        assert_eq!(cache.builder(), Some("from-cli"));

        let cache = create_cache(&config, None);
        assert_eq!(cache.builder(), Some("from-config"));
    }
}
