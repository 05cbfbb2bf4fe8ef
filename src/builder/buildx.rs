//! `docker buildx` build cache collaborator
//!
//! Runs `buildx du --verbose` and `buildx prune --verbose` and returns their
//! stdout. Prune output is streamed so callers can show progress while
//! records are removed.

use super::cutoff::Cutoff;
use super::{error_output, stream_child_output, BuildCache};
use crate::error::{CacheTreeError, CacheTreeResult};
use async_trait::async_trait;
use chrono::Utc;
use std::process::Stdio;
use std::sync::Arc;
use tokio::process::Command;
use tracing::{debug, info};

/// Callback receiving each stdout line of a running prune
pub type LineObserver = Arc<dyn Fn(&str) + Send + Sync>;

/// Build cache of a buildx builder
#[derive(Clone)]
pub struct BuildxCache {
    binary: String,
    builder: Option<String>,
    observer: Option<LineObserver>,
}

impl BuildxCache {
    /// Create a collaborator running `binary buildx ...` against `builder`
    /// (the current builder when `None`)
    pub fn new(binary: impl Into<String>, builder: Option<String>) -> Self {
        Self {
            binary: binary.into(),
            builder,
            observer: None,
        }
    }

    /// Report prune output lines to `observer` as they arrive
    pub fn with_observer(mut self, observer: LineObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Target builder, if one was selected
    pub fn builder(&self) -> Option<&str> {
        self.builder.as_deref()
    }

    /// Full argument list for a buildx subcommand
    fn args(&self, subcommand: &[&str], extra: impl IntoIterator<Item = String>) -> Vec<String> {
        let mut args = vec!["buildx".to_string()];
        args.extend(subcommand.iter().map(|s| s.to_string()));
        if let Some(ref builder) = self.builder {
            args.push("--builder".to_string());
            args.push(builder.clone());
        }
        args.extend(extra);
        args
    }

    fn command_line(&self, args: &[String]) -> String {
        std::iter::once(self.binary.as_str())
            .chain(args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Run the binary with `args` and return stdout.
    ///
    /// A non-zero exit becomes a collaborator failure carrying the command,
    /// its status, and the tail of its output.
    async fn exec(&self, args: Vec<String>, observe: bool) -> CacheTreeResult<String> {
        let command = self.command_line(&args);
        debug!("Executing: {}", command);

        let mut child = Command::new(&self.binary)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| CacheTreeError::command_failed(command.clone(), e))?;

        let noop = |_: &str| {};
        let on_stdout: &(dyn Fn(&str) + Send + Sync) = match (&self.observer, observe) {
            (Some(observer), true) => observer.as_ref(),
            _ => &noop,
        };
        let (stdout, stderr) = stream_child_output(&mut child, on_stdout).await;

        let status = child
            .wait()
            .await
            .map_err(|e| CacheTreeError::command_failed(command.clone(), e))?;

        if status.success() {
            Ok(stdout)
        } else {
            Err(CacheTreeError::collaborator(
                command,
                status,
                error_output(&stdout, &stderr),
            ))
        }
    }
}

#[async_trait]
impl BuildCache for BuildxCache {
    async fn inventory(&self) -> CacheTreeResult<String> {
        let args = self.args(&["du", "--verbose"], []);
        self.exec(args, false).await
    }

    async fn prune_until(&self, cutoff: &Cutoff) -> CacheTreeResult<String> {
        match cutoff.instant(Utc::now()) {
            Some(at) => info!(
                "Pruning cache records unused since {} ({})",
                cutoff,
                at.format("%Y-%m-%d %H:%M UTC")
            ),
            None => info!("Pruning cache records unused since {}", cutoff),
        }
        let filter = ["--filter".to_string(), format!("until={}", cutoff.as_str())];
        let args = self.args(&["prune", "--force", "--verbose"], filter);
        self.exec(args, true).await
    }

    async fn prune_ids(&self, ids: &[String], simulate: bool) -> CacheTreeResult<String> {
        if ids.is_empty() {
            return Ok(String::new());
        }
        if simulate {
            info!("Simulate: would prune {} records by id", ids.len());
            return Ok(String::new());
        }

        info!("Pruning {} records by id", ids.len());
        let filters = ids
            .iter()
            .flat_map(|id| ["--filter".to_string(), format!("id={}", id)]);
        let args = self.args(&["prune", "--force", "--verbose"], filters);
        self.exec(args, true).await
    }

    fn name(&self) -> String {
        match self.builder {
            Some(ref builder) => format!("buildx ({})", builder),
            None => "buildx".to_string(),
        }
    }
}
