//! UI context for detecting interactive vs CI environments

use std::io::IsTerminal;

/// UI context that determines output behavior
#[derive(Debug, Clone)]
pub struct UiContext {
    /// Whether running in an interactive terminal
    interactive: bool,
    /// Whether terminal colors may be emitted
    colors: bool,
}

impl UiContext {
    /// Detect the current environment
    pub fn detect() -> Self {
        Self {
            interactive: Self::detect_interactive(),
            colors: console::colors_enabled(),
        }
    }

    /// Create a non-interactive, colorless context (for testing or pipes)
    pub fn non_interactive() -> Self {
        Self {
            interactive: false,
            colors: false,
        }
    }

    /// Turn colors off regardless of the terminal (`--no-color`, config)
    pub fn with_colors(mut self, allowed: bool) -> Self {
        self.colors &= allowed;
        self
    }

    /// Check if we should use fancy output (spinners, progress bars)
    pub fn use_fancy_output(&self) -> bool {
        self.interactive
    }

    /// Check if color groups should be styled
    pub fn use_colors(&self) -> bool {
        self.colors
    }

    /// Detect if running in an interactive environment
    fn detect_interactive() -> bool {
        // Spinners go to stderr; the table goes to stdout
        if !std::io::stderr().is_terminal() || !std::io::stdout().is_terminal() {
            return false;
        }

        let ci_vars = [
            "CI",
            "GITHUB_ACTIONS",
            "GITLAB_CI",
            "CIRCLECI",
            "BUILDKITE",
            "JENKINS_URL",
        ];

        !ci_vars.iter().any(|var| std::env::var_os(var).is_some())
    }
}
