//! # Output Styling
//!
//! Status lines printed by the installers use emoji markers on capable
//! terminals and plain bracketed tags otherwise. The choice follows the
//! global `--color` flag and the usual environment conventions:
//!
//! - `NO_COLOR` (any value) disables styling
//! - `CLICOLOR=0` disables styling
//! - `CLICOLOR_FORCE=1` forces styling even when stdout is not a TTY
//! - `TERM=dumb` disables styling

use std::env;

/// Kind of status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Done,
    Skipped,
    Info,
}

impl Status {
    fn marker(self, styled: bool) -> &'static str {
        match (self, styled) {
            (Status::Done, true) => "✅",
            (Status::Done, false) => "[OK]",
            (Status::Skipped, true) => "⏭️",
            (Status::Skipped, false) => "[SKIP]",
            (Status::Info, true) => "ℹ️",
            (Status::Info, false) => "[INFO]",
        }
    }
}

/// Whether status lines are styled.
#[derive(Debug, Clone, Copy)]
pub struct OutputConfig {
    pub use_color: bool,
}

impl OutputConfig {
    /// Resolve the `--color` flag value (`always`, `never` or `auto`).
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = match color_flag.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => Self::detect_color_support(),
        };
        Self { use_color }
    }

    fn detect_color_support() -> bool {
        if env::var_os("NO_COLOR").is_some() {
            return false;
        }
        if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
            return false;
        }
        if env::var("CLICOLOR_FORCE").is_ok_and(|v| v != "0" && !v.is_empty()) {
            return true;
        }
        if env::var("TERM").is_ok_and(|v| v == "dumb") {
            return false;
        }
        console::Term::stdout().features().colors_supported()
    }

    /// Format a status line.
    pub fn status(&self, status: Status, message: &str) -> String {
        let marker = status.marker(self.use_color);
        if self.use_color && status == Status::Done {
            format!("{} {}", marker, console::style(message).green())
        } else {
            format!("{} {}", marker, message)
        }
    }

    /// Print a status line to stdout.
    pub fn print(&self, status: Status, message: &str) {
        println!("{}", self.status(status, message));
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::from_env_and_flag("auto")
    }
}
