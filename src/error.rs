//! # Error Handling
//!
//! This module defines the centralized error type for the `icon` library. It
//! uses `thiserror` to derive an `Error` enum covering the ways installing or
//! configuring a tool can fail.
//!
//! Nearly everything `icon` does is a shell-out, so most failures surface as
//! [`Error::Command`] (the process ran and exited non-zero) or
//! [`Error::Spawn`] (the process could not be started at all). The binary
//! wraps these in `anyhow` with additional context before reporting them.

use thiserror::Error;

/// Main error type for icon operations
#[derive(Error, Debug)]
pub enum Error {
    /// An external command exited with a non-zero status.
    #[error("Command failed with {}: {command}", code.map(|c| format!("exit code {}", c)).unwrap_or_else(|| "a signal".to_string()))]
    Command {
        command: String,
        /// Exit code, or `None` if the process was killed by a signal
        code: Option<i32>,
    },

    /// An external command could not be started.
    #[error("Failed to run {command}: {message}")]
    Spawn { command: String, message: String },

    /// The current user's home directory could not be determined.
    #[error("Could not determine the home directory")]
    HomeDir,

    /// A user-supplied value was rejected.
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// The requested operation is not available on this platform.
    #[error("{feature} is not supported on {}", std::env::consts::OS)]
    UnsupportedPlatform { feature: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A YAML parsing error, wrapped from `serde_yaml::Error`.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A semantic versioning parsing error, wrapped from `semver::Error`.
    #[error("Semver parsing error: {0}")]
    Semver(#[from] semver::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
