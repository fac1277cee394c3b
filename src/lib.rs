//! # icon
//!
//! Library behind the `icon` command-line tool, which installs and
//! configures developer tools (shells, shell frameworks, container
//! launchers) on Linux and macOS.
//!
//! ## Quick Example
//!
//! ```
//! use icon::docker::image_port;
//! use icon::shell::format_cmd;
//!
//! assert_eq!(image_port("dclong/jupyterlab"), Some(8888));
//! assert_eq!(
//!     format_cmd("{prefix} rm /usr/bin/fish", &[("prefix", "sudo")]),
//!     "sudo rm /usr/bin/fish"
//! );
//! ```
//!
//! ## Modules
//!
//! - **`shell`**: Runs `bash` snippets, with a dry-run variant, and decides
//!   when a command needs `sudo`.
//! - **`fs`**: Dotfile editing, backups and symlinks.
//! - **`bash`**: Shared bash configuration (`PATH`, editor).
//! - **`os`**: Distribution, architecture and resource detection.
//! - **`fish`**: fish package commands and completion generation.
//! - **`data`**: The `icon-data` configuration repository.
//! - **`docker`**: `docker run` command construction for `icon ldc`.
//! - **`version`**: Release tag lookup for `icon update`.
//! - **`output`**: Status line styling that respects `--color` and `NO_COLOR`.

pub mod bash;
pub mod data;
pub mod docker;
pub mod error;
pub mod fish;
pub mod fs;
pub mod os;
pub mod output;
pub mod shell;
pub mod version;
