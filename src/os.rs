//! # Host Detection
//!
//! Installers pick package managers and release assets based on the Linux
//! distribution, the CPU architecture and the machine's resources. This
//! module reads that information from `/etc/os-release`, `/proc/meminfo` and
//! the standard library.

use std::collections::HashMap;
use std::fs;

const OS_RELEASE: &str = "/etc/os-release";
const MEMINFO: &str = "/proc/meminfo";

const DEBIAN_SERIES: &[&str] = &["debian", "antix", "lmde"];
const UBUNTU_SERIES: &[&str] = &["ubuntu", "linuxmint", "pop"];
const FEDORA_SERIES: &[&str] = &["fedora", "centos", "rhel"];

/// Parse the `KEY=value` lines of an os-release file.
///
/// Quotes around values are stripped; comments and malformed lines are
/// skipped.
pub fn parse_os_release(text: &str) -> HashMap<String, String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| {
            let value = value.trim().trim_matches(|c| c == '"' || c == '\'');
            (key.trim().to_string(), value.to_string())
        })
        .collect()
}

/// The `ID` of the running Linux distribution, or `""` if unknown.
pub fn dist_id() -> String {
    fs::read_to_string(OS_RELEASE)
        .map(|text| parse_os_release(&text).remove("ID").unwrap_or_default())
        .unwrap_or_default()
}

pub fn is_linux() -> bool {
    cfg!(target_os = "linux")
}

pub fn is_macos() -> bool {
    cfg!(target_os = "macos")
}

/// Distribution family, used to pick a package manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Series {
    Debian,
    Ubuntu,
    Fedora,
    Other,
}

impl Series {
    /// Classify a distribution `ID`.
    pub fn from_id(id: &str) -> Self {
        if DEBIAN_SERIES.contains(&id) {
            Series::Debian
        } else if UBUNTU_SERIES.contains(&id) {
            Series::Ubuntu
        } else if FEDORA_SERIES.contains(&id) {
            Series::Fedora
        } else {
            Series::Other
        }
    }

    /// The series of the running system.
    pub fn current() -> Self {
        Self::from_id(&dist_id())
    }

    /// Debian, Ubuntu and their derivatives share apt.
    pub fn is_debian_ubuntu(self) -> bool {
        matches!(self, Series::Debian | Series::Ubuntu)
    }
}

/// Normalized CPU architecture: `amd64`, `arm64` or `_other`.
pub fn kernel_arch() -> &'static str {
    normalize_arch(std::env::consts::ARCH)
}

fn normalize_arch(arch: &str) -> &'static str {
    match arch {
        "x86_64" | "amd64" => "amd64",
        "aarch64" | "arm64" => "arm64",
        _ => "_other",
    }
}

/// Parse the `MemTotal` line of `/proc/meminfo` into bytes.
pub fn parse_mem_total(meminfo: &str) -> Option<u64> {
    let line = meminfo.lines().find(|l| l.starts_with("MemTotal:"))?;
    let mut fields = line.split_whitespace().skip(1);
    let value: u64 = fields.next()?.parse().ok()?;
    match fields.next() {
        Some("kB") => Some(value * 1024),
        None => Some(value),
        Some(_) => None,
    }
}

/// Total physical memory in bytes, if the platform exposes it.
pub fn mem_total_bytes() -> Option<u64> {
    fs::read_to_string(MEMINFO)
        .ok()
        .and_then(|text| parse_mem_total(&text))
}

/// Number of logical CPUs.
pub fn cpu_count() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}
