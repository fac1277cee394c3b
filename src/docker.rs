//! # Launching Docker Containers
//!
//! `icon ldc` starts a container from one of the `dclong/*` images with the
//! conventions those images expect: the host user is recreated inside the
//! container through `DOCKER_*` environment variables, the working directory
//! is mounted at `/workdir`, and the image's service port is published.
//!
//! Building the `docker run` argument list is kept separate from running it
//! so the exact command can be printed with `--dry-run` and tested.

use std::path::PathBuf;
use std::process::Command;

use crate::error::{Error, Result};

/// Service ports of images, by name prefix after `dclong/`.
const IMAGE_PORTS: &[(&str, u16)] = &[
    ("jupyterlab", 8888),
    ("jupyterhub", 8000),
    ("gitpod", 8000),
    ("vscode", 8080),
];

/// Entry commands of images, by name prefix.
const IMAGE_COMMANDS: &[(&str, &str)] = &[
    ("dclong/vscode-server", "/scripts/sys/init.sh --switch-user"),
    ("dclong/jupyterlab", "/scripts/sys/init.sh --switch-user"),
];

/// Identity of the user recreated inside the container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DockerUser {
    pub name: String,
    pub password: String,
    pub uid: String,
    pub gid: String,
}

impl DockerUser {
    /// The current user, optionally renamed.
    ///
    /// The password defaults to the user name.
    pub fn current(name: Option<String>, password: Option<String>) -> Result<Self> {
        let name = match name {
            Some(name) => name,
            None => id("-un")?,
        };
        let password = password.unwrap_or_else(|| name.clone());
        Ok(Self {
            password,
            uid: id("-u")?,
            gid: id("-g")?,
            name,
        })
    }
}

/// Output of `id <flag>`.
fn id(flag: &str) -> Result<String> {
    let command = format!("id {}", flag);
    let output = Command::new("id")
        .arg(flag)
        .output()
        .map_err(|e| Error::Spawn {
            command: command.clone(),
            message: e.to_string(),
        })?;
    if !output.status.success() {
        return Err(Error::Command {
            command,
            code: output.status.code(),
        });
    }
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Host resources granted to the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub memory_bytes: u64,
    pub cpus: usize,
}

impl Limits {
    /// 80% of the memory and all CPUs but one (at least one).
    pub fn from_host(mem_total_bytes: u64, cpu_count: usize) -> Self {
        Self {
            memory_bytes: mem_total_bytes / 5 * 4,
            cpus: cpu_count.saturating_sub(1).max(1),
        }
    }
}

/// Everything needed to build a `docker run` command for ldc.
#[derive(Debug, Clone)]
pub struct LdcOptions {
    /// Image name followed by an optional command and its arguments
    pub args: Vec<String>,
    pub user: DockerUser,
    /// Mounted at `/workdir`
    pub workdir: PathBuf,
    /// Parent of the home directories, mounted at `/home_host` when set
    pub home_parent: Option<PathBuf>,
    pub detach: bool,
    /// Host port for the image's service port (defaults to the same port)
    pub port: Option<u16>,
    pub extra_port_mappings: Vec<String>,
    /// Resource limits, applied on Linux hosts
    pub limits: Option<Limits>,
}

/// The service port of an image, if it is a known `dclong/*` image.
pub fn image_port(image: &str) -> Option<u16> {
    let name = image.strip_prefix("dclong/")?;
    IMAGE_PORTS
        .iter()
        .find(|(prefix, _)| name.starts_with(prefix))
        .map(|&(_, port)| port)
}

/// The default command for an image started without an explicit command.
pub fn image_command(image: &str) -> Option<&'static str> {
    IMAGE_COMMANDS
        .iter()
        .find(|(prefix, _)| image.starts_with(prefix))
        .map(|&(_, cmd)| cmd)
        .or_else(|| image.starts_with("dclong/").then_some("/scripts/sys/init.sh"))
}

/// Container hostname: the image name without registry/owner and tag.
///
/// ```
/// use icon::docker::image_hostname;
///
/// assert_eq!(image_hostname("dclong/jupyterlab:next"), "jupyterlab");
/// assert_eq!(image_hostname("ubuntu"), "ubuntu");
/// ```
pub fn image_hostname(image: &str) -> &str {
    let start = image.find('/').map_or(0, |i| i + 1);
    let rest = &image[start..];
    match rest.find(':') {
        Some(end) => &rest[..end],
        None => rest,
    }
}

/// Build the full `docker run` argument list (starting with `docker`).
///
/// `options.args` must not be empty; its first element is the image.
pub fn ldc_command(options: &LdcOptions) -> Vec<String> {
    let image = options.args.first().map(String::as_str).unwrap_or_default();
    let user = &options.user;
    let mut command: Vec<String> = vec![
        "docker".into(),
        "run".into(),
        if options.detach { "-d" } else { "-it" }.into(),
        "--init".into(),
        "--privileged".into(),
        "--cap-add".into(),
        "SYS_ADMIN".into(),
        "--platform".into(),
        "linux/amd64".into(),
        "--log-opt".into(),
        "max-size=50m".into(),
        "-e".into(),
        format!("DOCKER_USER={}", user.name),
        "-e".into(),
        format!("DOCKER_USER_ID={}", user.uid),
        "-e".into(),
        format!("DOCKER_PASSWORD={}", user.password),
        "-e".into(),
        format!("DOCKER_GROUP_ID={}", user.gid),
        "-e".into(),
        format!("DOCKER_ADMIN_USER={}", user.name),
        "--hostname".into(),
        image_hostname(image).into(),
        "-v".into(),
        format!("{}:/workdir", options.workdir.display()),
    ];
    if let Some(parent) = &options.home_parent {
        command.push("-v".into());
        command.push(format!("{}:/home_host", parent.display()));
    }
    if let Some(limits) = options.limits {
        command.push(format!("--memory={}b", limits.memory_bytes));
        command.push(format!("--cpus={}", limits.cpus));
    }
    if let Some(port) = image_port(image) {
        let host_port = options.port.unwrap_or(port);
        command.push(format!("--publish={}:{}", host_port, port));
    }
    for mapping in &options.extra_port_mappings {
        command.push(format!("--publish={}", mapping));
    }
    command.extend(options.args.iter().cloned());
    if options.args.len() == 1 {
        if let Some(cmd) = image_command(image) {
            command.push(cmd.to_string());
        }
    }
    command
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn options(args: &[&str]) -> LdcOptions {
        LdcOptions {
            args: args.iter().map(|s| s.to_string()).collect(),
            user: DockerUser {
                name: "dclong".to_string(),
                password: "secret".to_string(),
                uid: "1000".to_string(),
                gid: "1001".to_string(),
            },
            workdir: PathBuf::from("/home/dclong/project"),
            home_parent: None,
            detach: false,
            port: None,
            extra_port_mappings: vec![],
            limits: None,
        }
    }

    #[test]
    fn test_docker_user_current() {
        let user = DockerUser::current(Some("dev".to_string()), None).unwrap();
        assert_eq!(user.name, "dev");
        assert_eq!(user.password, "dev");
        assert!(user.uid.parse::<u32>().is_ok());
        assert!(user.gid.parse::<u32>().is_ok());
    }

    #[test]
    fn test_image_port() {
        assert_eq!(image_port("dclong/jupyterlab"), Some(8888));
        assert_eq!(image_port("dclong/jupyterlab-ds:latest"), Some(8888));
        assert_eq!(image_port("dclong/jupyterhub-ai"), Some(8000));
        assert_eq!(image_port("dclong/gitpod"), Some(8000));
        assert_eq!(image_port("dclong/vscode-server"), Some(8080));
        assert_eq!(image_port("dclong/ubuntu_b"), None);
        assert_eq!(image_port("jupyter/base-notebook"), None);
    }

    #[test]
    fn test_image_command() {
        assert_eq!(
            image_command("dclong/jupyterlab-ds"),
            Some("/scripts/sys/init.sh --switch-user")
        );
        assert_eq!(
            image_command("dclong/vscode-server:next"),
            Some("/scripts/sys/init.sh --switch-user")
        );
        assert_eq!(image_command("dclong/ubuntu_b"), Some("/scripts/sys/init.sh"));
        assert_eq!(image_command("ubuntu:24.04"), None);
    }

    #[test]
    fn test_image_hostname() {
        assert_eq!(image_hostname("dclong/jupyterhub-ds:2024"), "jupyterhub-ds");
        assert_eq!(image_hostname("ubuntu:24.04"), "ubuntu");
        assert_eq!(image_hostname("dclong/ubuntu_b"), "ubuntu_b");
    }

    #[test]
    fn test_limits_from_host() {
        let limits = Limits::from_host(10_000, 8);
        assert_eq!(limits.memory_bytes, 8_000);
        assert_eq!(limits.cpus, 7);
        assert_eq!(Limits::from_host(10_000, 1).cpus, 1);
    }

    #[test]
    fn test_ldc_command_defaults() {
        let command = ldc_command(&options(&["dclong/jupyterlab:next"]));
        assert_eq!(&command[..3], ["docker", "run", "-it"]);
        let line = command.join(" ");
        assert!(line.contains("-e DOCKER_USER=dclong"));
        assert!(line.contains("-e DOCKER_USER_ID=1000"));
        assert!(line.contains("-e DOCKER_PASSWORD=secret"));
        assert!(line.contains("-e DOCKER_GROUP_ID=1001"));
        assert!(line.contains("-e DOCKER_ADMIN_USER=dclong"));
        assert!(line.contains("--hostname jupyterlab"));
        assert!(line.contains("-v /home/dclong/project:/workdir"));
        assert!(line.contains("--publish=8888:8888"));
        assert!(line.ends_with("dclong/jupyterlab:next /scripts/sys/init.sh --switch-user"));
        assert!(!line.contains("--memory"));
        assert!(!line.contains("/home_host"));
    }

    #[test]
    fn test_ldc_command_detach_and_ports() {
        let mut opts = options(&["dclong/vscode-server"]);
        opts.detach = true;
        opts.port = Some(18080);
        opts.extra_port_mappings = vec!["5006:5006".to_string()];
        let command = ldc_command(&opts);
        assert_eq!(command[2], "-d");
        assert!(command.contains(&"--publish=18080:8080".to_string()));
        assert!(command.contains(&"--publish=5006:5006".to_string()));
    }

    #[test]
    fn test_ldc_command_explicit_image_command() {
        let command = ldc_command(&options(&["dclong/ubuntu_b", "/bin/bash"]));
        assert_eq!(
            &command[command.len() - 2..],
            ["dclong/ubuntu_b", "/bin/bash"]
        );
    }

    #[test]
    fn test_ldc_command_limits_and_home() {
        let mut opts = options(&["ubuntu"]);
        opts.home_parent = Some(PathBuf::from("/home"));
        opts.limits = Some(Limits {
            memory_bytes: 1024,
            cpus: 3,
        });
        let line = ldc_command(&opts).join(" ");
        assert!(line.contains("-v /home:/home_host"));
        assert!(line.contains("--memory=1024b --cpus=3"));
        assert!(line.ends_with("ubuntu"));
    }

    proptest! {
        #[test]
        fn prop_hostname_has_no_separators(owner in "[a-z]{1,8}", name in "[a-z_-]{1,12}", tag in "[a-z0-9.]{1,6}") {
            let image = format!("{}/{}:{}", owner, name, tag);
            prop_assert_eq!(image_hostname(&image), name.as_str());
        }
    }
}
