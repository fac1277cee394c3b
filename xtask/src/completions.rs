//! Completion script generation for icon and ldc.
//!
//! The task builds the release binary, asks it for its own bash and fish
//! completion scripts, and runs the third-party `completely` generator on
//! `completion/completely.yaml` to produce the bash completion for `ldc`.
//! Steps run one after another and the first failure stops the run.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tempfile::Builder;

/// Release binary, relative to the workspace root.
pub const ICON_BINARY: &str = "target/release/icon";
/// Directory holding the completely spec; mounted as `/app` for docker.
pub const COMPLETION_DIR: &str = "completion";
/// The completely spec file inside [`COMPLETION_DIR`].
pub const COMPLETELY_SPEC: &str = "completely.yaml";
/// Container image of the completely generator.
pub const COMPLETELY_IMAGE: &str = "dannyben/completely";

/// Shells icon generates its own completion scripts for, with their output paths.
pub const ICON_OUTPUTS: [(&str, &str); 2] = [
    ("bash", "data/bash-it/icon.completion.bash"),
    ("fish", "data/fish/completions/icon.fish"),
];
/// Output path of the ldc completion script.
pub const LDC_OUTPUT: &str = "data/bash-it/ldc.completion.bash";

/// How the completely generator is invoked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Generator {
    /// Local `completely` if installed, otherwise docker
    #[default]
    Auto,
    /// `docker run dannyben/completely`
    Docker,
    /// `completely` from PATH
    Local,
}

impl std::str::FromStr for Generator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(Generator::Auto),
            "docker" => Ok(Generator::Docker),
            "local" => Ok(Generator::Local),
            _ => Err(format!(
                "Unknown generator '{}'. Use: auto, docker, or local",
                s
            )),
        }
    }
}

/// A generator choice with everything needed to build its command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedGenerator {
    /// Run in a container as `user` (`uid:gid`) so output files stay owned by the caller
    Docker { user: String },
    Local,
}

/// Configuration for the completions task.
#[derive(Debug)]
pub struct CompletionsConfig {
    /// Workspace root; every fixed path is relative to it
    pub workspace_root: PathBuf,
    /// Requested generator for ldc
    pub generator: Generator,
    /// Skip `cargo build` and use the existing binary
    pub skip_build: bool,
}

/// One external process invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// Progress line printed before the step runs
    pub description: String,
    pub program: String,
    pub args: Vec<String>,
    /// Working directory of the process
    pub current_dir: PathBuf,
    /// File that receives the process's stdout, if redirected
    pub stdout: Option<PathBuf>,
}

impl Step {
    /// The step rendered as a shell command line.
    pub fn command_line(&self) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        if let Some(path) = &self.stdout {
            line.push_str(" > ");
            line.push_str(&path.display().to_string());
        }
        line
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.command_line())
    }
}

/// Executes pipeline steps.
pub trait StepRunner {
    /// Run a step to completion. Any failure must be returned as an error.
    fn run(&mut self, step: &Step) -> Result<()>;

    /// Whether steps are only shown, leaving the outputs untouched.
    fn is_dry_run(&self) -> bool {
        false
    }
}

/// Runs steps as child processes.
///
/// Redirected output goes to a temporary file next to the target, which
/// replaces the target only once the process exited successfully with
/// non-empty output. Outputs are created like a shell redirect would create
/// them (mode 0644 before the umask).
pub struct ProcessRunner;

impl StepRunner for ProcessRunner {
    fn run(&mut self, step: &Step) -> Result<()> {
        let mut command = Command::new(&step.program);
        command.args(&step.args).current_dir(&step.current_dir);

        let Some(target) = &step.stdout else {
            let status = command
                .status()
                .with_context(|| format!("Failed to run {}", step))?;
            if !status.success() {
                bail!("Command failed ({}): {}", status, step);
            }
            return Ok(());
        };

        let parent = target
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;

        let mut builder = Builder::new();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            builder.permissions(fs::Permissions::from_mode(0o644));
        }
        let output = builder
            .tempfile_in(parent)
            .with_context(|| format!("Failed to create a temporary file in {}", parent.display()))?;
        let stdout = output
            .reopen()
            .context("Failed to open the temporary output file")?;

        let status = command
            .stdout(Stdio::from(stdout))
            .status()
            .with_context(|| format!("Failed to run {}", step))?;
        if !status.success() {
            bail!("Command failed ({}): {}", status, step);
        }

        let written = output
            .as_file()
            .metadata()
            .context("Failed to inspect the generated output")?
            .len();
        if written == 0 {
            bail!("Command produced no output: {}", step);
        }

        output
            .persist(target)
            .with_context(|| format!("Failed to write {}", target.display()))?;
        Ok(())
    }
}

/// Prints each step instead of running it.
pub struct PrintRunner;

impl StepRunner for PrintRunner {
    fn run(&mut self, step: &Step) -> Result<()> {
        println!("  $ {}", step);
        Ok(())
    }

    fn is_dry_run(&self) -> bool {
        true
    }
}

/// The completely spec: top-level keys are command patterns, values their completions.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct CompletelySpec(BTreeMap<String, Vec<String>>);

impl CompletelySpec {
    /// Commands the spec completes (keys without a `*` or space).
    pub fn commands(&self) -> Vec<&str> {
        self.0
            .keys()
            .filter(|k| !k.contains(['*', ' ']))
            .map(String::as_str)
            .collect()
    }
}

/// Read and check the completely spec before any generator runs.
pub fn load_spec(path: &Path) -> Result<CompletelySpec> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let spec: CompletelySpec = serde_yaml::from_str(&text)
        .with_context(|| format!("Invalid completely spec: {}", path.display()))?;
    if spec.commands().is_empty() {
        bail!("{} does not define any command", path.display());
    }
    Ok(spec)
}

/// Decide how completely runs, checking that the tool it needs is on PATH.
pub fn resolve_generator(generator: Generator) -> Result<ResolvedGenerator> {
    let has_local = which::which("completely").is_ok();
    let has_docker = which::which("docker").is_ok();
    match generator {
        Generator::Local if has_local => Ok(ResolvedGenerator::Local),
        Generator::Local => bail!("completely is not installed. Install with: gem install completely"),
        Generator::Auto if has_local => Ok(ResolvedGenerator::Local),
        Generator::Docker | Generator::Auto if has_docker => Ok(ResolvedGenerator::Docker {
            user: docker_user()?,
        }),
        Generator::Docker => bail!("docker not found in PATH"),
        Generator::Auto => bail!("Neither completely nor docker was found in PATH"),
    }
}

/// `uid:gid` of the current user.
fn docker_user() -> Result<String> {
    let id = |flag: &str| -> Result<String> {
        let output = Command::new("id")
            .arg(flag)
            .output()
            .context("Failed to run 'id'")?;
        if !output.status.success() {
            bail!("'id {}' failed", flag);
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    };
    Ok(format!("{}:{}", id("-u")?, id("-g")?))
}

/// Build the ordered list of steps.
pub fn plan(config: &CompletionsConfig, generator: &ResolvedGenerator) -> Vec<Step> {
    let root = &config.workspace_root;
    let mut steps = Vec::new();

    if !config.skip_build {
        steps.push(Step {
            description: "Building project...".to_string(),
            program: "cargo".to_string(),
            args: ["build", "--release", "--bin", "icon"].map(String::from).to_vec(),
            current_dir: root.clone(),
            stdout: None,
        });
    }

    let icon = root.join(ICON_BINARY).display().to_string();
    for (shell, output) in ICON_OUTPUTS {
        steps.push(Step {
            description: format!("Generating completion script for icon ({})...", shell),
            program: icon.clone(),
            args: vec!["completion".to_string(), shell.to_string()],
            current_dir: root.clone(),
            stdout: Some(root.join(output)),
        });
    }

    let completion_dir = root.join(COMPLETION_DIR);
    let (program, args) = match generator {
        ResolvedGenerator::Docker { user } => (
            "docker".to_string(),
            vec![
                "run".to_string(),
                "--rm".to_string(),
                "--user".to_string(),
                user.clone(),
                "--volume".to_string(),
                format!("{}:/app", completion_dir.display()),
                COMPLETELY_IMAGE.to_string(),
                "preview".to_string(),
            ],
        ),
        ResolvedGenerator::Local => ("completely".to_string(), vec!["preview".to_string()]),
    };
    steps.push(Step {
        description: "Generating completion script for ldc...".to_string(),
        program,
        args,
        current_dir: completion_dir,
        stdout: Some(root.join(LDC_OUTPUT)),
    });

    steps
}

/// Run the whole task, stopping at the first failing step.
pub fn run(config: &CompletionsConfig, runner: &mut impl StepRunner) -> Result<()> {
    run_with(config, runner, resolve_generator)
}

/// [`run`] with the generator lookup supplied by the caller.
///
/// The spec is checked before the generator is resolved, and both happen
/// before any step runs.
fn run_with<R>(
    config: &CompletionsConfig,
    runner: &mut R,
    resolve: impl FnOnce(Generator) -> Result<ResolvedGenerator>,
) -> Result<()>
where
    R: StepRunner,
{
    let spec_path = config.workspace_root.join(COMPLETION_DIR).join(COMPLETELY_SPEC);
    let spec = load_spec(&spec_path)?;
    let generator = resolve(config.generator)?;
    execute(config, &generator, runner)?;

    println!();
    for line in summary(&spec, runner.is_dry_run()) {
        println!("{}", line);
    }
    Ok(())
}

/// Closing report listing the generated files.
fn summary(spec: &CompletelySpec, dry_run: bool) -> Vec<String> {
    if dry_run {
        return vec!["Dry run: no completion scripts were written".to_string()];
    }
    let mut lines = vec!["Completion scripts generated:".to_string()];
    for (_, output) in ICON_OUTPUTS {
        lines.push(format!("  {}", output));
    }
    lines.push(format!("  {} ({})", LDC_OUTPUT, spec.commands().join(", ")));
    lines
}

/// Run every planned step in order.
fn execute(
    config: &CompletionsConfig,
    generator: &ResolvedGenerator,
    runner: &mut impl StepRunner,
) -> Result<()> {
    for step in plan(config, generator) {
        println!("{}", step.description);
        runner.run(&step)?;
    }
    Ok(())
}
