//! Bash configuration shared by the shell installers.

use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use crate::error::Result;
use crate::fs::{append_to_text_file, home_dir};
use crate::os;

/// Prepends every existing `bin` directory under common prefixes to `PATH`.
const PATH_BLOCK: &str = r#"
# set $PATH
_PATHS=(
	$(ls -d $HOME/*/bin 2> /dev/null)
	$(ls -d $HOME/.*/bin 2> /dev/null)
	$(ls -d $HOME/Library/Python/3.*/bin 2> /dev/null)
	$(ls -d /usr/local/*/bin 2> /dev/null)
	$(ls -d /opt/*/bin 2> /dev/null)
)
for ((_i=${#_PATHS[@]}-1; _i>=0; _i--)); do
	_PATH=${_PATHS[$_i]}
	if [[ -d $_PATH && ! "$PATH" =~ (^$_PATH:)|(:$_PATH:)|(:$_PATH$) ]]; then
		export PATH=$_PATH:$PATH
	fi
done
"#;

const EDITOR_BLOCK: &str = r#"
if which nvim > /dev/null; then
	export VISUAL=nvim
	export EDITOR=nvim
else
	export VISUAL=vim
	export EDITOR=vim
fi
"#;

const SOURCE_BASHRC_BLOCK: &str = r#"
# source in ~/.bashrc
if [[ -f $HOME/.bashrc ]]; then
	. $HOME/.bashrc
fi
"#;

/// `~/.bashrc` on Linux, `~/.bash_profile` elsewhere (macOS login shells).
pub fn bash_config_file() -> Result<PathBuf> {
    let file = if os::is_linux() {
        ".bashrc"
    } else {
        ".bash_profile"
    };
    Ok(home_dir()?.join(file))
}

/// Add the `_PATHS` block to a shell config file unless `PATH` is already
/// managed there.
///
/// Skipped on IDX workspaces, whose images manage `PATH` themselves.
pub fn config_shell_path(config_file: &Path) -> Result<()> {
    if os::dist_id() == "idx" {
        return Ok(());
    }
    let text = fs::read_to_string(config_file).unwrap_or_default();
    if !text.contains(". /scripts/path.sh") && !text.contains("\n_PATHS=(\n") {
        append_to_text_file(config_file, PATH_BLOCK, true)?;
    }
    info!(
        "{} is configured to insert common bin paths into $PATH.",
        config_file.display()
    );
    Ok(())
}

/// Configure bash: smart `PATH`, `VISUAL`/`EDITOR`, and on Linux make login
/// shells read `~/.bashrc`.
pub fn config_bash() -> Result<()> {
    let config_file = bash_config_file()?;
    config_shell_path(&config_file)?;
    append_to_text_file(&config_file, EDITOR_BLOCK, true)?;
    if os::is_linux() {
        append_to_text_file(
            &home_dir()?.join(".bash_profile"),
            SOURCE_BASHRC_BLOCK,
            true,
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_shell_path_appends_once() {
        if os::dist_id() == "idx" {
            return;
        }
        let temp = TempDir::new().unwrap();
        let rc = temp.path().join(".bashrc");
        config_shell_path(&rc).unwrap();
        config_shell_path(&rc).unwrap();
        let text = fs::read_to_string(&rc).unwrap();
        assert_eq!(text.matches("_PATHS=(").count(), 1);
    }

    #[test]
    fn test_config_shell_path_respects_existing_setup() {
        let temp = TempDir::new().unwrap();
        let rc = temp.path().join(".bashrc");
        fs::write(&rc, ". /scripts/path.sh\n").unwrap();
        config_shell_path(&rc).unwrap();
        assert_eq!(fs::read_to_string(&rc).unwrap(), ". /scripts/path.sh\n");
    }
}
