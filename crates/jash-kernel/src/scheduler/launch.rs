//! Spawning one external process with wired stdio.
//!
//! Program names are resolved explicitly: bare names walk PATH, names
//! containing `/` resolve against the shell's working directory. Spawn
//! failures surface in the shell process, so a failed exec can never leave
//! a child running shell logic.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdout, Command as OsCommand, ExitStatus, Stdio};

use thiserror::Error;
use tracing::debug;

/// Errors from resolving or spawning an external program.
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("command not found: {0}")]
    NotFound(String),
    #[error("{0}: No such file or directory")]
    PathNotFound(String),
    #[error("failed to run {name}: {source}")]
    Spawn { name: String, source: io::Error },
}

impl LaunchError {
    /// Shell convention: 127 for unresolvable names, 126 for a program
    /// that was found but could not be run.
    pub fn exit_code(&self) -> i32 {
        match self {
            LaunchError::NotFound(_) | LaunchError::PathNotFound(_) => 127,
            LaunchError::Spawn { .. } => 126,
        }
    }
}

/// Where a child's stdin comes from.
pub enum InputBinding {
    Inherit,
    /// Immediate end-of-input; used downstream of a failed pipeline stage.
    Null,
    File(File),
    /// The previous stage's stdout, moved in so the parent's copy closes.
    Pipe(ChildStdout),
}

/// Where a child's stdout goes.
pub enum OutputBinding {
    Inherit,
    File(File),
    /// Fresh pipe; the read end is taken off the child after the spawn.
    Pipe,
}

impl From<InputBinding> for Stdio {
    fn from(binding: InputBinding) -> Stdio {
        match binding {
            InputBinding::Inherit => Stdio::inherit(),
            InputBinding::Null => Stdio::null(),
            InputBinding::File(file) => Stdio::from(file),
            InputBinding::Pipe(out) => Stdio::from(out),
        }
    }
}

impl From<OutputBinding> for Stdio {
    fn from(binding: OutputBinding) -> Stdio {
        match binding {
            OutputBinding::Inherit => Stdio::inherit(),
            OutputBinding::File(file) => Stdio::from(file),
            OutputBinding::Pipe => Stdio::piped(),
        }
    }
}

/// Resolve a command name in PATH.
///
/// Searches each directory in `path_var` (colon-separated) for an
/// executable file named `name`. Returns the full path if found.
pub fn resolve_in_path(name: &str, path_var: &str) -> Option<PathBuf> {
    for dir in path_var.split(':') {
        if dir.is_empty() {
            continue;
        }
        let candidate = Path::new(dir).join(name);
        if is_executable_file(&candidate) {
            return Some(candidate);
        }
    }
    None
}

fn is_executable_file(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    match path.metadata() {
        Ok(meta) => meta.is_file() && meta.permissions().mode() & 0o111 != 0,
        Err(_) => false,
    }
}

/// Resolve `name` to a runnable program path.
pub(crate) fn resolve_program(name: &str, cwd: &Path, path_var: &str) -> Result<PathBuf, LaunchError> {
    if name.contains('/') {
        let full = if Path::new(name).is_absolute() {
            PathBuf::from(name)
        } else {
            cwd.join(name)
        };
        if full.exists() {
            Ok(full)
        } else {
            Err(LaunchError::PathNotFound(name.to_string()))
        }
    } else {
        resolve_in_path(name, path_var).ok_or_else(|| LaunchError::NotFound(name.to_string()))
    }
}

/// Spawn one stage. The bindings are consumed: whichever descriptors the
/// parent opened for this child move in here and drop with the spawn, so
/// nothing leaks across repeated invocations.
pub(crate) fn spawn(
    argv: &[String],
    cwd: &Path,
    path_var: &str,
    input: InputBinding,
    output: OutputBinding,
) -> Result<Child, LaunchError> {
    let (name, args) = match argv.split_first() {
        Some(parts) => parts,
        None => return Err(LaunchError::NotFound(String::new())),
    };
    let program = resolve_program(name, cwd, path_var)?;
    debug!(program = %program.display(), "spawning");
    OsCommand::new(&program)
        .args(args)
        .current_dir(cwd)
        .stdin(Stdio::from(input))
        .stdout(Stdio::from(output))
        .stderr(Stdio::inherit())
        .spawn()
        .map_err(|source| LaunchError::Spawn {
            name: name.clone(),
            source,
        })
}

/// Exit code convention for a reaped status: codes pass through, death by
/// signal surfaces as 128+N.
pub fn exit_code_of(status: &ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;
    match status.code() {
        Some(code) => code,
        None => 128 + status.signal().unwrap_or(0),
    }
}
