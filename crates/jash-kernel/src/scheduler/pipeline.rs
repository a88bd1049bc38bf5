//! Pipeline execution: chained stages over anonymous pipes.
//!
//! Stages spawn in order; stage *i*'s stdout handle moves into stage
//! *i+1*'s stdin binding, so ownership transfer closes the parent's pipe
//! ends without bookkeeping. The first stage may read a redirection file,
//! the last may write one. A stage that fails to spawn is reported, its
//! downstream neighbor sees immediate end-of-input, and everything that
//! did spawn is still waited on.

use std::path::Path;
use std::process::Child;

use tracing::debug;

use crate::redirect::ResolvedStdio;
use crate::result::ExecResult;

use super::launch::{self, InputBinding, LaunchError, OutputBinding};

/// Runs prepared pipeline stages in the foreground or spawns them for
/// background registration. Stage argv vectors arrive already expanded.
pub struct PipelineRunner;

impl PipelineRunner {
    pub fn new() -> Self {
        Self
    }

    /// Run all stages and block until every one has exited, waiting in
    /// launch order. The reported code is the last stage's.
    pub fn run_foreground(
        &self,
        argvs: &[Vec<String>],
        stdio: ResolvedStdio,
        cwd: &Path,
        path_var: &str,
    ) -> ExecResult {
        let mut code = 0;
        let mut err = String::new();
        for stage in spawn_all(argvs, stdio, cwd, path_var) {
            match stage {
                Ok(mut child) => match child.wait() {
                    Ok(status) => code = launch::exit_code_of(&status),
                    Err(e) => {
                        code = 1;
                        err.push_str(&format!("jash: wait: {}\n", e));
                    }
                },
                Err(e) => {
                    code = e.exit_code();
                    err.push_str(&format!("jash: {}\n", e));
                }
            }
        }
        ExecResult {
            code,
            out: String::new(),
            err,
        }
    }

    /// Spawn all stages without waiting. Returns the spawned children (for
    /// job registration) and any per-stage spawn errors.
    pub fn spawn_background(
        &self,
        argvs: &[Vec<String>],
        stdio: ResolvedStdio,
        cwd: &Path,
        path_var: &str,
    ) -> (Vec<Child>, Vec<LaunchError>) {
        let mut children = Vec::new();
        let mut errors = Vec::new();
        for stage in spawn_all(argvs, stdio, cwd, path_var) {
            match stage {
                Ok(child) => children.push(child),
                Err(e) => errors.push(e),
            }
        }
        (children, errors)
    }
}

impl Default for PipelineRunner {
    fn default() -> Self {
        Self::new()
    }
}

/// Spawn every stage in order, chaining pipes between neighbors. One
/// result per stage, in stage order.
fn spawn_all(
    argvs: &[Vec<String>],
    stdio: ResolvedStdio,
    cwd: &Path,
    path_var: &str,
) -> Vec<Result<Child, LaunchError>> {
    let n = argvs.len();
    let mut results = Vec::with_capacity(n);
    let mut next_input = match stdio.stdin {
        Some(file) => InputBinding::File(file),
        None => InputBinding::Inherit,
    };
    let mut stdout_file = stdio.stdout;

    for (i, argv) in argvs.iter().enumerate() {
        let last = i + 1 == n;
        let output = if last {
            match stdout_file.take() {
                Some(file) => OutputBinding::File(file),
                None => OutputBinding::Inherit,
            }
        } else {
            OutputBinding::Pipe
        };
        // If this stage fails to spawn, the placeholder gives the next
        // stage immediate end-of-input.
        let input = std::mem::replace(&mut next_input, InputBinding::Null);
        match launch::spawn(argv, cwd, path_var, input, output) {
            Ok(mut child) => {
                if !last {
                    if let Some(stdout) = child.stdout.take() {
                        next_input = InputBinding::Pipe(stdout);
                    }
                }
                debug!(stage = i, pid = child.id(), "stage spawned");
                results.push(Ok(child));
            }
            Err(e) => results.push(Err(e)),
        }
    }
    results
}
