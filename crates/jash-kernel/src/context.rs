//! Shell-wide state threaded through dispatch.

use std::path::{Component, Path, PathBuf};

use crate::env::{Environment, ProcessEnv};
use crate::scheduler::JobTable;

/// Mutable shell state: tracked working directory, environment capability,
/// job table, and the exit request flag. Constructed once at startup and
/// passed by reference through the dispatcher and builtins — never ambient.
///
/// The shell never calls `chdir`; `cwd` is the single source of truth.
/// Children spawn with it as their working directory and redirection paths
/// resolve against it.
pub struct ShellContext {
    pub cwd: PathBuf,
    /// Previous working directory, for `cd -`.
    pub prev_cwd: Option<PathBuf>,
    pub env: Box<dyn Environment>,
    pub jobs: JobTable,
    /// Set by the `exit` builtin; the read loop honors it.
    pub exit_requested: bool,
}

impl ShellContext {
    /// Context for the real shell: process environment, current directory.
    pub fn new() -> std::io::Result<Self> {
        Ok(Self::with_env(std::env::current_dir()?, Box::new(ProcessEnv)))
    }

    /// Context rooted at `cwd` with a caller-supplied environment.
    pub fn with_env(cwd: impl Into<PathBuf>, env: Box<dyn Environment>) -> Self {
        Self {
            cwd: cwd.into(),
            prev_cwd: None,
            env,
            jobs: JobTable::new(),
            exit_requested: false,
        }
    }

    /// Change directory, remembering the previous one.
    pub fn set_cwd(&mut self, cwd: PathBuf) {
        self.prev_cwd = Some(std::mem::replace(&mut self.cwd, cwd));
    }

    /// Resolve a user path against the working directory, collapsing `.`
    /// and `..` lexically.
    pub fn resolve_path(&self, path: impl AsRef<Path>) -> PathBuf {
        let path = path.as_ref();
        let joined = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.cwd.join(path)
        };
        normalize(&joined)
    }
}

fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::MapEnv;

    fn ctx_at(cwd: &str) -> ShellContext {
        ShellContext::with_env(cwd, Box::new(MapEnv::new()))
    }

    #[test]
    fn resolve_relative() {
        let ctx = ctx_at("/a/b");
        assert_eq!(ctx.resolve_path("c"), PathBuf::from("/a/b/c"));
    }

    #[test]
    fn resolve_parent() {
        let ctx = ctx_at("/a/b");
        assert_eq!(ctx.resolve_path(".."), PathBuf::from("/a"));
    }

    #[test]
    fn resolve_absolute_ignores_cwd() {
        let ctx = ctx_at("/a/b");
        assert_eq!(ctx.resolve_path("/x/y"), PathBuf::from("/x/y"));
    }

    #[test]
    fn parent_of_root_stays_root() {
        let ctx = ctx_at("/");
        assert_eq!(ctx.resolve_path(".."), PathBuf::from("/"));
    }

    #[test]
    fn set_cwd_tracks_previous() {
        let mut ctx = ctx_at("/a");
        ctx.set_cwd(PathBuf::from("/b"));
        assert_eq!(ctx.cwd, PathBuf::from("/b"));
        assert_eq!(ctx.prev_cwd, Some(PathBuf::from("/a")));
    }
}
