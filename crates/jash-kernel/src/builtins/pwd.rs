//! pwd — Print the working directory.

use crate::builtins::Builtin;
use crate::context::ShellContext;
use crate::result::ExecResult;

/// Pwd builtin: prints the shell's tracked working directory.
pub struct Pwd;

impl Builtin for Pwd {
    fn name(&self) -> &str {
        "pwd"
    }

    fn execute(&self, _args: &[String], ctx: &mut ShellContext) -> ExecResult {
        ExecResult::success(format!("{}\n", ctx.cwd.display()))
    }
}
