//! echo — Print arguments to stdout.

use crate::builtins::Builtin;
use crate::context::ShellContext;
use crate::result::ExecResult;

/// Echo builtin: prints its arguments space-joined, newline-terminated.
/// Environment expansion already happened by the time it runs.
pub struct Echo;

impl Builtin for Echo {
    fn name(&self) -> &str {
        "echo"
    }

    fn execute(&self, args: &[String], _ctx: &mut ShellContext) -> ExecResult {
        let mut out = args.join(" ");
        out.push('\n');
        ExecResult::success(out)
    }
}
