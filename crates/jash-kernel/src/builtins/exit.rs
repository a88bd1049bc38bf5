//! exit — Request shell termination.

use crate::builtins::Builtin;
use crate::context::ShellContext;
use crate::result::ExecResult;

/// Exit builtin: sets the exit flag; the read loop honors it and the
/// shell process leaves with status 0.
pub struct Exit;

impl Builtin for Exit {
    fn name(&self) -> &str {
        "exit"
    }

    fn execute(&self, _args: &[String], ctx: &mut ShellContext) -> ExecResult {
        ctx.exit_requested = true;
        ExecResult::success("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::MapEnv;

    #[test]
    fn sets_exit_flag() {
        let mut ctx = ShellContext::with_env("/", Box::new(MapEnv::new()));
        assert!(!ctx.exit_requested);
        let result = Exit.execute(&[], &mut ctx);
        assert!(result.ok());
        assert!(ctx.exit_requested);
    }
}
