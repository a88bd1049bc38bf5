//! Builtin command trait.

use crate::context::ShellContext;
use crate::result::ExecResult;

/// A command interpreted by the shell itself.
///
/// `args` is the argument vector after the command name, already
/// environment-expanded. Output goes back through the returned result so
/// the dispatcher decides between the terminal and a redirection target.
pub trait Builtin {
    fn name(&self) -> &str;
    fn execute(&self, args: &[String], ctx: &mut ShellContext) -> ExecResult;
}
