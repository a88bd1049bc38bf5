//! export — Set an environment variable.

use crate::builtins::Builtin;
use crate::context::ShellContext;
use crate::result::ExecResult;

const USAGE: &str = "export: usage: export NAME=value";

/// Export builtin: `export NAME=value` through the environment capability,
/// so children spawned afterwards inherit it.
pub struct Export;

impl Builtin for Export {
    fn name(&self) -> &str {
        "export"
    }

    fn execute(&self, args: &[String], ctx: &mut ShellContext) -> ExecResult {
        let assignment = match args.first() {
            Some(a) => a,
            None => return ExecResult::failure(1, USAGE),
        };
        let (name, value) = match assignment.split_once('=') {
            Some(parts) => parts,
            None => return ExecResult::failure(1, USAGE),
        };
        if !is_valid_name(name) {
            return ExecResult::failure(
                1,
                format!("export: `{}': not a valid identifier", assignment),
            );
        }
        ctx.env.set(name, value);
        ExecResult::success("")
    }
}

/// POSIX variable name: alpha or underscore first, alnum or underscore
/// after.
fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
