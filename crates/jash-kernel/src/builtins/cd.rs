//! cd — Change the working directory.

use std::path::PathBuf;

use crate::builtins::Builtin;
use crate::context::ShellContext;
use crate::result::ExecResult;

/// Cd builtin: changes the shell's tracked working directory.
///
/// No argument or `~` goes to `HOME`; `-` goes back to the previous
/// directory and prints it, like bash.
pub struct Cd;

impl Builtin for Cd {
    fn name(&self) -> &str {
        "cd"
    }

    fn execute(&self, args: &[String], ctx: &mut ShellContext) -> ExecResult {
        let arg = args.first().map(String::as_str);
        let shown = arg.unwrap_or("~").to_string();
        let went_back = arg == Some("-");

        let target: PathBuf = match arg {
            None | Some("~") => match ctx.env.get("HOME") {
                Some(home) => PathBuf::from(home),
                None => return ExecResult::failure(1, "cd: HOME not set"),
            },
            // the previous directory is tracked shell state, not an env var
            Some("-") => match &ctx.prev_cwd {
                Some(prev) => prev.clone(),
                None => return ExecResult::failure(1, "cd: no previous directory"),
            },
            Some(path) => {
                if let Some(rest) = path.strip_prefix("~/") {
                    match ctx.env.get("HOME") {
                        Some(home) => PathBuf::from(home).join(rest),
                        None => return ExecResult::failure(1, "cd: HOME not set"),
                    }
                } else {
                    PathBuf::from(path)
                }
            }
        };

        let resolved = ctx.resolve_path(&target);
        if !resolved.is_dir() {
            return if resolved.exists() {
                ExecResult::failure(1, format!("cd: {}: Not a directory", shown))
            } else {
                ExecResult::failure(1, format!("cd: {}: No such file or directory", shown))
            };
        }
        ctx.set_cwd(resolved);
        if went_back {
            ExecResult::success(format!("{}\n", ctx.cwd.display()))
        } else {
            ExecResult::success("")
        }
    }
}
