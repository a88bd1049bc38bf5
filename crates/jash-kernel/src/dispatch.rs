//! Command dispatch: the single entry point per input line.
//!
//! Classifies argument 0 against the builtin set, preprocesses arguments
//! for builtin-classified commands, and routes: trait builtins run in
//! process (with output redirection honored), everything else — externals
//! and the delegating builtins — goes through the pipeline runner. A
//! trailing `&` registers the spawned unit in the job table as one job.

use std::io::Write;

use tracing::debug;

use crate::builtins::{self, BuiltinRegistry, DELEGATED};
use crate::command::{Command, PipelineSpec, RedirectSpec};
use crate::context::ShellContext;
use crate::expand;
use crate::parser;
use crate::result::ExecResult;
use crate::scheduler::PipelineRunner;

/// Routes parsed lines to builtins, the launcher, or the pipeline runner.
pub struct Dispatcher {
    registry: BuiltinRegistry,
    runner: PipelineRunner,
}

impl Dispatcher {
    pub fn new() -> Self {
        let mut registry = BuiltinRegistry::new();
        builtins::register_builtins(&mut registry);
        Self {
            registry,
            runner: PipelineRunner::new(),
        }
    }

    /// Dispatch one input line. Every error is recovered here and reported
    /// through the result; the shell itself never dies on a bad line.
    pub fn dispatch(&self, line: &str, ctx: &mut ShellContext) -> ExecResult {
        let spec = match parser::parse(line) {
            Ok(Some(spec)) => spec,
            Ok(None) => return ExecResult::success(""),
            Err(e) => return ExecResult::failure(2, format!("jash: {}", e)),
        };
        self.run(spec, ctx)
    }

    fn run(&self, spec: PipelineSpec, ctx: &mut ShellContext) -> ExecResult {
        let first = match spec.stages.first() {
            Some(stage) => stage,
            None => return ExecResult::success(""),
        };
        let name = first.name().to_string();

        // delegated names are not in the registry, so they fall through
        if spec.is_single() && self.registry.contains(&name) {
            debug!(%name, "dispatching builtin");
            if spec.background {
                debug!(%name, "`&` ignored for builtin");
            }
            return self.run_builtin(&name, first, ctx);
        }

        debug!(%name, stages = spec.stages.len(), background = spec.background, "dispatching external");
        self.run_external(&spec, ctx)
    }

    /// Whether argument 0 classifies as builtin for preprocessing.
    fn is_classified(&self, name: &str) -> bool {
        self.registry.contains(name) || DELEGATED.contains(&name)
    }

    fn run_builtin(&self, name: &str, cmd: &Command, ctx: &mut ShellContext) -> ExecResult {
        let argv = expand::expand_argv(&cmd.argv, ctx.env.as_ref());
        let builtin = match self.registry.get(name) {
            Some(b) => b,
            None => return ExecResult::failure(127, format!("jash: command not found: {}", name)),
        };
        let result = builtin.execute(&argv[1..], ctx);
        // input redirection is accepted and ignored; no builtin reads stdin
        if cmd.redirect.output.is_some() {
            return redirect_builtin_output(result, &cmd.redirect, ctx);
        }
        result
    }

    fn run_external(&self, spec: &PipelineSpec, ctx: &mut ShellContext) -> ExecResult {
        let argvs: Vec<Vec<String>> = spec
            .stages
            .iter()
            .map(|stage| {
                if self.is_classified(stage.name()) {
                    expand::expand_argv(&stage.argv, ctx.env.as_ref())
                } else {
                    stage.argv.iter().map(|w| w.text.clone()).collect()
                }
            })
            .collect();

        let files = RedirectSpec {
            input: spec.stages.first().and_then(|s| s.redirect.input.clone()),
            output: spec.stages.last().and_then(|s| s.redirect.output.clone()),
        };
        let stdio = match files.resolve(&ctx.cwd) {
            Ok(stdio) => stdio,
            Err(e) => return ExecResult::failure(1, format!("jash: {}", e)),
        };

        let path_var = ctx
            .env
            .get("PATH")
            .unwrap_or_else(|| std::env::var("PATH").unwrap_or_default());

        if !spec.background {
            return self
                .runner
                .run_foreground(&argvs, stdio, &ctx.cwd, &path_var);
        }

        let (children, errors) = self
            .runner
            .spawn_background(&argvs, stdio, &ctx.cwd, &path_var);
        let mut result = ExecResult::success("");
        for e in &errors {
            result.err.push_str(&format!("jash: {}\n", e));
            result.code = e.exit_code();
        }
        if children.is_empty() {
            return result;
        }
        if let Some(info) = ctx.jobs.add(children, spec.text.clone()) {
            result.code = 0;
            result.out = format!(
                "Background job started: [{}] {} {}\n",
                info.id, info.pid, info.command
            );
        }
        result
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Write a builtin's stdout text into its redirection target instead of
/// handing it back for the terminal.
fn redirect_builtin_output(
    mut result: ExecResult,
    redirect: &RedirectSpec,
    ctx: &ShellContext,
) -> ExecResult {
    let output_only = RedirectSpec {
        input: None,
        output: redirect.output.clone(),
    };
    let stdio = match output_only.resolve(&ctx.cwd) {
        Ok(stdio) => stdio,
        Err(e) => return ExecResult::failure(1, format!("jash: {}", e)),
    };
    if let Some(mut file) = stdio.stdout {
        if let Err(e) = file.write_all(result.out.as_bytes()) {
            return ExecResult::failure(1, format!("jash: write: {}", e));
        }
        result.out = String::new();
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::MapEnv;

    fn make_shell(cwd: &std::path::Path) -> (Dispatcher, ShellContext) {
        let env = MapEnv::with(&[("FOO", "bar")]);
        (Dispatcher::new(), ShellContext::with_env(cwd, Box::new(env)))
    }

    #[test]
    fn blank_line_is_quiet_success() {
        let dir = tempfile::tempdir().unwrap();
        let (d, mut ctx) = make_shell(dir.path());
        let result = d.dispatch("   ", &mut ctx);
        assert!(result.ok());
        assert!(result.out.is_empty());
        assert!(result.err.is_empty());
    }

    #[test]
    fn syntax_error_is_reported_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let (d, mut ctx) = make_shell(dir.path());
        let result = d.dispatch("a | | b", &mut ctx);
        assert_eq!(result.code, 2);
        assert!(result.err.starts_with("jash: syntax error"));
    }

    #[test]
    fn echo_expands_variables() {
        let dir = tempfile::tempdir().unwrap();
        let (d, mut ctx) = make_shell(dir.path());
        let result = d.dispatch("echo $FOO", &mut ctx);
        assert_eq!(result.out, "bar\n");
    }

    #[test]
    fn single_quotes_stay_literal() {
        let dir = tempfile::tempdir().unwrap();
        let (d, mut ctx) = make_shell(dir.path());
        let result = d.dispatch("echo '$FOO'", &mut ctx);
        assert_eq!(result.out, "$FOO\n");
    }

    #[test]
    fn export_then_echo_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let (d, mut ctx) = make_shell(dir.path());
        assert!(d.dispatch("export GREETING=hi", &mut ctx).ok());
        let result = d.dispatch("echo $GREETING", &mut ctx);
        assert_eq!(result.out, "hi\n");
    }

    #[test]
    fn builtin_output_redirects_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let (d, mut ctx) = make_shell(dir.path());
        let result = d.dispatch("echo hello > x.txt", &mut ctx);
        assert!(result.ok(), "err: {}", result.err);
        assert!(result.out.is_empty());
        let content = std::fs::read_to_string(dir.path().join("x.txt")).unwrap();
        assert_eq!(content, "hello\n");
    }

    #[test]
    fn unknown_command_is_127() {
        let dir = tempfile::tempdir().unwrap();
        let (d, mut ctx) = make_shell(dir.path());
        let result = d.dispatch("no-such-command-xyz", &mut ctx);
        assert_eq!(result.code, 127);
        assert!(result.err.contains("command not found: no-such-command-xyz"));
    }

    #[test]
    fn exit_sets_flag() {
        let dir = tempfile::tempdir().unwrap();
        let (d, mut ctx) = make_shell(dir.path());
        assert!(d.dispatch("exit", &mut ctx).ok());
        assert!(ctx.exit_requested);
    }

    #[test]
    fn background_launch_registers_job() {
        let dir = tempfile::tempdir().unwrap();
        let (d, mut ctx) = make_shell(dir.path());
        let result = d.dispatch("sleep 5 &", &mut ctx);
        assert!(result.ok(), "err: {}", result.err);
        assert!(result.out.starts_with("Background job started: [1]"));
        assert!(result.out.contains("sleep 5"));
        let jobs = ctx.jobs.list();
        assert_eq!(jobs.len(), 1);
        assert!(jobs[0].state.is_running());
        ctx.jobs
            .terminate(crate::scheduler::JobSelector::Id(crate::scheduler::JobId(1)))
            .unwrap();
    }

    #[test]
    fn background_unknown_command_registers_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let (d, mut ctx) = make_shell(dir.path());
        let result = d.dispatch("no-such-command-xyz &", &mut ctx);
        assert_eq!(result.code, 127);
        assert!(ctx.jobs.is_empty());
    }

    #[test]
    fn missing_input_file_aborts_launch() {
        let dir = tempfile::tempdir().unwrap();
        let (d, mut ctx) = make_shell(dir.path());
        let result = d.dispatch("cat < nope.txt", &mut ctx);
        assert_eq!(result.code, 1);
        assert!(result.err.contains("nope.txt"));
    }
}
