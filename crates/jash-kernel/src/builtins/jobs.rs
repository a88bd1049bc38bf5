//! jobs — Poll and list background jobs.

use crate::builtins::Builtin;
use crate::context::ShellContext;
use crate::result::ExecResult;

/// Jobs builtin: reaps finished jobs through the shared poll, then lists
/// every known job with its state. Transitions it detects show up in the
/// listing as terminal states rather than as separate notices.
pub struct Jobs;

impl Builtin for Jobs {
    fn name(&self) -> &str {
        "jobs"
    }

    fn execute(&self, _args: &[String], ctx: &mut ShellContext) -> ExecResult {
        ctx.jobs.poll();
        let jobs = ctx.jobs.list();
        if jobs.is_empty() {
            return ExecResult::success("(no jobs)\n");
        }
        let mut out = String::new();
        for job in jobs {
            out.push_str(&format!(
                "[{}] {} {} {}\n",
                job.id, job.pid, job.state, job.command
            ));
        }
        ExecResult::success(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::MapEnv;
    use std::process::{Command, Stdio};
    use std::time::Duration;

    fn make_ctx() -> ShellContext {
        ShellContext::with_env("/", Box::new(MapEnv::new()))
    }

    fn spawn(cmd: &str, args: &[&str]) -> std::process::Child {
        Command::new(cmd)
            .args(args)
            .stdin(Stdio::null())
            .spawn()
            .unwrap()
    }

    #[test]
    fn empty_table_prints_placeholder() {
        let mut ctx = make_ctx();
        let result = Jobs.execute(&[], &mut ctx);
        assert_eq!(result.out, "(no jobs)\n");
    }

    #[test]
    fn running_job_listed_with_state() {
        let mut ctx = make_ctx();
        ctx.jobs.add(vec![spawn("sleep", &["5"])], "sleep 5");
        let result = Jobs.execute(&[], &mut ctx);
        assert!(result.out.contains("[1]"));
        assert!(result.out.contains("Running"));
        assert!(result.out.contains("sleep 5"));
        ctx.jobs
            .terminate(crate::scheduler::JobSelector::Id(crate::scheduler::JobId(1)))
            .unwrap();
    }

    #[test]
    fn listing_polls_so_finished_jobs_show_terminal() {
        let mut ctx = make_ctx();
        ctx.jobs.add(vec![spawn("true", &[])], "true");
        // give the child a moment to exit, then list
        for _ in 0..100 {
            std::thread::sleep(Duration::from_millis(10));
            let result = Jobs.execute(&[], &mut ctx);
            if result.out.contains("Completed") {
                return;
            }
        }
        panic!("job never showed Completed in the listing");
    }
}
