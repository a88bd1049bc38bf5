//! kill — Terminate a background job.

use crate::builtins::Builtin;
use crate::context::ShellContext;
use crate::result::ExecResult;
use crate::scheduler::{JobId, JobSelector};

/// Kill builtin: `kill <pid>` or `kill %<jobid>`.
///
/// Both forms resolve against the job table only; the shell never signals
/// untracked pids. Polls first, so a job that already finished reads as
/// terminal and reports "not found" instead of being killed post mortem.
pub struct Kill;

impl Builtin for Kill {
    fn name(&self) -> &str {
        "kill"
    }

    fn execute(&self, args: &[String], ctx: &mut ShellContext) -> ExecResult {
        let target = match args.first() {
            Some(t) => t,
            None => return ExecResult::failure(1, "kill: usage: kill <pid | %jobid>"),
        };
        let selector = if let Some(job_ref) = target.strip_prefix('%') {
            match job_ref.parse::<u64>() {
                Ok(n) => JobSelector::Id(JobId(n)),
                Err(_) => {
                    return ExecResult::failure(
                        1,
                        format!("kill: invalid job reference: {}", target),
                    )
                }
            }
        } else {
            match target.parse::<u32>() {
                Ok(pid) => JobSelector::Pid(pid),
                Err(_) => return ExecResult::failure(1, format!("kill: invalid pid: {}", target)),
            }
        };

        ctx.jobs.poll();
        match ctx.jobs.terminate(selector) {
            Some(_) => ExecResult::success(""),
            None => ExecResult::failure(1, format!("kill: {}: not found", target)),
        }
    }
}
