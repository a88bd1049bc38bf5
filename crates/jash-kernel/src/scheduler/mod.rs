//! Scheduler — process launching, pipelines, and background jobs.
//!
//! The shell itself is single-threaded; all concurrency lives in child
//! processes. Pipeline stages spawn in order, stdout of stage *i* moving
//! into stage *i+1* as its stdin. Background units register in the
//! [`JobTable`] and are reaped by non-blocking polls from the read loop
//! and the `jobs`/`kill` builtins.

mod job;
mod launch;
mod pipeline;

pub use job::{Job, JobId, JobInfo, JobSelector, JobState, JobTable, MAX_RUNNING_JOBS};
pub use launch::{exit_code_of, resolve_in_path, InputBinding, LaunchError, OutputBinding};
pub use pipeline::PipelineRunner;
