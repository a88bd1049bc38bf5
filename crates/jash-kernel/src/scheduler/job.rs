//! Background job table: registration, polling, termination.
//!
//! The table is an arena keyed by job id. Ids are 1-based, monotonic, and
//! never reused; terminal jobs tombstone in place so listings stay stable.
//! Every mutation happens on the shell thread. Polling uses non-blocking
//! waits only; the one blocking point is [`JobTable::terminate`], which
//! waits on processes it has just killed.

use std::collections::BTreeMap;
use std::fmt;
use std::process::{Child, ExitStatus};

use tracing::{debug, warn};

/// Identifier for a background job, 1-based and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct JobId(pub u64);

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle state of a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobState {
    Running,
    Completed(i32),
    Terminated(i32),
}

impl JobState {
    pub fn is_running(&self) -> bool {
        matches!(self, JobState::Running)
    }

    pub fn is_terminal(&self) -> bool {
        !self.is_running()
    }
}

impl fmt::Display for JobState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobState::Running => write!(f, "Running"),
            JobState::Completed(_) => write!(f, "Completed"),
            JobState::Terminated(signal) => write!(f, "Terminated (signal {})", signal),
        }
    }
}

/// Display snapshot of one job. Also the record type `poll` returns for
/// each transition it detects.
#[derive(Debug, Clone, PartialEq)]
pub struct JobInfo {
    pub id: JobId,
    pub pid: u32,
    pub state: JobState,
    pub command: String,
}

/// Selector for [`JobTable::terminate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobSelector {
    Pid(u32),
    Id(JobId),
}

/// One stage's child handle plus its reaped status, if any.
struct StageHandle {
    child: Child,
    status: Option<ExitStatus>,
}

/// One tracked background unit: a single command or a whole pipeline.
/// Holds a handle per stage so polling and kill cover all of them; the
/// displayed pid is the last stage's.
pub struct Job {
    id: JobId,
    pid: u32,
    command: String,
    state: JobState,
    stages: Vec<StageHandle>,
}

impl Job {
    fn info(&self) -> JobInfo {
        JobInfo {
            id: self.id,
            pid: self.pid,
            state: self.state,
            command: self.command.clone(),
        }
    }
}

/// Cap on concurrently Running jobs. Registrations beyond it are dropped
/// with a warning; the processes still run untracked.
pub const MAX_RUNNING_JOBS: usize = 100;

/// Owner of every background job for one shell session.
pub struct JobTable {
    jobs: BTreeMap<JobId, Job>,
    next_id: u64,
}

impl JobTable {
    pub fn new() -> Self {
        Self {
            jobs: BTreeMap::new(),
            next_id: 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    fn running_count(&self) -> usize {
        self.jobs.values().filter(|j| j.state.is_running()).count()
    }

    /// Register a spawned background unit. Returns its snapshot, or `None`
    /// when there was nothing to track or the Running cap is hit.
    pub fn add(&mut self, stages: Vec<Child>, command: impl Into<String>) -> Option<JobInfo> {
        let pid = stages.last()?.id();
        if self.running_count() >= MAX_RUNNING_JOBS {
            warn!(cap = MAX_RUNNING_JOBS, "job table full; background process left untracked");
            return None;
        }
        let id = JobId(self.next_id);
        self.next_id += 1;
        let job = Job {
            id,
            pid,
            command: command.into(),
            state: JobState::Running,
            stages: stages
                .into_iter()
                .map(|child| StageHandle { child, status: None })
                .collect(),
        };
        debug!(%id, pid, "background job registered");
        let info = job.info();
        self.jobs.insert(id, job);
        Some(info)
    }

    /// Non-blocking reap pass over every Running job.
    ///
    /// Returns a snapshot for each job that became terminal in this call;
    /// every transition is reported exactly once, here. Jobs already
    /// terminal are never touched or re-reported.
    pub fn poll(&mut self) -> Vec<JobInfo> {
        let mut reports = Vec::new();
        for job in self.jobs.values_mut() {
            if !job.state.is_running() {
                continue;
            }
            let mut all_done = true;
            for stage in &mut job.stages {
                if stage.status.is_some() {
                    continue;
                }
                match stage.child.try_wait() {
                    Ok(Some(status)) => stage.status = Some(status),
                    Ok(None) => all_done = false,
                    Err(e) => {
                        // already reaped elsewhere; record a neutral status
                        warn!(id = %job.id, error = %e, "try_wait failed");
                        stage.status = Some(neutral_status());
                    }
                }
            }
            if all_done {
                job.state = match job.stages.last().and_then(|s| s.status.as_ref()) {
                    Some(status) => terminal_state(status),
                    None => JobState::Completed(0),
                };
                debug!(id = %job.id, state = %job.state, "job finished");
                reports.push(job.info());
            }
        }
        reports
    }

    /// Ordered snapshot of every job, Running and terminal. Pure: callers
    /// that want fresh state poll first.
    pub fn list(&self) -> Vec<JobInfo> {
        self.jobs.values().map(Job::info).collect()
    }

    /// Kill a Running job and block until its processes are gone. Returns
    /// the terminal snapshot, or `None` when no Running job matches the
    /// selector — a terminal job never matches.
    pub fn terminate(&mut self, selector: JobSelector) -> Option<JobInfo> {
        let job = self.jobs.values_mut().find(|job| {
            job.state.is_running()
                && match selector {
                    JobSelector::Id(id) => job.id == id,
                    JobSelector::Pid(pid) => job.pid == pid,
                }
        })?;
        for stage in &mut job.stages {
            if stage.status.is_some() {
                continue;
            }
            if let Err(e) = stage.child.kill() {
                debug!(id = %job.id, error = %e, "kill: process already gone");
            }
            match stage.child.wait() {
                Ok(status) => stage.status = Some(status),
                Err(_) => stage.status = Some(neutral_status()),
            }
        }
        // SIGKILL
        job.state = JobState::Terminated(9);
        debug!(id = %job.id, "job terminated");
        Some(job.info())
    }
}

impl Default for JobTable {
    fn default() -> Self {
        Self::new()
    }
}

fn terminal_state(status: &ExitStatus) -> JobState {
    use std::os::unix::process::ExitStatusExt;
    match status.signal() {
        Some(signal) => JobState::Terminated(signal),
        None => JobState::Completed(status.code().unwrap_or(0)),
    }
}

fn neutral_status() -> ExitStatus {
    use std::os::unix::process::ExitStatusExt;
    ExitStatus::from_raw(0)
}
