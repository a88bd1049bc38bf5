//! jash REPL — interactive read loop for jash.
//!
//! This crate wraps the kernel's dispatcher in a terminal session. It
//! handles:
//! - Line editing and command history via rustyline
//! - Job completion notices before each prompt
//! - Result printing (out to stdout, err to stderr)
//! - Non-interactive execution for `-c` and script files

use std::path::PathBuf;

use anyhow::{Context, Result};
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::Editor;

use jash_kernel::{Dispatcher, ExecResult, JobState, ShellContext};

const PROMPT: &str = "jash> ";

/// One shell session: the dispatcher plus its mutable context.
pub struct Repl {
    dispatcher: Dispatcher,
    ctx: ShellContext,
}

impl Repl {
    pub fn new() -> Result<Self> {
        let ctx = ShellContext::new().context("Failed to read working directory")?;
        Ok(Self {
            dispatcher: Dispatcher::new(),
            ctx,
        })
    }

    /// Dispatch one line. Errors are already folded into the result.
    pub fn process_line(&mut self, line: &str) -> ExecResult {
        self.dispatcher.dispatch(line, &mut self.ctx)
    }

    /// Whether the `exit` builtin has run.
    pub fn exit_requested(&self) -> bool {
        self.ctx.exit_requested
    }

    /// Poll the job table and format a notice for each job that finished
    /// since the last poll. Each transition is noticed exactly once.
    pub fn job_notices(&mut self) -> Vec<String> {
        self.ctx
            .jobs
            .poll()
            .into_iter()
            .map(|info| {
                let verb = match info.state {
                    JobState::Terminated(_) => "Terminated",
                    _ => "Completed",
                };
                format!("{}: [{}] {} {}", verb, info.id, info.pid, info.command)
            })
            .collect()
    }
}

fn print_result(result: &ExecResult) {
    if !result.out.is_empty() {
        print!("{}", result.out);
    }
    if !result.err.is_empty() {
        eprint!("{}", result.err);
    }
}

/// Save REPL history to disk.
fn save_history(rl: &mut Editor<(), DefaultHistory>, history_path: &Option<PathBuf>) {
    if let Some(path) = history_path {
        if let Some(parent) = path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                tracing::warn!("Failed to create history directory: {}", e);
            }
        }
        if let Err(e) = rl.save_history(path) {
            tracing::warn!("Failed to save history: {}", e);
        }
    }
}

/// Run the interactive shell.
pub fn run() -> Result<()> {
    println!("jash v{}", env!("CARGO_PKG_VERSION"));
    println!("Type exit to quit.");

    let mut rl: Editor<(), DefaultHistory> =
        Editor::new().context("Failed to create editor")?;

    // Load history if it exists
    let history_path = directories::BaseDirs::new()
        .map(|b| b.data_dir().join("jash").join("history.txt"));
    if let Some(ref path) = history_path {
        if let Err(e) = rl.load_history(path) {
            // Only log if it's not a "file not found" error (expected on first run)
            let is_not_found = matches!(&e, ReadlineError::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound);
            if !is_not_found {
                tracing::warn!("Failed to load history: {}", e);
            }
        }
    }

    let mut repl = Repl::new()?;
    println!();

    loop {
        for notice in repl.job_notices() {
            println!("{}", notice);
        }

        match rl.readline(PROMPT) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    if let Err(e) = rl.add_history_entry(line.as_str()) {
                        tracing::warn!("Failed to add history entry: {}", e);
                    }
                }
                let result = repl.process_line(&line);
                print_result(&result);
                if repl.exit_requested() {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("^D");
                break;
            }
            Err(err) => {
                eprintln!("Error: {}", err);
                break;
            }
        }
    }

    // Save history
    save_history(&mut rl, &history_path);

    Ok(())
}

/// Execute a single command line and return its exit code.
pub fn run_command(cmd: &str) -> Result<i32> {
    let mut repl = Repl::new()?;
    let result = repl.process_line(cmd);
    print_result(&result);
    Ok(result.code)
}

/// Run a script file line by line and return the last command's exit code.
/// Blank lines and `#` comment lines (including a shebang) are skipped.
pub fn run_script(path: &str) -> Result<i32> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read script: {}", path))?;

    let mut repl = Repl::new()?;
    let mut code = 0;
    for line in source.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let result = repl.process_line(line);
        print_result(&result);
        code = result.code;
        if repl.exit_requested() {
            break;
        }
    }
    Ok(code)
}
