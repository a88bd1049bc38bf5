//! jash-kernel: The core of jash.
//!
//! This crate provides:
//!
//! - **Lexer**: Whitespace-split tokenization with quoting, using logos
//! - **Parser**: Builds pipeline specs from tokens
//! - **Expand**: `$VAR` substitution honoring quoting
//! - **Redirect**: File redirection resolution against the shell's cwd
//! - **Builtins**: Builtin trait, registry, and the builtin commands
//! - **Scheduler**: Pipeline execution and background job management
//! - **Dispatch**: Per-line routing between builtins and externals

pub mod builtins;
pub mod command;
pub mod context;
pub mod dispatch;
pub mod env;
pub mod expand;
pub mod lexer;
pub mod parser;
pub mod redirect;
pub mod result;
pub mod scheduler;

pub use command::{Command, OutputMode, PipelineSpec, Quoting, RedirectSpec, Word};
pub use context::ShellContext;
pub use dispatch::Dispatcher;
pub use result::ExecResult;

// Job observability (for the read loop's completion notices)
pub use scheduler::{JobId, JobInfo, JobState, JobTable};

// Environment capability (embedders substitute their own)
pub use env::{Environment, MapEnv, ProcessEnv};
