//! Parsed command shapes consumed by the dispatcher.
//!
//! A line of input becomes a [`PipelineSpec`]: one or more [`Command`]
//! stages, a background flag, and the originating text for job display.
//! These are built by the parser and immutable from then on.

use std::path::PathBuf;

/// How a word was quoted on the command line.
///
/// Quotes are stripped by the lexer; the quoting survives here so expansion
/// can skip single-quoted words.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quoting {
    Bare,
    Single,
    Double,
}

/// One whitespace-delimited argument with its quoting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    pub text: String,
    pub quoting: Quoting,
}

impl Word {
    pub fn new(text: impl Into<String>, quoting: Quoting) -> Self {
        Self {
            text: text.into(),
            quoting,
        }
    }

    pub fn bare(text: impl Into<String>) -> Self {
        Self::new(text, Quoting::Bare)
    }
}

/// Output redirection mode: `>` truncates, `>>` appends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Truncate,
    Append,
}

/// Redirections attached to one command after extraction.
///
/// At most one input and one output; when an operator repeats, the last
/// occurrence on the line wins.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RedirectSpec {
    pub input: Option<PathBuf>,
    pub output: Option<(PathBuf, OutputMode)>,
}

impl RedirectSpec {
    pub fn is_empty(&self) -> bool {
        self.input.is_none() && self.output.is_none()
    }
}

/// A single command stage: argv plus its redirections.
///
/// `argv` is never empty; the parser rejects stages without a command word.
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    pub argv: Vec<Word>,
    pub redirect: RedirectSpec,
}

impl Command {
    /// The program or builtin name (argument 0).
    pub fn name(&self) -> &str {
        self.argv.first().map(|w| w.text.as_str()).unwrap_or("")
    }
}

/// A fully parsed input line: ≥1 pipeline stages.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineSpec {
    pub stages: Vec<Command>,
    pub background: bool,
    /// Display text for the job table, without any trailing `&`.
    pub text: String,
}

impl PipelineSpec {
    pub fn is_single(&self) -> bool {
        self.stages.len() == 1
    }
}
