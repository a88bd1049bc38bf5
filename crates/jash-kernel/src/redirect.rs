//! Redirection extraction and file resolution.
//!
//! Extraction scans a stage's tokens for standalone `<`, `>`, `>>` and
//! builds a new filtered argument vector; the original token storage is
//! never mutated in place. Resolution opens the referenced files against
//! the shell's tracked working directory. If any open fails the whole
//! resolution fails and nothing half-open escapes.

use std::fmt;
use std::fs::{File, OpenOptions};
use std::io;
use std::os::unix::fs::OpenOptionsExt;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::command::{OutputMode, RedirectSpec, Word};
use crate::lexer::Token;
use crate::parser::ParseError;

/// File create mode for `>` and `>>` targets.
const CREATE_MODE: u32 = 0o644;

/// Redirection operator, for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectOp {
    Input,
    Truncate,
    Append,
}

impl fmt::Display for RedirectOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RedirectOp::Input => write!(f, "<"),
            RedirectOp::Truncate => write!(f, ">"),
            RedirectOp::Append => write!(f, ">>"),
        }
    }
}

#[derive(Debug, Error)]
pub enum RedirectError {
    #[error("{path}: {source}")]
    Open { path: String, source: io::Error },
}

/// Pull redirections out of one stage's tokens.
///
/// Returns the cleaned argument words and the collected spec. Repeated
/// operators of the same kind are last-wins. The token after an operator
/// must be a plain word naming the file.
pub(crate) fn take_redirects(tokens: Vec<Token>) -> Result<(Vec<Word>, RedirectSpec), ParseError> {
    let mut argv = Vec::new();
    let mut spec = RedirectSpec::default();
    let mut iter = tokens.into_iter();
    while let Some(token) = iter.next() {
        let op = match token {
            Token::Word(word) => {
                argv.push(word);
                continue;
            }
            Token::Lt => RedirectOp::Input,
            Token::Gt => RedirectOp::Truncate,
            Token::GtGt => RedirectOp::Append,
            // `|` and `&` are split off before extraction
            Token::Pipe | Token::Amp => continue,
        };
        match iter.next() {
            Some(Token::Word(word)) => {
                let path = PathBuf::from(word.text);
                match op {
                    RedirectOp::Input => spec.input = Some(path),
                    RedirectOp::Truncate => spec.output = Some((path, OutputMode::Truncate)),
                    RedirectOp::Append => spec.output = Some((path, OutputMode::Append)),
                }
            }
            _ => return Err(ParseError::MissingRedirectTarget(op)),
        }
    }
    Ok((argv, spec))
}

/// Resolved stdio files for one launch. `None` means inherit.
#[derive(Debug, Default)]
pub struct ResolvedStdio {
    pub stdin: Option<File>,
    pub stdout: Option<File>,
}

impl RedirectSpec {
    /// Open the referenced files. Relative paths resolve against `cwd`.
    pub fn resolve(&self, cwd: &Path) -> Result<ResolvedStdio, RedirectError> {
        let mut resolved = ResolvedStdio::default();
        if let Some(path) = &self.input {
            let file = File::open(absolutize(cwd, path)).map_err(|source| RedirectError::Open {
                path: path.display().to_string(),
                source,
            })?;
            resolved.stdin = Some(file);
        }
        if let Some((path, mode)) = &self.output {
            let mut opts = OpenOptions::new();
            opts.write(true).create(true).mode(CREATE_MODE);
            match mode {
                OutputMode::Truncate => opts.truncate(true),
                OutputMode::Append => opts.append(true),
            };
            let file = opts
                .open(absolutize(cwd, path))
                .map_err(|source| RedirectError::Open {
                    path: path.display().to_string(),
                    source,
                })?;
            resolved.stdout = Some(file);
        }
        Ok(resolved)
    }
}

/// Join a possibly relative user path onto the shell's working directory.
pub fn absolutize(cwd: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}
