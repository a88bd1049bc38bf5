//! Parser: token stream → pipeline plan.
//!
//! Splits on `|`, strips one trailing `&` into the background flag, and
//! extracts redirections per stage. Redirections are only legal where the
//! pipeline can honor them: `<` on the first stage, `>`/`>>` on the last.

use thiserror::Error;

use crate::command::{Command, PipelineSpec};
use crate::lexer::{self, LexError, Token};
use crate::redirect::{self, RedirectOp};

#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    #[error("syntax error: {0}")]
    Lex(#[from] LexError),
    #[error("syntax error near `|`")]
    EmptyStage,
    #[error("syntax error near `&`")]
    EmptyCommand,
    #[error("syntax error: `&` must be the last token")]
    StrayAmp,
    #[error("syntax error: `{0}` requires a filename")]
    MissingRedirectTarget(RedirectOp),
    #[error("missing command")]
    MissingCommand,
    #[error("input redirection is only valid on the first pipeline stage")]
    InputRedirectNotFirst,
    #[error("output redirection is only valid on the last pipeline stage")]
    OutputRedirectNotLast,
}

/// Parse one command line. Blank lines parse to `None`.
pub fn parse(line: &str) -> Result<Option<PipelineSpec>, ParseError> {
    let mut tokens = lexer::tokenize(line)?;
    if tokens.is_empty() {
        return Ok(None);
    }

    let background = matches!(tokens.last(), Some(Token::Amp));
    if background {
        tokens.pop();
        if tokens.is_empty() {
            return Err(ParseError::EmptyCommand);
        }
    }

    let mut groups: Vec<Vec<Token>> = Vec::new();
    let mut current: Vec<Token> = Vec::new();
    for token in tokens {
        match token {
            Token::Pipe => {
                if current.is_empty() {
                    return Err(ParseError::EmptyStage);
                }
                groups.push(std::mem::take(&mut current));
            }
            Token::Amp => return Err(ParseError::StrayAmp),
            other => current.push(other),
        }
    }
    if current.is_empty() {
        return Err(ParseError::EmptyStage);
    }
    groups.push(current);

    let mut stages = Vec::with_capacity(groups.len());
    for group in groups {
        let (argv, spec) = redirect::take_redirects(group)?;
        if argv.is_empty() {
            return Err(ParseError::MissingCommand);
        }
        stages.push(Command {
            argv,
            redirect: spec,
        });
    }

    let last = stages.len() - 1;
    for (i, stage) in stages.iter().enumerate() {
        if i != 0 && stage.redirect.input.is_some() {
            return Err(ParseError::InputRedirectNotFirst);
        }
        if i != last && stage.redirect.output.is_some() {
            return Err(ParseError::OutputRedirectNotLast);
        }
    }

    let mut text = line.trim();
    if background {
        // drop the operator, not ampersands that belong to the last word
        text = text.strip_suffix('&').unwrap_or(text).trim_end();
    }
    Ok(Some(PipelineSpec {
        stages,
        background,
        text: text.to_string(),
    }))
}
