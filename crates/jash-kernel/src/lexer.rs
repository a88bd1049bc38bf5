//! Tokenizer for jash command lines.
//!
//! Words are whitespace-delimited. Quotes group whitespace and are stripped
//! here, with the quoting recorded on each word. The operators `|`, `&`,
//! `<`, `>`, `>>` are recognized only when they stand alone as words, so
//! `a>b` stays one plain argument and `'|'` is a literal. An unterminated
//! quote is an error.

use std::fmt;

use logos::Logos;

use crate::command::{Quoting, Word};

/// Lexer error types.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LexError {
    #[default]
    UnexpectedCharacter,
    UnterminatedQuote,
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexError::UnexpectedCharacter => write!(f, "unexpected character"),
            LexError::UnterminatedQuote => write!(f, "unterminated quote"),
        }
    }
}

impl std::error::Error for LexError {}

/// Raw lexemes before operator classification. Words that exactly match an
/// operator become operator tokens in [`tokenize`]; quoted ones never do.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(error = LexError)]
#[logos(skip r"[ \t\r\n]+")]
enum RawToken {
    #[regex(r#"[^ \t\r\n'"]+"#, |lex| lex.slice().to_string())]
    Bare(String),

    #[regex(r"'[^']*'?", lex_single_quoted)]
    Single(String),

    #[regex(r#""[^"]*"?"#, lex_double_quoted)]
    Double(String),
}

fn lex_single_quoted(lex: &mut logos::Lexer<RawToken>) -> Result<String, LexError> {
    strip_quotes(lex.slice(), '\'')
}

fn lex_double_quoted(lex: &mut logos::Lexer<RawToken>) -> Result<String, LexError> {
    strip_quotes(lex.slice(), '"')
}

/// The regexes accept a missing closing quote so the error can name the
/// real problem instead of a generic unexpected character.
fn strip_quotes(slice: &str, quote: char) -> Result<String, LexError> {
    let inner = &slice[1..];
    if inner.ends_with(quote) {
        Ok(inner[..inner.len() - 1].to_string())
    } else {
        Err(LexError::UnterminatedQuote)
    }
}

/// Tokens produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Word(Word),
    Pipe,
    Amp,
    Lt,
    Gt,
    GtGt,
}

/// Tokenize one command line. Blank input yields an empty vector.
pub fn tokenize(line: &str) -> Result<Vec<Token>, LexError> {
    let mut tokens = Vec::new();
    for raw in RawToken::lexer(line) {
        let token = match raw? {
            RawToken::Bare(text) => match text.as_str() {
                "|" => Token::Pipe,
                "&" => Token::Amp,
                "<" => Token::Lt,
                ">" => Token::Gt,
                ">>" => Token::GtGt,
                _ => Token::Word(Word::new(text, Quoting::Bare)),
            },
            RawToken::Single(text) => Token::Word(Word::new(text, Quoting::Single)),
            RawToken::Double(text) => Token::Word(Word::new(text, Quoting::Double)),
        };
        tokens.push(token);
    }
    Ok(tokens)
}
