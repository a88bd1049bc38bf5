//! Environment-variable expansion for built-in-classified arguments.
//!
//! `$NAME` takes the longest run of `[A-Za-z0-9_]` after the `$`. Unset
//! variables expand to the empty string; a `$` with no name following stays
//! literal. Single-quoted words are never expanded.

use crate::command::{Quoting, Word};
use crate::env::Environment;

/// Expand one word.
pub fn expand_word(word: &Word, env: &dyn Environment) -> String {
    if word.quoting == Quoting::Single {
        return word.text.clone();
    }
    expand_text(&word.text, env)
}

/// Expand a whole argument vector.
pub fn expand_argv(argv: &[Word], env: &dyn Environment) -> Vec<String> {
    argv.iter().map(|word| expand_word(word, env)).collect()
}

fn expand_text(text: &str, env: &dyn Environment) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch != '$' {
            out.push(ch);
            continue;
        }
        let mut name = String::new();
        while let Some(&next) = chars.peek() {
            if next.is_ascii_alphanumeric() || next == '_' {
                name.push(next);
                chars.next();
            } else {
                break;
            }
        }
        if name.is_empty() {
            out.push('$');
        } else if let Some(value) = env.get(&name) {
            out.push_str(&value);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::MapEnv;

    fn env() -> MapEnv {
        MapEnv::with(&[("FOO", "bar"), ("HOME", "/home/u"), ("X_1", "ok")])
    }

    #[test]
    fn expands_set_variable() {
        assert_eq!(expand_word(&Word::bare("$FOO"), &env()), "bar");
    }

    #[test]
    fn unset_variable_is_empty() {
        assert_eq!(expand_word(&Word::bare("$NOPE"), &env()), "");
    }

    #[test]
    fn expansion_inside_larger_word() {
        assert_eq!(expand_word(&Word::bare("pre-$FOO-post"), &env()), "pre-bar-post");
    }

    #[test]
    fn adjacent_references() {
        assert_eq!(expand_word(&Word::bare("$FOO$X_1"), &env()), "barok");
    }

    #[test]
    fn lone_dollar_is_literal() {
        assert_eq!(expand_word(&Word::bare("a$ b"), &env()), "a$ b");
        assert_eq!(expand_word(&Word::bare("$"), &env()), "$");
    }

    #[test]
    fn single_quotes_suppress_expansion() {
        let word = Word::new("$FOO", Quoting::Single);
        assert_eq!(expand_word(&word, &env()), "$FOO");
    }

    #[test]
    fn double_quotes_expand() {
        let word = Word::new("$FOO", Quoting::Double);
        assert_eq!(expand_word(&word, &env()), "bar");
    }

    #[test]
    fn expand_argv_maps_every_word() {
        let argv = vec![Word::bare("echo"), Word::bare("$FOO")];
        assert_eq!(expand_argv(&argv, &env()), vec!["echo", "bar"]);
    }
}
