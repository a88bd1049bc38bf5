//! Parser tests using rstest for parameterization.

use std::path::PathBuf;

use jash_kernel::parser::{parse, ParseError};
use jash_kernel::{Command, OutputMode, PipelineSpec};
use rstest::rstest;

/// Parse a line that must yield a pipeline.
fn parse_ok(input: &str) -> PipelineSpec {
    parse(input)
        .unwrap_or_else(|e| panic!("parse error for {:?}: {}", input, e))
        .unwrap_or_else(|| panic!("expected a pipeline for {:?}", input))
}

/// Run a parser test that expects a parse error.
fn expect_parse_error(input: &str) {
    let result = parse(input);
    assert!(result.is_err(), "expected error for input: {:?}", input);
}

fn texts(cmd: &Command) -> Vec<&str> {
    cmd.argv.iter().map(|w| w.text.as_str()).collect()
}

// =============================================================================
// Single commands
// =============================================================================

#[rstest]
#[case::bare_command("ls", &["ls"])]
#[case::command_with_args("ls -l /tmp", &["ls", "-l", "/tmp"])]
#[case::quoted_arg_groups_spaces("echo 'a b' c", &["echo", "a b", "c"])]
fn parser_single_commands(#[case] input: &str, #[case] argv: &[&str]) {
    let spec = parse_ok(input);
    assert!(spec.is_single());
    assert!(!spec.background);
    assert_eq!(texts(&spec.stages[0]), argv);
}

#[rstest]
#[case::empty("")]
#[case::whitespace_only("   \t ")]
fn parser_blank_lines_yield_none(#[case] input: &str) {
    assert_eq!(parse(input).unwrap(), None);
}

// =============================================================================
// Background flag
// =============================================================================

#[test]
fn parser_trailing_amp_sets_background() {
    let spec = parse_ok("sleep 5 &");
    assert!(spec.background);
    assert_eq!(texts(&spec.stages[0]), &["sleep", "5"]);
    assert_eq!(spec.text, "sleep 5");
}

#[test]
fn parser_glued_amp_stays_in_argument() {
    let spec = parse_ok("echo a&");
    assert!(!spec.background);
    assert_eq!(texts(&spec.stages[0]), &["echo", "a&"]);
}

#[test]
fn parser_background_pipeline() {
    let spec = parse_ok("cat f | sort &");
    assert!(spec.background);
    assert_eq!(spec.stages.len(), 2);
    assert_eq!(spec.text, "cat f | sort");
}

#[rstest]
#[case::amp_alone("&")]
#[case::amp_mid_line("a & b")]
fn parser_misplaced_amp_errors(#[case] input: &str) {
    expect_parse_error(input);
}

// =============================================================================
// Pipelines
// =============================================================================

#[test]
fn parser_pipeline_splits_stages() {
    let spec = parse_ok("cat f | grep x | wc -l");
    assert_eq!(spec.stages.len(), 3);
    assert_eq!(texts(&spec.stages[0]), &["cat", "f"]);
    assert_eq!(texts(&spec.stages[1]), &["grep", "x"]);
    assert_eq!(texts(&spec.stages[2]), &["wc", "-l"]);
}

#[rstest]
#[case::leading_pipe("| a")]
#[case::trailing_pipe("a |")]
#[case::double_pipe("a | | b")]
#[case::pipe_alone("|")]
fn parser_empty_stage_errors(#[case] input: &str) {
    expect_parse_error(input);
}

// =============================================================================
// Redirections
// =============================================================================

#[test]
fn parser_output_redirect_extracted() {
    let spec = parse_ok("echo hi > out.txt");
    assert_eq!(texts(&spec.stages[0]), &["echo", "hi"]);
    assert_eq!(
        spec.stages[0].redirect.output,
        Some((PathBuf::from("out.txt"), OutputMode::Truncate))
    );
}

#[test]
fn parser_append_redirect_extracted() {
    let spec = parse_ok("echo hi >> log.txt");
    assert_eq!(
        spec.stages[0].redirect.output,
        Some((PathBuf::from("log.txt"), OutputMode::Append))
    );
}

#[test]
fn parser_input_and_output_on_one_command() {
    let spec = parse_ok("sort < in > out");
    assert_eq!(texts(&spec.stages[0]), &["sort"]);
    assert_eq!(spec.stages[0].redirect.input, Some(PathBuf::from("in")));
    assert_eq!(
        spec.stages[0].redirect.output,
        Some((PathBuf::from("out"), OutputMode::Truncate))
    );
}

#[test]
fn parser_pipeline_endpoint_redirects() {
    let spec = parse_ok("cat < in | grep x | sort > out");
    assert_eq!(spec.stages[0].redirect.input, Some(PathBuf::from("in")));
    assert!(spec.stages[1].redirect.is_empty());
    assert_eq!(
        spec.stages[2].redirect.output,
        Some((PathBuf::from("out"), OutputMode::Truncate))
    );
}

#[test]
fn parser_last_redirect_wins() {
    let spec = parse_ok("cmd > a >> b");
    assert_eq!(
        spec.stages[0].redirect.output,
        Some((PathBuf::from("b"), OutputMode::Append))
    );
}

#[rstest]
#[case::output_missing_target("echo >")]
#[case::append_missing_target("echo >>")]
#[case::input_missing_target("wc <")]
#[case::redirect_only("> out")]
#[case::input_not_on_first("a | b < in")]
#[case::output_not_on_last("a > out | b")]
#[case::output_mid_pipeline("a | b > out | c")]
fn parser_redirect_errors(#[case] input: &str) {
    expect_parse_error(input);
}

#[test]
fn parser_misplaced_input_names_the_rule() {
    let err = parse("a | b < in").unwrap_err();
    assert_eq!(err, ParseError::InputRedirectNotFirst);
}

#[test]
fn parser_misplaced_output_names_the_rule() {
    let err = parse("a > out | b").unwrap_err();
    assert_eq!(err, ParseError::OutputRedirectNotLast);
}

// =============================================================================
// Lex errors surface as parse errors
// =============================================================================

#[test]
fn parser_unterminated_quote_is_syntax_error() {
    let err = parse("echo 'oops").unwrap_err();
    assert!(err.to_string().contains("unterminated quote"));
}

// =============================================================================
// Display text
// =============================================================================

#[rstest]
#[case::simple("ls -l", "ls -l")]
#[case::background_amp_stripped("sleep 2 &", "sleep 2")]
#[case::glued_background("sleep 2&", "sleep 2&")]
#[case::pipeline_kept("cat f | sort", "cat f | sort")]
#[case::surrounding_space_trimmed("  echo hi  ", "echo hi")]
fn parser_display_text(#[case] input: &str, #[case] text: &str) {
    assert_eq!(parse_ok(input).text, text);
}
