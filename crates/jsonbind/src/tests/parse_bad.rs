use alloc::string::ToString;

use rstest::rstest;

use crate::{Expected, ParseError, Parser, ParserOptions, TreeBuilder, parse_str};

#[rstest]
#[case::empty("")]
#[case::only_whitespace("  \t\n")]
#[case::open_object("{")]
#[case::open_array("[1")]
#[case::open_key("{\"a")]
#[case::unterminated_string("\"abc")]
#[case::dangling_colon("{\"a\":}")]
#[case::negative_number("{\"a\":-1}")]
#[case::positive_sign("[+1]")]
#[case::exponent_form("[1e5]")]
#[case::dangling_fraction("[5.]")]
#[case::leading_dot("[.5]")]
#[case::misspelled_keyword("[tru]")]
#[case::bare_word_value("{\"a\":hello}")]
#[case::colon_in_array("[1:2]")]
#[case::double_colon("{\"a\"::1}")]
#[case::close_mismatch_brace("[1}")]
#[case::close_mismatch_bracket("{\"a\":1]")]
#[case::trailing_garbage("{} x")]
#[case::second_root("1 2")]
fn rejects_malformed_input(#[case] text: &str) {
    assert!(parse_str(text).is_err(), "{text:?}");
}

#[test]
fn missing_comma_cites_the_index_and_the_legal_characters() {
    let err = parse_str(r#"{"a":1 "b":2}"#).unwrap_err();
    assert_eq!(
        err,
        ParseError::UnexpectedCharacter {
            found: '"',
            index: 7,
            expected: Expected::OneOf(&[',', '}']),
        }
    );
    assert_eq!(
        err.to_string(),
        "unexpected character '\"' at index 7, expected one of ',', '}'"
    );
}

#[test]
fn invalid_literal_cites_the_text_and_its_starting_index() {
    let err = parse_str(r#"{"a":12.3.4}"#).unwrap_err();
    assert_eq!(
        err,
        ParseError::InvalidLiteral {
            literal: "12.3.4".into(),
            index: 5,
        }
    );
    assert_eq!(err.to_string(), "invalid literal `12.3.4` at index 5");
}

#[test]
fn mismatched_close_reports_the_enclosing_construct() {
    let err = parse_str("[1}").unwrap_err();
    assert_eq!(
        err,
        ParseError::UnexpectedCharacter {
            found: '}',
            index: 2,
            expected: Expected::OneOf(&[',', ']']),
        }
    );
}

#[test]
fn premature_end_of_input_is_its_own_error() {
    let err = parse_str(r#"{"a":"#).unwrap_err();
    assert_eq!(err, ParseError::UnexpectedEndOfInput { index: 5 });
}

#[test]
fn an_even_backslash_run_swallows_the_closing_quote() {
    // The scanner looks back exactly one character, so the quote after the
    // double backslash still reads as escaped and the string never ends.
    let err = parse_str(r#""a\\""#).unwrap_err();
    assert_eq!(err, ParseError::UnexpectedEndOfInput { index: 5 });
}

#[test]
fn a_missing_colon_expects_exactly_a_colon() {
    let err = parse_str(r#"{"a" 1}"#).unwrap_err();
    assert_eq!(
        err,
        ParseError::UnexpectedCharacter {
            found: '1',
            index: 5,
            expected: Expected::OneOf(&[':']),
        }
    );
}

#[test]
fn a_value_position_rejects_structural_characters() {
    let err = parse_str(r#"{"a":,}"#).unwrap_err();
    assert_eq!(
        err,
        ParseError::UnexpectedCharacter {
            found: ',',
            index: 5,
            expected: Expected::Value,
        }
    );
}

#[test]
fn a_key_position_rejects_separators() {
    let err = parse_str("{:1}").unwrap_err();
    assert_eq!(
        err,
        ParseError::UnexpectedCharacter {
            found: ':',
            index: 1,
            expected: Expected::Key,
        }
    );
}

#[test]
fn input_after_the_final_close_is_rejected() {
    let err = parse_str("{} {}").unwrap_err();
    assert_eq!(
        err,
        ParseError::UnexpectedCharacter {
            found: '{',
            index: 3,
            expected: Expected::EndOfInput,
        }
    );
}

#[test]
fn strict_options_reject_the_relaxed_tokens() {
    let strict_keys = Parser::new(ParserOptions {
        allow_bare_keys: false,
        ..ParserOptions::default()
    });
    let mut sink = TreeBuilder::new();
    assert!(strict_keys.parse("{a:1}", &mut sink).is_err());

    let strict_quotes = Parser::new(ParserOptions {
        allow_single_quotes: false,
        ..ParserOptions::default()
    });
    let mut sink = TreeBuilder::new();
    assert!(strict_quotes.parse("{'a':1}", &mut sink).is_err());
    let mut sink = TreeBuilder::new();
    assert!(strict_quotes.parse(r#"{"a":'x'}"#, &mut sink).is_err());

    // The defaults accept all of it.
    assert!(parse_str("{a:'x'}").is_ok());
}
