// tests/lexer_tests.rs

use saffron_lang::ast::Token;
use saffron_lang::lexer::{Lexer, tokenize};

// ============================================================================
// Single and Two Character Tokens
// ============================================================================

#[test]
fn test_punctuation_tokens() {
    let test_cases = vec![
        (".", Token::Dot),
        ("..", Token::DotDot),
        ("[", Token::LBracket),
        ("]", Token::RBracket),
        ("(", Token::RangeOpen),
        (")", Token::RangeClose),
        ("|", Token::Pipe),
        (":", Token::Colon),
        (",", Token::Comma),
        ("<", Token::Lt),
        (">", Token::Gt),
        ("<=", Token::LtEq),
        (">=", Token::GtEq),
        ("==", Token::EqEq),
        ("!=", Token::NotEq),
    ];

    for (input, expected) in test_cases {
        let mut lexer = Lexer::new(input);
        let token = lexer.next_token().unwrap();
        assert_eq!(token, expected, "Failed for input: {}", input);
        assert_eq!(lexer.next_token().unwrap(), Token::Eof);
    }
}

#[test]
fn test_bare_equals_is_invalid() {
    let mut lexer = Lexer::new("< =");
    lexer.next_token().unwrap(); // Gets <
    let result = lexer.next_token();
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("Unexpected '='"));
}

#[test]
fn test_bare_bang_is_invalid() {
    let mut lexer = Lexer::new("!");
    let result = lexer.next_token();
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("Unexpected '!'"));
}

// ============================================================================
// Keywords
// ============================================================================

#[test]
fn test_keywords() {
    let test_cases = vec![
        ("and", Token::And),
        ("or", Token::Or),
        ("contains", Token::Contains),
        ("true", Token::Boolean(true)),
        ("false", Token::Boolean(false)),
        ("nil", Token::Nil),
        ("null", Token::Nil),
    ];

    for (input, expected) in test_cases {
        let mut lexer = Lexer::new(input);
        let token = lexer.next_token().unwrap();
        assert_eq!(token, expected, "Failed for input: {}", input);
        assert_eq!(lexer.next_token().unwrap(), Token::Eof);
    }
}

#[test]
fn test_keywords_vs_identifiers() {
    // keyword prefixes stay identifiers
    let mut lexer = Lexer::new("android orbit containsx truthy nihil");
    assert_eq!(
        lexer.next_token().unwrap(),
        Token::Identifier("android".to_string())
    );
    assert_eq!(
        lexer.next_token().unwrap(),
        Token::Identifier("orbit".to_string())
    );
    assert_eq!(
        lexer.next_token().unwrap(),
        Token::Identifier("containsx".to_string())
    );
    assert_eq!(
        lexer.next_token().unwrap(),
        Token::Identifier("truthy".to_string())
    );
    assert_eq!(
        lexer.next_token().unwrap(),
        Token::Identifier("nihil".to_string())
    );
}

// ============================================================================
// Numbers
// ============================================================================

#[test]
fn test_numbers() {
    let test_cases = vec![
        ("42", Token::Integer(42)),
        ("0", Token::Integer(0)),
        ("-10", Token::Integer(-10)),
        ("2.4", Token::Float(2.4)),
        ("-1.5", Token::Float(-1.5)),
    ];

    for (input, expected) in test_cases {
        let mut lexer = Lexer::new(input);
        let token = lexer.next_token().unwrap();
        assert_eq!(token, expected, "Failed for input: {}", input);
        assert_eq!(lexer.next_token().unwrap(), Token::Eof);
    }
}

#[test]
fn test_integer_then_range_dots() {
    // "1..5" must not lex 1. as a float
    let mut lexer = Lexer::new("1..5");
    assert_eq!(lexer.next_token().unwrap(), Token::Integer(1));
    assert_eq!(lexer.next_token().unwrap(), Token::DotDot);
    assert_eq!(lexer.next_token().unwrap(), Token::Integer(5));
}

// ============================================================================
// Strings and Escaping
// ============================================================================

#[test]
fn test_simple_string() {
    let mut lexer = Lexer::new("\"hello\"");
    assert_eq!(
        lexer.next_token().unwrap(),
        Token::String("hello".to_string())
    );
    assert_eq!(lexer.next_token().unwrap(), Token::Eof);
}

#[test]
fn test_escaped_quote_does_not_terminate() {
    let mut lexer = Lexer::new(r#""a \"quoted\" word""#);
    assert_eq!(
        lexer.next_token().unwrap(),
        Token::String("a \"quoted\" word".to_string())
    );
    assert_eq!(lexer.next_token().unwrap(), Token::Eof);
}

#[test]
fn test_escape_sequences() {
    let mut lexer = Lexer::new(r#""a\nb\tc\\d""#);
    assert_eq!(
        lexer.next_token().unwrap(),
        Token::String("a\nb\tc\\d".to_string())
    );
}

#[test]
fn test_unterminated_string() {
    let mut lexer = Lexer::new("\"never closed");
    let result = lexer.next_token();
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("Unterminated string"));
}

#[test]
fn test_bracket_inside_string_is_not_a_bracket() {
    // the ] in the string must not close the enclosing [...]
    let tokens = tokenize(r#"obj["]"]"#).unwrap();
    assert_eq!(
        tokens,
        vec![
            Token::Identifier("obj".to_string()),
            Token::LBracket,
            Token::String("]".to_string()),
            Token::RBracket,
            Token::Eof,
        ]
    );
}

// ============================================================================
// Bracket Balance
// ============================================================================

#[test]
fn test_unbalanced_brackets() {
    assert!(tokenize("a[b").is_err());
    assert!(tokenize("a]b").is_err());
    assert!(tokenize("a[b[c]").is_err());
    assert!(tokenize("a[b][c]").is_ok());
}

// ============================================================================
// Whitespace
// ============================================================================

#[test]
fn test_whitespace_is_insignificant() {
    for input in ["1<2", "1 < 2", "1   <   2", "1\t<\n2"] {
        let mut lexer = Lexer::new(input);
        assert_eq!(lexer.next_token().unwrap(), Token::Integer(1), "{}", input);
        assert_eq!(lexer.next_token().unwrap(), Token::Lt, "{}", input);
        assert_eq!(lexer.next_token().unwrap(), Token::Integer(2), "{}", input);
        assert_eq!(lexer.next_token().unwrap(), Token::Eof, "{}", input);
    }
}

// ============================================================================
// Full Expressions
// ============================================================================

#[test]
fn test_range_expression() {
    let tokens = tokenize("(2..4) contains x").unwrap();
    assert_eq!(
        tokens,
        vec![
            Token::RangeOpen,
            Token::Integer(2),
            Token::DotDot,
            Token::Integer(4),
            Token::RangeClose,
            Token::Contains,
            Token::Identifier("x".to_string()),
            Token::Eof,
        ]
    );
}

#[test]
fn test_chain_expression() {
    let tokens = tokenize("user.age >= 18 and user.verified").unwrap();
    assert_eq!(
        tokens,
        vec![
            Token::Identifier("user".to_string()),
            Token::Dot,
            Token::Identifier("age".to_string()),
            Token::GtEq,
            Token::Integer(18),
            Token::And,
            Token::Identifier("user".to_string()),
            Token::Dot,
            Token::Identifier("verified".to_string()),
            Token::Eof,
        ]
    );
}

#[test]
fn test_unexpected_character() {
    let mut lexer = Lexer::new("a # b");
    lexer.next_token().unwrap();
    let result = lexer.next_token();
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("Unexpected character"));
}
