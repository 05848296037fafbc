use crate::ast::Token;

/// A parse-time failure: malformed token stream or chain structure.
///
/// Raised at parse time only; once an expression parses, evaluating it can
/// never produce a `SyntaxError`.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntaxError {
    pub message: String,
    pub position: usize,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, position: usize) -> Self {
        SyntaxError {
            message: message.into(),
            position,
        }
    }
}

impl std::fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Syntax error at position {}: {}", self.position, self.message)
    }
}

impl std::error::Error for SyntaxError {}

pub struct Lexer {
    input: Vec<char>,
    position: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
            position: 0,
        }
    }

    /// Character offset of the next unread character.
    pub fn position(&self) -> usize {
        self.position
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_char(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn read_identifier(&mut self) -> String {
        let mut result = String::new();
        while let Some(ch) = self.current_char() {
            if ch.is_alphanumeric() || ch == '_' {
                result.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        result
    }

    fn read_string(&mut self) -> Result<String, SyntaxError> {
        let start = self.position;
        let mut result = String::new();
        self.advance(); // consume opening quote

        while let Some(ch) = self.current_char() {
            match ch {
                '"' => {
                    self.advance();
                    return Ok(result);
                }
                '\\' => {
                    self.advance(); // consume backslash
                    match self.current_char() {
                        Some('"') => result.push('"'),
                        Some('\\') => result.push('\\'),
                        Some('n') => result.push('\n'),
                        Some('t') => result.push('\t'),
                        Some('r') => result.push('\r'),
                        Some(ch) => {
                            return Err(SyntaxError::new(
                                format!("Invalid escape sequence: \\{}", ch),
                                self.position,
                            ));
                        }
                        None => {
                            return Err(SyntaxError::new(
                                "Unterminated string: unexpected end of input after backslash",
                                self.position,
                            ));
                        }
                    }
                    self.advance();
                }
                _ => {
                    result.push(ch);
                    self.advance();
                }
            }
        }

        Err(SyntaxError::new(
            "Unterminated string: missing closing quote",
            start,
        ))
    }

    fn read_number(&mut self, negative: bool) -> Result<Token, SyntaxError> {
        let start = self.position;
        let mut number = String::new();
        if negative {
            number.push('-');
            self.advance();
        }
        let mut is_float = false;

        while let Some(ch) = self.current_char() {
            if ch.is_ascii_digit() {
                number.push(ch);
                self.advance();
            } else if ch == '.'
                && !is_float
                && self.peek_char(1).is_some_and(|c| c.is_ascii_digit())
            {
                is_float = true;
                number.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        if is_float {
            number
                .parse::<f64>()
                .map(Token::Float)
                .map_err(|_| SyntaxError::new(format!("Invalid number literal '{}'", number), start))
        } else {
            number
                .parse::<i64>()
                .map(Token::Integer)
                .map_err(|_| SyntaxError::new(format!("Invalid number literal '{}'", number), start))
        }
    }

    pub fn next_token(&mut self) -> Result<Token, SyntaxError> {
        self.skip_whitespace();

        match self.current_char() {
            None => Ok(Token::Eof),
            Some('.') => {
                if self.peek_char(1) == Some('.') {
                    self.advance();
                    self.advance();
                    Ok(Token::DotDot)
                } else {
                    self.advance();
                    Ok(Token::Dot)
                }
            }
            Some('[') => {
                self.advance();
                Ok(Token::LBracket)
            }
            Some(']') => {
                self.advance();
                Ok(Token::RBracket)
            }
            Some('(') => {
                self.advance();
                Ok(Token::RangeOpen)
            }
            Some(')') => {
                self.advance();
                Ok(Token::RangeClose)
            }
            Some('|') => {
                self.advance();
                Ok(Token::Pipe)
            }
            Some(':') => {
                self.advance();
                Ok(Token::Colon)
            }
            Some(',') => {
                self.advance();
                Ok(Token::Comma)
            }
            Some('=') => {
                if self.peek_char(1) == Some('=') {
                    self.advance();
                    self.advance();
                    Ok(Token::EqEq)
                } else {
                    Err(SyntaxError::new(
                        "Unexpected '=' (did you mean '=='?)",
                        self.position,
                    ))
                }
            }
            Some('!') => {
                if self.peek_char(1) == Some('=') {
                    self.advance();
                    self.advance();
                    Ok(Token::NotEq)
                } else {
                    Err(SyntaxError::new(
                        "Unexpected '!' (did you mean '!='?)",
                        self.position,
                    ))
                }
            }
            Some('<') => {
                if self.peek_char(1) == Some('=') {
                    self.advance();
                    self.advance();
                    Ok(Token::LtEq)
                } else {
                    self.advance();
                    Ok(Token::Lt)
                }
            }
            Some('>') => {
                if self.peek_char(1) == Some('=') {
                    self.advance();
                    self.advance();
                    Ok(Token::GtEq)
                } else {
                    self.advance();
                    Ok(Token::Gt)
                }
            }
            Some('"') => Ok(Token::String(self.read_string()?)),
            Some('-') if self.peek_char(1).is_some_and(|c| c.is_ascii_digit()) => {
                self.read_number(true)
            }
            Some(ch) if ch.is_alphabetic() || ch == '_' => {
                let ident = self.read_identifier();

                match ident.as_str() {
                    "and" => Ok(Token::And),
                    "or" => Ok(Token::Or),
                    "contains" => Ok(Token::Contains),
                    "true" => Ok(Token::Boolean(true)),
                    "false" => Ok(Token::Boolean(false)),
                    "nil" | "null" => Ok(Token::Nil),
                    _ => Ok(Token::Identifier(ident)),
                }
            }
            Some(ch) if ch.is_ascii_digit() => self.read_number(false),
            Some(ch) => Err(SyntaxError::new(
                format!("Unexpected character '{}'", ch),
                self.position,
            )),
        }
    }
}

/// Tokenizes a whole expression, checking bracket balance.
///
/// Brackets are matched only outside of quoted strings; a `]` inside a
/// string literal has already been absorbed into its token by the time the
/// balance is checked.
pub fn tokenize(input: &str) -> Result<Vec<Token>, SyntaxError> {
    let mut lexer = Lexer::new(input);
    let mut tokens = Vec::new();
    let mut depth: i64 = 0;

    loop {
        let position = lexer.position();
        let token = lexer.next_token()?;
        match token {
            Token::LBracket => depth += 1,
            Token::RBracket => {
                depth -= 1;
                if depth < 0 {
                    return Err(SyntaxError::new("Unbalanced ']'", position));
                }
            }
            Token::Eof => break,
            _ => {}
        }
        tokens.push(token);
    }

    if depth > 0 {
        return Err(SyntaxError::new("Unbalanced '['", lexer.position()));
    }
    tokens.push(Token::Eof);
    Ok(tokens)
}

#[test]
fn test_keywords() {
    let mut lexer = Lexer::new("and or contains true false nil");
    assert_eq!(lexer.next_token().unwrap(), Token::And);
    assert_eq!(lexer.next_token().unwrap(), Token::Or);
    assert_eq!(lexer.next_token().unwrap(), Token::Contains);
    assert_eq!(lexer.next_token().unwrap(), Token::Boolean(true));
    assert_eq!(lexer.next_token().unwrap(), Token::Boolean(false));
    assert_eq!(lexer.next_token().unwrap(), Token::Nil);
}

#[test]
fn test_path_tokens() {
    let mut lexer = Lexer::new("doo[coo].foo");
    assert_eq!(lexer.next_token().unwrap(), Token::Identifier("doo".to_string()));
    assert_eq!(lexer.next_token().unwrap(), Token::LBracket);
    assert_eq!(lexer.next_token().unwrap(), Token::Identifier("coo".to_string()));
    assert_eq!(lexer.next_token().unwrap(), Token::RBracket);
    assert_eq!(lexer.next_token().unwrap(), Token::Dot);
    assert_eq!(lexer.next_token().unwrap(), Token::Identifier("foo".to_string()));
    assert_eq!(lexer.next_token().unwrap(), Token::Eof);
}
