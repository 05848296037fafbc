use std::mem;

use crate::{
    ast::{
        ChainSlot, CompareOp, Comparison, FilterCall, FilteredExpression, LogicOp, LogicalChain,
        Operand, PathSegment, Token,
    },
    lexer::{Lexer, SyntaxError},
};

/// Parses a token stream into a [`LogicalChain`].
///
/// The grammar is deliberately flat: one greedy operand at a time, adjacent
/// comparison pairs collapsed into a single slot, and `and`/`or` joining
/// slots without precedence grouping.
///
/// ```text
/// expr       := chainSlot ( ("and"|"or") chainSlot )*
/// chainSlot  := operand ( compareOp operand )?
/// operand    := literal | range | path
/// range      := "(" operand ".." operand ")"
/// path       := IDENT ( "." IDENT | "[" operand "]" )*
/// ```
pub struct Parser {
    lexer: Lexer,
    current_token: Token,
}

impl Parser {
    pub fn new(mut lexer: Lexer) -> Result<Self, SyntaxError> {
        let current_token = lexer.next_token()?;
        Ok(Parser {
            lexer,
            current_token,
        })
    }

    /// Parses a complete expression, requiring the whole input be consumed.
    pub fn parse(&mut self) -> Result<LogicalChain, SyntaxError> {
        let chain = self.parse_chain()?;
        self.expect(Token::Eof)?;
        Ok(chain)
    }

    /// Parses an expression chain, stopping at the first token that cannot
    /// continue it (the caller decides whether what follows is legal).
    pub fn parse_chain(&mut self) -> Result<LogicalChain, SyntaxError> {
        let first = self.parse_slot()?;
        let mut rest = Vec::new();

        while let Some(op) = LogicOp::from_token(&self.current_token) {
            self.advance()?;
            rest.push((op, self.parse_slot()?));
        }

        Ok(LogicalChain { first, rest })
    }

    /// Parses template output markup: an expression chain plus trailing
    /// filter calls (`value | name: arg, arg | name`).
    pub fn parse_filtered(&mut self) -> Result<FilteredExpression, SyntaxError> {
        let chain = self.parse_chain()?;
        let mut filters = Vec::new();

        while self.check(&Token::Pipe) {
            self.advance()?;

            let name = match mem::replace(&mut self.current_token, Token::Eof) {
                Token::Identifier(name) => name,
                token => {
                    return Err(self.error(format!("Expected filter name after '|', got {:?}", token)));
                }
            };
            self.advance()?;

            let mut args = Vec::new();
            if self.check(&Token::Colon) {
                self.advance()?;
                args.push(self.parse_operand()?);
                while self.check(&Token::Comma) {
                    self.advance()?;
                    args.push(self.parse_operand()?);
                }
            }

            filters.push(FilterCall { name, args });
        }

        self.expect(Token::Eof)?;
        Ok(FilteredExpression { chain, filters })
    }

    fn advance(&mut self) -> Result<(), SyntaxError> {
        self.current_token = self.lexer.next_token()?;
        Ok(())
    }

    fn expect(&mut self, expected: Token) -> Result<(), SyntaxError> {
        if mem::discriminant(&self.current_token) != mem::discriminant(&expected) {
            return Err(self.error(format!(
                "Expected {:?}, got {:?}",
                expected, self.current_token
            )));
        }
        self.advance()
    }

    fn check(&self, token: &Token) -> bool {
        mem::discriminant(&self.current_token) == mem::discriminant(token)
    }

    fn error(&self, message: String) -> SyntaxError {
        SyntaxError::new(message, self.lexer.position())
    }

    /// One chain slot: an operand, optionally collapsed with a following
    /// comparison operator and its right-hand operand.
    fn parse_slot(&mut self) -> Result<ChainSlot, SyntaxError> {
        let left = self.parse_operand()?;

        let Some(op) = CompareOp::from_token(&self.current_token) else {
            return Ok(ChainSlot::Operand(left));
        };
        self.advance()?;
        let right = self.parse_operand()?;

        // A comparison binds exactly two operands; `a == b == c` is not
        // legal grammar.
        if CompareOp::from_token(&self.current_token).is_some() {
            return Err(self.error("Comparisons cannot be chained".to_string()));
        }

        Ok(ChainSlot::Comparison(Comparison { left, op, right }))
    }

    fn parse_operand(&mut self) -> Result<Operand, SyntaxError> {
        match mem::replace(&mut self.current_token, Token::Eof) {
            Token::Integer(n) => {
                self.advance()?;
                Ok(Operand::Integer(n))
            }
            Token::Float(n) => {
                self.advance()?;
                Ok(Operand::Float(n))
            }
            Token::String(s) => {
                self.advance()?;
                Ok(Operand::String(s))
            }
            Token::Boolean(b) => {
                self.advance()?;
                Ok(Operand::Boolean(b))
            }
            Token::Nil => {
                self.advance()?;
                Ok(Operand::Nil)
            }
            Token::RangeOpen => {
                self.advance()?;
                self.parse_range()
            }
            Token::Identifier(head) => {
                self.advance()?;
                self.parse_path(head)
            }
            token => Err(self.error(format!("Expected operand, got {:?}", token))),
        }
    }

    /// The opening `(` has been consumed; `(A..B)` is the only parenthesized
    /// construct the grammar recognizes.
    fn parse_range(&mut self) -> Result<Operand, SyntaxError> {
        let from = self.parse_operand()?;
        self.expect(Token::DotDot)?;
        let to = self.parse_operand()?;
        self.expect(Token::RangeClose)?;
        Ok(Operand::Range {
            from: Box::new(from),
            to: Box::new(to),
        })
    }

    /// Paths absorb trailing `.name` and `[operand]` segments until a
    /// non-path token appears.
    fn parse_path(&mut self, head: String) -> Result<Operand, SyntaxError> {
        let mut segments = vec![PathSegment::Name(head)];

        loop {
            if self.check(&Token::Dot) {
                self.advance()?;

                let name = match mem::replace(&mut self.current_token, Token::Eof) {
                    Token::Identifier(name) => name,
                    token => {
                        return Err(self.error(format!("Expected identifier after '.', got {:?}", token)));
                    }
                };
                self.advance()?;

                segments.push(PathSegment::Name(name));
            } else if self.check(&Token::LBracket) {
                self.advance()?;
                let key = self.parse_operand()?;
                self.expect(Token::RBracket)?;

                segments.push(PathSegment::Computed(Box::new(key)));
            } else {
                break;
            }
        }

        Ok(Operand::Path(segments))
    }
}

/// Convenience wrapper: lex and parse a full expression.
pub fn parse_expression(input: &str) -> Result<LogicalChain, SyntaxError> {
    Parser::new(Lexer::new(input))?.parse()
}

/// Convenience wrapper: lex and parse template output markup.
pub fn parse_filtered_expression(input: &str) -> Result<FilteredExpression, SyntaxError> {
    Parser::new(Lexer::new(input))?.parse_filtered()
}
