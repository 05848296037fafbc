use crate::ast::Token;

/// Comparison operators. Each binds exactly two adjacent operands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CompareOp {
    /// Equal (`==`)
    Equal,
    /// Not equal (`!=`)
    NotEqual,
    /// Less than (`<`)
    LessThan,
    /// Greater than (`>`)
    GreaterThan,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Greater than or equal (`>=`)
    GreaterEqual,
    /// Substring or membership test (`contains`)
    Contains,
}

impl CompareOp {
    /// The operator a token denotes, if any.
    pub fn from_token(token: &Token) -> Option<CompareOp> {
        match token {
            Token::EqEq => Some(CompareOp::Equal),
            Token::NotEq => Some(CompareOp::NotEqual),
            Token::Lt => Some(CompareOp::LessThan),
            Token::Gt => Some(CompareOp::GreaterThan),
            Token::LtEq => Some(CompareOp::LessEqual),
            Token::GtEq => Some(CompareOp::GreaterEqual),
            Token::Contains => Some(CompareOp::Contains),
            _ => None,
        }
    }
}

/// Logical chain operators (`and` / `or`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LogicOp {
    /// Logical AND
    And,
    /// Logical OR
    Or,
}

impl LogicOp {
    pub fn from_token(token: &Token) -> Option<LogicOp> {
        match token {
            Token::And => Some(LogicOp::And),
            Token::Or => Some(LogicOp::Or),
            _ => None,
        }
    }
}
