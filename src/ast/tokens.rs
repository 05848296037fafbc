/// A lexical token in a Saffron expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Literals
    /// Integer literal
    ///
    /// # Examples
    /// ```text
    /// 42
    /// -10
    /// ```
    Integer(i64),

    /// Floating-point literal
    ///
    /// # Examples
    /// ```text
    /// 2.4
    /// -1.5
    /// ```
    Float(f64),

    /// String literal enclosed in double quotes
    ///
    /// `\"` inside the literal is an escaped quote and does not terminate it.
    ///
    /// # Examples
    /// ```text
    /// "hello"
    /// "a \"quoted\" word"
    /// ```
    String(String),

    /// Boolean literal (`true` / `false`)
    Boolean(bool),

    /// Missing-value literal (`nil` / `null`)
    Nil,

    /// Path head or path segment name
    ///
    /// Must start with a letter or underscore, followed by letters, digits,
    /// or underscores.
    ///
    /// # Examples
    /// ```text
    /// user
    /// item_count
    /// _internal
    /// ```
    Identifier(String),

    // Comparison operators
    /// Equality operator (`==`)
    EqEq,

    /// Inequality operator (`!=`)
    NotEq,

    /// Less than (`<`)
    Lt,

    /// Less than or equal (`<=`)
    LtEq,

    /// Greater than (`>`)
    Gt,

    /// Greater than or equal (`>=`)
    GtEq,

    /// Substring / membership operator (word, not symbol)
    ///
    /// # Examples
    /// ```text
    /// title contains "draft"
    /// (1..5) contains 3
    /// ```
    Contains,

    // Logical operators
    /// Logical AND (word, not symbol)
    And,

    /// Logical OR (word, not symbol)
    Or,

    // Path and range punctuation
    /// Dot for path segments (`user.name`)
    Dot,

    /// Range separator (`..`)
    DotDot,

    /// Opening parenthesis of a range construct
    ///
    /// `(A..B)` is the only parenthesized form the language recognizes;
    /// there is no generic grouping.
    RangeOpen,

    /// Closing parenthesis of a range construct
    RangeClose,

    /// Left bracket for computed path keys (`items[0]`, `obj["key"]`)
    LBracket,

    /// Right bracket
    RBracket,

    // Filter-tail punctuation (template output markup only)
    /// Filter separator (`{{ value | upcase }}`)
    Pipe,

    /// Filter argument introducer (`{{ s | truncate: 20 }}`)
    Colon,

    /// Filter argument separator
    Comma,

    /// End of input
    Eof,
}
