use crate::ast::{CompareOp, LogicOp};

/// A value-producing leaf or composite in the expression grammar.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// Literal integer
    Integer(i64),

    /// Literal floating point number
    Float(f64),

    /// String literal
    String(String),

    /// Boolean literal
    Boolean(bool),

    /// Missing-value literal (`nil` / `null`)
    Nil,

    /// Range construct
    ///
    /// Evaluates both bounds, coerces them to integers, and materializes the
    /// inclusive ascending sequence.
    ///
    /// # Example
    /// ```text
    /// (2..4)      // [2, 3, 4]
    /// (low..high) // bounds resolved from the context
    /// ```
    Range {
        from: Box<Operand>,
        to: Box<Operand>,
    },

    /// Property path
    ///
    /// # Examples
    /// ```text
    /// user.name
    /// items[0]
    /// doo[coo].foo
    /// ```
    Path(Vec<PathSegment>),
}

/// One step of a property path.
#[derive(Debug, Clone, PartialEq)]
pub enum PathSegment {
    /// Direct key lookup by name (`user`, `.name`)
    Name(String),

    /// Bracketed lookup whose key is itself an operand, evaluated first
    ///
    /// # Examples
    /// ```text
    /// items[0]        // Computed(Integer(0))
    /// obj["]"]        // Computed(String("]"))
    /// doo[coo]        // Computed(Path([Name("coo")]))
    /// ```
    Computed(Box<Operand>),
}

/// A comparison binding exactly two adjacent operands.
///
/// Comparisons never nest or chain; the parser rejects `a == b == c`.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub left: Operand,
    pub op: CompareOp,
    pub right: Operand,
}

/// One slot of a logical chain: a bare operand or a collapsed comparison.
#[derive(Debug, Clone, PartialEq)]
pub enum ChainSlot {
    Operand(Operand),
    Comparison(Comparison),
}

/// A flat sequence of slots joined by `and`/`or`.
///
/// The odd-length invariant (operands at odd positions, operators at even
/// positions) is structural: there is always a first slot, and every
/// operator carries its right-hand slot with it.
#[derive(Debug, Clone, PartialEq)]
pub struct LogicalChain {
    pub first: ChainSlot,
    pub rest: Vec<(LogicOp, ChainSlot)>,
}

impl LogicalChain {
    /// Whether the chain is a single slot (no logical operators).
    ///
    /// Single-slot chains return their raw value; longer chains cast the
    /// folded result to a boolean.
    pub fn is_single(&self) -> bool {
        self.rest.is_empty()
    }
}

/// A filter invocation in template output markup (`| name: arg, arg`).
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCall {
    pub name: String,
    pub args: Vec<Operand>,
}

/// An expression chain plus the trailing filter calls applied to its value.
///
/// # Example
/// ```text
/// {{ user.name | upcase | truncate: 20 }}
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredExpression {
    pub chain: LogicalChain,
    pub filters: Vec<FilterCall>,
}
