//! # Saffron Template Language - Abstract Syntax Tree
//!
//! This module defines the Abstract Syntax Tree (AST) for Saffron
//! expressions, the condition/value language embedded in template output
//! markup (`{{ ... }}`) and tag markup (`{% ... %}`).
//!
//! ## Architecture Overview
//!
//! The AST module is organized into focused submodules:
//!
//! - **[tokens]** - Lexical tokens produced by the lexer
//! - **[expressions]** - Operands, path segments, comparisons, chains
//! - **[operators]** - Comparison and logical operators
//!
//! ## Core Concepts
//!
//! ### Operands
//!
//! The leaf nodes of an expression: literals (`2.4`, `"hi"`, `true`, `nil`),
//! ranges (`(1..5)`), and property paths (`user.name`, `items[0]`,
//! `doo[coo].foo`). A bracketed key may be an arbitrary nested operand, so
//! paths are recursive.
//!
//! ### Chains
//!
//! Expressions are flat chains of operands joined by `and`/`or`, where each
//! slot may be a single operand or a two-operand comparison:
//!
//! ```text
//! user.age >= 18 and user.verified
//! ```
//!
//! Comparisons never chain (`a == b == c` is a syntax error) and chains are
//! folded right-to-left with value precedence, not the usual
//! and-before-or precedence.
//!
//! ### Filtered expressions
//!
//! Template output markup may append filter calls to a chain:
//!
//! ```text
//! {{ user.name | upcase | truncate: 20 }}
//! ```
//!
//! The filter catalog itself is host-provided; the AST only carries the
//! names and argument operands.
pub mod tokens;
pub mod expressions;
pub mod operators;

pub use tokens::Token;
pub use expressions::{ChainSlot, Comparison, FilterCall, FilteredExpression, LogicalChain, Operand, PathSegment};
pub use operators::{CompareOp, LogicOp};
