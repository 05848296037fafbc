pub mod ast;
pub mod context;
pub mod engine;
pub mod evaluator;
pub mod lexer;
pub mod output;
pub mod parser;
pub mod resolver;
pub mod step;
pub mod template;
pub mod value;

pub use ast::{
    ChainSlot, CompareOp, Comparison, FilterCall, FilteredExpression, LogicOp, LogicalChain,
    Operand, PathSegment, Token,
};
pub use context::{Context, MapGetter, ValueGetter};
pub use engine::{Engine, Error, Filter, Tag};
pub use evaluator::EvalError;
pub use lexer::{Lexer, SyntaxError};
pub use output::{to_json, to_json_pretty};
pub use parser::Parser;
pub use step::{DeferredValue, Pending, Step, drive_blocking, drive_deferred};
pub use template::{Node, Template};
pub use value::Value;
