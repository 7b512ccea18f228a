pub mod error;
pub mod expression;
pub mod node;
pub mod parser;
pub mod runtime_names;

pub use error::ExpressionError;
pub use expression::{Expression, OptionMap};
pub use node::{BinaryOperator, ExpressionNode, Number, UnaryOperator};
pub use parser::{parse_expression, parse_interpolation};
