//! Defines the Abstract Syntax Tree (AST) for sly template expressions.

use std::collections::BTreeMap;

/// A numeric literal. The language distinguishes integer and floating-point
/// numbers so that the code generator can pick an integer fast path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Long(i64),
    Double(f64),
}

/// A single node in an expression tree.
///
/// Nodes are immutable once constructed; children are owned boxes and there
/// are no back-references, so subtrees can be cloned and rehung freely.
#[derive(Debug, Clone, PartialEq)]
pub enum ExpressionNode {
    /// A (possibly dotted) variable reference, e.g. `properties.title`.
    Identifier(String),
    StringConstant(String),
    NumericConstant(Number),
    BooleanConstant(bool),
    NullLiteral,
    UnaryOperation {
        op: UnaryOperator,
        operand: Box<ExpressionNode>,
    },
    BinaryOperation {
        op: BinaryOperator,
        left: Box<ExpressionNode>,
        right: Box<ExpressionNode>,
    },
    /// The conditional operator `condition ? then : else`. The condition is
    /// coerced to a boolean; exactly one branch is evaluated.
    TernaryOperation {
        condition: Box<ExpressionNode>,
        then_branch: Box<ExpressionNode>,
        else_branch: Box<ExpressionNode>,
    },
    /// A map literal; insertion order is irrelevant, so keys are kept sorted.
    MapLiteral(BTreeMap<String, ExpressionNode>),
    ArrayLiteral(Vec<ExpressionNode>),
    /// A call into the runtime support library, e.g. `format(root, pattern)`.
    RuntimeCall {
        function: String,
        arguments: Vec<ExpressionNode>,
    },
}

impl ExpressionNode {
    /// Checks if the node is a `RuntimeCall` variant.
    pub fn is_runtime_call(&self) -> bool {
        matches!(self, ExpressionNode::RuntimeCall { .. })
    }

    /// Checks if the node is a `BinaryOperation` variant.
    pub fn is_binary_operation(&self) -> bool {
        matches!(self, ExpressionNode::BinaryOperation { .. })
    }

    /// Shorthand for a boxed identifier node.
    pub fn identifier(name: impl Into<String>) -> ExpressionNode {
        ExpressionNode::Identifier(name.into())
    }

    /// Shorthand for an integer constant.
    pub fn long(value: i64) -> ExpressionNode {
        ExpressionNode::NumericConstant(Number::Long(value))
    }

    /// Builds a binary operation node from owned operands.
    pub fn binary(op: BinaryOperator, left: ExpressionNode, right: ExpressionNode) -> ExpressionNode {
        ExpressionNode::BinaryOperation {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Builds a ternary operation node from owned operands.
    pub fn ternary(
        condition: ExpressionNode,
        then_branch: ExpressionNode,
        else_branch: ExpressionNode,
    ) -> ExpressionNode {
        ExpressionNode::TernaryOperation {
            condition: Box::new(condition),
            then_branch: Box::new(then_branch),
            else_branch: Box::new(else_branch),
        }
    }

    /// Builds a unary operation node from an owned operand.
    pub fn unary(op: UnaryOperator, operand: ExpressionNode) -> ExpressionNode {
        ExpressionNode::UnaryOperation {
            op,
            operand: Box::new(operand),
        }
    }

    /// Builds a runtime call node.
    pub fn runtime_call(
        function: impl Into<String>,
        arguments: Vec<ExpressionNode>,
    ) -> ExpressionNode {
        ExpressionNode::RuntimeCall {
            function: function.into(),
            arguments,
        }
    }
}

/// A unary operator used in an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    /// Boolean negation, with truthiness coercion for non-boolean operands.
    Not,
    /// Size of a collection or string.
    Length,
    /// String-blank test.
    IsWhitespace,
}

/// A binary operator used in an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    // Logical
    And,
    Or,
    // Equality (loose, with coercion)
    Eq,
    Neq,
    // Equality (strict, no coercion)
    StrictEq,
    StrictNeq,
    // Relational
    Lt,
    Leq,
    Gt,
    Geq,
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    /// Integer division; both operands are coerced to integers.
    IDiv,
    Rem,
    /// String joining; both operands are coerced to strings.
    Concatenate,
}
