//! Structural, local-only type inference over expression nodes.
//!
//! A node's type is computed from its operands alone, with no whole-program
//! analysis. `Unknown` propagates and forces the generic runtime path in the
//! generator; correctness over optimality.

use sly_expression::{BinaryOperator, ExpressionNode, Number, UnaryOperator};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Type {
    Long,
    Double,
    Boolean,
    Str,
    Unknown,
}

impl Type {
    pub fn is_numeric(self) -> bool {
        matches!(self, Type::Long | Type::Double)
    }
}

/// Infers the static type of a node.
pub fn infer(node: &ExpressionNode) -> Type {
    match node {
        ExpressionNode::NumericConstant(Number::Long(_)) => Type::Long,
        ExpressionNode::NumericConstant(Number::Double(_)) => Type::Double,
        ExpressionNode::StringConstant(_) => Type::Str,
        ExpressionNode::BooleanConstant(_) => Type::Boolean,
        ExpressionNode::UnaryOperation { op, .. } => match op {
            UnaryOperator::Not | UnaryOperator::IsWhitespace => Type::Boolean,
            UnaryOperator::Length => Type::Long,
        },
        ExpressionNode::BinaryOperation { op, left, right } => {
            infer_binary(*op, infer(left), infer(right))
        }
        // A conditional evaluates to one of its branches, so the result
        // type is only known when both branches agree.
        ExpressionNode::TernaryOperation {
            then_branch,
            else_branch,
            ..
        } => {
            let then_ty = infer(then_branch);
            if then_ty == infer(else_branch) {
                then_ty
            } else {
                Type::Unknown
            }
        }
        // Identifiers, runtime calls, literals of structured values and
        // null all resolve at runtime.
        ExpressionNode::Identifier(_)
        | ExpressionNode::NullLiteral
        | ExpressionNode::MapLiteral(_)
        | ExpressionNode::ArrayLiteral(_)
        | ExpressionNode::RuntimeCall { .. } => Type::Unknown,
    }
}

fn infer_binary(op: BinaryOperator, left: Type, right: Type) -> Type {
    use BinaryOperator::*;
    match op {
        // Logical operators evaluate to one of their operands, so the
        // result type is only known when both sides agree.
        And | Or => {
            if left == right {
                left
            } else {
                Type::Unknown
            }
        }
        Add | Sub | Mul | Div => {
            if left == Type::Long && right == Type::Long {
                Type::Long
            } else {
                Type::Double
            }
        }
        IDiv | Rem => Type::Long,
        Eq | Neq | StrictEq | StrictNeq | Lt | Leq | Gt | Geq => Type::Boolean,
        Concatenate => Type::Str,
    }
}

/// An expression node paired with its inferred type; used only during code
/// generation.
#[derive(Debug, Clone, Copy)]
pub struct TypedNode<'a> {
    pub node: &'a ExpressionNode,
    pub ty: Type,
}

impl<'a> TypedNode<'a> {
    pub fn new(node: &'a ExpressionNode) -> Self {
        TypedNode {
            node,
            ty: infer(node),
        }
    }
}
