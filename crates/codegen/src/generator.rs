//! Lowers expression trees to target (Java-flavored) source text.
//!
//! Every operator picks between a typed fast path and a generic
//! runtime-dispatch path based on the statically inferred operand types.
//! The runtime helpers referenced here (`runtime.eq`, `runtime.lt`, ...)
//! come from the fixed symbol set in [`sly_expression::runtime_names`].

use crate::types::{Type, TypedNode};
use sly_expression::runtime_names as names;
use sly_expression::{BinaryOperator, ExpressionNode, Number, UnaryOperator};

/// Generates target source for an expression tree.
pub fn generate(node: &ExpressionNode) -> String {
    match node {
        ExpressionNode::Identifier(name) => name.clone(),
        ExpressionNode::StringConstant(s) => quote(s),
        ExpressionNode::NumericConstant(Number::Long(n)) => n.to_string(),
        ExpressionNode::NumericConstant(Number::Double(d)) => format!("{:?}", d),
        ExpressionNode::BooleanConstant(b) => b.to_string(),
        ExpressionNode::NullLiteral => "null".to_string(),
        ExpressionNode::UnaryOperation { op, operand } => {
            generate_unary(*op, TypedNode::new(operand))
        }
        ExpressionNode::BinaryOperation { op, left, right } => {
            generate_binary(*op, TypedNode::new(left), TypedNode::new(right))
        }
        ExpressionNode::TernaryOperation {
            condition,
            then_branch,
            else_branch,
        } => {
            let cond = TypedNode::new(condition);
            format!(
                "({} ? {} : {})",
                coerce_bool(&generate(condition), cond.ty),
                generate(then_branch),
                generate(else_branch)
            )
        }
        ExpressionNode::MapLiteral(entries) => {
            let mut args = Vec::with_capacity(entries.len() * 2);
            for (key, value) in entries {
                args.push(quote(key));
                args.push(generate(value));
            }
            format!("runtime.{}({})", names::MAP, args.join(", "))
        }
        ExpressionNode::ArrayLiteral(items) => {
            let args: Vec<String> = items.iter().map(generate).collect();
            format!("runtime.{}({})", names::LIST, args.join(", "))
        }
        ExpressionNode::RuntimeCall { function, arguments } => {
            let mut args = vec![quote(function)];
            args.extend(arguments.iter().map(generate));
            format!("runtime.{}({})", names::CALL, args.join(", "))
        }
    }
}

fn generate_unary(op: UnaryOperator, operand: TypedNode<'_>) -> String {
    let code = generate(operand.node);
    match op {
        UnaryOperator::Not => {
            if operand.ty == Type::Boolean {
                format!("!({})", code)
            } else {
                format!("!{}", coerce_bool(&code, operand.ty))
            }
        }
        UnaryOperator::Length => format!("runtime.{}({})", names::LENGTH, code),
        UnaryOperator::IsWhitespace => format!("runtime.{}({})", names::IS_WHITESPACE, code),
    }
}

fn generate_binary(op: BinaryOperator, left: TypedNode<'_>, right: TypedNode<'_>) -> String {
    use BinaryOperator::*;
    let l = generate(left.node);
    let r = generate(right.node);
    match op {
        // Logical operators on non-boolean operands evaluate to an operand
        // value, not a boolean.
        And => {
            if left.ty == Type::Boolean && right.ty == Type::Boolean {
                format!("({} && {})", l, r)
            } else {
                format!("({} ? {} : {})", coerce_bool(&l, left.ty), r, l)
            }
        }
        Or => {
            if left.ty == Type::Boolean && right.ty == Type::Boolean {
                format!("({} || {})", l, r)
            } else {
                format!("({} ? {} : {})", coerce_bool(&l, left.ty), l, r)
            }
        }
        Add => numeric_op("+", left, right, l, r),
        Sub => numeric_op("-", left, right, l, r),
        Mul => numeric_op("*", left, right, l, r),
        Div => numeric_op("/", left, right, l, r),
        IDiv => format!(
            "({} / {})",
            coerce_long(&l, left.ty),
            coerce_long(&r, right.ty)
        ),
        Rem => format!(
            "({} % {})",
            coerce_long(&l, left.ty),
            coerce_long(&r, right.ty)
        ),
        // Equality always goes through the runtime helpers; loose equality
        // coerces, strict does not.
        Eq => format!("runtime.{}({}, {})", names::EQ, l, r),
        Neq => format!("!runtime.{}({}, {})", names::EQ, l, r),
        StrictEq => format!("runtime.{}({}, {})", names::STRICT_EQ, l, r),
        StrictNeq => format!("!runtime.{}({}, {})", names::STRICT_EQ, l, r),
        Lt => comparison("<", names::LT, false, left, right, l, r),
        Leq => comparison("<=", names::LEQ, false, left, right, l, r),
        // No dedicated greater-than helpers: GT is the negation of LEQ and
        // GEQ the negation of LT.
        Gt => comparison(">", names::LEQ, true, left, right, l, r),
        Geq => comparison(">=", names::LT, true, left, right, l, r),
        Concatenate => format!(
            "({} + {})",
            coerce_str(&l, left.ty),
            coerce_str(&r, right.ty)
        ),
    }
}

fn numeric_op(op: &str, left: TypedNode<'_>, right: TypedNode<'_>, l: String, r: String) -> String {
    if left.ty == Type::Long && right.ty == Type::Long {
        format!("({} {} {})", l, op, r)
    } else {
        format!(
            "({} {} {})",
            coerce_double(&l, left.ty),
            op,
            coerce_double(&r, right.ty)
        )
    }
}

fn comparison(
    native_op: &str,
    helper: &str,
    negated: bool,
    left: TypedNode<'_>,
    right: TypedNode<'_>,
    l: String,
    r: String,
) -> String {
    if left.ty.is_numeric() && right.ty.is_numeric() {
        format!("({} {} {})", l, native_op, r)
    } else if negated {
        format!("!runtime.{}({}, {})", helper, l, r)
    } else {
        format!("runtime.{}({}, {})", helper, l, r)
    }
}

fn coerce_bool(code: &str, ty: Type) -> String {
    match ty {
        Type::Boolean => code.to_string(),
        _ => format!("runtime.{}({})", names::TO_BOOLEAN, code),
    }
}

fn coerce_double(code: &str, ty: Type) -> String {
    match ty {
        Type::Long | Type::Double => format!("(double) {}", code),
        _ => format!("runtime.{}({})", names::TO_NUMBER, code),
    }
}

fn coerce_long(code: &str, ty: Type) -> String {
    match ty {
        Type::Long => code.to_string(),
        Type::Double => format!("(long) {}", code),
        _ => format!("runtime.{}({})", names::TO_LONG, code),
    }
}

fn coerce_str(code: &str, ty: Type) -> String {
    match ty {
        Type::Str => code.to_string(),
        _ => format!("runtime.{}({})", names::TO_STRING, code),
    }
}

fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Generates code for an already-typed operand pair; exposed so callers
/// holding a [`TypedNode`] can lower a single operator application.
pub fn generate_operator(op: BinaryOperator, left: TypedNode<'_>, right: TypedNode<'_>) -> String {
    generate_binary(op, left, right)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::infer;
    use sly_expression::ExpressionNode as N;

    fn double(d: f64) -> N {
        N::NumericConstant(Number::Double(d))
    }

    #[test]
    fn long_arithmetic_takes_the_integer_path() {
        let node = N::binary(BinaryOperator::Add, N::long(1), N::long(2));
        assert_eq!(generate(&node), "(1 + 2)");
    }

    #[test]
    fn mixed_arithmetic_coerces_both_operands_to_double() {
        let node = N::binary(BinaryOperator::Add, N::long(1), double(2.5));
        assert_eq!(generate(&node), "((double) 1 + (double) 2.5)");
    }

    #[test]
    fn non_numeric_arithmetic_goes_through_the_runtime() {
        let node = N::binary(BinaryOperator::Mul, N::identifier("a"), N::long(2));
        assert_eq!(generate(&node), "(runtime.toNumber(a) * (double) 2)");
    }

    #[test]
    fn integer_division_coerces_to_long() {
        let node = N::binary(BinaryOperator::IDiv, double(7.0), N::long(2));
        assert_eq!(generate(&node), "((long) 7.0 / 2)");
    }

    #[test]
    fn boolean_logical_fast_path() {
        let node = N::binary(
            BinaryOperator::And,
            N::BooleanConstant(true),
            N::BooleanConstant(false),
        );
        assert_eq!(generate(&node), "(true && false)");
    }

    #[test]
    fn generic_logical_ops_return_an_operand_value() {
        let and = N::binary(BinaryOperator::And, N::identifier("a"), N::identifier("b"));
        assert_eq!(generate(&and), "(runtime.toBoolean(a) ? b : a)");

        let or = N::binary(BinaryOperator::Or, N::identifier("a"), N::identifier("b"));
        assert_eq!(generate(&or), "(runtime.toBoolean(a) ? a : b)");
    }

    #[test]
    fn ternary_lowers_to_a_conditional_expression() {
        let generic = N::ternary(
            N::identifier("visible"),
            N::identifier("title"),
            N::identifier("fallback"),
        );
        assert_eq!(
            generate(&generic),
            "(runtime.toBoolean(visible) ? title : fallback)"
        );

        let boolean_cond = N::ternary(
            N::binary(BinaryOperator::Lt, N::long(1), N::long(2)),
            N::StringConstant("a".into()),
            N::StringConstant("b".into()),
        );
        assert_eq!(generate(&boolean_cond), "((1 < 2) ? \"a\" : \"b\")");
    }

    #[test]
    fn equality_always_uses_runtime_helpers() {
        let eq = N::binary(BinaryOperator::Eq, N::long(1), N::long(1));
        assert_eq!(generate(&eq), "runtime.eq(1, 1)");

        let strict = N::binary(
            BinaryOperator::StrictNeq,
            N::identifier("a"),
            N::identifier("b"),
        );
        assert_eq!(generate(&strict), "!runtime.strictEq(a, b)");
    }

    #[test]
    fn greater_than_is_negated_leq() {
        let gt = N::binary(BinaryOperator::Gt, N::identifier("a"), N::identifier("b"));
        let leq = N::binary(BinaryOperator::Leq, N::identifier("a"), N::identifier("b"));
        assert_eq!(generate(&gt), format!("!{}", generate(&leq)));

        let geq = N::binary(BinaryOperator::Geq, N::identifier("a"), N::identifier("b"));
        let lt = N::binary(BinaryOperator::Lt, N::identifier("a"), N::identifier("b"));
        assert_eq!(generate(&geq), format!("!{}", generate(&lt)));
    }

    #[test]
    fn numeric_comparison_uses_native_operators() {
        let node = N::binary(BinaryOperator::Gt, N::long(2), N::long(1));
        assert_eq!(generate(&node), "(2 > 1)");
    }

    #[test]
    fn concatenation_coerces_to_string() {
        let node = N::binary(
            BinaryOperator::Concatenate,
            N::StringConstant("n=".into()),
            N::long(4),
        );
        assert_eq!(generate(&node), "(\"n=\" + runtime.toString(4))");
    }

    #[test]
    fn unary_operators() {
        let not_bool = N::unary(UnaryOperator::Not, N::BooleanConstant(true));
        assert_eq!(generate(&not_bool), "!(true)");

        let not_other = N::unary(UnaryOperator::Not, N::identifier("x"));
        assert_eq!(generate(&not_other), "!runtime.toBoolean(x)");

        let length = N::unary(UnaryOperator::Length, N::identifier("items"));
        assert_eq!(generate(&length), "runtime.length(items)");

        let blank = N::unary(UnaryOperator::IsWhitespace, N::StringConstant(" ".into()));
        assert_eq!(generate(&blank), "runtime.isWhitespace(\" \")");
    }

    #[test]
    fn runtime_call_and_literals() {
        let node = N::runtime_call(
            "format",
            vec![
                N::identifier("properties.title"),
                N::StringConstant("<b>%s</b>".into()),
            ],
        );
        assert_eq!(
            generate(&node),
            "runtime.call(\"format\", properties.title, \"<b>%s</b>\")"
        );

        let list = N::ArrayLiteral(vec![N::long(1), N::long(2)]);
        assert_eq!(generate(&list), "runtime.list(1, 2)");
    }

    #[test]
    fn unknown_operand_forces_generic_comparison() {
        let node = N::binary(BinaryOperator::Lt, N::identifier("a"), N::long(1));
        assert_eq!(generate(&node), "runtime.lt(a, 1)");
    }

    #[test]
    fn infer_round_trips_through_generate_operator() {
        let left = N::long(3);
        let right = N::long(4);
        let code = generate_operator(
            BinaryOperator::Sub,
            TypedNode::new(&left),
            TypedNode::new(&right),
        );
        assert_eq!(code, "(3 - 4)");
        assert_eq!(infer(&N::binary(BinaryOperator::Sub, left, right)), Type::Long);
    }
}
