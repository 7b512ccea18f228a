//! Rewrites the `join` option into a `join(root, separator)` runtime call.

use super::{Filter, skips_rewrites};
use crate::context::ExpressionContext;
use sly_expression::runtime_names;
use sly_expression::{Expression, ExpressionNode};

pub struct JoinFilter;

impl Filter for JoinFilter {
    fn apply(&self, mut expression: Expression, context: ExpressionContext) -> Expression {
        if skips_rewrites(context) {
            return expression;
        }
        let Some(separator) = expression.claim_option("join") else {
            return expression;
        };
        expression.map_root(|root| {
            ExpressionNode::runtime_call(runtime_names::JOIN, vec![root, separator])
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sly_expression::parse_interpolation;

    #[test]
    fn wraps_root_and_consumes_option() {
        let expression = parse_interpolation("${tags @ join=', '}").unwrap();
        let result = JoinFilter.apply(expression, ExpressionContext::Text);

        assert!(!result.contains_option("join"));
        assert_eq!(
            result.root(),
            &ExpressionNode::runtime_call(
                "join",
                vec![
                    ExpressionNode::identifier("tags"),
                    ExpressionNode::StringConstant(", ".into()),
                ]
            )
        );
    }

    #[test]
    fn untouched_in_call_context() {
        let expression = parse_interpolation("${tags @ join=', '}").unwrap();
        let result = JoinFilter.apply(expression.clone(), ExpressionContext::PluginCall);
        assert_eq!(result, expression);
    }
}
