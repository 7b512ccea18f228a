//! Rewrites the `format` option into a `format(root, pattern)` runtime call.

use super::{Filter, skips_rewrites};
use crate::context::ExpressionContext;
use sly_expression::runtime_names;
use sly_expression::{Expression, ExpressionNode};

pub struct FormatFilter;

impl Filter for FormatFilter {
    fn apply(&self, mut expression: Expression, context: ExpressionContext) -> Expression {
        if skips_rewrites(context) {
            return expression;
        }
        let Some(pattern) = expression.claim_option("format") else {
            return expression;
        };
        expression.map_root(|root| {
            ExpressionNode::runtime_call(runtime_names::FORMAT, vec![root, pattern])
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sly_expression::parse_interpolation;

    #[test]
    fn consumes_the_format_option() {
        let expression =
            parse_interpolation("${properties.title @ format='<b>%s</b>'}").unwrap();
        let result = FormatFilter.apply(expression, ExpressionContext::Element);

        assert!(!result.contains_option("format"));
        assert_eq!(
            result.root(),
            &ExpressionNode::runtime_call(
                "format",
                vec![
                    ExpressionNode::identifier("properties.title"),
                    ExpressionNode::StringConstant("<b>%s</b>".into()),
                ]
            )
        );
    }

    #[test]
    fn untouched_without_the_option() {
        let expression = parse_interpolation("${properties.title}").unwrap();
        let result = FormatFilter.apply(expression.clone(), ExpressionContext::Element);
        assert_eq!(result, expression);
    }

    #[test]
    fn untouched_in_block_definition_contexts() {
        for context in [
            ExpressionContext::PluginUse,
            ExpressionContext::PluginTemplate,
            ExpressionContext::PluginCall,
        ] {
            let expression = parse_interpolation("${x @ format='%s'}").unwrap();
            let result = FormatFilter.apply(expression.clone(), context);
            assert_eq!(result, expression, "context {:?}", context);
        }
    }
}
