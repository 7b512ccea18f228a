//! Rewrites the URI manipulation options (`scheme`, `domain`, `path`,
//! `addSelectors`, `query`, ...) into a `uriManipulation(root, options)`
//! runtime call carrying the claimed options as a map.

use super::{Filter, skips_rewrites};
use crate::context::ExpressionContext;
use sly_expression::runtime_names;
use sly_expression::{Expression, ExpressionNode};
use std::collections::BTreeMap;

/// Option names understood by the runtime's URI builder.
const URI_OPTIONS: &[&str] = &[
    "scheme",
    "domain",
    "path",
    "appendPath",
    "prependPath",
    "selectors",
    "addSelectors",
    "removeSelectors",
    "extension",
    "suffix",
    "prependSuffix",
    "appendSuffix",
    "fragment",
    "query",
    "addQuery",
    "removeQuery",
];

pub struct UriManipulationFilter;

impl Filter for UriManipulationFilter {
    fn apply(&self, mut expression: Expression, context: ExpressionContext) -> Expression {
        if skips_rewrites(context) {
            return expression;
        }
        let mut uri_options = BTreeMap::new();
        for name in URI_OPTIONS {
            if let Some(value) = expression.claim_option(name) {
                uri_options.insert((*name).to_string(), value);
            }
        }
        if uri_options.is_empty() {
            return expression;
        }
        expression.map_root(|root| {
            ExpressionNode::runtime_call(
                runtime_names::URI_MANIPULATION,
                vec![root, ExpressionNode::MapLiteral(uri_options)],
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sly_expression::parse_interpolation;

    #[test]
    fn claims_every_uri_option_into_one_map() {
        let expression =
            parse_interpolation("${page.path @ extension='html', addSelectors='print', fragment='top'}")
                .unwrap();
        let result = UriManipulationFilter.apply(expression, ExpressionContext::Attribute);

        assert!(!result.contains_option("extension"));
        assert!(!result.contains_option("addSelectors"));
        assert!(!result.contains_option("fragment"));

        let ExpressionNode::RuntimeCall { function, arguments } = result.root() else {
            panic!("expected runtime call");
        };
        assert_eq!(function, "uriManipulation");
        assert_eq!(arguments[0], ExpressionNode::identifier("page.path"));
        let ExpressionNode::MapLiteral(options) = &arguments[1] else {
            panic!("expected options map");
        };
        assert_eq!(options.len(), 3);
        assert_eq!(
            options.get("extension"),
            Some(&ExpressionNode::StringConstant("html".into()))
        );
    }

    #[test]
    fn unrelated_options_stay_behind() {
        let expression =
            parse_interpolation("${link @ path='/content', i18n}").unwrap();
        let result = UriManipulationFilter.apply(expression, ExpressionContext::Attribute);

        assert!(result.root().is_runtime_call());
        assert!(result.contains_option("i18n"));
    }

    #[test]
    fn untouched_without_uri_options() {
        let expression = parse_interpolation("${link @ format='%s'}").unwrap();
        let result = UriManipulationFilter.apply(expression.clone(), ExpressionContext::Text);
        assert_eq!(result, expression);
    }

    #[test]
    fn untouched_in_block_definition_contexts() {
        for context in [
            ExpressionContext::PluginUse,
            ExpressionContext::PluginTemplate,
            ExpressionContext::PluginCall,
        ] {
            let expression = parse_interpolation("${link @ path='/content'}").unwrap();
            let result = UriManipulationFilter.apply(expression.clone(), context);
            assert_eq!(result, expression, "context {:?}", context);
        }
    }
}
