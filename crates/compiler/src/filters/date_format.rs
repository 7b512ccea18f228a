//! Rewrites the `dateFormat` option (and its companion `locale`) into a
//! `dateFormat(root, {dateFormat, locale})` runtime call.
//!
//! Runs at priority 90, ahead of the default filters, so a formatted date
//! is what `join`/`format` and the escaping filter subsequently see.

use super::Filter;
use super::skips_rewrites;
use crate::context::ExpressionContext;
use sly_expression::runtime_names;
use sly_expression::{Expression, ExpressionNode};
use std::collections::BTreeMap;

pub struct DateFormatFilter;

impl Filter for DateFormatFilter {
    fn priority(&self) -> i32 {
        90
    }

    fn apply(&self, mut expression: Expression, context: ExpressionContext) -> Expression {
        if skips_rewrites(context) {
            return expression;
        }
        // A bare `dateFormat` flag carries no pattern to format with; the
        // filter declines and leaves the option for the leftover diagnostic.
        if matches!(expression.option("dateFormat"), Some(ExpressionNode::NullLiteral)) {
            return expression;
        }
        let Some(pattern) = expression.claim_option("dateFormat") else {
            return expression;
        };
        // The locale travels with the pattern and is claimed together
        // with it, whether or not it was given.
        let locale = expression.claim_option("locale");

        let mut settings = BTreeMap::new();
        settings.insert("dateFormat".to_string(), pattern);
        if let Some(locale) = locale {
            settings.insert("locale".to_string(), locale);
        }
        expression.map_root(|root| {
            ExpressionNode::runtime_call(
                runtime_names::DATE_FORMAT,
                vec![root, ExpressionNode::MapLiteral(settings)],
            )
        })
    }
}
