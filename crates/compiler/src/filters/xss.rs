//! Injects the escaping runtime call when a `context` option names an
//! escaping context ("html", "uri", ...).
//!
//! Runs at priority 110, after the default filters, so the escaping call
//! wraps whatever format/join produced and is outermost in generated code.

use super::{Filter, skips_rewrites};
use crate::context::ExpressionContext;
use sly_expression::runtime_names;
use sly_expression::{Expression, ExpressionNode};

pub struct XssFilter;

impl Filter for XssFilter {
    fn priority(&self) -> i32 {
        110
    }

    fn apply(&self, mut expression: Expression, context: ExpressionContext) -> Expression {
        if skips_rewrites(context) {
            return expression;
        }
        // The claim is attempted unconditionally; when the option is absent
        // this is a no-op and the expression passes through unescaped.
        match expression.claim_option("context") {
            Some(escaping_context) => expression.map_root(|root| {
                ExpressionNode::runtime_call(runtime_names::XSS, vec![root, escaping_context])
            }),
            None => expression,
        }
    }
}
