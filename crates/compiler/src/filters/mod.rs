//! The expression filter pipeline.
//!
//! Each filter is a stateless transformation that inspects an expression
//! plus its context and either returns it unchanged or rewrites it, usually
//! by claiming one of its options and wrapping the root in a runtime call.
//! Filters are total functions: they never fail, they just decline.

pub mod date_format;
pub mod format;
pub mod join;
pub mod uri_manipulation;
pub mod xss;

use crate::context::ExpressionContext;
use crate::push_stream::PushStream;
use sly_expression::Expression;

pub use date_format::DateFormatFilter;
pub use format::FormatFilter;
pub use join::JoinFilter;
pub use uri_manipulation::UriManipulationFilter;
pub use xss::XssFilter;

/// Priority of filters with no ordering requirement of their own.
pub const DEFAULT_PRIORITY: i32 = 100;

pub trait Filter: Send + Sync {
    /// Lower priorities are applied first.
    fn priority(&self) -> i32 {
        DEFAULT_PRIORITY
    }

    /// Applies the filter. Must be a pure function of its inputs and must
    /// return the expression unchanged when its target options are absent.
    fn apply(&self, expression: Expression, context: ExpressionContext) -> Expression;
}

/// Expressions in these contexts feed block definitions and invocations,
/// never rendered output, so the rewriting filters leave them alone.
pub(crate) fn skips_rewrites(context: ExpressionContext) -> bool {
    matches!(
        context,
        ExpressionContext::PluginUse
            | ExpressionContext::PluginTemplate
            | ExpressionContext::PluginCall
    )
}

/// An ordered chain of filters, applied in ascending priority order.
pub struct FilterPipeline {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterPipeline {
    /// Builds a pipeline from the given filters, sorting them by priority.
    /// The sort is stable, so equal priorities keep registration order.
    pub fn new(mut filters: Vec<Box<dyn Filter>>) -> Self {
        filters.sort_by_key(|f| f.priority());
        FilterPipeline { filters }
    }

    /// The built-in pipeline: dateFormat (90), format (100), join (100),
    /// uriManipulation (100), xss (110).
    pub fn with_builtins() -> Self {
        FilterPipeline::new(vec![
            Box::new(FormatFilter),
            Box::new(JoinFilter),
            Box::new(UriManipulationFilter),
            Box::new(DateFormatFilter),
            Box::new(XssFilter),
        ])
    }

    /// Applies every filter exactly once, threading the expression through.
    pub fn apply(&self, expression: Expression, context: ExpressionContext) -> Expression {
        self.filters
            .iter()
            .fold(expression, |expr, filter| filter.apply(expr, context))
    }

    /// Applies the pipeline and reports any option that survived it.
    /// Leftover options in rendered-output positions mean the author wrote
    /// an option nothing understands; that is a diagnostic, not a silent
    /// acceptance.
    pub fn transform(
        &self,
        expression: Expression,
        context: ExpressionContext,
        stream: &mut PushStream,
    ) -> Expression {
        let filtered = self.apply(expression, context);
        if !skips_rewrites(context) {
            for name in filtered.options().remaining_names() {
                stream.warn(
                    format!("Unknown option '{}' ignored", name),
                    format!("{:?} context", context),
                );
            }
        }
        filtered
    }
}
