//! Integration layer over the sly compiler crates.
//!
//! Ties the pipeline together: parse an interpolation expression, run the
//! filter pipeline, dispatch block plugins into the command stream, and
//! lower expressions to target source text. The member crates stay usable
//! on their own; this crate is the convenient front door.

pub use sly_codegen as codegen;
pub use sly_compiler as compiler;
pub use sly_expression as expression;

pub use sly_compiler::{
    BlockCompiler, Command, CompilerError, ExpressionContext, FilterPipeline, PluginCallInfo,
    PluginRegistry, PushStream, Warning,
};
pub use sly_expression::{Expression, ExpressionNode, parse_interpolation};

/// The result of compiling one interpolation expression: the filtered
/// expression, the generated target source and any diagnostics raised.
#[derive(Debug)]
pub struct CompiledExpression {
    pub expression: Expression,
    pub source: String,
    pub warnings: Vec<Warning>,
}

/// Parses an interpolation, applies the built-in filter pipeline for the
/// given context and lowers the result to target source.
pub fn compile_expression(
    source: &str,
    context: ExpressionContext,
) -> Result<CompiledExpression, CompilerError> {
    let expression = parse_interpolation(source)?;
    let mut stream = PushStream::new();
    let filtered = FilterPipeline::with_builtins().transform(expression, context, &mut stream);
    let generated = sly_codegen::generate(filtered.root());
    log::debug!("compiled '{}' into '{}'", source, generated);
    Ok(CompiledExpression {
        expression: filtered,
        source: generated,
        warnings: stream.warnings().to_vec(),
    })
}
