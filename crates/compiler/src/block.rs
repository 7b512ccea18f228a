//! Drives a block's plugin through its lifecycle while the surrounding
//! markup and children are traversed.

use crate::context::{CompilerContext, ExpressionContext};
use crate::error::CompilerError;
use crate::filters::FilterPipeline;
use crate::plugins::{PluginCallInfo, PluginRegistry};
use crate::push_stream::PushStream;
use sly_expression::Expression;

/// Compiles template blocks into the command stream. One instance per
/// compilation unit; never shared across threads.
pub struct BlockCompiler {
    registry: PluginRegistry,
    filters: FilterPipeline,
    context: CompilerContext,
    stream: PushStream,
}

impl BlockCompiler {
    pub fn new(registry: PluginRegistry, filters: FilterPipeline) -> Self {
        BlockCompiler {
            registry,
            filters,
            context: CompilerContext::new(),
            stream: PushStream::new(),
        }
    }

    /// The built-in plugin set and filter pipeline.
    pub fn with_builtins() -> Self {
        BlockCompiler::new(PluginRegistry::with_builtins(), FilterPipeline::with_builtins())
    }

    pub fn stream(&self) -> &PushStream {
        &self.stream
    }

    pub fn into_stream(self) -> PushStream {
        self.stream
    }

    /// Compiles one block: resolves the plugin by block name, runs the
    /// expression through the filter pipeline in the plugin's context, then
    /// fires the lifecycle hooks around the `children` callback.
    pub fn compile_block(
        &mut self,
        tag_name: &str,
        call_info: &PluginCallInfo,
        expression: Expression,
        children: impl FnOnce(&mut BlockCompiler) -> Result<(), CompilerError>,
    ) -> Result<(), CompilerError> {
        let plugin = self
            .registry
            .lookup(&call_info.name)
            .ok_or_else(|| CompilerError::UnknownPlugin(call_info.name.clone()))?;

        let expression = match ExpressionContext::for_plugin(&call_info.name) {
            Some(context) => self.filters.transform(expression, context, &mut self.stream),
            None => expression,
        };
        let mut invoke = plugin.invoke(expression, call_info, &mut self.context)?;

        invoke.before_tag_open(&mut self.stream);
        invoke.after_tag_open(&mut self.stream);
        invoke.before_element(&mut self.stream, tag_name);
        invoke.before_children(&mut self.stream);
        children(self)?;
        invoke.after_children(&mut self.stream);
        invoke.after_element(&mut self.stream);
        invoke.before_tag_close(&mut self.stream, false);
        invoke.after_tag_close(&mut self.stream, false);
        Ok(())
    }

    /// Compiles an expression occurring in rendered output: applies the
    /// filter pipeline, binds the result and emits an output command.
    pub fn output_expression(&mut self, expression: Expression, context: ExpressionContext) {
        let filtered = self.filters.transform(expression, context, &mut self.stream);
        let variable = self.context.generate_variable("out");
        self.stream.write(crate::commands::Command::VariableBindingStart {
            name: variable.clone(),
            value: filtered.root().clone(),
        });
        self.stream
            .write(crate::commands::Command::OutputVariable { name: variable });
        self.stream.write(crate::commands::Command::VariableBindingEnd);
    }

    /// Emits literal markup text.
    pub fn output_text(&mut self, text: &str) {
        self.stream.write(crate::commands::Command::OutText {
            text: text.to_string(),
        });
    }
}
