//! The template block: captures its children as a named, reusable
//! procedure. The block's own tag markup is never rendered; only the inner
//! content becomes the procedure body.

use super::{Plugin, PluginCallInfo, PluginInvoke};
use crate::commands::Command;
use crate::context::CompilerContext;
use crate::error::CompilerError;
use crate::patterns;
use crate::push_stream::PushStream;
use sly_expression::Expression;

pub struct TemplatePlugin;

impl Plugin for TemplatePlugin {
    fn name(&self) -> &'static str {
        "template"
    }

    fn priority(&self) -> i32 {
        0
    }

    fn invoke(
        &self,
        mut expression: Expression,
        call_info: &PluginCallInfo,
        _ctx: &mut CompilerContext,
    ) -> Result<Box<dyn PluginInvoke>, CompilerError> {
        let [name] = call_info.arguments.as_slice() else {
            return Err(CompilerError::plugin(
                self.name(),
                "Template plugin needs the template name as its one argument",
            ));
        };
        // The named options declare the procedure's parameters.
        let parameters: Vec<String> = expression
            .options_mut()
            .drain_remaining()
            .into_iter()
            .map(|(name, _)| name)
            .collect();
        Ok(Box::new(TemplateInvoke {
            name: name.clone(),
            parameters,
        }))
    }
}

struct TemplateInvoke {
    name: String,
    parameters: Vec<String>,
}

impl PluginInvoke for TemplateInvoke {
    fn before_tag_open(&mut self, stream: &mut PushStream) {
        patterns::begin_stream_ignore(stream);
    }

    fn after_tag_open(&mut self, stream: &mut PushStream) {
        patterns::end_stream_ignore(stream);
    }

    fn before_children(&mut self, stream: &mut PushStream) {
        stream.write(Command::ProcedureStart {
            name: self.name.clone(),
            parameters: self.parameters.clone(),
        });
    }

    fn after_children(&mut self, stream: &mut PushStream) {
        stream.write(Command::ProcedureEnd);
    }

    fn before_tag_close(&mut self, stream: &mut PushStream, _self_closing: bool) {
        patterns::begin_stream_ignore(stream);
    }

    fn after_tag_close(&mut self, stream: &mut PushStream, _self_closing: bool) {
        patterns::end_stream_ignore(stream);
    }
}
