//! The call block: invokes a named template procedure with an argument map.
//! A call block never renders its own children; they are consumed inside a
//! stream-ignore region.

use super::{Plugin, PluginCallInfo, PluginInvoke};
use crate::commands::Command;
use crate::context::CompilerContext;
use crate::error::CompilerError;
use crate::patterns;
use crate::push_stream::PushStream;
use sly_expression::{Expression, ExpressionNode};
use std::collections::BTreeMap;

pub struct CallPlugin;

impl Plugin for CallPlugin {
    fn name(&self) -> &'static str {
        "call"
    }

    fn priority(&self) -> i32 {
        3
    }

    fn invoke(
        &self,
        mut expression: Expression,
        call_info: &PluginCallInfo,
        ctx: &mut CompilerContext,
    ) -> Result<Box<dyn PluginInvoke>, CompilerError> {
        if !call_info.arguments.is_empty() {
            return Err(CompilerError::plugin(
                self.name(),
                "Call plugin should have no arguments",
            ));
        }
        let arguments: BTreeMap<String, ExpressionNode> =
            expression.options_mut().drain_remaining().into_iter().collect();
        Ok(Box::new(CallInvoke {
            template_variable: ctx.generate_variable("templateVar"),
            arguments_variable: ctx.generate_variable("templateOptions"),
            template: expression.root().clone(),
            arguments: ExpressionNode::MapLiteral(arguments),
        }))
    }
}

struct CallInvoke {
    template_variable: String,
    arguments_variable: String,
    template: ExpressionNode,
    arguments: ExpressionNode,
}

impl PluginInvoke for CallInvoke {
    fn before_children(&mut self, stream: &mut PushStream) {
        stream.write(Command::VariableBindingStart {
            name: self.template_variable.clone(),
            value: self.template.clone(),
        });
        stream.write(Command::VariableBindingStart {
            name: self.arguments_variable.clone(),
            value: self.arguments.clone(),
        });
        stream.write(Command::ProcedureCall {
            template_variable: self.template_variable.clone(),
            arguments_variable: self.arguments_variable.clone(),
        });
        stream.write(Command::VariableBindingEnd);
        stream.write(Command::VariableBindingEnd);
        patterns::begin_stream_ignore(stream);
    }

    fn after_children(&mut self, stream: &mut PushStream) {
        patterns::end_stream_ignore(stream);
    }
}
