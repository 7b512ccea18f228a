//! The use block: initializes a helper object and binds it to a global
//! variable for the rest of the compilation unit.

use super::{Plugin, PluginCallInfo, PluginInvoke};
use crate::commands::Command;
use crate::context::CompilerContext;
use crate::error::CompilerError;
use crate::push_stream::PushStream;
use sly_expression::runtime_names;
use sly_expression::{Expression, ExpressionNode};
use std::collections::BTreeMap;

const DEFAULT_BEAN_VARIABLE: &str = "useBean";

pub struct UsePlugin;

impl Plugin for UsePlugin {
    fn name(&self) -> &'static str {
        "use"
    }

    fn priority(&self) -> i32 {
        1
    }

    fn invoke(
        &self,
        mut expression: Expression,
        call_info: &PluginCallInfo,
        _ctx: &mut CompilerContext,
    ) -> Result<Box<dyn PluginInvoke>, CompilerError> {
        let bean_name = call_info
            .arguments
            .first()
            .cloned()
            .unwrap_or_else(|| DEFAULT_BEAN_VARIABLE.to_string());
        // The remaining named options become the initialization arguments.
        let arguments: BTreeMap<String, ExpressionNode> =
            expression.options_mut().drain_remaining().into_iter().collect();
        let value = ExpressionNode::runtime_call(
            runtime_names::USE,
            vec![
                expression.root().clone(),
                ExpressionNode::MapLiteral(arguments),
            ],
        );
        Ok(Box::new(UseInvoke { bean_name, value }))
    }
}

struct UseInvoke {
    bean_name: String,
    value: ExpressionNode,
}

impl PluginInvoke for UseInvoke {
    fn before_element(&mut self, stream: &mut PushStream, _tag_name: &str) {
        stream.write(Command::GlobalBinding {
            name: self.bean_name.clone(),
            value: self.value.clone(),
        });
    }
}
