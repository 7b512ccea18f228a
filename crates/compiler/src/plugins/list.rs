//! The list block: repeats its element's children for every item of a
//! collection, guarded by a non-empty check, with a per-iteration status
//! object alongside the item variable.

use super::{Plugin, PluginCallInfo, PluginInvoke};
use crate::commands::Command;
use crate::context::CompilerContext;
use crate::error::CompilerError;
use crate::push_stream::PushStream;
use sly_expression::{BinaryOperator, Expression, ExpressionNode, UnaryOperator};
use std::collections::BTreeMap;

const DEFAULT_ITEM_VARIABLE: &str = "item";

pub struct ListPlugin;

impl Plugin for ListPlugin {
    fn name(&self) -> &'static str {
        "list"
    }

    fn priority(&self) -> i32 {
        130
    }

    fn invoke(
        &self,
        expression: Expression,
        call_info: &PluginCallInfo,
        ctx: &mut CompilerContext,
    ) -> Result<Box<dyn PluginInvoke>, CompilerError> {
        Ok(Box::new(ListInvoke::new(&expression, call_info, ctx)))
    }
}

struct ListInvoke {
    list_variable: String,
    size_variable: String,
    index_variable: String,
    item_variable: String,
    status_variable: String,
    collection: ExpressionNode,
}

impl ListInvoke {
    fn new(expression: &Expression, call_info: &PluginCallInfo, ctx: &mut CompilerContext) -> Self {
        let item_variable = call_info
            .arguments
            .first()
            .cloned()
            .unwrap_or_else(|| DEFAULT_ITEM_VARIABLE.to_string());
        ListInvoke {
            list_variable: ctx.generate_variable("collection"),
            size_variable: ctx.generate_variable("collectionSize"),
            index_variable: ctx.generate_variable(&format!("{}_index", item_variable)),
            status_variable: format!("{}List", item_variable),
            item_variable,
            collection: expression.root().clone(),
        }
    }

    /// The per-iteration status object: index, count, first/middle/last
    /// position flags and the odd/even flags.
    fn status_map(&self) -> ExpressionNode {
        let index = || ExpressionNode::identifier(&self.index_variable);
        let size = || ExpressionNode::identifier(&self.size_variable);

        let first = ExpressionNode::binary(BinaryOperator::Eq, index(), ExpressionNode::long(0));
        let last = ExpressionNode::binary(
            BinaryOperator::Eq,
            index(),
            ExpressionNode::binary(BinaryOperator::Sub, size(), ExpressionNode::long(1)),
        );

        let mut fields = BTreeMap::new();
        fields.insert("index".to_string(), index());
        fields.insert(
            "count".to_string(),
            ExpressionNode::binary(BinaryOperator::Add, index(), ExpressionNode::long(1)),
        );
        fields.insert("first".to_string(), first.clone());
        fields.insert("last".to_string(), last.clone());
        fields.insert(
            "middle".to_string(),
            ExpressionNode::unary(
                UnaryOperator::Not,
                ExpressionNode::binary(BinaryOperator::Or, first, last),
            ),
        );
        // The odd/even labels follow the 1-based iteration count: count 1
        // sits at index 0 and is odd. Do not swap these.
        fields.insert(
            "odd".to_string(),
            ExpressionNode::binary(
                BinaryOperator::Eq,
                ExpressionNode::binary(BinaryOperator::Rem, index(), ExpressionNode::long(2)),
                ExpressionNode::long(0),
            ),
        );
        fields.insert(
            "even".to_string(),
            ExpressionNode::binary(
                BinaryOperator::Eq,
                ExpressionNode::binary(BinaryOperator::Rem, index(), ExpressionNode::long(2)),
                ExpressionNode::long(1),
            ),
        );
        ExpressionNode::MapLiteral(fields)
    }
}

impl PluginInvoke for ListInvoke {
    fn before_tag_open(&mut self, stream: &mut PushStream) {
        stream.write(Command::VariableBindingStart {
            name: self.list_variable.clone(),
            value: self.collection.clone(),
        });
        stream.write(Command::VariableBindingStart {
            name: self.size_variable.clone(),
            value: ExpressionNode::unary(
                UnaryOperator::Length,
                ExpressionNode::identifier(&self.list_variable),
            ),
        });
        // The whole block, tag markup included, renders only for a
        // non-empty collection.
        stream.write(Command::ConditionalStart {
            variable: self.size_variable.clone(),
            expected: true,
        });
    }

    fn before_children(&mut self, stream: &mut PushStream) {
        stream.write(Command::LoopStart {
            list_variable: self.list_variable.clone(),
            item_variable: self.item_variable.clone(),
            index_variable: self.index_variable.clone(),
        });
        stream.write(Command::VariableBindingStart {
            name: self.status_variable.clone(),
            value: self.status_map(),
        });
    }

    fn after_children(&mut self, stream: &mut PushStream) {
        stream.write(Command::VariableBindingEnd);
        stream.write(Command::LoopEnd);
    }

    fn after_tag_close(&mut self, stream: &mut PushStream, _self_closing: bool) {
        stream.write(Command::ConditionalEnd);
        stream.write(Command::VariableBindingEnd);
        stream.write(Command::VariableBindingEnd);
    }
}
