//! The intermediate command stream emitted by the compiler front end.
//!
//! Commands describe control flow around a markup element as a flat,
//! ordered sequence of start/end markers. An external code emitter
//! serializes the stream to target source text.

use sly_expression::ExpressionNode;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Opens a scoped variable binding; closed by the matching
    /// `VariableBindingEnd`.
    VariableBindingStart {
        name: String,
        value: ExpressionNode,
    },
    VariableBindingEnd,
    /// Binds a variable in the global scope of the compilation unit.
    GlobalBinding {
        name: String,
        value: ExpressionNode,
    },
    /// Everything up to the matching `ConditionalEnd` runs only when the
    /// named variable's truthiness equals `expected`.
    ConditionalStart {
        variable: String,
        expected: bool,
    },
    ConditionalEnd,
    /// Iterates the bound list, exposing the item and its 0-based index.
    LoopStart {
        list_variable: String,
        item_variable: String,
        index_variable: String,
    },
    LoopEnd,
    /// Opens a named, reusable procedure body with declared parameters.
    ProcedureStart {
        name: String,
        parameters: Vec<String>,
    },
    ProcedureEnd,
    /// Invokes a procedure held in `template_variable` with the argument
    /// map held in `arguments_variable`.
    ProcedureCall {
        template_variable: String,
        arguments_variable: String,
    },
    /// Writes the value of a bound variable to the output.
    OutputVariable {
        name: String,
    },
    /// Writes literal markup text to the output.
    OutText {
        text: String,
    },
    /// Commands inside an ignore section are consumed, not emitted.
    StreamIgnoreStart,
    StreamIgnoreEnd,
}
