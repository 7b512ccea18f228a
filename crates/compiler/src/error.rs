use thiserror::Error;

#[derive(Error, Debug)]
pub enum CompilerError {
    /// A template-authoring error: the block was used with wrong or
    /// missing arguments. Carries the offending plugin's name.
    #[error("Plugin '{plugin}': {message}")]
    Plugin { plugin: String, message: String },

    #[error("No plugin registered for block name '{0}'")]
    UnknownPlugin(String),

    #[error("A plugin is already registered for block name '{0}'")]
    DuplicatePlugin(String),

    #[error(transparent)]
    Expression(#[from] sly_expression::ExpressionError),
}

impl CompilerError {
    pub fn plugin(plugin: &str, message: impl Into<String>) -> Self {
        CompilerError::Plugin {
            plugin: plugin.to_string(),
            message: message.into(),
        }
    }
}
