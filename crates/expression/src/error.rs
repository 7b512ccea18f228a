use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum ExpressionError {
    #[error("Expression parse error in '{0}': {1}")]
    Parse(String, String),
}
