//! Code generation back end for the sly template compiler: structural type
//! inference and per-operator lowering to target source text.

pub mod generator;
pub mod types;

pub use generator::{generate, generate_operator};
pub use types::{Type, TypedNode, infer};
