//! Compiler front end for the sly template language: the expression filter
//! pipeline, block plugin dispatch and the intermediate command stream.
//!
//! The pipeline is purely functional per compilation unit: filters and
//! plugins are stateless and shared, while every compilation owns its
//! expressions, context and stream. Multiple templates may compile
//! concurrently on separate threads with no coordination.

pub mod block;
pub mod commands;
pub mod context;
pub mod error;
pub mod filters;
pub mod patterns;
pub mod plugins;
pub mod push_stream;

pub use block::BlockCompiler;
pub use commands::Command;
pub use context::{CompilerContext, ExpressionContext};
pub use error::CompilerError;
pub use filters::{Filter, FilterPipeline};
pub use plugins::{Plugin, PluginCallInfo, PluginInvoke, PluginRegistry};
pub use push_stream::{PushStream, Warning};
