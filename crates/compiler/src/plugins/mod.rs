//! Block plugin dispatch.
//!
//! A template block tagged with a recognized name (`list`, `use`, `call`,
//! `template`) resolves to a [`Plugin`], which validates its call arguments
//! and returns a [`PluginInvoke`]: a set of lifecycle hooks the traversal
//! driver fires while the surrounding markup and children are walked.

pub mod call;
pub mod list;
pub mod template;
pub mod use_bean;

use crate::context::CompilerContext;
use crate::error::CompilerError;
use crate::push_stream::PushStream;
use sly_expression::Expression;
use std::collections::HashMap;
use std::sync::Arc;

pub use call::CallPlugin;
pub use list::ListPlugin;
pub use template::TemplatePlugin;
pub use use_bean::UsePlugin;

/// The block-type name plus the positional arguments extracted from the
/// attribute, e.g. `data-sly-list.items` gives arguments `["items"]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginCallInfo {
    pub name: String,
    pub arguments: Vec<String>,
}

impl PluginCallInfo {
    pub fn new(name: impl Into<String>, arguments: Vec<String>) -> Self {
        PluginCallInfo {
            name: name.into(),
            arguments,
        }
    }
}

/// Lifecycle hooks fired around one block instance. A plugin overrides only
/// the hooks it needs; unoverridden hooks are no-ops, which means children
/// pass through unchanged.
#[allow(unused_variables)]
pub trait PluginInvoke {
    fn before_tag_open(&mut self, stream: &mut PushStream) {}
    fn after_tag_open(&mut self, stream: &mut PushStream) {}
    fn before_element(&mut self, stream: &mut PushStream, tag_name: &str) {}
    fn before_children(&mut self, stream: &mut PushStream) {}
    fn after_children(&mut self, stream: &mut PushStream) {}
    fn after_element(&mut self, stream: &mut PushStream) {}
    fn before_tag_close(&mut self, stream: &mut PushStream, self_closing: bool) {}
    fn after_tag_close(&mut self, stream: &mut PushStream, self_closing: bool) {}
}

impl std::fmt::Debug for dyn PluginInvoke {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PluginInvoke")
    }
}

/// The all-default invoke, used when a plugin has nothing to emit.
pub struct DefaultPluginInvoke;

impl PluginInvoke for DefaultPluginInvoke {}

pub trait Plugin: Send + Sync {
    /// The block name this plugin claims, e.g. `"list"`.
    fn name(&self) -> &'static str;

    /// Registration order only; not an override mechanism.
    fn priority(&self) -> i32 {
        100
    }

    /// Validates the call and produces the lifecycle hooks for this block
    /// instance. Missing or excess arguments are template-authoring errors.
    fn invoke(
        &self,
        expression: Expression,
        call_info: &PluginCallInfo,
        ctx: &mut CompilerContext,
    ) -> Result<Box<dyn PluginInvoke>, CompilerError>;
}

/// An explicit block-name to plugin mapping, populated at startup.
/// Exactly one plugin may claim a given name.
pub struct PluginRegistry {
    plugins: HashMap<String, Arc<dyn Plugin>>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        PluginRegistry {
            plugins: HashMap::new(),
        }
    }

    /// The built-in plugin set, registered in ascending priority order.
    pub fn with_builtins() -> Self {
        let mut plugins: Vec<Arc<dyn Plugin>> = vec![
            Arc::new(TemplatePlugin),
            Arc::new(UsePlugin),
            Arc::new(CallPlugin),
            Arc::new(ListPlugin),
        ];
        plugins.sort_by_key(|p| p.priority());

        let mut registry = PluginRegistry::new();
        for plugin in plugins {
            // Built-in names are distinct; a clash here is a programming
            // error, not a template error.
            debug_assert!(!registry.plugins.contains_key(plugin.name()));
            registry.plugins.insert(plugin.name().to_string(), plugin);
        }
        registry
    }

    pub fn register(&mut self, plugin: Arc<dyn Plugin>) -> Result<(), CompilerError> {
        let name = plugin.name().to_string();
        if self.plugins.contains_key(&name) {
            return Err(CompilerError::DuplicatePlugin(name));
        }
        self.plugins.insert(name, plugin);
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Option<Arc<dyn Plugin>> {
        self.plugins.get(name).cloned()
    }
}

impl Default for PluginRegistry {
    fn default() -> Self {
        PluginRegistry::with_builtins()
    }
}
