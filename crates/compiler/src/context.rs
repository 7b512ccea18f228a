//! Compilation context: where an expression occurs, and per-unit symbol
//! generation.

/// Identifies the block-type or sub-position an expression occurs in.
/// Filters consult this to decide applicability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpressionContext {
    Element,
    Text,
    Attribute,
    PluginList,
    PluginUse,
    PluginCall,
    PluginTemplate,
}

impl ExpressionContext {
    /// Maps a plugin block name to its expression context.
    pub fn for_plugin(name: &str) -> Option<ExpressionContext> {
        match name {
            "list" => Some(ExpressionContext::PluginList),
            "use" => Some(ExpressionContext::PluginUse),
            "call" => Some(ExpressionContext::PluginCall),
            "template" => Some(ExpressionContext::PluginTemplate),
            _ => None,
        }
    }
}

/// Generates unique variable names for one compilation unit.
#[derive(Debug, Default)]
pub struct SymbolGenerator {
    counter: usize,
}

impl SymbolGenerator {
    pub fn next(&mut self, hint: &str) -> String {
        let name = format!("var_{}{}", hint, self.counter);
        self.counter += 1;
        name
    }
}

/// Per-compilation mutable state shared by plugins while a template block
/// is being traversed. Never shared across threads; each compilation
/// allocates its own.
#[derive(Debug, Default)]
pub struct CompilerContext {
    symbols: SymbolGenerator,
}

impl CompilerContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generate_variable(&mut self, hint: &str) -> String {
        self.symbols.next(hint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_names_are_unique() {
        let mut ctx = CompilerContext::new();
        let a = ctx.generate_variable("collection");
        let b = ctx.generate_variable("collection");
        assert_ne!(a, b);
        assert!(a.starts_with("var_collection"));
    }

    #[test]
    fn plugin_contexts() {
        assert_eq!(
            ExpressionContext::for_plugin("list"),
            Some(ExpressionContext::PluginList)
        );
        assert_eq!(ExpressionContext::for_plugin("nosuch"), None);
    }
}
