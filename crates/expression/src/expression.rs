//! The `Expression` wrapper: one root node plus the named options extracted
//! from the template attribute (`${expr @ opt=value}`).

use crate::node::ExpressionNode;
use std::collections::{HashMap, HashSet};

/// The option side-table of an expression.
///
/// Options are consumed exactly once: a filter claims the option it is
/// responsible for, and once claimed the option is no longer visible to
/// anything downstream. The claimed names are tracked explicitly so the
/// consume-once invariant is observable rather than an artifact of map
/// mutation order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptionMap {
    entries: HashMap<String, ExpressionNode>,
    claimed: HashSet<String>,
}

impl OptionMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: ExpressionNode) {
        self.entries.insert(name.into(), value);
    }

    /// True while the option is present and unclaimed.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Peeks at an unclaimed option without consuming it.
    pub fn get(&self, name: &str) -> Option<&ExpressionNode> {
        self.entries.get(name)
    }

    /// Consumes an option. Returns `None` if the option is absent or was
    /// already claimed; a second claim is a no-op, not an error.
    pub fn claim(&mut self, name: &str) -> Option<ExpressionNode> {
        let value = self.entries.remove(name)?;
        self.claimed.insert(name.to_string());
        Some(value)
    }

    /// True if an earlier claim consumed this option.
    pub fn was_claimed(&self, name: &str) -> bool {
        self.claimed.contains(name)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// The names of the remaining unclaimed options, sorted for stable output.
    pub fn remaining_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Drains every unclaimed option, e.g. to build a parameter map.
    pub fn drain_remaining(&mut self) -> Vec<(String, ExpressionNode)> {
        let mut drained: Vec<(String, ExpressionNode)> = self.entries.drain().collect();
        drained.sort_by(|(a, _), (b, _)| a.cmp(b));
        for (name, _) in &drained {
            self.claimed.insert(name.clone());
        }
        drained
    }
}

impl FromIterator<(String, ExpressionNode)> for OptionMap {
    fn from_iter<T: IntoIterator<Item = (String, ExpressionNode)>>(iter: T) -> Self {
        OptionMap {
            entries: iter.into_iter().collect(),
            claimed: HashSet::new(),
        }
    }
}

/// A parsed template expression: exactly one root node plus its options.
///
/// Filters thread an `Expression` through the pipeline, either returning it
/// unchanged or deriving a new one via [`Expression::with_root`] /
/// [`Expression::map_root`] so that option state captured by earlier filters
/// is never lost.
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    root: ExpressionNode,
    options: OptionMap,
}

impl Expression {
    pub fn new(root: ExpressionNode) -> Self {
        Expression {
            root,
            options: OptionMap::new(),
        }
    }

    pub fn with_options(root: ExpressionNode, options: OptionMap) -> Self {
        Expression { root, options }
    }

    pub fn root(&self) -> &ExpressionNode {
        &self.root
    }

    pub fn options(&self) -> &OptionMap {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut OptionMap {
        &mut self.options
    }

    /// Returns an expression identical in options to the receiver but with
    /// its root replaced.
    pub fn with_root(self, root: ExpressionNode) -> Expression {
        Expression {
            root,
            options: self.options,
        }
    }

    /// Replaces the root with a function of the old root, keeping options.
    pub fn map_root(self, f: impl FnOnce(ExpressionNode) -> ExpressionNode) -> Expression {
        let Expression { root, options } = self;
        Expression {
            root: f(root),
            options,
        }
    }

    pub fn contains_option(&self, name: &str) -> bool {
        self.options.contains(name)
    }

    pub fn option(&self, name: &str) -> Option<&ExpressionNode> {
        self.options.get(name)
    }

    /// Consumes a named option; the only sanctioned way a filter takes
    /// ownership of one.
    pub fn claim_option(&mut self, name: &str) -> Option<ExpressionNode> {
        self.options.claim(name)
    }
}
