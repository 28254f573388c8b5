//! Tiered fallback resolution over node selections
//!
//! A cascade is an ordered list of selection strategies applied to the same
//! scope. The first strategy returning any nodes wins and later strategies are
//! never consulted. Order is significant: earlier strategies are stricter and
//! must be tried first.

use roxmltree::Node;
use std::fmt;
use tracing::{debug, trace};

/// One tier of a fallback cascade
pub trait SelectionStrategy: Copy + fmt::Debug {
    /// Short description used in diagnostics
    fn label(&self) -> &'static str;

    /// Nodes under `scope` matched by this tier, in document order
    fn select<'a, 'input>(&self, scope: Node<'a, 'input>) -> Vec<Node<'a, 'input>>;
}

/// Outcome of resolving a cascade
#[derive(Debug, Clone)]
pub struct CascadeMatch<'a, 'input, S> {
    /// The tier that produced the nodes, `None` when every tier was empty
    pub strategy: Option<S>,

    /// Matched nodes from the winning tier
    pub nodes: Vec<Node<'a, 'input>>,
}

impl<S> CascadeMatch<'_, '_, S> {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }
}

/// Apply strategies in order and return the first non-empty selection
pub fn resolve<'a, 'input, S: SelectionStrategy>(
    scope: Node<'a, 'input>,
    strategies: &[S],
) -> CascadeMatch<'a, 'input, S> {
    for strategy in strategies {
        let nodes = strategy.select(scope);
        if !nodes.is_empty() {
            debug!("{} matched {} node(s)", strategy.label(), nodes.len());
            return CascadeMatch {
                strategy: Some(*strategy),
                nodes,
            };
        }
        trace!("{} matched nothing, falling back", strategy.label());
    }

    CascadeMatch {
        strategy: None,
        nodes: Vec::new(),
    }
}
