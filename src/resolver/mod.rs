//! Build order resolution.
//!
//! A [`ResolutionSession`] borrows a solution tree read-only and owns the
//! caches used while ordering it. Caches are never shared between sessions,
//! and they go away with the session.

pub mod closure;
pub mod errors;
pub mod filter;
pub mod order;
pub mod references;

pub use closure::{Closure, ClosureCache};
pub use errors::OrderError;
pub use filter::{AllConfigurations, ConfigurationPolicy, SupportedConfigurations};
pub use order::ResolvedOrder;
pub use references::{NameSet, ReferenceCache};

use crate::core::{SolutionTree, UnitId};

/// One resolution run over a solution tree.
///
/// Sessions are single-threaded. To resolve independent trees in parallel,
/// give each its own session.
#[derive(Debug)]
pub struct ResolutionSession<'a> {
    pub(crate) tree: &'a SolutionTree,
    pub(crate) references: ReferenceCache,
    pub(crate) closures: ClosureCache,
}

impl<'a> ResolutionSession<'a> {
    /// Start a session with empty caches.
    pub fn new(tree: &'a SolutionTree) -> Self {
        ResolutionSession {
            tree,
            references: ReferenceCache::new(),
            closures: ClosureCache::new(),
        }
    }

    /// The tree being resolved.
    pub fn tree(&self) -> &'a SolutionTree {
        self.tree
    }

    /// Direct project requirements of a leaf, or `None` for a composite.
    pub fn requirements_of(&mut self, leaf: UnitId) -> Option<NameSet> {
        let tree = self.tree;
        tree.leaf(leaf)
            .map(|unit| self.references.requirements_of(leaf, unit))
    }

    /// Number of (leaf, composite-configuration) entries cached so far.
    pub fn cache_sizes(&self) -> (usize, usize) {
        (self.references.len(), self.closures.len())
    }
}
