//! Direct requirements of leaf projects.

use std::collections::{BTreeSet, HashMap};
use std::rc::Rc;

use crate::core::{LeafUnit, UnitId};

/// An immutable, cheaply shared set of unit names.
pub type NameSet = Rc<BTreeSet<String>>;

/// Per-leaf cache of direct project requirements.
#[derive(Debug, Default)]
pub struct ReferenceCache {
    requirements: HashMap<UnitId, NameSet>,
}

impl ReferenceCache {
    pub fn new() -> Self {
        ReferenceCache::default()
    }

    /// Names of the projects `leaf` references directly.
    ///
    /// Non-project references (packages, assemblies) are not build
    /// dependencies between units and are left out.
    pub fn requirements_of(&mut self, id: UnitId, leaf: &LeafUnit) -> NameSet {
        if let Some(set) = self.requirements.get(&id) {
            tracing::trace!("reference cache hit for `{}`", leaf.name());
            return Rc::clone(set);
        }

        let set: BTreeSet<String> = leaf
            .references()
            .iter()
            .filter(|r| r.kind.is_build_dependency())
            .map(|r| r.name.clone())
            .collect();
        let set = Rc::new(set);

        self.requirements.insert(id, Rc::clone(&set));
        set
    }

    /// Number of cached leaves.
    pub fn len(&self) -> usize {
        self.requirements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requirements.is_empty()
    }
}
