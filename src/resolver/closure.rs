//! Aggregate (provides, requires) closures of build units.
//!
//! A composite provides every participating leaf nested inside it and requires
//! whatever those leaves reference that the composite does not provide itself.
//! Closures are computed once per (composite, configuration) and never mutated
//! after they enter the cache.

use std::collections::{BTreeSet, HashMap};
use std::rc::Rc;

use serde::Serialize;

use crate::core::{BuildUnit, CompositeUnit, UnitId};
use crate::resolver::filter;
use crate::resolver::references::NameSet;
use crate::resolver::ResolutionSession;

/// The external dependency surface of a unit under one configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Closure {
    provides: NameSet,
    requires: NameSet,
}

impl Closure {
    pub fn new(provides: NameSet, requires: NameSet) -> Self {
        Closure { provides, requires }
    }

    /// A unit that contributes nothing.
    pub fn empty() -> Self {
        Closure::default()
    }

    /// Names of the leaf units this closure makes available.
    pub fn provides(&self) -> &BTreeSet<String> {
        &self.provides
    }

    /// Names this closure needs from outside itself.
    pub fn requires(&self) -> &BTreeSet<String> {
        &self.requires
    }

    /// Check whether every requirement is already in `satisfied`.
    pub fn is_satisfied_by(&self, satisfied: &BTreeSet<String>) -> bool {
        self.requires.is_subset(satisfied)
    }

    /// Requirements not in `satisfied`.
    pub fn missing<'s>(&'s self, satisfied: &'s BTreeSet<String>) -> impl Iterator<Item = &'s str> {
        self.requires
            .difference(satisfied)
            .map(String::as_str)
    }
}

/// Closure cache keyed by composite, then configuration name.
#[derive(Debug, Default)]
pub struct ClosureCache {
    closures: HashMap<UnitId, HashMap<String, Closure>>,
}

impl ClosureCache {
    pub fn new() -> Self {
        ClosureCache::default()
    }

    pub fn get(&self, unit: UnitId, configuration: &str) -> Option<&Closure> {
        self.closures.get(&unit)?.get(configuration)
    }

    pub fn insert(&mut self, unit: UnitId, configuration: &str, closure: Closure) {
        self.closures
            .entry(unit)
            .or_default()
            .insert(configuration.to_string(), closure);
    }

    /// Number of cached (composite, configuration) pairs.
    pub fn len(&self) -> usize {
        self.closures.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<'a> ResolutionSession<'a> {
    /// Compute the (provides, requires) closure of a unit.
    ///
    /// A leaf provides its own name and requires its direct project
    /// references. A composite lacking `configuration` contributes nothing.
    pub fn closure_of(&mut self, id: UnitId, configuration: &str) -> Closure {
        let tree = self.tree;
        match tree.unit(id) {
            BuildUnit::Leaf(leaf) => {
                let provides = Rc::new(BTreeSet::from([leaf.name().to_string()]));
                let requires = self.references.requirements_of(id, leaf);
                Closure::new(provides, requires)
            }
            BuildUnit::Composite(composite) => {
                self.composite_closure(id, composite, configuration)
            }
        }
    }

    fn composite_closure(
        &mut self,
        id: UnitId,
        composite: &'a CompositeUnit,
        configuration: &str,
    ) -> Closure {
        if let Some(closure) = self.closures.get(id, configuration) {
            tracing::trace!(
                "closure cache hit for `{}` ({})",
                composite.name(),
                configuration
            );
            return closure.clone();
        }

        let closure = match composite.configuration(configuration) {
            None => {
                tracing::debug!(
                    "`{}` has no configuration `{}`, contributing nothing",
                    composite.name(),
                    configuration
                );
                Closure::empty()
            }
            Some(config) => {
                let mut provides = BTreeSet::new();
                let mut requires = BTreeSet::new();

                for entry in filter::participating(config) {
                    let child = self.closure_of(entry.unit(), configuration);
                    provides.extend(child.provides().iter().cloned());
                    requires.extend(child.requires().iter().cloned());
                }

                requires.retain(|name| !provides.contains(name));
                Closure::new(Rc::new(provides), Rc::new(requires))
            }
        };

        self.closures.insert(id, configuration, closure.clone());
        closure
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CompositeUnit, LeafUnit, SolutionBuilder};
    use crate::test_support::fixtures;

    fn names(set: &BTreeSet<String>) -> Vec<&str> {
        set.iter().map(String::as_str).collect()
    }

    #[test]
    fn test_leaf_closure() {
        let tree = fixtures::core_util_app();
        let mut session = ResolutionSession::new(&tree);

        let app = session.closure_of(tree.find("App").unwrap(), "Debug");
        assert_eq!(names(app.provides()), vec!["App"]);
        assert_eq!(names(app.requires()), vec!["Core", "Util"]);
    }

    #[test]
    fn test_composite_subtracts_internal_requirements() {
        let tree = fixtures::layered();
        let mut session = ResolutionSession::new(&tree);

        // Store's reference to Api is internal, Api's reference to Platform
        // is not.
        let services = session.closure_of(tree.find("Services").unwrap(), "Debug");
        assert_eq!(names(services.provides()), vec!["Api", "Store"]);
        assert_eq!(names(services.requires()), vec!["Platform"]);
        assert!(services.provides().is_disjoint(services.requires()));
    }

    #[test]
    fn test_root_closure_is_disjoint() {
        let tree = fixtures::nested();
        let mut session = ResolutionSession::new(&tree);

        for config in ["Debug", "Release"] {
            let root = session.closure_of(tree.root(), config);
            assert!(root.provides().is_disjoint(root.requires()));
        }
    }

    #[test]
    fn test_non_participating_children_excluded() {
        let tree = fixtures::nested();
        let mut session = ResolutionSession::new(&tree);

        // Release skips Util inside Libs.
        let libs = session.closure_of(tree.find("Libs").unwrap(), "Release");
        assert_eq!(names(libs.provides()), vec!["Core"]);
    }

    #[test]
    fn test_missing_configuration_contributes_nothing() {
        let tree = fixtures::release_gap();
        let mut session = ResolutionSession::new(&tree);

        let tools = session.closure_of(tree.find("Tools").unwrap(), "Release");
        assert_eq!(tools, Closure::empty());
    }

    #[test]
    fn test_composite_closure_is_cached() {
        let tree = fixtures::nested();
        let mut session = ResolutionSession::new(&tree);
        let libs = tree.find("Libs").unwrap();

        let first = session.closure_of(libs, "Debug");
        let cached = session.closures.len();
        let second = session.closure_of(libs, "Debug");

        assert_eq!(first, second);
        assert_eq!(session.closures.len(), cached);
        assert!(Rc::ptr_eq(&first.provides, &second.provides));
    }

    #[test]
    fn test_composite_name_is_not_provided() {
        let mut b = SolutionBuilder::new();
        let root = b.add_composite(CompositeUnit::new("Root", "Root.sln"));
        let sub = b.add_composite(CompositeUnit::new("Sub", "sub/Sub.sln"));
        let leaf = b.add_leaf(LeafUnit::new("Leaf", "sub/leaf/Leaf.csproj"));
        b.add_child(root, sub).unwrap();
        b.add_child(sub, leaf).unwrap();
        b.add_default_configuration(sub, "Debug").unwrap();
        b.add_default_configuration(root, "Debug").unwrap();
        let tree = b.build(root).unwrap();

        let mut session = ResolutionSession::new(&tree);
        let closure = session.closure_of(sub, "Debug");
        assert_eq!(names(closure.provides()), vec!["Leaf"]);
    }
}
