//! SolutionTree - the read-only arena of build units.
//!
//! A tree is assembled once through [`SolutionBuilder`] and then handed to a
//! resolution session by shared reference. Nothing mutates it afterwards.

use std::collections::{HashMap, HashSet};

use thiserror::Error;

use crate::core::configuration::{Configuration, ConfigurationEntry};
use crate::core::unit::{BuildUnit, CompositeUnit, LeafUnit, UnitId};

/// Error while assembling a solution tree.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TreeError {
    #[error("duplicate unit name `{name}`")]
    DuplicateUnitName { name: String },

    #[error("`{unit}` is not a composite")]
    NotAComposite { unit: String },

    #[error("`{child}` is already a child of `{parent}`")]
    ChildAlreadyAttached { child: String, parent: String },

    #[error("configuration `{configuration}` of `{parent}` lists `{unit}`, which is not one of its children")]
    UnknownEntry {
        parent: String,
        configuration: String,
        unit: String,
    },

    #[error("`{parent}` declares configuration `{configuration}` more than once")]
    DuplicateConfiguration {
        parent: String,
        configuration: String,
    },

    #[error("`{unit}` cannot be its own child")]
    SelfReference { unit: String },

    #[error("attaching `{child}` to `{parent}` would make `{child}` contain itself")]
    ContainmentCycle { parent: String, child: String },

    #[error("root `{root}` is itself a child of `{parent}`")]
    RootHasParent { root: String, parent: String },
}

/// An immutable tree of build units.
#[derive(Debug, Clone)]
pub struct SolutionTree {
    units: Vec<BuildUnit>,
    parents: Vec<Option<UnitId>>,
    leaves_by_name: HashMap<String, UnitId>,
    composites_by_name: HashMap<String, UnitId>,
    root: UnitId,
}

impl SolutionTree {
    /// Get a unit by id.
    ///
    /// Panics if `id` was not handed out by this tree's builder.
    pub fn unit(&self, id: UnitId) -> &BuildUnit {
        &self.units[id.index()]
    }

    /// Get a composite by id.
    pub fn composite(&self, id: UnitId) -> Option<&CompositeUnit> {
        self.unit(id).as_composite()
    }

    /// Get a leaf by id.
    pub fn leaf(&self, id: UnitId) -> Option<&LeafUnit> {
        self.unit(id).as_leaf()
    }

    /// Name of a unit.
    pub fn name(&self, id: UnitId) -> &str {
        self.unit(id).name()
    }

    /// The top-level composite.
    pub fn root(&self) -> UnitId {
        self.root
    }

    /// The composite a unit is attached to, if any.
    pub fn parent(&self, id: UnitId) -> Option<UnitId> {
        self.parents[id.index()]
    }

    /// Find a unit by name.
    pub fn find(&self, name: &str) -> Option<UnitId> {
        self.leaves_by_name
            .get(name)
            .or_else(|| self.composites_by_name.get(name))
            .copied()
    }

    /// Direct children of a unit (empty for leaves).
    pub fn children(&self, id: UnitId) -> &[UnitId] {
        match self.unit(id) {
            BuildUnit::Leaf(_) => &[],
            BuildUnit::Composite(composite) => composite.children(),
        }
    }

    /// Look up a named configuration of a composite.
    pub fn configuration(&self, id: UnitId, name: &str) -> Option<&Configuration> {
        self.composite(id).and_then(|c| c.configuration(name))
    }

    /// All composites reachable from the root, depth-first, root first.
    pub fn composites(&self) -> Vec<UnitId> {
        let mut out = Vec::new();
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            if !self.unit(id).is_composite() {
                continue;
            }
            out.push(id);
            stack.extend(self.children(id).iter().rev());
        }
        out
    }

    /// Number of units in the tree.
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Check if the tree has no units.
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Iterate over all units with their ids.
    pub fn iter(&self) -> impl Iterator<Item = (UnitId, &BuildUnit)> {
        self.units
            .iter()
            .enumerate()
            .map(|(i, unit)| (UnitId::new(i), unit))
    }
}

/// Assembles a [`SolutionTree`].
#[derive(Debug, Default)]
pub struct SolutionBuilder {
    units: Vec<BuildUnit>,
    parents: Vec<Option<UnitId>>,
}

impl SolutionBuilder {
    pub fn new() -> Self {
        SolutionBuilder::default()
    }

    fn push(&mut self, unit: BuildUnit) -> UnitId {
        let id = UnitId::new(self.units.len());
        self.units.push(unit);
        self.parents.push(None);
        id
    }

    /// Add a leaf project.
    pub fn add_leaf(&mut self, leaf: LeafUnit) -> UnitId {
        self.push(BuildUnit::Leaf(leaf))
    }

    /// Add a composite solution.
    pub fn add_composite(&mut self, composite: CompositeUnit) -> UnitId {
        self.push(BuildUnit::Composite(composite))
    }

    fn name(&self, id: UnitId) -> &str {
        self.units[id.index()].name()
    }

    fn composite_mut(&mut self, id: UnitId) -> Result<&mut CompositeUnit, TreeError> {
        match &mut self.units[id.index()] {
            BuildUnit::Composite(composite) => Ok(composite),
            BuildUnit::Leaf(leaf) => Err(TreeError::NotAComposite {
                unit: leaf.name().to_string(),
            }),
        }
    }

    /// Attach `child` to `parent`. A unit can have only one parent.
    pub fn add_child(&mut self, parent: UnitId, child: UnitId) -> Result<(), TreeError> {
        if parent == child {
            return Err(TreeError::SelfReference {
                unit: self.name(child).to_string(),
            });
        }
        if let Some(existing) = self.parents[child.index()] {
            return Err(TreeError::ChildAlreadyAttached {
                child: self.name(child).to_string(),
                parent: self.name(existing).to_string(),
            });
        }
        let mut ancestor = self.parents[parent.index()];
        while let Some(id) = ancestor {
            if id == child {
                return Err(TreeError::ContainmentCycle {
                    parent: self.name(parent).to_string(),
                    child: self.name(child).to_string(),
                });
            }
            ancestor = self.parents[id.index()];
        }
        self.composite_mut(parent)?.children.push(child);
        self.parents[child.index()] = Some(parent);
        Ok(())
    }

    /// Declare a configuration on `parent` with explicit participation flags.
    ///
    /// Every entry must name a direct child of `parent`.
    pub fn add_configuration<I>(
        &mut self,
        parent: UnitId,
        name: impl Into<String>,
        entries: I,
    ) -> Result<(), TreeError>
    where
        I: IntoIterator<Item = (UnitId, bool)>,
    {
        let name = name.into();
        let parent_name = self.name(parent).to_string();

        let mut resolved = Vec::new();
        for (unit, participates) in entries {
            if self.parents[unit.index()] != Some(parent) {
                return Err(TreeError::UnknownEntry {
                    parent: parent_name,
                    configuration: name,
                    unit: self.name(unit).to_string(),
                });
            }
            resolved.push(ConfigurationEntry::new(unit, participates));
        }

        let composite = self.composite_mut(parent)?;
        if composite.has_configuration(&name) {
            return Err(TreeError::DuplicateConfiguration {
                parent: parent_name,
                configuration: name,
            });
        }
        composite
            .configurations
            .push(Configuration::new(name, resolved));
        Ok(())
    }

    /// Declare a configuration in which every current child participates.
    pub fn add_default_configuration(
        &mut self,
        parent: UnitId,
        name: impl Into<String>,
    ) -> Result<(), TreeError> {
        let children = self.composite_mut(parent)?.children.clone();
        self.add_configuration(parent, name, children.into_iter().map(|c| (c, true)))
    }

    /// Finish the tree rooted at `root`.
    pub fn build(self, root: UnitId) -> Result<SolutionTree, TreeError> {
        if !self.units[root.index()].is_composite() {
            return Err(TreeError::NotAComposite {
                unit: self.name(root).to_string(),
            });
        }
        if let Some(parent) = self.parents[root.index()] {
            return Err(TreeError::RootHasParent {
                root: self.name(root).to_string(),
                parent: self.name(parent).to_string(),
            });
        }

        // Projects and composites share one namespace.
        let mut seen = HashSet::new();
        let mut leaves_by_name = HashMap::new();
        let mut composites_by_name = HashMap::new();
        for (i, unit) in self.units.iter().enumerate() {
            if !seen.insert(unit.name()) {
                return Err(TreeError::DuplicateUnitName {
                    name: unit.name().to_string(),
                });
            }
            let index = match unit {
                BuildUnit::Leaf(_) => &mut leaves_by_name,
                BuildUnit::Composite(_) => &mut composites_by_name,
            };
            index.insert(unit.name().to_string(), UnitId::new(i));
        }

        Ok(SolutionTree {
            units: self.units,
            parents: self.parents,
            leaves_by_name,
            composites_by_name,
            root,
        })
    }
}
