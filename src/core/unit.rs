//! Build units: leaf projects and composite solutions.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::configuration::Configuration;
use crate::util::fs::{normalize, parent_dir};

/// Index of a unit inside a [`SolutionTree`](crate::core::SolutionTree).
///
/// Ids are only meaningful for the tree that handed them out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct UnitId(u32);

impl UnitId {
    pub(crate) fn new(index: usize) -> Self {
        UnitId(index as u32)
    }

    /// Position of the unit in its tree's arena.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What a leaf reference points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferenceKind {
    /// Another project in the same solution tree
    #[default]
    Project,
    /// A package fetched from outside the tree
    Package,
    /// A prebuilt assembly or library
    Assembly,
}

impl ReferenceKind {
    /// Only project references order units against each other.
    pub fn is_build_dependency(self) -> bool {
        matches!(self, ReferenceKind::Project)
    }
}

/// A reference declared by a leaf project.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Reference {
    pub name: String,
    pub kind: ReferenceKind,
}

impl Reference {
    pub fn new(name: impl Into<String>, kind: ReferenceKind) -> Self {
        Reference {
            name: name.into(),
            kind,
        }
    }

    /// A reference to another project in the tree.
    pub fn project(name: impl Into<String>) -> Self {
        Reference::new(name, ReferenceKind::Project)
    }
}

/// A single buildable project.
#[derive(Debug, Clone)]
pub struct LeafUnit {
    name: String,
    file: PathBuf,
    base_dir: PathBuf,
    references: Vec<Reference>,
}

impl LeafUnit {
    /// Create a leaf from its name and project file location.
    pub fn new(name: impl Into<String>, file: impl AsRef<Path>) -> Self {
        let file = normalize(file.as_ref());
        let base_dir = parent_dir(&file);
        LeafUnit {
            name: name.into(),
            file,
            base_dir,
            references: Vec::new(),
        }
    }

    /// Add a declared reference.
    pub fn with_reference(mut self, reference: Reference) -> Self {
        self.references.push(reference);
        self
    }

    /// Add project references by name.
    pub fn with_project_refs<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.references
            .extend(names.into_iter().map(Reference::project));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn file(&self) -> &Path {
        &self.file
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// All declared references, including non-project ones.
    pub fn references(&self) -> &[Reference] {
        &self.references
    }
}

/// A nested solution grouping child units under named configurations.
#[derive(Debug, Clone)]
pub struct CompositeUnit {
    name: String,
    file: PathBuf,
    base_dir: PathBuf,
    pub(crate) children: Vec<UnitId>,
    pub(crate) configurations: Vec<Configuration>,
}

impl CompositeUnit {
    /// Create a composite from its name and solution file location.
    ///
    /// The base directory is the directory holding the solution file.
    pub fn new(name: impl Into<String>, file: impl AsRef<Path>) -> Self {
        let file = normalize(file.as_ref());
        let base_dir = parent_dir(&file);
        CompositeUnit {
            name: name.into(),
            file,
            base_dir,
            children: Vec::new(),
            configurations: Vec::new(),
        }
    }

    /// Override the base directory derived from the solution file.
    pub fn with_base_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.base_dir = normalize(dir.as_ref());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn file(&self) -> &Path {
        &self.file
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Direct children in declaration order.
    pub fn children(&self) -> &[UnitId] {
        &self.children
    }

    /// Configurations in declaration order.
    pub fn configurations(&self) -> &[Configuration] {
        &self.configurations
    }

    /// Look up a configuration by name.
    pub fn configuration(&self, name: &str) -> Option<&Configuration> {
        self.configurations.iter().find(|c| c.name() == name)
    }

    /// Check whether this composite declares the named configuration.
    pub fn has_configuration(&self, name: &str) -> bool {
        self.configuration(name).is_some()
    }
}

/// A node in the solution tree.
#[derive(Debug, Clone)]
pub enum BuildUnit {
    Leaf(LeafUnit),
    Composite(CompositeUnit),
}

impl BuildUnit {
    pub fn name(&self) -> &str {
        match self {
            BuildUnit::Leaf(leaf) => leaf.name(),
            BuildUnit::Composite(composite) => composite.name(),
        }
    }

    /// The unit's file (project or solution file).
    pub fn file(&self) -> &Path {
        match self {
            BuildUnit::Leaf(leaf) => leaf.file(),
            BuildUnit::Composite(composite) => composite.file(),
        }
    }

    /// The directory the unit's file lives in.
    pub fn base_dir(&self) -> &Path {
        match self {
            BuildUnit::Leaf(leaf) => leaf.base_dir(),
            BuildUnit::Composite(composite) => composite.base_dir(),
        }
    }

    pub fn as_leaf(&self) -> Option<&LeafUnit> {
        match self {
            BuildUnit::Leaf(leaf) => Some(leaf),
            BuildUnit::Composite(_) => None,
        }
    }

    pub fn as_composite(&self) -> Option<&CompositeUnit> {
        match self {
            BuildUnit::Leaf(_) => None,
            BuildUnit::Composite(composite) => Some(composite),
        }
    }

    pub fn is_composite(&self) -> bool {
        matches!(self, BuildUnit::Composite(_))
    }

    /// Whether the unit takes part in `configuration` at all.
    ///
    /// Leaves always do; a composite only when it declares the configuration.
    pub fn has_configuration(&self, configuration: &str) -> bool {
        match self {
            BuildUnit::Leaf(_) => true,
            BuildUnit::Composite(composite) => composite.has_configuration(configuration),
        }
    }
}

impl From<LeafUnit> for BuildUnit {
    fn from(leaf: LeafUnit) -> Self {
        BuildUnit::Leaf(leaf)
    }
}

impl From<CompositeUnit> for BuildUnit {
    fn from(composite: CompositeUnit) -> Self {
        BuildUnit::Composite(composite)
    }
}
