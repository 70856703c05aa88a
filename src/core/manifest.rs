//! Solution.toml parsing and schema.
//!
//! The manifest describes the project model that resolution runs against:
//! composites with their children and configurations, and leaf projects with
//! their references. All paths are relative to the manifest's directory.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::core::tree::{SolutionBuilder, SolutionTree};
use crate::core::unit::{CompositeUnit, LeafUnit, Reference, ReferenceKind, UnitId};
use crate::util::fs::read_to_string;

/// Canonical manifest file name.
pub const MANIFEST_NAME: &str = "Solution.toml";

/// Parsed Solution.toml.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SolutionManifest {
    /// Name of the top-level composite
    pub root: String,

    /// Composite solutions by name
    #[serde(default)]
    pub composites: BTreeMap<String, CompositeSpec>,

    /// Leaf projects by name
    #[serde(default)]
    pub projects: BTreeMap<String, ProjectSpec>,
}

/// A `[composites.<name>]` table.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompositeSpec {
    /// Solution file location
    pub file: PathBuf,

    /// Base directory, when it differs from the solution file's directory
    #[serde(default)]
    pub dir: Option<PathBuf>,

    /// Child unit names, in declaration order
    #[serde(default)]
    pub children: Vec<String>,

    /// Configurations by name
    #[serde(default)]
    pub configurations: BTreeMap<String, ConfigurationSpec>,
}

/// A `[composites.<name>.configurations.<config>]` table.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigurationSpec {
    /// Children that do not participate in this configuration
    #[serde(default)]
    pub skip: Vec<String>,
}

/// A `[projects.<name>]` table.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectSpec {
    /// Project file location
    pub file: PathBuf,

    /// Declared references
    #[serde(default)]
    pub references: Vec<ReferenceSpec>,
}

/// A reference, either a bare project name or a detailed table.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ReferenceSpec {
    Name(String),
    Detailed {
        name: String,
        #[serde(default)]
        kind: ReferenceKind,
    },
}

impl ReferenceSpec {
    fn to_reference(&self) -> Reference {
        match self {
            ReferenceSpec::Name(name) => Reference::project(name.clone()),
            ReferenceSpec::Detailed { name, kind } => Reference::new(name.clone(), *kind),
        }
    }
}

impl SolutionManifest {
    /// Load a manifest from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = read_to_string(path)?;
        Self::parse(&contents)
            .with_context(|| format!("failed to parse manifest: {}", path.display()))
    }

    /// Parse a manifest from TOML text.
    pub fn parse(contents: &str) -> Result<Self> {
        let manifest: SolutionManifest = toml::from_str(contents)?;
        Ok(manifest)
    }

    /// Build the solution tree this manifest describes.
    pub fn to_tree(&self) -> Result<SolutionTree> {
        let mut builder = SolutionBuilder::new();
        let mut ids: HashMap<&str, UnitId> = HashMap::new();

        for (name, spec) in &self.projects {
            let leaf = spec
                .references
                .iter()
                .fold(LeafUnit::new(name.clone(), &spec.file), |leaf, r| {
                    leaf.with_reference(r.to_reference())
                });
            ids.insert(name, builder.add_leaf(leaf));
        }

        for (name, spec) in &self.composites {
            if ids.contains_key(name.as_str()) {
                bail!("`{}` is declared both as a project and as a composite", name);
            }
            let mut composite = CompositeUnit::new(name.clone(), &spec.file);
            if let Some(dir) = &spec.dir {
                composite = composite.with_base_dir(dir);
            }
            let id = builder.add_composite(composite);
            ids.insert(name, id);
        }

        for (name, spec) in &self.composites {
            let parent = ids[name.as_str()];

            let mut children = Vec::with_capacity(spec.children.len());
            for child in &spec.children {
                let Some(&child_id) = ids.get(child.as_str()) else {
                    bail!("composite `{}` lists unknown child `{}`", name, child);
                };
                builder
                    .add_child(parent, child_id)
                    .with_context(|| format!("invalid child of `{}`", name))?;
                children.push((child.as_str(), child_id));
            }

            for (config_name, config) in &spec.configurations {
                for skipped in &config.skip {
                    if !spec.children.contains(skipped) {
                        bail!(
                            "configuration `{}` of `{}` skips `{}`, which is not one of its children",
                            config_name,
                            name,
                            skipped
                        );
                    }
                }
                let entries = children
                    .iter()
                    .map(|(child, id)| (*id, !config.skip.iter().any(|s| s == child)));
                builder
                    .add_configuration(parent, config_name.clone(), entries)
                    .with_context(|| format!("invalid configuration of `{}`", name))?;
            }
        }

        let Some(&root) = ids.get(self.root.as_str()) else {
            bail!("root `{}` is not declared", self.root);
        };
        if !self.composites.contains_key(&self.root) {
            bail!("root `{}` must be a composite", self.root);
        }

        let tree = builder.build(root)?;
        tracing::debug!(
            "loaded solution `{}` with {} units",
            self.root,
            tree.len()
        );
        Ok(tree)
    }
}

/// Load a manifest file and build its tree.
pub fn load_tree(path: &Path) -> Result<SolutionTree> {
    SolutionManifest::load(path)?
        .to_tree()
        .with_context(|| format!("invalid solution in {}", path.display()))
}
