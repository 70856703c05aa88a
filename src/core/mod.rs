//! Core data structures for nestbuild.
//!
//! This module contains the project model that resolution runs against:
//! - Build units (leaf projects and composite solutions)
//! - Named configurations and their entries
//! - The solution tree arena and its builder
//! - Solution.toml loading

pub mod configuration;
pub mod manifest;
pub mod tree;
pub mod unit;

pub use configuration::{Configuration, ConfigurationEntry};
pub use manifest::{load_tree, SolutionManifest, MANIFEST_NAME};
pub use tree::{SolutionBuilder, SolutionTree, TreeError};
pub use unit::{BuildUnit, CompositeUnit, LeafUnit, Reference, ReferenceKind, UnitId};
