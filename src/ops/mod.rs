//! High-level operations.
//!
//! This module contains the operations behind the nestbuild commands.

pub mod graph;
pub mod plan;

pub use graph::{dependency_graph, DependencyGraph};
pub use plan::{
    plan_composite, plan_configuration, plan_tree, ConfigurationPlan, PlanError, SolutionPlan,
    SubdirEntry,
};
