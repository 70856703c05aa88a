//! Subdirectory plans.
//!
//! A plan lists, per supported configuration, the directories a composite's
//! build must descend into, in dependency order. The child that lives in the
//! composite's own directory is not listed; it is reported as the included
//! unit instead.

use std::path::PathBuf;

use miette::Diagnostic as MietteDiagnostic;
use serde::Serialize;
use thiserror::Error;

use crate::core::{CompositeUnit, SolutionTree, UnitId};
use crate::resolver::{ConfigurationPolicy, OrderError, ResolutionSession, ResolvedOrder};
use crate::util::fs::{is_inside, relative_path, strip_cur_dir};

/// Error while planning a composite.
#[derive(Debug, Error, MietteDiagnostic)]
pub enum PlanError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Order(#[from] OrderError),

    #[error("`{child}` lives in `{dir}`, outside the directory of its parent `{parent}`")]
    #[diagnostic(
        code(nestbuild::plan::child_outside_parent),
        help("child projects and solutions must be in subdirectories of their parent")
    )]
    ChildOutsideParent {
        parent: String,
        child: String,
        dir: PathBuf,
    },
}

/// A subdirectory to descend into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubdirEntry {
    /// Unit built in this directory
    pub unit: String,
    /// Path relative to the parent's base directory
    pub path: PathBuf,
}

/// The plan of one composite under one configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigurationPlan {
    /// Configuration name
    pub configuration: String,
    /// Every participating child, dependencies first
    pub order: Vec<String>,
    /// Subdirectories in build order, co-located unit excluded
    pub subdirs: Vec<SubdirEntry>,
    /// The co-located unit, if it participates in this configuration
    pub included: Option<String>,
}

/// The plan of one composite across its configurations.
#[derive(Debug, Clone, Serialize)]
pub struct SolutionPlan {
    #[serde(skip)]
    pub unit: UnitId,
    /// Composite name
    pub name: String,
    /// Composite base directory
    pub base_dir: PathBuf,
    /// One plan per supported configuration
    pub configurations: Vec<ConfigurationPlan>,
    /// Configurations the policy rejected
    pub skipped: Vec<String>,
    /// Distinct children across all configurations, first-seen order
    pub children: Vec<String>,
    #[serde(skip)]
    pub child_ids: Vec<UnitId>,
    /// The unit merged into this composite's own build description
    pub included: Option<String>,
}

/// Path from `parent`'s base directory to `child`'s directory.
fn subdirectory(
    tree: &SolutionTree,
    parent: &CompositeUnit,
    child: UnitId,
) -> Result<PathBuf, PlanError> {
    let unit = tree.unit(child);
    if !is_inside(unit.base_dir(), parent.base_dir()) {
        return Err(PlanError::ChildOutsideParent {
            parent: parent.name().to_string(),
            child: unit.name().to_string(),
            dir: unit.base_dir().to_path_buf(),
        });
    }
    Ok(strip_cur_dir(&relative_path(parent.base_dir(), unit.base_dir())))
}

/// Turn a resolved order into directory listings.
fn configuration_plan(
    tree: &SolutionTree,
    resolved: &ResolvedOrder,
) -> Result<ConfigurationPlan, PlanError> {
    let composite = tree
        .composite(resolved.parent)
        .ok_or_else(|| OrderError::NotAComposite {
            unit: tree.name(resolved.parent).to_string(),
        })?;

    let subdirs = resolved
        .subdirectories()
        .map(|id| {
            Ok(SubdirEntry {
                unit: tree.name(id).to_string(),
                path: subdirectory(tree, composite, id)?,
            })
        })
        .collect::<Result<Vec<_>, PlanError>>()?;

    Ok(ConfigurationPlan {
        configuration: resolved.configuration.clone(),
        order: resolved
            .order
            .iter()
            .map(|id| tree.name(*id).to_string())
            .collect(),
        subdirs,
        included: resolved.colocated.map(|id| tree.name(id).to_string()),
    })
}

/// Plan one configuration of a composite.
pub fn plan_configuration(
    session: &mut ResolutionSession<'_>,
    parent: UnitId,
    configuration: &str,
) -> Result<ConfigurationPlan, PlanError> {
    let resolved = session.resolve_order(parent, configuration)?;
    configuration_plan(session.tree(), &resolved)
}

/// Plan every configuration of a composite that `policy` supports.
pub fn plan_composite(
    session: &mut ResolutionSession<'_>,
    parent: UnitId,
    policy: &dyn ConfigurationPolicy,
) -> Result<SolutionPlan, PlanError> {
    let tree = session.tree();
    let composite = tree.composite(parent).ok_or_else(|| OrderError::NotAComposite {
        unit: tree.name(parent).to_string(),
    })?;

    let mut plan = SolutionPlan {
        unit: parent,
        name: composite.name().to_string(),
        base_dir: composite.base_dir().to_path_buf(),
        configurations: Vec::new(),
        skipped: Vec::new(),
        children: Vec::new(),
        child_ids: Vec::new(),
        included: None,
    };
    let mut included: Option<UnitId> = None;

    for config in composite.configurations() {
        if !policy.is_supported(config.name()) {
            tracing::debug!(
                "skipping unsupported configuration `{}` of `{}`",
                config.name(),
                composite.name()
            );
            plan.skipped.push(config.name().to_string());
            continue;
        }

        let resolved = session.resolve_order(parent, config.name())?;
        for id in &resolved.order {
            if !plan.child_ids.contains(id) {
                plan.child_ids.push(*id);
            }
        }

        // The included unit is shared by all configurations.
        if let Some(id) = resolved.colocated {
            match included {
                Some(first) if first != id => {
                    return Err(OrderError::MultipleColocatedUnits {
                        parent: composite.name().to_string(),
                        first: tree.name(first).to_string(),
                        second: tree.name(id).to_string(),
                    }
                    .into());
                }
                _ => included = Some(id),
            }
        }

        plan.configurations
            .push(configuration_plan(tree, &resolved)?);
    }

    plan.children = plan
        .child_ids
        .iter()
        .map(|id| tree.name(*id).to_string())
        .collect();
    plan.included = included.map(|id| tree.name(id).to_string());

    tracing::info!(
        "planned `{}`: {} configuration(s), {} child(ren)",
        plan.name,
        plan.configurations.len(),
        plan.children.len()
    );
    Ok(plan)
}

/// Plan the root composite and, recursively, every nested composite that
/// takes part in a supported configuration.
///
/// All plans share one session, so closures of nested composites are
/// computed once.
pub fn plan_tree(
    tree: &SolutionTree,
    policy: &dyn ConfigurationPolicy,
) -> Result<Vec<SolutionPlan>, PlanError> {
    let mut session = ResolutionSession::new(tree);
    let mut plans = Vec::new();
    let mut stack = vec![tree.root()];

    while let Some(id) = stack.pop() {
        let plan = plan_composite(&mut session, id, policy)?;
        stack.extend(
            plan.child_ids
                .iter()
                .rev()
                .filter(|child| tree.unit(**child).is_composite()),
        );
        plans.push(plan);
    }

    Ok(plans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CompositeUnit, LeafUnit, SolutionBuilder};
    use crate::resolver::{AllConfigurations, SupportedConfigurations};
    use crate::test_support::fixtures;

    fn entry(unit: &str, path: &str) -> SubdirEntry {
        SubdirEntry {
            unit: unit.to_string(),
            path: PathBuf::from(path),
        }
    }

    #[test]
    fn test_subdirs_follow_build_order() {
        let tree = fixtures::core_util_app();
        let mut session = ResolutionSession::new(&tree);

        let plan = plan_configuration(&mut session, tree.root(), "Debug").unwrap();
        assert_eq!(
            plan.subdirs,
            vec![
                entry("Core", "core"),
                entry("Util", "util"),
                entry("App", "app")
            ]
        );
        assert_eq!(plan.included, None);
    }

    #[test]
    fn test_colocated_unit_is_included_not_listed() {
        let tree = fixtures::colocated(1);
        let mut session = ResolutionSession::new(&tree);

        let plan = plan_configuration(&mut session, tree.root(), "Debug").unwrap();
        assert_eq!(plan.order, vec!["Lib", "Main"]);
        assert_eq!(plan.subdirs, vec![entry("Lib", "lib")]);
        assert_eq!(plan.included.as_deref(), Some("Main"));
    }

    #[test]
    fn test_nested_subdirs_are_relative_to_parent() {
        let tree = fixtures::nested();
        let mut session = ResolutionSession::new(&tree);
        let libs = tree.find("Libs").unwrap();

        let plan = plan_configuration(&mut session, libs, "Debug").unwrap();
        assert_eq!(plan.subdirs, vec![entry("Core", "core"), entry("Util", "util")]);
    }

    #[test]
    fn test_child_outside_parent_is_an_error() {
        let mut b = SolutionBuilder::new();
        let root = b.add_composite(CompositeUnit::new("Root", "Root.sln"));
        let sub = b.add_composite(CompositeUnit::new("Sub", "sub/Sub.sln"));
        let stray = b.add_leaf(LeafUnit::new("Stray", "elsewhere/Stray.csproj"));
        b.add_child(root, sub).unwrap();
        b.add_child(sub, stray).unwrap();
        b.add_default_configuration(sub, "Debug").unwrap();
        b.add_default_configuration(root, "Debug").unwrap();
        let tree = b.build(root).unwrap();

        let mut session = ResolutionSession::new(&tree);
        let err = plan_configuration(&mut session, sub, "Debug").unwrap_err();
        assert!(matches!(err, PlanError::ChildOutsideParent { ref child, .. } if child == "Stray"));
    }

    #[test]
    fn test_child_above_root_directory_is_an_error() {
        let mut b = SolutionBuilder::new();
        let root = b.add_composite(CompositeUnit::new("Root", "Root.sln"));
        let outside = b.add_leaf(LeafUnit::new("X", "../elsewhere/X.csproj"));
        b.add_child(root, outside).unwrap();
        b.add_default_configuration(root, "Debug").unwrap();
        let tree = b.build(root).unwrap();

        let mut session = ResolutionSession::new(&tree);
        let err = plan_configuration(&mut session, root, "Debug").unwrap_err();
        assert!(matches!(
            err,
            PlanError::ChildOutsideParent { ref child, ref dir, .. }
                if child == "X" && dir == &PathBuf::from("../elsewhere")
        ));
    }

    #[test]
    fn test_unsupported_configurations_are_skipped() {
        let tree = fixtures::nested();
        let mut session = ResolutionSession::new(&tree);
        let policy = SupportedConfigurations::new(["Release"]);

        let plan = plan_composite(&mut session, tree.root(), &policy).unwrap();
        assert_eq!(plan.configurations.len(), 1);
        assert_eq!(plan.configurations[0].configuration, "Release");
        assert_eq!(plan.skipped, vec!["Debug"]);
    }

    #[test]
    fn test_children_are_collected_across_configurations() {
        let tree = fixtures::nested();
        let mut session = ResolutionSession::new(&tree);

        let plan = plan_composite(&mut session, tree.root(), &AllConfigurations).unwrap();
        assert_eq!(plan.children, vec!["Libs", "Platform", "App"]);
    }

    #[test]
    fn test_plan_tree_descends_into_nested_composites() {
        let tree = fixtures::nested();

        let plans = plan_tree(&tree, &AllConfigurations).unwrap();
        let names: Vec<_> = plans.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Root", "Libs"]);

        let libs = &plans[1];
        let release = libs
            .configurations
            .iter()
            .find(|c| c.configuration == "Release")
            .unwrap();
        assert_eq!(release.order, vec!["Core"]);
    }

    #[test]
    fn test_plan_tree_skips_composites_absent_everywhere() {
        let tree = fixtures::release_gap();
        let policy = SupportedConfigurations::new(["Release"]);

        let plans = plan_tree(&tree, &policy).unwrap();
        assert_eq!(plans.len(), 1);
        assert_eq!(plans[0].children, vec!["Core", "App"]);
    }

    #[test]
    fn test_plan_error_keeps_order_diagnostic() {
        let tree = fixtures::cyclic_pair();
        let err = plan_tree(&tree, &AllConfigurations).unwrap_err();

        assert!(matches!(err, PlanError::Order(OrderError::UnsatisfiableOrder { .. })));
        let code = err.code().map(|c| c.to_string());
        assert_eq!(code.as_deref(), Some("nestbuild::order::unsatisfiable"));
    }
}
