//! Solution tree fixtures for common test scenarios.

use crate::core::{CompositeUnit, LeafUnit, SolutionBuilder, SolutionTree, UnitId};

/// Add a leaf in `dir` referencing `refs`, attached to `parent`.
pub fn add_leaf(b: &mut SolutionBuilder, parent: UnitId, name: &str, dir: &str, refs: &[&str]) -> UnitId {
    let file = if dir.is_empty() {
        format!("{name}.csproj")
    } else {
        format!("{dir}/{name}.csproj")
    };
    let id = b.add_leaf(LeafUnit::new(name, file).with_project_refs(refs.iter().copied()));
    b.add_child(parent, id).unwrap();
    id
}

/// Add a composite whose solution file lives in `dir`, attached to `parent`.
pub fn add_composite(b: &mut SolutionBuilder, parent: UnitId, name: &str, dir: &str) -> UnitId {
    let id = b.add_composite(CompositeUnit::new(name, format!("{dir}/{name}.sln")));
    b.add_child(parent, id).unwrap();
    id
}

fn root(b: &mut SolutionBuilder) -> UnitId {
    b.add_composite(CompositeUnit::new("Root", "Root.sln"))
}

/// `[App, Util, Core]` where App needs Core and Util, and Util needs Core.
pub fn core_util_app() -> SolutionTree {
    let mut b = SolutionBuilder::new();
    let root = root(&mut b);
    add_leaf(&mut b, root, "App", "app", &["Core", "Util"]);
    add_leaf(&mut b, root, "Util", "util", &["Core"]);
    add_leaf(&mut b, root, "Core", "core", &[]);
    b.add_default_configuration(root, "Debug").unwrap();
    b.build(root).unwrap()
}

/// Leaves with no references, in the given order.
pub fn independent(names: &[&str]) -> SolutionTree {
    let mut b = SolutionBuilder::new();
    let root = root(&mut b);
    for name in names {
        add_leaf(&mut b, root, name, &name.to_lowercase(), &[]);
    }
    b.add_default_configuration(root, "Debug").unwrap();
    b.build(root).unwrap()
}

/// Root `[App, Libs, Platform]` with Libs a nested solution `[Util, Core]`.
///
/// App needs Util and Platform; Util needs Core. In Release the root skips
/// App and Libs skips Util.
pub fn nested() -> SolutionTree {
    let mut b = SolutionBuilder::new();
    let root = root(&mut b);
    let app = add_leaf(&mut b, root, "App", "app", &["Util", "Platform"]);
    let libs = add_composite(&mut b, root, "Libs", "libs");
    let platform = add_leaf(&mut b, root, "Platform", "platform", &[]);

    let util = add_leaf(&mut b, libs, "Util", "libs/util", &["Core"]);
    let core = add_leaf(&mut b, libs, "Core", "libs/core", &[]);

    b.add_default_configuration(libs, "Debug").unwrap();
    b.add_configuration(libs, "Release", [(util, false), (core, true)])
        .unwrap();

    b.add_default_configuration(root, "Debug").unwrap();
    b.add_configuration(root, "Release", [(app, false), (libs, true), (platform, true)])
        .unwrap();
    b.build(root).unwrap()
}

/// Root `[Platform, Services]` where Services `[Api, Store]` reaches out to
/// Platform from inside.
pub fn layered() -> SolutionTree {
    let mut b = SolutionBuilder::new();
    let root = root(&mut b);
    add_leaf(&mut b, root, "Platform", "platform", &[]);
    let services = add_composite(&mut b, root, "Services", "services");
    add_leaf(&mut b, services, "Api", "services/api", &["Platform"]);
    add_leaf(&mut b, services, "Store", "services/store", &["Api"]);
    b.add_default_configuration(services, "Debug").unwrap();
    b.add_default_configuration(root, "Debug").unwrap();
    b.build(root).unwrap()
}

/// Root `[Core, App, Tools]` where the nested Tools solution only has Debug.
pub fn release_gap() -> SolutionTree {
    let mut b = SolutionBuilder::new();
    let root = root(&mut b);
    add_leaf(&mut b, root, "Core", "core", &[]);
    add_leaf(&mut b, root, "App", "app", &["Core"]);
    let tools = add_composite(&mut b, root, "Tools", "tools");
    add_leaf(&mut b, tools, "Gen", "tools/gen", &[]);
    b.add_default_configuration(tools, "Debug").unwrap();
    b.add_default_configuration(root, "Debug").unwrap();
    b.add_default_configuration(root, "Release").unwrap();
    b.build(root).unwrap()
}

/// A needs B and B needs A.
pub fn cyclic_pair() -> SolutionTree {
    let mut b = SolutionBuilder::new();
    let root = root(&mut b);
    add_leaf(&mut b, root, "A", "a", &["B"]);
    add_leaf(&mut b, root, "B", "b", &["A"]);
    b.add_default_configuration(root, "Debug").unwrap();
    b.build(root).unwrap()
}

/// `[A, Ok, B]` with A and B in a cycle and Ok free.
pub fn cycle_after_free_unit() -> SolutionTree {
    let mut b = SolutionBuilder::new();
    let root = root(&mut b);
    add_leaf(&mut b, root, "A", "a", &["B"]);
    add_leaf(&mut b, root, "Ok", "ok", &[]);
    add_leaf(&mut b, root, "B", "b", &["A"]);
    b.add_default_configuration(root, "Debug").unwrap();
    b.build(root).unwrap()
}

/// App references a project that is not in the tree.
pub fn dangling_reference() -> SolutionTree {
    let mut b = SolutionBuilder::new();
    let root = root(&mut b);
    add_leaf(&mut b, root, "App", "app", &["Missing"]);
    b.add_default_configuration(root, "Debug").unwrap();
    b.build(root).unwrap()
}

/// Root with `Main` next to the solution file, `Lib` in a subdirectory and,
/// when `colocated >= 2`, a second co-located `Extra`.
pub fn colocated(colocated: usize) -> SolutionTree {
    let mut b = SolutionBuilder::new();
    let root = root(&mut b);
    add_leaf(&mut b, root, "Main", "", &["Lib"]);
    add_leaf(&mut b, root, "Lib", "lib", &[]);
    if colocated >= 2 {
        add_leaf(&mut b, root, "Extra", "", &[]);
    }
    b.add_default_configuration(root, "Debug").unwrap();
    b.build(root).unwrap()
}
