//! `nestbuild graph` command

use std::collections::{BTreeMap, BTreeSet};

use anyhow::Result;
use serde::Serialize;

use super::Session;
use crate::cli::GraphArgs;
use nestbuild::ops::dependency_graph;
use nestbuild::resolver::ResolutionSession;
use nestbuild::util::diagnostic::{emit, Diagnostic};

#[derive(Serialize)]
struct GraphOutput<'a> {
    configuration: &'a str,
    dependencies: BTreeMap<&'a str, Vec<&'a str>>,
    unresolved: &'a BTreeMap<String, BTreeSet<String>>,
}

pub fn execute(session: &Session, args: GraphArgs) -> Result<()> {
    session.require_supported(&args.configuration)?;
    let parent = session.composite(args.solution.as_deref())?;

    let mut resolver = ResolutionSession::new(&session.tree);
    let graph = dependency_graph(&mut resolver, parent, &args.configuration)?;

    for (unit, missing) in graph.unresolved() {
        let missing: Vec<&str> = missing.iter().map(String::as_str).collect();
        let warning = Diagnostic::warning(format!(
            "`{}` references projects that no sibling provides",
            unit
        ))
        .with_location(&session.manifest_path)
        .with_context(format!("missing: {}", missing.join(", ")))
        .with_suggestion(format!(
            "Add the missing projects to the solution or enable them in `{}`",
            args.configuration
        ));
        emit(&warning, session.ctx.color());
    }

    if session.json() {
        let tree = &session.tree;
        let dependencies = tree
            .children(parent)
            .iter()
            .map(|id| tree.name(*id))
            .filter(|name| graph.contains(name))
            .map(|name| (name, graph.dependencies_of(name)))
            .collect();
        return session.print_json(&GraphOutput {
            configuration: &args.configuration,
            dependencies,
            unresolved: graph.unresolved(),
        });
    }

    print!("{}", graph.to_dot());
    Ok(())
}
