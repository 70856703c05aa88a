//! `nestbuild order` command

use anyhow::Result;
use serde::Serialize;

use super::Session;
use crate::cli::OrderArgs;
use nestbuild::resolver::{ConfigurationPolicy, ResolutionSession};

#[derive(Serialize)]
struct OrderOutput {
    configuration: String,
    order: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    included: Option<String>,
}

pub fn execute(session: &Session, args: OrderArgs) -> Result<()> {
    let tree = &session.tree;
    let root = tree.root();

    let configurations: Vec<String> = match args.configuration {
        Some(name) => {
            session.require_supported(&name)?;
            vec![name]
        }
        None => {
            let policy = session.policy();
            tree.composite(root)
                .map(|c| c.configurations())
                .unwrap_or_default()
                .iter()
                .map(|c| c.name())
                .filter(|name| policy.is_supported(name))
                .map(str::to_string)
                .collect()
        }
    };

    let mut resolver = ResolutionSession::new(tree);
    let mut outputs = Vec::with_capacity(configurations.len());
    for configuration in configurations {
        let resolved = resolver.resolve_order(root, &configuration)?;
        outputs.push(OrderOutput {
            order: resolved
                .order
                .iter()
                .map(|id| tree.name(*id).to_string())
                .collect(),
            included: resolved.colocated.map(|id| tree.name(id).to_string()),
            configuration,
        });
    }

    if session.json() {
        return session.print_json(&outputs);
    }

    for output in &outputs {
        println!("{}: {}", output.configuration, output.order.join(", "));
    }
    Ok(())
}
