//! `nestbuild closure` command

use anyhow::Result;
use serde::Serialize;

use super::Session;
use crate::cli::ClosureArgs;
use nestbuild::resolver::{Closure, ResolutionSession};

#[derive(Serialize)]
struct ClosureOutput<'a> {
    unit: &'a str,
    configuration: &'a str,
    #[serde(flatten)]
    closure: &'a Closure,
}

pub fn execute(session: &Session, args: ClosureArgs) -> Result<()> {
    session.require_supported(&args.configuration)?;
    let id = session.unit(&args.unit)?;

    let mut resolver = ResolutionSession::new(&session.tree);
    let closure = resolver.closure_of(id, &args.configuration);

    if session.json() {
        return session.print_json(&ClosureOutput {
            unit: &args.unit,
            configuration: &args.configuration,
            closure: &closure,
        });
    }

    println!("{} ({})", args.unit, args.configuration);
    println!("  provides: {}", join(closure.provides().iter()));
    println!("  requires: {}", join(closure.requires().iter()));
    Ok(())
}

fn join<'a>(names: impl Iterator<Item = &'a String>) -> String {
    let names: Vec<&str> = names.map(String::as_str).collect();
    if names.is_empty() {
        "(none)".to_string()
    } else {
        names.join(", ")
    }
}
