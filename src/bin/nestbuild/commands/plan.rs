//! `nestbuild plan` command

use anyhow::Result;

use super::Session;
use crate::cli::PlanArgs;
use nestbuild::ops::{plan_composite, plan_tree, SolutionPlan};
use nestbuild::resolver::ResolutionSession;

pub fn execute(session: &Session, args: PlanArgs) -> Result<()> {
    let policy = session.policy();

    let plans = match args.solution.as_deref() {
        Some(name) => {
            let id = session.composite(Some(name))?;
            let mut resolver = ResolutionSession::new(&session.tree);
            vec![plan_composite(&mut resolver, id, &policy)?]
        }
        None => plan_tree(&session.tree, &policy)?,
    };

    if session.json() {
        return session.print_json(&plans);
    }

    for plan in &plans {
        print_plan(plan, session.ctx.is_verbose());
    }
    Ok(())
}

fn print_plan(plan: &SolutionPlan, verbose: bool) {
    let dir = if plan.base_dir.as_os_str().is_empty() {
        ".".to_string()
    } else {
        plan.base_dir.display().to_string()
    };
    println!("{} ({})", plan.name, dir);
    if let Some(included) = &plan.included {
        println!("  included: {}", included);
    }
    for config in &plan.configurations {
        let dirs: Vec<String> = config
            .subdirs
            .iter()
            .map(|s| s.path.display().to_string())
            .collect();
        println!("  {}: {}", config.configuration, dirs.join(" "));
        if verbose {
            println!("    order: {}", config.order.join(", "));
        }
    }
    for skipped in &plan.skipped {
        println!("  {}: (not supported)", skipped);
    }
}
