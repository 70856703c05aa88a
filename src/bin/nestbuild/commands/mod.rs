//! Command implementations

pub mod closure;
pub mod graph;
pub mod order;
pub mod plan;

use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Result};
use serde::Serialize;

use crate::cli::Cli;
use nestbuild::core::{load_tree, SolutionTree, UnitId};
use nestbuild::resolver::{ConfigurationPolicy, SupportedConfigurations};
use nestbuild::util::config::OutputFormat;
use nestbuild::util::diagnostic::suggestions;
use nestbuild::util::GlobalContext;

/// Everything a command needs: the loaded tree plus output settings.
pub struct Session {
    pub ctx: GlobalContext,
    pub manifest_path: PathBuf,
    pub tree: SolutionTree,
    format: OutputFormat,
}

impl Session {
    /// Locate and load the manifest, then the configuration next to it.
    pub fn open(cli: &Cli) -> Result<Self> {
        let mut ctx = GlobalContext::new()?;
        ctx.set_verbose(cli.verbose);
        ctx.set_color(!cli.no_color);

        let manifest_path = ctx
            .manifest_path(cli.manifest.as_deref())
            .map_err(|e| anyhow!("{:#}\n{}", e, suggestions::NO_MANIFEST))?;
        if !manifest_path.is_file() {
            bail!(
                "manifest not found: {}\n{}",
                manifest_path.display(),
                suggestions::NO_MANIFEST
            );
        }

        let root = manifest_path.parent().unwrap_or(Path::new("."));
        ctx.load_config(root);

        let tree = load_tree(&manifest_path)?;
        tracing::debug!("using manifest {}", manifest_path.display());

        let format = if cli.json {
            OutputFormat::Json
        } else {
            ctx.config().output_format()
        };

        Ok(Session {
            ctx,
            manifest_path,
            tree,
            format,
        })
    }

    pub fn json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    pub fn policy(&self) -> SupportedConfigurations {
        self.ctx.config().policy()
    }

    /// Look up a unit by name.
    pub fn unit(&self, name: &str) -> Result<UnitId> {
        self.tree.find(name).ok_or_else(|| {
            anyhow!(
                "no unit named `{}` in {}\n{}",
                name,
                self.manifest_path.display(),
                suggestions::UNIT_NOT_FOUND
            )
        })
    }

    /// Look up a composite by name, or the root when no name is given.
    pub fn composite(&self, name: Option<&str>) -> Result<UnitId> {
        let Some(name) = name else {
            return Ok(self.tree.root());
        };
        let id = self.unit(name)?;
        if !self.tree.unit(id).is_composite() {
            bail!("`{}` is a project, not a solution", name);
        }
        Ok(id)
    }

    /// Reject configurations the loaded config does not recognize.
    pub fn require_supported(&self, configuration: &str) -> Result<()> {
        if !self.policy().is_supported(configuration) {
            bail!(
                "configuration `{}` is not supported\n{}",
                configuration,
                suggestions::UNSUPPORTED_CONFIGURATION
            );
        }
        Ok(())
    }

    /// Print a value as pretty JSON.
    pub fn print_json<T: Serialize>(&self, value: &T) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }
}
