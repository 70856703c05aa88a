//! Ordering error types and diagnostics.

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

use crate::util::diagnostic::Diagnostic;

/// Error while ordering the children of a composite.
#[derive(Debug, Clone, Error, MietteDiagnostic, PartialEq, Eq)]
pub enum OrderError {
    #[error("no build order satisfies the project references of `{witness}` in configuration `{configuration}`")]
    #[diagnostic(
        code(nestbuild::order::unsatisfiable),
        help("a dependency cycle or a reference to a project outside the solution blocks `{witness}`")
    )]
    UnsatisfiableOrder {
        witness: String,
        configuration: String,
    },

    #[error("more than one unit of `{parent}` lives in its own directory: `{first}` and `{second}`")]
    #[diagnostic(
        code(nestbuild::order::multiple_colocated),
        help("move all but one of them into a subdirectory")
    )]
    MultipleColocatedUnits {
        parent: String,
        first: String,
        second: String,
    },

    #[error("`{unit}` has no configuration named `{configuration}`")]
    #[diagnostic(code(nestbuild::order::configuration_not_found))]
    ConfigurationNotFound { unit: String, configuration: String },

    #[error("`{unit}` is not a composite")]
    #[diagnostic(code(nestbuild::order::not_a_composite))]
    NotAComposite { unit: String },
}

impl OrderError {
    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            OrderError::UnsatisfiableOrder {
                witness,
                configuration,
            } => Diagnostic::error(format!(
                "impossible to find a build order that satisfies the project references of `{}`",
                witness
            ))
            .with_context(format!("configuration: {}", configuration))
            .with_context(format!(
                "`{}` was still waiting on a reference when ordering stalled",
                witness
            ))
            .with_suggestion("Break any reference cycle between the remaining projects")
            .with_suggestion(format!(
                "Check that every project `{}` references is part of the solution and enabled in `{}`",
                witness, configuration
            )),

            OrderError::MultipleColocatedUnits {
                parent,
                first,
                second,
            } => Diagnostic::error(format!(
                "more than one unit in the same directory as `{}` is not supported",
                parent
            ))
            .with_context(format!("`{}` and `{}` share the directory of `{}`", first, second, parent))
            .with_suggestion(format!("Move `{}` into its own subdirectory", second)),

            OrderError::ConfigurationNotFound {
                unit,
                configuration,
            } => Diagnostic::error(format!(
                "`{}` has no configuration named `{}`",
                unit, configuration
            ))
            .with_suggestion(
                "Run `nestbuild order` without --config to list every configuration",
            ),

            OrderError::NotAComposite { unit } => {
                Diagnostic::error(format!("`{}` is not a deployable solution", unit))
            }
        }
    }
}
