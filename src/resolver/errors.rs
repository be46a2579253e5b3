//! Resolution error types and diagnostics.

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

use crate::core::{FileCategory, Profile, TargetTriple};
use crate::util::diagnostic::{suggestions, Diagnostic};

/// Error during manifest resolution.
///
/// Every variant is fatal to the run. Overwriting a substitution entry is
/// not an error and has no variant here.
#[derive(Debug, Error, MietteDiagnostic, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[diagnostic(code(rtsgen::catalog::unknown_board))]
    #[error("unknown board `{board}`")]
    UnknownBoard {
        board: String,
        suggestions: Vec<String>,
    },

    #[diagnostic(code(rtsgen::template::missing))]
    #[error("template `{name}` not found")]
    MissingTemplate { name: String },

    #[diagnostic(code(rtsgen::template::unreadable))]
    #[error("cannot read template `{name}`: {reason}")]
    TemplateRead { name: String, reason: String },

    #[diagnostic(code(rtsgen::amend::invalid_removal))]
    #[error("cannot remove `{file}` from {category}: not present")]
    InvalidRemoval { file: String, category: FileCategory },

    #[diagnostic(code(rtsgen::amend::duplicate_file))]
    #[error("`{file}` is already listed in {category}")]
    DuplicateFile { file: String, category: FileCategory },

    #[diagnostic(code(rtsgen::amend::substitution_mismatch))]
    #[error("pattern `{pattern}` not found in generated `{config}`")]
    SubstitutionMismatch { config: String, pattern: String },

    #[diagnostic(code(rtsgen::amend::missing_config))]
    #[error("generated config `{config}` was never loaded")]
    MissingConfig { config: String },

    #[diagnostic(code(rtsgen::resolve::unsupported_profile))]
    #[error("board `{board}` does not support the {requested} profile (highest: {max})")]
    UnsupportedProfile {
        board: String,
        requested: Profile,
        max: Profile,
    },

    #[diagnostic(code(rtsgen::select::triple_mismatch))]
    #[error("board `{board}` targets `{found}`, expected `{expected}`")]
    TripleMismatch {
        board: String,
        expected: TargetTriple,
        found: TargetTriple,
    },

    #[diagnostic(code(rtsgen::select::empty_batch))]
    #[error("no boards given")]
    EmptyBatch,
}

impl ResolveError {
    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = self.describe();
        match MietteDiagnostic::code(self) {
            Some(code) => diag.with_code(code.to_string()),
            None => diag,
        }
    }

    fn describe(&self) -> Diagnostic {
        match self {
            ResolveError::UnknownBoard {
                board,
                suggestions: similar,
            } => {
                let mut diag = Diagnostic::error(format!("unknown board `{}`", board));

                if !similar.is_empty() {
                    diag = diag.with_context(format!("similar boards: {}", similar.join(", ")));
                }

                diag.with_suggestion(suggestions::LIST_BOARDS)
            }

            ResolveError::MissingTemplate { name } => {
                Diagnostic::error(format!("template `{}` not found", name))
                    .with_context("an amendment step reads this template verbatim")
                    .with_suggestion(
                        "Check the --templates directory, or drop it to use the built-in set",
                    )
            }

            ResolveError::TemplateRead { name, reason } => {
                Diagnostic::error(format!("cannot read template `{}`", name))
                    .with_context(reason.clone())
                    .with_suggestion("Check the file's permissions and that it is UTF-8 text")
            }

            ResolveError::InvalidRemoval { file, category } => Diagnostic::error(format!(
                "cannot remove `{}` from the {} file list",
                file, category
            ))
            .with_context("the file was never appended by an earlier amendment step")
            .with_suggestion("Append the file at a lower profile level, or drop the removal")
            .with_suggestion(suggestions::RERUN_VERBOSE),

            ResolveError::DuplicateFile { file, category } => Diagnostic::error(format!(
                "`{}` appended twice to the {} file list",
                file, category
            ))
            .with_suggestion("Use append_if_absent where a later layer may repeat the file"),

            ResolveError::SubstitutionMismatch { config, pattern } => {
                Diagnostic::error(format!("cannot edit generated `{}`", config))
                    .with_context(format!("expected text `{}` is not present", pattern))
                    .with_suggestion("The template wording drifted; update the template or the edit")
                    .with_suggestion(suggestions::RERUN_VERBOSE)
            }

            ResolveError::MissingConfig { config } => {
                Diagnostic::error(format!("generated config `{}` was never loaded", config))
                    .with_suggestion("Load the template at the minimal level before editing it")
            }

            ResolveError::UnsupportedProfile {
                board,
                requested,
                max,
            } => Diagnostic::error(format!(
                "board `{}` does not ship a {} runtime",
                board, requested
            ))
            .with_context(format!("highest supported profile: {}", max))
            .with_suggestion(format!("Request --profile {} or lower", max)),

            ResolveError::TripleMismatch {
                board,
                expected,
                found,
            } => Diagnostic::error("boards use different toolchain targets")
                .with_context(format!("expected `{}`", expected))
                .with_context(format!("`{}` targets `{}`", board, found))
                .with_suggestion("Generate shared runtime sources for one target at a time")
                .with_suggestion("Pass --bsps-only to skip shared source generation"),

            ResolveError::EmptyBatch => Diagnostic::error("no boards given")
                .with_suggestion("Pass at least one board identifier"),
        }
    }
}
