//! The profile amendment chain.
//!
//! Resolution walks every profile level from minimal up to the requested one
//! and, inside each level, every ancestry layer from base to board. The
//! result is pure: the same board, profile and templates always produce the
//! same manifest.

use serde::Serialize;

use crate::core::{
    Amendment, Board, BuildFlags, ConfigText, FileCategory, Manifest, Profile, Removal,
    TemplateSource,
};
use crate::resolver::ResolveError;
use crate::util::hash::Fingerprint;

/// A frozen manifest for one (board, profile) pair.
///
/// This is the read-only view handed to installers and project generators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedManifest {
    board: String,
    profile: Profile,
    runtime: String,
    fingerprint: String,
    #[serde(flatten)]
    manifest: Manifest,
}

impl ResolvedManifest {
    fn freeze(board: &Board, profile: Profile, manifest: Manifest) -> Self {
        let fingerprint = fingerprint(&manifest);
        ResolvedManifest {
            board: board.id().to_string(),
            profile,
            runtime: format!("{}-{}", profile.runtime_name(), board.id()),
            fingerprint,
            manifest,
        }
    }

    pub fn board(&self) -> &str {
        &self.board
    }

    pub fn profile(&self) -> Profile {
        self.profile
    }

    /// Runtime directory name, e.g. `ravenscar-sfp-stm32f4`.
    pub fn runtime(&self) -> &str {
        &self.runtime
    }

    /// SHA-256 over the full manifest content.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    /// Files of one category in append order.
    pub fn files(&self, category: FileCategory) -> &[String] {
        self.manifest.files(category)
    }

    /// Every category with its files, in category order.
    pub fn categories(&self) -> impl Iterator<Item = (FileCategory, &[String])> {
        FileCategory::ALL
            .into_iter()
            .map(move |c| (c, self.manifest.files(c)))
    }

    pub fn substitution(&self, logical: &str) -> Option<&str> {
        self.manifest.substitution(logical)
    }

    /// Substitution entries sorted by logical name.
    pub fn substitutions(&self) -> impl Iterator<Item = (&str, &str)> {
        self.manifest.substitutions()
    }

    pub fn config(&self, name: &str) -> Option<&str> {
        self.manifest.config(name)
    }

    /// Generated configs sorted by file name.
    pub fn configs(&self) -> impl Iterator<Item = (&str, &ConfigText)> {
        self.manifest.configs()
    }

    pub fn build_flags(&self) -> &BuildFlags {
        self.manifest.build_flags()
    }

    /// Names removed by tasking-level steps.
    pub fn removals(&self) -> &[Removal] {
        self.manifest.removals()
    }
}

fn fingerprint(manifest: &Manifest) -> String {
    let mut fp = Fingerprint::new();
    for category in FileCategory::ALL {
        fp.update_str(category.as_str())
            .update_strs(manifest.files(category).iter().map(String::as_str));
    }
    for (logical, replacement) in manifest.substitutions() {
        fp.update_str(logical).update_str(replacement);
    }
    let flags = manifest.build_flags();
    fp.update_str(flags.target().as_str());
    for (name, list) in flags.lists() {
        fp.update_str(name)
            .update_strs(list.iter().map(String::as_str));
    }
    for (name, config) in manifest.configs() {
        fp.update_str(name).update_str(config.as_str());
    }
    fp.finish()
}

/// Resolve `board` at `profile`.
pub fn resolve(
    board: &Board,
    profile: Profile,
    templates: &dyn TemplateSource,
) -> Result<ResolvedManifest, ResolveError> {
    if profile > board.max_profile() {
        return Err(ResolveError::UnsupportedProfile {
            board: board.id().to_string(),
            requested: profile,
            max: board.max_profile(),
        });
    }

    let mut manifest = Manifest::new(board.triple().clone());

    for level in profile.levels() {
        manifest.enter_level(level);
        for layer in board.ancestry() {
            let Some(delta) = layer.delta(level) else {
                tracing::trace!(board = board.id(), layer = layer.name(), "{}: pass", level.step_name());
                continue;
            };
            tracing::debug!(board = board.id(), layer = layer.name(), "{}", level.step_name());
            let mut amendment = Amendment::new(&mut manifest, board, templates, level, layer.name());
            delta(&mut amendment)?;
        }
    }

    Ok(ResolvedManifest::freeze(board, profile, manifest))
}

/// Resolve every profile the board ships, weakest first.
pub fn resolve_all(
    board: &Board,
    templates: &dyn TemplateSource,
) -> Result<Vec<ResolvedManifest>, ResolveError> {
    board
        .profiles()
        .map(|profile| resolve(board, profile, templates))
        .collect()
}
