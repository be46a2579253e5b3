//! Implementation of `rtsgen build`.

use std::collections::HashSet;

use anyhow::{bail, Result};
use serde::Serialize;

use crate::boards;
use crate::core::{Board, TemplateSource};
use crate::ops::consumer::ManifestConsumer;
use crate::ops::install_plan::InstallPlan;
use crate::resolver::{resolve_all, select_profile, ResolvedManifest, Selection};

/// Options for the build command.
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    /// Board identifiers, in command-line order
    pub boards: Vec<String>,

    /// Skip shared source generation
    pub bsps_only: bool,
}

/// Everything resolved for one build, before any file is written.
#[derive(Debug, Clone, Serialize)]
pub struct BuildPlan {
    pub runtimes: Vec<ResolvedManifest>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selection: Option<Selection>,
}

impl BuildPlan {
    /// Install plans of the runtimes feeding the shared source tree.
    ///
    /// Each board contributes the manifest at the selected profile, or at
    /// its own highest profile when it ships nothing stronger.
    pub fn shared_plans(&self) -> Vec<InstallPlan> {
        let Some(selection) = &self.selection else {
            return Vec::new();
        };
        let mut plans: Vec<InstallPlan> = Vec::new();
        let mut seen = HashSet::new();
        for board in self.runtimes.iter().map(|m| m.board()) {
            if !seen.insert(board) {
                continue;
            }
            let best = self
                .runtimes
                .iter()
                .filter(|m| m.board() == board && m.profile() <= selection.profile)
                .max_by_key(|m| m.profile());
            if let Some(manifest) = best {
                plans.push(InstallPlan::from_manifest(manifest));
            }
        }
        plans
    }
}

/// Resolve every board of the batch.
///
/// Nothing is written here: a failure on any board aborts the batch before
/// a consumer sees a single manifest.
pub fn plan(opts: &BuildOptions, templates: &dyn TemplateSource) -> Result<BuildPlan> {
    if opts.boards.is_empty() {
        bail!("no boards given");
    }

    // Aliases resolve to the same board, so compare canonical ids.
    let mut seen = HashSet::new();
    let boards: Vec<Board> = boards::lookup_all(opts.boards.as_slice())?
        .into_iter()
        .filter(|board| {
            let first = seen.insert(board.id().to_string());
            if !first {
                tracing::debug!("ignoring repeated board {}", board.id());
            }
            first
        })
        .collect();

    let mut runtimes = Vec::new();
    for board in &boards {
        tracing::debug!(
            "resolving {} ({}, up to {})",
            board.id(),
            board.triple(),
            board.max_profile()
        );
        runtimes.extend(resolve_all(board, templates)?);
    }

    let selection = if opts.bsps_only {
        tracing::info!("skipping shared source generation");
        None
    } else {
        Some(select_profile(&boards, templates)?)
    };

    Ok(BuildPlan {
        runtimes,
        selection,
    })
}

/// Resolve the batch and hand it to `consumer`.
pub fn build(
    opts: &BuildOptions,
    templates: &dyn TemplateSource,
    consumer: &mut dyn ManifestConsumer,
) -> Result<BuildPlan> {
    let plan = plan(opts, templates)?;

    for manifest in &plan.runtimes {
        consumer.consume(manifest)?;
    }
    if let Some(selection) = &plan.selection {
        consumer.consume_selection(selection, &plan.shared_plans())?;
    }

    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BuiltinTemplates, Profile};
    use crate::resolver::ResolveError;

    #[derive(Default)]
    struct Recorder {
        runtimes: Vec<String>,
        selection: Option<Selection>,
    }

    impl ManifestConsumer for Recorder {
        fn consume(&mut self, manifest: &ResolvedManifest) -> Result<()> {
            self.runtimes.push(manifest.runtime().to_string());
            Ok(())
        }

        fn consume_selection(&mut self, selection: &Selection, _: &[InstallPlan]) -> Result<()> {
            self.selection = Some(selection.clone());
            Ok(())
        }
    }

    fn opts(boards: &[&str]) -> BuildOptions {
        BuildOptions {
            boards: boards.iter().map(|b| b.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_build_resolves_every_profile() {
        let mut recorder = Recorder::default();
        build(&opts(&["stm32f4", "lm3s"]), &BuiltinTemplates, &mut recorder).unwrap();

        assert_eq!(
            recorder.runtimes,
            [
                "zfp-stm32f4",
                "ravenscar-sfp-stm32f4",
                "ravenscar-full-stm32f4",
                "zfp-lm3s",
            ]
        );
        let selection = recorder.selection.unwrap();
        assert_eq!(selection.profile, Profile::FullTasking);
        assert_eq!(selection.target.as_str(), "arm-eabi");
    }

    #[test]
    fn test_triple_mismatch_reaches_no_consumer() {
        let mut recorder = Recorder::default();
        let err = build(&opts(&["stm32f4", "leon3"]), &BuiltinTemplates, &mut recorder)
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<ResolveError>(),
            Some(ResolveError::TripleMismatch { .. })
        ));
        assert!(recorder.runtimes.is_empty());
        assert!(recorder.selection.is_none());
    }

    #[test]
    fn test_bsps_only_skips_selection() {
        let mut recorder = Recorder::default();
        let mut options = opts(&["stm32f4", "leon3"]);
        options.bsps_only = true;
        build(&options, &BuiltinTemplates, &mut recorder).unwrap();

        assert!(recorder.selection.is_none());
        assert!(recorder.runtimes.contains(&"ravenscar-full-leon3".to_string()));
    }

    #[test]
    fn test_unknown_board_fails_before_resolution() {
        let mut recorder = Recorder::default();
        let err = build(&opts(&["stm32f4", "nope"]), &BuiltinTemplates, &mut recorder)
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ResolveError>(),
            Some(ResolveError::UnknownBoard { .. })
        ));
        assert!(recorder.runtimes.is_empty());
    }

    #[test]
    fn test_shared_plans_cap_at_board_max() {
        let plan = plan(&opts(&["stm32f4", "lm3s"]), &BuiltinTemplates).unwrap();
        let shared = plan.shared_plans();
        let runtimes: Vec<_> = shared.iter().map(|p| p.runtime.as_str()).collect();
        assert_eq!(runtimes, ["ravenscar-full-stm32f4", "zfp-lm3s"]);
    }

    #[test]
    fn test_repeated_board_is_resolved_once() {
        let mut recorder = Recorder::default();
        let plan = build(
            &opts(&["stm32f4", "lm3s", "stm32f4"]),
            &BuiltinTemplates,
            &mut recorder,
        )
        .unwrap();

        assert_eq!(recorder.runtimes.len(), 4);
        let shared = plan.shared_plans();
        let runtimes: Vec<_> = shared.iter().map(|p| p.runtime.as_str()).collect();
        assert_eq!(runtimes, ["ravenscar-full-stm32f4", "zfp-lm3s"]);
    }

    #[test]
    fn test_alias_and_canonical_id_collapse() {
        let both = plan(&opts(&["leon", "leon2"]), &BuiltinTemplates).unwrap();
        let single = plan(&opts(&["leon2"]), &BuiltinTemplates).unwrap();
        let runtimes = |p: &BuildPlan| -> Vec<String> {
            p.runtimes.iter().map(|m| m.runtime().to_string()).collect()
        };
        assert_eq!(runtimes(&both), runtimes(&single));
    }
}
