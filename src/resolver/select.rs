//! Profile selection for a batch of boards.
//!
//! The shared runtime sources are generated once per batch, so they must be
//! built for the strongest profile any board in the batch needs, and every
//! board must use the same toolchain target.

use serde::Serialize;

use crate::core::{Board, Profile, TargetTriple, TemplateSource};
use crate::resolver::{resolve, ResolveError};

/// Substitution key whose value names the board's system configuration.
pub const SYSTEM_CONFIG: &str = "system.ads";

/// Outcome of profile selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Selection {
    pub profile: Profile,
    pub target: TargetTriple,
}

/// Pick the profile and target triple for the shared runtime sources.
///
/// Triples are compared before anything is resolved, so a mismatched batch
/// fails without running any amendment step. Each board is then resolved at
/// the highest profile it ships and classified by the system configuration
/// its manifest selects. The strongest classification wins; a full-tasking
/// board ends the scan.
pub fn select_profile(
    boards: &[Board],
    templates: &dyn TemplateSource,
) -> Result<Selection, ResolveError> {
    let Some(first) = boards.first() else {
        return Err(ResolveError::EmptyBatch);
    };
    let target = first.triple().clone();

    for board in &boards[1..] {
        if board.triple() != &target {
            return Err(ResolveError::TripleMismatch {
                board: board.id().to_string(),
                expected: target,
                found: board.triple().clone(),
            });
        }
    }

    let mut profile = Profile::Minimal;
    for board in boards {
        let manifest = resolve(board, board.max_profile(), templates)?;
        let found = manifest
            .substitution(SYSTEM_CONFIG)
            .map(Profile::from_system_config)
            .unwrap_or_default();

        tracing::debug!(board = board.id(), "system config selects {}", found);

        profile = profile.max(found);
        if profile == Profile::FullTasking {
            break;
        }
    }

    tracing::info!("shared sources: {} profile for {}", profile, target);

    Ok(Selection { profile, target })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{FeaturePredicates, Layer, MemoryTemplates};

    fn board(id: &str, triple: &str, system: &'static str) -> Board {
        let max = Profile::from_system_config(system);
        Board::new(id, triple, FeaturePredicates::bareboard())
            .with_max_profile(max)
            .with_layer(Layer::board(id).on_minimal(move |a| {
                a.substitute([(SYSTEM_CONFIG, system)]);
                Ok(())
            }))
    }

    #[test]
    fn test_minimal_batch() {
        let boards = [board("lm3s", "t1", "system-xi-arm.ads")];
        let sel = select_profile(&boards, &MemoryTemplates::new()).unwrap();
        assert_eq!(sel.profile, Profile::Minimal);
        assert_eq!(sel.target.as_str(), "t1");
    }

    #[test]
    fn test_strongest_profile_wins() {
        let boards = [
            board("lm3s", "t1", "system-xi-arm.ads"),
            board("rpi2", "t1", "system-xi-arm-sfp.ads"),
        ];
        let sel = select_profile(&boards, &MemoryTemplates::new()).unwrap();
        assert_eq!(sel.profile, Profile::RestrictedTasking);

        let boards = [
            board("lm3s", "t1", "system-xi-arm.ads"),
            board("rpi2", "t1", "system-xi-arm-sfp.ads"),
            board("stm32f4", "t1", "system-xi-arm-full.ads"),
        ];
        let sel = select_profile(&boards, &MemoryTemplates::new()).unwrap();
        assert_eq!(sel.profile, Profile::FullTasking);
    }

    #[test]
    fn test_order_does_not_matter() {
        let boards = [
            board("stm32f4", "t1", "system-xi-arm-full.ads"),
            board("lm3s", "t1", "system-xi-arm.ads"),
        ];
        let sel = select_profile(&boards, &MemoryTemplates::new()).unwrap();
        assert_eq!(sel.profile, Profile::FullTasking);
    }

    #[test]
    fn test_triple_mismatch_fails_before_resolving() {
        // The second board's delta would fail if it ran.
        let broken = Board::new("b", "t2", FeaturePredicates::bareboard())
            .with_layer(Layer::board("b").on_minimal(|a| a.load_config("x", "missing")));
        let boards = [board("a", "t1", "system-xi-arm.ads"), broken];

        let err = select_profile(&boards, &MemoryTemplates::new()).unwrap_err();
        assert_eq!(
            err,
            ResolveError::TripleMismatch {
                board: "b".to_string(),
                expected: TargetTriple::new("t1"),
                found: TargetTriple::new("t2"),
            }
        );
    }

    #[test]
    fn test_empty_batch() {
        let err = select_profile(&[], &MemoryTemplates::new()).unwrap_err();
        assert_eq!(err, ResolveError::EmptyBatch);
    }
}
