//! Board listings and manifest reports.

use std::fmt::Write as _;

use serde::Serialize;

use crate::boards;
use crate::core::{Board, FeaturePredicates, Profile, TargetTriple};
use crate::ops::install_plan::InstallPlan;
use crate::resolver::ResolvedManifest;

/// What the documentation generator needs to know about a board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardInfo {
    pub id: String,
    pub target: TargetTriple,
    pub max_profile: Profile,
    pub profiles: Vec<Profile>,
    pub ancestry: Vec<String>,
    pub predicates: FeaturePredicates,
}

impl BoardInfo {
    pub fn new(board: &Board) -> Self {
        BoardInfo {
            id: board.id().to_string(),
            target: board.triple().clone(),
            max_profile: board.max_profile(),
            profiles: board.profiles().collect(),
            ancestry: board.ancestry().iter().map(|l| l.name().to_string()).collect(),
            predicates: *board.predicates(),
        }
    }
}

/// Every catalog board, in listing order.
pub fn list_boards() -> Vec<BoardInfo> {
    boards::all().iter().map(BoardInfo::new).collect()
}

/// One line per board: id, target, strongest profile.
pub fn format_board_list(boards: &[BoardInfo]) -> String {
    let width = boards.iter().map(|b| b.id.len()).max().unwrap_or(0);
    let mut out = String::new();
    for board in boards {
        let _ = writeln!(
            out,
            "{:<width$}  {:<16}  {}",
            board.id,
            board.target.as_str(),
            board.max_profile,
            width = width
        );
    }
    out
}

/// Human-readable rendering of one resolved manifest.
pub fn format_manifest(manifest: &ResolvedManifest) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", manifest.runtime(), manifest.profile());
    let _ = writeln!(out, "  target: {}", manifest.build_flags().target());
    let _ = writeln!(out, "  fingerprint: {}", manifest.fingerprint());

    for (category, files) in manifest.categories() {
        if files.is_empty() {
            continue;
        }
        let _ = writeln!(out, "\n[{}]", category);
        for file in files {
            match manifest.substitution(file) {
                Some(source) => {
                    let _ = writeln!(out, "  {} <- {}", file, source);
                }
                None => {
                    let _ = writeln!(out, "  {}", file);
                }
            }
        }
    }

    let plan = InstallPlan::from_manifest(manifest);
    let shared: Vec<_> = plan.shared_entries().collect();
    if !shared.is_empty() {
        let _ = writeln!(out, "\n[shared]");
        for entry in shared {
            let _ = writeln!(out, "  {} <- {}", entry.destination, entry.source);
        }
    }

    let lists: Vec<_> = manifest.build_flags().lists().collect();
    if !lists.is_empty() {
        let _ = writeln!(out, "\n[flags]");
        for (name, flags) in lists {
            let _ = writeln!(out, "  {} = {}", name, flags.join(" "));
        }
    }

    let configs: Vec<_> = manifest.configs().map(|(name, _)| name).collect();
    if !configs.is_empty() {
        let _ = writeln!(out, "\n[configs]");
        for name in configs {
            let _ = writeln!(out, "  {}", name);
        }
    }

    if !manifest.removals().is_empty() {
        let _ = writeln!(out, "\n[removed]");
        for removal in manifest.removals() {
            let _ = writeln!(
                out,
                "  {}: {} ({})",
                removal.category, removal.file, removal.level
            );
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::BuiltinTemplates;
    use crate::resolver::resolve;

    #[test]
    fn test_list_boards_carries_predicates() {
        let boards = list_boards();
        assert_eq!(boards.len(), boards::BOARD_IDS.len());

        let native = boards.iter().find(|b| b.id == "x86-linux").unwrap();
        assert!(native.target.is_native());
        assert!(!native.predicates.is_bareboard);

        let stm32 = boards.iter().find(|b| b.id == "stm32f4").unwrap();
        assert_eq!(stm32.ancestry, ["base", "cortex-m", "stm32f4"]);
        assert_eq!(stm32.profiles.len(), 3);
    }

    #[test]
    fn test_format_board_list() {
        let out = format_board_list(&list_boards());
        let leon3 = out.lines().find(|l| l.starts_with("leon3 ")).unwrap();
        assert!(leon3.contains("leon3-elf"));
        assert!(leon3.ends_with("full-tasking"));
    }

    #[test]
    fn test_format_manifest_shows_substitutions_and_removals() {
        let board = boards::lookup("stm32f4").unwrap();
        let m = resolve(&board, Profile::RestrictedTasking, &BuiltinTemplates).unwrap();
        let out = format_manifest(&m);

        assert!(out.starts_with("ravenscar-sfp-stm32f4 (restricted-tasking)\n"));
        assert!(out.contains("[tasking-bsp]"));
        assert!(out.contains("s-textio.adb <- s-textio-stm32f4.adb"));
        assert!(out.contains("[removed]\n  tasking-common: s-bb.ads (restricted-tasking)"));
        assert!(out.contains("runtime.xml"));
    }
}
