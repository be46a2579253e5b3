//! The board catalog.
//!
//! Every supported board is built here from its ancestry: the base layer, the
//! architecture family layers, then the board layer. Boards are cheap to
//! build and are rebuilt on every lookup.

pub mod aarch64;
pub mod arm;
pub mod base;
pub mod misc;
pub mod powerpc;
pub mod sparc;

use crate::core::Board;
use crate::resolver::ResolveError;

/// Canonical board identifiers, in listing order.
pub const BOARD_IDS: &[&str] = &[
    "stm32f4",
    "stm32f429disco",
    "stm32f469disco",
    "stm32f7disco",
    "stm32f769disco",
    "sam4s",
    "samg55",
    "lm3s",
    "tms570",
    "zynq7000",
    "rpi2",
    "rpi3",
    "aarch64-qemu",
    "leon2",
    "leon3",
    "mpc8641",
    "8349e",
    "p2020",
    "p5566",
    "mpc5634",
    "mcm",
    "x86-linux",
    "x86-windows",
];

/// Alternative names accepted on the command line.
pub const ALIASES: &[(&str, &str)] = &[("leon", "leon2")];

fn build(id: &'static str) -> Option<Board> {
    match id {
        "lm3s" => Some(arm::lm3s()),
        "tms570" => Some(arm::tms570()),
        "zynq7000" => Some(arm::zynq7000()),
        "rpi2" => Some(arm::rpi2()),
        "rpi3" => Some(aarch64::rpi3()),
        "aarch64-qemu" => Some(aarch64::qemu()),
        "leon2" => Some(sparc::leon2()),
        "leon3" => Some(sparc::leon3()),
        "mpc8641" => Some(powerpc::mpc8641()),
        "8349e" => Some(powerpc::mpc8349e()),
        "p2020" => Some(powerpc::p2020()),
        "p5566" => Some(powerpc::p5566()),
        "mpc5634" => Some(powerpc::mpc5634()),
        "mcm" => Some(misc::mcm()),
        id if arm::STM32_BOARDS.contains(&id) => arm::stm32(id),
        id if arm::SAM_BOARDS.contains(&id) => arm::sam(id),
        id if misc::NATIVE_BOARDS.contains(&id) => misc::x86_native(id),
        _ => None,
    }
}

/// Look up a board by identifier or alias.
pub fn lookup(id: &str) -> Result<Board, ResolveError> {
    let canonical = ALIASES
        .iter()
        .find(|(alias, _)| *alias == id)
        .map(|(_, target)| *target)
        .unwrap_or(id);

    BOARD_IDS
        .iter()
        .copied()
        .find(|b| *b == canonical)
        .and_then(build)
        .ok_or_else(|| ResolveError::UnknownBoard {
            board: id.to_string(),
            suggestions: suggestions(id),
        })
}

/// Look up several boards, failing on the first unknown identifier.
pub fn lookup_all<S: AsRef<str>>(ids: &[S]) -> Result<Vec<Board>, ResolveError> {
    ids.iter().map(|id| lookup(id.as_ref())).collect()
}

/// Every board in the catalog.
pub fn all() -> Vec<Board> {
    BOARD_IDS.iter().copied().filter_map(build).collect()
}

/// Catalog identifiers that look like `id`.
fn suggestions(id: &str) -> Vec<String> {
    let id = id.to_lowercase();
    let prefix: String = id.chars().take(3).collect();
    if prefix.is_empty() {
        return Vec::new();
    }

    BOARD_IDS
        .iter()
        .filter(|b| b.starts_with(&prefix) || b.contains(id.as_str()))
        .take(5)
        .map(|b| b.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BuiltinTemplates, FileCategory, Profile};
    use crate::resolver::{resolve, resolve_all};
    use crate::test_support::assert_monotonic;

    #[test]
    fn test_every_id_builds() {
        for id in BOARD_IDS {
            let board = lookup(id).unwrap();
            assert_eq!(board.id(), *id);
        }
        assert_eq!(all().len(), BOARD_IDS.len());
    }

    #[test]
    fn test_alias() {
        assert_eq!(lookup("leon").unwrap().id(), "leon2");
    }

    #[test]
    fn test_unknown_board_suggests() {
        let err = lookup("stm32f5").unwrap_err();
        match err {
            ResolveError::UnknownBoard { board, suggestions } => {
                assert_eq!(board, "stm32f5");
                assert!(suggestions.contains(&"stm32f4".to_string()));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(lookup("").is_err());
    }

    #[test]
    fn test_catalog_resolves_every_supported_profile() {
        for board in all() {
            let manifests = resolve_all(&board, &BuiltinTemplates)
                .unwrap_or_else(|e| panic!("{}: {}", board.id(), e));
            assert_eq!(manifests.len(), board.profiles().count());
            for m in &manifests {
                assert!(m.config("runtime.xml").is_some(), "{}", m.runtime());
                assert!(m.substitution("system.ads").is_some(), "{}", m.runtime());
                assert_eq!(m.build_flags().target(), board.triple());
            }
        }
    }

    #[test]
    fn test_catalog_is_monotonic() {
        for board in all() {
            let manifests = resolve_all(&board, &BuiltinTemplates).unwrap();
            for pair in manifests.windows(2) {
                assert_monotonic(&pair[0], &pair[1]);
            }
        }
    }

    #[test]
    fn test_catalog_is_deterministic() {
        for board in all() {
            let profile = board.max_profile();
            let a = resolve(&board, profile, &BuiltinTemplates).unwrap();
            let b = resolve(&lookup(board.id()).unwrap(), profile, &BuiltinTemplates).unwrap();
            assert_eq!(a, b, "{}", board.id());
        }
    }

    #[test]
    fn test_tasking_closure_only_above_minimal() {
        for board in all() {
            let m = resolve(&board, Profile::Minimal, &BuiltinTemplates).unwrap();
            for category in FileCategory::ALL.iter().filter(|c| c.is_tasking()) {
                // stm32 seeds s-bbpara.ads early
                assert!(
                    m.files(*category).iter().all(|f| f == "s-bbpara.ads"),
                    "{} lists tasking files at minimal",
                    board.id()
                );
            }
        }
    }

    #[test]
    fn test_max_profiles() {
        let max = |id: &str| lookup(id).unwrap().max_profile();
        assert_eq!(max("stm32f4"), Profile::FullTasking);
        assert_eq!(max("rpi2"), Profile::RestrictedTasking);
        assert_eq!(max("8349e"), Profile::RestrictedTasking);
        assert_eq!(max("lm3s"), Profile::Minimal);
        assert_eq!(max("x86-linux"), Profile::Minimal);
    }
}
