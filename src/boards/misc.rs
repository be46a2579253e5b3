//! Boards outside the big families: Visium MCM and the native x86 hosts.

use crate::boards::base;
use crate::core::{Board, FeaturePredicates, Layer, TargetTriple};

pub fn mcm() -> Board {
    let predicates = FeaturePredicates::bareboard().with_fpu(true, true);

    Board::new("mcm", "visium-elf", predicates)
        .with_layer(base::layer())
        .with_layer(Layer::board("mcm").on_minimal(|a| {
            a.substitute([
                ("system.ads", "system-xi-visium.ads"),
                ("s-textio.adb", "s-textio-stdio.adb"),
                ("s-macres.adb", "s-macres-native.adb"),
            ]);
            a.load_config("runtime.xml", "visium/mcm/runtime.xml")?;
            a.load_config("target_options.gpr", "visium/mcm/target_options.gpr")
        }))
}

pub const NATIVE_BOARDS: [&str; 2] = ["x86-linux", "x86-windows"];

/// A hosted x86 runtime. Both hosts build with the native toolchain.
pub fn x86_native(id: &'static str) -> Option<Board> {
    if !NATIVE_BOARDS.contains(&id) {
        return None;
    }
    let predicates = FeaturePredicates::hosted().with_fpu(true, true);

    let board = Board::new(id, TargetTriple::native(), predicates)
        .with_layer(base::layer())
        .with_layer(Layer::board(id).on_minimal(|a| {
            a.substitute([
                ("system.ads", "system-xi-x86.ads"),
                ("s-textio.adb", "s-textio-stdio.adb"),
                ("s-macres.adb", "s-macres-native.adb"),
            ]);
            a.load_config("runtime.xml", "native/runtime.xml")
        }));
    Some(board)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BuiltinTemplates, FileCategory, Profile};
    use crate::resolver::resolve;

    #[test]
    fn test_native_boards_share_native_triple() {
        let linux = x86_native("x86-linux").unwrap();
        let windows = x86_native("x86-windows").unwrap();
        assert!(linux.triple().is_native());
        assert_eq!(linux.triple(), windows.triple());
        assert!(!linux.predicates().is_bareboard);
    }

    #[test]
    fn test_hosted_board_has_no_bareboard_flags() {
        let m = resolve(
            &x86_native("x86-linux").unwrap(),
            Profile::Minimal,
            &BuiltinTemplates,
        )
        .unwrap();
        assert!(m.build_flags().list("c_flags").is_empty());
        assert!(!m.files(FileCategory::Common).contains(&"s-memset.ads".to_string()));
    }

    #[test]
    fn test_mcm_generates_two_configs() {
        let m = resolve(&mcm(), Profile::Minimal, &BuiltinTemplates).unwrap();
        let names: Vec<_> = m.configs().map(|(name, _)| name).collect();
        assert_eq!(names, ["runtime.xml", "target_options.gpr"]);
    }
}
