//! Test utilities for rtsgen unit tests.
//!
//! Synthetic boards exercise the amendment chain without the built-in
//! templates, and [`assert_monotonic`] checks the profile superset property
//! against the removal log.

pub mod fixtures;

use std::collections::BTreeSet;

use crate::core::{Board, FeaturePredicates, FileCategory, Layer, MemoryTemplates, Profile};
use crate::resolver::ResolvedManifest;

// Re-export fixtures for convenience
pub use fixtures::*;

/// Template text used by [`synthetic_board`].
pub const SYNTHETIC_RUNTIME_XML: &str = r#"package Compiler is
   for Default_Switches ("Ada") use ("-mcpu=demo", "-mfpu=sp");
end Compiler;
package Linker is
   for Required_Switches use ("-nolibc", "-nostartfiles");
end Linker;
"#;

/// Templates backing [`synthetic_board`].
pub fn synthetic_templates() -> MemoryTemplates {
    MemoryTemplates::new().with("demo/runtime.xml", SYNTHETIC_RUNTIME_XML)
}

/// A board with a family layer and a board layer at every level up to `max`.
///
/// The restricted step removes a minimal-level placeholder and the full step
/// edits the generated runtime.xml.
pub fn synthetic_board(id: &str, triple: &str, max: Profile) -> Board {
    let family = Layer::family("demo-family", 1)
        .on_minimal(|a| {
            a.append(FileCategory::Common, ["demo.ads", "demo.adb"])?;
            a.substitute([("system.ads", "system-demo.ads")]);
            a.append_flags("c_flags", ["-DDEMO"]);
            Ok(())
        })
        .on_restricted(|a| {
            a.append(FileCategory::TaskingCommon, ["s-bbthre.adb"])?;
            a.substitute([("system.ads", "system-demo-sfp.ads")]);
            Ok(())
        })
        .on_full(|a| {
            a.append(FileCategory::TaskingCommon, ["s-traceb.adb"])?;
            a.substitute([("system.ads", "system-demo-full.ads")]);
            a.edit_config("runtime.xml", "\"-nolibc\"", "\"-lc\"")
        });

    let board = Layer::board(id)
        .on_minimal(|a| {
            a.append(FileCategory::Bsp, ["placeholder.adb", "start.S"])?;
            a.load_config("runtime.xml", "demo/runtime.xml")
        })
        .on_restricted(|a| {
            a.remove(FileCategory::Bsp, "placeholder.adb")?;
            a.append(FileCategory::TaskingBsp, ["a-intnam.ads"])?;
            Ok(())
        });

    Board::new(id, triple, FeaturePredicates::bareboard().with_fpu(true, false))
        .with_max_profile(max)
        .with_layer(board)
        .with_layer(family)
}

/// Assert that `higher` lists every file `lower` lists, except files a step
/// above `lower`'s level removed.
pub fn assert_monotonic(lower: &ResolvedManifest, higher: &ResolvedManifest) {
    assert!(
        lower.profile() < higher.profile(),
        "{} is not below {}",
        lower.profile(),
        higher.profile()
    );

    let removed: BTreeSet<(FileCategory, &str)> = higher
        .removals()
        .iter()
        .filter(|r| r.level > lower.profile())
        .map(|r| (r.category, r.file.as_str()))
        .collect();

    for (category, files) in lower.categories() {
        let kept = higher.files(category);
        for file in files {
            if removed.contains(&(category, file.as_str())) {
                continue;
            }
            assert!(
                kept.contains(file),
                "{}: `{}` in {} at {} but not at {}",
                higher.runtime(),
                file,
                category,
                lower.profile(),
                higher.profile()
            );
        }
    }
}
