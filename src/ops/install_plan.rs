//! Install plans derived from resolved manifests.
//!
//! A plan maps every file an installer must place to the source actually
//! copied. Substituted files are installed under their logical name; the
//! replacement is never installed under its own name unless it is also
//! listed independently.

use serde::Serialize;

use crate::core::{FileCategory, Profile};
use crate::resolver::ResolvedManifest;

/// One file to install.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstallEntry {
    /// Category the file is listed in. `None` for shared-tree entries that
    /// only exist as substitution keys.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<FileCategory>,
    /// Logical name the file is installed under
    pub destination: String,
    /// File actually copied
    pub source: String,
}

impl InstallEntry {
    /// Whether the installed source differs from the destination name.
    pub fn is_substituted(&self) -> bool {
        self.source != self.destination
    }
}

/// Source and object directories of a runtime project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceLayout {
    pub source_dirs: Vec<String>,
    pub object_dir: String,
}

impl SourceLayout {
    pub fn for_profile(profile: Profile) -> Self {
        SourceLayout {
            source_dirs: profile.source_dirs().iter().map(|d| d.to_string()).collect(),
            object_dir: "adalib".to_string(),
        }
    }

    /// Contents of the `ada_source_path` support file.
    pub fn ada_source_path(&self) -> String {
        self.source_dirs.iter().map(|d| format!("{}\n", d)).collect()
    }

    /// Contents of the `ada_object_path` support file.
    pub fn ada_object_path(&self) -> String {
        format!("{}\n", self.object_dir)
    }
}

/// Everything an installer needs for one runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstallPlan {
    pub runtime: String,
    pub profile: Profile,
    pub layout: SourceLayout,
    pub entries: Vec<InstallEntry>,
}

impl InstallPlan {
    /// Derive the plan for a resolved manifest.
    ///
    /// Listed files come first in category then append order, followed by
    /// unlisted substitution keys sorted by logical name.
    pub fn from_manifest(manifest: &ResolvedManifest) -> Self {
        let mut entries = Vec::new();

        for (category, files) in manifest.categories() {
            for file in files {
                let source = manifest.substitution(file).unwrap_or(file);
                entries.push(InstallEntry {
                    category: Some(category),
                    destination: file.clone(),
                    source: source.to_string(),
                });
            }
        }

        for (logical, replacement) in manifest.substitutions() {
            let listed = manifest
                .categories()
                .any(|(_, files)| files.iter().any(|f| f == logical));
            if !listed {
                entries.push(InstallEntry {
                    category: None,
                    destination: logical.to_string(),
                    source: replacement.to_string(),
                });
            }
        }

        InstallPlan {
            runtime: manifest.runtime().to_string(),
            profile: manifest.profile(),
            layout: SourceLayout::for_profile(manifest.profile()),
            entries,
        }
    }

    /// Entry installed under `destination`, if any.
    pub fn entry(&self, destination: &str) -> Option<&InstallEntry> {
        self.entries.iter().find(|e| e.destination == destination)
    }

    /// Entries belonging to the shared source tree.
    pub fn shared_entries(&self) -> impl Iterator<Item = &InstallEntry> {
        self.entries.iter().filter(|e| e.category.is_none())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::resolve;
    use crate::test_support::{synthetic_board, synthetic_templates};

    #[test]
    fn test_substitution_keys_become_shared_entries() {
        let board = synthetic_board("demo", "t1", Profile::FullTasking);
        let m = resolve(&board, Profile::RestrictedTasking, &synthetic_templates()).unwrap();
        let plan = InstallPlan::from_manifest(&m);

        let system = plan.entry("system.ads").unwrap();
        assert_eq!(system.category, None);
        assert_eq!(system.source, "system-demo-sfp.ads");
        assert!(system.is_substituted());

        // the replacement is not installed under its own name
        assert!(plan.entry("system-demo-sfp.ads").is_none());
        assert_eq!(plan.shared_entries().count(), 1);
    }

    #[test]
    fn test_listed_files_keep_category_order() {
        let board = synthetic_board("demo", "t1", Profile::FullTasking);
        let m = resolve(&board, Profile::FullTasking, &synthetic_templates()).unwrap();
        let plan = InstallPlan::from_manifest(&m);

        let listed: Vec<_> = plan
            .entries
            .iter()
            .filter_map(|e| e.category.map(|c| (c, e.destination.as_str())))
            .collect();
        assert_eq!(listed[0], (FileCategory::Common, "demo.ads"));
        assert!(listed.contains(&(FileCategory::TaskingCommon, "s-traceb.adb")));
        assert!(!listed.iter().any(|(_, f)| *f == "placeholder.adb"));
    }

    #[test]
    fn test_listed_substituted_file() {
        let board = crate::boards::lookup("stm32f4").unwrap();
        let m = resolve(&board, Profile::RestrictedTasking, &crate::core::BuiltinTemplates).unwrap();
        let plan = InstallPlan::from_manifest(&m);

        let intnam = plan.entry("a-intnam.ads").unwrap();
        assert_eq!(intnam.category, Some(FileCategory::TaskingBsp));
        assert!(intnam.is_substituted());
    }

    #[test]
    fn test_source_layout() {
        let minimal = SourceLayout::for_profile(Profile::Minimal);
        assert_eq!(minimal.ada_source_path(), "gnat\n");
        assert_eq!(minimal.ada_object_path(), "adalib\n");

        let sfp = SourceLayout::for_profile(Profile::RestrictedTasking);
        assert_eq!(sfp.ada_source_path(), "gnat\ngnarl\n");
    }
}
