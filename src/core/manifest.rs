//! The build manifest accumulated for one (board, profile) pair.
//!
//! A manifest is created empty with the board's target triple, amended by
//! every layer of the board's ancestry, and then frozen. Only the amendment
//! chain mutates it.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::core::config_text::{ConfigText, TextEdit};
use crate::core::{Profile, TargetTriple};
use crate::resolver::ResolveError;

/// File-list categories. The first three form the non-tasking closure,
/// the `Tasking*` ones the tasking closure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FileCategory {
    Common,
    Arch,
    Bsp,
    TaskingCommon,
    TaskingArch,
    TaskingBsp,
}

impl FileCategory {
    pub const ALL: [FileCategory; 6] = [
        FileCategory::Common,
        FileCategory::Arch,
        FileCategory::Bsp,
        FileCategory::TaskingCommon,
        FileCategory::TaskingArch,
        FileCategory::TaskingBsp,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FileCategory::Common => "common",
            FileCategory::Arch => "arch",
            FileCategory::Bsp => "bsp",
            FileCategory::TaskingCommon => "tasking-common",
            FileCategory::TaskingArch => "tasking-arch",
            FileCategory::TaskingBsp => "tasking-bsp",
        }
    }

    /// Whether the category belongs to the tasking closure.
    pub fn is_tasking(&self) -> bool {
        matches!(
            self,
            FileCategory::TaskingCommon | FileCategory::TaskingArch | FileCategory::TaskingBsp
        )
    }

    /// Runtime source directory files of this category are installed into.
    pub fn source_dir(&self) -> &'static str {
        if self.is_tasking() {
            "gnarl"
        } else {
            "gnat"
        }
    }
}

impl fmt::Display for FileCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A file name removed by an amendment step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Removal {
    pub category: FileCategory,
    pub file: String,
    /// Profile level whose step performed the removal
    pub level: Profile,
}

/// Target triple plus named flag lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildFlags {
    target: TargetTriple,
    #[serde(flatten)]
    lists: BTreeMap<String, Vec<String>>,
}

impl BuildFlags {
    fn new(target: TargetTriple) -> Self {
        BuildFlags {
            target,
            lists: BTreeMap::new(),
        }
    }

    /// The target triple. Fixed when the manifest is created.
    pub fn target(&self) -> &TargetTriple {
        &self.target
    }

    /// A named flag list, empty when never appended to.
    pub fn list(&self, name: &str) -> &[String] {
        self.lists.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All named flag lists.
    pub fn lists(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.lists.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

/// The mutable accumulation target of an amendment chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Manifest {
    files: BTreeMap<FileCategory, Vec<String>>,
    substitutions: BTreeMap<String, String>,
    build_flags: BuildFlags,
    configs: BTreeMap<String, ConfigText>,
    removals: Vec<Removal>,
    #[serde(skip)]
    level: Profile,
}

impl Manifest {
    /// Create an empty manifest for the given target.
    pub fn new(target: TargetTriple) -> Self {
        Manifest {
            files: FileCategory::ALL
                .into_iter()
                .map(|c| (c, Vec::new()))
                .collect(),
            substitutions: BTreeMap::new(),
            build_flags: BuildFlags::new(target),
            configs: BTreeMap::new(),
            removals: Vec::new(),
            level: Profile::Minimal,
        }
    }

    /// Mark the profile level whose steps run next.
    pub(crate) fn enter_level(&mut self, level: Profile) {
        self.level = level;
    }

    // ------------------------------------------------------------------
    // File lists
    // ------------------------------------------------------------------

    /// Files of a category, in append order.
    pub fn files(&self, category: FileCategory) -> &[String] {
        self.files.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether a category lists `file`.
    pub fn contains(&self, category: FileCategory, file: &str) -> bool {
        self.files(category).iter().any(|f| f == file)
    }

    /// Append files to a category. Appending a listed name is an error.
    pub fn append<I, S>(&mut self, category: FileCategory, files: I) -> Result<(), ResolveError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let list = self.files.entry(category).or_default();
        for file in files {
            let file = file.into();
            if list.contains(&file) {
                return Err(ResolveError::DuplicateFile { file, category });
            }
            list.push(file);
        }
        Ok(())
    }

    /// Append a file unless the category already lists it.
    ///
    /// Returns whether the file was appended.
    pub fn append_if_absent(&mut self, category: FileCategory, file: impl Into<String>) -> bool {
        let file = file.into();
        let list = self.files.entry(category).or_default();
        if list.contains(&file) {
            false
        } else {
            list.push(file);
            true
        }
    }

    /// Remove a file by name. Removing an absent name is an error.
    pub fn remove(&mut self, category: FileCategory, file: &str) -> Result<(), ResolveError> {
        let list = self.files.entry(category).or_default();
        let Some(pos) = list.iter().position(|f| f == file) else {
            return Err(ResolveError::InvalidRemoval {
                file: file.to_string(),
                category,
            });
        };
        list.remove(pos);
        self.removals.push(Removal {
            category,
            file: file.to_string(),
            level: self.level,
        });
        Ok(())
    }

    /// Names removed so far, in removal order.
    pub fn removals(&self) -> &[Removal] {
        &self.removals
    }

    // ------------------------------------------------------------------
    // Substitutions
    // ------------------------------------------------------------------

    /// Install `replacement` under the logical name `logical`.
    ///
    /// Returns the replaced value when the key was already set.
    pub fn substitute(
        &mut self,
        logical: impl Into<String>,
        replacement: impl Into<String>,
    ) -> Option<String> {
        self.substitutions.insert(logical.into(), replacement.into())
    }

    /// Replacement for a logical name.
    pub fn substitution(&self, logical: &str) -> Option<&str> {
        self.substitutions.get(logical).map(String::as_str)
    }

    /// All substitution entries, sorted by logical name.
    pub fn substitutions(&self) -> impl Iterator<Item = (&str, &str)> {
        self.substitutions
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    // ------------------------------------------------------------------
    // Build flags
    // ------------------------------------------------------------------

    pub fn build_flags(&self) -> &BuildFlags {
        &self.build_flags
    }

    /// Append to a named flag list.
    pub fn append_flags<I, S>(&mut self, name: &str, flags: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.build_flags
            .lists
            .entry(name.to_string())
            .or_default()
            .extend(flags.into_iter().map(Into::into));
    }

    // ------------------------------------------------------------------
    // Generated configs
    // ------------------------------------------------------------------

    /// Set generated config text, replacing any earlier content and edits.
    pub fn set_config(&mut self, name: impl Into<String>, config: ConfigText) {
        self.configs.insert(name.into(), config);
    }

    /// Edit previously generated config text.
    pub fn edit_config(
        &mut self,
        name: &str,
        pattern: impl Into<String>,
        replacement: impl Into<String>,
    ) -> Result<(), ResolveError> {
        let config = self
            .configs
            .get_mut(name)
            .ok_or_else(|| ResolveError::MissingConfig {
                config: name.to_string(),
            })?;
        config
            .apply(TextEdit::new(pattern, replacement))
            .map_err(|e| ResolveError::SubstitutionMismatch {
                config: name.to_string(),
                pattern: e.pattern,
            })?;
        Ok(())
    }

    /// Generated text of a config file.
    pub fn config(&self, name: &str) -> Option<&str> {
        self.configs.get(name).map(ConfigText::as_str)
    }

    /// All generated configs, sorted by file name.
    pub fn configs(&self) -> impl Iterator<Item = (&str, &ConfigText)> {
        self.configs.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest() -> Manifest {
        Manifest::new(TargetTriple::new("arm-eabi"))
    }

    #[test]
    fn test_append_keeps_order_and_rejects_duplicates() {
        let mut m = manifest();
        m.append(FileCategory::Bsp, ["start-rom.S", "start-ram.S"])
            .unwrap();
        assert_eq!(m.files(FileCategory::Bsp), ["start-rom.S", "start-ram.S"]);

        let err = m.append(FileCategory::Bsp, ["start-rom.S"]).unwrap_err();
        assert!(matches!(err, ResolveError::DuplicateFile { .. }));
    }

    #[test]
    fn test_append_if_absent() {
        let mut m = manifest();
        assert!(m.append_if_absent(FileCategory::TaskingArch, "s-bbpara.ads"));
        assert!(!m.append_if_absent(FileCategory::TaskingArch, "s-bbpara.ads"));
        assert_eq!(m.files(FileCategory::TaskingArch).len(), 1);
    }

    #[test]
    fn test_remove_absent_file_is_invalid() {
        let mut m = manifest();
        let err = m.remove(FileCategory::Arch, "x.s").unwrap_err();
        assert_eq!(
            err,
            ResolveError::InvalidRemoval {
                file: "x.s".to_string(),
                category: FileCategory::Arch,
            }
        );
        assert!(m.removals().is_empty());
    }

    #[test]
    fn test_remove_records_level() {
        let mut m = manifest();
        m.append(FileCategory::TaskingCommon, ["s-bb.ads"]).unwrap();
        m.enter_level(Profile::RestrictedTasking);
        m.remove(FileCategory::TaskingCommon, "s-bb.ads").unwrap();
        assert!(!m.contains(FileCategory::TaskingCommon, "s-bb.ads"));
        assert_eq!(m.removals()[0].level, Profile::RestrictedTasking);
    }

    #[test]
    fn test_substitution_last_writer_wins() {
        let mut m = manifest();
        assert_eq!(m.substitute("system.ads", "system-xi-arm.ads"), None);
        assert_eq!(
            m.substitute("system.ads", "system-xi-arm-sfp.ads").as_deref(),
            Some("system-xi-arm.ads")
        );
        assert_eq!(m.substitution("system.ads"), Some("system-xi-arm-sfp.ads"));
    }

    #[test]
    fn test_flags_append() {
        let mut m = manifest();
        m.append_flags("c_flags", ["-DLEON"]);
        m.append_flags("c_flags", ["-DLEON3"]);
        assert_eq!(m.build_flags().list("c_flags"), ["-DLEON", "-DLEON3"]);
        assert!(m.build_flags().list("ada_flags").is_empty());
        assert_eq!(m.build_flags().target().as_str(), "arm-eabi");
    }

    #[test]
    fn test_edit_config() {
        let mut m = manifest();
        let err = m.edit_config("runtime.xml", "a", "b").unwrap_err();
        assert!(matches!(err, ResolveError::MissingConfig { .. }));

        m.set_config("runtime.xml", ConfigText::new("\"-nolibc\", \"-lgnat\""));
        m.edit_config("runtime.xml", "\"-nolibc\", ", "\"-lc\", ")
            .unwrap();
        assert_eq!(m.config("runtime.xml"), Some("\"-lc\", \"-lgnat\""));

        let err = m.edit_config("runtime.xml", "cortex-m4", "cortex-m7").unwrap_err();
        assert!(matches!(err, ResolveError::SubstitutionMismatch { .. }));
    }
}
