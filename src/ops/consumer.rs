//! Consumers of resolved manifests.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use crate::ops::install_plan::{InstallPlan, SourceLayout};
use crate::resolver::{ResolvedManifest, Selection};
use crate::util::fs::{write_string, write_string_if_absent};

/// Receives frozen manifests once a batch has resolved without error.
pub trait ManifestConsumer {
    fn consume(&mut self, manifest: &ResolvedManifest) -> Result<()>;

    /// Called once with the selected shared-source profile, unless shared
    /// source generation is skipped.
    fn consume_selection(&mut self, _selection: &Selection, _plans: &[InstallPlan]) -> Result<()> {
        Ok(())
    }
}

/// Output directories of a build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputDirs {
    pub bsps: PathBuf,
    pub prjs: PathBuf,
    pub srcs: PathBuf,
}

impl OutputDirs {
    /// Default layout below `root`.
    pub fn under(root: &Path) -> Self {
        OutputDirs {
            bsps: root.join("BSPs"),
            prjs: root.join("lib").join("gnat"),
            srcs: root.join("include").join("rts-sources"),
        }
    }
}

#[derive(Serialize)]
struct RuntimeRecord<'a> {
    #[serde(flatten)]
    manifest: &'a ResolvedManifest,
    install: &'a InstallPlan,
    #[serde(skip_serializing_if = "Option::is_none")]
    install_dir: Option<PathBuf>,
}

#[derive(Serialize)]
struct SharedSources<'a> {
    #[serde(flatten)]
    selection: &'a Selection,
    layout: SourceLayout,
    entries: Vec<SharedEntry<'a>>,
}

#[derive(Serialize)]
struct SharedEntry<'a> {
    runtime: &'a str,
    destination: &'a str,
    source: &'a str,
}

/// Writes manifest JSON, generated configs and support files.
///
/// Per runtime: `<bsps>/<runtime>/manifest.json`, every generated config,
/// and `support/ada_source_path` plus `support/ada_object_path`. Support
/// files that already exist are left alone.
#[derive(Debug)]
pub struct PlanWriter {
    dirs: OutputDirs,
    prefix: Option<PathBuf>,
    written: Vec<PathBuf>,
}

impl PlanWriter {
    pub fn new(dirs: OutputDirs) -> Self {
        PlanWriter {
            dirs,
            prefix: None,
            written: Vec::new(),
        }
    }

    /// Record where runtimes will eventually be installed.
    pub fn with_prefix(mut self, prefix: Option<PathBuf>) -> Self {
        self.prefix = prefix;
        self
    }

    pub fn dirs(&self) -> &OutputDirs {
        &self.dirs
    }

    /// Every file written so far, in write order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    fn write(&mut self, path: PathBuf, contents: &str) -> Result<()> {
        write_string(&path, contents)?;
        tracing::debug!("wrote {}", path.display());
        self.written.push(path);
        Ok(())
    }

    fn write_if_absent(&mut self, path: PathBuf, contents: &str) -> Result<()> {
        if write_string_if_absent(&path, contents)? {
            tracing::debug!("wrote {}", path.display());
            self.written.push(path);
        } else {
            tracing::debug!("kept existing {}", path.display());
        }
        Ok(())
    }
}

impl ManifestConsumer for PlanWriter {
    fn consume(&mut self, manifest: &ResolvedManifest) -> Result<()> {
        let dir = self.dirs.bsps.join(manifest.runtime());
        let plan = InstallPlan::from_manifest(manifest);
        let record = RuntimeRecord {
            manifest,
            install: &plan,
            install_dir: self.prefix.as_ref().map(|p| p.join(manifest.runtime())),
        };
        let json = serde_json::to_string_pretty(&record)
            .with_context(|| format!("failed to serialize manifest for {}", manifest.runtime()))?;
        self.write(dir.join("manifest.json"), &json)?;

        for (name, config) in manifest.configs() {
            self.write(dir.join(name), config.as_str())?;
        }

        let support = dir.join("support");
        self.write_if_absent(support.join("ada_source_path"), &plan.layout.ada_source_path())?;
        self.write_if_absent(support.join("ada_object_path"), &plan.layout.ada_object_path())?;
        Ok(())
    }

    fn consume_selection(&mut self, selection: &Selection, plans: &[InstallPlan]) -> Result<()> {
        let layout = SourceLayout::for_profile(selection.profile);
        let entries = plans
            .iter()
            .flat_map(|plan| {
                plan.shared_entries().map(move |e| SharedEntry {
                    runtime: &plan.runtime,
                    destination: &e.destination,
                    source: &e.source,
                })
            })
            .collect();
        let shared = SharedSources {
            selection,
            layout: layout.clone(),
            entries,
        };
        let json = serde_json::to_string_pretty(&shared)
            .context("failed to serialize shared source selection")?;
        let name = format!("{}-{}", selection.target, selection.profile.runtime_name());
        self.write(self.dirs.srcs.join(&name).join("sources.json"), &json)?;
        self.write(
            self.dirs.prjs.join(&name).join("ada_source_path"),
            &layout.ada_source_path(),
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Profile, TargetTriple};
    use crate::resolver::resolve;
    use crate::test_support::{synthetic_board, synthetic_templates};
    use tempfile::TempDir;

    #[test]
    fn test_plan_writer_writes_runtime_dir() {
        let tmp = TempDir::new().unwrap();
        let board = synthetic_board("demo", "t1", Profile::FullTasking);
        let m = resolve(&board, Profile::FullTasking, &synthetic_templates()).unwrap();

        let mut writer = PlanWriter::new(OutputDirs::under(tmp.path()))
            .with_prefix(Some(PathBuf::from("/opt/rts")));
        writer.consume(&m).unwrap();

        let dir = tmp.path().join("BSPs/ravenscar-full-demo");
        let xml = std::fs::read_to_string(dir.join("runtime.xml")).unwrap();
        assert!(xml.contains("\"-lc\""));
        assert_eq!(
            std::fs::read_to_string(dir.join("support/ada_source_path")).unwrap(),
            "gnat\ngnarl\n"
        );

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(dir.join("manifest.json")).unwrap())
                .unwrap();
        assert_eq!(json["board"], "demo");
        assert_eq!(json["profile"], "full-tasking");
        assert_eq!(json["install_dir"], "/opt/rts/ravenscar-full-demo");
        assert_eq!(writer.written().len(), 4);
    }

    #[test]
    fn test_support_files_are_not_overwritten() {
        let tmp = TempDir::new().unwrap();
        let support = tmp.path().join("BSPs/zfp-demo/support");
        std::fs::create_dir_all(&support).unwrap();
        std::fs::write(support.join("ada_source_path"), "custom\n").unwrap();

        let board = synthetic_board("demo", "t1", Profile::Minimal);
        let m = resolve(&board, Profile::Minimal, &synthetic_templates()).unwrap();
        let mut writer = PlanWriter::new(OutputDirs::under(tmp.path()));
        writer.consume(&m).unwrap();

        assert_eq!(
            std::fs::read_to_string(support.join("ada_source_path")).unwrap(),
            "custom\n"
        );
    }

    #[test]
    fn test_consume_selection_writes_shared_tree() {
        let tmp = TempDir::new().unwrap();
        let board = synthetic_board("demo", "t1", Profile::RestrictedTasking);
        let m = resolve(&board, Profile::RestrictedTasking, &synthetic_templates()).unwrap();
        let plans = vec![InstallPlan::from_manifest(&m)];
        let selection = Selection {
            profile: Profile::RestrictedTasking,
            target: TargetTriple::new("t1"),
        };

        let mut writer = PlanWriter::new(OutputDirs::under(tmp.path()));
        writer.consume_selection(&selection, &plans).unwrap();

        let sources = tmp.path().join("include/rts-sources/t1-ravenscar-sfp/sources.json");
        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(sources).unwrap()).unwrap();
        assert_eq!(json["profile"], "restricted-tasking");
        assert_eq!(json["entries"][0]["destination"], "system.ads");
        assert!(tmp
            .path()
            .join("lib/gnat/t1-ravenscar-sfp/ada_source_path")
            .exists());
    }
}
