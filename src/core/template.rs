//! Named template resources read by amendment steps.
//!
//! Templates are keyed by a relative path such as `arm/stm32/runtime.xml`.
//! The built-in set is compiled into the binary; a directory on disk may be
//! used instead.

use std::collections::BTreeMap;
use std::path::PathBuf;

use walkdir::WalkDir;

use crate::resolver::ResolveError;

/// A read-only store of template resources.
pub trait TemplateSource {
    /// Read a template verbatim.
    fn read(&self, name: &str) -> Result<String, ResolveError>;

    /// Names of every available template, sorted.
    fn names(&self) -> Vec<String>;
}

macro_rules! builtin {
    ($($name:literal),* $(,)?) => {
        &[$(($name, include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/templates/", $name)))),*]
    };
}

static BUILTIN: &[(&str, &str)] = builtin![
    "aarch64/qemu/runtime.xml",
    "aarch64/rpi3/runtime.xml",
    "arm/lm3s/runtime.xml",
    "arm/rpi2/runtime.xml",
    "arm/sam/hardfloat/runtime.xml",
    "arm/sam/softfloat/runtime.xml",
    "arm/stm32/runtime.xml",
    "arm/tms570/runtime.xml",
    "arm/zynq/runtime.xml",
    "native/runtime.xml",
    "powerpc/8349e/runtime.xml",
    "powerpc/8641d/runtime.xml",
    "powerpc/mpc5634/runtime.xml",
    "powerpc/p2020/runtime.xml",
    "powerpc/p5566/runtime.xml",
    "powerpc/prep/link-zcx.spec",
    "sparc/leon-zcx.specs",
    "sparc/leon/runtime.xml",
    "sparc/leon3/runtime.xml",
    "visium/mcm/runtime.xml",
    "visium/mcm/target_options.gpr",
];

/// Templates compiled into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinTemplates;

impl TemplateSource for BuiltinTemplates {
    fn read(&self, name: &str) -> Result<String, ResolveError> {
        BUILTIN
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, text)| text.to_string())
            .ok_or_else(|| ResolveError::MissingTemplate {
                name: name.to_string(),
            })
    }

    fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = BUILTIN.iter().map(|(n, _)| n.to_string()).collect();
        names.sort();
        names
    }
}

/// Templates read from a directory tree.
#[derive(Debug, Clone)]
pub struct DirTemplates {
    root: PathBuf,
}

impl DirTemplates {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        DirTemplates { root: root.into() }
    }
}

impl TemplateSource for DirTemplates {
    fn read(&self, name: &str) -> Result<String, ResolveError> {
        let path = self.root.join(name);
        std::fs::read_to_string(&path).map_err(|e| {
            tracing::debug!("cannot read template {}: {}", path.display(), e);
            match e.kind() {
                std::io::ErrorKind::NotFound => ResolveError::MissingTemplate {
                    name: name.to_string(),
                },
                _ => ResolveError::TemplateRead {
                    name: name.to_string(),
                    reason: e.to_string(),
                },
            }
        })
    }

    fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = WalkDir::new(&self.root)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter_map(|e| {
                e.path()
                    .strip_prefix(&self.root)
                    .ok()
                    .map(|p| p.to_string_lossy().replace('\\', "/"))
            })
            .collect();
        names.sort();
        names
    }
}

/// In-memory templates.
#[derive(Debug, Clone, Default)]
pub struct MemoryTemplates {
    entries: BTreeMap<String, String>,
}

impl MemoryTemplates {
    pub fn new() -> Self {
        MemoryTemplates::default()
    }

    /// Add or replace a template.
    pub fn with(mut self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(name, text);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, text: impl Into<String>) {
        self.entries.insert(name.into(), text.into());
    }
}

impl TemplateSource for MemoryTemplates {
    fn read(&self, name: &str) -> Result<String, ResolveError> {
        self.entries
            .get(name)
            .cloned()
            .ok_or_else(|| ResolveError::MissingTemplate {
                name: name.to_string(),
            })
    }

    fn names(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }
}
