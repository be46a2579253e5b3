//! Boards and their amendment ancestry.
//!
//! A board's ancestry is an ordered list of layers: the base defaults, the
//! architecture families from most general to most specific, then the board
//! itself. Each layer holds at most one delta per profile level. A missing
//! delta passes through.

use std::fmt;
use std::sync::Arc;

use crate::core::config_text::ConfigText;
use crate::core::manifest::{FileCategory, Manifest};
use crate::core::template::TemplateSource;
use crate::core::{FeaturePredicates, Profile, TargetTriple};
use crate::resolver::ResolveError;

/// A delta applied by one layer at one profile level.
pub type AmendFn = Arc<dyn Fn(&mut Amendment<'_>) -> Result<(), ResolveError> + Send + Sync>;

/// Position of a layer in the ancestry.
///
/// Layers run in this order whatever order they were declared in.
/// `Family(1)` is the most general family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LayerKind {
    Base,
    Family(u8),
    Board,
}

/// One ancestry layer: a name and its per-level deltas.
#[derive(Clone)]
pub struct Layer {
    name: String,
    kind: LayerKind,
    minimal: Option<AmendFn>,
    restricted: Option<AmendFn>,
    full: Option<AmendFn>,
}

impl Layer {
    fn new(name: impl Into<String>, kind: LayerKind) -> Self {
        Layer {
            name: name.into(),
            kind,
            minimal: None,
            restricted: None,
            full: None,
        }
    }

    /// The base-defaults layer.
    pub fn base(name: impl Into<String>) -> Self {
        Layer::new(name, LayerKind::Base)
    }

    /// An architecture-family layer at the given generality depth.
    pub fn family(name: impl Into<String>, depth: u8) -> Self {
        Layer::new(name, LayerKind::Family(depth))
    }

    /// The board-specific layer.
    pub fn board(name: impl Into<String>) -> Self {
        Layer::new(name, LayerKind::Board)
    }

    /// Set the `amend-minimal` delta.
    pub fn on_minimal<F>(mut self, f: F) -> Self
    where
        F: Fn(&mut Amendment<'_>) -> Result<(), ResolveError> + Send + Sync + 'static,
    {
        self.minimal = Some(Arc::new(f));
        self
    }

    /// Set the `amend-restricted-tasking` delta.
    pub fn on_restricted<F>(mut self, f: F) -> Self
    where
        F: Fn(&mut Amendment<'_>) -> Result<(), ResolveError> + Send + Sync + 'static,
    {
        self.restricted = Some(Arc::new(f));
        self
    }

    /// Set the `amend-full-tasking` delta.
    pub fn on_full<F>(mut self, f: F) -> Self
    where
        F: Fn(&mut Amendment<'_>) -> Result<(), ResolveError> + Send + Sync + 'static,
    {
        self.full = Some(Arc::new(f));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> LayerKind {
        self.kind
    }

    /// The delta this layer applies at `level`, if any.
    pub fn delta(&self, level: Profile) -> Option<&AmendFn> {
        match level {
            Profile::Minimal => self.minimal.as_ref(),
            Profile::RestrictedTasking => self.restricted.as_ref(),
            Profile::FullTasking => self.full.as_ref(),
        }
    }
}

impl fmt::Debug for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Layer")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("minimal", &self.minimal.is_some())
            .field("restricted", &self.restricted.is_some())
            .field("full", &self.full.is_some())
            .finish()
    }
}

/// A concrete hardware/toolchain target.
#[derive(Debug, Clone)]
pub struct Board {
    id: String,
    triple: TargetTriple,
    predicates: FeaturePredicates,
    max_profile: Profile,
    ancestry: Vec<Layer>,
}

impl Board {
    /// Create a board with an empty ancestry supporting only the minimal profile.
    pub fn new(
        id: impl Into<String>,
        triple: impl Into<TargetTriple>,
        predicates: FeaturePredicates,
    ) -> Self {
        Board {
            id: id.into(),
            triple: triple.into(),
            predicates,
            max_profile: Profile::Minimal,
            ancestry: Vec::new(),
        }
    }

    /// Set the highest profile the board ships.
    pub fn with_max_profile(mut self, profile: Profile) -> Self {
        self.max_profile = profile;
        self
    }

    /// Add a layer to the ancestry, keeping base → family → board order.
    pub fn with_layer(mut self, layer: Layer) -> Self {
        let pos = self
            .ancestry
            .iter()
            .position(|l| l.kind > layer.kind)
            .unwrap_or(self.ancestry.len());
        self.ancestry.insert(pos, layer);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn triple(&self) -> &TargetTriple {
        &self.triple
    }

    pub fn predicates(&self) -> &FeaturePredicates {
        &self.predicates
    }

    pub fn max_profile(&self) -> Profile {
        self.max_profile
    }

    /// Profiles the board ships, weakest first.
    pub fn profiles(&self) -> impl Iterator<Item = Profile> {
        self.max_profile.levels()
    }

    /// Layers in invocation order.
    pub fn ancestry(&self) -> &[Layer] {
        &self.ancestry
    }
}

/// What an amendment delta sees: the manifest under construction plus
/// read-only access to the board and the template store.
pub struct Amendment<'a> {
    manifest: &'a mut Manifest,
    board: &'a Board,
    templates: &'a dyn TemplateSource,
    level: Profile,
    layer: &'a str,
}

impl<'a> Amendment<'a> {
    pub(crate) fn new(
        manifest: &'a mut Manifest,
        board: &'a Board,
        templates: &'a dyn TemplateSource,
        level: Profile,
        layer: &'a str,
    ) -> Self {
        Amendment {
            manifest,
            board,
            templates,
            level,
            layer,
        }
    }

    pub fn board_id(&self) -> &str {
        self.board.id()
    }

    pub fn predicates(&self) -> &FeaturePredicates {
        self.board.predicates()
    }

    /// Profile level being amended.
    pub fn level(&self) -> Profile {
        self.level
    }

    /// Manifest as amended so far.
    pub fn manifest(&self) -> &Manifest {
        &*self.manifest
    }

    pub fn append<I, S>(&mut self, category: FileCategory, files: I) -> Result<(), ResolveError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.manifest.append(category, files)
    }

    pub fn append_if_absent(&mut self, category: FileCategory, file: impl Into<String>) {
        self.manifest.append_if_absent(category, file);
    }

    pub fn remove(&mut self, category: FileCategory, file: &str) -> Result<(), ResolveError> {
        tracing::debug!(
            board = self.board.id(),
            layer = self.layer,
            "removing {} from {}",
            file,
            category
        );
        self.manifest.remove(category, file)
    }

    /// Write substitution entries. Later writes replace earlier ones.
    pub fn substitute<I, K, V>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (logical, replacement) in pairs {
            self.manifest.substitute(logical, replacement);
        }
    }

    pub fn append_flags<I, S>(&mut self, name: &str, flags: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.manifest.append_flags(name, flags);
    }

    /// Generate config `config` from template `template` unchanged.
    pub fn load_config(&mut self, config: &str, template: &str) -> Result<(), ResolveError> {
        self.load_config_with(config, template, std::iter::empty::<(&str, &str)>())
    }

    /// Generate config `config` from template `template` with edits applied.
    pub fn load_config_with<I, P, R>(
        &mut self,
        config: &str,
        template: &str,
        edits: I,
    ) -> Result<(), ResolveError>
    where
        I: IntoIterator<Item = (P, R)>,
        P: Into<String>,
        R: Into<String>,
    {
        let text = self.templates.read(template)?;
        let rendered =
            ConfigText::render(text, edits).map_err(|e| ResolveError::SubstitutionMismatch {
                config: config.to_string(),
                pattern: e.pattern,
            })?;
        self.manifest.set_config(config, rendered);
        Ok(())
    }

    /// Edit previously generated config text.
    pub fn edit_config(
        &mut self,
        config: &str,
        pattern: impl Into<String>,
        replacement: impl Into<String>,
    ) -> Result<(), ResolveError> {
        self.manifest.edit_config(config, pattern, replacement)
    }
}
