//! Core data structures for rtsgen.
//!
//! This module contains the foundational types used throughout rtsgen:
//! - Profiles and board feature predicates
//! - Boards and their amendment ancestry
//! - The manifest accumulated for one (board, profile) pair
//! - Template resources and generated configuration text

pub mod board;
pub mod config_text;
pub mod manifest;
pub mod predicates;
pub mod profile;
pub mod template;
pub mod triple;

pub use board::{AmendFn, Amendment, Board, Layer, LayerKind};
pub use config_text::{ConfigText, TextEdit};
pub use manifest::{BuildFlags, FileCategory, Manifest, Removal};
pub use predicates::FeaturePredicates;
pub use profile::Profile;
pub use template::{BuiltinTemplates, DirTemplates, MemoryTemplates, TemplateSource};
pub use triple::TargetTriple;
