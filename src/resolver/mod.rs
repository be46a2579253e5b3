//! Manifest resolution.
//!
//! This module turns a board and a profile into a frozen manifest, and picks
//! the profile of the shared runtime sources for a batch of boards. Both are
//! pure: all template I/O goes through a [`TemplateSource`] handed in by the
//! caller.
//!
//! [`TemplateSource`]: crate::core::TemplateSource

pub mod errors;
pub mod resolve;
pub mod select;

pub use errors::ResolveError;
pub use resolve::{resolve, resolve_all, ResolvedManifest};
pub use select::{select_profile, Selection};
