//! rtsgen - Board runtime configuration resolver
//!
//! This crate resolves, for each supported board and runtime profile, the
//! manifest of source files, substitutions, build flags and generated
//! configuration files a bareboard runtime library is built from.

pub mod boards;
pub mod core;
pub mod ops;
pub mod resolver;
pub mod util;

/// Test utilities for rtsgen unit tests.
///
/// This module is only available when compiling with `--cfg test`. It
/// provides synthetic boards and templates that exercise the amendment
/// chain independently of the board catalog.
#[cfg(test)]
pub mod test_support;

pub use core::{Board, FileCategory, Manifest, Profile, TargetTriple};
pub use resolver::{resolve, ResolveError, ResolvedManifest};
