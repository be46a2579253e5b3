//! Build target triples.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The toolchain target a runtime is compiled for (e.g. `arm-eabi`).
///
/// Hosted native boards use [`TargetTriple::native`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TargetTriple {
    /// The triple string (e.g., "arm-eabi", "powerpc-elf")
    pub triple: String,
}

impl TargetTriple {
    /// Triple reported by native boards.
    pub const NATIVE: &'static str = "native";

    /// Create a new target triple.
    pub fn new(triple: impl Into<String>) -> Self {
        TargetTriple {
            triple: triple.into(),
        }
    }

    /// The triple of the host toolchain.
    pub fn native() -> Self {
        TargetTriple::new(Self::NATIVE)
    }

    /// Get the triple as a string slice.
    pub fn as_str(&self) -> &str {
        &self.triple
    }

    /// Check if this is the host toolchain.
    pub fn is_native(&self) -> bool {
        self.triple == Self::NATIVE
    }

    /// Get the architecture component (`arm` for `arm-eabi`).
    pub fn arch(&self) -> &str {
        self.triple.split('-').next().unwrap_or(&self.triple)
    }
}

impl fmt::Display for TargetTriple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.triple)
    }
}

impl From<&str> for TargetTriple {
    fn from(s: &str) -> Self {
        TargetTriple::new(s)
    }
}

impl From<String> for TargetTriple {
    fn from(s: String) -> Self {
        TargetTriple::new(s)
    }
}
