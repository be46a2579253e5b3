//! Runtime capability profiles.
//!
//! Profiles are totally ordered: every restricted-tasking runtime contains the
//! minimal one, and every full-tasking runtime contains the restricted-tasking
//! one. Resolution at level N always replays levels below N first.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of the three nested runtime capability levels.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Profile {
    /// No tasking support (zero footprint)
    #[default]
    Minimal,
    /// Fixed-priority preemptive scheduling, static task set
    RestrictedTasking,
    /// Dynamic task attributes, exception propagation, tracebacks
    FullTasking,
}

impl Profile {
    /// All profiles, weakest first.
    pub const ALL: [Profile; 3] = [
        Profile::Minimal,
        Profile::RestrictedTasking,
        Profile::FullTasking,
    ];

    /// Canonical profile name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Profile::Minimal => "minimal",
            Profile::RestrictedTasking => "restricted-tasking",
            Profile::FullTasking => "full-tasking",
        }
    }

    /// Name of the runtime directory built for this profile.
    pub fn runtime_name(&self) -> &'static str {
        match self {
            Profile::Minimal => "zfp",
            Profile::RestrictedTasking => "ravenscar-sfp",
            Profile::FullTasking => "ravenscar-full",
        }
    }

    /// Name of the amendment step that builds this level.
    pub fn step_name(&self) -> &'static str {
        match self {
            Profile::Minimal => "amend-minimal",
            Profile::RestrictedTasking => "amend-restricted-tasking",
            Profile::FullTasking => "amend-full-tasking",
        }
    }

    /// Whether this profile ships the tasking closure.
    pub fn has_tasking(&self) -> bool {
        *self > Profile::Minimal
    }

    /// Every level from minimal up to and including `self`.
    pub fn levels(self) -> impl Iterator<Item = Profile> {
        Profile::ALL.into_iter().filter(move |p| *p <= self)
    }

    /// Classify a concrete system-configuration file name.
    ///
    /// `system-xi-cortexm4-full.ads` names a full-tasking runtime,
    /// `system-xi-arm-sfp.ads` or `system-xi-sparc-ravenscar.ads` a
    /// restricted-tasking one. Anything else is minimal.
    pub fn from_system_config(file: &str) -> Profile {
        let stem = file.strip_suffix(".ads").unwrap_or(file);
        let markers: Vec<&str> = stem.split('-').collect();
        if markers.contains(&"full") {
            Profile::FullTasking
        } else if markers.contains(&"sfp") || markers.contains(&"ravenscar") {
            Profile::RestrictedTasking
        } else {
            Profile::Minimal
        }
    }

    /// Source directories of the shared runtime tree needed by this profile.
    pub fn source_dirs(&self) -> &'static [&'static str] {
        if self.has_tasking() {
            &["gnat", "gnarl"]
        } else {
            &["gnat"]
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Profile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "minimal" | "zfp" => Ok(Profile::Minimal),
            "restricted-tasking" | "restricted" | "ravenscar-sfp" | "sfp" => {
                Ok(Profile::RestrictedTasking)
            }
            "full-tasking" | "full" | "ravenscar-full" => Ok(Profile::FullTasking),
            _ => Err(format!(
                "invalid profile '{}'; expected 'minimal', 'restricted-tasking', or 'full-tasking'",
                s
            )),
        }
    }
}
