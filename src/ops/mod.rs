//! High-level operations.
//!
//! This module contains the implementation of rtsgen commands.

pub mod build_rts;
pub mod consumer;
pub mod describe;
pub mod install_plan;

pub use build_rts::{build, plan, BuildOptions, BuildPlan};
pub use consumer::{ManifestConsumer, OutputDirs, PlanWriter};
pub use describe::{format_board_list, format_manifest, list_boards, BoardInfo};
pub use install_plan::{InstallEntry, InstallPlan, SourceLayout};
