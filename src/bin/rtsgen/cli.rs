//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// rtsgen - Resolve per-board runtime library manifests
#[derive(Parser)]
#[command(name = "rtsgen")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate runtime manifests for one or more boards
    Build(BuildArgs),

    /// Show the resolved manifest of one board
    Show(ShowArgs),

    /// List supported boards
    Boards(BoardsArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct BuildArgs {
    /// Boards to generate runtimes for
    #[arg(required = true, value_name = "BOARD")]
    pub boards: Vec<String>,

    /// Only generate the board support packages
    #[arg(long)]
    pub bsps_only: bool,

    /// Print the resolved plan as JSON and write nothing
    #[arg(long)]
    pub plan: bool,

    /// Root of the output tree
    #[arg(long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Where board support packages are written
    #[arg(long, value_name = "DIR")]
    pub output_bsps: Option<PathBuf>,

    /// Where shared runtime project files are written
    #[arg(long, value_name = "DIR")]
    pub output_prjs: Option<PathBuf>,

    /// Where shared runtime sources are written
    #[arg(long, value_name = "DIR")]
    pub output_srcs: Option<PathBuf>,

    /// Where the built runtimes will be installed
    #[arg(long, value_name = "DIR")]
    pub prefix: Option<PathBuf>,

    /// Read templates from this directory instead of the built-in set
    #[arg(long, value_name = "DIR")]
    pub templates: Option<PathBuf>,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Board to resolve
    pub board: String,

    /// Profile to resolve (defaults to the board's strongest)
    #[arg(short, long)]
    pub profile: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Read templates from this directory instead of the built-in set
    #[arg(long, value_name = "DIR")]
    pub templates: Option<PathBuf>,
}

#[derive(Args)]
pub struct BoardsArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
