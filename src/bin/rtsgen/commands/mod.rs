//! Command implementations

pub mod boards;
pub mod build;
pub mod completions;
pub mod show;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use rtsgen::core::{BuiltinTemplates, DirTemplates, TemplateSource};
use rtsgen::util::config::{global_config_path, load_config, project_config_path};
use rtsgen::util::{ColorChoice, Config, Shell};

/// Flags shared by every command.
pub struct GlobalOpts {
    pub verbose: bool,
    pub no_color: bool,
}

impl GlobalOpts {
    pub fn shell(&self) -> Shell {
        let color = if self.no_color {
            ColorChoice::Never
        } else {
            ColorChoice::Auto
        };
        Shell::new(self.verbose, color)
    }
}

/// Global config merged with `rtsgen.toml` from the working directory.
pub fn current_config() -> Result<(PathBuf, Config)> {
    let cwd = std::env::current_dir().context("failed to determine current directory")?;
    let global = global_config_path();
    let config = load_config(global.as_deref(), &project_config_path(&cwd));
    Ok((cwd, config))
}

/// The template set to resolve against. A directory given on the command
/// line wins over the configured one; relative configured paths are taken
/// from the working directory.
pub fn template_source(
    cli: Option<PathBuf>,
    config: &Config,
    cwd: &Path,
) -> Result<Box<dyn TemplateSource>> {
    let dir = cli.or_else(|| config.templates.dir.as_ref().map(|d| cwd.join(d)));
    match dir {
        Some(dir) => {
            if !dir.is_dir() {
                anyhow::bail!("template directory not found: {}", dir.display());
            }
            tracing::debug!("using templates from {}", dir.display());
            Ok(Box::new(DirTemplates::new(dir)))
        }
        None => Ok(Box::new(BuiltinTemplates)),
    }
}
