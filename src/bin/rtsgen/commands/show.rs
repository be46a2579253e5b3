//! `rtsgen show` command

use anyhow::{anyhow, Context, Result};

use crate::cli::ShowArgs;
use crate::commands::{current_config, template_source, GlobalOpts};
use rtsgen::boards;
use rtsgen::core::Profile;
use rtsgen::ops::format_manifest;
use rtsgen::resolver::resolve;
use rtsgen::util::Status;

pub fn execute(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    let shell = global.shell();
    let (cwd, config) = current_config()?;
    let templates = template_source(args.templates, &config, &cwd)?;

    let board = boards::lookup(&args.board)?;
    let profile = match args.profile {
        Some(p) => p.parse::<Profile>().map_err(|e| anyhow!("{}", e))?,
        None => board.max_profile(),
    };

    if shell.is_verbose() {
        shell.status(Status::Resolving, format!("{} at {}", board.id(), profile));
    }
    let manifest = resolve(&board, profile, templates.as_ref())?;

    if args.json {
        let json = serde_json::to_string_pretty(&manifest).context("failed to serialize manifest")?;
        println!("{}", json);
    } else {
        print!("{}", format_manifest(&manifest));
    }

    Ok(())
}
