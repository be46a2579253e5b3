//! `rtsgen build` command

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::cli::BuildArgs;
use crate::commands::{current_config, template_source, GlobalOpts};
use rtsgen::ops::{build, plan, BuildOptions, OutputDirs, PlanWriter};
use rtsgen::util::Status;

pub fn execute(args: BuildArgs, global: &GlobalOpts) -> Result<()> {
    let shell = global.shell();
    let (cwd, config) = current_config()?;
    let templates = template_source(args.templates, &config, &cwd)?;

    if config.build.bsps_only && !args.bsps_only {
        shell.note("bsps_only set in configuration; skipping shared sources");
    }

    let opts = BuildOptions {
        boards: args.boards,
        bsps_only: args.bsps_only || config.build.bsps_only,
    };

    if args.plan {
        let plan = plan(&opts, templates.as_ref())?;
        let json = serde_json::to_string_pretty(&plan).context("failed to serialize plan")?;
        println!("{}", json);
        return Ok(());
    }

    // Output locations: CLI > config > default layout
    let root = args
        .output
        .or(config.output.dir)
        .unwrap_or_else(|| PathBuf::from("install"));
    let root = cwd.join(root);
    let defaults = OutputDirs::under(&root);
    let dirs = OutputDirs {
        bsps: args.output_bsps.or(config.output.bsps).map_or(defaults.bsps, |d| cwd.join(d)),
        prjs: args.output_prjs.or(config.output.prjs).map_or(defaults.prjs, |d| cwd.join(d)),
        srcs: args.output_srcs.or(config.output.srcs).map_or(defaults.srcs, |d| cwd.join(d)),
    };
    let prefix = args.prefix.or(config.output.prefix);

    let mut writer = PlanWriter::new(dirs).with_prefix(prefix);
    let result = build(&opts, templates.as_ref(), &mut writer)?;

    for manifest in &result.runtimes {
        shell.status(
            Status::Created,
            format!("{} ({})", manifest.runtime(), manifest.build_flags().target()),
        );
    }
    match &result.selection {
        Some(selection) => shell.status(
            Status::Selected,
            format!("{} shared sources for {}", selection.profile, selection.target),
        ),
        None => shell.status(Status::Skipped, "shared source generation"),
    }
    shell.status(
        Status::Finished,
        format!(
            "{} runtime(s), {} file(s) in {}",
            result.runtimes.len(),
            writer.written().len(),
            root.display()
        ),
    );

    Ok(())
}
