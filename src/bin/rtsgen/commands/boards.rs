//! `rtsgen boards` command

use anyhow::{Context, Result};

use crate::cli::BoardsArgs;
use rtsgen::ops::{format_board_list, list_boards};

pub fn execute(args: BoardsArgs) -> Result<()> {
    let boards = list_boards();

    if args.json {
        let json = serde_json::to_string_pretty(&boards).context("failed to serialize boards")?;
        println!("{}", json);
    } else {
        print!("{}", format_board_list(&boards));
    }

    Ok(())
}
