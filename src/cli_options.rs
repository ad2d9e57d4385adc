/*
cli_options.rs

Copyright 2025 Hervé Quatremain

This file is part of Catangen.

Catangen is free software: you can redistribute it and/or modify it under the
terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.

Catangen is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE. See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
Catangen. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

//! Process command-line options.
//!
//! # Examples
//!
//! Generate a board with the desert in the center and no adjacent identical resources:
//!
//! ```text
//! $ catangen --keep-desert-center --prevent-same-resources
//! ```
//!
//! The last line of the output is the share string of the board.
//! Display the same board again, as JSON:
//!
//! ```text
//! $ catangen -f json -l 'rs=3871145260139287013&ns=9071562981405223741&psr=1&kdc=1'
//! ```
//!
//! Generate 100 boards with tight corner bounds and print search statistics:
//!
//! ```text
//! $ catangen -c 100 -s --pip-min 5 --pip-max 11
//! ```

use clap::{Parser, ValueEnum};
use log::debug;
use std::env;

use crate::config::{BoardConfig, COPYRIGHT_NOTICE};
use crate::draw;
use crate::error::Result;
use crate::generator::board::{Board, BoardGenerator};
use crate::generator::grid;

/// Output format.
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Generate random boards for the hexagonal island game.
#[derive(Parser)]
#[command(about, long_about = None, version, long_version = COPYRIGHT_NOTICE)]
struct Args {
    /// Share string of a previous board. Other options override its values
    #[arg(short, long)]
    link: Option<String>,

    /// Avoid adjacent tiles with the same resource
    #[arg(long, default_value_t = false)]
    prevent_same_resources: bool,

    /// Put the desert on the center tile
    #[arg(long, default_value_t = false)]
    keep_desert_center: bool,

    /// Allow adjacent tiles with the same number
    #[arg(long, default_value_t = false)]
    allow_same_numbers: bool,

    /// Lowest pip sum allowed on an interior corner
    #[arg(long, value_parser = clap::value_parser!(u32).range(2..=6))]
    pip_min: Option<u32>,

    /// Highest pip sum allowed on an interior corner
    #[arg(long, value_parser = clap::value_parser!(u32).range(6..=13))]
    pip_max: Option<u32>,

    /// Seed for the resource layer
    #[arg(short, long)]
    resource_seed: Option<u64>,

    /// Seed for the number layer
    #[arg(short, long)]
    number_seed: Option<u64>,

    /// Output format
    #[arg(value_enum, short, long, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// List the pip sum of every interior corner
    #[arg(long, default_value_t = false)]
    corner_scores: bool,

    /// Number of boards to generate. Boards after the first one always use new seeds
    #[arg(short, long, default_value_t = 1)]
    count: usize,

    /// Print some statistics after generating the boards
    #[arg(short, long, default_value_t = false)]
    summary: bool,

    /// Enable debug messages
    #[arg(short, long, default_value_t = false)]
    debug: bool,
}

impl Args {
    /// Build the configuration of the first board.
    fn board_config(&self) -> Result<BoardConfig> {
        let mut config: BoardConfig = match &self.link {
            Some(link) => BoardConfig::from_query(link)?,
            None => {
                let mut c: BoardConfig = BoardConfig::default();
                c.regenerate();
                c
            }
        };

        if self.prevent_same_resources {
            config.prevent_same_resources = true;
        }
        if self.keep_desert_center {
            config.keep_desert_center = true;
        }
        if self.allow_same_numbers {
            config.no_same_neighbors = false;
        }
        if let Some(v) = self.pip_min {
            config.pip_min = v;
        }
        if let Some(v) = self.pip_max {
            config.pip_max = v;
        }
        if let Some(v) = self.resource_seed {
            config.resource_seed = v;
        }
        if let Some(v) = self.number_seed {
            config.number_seed = v;
        }
        Ok(config.clamped())
    }
}

/// Parse and process command-line options, and return the exit code.
pub fn parse() -> u8 {
    let args: Args = Args::parse();

    if args.debug {
        unsafe {
            env::set_var("RUST_LOG", "debug");
        }
    }
    env_logger::init();

    match run(&args) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {e}");
            1
        }
    }
}

/// Generate and print the boards.
fn run(args: &Args) -> Result<()> {
    let grid: &grid::Grid = grid::grid();
    let mut generator: BoardGenerator = BoardGenerator::new(grid);
    let mut config: BoardConfig = args.board_config()?;

    let mut boards: Vec<Board> = Vec::with_capacity(args.count);
    let mut total: f32 = 0.0;
    let mut max: f32 = 0.0;
    let mut iterations: usize = 0;
    let mut no_violation: usize = 0;

    for i in 0..args.count {
        debug!("Board {i}");
        if i > 0 {
            config.regenerate();
        }
        let board: Board = generator.generate(&config);

        let duration: f32 = generator.duration();
        total += duration;
        if duration > max {
            max = duration;
        }
        iterations += generator.iteration();
        if board.breakdown.total == 0 {
            no_violation += 1;
        }

        if args.format == OutputFormat::Text {
            if i > 0 {
                println!();
            }
            println!("{}", draw::board_to_text(grid, &board, args.corner_scores));
        }
        boards.push(board);
    }

    if args.format == OutputFormat::Json {
        let json: String = if boards.len() == 1 {
            serde_json::to_string_pretty(&boards[0])?
        } else {
            serde_json::to_string_pretty(&boards)?
        };
        println!("{json}");
    }

    // Print some stats
    if args.summary && args.count > 0 {
        eprintln!(
            "
        total time = {}s
      average time = {}s
          max time = {}s
average iterations = {}
   zero violations = {}/{}",
            total,
            total / args.count as f32,
            max,
            iterations / args.count,
            no_violation,
            args.count
        );
    }
    Ok(())
}
