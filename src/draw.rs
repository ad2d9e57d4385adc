/*
draw.rs

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

//! Draw a board as text.
//!
//! Each cell is drawn as its resource and number, followed by a violation marker:
//!
//! - `*`: a 6 or an 8 next to another 6 or 8.
//! - `=`: same number as a neighbor.
//! - `~`: same resource as a neighbor.
//!
//! When a cell breaks several rules, the marker of the first rule in that list is used.
//! Rows are shifted by half a cell so that the output keeps the hexagonal shape:
//!
//! ```text
//!              wood 10    sheep  2*    wheat  9
//!       brick 12   desert       ore  4=     wood 10
//! ```

use log::debug;
use std::fmt::Write;

use crate::generator::board::Board;
use crate::generator::grid::Grid;

/// Width of a drawn cell, including the separator.
const CELL_WIDTH: usize = 12;

/// Return the violation marker of the cell.
fn marker(board: &Board, cell_id: usize) -> char {
    if !board.is_tile_in_violation(cell_id) {
        ' '
    } else if board.hot_tiles.contains(&cell_id) {
        '*'
    } else if board.same_num_tiles.contains(&cell_id) {
        '='
    } else {
        '~'
    }
}

/// Draw a single cell.
fn draw_cell(board: &Board, cell_id: usize) -> String {
    let tile = &board.tiles[cell_id];
    let number: String = match tile.number {
        Some(n) => n.to_string(),
        None => String::new(),
    };
    format!(
        "{:>6} {:>2}{}",
        tile.resource.to_string(),
        number,
        marker(board, cell_id)
    )
}

/// Draw the cells, one board row per line.
pub fn board_rows(grid: &Grid, board: &Board) -> Vec<String> {
    let mut rows: Vec<String> = Vec::new();
    let mut current_r: Option<i32> = None;

    for cell_id in 0..grid.num_cells() {
        let r: i32 = grid.axial(cell_id).r;
        if current_r != Some(r) {
            current_r = Some(r);
            rows.push(" ".repeat(r.unsigned_abs() as usize * CELL_WIDTH / 2));
        }
        if let Some(line) = rows.last_mut() {
            line.push_str(&format!("{:<width$}", draw_cell(board, cell_id), width = CELL_WIDTH));
        }
    }
    rows.iter().map(|l| l.trim_end().to_string()).collect()
}

/// Draw the complete report: the board, the violation summary, and the share string.
///
/// With `corner_scores`, the pip sum of every interior corner is listed. Otherwise only the
/// corners in violation are listed.
pub fn board_to_text(grid: &Grid, board: &Board, corner_scores: bool) -> String {
    debug!("Drawing board {}", board.config);
    let mut out: String = String::new();

    for row in board_rows(grid, board) {
        let _ = writeln!(out, "{row}");
    }
    let _ = writeln!(out);

    let b = &board.breakdown;
    let _ = writeln!(out, "Violations: {}", b.total);
    if b.total == 0 {
        let _ = writeln!(out, "  No violations");
    } else {
        let _ = writeln!(out, "  Hot tiles (6/8) adjacent: {}", b.hot_adj);
        let _ = writeln!(out, "  Identical numbers adjacent: {}", b.same_num_adj);
        let _ = writeln!(out, "  Identical resources adjacent: {}", b.same_res_adj);
        let _ = writeln!(out, "  Pip below min ({}): {}", board.config.pip_min, b.pip_below);
        let _ = writeln!(out, "  Pip above max ({}): {}", board.config.pip_max, b.pip_above);
        let _ = writeln!(
            out,
            "  Markers: * hot adjacency, = same number, ~ same resource"
        );
    }

    let mut corners: Vec<_> = board
        .corner_scores
        .iter()
        .filter(|c| c.tiles == 3)
        .filter(|c| {
            corner_scores
                || board.pip_below_vertexes.contains(&c.key)
                || board.pip_above_vertexes.contains(&c.key)
        })
        .collect();
    corners.sort_by_key(|c| (c.key.y, c.key.x));
    if !corners.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Corner scores:");
        for c in corners {
            let status: &str = if board.pip_below_vertexes.contains(&c.key) {
                " below min"
            } else if board.pip_above_vertexes.contains(&c.key) {
                " above max"
            } else {
                ""
            };
            let _ = writeln!(out, "  ({}) {:>2}{status}", c.key, c.score);
        }
    }

    let _ = writeln!(out);
    let _ = write!(out, "Share: {}", board.config.to_query());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BoardConfig;
    use crate::generator::board::BoardGenerator;

    fn board(grid: &Grid) -> Board {
        BoardGenerator::new(grid).generate(&BoardConfig {
            resource_seed: 3,
            number_seed: 4,
            keep_desert_center: true,
            ..BoardConfig::default()
        })
    }

    #[test]
    fn rows_keep_hexagonal_shape() {
        let g = Grid::new();
        let b = board(&g);
        let rows = board_rows(&g, &b);
        assert_eq!(rows.len(), 5);
        for (row, shift) in rows.iter().zip([12, 6, 0, 6, 12]) {
            // Resource names are right-aligned on 6 characters, the shortest has 3
            let indent = row.len() - row.trim_start().len();
            assert!(indent >= shift && indent <= shift + 3, "{row:?}");
        }
        assert!(rows[2].contains("desert"));
    }

    #[test]
    fn report_lists_violations_and_share_string() {
        let g = Grid::new();
        let b = board(&g);
        let text = board_to_text(&g, &b, true);
        assert!(text.contains(&format!("Violations: {}", b.breakdown.total)));
        assert!(text.ends_with(&format!("Share: {}", b.config.to_query())));
        // 24 interior corners when all the scores are requested
        let corner_lines = text.lines().filter(|l| l.starts_with("  (")).count();
        assert_eq!(corner_lines, 24);
    }

    #[test]
    fn hidden_scores_only_show_violations() {
        let g = Grid::new();
        let b = board(&g);
        let text = board_to_text(&g, &b, false);
        let corner_lines = text.lines().filter(|l| l.starts_with("  (")).count();
        assert_eq!(
            corner_lines,
            b.pip_below_vertexes.len() + b.pip_above_vertexes.len()
        );
    }
}
