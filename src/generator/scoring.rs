/*
scoring.rs

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

//! Score a number token placement.
//!
//! The pip value of a token is the number of two-dice combinations that roll it.
//! Each vertex accumulates the pip values of the cells that share it, which gives the production
//! score of a settlement built on that corner.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::grid::{Grid, Point, VertexKey};

/// Tokens with the highest probability.
pub const HOT_TOKENS: [u8; 2] = [6, 8];

/// Return the pip value of a token. Tokens that cannot be rolled and empty cells are worth 0.
pub fn pip_value(token: Option<u8>) -> u32 {
    match token {
        Some(2) | Some(12) => 1,
        Some(3) | Some(11) => 2,
        Some(4) | Some(10) => 3,
        Some(5) | Some(9) => 4,
        Some(6) | Some(8) => 5,
        _ => 0,
    }
}

/// Whether the token is a 6 or an 8.
pub fn is_hot(token: Option<u8>) -> bool {
    token.is_some_and(|t| HOT_TOKENS.contains(&t))
}

/// Pip sum of a vertex.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexScore {
    /// Index in [`Grid::vertexes`].
    pub vertex: usize,

    pub key: VertexKey,

    /// Sum of the pip values of the cells that share the vertex.
    pub score: u32,

    /// Number of cells that share the vertex.
    pub tiles: usize,
}

/// Pip sum of a vertex, positioned for display.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct CornerScore {
    pub key: VertexKey,
    pub position: Point,
    pub score: u32,
    pub tiles: usize,
}

/// Accumulate the pip values of the placement on every vertex of the board.
///
/// `numbers` is indexed by cell ID.
pub fn vertex_pip_sums(grid: &Grid, numbers: &[Option<u8>]) -> Vec<VertexScore> {
    let mut scores: Vec<VertexScore> = grid
        .vertexes()
        .iter()
        .enumerate()
        .map(|(i, v)| VertexScore {
            vertex: i,
            key: v.key,
            score: 0,
            tiles: 0,
        })
        .collect();

    for cell_id in 0..grid.num_cells() {
        let value: u32 = pip_value(numbers.get(cell_id).copied().flatten());
        for &v in grid.cell_vertexes(cell_id) {
            scores[v].score += value;
            scores[v].tiles += 1;
        }
    }
    scores
}

/// Same as [`vertex_pip_sums`], with vertex positions for hexagons of the given size.
pub fn corner_scores(grid: &Grid, numbers: &[Option<u8>], size: f64) -> Vec<CornerScore> {
    vertex_pip_sums(grid, numbers)
        .into_iter()
        .map(|s| CornerScore {
            key: s.key,
            position: grid.vertex_position(s.vertex, size),
            score: s.score,
            tiles: s.tiles,
        })
        .collect()
}

/// Rules for the number layer.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberRules {
    /// Lowest allowed pip sum on an interior vertex (inclusive).
    pub pip_min: u32,

    /// Highest allowed pip sum on an interior vertex (inclusive).
    pub pip_max: u32,

    /// Whether two adjacent cells with the same token are a violation.
    pub no_same_neighbors: bool,
}

/// Number of violations per rule.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Breakdown {
    pub hot_adj: usize,
    pub same_num_adj: usize,
    pub pip_below: usize,
    pub pip_above: usize,
    pub total: usize,
}

/// Violations of a number placement.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct NumberScore {
    pub breakdown: Breakdown,

    /// Cells with a 6 or an 8 next to another 6 or 8.
    pub hot_tiles: BTreeSet<usize>,

    /// Cells with the same token as one of their neighbors.
    pub same_num_tiles: BTreeSet<usize>,

    /// Interior vertexes with a pip sum below the minimum.
    pub pip_below_vertexes: BTreeSet<VertexKey>,

    /// Interior vertexes with a pip sum above the maximum.
    pub pip_above_vertexes: BTreeSet<VertexKey>,
}

/// Compute the violations of a number placement.
pub fn score(grid: &Grid, numbers: &[Option<u8>], rules: &NumberRules) -> NumberScore {
    let mut s: NumberScore = NumberScore::default();
    let token_at = |i: usize| numbers.get(i).copied().flatten();

    // Adjacency rules. Each cell counts once, whatever its number of offending neighbors.
    for cell_id in 0..grid.num_cells() {
        let Some(n) = token_at(cell_id) else {
            continue;
        };
        let neighbors: &[usize] = grid.neighbors_of(cell_id);
        if is_hot(Some(n)) && neighbors.iter().any(|&j| is_hot(token_at(j))) {
            s.breakdown.hot_adj += 1;
            s.hot_tiles.insert(cell_id);
        }
        if rules.no_same_neighbors && neighbors.iter().any(|&j| token_at(j) == Some(n)) {
            s.breakdown.same_num_adj += 1;
            s.same_num_tiles.insert(cell_id);
        }
    }

    // Pip bounds, inclusive, on the interior vertexes only
    for v in vertex_pip_sums(grid, numbers)
        .iter()
        .filter(|v| v.tiles == 3)
    {
        if v.score < rules.pip_min {
            s.breakdown.pip_below += 1;
            s.pip_below_vertexes.insert(v.key);
        } else if v.score > rules.pip_max {
            s.breakdown.pip_above += 1;
            s.pip_above_vertexes.insert(v.key);
        }
    }

    s.breakdown.total =
        s.breakdown.hot_adj + s.breakdown.same_num_adj + s.breakdown.pip_below + s.breakdown.pip_above;
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::grid::Grid;

    const OPEN_RULES: NumberRules = NumberRules {
        pip_min: 2,
        pip_max: 13,
        no_same_neighbors: true,
    };

    /// Tokens in cell order, with the desert on the center cell.
    fn sample_numbers() -> Vec<Option<u8>> {
        vec![
            Some(10),
            Some(2),
            Some(9),
            Some(12),
            Some(6),
            Some(4),
            Some(10),
            Some(9),
            Some(11),
            None,
            Some(3),
            Some(8),
            Some(8),
            Some(3),
            Some(4),
            Some(5),
            Some(5),
            Some(6),
            Some(11),
        ]
    }

    #[test]
    fn pip_table() {
        assert_eq!(pip_value(Some(6)), 5);
        assert_eq!(pip_value(Some(8)), 5);
        assert_eq!(pip_value(Some(2)), 1);
        assert_eq!(pip_value(Some(12)), 1);
        assert_eq!(pip_value(Some(9)), 4);
        assert_eq!(pip_value(None), 0);
        assert_eq!(pip_value(Some(7)), 0);
        assert_eq!(pip_value(Some(0)), 0);
    }

    #[test]
    fn hot_tokens() {
        assert!(is_hot(Some(6)));
        assert!(is_hot(Some(8)));
        assert!(!is_hot(Some(5)));
        assert!(!is_hot(None));
    }

    #[test]
    fn empty_board_scores_nothing_but_low_vertexes() {
        let g = Grid::new();
        let numbers = vec![None; g.num_cells()];
        let s = score(&g, &numbers, &OPEN_RULES);
        assert_eq!(s.breakdown.hot_adj, 0);
        assert_eq!(s.breakdown.same_num_adj, 0);
        // Every interior vertex sums to 0, below the minimum of 2
        assert_eq!(s.breakdown.pip_below, 24);
        assert_eq!(s.breakdown.total, 24);
    }

    #[test]
    fn vertex_sums_cover_every_token() {
        let g = Grid::new();
        let numbers = sample_numbers();
        let sums = vertex_pip_sums(&g, &numbers);
        let total: u32 = sums.iter().map(|v| v.score).sum();
        let expected: u32 = numbers.iter().map(|n| pip_value(*n) * 6).sum();
        assert_eq!(total, expected);
        assert_eq!(sums.iter().filter(|v| v.tiles == 3).count(), 24);
    }

    #[test]
    fn adjacent_hot_tokens_count_once_per_cell() {
        let g = Grid::new();
        let mut numbers = vec![Some(2); g.num_cells()];
        // Cell 9 (center) holds a 6, with 8s on two of its neighbors
        numbers[9] = Some(6);
        numbers[8] = Some(8);
        numbers[10] = Some(8);
        let rules = NumberRules {
            no_same_neighbors: false,
            ..OPEN_RULES
        };
        let s = score(&g, &numbers, &rules);
        assert_eq!(s.breakdown.hot_adj, 3);
        assert_eq!(s.hot_tiles, BTreeSet::from([8, 9, 10]));
        assert_eq!(s.breakdown.same_num_adj, 0);
    }

    #[test]
    fn same_numbers_only_checked_when_enabled() {
        let g = Grid::new();
        let mut numbers = vec![None; g.num_cells()];
        numbers[0] = Some(4);
        numbers[1] = Some(4);
        let on = score(&g, &numbers, &OPEN_RULES);
        assert_eq!(on.breakdown.same_num_adj, 2);
        assert_eq!(on.same_num_tiles, BTreeSet::from([0, 1]));

        let off = score(
            &g,
            &numbers,
            &NumberRules {
                no_same_neighbors: false,
                ..OPEN_RULES
            },
        );
        assert_eq!(off.breakdown.same_num_adj, 0);
        assert!(off.same_num_tiles.is_empty());
    }

    #[test]
    fn pip_bounds_are_inclusive() {
        let g = Grid::new();
        let numbers = vec![Some(4); g.num_cells()];
        // Every interior vertex sums to 9
        let exact = NumberRules {
            pip_min: 9,
            pip_max: 9,
            no_same_neighbors: false,
        };
        assert_eq!(score(&g, &numbers, &exact).breakdown.total, 0);

        let above = NumberRules {
            pip_min: 2,
            pip_max: 8,
            no_same_neighbors: false,
        };
        let s = score(&g, &numbers, &above);
        assert_eq!(s.breakdown.pip_above, 24);
        assert_eq!(s.breakdown.pip_below, 0);
        assert_eq!(s.pip_above_vertexes.len(), 24);

        let below = NumberRules {
            pip_min: 10,
            pip_max: 13,
            no_same_neighbors: false,
        };
        assert_eq!(score(&g, &numbers, &below).breakdown.pip_below, 24);
    }

    #[test]
    fn scoring_twice_gives_the_same_result() {
        let g = Grid::new();
        let numbers = sample_numbers();
        let rules = NumberRules {
            pip_min: 4,
            pip_max: 11,
            no_same_neighbors: true,
        };
        let first = score(&g, &numbers, &rules);
        let second = score(&g, &numbers, &rules);
        assert_eq!(first, second);
        assert_eq!(
            first.breakdown.total,
            first.breakdown.hot_adj
                + first.breakdown.same_num_adj
                + first.breakdown.pip_below
                + first.breakdown.pip_above
        );
    }

    #[test]
    fn corner_scores_agree_with_unit_sums() {
        let g = Grid::new();
        let numbers = sample_numbers();
        let unit = vertex_pip_sums(&g, &numbers);
        let display = corner_scores(&g, &numbers, 50.0);
        assert_eq!(unit.len(), display.len());
        for (u, d) in unit.iter().zip(display.iter()) {
            assert_eq!(u.key, d.key);
            assert_eq!(u.score, d.score);
            assert_eq!(u.tiles, d.tiles);
        }
    }
}
