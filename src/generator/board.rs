/*
board.rs

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

//! Complete board: the resource and number layers, and their violations.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::grid::{Grid, VertexKey};
use super::numbers::{NumberGenerator, NumberLayer, NumberOptions};
use super::resources::{Resource, ResourceGenerator, ResourceLayer, ResourceOptions};
use super::scoring::{self, CornerScore};
use crate::config::BoardConfig;

/// Hexagon size used to position the corner scores.
pub const DISPLAY_SIZE: f64 = 50.0;

/// Content of a cell.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    pub resource: Resource,
    pub number: Option<u8>,
}

/// Number of violations per rule, for both layers.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoardBreakdown {
    pub hot_adj: usize,
    pub same_num_adj: usize,
    pub same_res_adj: usize,
    pub pip_below: usize,
    pub pip_above: usize,
    pub total: usize,
}

/// Generated board.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Board {
    /// Configuration and seeds that reproduce the board.
    pub config: BoardConfig,

    /// Cell contents, indexed by cell ID.
    pub tiles: Vec<Tile>,

    pub desert_index: usize,
    pub breakdown: BoardBreakdown,
    pub hot_tiles: BTreeSet<usize>,
    pub same_num_tiles: BTreeSet<usize>,
    pub same_res_tiles: BTreeSet<usize>,
    pub pip_below_vertexes: BTreeSet<VertexKey>,
    pub pip_above_vertexes: BTreeSet<VertexKey>,

    /// Pip sum of every corner, positioned for hexagons of [`DISPLAY_SIZE`].
    pub corner_scores: Vec<CornerScore>,
}

impl Board {
    /// Assemble the board from its two layers.
    pub fn new(
        grid: &Grid,
        config: &BoardConfig,
        resources: ResourceLayer,
        numbers: NumberLayer,
    ) -> Self {
        let tiles: Vec<Tile> = resources
            .resources
            .iter()
            .zip(numbers.numbers.iter())
            .map(|(resource, number)| Tile {
                resource: *resource,
                number: *number,
            })
            .collect();

        let nb = numbers.score.breakdown;
        let breakdown: BoardBreakdown = BoardBreakdown {
            hot_adj: nb.hot_adj,
            same_num_adj: nb.same_num_adj,
            same_res_adj: resources.violations,
            pip_below: nb.pip_below,
            pip_above: nb.pip_above,
            total: nb.total + resources.violations,
        };

        Self {
            config: *config,
            corner_scores: scoring::corner_scores(grid, &numbers.numbers, DISPLAY_SIZE),
            tiles,
            desert_index: resources.desert_index,
            breakdown,
            hot_tiles: numbers.score.hot_tiles,
            same_num_tiles: numbers.score.same_num_tiles,
            same_res_tiles: resources.same_res_tiles,
            pip_below_vertexes: numbers.score.pip_below_vertexes,
            pip_above_vertexes: numbers.score.pip_above_vertexes,
        }
    }

    /// Whether the cell is marked by any adjacency rule.
    pub fn is_tile_in_violation(&self, cell_id: usize) -> bool {
        self.hot_tiles.contains(&cell_id)
            || self.same_num_tiles.contains(&cell_id)
            || self.same_res_tiles.contains(&cell_id)
    }
}

/// Run the two layer generators in order.
pub struct BoardGenerator<'a> {
    grid: &'a Grid,
    pub resources: ResourceGenerator<'a>,
    pub numbers: NumberGenerator<'a>,
}

impl<'a> BoardGenerator<'a> {
    /// Create the object.
    pub fn new(grid: &'a Grid) -> Self {
        Self {
            grid,
            resources: ResourceGenerator::new(grid),
            numbers: NumberGenerator::new(grid),
        }
    }

    /// Generate the board for the given configuration.
    ///
    /// The pip bounds are clamped to their valid ranges first.
    pub fn generate(&mut self, config: &BoardConfig) -> Board {
        let config: BoardConfig = config.clamped();
        let resources: ResourceLayer = self.resources.generate(&ResourceOptions {
            prevent_same_resources: config.prevent_same_resources,
            keep_desert_center: config.keep_desert_center,
            seed: config.resource_seed,
        });
        let numbers: NumberLayer = self.numbers.generate(&NumberOptions {
            desert_index: resources.desert_index,
            pip_min: config.pip_min,
            pip_max: config.pip_max,
            no_same_neighbors: config.no_same_neighbors,
            seed: config.number_seed,
        });
        Board::new(self.grid, &config, resources, numbers)
    }

    /// Total search iterations for the last board.
    pub fn iteration(&self) -> usize {
        self.resources.iteration + self.numbers.iteration
    }

    /// Total search duration in seconds for the last board.
    pub fn duration(&self) -> f32 {
        self.resources.duration + self.numbers.duration
    }
}
