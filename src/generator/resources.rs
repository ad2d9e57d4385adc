/*
resources.rs

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

//! Generate the resource layer.

use log::debug;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::time::Instant;
use strum_macros::Display;

use super::grid::Grid;

/// Number of shuffles before giving up and keeping the best layout found.
pub const MAX_TRIALS: usize = 20_000;

/// Tile resources.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Resource {
    Wood,
    Sheep,
    Wheat,
    Brick,
    Ore,
    Desert,
}

/// Resources of the base game: 4 wood, 4 sheep, 4 wheat, 3 brick, 3 ore, and 1 desert.
pub const RESOURCE_BAG: [Resource; 19] = [
    Resource::Wood,
    Resource::Wood,
    Resource::Wood,
    Resource::Wood,
    Resource::Sheep,
    Resource::Sheep,
    Resource::Sheep,
    Resource::Sheep,
    Resource::Wheat,
    Resource::Wheat,
    Resource::Wheat,
    Resource::Wheat,
    Resource::Brick,
    Resource::Brick,
    Resource::Brick,
    Resource::Ore,
    Resource::Ore,
    Resource::Ore,
    Resource::Desert,
];

/// Parameters for the resource layer.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResourceOptions {
    /// Whether two adjacent cells with the same resource are a violation.
    pub prevent_same_resources: bool,

    /// Whether the desert must be on the center cell.
    pub keep_desert_center: bool,

    /// Seed of the random generator.
    pub seed: u64,
}

/// Resource placement.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ResourceLayer {
    /// Resource of each cell, indexed by cell ID.
    pub resources: Vec<Resource>,

    /// Cell with the desert.
    pub desert_index: usize,

    /// Number of cells with a neighbor of the same resource.
    pub violations: usize,

    /// Cells involved in a same-resource adjacency.
    pub same_res_tiles: BTreeSet<usize>,
}

/// Count the cells that have a neighbor with the same resource.
///
/// Only the first matching neighbor is considered: each cell adds at most one violation, and
/// marks itself and that neighbor.
pub fn same_resource_violations(grid: &Grid, resources: &[Resource]) -> (usize, BTreeSet<usize>) {
    let mut count: usize = 0;
    let mut tiles: BTreeSet<usize> = BTreeSet::new();

    for (i, r) in resources.iter().enumerate() {
        if let Some(&j) = grid.neighbors_of(i).iter().find(|&&j| resources[j] == *r) {
            count += 1;
            tiles.insert(i);
            tiles.insert(j);
        }
    }
    (count, tiles)
}

/// Resource layer generator.
pub struct ResourceGenerator<'a> {
    grid: &'a Grid,

    /// Maximum number of shuffles per layer.
    pub max_trials: usize,

    /// Number of shuffles it took to generate the last layer.
    pub iteration: usize,

    /// Duration in seconds it took to generate the last layer.
    pub duration: f32,
}

impl<'a> ResourceGenerator<'a> {
    /// Create the object.
    pub fn new(grid: &'a Grid) -> Self {
        Self {
            grid,
            max_trials: MAX_TRIALS,
            iteration: 0,
            duration: 0.0,
        }
    }

    /// Shuffle the resources until a layout without violation is found, or until
    /// [`ResourceGenerator::max_trials`] layouts have been tried. In that later case, the layout
    /// with the fewest violations is returned.
    pub fn generate(&mut self, options: &ResourceOptions) -> ResourceLayer {
        let start: Instant = Instant::now();
        let mut rng: StdRng = StdRng::seed_from_u64(options.seed);
        let center: usize = self.grid.center_index();
        let mut best: Option<ResourceLayer> = None;

        debug!(
            "Generating resources: prevent_same = {}  desert_center = {}  seed = {}",
            options.prevent_same_resources, options.keep_desert_center, options.seed
        );

        self.iteration = 0;
        while self.iteration < self.max_trials {
            self.iteration += 1;

            let mut resources: Vec<Resource> = RESOURCE_BAG.to_vec();
            resources.shuffle(&mut rng);
            if options.keep_desert_center {
                Self::move_desert(&mut resources, center);
            }

            let (violations, same_res_tiles) = if options.prevent_same_resources {
                same_resource_violations(self.grid, &resources)
            } else {
                (0, BTreeSet::new())
            };

            if best.as_ref().is_none_or(|b| violations < b.violations) {
                debug!("    Trial {}: {violations} violations", self.iteration);
                let desert_index: usize = Self::desert_index(&resources, center);
                best = Some(ResourceLayer {
                    resources,
                    desert_index,
                    violations,
                    same_res_tiles,
                });
                if violations == 0 {
                    break;
                }
            }
        }

        self.duration = start.elapsed().as_secs_f32();
        debug!(
            "Iterations = {}  Duration = {}",
            self.iteration, self.duration
        );

        best.unwrap_or_else(|| {
            let mut resources: Vec<Resource> = RESOURCE_BAG.to_vec();
            if options.keep_desert_center {
                Self::move_desert(&mut resources, center);
            }
            let desert_index: usize = Self::desert_index(&resources, center);
            ResourceLayer {
                resources,
                desert_index,
                violations: 0,
                same_res_tiles: BTreeSet::new(),
            }
        })
    }

    /// Swap the desert with the resource of the center cell.
    fn move_desert(resources: &mut [Resource], center: usize) {
        if let Some(d) = resources.iter().position(|r| *r == Resource::Desert) {
            resources.swap(d, center);
        }
    }

    fn desert_index(resources: &[Resource], center: usize) -> usize {
        // The bag always holds one desert
        resources
            .iter()
            .position(|r| *r == Resource::Desert)
            .unwrap_or(center)
    }
}
