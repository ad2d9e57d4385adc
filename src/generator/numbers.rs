/*
numbers.rs

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

//! Generate the number token layer.
//!
//! The tokens are placed on all the cells but the desert.
//! The generator reshuffles the token bag until the placement has no violation, and otherwise
//! keeps the placement with the lowest total.
//! See [`super::scoring::score`] for the rules.

use log::{Level, debug, log_enabled};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::grid::Grid;
use super::scoring::{self, NumberRules, NumberScore};

/// Number of shuffles before giving up and keeping the best placement found.
pub const MAX_TRIALS: usize = 7_000;

/// Number tokens of the base game (no 7).
pub const TOKENS: [u8; 18] = [2, 3, 3, 4, 4, 5, 5, 6, 6, 8, 8, 9, 9, 10, 10, 11, 11, 12];

/// Parameters for the number layer.
///
/// The caller must ensure that `2 <= pip_min <= pip_max <= 13`.
/// See [`crate::config::BoardConfig::clamped`].
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberOptions {
    /// Cell without token.
    pub desert_index: usize,

    pub pip_min: u32,
    pub pip_max: u32,

    /// Whether two adjacent cells with the same token are a violation.
    pub no_same_neighbors: bool,

    /// Seed of the random generator.
    pub seed: u64,
}

impl NumberOptions {
    fn rules(&self) -> NumberRules {
        NumberRules {
            pip_min: self.pip_min,
            pip_max: self.pip_max,
            no_same_neighbors: self.no_same_neighbors,
        }
    }
}

/// Number token placement.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct NumberLayer {
    /// Token of each cell, indexed by cell ID. The desert has no token.
    pub numbers: Vec<Option<u8>>,

    /// Violations of the placement.
    pub score: NumberScore,
}

/// Number layer generator.
pub struct NumberGenerator<'a> {
    grid: &'a Grid,

    /// Maximum number of shuffles per layer.
    pub max_trials: usize,

    /// Number of shuffles it took to generate the last layer.
    pub iteration: usize,

    /// Total violations of the first placement tried for the last layer.
    pub first_total: Option<usize>,

    /// Duration in seconds it took to generate the last layer.
    pub duration: f32,
}

impl<'a> NumberGenerator<'a> {
    /// Create the object.
    pub fn new(grid: &'a Grid) -> Self {
        Self {
            grid,
            max_trials: MAX_TRIALS,
            iteration: 0,
            first_total: None,
            duration: 0.0,
        }
    }

    /// Generate and return a number placement.
    ///
    /// The result is never worse than the first placement tried.
    pub fn generate(&mut self, options: &NumberOptions) -> NumberLayer {
        let start: Instant = Instant::now();
        let mut rng: StdRng = StdRng::seed_from_u64(options.seed);
        let rules: NumberRules = options.rules();
        let mut best: Option<NumberLayer> = None;

        debug!(
            "Generating numbers: desert = {}  pips = {}..={}  no_same = {}  seed = {}",
            options.desert_index,
            options.pip_min,
            options.pip_max,
            options.no_same_neighbors,
            options.seed
        );

        self.iteration = 0;
        self.first_total = None;

        let mut bag: Vec<u8> = TOKENS.to_vec();
        bag.shuffle(&mut rng);
        while self.iteration < self.max_trials {
            self.iteration += 1;

            let numbers: Vec<Option<u8>> = self.place(&bag, options.desert_index);
            let score: NumberScore = scoring::score(self.grid, &numbers, &rules);
            let total: usize = score.breakdown.total;
            self.first_total.get_or_insert(total);

            if best
                .as_ref()
                .is_none_or(|b| total < b.score.breakdown.total)
            {
                debug!(
                    "    Trial {}: {total} violations {:?}",
                    self.iteration, score.breakdown
                );
                best = Some(NumberLayer { numbers, score });
                if total == 0 {
                    break;
                }
            }
            bag.shuffle(&mut rng);
        }

        self.duration = start.elapsed().as_secs_f32();
        debug!(
            "Iterations = {}  Duration = {}",
            self.iteration, self.duration
        );

        let layer: NumberLayer = best.unwrap_or_else(|| NumberLayer {
            numbers: vec![None; self.grid.num_cells()],
            score: NumberScore::default(),
        });
        if log_enabled!(Level::Debug) {
            debug!("    numbers = {:?}", layer.numbers);
            debug!("    hot = {:?}", layer.score.hot_tiles);
            debug!("    same = {:?}", layer.score.same_num_tiles);
        }
        layer
    }

    /// Deal the tokens, in bag order, to the cells other than the desert.
    fn place(&self, bag: &[u8], desert_index: usize) -> Vec<Option<u8>> {
        let mut tokens = bag.iter();
        (0..self.grid.num_cells())
            .map(|i| {
                if i == desert_index {
                    None
                } else {
                    tokens.next().copied()
                }
            })
            .collect()
    }
}
