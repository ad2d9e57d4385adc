/*
grid.rs

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

//! Cells, adjacency, and vertexes of the 19-cell board.
//!
//! The board is a radius-2 hexagon of cells addressed with axial coordinates.
//! Rows go from `r = -2` (top) to `r = 2` (bottom) and hold 3, 4, 5, 4, and 3 cells.
//! Cells are numbered in row order, from left to right:
//!
//! ```text
//!       0   1   2
//!     3   4   5   6
//!   7   8   9  10  11
//!    12  13  14  15
//!      16  17  18
//! ```
//!
//! The [`Grid`] object also owns the vertex incidence table: for each hexagon corner, the
//! list of the cells that share it.
//! The table is computed once from the fixed topology, so that the pip scoring does not have to
//! compare floating-point coordinates.

use log::{Level, debug, log_enabled};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

/// Number of cells on the board.
pub const NUM_CELLS: usize = 19;

/// Radius of the board, in cells, around the center cell.
const RADIUS: i32 = 2;

/// Axial offsets of the six neighbors, in `(dq, dr)` order.
pub const DIRECTIONS: [(i32, i32); 6] = [(1, 0), (1, -1), (0, -1), (-1, 0), (-1, 1), (0, 1)];

/// Vertex keys store tenths of the unit size.
const KEY_SCALE: f64 = 10.0;

/// Grid built on first use and shared by the whole program.
static GRID: LazyLock<Grid> = LazyLock::new(Grid::new);

/// Return the process-wide [`Grid`] object.
pub fn grid() -> &'static Grid {
    &GRID
}

/// Axial coordinates of a cell. The third cube coordinate is `s = -q - r`.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Axial {
    pub q: i32,
    pub r: i32,
}

impl Axial {
    pub fn s(&self) -> i32 {
        -self.q - self.r
    }
}

/// Planar point.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Canonical identifier of a hexagon corner.
///
/// The coordinates are the corner position divided by the hexagon size, in tenths and rounded.
/// Two corners computed at different sizes, or from different cells, get the same key.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexKey {
    pub x: i32,
    pub y: i32,
}

impl fmt::Display for VertexKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{},{}",
            self.x as f64 / KEY_SCALE,
            self.y as f64 / KEY_SCALE
        )
    }
}

/// Return the canonical key of the point, for hexagons of the given size.
pub fn vertex_key(point: Point, size: f64) -> VertexKey {
    VertexKey {
        x: (point.x / size * KEY_SCALE).round() as i32,
        y: (point.y / size * KEY_SCALE).round() as i32,
    }
}

/// Corner of the hexagon centered at `center`.
///
/// Corner `k` is at `60°·k + 30°` from the center, `k` from 0 to 5.
pub fn hex_corner(center: Point, size: f64, k: usize) -> Point {
    let angle: f64 = (60.0 * k as f64 + 30.0).to_radians();
    Point {
        x: center.x + size * angle.cos(),
        y: center.y + size * angle.sin(),
    }
}

/// Convert axial coordinates to planar coordinates.
pub fn axial_to_pixel(axial: Axial, size: f64) -> Point {
    let sqrt3: f64 = 3.0_f64.sqrt();
    Point {
        x: size * (sqrt3 * axial.q as f64 + sqrt3 / 2.0 * axial.r as f64),
        y: size * (1.5 * axial.r as f64),
    }
}

/// Build the ordered list of the 19 cell coordinates (rows 3-4-5-4-3).
pub fn build_layout() -> Vec<Axial> {
    let mut coords: Vec<Axial> = Vec::with_capacity(NUM_CELLS);
    for r in -RADIUS..=RADIUS {
        let q_min: i32 = (-RADIUS).max(-r - RADIUS);
        let q_max: i32 = RADIUS.min(-r + RADIUS);
        for q in q_min..=q_max {
            coords.push(Axial { q, r });
        }
    }
    coords
}

/// Hexagon corner and the cells that share it.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Vertex {
    /// Canonical key.
    pub key: VertexKey,

    /// Position for hexagons of size 1.
    pub position: Point,

    /// Sorted list of the cells that share the corner (one to three cells).
    pub cells: Vec<usize>,
}

impl Vertex {
    /// Whether three cells share the vertex. Only these vertexes are subject to the pip bounds.
    pub fn is_interior(&self) -> bool {
        self.cells.len() == 3
    }
}

/// Board topology.
#[derive(Debug, Clone)]
pub struct Grid {
    /// Cell coordinates, indexed by cell ID.
    cells: Vec<Axial>,

    /// Cell ID for each coordinate.
    index_by_coord: HashMap<Axial, usize>,

    /// Neighbors of each cell, in [`DIRECTIONS`] order.
    neighbors: Vec<Vec<usize>>,

    /// All the hexagon corners of the board.
    vertexes: Vec<Vertex>,

    /// For each cell, the index in [`Grid::vertexes`] of its six corners, in corner order.
    cell_vertexes: Vec<[usize; 6]>,
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl Grid {
    /// Build the board topology and the vertex incidence table.
    pub fn new() -> Self {
        let cells: Vec<Axial> = build_layout();
        let index_by_coord: HashMap<Axial, usize> =
            cells.iter().enumerate().map(|(i, c)| (*c, i)).collect();

        let neighbors: Vec<Vec<usize>> = cells
            .iter()
            .map(|c| {
                DIRECTIONS
                    .iter()
                    .filter_map(|(dq, dr)| {
                        index_by_coord
                            .get(&Axial {
                                q: c.q + dq,
                                r: c.r + dr,
                            })
                            .copied()
                    })
                    .collect()
            })
            .collect();

        let mut vertexes: Vec<Vertex> = Vec::new();
        let mut vertex_by_key: HashMap<VertexKey, usize> = HashMap::new();
        let mut cell_vertexes: Vec<[usize; 6]> = Vec::with_capacity(cells.len());

        for (cell_id, axial) in cells.iter().enumerate() {
            let center: Point = axial_to_pixel(*axial, 1.0);
            let mut corners: [usize; 6] = [0; 6];
            for (k, corner) in corners.iter_mut().enumerate() {
                let position: Point = hex_corner(center, 1.0, k);
                let key: VertexKey = vertex_key(position, 1.0);
                let id: usize = *vertex_by_key.entry(key).or_insert_with(|| {
                    vertexes.push(Vertex {
                        key,
                        position,
                        cells: Vec::with_capacity(3),
                    });
                    vertexes.len() - 1
                });
                // Cells are visited in order, so the list stays sorted
                vertexes[id].cells.push(cell_id);
                *corner = id;
            }
            cell_vertexes.push(corners);
        }

        let grid: Grid = Self {
            cells,
            index_by_coord,
            neighbors,
            vertexes,
            cell_vertexes,
        };

        if log_enabled!(Level::Debug) {
            debug!("Number of cells: {}", grid.num_cells());
            debug!("Number of vertexes: {}", grid.vertexes.len());
            debug!(
                "Interior vertexes: {}",
                grid.vertexes.iter().filter(|v| v.is_interior()).count()
            );
            for (i, n) in grid.neighbors.iter().enumerate() {
                let c: Axial = grid.cells[i];
                debug!("  cell {i:>2} ({}, {}, {}) -> {n:?}", c.q, c.r, c.s());
            }
        }
        grid
    }

    /// Number of cells.
    pub fn num_cells(&self) -> usize {
        self.cells.len()
    }

    /// Coordinates of the given cell.
    pub fn axial(&self, cell_id: usize) -> Axial {
        self.cells[cell_id]
    }

    /// Return the cell at the given coordinates, if it is on the board.
    pub fn index_of(&self, q: i32, r: i32) -> Option<usize> {
        self.index_by_coord.get(&Axial { q, r }).copied()
    }

    /// ID of the center cell, at axial (0, 0).
    pub fn center_index(&self) -> usize {
        // The layout always contains the origin
        self.index_of(0, 0).unwrap_or(NUM_CELLS / 2)
    }

    /// Return the cells adjacent to the given cell.
    pub fn neighbors_of(&self, cell_id: usize) -> &[usize] {
        &self.neighbors[cell_id]
    }

    /// Planar center of the given cell, for hexagons of the given size.
    pub fn center_of(&self, cell_id: usize, size: f64) -> Point {
        axial_to_pixel(self.cells[cell_id], size)
    }

    /// Corner `k` (0 to 5) of the given cell, for hexagons of the given size.
    pub fn corner_of(&self, cell_id: usize, k: usize, size: f64) -> Point {
        hex_corner(self.center_of(cell_id, size), size, k)
    }

    /// All the vertexes of the board.
    pub fn vertexes(&self) -> &[Vertex] {
        &self.vertexes
    }

    /// Indexes in [`Grid::vertexes`] of the six corners of the given cell.
    pub fn cell_vertexes(&self, cell_id: usize) -> &[usize; 6] {
        &self.cell_vertexes[cell_id]
    }

    /// Position of the given vertex, for hexagons of the given size.
    pub fn vertex_position(&self, vertex_id: usize, size: f64) -> Point {
        let p: Point = self.vertexes[vertex_id].position;
        Point {
            x: p.x * size,
            y: p.y * size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_has_rows_of_3_4_5_4_3() {
        let layout = build_layout();
        assert_eq!(layout.len(), NUM_CELLS);
        let rows: Vec<usize> = (-2..=2)
            .map(|r| layout.iter().filter(|c| c.r == r).count())
            .collect();
        assert_eq!(rows, vec![3, 4, 5, 4, 3]);
        for c in &layout {
            assert!(c.q.abs() <= 2 && c.r.abs() <= 2 && c.s().abs() <= 2);
        }
    }

    #[test]
    fn center_is_cell_9() {
        let g = Grid::new();
        assert_eq!(g.center_index(), 9);
        assert_eq!(g.axial(9), Axial { q: 0, r: 0 });
        assert_eq!(g.index_of(0, -2), Some(0));
        assert_eq!(g.index_of(3, 0), None);
    }

    #[test]
    fn adjacency_is_symmetric() {
        let g = Grid::new();
        for i in 0..g.num_cells() {
            for &j in g.neighbors_of(i) {
                assert!(g.neighbors_of(j).contains(&i), "{i} -> {j} not symmetric");
            }
        }
    }

    #[test]
    fn neighbor_counts_depend_on_position() {
        let g = Grid::new();
        assert_eq!(g.neighbors_of(g.center_index()).len(), 6);

        // Corners of the big hexagon
        for (q, r) in [(0, -2), (2, -2), (-2, 0), (2, 0), (-2, 2), (0, 2)] {
            let i = g.index_of(q, r).unwrap();
            let n = g.neighbors_of(i).len();
            assert!(n == 2 || n == 3, "corner cell {i} has {n} neighbors");
        }

        let mut counts = [0usize; 7];
        for i in 0..g.num_cells() {
            counts[g.neighbors_of(i).len()] += 1;
        }
        assert_eq!(counts[3], 6);
        assert_eq!(counts[4], 6);
        assert_eq!(counts[6], 7);
    }

    #[test]
    fn vertex_table_matches_board_shape() {
        let g = Grid::new();
        assert_eq!(g.vertexes().len(), 54);
        assert_eq!(g.vertexes().iter().filter(|v| v.is_interior()).count(), 24);
        let incidences: usize = g.vertexes().iter().map(|v| v.cells.len()).sum();
        assert_eq!(incidences, NUM_CELLS * 6);
    }

    #[test]
    fn interior_vertexes_join_mutually_adjacent_cells() {
        let g = Grid::new();
        for v in g.vertexes().iter().filter(|v| v.is_interior()) {
            let c = &v.cells;
            assert!(c.windows(2).all(|w| w[0] < w[1]));
            assert!(g.neighbors_of(c[0]).contains(&c[1]));
            assert!(g.neighbors_of(c[1]).contains(&c[2]));
            assert!(g.neighbors_of(c[0]).contains(&c[2]));
        }
    }

    #[test]
    fn vertex_keys_do_not_depend_on_size() {
        let g = Grid::new();
        for cell in 0..g.num_cells() {
            for k in 0..6 {
                let unit = vertex_key(g.corner_of(cell, k, 1.0), 1.0);
                let display = vertex_key(g.corner_of(cell, k, 50.0), 50.0);
                assert_eq!(unit, display);
                assert_eq!(g.vertexes()[g.cell_vertexes(cell)[k]].key, unit);
            }
        }
    }

    #[test]
    fn center_and_corner_geometry() {
        let g = Grid::new();
        let c = g.center_of(g.center_index(), 50.0);
        assert_eq!(c, Point { x: 0.0, y: 0.0 });

        // Corner 1 is at 90°, straight below the center
        let p = g.corner_of(g.center_index(), 1, 50.0);
        assert!(p.x.abs() < 1e-9);
        assert!((p.y - 50.0).abs() < 1e-9);

        let bottom = g.center_of(g.index_of(0, 2).unwrap(), 10.0);
        assert!((bottom.y - 30.0).abs() < 1e-9);
        assert!((bottom.x - 3.0_f64.sqrt() * 10.0).abs() < 1e-9);
    }

    #[test]
    fn vertex_key_display_uses_tenths() {
        assert_eq!(VertexKey { x: 9, y: 15 }.to_string(), "0.9,1.5");
        assert_eq!(VertexKey { x: -17, y: 10 }.to_string(), "-1.7,1");
    }
}
