/*
generator.rs

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

//! Generate random boards.
//!
//! The board topology is provided by the [`grid::Grid`] object, which is built once.
//! It gives the cell adjacency and the list of the hexagon corners (vertexes) with the cells that
//! share them.
//!
//! A board is built in two layers:
//!
//! * The resource layer, represented by a [`resources::ResourceLayer`] object.
//!   You create this object by creating a [`resources::ResourceGenerator`] object and by using
//!   its [`resources::ResourceGenerator::generate`] method.
//!   The generator shuffles the resources until no two adjacent cells share the same resource
//!   (when that rule is enabled).
//!
//! * The number layer, represented by a [`numbers::NumberLayer`] object.
//!   You create this object with the [`numbers::NumberGenerator::generate`] method, from the
//!   position of the desert returned by the resource layer.
//!   The placement is scored by the [`scoring::score`] function.
//!
//! Both generators stop after a maximum number of shuffles.
//! In that case they return the best layer found, so generating a board never fails.
//! The [`board::BoardGenerator`] object runs the two generators in order and merges their results
//! into a [`board::Board`] object.

pub mod board;
pub mod grid;
pub mod numbers;
pub mod resources;
pub mod scoring;
