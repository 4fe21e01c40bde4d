/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

/// The 8x8 grid of squares and the pieces on it.
#[allow(clippy::module_inception)]
mod board;

/// Turn order, legality, special moves, and adjudication.
mod game;

/// Pseudo-legal move generators and attack detection.
mod movegen;

/// A single move from one square to another.
mod moves;

/// Node counting over the tree of legal moves.
mod perft;

/// Colors, kinds, and pieces.
mod piece;

/// Coordinates of a square.
mod square;

pub use board::*;
pub use game::*;
pub use movegen::*;
pub use moves::*;
pub use perft::*;
pub use piece::*;
pub use square::*;
