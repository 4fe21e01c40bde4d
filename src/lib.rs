/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

/// Board representation, move generation, and the rules of chess.
mod board;

/// Parsing of console commands.
mod cli;

/// The interactive console and its event loop.
mod console;

/// A registry of games that players can create, join, and play through.
mod lobby;

pub use board::*;
pub use cli::*;
pub use console::*;
pub use lobby::*;
