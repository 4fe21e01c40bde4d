/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::str::FromStr;

use clap::Parser;

use crate::{Color, GameId, PieceKind, Position};

/// A command to be sent to the console.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(
    multicall = true,
    about,
    rename_all = "lower",
    override_usage("<COMMAND>")
)]
pub enum Command {
    /// Print a visual representation of the current board state.
    #[command(alias = "d")]
    Display,

    /// Shows all legal moves in the current position, or for a specific piece.
    Moves {
        /// Only show the moves of the piece on this square.
        square: Option<Position>,

        /// If set, moves will be sorted in alphabetical order.
        #[arg(short, long, default_value = "false")]
        sort: bool,
    },

    /// Apply the provided move to the current game, if it is legal.
    #[command(aliases = ["m", "play"])]
    Move {
        from: Position,
        to: Position,

        /// The piece a Pawn reaching the last row becomes.
        promotion: Option<PieceKind>,
    },

    /// Print whether the side to move is in check, checkmated, or stalemated.
    Status,

    /// Start a fresh game from the standard position.
    ///
    /// If a lobby game is open, it is left as it is, and the console returns to its own scratch game.
    New,

    /// Performs a perft on the current position at the supplied depth, printing total node count.
    Perft { depth: usize },

    /// Performs a split perft on the current position at the supplied depth.
    #[command(alias = "sperft")]
    Splitperft { depth: usize },

    /// List every game in the lobby.
    #[command(alias = "list")]
    Games,

    /// Register a new game in the lobby and open it.
    Create {
        /// Name of the game. May contain spaces.
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },

    /// Take a seat in a lobby game.
    Join {
        id: GameId,
        color: Color,
        player: String,
    },

    /// Make a lobby game the current game.
    Open { id: GameId },

    /// Quit the console.
    #[command(alias = "quit")]
    Exit,
}

impl FromStr for Command {
    type Err = clap::Error;

    /// Attempt to parse a [`Command`] from a line of input.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_parse_from(s.split_ascii_whitespace())
    }
}
