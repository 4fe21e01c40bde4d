/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use super::{Game, Move};

/// Perform a perft at the specified depth, collecting only data about the number of possible positions (nodes).
///
/// This performs bulk counting, meaning that, at depth 1, it returns the number of available moves,
/// rather than making them, recursing again, and returning 1 for each terminal case.
/// If you do *not* want to use bulk counting, use [`perft_generic`].
///
/// # Example
/// ```
/// # use referee::{perft, Game};
/// let game = Game::new();
/// assert_eq!(perft(&game, 1), 20);
/// assert_eq!(perft(&game, 2), 400);
/// ```
#[inline(always)]
pub fn perft(game: &Game, depth: usize) -> u64 {
    perft_generic::<true>(game, depth)
}

/// Perform a splitperft at the specified depth, returning the number of nodes reachable after each move available at the root.
///
/// The sum of all counts is equal to [`perft`] at the same depth.
/// A depth of 0 has no root moves to split on, and yields an empty list.
pub fn splitperft(game: &Game, depth: usize) -> Vec<(Move, u64)> {
    if depth == 0 {
        return Vec::new();
    }

    game.legal_moves()
        .into_iter()
        .filter_map(|mv| {
            let child = game.with_move_made(mv);
            debug_assert!(child.is_ok(), "{mv} was generated as legal but rejected: {child:?}");
            Some((mv, perft(&child.ok()?, depth - 1)))
        })
        .collect()
}

/// Generic version of `perft` that allows you to specify whether to perform bulk counting.
///
/// If `BULK` is set to `true`, leaves at depth 1 are counted without being played.
pub fn perft_generic<const BULK: bool>(game: &Game, depth: usize) -> u64 {
    // Bulk counting; no need to recurse again just to apply a singular move and return 1.
    if BULK && depth == 1 {
        return game.legal_moves().len() as u64;
    }
    // Recursion limit; return 1, since we're fathoming this node.
    else if depth == 0 {
        return 1;
    }

    game.legal_moves().into_iter().fold(0, |nodes, mv| {
        let child = game.with_move_made(mv);
        debug_assert!(child.is_ok(), "{mv} was generated as legal but rejected: {child:?}");

        match child {
            Ok(child) => nodes + perft_generic::<BULK>(&child, depth - 1),
            Err(_) => nodes,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Board, Color, PieceKind, Position};

    #[test]
    fn test_bulk_matches_full_expansion() {
        let game = Game::new();
        for depth in 0..=3 {
            assert_eq!(
                perft_generic::<true>(&game, depth),
                perft_generic::<false>(&game, depth)
            );
        }
    }

    #[test]
    fn test_splitperft_sums_to_perft() {
        let game = Game::new();
        let split = splitperft(&game, 2);

        assert_eq!(split.len(), 20);
        assert!(split.iter().all(|(_, nodes)| *nodes == 20));
        assert_eq!(split.iter().map(|(_, nodes)| nodes).sum::<u64>(), perft(&game, 2));

        assert!(splitperft(&game, 0).is_empty());
    }

    #[test]
    fn test_every_legal_move_is_counted() {
        // After ...d7-d5, White has en passant, castling on both sides, and promotions
        let board = Board::from_placements("r3k2r/1P1p4/8/4P3/8/8/8/R3K2R").unwrap();
        let mut game = Game::from_board(board, Color::Black);
        game.make_move(Move::new(Position::D7, Position::D5)).unwrap();

        let split = splitperft(&game, 1);
        assert_eq!(split.len(), game.legal_moves().len());
        assert!(split.iter().all(|(_, nodes)| *nodes == 1));

        let moves = split.iter().map(|(mv, _)| *mv).collect::<Vec<_>>();
        assert!(moves.contains(&Move::new(Position::E5, Position::D6)));
        assert!(moves.contains(&Move::new(Position::E1, Position::G1)));
        assert!(moves.contains(&Move::new(Position::E1, Position::C1)));
        assert!(moves.contains(&Move::promoting(Position::B7, Position::A8, PieceKind::Knight)));

        assert_eq!(
            perft_generic::<true>(&game, 2),
            perft_generic::<false>(&game, 2)
        );
    }

    #[test]
    fn test_depth_zero_is_one_node() {
        assert_eq!(perft(&Game::new(), 0), 1);
    }
}
