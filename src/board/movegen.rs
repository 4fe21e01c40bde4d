/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Pseudo-legal move generation.
//!
//! Every generator here is a pure function of a [`Board`], the [`Position`] of a piece, and the [`Piece`] itself.
//! None of them consider whether the mover's own King is left in check; that is the job of [`crate::Game`].

use super::{Board, Color, Move, MoveList, Piece, PieceKind, Position};

/// A function that produces the pseudo-legal moves of one kind of piece.
pub type MoveGenerator = fn(&Board, Position, Piece) -> MoveList;

/// Deltas for the movement of the Rook, as `(row, col)`.
pub const ORTHOGONAL_DELTAS: [(i8, i8); 4] = [(1, 0), (0, -1), (-1, 0), (0, 1)];

/// Deltas for the movement of the Bishop, as `(row, col)`.
pub const DIAGONAL_DELTAS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, -1), (-1, 1)];

/// Deltas for the movement of the Queen (and the single steps of the King), as `(row, col)`.
pub const QUEEN_DELTAS: [(i8, i8); 8] = [
    /* Rook */
    (1, 0),
    (0, -1),
    (-1, 0),
    (0, 1),
    /* Bishop */
    (1, 1),
    (1, -1),
    (-1, -1),
    (-1, 1),
];

/// Deltas for the movement of the Knight, as `(row, col)`.
pub const KNIGHT_DELTAS: [(i8, i8); 8] = [
    (2, 1),
    (1, 2),
    (-1, 2),
    (-2, 1),
    (-2, -1),
    (-1, -2),
    (1, -2),
    (2, -1),
];

/// Selects the generator responsible for pieces of `kind`.
#[inline(always)]
pub fn generator_for(kind: PieceKind) -> MoveGenerator {
    match kind {
        PieceKind::King => king_moves,
        PieceKind::Queen => queen_moves,
        PieceKind::Rook => rook_moves,
        PieceKind::Bishop => bishop_moves,
        PieceKind::Knight => knight_moves,
        PieceKind::Pawn => pawn_moves,
    }
}

/// Generates the pseudo-legal moves of `piece` standing on `from`.
///
/// Castling and en passant are not included, since both depend on game history rather than the board alone.
///
/// # Example
/// ```
/// # use referee::{pseudo_legal_moves, Board, Position};
/// let board = Board::standard();
/// let knight = board.piece_at(Position::G1).unwrap();
/// assert_eq!(pseudo_legal_moves(&board, Position::G1, knight).len(), 2);
/// ```
#[inline(always)]
pub fn pseudo_legal_moves(board: &Board, from: Position, piece: Piece) -> MoveList {
    generator_for(piece.kind())(board, from, piece)
}

/// Returns `true` if `target` holds nothing, or holds a piece that `piece` could capture.
#[inline(always)]
fn is_open_for(board: &Board, target: Position, piece: Piece) -> bool {
    board
        .piece_at(target)
        .map_or(true, |occupant| occupant.color() != piece.color())
}

/// Generates single-step moves to each `from + delta`, as the King and Knight move.
fn step_moves(board: &Board, from: Position, piece: Piece, deltas: &[(i8, i8)]) -> MoveList {
    deltas
        .iter()
        .filter_map(|&(dr, dc)| from.offset(dr, dc))
        .filter(|&to| is_open_for(board, to, piece))
        .map(|to| Move::new(from, to))
        .collect()
}

/// Scans outwards from `from` along each of `deltas`, as the Rook, Bishop, and Queen move.
///
/// Each ray stops at the edge of the board or at the first occupied square.
/// An enemy on that square is included as a capture; a friendly piece is not.
pub fn sliding_moves(board: &Board, from: Position, piece: Piece, deltas: &[(i8, i8)]) -> MoveList {
    let mut moves = MoveList::new();

    for &(dr, dc) in deltas {
        let mut current = from;

        while let Some(to) = current.offset(dr, dc) {
            match board.piece_at(to) {
                None => moves.push(Move::new(from, to)),

                Some(occupant) => {
                    if occupant.color() != piece.color() {
                        moves.push(Move::new(from, to));
                    }
                    break;
                }
            }

            current = to;
        }
    }

    moves
}

/// Pseudo-legal moves of a King: one step in any of the 8 directions.
pub fn king_moves(board: &Board, from: Position, piece: Piece) -> MoveList {
    step_moves(board, from, piece, &QUEEN_DELTAS)
}

/// Pseudo-legal moves of a Knight: the 8 L-shaped jumps.
pub fn knight_moves(board: &Board, from: Position, piece: Piece) -> MoveList {
    step_moves(board, from, piece, &KNIGHT_DELTAS)
}

/// Pseudo-legal moves of a Rook: slides along rows and columns.
pub fn rook_moves(board: &Board, from: Position, piece: Piece) -> MoveList {
    sliding_moves(board, from, piece, &ORTHOGONAL_DELTAS)
}

/// Pseudo-legal moves of a Bishop: slides along diagonals.
pub fn bishop_moves(board: &Board, from: Position, piece: Piece) -> MoveList {
    sliding_moves(board, from, piece, &DIAGONAL_DELTAS)
}

/// Pseudo-legal moves of a Queen: slides in all 8 directions.
pub fn queen_moves(board: &Board, from: Position, piece: Piece) -> MoveList {
    sliding_moves(board, from, piece, &QUEEN_DELTAS)
}

/// Pseudo-legal moves of a Pawn.
///
/// 1. One square forward, if it is empty.
/// 2. Two squares forward, only from the starting row and only if both squares are empty.
/// 3. One square diagonally forward, only if an enemy piece is there.
///
/// Any of these that land on the promotion row are replaced by four moves, one per promotion choice.
pub fn pawn_moves(board: &Board, from: Position, piece: Piece) -> MoveList {
    let mut moves = MoveList::new();
    let color = piece.color();
    let forward = color.pawn_direction();

    if let Some(single) = from.offset(forward, 0) {
        if board.is_empty(single) {
            push_pawn_move(&mut moves, from, single, color);

            if from.row() == color.pawn_start_row() {
                if let Some(double) = from.offset(2 * forward, 0) {
                    if board.is_empty(double) {
                        push_pawn_move(&mut moves, from, double, color);
                    }
                }
            }
        }
    }

    for side in [-1, 1] {
        let Some(target) = from.offset(forward, side) else {
            continue;
        };

        if board
            .piece_at(target)
            .is_some_and(|occupant| occupant.color() != color)
        {
            push_pawn_move(&mut moves, from, target, color);
        }
    }

    moves
}

/// Appends a Pawn move, expanding it into every promotion if it lands on the promotion row.
fn push_pawn_move(moves: &mut MoveList, from: Position, to: Position, color: Color) {
    if to.row() == color.promotion_row() {
        for kind in PieceKind::PROMOTIONS {
            moves.push(Move::promoting(from, to, kind));
        }
    } else {
        moves.push(Move::new(from, to));
    }
}

/// Returns `true` if any piece of color `by` has a pseudo-legal move ending on `target`.
///
/// `target` is expected to be occupied by a piece of the other color, since Pawns only
/// threaten squares they could capture on.
///
/// # Example
/// ```
/// # use referee::{is_square_attacked, Board, Color, Position};
/// let board = Board::from_placements("4k3/8/8/8/8/8/8/R3K3").unwrap();
/// assert!(!is_square_attacked(&board, Position::E8, Color::White));
///
/// let board = Board::from_placements("r3k3/8/8/8/8/8/8/R3K3").unwrap();
/// assert!(is_square_attacked(&board, Position::A8, Color::White));
/// ```
pub fn is_square_attacked(board: &Board, target: Position, by: Color) -> bool {
    board.pieces_of(by).any(|(from, piece)| {
        pseudo_legal_moves(board, from, piece)
            .iter()
            .any(|mv| mv.to() == target)
    })
}

/// Returns `true` if the King of `color` is attacked by any enemy piece on `board`.
///
/// A board without a King of `color` is never in check.
///
/// # Example
/// ```
/// # use referee::{is_king_in_check, Board, Color};
/// let board = Board::from_placements("4k3/8/8/8/8/8/8/4R1K1").unwrap();
/// assert!(is_king_in_check(&board, Color::Black));
/// assert!(!is_king_in_check(&board, Color::White));
/// ```
pub fn is_king_in_check(board: &Board, color: Color) -> bool {
    board
        .find_king(color)
        .is_some_and(|king| is_square_attacked(board, king, color.opponent()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn destinations(moves: &MoveList) -> Vec<Position> {
        let mut squares = moves.iter().map(|mv| mv.to()).collect::<Vec<_>>();
        squares.sort();
        squares.dedup();
        squares
    }

    fn place(board: &mut Board, pos: Position, color: Color, kind: PieceKind) -> Piece {
        let piece = Piece::new(color, kind);
        board.add_piece(pos, Some(piece));
        piece
    }

    #[test]
    fn test_knight_in_corner() {
        let mut board = Board::new();
        let knight = place(&mut board, Position::A1, Color::White, PieceKind::Knight);

        let moves = knight_moves(&board, Position::A1, knight);
        assert_eq!(destinations(&moves), vec![Position::C2, Position::B3]);
    }

    #[test]
    fn test_knight_captures_but_never_lands_on_friends() {
        let mut board = Board::new();
        let knight = place(&mut board, Position::D4, Color::White, PieceKind::Knight);
        place(&mut board, Position::E6, Color::White, PieceKind::Pawn);
        place(&mut board, Position::C6, Color::Black, PieceKind::Pawn);

        let moves = knight_moves(&board, Position::D4, knight);
        assert_eq!(moves.len(), 7);
        assert!(moves.contains(&Move::new(Position::D4, Position::C6)));
        assert!(!moves.contains(&Move::new(Position::D4, Position::E6)));
    }

    #[test]
    fn test_king_steps() {
        let mut board = Board::new();
        let king = place(&mut board, Position::E4, Color::Black, PieceKind::King);
        assert_eq!(king_moves(&board, Position::E4, king).len(), 8);

        let mut board = Board::new();
        let king = place(&mut board, Position::H8, Color::Black, PieceKind::King);
        assert_eq!(
            destinations(&king_moves(&board, Position::H8, king)),
            vec![Position::G7, Position::H7, Position::G8]
        );
    }

    #[test]
    fn test_sliding_stops_at_blockers() {
        let mut board = Board::new();
        let rook = place(&mut board, Position::D4, Color::White, PieceKind::Rook);
        place(&mut board, Position::D6, Color::Black, PieceKind::Knight);
        place(&mut board, Position::F4, Color::White, PieceKind::Pawn);

        let moves = rook_moves(&board, Position::D4, rook);

        // Up: d5, d6 (capture). Down: d3, d2, d1. Left: c4, b4, a4. Right: e4.
        assert_eq!(moves.len(), 9);
        assert!(moves.contains(&Move::new(Position::D4, Position::D6)));
        assert!(!moves.contains(&Move::new(Position::D4, Position::D7)));
        assert!(!moves.contains(&Move::new(Position::D4, Position::F4)));
        assert!(!moves.contains(&Move::new(Position::D4, Position::G4)));
    }

    #[test]
    fn test_queen_is_rook_plus_bishop() {
        let board = Board::from_placements("8/8/2p5/8/3Q4/8/5P2/8").unwrap();
        let queen = board.piece_at(Position::D4).unwrap();

        let mut combined = destinations(&rook_moves(&board, Position::D4, queen));
        combined.extend(destinations(&bishop_moves(&board, Position::D4, queen)));
        combined.sort();

        assert_eq!(destinations(&queen_moves(&board, Position::D4, queen)), combined);
    }

    #[test]
    fn test_open_board_queen_mobility() {
        let mut board = Board::new();
        let queen = place(&mut board, Position::D4, Color::White, PieceKind::Queen);
        assert_eq!(queen_moves(&board, Position::D4, queen).len(), 27);
    }

    #[test]
    fn test_pawn_pushes() {
        let board = Board::standard();
        let pawn = board.piece_at(Position::E2).unwrap();
        assert_eq!(
            destinations(&pawn_moves(&board, Position::E2, pawn)),
            vec![Position::E3, Position::E4]
        );

        let pawn = board.piece_at(Position::D7).unwrap();
        assert_eq!(
            destinations(&pawn_moves(&board, Position::D7, pawn)),
            vec![Position::D5, Position::D6]
        );
    }

    #[test]
    fn test_pawn_blocked() {
        let mut board = Board::new();
        let pawn = place(&mut board, Position::E2, Color::White, PieceKind::Pawn);

        // Blocking the far square leaves only the single push
        place(&mut board, Position::E4, Color::Black, PieceKind::Knight);
        assert_eq!(
            destinations(&pawn_moves(&board, Position::E2, pawn)),
            vec![Position::E3]
        );

        // Blocking the near square removes both pushes
        place(&mut board, Position::E3, Color::White, PieceKind::Knight);
        assert!(pawn_moves(&board, Position::E2, pawn).is_empty());
    }

    #[test]
    fn test_pawn_captures_only_enemies() {
        let mut board = Board::new();
        let pawn = place(&mut board, Position::D5, Color::Black, PieceKind::Pawn);
        place(&mut board, Position::C4, Color::White, PieceKind::Bishop);
        place(&mut board, Position::E4, Color::Black, PieceKind::Bishop);

        let moves = pawn_moves(&board, Position::D5, pawn);
        assert_eq!(
            destinations(&moves),
            vec![Position::C4, Position::D4],
            "{moves:?}"
        );
    }

    #[test]
    fn test_pawn_promotions() {
        let mut board = Board::new();
        let pawn = place(&mut board, Position::B7, Color::White, PieceKind::Pawn);
        place(&mut board, Position::A8, Color::Black, PieceKind::Rook);
        place(&mut board, Position::C8, Color::White, PieceKind::Rook);

        let moves = pawn_moves(&board, Position::B7, pawn);

        // Push to b8 and capture on a8, each with 4 promotions
        assert_eq!(moves.len(), 8);
        assert!(moves.iter().all(|mv| mv.promotion().is_some()));

        for target in [Position::B8, Position::A8] {
            let kinds = moves
                .iter()
                .filter(|mv| mv.to() == target)
                .filter_map(|mv| mv.promotion())
                .collect::<Vec<_>>();
            assert_eq!(kinds, PieceKind::PROMOTIONS.to_vec());
        }
    }

    #[test]
    fn test_black_pawn_promotes_on_row_one() {
        let mut board = Board::new();
        let pawn = place(&mut board, Position::H2, Color::Black, PieceKind::Pawn);

        let moves = pawn_moves(&board, Position::H2, pawn);
        assert_eq!(moves.len(), 4);
        assert!(moves.iter().all(|mv| mv.to() == Position::H1));
    }

    #[test]
    fn test_generators_leave_board_untouched() {
        let board = Board::standard();
        let before = board;

        for (pos, piece) in board.pieces() {
            let _ = pseudo_legal_moves(&board, pos, piece);
        }

        assert_eq!(board, before);
    }

    #[test]
    fn test_attacks() {
        let board = Board::from_placements("4k3/8/8/8/8/8/3p4/4K3").unwrap();

        // The pawn on d2 gives check
        assert!(is_king_in_check(&board, Color::White));
        assert!(!is_king_in_check(&board, Color::Black));

        // Pushing squares are not attacks
        let board = Board::from_placements("4k3/8/8/8/8/4p3/8/4K3").unwrap();
        assert!(!is_king_in_check(&board, Color::White));
    }

    #[test]
    fn test_no_king_means_no_check() {
        let board = Board::from_placements("8/8/8/8/8/8/8/R7").unwrap();
        assert!(!is_king_in_check(&board, Color::Black));
    }
}
