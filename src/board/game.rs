/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

use log::{debug, trace};
use thiserror::Error;

use super::{
    is_king_in_check, pseudo_legal_moves, Board, Color, Move, MoveList, Piece, Position,
};

/// Column on which both Kings start the game.
const KING_START_COL: u8 = 5;

/// Reasons a [`Move`] can be rejected by [`Game::make_move`].
///
/// A rejected move never changes the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    /// The source square of the move is empty.
    #[error("there is no piece on {0}")]
    NoPiece(Position),

    /// The piece on the source square belongs to the player who is not on move.
    #[error("the {piece} on {position} cannot move while it is {side_to_move}'s turn")]
    WrongSide {
        position: Position,
        piece: Piece,
        side_to_move: Color,
    },

    /// The move is not among the legal moves of the piece on its source square.
    #[error("{0} is not a legal move")]
    Illegal(Move),
}

/// The state of a game from the perspective of the side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    /// The side to move is not in check and has at least one legal move.
    Ongoing,

    /// The side to move is in check, but can get out of it.
    Check,

    /// The side to move is in check and has no legal moves. They have lost.
    Checkmate,

    /// The side to move is not in check, but has no legal moves. The game is drawn.
    Stalemate,
}

impl GameStatus {
    /// Returns `true` if no further moves can be played.
    #[inline(always)]
    pub const fn is_over(&self) -> bool {
        matches!(self, Self::Checkmate | Self::Stalemate)
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Ongoing => "Ongoing",
            Self::Check => "Check",
            Self::Checkmate => "Checkmate",
            Self::Stalemate => "Stalemate",
        };

        write!(f, "{s}")
    }
}

/// A game of chess.
///
/// This type owns a [`Board`], and adds the two pieces of history the rules need beyond the board itself:
/// whose turn it is, and the last move that was played (so that en passant can be offered for exactly one ply).
///
/// The basic methods you're probably looking for are [`Game::valid_moves`], [`Game::make_move`], and [`Game::status`].
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Game {
    /// The current layout of the pieces.
    board: Board,

    /// The [`Color`] of the player who moves next.
    side_to_move: Color,

    /// The most recently committed move, if any move has been played.
    last_move: Option<Move>,
}

impl Game {
    /// Creates a new [`Game`] from the standard starting position, with White to move.
    ///
    /// # Example
    /// ```
    /// # use referee::{Board, Color, Game};
    /// let game = Game::new();
    /// assert_eq!(game.side_to_move(), Color::White);
    /// assert_eq!(game.board(), &Board::standard());
    /// assert_eq!(game.last_move(), None);
    /// ```
    pub fn new() -> Self {
        Self::from_board(Board::standard(), Color::White)
    }

    /// Creates a new [`Game`] with the provided [`Board`] and side to move, and no move history.
    ///
    /// # Example
    /// ```
    /// # use referee::{Board, Color, Game};
    /// let board = Board::from_placements("4k3/8/8/8/8/8/4P3/4K3").unwrap();
    /// let game = Game::from_board(board, Color::Black);
    /// assert_eq!(game.side_to_move(), Color::Black);
    /// ```
    pub const fn from_board(board: Board, side_to_move: Color) -> Self {
        Self {
            board,
            side_to_move,
            last_move: None,
        }
    }

    /// The current [`Board`].
    #[inline(always)]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// Replaces the current [`Board`].
    ///
    /// The side to move and the last move are left as they were.
    #[inline(always)]
    pub fn set_board(&mut self, board: Board) {
        self.board = board;
    }

    /// The [`Color`] of the player who moves next.
    #[inline(always)]
    pub const fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Overrides whose turn it is.
    #[inline(always)]
    pub fn set_side_to_move(&mut self, color: Color) {
        self.side_to_move = color;
    }

    /// The most recently committed move, if any.
    #[inline(always)]
    pub const fn last_move(&self) -> Option<Move> {
        self.last_move
    }

    /// Fetches all legal moves of the piece on `from`, or `None` if the square is empty.
    ///
    /// This works for pieces of either color, regardless of whose turn it is.
    /// The moves include castling and en passant when they are available.
    ///
    /// Legality is decided by simulation: every candidate is played out on a scratch copy of the board,
    /// and is kept only if the mover's own King is not attacked afterwards.
    ///
    /// # Example
    /// ```
    /// # use referee::{Game, Move, Position};
    /// let game = Game::new();
    /// let moves = game.valid_moves(Position::E2).unwrap();
    /// assert_eq!(moves.len(), 2);
    /// assert!(moves.contains(&Move::new(Position::E2, Position::E4)));
    ///
    /// assert!(game.valid_moves(Position::E4).is_none());
    /// ```
    pub fn valid_moves(&self, from: Position) -> Option<MoveList> {
        let piece = self.board.piece_at(from)?;
        let color = piece.color();

        let mut moves = pseudo_legal_moves(&self.board, from, piece);

        if let Some(en_passant) = self.en_passant_move(from, piece) {
            moves.push(en_passant);
        }

        self.add_castling_moves(from, piece, &mut moves);

        moves.retain(|mv| {
            let safe = self.leaves_king_safe(*mv, color);
            if !safe {
                trace!("Discarding {mv}: it would leave the {color} King attacked");
            }
            safe
        });

        Some(moves)
    }

    /// Fetches every legal move available to the side to move.
    ///
    /// # Example
    /// ```
    /// # use referee::Game;
    /// assert_eq!(Game::new().legal_moves().len(), 20);
    /// ```
    pub fn legal_moves(&self) -> Vec<Move> {
        self.board
            .pieces_of(self.side_to_move)
            .flat_map(|(from, _)| self.valid_moves(from).unwrap_or_default())
            .collect()
    }

    /// Returns `true` if the King of `color` is currently attacked.
    ///
    /// # Example
    /// ```
    /// # use referee::{Board, Color, Game};
    /// let board = Board::from_placements("4k3/8/8/8/8/8/8/4R1K1").unwrap();
    /// let game = Game::from_board(board, Color::Black);
    /// assert!(game.is_in_check(Color::Black));
    /// assert!(!game.is_in_check(Color::White));
    /// ```
    #[inline(always)]
    pub fn is_in_check(&self, color: Color) -> bool {
        is_king_in_check(&self.board, color)
    }

    /// Returns `true` if `color` is in check and has no legal moves.
    pub fn is_in_checkmate(&self, color: Color) -> bool {
        self.is_in_check(color) && !self.has_legal_moves(color)
    }

    /// Returns `true` if `color` is not in check but has no legal moves.
    pub fn is_in_stalemate(&self, color: Color) -> bool {
        !self.is_in_check(color) && !self.has_legal_moves(color)
    }

    /// Adjudicates the game from the perspective of the side to move.
    ///
    /// # Example
    /// ```
    /// # use referee::{Board, Color, Game, GameStatus};
    /// assert_eq!(Game::new().status(), GameStatus::Ongoing);
    ///
    /// let board = Board::from_placements("k7/1Q6/1K6/8/8/8/8/8").unwrap();
    /// let game = Game::from_board(board, Color::Black);
    /// assert_eq!(game.status(), GameStatus::Checkmate);
    /// ```
    pub fn status(&self) -> GameStatus {
        let color = self.side_to_move;

        match (self.is_in_check(color), self.has_legal_moves(color)) {
            (true, true) => GameStatus::Check,
            (true, false) => GameStatus::Checkmate,
            (false, true) => GameStatus::Ongoing,
            (false, false) => GameStatus::Stalemate,
        }
    }

    /// Applies `mv` to the game if it is legal, handing the turn to the other player.
    ///
    /// The move is rejected, and the game left untouched, if there is no piece on its source square,
    /// if that piece belongs to the player who is not on move, or if the move is not one of that piece's legal moves.
    ///
    /// # Example
    /// ```
    /// # use referee::{Color, Game, Move, MoveError, Position};
    /// let mut game = Game::new();
    ///
    /// let e2e4 = Move::new(Position::E2, Position::E4);
    /// assert!(game.make_move(e2e4).is_ok());
    /// assert_eq!(game.side_to_move(), Color::Black);
    /// assert_eq!(game.last_move(), Some(e2e4));
    ///
    /// // It is Black's turn now
    /// let d2d4 = Move::new(Position::D2, Position::D4);
    /// assert!(matches!(game.make_move(d2d4), Err(MoveError::WrongSide { .. })));
    /// ```
    pub fn make_move(&mut self, mv: Move) -> Result<(), MoveError> {
        let piece = self.validate(mv).inspect_err(|err| {
            debug!("Rejected {mv}: {err}");
        })?;

        apply_move(&mut self.board, mv);
        self.last_move = Some(mv);
        self.side_to_move = self.side_to_move.opponent();

        debug!("{piece} played {mv}");
        Ok(())
    }

    /// Copies `self` and returns a [`Game`] after having applied the provided [`Move`].
    pub fn with_move_made(&self, mv: Move) -> Result<Self, MoveError> {
        let mut copied = *self;
        copied.make_move(mv)?;
        Ok(copied)
    }

    /// Checks everything [`Game::make_move`] requires of `mv`, returning the piece that would move.
    fn validate(&self, mv: Move) -> Result<Piece, MoveError> {
        let piece = self
            .board
            .piece_at(mv.from())
            .ok_or(MoveError::NoPiece(mv.from()))?;

        if piece.color() != self.side_to_move {
            return Err(MoveError::WrongSide {
                position: mv.from(),
                piece,
                side_to_move: self.side_to_move,
            });
        }

        let is_legal = self
            .valid_moves(mv.from())
            .is_some_and(|moves| moves.contains(&mv));

        if !is_legal {
            return Err(MoveError::Illegal(mv));
        }

        Ok(piece)
    }

    /// Returns `true` if any piece of `color` has at least one legal move.
    fn has_legal_moves(&self, color: Color) -> bool {
        self.board
            .pieces_of(color)
            .any(|(from, _)| self.valid_moves(from).is_some_and(|moves| !moves.is_empty()))
    }

    /// Plays `mv` out on a copy of the board and reports whether the King of `color` survives unattacked.
    fn leaves_king_safe(&self, mv: Move, color: Color) -> bool {
        let mut scratch = self.board;
        apply_move(&mut scratch, mv);
        !is_king_in_check(&scratch, color)
    }

    /// If the last move was an enemy Pawn advancing two squares to land beside the Pawn on `from`,
    /// returns the en passant capture of that Pawn.
    fn en_passant_move(&self, from: Position, piece: Piece) -> Option<Move> {
        if !piece.is_pawn() {
            return None;
        }

        let last = self.last_move?;
        let passer = self.board.piece_at(last.to())?;

        let was_double_push = passer.is_pawn()
            && passer.color() != piece.color()
            && last.row_distance() == 2
            && last.col_distance() == 0;

        let is_beside = last.to().row() == from.row() && last.to().col().abs_diff(from.col()) == 1;

        if !(was_double_push && is_beside) {
            return None;
        }

        // Land on the square the passing Pawn skipped over
        let target = last.to().offset(piece.color().pawn_direction(), 0)?;

        self.board
            .is_empty(target)
            .then_some(Move::new(from, target))
    }

    /// Appends each castling move available to the King on `from`.
    ///
    /// Castling towards a side requires that neither the King nor that side's Rook have moved,
    /// that every square between them is empty, that the King is not in check,
    /// and that the square the King passes over is not attacked.
    /// Whether the King's destination is attacked is left to the legality filter.
    fn add_castling_moves(&self, from: Position, king: Piece, moves: &mut MoveList) {
        let color = king.color();

        if !king.is_king()
            || king.has_moved()
            || from != Position::new(color.home_row(), KING_START_COL)
        {
            return;
        }

        if self.is_in_check(color) {
            return;
        }

        // Kingside, then queenside
        for (rook_col, step) in [(8, 1), (1, -1)] {
            let rook_square = Position::new(from.row(), rook_col);

            let rook_is_ready = self
                .board
                .piece_at(rook_square)
                .is_some_and(|rook| rook.is_rook() && rook.color() == color && !rook.has_moved());

            if !rook_is_ready {
                continue;
            }

            let (low, high) = if rook_col > from.col() {
                (from.col() + 1, rook_col)
            } else {
                (rook_col + 1, from.col())
            };

            let path_is_clear =
                (low..high).all(|col| self.board.is_empty(Position::new(from.row(), col)));

            if !path_is_clear {
                continue;
            }

            let (Some(transit), Some(destination)) = (from.offset(0, step), from.offset(0, 2 * step))
            else {
                continue;
            };

            if !self.leaves_king_safe(Move::new(from, transit), color) {
                continue;
            }

            moves.push(Move::new(from, destination));
        }
    }
}

/// Moves the piece on `mv.from()` to `mv.to()`, carrying out any side effects the move implies.
///
/// - A Pawn moving diagonally onto an empty square captures the Pawn it passed (en passant).
/// - A King moving two columns brings the Rook from that corner to the square it passed over (castling).
/// - A promotion replaces the Pawn with the chosen kind.
///
/// The moving piece is flagged as moved. No legality checks are performed.
fn apply_move(board: &mut Board, mv: Move) {
    let Some(mut piece) = board.remove_piece(mv.from()) else {
        return;
    };

    if piece.is_pawn() && mv.col_distance() == 1 && board.is_empty(mv.to()) {
        if let Some(passed) = mv.to().offset(-piece.color().pawn_direction(), 0) {
            board.remove_piece(passed);
        }
    }

    if piece.is_king() && mv.col_distance() == 2 {
        let row = mv.from().row();
        let (rook_from, rook_to) = if mv.to().col() > mv.from().col() {
            (8, 6)
        } else {
            (1, 4)
        };

        if let Some(rook) = board.remove_piece(Position::new(row, rook_from)) {
            board.add_piece(Position::new(row, rook_to), Some(rook.moved()));
        }
    }

    if let Some(kind) = mv.promotion() {
        piece = piece.promoted(kind);
    }

    piece.mark_moved();
    board.add_piece(mv.to(), Some(piece));
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n\n{} to move", self.board, self.side_to_move)
    }
}

impl fmt::Debug for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")?;

        if let Some(last) = self.last_move {
            write!(f, " (last move: {last})")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PieceKind;

    fn game_from(placements: &str, side_to_move: Color) -> Game {
        Game::from_board(Board::from_placements(placements).unwrap(), side_to_move)
    }

    fn play(game: &mut Game, from: Position, to: Position) {
        let mv = Move::new(from, to);
        game.make_move(mv)
            .unwrap_or_else(|err| panic!("{mv} should be legal: {err}\n{game}"));
    }

    fn destinations(game: &Game, from: Position) -> Vec<Position> {
        let mut squares = game
            .valid_moves(from)
            .unwrap_or_default()
            .iter()
            .map(|mv| mv.to())
            .collect::<Vec<_>>();
        squares.sort();
        squares
    }

    #[test]
    fn test_startpos_has_twenty_moves() {
        let game = Game::new();
        let moves = game.legal_moves();
        assert_eq!(moves.len(), 20);

        let pawn_moves = moves
            .iter()
            .filter(|mv| game.board().piece_at(mv.from()).unwrap().is_pawn())
            .count();
        assert_eq!(pawn_moves, 16);
    }

    #[test]
    fn test_rejections_leave_game_untouched() {
        let mut game = Game::new();
        let before = game;

        assert_eq!(
            game.make_move(Move::new(Position::E4, Position::E5)),
            Err(MoveError::NoPiece(Position::E4))
        );

        assert!(matches!(
            game.make_move(Move::new(Position::E7, Position::E5)),
            Err(MoveError::WrongSide {
                position: Position::E7,
                side_to_move: Color::White,
                ..
            })
        ));

        let too_far = Move::new(Position::E2, Position::E5);
        assert_eq!(game.make_move(too_far), Err(MoveError::Illegal(too_far)));

        assert_eq!(game, before);
    }

    #[test]
    fn test_turns_alternate() {
        let mut game = Game::new();
        play(&mut game, Position::G1, Position::F3);
        assert_eq!(game.side_to_move(), Color::Black);
        play(&mut game, Position::G8, Position::F6);
        assert_eq!(game.side_to_move(), Color::White);
        assert!(game.board().piece_at(Position::F3).unwrap().has_moved());
    }

    #[test]
    fn test_pinned_piece_cannot_move() {
        let game = game_from("4k3/4r3/8/8/8/8/4B3/4K3", Color::White);
        assert_eq!(game.valid_moves(Position::E2).map(|m| m.len()), Some(0));

        // The King may still step aside
        assert!(!game.valid_moves(Position::E1).unwrap().is_empty());
    }

    #[test]
    fn test_must_resolve_check() {
        // Black rook gives check along the e-file; White can block, capture, or step away
        let game = game_from("4k3/8/8/8/4r3/8/3N1B2/3RK3", Color::White);
        assert!(game.is_in_check(Color::White));
        assert_eq!(game.status(), GameStatus::Check);

        for mv in game.legal_moves() {
            let after = game.with_move_made(mv).unwrap();
            assert!(!after.is_in_check(Color::White), "{mv} leaves White in check");
        }

        // Block, capture, step aside
        let moves = game.legal_moves();
        assert!(moves.contains(&Move::new(Position::F2, Position::E3)));
        assert!(moves.contains(&Move::new(Position::D2, Position::E4)));
        assert!(moves.contains(&Move::new(Position::E1, Position::F1)));
        assert!(!moves.contains(&Move::new(Position::D1, Position::C1)));
    }

    #[test]
    fn test_en_passant_window() {
        let mut game = Game::new();
        play(&mut game, Position::E2, Position::E4);
        play(&mut game, Position::A7, Position::A6);
        play(&mut game, Position::E4, Position::E5);
        play(&mut game, Position::D7, Position::D5);

        // Exactly one extra capture is offered: onto the square d5 skipped over
        let ep = Move::new(Position::E5, Position::D6);
        let moves = game.valid_moves(Position::E5).unwrap();
        assert_eq!(moves.iter().filter(|mv| **mv == ep).count(), 1);
        assert_eq!(destinations(&game, Position::E5), vec![Position::D6, Position::E6]);

        // Let the chance pass
        play(&mut game, Position::B1, Position::C3);
        play(&mut game, Position::A6, Position::A5);
        assert!(!game.valid_moves(Position::E5).unwrap().contains(&ep));
        assert_eq!(game.make_move(ep), Err(MoveError::Illegal(ep)));
    }

    #[test]
    fn test_en_passant_capture_removes_passed_pawn() {
        let mut game = Game::new();
        play(&mut game, Position::E2, Position::E4);
        play(&mut game, Position::A7, Position::A6);
        play(&mut game, Position::E4, Position::E5);
        play(&mut game, Position::F7, Position::F5);
        play(&mut game, Position::E5, Position::F6);

        let board = game.board();
        assert!(board.is_empty(Position::F5));
        assert!(board.is_empty(Position::E5));
        assert_eq!(
            board.piece_at(Position::F6).map(|p| (p.color(), p.kind())),
            Some((Color::White, PieceKind::Pawn))
        );
        assert_eq!(board.pieces_of(Color::Black).count(), 15);
    }

    #[test]
    fn test_en_passant_cannot_expose_king() {
        // After ...c7-c5, taking en passant would clear the fifth row between the King and the Rook
        let mut game = game_from("7k/2p5/8/KP5r/8/8/8/8", Color::Black);
        play(&mut game, Position::C7, Position::C5);

        assert_eq!(destinations(&game, Position::B5), vec![Position::B6]);
    }

    #[test]
    fn test_castling_both_sides() {
        let game = game_from("r3k2r/8/8/8/8/8/8/R3K2R", Color::White);
        let king = destinations(&game, Position::E1);
        assert!(king.contains(&Position::G1));
        assert!(king.contains(&Position::C1));

        let black = destinations(&game, Position::E8);
        assert!(black.contains(&Position::G8));
        assert!(black.contains(&Position::C8));
    }

    #[test]
    fn test_castling_moves_the_rook() {
        let mut game = game_from("r3k2r/8/8/8/8/8/8/R3K2R", Color::White);
        play(&mut game, Position::E1, Position::G1);

        let board = game.board();
        assert!(board.piece_at(Position::G1).is_some_and(|p| p.is_king()));
        assert!(board.piece_at(Position::F1).is_some_and(|p| p.is_rook() && p.has_moved()));
        assert!(board.is_empty(Position::H1));
        assert!(board.is_empty(Position::E1));

        play(&mut game, Position::E8, Position::C8);
        let board = game.board();
        assert!(board.piece_at(Position::C8).is_some_and(|p| p.is_king()));
        assert!(board.piece_at(Position::D8).is_some_and(|p| p.is_rook() && p.has_moved()));
        assert!(board.is_empty(Position::A8));
    }

    #[test]
    fn test_castling_requires_clear_path() {
        // Knight on b1 blocks queenside, even though the King never crosses b1
        let game = game_from("4k3/8/8/8/8/8/8/RN2K2R", Color::White);
        let king = destinations(&game, Position::E1);
        assert!(king.contains(&Position::G1));
        assert!(!king.contains(&Position::C1));
    }

    #[test]
    fn test_castling_through_or_into_attack() {
        // Rook on f8 covers f1, the kingside transit square
        let game = game_from("4kr2/8/8/8/8/8/8/R3K2R", Color::White);
        let king = destinations(&game, Position::E1);
        assert!(!king.contains(&Position::G1));
        assert!(king.contains(&Position::C1));

        // Rook on g8 covers g1, the kingside destination
        let game = game_from("4k1r1/8/8/8/8/8/8/R3K2R", Color::White);
        assert!(!destinations(&game, Position::E1).contains(&Position::G1));

        // Rook on b8 covers b1, which the King never touches
        let game = game_from("1r2k3/8/8/8/8/8/8/R3K2R", Color::White);
        assert!(destinations(&game, Position::E1).contains(&Position::C1));
    }

    #[test]
    fn test_no_castling_out_of_check() {
        let game = game_from("4r1k1/8/8/8/8/8/8/R3K2R", Color::White);
        assert!(game.is_in_check(Color::White));

        let king = destinations(&game, Position::E1);
        assert!(!king.contains(&Position::G1));
        assert!(!king.contains(&Position::C1));
    }

    #[test]
    fn test_castling_rights_are_lost_for_good() {
        let mut game = game_from("4k3/pppppppp/8/8/8/8/8/R3K2R", Color::White);

        // Rook leaves and returns
        play(&mut game, Position::H1, Position::H2);
        play(&mut game, Position::A7, Position::A6);
        play(&mut game, Position::H2, Position::H1);
        play(&mut game, Position::A6, Position::A5);

        let king = destinations(&game, Position::E1);
        assert!(!king.contains(&Position::G1));
        assert!(king.contains(&Position::C1));

        // King leaves and returns
        play(&mut game, Position::E1, Position::D1);
        play(&mut game, Position::B7, Position::B6);
        play(&mut game, Position::D1, Position::E1);
        play(&mut game, Position::B6, Position::B5);

        let king = destinations(&game, Position::E1);
        assert!(!king.contains(&Position::G1));
        assert!(!king.contains(&Position::C1));
    }

    #[test]
    fn test_promotion() {
        let mut game = game_from("8/P6k/8/8/8/8/8/K7", Color::White);

        let moves = game.valid_moves(Position::A7).unwrap();
        assert_eq!(moves.len(), 4);

        let plain = Move::new(Position::A7, Position::A8);
        assert_eq!(game.make_move(plain), Err(MoveError::Illegal(plain)));

        let underpromotion = Move::promoting(Position::A7, Position::A8, PieceKind::Knight);
        game.make_move(underpromotion).unwrap();

        let knight = game.board().piece_at(Position::A8).unwrap();
        assert_eq!(knight.kind(), PieceKind::Knight);
        assert_eq!(knight.color(), Color::White);
    }

    #[test]
    fn test_checkmate() {
        let game = game_from("k7/1Q6/1K6/8/8/8/8/8", Color::Black);

        assert!(game.is_in_check(Color::Black));
        assert!(game.is_in_checkmate(Color::Black));
        assert!(!game.is_in_stalemate(Color::Black));
        assert!(game.legal_moves().is_empty());
        assert_eq!(game.status(), GameStatus::Checkmate);
        assert!(game.status().is_over());

        assert!(!game.is_in_checkmate(Color::White));
    }

    #[test]
    fn test_stalemate() {
        let game = game_from("k7/2Q5/1K6/8/8/8/8/8", Color::Black);

        assert!(!game.is_in_check(Color::Black));
        assert!(game.is_in_stalemate(Color::Black));
        assert!(!game.is_in_checkmate(Color::Black));
        assert_eq!(game.status(), GameStatus::Stalemate);
    }

    #[test]
    fn test_set_board_keeps_turn_and_history() {
        let mut game = Game::new();
        play(&mut game, Position::E2, Position::E4);

        game.set_board(Board::standard());
        assert_eq!(game.side_to_move(), Color::Black);
        assert_eq!(game.last_move(), Some(Move::new(Position::E2, Position::E4)));
        assert_eq!(game.board(), &Board::standard());
    }

    #[test]
    fn test_valid_moves_for_either_side() {
        let game = Game::new();
        assert_eq!(game.valid_moves(Position::B8).map(|m| m.len()), Some(2));
    }

    #[test]
    fn test_error_messages() {
        let err = MoveError::NoPiece(Position::D4);
        assert_eq!(err.to_string(), "there is no piece on d4");

        let err = MoveError::Illegal(Move::new(Position::A1, Position::A2));
        assert_eq!(err.to_string(), "a1-a2 is not a legal move");
    }
}
