/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, ops::Index};

use anyhow::{bail, Result};

use super::{Color, Piece, PieceKind, Position};

/// Order of the pieces on both back ranks at the start of a game, from column 1 to column 8.
const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// An 8x8 grid of squares, each holding at most one [`Piece`].
///
/// A [`Board`] knows nothing about whose turn it is or how the pieces got there,
/// beyond the moved flag carried by each [`Piece`].
/// It is a plain value: copying it yields a fully independent board, which is what
/// legality checking relies on when it plays out a candidate move on a scratch copy.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Board {
    /// Indexed as `squares[row - 1][col - 1]`.
    squares: [[Option<Piece>; 8]; 8],
}

impl Board {
    /// Creates a new, empty [`Board`] containing no pieces.
    ///
    /// # Example
    /// ```
    /// # use referee::Board;
    /// let board = Board::new();
    /// assert_eq!(board.pieces().count(), 0);
    /// ```
    #[inline(always)]
    pub const fn new() -> Self {
        Self {
            squares: [[None; 8]; 8],
        }
    }

    /// Creates a new [`Board`] in the standard starting layout.
    ///
    /// # Example
    /// ```
    /// # use referee::{Board, Color, Piece, PieceKind, Position};
    /// let board = Board::standard();
    /// assert_eq!(board.pieces().count(), 32);
    /// assert_eq!(board.piece_at(Position::E1), Some(Piece::new(Color::White, PieceKind::King)));
    /// assert_eq!(board.piece_at(Position::D8), Some(Piece::new(Color::Black, PieceKind::Queen)));
    /// ```
    pub fn standard() -> Self {
        let mut board = Self::new();
        board.reset();
        board
    }

    /// Constructs a [`Board`] from the piece-placement field of a FEN string, such as
    /// `rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR`.
    ///
    /// Ranks are listed from row 8 down to row 1. Upper-case letters are White, lower-case are Black,
    /// and digits skip that many empty squares. Every piece is created unmoved.
    /// Anything after the first space is ignored.
    ///
    /// # Example
    /// ```
    /// # use referee::{Board, Position};
    /// let board = Board::from_placements("4k3/8/8/8/8/8/8/4K2R").unwrap();
    /// assert_eq!(board.pieces().count(), 3);
    /// assert!(board.piece_at(Position::H1).is_some_and(|p| p.is_rook()));
    /// ```
    pub fn from_placements(placements: &str) -> Result<Self> {
        let placements = placements.split(' ').next().unwrap_or_default();

        let ranks = placements.split('/').collect::<Vec<_>>();
        if ranks.len() != 8 {
            bail!("Placements must describe all 8 ranks. Got {}", ranks.len());
        }

        let mut board = Self::new();

        // The first rank listed is row 8, so walk them in reverse
        for (row, rank) in (1..=8).zip(ranks.into_iter().rev()) {
            let mut col = 1;

            for c in rank.chars() {
                if let Some(empty) = c.to_digit(10) {
                    col += empty as u8;
                    if col > 9 {
                        bail!("Rank {row} in {placements:?} describes more than 8 squares");
                    }
                    continue;
                }

                let kind = c.to_string().parse::<PieceKind>()?;
                let color = if c.is_ascii_uppercase() {
                    Color::White
                } else {
                    Color::Black
                };

                let Some(position) = Position::try_new(row as i8, col as i8) else {
                    bail!("Rank {row} in {placements:?} describes more than 8 squares");
                };

                board.add_piece(position, Some(Piece::new(color, kind)));
                col += 1;
            }

            if col != 9 {
                bail!("Rank {row} in {placements:?} must describe exactly 8 squares");
            }
        }

        Ok(board)
    }

    /// Clears the board and sets it up in the standard starting layout.
    ///
    /// Pawns fill rows 2 and 7, and both back ranks hold Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook.
    pub fn reset(&mut self) {
        *self = Self::new();

        for (col, kind) in (1..=8).zip(BACK_RANK) {
            for color in Color::all() {
                let back = Position::new(color.home_row(), col);
                let front = Position::new(color.pawn_start_row(), col);

                self.add_piece(back, Some(Piece::new(color, kind)));
                self.add_piece(front, Some(Piece::new(color, PieceKind::Pawn)));
            }
        }
    }

    /// Places `piece` on `position`, replacing whatever was there.
    /// Passing `None` clears the square.
    ///
    /// # Example
    /// ```
    /// # use referee::{Board, Color, Piece, PieceKind, Position};
    /// let knight = Piece::new(Color::White, PieceKind::Knight);
    /// let mut board = Board::new();
    /// board.add_piece(Position::C4, Some(knight));
    /// assert_eq!(board.piece_at(Position::C4), Some(knight));
    ///
    /// board.add_piece(Position::C4, None);
    /// assert_eq!(board.piece_at(Position::C4), None);
    /// ```
    #[inline(always)]
    pub fn add_piece(&mut self, position: Position, piece: Option<Piece>) {
        self.squares[position.row() as usize - 1][position.col() as usize - 1] = piece;
    }

    /// Removes and returns the piece on `position`, if there is one.
    #[inline(always)]
    pub fn remove_piece(&mut self, position: Position) -> Option<Piece> {
        self.squares[position.row() as usize - 1][position.col() as usize - 1].take()
    }

    /// Fetches the piece on `position`, if there is one.
    #[inline(always)]
    pub const fn piece_at(&self, position: Position) -> Option<Piece> {
        self.squares[position.row() as usize - 1][position.col() as usize - 1]
    }

    /// Returns `true` if no piece occupies `position`.
    #[inline(always)]
    pub const fn is_empty(&self, position: Position) -> bool {
        self.piece_at(position).is_none()
    }

    /// Returns a mutable reference to the piece on `position`, if there is one.
    #[inline(always)]
    pub fn piece_at_mut(&mut self, position: Position) -> Option<&mut Piece> {
        self.squares[position.row() as usize - 1][position.col() as usize - 1].as_mut()
    }

    /// An iterator over every occupied square and its piece, from a1 to h8, row by row.
    pub fn pieces(&self) -> impl Iterator<Item = (Position, Piece)> + '_ {
        Position::iter().filter_map(|pos| self.piece_at(pos).map(|piece| (pos, piece)))
    }

    /// An iterator over every square occupied by a piece of `color`.
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Position, Piece)> + '_ {
        self.pieces().filter(move |(_, piece)| piece.color() == color)
    }

    /// Locates the King of `color`, if it is on the board.
    ///
    /// # Example
    /// ```
    /// # use referee::{Board, Color, Position};
    /// let board = Board::standard();
    /// assert_eq!(board.find_king(Color::Black), Some(Position::E8));
    /// assert_eq!(Board::new().find_king(Color::White), None);
    /// ```
    pub fn find_king(&self, color: Color) -> Option<Position> {
        self.pieces_of(color)
            .find(|(_, piece)| piece.is_king())
            .map(|(pos, _)| pos)
    }
}

impl Index<Position> for Board {
    type Output = Option<Piece>;

    #[inline(always)]
    fn index(&self, index: Position) -> &Self::Output {
        &self.squares[index.row() as usize - 1][index.col() as usize - 1]
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Allocate just enough capacity
        let mut board = String::with_capacity(198);

        for row in (1..=8).rev() {
            board += &format!("{row}| ");

            for col in 1..=8 {
                let occupant = self
                    .piece_at(Position::new(row, col))
                    .map(|piece| piece.char())
                    .unwrap_or('.');

                board.push(occupant);
                board.push(' ');
            }

            board += "\n";
        }

        board += " +";
        for _ in 1..=8 {
            board += "--";
        }
        board += "\n   ";
        for col in 1..=8 {
            board.push(Position::new(1, col).file_char());
            board.push(' ');
        }

        write!(f, "{board}")
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}
