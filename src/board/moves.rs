/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

use super::{PieceKind, Position};

/// Maximum number of moves a single piece can have in any position.
///
/// A Queen in the center of an open board reaches 27 squares, which is the largest
/// mobility of any piece, and a Pawn on its seventh rank has at most 3 destinations with 4 promotions each.
pub const MAX_MOVES_PER_SQUARE: usize = 32;

/// An alias for an [`arrayvec::ArrayVec`] holding the moves available to a single piece.
pub type MoveList = arrayvec::ArrayVec<Move, MAX_MOVES_PER_SQUARE>;

/// Represents a single ply: a piece moving from one [`Position`] to another,
/// and the [`PieceKind`] a Pawn becomes if this move promotes it.
///
/// Castling is encoded as the King moving two columns; the Rook's relocation is a side effect
/// of applying the move, not a move of its own. Likewise, en passant is encoded as an ordinary
/// diagonal Pawn move onto an empty square.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    from: Position,
    to: Position,
    promotion: Option<PieceKind>,
}

impl Move {
    /// Creates a new [`Move`] that does not promote.
    ///
    /// # Example
    /// ```
    /// # use referee::{Move, Position};
    /// let e2e4 = Move::new(Position::E2, Position::E4);
    /// assert_eq!(e2e4.from(), Position::E2);
    /// assert_eq!(e2e4.to(), Position::E4);
    /// assert_eq!(e2e4.promotion(), None);
    /// ```
    #[inline(always)]
    pub const fn new(from: Position, to: Position) -> Self {
        Self {
            from,
            to,
            promotion: None,
        }
    }

    /// Creates a new [`Move`] that promotes a Pawn to `kind` upon arrival.
    ///
    /// # Example
    /// ```
    /// # use referee::{Move, PieceKind, Position};
    /// let promo = Move::promoting(Position::E7, Position::E8, PieceKind::Knight);
    /// assert_eq!(promo.promotion(), Some(PieceKind::Knight));
    /// assert_ne!(promo, Move::new(Position::E7, Position::E8));
    /// ```
    #[inline(always)]
    pub const fn promoting(from: Position, to: Position, kind: PieceKind) -> Self {
        Self {
            from,
            to,
            promotion: Some(kind),
        }
    }

    /// Creates a new [`Move`] with an optional promotion.
    #[inline(always)]
    pub const fn with_promotion(from: Position, to: Position, promotion: Option<PieceKind>) -> Self {
        Self {
            from,
            to,
            promotion,
        }
    }

    /// The source (or "from") [`Position`] of this [`Move`].
    #[inline(always)]
    pub const fn from(&self) -> Position {
        self.from
    }

    /// The destination (or "to") [`Position`] of this [`Move`].
    #[inline(always)]
    pub const fn to(&self) -> Position {
        self.to
    }

    /// The [`PieceKind`] this move promotes to, if any.
    #[inline(always)]
    pub const fn promotion(&self) -> Option<PieceKind> {
        self.promotion
    }

    /// Number of rows this move travels, regardless of direction.
    #[inline(always)]
    pub const fn row_distance(&self) -> u8 {
        self.from.row().abs_diff(self.to.row())
    }

    /// Number of columns this move travels, regardless of direction.
    #[inline(always)]
    pub const fn col_distance(&self) -> u8 {
        self.from.col().abs_diff(self.to.col())
    }
}

impl fmt::Display for Move {
    /// Displays the move as its source and destination squares, such as `e7-e8=Q`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.from, self.to)?;

        if let Some(kind) = self.promotion {
            write!(f, "={}", kind.char().to_ascii_uppercase())?;
        }

        Ok(())
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}
