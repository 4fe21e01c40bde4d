/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, ops::Not, str::FromStr};

use anyhow::{bail, Result};

/// Represents the color of a player or piece.
///
/// White traditionally moves first, and therefore [`Color`] defaults to [`Color::White`].
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub enum Color {
    #[default]
    White,
    Black,
}

impl Color {
    /// Number of color variants.
    pub const COUNT: usize = 2;

    /// An array of both colors, starting with White.
    #[inline(always)]
    pub const fn all() -> [Self; Self::COUNT] {
        [Self::White, Self::Black]
    }

    /// Returns this [`Color`]'s opponent.
    ///
    /// # Example
    /// ```
    /// # use referee::Color;
    /// assert_eq!(Color::White.opponent(), Color::Black);
    /// assert_eq!(Color::Black.opponent(), Color::White);
    /// ```
    #[inline(always)]
    pub const fn opponent(&self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    /// Returns `true` if this [`Color`] is White.
    #[inline(always)]
    pub const fn is_white(&self) -> bool {
        matches!(self, Self::White)
    }

    /// The row delta of a single pawn step for this [`Color`].
    ///
    /// White pawns advance towards increasing rows, Black pawns towards decreasing rows.
    #[inline(always)]
    pub const fn pawn_direction(&self) -> i8 {
        match self {
            Self::White => 1,
            Self::Black => -1,
        }
    }

    /// The row on which this [`Color`]'s pawns start, and from which they may advance two squares.
    #[inline(always)]
    pub const fn pawn_start_row(&self) -> u8 {
        match self {
            Self::White => 2,
            Self::Black => 7,
        }
    }

    /// The row on which this [`Color`]'s pawns promote.
    #[inline(always)]
    pub const fn promotion_row(&self) -> u8 {
        match self {
            Self::White => 8,
            Self::Black => 1,
        }
    }

    /// The row on which this [`Color`]'s King and Rooks start the game.
    #[inline(always)]
    pub const fn home_row(&self) -> u8 {
        match self {
            Self::White => 1,
            Self::Black => 8,
        }
    }

    /// Returns this [`Color`] as a `usize`, for indexing into lists.
    #[inline(always)]
    pub const fn index(&self) -> usize {
        *self as usize
    }
}

impl Not for Color {
    type Output = Self;

    #[inline(always)]
    fn not(self) -> Self::Output {
        self.opponent()
    }
}

impl FromStr for Color {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "w" | "white" => Ok(Self::White),
            "b" | "black" => Ok(Self::Black),
            _ => bail!("Color must be either \"white\" or \"black\". Got {s:?}"),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::White => "White",
            Self::Black => "Black",
        };

        write!(f, "{name}")
    }
}

/// Represents the kind (or "type") that a chess piece can be.
///
/// This is a closed set, so every dispatch on it is checked for exhaustiveness at compile time.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub enum PieceKind {
    King,
    Queen,
    Rook,
    Bishop,
    Knight,
    Pawn,
}

impl PieceKind {
    /// Number of piece variants.
    pub const COUNT: usize = 6;

    /// The kinds a Pawn may promote to, in the order promotions are generated.
    pub const PROMOTIONS: [Self; 4] = [Self::Queen, Self::Rook, Self::Bishop, Self::Knight];

    /// An array of all 6 [`PieceKind`]s.
    #[inline(always)]
    pub const fn all() -> [Self; Self::COUNT] {
        [
            Self::King,
            Self::Queen,
            Self::Rook,
            Self::Bishop,
            Self::Knight,
            Self::Pawn,
        ]
    }

    /// Returns `true` if a Pawn may promote to this kind.
    #[inline(always)]
    pub const fn is_promotion_target(&self) -> bool {
        matches!(self, Self::Queen | Self::Rook | Self::Bishop | Self::Knight)
    }

    /// The lower-case letter used for this [`PieceKind`] in diagrams.
    ///
    /// # Example
    /// ```
    /// # use referee::PieceKind;
    /// assert_eq!(PieceKind::Knight.char(), 'n');
    /// assert_eq!(PieceKind::King.char(), 'k');
    /// ```
    #[inline(always)]
    pub const fn char(&self) -> char {
        match self {
            Self::King => 'k',
            Self::Queen => 'q',
            Self::Rook => 'r',
            Self::Bishop => 'b',
            Self::Knight => 'n',
            Self::Pawn => 'p',
        }
    }

    /// The name of this [`PieceKind`], such as `"Knight"`.
    #[inline(always)]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::King => "King",
            Self::Queen => "Queen",
            Self::Rook => "Rook",
            Self::Bishop => "Bishop",
            Self::Knight => "Knight",
            Self::Pawn => "Pawn",
        }
    }
}

impl FromStr for PieceKind {
    type Err = anyhow::Error;

    /// Accepts either the letter (`q`) or the name (`queen`) of a piece, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();

        Self::all()
            .into_iter()
            .find(|kind| {
                lowered == kind.name().to_ascii_lowercase() || lowered == kind.char().to_string()
            })
            .ok_or_else(|| anyhow::anyhow!("Unknown piece kind {s:?}"))
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A single chess piece: its [`Color`], its [`PieceKind`], and whether it has moved yet.
///
/// The moved flag only matters for castling eligibility, but it does take part in equality:
/// a Rook that has moved away and back is not equal to one that never left its square.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Piece {
    color: Color,
    kind: PieceKind,
    moved: bool,
}

impl Piece {
    /// Creates a new, unmoved [`Piece`].
    ///
    /// # Example
    /// ```
    /// # use referee::{Color, Piece, PieceKind};
    /// let rook = Piece::new(Color::Black, PieceKind::Rook);
    /// assert_eq!(rook.color(), Color::Black);
    /// assert_eq!(rook.kind(), PieceKind::Rook);
    /// assert!(!rook.has_moved());
    /// ```
    #[inline(always)]
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Self {
            color,
            kind,
            moved: false,
        }
    }

    /// The [`Color`] of this piece.
    #[inline(always)]
    pub const fn color(&self) -> Color {
        self.color
    }

    /// The [`PieceKind`] of this piece.
    #[inline(always)]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    /// Returns `true` if this piece has moved at least once this game.
    #[inline(always)]
    pub const fn has_moved(&self) -> bool {
        self.moved
    }

    /// Flags this piece as having moved. There is no way to clear the flag.
    #[inline(always)]
    pub fn mark_moved(&mut self) {
        self.moved = true;
    }

    /// Returns a copy of this piece with the moved flag set.
    #[inline(always)]
    pub const fn moved(self) -> Self {
        Self {
            moved: true,
            ..self
        }
    }

    /// Returns a copy of this piece with its kind replaced, as happens on promotion.
    #[inline(always)]
    pub const fn promoted(self, kind: PieceKind) -> Self {
        Self { kind, ..self }
    }

    #[inline(always)]
    pub const fn is_king(&self) -> bool {
        matches!(self.kind, PieceKind::King)
    }

    #[inline(always)]
    pub const fn is_pawn(&self) -> bool {
        matches!(self.kind, PieceKind::Pawn)
    }

    #[inline(always)]
    pub const fn is_rook(&self) -> bool {
        matches!(self.kind, PieceKind::Rook)
    }

    /// The diagram letter for this piece: upper-case for White, lower-case for Black.
    ///
    /// # Example
    /// ```
    /// # use referee::{Color, Piece, PieceKind};
    /// assert_eq!(Piece::new(Color::White, PieceKind::Queen).char(), 'Q');
    /// assert_eq!(Piece::new(Color::Black, PieceKind::Queen).char(), 'q');
    /// ```
    #[inline(always)]
    pub const fn char(&self) -> char {
        let c = self.kind.char();
        if self.color.is_white() {
            c.to_ascii_uppercase()
        } else {
            c
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.color, self.kind)
    }
}
