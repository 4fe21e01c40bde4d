/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, str::FromStr};

use anyhow::{bail, Context, Result};

/// A coordinate on the 8x8 chess board.
///
/// Rows and columns are both 1-indexed, so `(1, 1)` is White's queenside corner (a1)
/// and `(8, 8)` is Black's kingside corner (h8).
/// Rows increase towards Black's side of the board and columns increase towards the kingside.
///
/// A [`Position`] can only ever hold in-range coordinates.
/// [`Position::new`] treats an out-of-range coordinate as a programming error and panics,
/// while [`Position::try_new`] and [`Position::offset`] report it with `None`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    row: u8,
    col: u8,
}

impl Position {
    /// Lowest valid row or column.
    pub const MIN: u8 = 1;

    /// Highest valid row or column.
    pub const MAX: u8 = 8;

    /// Number of squares on the board.
    pub const COUNT: usize = 64;

    /// Creates a new [`Position`] at `row` and `col`.
    ///
    /// # Panics
    /// If either coordinate is outside of `[1, 8]`.
    ///
    /// # Example
    /// ```
    /// # use referee::Position;
    /// let e4 = Position::new(4, 5);
    /// assert_eq!(e4, Position::E4);
    /// assert_eq!(e4.to_string(), "e4");
    /// ```
    #[inline(always)]
    pub const fn new(row: u8, col: u8) -> Self {
        assert!(
            row >= Self::MIN && row <= Self::MAX && col >= Self::MIN && col <= Self::MAX,
            "Position coordinates must be within [1, 8]"
        );

        Self { row, col }
    }

    /// Creates a new [`Position`] if both `row` and `col` lie within `[1, 8]`.
    ///
    /// # Example
    /// ```
    /// # use referee::Position;
    /// assert_eq!(Position::try_new(1, 1), Some(Position::A1));
    /// assert_eq!(Position::try_new(0, 4), None);
    /// assert_eq!(Position::try_new(8, 9), None);
    /// ```
    #[inline(always)]
    pub const fn try_new(row: i8, col: i8) -> Option<Self> {
        if row >= Self::MIN as i8
            && row <= Self::MAX as i8
            && col >= Self::MIN as i8
            && col <= Self::MAX as i8
        {
            Some(Self {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    /// The row (rank) of this [`Position`], in `[1, 8]`.
    #[inline(always)]
    pub const fn row(&self) -> u8 {
        self.row
    }

    /// The column (file) of this [`Position`], in `[1, 8]`.
    #[inline(always)]
    pub const fn col(&self) -> u8 {
        self.col
    }

    /// Attempt to offset this [`Position`] by the row and column deltas.
    ///
    /// If the result would fall off the board, `None` is returned.
    ///
    /// # Example
    /// ```
    /// # use referee::Position;
    /// assert_eq!(Position::C4.offset(1, 1), Some(Position::D5));
    /// assert_eq!(Position::C4.offset(-1, -1), Some(Position::B3));
    /// assert_eq!(Position::A1.offset(-1, -1), None);
    /// ```
    #[inline(always)]
    pub const fn offset(&self, row_delta: i8, col_delta: i8) -> Option<Self> {
        Self::try_new(self.row as i8 + row_delta, self.col as i8 + col_delta)
    }

    /// Zero-based index of this [`Position`] into a row-major array of 64 squares.
    #[inline(always)]
    pub const fn index(&self) -> usize {
        (self.row as usize - 1) * 8 + (self.col as usize - 1)
    }

    /// An iterator over all 64 positions, from a1 to h8, row by row.
    pub fn iter() -> impl Iterator<Item = Self> {
        (Self::MIN..=Self::MAX)
            .flat_map(|row| (Self::MIN..=Self::MAX).map(move |col| Self { row, col }))
    }

    /// The letter of this [`Position`]'s column, `a` through `h`.
    #[inline(always)]
    pub const fn file_char(&self) -> char {
        (b'a' + self.col - 1) as char
    }
}

macro_rules! def_positions {
    (@row $row:literal, $col:expr, $name:ident $(, $rest:ident)*) => {
        pub const $name: Self = Self::new($row, $col);
        def_positions!(@row $row, $col + 1 $(, $rest)*);
    };

    (@row $row:literal, $col:expr) => {};

    ($($row:literal => [$($name:ident),*]),* $(,)?) => {
        impl Position {
            $(def_positions!(@row $row, 1, $($name),*);)*
        }
    };
}

def_positions! {
    1 => [A1, B1, C1, D1, E1, F1, G1, H1],
    2 => [A2, B2, C2, D2, E2, F2, G2, H2],
    3 => [A3, B3, C3, D3, E3, F3, G3, H3],
    4 => [A4, B4, C4, D4, E4, F4, G4, H4],
    5 => [A5, B5, C5, D5, E5, F5, G5, H5],
    6 => [A6, B6, C6, D6, E6, F6, G6, H6],
    7 => [A7, B7, C7, D7, E7, F7, G7, H7],
    8 => [A8, B8, C8, D8, E8, F8, G8, H8],
}

impl FromStr for Position {
    type Err = anyhow::Error;

    /// Parses a square name such as `e4` into a [`Position`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();

        let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
            bail!("Square names must be exactly two characters long. Got {s:?}");
        };

        let file = file.to_ascii_lowercase();
        if !('a'..='h').contains(&file) {
            bail!("Invalid file {file:?} in {s:?}: files must be between [a,h]");
        }

        let rank = rank
            .to_digit(10)
            .with_context(|| format!("Invalid rank {rank:?} in {s:?}"))?;

        Self::try_new(rank as i8, (file as u8 - b'a' + 1) as i8)
            .with_context(|| format!("Invalid rank {rank} in {s:?}: ranks must be between [1,8]"))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.row)
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self} ({}, {})", self.row, self.col)
    }
}
