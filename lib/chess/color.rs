use crate::chess::Rank;
use crate::util::Integer;
use derive_more::Display;
use std::ops::Not;

/// The color of a chess [`Piece`][`crate::chess::Piece`].
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[repr(u8)]
pub enum Color {
    #[display("white")]
    White,
    #[display("black")]
    Black,
}

impl Color {
    /// The direction along the ranks in which pawns of this color advance.
    #[inline(always)]
    pub fn forward(&self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// The [`Rank`] where the king and rooks of this color start.
    #[inline(always)]
    pub fn home(&self) -> Rank {
        match self {
            Color::White => Rank::First,
            Color::Black => Rank::Eighth,
        }
    }

    /// The [`Rank`] where pawns of this color promote.
    #[inline(always)]
    pub fn last(&self) -> Rank {
        (!*self).home()
    }

    /// The [`Rank`] pawns of this color must stand on to capture en passant.
    #[inline(always)]
    pub fn en_passant(&self) -> Rank {
        match self {
            Color::White => Rank::Fifth,
            Color::Black => Rank::Fourth,
        }
    }
}

unsafe impl Integer for Color {
    type Repr = u8;
    const MIN: Self::Repr = Color::White as _;
    const MAX: Self::Repr = Color::Black as _;
}

impl Not for Color {
    type Output = Self;

    #[inline(always)]
    fn not(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}
