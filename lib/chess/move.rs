use crate::chess::{Piece, Promotion, Square};
use derive_more::Debug;
use std::fmt;

/// A special rule a [`Move`] invokes.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub enum Special {
    /// Captures en passant the pawn on the given [`Square`].
    EnPassant(Square),
    /// Castles with the rook on the given [`Square`].
    Castling(Square),
}

/// A normalized move request.
///
/// Besides the squares the piece moves from and to, a request may carry the [`Promotion`]
/// of a pawn that reaches its last rank and the [`Special`] rule it relies on.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[debug("Move({self})")]
pub struct Move {
    whence: Square,
    whither: Square,
    promotion: Option<Promotion>,
    special: Option<Special>,
}

impl Move {
    /// A plain move from `whence` to `whither`, capturing whatever stands there.
    #[inline(always)]
    pub fn new(whence: Square, whither: Square) -> Self {
        Move {
            whence,
            whither,
            promotion: None,
            special: None,
        }
    }

    /// A pawn on `whence` capturing en passant the pawn on `captured` by moving to `whither`.
    #[inline(always)]
    pub fn en_passant(whence: Square, whither: Square, captured: Square) -> Self {
        Move {
            special: Some(Special::EnPassant(captured)),
            ..Move::new(whence, whither)
        }
    }

    /// The king on `whence` castling to `whither` with the rook on `rook`.
    #[inline(always)]
    pub fn castling(whence: Square, whither: Square, rook: Square) -> Self {
        Move {
            special: Some(Special::Castling(rook)),
            ..Move::new(whence, whither)
        }
    }

    /// This move with a [`Promotion`] specifier.
    #[inline(always)]
    pub fn with_promotion(self, promotion: Promotion) -> Self {
        Move {
            promotion: Some(promotion),
            ..self
        }
    }

    /// The source [`Square`].
    #[inline(always)]
    pub fn whence(&self) -> Square {
        self.whence
    }

    /// The destination [`Square`].
    #[inline(always)]
    pub fn whither(&self) -> Square {
        self.whither
    }

    /// The [`Promotion`] specifier.
    #[inline(always)]
    pub fn promotion(&self) -> Option<Promotion> {
        self.promotion
    }

    /// The [`Special`] rule this move invokes.
    #[inline(always)]
    pub fn special(&self) -> Option<Special> {
        self.special
    }
}

/// Prints the move in [pure coordinate notation].
///
/// [pure coordinate notation]: https://www.chessprogramming.org/Algebraic_Chess_Notation#Pure_coordinate_notation
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.whence, f)?;
        fmt::Display::fmt(&self.whither, f)?;

        if let Some(p) = self.promotion {
            fmt::Display::fmt(&p, f)?;
        }

        Ok(())
    }
}

/// The context of a [`Move`] played on the board.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct MoveContext(pub Piece, pub Option<Piece>);

impl MoveContext {
    /// The [`Piece`] moved, as it stands after the move.
    #[inline(always)]
    pub fn piece(&self) -> Piece {
        self.0
    }

    /// The [`Piece`] captured, if any.
    #[inline(always)]
    pub fn capture(&self) -> Option<Piece> {
        self.1
    }

    /// Whether this was a capture move.
    #[inline(always)]
    pub fn is_capture(&self) -> bool {
        self.1.is_some()
    }
}
