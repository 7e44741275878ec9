use crate::chess::{Color, File, MoveContext, Piece, Promotion, Rank, Role, Square};
use crate::util::Integer;
use derive_more::{Display, Error};
use std::ops::Index;

/// The reason why a set of pieces is not a valid setup.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Error)]
pub enum IllegalSetup {
    #[display("the {_0} side has no king")]
    MissingKing(#[error(not(source))] Color),
    #[display("the {_0} side has more than one king")]
    TooManyKings(#[error(not(source))] Color),
    #[display("more than one piece on square `{_0}`")]
    SquareOccupiedTwice(#[error(not(source))] Square),
}

/// Represents an attempt to act on a [`Square`] that holds no piece.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Error)]
#[display("there is no piece on square `{_0}`")]
pub struct VacantSquare(#[error(not(source))] pub Square);

/// The chess board.
///
/// Every live [`Piece`] is stored on the [`Square`] it stands on, so a piece is on the board
/// if and only if its square maps to it. Captured pieces are kept aside, per [`Color`].
///
/// Moves on the board are never validated, see [`Game`][`crate::chess::Game`] for that.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Board {
    squares: [Option<Piece>; 64],
    captured: [Vec<Piece>; 2],
}

impl Default for Board {
    /// The standard initial position.
    fn default() -> Self {
        use Role::*;
        const BACK: [Role; 8] = [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];

        let mut board = Board::empty();
        for c in Color::iter() {
            let pawns = Rank::new(c.home().get() + c.forward());
            for (f, r) in File::iter().zip(BACK) {
                board.put(Piece::new(r, c, Square::new(f, c.home())));
                board.put(Piece::new(Pawn, c, Square::new(f, pawns)));
            }
        }

        board
    }
}

impl Board {
    fn empty() -> Self {
        Board {
            squares: [None; 64],
            captured: [Vec::new(), Vec::new()],
        }
    }

    fn put(&mut self, p: Piece) -> Option<Piece> {
        self.squares[p.square() as usize].replace(p)
    }

    /// Sets up a board with the given pieces, none of which has been captured.
    pub fn new<I: IntoIterator<Item = Piece>>(pieces: I) -> Result<Self, IllegalSetup> {
        let mut board = Board::empty();

        for p in pieces {
            if board.put(p).is_some() {
                return Err(IllegalSetup::SquareOccupiedTwice(p.square()));
            }
        }

        Ok(board)
    }

    /// An iterator over all pieces on the board.
    #[inline(always)]
    pub fn iter(&self) -> impl Iterator<Item = Piece> + '_ {
        self.squares.iter().flatten().copied()
    }

    /// An iterator over the pieces of a [`Color`] on the board.
    #[inline(always)]
    pub fn by_color(&self, c: Color) -> impl Iterator<Item = Piece> + '_ {
        self.iter().filter(move |p| p.color() == c)
    }

    /// [`Square`] occupied by the king of a [`Color`].
    #[inline(always)]
    pub fn king(&self, c: Color) -> Option<Square> {
        self.by_color(c)
            .find(|p| p.role() == Role::King)
            .map(|p| p.square())
    }

    /// The pieces of a [`Color`] that have been captured, in order.
    #[inline(always)]
    pub fn captured(&self, c: Color) -> &[Piece] {
        &self.captured[c as usize]
    }

    /// Moves the piece on `whence` to `whither`.
    ///
    /// Returns the piece moved along with the piece that stood on `whither`, if any,
    /// which is displaced from the board without being counted as captured.
    pub fn relocate(
        &mut self,
        whence: Square,
        whither: Square,
    ) -> Result<(Piece, Option<Piece>), VacantSquare> {
        let mut piece = self.squares[whence as usize]
            .take()
            .ok_or(VacantSquare(whence))?;

        piece.relocate(whither);
        Ok((piece, self.put(piece)))
    }

    /// Moves the piece on `whence` to `whither`, capturing the piece that stood there.
    pub fn capture(
        &mut self,
        whence: Square,
        whither: Square,
    ) -> Result<(Piece, Piece), VacantSquare> {
        let target = self[whither].ok_or(VacantSquare(whither))?;
        let (piece, _) = self.relocate(whence, whither)?;
        self.captured[target.color() as usize].push(target);
        Ok((piece, target))
    }

    /// Replaces the piece on a [`Square`] by a new piece of the same color.
    pub fn promote(&mut self, sq: Square, promotion: Promotion) -> Result<Piece, VacantSquare> {
        let original = self[sq].ok_or(VacantSquare(sq))?;
        let promoted = Piece::new(promotion.into(), original.color(), sq);
        self.put(promoted);
        Ok(promoted)
    }

    /// Whether the king on `king` and the rook on `rook` are allowed to castle.
    ///
    /// Neither piece may have ever moved and the squares between them must be vacant.
    /// Whether the king is in check or crosses attacked squares is not considered.
    pub fn can_castle(&self, king: Square, rook: Square) -> bool {
        let (Some(k), Some(r)) = (self[king], self[rook]) else {
            return false;
        };

        if k.role() != Role::King || r.role() != Role::Rook || k.color() != r.color() {
            return false;
        }

        if k.has_moved() || r.has_moved() {
            return false;
        }

        let home = k.color().home();
        if king != Square::new(File::E, home) || rook.rank() != home {
            return false;
        }

        let between: &[File] = match rook.file() {
            File::A => &[File::B, File::C, File::D],
            File::H => &[File::G, File::F],
            _ => return false,
        };

        between.iter().all(|&f| self[Square::new(f, home)].is_none())
    }

    /// Whether the pawn on `pawn` is allowed to capture en passant the pawn on `enemy`.
    ///
    /// The enemy pawn must have moved exactly once and stand right beside the capturing pawn,
    /// which must be on its [en passant rank][`Color::en_passant`].
    pub fn can_en_passant(&self, pawn: Square, enemy: Square) -> bool {
        let (Some(p), Some(e)) = (self[pawn], self[enemy]) else {
            return false;
        };

        p.role() == Role::Pawn
            && e.role() == Role::Pawn
            && p.color() != e.color()
            && pawn.rank() == p.color().en_passant()
            && enemy.rank() == pawn.rank()
            && e.moves() == 1
            && (pawn.file() - enemy.file()).abs() == 1
    }

    /// Plays a move without validating it.
    ///
    /// Captures the piece on `whither` if any, then promotes the piece moved if it is a pawn
    /// that reached its last rank and a [`Promotion`] is given.
    pub fn play(
        &mut self,
        whence: Square,
        whither: Square,
        promotion: Option<Promotion>,
    ) -> Result<MoveContext, VacantSquare> {
        let (piece, capture) = match self[whither] {
            Some(_) => {
                let (piece, capture) = self.capture(whence, whither)?;
                (piece, Some(capture))
            }

            None => self.relocate(whence, whither)?,
        };

        let piece = match promotion {
            Some(p) if piece.role() == Role::Pawn && whither.rank() == piece.color().last() => {
                self.promote(whither, p)?
            }

            _ => piece,
        };

        Ok(MoveContext(piece, capture))
    }

    /// Castles the king on `king` with the rook on `rook` without validating it.
    ///
    /// The king moves two squares towards the rook, which then jumps over to the square
    /// the king crossed.
    pub fn castle(&mut self, king: Square, rook: Square) -> Result<MoveContext, VacantSquare> {
        self[rook].ok_or(VacantSquare(rook))?;

        let (f, g) = if rook.file() > king.file() {
            (File::F, File::G)
        } else {
            (File::D, File::C)
        };

        let (piece, _) = self.relocate(king, Square::new(g, king.rank()))?;
        self.relocate(rook, Square::new(f, king.rank()))?;
        Ok(MoveContext(piece, None))
    }

    /// Moves the pawn on `pawn` to `whither`, capturing the pawn on `enemy` without validating it.
    pub fn en_passant(
        &mut self,
        pawn: Square,
        whither: Square,
        enemy: Square,
    ) -> Result<MoveContext, VacantSquare> {
        let target = self[enemy].ok_or(VacantSquare(enemy))?;
        let (piece, _) = self.relocate(pawn, whither)?;
        self.squares[enemy as usize] = None;
        self.captured[target.color() as usize].push(target);
        Ok(MoveContext(piece, Some(target)))
    }
}

/// Retrieves the [`Piece`] at a given [`Square`], if any.
impl Index<Square> for Board {
    type Output = Option<Piece>;

    #[inline(always)]
    fn index(&self, sq: Square) -> &Self::Output {
        &self.squares[sq as usize]
    }
}
