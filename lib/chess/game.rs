use crate::chess::{Board, Color, File, IllegalSetup, Move, MoveContext, Piece, Promotion, Role};
use crate::chess::{Special, Square, VacantSquare};
use crate::util::Integer;
use derive_more::{Display, Error};
use tracing::{debug, instrument};

/// The reason why a [`Move`] is illegal.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Error)]
pub enum IllegalMove {
    #[display("there is no piece on square `{_0}`")]
    NoPieceAtOrigin(#[error(not(source))] Square),
    #[display("square `{_0}` cannot be reached")]
    IllegalDestination(#[error(not(source))] Square),
    #[display("square `{_0}` cannot be reached by a pawn")]
    IllegalPawnDestination(#[error(not(source))] Square),
    #[display("the special move is not allowed")]
    InvalidSpecialMove,
    #[display("the move leaves the king in check")]
    ExposesOwnKing,
}

impl From<VacantSquare> for IllegalMove {
    #[inline(always)]
    fn from(VacantSquare(sq): VacantSquare) -> Self {
        IllegalMove::NoPieceAtOrigin(sq)
    }
}

/// The unit direction from `whence` towards `whither`.
#[inline(always)]
fn direction(whence: Square, whither: Square) -> (i8, i8) {
    let df = (whither.file() - whence.file()).signum();
    let dr = (whither.rank() - whence.rank()).signum();
    (df, dr)
}

/// The squares strictly between `whence` and `whither` along a straight line.
fn between(whence: Square, whither: Square) -> impl Iterator<Item = Square> {
    let (df, dr) = direction(whence, whither);
    whence.ray(df, dr).take_while(move |&sq| sq != whither)
}

fn is_path_clear(board: &Board, whence: Square, whither: Square) -> bool {
    if whence == whither {
        return true;
    }

    let (df, dr) = direction(whence, whither);
    for sq in whence.ray(df, dr) {
        if sq == whither {
            return true;
        } else if board[sq].is_some() {
            return false;
        }
    }

    false
}

/// Whether the piece on `whence` can reach `whither`, ignoring the safety of its own king.
fn reach(
    board: &Board,
    whence: Square,
    whither: Square,
    en_passant: bool,
) -> Result<Piece, IllegalMove> {
    use IllegalMove::*;

    let piece = board[whence].ok_or(NoPieceAtOrigin(whence))?;
    let target = board[whither];

    if target.is_some_and(|t| t.color() == piece.color()) {
        return Err(IllegalDestination(whither));
    } else if !piece.destinations().contains(&whither) {
        return Err(IllegalDestination(whither));
    }

    if piece.role() == Role::Pawn {
        let straight = whither.file() == whence.file();
        if straight && target.is_some() {
            return Err(IllegalPawnDestination(whither));
        } else if !straight && target.is_none() && !en_passant {
            return Err(IllegalPawnDestination(whither));
        }
    }

    if piece.role() != Role::Knight && !is_path_clear(board, whence, whither) {
        return Err(IllegalDestination(whither));
    }

    Ok(piece)
}

/// The pieces that threaten the king on `king`.
fn threats(board: &Board, king: Square) -> Vec<Piece> {
    let Some(k) = board[king] else {
        return Vec::new();
    };

    board
        .by_color(!k.color())
        .filter(|p| reach(board, p.square(), king, false).is_ok())
        .collect()
}

/// The rule engine.
///
/// Validates and commits moves on a [`Board`], detecting check and checkmate.
///
/// The engine does not keep track of whose turn it is, nor does it refuse moves once a
/// winner is known, callers are expected to enforce both.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Game {
    board: Board,
    kings: [Square; 2],
    threats: [Vec<Piece>; 2],
    winner: Option<Color>,
}

impl Default for Game {
    fn default() -> Self {
        Game {
            board: Board::default(),
            kings: [Square::E1, Square::E8],
            threats: [Vec::new(), Vec::new()],
            winner: None,
        }
    }
}

impl Game {
    /// Sets up a game with the given pieces.
    ///
    /// Fails unless there is exactly one king of each [`Color`].
    pub fn new<I: IntoIterator<Item = Piece>>(pieces: I) -> Result<Self, IllegalSetup> {
        let board = Board::new(pieces)?;
        let mut kings = [Square::E1, Square::E8];

        for c in Color::iter() {
            let king = board.king(c).ok_or(IllegalSetup::MissingKing(c))?;
            if board.by_color(c).filter(|p| p.role() == Role::King).count() > 1 {
                return Err(IllegalSetup::TooManyKings(c));
            }

            kings[c as usize] = king;
        }

        Ok(Game {
            board,
            kings,
            threats: [Vec::new(), Vec::new()],
            winner: None,
        })
    }

    /// The current [`Board`].
    #[inline(always)]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The [`Color`] that checkmated its opponent, if any.
    #[inline(always)]
    pub fn winner(&self) -> Option<Color> {
        self.winner
    }

    /// The [`Square`] occupied by the king of a [`Color`].
    #[inline(always)]
    pub fn king(&self, c: Color) -> Square {
        self.kings[c as usize]
    }

    /// The pieces found threatening the king of a [`Color`] by the last call to [`Game::is_check`].
    #[inline(always)]
    pub fn threats(&self, c: Color) -> &[Piece] {
        &self.threats[c as usize]
    }

    /// Whether no piece stands strictly between `whence` and `whither`.
    ///
    /// The path is walked one step at a time in the direction of `whither`, so it is
    /// never clear unless both squares are on the same file, rank, or diagonal.
    pub fn is_path_clear(&self, whence: Square, whither: Square) -> bool {
        is_path_clear(&self.board, whence, whither)
    }

    /// Whether the piece on `whence` can reach `whither`, regardless of the safety of its king.
    pub fn reaches(&self, whence: Square, whither: Square) -> bool {
        reach(&self.board, whence, whither, false).is_ok()
    }

    /// The pieces currently threatening the king of a [`Color`].
    pub fn checkers(&self, c: Color) -> Vec<Piece> {
        threats(&self.board, self.king(c))
    }

    /// Plays `m` on a copy of the board and checks whether it leaves the king of `piece` safe.
    fn simulate(&self, m: &Move, piece: Piece) -> Result<(), IllegalMove> {
        let mut board = self.board.clone();

        let mc = match m.special() {
            Some(Special::Castling(rook)) => board.castle(m.whence(), rook)?,
            Some(Special::EnPassant(enemy)) => board.en_passant(m.whence(), m.whither(), enemy)?,
            None => board.play(m.whence(), m.whither(), m.promotion())?,
        };

        let king = match piece.role() {
            Role::King => mc.piece().square(),
            _ => self.king(piece.color()),
        };

        if threats(&board, king).is_empty() {
            Ok(())
        } else {
            Err(IllegalMove::ExposesOwnKing)
        }
    }

    fn validate_castling(
        &self,
        whence: Square,
        whither: Square,
        rook: Square,
    ) -> Result<Piece, IllegalMove> {
        use IllegalMove::*;

        if !self.board.can_castle(whence, rook) {
            return Err(InvalidSpecialMove);
        }

        let king = self.board[whence].ok_or(NoPieceAtOrigin(whence))?;
        let (crossed, landing) = if rook.file() > whence.file() {
            (File::F, File::G)
        } else {
            (File::D, File::C)
        };

        if whither != Square::new(landing, whence.rank()) {
            return Err(InvalidSpecialMove);
        } else if !self.checkers(king.color()).is_empty() {
            return Err(InvalidSpecialMove);
        }

        let crossed = Square::new(crossed, whence.rank());
        if self.validate(&Move::new(whence, crossed)).is_err() {
            return Err(InvalidSpecialMove);
        }

        self.simulate(&Move::castling(whence, whither, rook), king)?;
        Ok(king)
    }

    /// Validates a [`Move`] without playing it.
    ///
    /// Returns the [`Piece`] that would be moved.
    #[instrument(level = "trace", skip(self), err)]
    pub fn validate(&self, m: &Move) -> Result<Piece, IllegalMove> {
        use IllegalMove::*;

        let (whence, whither) = (m.whence(), m.whither());

        let en_passant = match m.special() {
            Some(Special::Castling(rook)) => return self.validate_castling(whence, whither, rook),
            Some(Special::EnPassant(enemy)) => {
                if !self.board.can_en_passant(whence, enemy) {
                    return Err(InvalidSpecialMove);
                }

                let pawn = self.board[whence].ok_or(NoPieceAtOrigin(whence))?;
                if enemy.offset(0, pawn.color().forward()) != Some(whither) {
                    return Err(InvalidSpecialMove);
                }

                true
            }

            None => false,
        };

        let piece = reach(&self.board, whence, whither, en_passant)?;

        if self.board[whither].is_some_and(|p| p.role() == Role::King) {
            return Err(IllegalDestination(whither));
        }

        self.simulate(m, piece)?;
        Ok(piece)
    }

    /// Whether the king of a [`Color`] is in check.
    ///
    /// The pieces threatening it are kept, see [`Game::threats`].
    #[instrument(level = "trace", skip(self), ret)]
    pub fn is_check(&mut self, c: Color) -> bool {
        self.threats[c as usize] = self.checkers(c);
        !self.threats[c as usize].is_empty()
    }

    /// Whether the king of a [`Color`] is checkmated.
    #[instrument(level = "trace", skip(self), ret)]
    pub fn is_checkmate(&mut self, c: Color) -> bool {
        if !self.is_check(c) {
            return false;
        }

        let king = self.king(c);
        let Some(k) = self.board[king] else {
            return false;
        };

        let escapes = k.destinations().into_iter();
        if escapes.map(|d| Move::new(king, d)).any(|m| self.validate(&m).is_ok()) {
            return false;
        }

        let attacker = match self.threats(c) {
            [attacker] => *attacker,
            _ => return true,
        };

        let defenders: Vec<_> = self.board.by_color(c).map(|p| p.square()).collect();
        let defended = |m: Move| self.validate(&m).is_ok();

        let whither = attacker.square();
        if defenders.iter().any(|&d| defended(Move::new(d, whither))) {
            return false;
        }

        if attacker.role() == Role::Pawn {
            if let Some(passed) = whither.offset(0, -attacker.color().forward()) {
                let en_passant = |&d: &Square| defended(Move::en_passant(d, passed, whither));
                if defenders.iter().any(en_passant) {
                    return false;
                }
            }
        }

        if attacker.role().is_slider() {
            for sq in between(whither, king) {
                if defenders.iter().any(|&d| defended(Move::new(d, sq))) {
                    return false;
                }
            }
        }

        true
    }

    /// Validates and plays a [`Move`].
    ///
    /// A pawn that reaches its last rank without a [`Promotion`] specifier becomes a queen.
    /// If the move checkmates the opponent, the color of the piece moved is declared the winner.
    #[instrument(level = "debug", skip(self), ret, err)]
    pub fn play(&mut self, m: Move) -> Result<MoveContext, IllegalMove> {
        let piece = self.validate(&m)?;

        let mc = match m.special() {
            Some(Special::Castling(rook)) => self.board.castle(m.whence(), rook)?,
            Some(Special::EnPassant(enemy)) => {
                self.board.en_passant(m.whence(), m.whither(), enemy)?
            }

            None => {
                let promotion = m.promotion().unwrap_or(Promotion::Queen);
                self.board.play(m.whence(), m.whither(), Some(promotion))?
            }
        };

        let c = piece.color();
        if piece.role() == Role::King {
            self.kings[c as usize] = mc.piece().square();
        }

        if self.is_checkmate(!c) {
            debug!(winner = %c, "checkmate");
            self.winner = Some(c);
        }

        Ok(mc)
    }
}
