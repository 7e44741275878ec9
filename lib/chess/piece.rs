use crate::chess::{Color, Role, Square};
use arrayvec::ArrayVec;
use derive_more::Display;

/// The squares a [`Piece`] may move to, a queen in the center of the board reaching the most.
pub type Destinations = ArrayVec<Square, 27>;

const KNIGHT: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

const KING: [(i8, i8); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

const DIAGONALS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, -1), (-1, 1)];
const LINES: [(i8, i8); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

/// A chess piece standing on a [`Square`].
///
/// Besides its [`Role`] and [`Color`], a piece remembers how many times it has moved,
/// which castling and en passant depend on.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[display("{color} {role:?} on {square}")]
pub struct Piece {
    role: Role,
    color: Color,
    square: Square,
    #[cfg_attr(test, strategy(0u32..3))]
    moves: u32,
}

impl Piece {
    /// Constructs a [`Piece`] that has never moved.
    #[inline(always)]
    pub fn new(role: Role, color: Color, square: Square) -> Self {
        Piece {
            role,
            color,
            square,
            moves: 0,
        }
    }

    /// This piece's [`Role`].
    #[inline(always)]
    pub fn role(&self) -> Role {
        self.role
    }

    /// This piece's [`Color`].
    #[inline(always)]
    pub fn color(&self) -> Color {
        self.color
    }

    /// The [`Square`] this piece stands on.
    #[inline(always)]
    pub fn square(&self) -> Square {
        self.square
    }

    /// How many times this piece has moved.
    #[inline(always)]
    pub fn moves(&self) -> u32 {
        self.moves
    }

    /// Whether this piece has ever moved.
    #[inline(always)]
    pub fn has_moved(&self) -> bool {
        self.moves > 0
    }

    #[inline(always)]
    pub(crate) fn relocate(&mut self, whither: Square) {
        self.square = whither;
        self.moves += 1;
    }

    /// The pseudo-legal destinations of this piece.
    ///
    /// These follow the shape of the piece's movement only, other pieces on the board
    /// are not taken into account, so sliders reach all the way to the edge of the board
    /// and pawns reach both diagonals regardless of whether there is anything to capture.
    pub fn destinations(&self) -> Destinations {
        let sq = self.square;

        match self.role {
            Role::Pawn => {
                let forward = self.color.forward();
                let mut destinations = Destinations::new();

                if let Some(step) = sq.offset(0, forward) {
                    destinations.push(step);
                    if !self.has_moved() {
                        destinations.extend(step.offset(0, forward));
                    }
                }

                destinations.extend([-1, 1].into_iter().filter_map(|df| sq.offset(df, forward)));
                destinations
            }

            Role::Knight => offsets(sq, &KNIGHT),
            Role::Bishop => rays(sq, &DIAGONALS),
            Role::Rook => rays(sq, &LINES),
            Role::Queen => rays(sq, &[DIAGONALS, LINES].concat()),
            Role::King => offsets(sq, &KING),
        }
    }
}

fn offsets(sq: Square, offsets: &[(i8, i8)]) -> Destinations {
    offsets
        .iter()
        .filter_map(|&(df, dr)| sq.offset(df, dr))
        .collect()
}

fn rays(sq: Square, directions: &[(i8, i8)]) -> Destinations {
    directions
        .iter()
        .flat_map(|&(df, dr)| sq.ray(df, dr))
        .collect()
}
