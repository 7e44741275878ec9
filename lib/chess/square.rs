use crate::chess::{Color, File, ParseFileError, ParseRankError, Rank};
use crate::util::Integer;
use derive_more::{Display, Error, From};
use std::{fmt, iter::successors, str::FromStr};

/// A square on the chess board.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[repr(i8)]
#[rustfmt::skip]
pub enum Square {
    A1, B1, C1, D1, E1, F1, G1, H1,
    A2, B2, C2, D2, E2, F2, G2, H2,
    A3, B3, C3, D3, E3, F3, G3, H3,
    A4, B4, C4, D4, E4, F4, G4, H4,
    A5, B5, C5, D5, E5, F5, G5, H5,
    A6, B6, C6, D6, E6, F6, G6, H6,
    A7, B7, C7, D7, E7, F7, G7, H7,
    A8, B8, C8, D8, E8, F8, G8, H8,
}

impl Square {
    /// Constructs [`Square`] from a pair of [`File`] and [`Rank`].
    #[inline(always)]
    pub fn new(f: File, r: Rank) -> Self {
        <Self as Integer>::new(f.get() | r.get() << 3)
    }

    /// This square's [`File`].
    #[inline(always)]
    pub fn file(&self) -> File {
        File::new(self.get() & 0b111)
    }

    /// This square's [`Rank`].
    #[inline(always)]
    pub fn rank(&self) -> Rank {
        Rank::new(self.get() >> 3)
    }

    /// This square's [`Color`], `a1` being dark.
    #[inline(always)]
    pub fn color(&self) -> Color {
        if (self.file().get() + self.rank().get()) % 2 == 0 {
            Color::Black
        } else {
            Color::White
        }
    }

    /// The square `df` files and `dr` ranks away, if it is on the board.
    #[inline(always)]
    pub fn offset(&self, df: i8, dr: i8) -> Option<Self> {
        let f = File::try_new(self.file().get().checked_add(df)?)?;
        let r = Rank::try_new(self.rank().get().checked_add(dr)?)?;
        Some(Square::new(f, r))
    }

    /// The adjacent square towards the eighth rank.
    #[inline(always)]
    pub fn up(&self) -> Option<Self> {
        self.offset(0, 1)
    }

    /// The adjacent square towards the first rank.
    #[inline(always)]
    pub fn down(&self) -> Option<Self> {
        self.offset(0, -1)
    }

    /// The adjacent square towards the a-file.
    #[inline(always)]
    pub fn left(&self) -> Option<Self> {
        self.offset(-1, 0)
    }

    /// The adjacent square towards the h-file.
    #[inline(always)]
    pub fn right(&self) -> Option<Self> {
        self.offset(1, 0)
    }

    #[inline(always)]
    pub fn up_left(&self) -> Option<Self> {
        self.offset(-1, 1)
    }

    #[inline(always)]
    pub fn up_right(&self) -> Option<Self> {
        self.offset(1, 1)
    }

    #[inline(always)]
    pub fn down_left(&self) -> Option<Self> {
        self.offset(-1, -1)
    }

    #[inline(always)]
    pub fn down_right(&self) -> Option<Self> {
        self.offset(1, -1)
    }

    /// A lazy iterator over the squares in the direction `(df, dr)`, up to the edge of the board.
    ///
    /// This square is not included and the iterator is empty if the direction is null.
    #[inline(always)]
    pub fn ray(self, df: i8, dr: i8) -> impl Iterator<Item = Square> {
        let first = if (df, dr) == (0, 0) {
            None
        } else {
            self.offset(df, dr)
        };

        successors(first, move |sq| sq.offset(df, dr))
    }
}

unsafe impl Integer for Square {
    type Repr = i8;
    const MIN: Self::Repr = Square::A1 as _;
    const MAX: Self::Repr = Square::H8 as _;
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.file(), f)?;
        fmt::Display::fmt(&self.rank(), f)?;
        Ok(())
    }
}

/// The reason why parsing [`Square`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error, From)]
pub enum ParseSquareError {
    #[display("failed to parse square")]
    InvalidFile(ParseFileError),
    #[display("failed to parse square")]
    InvalidRank(ParseRankError),
}

impl FromStr for Square {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let i = s.char_indices().nth(1).map_or_else(|| s.len(), |(i, _)| i);
        Ok(Square::new(s[..i].parse()?, s[i..].parse()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::size_of;
    use test_strategy::proptest;

    #[test]
    fn square_guarantees_zero_value_optimization() {
        assert_eq!(size_of::<Option<Square>>(), size_of::<Square>());
    }

    #[proptest]
    fn new_constructs_square_from_pair_of_file_and_rank(sq: Square) {
        assert_eq!(Square::new(sq.file(), sq.rank()), sq);
    }

    #[test]
    fn a1_is_dark_and_h1_is_light() {
        assert_eq!(Square::A1.color(), Color::Black);
        assert_eq!(Square::H1.color(), Color::White);
        assert_eq!(Square::H8.color(), Color::Black);
    }

    #[proptest]
    fn adjacent_squares_have_alternating_colors(sq: Square) {
        for n in [sq.up(), sq.down(), sq.left(), sq.right()].into_iter().flatten() {
            assert_ne!(n.color(), sq.color());
        }
    }

    #[proptest]
    fn diagonal_squares_have_the_same_color(sq: Square) {
        for n in [sq.up_left(), sq.up_right(), sq.down_left(), sq.down_right()]
            .into_iter()
            .flatten()
        {
            assert_eq!(n.color(), sq.color());
        }
    }

    #[proptest]
    fn offset_is_none_past_the_edge(
        sq: Square,
        #[strategy(-8i8..=8)] df: i8,
        #[strategy(-8i8..=8)] dr: i8,
    ) {
        let f = sq.file().get() + df;
        let r = sq.rank().get() + dr;
        let on_board = (0..8).contains(&f) && (0..8).contains(&r);
        assert_eq!(sq.offset(df, dr).is_some(), on_board);
    }

    #[proptest]
    fn offset_moves_by_the_given_distance(
        sq: Square,
        #[strategy(-7i8..=7)] df: i8,
        #[strategy(-7i8..=7)] dr: i8,
    ) {
        if let Some(n) = sq.offset(df, dr) {
            assert_eq!(n.file() - sq.file(), df);
            assert_eq!(n.rank() - sq.rank(), dr);
        }
    }

    #[proptest]
    fn neighbors_are_offsets_by_one(sq: Square) {
        assert_eq!(sq.up(), sq.offset(0, 1));
        assert_eq!(sq.down(), sq.offset(0, -1));
        assert_eq!(sq.left(), sq.offset(-1, 0));
        assert_eq!(sq.right(), sq.offset(1, 0));
        assert_eq!(sq.up_left(), sq.offset(-1, 1));
        assert_eq!(sq.up_right(), sq.offset(1, 1));
        assert_eq!(sq.down_left(), sq.offset(-1, -1));
        assert_eq!(sq.down_right(), sq.offset(1, -1));
    }

    #[test]
    fn neighbors_of_corners_past_the_edge_are_none() {
        assert_eq!(Square::A1.down(), None);
        assert_eq!(Square::A1.left(), None);
        assert_eq!(Square::A1.down_right(), None);
        assert_eq!(Square::H8.up(), None);
        assert_eq!(Square::H8.right(), None);
        assert_eq!(Square::H8.up_left(), None);
        assert_eq!(Square::A1.up_right(), Some(Square::B2));
    }

    #[proptest]
    fn ray_walks_until_the_edge(
        sq: Square,
        #[strategy(-1i8..=1)] df: i8,
        #[strategy(-1i8..=1)] dr: i8,
    ) {
        let ray: Vec<_> = sq.ray(df, dr).collect();

        for (i, n) in ray.iter().enumerate() {
            assert_eq!(sq.offset(df * (i as i8 + 1), dr * (i as i8 + 1)), Some(*n));
        }

        match ray.last() {
            Some(last) => assert_eq!(last.offset(df, dr), None),
            None => assert!((df, dr) == (0, 0) || sq.offset(df, dr).is_none()),
        }
    }

    #[test]
    fn ray_excludes_the_origin() {
        assert_eq!(
            Square::C4.ray(1, 1).collect::<Vec<_>>(),
            vec![Square::D5, Square::E6, Square::F7, Square::G8]
        );
    }

    #[proptest]
    fn parsing_printed_square_is_an_identity(sq: Square) {
        assert_eq!(sq.to_string().parse(), Ok(sq));
    }

    #[proptest]
    fn parsing_square_fails_if_file_invalid(
        #[filter(!('a'..='h').contains(&#c))] c: char,
        r: Rank,
    ) {
        assert_eq!(
            [c.to_string(), r.to_string()].concat().parse::<Square>(),
            Err(ParseSquareError::InvalidFile(ParseFileError))
        );
    }

    #[proptest]
    fn parsing_square_fails_if_rank_invalid(
        f: File,
        #[filter(!('1'..='8').contains(&#c))] c: char,
    ) {
        assert_eq!(
            [f.to_string(), c.to_string()].concat().parse::<Square>(),
            Err(ParseSquareError::InvalidRank(ParseRankError))
        );
    }

    #[proptest]
    fn parsing_square_fails_if_length_not_two(#[filter(#s.len() != 2)] s: String) {
        assert_eq!(s.parse::<Square>().ok(), None);
    }
}
