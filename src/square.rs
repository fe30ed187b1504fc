//! Files, ranks and squares of the chessboard, along with partially known squares
//! used when a move only hints at its origin.
use crate::parsing::PartialFromStr;

/// Files of a chessboard (A-H).
#[repr(u8)]
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, PartialOrd, Ord)]
pub enum File {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
}
impl File {
    /// All files, from A to H.
    pub const ALL: [Self; 8] = [
        Self::A,
        Self::B,
        Self::C,
        Self::D,
        Self::E,
        Self::F,
        Self::G,
        Self::H,
    ];

    /// A file from a given index.
    ///
    /// Fails if the index is more than 7.
    #[inline]
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    /// Index of this file, A being 0.
    #[inline]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Lowercase letter of this file.
    pub const fn to_char(self) -> char {
        (b'a' + self as u8) as char
    }
}
impl std::fmt::Display for File {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_char())
    }
}
impl PartialFromStr for File {
    type Err = ();

    fn partial_from_str(s: &str) -> Result<(Self, &str), Self::Err> {
        match s.chars().next() {
            Some(c @ 'a'..='h') => Ok((Self::ALL[(c as u8 - b'a') as usize], &s[1..])),
            _ => Err(()),
        }
    }
}
impl std::str::FromStr for File {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Self::partial_from_str(s)? {
            (file, "") => Ok(file),
            _ => Err(()),
        }
    }
}

/// Ranks of a chessboard (1-8).
#[repr(u8)]
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, PartialOrd, Ord)]
pub enum Rank {
    One,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
}
impl Rank {
    /// All ranks, from white's back rank to black's.
    pub const ALL: [Self; 8] = [
        Self::One,
        Self::Two,
        Self::Three,
        Self::Four,
        Self::Five,
        Self::Six,
        Self::Seven,
        Self::Eight,
    ];

    /// A rank from a given index.
    ///
    /// Fails if the index is more than 7.
    #[inline]
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    /// Index of this rank, the first rank being 0.
    #[inline]
    pub const fn index(self) -> u8 {
        self as u8
    }
}
impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", 1 + *self as u8)
    }
}
impl PartialFromStr for Rank {
    type Err = ();

    fn partial_from_str(s: &str) -> Result<(Self, &str), Self::Err> {
        match s.chars().next() {
            Some(c @ '1'..='8') => Ok((Self::ALL[(c as u8 - b'1') as usize], &s[1..])),
            _ => Err(()),
        }
    }
}
impl std::str::FromStr for Rank {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Self::partial_from_str(s)? {
            (rank, "") => Ok(rank),
            _ => Err(()),
        }
    }
}

/// A square of the board.
///
/// Squares are ordered rank first, then file, which is also the order in which
/// the board is scanned.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, PartialOrd, Ord)]
pub struct Square {
    pub rank: Rank,
    pub file: File,
}
impl Square {
    /// Instantiates a new square based on file and rank.
    #[inline]
    pub const fn new(file: File, rank: Rank) -> Self {
        Self { rank, file }
    }

    /// Instantiates a square from zero-based file and rank indices.
    ///
    /// Returns `None` if either index is out of the board.
    #[inline]
    pub fn from_indices(file: i8, rank: i8) -> Option<Self> {
        let file = File::from_index(u8::try_from(file).ok()?)?;
        let rank = Rank::from_index(u8::try_from(rank).ok()?)?;
        Some(Self::new(file, rank))
    }

    /// Translates this square by a file and rank delta.
    ///
    /// Returns `None` if the translation would go out of the board.
    #[inline]
    pub fn translate(self, file_delta: i8, rank_delta: i8) -> Option<Self> {
        Self::from_indices(
            self.file.index() as i8 + file_delta,
            self.rank.index() as i8 + rank_delta,
        )
    }

    /// Signed (file, rank) distance from this square to another.
    #[inline]
    pub fn delta_to(self, other: Self) -> (i8, i8) {
        (
            other.file.index() as i8 - self.file.index() as i8,
            other.rank.index() as i8 - self.rank.index() as i8,
        )
    }

    /// An iterator over all squares, rank by rank starting at A1, file by file
    /// within a rank.
    pub fn iter() -> impl Iterator<Item = Self> {
        Rank::ALL
            .into_iter()
            .flat_map(|rank| File::ALL.into_iter().map(move |file| Self::new(file, rank)))
    }
}
impl std::fmt::Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.file, self.rank)
    }
}
impl PartialFromStr for Square {
    type Err = ();

    fn partial_from_str(s: &str) -> Result<(Self, &str), Self::Err> {
        let (file, s) = File::partial_from_str(s)?;
        let (rank, s) = Rank::partial_from_str(s)?;
        Ok((Self::new(file, rank), s))
    }
}
impl std::str::FromStr for Square {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Self::partial_from_str(s)? {
            (square, "") => Ok(square),
            _ => Err(()),
        }
    }
}

/// A square that may only be partially known, as written in SAN disambiguation.
///
/// Missing components act as wildcards when matched against actual squares.
#[derive(Clone, Copy, Debug, Default, Hash, Eq, PartialEq, PartialOrd, Ord)]
pub struct SquareHint {
    pub file: Option<File>,
    pub rank: Option<Rank>,
}
impl SquareHint {
    /// A hint that matches every square.
    pub const ANY: Self = Self {
        file: None,
        rank: None,
    };

    /// Checks if the given square agrees with every known component of this hint.
    #[inline]
    pub fn matches(&self, square: Square) -> bool {
        self.file.is_none_or(|file| file == square.file)
            && self.rank.is_none_or(|rank| rank == square.rank)
    }

    /// Checks if neither file nor rank are known.
    pub fn is_empty(&self) -> bool {
        self.file.is_none() && self.rank.is_none()
    }

    /// Returns the designated square if both file and rank are known.
    pub fn square(&self) -> Option<Square> {
        Some(Square::new(self.file?, self.rank?))
    }
}
impl From<Square> for SquareHint {
    fn from(value: Square) -> Self {
        Self {
            file: Some(value.file),
            rank: Some(value.rank),
        }
    }
}
impl std::fmt::Display for SquareHint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(file) = self.file {
            write!(f, "{file}")?
        }
        if let Some(rank) = self.rank {
            write!(f, "{rank}")?
        }
        Ok(())
    }
}
impl PartialFromStr for SquareHint {
    type Err = std::convert::Infallible;

    /// Greedily reads up to one file then up to one rank. Never fails.
    fn partial_from_str(s: &str) -> Result<(Self, &str), Self::Err> {
        let (file, s) = Option::<File>::partial_from_str(s)?;
        let (rank, s) = Option::<Rank>::partial_from_str(s)?;
        Ok((Self { file, rank }, s))
    }
}
