//! Piece types encoding.

use thiserror::Error;

use crate::parsing::PartialFromStr;

use super::colour::Colour;

/// Complete set of information for identifying a piece.
///
/// Empty squares hold no piece at all, see [`Board::piece_on`](super::board::Board::piece_on).
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Piece {
    pub kind: PieceKind,
    pub colour: Colour,
}
impl Piece {
    pub const fn new(kind: PieceKind, colour: Colour) -> Self {
        Self { kind, colour }
    }
}
impl std::fmt::Display for Piece {
    /// Two-letter code: colour then kind, e.g. `wN` or `bQ`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.colour.to_char(), self.kind)
    }
}

/// The kind of a piece, one of Pawn, Knight, Bishop, Rook, Queen or King.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, PartialOrd, Ord)]
pub enum PieceKind {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
}
impl PieceKind {
    /// Pieces that a pawn can promote to.
    pub const PROMOTION_TARGETS: [Self; 4] = [
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
    ];

    /// Checks if this piece kind can be promoted to.
    ///
    /// Returns true for all pieces but pawns and kings.
    pub fn is_valid_promotion_target(&self) -> bool {
        !matches!(self, PieceKind::Pawn | PieceKind::King)
    }

    /// Uppercase letter of this piece kind, `P` for pawns.
    pub const fn to_char(self) -> char {
        match self {
            Self::Pawn => 'P',
            Self::Knight => 'N',
            Self::Bishop => 'B',
            Self::Rook => 'R',
            Self::Queen => 'Q',
            Self::King => 'K',
        }
    }
}
impl std::fmt::Display for PieceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Error)]
#[error("Invalid SAN piece letter")]
pub struct PieceParseError;

impl PartialFromStr for PieceKind {
    type Err = PieceParseError;

    /// Parses a SAN piece letter. Pawns have no letter in SAN, so `P` is rejected.
    fn partial_from_str(s: &str) -> Result<(Self, &str), Self::Err> {
        let kind = match s.chars().next() {
            Some('N') => PieceKind::Knight,
            Some('B') => PieceKind::Bishop,
            Some('R') => PieceKind::Rook,
            Some('Q') => PieceKind::Queen,
            Some('K') => PieceKind::King,
            _ => Err(PieceParseError)?,
        };
        Ok((kind, &s[1..]))
    }
}
