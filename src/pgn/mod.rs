//! # Portable Game Notation movetext
//! Parses the movetext section of a PGN game into an ordered list of
//! [`PlayerMove`]s, two per numbered move.
//!
//! Tag pairs, comments and variations are removed beforehand by the helpers of
//! the [`load`] module.

use thiserror::Error;

use crate::{
    game::{colour::Colour, piece::PieceKind},
    parsing::{PartialFromStr, walk_whitespace},
    square::{Square, SquareHint},
};

pub mod load;
mod parse;
use parse::*;

/// Check or mate marker following a move.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, PartialOrd, Ord)]
pub enum CheckMarker {
    Check,
    Mate,
}
impl std::fmt::Display for CheckMarker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Check => write!(f, "+"),
            Self::Mate => write!(f, "#"),
        }
    }
}

/// Standard Algebraic Notation (SAN) encoded move, as it appears in movetext.
///
/// SAN does not say which side plays the move, see [`SanMove::played_by`].
#[derive(Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub enum SanMove {
    Standard {
        piece: PieceKind,
        origin: SquareHint,
        is_capture: bool,
        target: Square,
        promoting_to: Option<PieceKind>,
        check: Option<CheckMarker>,
    },
    KingSideCastle,
    QueenSideCastle,
}
impl SanMove {
    /// Tags this move with the colour of the player making it.
    pub fn played_by(self, colour: Colour) -> PlayerMove {
        match self {
            Self::Standard {
                piece,
                origin,
                is_capture,
                target,
                promoting_to,
                check,
            } => PlayerMove::Standard(StandardMove {
                colour,
                piece,
                origin,
                target,
                is_capture,
                promoting_to,
                is_check: check == Some(CheckMarker::Check),
                is_mate: check == Some(CheckMarker::Mate),
            }),
            Self::KingSideCastle => PlayerMove::KingsideCastle(colour),
            Self::QueenSideCastle => PlayerMove::QueensideCastle(colour),
        }
    }
}
impl std::fmt::Display for SanMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            Self::Standard {
                piece,
                origin,
                is_capture,
                target,
                promoting_to,
                check,
            } => {
                if piece != PieceKind::Pawn {
                    write!(f, "{piece}")?
                }
                write!(f, "{origin}")?;
                if is_capture {
                    write!(f, "x")?
                }
                write!(f, "{target}")?;
                if let Some(kind) = promoting_to {
                    write!(f, "={kind}")?
                }
                if let Some(marker) = check {
                    write!(f, "{marker}")?
                }
                Ok(())
            }
            Self::KingSideCastle => write!(f, "O-O"),
            Self::QueenSideCastle => write!(f, "O-O-O"),
        }
    }
}

/// Errors that may arise when parsing SAN moves.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Error)]
pub enum SanParseError {
    #[error("Missing target square")]
    MissingTargetSquare,
    #[error("Capture marker must be followed by a target square")]
    CaptureWithoutTarget,
    #[error("{0} characters left unconsumed after successful SAN parse")]
    UnconsumedChars(usize),
}

impl PartialFromStr for SanMove {
    type Err = SanParseError;

    /// Parses a single SAN move. The trailing input is left untouched, so an
    /// invalid promotion such as `=P` is simply not consumed.
    fn partial_from_str(s: &str) -> Result<(Self, &str), Self::Err> {
        // O-O is a prefix of O-O-O, the longer literal goes first.
        if let Some(rest) = parse_castling(s, "O-O-O") {
            return Ok((Self::QueenSideCastle, rest));
        }
        if let Some(rest) = parse_castling(s, "O-O") {
            return Ok((Self::KingSideCastle, rest));
        }
        parse_standard_move(s)
    }
}
impl std::str::FromStr for SanMove {
    type Err = SanParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Self::partial_from_str(s)? {
            (san, "") => Ok(san),
            (_, rest) => Err(SanParseError::UnconsumedChars(rest.len())),
        }
    }
}

/// A move of a single piece (castling aside), as read from movetext.
///
/// `origin` is only as complete as the notation made it. Once a move has been
/// played on a board, it holds the actual origin square.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub struct StandardMove {
    pub colour: Colour,
    pub piece: PieceKind,
    pub origin: SquareHint,
    pub target: Square,
    pub is_capture: bool,
    pub promoting_to: Option<PieceKind>,
    pub is_check: bool,
    pub is_mate: bool,
}
impl std::fmt::Display for StandardMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.colour.to_char(), self.piece)?;
        if !self.origin.is_empty() {
            write!(f, " at ")?;
            match self.origin.file {
                Some(file) => write!(f, "{file}")?,
                None => write!(f, "?")?,
            }
            match self.origin.rank {
                Some(rank) => write!(f, "{rank}")?,
                None => write!(f, "?")?,
            }
        }
        write!(f, " to {}", self.target)?;
        if self.is_capture {
            write!(f, " (capture)")?
        }
        if let Some(kind) = self.promoting_to {
            write!(f, " (promotion to {kind})")?
        }
        if self.is_check {
            write!(f, " (check)")?
        } else if self.is_mate {
            write!(f, " (mate)")?
        }
        Ok(())
    }
}

/// One player's move.
#[derive(Clone, Copy, Debug, Default, Hash, Eq, PartialEq)]
pub enum PlayerMove {
    /// No move was played, the game ended before this player's turn.
    #[default]
    NoMove,
    Standard(StandardMove),
    KingsideCastle(Colour),
    QueensideCastle(Colour),
}
impl PlayerMove {
    /// The player making this move, if any.
    pub fn colour(&self) -> Option<Colour> {
        match self {
            Self::NoMove => None,
            Self::Standard(mv) => Some(mv.colour),
            Self::KingsideCastle(colour) | Self::QueensideCastle(colour) => Some(*colour),
        }
    }
}
impl std::fmt::Display for PlayerMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoMove => write!(f, "(not taken)"),
            Self::Standard(mv) => write!(f, "{mv}"),
            Self::KingsideCastle(colour) => write!(f, "{colour} (kingside castling)"),
            Self::QueensideCastle(colour) => write!(f, "{colour} (queenside castling)"),
        }
    }
}

/// Outcome of a game, as written at the end of its movetext.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, PartialOrd, Ord)]
pub enum GameResult {
    WhiteWins,
    BlackWins,
    Draw,
    /// Game still in progress, abandoned or result otherwise unknown.
    Undecided,
}
impl std::fmt::Display for GameResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::WhiteWins => "1-0",
                Self::BlackWins => "0-1",
                Self::Draw => "1/2-1/2",
                Self::Undecided => "*",
            }
        )
    }
}

/// A numbered move: white's move followed by black's.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub struct MovePair {
    pub number: u32,
    pub white: PlayerMove,
    pub black: PlayerMove,
}

/// Every move of a game in order, along with its result if the movetext
/// states one.
#[derive(Clone, Debug, Default, Hash, Eq, PartialEq)]
pub struct MoveText {
    pub pairs: Vec<MovePair>,
    pub result: Option<GameResult>,
}
impl MoveText {
    /// Player moves in the order they were played, white then black for each
    /// move pair.
    pub fn player_moves(&self) -> impl Iterator<Item = &PlayerMove> {
        self.pairs.iter().flat_map(|pair| [&pair.white, &pair.black])
    }

    /// Mutable access to the player moves, in the order they were played.
    pub fn player_moves_mut(&mut self) -> impl Iterator<Item = &mut PlayerMove> {
        self.pairs
            .iter_mut()
            .flat_map(|pair| [&mut pair.white, &mut pair.black])
    }

    /// Parses movetext that may still contain comments and variations.
    ///
    /// # Errors
    /// Fails if brackets are unbalanced or if the movetext itself is invalid.
    pub fn from_annotated(s: &str) -> Result<Self, MoveTextParseError> {
        load::strip_annotations(s)?.parse()
    }
}

#[derive(Clone, Debug, Hash, Eq, PartialEq, Error)]
pub enum MoveTextParseError {
    #[error("Failed to parse movetext after {parsed} move pairs: {remainder}")]
    Unparsed { parsed: usize, remainder: String },
    #[error(transparent)]
    Annotation(#[from] load::AnnotationError),
}

impl PartialFromStr for MoveText {
    type Err = std::convert::Infallible;

    /// Parses as many move pairs as possible. Never fails, the caller decides
    /// what to do with leftover input.
    fn partial_from_str(mut s: &str) -> Result<(Self, &str), Self::Err> {
        let mut movetext = MoveText::default();
        while let Ok((pair, result, rest)) = parse_move_pair(s) {
            log::debug!("Move {}: {}, {}", pair.number, pair.white, pair.black);
            movetext.pairs.push(pair);
            s = rest;
            if result.is_some() {
                movetext.result = result;
                return Ok((movetext, s));
            }
        }
        if let Ok((result, rest)) = parse_game_result(walk_whitespace(s)) {
            movetext.result = Some(result);
            s = rest;
        }
        Ok((movetext, s))
    }
}
impl std::str::FromStr for MoveText {
    type Err = MoveTextParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (movetext, rest) = match Self::partial_from_str(s) {
            Ok(parsed) => parsed,
            Err(never) => match never {},
        };
        let rest = walk_whitespace(rest);
        if rest.is_empty() {
            Ok(movetext)
        } else {
            Err(MoveTextParseError::Unparsed {
                parsed: movetext.pairs.len(),
                remainder: rest.to_string(),
            })
        }
    }
}
