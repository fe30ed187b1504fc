//! Grammar rules for SAN moves and movetext.
//!
//! Each rule takes the input and returns what it parsed along with the rest of
//! the input. A failing rule consumes nothing.

use super::*;
use crate::{
    parsing::{match_char, match_literal, optional, parse_int},
    square::{File, Rank},
};

/// Matches a castling literal, along with an optional check marker.
pub fn parse_castling<'a>(src: &'a str, literal: &str) -> Option<&'a str> {
    let rest = match_literal(src, literal)?;
    // Castling into check is recorded but carries no information for replay.
    Some(parse_check_marker(rest).map_or(rest, |(_, rest)| rest))
}

/// Parses `=` followed by a piece a pawn may promote to.
pub fn parse_promotion(src: &str) -> Result<(PieceKind, &str), ()> {
    let rest = match_char(src, '=').ok_or(())?;
    let (kind, rest) = PieceKind::partial_from_str(rest).map_err(|_| ())?;
    if kind.is_valid_promotion_target() {
        Ok((kind, rest))
    } else {
        Err(())
    }
}

pub fn parse_check_marker(src: &str) -> Result<(CheckMarker, &str), ()> {
    if let Some(rest) = match_char(src, '+') {
        Ok((CheckMarker::Check, rest))
    } else if let Some(rest) = match_char(src, '#') {
        Ok((CheckMarker::Mate, rest))
    } else {
        Err(())
    }
}

/// Parses a piece move or pawn move.
///
/// The optional origin is read greedily, so in `Nf3` the square `f3` first
/// lands in the origin. When no capture marker and no second square follow,
/// those characters are the target instead.
pub fn parse_standard_move(src: &str) -> Result<(SanMove, &str), SanParseError> {
    let (piece, s) = optional::<PieceKind>(src);
    let piece = piece.unwrap_or(PieceKind::Pawn);
    let (file, s) = optional::<File>(s);
    let (rank, s) = optional::<Rank>(s);
    let mut origin = SquareHint { file, rank };
    let (is_capture, s) = match match_char(s, 'x') {
        Some(rest) => (true, rest),
        None => (false, s),
    };
    let (target, s) = match Square::partial_from_str(s) {
        Ok(parsed) => parsed,
        Err(()) if is_capture => return Err(SanParseError::CaptureWithoutTarget),
        Err(()) => {
            let target = origin.square().ok_or(SanParseError::MissingTargetSquare)?;
            origin = SquareHint::ANY;
            (target, s)
        }
    };
    let (promoting_to, s) = match parse_promotion(s) {
        Ok((kind, rest)) => (Some(kind), rest),
        Err(()) => (None, s),
    };
    let (check, s) = match parse_check_marker(s) {
        Ok((marker, rest)) => (Some(marker), rest),
        Err(()) => (None, s),
    };
    Ok((
        SanMove::Standard {
            piece,
            origin,
            is_capture,
            target,
            promoting_to,
            check,
        },
        s,
    ))
}

pub fn parse_game_result(src: &str) -> Result<(GameResult, &str), ()> {
    if let Some(rest) = match_literal(src, "1-0") {
        Ok((GameResult::WhiteWins, rest))
    } else if let Some(rest) = match_literal(src, "0-1") {
        Ok((GameResult::BlackWins, rest))
    } else if let Some(rest) = match_literal(src, "1/2-1/2") {
        Ok((GameResult::Draw, rest))
    } else if let Some(rest) = match_literal(src, "*") {
        Ok((GameResult::Undecided, rest))
    } else {
        Err(())
    }
}

/// Parses a move number, white's move and black's move.
///
/// If black's move is missing, the pair still parses when followed by a game
/// result (returned alongside) or by the end of the input.
pub fn parse_move_pair(src: &str) -> Result<(MovePair, Option<GameResult>, &str), ()> {
    let s = walk_whitespace(src);
    let (number, s) = parse_int(s)?;
    let s = match_char(s, '.').ok_or(())?;
    let s = walk_whitespace(s);
    let (white, s) = SanMove::partial_from_str(s).map_err(|_| ())?;
    let white = white.played_by(Colour::White);
    let s = walk_whitespace(s);
    match SanMove::partial_from_str(s) {
        Ok((black, rest)) => Ok((
            MovePair {
                number,
                white,
                black: black.played_by(Colour::Black),
            },
            None,
            rest,
        )),
        Err(_) => {
            let pair = MovePair {
                number,
                white,
                black: PlayerMove::NoMove,
            };
            if let Ok((result, rest)) = parse_game_result(s) {
                Ok((pair, Some(result), rest))
            } else if s.is_empty() {
                Ok((pair, None, s))
            } else {
                Err(())
            }
        }
    }
}
