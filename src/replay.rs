//! # Replaying games
//! Plays parsed movetext on a [`Board`], one player move at a time.

use thiserror::Error;

use crate::{
    game::{
        board::{ApplyError, Board, BoardRules, CastlingSide, ResolveError},
        colour::Colour,
        piece::Piece,
    },
    pgn::{MoveText, PlayerMove},
    square::Square,
};

/// Settings for a replay.
#[derive(Clone, Copy, Debug, Default, Hash, Eq, PartialEq)]
pub struct ReplayConfig {
    pub rules: BoardRules,
    /// Print the board after each move.
    pub show_board: bool,
}
impl ReplayConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rules(mut self, rules: BoardRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_board_shown(mut self, show_board: bool) -> Self {
        self.show_board = show_board;
        self
    }
}

/// Reasons a single move cannot be played.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Error)]
pub enum MoveError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error(transparent)]
    Apply(#[from] ApplyError),
}

#[derive(Clone, Debug, Hash, Eq, PartialEq, Error)]
#[error("Failed to play move {number} for {colour} ({mv})")]
pub struct ReplayError {
    pub number: u32,
    pub colour: Colour,
    pub mv: PlayerMove,
    #[source]
    pub source: MoveError,
}

/// What a move did to the board.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum Played {
    Moved {
        origin: Square,
        target: Square,
        captured: Option<Piece>,
    },
    Castled(Colour, CastlingSide),
    Nothing,
}

/// Owns the board of a game being replayed.
#[derive(Clone, Debug)]
pub struct Replayer {
    board: Board,
    config: ReplayConfig,
}
impl Replayer {
    /// Starts a replay from the initial position.
    pub fn new(config: ReplayConfig) -> Self {
        Self::from_board(Board::initial(), config)
    }

    /// Starts a replay from an arbitrary board. The board's rules are replaced by
    /// the configured ones.
    pub fn from_board(board: Board, config: ReplayConfig) -> Self {
        Self {
            board: board.with_rules(config.rules),
            config,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn into_board(self) -> Board {
        self.board
    }

    /// Plays a single move.
    ///
    /// The origin of a standard move is filled in with the square the piece was
    /// found on. On error, neither the move nor the board are modified.
    ///
    /// # Errors
    /// Fails if no piece can make the move, or if the move contradicts the board.
    pub fn play(&mut self, mv: &mut PlayerMove) -> Result<Played, MoveError> {
        match mv {
            PlayerMove::NoMove => Ok(Played::Nothing),
            PlayerMove::KingsideCastle(colour) => {
                self.board.apply_castle(*colour, CastlingSide::Kingside);
                Ok(Played::Castled(*colour, CastlingSide::Kingside))
            }
            PlayerMove::QueensideCastle(colour) => {
                self.board.apply_castle(*colour, CastlingSide::Queenside);
                Ok(Played::Castled(*colour, CastlingSide::Queenside))
            }
            PlayerMove::Standard(standard) => {
                let origin = self.board.resolve_source(
                    standard.colour,
                    standard.piece,
                    standard.origin,
                    standard.target,
                    standard.is_capture,
                )?;
                let captured = self
                    .board
                    .apply(origin, standard.target, standard.is_capture)?;
                if let Some(kind) = standard.promoting_to {
                    self.board.promote(standard.target, kind)?;
                }
                standard.origin = origin.into();
                Ok(Played::Moved {
                    origin,
                    target: standard.target,
                    captured,
                })
            }
        }
    }

    /// Plays every move of a game in order, stopping at the first failure.
    ///
    /// # Errors
    /// Fails with the number and colour of the first move that cannot be played.
    pub fn replay(&mut self, movetext: &mut MoveText) -> Result<(), ReplayError> {
        if self.config.show_board {
            println!("Begin!:\n{}", self.board);
        }
        for pair in &mut movetext.pairs {
            let number = pair.number;
            let moves = [
                (Colour::White, &mut pair.white),
                (Colour::Black, &mut pair.black),
            ];
            for (colour, mv) in moves {
                let played = self.play(mv).map_err(|source| ReplayError {
                    number,
                    colour,
                    mv: *mv,
                    source,
                })?;
                if played == Played::Nothing {
                    continue;
                }
                log::debug!("Move {number}: {mv}");
                if self.config.show_board {
                    println!("\nMove {number}: {mv}\n{}", self.board);
                }
            }
        }
        if let Some(result) = movetext.result {
            log::info!("Game ended with {result}");
        }
        Ok(())
    }
}
