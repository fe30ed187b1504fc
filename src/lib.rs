//! # PGN replay
//! Parses the movetext of chess games written in Portable Game Notation and
//! replays them on a board, finding out which square each move starts from.
//!
//! It is usable as both a library and a standalone binary printing the board
//! after each move.

pub mod game;
pub mod parsing;
pub mod pgn;
pub mod replay;
pub mod square;

#[cfg(test)]
mod tests;
