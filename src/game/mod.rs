//! # Chess board
//! Colours, pieces and the board itself, along with the rules used to figure out
//! which piece a move refers to.

pub mod board;
pub mod colour;
pub mod piece;
