//! Text protocol handling.
//!
//! This module implements the line-based command protocol spoken by the
//! `ludo` binary: notation for positions, moves, and seats, plus the
//! command parser for the main loop.

pub mod notation;
pub mod parser;

pub use notation::{
    format_move, format_moves, parse_move, parse_player_spec, parse_token_id, NotationError,
};
pub use parser::{parse_command, Command};
