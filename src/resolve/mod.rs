//! Move resolution.
//!
//! Applies a chosen move (capture first, then the mover), and sequences
//! turns: extra rolls, turn passing, and win detection.

pub mod capture;
pub mod phase;

pub use capture::{apply_move, capture_target, Capture, Resolution};
pub use phase::{
    end_turn, grant_extra_roll, has_won, is_game_over, next_player_index, BONUS_ROLL,
    SIXES_FORFEIT,
};
