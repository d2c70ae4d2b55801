//! Per-token destination rules.
//!
//! Each function answers where a single token may go for a given roll, or
//! `None` when that token has no legal move. Blocks are checked on every
//! track square the token passes over, not just the landing square.

use crate::board::{
    absolute_track_index, relative_steps, start_square, Occupancy, PlayerColor, TokenPosition,
    FINISH_STEP, HOME_ENTRY_STEP, HOME_STRETCH_LEN, TOKENS_PER_PLAYER,
};

/// The die value required to bring a token out of base.
pub const EXIT_ROLL: u8 = 6;

/// Destination for a token leaving base, if the start square is not blocked.
pub fn leave_base(color: PlayerColor, occ: &Occupancy) -> Option<TokenPosition> {
    let start = start_square(color);
    if occ.is_blocked_for(start, color) {
        return None;
    }
    Some(TokenPosition::Track(start))
}

/// Destination for a token on the shared track at absolute index `square`.
pub fn from_track(
    color: PlayerColor,
    square: u8,
    dice: u8,
    occ: &Occupancy,
    finished: usize,
) -> Option<TokenPosition> {
    let from = relative_steps(color, square);
    let target = from + dice;

    if !path_clear(color, from, target, occ) {
        return None;
    }

    if target < HOME_ENTRY_STEP {
        // path_clear already covered the landing square.
        Some(TokenPosition::Track(absolute_track_index(color, target)))
    } else if target < FINISH_STEP {
        Some(TokenPosition::HomeStretch(target - HOME_ENTRY_STEP))
    } else if target == FINISH_STEP {
        finish_slot(finished)
    } else {
        None
    }
}

/// Destination for a token at `index` on its home stretch.
pub fn from_home_stretch(index: u8, dice: u8, finished: usize) -> Option<TokenPosition> {
    let next = index + dice;
    if next < HOME_STRETCH_LEN {
        Some(TokenPosition::HomeStretch(next))
    } else if next == HOME_STRETCH_LEN {
        finish_slot(finished)
    } else {
        None
    }
}

/// The next free finish slot, or `None` once all four tokens are finished.
pub fn finish_slot(finished: usize) -> Option<TokenPosition> {
    if finished < TOKENS_PER_PLAYER as usize {
        Some(TokenPosition::Finished(finished as u8))
    } else {
        None
    }
}

/// True if no track square in `(from, to]` is blocked for `color`.
///
/// Squares at or beyond the home entry are private and never blocked.
pub fn path_clear(color: PlayerColor, from: u8, to: u8, occ: &Occupancy) -> bool {
    let last = to.min(HOME_ENTRY_STEP - 1);
    ((from + 1)..=last).all(|step| !occ.is_blocked_for(absolute_track_index(color, step), color))
}
