//! Board topology.
//!
//! Translates between a color's relative step count and the shared
//! 52-square circular track, and classifies safe squares. Everything here
//! is a pure function over compile-time constants.
//!
//! Relative steps 0..=50 are track squares. Step 51 is the first square of
//! the color's private home stretch, and step 57 is the finish.

use super::color::PlayerColor;

/// The number of squares on the shared circular track.
pub const TRACK_LEN: u8 = 52;

/// The number of squares in each color's home stretch.
pub const HOME_STRETCH_LEN: u8 = 6;

/// The number of tokens each player owns.
pub const TOKENS_PER_PLAYER: u8 = 4;

/// The relative step at which a token leaves the track for its home stretch.
pub const HOME_ENTRY_STEP: u8 = 51;

/// The relative step at which a token is finished.
pub const FINISH_STEP: u8 = HOME_ENTRY_STEP + HOME_STRETCH_LEN;

/// Absolute indices of the safe squares: the four start squares plus four
/// mid-track squares, eight steps past each start.
pub const SAFE_INDICES: [u8; 8] = [0, 8, 13, 21, 26, 34, 39, 47];

/// Safe-square lookup indexed by absolute track index.
static SAFE_ZONE: [bool; TRACK_LEN as usize] = build_safe_table();

const fn build_safe_table() -> [bool; TRACK_LEN as usize] {
    let mut table = [false; TRACK_LEN as usize];
    let mut i = 0;
    while i < SAFE_INDICES.len() {
        table[SAFE_INDICES[i] as usize] = true;
        i += 1;
    }
    table
}

/// Returns the absolute track index reached after `steps` from the color's start.
pub const fn absolute_track_index(color: PlayerColor, steps: u8) -> u8 {
    ((color.start_offset() as u16 + steps as u16) % TRACK_LEN as u16) as u8
}

/// Returns how many steps past its own start the given absolute index is for `color`.
pub const fn relative_steps(color: PlayerColor, absolute: u8) -> u8 {
    ((absolute as u16 + TRACK_LEN as u16 - color.start_offset() as u16) % TRACK_LEN as u16) as u8
}

/// Returns true if capture is disallowed on the given absolute track index.
pub fn is_safe_zone(absolute: u8) -> bool {
    SAFE_ZONE
        .get(absolute as usize)
        .copied()
        .unwrap_or(false)
}

/// Returns the absolute index of the color's start square.
pub const fn start_square(color: PlayerColor) -> u8 {
    color.start_offset()
}
