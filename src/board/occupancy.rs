//! Track occupancy counts.
//!
//! Counts tokens per color on every track square so block and capture
//! checks are O(1). Uses a fixed-size array indexed by
//! `[track index][PlayerColor as usize]`; no heap allocation.

use super::color::{PlayerColor, ALL_COLORS, COLOR_COUNT};
use super::token::{Token, TokenPosition};
use super::topology::TRACK_LEN;

/// Per-square, per-color token counts for the shared track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occupancy {
    counts: [[u8; COLOR_COUNT]; TRACK_LEN as usize],
}

impl Occupancy {
    pub fn empty() -> Self {
        Occupancy { counts: [[0; COLOR_COUNT]; TRACK_LEN as usize] }
    }

    /// Builds occupancy from any iterator of (color, position) pairs.
    pub fn from_positions<I>(positions: I) -> Self
    where
        I: IntoIterator<Item = (PlayerColor, TokenPosition)>,
    {
        let mut occ = Occupancy::empty();
        for (color, pos) in positions {
            if let TokenPosition::Track(i) = pos {
                if let Some(square) = occ.counts.get_mut(i as usize) {
                    square[color as usize] += 1;
                }
            }
        }
        occ
    }

    pub fn from_tokens(tokens: &[Token]) -> Self {
        Occupancy::from_positions(tokens.iter().map(|t| (t.color, t.position)))
    }

    /// Number of `color` tokens on the square.
    pub fn count(&self, square: u8, color: PlayerColor) -> u8 {
        self.counts
            .get(square as usize)
            .map_or(0, |s| s[color as usize])
    }

    /// Total tokens on the square not belonging to `mover`.
    pub fn opponents(&self, square: u8, mover: PlayerColor) -> u8 {
        ALL_COLORS
            .iter()
            .filter(|&&c| c != mover)
            .map(|&c| self.count(square, c))
            .sum()
    }

    /// True if two or more tokens of a single color other than `mover` sit on
    /// the square. Such a square can be neither landed on nor passed.
    pub fn is_blocked_for(&self, square: u8, mover: PlayerColor) -> bool {
        ALL_COLORS
            .iter()
            .any(|&c| c != mover && self.count(square, c) >= 2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::token::TokenId;

    fn token(id: u8, color: PlayerColor, position: TokenPosition) -> Token {
        Token { id: TokenId(id), color, position }
    }

    #[test]
    fn counts_only_track_tokens() {
        let tokens = [
            token(0, PlayerColor::Red, TokenPosition::Track(5)),
            token(1, PlayerColor::Red, TokenPosition::Base(1)),
            token(4, PlayerColor::Green, TokenPosition::HomeStretch(5)),
        ];
        let occ = Occupancy::from_tokens(&tokens);
        assert_eq!(occ.count(5, PlayerColor::Red), 1);
        assert_eq!(occ.count(1, PlayerColor::Red), 0);
        assert_eq!(occ.count(5, PlayerColor::Green), 0);
    }

    #[test]
    fn two_of_one_opposing_color_blocks() {
        let tokens = [
            token(12, PlayerColor::Blue, TokenPosition::Track(20)),
            token(13, PlayerColor::Blue, TokenPosition::Track(20)),
        ];
        let occ = Occupancy::from_tokens(&tokens);
        assert!(occ.is_blocked_for(20, PlayerColor::Red));
        assert!(!occ.is_blocked_for(20, PlayerColor::Blue));
    }

    #[test]
    fn mixed_opponents_do_not_block() {
        let tokens = [
            token(4, PlayerColor::Green, TokenPosition::Track(30)),
            token(12, PlayerColor::Blue, TokenPosition::Track(30)),
        ];
        let occ = Occupancy::from_tokens(&tokens);
        assert!(!occ.is_blocked_for(30, PlayerColor::Red));
        assert_eq!(occ.opponents(30, PlayerColor::Red), 2);
        assert_eq!(occ.opponents(30, PlayerColor::Green), 1);
    }
}
