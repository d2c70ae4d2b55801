//! Player colors.
//!
//! The board is defined for exactly four colors. Each color owns one
//! entrance onto the shared track, spaced a quarter-lap apart.

use serde::{Deserialize, Serialize};

/// The number of player colors on the board.
pub const COLOR_COUNT: usize = 4;

/// A player color.
///
/// The `#[repr(u8)]` attribute enables use as an array index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum PlayerColor {
    Red = 0,
    Green = 1,
    Yellow = 2,
    Blue = 3,
}

/// All colors in seat order.
pub const ALL_COLORS: [PlayerColor; COLOR_COUNT] = [
    PlayerColor::Red,
    PlayerColor::Green,
    PlayerColor::Yellow,
    PlayerColor::Blue,
];

impl PlayerColor {
    /// Returns the absolute track index of this color's start square.
    pub const fn start_offset(self) -> u8 {
        match self {
            PlayerColor::Red => 0,
            PlayerColor::Green => 13,
            PlayerColor::Yellow => 26,
            PlayerColor::Blue => 39,
        }
    }

    /// Returns the lowercase color name used in notation and logs.
    pub const fn name(self) -> &'static str {
        match self {
            PlayerColor::Red => "red",
            PlayerColor::Green => "green",
            PlayerColor::Yellow => "yellow",
            PlayerColor::Blue => "blue",
        }
    }

    /// Parses a color from its lowercase name.
    pub fn from_name(s: &str) -> Option<PlayerColor> {
        match s {
            "red" => Some(PlayerColor::Red),
            "green" => Some(PlayerColor::Green),
            "yellow" => Some(PlayerColor::Yellow),
            "blue" => Some(PlayerColor::Blue),
            _ => None,
        }
    }
}

impl std::fmt::Display for PlayerColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_roundtrip() {
        for c in ALL_COLORS {
            assert_eq!(PlayerColor::from_name(c.name()), Some(c));
        }
        assert_eq!(PlayerColor::from_name("purple"), None);
    }

    #[test]
    fn discriminants_match_index() {
        for (i, c) in ALL_COLORS.iter().enumerate() {
            assert_eq!(*c as usize, i);
        }
    }

    #[test]
    fn start_offsets_are_a_quarter_lap_apart() {
        let offsets: Vec<u8> = ALL_COLORS.iter().map(|c| c.start_offset()).collect();
        assert_eq!(offsets, vec![0, 13, 26, 39]);
    }

    #[test]
    fn serde_uses_lowercase_names() {
        let json = serde_json::to_string(&PlayerColor::Yellow).unwrap();
        assert_eq!(json, "\"yellow\"");
        let back: PlayerColor = serde_json::from_str("\"blue\"").unwrap();
        assert_eq!(back, PlayerColor::Blue);
    }
}
