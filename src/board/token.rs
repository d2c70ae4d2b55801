//! Tokens and their positions.

use serde::{Deserialize, Serialize};

use super::color::PlayerColor;
use super::topology::{HOME_STRETCH_LEN, TOKENS_PER_PLAYER, TRACK_LEN};

/// Identifies a token. Unique per game; tokens are numbered in seat order,
/// four per player, so a token's id is also its index in the token list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenId(pub u8);

impl TokenId {
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for TokenId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where a token currently sits.
///
/// Serialized as `{"type": "track", "index": 14}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "index", rename_all = "kebab-case")]
pub enum TokenPosition {
    /// One of the four base slots.
    Base(u8),
    /// An absolute square on the shared track.
    Track(u8),
    /// A square on the owner's private lane.
    HomeStretch(u8),
    /// One of the four finish slots.
    Finished(u8),
}

impl TokenPosition {
    /// Returns the notation keyword for this position's kind.
    pub const fn kind(self) -> &'static str {
        match self {
            TokenPosition::Base(_) => "base",
            TokenPosition::Track(_) => "track",
            TokenPosition::HomeStretch(_) => "home-stretch",
            TokenPosition::Finished(_) => "finished",
        }
    }

    pub const fn index(self) -> u8 {
        match self {
            TokenPosition::Base(i)
            | TokenPosition::Track(i)
            | TokenPosition::HomeStretch(i)
            | TokenPosition::Finished(i) => i,
        }
    }

    /// Returns true if the index is in range for the position kind.
    pub const fn is_well_formed(self) -> bool {
        match self {
            TokenPosition::Base(i) | TokenPosition::Finished(i) => i < TOKENS_PER_PLAYER,
            TokenPosition::Track(i) => i < TRACK_LEN,
            TokenPosition::HomeStretch(i) => i < HOME_STRETCH_LEN,
        }
    }

    pub const fn is_base(self) -> bool {
        matches!(self, TokenPosition::Base(_))
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, TokenPosition::Finished(_))
    }

    /// Returns the absolute track index if the token is on the track.
    pub const fn track_index(self) -> Option<u8> {
        match self {
            TokenPosition::Track(i) => Some(i),
            _ => None,
        }
    }
}

impl std::fmt::Display for TokenPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.kind(), self.index())
    }
}

/// A playing piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    pub id: TokenId,
    pub color: PlayerColor,
    pub position: TokenPosition,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_formed_bounds() {
        assert!(TokenPosition::Base(3).is_well_formed());
        assert!(!TokenPosition::Base(4).is_well_formed());
        assert!(TokenPosition::Track(51).is_well_formed());
        assert!(!TokenPosition::Track(52).is_well_formed());
        assert!(TokenPosition::HomeStretch(5).is_well_formed());
        assert!(!TokenPosition::HomeStretch(6).is_well_formed());
        assert!(!TokenPosition::Finished(4).is_well_formed());
    }

    #[test]
    fn display_uses_kind_and_index() {
        assert_eq!(TokenPosition::HomeStretch(2).to_string(), "home-stretch 2");
        assert_eq!(TokenPosition::Track(14).to_string(), "track 14");
    }

    #[test]
    fn serde_is_tagged_type_and_index() {
        let json = serde_json::to_string(&TokenPosition::HomeStretch(2)).unwrap();
        assert_eq!(json, r#"{"type":"home-stretch","index":2}"#);
        let back: TokenPosition = serde_json::from_str(r#"{"type":"base","index":1}"#).unwrap();
        assert_eq!(back, TokenPosition::Base(1));
    }

    #[test]
    fn track_index_only_for_track() {
        assert_eq!(TokenPosition::Track(7).track_index(), Some(7));
        assert_eq!(TokenPosition::HomeStretch(1).track_index(), None);
    }
}
