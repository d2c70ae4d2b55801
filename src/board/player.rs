//! Players seated at a game.

use serde::{Deserialize, Serialize};

use super::color::PlayerColor;

/// Who supplies moves for a seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerKind {
    Human,
    Ai,
}

impl PlayerKind {
    pub const fn name(self) -> &'static str {
        match self {
            PlayerKind::Human => "human",
            PlayerKind::Ai => "ai",
        }
    }

    pub fn from_name(s: &str) -> Option<PlayerKind> {
        match s {
            "human" => Some(PlayerKind::Human),
            "ai" => Some(PlayerKind::Ai),
            _ => None,
        }
    }
}

/// A seated player. Only the display name may change during a game.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Player {
    pub id: u32,
    pub kind: PlayerKind,
    pub color: PlayerColor,
    pub name: String,
    /// External identity handle (e.g. an account id) for human seats.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handle: Option<String>,
}

impl Player {
    pub fn human(id: u32, color: PlayerColor, name: impl Into<String>) -> Self {
        Player { id, kind: PlayerKind::Human, color, name: name.into(), handle: None }
    }

    pub fn ai(id: u32, color: PlayerColor, name: impl Into<String>) -> Self {
        Player { id, kind: PlayerKind::Ai, color, name: name.into(), handle: None }
    }

    pub fn is_human(&self) -> bool {
        self.kind == PlayerKind::Human
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_name_roundtrip() {
        for k in [PlayerKind::Human, PlayerKind::Ai] {
            assert_eq!(PlayerKind::from_name(k.name()), Some(k));
        }
        assert_eq!(PlayerKind::from_name("robot"), None);
    }

    #[test]
    fn handle_is_omitted_when_absent() {
        let p = Player::ai(2, PlayerColor::Green, "AI Bot 1");
        let json = serde_json::to_string(&p).unwrap();
        assert!(!json.contains("handle"));
        assert!(json.contains("\"kind\":\"ai\""));
    }
}
