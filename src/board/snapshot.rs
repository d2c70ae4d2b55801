//! Read-only board snapshots handed to move delegates.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::color::PlayerColor;
use super::occupancy::Occupancy;
use super::token::{Token, TokenId, TokenPosition};

/// One token as seen in a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotToken {
    pub id: TokenId,
    pub position: TokenPosition,
}

/// Per-color listing of every token's position.
///
/// Serializes as `{"red": [{"id": 0, "position": {"type": "base", "index": 0}}, ...], ...}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BoardSnapshot {
    pub colors: BTreeMap<PlayerColor, Vec<SnapshotToken>>,
}

impl BoardSnapshot {
    pub fn from_tokens(tokens: &[Token]) -> Self {
        let mut colors: BTreeMap<PlayerColor, Vec<SnapshotToken>> = BTreeMap::new();
        for t in tokens {
            colors
                .entry(t.color)
                .or_default()
                .push(SnapshotToken { id: t.id, position: t.position });
        }
        BoardSnapshot { colors }
    }

    pub fn tokens_of(&self, color: PlayerColor) -> &[SnapshotToken] {
        self.colors.get(&color).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Finds a token's color and position by id.
    pub fn find(&self, id: TokenId) -> Option<(PlayerColor, TokenPosition)> {
        self.colors.iter().find_map(|(&color, tokens)| {
            tokens
                .iter()
                .find(|t| t.id == id)
                .map(|t| (color, t.position))
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = (PlayerColor, &SnapshotToken)> {
        self.colors
            .iter()
            .flat_map(|(&color, tokens)| tokens.iter().map(move |t| (color, t)))
    }

    pub fn occupancy(&self) -> Occupancy {
        Occupancy::from_positions(self.iter().map(|(c, t)| (c, t.position)))
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}
