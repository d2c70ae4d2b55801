//! Game state representation.
//!
//! Holds the complete snapshot of a running game: seats, every token's
//! position, whose turn it is, the pending roll and its legal moves, the
//! winner, and the event log.

use serde::{Deserialize, Serialize};

use super::color::PlayerColor;
use super::history::GameLog;
use super::moves::Move;
use super::player::Player;
use super::snapshot::BoardSnapshot;
use super::token::{Token, TokenId, TokenPosition};
use super::topology::TOKENS_PER_PLAYER;

/// Where the current turn is in the roll/move cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TurnState {
    AwaitingRoll,
    AwaitingMove,
    /// A move delegate is choosing; external actions are refused.
    DelegateThinking,
    /// A winner is set; no further transitions occur.
    GameOver,
}

impl TurnState {
    pub const fn name(self) -> &'static str {
        match self {
            TurnState::AwaitingRoll => "awaiting-roll",
            TurnState::AwaitingMove => "awaiting-move",
            TurnState::DelegateThinking => "delegate-thinking",
            TurnState::GameOver => "game-over",
        }
    }
}

/// Complete state of one game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub players: Vec<Player>,
    /// All tokens; `tokens[i].id == TokenId(i)`.
    pub tokens: Vec<Token>,
    pub current_player_index: usize,
    pub dice_value: Option<u8>,
    pub turn_state: TurnState,
    /// Legal moves for the pending roll. Empty unless a move is awaited.
    pub valid_moves: Vec<Move>,
    pub winner: Option<Player>,
    pub history: GameLog,
    pub consecutive_sixes: u8,
    /// Starts at 1 and increments whenever the turn passes to another player.
    pub turn_number: u32,
}

impl GameState {
    /// Creates the initial state for the given seats with every token in base.
    pub fn new(players: Vec<Player>, log_cap: Option<usize>) -> Self {
        let tokens = initial_tokens(&players);
        GameState {
            players,
            tokens,
            current_player_index: 0,
            dice_value: None,
            turn_state: TurnState::AwaitingRoll,
            valid_moves: Vec::new(),
            winner: None,
            history: GameLog::with_cap(log_cap),
            consecutive_sixes: 0,
            turn_number: 1,
        }
    }

    /// Returns the player whose turn it is.
    pub fn current_player(&self) -> &Player {
        &self.players[self.current_player_index]
    }

    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }

    pub fn tokens_of(&self, color: PlayerColor) -> impl Iterator<Item = &Token> {
        self.tokens.iter().filter(move |t| t.color == color)
    }

    pub fn player_by_color(&self, color: PlayerColor) -> Option<&Player> {
        self.players.iter().find(|p| p.color == color)
    }

    pub fn finished_count(&self, color: PlayerColor) -> usize {
        finished_count(&self.tokens, color)
    }

    /// Read-only per-color listing of every token, for move delegates.
    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot::from_tokens(&self.tokens)
    }
}

/// Creates four base tokens per player, numbered in seat order.
pub fn initial_tokens(players: &[Player]) -> Vec<Token> {
    let mut tokens = Vec::with_capacity(players.len() * TOKENS_PER_PLAYER as usize);
    for player in players {
        for slot in 0..TOKENS_PER_PLAYER {
            tokens.push(Token {
                id: TokenId(tokens.len() as u8),
                color: player.color,
                position: TokenPosition::Base(slot),
            });
        }
    }
    tokens
}

/// Number of `color` tokens already finished.
pub fn finished_count(tokens: &[Token], color: PlayerColor) -> usize {
    tokens
        .iter()
        .filter(|t| t.color == color && t.position.is_finished())
        .count()
}

/// Lowest base slot of `color` that no token of that color occupies.
pub fn free_base_slot(tokens: &[Token], color: PlayerColor) -> u8 {
    let mut used = [false; TOKENS_PER_PLAYER as usize];
    for t in tokens.iter().filter(|t| t.color == color) {
        if let TokenPosition::Base(i) = t.position {
            if let Some(slot) = used.get_mut(i as usize) {
                *slot = true;
            }
        }
    }
    used.iter().position(|u| !u).unwrap_or(0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_players() -> Vec<Player> {
        vec![
            Player::human(1, PlayerColor::Red, "Alice"),
            Player::ai(2, PlayerColor::Yellow, "AI Bot 1"),
        ]
    }

    #[test]
    fn initial_state_has_all_tokens_in_base() {
        let state = GameState::new(two_players(), None);
        assert_eq!(state.tokens.len(), 8);
        assert!(state.tokens.iter().all(|t| t.position.is_base()));
        assert_eq!(state.turn_state, TurnState::AwaitingRoll);
        assert_eq!(state.current_player().name, "Alice");
        assert_eq!(state.turn_number, 1);
    }

    #[test]
    fn token_ids_match_indices_and_slots() {
        let state = GameState::new(two_players(), None);
        for (i, t) in state.tokens.iter().enumerate() {
            assert_eq!(t.id, TokenId(i as u8));
            assert_eq!(t.position, TokenPosition::Base((i % 4) as u8));
        }
        assert!(state.tokens_of(PlayerColor::Yellow).all(|t| t.id.0 >= 4));
    }

    #[test]
    fn free_base_slot_finds_the_gap() {
        let mut state = GameState::new(two_players(), None);
        assert_eq!(free_base_slot(&state.tokens, PlayerColor::Red), 0);
        state.tokens[1].position = TokenPosition::Track(3);
        assert_eq!(free_base_slot(&state.tokens, PlayerColor::Red), 1);
        state.tokens[0].position = TokenPosition::Track(9);
        assert_eq!(free_base_slot(&state.tokens, PlayerColor::Red), 0);
    }

    #[test]
    fn finished_count_is_per_color() {
        let mut state = GameState::new(two_players(), None);
        state.tokens[0].position = TokenPosition::Finished(0);
        state.tokens[4].position = TokenPosition::Finished(0);
        state.tokens[5].position = TokenPosition::Finished(1);
        assert_eq!(state.finished_count(PlayerColor::Red), 1);
        assert_eq!(state.finished_count(PlayerColor::Yellow), 2);
    }

    #[test]
    fn turn_state_serializes_kebab_case() {
        let json = serde_json::to_string(&TurnState::DelegateThinking).unwrap();
        assert_eq!(json, "\"delegate-thinking\"");
        assert_eq!(TurnState::AwaitingRoll.name(), "awaiting-roll");
    }
}
