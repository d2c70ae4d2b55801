//! Game and engine configuration.
//!
//! `GameConfig` is validated before any game state exists; the engine
//! assumes it is well formed. `EngineOptions` holds the tunable knobs set
//! through `setoption`.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::board::{
    GameState, Player, PlayerColor, TokenId, TokenPosition, TurnState, TOKENS_PER_PLAYER,
};
use crate::movegen::generate_moves;
use crate::resolve::{is_game_over, SIXES_FORFEIT};

/// Minimum number of seats in a game.
pub const MIN_PLAYERS: usize = 2;

/// Maximum number of seats in a game.
pub const MAX_PLAYERS: usize = 4;

/// Errors that reject a game configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("expected 2 to 4 players, got {0}")]
    WrongPlayerCount(usize),

    #[error("color '{0}' is used by more than one player")]
    DuplicateColor(PlayerColor),

    #[error("at least one human player is required")]
    NoHumanPlayer,

    #[error("player with color '{0}' has an empty name")]
    EmptyName(PlayerColor),

    #[error("inconsistent game state: {0}")]
    InvalidState(String),

    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Validated seating for a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    players: Vec<Player>,
}

impl GameConfig {
    /// Validates seats for an interactive game: 2-4 players, unique colors,
    /// non-empty names, and at least one human.
    pub fn new(players: Vec<Player>) -> Result<Self, ConfigError> {
        validate_seats(&players)?;
        if !players.iter().any(Player::is_human) {
            return Err(ConfigError::NoHumanPlayer);
        }
        Ok(GameConfig { players })
    }

    /// Validates seats for a simulated game, where every seat may be an AI.
    pub fn simulation(players: Vec<Player>) -> Result<Self, ConfigError> {
        validate_seats(&players)?;
        Ok(GameConfig { players })
    }

    /// Parses and validates an interactive config from JSON of the form
    /// `{"players": [{"id": 1, "kind": "human", "color": "red", "name": "Alice"}, ...]}`.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let raw: GameConfig = serde_json::from_str(json)?;
        GameConfig::new(raw.players)
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn into_players(self) -> Vec<Player> {
        self.players
    }
}

fn validate_seats(players: &[Player]) -> Result<(), ConfigError> {
    if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&players.len()) {
        return Err(ConfigError::WrongPlayerCount(players.len()));
    }
    let mut seen = HashSet::new();
    for p in players {
        if !seen.insert(p.color) {
            return Err(ConfigError::DuplicateColor(p.color));
        }
        if p.name.trim().is_empty() {
            return Err(ConfigError::EmptyName(p.color));
        }
    }
    Ok(())
}

/// Checks a saved state before it is resumed: valid seats, a current
/// player in range, exactly four well-formed tokens per seat numbered in
/// seat order with distinct base and finish slots, a turn state that agrees
/// with the dice, the pending moves and the winner.
pub fn validate_state(state: &GameState) -> Result<(), ConfigError> {
    validate_seats(&state.players)?;
    if state.current_player_index >= state.players.len() {
        return Err(invalid(format!(
            "current player index {} out of range",
            state.current_player_index
        )));
    }
    validate_tokens(state)?;

    if state.consecutive_sixes >= SIXES_FORFEIT {
        return Err(invalid(format!("{} consecutive sixes", state.consecutive_sixes)));
    }

    let finished = is_game_over(&state.tokens);
    match (&state.winner, finished) {
        (Some(winner), Some(color)) if winner.color == color => {
            if !state.players.contains(winner) {
                return Err(invalid(format!("winner {} is not seated", winner.name)));
            }
        }
        (None, None) => {}
        (Some(winner), _) => {
            return Err(invalid(format!("winner {} has unfinished tokens", winner.name)));
        }
        (None, Some(color)) => {
            return Err(invalid(format!("{} finished every token but has not won", color)));
        }
    }

    match state.turn_state {
        TurnState::GameOver | TurnState::AwaitingRoll => {
            if (state.turn_state == TurnState::GameOver) != state.winner.is_some() {
                return Err(invalid(format!(
                    "turn state {} disagrees with the winner",
                    state.turn_state.name()
                )));
            }
            if !state.valid_moves.is_empty() {
                return Err(invalid(format!(
                    "pending moves while {}",
                    state.turn_state.name()
                )));
            }
        }
        TurnState::AwaitingMove | TurnState::DelegateThinking => {
            if state.winner.is_some() {
                return Err(invalid("pending moves after the game ended".to_string()));
            }
            let dice = match state.dice_value {
                Some(v) if (1..=6).contains(&v) => v,
                other => return Err(invalid(format!("awaiting a move with dice {:?}", other))),
            };
            if state.valid_moves.is_empty() {
                return Err(invalid("awaiting a move with no pending moves".to_string()));
            }
            let color = state.current_player().color;
            let legal = generate_moves(color, dice, &state.tokens);
            if let Some(mv) = state.valid_moves.iter().find(|mv| !legal.contains(mv)) {
                return Err(invalid(format!(
                    "pending move {:?} is not legal for {} with a {}",
                    mv, color, dice
                )));
            }
        }
    }
    Ok(())
}

fn validate_tokens(state: &GameState) -> Result<(), ConfigError> {
    let per_seat = TOKENS_PER_PLAYER as usize;
    if state.tokens.len() != state.players.len() * per_seat {
        return Err(invalid(format!(
            "expected {} tokens, got {}",
            state.players.len() * per_seat,
            state.tokens.len()
        )));
    }
    for (i, token) in state.tokens.iter().enumerate() {
        let owner = state.players[i / per_seat].color;
        if token.id != TokenId(i as u8) || token.color != owner {
            return Err(invalid(format!("token {} is misnumbered", i)));
        }
        if !token.position.is_well_formed() {
            return Err(invalid(format!("token {} has position {}", i, token.position)));
        }
    }
    for seat in state.tokens.chunks(per_seat) {
        let mut slots = HashSet::new();
        for token in seat {
            let slot = match token.position {
                TokenPosition::Base(_) | TokenPosition::Finished(_) => token.position,
                _ => continue,
            };
            if !slots.insert(slot) {
                return Err(invalid(format!("{} tokens share {}", token.color, slot)));
            }
        }
    }
    Ok(())
}

fn invalid(reason: String) -> ConfigError {
    ConfigError::InvalidState(reason)
}

/// How the engine picks a move when a delegate fails or answers with
/// something outside the legal list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FallbackPolicy {
    /// The first entry of the legal-move list.
    #[default]
    First,
    /// A uniformly random entry of the legal-move list.
    Random,
}

impl FallbackPolicy {
    pub const fn name(self) -> &'static str {
        match self {
            FallbackPolicy::First => "first",
            FallbackPolicy::Random => "random",
        }
    }

    pub fn from_name(s: &str) -> Option<FallbackPolicy> {
        match s.to_ascii_lowercase().as_str() {
            "first" => Some(FallbackPolicy::First),
            "random" => Some(FallbackPolicy::Random),
            _ => None,
        }
    }
}

/// Errors from `EngineOptions::set_option`.
#[derive(Debug, thiserror::Error)]
pub enum OptionError {
    #[error("unknown option '{0}'")]
    Unknown(String),

    #[error("invalid value '{value}' for option '{name}'")]
    InvalidValue { name: String, value: String },
}

/// Tunable engine settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineOptions {
    /// RNG seed; `None` draws from entropy.
    pub seed: Option<u64>,
    /// Retained log entries; `None` keeps everything.
    pub max_log_entries: Option<usize>,
    pub fallback: FallbackPolicy,
}

impl EngineOptions {
    /// Sets an option by name. A missing value or `0` resets `Seed` and
    /// `MaxLogEntries` to their defaults.
    pub fn set_option(&mut self, name: &str, value: Option<&str>) -> Result<(), OptionError> {
        let invalid = || OptionError::InvalidValue {
            name: name.to_string(),
            value: value.unwrap_or_default().to_string(),
        };
        match name {
            "Seed" => {
                self.seed = match value {
                    None => None,
                    Some(v) => Some(v.parse::<u64>().map_err(|_| invalid())?).filter(|&s| s != 0),
                };
            }
            "MaxLogEntries" => {
                self.max_log_entries = match value {
                    None => None,
                    Some(v) => Some(v.parse::<usize>().map_err(|_| invalid())?).filter(|&n| n != 0),
                };
            }
            "Fallback" => {
                self.fallback = value.and_then(FallbackPolicy::from_name).ok_or_else(invalid)?;
            }
            other => return Err(OptionError::Unknown(other.to_string())),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Move;

    fn seats() -> Vec<Player> {
        vec![
            Player::human(1, PlayerColor::Red, "Alice"),
            Player::ai(2, PlayerColor::Green, "AI Bot 1"),
        ]
    }

    #[test]
    fn valid_config_is_accepted() {
        let config = GameConfig::new(seats()).unwrap();
        assert_eq!(config.players().len(), 2);
    }

    #[test]
    fn rejects_single_player() {
        let err = GameConfig::new(vec![Player::human(1, PlayerColor::Red, "Alice")]).unwrap_err();
        assert!(matches!(err, ConfigError::WrongPlayerCount(1)));
    }

    #[test]
    fn rejects_five_players() {
        let mut players = seats();
        players.push(Player::ai(3, PlayerColor::Yellow, "a"));
        players.push(Player::ai(4, PlayerColor::Blue, "b"));
        players.push(Player::ai(5, PlayerColor::Blue, "c"));
        assert!(matches!(GameConfig::new(players), Err(ConfigError::WrongPlayerCount(5))));
    }

    #[test]
    fn rejects_duplicate_colors() {
        let players = vec![
            Player::human(1, PlayerColor::Red, "Alice"),
            Player::ai(2, PlayerColor::Red, "Bot"),
        ];
        assert!(matches!(
            GameConfig::new(players),
            Err(ConfigError::DuplicateColor(PlayerColor::Red))
        ));
    }

    #[test]
    fn rejects_all_ai_but_simulation_allows_it() {
        let players = vec![
            Player::ai(1, PlayerColor::Red, "Bot 1"),
            Player::ai(2, PlayerColor::Blue, "Bot 2"),
        ];
        assert!(matches!(GameConfig::new(players.clone()), Err(ConfigError::NoHumanPlayer)));
        assert!(GameConfig::simulation(players).is_ok());
    }

    #[test]
    fn rejects_blank_name() {
        let players = vec![
            Player::human(1, PlayerColor::Red, "  "),
            Player::ai(2, PlayerColor::Blue, "Bot"),
        ];
        assert!(matches!(GameConfig::new(players), Err(ConfigError::EmptyName(PlayerColor::Red))));
    }

    #[test]
    fn loads_from_json() {
        let json = r#"{"players": [
            {"id": 1, "kind": "human", "color": "red", "name": "Alice"},
            {"id": 2, "kind": "ai", "color": "yellow", "name": "Bot"}
        ]}"#;
        let config = GameConfig::from_json(json).unwrap();
        assert_eq!(config.players()[1].color, PlayerColor::Yellow);
        assert!(matches!(GameConfig::from_json("{"), Err(ConfigError::Json(_))));
    }

    fn fresh_state() -> GameState {
        GameState::new(seats(), None)
    }

    fn rejected(state: &GameState) -> bool {
        matches!(validate_state(state), Err(ConfigError::InvalidState(_)))
    }

    #[test]
    fn fresh_state_is_consistent() {
        assert!(validate_state(&fresh_state()).is_ok());
    }

    #[test]
    fn awaiting_move_needs_dice_and_pending_moves() {
        let mut state = fresh_state();
        state.turn_state = TurnState::AwaitingMove;
        state.dice_value = Some(6);
        assert!(rejected(&state));

        state.valid_moves = vec![Move::new(TokenId(0), TokenPosition::Track(0))];
        assert!(validate_state(&state).is_ok());

        state.dice_value = None;
        assert!(rejected(&state));
    }

    #[test]
    fn pending_moves_must_belong_to_current_player() {
        let mut state = fresh_state();
        state.tokens[4].position = TokenPosition::Track(24);
        state.turn_state = TurnState::AwaitingMove;
        state.dice_value = Some(2);
        state.valid_moves = vec![Move::new(TokenId(4), TokenPosition::Track(26))];
        assert!(rejected(&state));
    }

    #[test]
    fn awaiting_roll_has_no_pending_moves() {
        let mut state = fresh_state();
        state.valid_moves = vec![Move::new(TokenId(0), TokenPosition::Track(0))];
        assert!(rejected(&state));
    }

    #[test]
    fn winner_and_game_over_go_together() {
        let mut state = fresh_state();
        state.turn_state = TurnState::GameOver;
        assert!(rejected(&state));

        let mut state = fresh_state();
        for i in 0..4 {
            state.tokens[i].position = TokenPosition::Finished(i as u8);
        }
        assert!(rejected(&state));

        state.winner = Some(state.players[0].clone());
        assert!(rejected(&state));
        state.turn_state = TurnState::GameOver;
        assert!(validate_state(&state).is_ok());

        state.winner = Some(state.players[1].clone());
        assert!(rejected(&state));
    }

    #[test]
    fn slots_are_unique_per_color() {
        let mut state = fresh_state();
        state.tokens[1].position = TokenPosition::Base(0);
        assert!(rejected(&state));

        let mut state = fresh_state();
        state.tokens[0].position = TokenPosition::Finished(1);
        state.tokens[1].position = TokenPosition::Finished(1);
        assert!(rejected(&state));

        // Different colors may use the same slot numbers.
        let mut state = fresh_state();
        state.tokens[0].position = TokenPosition::Finished(0);
        state.tokens[4].position = TokenPosition::Finished(0);
        assert!(validate_state(&state).is_ok());
    }

    #[test]
    fn set_option_parses_values() {
        let mut opts = EngineOptions::default();
        opts.set_option("Seed", Some("42")).unwrap();
        opts.set_option("MaxLogEntries", Some("100")).unwrap();
        opts.set_option("Fallback", Some("random")).unwrap();
        assert_eq!(opts.seed, Some(42));
        assert_eq!(opts.max_log_entries, Some(100));
        assert_eq!(opts.fallback, FallbackPolicy::Random);

        opts.set_option("Seed", Some("0")).unwrap();
        assert_eq!(opts.seed, None);
    }

    #[test]
    fn set_option_rejects_bad_input() {
        let mut opts = EngineOptions::default();
        assert!(matches!(opts.set_option("Threads", Some("8")), Err(OptionError::Unknown(_))));
        assert!(matches!(
            opts.set_option("Seed", Some("abc")),
            Err(OptionError::InvalidValue { .. })
        ));
        assert!(opts.set_option("Fallback", None).is_err());
        assert_eq!(opts, EngineOptions::default());
    }
}
