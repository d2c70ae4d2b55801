//! Turn engine.
//!
//! Owns the authoritative `GameState` and drives it through the roll/move
//! cycle: dice rolls, legal-move generation, move application with capture
//! and win detection, extra rolls on six, the three-sixes forfeit, and
//! turn passing. Every transition works on a copy of the state and swaps it
//! in whole, so no caller ever sees a half-applied transition.
//!
//! Calls made in the wrong state are no-ops that leave the state untouched.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::board::{GameState, Move, Player, TokenId, TurnState};
use crate::config::{
    validate_state, ConfigError, EngineOptions, FallbackPolicy, GameConfig, OptionError,
};
use crate::delegate::MoveDelegate;
use crate::leaderboard::{LeaderboardSink, NullLeaderboard};
use crate::movegen::{generate_moves, random_move};
use crate::resolve::{self, Capture, BONUS_ROLL, SIXES_FORFEIT};

/// What a roll call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RollOutcome {
    /// The call was not legal in the current state.
    Ignored,
    /// Third six in a row; the turn passed without a move.
    Forfeited { value: u8 },
    /// Nothing can move. `reroll` is true after a six.
    NoMoves { value: u8, reroll: bool },
    /// The player must now pick one of `moves` legal moves.
    AwaitingMove { value: u8, moves: usize },
}

impl RollOutcome {
    pub fn value(self) -> Option<u8> {
        match self {
            RollOutcome::Ignored => None,
            RollOutcome::Forfeited { value }
            | RollOutcome::NoMoves { value, .. }
            | RollOutcome::AwaitingMove { value, .. } => Some(value),
        }
    }
}

/// What an applied move did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    pub applied: Move,
    pub capture: Option<Capture>,
    pub won: bool,
    /// The same player rolls again.
    pub extra_turn: bool,
}

/// Result of one delegate-driven roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelegateTurn {
    pub roll: RollOutcome,
    pub outcome: Option<MoveOutcome>,
    /// The delegate failed or answered outside the legal list.
    pub fell_back: bool,
}

/// Holds one game's state and everything needed to advance it.
pub struct Engine {
    state: GameState,
    options: EngineOptions,
    rng: SmallRng,
    leaderboard: Box<dyn LeaderboardSink>,
}

impl Engine {
    /// Starts a game for a validated configuration.
    pub fn new(config: GameConfig, options: EngineOptions) -> Self {
        let rng = make_rng(options.seed);
        let state = GameState::new(config.into_players(), options.max_log_entries);
        log::info!(
            "new game: {}",
            state
                .players
                .iter()
                .map(|p| format!("{} ({}, {})", p.name, p.color, p.kind.name()))
                .collect::<Vec<_>>()
                .join(", ")
        );
        Engine { state, options, rng, leaderboard: Box::new(NullLeaderboard) }
    }

    /// Resumes a saved game, e.g. one read back from JSON. A game saved
    /// while a delegate was choosing resumes awaiting that move.
    pub fn resume(mut state: GameState, options: EngineOptions) -> Result<Self, ConfigError> {
        validate_state(&state)?;
        if state.turn_state == TurnState::DelegateThinking {
            state.turn_state = TurnState::AwaitingMove;
        }
        let rng = make_rng(options.seed);
        Ok(Engine { state, options, rng, leaderboard: Box::new(NullLeaderboard) })
    }

    /// Replaces the win sink.
    pub fn with_leaderboard(mut self, sink: Box<dyn LeaderboardSink>) -> Self {
        self.leaderboard = sink;
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    pub fn current_player(&self) -> &Player {
        self.state.current_player()
    }

    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }

    /// Sets an engine option. Changing `Seed` reseeds the dice and changing
    /// `MaxLogEntries` recaps the running game's log immediately.
    pub fn set_option(&mut self, name: &str, value: Option<&str>) -> Result<(), OptionError> {
        self.options.set_option(name, value)?;
        match name {
            "Seed" => self.rng = make_rng(self.options.seed),
            "MaxLogEntries" => self.state.history.set_cap(self.options.max_log_entries),
            _ => {}
        }
        Ok(())
    }

    /// Rolls a fair die for the current player.
    pub fn roll(&mut self) -> RollOutcome {
        if !self.can_roll() {
            log::debug!("roll ignored in state {}", self.state.turn_state.name());
            return RollOutcome::Ignored;
        }
        let value = self.rng.gen_range(1..=6);
        self.roll_value(value)
    }

    /// Rolls with a caller-supplied die value, for scripted dice and replays.
    /// Values outside 1..=6 are ignored.
    pub fn roll_with(&mut self, value: u8) -> RollOutcome {
        if !(1..=6).contains(&value) || !self.can_roll() {
            log::debug!("roll of {} ignored in state {}", value, self.state.turn_state.name());
            return RollOutcome::Ignored;
        }
        self.roll_value(value)
    }

    fn can_roll(&self) -> bool {
        self.state.turn_state == TurnState::AwaitingRoll && !self.state.is_over()
    }

    fn roll_value(&mut self, value: u8) -> RollOutcome {
        let mut next = self.state.clone();
        let player = next.current_player().clone();

        next.history.push(format!("{} rolled a {}.", player.name, value));
        next.dice_value = Some(value);
        next.consecutive_sixes = if value == BONUS_ROLL { next.consecutive_sixes + 1 } else { 0 };

        let outcome = if next.consecutive_sixes >= SIXES_FORFEIT {
            next.history.push(format!(
                "{} rolled three sixes in a row and forfeits the turn.",
                player.name
            ));
            resolve::end_turn(&mut next);
            RollOutcome::Forfeited { value }
        } else {
            let moves = generate_moves(player.color, value, &next.tokens);
            if moves.is_empty() {
                next.history.push(format!("{} has no valid moves.", player.name));
                let reroll = value == BONUS_ROLL;
                if reroll {
                    resolve::grant_extra_roll(&mut next);
                } else {
                    resolve::end_turn(&mut next);
                }
                RollOutcome::NoMoves { value, reroll }
            } else {
                let count = moves.len();
                next.valid_moves = moves;
                next.turn_state = TurnState::AwaitingMove;
                RollOutcome::AwaitingMove { value, moves: count }
            }
        };

        self.state = next;
        outcome
    }

    /// Applies a move chosen by the current player. The move must be one of
    /// the pending legal moves; anything else is ignored.
    pub fn apply_move(&mut self, mv: &Move) -> Option<MoveOutcome> {
        if self.state.turn_state != TurnState::AwaitingMove {
            log::debug!("move ignored in state {}", self.state.turn_state.name());
            return None;
        }
        self.commit_move(mv)
    }

    /// Applies the pending legal move of the given token, as when a player
    /// clicks one of their tokens.
    pub fn move_token(&mut self, token_id: TokenId) -> Option<MoveOutcome> {
        let mv = self
            .state
            .valid_moves
            .iter()
            .find(|m| m.token_id == token_id)
            .copied()?;
        self.apply_move(&mv)
    }

    fn commit_move(&mut self, mv: &Move) -> Option<MoveOutcome> {
        if self.state.is_over() || !self.state.valid_moves.contains(mv) {
            log::debug!("move {:?} is not a pending legal move", mv);
            return None;
        }

        let mut next = self.state.clone();
        let player = next.current_player().clone();
        let resolution = resolve::apply_move(&mut next.tokens, mv)?;

        if let Some(capture) = resolution.capture {
            let victim = next
                .player_by_color(capture.color)
                .map_or_else(|| capture.color.to_string(), |p| p.name.clone());
            next.history.push(format!("{} captured {}'s token!", player.name, victim));
        }
        next.history.push(format!(
            "{} moved token {} to {}.",
            player.name, mv.token_id, mv.new_position
        ));

        let won = resolve::has_won(&next.tokens, player.color);
        let extra_turn = !won && next.dice_value == Some(BONUS_ROLL);

        if won {
            next.history.push(format!("{} has won the game!", player.name));
            next.winner = Some(player.clone());
            next.dice_value = None;
            next.valid_moves.clear();
            next.turn_state = TurnState::GameOver;
        } else if extra_turn {
            resolve::grant_extra_roll(&mut next);
        } else {
            resolve::end_turn(&mut next);
        }

        self.state = next;

        if won {
            log::info!("{} ({}) won on turn {}", player.name, player.color, self.state.turn_number);
            if let Err(e) = self.leaderboard.record_win(&player.name) {
                log::warn!("could not record win for {}: {}", player.name, e);
            }
        }

        Some(MoveOutcome { applied: *mv, capture: resolution.capture, won, extra_turn })
    }

    /// Plays one roll for the current player with moves supplied by `delegate`.
    pub fn play_delegate_turn(&mut self, delegate: &mut dyn MoveDelegate) -> DelegateTurn {
        let roll = self.roll();
        let (outcome, fell_back) = self.delegate_move(delegate);
        DelegateTurn { roll, outcome, fell_back }
    }

    /// Asks `delegate` to pick one of the pending legal moves and applies it.
    ///
    /// While the delegate decides, the state is `DelegateThinking` and
    /// external moves are refused. A failed, empty, or illegal answer is
    /// replaced by the configured fallback. The delegate is never called
    /// without pending moves, and the state is left awaiting the move if
    /// nothing could be committed. Returns the applied move and whether the
    /// fallback was used.
    pub fn delegate_move(
        &mut self,
        delegate: &mut dyn MoveDelegate,
    ) -> (Option<MoveOutcome>, bool) {
        if self.state.turn_state != TurnState::AwaitingMove || self.state.valid_moves.is_empty() {
            log::debug!("delegate move ignored in state {}", self.state.turn_state.name());
            return (None, false);
        }

        let mut thinking = self.state.clone();
        thinking.turn_state = TurnState::DelegateThinking;
        let awaiting = std::mem::replace(&mut self.state, thinking);

        let player = awaiting.current_player().clone();
        let dice = awaiting.dice_value.unwrap_or_default();
        let board = awaiting.snapshot();
        let legal = awaiting.valid_moves.clone();

        let answer = match delegate.choose_move(&player, dice, &board, &legal) {
            Ok(Some(mv)) if legal.contains(&mv) => Some(mv),
            Ok(Some(mv)) => {
                log::warn!("{}: delegate answered illegal move {:?}", player.name, mv);
                None
            }
            Ok(None) => {
                log::warn!("{}: delegate returned no move", player.name);
                None
            }
            Err(e) => {
                log::warn!("{}: {}", player.name, e);
                None
            }
        };
        let fell_back = answer.is_none();
        let chosen = answer.or_else(|| self.fallback_move(&legal));

        let outcome = chosen.and_then(|mv| self.commit_move(&mv));
        if outcome.is_none() {
            self.state = awaiting;
        }
        (outcome, fell_back)
    }

    fn fallback_move(&mut self, legal: &[Move]) -> Option<Move> {
        match self.options.fallback {
            FallbackPolicy::First => legal.first().copied(),
            FallbackPolicy::Random => random_move(legal, &mut self.rng),
        }
    }

    /// Resets every token to base and hands the first turn to seat 0.
    /// Legal from any state.
    pub fn restart(&mut self) {
        let players = self.state.players.clone();
        self.state = GameState::new(players, self.options.max_log_entries);
        log::info!("game restarted");
    }
}

fn make_rng(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(s) => SmallRng::seed_from_u64(s),
        None => SmallRng::from_entropy(),
    }
}
