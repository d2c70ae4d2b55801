//! Turn sequencing and win detection.
//!
//! Decides what follows a roll or a move: another roll for the same player
//! (after a six), the next seat's turn, or the end of the game.

use crate::board::{GameState, PlayerColor, Token, TurnState, ALL_COLORS, TOKENS_PER_PLAYER};

/// The roll value that earns another roll.
pub const BONUS_ROLL: u8 = 6;

/// Consecutive sixes that forfeit the turn.
pub const SIXES_FORFEIT: u8 = 3;

/// Returns the seat index that plays after `current` in a game of `seats`.
pub fn next_player_index(current: usize, seats: usize) -> usize {
    if seats == 0 {
        return 0;
    }
    (current + 1) % seats
}

/// Passes the turn to the next seat, clearing the roll, its moves, and the
/// six streak.
pub fn end_turn(state: &mut GameState) {
    state.current_player_index = next_player_index(state.current_player_index, state.players.len());
    state.dice_value = None;
    state.valid_moves.clear();
    state.consecutive_sixes = 0;
    state.turn_state = TurnState::AwaitingRoll;
    state.turn_number += 1;
}

/// Lets the same player roll again. The six streak is kept so a third six
/// can still forfeit.
pub fn grant_extra_roll(state: &mut GameState) {
    state.dice_value = None;
    state.valid_moves.clear();
    state.turn_state = TurnState::AwaitingRoll;
}

/// Returns true once all of the color's tokens are finished.
pub fn has_won(tokens: &[Token], color: PlayerColor) -> bool {
    let mut owned = 0;
    for t in tokens.iter().filter(|t| t.color == color) {
        if !t.position.is_finished() {
            return false;
        }
        owned += 1;
    }
    owned == TOKENS_PER_PLAYER as usize
}

/// Returns the first color that has finished all its tokens, if any.
pub fn is_game_over(tokens: &[Token]) -> Option<PlayerColor> {
    ALL_COLORS.into_iter().find(|&c| has_won(tokens, c))
}
