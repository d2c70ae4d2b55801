//! Board representation and game-state types.
//!
//! Contains the board topology, colors, tokens, players, moves, the game
//! log, and the overall game state.

pub mod color;
pub mod history;
pub mod moves;
pub mod occupancy;
pub mod player;
pub mod snapshot;
pub mod state;
pub mod token;
pub mod topology;

pub use color::{PlayerColor, ALL_COLORS, COLOR_COUNT};
pub use history::GameLog;
pub use moves::Move;
pub use occupancy::Occupancy;
pub use player::{Player, PlayerKind};
pub use snapshot::{BoardSnapshot, SnapshotToken};
pub use state::{GameState, TurnState};
pub use token::{Token, TokenId, TokenPosition};
pub use topology::{
    absolute_track_index, is_safe_zone, relative_steps, start_square, FINISH_STEP,
    HOME_ENTRY_STEP, HOME_STRETCH_LEN, SAFE_INDICES, TOKENS_PER_PLAYER, TRACK_LEN,
};
