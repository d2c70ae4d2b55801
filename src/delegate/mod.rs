//! Move delegates.
//!
//! A delegate picks one move for a non-human seat from the legal-move list.
//! The engine validates every answer and substitutes a fallback when a
//! delegate fails or answers outside the list, so a turn always completes.

pub mod heuristic;
pub mod random;

use crate::board::{BoardSnapshot, Move, Player};

pub use heuristic::HeuristicDelegate;
pub use random::RandomDelegate;

/// Errors a delegate may report. The engine never propagates them.
#[derive(Debug, thiserror::Error)]
pub enum DelegateError {
    #[error("move delegate failed: {0}")]
    Failed(String),
}

/// Chooses a move for the current player.
///
/// Called only with a non-empty `legal` list. Must return a member of
/// `legal`, or `None` to let the engine fall back.
pub trait MoveDelegate {
    fn choose_move(
        &mut self,
        player: &Player,
        dice: u8,
        board: &BoardSnapshot,
        legal: &[Move],
    ) -> Result<Option<Move>, DelegateError>;
}

impl<F> MoveDelegate for F
where
    F: FnMut(&Player, u8, &BoardSnapshot, &[Move]) -> Result<Option<Move>, DelegateError>,
{
    fn choose_move(
        &mut self,
        player: &Player,
        dice: u8,
        board: &BoardSnapshot,
        legal: &[Move],
    ) -> Result<Option<Move>, DelegateError> {
        self(player, dice, board, legal)
    }
}
