//! Delegate that plays the highest-scoring move.

use crate::board::{BoardSnapshot, Move, Player};
use crate::eval::best_move;

use super::{DelegateError, MoveDelegate};

/// Picks the best move by heuristic score. Deterministic.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicDelegate;

impl MoveDelegate for HeuristicDelegate {
    fn choose_move(
        &mut self,
        player: &Player,
        _dice: u8,
        board: &BoardSnapshot,
        legal: &[Move],
    ) -> Result<Option<Move>, DelegateError> {
        // A single option needs no evaluation.
        if let [only] = legal {
            return Ok(Some(*only));
        }
        let choice = best_move(player.color, board, legal);
        log::debug!("{} chooses {:?} from {} moves", player.name, choice, legal.len());
        Ok(choice)
    }
}
