//! Delegate that plays a uniformly random legal move.

use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::board::{BoardSnapshot, Move, Player};
use crate::movegen::random_move;

use super::{DelegateError, MoveDelegate};

pub struct RandomDelegate {
    rng: SmallRng,
}

impl RandomDelegate {
    pub fn new() -> Self {
        RandomDelegate { rng: SmallRng::from_entropy() }
    }

    pub fn seeded(seed: u64) -> Self {
        RandomDelegate { rng: SmallRng::seed_from_u64(seed) }
    }
}

impl Default for RandomDelegate {
    fn default() -> Self {
        RandomDelegate::new()
    }
}

impl MoveDelegate for RandomDelegate {
    fn choose_move(
        &mut self,
        _player: &Player,
        _dice: u8,
        _board: &BoardSnapshot,
        legal: &[Move],
    ) -> Result<Option<Move>, DelegateError> {
        Ok(random_move(legal, &mut self.rng))
    }
}
