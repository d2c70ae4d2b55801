//! Candidate and chosen moves.

use serde::{Deserialize, Serialize};

use super::token::{TokenId, TokenPosition};

/// A transition of one token to a new position.
///
/// Always refers to a token owned by the player whose turn it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub token_id: TokenId,
    pub new_position: TokenPosition,
}

impl Move {
    pub const fn new(token_id: TokenId, new_position: TokenPosition) -> Self {
        Move { token_id, new_position }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moves_compare_by_token_and_destination() {
        let a = Move::new(TokenId(0), TokenPosition::Track(0));
        let b = Move::new(TokenId(0), TokenPosition::Track(0));
        let c = Move::new(TokenId(1), TokenPosition::Track(0));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
