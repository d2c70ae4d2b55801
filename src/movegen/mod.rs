//! Legal move generation.
//!
//! Generates the set of legal moves for a color given a die value and the
//! full token set. Generation is deterministic and never mutates tokens.

pub mod advance;

use rand::Rng;

use crate::board::state::finished_count;
use crate::board::{Move, Occupancy, PlayerColor, Token, TokenPosition};

pub use advance::EXIT_ROLL;

/// Generates every legal move for `color` after rolling `dice`.
///
/// Tokens are evaluated independently; a blocked or overshooting token only
/// removes its own move. Only one base token is offered for an exit, the one
/// in the lowest base slot, since all exits land on the same square.
/// Returns an empty vec if nothing can move. Callers must not depend on order.
pub fn generate_moves(color: PlayerColor, dice: u8, tokens: &[Token]) -> Vec<Move> {
    if !(1..=6).contains(&dice) {
        return Vec::new();
    }

    let occ = Occupancy::from_tokens(tokens);
    let finished = finished_count(tokens, color);
    let mut moves = Vec::new();

    if dice == EXIT_ROLL {
        let next_out = tokens
            .iter()
            .filter(|t| t.color == color && t.position.is_base())
            .min_by_key(|t| (t.position.index(), t.id));
        if let Some(token) = next_out {
            if let Some(dest) = advance::leave_base(color, &occ) {
                moves.push(Move::new(token.id, dest));
            }
        }
    }

    for token in tokens.iter().filter(|t| t.color == color) {
        let dest = match token.position {
            TokenPosition::Base(_) | TokenPosition::Finished(_) => None,
            TokenPosition::Track(square) => {
                advance::from_track(color, square, dice, &occ, finished)
            }
            TokenPosition::HomeStretch(index) => advance::from_home_stretch(index, dice, finished),
        };
        if let Some(dest) = dest {
            moves.push(Move::new(token.id, dest));
        }
    }

    moves
}

/// Picks a uniformly random move, or `None` from an empty list.
pub fn random_move(moves: &[Move], rng: &mut impl Rng) -> Option<Move> {
    if moves.is_empty() {
        return None;
    }
    let idx = rng.gen_range(0..moves.len());
    Some(moves[idx])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::state::initial_tokens;
    use crate::board::{Player, TokenId, TRACK_LEN};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn red_yellow_tokens() -> Vec<Token> {
        initial_tokens(&[
            Player::human(1, PlayerColor::Red, "Alice"),
            Player::ai(2, PlayerColor::Yellow, "Bot"),
        ])
    }

    #[test]
    fn fresh_game_six_has_exactly_one_exit() {
        let tokens = red_yellow_tokens();
        let moves = generate_moves(PlayerColor::Red, 6, &tokens);
        assert_eq!(moves, vec![Move::new(TokenId(0), TokenPosition::Track(0))]);
    }

    #[test]
    fn fresh_game_non_six_has_no_moves() {
        let tokens = red_yellow_tokens();
        for dice in 1..6 {
            assert!(generate_moves(PlayerColor::Red, dice, &tokens).is_empty());
        }
    }

    #[test]
    fn exit_uses_lowest_free_base_slot() {
        let mut tokens = red_yellow_tokens();
        tokens[0].position = TokenPosition::Track(5);
        let moves = generate_moves(PlayerColor::Red, 6, &tokens);
        assert!(moves.contains(&Move::new(TokenId(1), TokenPosition::Track(0))));
        assert!(moves.contains(&Move::new(TokenId(0), TokenPosition::Track(11))));
        assert_eq!(moves.len(), 2);
    }

    #[test]
    fn invalid_dice_yield_nothing() {
        let tokens = red_yellow_tokens();
        assert!(generate_moves(PlayerColor::Red, 0, &tokens).is_empty());
        assert!(generate_moves(PlayerColor::Red, 7, &tokens).is_empty());
    }

    #[test]
    fn finished_tokens_never_move() {
        let mut tokens = red_yellow_tokens();
        for (slot, t) in tokens.iter_mut().take(4).enumerate() {
            t.position = TokenPosition::Finished(slot as u8);
        }
        for dice in 1..=6 {
            assert!(generate_moves(PlayerColor::Red, dice, &tokens).is_empty());
        }
    }

    #[test]
    fn never_lands_on_opposing_block() {
        let mut tokens = red_yellow_tokens();
        tokens[4].position = TokenPosition::Track(20);
        tokens[5].position = TokenPosition::Track(20);
        for start in 0..TRACK_LEN {
            tokens[0].position = TokenPosition::Track(start);
            for dice in 1..=6 {
                for m in generate_moves(PlayerColor::Red, dice, &tokens) {
                    assert_ne!(m.new_position, TokenPosition::Track(20));
                }
            }
        }
    }

    #[test]
    fn generation_does_not_mutate() {
        let tokens = red_yellow_tokens();
        let before = tokens.clone();
        let _ = generate_moves(PlayerColor::Red, 6, &tokens);
        assert_eq!(tokens, before);
    }

    #[test]
    fn random_move_is_member() {
        let moves = vec![
            Move::new(TokenId(0), TokenPosition::Track(3)),
            Move::new(TokenId(1), TokenPosition::Track(4)),
        ];
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..20 {
            let m = random_move(&moves, &mut rng).unwrap();
            assert!(moves.contains(&m));
        }
        assert_eq!(random_move(&[], &mut rng), None);
    }
}
