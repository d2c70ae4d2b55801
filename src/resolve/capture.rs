//! Move application with capture resolution.
//!
//! A token landing on a non-safe track square holding exactly one opposing
//! token sends that token back to its base. Squares holding two or more
//! opposing tokens never receive a landing, because the move generator
//! excludes them.

use crate::board::state::free_base_slot;
use crate::board::{is_safe_zone, Move, Occupancy, PlayerColor, Token, TokenId, TokenPosition};

/// A token sent back to base by a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capture {
    pub token_id: TokenId,
    pub color: PlayerColor,
    /// The base slot the captured token was returned to.
    pub base_slot: u8,
}

/// What happened when a move was applied to the token set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub capture: Option<Capture>,
}

/// Returns the id of the token `mover` would capture by landing on `dest`.
pub fn capture_target(
    tokens: &[Token],
    mover: PlayerColor,
    dest: TokenPosition,
) -> Option<TokenId> {
    let square = dest.track_index()?;
    if is_safe_zone(square) {
        return None;
    }
    let occ = Occupancy::from_tokens(tokens);
    if occ.opponents(square, mover) != 1 {
        return None;
    }
    tokens
        .iter()
        .find(|t| t.color != mover && t.position == dest)
        .map(|t| t.id)
}

/// Applies `mv` to the token set, resolving any capture first.
///
/// Returns `None` without touching the tokens if the move names an unknown
/// token. Legality is the caller's responsibility.
pub fn apply_move(tokens: &mut [Token], mv: &Move) -> Option<Resolution> {
    let mover = *tokens.get(mv.token_id.index())?;

    let capture = capture_target(tokens, mover.color, mv.new_position).map(|victim_id| {
        let victim_color = tokens[victim_id.index()].color;
        let base_slot = free_base_slot(tokens, victim_color);
        tokens[victim_id.index()].position = TokenPosition::Base(base_slot);
        Capture { token_id: victim_id, color: victim_color, base_slot }
    });

    tokens[mv.token_id.index()].position = mv.new_position;

    Some(Resolution { capture })
}
