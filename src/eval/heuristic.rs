//! Heuristic move scoring.
//!
//! Scores a candidate move from the mover's perspective with handcrafted
//! features, in priority order: finishing a token, capturing, reaching the
//! home stretch, leaving base, escaping a threat, landing safe, and raw
//! progress. Moves onto threatened squares are penalized.
//!
//! Scoring reads only the board snapshot, so it works for any seat.

use crate::board::{
    is_safe_zone, relative_steps, BoardSnapshot, Move, Occupancy, PlayerColor, TokenPosition,
    HOME_ENTRY_STEP,
};

const FINISH: i32 = 1000;
const CAPTURE: i32 = 500;
const CAPTURE_PROGRESS: i32 = 4;
const ENTER_HOME: i32 = 300;
const LEAVE_BASE: i32 = 250;
const ESCAPE: i32 = 150;
const DANGER: i32 = -120;
const SAFE_LANDING: i32 = 80;
const FORM_BLOCK: i32 = 40;

/// Largest die value, and so the farthest an opponent can strike from.
const REACH: u8 = 6;

/// Returns how far `position` is along `color`'s route, from 0 (base or
/// start) to 57 (finished).
pub fn progress(color: PlayerColor, position: TokenPosition) -> i32 {
    match position {
        TokenPosition::Base(_) => 0,
        TokenPosition::Track(sq) => relative_steps(color, sq) as i32 + 1,
        TokenPosition::HomeStretch(i) => (HOME_ENTRY_STEP + i) as i32 + 1,
        TokenPosition::Finished(_) => 58,
    }
}

/// True if an opponent token on the track could land on `square` with its next roll.
pub fn is_threatened(square: u8, mover: PlayerColor, board: &BoardSnapshot) -> bool {
    if is_safe_zone(square) {
        return false;
    }
    board.iter().any(|(color, token)| {
        if color == mover {
            return false;
        }
        let Some(from) = token.position.track_index() else {
            return false;
        };
        let target = relative_steps(color, square);
        let start = relative_steps(color, from);
        target < HOME_ENTRY_STEP && target > start && target - start <= REACH
    })
}

/// Scores a legal move for `color`. Higher is better.
pub fn score_move(color: PlayerColor, mv: &Move, board: &BoardSnapshot, occ: &Occupancy) -> i32 {
    let Some((_, from)) = board.find(mv.token_id) else {
        return i32::MIN;
    };
    let dest = mv.new_position;
    let mut score = progress(color, dest) - progress(color, from);

    match (from, dest) {
        (_, TokenPosition::Finished(_)) => score += FINISH,
        (TokenPosition::Track(_), TokenPosition::HomeStretch(_)) => score += ENTER_HOME,
        (TokenPosition::Base(_), _) => score += LEAVE_BASE,
        _ => {}
    }

    if let TokenPosition::Track(sq) = dest {
        if !is_safe_zone(sq) && occ.opponents(sq, color) == 1 {
            let victim_progress = board
                .iter()
                .find(|(c, t)| *c != color && t.position == dest)
                .map_or(0, |(c, t)| progress(c, t.position));
            score += CAPTURE + victim_progress * CAPTURE_PROGRESS;
        }
        if is_safe_zone(sq) {
            score += SAFE_LANDING;
        } else if is_threatened(sq, color, board) {
            score += DANGER;
        }
        if occ.count(sq, color) >= 1 {
            score += FORM_BLOCK;
        }
    }

    if let TokenPosition::Track(sq) = from {
        let dest_exposed =
            matches!(dest, TokenPosition::Track(d) if is_threatened(d, color, board));
        if is_threatened(sq, color, board) && !dest_exposed {
            score += ESCAPE;
        }
    }

    score
}

/// Returns the highest-scoring legal move; ties go to the earliest entry.
pub fn best_move(color: PlayerColor, board: &BoardSnapshot, legal: &[Move]) -> Option<Move> {
    let occ = board.occupancy();
    let mut best: Option<(i32, Move)> = None;
    for mv in legal {
        let score = score_move(color, mv, board, &occ);
        if best.map_or(true, |(b, _)| score > b) {
            best = Some((score, *mv));
        }
    }
    best.map(|(_, mv)| mv)
}
