//! Move evaluation.
//!
//! Scores candidate moves from a color's perspective, considering finishing,
//! captures, safety and progress.

pub(crate) mod heuristic;

pub use heuristic::{best_move, is_threatened, progress, score_move};
