//! Ludo engine library.
//!
//! Exposes the board representation, move generation, move resolution, the
//! turn engine, move delegates, and protocol modules for use by integration
//! tests and the binary entry points.

pub mod board;
pub mod config;
pub mod delegate;
pub mod engine;
pub mod eval;
pub mod leaderboard;
pub mod movegen;
pub mod protocol;
pub mod resolve;
pub mod selfplay;
pub mod session;
