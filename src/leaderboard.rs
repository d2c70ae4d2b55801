//! Win recording.
//!
//! The engine reports each win to a `LeaderboardSink` and ignores any
//! failure: a broken leaderboard never affects the game.

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

/// Errors a sink may report. The engine only logs them.
#[derive(Debug, thiserror::Error)]
pub enum LeaderboardError {
    #[error("leaderboard unavailable: {0}")]
    Unavailable(String),
}

/// Receives the display name of every winner.
pub trait LeaderboardSink: Send {
    fn record_win(&mut self, player_name: &str) -> Result<(), LeaderboardError>;
}

/// Discards every win.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullLeaderboard;

impl LeaderboardSink for NullLeaderboard {
    fn record_win(&mut self, _player_name: &str) -> Result<(), LeaderboardError> {
        Ok(())
    }
}

/// A player's win tally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub wins: u32,
}

/// Win tallies kept in memory, in first-win order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryLeaderboard {
    entries: Vec<LeaderboardEntry>,
}

impl MemoryLeaderboard {
    pub fn new() -> Self {
        MemoryLeaderboard::default()
    }

    pub fn wins(&self, name: &str) -> u32 {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map_or(0, |e| e.wins)
    }

    /// Entries sorted by wins, most first. Ties keep first-win order.
    pub fn standings(&self) -> Vec<LeaderboardEntry> {
        let mut sorted = self.entries.clone();
        sorted.sort_by(|a, b| b.wins.cmp(&a.wins));
        sorted
    }
}

impl LeaderboardSink for MemoryLeaderboard {
    fn record_win(&mut self, player_name: &str) -> Result<(), LeaderboardError> {
        match self.entries.iter_mut().find(|e| e.name == player_name) {
            Some(entry) => entry.wins += 1,
            None => self.entries.push(LeaderboardEntry { name: player_name.to_string(), wins: 1 }),
        }
        Ok(())
    }
}

/// A `MemoryLeaderboard` that can be handed to an engine while the owner
/// keeps reading standings.
#[derive(Debug, Clone, Default)]
pub struct SharedLeaderboard(Arc<Mutex<MemoryLeaderboard>>);

impl SharedLeaderboard {
    pub fn new() -> Self {
        SharedLeaderboard::default()
    }

    /// Current standings; empty if the board was poisoned by a panic.
    pub fn standings(&self) -> Vec<LeaderboardEntry> {
        self.0.lock().map(|b| b.standings()).unwrap_or_default()
    }

    pub fn wins(&self, name: &str) -> u32 {
        self.0.lock().map(|b| b.wins(name)).unwrap_or(0)
    }
}

impl LeaderboardSink for SharedLeaderboard {
    fn record_win(&mut self, player_name: &str) -> Result<(), LeaderboardError> {
        self.0
            .lock()
            .map_err(|e| LeaderboardError::Unavailable(e.to_string()))?
            .record_win(player_name)
    }
}
