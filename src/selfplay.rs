//! Self-play game generation.
//!
//! Plays full games between delegate-driven seats and records one summary
//! per game: winner, turn count, and roll/move/capture/forfeit tallies.
//! Games run sequentially or concurrently on a rayon pool; with a fixed
//! seed every game is reproducible regardless of the thread count.

use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use serde::Serialize;

use crate::board::{Player, PlayerColor, ALL_COLORS, COLOR_COUNT};
use crate::config::{
    ConfigError, EngineOptions, FallbackPolicy, GameConfig, MAX_PLAYERS, MIN_PLAYERS,
};
use crate::delegate::{HeuristicDelegate, MoveDelegate, RandomDelegate};
use crate::engine::{Engine, RollOutcome};

/// Configuration for self-play game generation.
#[derive(Debug, Clone)]
pub struct SelfPlayConfig {
    /// Number of games to play.
    pub num_games: usize,
    /// Seats per game (2-4).
    pub players: usize,
    /// Seats, counted from the last, that play random legal moves instead
    /// of the heuristic.
    pub random_seats: usize,
    /// Turn cap; a game still running after this many turns has no winner.
    pub max_turns: u32,
    /// Number of parallel threads for concurrent games.
    pub threads: usize,
    /// Random seed (0 = use entropy).
    pub seed: u64,
    /// Suppress per-game progress output.
    pub quiet: bool,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        SelfPlayConfig {
            num_games: 10,
            players: 4,
            random_seats: 0,
            max_turns: 5000,
            threads: 4,
            seed: 0,
            quiet: false,
        }
    }
}

/// A complete self-play game record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameRecord {
    /// Sequential game ID.
    pub game_id: usize,
    pub players: Vec<Player>,
    /// The winning color, or `None` if the turn cap was hit.
    pub winner: Option<PlayerColor>,
    pub turns: u32,
    pub rolls: u32,
    pub moves: u32,
    pub captures: u32,
    pub forfeits: u32,
    /// Entries in the final game log.
    pub history_len: usize,
}

/// Colors used for a game of `n` seats. Two-player games sit opposite.
pub fn seat_colors(n: usize) -> Vec<PlayerColor> {
    match n {
        2 => vec![PlayerColor::Red, PlayerColor::Yellow],
        3 => vec![PlayerColor::Red, PlayerColor::Green, PlayerColor::Yellow],
        _ => ALL_COLORS.iter().copied().take(n.min(COLOR_COUNT)).collect(),
    }
}

fn game_seed(config: &SelfPlayConfig, game_id: usize) -> Option<u64> {
    (config.seed != 0).then(|| config.seed.wrapping_add(game_id as u64))
}

/// Plays one game to completion or to the turn cap.
pub fn play_game(config: &SelfPlayConfig, game_id: usize) -> Result<GameRecord, ConfigError> {
    let colors = seat_colors(config.players);
    let players: Vec<Player> = colors
        .iter()
        .enumerate()
        .map(|(seat, &color)| Player::ai(seat as u32 + 1, color, format!("AI Bot {}", seat + 1)))
        .collect();
    let game = GameConfig::simulation(players.clone())?;

    let seed = game_seed(config, game_id);
    let options = EngineOptions { seed, max_log_entries: None, fallback: FallbackPolicy::First };
    let mut engine = Engine::new(game, options);

    let first_random = players.len().saturating_sub(config.random_seats);
    let mut delegates: Vec<Box<dyn MoveDelegate>> = (0..players.len())
        .map(|seat| -> Box<dyn MoveDelegate> {
            if seat < first_random {
                Box::new(HeuristicDelegate)
            } else {
                match seed {
                    Some(s) => Box::new(RandomDelegate::seeded(s ^ ((seat as u64 + 1) << 32))),
                    None => Box::new(RandomDelegate::new()),
                }
            }
        })
        .collect();

    let mut record = GameRecord {
        game_id,
        players,
        winner: None,
        turns: 0,
        rolls: 0,
        moves: 0,
        captures: 0,
        forfeits: 0,
        history_len: 0,
    };

    while !engine.is_over() && engine.state().turn_number <= config.max_turns {
        let seat = engine.state().current_player_index;
        let turn = engine.play_delegate_turn(delegates[seat].as_mut());
        if turn.roll.value().is_some() {
            record.rolls += 1;
        }
        if let RollOutcome::Forfeited { .. } = turn.roll {
            record.forfeits += 1;
        }
        if let Some(outcome) = turn.outcome {
            record.moves += 1;
            if outcome.capture.is_some() {
                record.captures += 1;
            }
        }
    }

    let state = engine.state();
    record.winner = state.winner.as_ref().map(|p| p.color);
    record.turns = state.turn_number.min(config.max_turns);
    record.history_len = state.history.len();
    Ok(record)
}

/// Runs self-play generation, producing multiple game records ordered by id.
///
/// When `config.threads > 1`, games are played concurrently using rayon.
pub fn run_self_play(config: &SelfPlayConfig) -> Result<Vec<GameRecord>, ConfigError> {
    let mut games = Vec::with_capacity(config.num_games);
    run_self_play_with_callback(config, |game| games.push(game))?;
    games.sort_by_key(|g| g.game_id);
    Ok(games)
}

/// Runs self-play generation, calling `on_game` with each completed game record.
pub fn run_self_play_with_callback<F>(
    config: &SelfPlayConfig,
    on_game: F,
) -> Result<(), ConfigError>
where
    F: FnMut(GameRecord) + Send,
{
    if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&config.players) {
        return Err(ConfigError::WrongPlayerCount(config.players));
    }

    if config.threads > 1 {
        run_self_play_parallel(config, on_game);
    } else {
        run_self_play_sequential(config, on_game);
    }
    Ok(())
}

fn report(config: &SelfPlayConfig, n: usize, game: &GameRecord, start: Instant) {
    if config.quiet {
        return;
    }
    let outcome = match game.winner {
        Some(w) => format!("{} wins", w),
        None => "no winner".to_string(),
    };
    log::info!(
        "Game {}/{}: {} after {} turns ({:.1}ms)",
        n,
        config.num_games,
        outcome,
        game.turns,
        start.elapsed().as_secs_f64() * 1000.0,
    );
}

/// Sequential self-play: plays games one at a time.
fn run_self_play_sequential<F>(config: &SelfPlayConfig, mut on_game: F)
where
    F: FnMut(GameRecord),
{
    for i in 0..config.num_games {
        let start = Instant::now();
        match play_game(config, i) {
            Ok(game) => {
                report(config, i + 1, &game, start);
                on_game(game);
            }
            Err(e) => log::error!("game {} not played: {}", i, e),
        }
    }
}

/// Parallel self-play: plays games concurrently using rayon.
/// Uses a channel to deliver completed games to the callback from worker threads.
fn run_self_play_parallel<F>(config: &SelfPlayConfig, mut on_game: F)
where
    F: FnMut(GameRecord) + Send,
{
    use rayon::prelude::*;
    use std::sync::mpsc;

    let pool = match rayon::ThreadPoolBuilder::new().num_threads(config.threads).build() {
        Ok(pool) => pool,
        Err(e) => {
            log::warn!("thread pool unavailable ({}), playing sequentially", e);
            return run_self_play_sequential(config, on_game);
        }
    };

    let completed = AtomicUsize::new(0);
    let (tx, rx) = mpsc::channel::<GameRecord>();

    std::thread::scope(|scope| {
        scope.spawn(|| {
            pool.install(|| {
                (0..config.num_games).into_par_iter().for_each_with(tx, |tx, i| {
                    let start = Instant::now();
                    match play_game(config, i) {
                        Ok(game) => {
                            let n = completed.fetch_add(1, Ordering::Relaxed) + 1;
                            report(config, n, &game, start);
                            let _ = tx.send(game);
                        }
                        Err(e) => log::error!("game {} not played: {}", i, e),
                    }
                });
            });
        });

        // Receive completed games on this thread and pass to callback.
        for game in rx {
            on_game(game);
        }
    });
}

/// Writes game records as JSONL (one JSON object per game, one per line).
pub fn write_jsonl<W: Write>(games: &[GameRecord], out: &mut W) -> std::io::Result<()> {
    for game in games {
        serde_json::to_writer(&mut *out, game)?;
        writeln!(out)?;
    }
    out.flush()
}

/// Logs a summary of self-play results: wins per color and average length.
pub fn print_summary(games: &[GameRecord]) {
    if games.is_empty() {
        return;
    }

    let mut wins = [0usize; COLOR_COUNT];
    let mut unfinished = 0;
    for game in games {
        match game.winner {
            Some(c) => wins[c as usize] += 1,
            None => unfinished += 1,
        }
    }

    log::info!("--- Summary ---");
    for color in ALL_COLORS {
        if wins[color as usize] > 0 {
            log::info!("  {:>6}: {} wins", color.name(), wins[color as usize]);
        }
    }
    if unfinished > 0 {
        log::info!("  no winner: {}", unfinished);
    }

    let n = games.len() as f64;
    let avg_turns = games.iter().map(|g| g.turns as f64).sum::<f64>() / n;
    let avg_captures = games.iter().map(|g| g.captures as f64).sum::<f64>() / n;
    log::info!("  avg turns: {:.1}, avg captures: {:.1}", avg_turns, avg_captures);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(num_games: usize, threads: usize) -> SelfPlayConfig {
        SelfPlayConfig { num_games, threads, seed: 17, quiet: true, ..SelfPlayConfig::default() }
    }

    #[test]
    fn seat_colors_for_each_table_size() {
        assert_eq!(seat_colors(2), vec![PlayerColor::Red, PlayerColor::Yellow]);
        assert_eq!(seat_colors(3).len(), 3);
        assert_eq!(seat_colors(4), ALL_COLORS.to_vec());
    }

    #[test]
    fn games_finish_with_a_winner() {
        let games = run_self_play(&seeded(3, 1)).unwrap();
        assert_eq!(games.len(), 3);
        for game in &games {
            assert!(game.winner.is_some(), "game {} had no winner", game.game_id);
            assert!(game.moves > 0);
            assert!(game.rolls >= game.moves);
        }
    }

    #[test]
    fn parallel_matches_sequential_for_fixed_seed() {
        let sequential = run_self_play(&seeded(4, 1)).unwrap();
        let parallel = run_self_play(&seeded(4, 3)).unwrap();
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn turn_cap_stops_games() {
        let config = SelfPlayConfig { max_turns: 5, ..seeded(2, 1) };
        for game in run_self_play(&config).unwrap() {
            assert!(game.winner.is_none());
            assert!(game.turns <= 5);
        }
    }

    #[test]
    fn random_seats_still_finish() {
        let config = SelfPlayConfig { players: 2, random_seats: 1, ..seeded(2, 1) };
        let games = run_self_play(&config).unwrap();
        assert!(games.iter().all(|g| g.winner.is_some()));
    }

    #[test]
    fn bad_player_count_is_rejected() {
        let config = SelfPlayConfig { players: 1, ..seeded(1, 1) };
        assert!(matches!(run_self_play(&config), Err(ConfigError::WrongPlayerCount(1))));
        let config = SelfPlayConfig { players: 5, ..seeded(1, 1) };
        assert!(matches!(run_self_play(&config), Err(ConfigError::WrongPlayerCount(5))));
    }

    #[test]
    fn jsonl_has_one_object_per_line() {
        let games = run_self_play(&seeded(2, 1)).unwrap();
        let mut out = Vec::new();
        write_jsonl(&games, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["game_id"], 0);
        assert_eq!(first["players"].as_array().unwrap().len(), 4);
    }
}
