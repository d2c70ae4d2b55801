//! Protocol session state.
//!
//! Holds the game in progress, the options applied to new games, and the
//! leaderboard shared by every game of the session. Each handler writes its
//! protocol response to the given writer; AI seats are played automatically
//! after every state change until a human must act or the game ends.

use std::io::{self, Write};

use crate::board::{Move, TokenId, TokenPosition, TurnState};
use crate::config::{EngineOptions, GameConfig};
use crate::delegate::HeuristicDelegate;
use crate::engine::Engine;
use crate::leaderboard::SharedLeaderboard;
use crate::protocol::notation::{format_move, format_moves, parse_player_spec};
use crate::protocol::parser::Command;

/// Holds the mutable state of the engine between commands.
pub struct Session {
    game: Option<Engine>,
    options: EngineOptions,
    leaderboard: SharedLeaderboard,
    delegate: HeuristicDelegate,
    /// Log entries already written to the client.
    printed: usize,
}

impl Default for Session {
    fn default() -> Self {
        Session::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Session {
            game: None,
            options: EngineOptions::default(),
            leaderboard: SharedLeaderboard::new(),
            delegate: HeuristicDelegate,
            printed: 0,
        }
    }

    pub fn game(&self) -> Option<&Engine> {
        self.game.as_ref()
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    pub fn leaderboard(&self) -> &SharedLeaderboard {
        &self.leaderboard
    }

    /// Dispatches one command. Returns `false` once the client asked to quit.
    pub fn handle<W: Write>(&mut self, cmd: Command, out: &mut W) -> io::Result<bool> {
        match cmd {
            Command::IsReady => writeln!(out, "readyok")?,
            Command::SetOption { name, value } => {
                self.handle_setoption(&name, value.as_deref(), out)?
            }
            Command::NewGame { seats } => self.handle_newgame(&seats, out)?,
            Command::Roll => self.handle_roll(out)?,
            Command::Move { token, to } => self.handle_move(token, to, out)?,
            Command::Moves => self.handle_moves(out)?,
            Command::Board => self.handle_board(out)?,
            Command::History => self.handle_history(out)?,
            Command::Leaderboard => self.handle_leaderboard(out)?,
            Command::Restart => self.handle_restart(out)?,
            Command::Quit => return Ok(false),
        }
        out.flush()?;
        Ok(true)
    }

    fn handle_setoption<W: Write>(
        &mut self,
        name: &str,
        value: Option<&str>,
        out: &mut W,
    ) -> io::Result<()> {
        if let Err(e) = self.options.set_option(name, value) {
            return writeln!(out, "error {}", e);
        }
        if let Some(game) = self.game.as_mut() {
            if let Err(e) = game.set_option(name, value) {
                return writeln!(out, "error {}", e);
            }
        }
        Ok(())
    }

    fn handle_newgame<W: Write>(&mut self, seats: &[String], out: &mut W) -> io::Result<()> {
        let mut players = Vec::with_capacity(seats.len());
        let mut ai_seats = 0;
        for (seat, spec) in seats.iter().enumerate() {
            match parse_player_spec(spec, seat as u32 + 1, ai_seats + 1) {
                Ok(player) => {
                    if !player.is_human() {
                        ai_seats += 1;
                    }
                    players.push(player);
                }
                Err(e) => return writeln!(out, "error {}", e),
            }
        }

        let config = match GameConfig::new(players) {
            Ok(config) => config,
            Err(e) => return writeln!(out, "error {}", e),
        };
        let engine = Engine::new(config, self.options.clone())
            .with_leaderboard(Box::new(self.leaderboard.clone()));
        self.game = Some(engine);
        self.printed = 0;
        self.advance(out)
    }

    fn handle_roll<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        let Some(game) = self.game.as_mut() else {
            return no_game(out);
        };
        game.roll();
        self.advance(out)
    }

    fn handle_move<W: Write>(
        &mut self,
        token: TokenId,
        to: Option<TokenPosition>,
        out: &mut W,
    ) -> io::Result<()> {
        let Some(game) = self.game.as_mut() else {
            return no_game(out);
        };
        match to {
            Some(to) => {
                let mv = Move::new(token, to);
                if game.apply_move(&mv).is_none() {
                    writeln!(out, "error move {} is not legal", format_move(&mv))?;
                }
            }
            None => {
                if game.move_token(token).is_none() {
                    writeln!(out, "error token {} has no legal move", token)?;
                }
            }
        }
        self.advance(out)
    }

    fn handle_restart<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        let Some(game) = self.game.as_mut() else {
            return no_game(out);
        };
        game.restart();
        self.printed = 0;
        self.advance(out)
    }

    fn handle_moves<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let Some(game) = self.game.as_ref() else {
            return no_game(out);
        };
        writeln!(out, "moves {}", format_moves(&game.state().valid_moves))
    }

    fn handle_board<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let Some(game) = self.game.as_ref() else {
            return no_game(out);
        };
        writeln!(out, "board {}", game.state().snapshot().to_json())
    }

    fn handle_history<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let Some(game) = self.game.as_ref() else {
            return no_game(out);
        };
        for entry in game.state().history.iter() {
            writeln!(out, "log {}", entry)?;
        }
        Ok(())
    }

    fn handle_leaderboard<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for (rank, entry) in self.leaderboard.standings().iter().enumerate() {
            writeln!(out, "rank {} {} {}", rank + 1, entry.name, entry.wins)?;
        }
        Ok(())
    }

    /// Lets AI seats play, then reports new log entries and the status line.
    fn advance<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        let Some(game) = self.game.as_mut() else {
            return Ok(());
        };

        while !game.is_over() && !game.current_player().is_human() {
            game.play_delegate_turn(&mut self.delegate);
        }

        let state = game.state();
        for entry in state.history.since(self.printed) {
            writeln!(out, "log {}", entry)?;
        }
        self.printed = state.history.total();

        match &state.winner {
            Some(winner) => writeln!(out, "status winner {} {}", winner.color, winner.name),
            None => {
                let player = state.current_player();
                write!(out, "status turn {} {}", player.color, state.turn_state.name())?;
                match state.dice_value {
                    Some(v) if state.turn_state == TurnState::AwaitingMove => {
                        writeln!(out, " dice {}", v)
                    }
                    _ => writeln!(out),
                }
            }
        }
    }
}

fn no_game<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "error no game in progress")
}
