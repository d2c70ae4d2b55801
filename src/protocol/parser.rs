//! Command parser.
//!
//! Parses incoming protocol lines from raw text into structured `Command`
//! variants that the session loop can dispatch on.

use crate::board::{TokenId, TokenPosition};

use super::notation::{parse_move as parse_move_notation, parse_token_id};

/// A parsed client-to-engine command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Synchronization ping; engine must reply `readyok`.
    IsReady,

    /// Set an engine option: `setoption name <id> [value <x>]`.
    SetOption { name: String, value: Option<String> },

    /// Start a game with the given `<kind>:<color>[:<name>]` seat specs.
    NewGame { seats: Vec<String> },

    /// Roll the die for the current player.
    Roll,

    /// Move one of the current player's tokens by id, optionally naming the
    /// destination as printed by `moves`.
    Move { token: TokenId, to: Option<TokenPosition> },

    /// List the pending legal moves.
    Moves,

    /// Print the board snapshot as JSON.
    Board,

    /// Print the whole game log.
    History,

    /// Print the win standings.
    Leaderboard,

    /// Reset the current game.
    Restart,

    /// Terminate the engine process.
    Quit,
}

/// Parses a single line of input into a `Command`.
///
/// Returns `None` for empty lines or unrecognized commands. Malformed
/// arguments for known commands also return `None` after logging a warning.
pub fn parse_command(line: &str) -> Option<Command> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let (&head, args) = tokens.split_first()?;

    match head {
        "isready" => Some(Command::IsReady),
        "roll" => Some(Command::Roll),
        "moves" => Some(Command::Moves),
        "board" => Some(Command::Board),
        "history" => Some(Command::History),
        "leaderboard" => Some(Command::Leaderboard),
        "restart" => Some(Command::Restart),
        "quit" => Some(Command::Quit),

        "setoption" => parse_setoption(args),
        "newgame" => parse_newgame(args),
        "move" => parse_move(args),

        other => {
            log::warn!("unknown command: {}", other);
            None
        }
    }
}

/// Parses `setoption name <id> [value <x>]`.
fn parse_setoption(args: &[&str]) -> Option<Command> {
    if args.len() < 2 || args[0] != "name" {
        log::warn!("malformed setoption: expected 'setoption name <id> [value <x>]'");
        return None;
    }

    let (name_parts, value_parts) = match args.iter().position(|&t| t == "value") {
        Some(vi) => (&args[1..vi], Some(&args[vi + 1..])),
        None => (&args[1..], None),
    };
    if name_parts.is_empty() {
        log::warn!("malformed setoption: empty name");
        return None;
    }
    let value = value_parts.filter(|v| !v.is_empty()).map(|v| v.join(" "));

    Some(Command::SetOption { name: name_parts.join(" "), value })
}

/// Parses `newgame <seat> <seat> ...`.
fn parse_newgame(args: &[&str]) -> Option<Command> {
    if args.is_empty() {
        log::warn!("malformed newgame: expected 'newgame <kind>:<color>[:<name>] ...'");
        return None;
    }
    let seats = args.iter().map(|s| s.to_string()).collect();
    Some(Command::NewGame { seats })
}

/// Parses `move <token_id> [<position>]`.
fn parse_move(args: &[&str]) -> Option<Command> {
    let parsed = match args {
        [] => {
            log::warn!("malformed move: expected 'move <token_id> [<position>]'");
            return None;
        }
        [raw] => parse_token_id(raw).map(|token| Command::Move { token, to: None }),
        _ => parse_move_notation(&args.join(" "))
            .map(|mv| Command::Move { token: mv.token_id, to: Some(mv.new_position) }),
    };
    match parsed {
        Ok(cmd) => Some(cmd),
        Err(e) => {
            log::warn!("malformed move: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_bare_commands() {
        assert_eq!(parse_command("isready"), Some(Command::IsReady));
        assert_eq!(parse_command("roll"), Some(Command::Roll));
        assert_eq!(parse_command("moves"), Some(Command::Moves));
        assert_eq!(parse_command("board"), Some(Command::Board));
        assert_eq!(parse_command("history"), Some(Command::History));
        assert_eq!(parse_command("leaderboard"), Some(Command::Leaderboard));
        assert_eq!(parse_command("restart"), Some(Command::Restart));
        assert_eq!(parse_command("  quit  "), Some(Command::Quit));
    }

    #[test]
    fn parse_empty_line_returns_none() {
        assert_eq!(parse_command(""), None);
        assert_eq!(parse_command("  "), None);
        assert_eq!(parse_command("\t"), None);
    }

    #[test]
    fn parse_unknown_command_returns_none() {
        assert_eq!(parse_command("castle"), None);
    }

    #[test]
    fn parse_setoption_with_value() {
        let cmd = parse_command("setoption name Seed value 42").unwrap();
        assert_eq!(
            cmd,
            Command::SetOption { name: "Seed".to_string(), value: Some("42".to_string()) }
        );
    }

    #[test]
    fn parse_setoption_no_value() {
        let cmd = parse_command("setoption name Fallback").unwrap();
        assert_eq!(cmd, Command::SetOption { name: "Fallback".to_string(), value: None });
        let cmd = parse_command("setoption name Fallback value").unwrap();
        assert_eq!(cmd, Command::SetOption { name: "Fallback".to_string(), value: None });
    }

    #[test]
    fn parse_setoption_malformed_returns_none() {
        assert_eq!(parse_command("setoption"), None);
        assert_eq!(parse_command("setoption Seed 4"), None);
        assert_eq!(parse_command("setoption name value 4"), None);
    }

    #[test]
    fn parse_newgame_keeps_seat_specs() {
        let cmd = parse_command("newgame human:red:Alice ai:yellow").unwrap();
        assert_eq!(
            cmd,
            Command::NewGame { seats: vec!["human:red:Alice".into(), "ai:yellow".into()] }
        );
        assert_eq!(parse_command("newgame"), None);
    }

    #[test]
    fn parse_move_token() {
        assert_eq!(parse_command("move 5"), Some(Command::Move { token: TokenId(5), to: None }));
        assert_eq!(parse_command("move"), None);
        assert_eq!(parse_command("move five"), None);
    }

    #[test]
    fn parse_move_with_destination() {
        assert_eq!(
            parse_command("move 5 home-stretch 2"),
            Some(Command::Move { token: TokenId(5), to: Some(TokenPosition::HomeStretch(2)) })
        );
        assert_eq!(parse_command("move 5 track 60"), None);
        assert_eq!(parse_command("move 5 track"), None);
    }
}
