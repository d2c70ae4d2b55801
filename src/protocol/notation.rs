//! Text notation for positions, moves, and seats.
//!
//! A position is written as its kind and index separated by a space
//! (`base 0`, `track 14`, `home-stretch 2`, `finished 3`). A move is the
//! token id followed by the destination (`5 track 30`). A seat in a
//! `newgame` command is `<kind>:<color>[:<name>]`, e.g. `human:red:Alice`.

use thiserror::Error;

use crate::board::{Move, Player, PlayerColor, PlayerKind, TokenId, TokenPosition};

/// Errors that can occur when parsing notation strings.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NotationError {
    #[error("empty input")]
    EmptyInput,

    #[error("unknown position kind '{0}'")]
    UnknownKind(String),

    #[error("invalid number '{0}'")]
    BadNumber(String),

    #[error("position '{0}' is out of range")]
    OutOfRange(TokenPosition),

    #[error("unknown color '{0}'")]
    UnknownColor(String),

    #[error("unknown player kind '{0}'")]
    UnknownPlayerKind(String),

    #[error("unexpected end of input, expected {0}")]
    UnexpectedEnd(&'static str),

    #[error("unexpected trailing input '{0}'")]
    Trailing(String),
}

fn position_from_tokens(tokens: &[&str]) -> Result<TokenPosition, NotationError> {
    let kind = *tokens.first().ok_or(NotationError::UnexpectedEnd("position kind"))?;
    let raw = *tokens.get(1).ok_or(NotationError::UnexpectedEnd("position index"))?;
    let index = parse_u8(raw)?;
    let pos = match kind {
        "base" => TokenPosition::Base(index),
        "track" => TokenPosition::Track(index),
        "home-stretch" => TokenPosition::HomeStretch(index),
        "finished" => TokenPosition::Finished(index),
        other => return Err(NotationError::UnknownKind(other.to_string())),
    };
    if !pos.is_well_formed() {
        return Err(NotationError::OutOfRange(pos));
    }
    Ok(pos)
}

/// Parses a token id.
pub fn parse_token_id(s: &str) -> Result<TokenId, NotationError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(NotationError::EmptyInput);
    }
    parse_u8(s).map(TokenId)
}

fn parse_u8(s: &str) -> Result<u8, NotationError> {
    s.parse().map_err(|_| NotationError::BadNumber(s.to_string()))
}

/// Formats a move as `<token_id> <position>`.
pub fn format_move(mv: &Move) -> String {
    format!("{} {}", mv.token_id, mv.new_position)
}

/// Formats a move list separated by ` ; `, or `none` when empty.
pub fn format_moves(moves: &[Move]) -> String {
    if moves.is_empty() {
        return "none".to_string();
    }
    moves.iter().map(format_move).collect::<Vec<_>>().join(" ; ")
}

/// Parses a move such as `5 track 30`.
pub fn parse_move(s: &str) -> Result<Move, NotationError> {
    let tokens: Vec<&str> = s.split_whitespace().collect();
    let (&id, rest) = tokens.split_first().ok_or(NotationError::EmptyInput)?;
    let token_id = parse_token_id(id)?;
    let new_position = position_from_tokens(rest)?;
    if rest.len() > 2 {
        return Err(NotationError::Trailing(rest[2..].join(" ")));
    }
    Ok(Move { token_id, new_position })
}

/// Parses a `<kind>:<color>[:<name>]` seat spec into a player with the
/// given id. Without a name, humans get `Player <id>` and AIs get
/// `AI Bot <n>`, numbered among the AI seats by `ai_ordinal`.
pub fn parse_player_spec(spec: &str, id: u32, ai_ordinal: u32) -> Result<Player, NotationError> {
    let mut parts = spec.trim().splitn(3, ':');
    let kind = match parts.next() {
        Some("") | None => return Err(NotationError::EmptyInput),
        Some(k) => PlayerKind::from_name(k)
            .ok_or_else(|| NotationError::UnknownPlayerKind(k.to_string()))?,
    };
    let color = match parts.next() {
        Some(c) => {
            PlayerColor::from_name(c).ok_or_else(|| NotationError::UnknownColor(c.to_string()))?
        }
        None => return Err(NotationError::UnexpectedEnd("color")),
    };
    let name = match parts.next() {
        Some(n) if !n.trim().is_empty() => n.replace('_', " "),
        _ => match kind {
            PlayerKind::Human => format!("Player {}", id),
            PlayerKind::Ai => format!("AI Bot {}", ai_ordinal),
        },
    };
    Ok(Player { id, kind, color, name, handle: None })
}
