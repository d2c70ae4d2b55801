//! Ludo engine speaking a line-oriented command protocol.
//!
//! This binary reads commands from stdin and writes responses to stdout.
//! Diagnostics go to stderr through `env_logger` (`RUST_LOG` sets the level).

use std::io::{self, BufRead};

use ludo::protocol::parser::parse_command;
use ludo::session::Session;

/// Runs the main protocol loop, reading commands from stdin
/// and writing responses to stdout.
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let mut session = Session::new();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };

        let cmd = match parse_command(&line) {
            Some(c) => c,
            None => continue,
        };

        match session.handle(cmd, &mut out) {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => {
                log::error!("stdout closed: {}", e);
                break;
            }
        }
    }
}
