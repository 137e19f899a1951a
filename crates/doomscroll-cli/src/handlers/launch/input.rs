//! Keyboard input for the feed.
//!
//! Reads run on a dedicated thread and are forwarded over an mpsc channel so
//! the feed loop never blocks on stdin.

use std::io::{self, BufRead, IsTerminal};
use std::thread;

use console::{Key, Term};
use tokio::sync::mpsc;

use crate::error::CliError;

/// Commands the feed understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedCommand {
    Next,
    Prev,
    Like,
    Share,
    OpenProduct,
    Quit,
}

impl FeedCommand {
    /// Map a single keystroke.
    pub fn from_key(key: &Key) -> Option<Self> {
        match key {
            Key::ArrowDown => Some(Self::Next),
            Key::ArrowUp => Some(Self::Prev),
            Key::Escape | Key::CtrlC => Some(Self::Quit),
            Key::Char(c) => Self::from_char(*c),
            _ => None,
        }
    }

    /// Map one line of piped input, e.g. `j` or `quit`.
    pub fn from_line(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("exit") {
            return Some(Self::Quit);
        }
        let mut chars = line.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_char(c),
            _ => None,
        }
    }

    const fn from_char(c: char) -> Option<Self> {
        match c {
            'j' | 'J' => Some(Self::Next),
            'k' | 'K' => Some(Self::Prev),
            '1' => Some(Self::Like),
            '2' => Some(Self::Share),
            'o' | 'O' => Some(Self::OpenProduct),
            'q' | 'Q' => Some(Self::Quit),
            _ => None,
        }
    }
}

/// Key help shown when the feed starts.
pub const KEY_HELP: &str = "j/↓ next   k/↑ prev   1 like   2 share   o open product   q quit";

/// Start the input thread.
///
/// Single keystrokes are read when both stdin and stdout are terminals, one
/// command per line otherwise. The channel closes after `Quit` or end of input.
pub fn spawn_reader() -> Result<mpsc::Receiver<FeedCommand>, CliError> {
    let (tx, rx) = mpsc::channel(16);
    let interactive = reads_keystrokes(io::stdin().is_terminal(), Term::stdout().is_term());

    thread::Builder::new()
        .name("feed-input".to_string())
        .spawn(move || {
            if interactive {
                read_keys(&tx);
            } else {
                read_lines(io::stdin().lock(), &tx);
            }
        })
        .map_err(|e| CliError::Process(format!("Failed to start input thread: {e}")))?;

    tracing::debug!(interactive, "Input thread started");
    Ok(rx)
}

/// Keystrokes are read through the stdout terminal, which yields
/// `Key::Unknown` without blocking once stdout is redirected.
const fn reads_keystrokes(stdin_is_tty: bool, stdout_is_term: bool) -> bool {
    stdin_is_tty && stdout_is_term
}

fn read_keys(tx: &mpsc::Sender<FeedCommand>) {
    let term = Term::stdout();
    loop {
        let command = match term.read_key() {
            Ok(key) => FeedCommand::from_key(&key),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read key");
                Some(FeedCommand::Quit)
            }
        };
        let Some(command) = command else {
            continue;
        };
        if tx.blocking_send(command).is_err() || command == FeedCommand::Quit {
            return;
        }
    }
}

fn read_lines<R: BufRead>(reader: R, tx: &mpsc::Sender<FeedCommand>) {
    for line in reader.lines() {
        let Ok(line) = line else {
            break;
        };
        let Some(command) = FeedCommand::from_line(&line) else {
            if !line.trim().is_empty() {
                tracing::debug!(input = %line.trim(), "Ignoring unknown command");
            }
            continue;
        };
        if tx.blocking_send(command).is_err() || command == FeedCommand::Quit {
            return;
        }
    }
    // End of input closes the feed
    let _ = tx.blocking_send(FeedCommand::Quit);
}
