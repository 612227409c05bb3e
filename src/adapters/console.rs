use std::io::{BufRead, Write};
use std::time::{Duration, Instant};

use crate::{
    board::Board,
    error::{Error, Result},
    ports::{Clock, InputSource, Renderer, Sleeper},
    session::SessionEvent,
};

/// Renders the board and narrates events onto any writer, stdout in
/// practice. Write errors are swallowed: a broken terminal should not abort
/// a game the core can still finish.
pub struct ConsoleRenderer<W: Write> {
    out: W,
}

impl<W: Write> ConsoleRenderer<W> {
    pub fn new(out: W) -> Self {
        ConsoleRenderer { out }
    }

    /// One-time banner explaining the cell numbering
    pub fn print_instructions(&mut self) {
        let _ = writeln!(self.out, "Cells are numbered 1 through 9:");
        let _ = writeln!(self.out, " 1 2 3");
        let _ = writeln!(self.out, " 4 5 6");
        let _ = writeln!(self.out, " 7 8 9");
        let _ = writeln!(self.out);
    }
}

impl<W: Write> Renderer for ConsoleRenderer<W> {
    fn render(&mut self, board: &Board) {
        let _ = writeln!(self.out, "{board}");
    }

    fn announce(&mut self, event: &SessionEvent) {
        let line = match event {
            SessionEvent::ComputerPlayed { position } => {
                format!("Computer plays cell {}", position + 1)
            }
            SessionEvent::HumanPlayed { position } => {
                format!("You play cell {}", position + 1)
            }
            SessionEvent::MarkEvicted { player, position } => {
                format!("{player}'s oldest mark vanishes from cell {}", position + 1)
            }
            SessionEvent::InvalidEntry => "Enter a number from 1 to 9".to_string(),
            SessionEvent::OccupiedCell { position } => {
                format!("Cell {} is already taken", position + 1)
            }
            SessionEvent::GameOver(reason) => format!("Game over: {reason}"),
        };
        let _ = writeln!(self.out, "{line}");
    }
}

/// Reads moves as 1-based cell numbers from any buffered reader, stdin in
/// practice
pub struct ConsoleInput<R: BufRead> {
    input: R,
}

impl<R: BufRead> ConsoleInput<R> {
    pub fn new(input: R) -> Self {
        ConsoleInput { input }
    }
}

impl<R: BufRead> InputSource for ConsoleInput<R> {
    fn read_move(&mut self) -> Result<usize> {
        let mut line = String::new();
        let bytes = self.input.read_line(&mut line).map_err(|source| Error::Io {
            operation: "read move from console".to_string(),
            source,
        })?;
        if bytes == 0 {
            return Err(Error::Io {
                operation: "read move from console".to_string(),
                source: std::io::Error::new(
                    std::io::ErrorKind::UnexpectedEof,
                    "input stream closed",
                ),
            });
        }

        let trimmed = line.trim();
        let entry: usize = trimmed.parse().map_err(|_| Error::InvalidInput {
            input: trimmed.to_string(),
        })?;
        if !(1..=9).contains(&entry) {
            return Err(Error::InvalidInput {
                input: trimmed.to_string(),
            });
        }
        Ok(entry - 1)
    }
}

/// Monotonic wall clock anchored at construction time
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        SystemClock {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Blocks the current thread for real
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Player;
    use crate::session::GameOverReason;

    #[test]
    fn test_console_input_maps_one_based_entries() {
        let mut input = ConsoleInput::new(&b"1\n"[..]);
        assert_eq!(input.read_move().unwrap(), 0);

        let mut input = ConsoleInput::new(&b"  9 \n"[..]);
        assert_eq!(input.read_move().unwrap(), 8);
    }

    #[test]
    fn test_console_input_rejects_bad_entries() {
        for entry in ["0\n", "10\n", "abc\n", "\n", "-3\n"] {
            let mut input = ConsoleInput::new(entry.as_bytes());
            assert!(matches!(
                input.read_move(),
                Err(Error::InvalidInput { .. })
            ));
        }
    }

    #[test]
    fn test_console_input_reports_eof_as_io_error() {
        let mut input = ConsoleInput::new(&b""[..]);
        assert!(matches!(input.read_move(), Err(Error::Io { .. })));
    }

    #[test]
    fn test_renderer_narrates_events() {
        let mut buffer = Vec::new();
        {
            let mut renderer = ConsoleRenderer::new(&mut buffer);
            renderer.announce(&SessionEvent::ComputerPlayed { position: 4 });
            renderer.announce(&SessionEvent::MarkEvicted {
                player: Player::Human,
                position: 0,
            });
            renderer.announce(&SessionEvent::GameOver(GameOverReason::Draw));
        }
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("Computer plays cell 5"));
        assert!(text.contains("vanishes from cell 1"));
        assert!(text.contains("Game over: draw"));
    }

    #[test]
    fn test_renderer_draws_the_board() {
        let mut buffer = Vec::new();
        {
            let mut renderer = ConsoleRenderer::new(&mut buffer);
            renderer.render(&Board::from_string("X...O...X").unwrap());
        }
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains('X'));
        assert!(text.contains('O'));
    }
}
