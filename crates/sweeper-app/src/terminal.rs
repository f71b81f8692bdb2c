//! Draws solver snapshots on an ANSI terminal.

use std::{
    borrow::Cow,
    io::{self, Write},
    thread,
    time::Duration,
};

use sweeper_core::{Position, Tile};
use sweeper_solver::{StateLogger, StateSnapshot};

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";
const GREEN: &str = "\x1b[32m";
const RESET: &str = "\x1b[0m";

/// A [`StateLogger`] that redraws the whole board on every snapshot.
///
/// Mines are drawn as `*`, flags as `f`, covered tiles as `O` and zero hints
/// as blanks. The tile being acted on is drawn in green.
#[derive(Debug)]
pub struct TerminalLogger<W> {
    out: W,
    delay: Duration,
}

impl<W> TerminalLogger<W>
where
    W: Write,
{
    /// Creates a logger drawing to `out`.
    pub fn new(out: W) -> Self {
        Self {
            out,
            delay: Duration::ZERO,
        }
    }

    /// Pauses for `delay` after every frame.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn draw(&mut self, frame: &str) -> io::Result<()> {
        self.out.write_all(frame.as_bytes())?;
        self.out.flush()
    }
}

impl<W> StateLogger for TerminalLogger<W>
where
    W: Write,
{
    fn log(&mut self, snapshot: &StateSnapshot<'_>) {
        if let Err(err) = self.draw(&render_frame(snapshot)) {
            log::warn!("failed to draw board: {err}");
        }
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
    }
}

/// Renders one snapshot as a full-screen frame.
#[must_use]
pub fn render_frame(snapshot: &StateSnapshot<'_>) -> String {
    let field = snapshot.state.to_field();
    let mut frame = format!("{CLEAR_SCREEN}Solve Mode in Use: {}\n\n", snapshot.mode);
    for y in 0..field.height() {
        for x in 0..field.width() {
            let pos = Position::new(x, y);
            let cell = cell(field[pos]);
            if snapshot.selected == Some(pos) {
                frame.push_str(GREEN);
                frame.push_str(&cell);
                frame.push_str(RESET);
            } else {
                frame.push_str(&cell);
            }
        }
        frame.push('\n');
    }
    frame
}

fn cell(tile: Tile) -> Cow<'static, str> {
    match tile {
        Tile::Mine => "* ".into(),
        Tile::Flag => "f ".into(),
        Tile::Covered => "O ".into(),
        Tile::Hint(0) => "  ".into(),
        Tile::Hint(n) => format!("{n} ").into(),
    }
}

#[cfg(test)]
mod tests {
    use sweeper_core::Minefield;
    use sweeper_solver::{SolveMode, SolverState};

    use super::*;

    fn state() -> SolverState {
        SolverState::new(&"01\n#f".parse::<Minefield>().unwrap()).unwrap()
    }

    #[test]
    fn test_render_frame() {
        let state = state();
        let snapshot = StateSnapshot {
            mode: SolveMode::Basic,
            selected: None,
            state: &state,
        };
        assert_eq!(
            render_frame(&snapshot),
            "\x1b[2J\x1b[HSolve Mode in Use: Basic\n\n  1 \nO f \n"
        );
    }

    #[test]
    fn test_selected_tile_is_green() {
        let state = state();
        let snapshot = StateSnapshot {
            mode: SolveMode::Probable,
            selected: Some(Position::new(0, 1)),
            state: &state,
        };
        let frame = render_frame(&snapshot);
        assert!(frame.starts_with("\x1b[2J\x1b[HSolve Mode in Use: Most probable"));
        assert!(frame.ends_with("\n  1 \n\x1b[32mO \x1b[0mf \n"));
    }

    #[test]
    fn test_logger_writes_frames() {
        let state = state();
        let snapshot = StateSnapshot {
            mode: SolveMode::Advanced,
            selected: None,
            state: &state,
        };
        let mut logger = TerminalLogger::new(Vec::new());
        logger.log(&snapshot);
        logger.log(&snapshot);
        let out = String::from_utf8(logger.into_inner()).unwrap();
        assert_eq!(out.matches(CLEAR_SCREEN).count(), 2);
        assert!(out.contains("Solve Mode in Use: Advanced"));
    }
}
