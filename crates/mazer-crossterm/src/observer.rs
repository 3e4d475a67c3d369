//! [`TermObserver`]: draws engine steps straight onto the terminal.

use std::io::{self, Write};
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEventKind},
    queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};

use mazer_core::{Borders, Context, Grid, Pos, StepObserver, VisualTag};

use crate::text::{CELL_HEIGHT, CELL_WIDTH, interior, maze_size};

/// Background colour used for a cell state.
pub fn tag_color(tag: VisualTag) -> Color {
    match tag {
        VisualTag::Default => Color::Reset,
        VisualTag::FrontierActive => Color::Red,
        VisualTag::FrontierCandidate => Color::Green,
        VisualTag::Visited => Color::Blue,
        VisualTag::PathMarked => Color::Yellow,
        VisualTag::OccupiedByAvatar => Color::White,
    }
}

/// A step observer that paints onto a crossterm-compatible writer.
///
/// Pacing waits on the keyboard: `q` or `Esc` during a pause cancels the
/// current run through the observer's [`Context`].
///
/// Observer callbacks cannot fail, so the first write error is kept and can
/// be collected with [`take_error`](Self::take_error).
pub struct TermObserver<W: Write> {
    out: W,
    ctx: Context,
    origin: (u16, u16),
    error: Option<io::Error>,
}

impl<W: Write> TermObserver<W> {
    pub fn new(out: W, ctx: Context) -> Self {
        Self {
            out,
            ctx,
            origin: (0, 0),
            error: None,
        }
    }

    /// Draw the maze with its top-left corner at screen `(x, y)`.
    pub fn with_origin(mut self, x: u16, y: u16) -> Self {
        self.origin = (x, y);
        self
    }

    /// Screen position of the first interior character of `pos`.
    fn screen(&self, pos: Pos) -> io::Result<(u16, u16)> {
        let (x, y) = interior(pos).ok_or_else(|| off_screen(format!("cell {pos}")))?;
        match (self.origin.0.checked_add(x), self.origin.1.checked_add(y)) {
            (Some(x), Some(y)) => Ok((x, y)),
            _ => Err(off_screen(format!("cell {pos}"))),
        }
    }

    /// Clear the screen and draw every cell of `grid`.
    ///
    /// Fails with [`io::ErrorKind::InvalidInput`] if the maze does not fit in
    /// screen coordinates at this origin.
    pub fn draw_grid(&mut self, grid: &Grid) -> io::Result<()> {
        let (w, h) = maze_size(grid.rows(), grid.columns())
            .filter(|&(w, h)| {
                self.origin.0.checked_add(w - 1).is_some()
                    && self.origin.1.checked_add(h - 1).is_some()
            })
            .ok_or_else(|| off_screen(format!("maze of {}x{}", grid.rows(), grid.columns())))?;
        queue!(self.out, terminal::Clear(ClearType::All))?;
        for dy in (0..h).step_by(CELL_HEIGHT as usize) {
            for dx in (0..w).step_by(CELL_WIDTH as usize) {
                let (x, y) = (self.origin.0 + dx, self.origin.1 + dy);
                queue!(self.out, cursor::MoveTo(x, y), Print('+'))?;
            }
        }
        for c in grid.iter() {
            self.draw_borders(c.pos(), c.borders())?;
            self.draw_cell(c.pos(), VisualTag::Default)?;
        }
        self.out.flush()
    }

    /// Write `text` on screen line `y` below the maze, replacing what was
    /// there.
    pub fn status_line(&mut self, y: u16, text: &str) -> io::Result<()> {
        queue!(
            self.out,
            cursor::MoveTo(self.origin.0, y),
            terminal::Clear(ClearType::CurrentLine),
            Print(text)
        )
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    /// Return the first error hit inside an observer callback, if any.
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }

    /// The underlying writer.
    pub fn get_ref(&self) -> &W {
        &self.out
    }

    fn draw_cell(&mut self, pos: Pos, tag: VisualTag) -> io::Result<()> {
        let (x, y) = self.screen(pos)?;
        let body = if tag == VisualTag::OccupiedByAvatar {
            " @ "
        } else {
            "   "
        };
        queue!(
            self.out,
            cursor::MoveTo(x, y),
            SetBackgroundColor(tag_color(tag)),
            SetForegroundColor(Color::Black),
            Print(body),
            ResetColor
        )
    }

    fn draw_borders(&mut self, pos: Pos, b: Borders) -> io::Result<()> {
        let (x, y) = self.screen(pos)?;
        let (Some(right), Some(below)) = (x.checked_add(CELL_WIDTH - 1), y.checked_add(1)) else {
            return Err(off_screen(format!("cell {pos}")));
        };
        let horizontal = |wall: bool| if wall { "---" } else { "   " };
        let vertical = |wall: bool| if wall { '|' } else { ' ' };
        queue!(
            self.out,
            cursor::MoveTo(x, y - 1),
            Print(horizontal(b.up)),
            cursor::MoveTo(x, below),
            Print(horizontal(b.down)),
            cursor::MoveTo(x - 1, y),
            Print(vertical(b.left)),
            cursor::MoveTo(right, y),
            Print(vertical(b.right))
        )
    }

    /// Wait up to `millis`, cancelling the run if `q` or `Esc` is pressed.
    fn wait(&mut self, millis: u64) -> io::Result<()> {
        self.out.flush()?;
        let deadline = Instant::now() + Duration::from_millis(millis);
        loop {
            let left = deadline.saturating_duration_since(Instant::now());
            if !event::poll(left)? {
                return Ok(());
            }
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press
                    && matches!(key.code, KeyCode::Char('q') | KeyCode::Esc)
                {
                    log::debug!("run cancelled from the keyboard");
                    self.ctx.cancel();
                    return Ok(());
                }
            }
            if left.is_zero() {
                return Ok(());
            }
        }
    }

    fn keep(&mut self, res: io::Result<()>) {
        if let Err(e) = res {
            log::warn!("terminal write failed: {e}");
            if self.error.is_none() {
                self.error = Some(e);
            }
        }
    }
}

fn off_screen(what: String) -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidInput,
        format!("{what} does not fit on screen"),
    )
}

impl<W: Write> StepObserver for TermObserver<W> {
    fn on_cell_state_changed(&mut self, pos: Pos, tag: VisualTag) {
        let res = self.draw_cell(pos, tag);
        self.keep(res);
    }

    fn on_border_state_changed(&mut self, pos: Pos, borders: Borders) {
        let res = self.draw_borders(pos, borders);
        self.keep(res);
    }

    fn on_step_delay(&mut self, millis: u64) {
        let res = self.wait(millis);
        self.keep(res);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn observer() -> TermObserver<Vec<u8>> {
        TermObserver::new(Vec::new(), Context::new())
    }

    fn written(obs: &TermObserver<Vec<u8>>) -> String {
        String::from_utf8_lossy(obs.get_ref()).into_owned()
    }

    #[test]
    fn colours() {
        assert_eq!(tag_color(VisualTag::Default), Color::Reset);
        assert_eq!(tag_color(VisualTag::FrontierActive), Color::Red);
        assert_eq!(tag_color(VisualTag::FrontierCandidate), Color::Green);
        assert_eq!(tag_color(VisualTag::Visited), Color::Blue);
    }

    #[test]
    fn avatar_is_drawn() {
        let mut obs = observer();
        obs.on_cell_state_changed(Pos::new(1, 1), VisualTag::OccupiedByAvatar);
        assert!(written(&obs).contains(" @ "));
        assert!(obs.take_error().is_none());
    }

    #[test]
    fn borders_are_drawn() {
        let mut obs = observer().with_origin(2, 1);
        let mut b = Borders::WALLED;
        b.right = false;
        obs.on_border_state_changed(Pos::ZERO, b);
        let out = written(&obs);
        assert_eq!(out.matches("---").count(), 2);
        assert_eq!(out.matches('|').count(), 1);
    }

    #[test]
    fn full_frame() {
        let grid = Grid::new(2, 3).unwrap();
        let mut obs = observer();
        obs.draw_grid(&grid).unwrap();
        let out = written(&obs);
        assert_eq!(out.matches('+').count(), 3 * 4);
        assert_eq!(out.matches("---").count(), 2 * 2 * 3);
    }

    #[test]
    fn oversized_grid_is_refused() {
        let grid = Grid::new(1, 16384).unwrap();
        let mut obs = observer();
        let err = obs.draw_grid(&grid).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        assert!(obs.get_ref().is_empty());

        let grid = Grid::new(2, 3).unwrap();
        let mut obs = observer().with_origin(u16::MAX - 12, 0);
        assert!(obs.draw_grid(&grid).is_ok());
        let mut obs = observer().with_origin(u16::MAX - 11, 0);
        assert!(obs.draw_grid(&grid).is_err());
    }

    #[test]
    fn off_screen_cell_keeps_error() {
        let mut obs = observer();
        obs.on_cell_state_changed(Pos::new(0, 16384), VisualTag::Visited);
        let err = obs.take_error().unwrap();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);

        let mut obs = observer().with_origin(0, u16::MAX - 1);
        obs.on_border_state_changed(Pos::ZERO, Borders::WALLED);
        assert!(obs.take_error().is_some());
        assert!(obs.get_ref().is_empty());
    }
}
