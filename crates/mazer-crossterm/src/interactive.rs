//! Interactive terminal session: raw-mode setup and the key loop.

use std::io::{self, Stdout};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{self, ClearType},
};
use rand::Rng;

use mazer_core::Dir;
use mazer_engine::{Engine, EngineError, Strategy};

use crate::observer::TermObserver;
use crate::text::{maze_size, summary};

/// Upper bound for the step delay adjusted from the keyboard.
pub const MAX_STEP_DELAY_MS: u64 = 400;
/// Step delay change per `+`/`-` key press.
pub const STEP_DELAY_INCREMENT_MS: u64 = 25;

const HELP: &str = concat!(
    "g generate  r reset  d/a/b Dijkstra/A*/BFS  p avatar  ",
    "arrows move  e markers  +/- pace  q quit"
);

/// A user request read from the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Generate,
    Reset,
    Search(Strategy),
    SpawnAvatar,
    Move(Dir),
    ToggleMarkers,
    /// Shorter pauses between steps.
    Faster,
    /// Longer pauses between steps.
    Slower,
    Quit,
}

/// Map a key press to a command.
pub fn command_for(key: KeyEvent) -> Option<Command> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Command::Quit),
            _ => None,
        };
    }
    let cmd = match key.code {
        KeyCode::Char('g') => Command::Generate,
        KeyCode::Char('r') => Command::Reset,
        KeyCode::Char('d') => Command::Search(Strategy::Dijkstra),
        KeyCode::Char('a') => Command::Search(Strategy::Astar),
        KeyCode::Char('b') => Command::Search(Strategy::Bfs),
        KeyCode::Char('p') => Command::SpawnAvatar,
        KeyCode::Char('e') => Command::ToggleMarkers,
        KeyCode::Char('+') | KeyCode::Char('=') => Command::Faster,
        KeyCode::Char('-') => Command::Slower,
        KeyCode::Up => Command::Move(Dir::Up),
        KeyCode::Down => Command::Move(Dir::Down),
        KeyCode::Left => Command::Move(Dir::Left),
        KeyCode::Right => Command::Move(Dir::Right),
        KeyCode::Char('q') | KeyCode::Esc => Command::Quit,
        _ => return None,
    };
    Some(cmd)
}

/// Raw-mode terminal on the alternate screen. Restored on [`close`] or
/// drop.
///
/// [`close`]: Terminal::close
pub struct Terminal {
    active: bool,
}

impl Terminal {
    pub fn init() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(ClearType::All)
        )?;
        Ok(Self { active: true })
    }

    pub fn close(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        let mut stdout = io::stdout();
        let _ = execute!(stdout, cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        self.close();
    }
}

/// Check that a `rows × columns` maze and the two status lines below it fit
/// in a terminal of `size` (columns, lines). Returns the maze height in
/// lines.
pub fn fit_terminal(rows: i32, columns: i32, size: (u16, u16)) -> io::Result<u16> {
    let (term_w, term_h) = size;
    match maze_size(rows, columns) {
        Some((w, h)) if w <= term_w && u32::from(h) + 3 <= u32::from(term_h) => Ok(h),
        _ => Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("maze of {rows}x{columns} does not fit in a {term_w}x{term_h} terminal"),
        )),
    }
}

/// Run the interactive session until the user quits.
///
/// The maze must fit the current terminal; see [`fit_terminal`].
pub fn run_interactive<R: Rng>(engine: &mut Engine<R>) -> io::Result<()> {
    let height = fit_terminal(
        engine.grid().rows(),
        engine.grid().columns(),
        terminal::size()?,
    )?;
    let mut term = Terminal::init()?;
    let res = key_loop(engine, height);
    term.close();
    res
}

fn key_loop<R: Rng>(engine: &mut Engine<R>, height: u16) -> io::Result<()> {
    let mut obs: TermObserver<Stdout> = TermObserver::new(io::stdout(), engine.cancel_handle());
    obs.draw_grid(engine.grid())?;
    let mut status = String::from("press g to generate a maze");

    loop {
        obs.status_line(height + 1, &status)?;
        obs.status_line(
            height + 2,
            &format!("delay {} ms | {HELP}", engine.step_delay()),
        )?;
        obs.flush()?;

        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        let Some(cmd) = command_for(key) else {
            continue;
        };
        log::trace!("command {cmd:?}");

        status = match cmd {
            Command::Quit => return Ok(()),
            Command::Generate => describe(engine.generate(&mut obs).map(|out| {
                if out.cancelled {
                    "generation cancelled".to_string()
                } else {
                    format!("carved {} passages in {} steps", out.links, out.steps)
                }
            })),
            Command::Reset => describe(engine.reset(&mut obs).map(|()| "maze reset".to_string())),
            Command::Search(strategy) => {
                describe(engine.search(strategy, &mut obs).map(|out| summary(&out)))
            }
            Command::SpawnAvatar => describe(
                engine
                    .spawn_avatar(&mut obs)
                    .map(|pos| format!("avatar at {pos}")),
            ),
            Command::Move(dir) => describe(engine.move_avatar(dir, &mut obs).map(|moved| {
                if moved {
                    format!("moved {dir}")
                } else {
                    format!("wall {dir}")
                }
            })),
            Command::ToggleMarkers => {
                if engine.toggle_markers(&mut obs) {
                    "entry and exit shown".to_string()
                } else {
                    "entry and exit hidden".to_string()
                }
            }
            Command::Faster => {
                let d = engine.step_delay().saturating_sub(STEP_DELAY_INCREMENT_MS);
                engine.set_step_delay(d);
                format!("step delay {d} ms")
            }
            Command::Slower => {
                let d = (engine.step_delay() + STEP_DELAY_INCREMENT_MS).min(MAX_STEP_DELAY_MS);
                engine.set_step_delay(d);
                format!("step delay {d} ms")
            }
        };

        if let Some(e) = obs.take_error() {
            return Err(e);
        }
    }
}

fn describe(res: Result<String, EngineError>) -> String {
    res.unwrap_or_else(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn keys_map_to_commands() {
        assert_eq!(command_for(key(KeyCode::Char('g'))), Some(Command::Generate));
        assert_eq!(
            command_for(key(KeyCode::Char('a'))),
            Some(Command::Search(Strategy::Astar))
        );
        assert_eq!(
            command_for(key(KeyCode::Char('b'))),
            Some(Command::Search(Strategy::Bfs))
        );
        assert_eq!(command_for(key(KeyCode::Left)), Some(Command::Move(Dir::Left)));
        assert_eq!(command_for(key(KeyCode::Esc)), Some(Command::Quit));
        assert_eq!(command_for(key(KeyCode::Char('+'))), Some(Command::Faster));
        assert_eq!(command_for(key(KeyCode::Char('x'))), None);
    }

    #[test]
    fn ctrl_c_quits() {
        let ev = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(command_for(ev), Some(Command::Quit));
        let ev = KeyEvent::new(KeyCode::Char('g'), KeyModifiers::CONTROL);
        assert_eq!(command_for(ev), None);
    }

    #[test]
    fn rejections_become_status_text() {
        assert_eq!(
            describe(Err(EngineError::NotGenerated)),
            "the maze has not been generated"
        );
        assert_eq!(describe(Ok("fine".into())), "fine");
    }

    #[test]
    fn maze_must_fit_terminal() {
        assert_eq!(fit_terminal(10, 10, (80, 24)).unwrap(), 21);
        assert_eq!(fit_terminal(10, 10, (41, 24)).unwrap(), 21);
        assert!(fit_terminal(10, 10, (40, 24)).is_err());
        assert!(fit_terminal(10, 10, (80, 23)).is_err());
        let err = fit_terminal(1, 16384, (u16::MAX, u16::MAX)).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        assert_eq!(
            err.to_string(),
            "maze of 1x16384 does not fit in a 65535x65535 terminal"
        );
        assert!(fit_terminal(32767, 1, (u16::MAX, u16::MAX)).is_err());
    }
}
