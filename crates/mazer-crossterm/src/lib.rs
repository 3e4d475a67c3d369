//! Crossterm front end for mazer.
//!
//! - [`TermObserver`] paints engine steps onto the terminal as they happen
//! - [`render_text`] draws a maze snapshot as plain text
//! - [`run_interactive`] drives an [`Engine`](mazer_engine::Engine) from the
//!   keyboard

pub mod interactive;
pub mod observer;
pub mod text;

pub use interactive::{Command, Terminal, command_for, fit_terminal, run_interactive};
pub use observer::{TermObserver, tag_color};
pub use text::{interior, maze_size, render_text, summary};
