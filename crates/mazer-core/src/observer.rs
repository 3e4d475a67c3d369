//! Step observation: how the engine reports what it is doing.
//!
//! Generation and search never draw. They report semantic cell states
//! ([`VisualTag`]), wall changes, and a pacing request after every step to a
//! [`StepObserver`]. Front-ends decide what a tag looks like and whether a
//! pacing request is a real sleep, a key-polling wait, or nothing at all.

use std::time::Duration;

use crate::cell::Borders;
use crate::geom::Pos;

/// Semantic state of a cell, as reported to observers.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VisualTag {
    /// Nothing notable.
    #[default]
    Default,
    /// The cell currently being processed (top of the carving stack,
    /// search seed, entry marker).
    FrontierActive,
    /// A cell discovered but not yet processed.
    FrontierCandidate,
    /// A processed cell.
    Visited,
    /// Part of a reconstructed path.
    PathMarked,
    /// Currently occupied by the avatar.
    OccupiedByAvatar,
}

/// Receiver of engine step notifications.
///
/// All methods default to no-ops, so an observer only implements what it
/// cares about.
pub trait StepObserver {
    /// A cell changed its semantic state.
    fn on_cell_state_changed(&mut self, _pos: Pos, _tag: VisualTag) {}

    /// A cell's walls changed. `borders` is the full new wall set.
    fn on_border_state_changed(&mut self, _pos: Pos, _borders: Borders) {}

    /// The engine finished a step and asks to be paused for `millis`.
    fn on_step_delay(&mut self, _millis: u64) {}
}

impl<T: StepObserver + ?Sized> StepObserver for &mut T {
    fn on_cell_state_changed(&mut self, pos: Pos, tag: VisualTag) {
        (**self).on_cell_state_changed(pos, tag);
    }

    fn on_border_state_changed(&mut self, pos: Pos, borders: Borders) {
        (**self).on_border_state_changed(pos, borders);
    }

    fn on_step_delay(&mut self, millis: u64) {
        (**self).on_step_delay(millis);
    }
}

// ---------------------------------------------------------------------------
// Stock observers
// ---------------------------------------------------------------------------

/// Ignores everything. Used for headless runs and tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl StepObserver for NullObserver {}

/// Sleeps on every pacing request and ignores the rest.
#[derive(Debug, Default, Clone, Copy)]
pub struct Pacer;

impl StepObserver for Pacer {
    fn on_step_delay(&mut self, millis: u64) {
        if millis > 0 {
            std::thread::sleep(Duration::from_millis(millis));
        }
    }
}

/// A single recorded notification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepEvent {
    Cell { pos: Pos, tag: VisualTag },
    Border { pos: Pos, borders: Borders },
    Delay(u64),
}

/// Records every notification in order, without sleeping.
#[derive(Debug, Default, Clone)]
pub struct Recorder {
    pub events: Vec<StepEvent>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of pacing requests seen.
    pub fn steps(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, StepEvent::Delay(_)))
            .count()
    }

    /// Positions tagged with `tag`, in notification order.
    pub fn tagged(&self, tag: VisualTag) -> Vec<Pos> {
        self.events
            .iter()
            .filter_map(|e| match e {
                StepEvent::Cell { pos, tag: t } if *t == tag => Some(*pos),
                _ => None,
            })
            .collect()
    }

    /// The last tag reported for `pos`, if any.
    pub fn last_tag(&self, pos: Pos) -> Option<VisualTag> {
        self.events.iter().rev().find_map(|e| match e {
            StepEvent::Cell { pos: p, tag } if *p == pos => Some(*tag),
            _ => None,
        })
    }
}

impl StepObserver for Recorder {
    fn on_cell_state_changed(&mut self, pos: Pos, tag: VisualTag) {
        self.events.push(StepEvent::Cell { pos, tag });
    }

    fn on_border_state_changed(&mut self, pos: Pos, borders: Borders) {
        self.events.push(StepEvent::Border { pos, borders });
    }

    fn on_step_delay(&mut self, millis: u64) {
        self.events.push(StepEvent::Delay(millis));
    }
}
