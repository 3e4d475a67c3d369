//! The [`Engine`] session: one owned grid, one run at a time.
//!
//! Every run method takes `&mut self`, so a generation and a search can
//! never overlap on the same grid. Requests that do not fit the current
//! state (searching an uncarved maze, carving twice, spawning a second
//! avatar) are refused with an [`EngineError`] and leave the state alone.

use std::fmt;

use mazer_core::{Avatar, Context, Dir, Grid, MazeError, Pos, StepObserver, VisualTag};
use mazer_gen::{GenOutcome, MazeGen};
use mazer_paths::{PathFinder, SearchOutcome, SearchStatus, Strategy};
use rand::Rng;
use rand::rngs::StdRng;

use crate::config::EngineConfig;

/// Why an engine request was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The maze has not been carved yet.
    NotGenerated,
    /// The maze is already carved; reset it first.
    AlreadyGenerated,
    /// An avatar is already walking the maze.
    AvatarPresent,
    /// There is no avatar to move.
    NoAvatar,
    /// A structural grid error.
    Maze(MazeError),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotGenerated => f.write_str("the maze has not been generated"),
            Self::AlreadyGenerated => f.write_str("the maze is already generated"),
            Self::AvatarPresent => f.write_str("an avatar is already in the maze"),
            Self::NoAvatar => f.write_str("there is no avatar in the maze"),
            Self::Maze(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Maze(e) => Some(e),
            _ => None,
        }
    }
}

impl From<MazeError> for EngineError {
    fn from(e: MazeError) -> Self {
        Self::Maze(e)
    }
}

/// A maze session.
pub struct Engine<R: Rng = StdRng> {
    config: EngineConfig,
    grid: Grid,
    generator: MazeGen<R>,
    finder: PathFinder,
    avatar: Option<Avatar>,
    generated: bool,
    markers_shown: bool,
    last_outcome: Option<SearchOutcome>,
    ctx: Context,
}

impl Engine<StdRng> {
    /// Create an engine from `config`, seeding the carver from
    /// `config.seed` or, if unset, from the OS.
    pub fn new(config: EngineConfig) -> Result<Self, MazeError> {
        let generator = match config.seed {
            Some(seed) => MazeGen::seeded(seed),
            None => MazeGen::from_os_rng(),
        };
        Self::with_generator(config, generator)
    }
}

impl<R: Rng> Engine<R> {
    /// Create an engine carving with a caller-supplied random source.
    pub fn with_rng(config: EngineConfig, rng: R) -> Result<Self, MazeError> {
        Self::with_generator(config, MazeGen::new(rng))
    }

    fn with_generator(config: EngineConfig, generator: MazeGen<R>) -> Result<Self, MazeError> {
        config.validate()?;
        let grid = Grid::new(config.rows, config.columns)?;
        log::debug!("engine for {}x{} maze", config.rows, config.columns);
        Ok(Self {
            finder: PathFinder::with_heuristic(config.heuristic),
            config,
            grid,
            generator,
            avatar: None,
            generated: false,
            markers_shown: false,
            last_outcome: None,
            ctx: Context::new(),
        })
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[inline]
    pub fn is_generated(&self) -> bool {
        self.generated
    }

    #[inline]
    pub fn markers_shown(&self) -> bool {
        self.markers_shown
    }

    /// Position of the avatar, if one is in the maze.
    pub fn avatar(&self) -> Option<Pos> {
        self.avatar.as_ref().map(Avatar::pos)
    }

    /// Outcome of the most recent search. `None` means no search has run
    /// since the maze was last generated.
    pub fn last_outcome(&self) -> Option<&SearchOutcome> {
        self.last_outcome.as_ref()
    }

    #[inline]
    pub fn step_delay(&self) -> u64 {
        self.config.step_delay_ms
    }

    /// Change the pause between steps. Takes effect from the next run.
    pub fn set_step_delay(&mut self, millis: u64) {
        self.config.step_delay_ms = millis;
    }

    /// A handle that cancels the current run from another thread, or from
    /// inside an observer. Each run re-arms it when it starts.
    pub fn cancel_handle(&self) -> Context {
        self.ctx.clone()
    }

    // -----------------------------------------------------------------------
    // Runs
    // -----------------------------------------------------------------------

    /// Carve the maze.
    ///
    /// A cancelled carve is rolled back: the grid is re-walled and the maze
    /// stays ungenerated.
    pub fn generate(&mut self, obs: &mut impl StepObserver) -> Result<GenOutcome, EngineError> {
        if self.generated {
            log::warn!("generate ignored: maze already generated");
            return Err(EngineError::AlreadyGenerated);
        }
        self.ctx.rearm();
        let outcome = self.generator.carve(
            &mut self.grid,
            obs,
            &self.ctx,
            self.config.step_delay_ms,
        )?;
        if outcome.cancelled {
            self.grid.reset_structure();
            self.redraw(obs);
        } else {
            self.generated = true;
            self.last_outcome = None;
        }
        Ok(outcome)
    }

    /// Run a search strategy on the carved maze.
    ///
    /// The avatar, if any, is removed first and the markers are cleared.
    pub fn search(
        &mut self,
        strategy: Strategy,
        obs: &mut impl StepObserver,
    ) -> Result<SearchOutcome, EngineError> {
        if !self.generated {
            log::warn!("{strategy} ignored: maze not generated");
            return Err(EngineError::NotGenerated);
        }
        if let Some(avatar) = self.avatar.take() {
            avatar.despawn(obs);
        }
        self.markers_shown = false;
        self.ctx.rearm();
        let outcome = self.finder.run(
            strategy,
            &mut self.grid,
            obs,
            &self.ctx,
            self.config.step_delay_ms,
        );
        if outcome.status == SearchStatus::Cancelled {
            log::info!("{strategy} cancelled after {} cells", outcome.expanded);
        }
        self.last_outcome = Some(outcome.clone());
        Ok(outcome)
    }

    /// Re-wall the maze so it can be carved again.
    pub fn reset(&mut self, obs: &mut impl StepObserver) -> Result<(), EngineError> {
        if !self.generated {
            return Err(EngineError::NotGenerated);
        }
        self.grid.reset_structure();
        self.generated = false;
        self.markers_shown = false;
        self.avatar = None;
        self.last_outcome = None;
        self.redraw(obs);
        log::debug!("maze reset");
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Avatar
    // -----------------------------------------------------------------------

    /// Put an avatar on the start cell.
    pub fn spawn_avatar(&mut self, obs: &mut impl StepObserver) -> Result<Pos, EngineError> {
        if !self.generated {
            return Err(EngineError::NotGenerated);
        }
        if self.avatar.is_some() {
            return Err(EngineError::AvatarPresent);
        }
        let avatar = Avatar::spawn(self.grid.start_pos(), obs);
        let pos = avatar.pos();
        self.avatar = Some(avatar);
        Ok(pos)
    }

    /// Move the avatar one cell. Returns whether it moved.
    pub fn move_avatar(
        &mut self,
        dir: Dir,
        obs: &mut impl StepObserver,
    ) -> Result<bool, EngineError> {
        let avatar = self.avatar.as_mut().ok_or(EngineError::NoAvatar)?;
        Ok(avatar.step(&self.grid, dir, obs))
    }

    /// Remove the avatar from the maze.
    pub fn despawn_avatar(&mut self, obs: &mut impl StepObserver) -> Result<(), EngineError> {
        let avatar = self.avatar.take().ok_or(EngineError::NoAvatar)?;
        avatar.despawn(obs);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Markers
    // -----------------------------------------------------------------------

    /// Show or hide the entry and exit markers. Returns whether they are
    /// now shown.
    pub fn toggle_markers(&mut self, obs: &mut impl StepObserver) -> bool {
        self.markers_shown = !self.markers_shown;
        let (entry, exit) = if self.markers_shown {
            (VisualTag::FrontierActive, VisualTag::FrontierCandidate)
        } else {
            (VisualTag::Default, VisualTag::Default)
        };
        obs.on_cell_state_changed(self.grid.start_pos(), entry);
        obs.on_cell_state_changed(self.grid.goal_pos(), exit);
        self.markers_shown
    }

    /// Report every cell's walls and a default state.
    pub fn redraw(&self, obs: &mut impl StepObserver) {
        for c in self.grid.iter() {
            obs.on_border_state_changed(c.pos(), c.borders());
            obs.on_cell_state_changed(c.pos(), VisualTag::Default);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mazer_core::{NullObserver, Recorder, StepEvent};
    use rand::SeedableRng;

    fn engine(rows: i32, columns: i32, seed: u64) -> Engine {
        Engine::new(EngineConfig::with_size(rows, columns).step_delay(0).seed(seed)).unwrap()
    }

    #[test]
    fn rejects_bad_dimensions() {
        assert_eq!(
            Engine::new(EngineConfig::with_size(0, 3)).err(),
            Some(MazeError::InvalidDimensions { rows: 0, columns: 3 })
        );
    }

    #[test]
    fn search_before_generate_is_rejected() {
        let mut e = engine(4, 4, 1);
        assert_eq!(
            e.search(Strategy::Bfs, &mut NullObserver),
            Err(EngineError::NotGenerated)
        );
        assert!(e.last_outcome().is_none());
    }

    #[test]
    fn generate_twice_is_rejected() {
        let mut e = engine(4, 4, 1);
        let out = e.generate(&mut NullObserver).unwrap();
        assert_eq!(out.links, 15);
        assert!(e.is_generated());
        assert_eq!(e.generate(&mut NullObserver), Err(EngineError::AlreadyGenerated));
        assert_eq!(e.grid().link_count(), 15);
    }

    #[test]
    fn strategies_agree_through_the_engine() {
        let mut e = engine(12, 9, 77);
        e.generate(&mut NullObserver).unwrap();
        let lens: Vec<_> = Strategy::ALL
            .into_iter()
            .map(|s| e.search(s, &mut NullObserver).unwrap().path_len())
            .collect();
        assert!(lens[0].is_some());
        assert!(lens.iter().all(|l| *l == lens[0]));
        assert_eq!(e.last_outcome().unwrap().strategy, Strategy::Bfs);
    }

    #[test]
    fn single_cell_session() {
        let mut e = engine(1, 1, 0);
        assert_eq!(e.generate(&mut NullObserver).unwrap().links, 0);
        for s in Strategy::ALL {
            assert_eq!(e.search(s, &mut NullObserver).unwrap().path_len(), Some(0));
        }
    }

    #[test]
    fn reset_allows_regeneration() {
        let mut e = engine(5, 5, 3);
        assert_eq!(e.reset(&mut NullObserver), Err(EngineError::NotGenerated));
        e.generate(&mut NullObserver).unwrap();
        e.search(Strategy::Astar, &mut NullObserver).unwrap();
        e.spawn_avatar(&mut NullObserver).unwrap();

        let mut rec = Recorder::new();
        e.reset(&mut rec).unwrap();
        assert!(!e.is_generated());
        assert!(e.avatar().is_none());
        assert!(e.last_outcome().is_none());
        assert_eq!(e.grid().link_count(), 0);
        let borders = rec
            .events
            .iter()
            .filter(|ev| matches!(ev, StepEvent::Border { .. }))
            .count();
        assert_eq!(borders, 25);

        e.generate(&mut NullObserver).unwrap();
        assert_eq!(e.grid().link_count(), 24);
    }

    #[test]
    fn avatar_lifecycle() {
        let mut e = engine(6, 6, 12);
        assert_eq!(e.spawn_avatar(&mut NullObserver), Err(EngineError::NotGenerated));
        assert_eq!(
            e.move_avatar(Dir::Down, &mut NullObserver),
            Err(EngineError::NoAvatar)
        );
        e.generate(&mut NullObserver).unwrap();
        assert_eq!(e.spawn_avatar(&mut NullObserver), Ok(Pos::ZERO));
        assert_eq!(e.spawn_avatar(&mut NullObserver), Err(EngineError::AvatarPresent));

        // The start cell is a corner; at least one of its two walls is open.
        let moved_down = e.move_avatar(Dir::Down, &mut NullObserver).unwrap();
        let moved = moved_down || e.move_avatar(Dir::Right, &mut NullObserver).unwrap();
        assert!(moved);
        assert_ne!(e.avatar(), Some(Pos::ZERO));

        // A search removes the avatar.
        e.search(Strategy::Bfs, &mut NullObserver).unwrap();
        assert!(e.avatar().is_none());
    }

    #[test]
    fn avatar_walks_the_solution() {
        let mut e = engine(7, 7, 5);
        e.generate(&mut NullObserver).unwrap();
        let path = e.search(Strategy::Dijkstra, &mut NullObserver).unwrap().path;
        e.spawn_avatar(&mut NullObserver).unwrap();
        for w in path.windows(2) {
            let dir = w[0].dir_to(w[1]).unwrap();
            assert!(e.move_avatar(dir, &mut NullObserver).unwrap());
        }
        assert_eq!(e.avatar(), Some(e.grid().goal_pos()));
        e.despawn_avatar(&mut NullObserver).unwrap();
        assert!(e.avatar().is_none());
    }

    #[test]
    fn markers_toggle() {
        let mut e = engine(3, 3, 0);
        let mut rec = Recorder::new();
        assert!(e.toggle_markers(&mut rec));
        assert_eq!(rec.last_tag(Pos::ZERO), Some(VisualTag::FrontierActive));
        assert_eq!(rec.last_tag(Pos::new(2, 2)), Some(VisualTag::FrontierCandidate));
        assert!(!e.toggle_markers(&mut rec));
        assert_eq!(rec.last_tag(Pos::ZERO), Some(VisualTag::Default));
    }

    #[test]
    fn step_delay_reaches_observer() {
        let mut e = engine(3, 3, 4);
        e.set_step_delay(15);
        let mut rec = Recorder::new();
        e.generate(&mut rec).unwrap();
        assert!(rec.steps() > 0);
        assert!(rec.events.iter().all(|ev| !matches!(ev, StepEvent::Delay(d) if *d != 15)));
    }

    /// Cancels the run it observes after a fixed number of steps.
    struct CancelAfter {
        ctx: Context,
        left: usize,
    }

    impl StepObserver for CancelAfter {
        fn on_step_delay(&mut self, _millis: u64) {
            self.left = self.left.saturating_sub(1);
            if self.left == 0 {
                self.ctx.cancel();
            }
        }
    }

    #[test]
    fn cancelled_generation_rolls_back() {
        let mut e = engine(8, 8, 6);
        let mut obs = CancelAfter {
            ctx: e.cancel_handle(),
            left: 10,
        };
        let out = e.generate(&mut obs).unwrap();
        assert!(out.cancelled);
        assert_eq!(out.steps, 10);
        assert!(!e.is_generated());
        assert_eq!(e.grid().link_count(), 0);

        // The handle is re-armed by the next run.
        let out = e.generate(&mut NullObserver).unwrap();
        assert!(!out.cancelled);
        assert!(e.is_generated());
    }

    #[test]
    fn cancelled_search_is_recorded() {
        let mut e = engine(10, 10, 2);
        e.generate(&mut NullObserver).unwrap();
        let mut obs = CancelAfter {
            ctx: e.cancel_handle(),
            left: 3,
        };
        let out = e.search(Strategy::Dijkstra, &mut obs).unwrap();
        assert_eq!(out.status, SearchStatus::Cancelled);
        assert_eq!(out.expanded, 3);
        assert_eq!(e.last_outcome(), Some(&out));
    }

    #[test]
    fn custom_rng_is_reproducible() {
        let config = EngineConfig::with_size(6, 6).step_delay(0);
        let mut a = Engine::with_rng(config.clone(), StdRng::seed_from_u64(1)).unwrap();
        let mut b = Engine::with_rng(config, StdRng::seed_from_u64(1)).unwrap();
        a.generate(&mut NullObserver).unwrap();
        b.generate(&mut NullObserver).unwrap();
        let la: Vec<_> = a.grid().iter().map(|c| c.links().to_vec()).collect();
        let lb: Vec<_> = b.grid().iter().map(|c| c.links().to_vec()).collect();
        assert_eq!(la, lb);
    }
}
