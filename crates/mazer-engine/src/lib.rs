//! A maze session tying together carving, search and avatar movement.
//!
//! An [`Engine`] owns a single [`Grid`](mazer_core::Grid). Runs are
//! reported step by step to a [`StepObserver`](mazer_core::StepObserver)
//! supplied by the caller, which may pace them and may cancel them
//! through [`Engine::cancel_handle`].

pub mod config;
pub mod engine;

pub use config::{DEFAULT_SIZE, DEFAULT_STEP_DELAY_MS, EngineConfig};
pub use engine::{Engine, EngineError};

pub use mazer_gen::GenOutcome;
pub use mazer_paths::{Heuristic, SearchOutcome, SearchStatus, Strategy};
