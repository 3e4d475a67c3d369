use mazer_core::MazeError;
use mazer_paths::Heuristic;

/// Default grid size, in cells per side.
pub const DEFAULT_SIZE: i32 = 10;
/// Default pause between steps, in milliseconds.
pub const DEFAULT_STEP_DELAY_MS: u64 = 200;

/// Configuration for creating an [`Engine`](crate::Engine).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    pub rows: i32,
    pub columns: i32,
    /// Pause requested from the observer after every step. `0` disables
    /// pacing.
    pub step_delay_ms: u64,
    /// Seed for the carving random source. `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Heuristic used by A*.
    pub heuristic: Heuristic,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_SIZE,
            columns: DEFAULT_SIZE,
            step_delay_ms: DEFAULT_STEP_DELAY_MS,
            seed: None,
            heuristic: Heuristic::Manhattan,
        }
    }
}

impl EngineConfig {
    /// Default configuration with the given size.
    pub fn with_size(rows: i32, columns: i32) -> Self {
        Self {
            rows,
            columns,
            ..Self::default()
        }
    }

    /// Set the step delay (builder).
    pub fn step_delay(mut self, millis: u64) -> Self {
        self.step_delay_ms = millis;
        self
    }

    /// Set the seed (builder).
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the A* heuristic (builder).
    pub fn heuristic(mut self, heuristic: Heuristic) -> Self {
        self.heuristic = heuristic;
        self
    }

    /// Check the grid dimensions.
    pub fn validate(&self) -> Result<(), MazeError> {
        if self.rows < 1 || self.columns < 1 {
            return Err(MazeError::InvalidDimensions {
                rows: self.rows,
                columns: self.columns,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = EngineConfig::default();
        assert_eq!((c.rows, c.columns), (10, 10));
        assert_eq!(c.step_delay_ms, 200);
        assert!(c.seed.is_none());
        assert!(c.validate().is_ok());
    }

    #[test]
    fn builders() {
        let c = EngineConfig::with_size(3, 4)
            .step_delay(0)
            .seed(9)
            .heuristic(Heuristic::Signed);
        assert_eq!((c.rows, c.columns, c.step_delay_ms, c.seed), (3, 4, 0, Some(9)));
        assert_eq!(c.heuristic, Heuristic::Signed);
    }

    #[test]
    fn validate_rejects_empty() {
        assert!(EngineConfig::with_size(0, 5).validate().is_err());
        assert!(EngineConfig::with_size(5, -2).validate().is_err());
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn config_round_trip() {
        let c = EngineConfig::with_size(4, 6).seed(3);
        let json = serde_json::to_string(&c).unwrap();
        let back: EngineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, c);
    }

    #[test]
    fn missing_fields_use_defaults() {
        let back: EngineConfig = serde_json::from_str(r#"{"rows": 3}"#).unwrap();
        assert_eq!(back.rows, 3);
        assert_eq!(back.columns, 10);
        assert_eq!(back.step_delay_ms, 200);
    }
}
