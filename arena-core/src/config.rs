//! Boot-time configuration for the navigation stack.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_ARENA_HEIGHT, DEFAULT_ARENA_WIDTH, DEFAULT_GRID_SIZE, DEFAULT_ITERATION_CAP,
    DEFAULT_LOOKAHEAD_FACTOR, DEFAULT_LOOKAHEAD_GROWTH, DEFAULT_LOOKAHEAD_RETRIES,
    DEFAULT_PATH_UPDATE_INTERVAL, OBSTRUCTION_MULTIPLIER,
};
use crate::error::ConfigError;
use crate::geometry::Torus;

/// Tunables fixed at initialization. The arena and grid geometry never
/// change after the graph is built.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NavConfig {
    pub arena_width: f64,
    pub arena_height: f64,
    pub grid_size: f64,
    pub path_update_interval: u64,
    pub iteration_cap: u32,
    pub obstruction_multiplier: f64,
    pub initial_lookahead_factor: f64,
    pub lookahead_growth: f64,
    pub lookahead_retries: u32,
    pub use_astar: bool,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            arena_width: DEFAULT_ARENA_WIDTH,
            arena_height: DEFAULT_ARENA_HEIGHT,
            grid_size: DEFAULT_GRID_SIZE,
            path_update_interval: DEFAULT_PATH_UPDATE_INTERVAL,
            iteration_cap: DEFAULT_ITERATION_CAP,
            obstruction_multiplier: OBSTRUCTION_MULTIPLIER,
            initial_lookahead_factor: DEFAULT_LOOKAHEAD_FACTOR,
            lookahead_growth: DEFAULT_LOOKAHEAD_GROWTH,
            lookahead_retries: DEFAULT_LOOKAHEAD_RETRIES,
            use_astar: true,
        }
    }
}

impl NavConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.arena_width.is_finite() && self.arena_height.is_finite())
            || self.arena_width <= 0.0
            || self.arena_height <= 0.0
        {
            return Err(ConfigError::ArenaExtent {
                width: self.arena_width,
                height: self.arena_height,
            });
        }
        if !self.grid_size.is_finite() || self.grid_size <= 0.0 {
            return Err(ConfigError::GridSize {
                grid_size: self.grid_size,
            });
        }
        for extent in [self.arena_width, self.arena_height] {
            let cells = extent / self.grid_size;
            if (cells - cells.round()).abs() > 1e-9 {
                return Err(ConfigError::GridMisaligned {
                    extent,
                    grid_size: self.grid_size,
                });
            }
        }
        let (cols, rows) = (self.grid_cols(), self.grid_rows());
        if cols < 3 || rows < 3 {
            return Err(ConfigError::GridTooCoarse { cols, rows });
        }
        if !self.obstruction_multiplier.is_finite() || self.obstruction_multiplier <= 1.0 {
            return Err(ConfigError::Multiplier {
                multiplier: self.obstruction_multiplier,
            });
        }
        if self.path_update_interval == 0 {
            return Err(ConfigError::UpdateIntervalZero);
        }
        if !self.initial_lookahead_factor.is_finite() || self.initial_lookahead_factor <= 0.0 {
            return Err(ConfigError::LookaheadFactor {
                factor: self.initial_lookahead_factor,
            });
        }
        if !self.lookahead_growth.is_finite() || self.lookahead_growth <= 1.0 {
            return Err(ConfigError::LookaheadGrowth {
                growth: self.lookahead_growth,
            });
        }
        if self.lookahead_retries == 0 {
            return Err(ConfigError::LookaheadRetriesZero);
        }
        Ok(())
    }

    pub fn grid_cols(&self) -> usize {
        (self.arena_width / self.grid_size).round() as usize
    }

    pub fn grid_rows(&self) -> usize {
        (self.arena_height / self.grid_size).round() as usize
    }

    pub fn cell_count(&self) -> usize {
        self.grid_cols() * self.grid_rows()
    }

    pub fn initial_lookahead(&self) -> f64 {
        self.initial_lookahead_factor * self.grid_size
    }

    pub fn torus(&self) -> Torus {
        Torus::new(self.arena_width, self.arena_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = NavConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.grid_cols(), 80);
        assert_eq!(config.grid_rows(), 54);
        assert_eq!(config.cell_count(), 4320);
        assert_eq!(config.initial_lookahead(), 40.0);
    }

    #[test]
    fn misaligned_grid_is_rejected() {
        let config = NavConfig {
            grid_size: 30.0,
            ..NavConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::GridMisaligned { .. })
        ));
    }

    #[test]
    fn too_coarse_grid_is_rejected() {
        let config = NavConfig {
            arena_width: 40.0,
            arena_height: 1080.0,
            ..NavConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::GridTooCoarse { cols: 2, rows: 54 })
        ));
    }

    #[test]
    fn degenerate_multiplier_is_rejected() {
        let config = NavConfig {
            obstruction_multiplier: 1.0,
            ..NavConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Multiplier { .. })
        ));
    }
}
