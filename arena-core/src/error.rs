use std::fmt;

/// Rejections raised while validating a [`crate::config::NavConfig`] at
/// boot. Everything past validation is a programmer error and panics.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ConfigError {
    ArenaExtent { width: f64, height: f64 },
    GridSize { grid_size: f64 },
    GridMisaligned { extent: f64, grid_size: f64 },
    GridTooCoarse { cols: usize, rows: usize },
    Multiplier { multiplier: f64 },
    UpdateIntervalZero,
    LookaheadFactor { factor: f64 },
    LookaheadGrowth { growth: f64 },
    LookaheadRetriesZero,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ArenaExtent { width, height } => {
                write!(f, "arena extents must be positive and finite: {width}x{height}")
            }
            Self::GridSize { grid_size } => {
                write!(f, "grid size must be positive and finite: {grid_size}")
            }
            Self::GridMisaligned { extent, grid_size } => {
                write!(f, "grid size {grid_size} does not evenly divide extent {extent}")
            }
            Self::GridTooCoarse { cols, rows } => {
                write!(f, "grid needs at least 3 cells per axis, got {cols}x{rows}")
            }
            Self::Multiplier { multiplier } => {
                write!(f, "obstruction multiplier must be finite and > 1: {multiplier}")
            }
            Self::UpdateIntervalZero => write!(f, "path update interval must be >= 1 tick"),
            Self::LookaheadFactor { factor } => {
                write!(f, "initial lookahead factor must be positive: {factor}")
            }
            Self::LookaheadGrowth { growth } => {
                write!(f, "lookahead growth must be > 1: {growth}")
            }
            Self::LookaheadRetriesZero => write!(f, "lookahead retry budget must be >= 1"),
        }
    }
}

impl std::error::Error for ConfigError {}
