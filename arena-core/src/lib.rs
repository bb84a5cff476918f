//! World model shared between the host boundary and the navigation stack:
//! toroidal geometry, per-tick world snapshots, and boot-time configuration.

pub mod config;
pub mod constants;
pub mod error;
pub mod geometry;
pub mod rng;
pub mod world;

pub use config::NavConfig;
pub use error::ConfigError;
pub use geometry::{Point, Torus, Vec2};
pub use world::{ObjectId, TeamId, WorldSnapshot};
