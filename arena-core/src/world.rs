//! Read-only world view the host hands the navigation core each tick.
//!
//! Snapshots carry opaque ids so the core can exempt specific objects from
//! obstruction without owning any host state.

use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Vec2};

/// Opaque handle for a world object. Stable for the object's lifetime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TeamId(pub u8);

/// Free-floating debris. Collectible debris is cargo, never an obstruction;
/// the rest is a hazard, and movable hazards are led by one tick when
/// scanned.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct DebrisSnapshot {
    pub id: ObjectId,
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub radius: f64,
    pub movable: bool,
    pub collectible: bool,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct CraftSnapshot {
    pub id: ObjectId,
    pub team: TeamId,
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub radius: f64,
    pub energy: f64,
    pub alive: bool,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct ProjectileSnapshot {
    pub id: ObjectId,
    pub firing_team: TeamId,
    pub x: f64,
    pub y: f64,
    pub radius: f64,
}

/// A friendly-team structure (refuel and drop-off point).
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct OutpostSnapshot {
    pub id: ObjectId,
    pub team: TeamId,
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub energy: f64,
}

/// A free energy source.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct BeaconSnapshot {
    pub id: ObjectId,
    pub x: f64,
    pub y: f64,
    pub radius: f64,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub tick: u64,
    pub debris: Vec<DebrisSnapshot>,
    pub craft: Vec<CraftSnapshot>,
    pub projectiles: Vec<ProjectileSnapshot>,
    pub outposts: Vec<OutpostSnapshot>,
    pub beacons: Vec<BeaconSnapshot>,
}

impl WorldSnapshot {
    pub fn craft_by_id(&self, id: ObjectId) -> Option<&CraftSnapshot> {
        self.craft.iter().find(|c| c.id == id)
    }
}

impl DebrisSnapshot {
    #[inline]
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    #[inline]
    pub fn velocity(&self) -> Vec2 {
        Vec2::new(self.vx, self.vy)
    }
}

impl CraftSnapshot {
    #[inline]
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    #[inline]
    pub fn velocity(&self) -> Vec2 {
        Vec2::new(self.vx, self.vy)
    }
}

impl ProjectileSnapshot {
    #[inline]
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

impl OutpostSnapshot {
    #[inline]
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

impl BeaconSnapshot {
    #[inline]
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}
