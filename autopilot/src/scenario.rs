//! Deterministic scenario harness: a minimal stand-in host that feeds the
//! navigator synthetic worlds and measures how it fares.
//!
//! The harness plays the roles the navigation core treats as external: it
//! owns the clock, steps a toy physics world, and runs a greedy planner
//! that assigns each craft a goal. Craft haul cargo debris until their
//! energy runs low, then divert to the nearest beacon, ranked by path
//! length rather than straight-line distance.

use serde::{Deserialize, Serialize};

use arena_core::config::NavConfig;
use arena_core::constants::LOW_ENERGY_THRESHOLD;
use arena_core::error::ConfigError;
use arena_core::geometry::{Point, Torus, Vec2};
use arena_core::rng::SeededRng;
use arena_core::world::{
    BeaconSnapshot, CraftSnapshot, DebrisSnapshot, ObjectId, OutpostSnapshot, TeamId,
    WorldSnapshot,
};

use crate::nav::{GoalKind, GoalObject, Navigator, SteeringCommand, TaskAssignment};

pub const FRIENDLY_TEAM: TeamId = TeamId(0);
pub const RIVAL_TEAM: TeamId = TeamId(1);

const CRAFT_RADIUS: f64 = 15.0;
const CRAFT_SPEED: f64 = 4.0;
const BEACON_RADIUS: f64 = 10.0;
const CARGO_RADIUS: f64 = 8.0;
const STARTING_ENERGY: f64 = 5000.0;
const ENERGY_DRAIN_PER_TICK: f64 = 2.0;
const BEACON_ENERGY: f64 = 2500.0;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ScenarioConfig {
    pub seed: u32,
    pub ticks: u64,
    pub craft_count: usize,
    pub debris_count: usize,
    pub movable_debris: usize,
    pub cargo_count: usize,
    pub beacon_count: usize,
    pub rival_count: usize,
    pub nav: NavConfig,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            ticks: 2_000,
            craft_count: 3,
            debris_count: 30,
            movable_debris: 10,
            cargo_count: 8,
            beacon_count: 4,
            rival_count: 2,
            nav: NavConfig::default(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ScenarioMetrics {
    pub seed: u32,
    pub ticks_run: u64,
    pub cargo_collected: u32,
    pub beacons_collected: u32,
    pub collisions: u32,
    pub idle_ticks: u32,
    pub searches_run: u64,
}

pub struct Scenario {
    config: ScenarioConfig,
    torus: Torus,
    rng: SeededRng,
    world: WorldSnapshot,
    navigator: Navigator,
    metrics: ScenarioMetrics,
    next_id: u32,
}

impl Scenario {
    pub fn new(config: ScenarioConfig) -> Result<Self, ConfigError> {
        let navigator = Navigator::new(FRIENDLY_TEAM, config.nav)?;
        let torus = config.nav.torus();
        let mut scenario = Self {
            torus,
            rng: SeededRng::new(config.seed),
            world: WorldSnapshot::default(),
            navigator,
            metrics: ScenarioMetrics {
                seed: config.seed,
                ticks_run: 0,
                cargo_collected: 0,
                beacons_collected: 0,
                collisions: 0,
                idle_ticks: 0,
                searches_run: 0,
            },
            next_id: 1,
            config,
        };
        scenario.populate();
        Ok(scenario)
    }

    pub fn world(&self) -> &WorldSnapshot {
        &self.world
    }

    pub fn run(&mut self) -> ScenarioMetrics {
        for _ in 0..self.config.ticks {
            self.step();
        }
        self.metrics.searches_run = self.navigator.searches_run();
        self.metrics.clone()
    }

    fn fresh_id(&mut self) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 1;
        id
    }

    fn random_point(&mut self) -> Point {
        let x = self.rng.range_f64(0.0, self.torus.width);
        let y = self.rng.range_f64(0.0, self.torus.height);
        Point::new(x, y)
    }

    fn populate(&mut self) {
        for index in 0..self.config.debris_count {
            let id = self.fresh_id();
            let p = self.random_point();
            let movable = index < self.config.movable_debris;
            let (vx, vy) = if movable {
                (self.rng.range_f64(-2.0, 2.0), self.rng.range_f64(-2.0, 2.0))
            } else {
                (0.0, 0.0)
            };
            self.world.debris.push(DebrisSnapshot {
                id,
                x: p.x,
                y: p.y,
                vx,
                vy,
                radius: self.rng.range_f64(10.0, 25.0),
                movable,
                collectible: false,
            });
        }
        for _ in 0..self.config.cargo_count {
            let id = self.fresh_id();
            let p = self.random_point();
            let vx = self.rng.range_f64(-1.5, 1.5);
            let vy = self.rng.range_f64(-1.5, 1.5);
            self.world.debris.push(DebrisSnapshot {
                id,
                x: p.x,
                y: p.y,
                vx,
                vy,
                radius: CARGO_RADIUS,
                movable: true,
                collectible: true,
            });
        }
        for _ in 0..self.config.beacon_count {
            let id = self.fresh_id();
            let p = self.random_point();
            self.world.beacons.push(BeaconSnapshot {
                id,
                x: p.x,
                y: p.y,
                radius: BEACON_RADIUS,
            });
        }
        for _ in 0..self.config.craft_count {
            let id = self.fresh_id();
            let p = self.random_point();
            self.world.craft.push(CraftSnapshot {
                id,
                team: FRIENDLY_TEAM,
                x: p.x,
                y: p.y,
                vx: 0.0,
                vy: 0.0,
                radius: CRAFT_RADIUS,
                energy: STARTING_ENERGY,
                alive: true,
            });
        }
        for _ in 0..self.config.rival_count {
            let id = self.fresh_id();
            let p = self.random_point();
            self.world.craft.push(CraftSnapshot {
                id,
                team: RIVAL_TEAM,
                x: p.x,
                y: p.y,
                vx: self.rng.range_f64(-1.0, 1.0),
                vy: self.rng.range_f64(-1.0, 1.0),
                radius: CRAFT_RADIUS,
                energy: STARTING_ENERGY,
                alive: true,
            });
        }
        let id = self.fresh_id();
        let p = self.random_point();
        self.world.outposts.push(OutpostSnapshot {
            id,
            team: FRIENDLY_TEAM,
            x: p.x,
            y: p.y,
            radius: 25.0,
            energy: 4000.0,
        });
    }

    fn step(&mut self) {
        let assignments = self.plan();
        let commands = self.navigator.tick(&self.world, &assignments);
        self.apply_commands(&commands);
        self.drift_world();
        self.resolve_pickups();
        self.resolve_collisions();
        for craft in &mut self.world.craft {
            if craft.team == FRIENDLY_TEAM && craft.alive {
                craft.energy -= ENERGY_DRAIN_PER_TICK;
            }
        }
        self.world.tick += 1;
        self.metrics.ticks_run += 1;
    }

    /// Greedy planner stand-in: low-energy craft head for the beacon with
    /// the shortest path, everyone else hauls the nearest unclaimed cargo.
    fn plan(&mut self) -> Vec<TaskAssignment> {
        let mut assignments = Vec::new();
        let mut claimed: Vec<ObjectId> = Vec::new();
        let friendlies: Vec<CraftSnapshot> = self
            .world
            .craft
            .iter()
            .filter(|c| c.team == FRIENDLY_TEAM && c.alive)
            .copied()
            .collect();

        for craft in friendlies {
            let pos = craft.position();
            let goal = if craft.energy < LOW_ENERGY_THRESHOLD {
                self.nearest_beacon_by_path(pos, &claimed)
            } else {
                self.nearest_cargo(pos, &claimed)
                    .or_else(|| self.nearest_beacon_by_path(pos, &claimed))
            };
            if let Some(goal) = goal {
                claimed.push(goal.id);
                assignments.push(TaskAssignment {
                    craft_id: craft.id,
                    goal,
                    face_toward: None,
                });
            }
        }
        assignments
    }

    fn nearest_beacon_by_path(&mut self, pos: Point, claimed: &[ObjectId]) -> Option<GoalObject> {
        let beacons: Vec<BeaconSnapshot> = self
            .world
            .beacons
            .iter()
            .filter(|b| !claimed.contains(&b.id))
            .copied()
            .collect();
        let mut best: Option<(f64, GoalObject)> = None;
        for beacon in beacons {
            let length = self.navigator.path_length_to(pos, beacon.position());
            if best.as_ref().map_or(true, |(shortest, _)| length < *shortest) {
                best = Some((
                    length,
                    GoalObject {
                        id: beacon.id,
                        position: beacon.position(),
                        velocity: Vec2::new(0.0, 0.0),
                        kind: GoalKind::Fixed,
                    },
                ));
            }
        }
        best.map(|(_, goal)| goal)
    }

    fn nearest_cargo(&self, pos: Point, claimed: &[ObjectId]) -> Option<GoalObject> {
        let mut best: Option<(f64, GoalObject)> = None;
        for debris in &self.world.debris {
            if !debris.collectible || claimed.contains(&debris.id) {
                continue;
            }
            let distance = self.torus.shortest_distance(pos, debris.position());
            if best.as_ref().map_or(true, |(shortest, _)| distance < *shortest) {
                best = Some((
                    distance,
                    GoalObject {
                        id: debris.id,
                        position: debris.position(),
                        velocity: debris.velocity(),
                        kind: GoalKind::Drifting,
                    },
                ));
            }
        }
        best.map(|(_, goal)| goal)
    }

    fn apply_commands(&mut self, commands: &[SteeringCommand]) {
        for command in commands {
            let Some(target) = command.target else {
                self.metrics.idle_ticks += 1;
                continue;
            };
            let Some(craft) = self
                .world
                .craft
                .iter_mut()
                .find(|c| c.id == command.craft_id)
            else {
                continue;
            };
            let pos = Point::new(craft.x, craft.y);
            let delta = self.torus.shortest_delta(pos, target);
            let distance = delta.magnitude();
            if distance < 1e-9 {
                craft.vx = 0.0;
                craft.vy = 0.0;
                continue;
            }
            let step = distance.min(CRAFT_SPEED);
            craft.vx = delta.x / distance * step;
            craft.vy = delta.y / distance * step;
            let next = self.torus.wrap(pos.translate(Vec2::new(craft.vx, craft.vy)));
            craft.x = next.x;
            craft.y = next.y;
        }
    }

    fn drift_world(&mut self) {
        for debris in &mut self.world.debris {
            if !debris.movable {
                continue;
            }
            let next = self
                .torus
                .wrap(Point::new(debris.x + debris.vx, debris.y + debris.vy));
            debris.x = next.x;
            debris.y = next.y;
        }
        for craft in &mut self.world.craft {
            if craft.team != RIVAL_TEAM || !craft.alive {
                continue;
            }
            let next = self
                .torus
                .wrap(Point::new(craft.x + craft.vx, craft.y + craft.vy));
            craft.x = next.x;
            craft.y = next.y;
        }
    }

    fn resolve_pickups(&mut self) {
        let friendlies: Vec<(Point, f64)> = self
            .world
            .craft
            .iter()
            .filter(|c| c.team == FRIENDLY_TEAM && c.alive)
            .map(|c| (c.position(), c.radius))
            .collect();

        let torus = self.torus;
        let mut cargo_respawns = 0;
        let mut beacon_respawns = 0;
        let mut refueled: Vec<Point> = Vec::new();

        self.world.debris.retain(|debris| {
            if !debris.collectible {
                return true;
            }
            let grabbed = friendlies.iter().any(|(pos, radius)| {
                torus.shortest_distance(*pos, debris.position()) <= radius + debris.radius
            });
            if grabbed {
                cargo_respawns += 1;
            }
            !grabbed
        });
        self.world.beacons.retain(|beacon| {
            let tapped = friendlies.iter().any(|(pos, radius)| {
                torus.shortest_distance(*pos, beacon.position()) <= radius + beacon.radius
            });
            if tapped {
                beacon_respawns += 1;
                refueled.push(beacon.position());
            }
            !tapped
        });

        for beacon_pos in refueled {
            if let Some(craft) = self
                .world
                .craft
                .iter_mut()
                .filter(|c| c.team == FRIENDLY_TEAM && c.alive)
                .min_by(|a, b| {
                    torus
                        .shortest_distance(a.position(), beacon_pos)
                        .total_cmp(&torus.shortest_distance(b.position(), beacon_pos))
                })
            {
                craft.energy += BEACON_ENERGY;
            }
        }

        self.metrics.cargo_collected += cargo_respawns;
        self.metrics.beacons_collected += beacon_respawns;
        for _ in 0..cargo_respawns {
            self.spawn_cargo();
        }
        for _ in 0..beacon_respawns {
            self.spawn_beacon();
        }
    }

    fn spawn_cargo(&mut self) {
        let id = self.fresh_id();
        let p = self.random_point();
        let vx = self.rng.range_f64(-1.5, 1.5);
        let vy = self.rng.range_f64(-1.5, 1.5);
        self.world.debris.push(DebrisSnapshot {
            id,
            x: p.x,
            y: p.y,
            vx,
            vy,
            radius: CARGO_RADIUS,
            movable: true,
            collectible: true,
        });
    }

    fn spawn_beacon(&mut self) {
        let id = self.fresh_id();
        let p = self.random_point();
        self.world.beacons.push(BeaconSnapshot {
            id,
            x: p.x,
            y: p.y,
            radius: BEACON_RADIUS,
        });
    }

    fn resolve_collisions(&mut self) {
        let torus = self.torus;
        let hazards: Vec<(Point, f64)> = self
            .world
            .debris
            .iter()
            .filter(|d| !d.collectible)
            .map(|d| (d.position(), d.radius))
            .collect();

        let mut respawns = Vec::new();
        for (slot, craft) in self.world.craft.iter().enumerate() {
            if craft.team != FRIENDLY_TEAM || !craft.alive {
                continue;
            }
            let hit = hazards.iter().any(|(pos, radius)| {
                torus.shortest_distance(craft.position(), *pos) <= craft.radius + radius
            });
            if hit {
                respawns.push(slot);
            }
        }
        for slot in respawns {
            self.metrics.collisions += 1;
            let p = self.random_point();
            let craft = &mut self.world.craft[slot];
            craft.x = p.x;
            craft.y = p.y;
            craft.vx = 0.0;
            craft.vy = 0.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenario_populates_the_world() {
        let scenario = Scenario::new(ScenarioConfig::default()).expect("valid config");
        let world = scenario.world();
        assert_eq!(world.debris.len(), 30 + 8);
        assert_eq!(world.beacons.len(), 4);
        assert_eq!(world.craft.len(), 3 + 2);
        assert_eq!(world.outposts.len(), 1);
    }

    #[test]
    fn short_run_advances_the_clock_and_searches() {
        let config = ScenarioConfig {
            ticks: 50,
            ..ScenarioConfig::default()
        };
        let mut scenario = Scenario::new(config).expect("valid config");
        let metrics = scenario.run();
        assert_eq!(metrics.ticks_run, 50);
        assert!(metrics.searches_run > 0);
    }

    #[test]
    fn same_seed_reproduces_metrics() {
        let config = ScenarioConfig {
            ticks: 200,
            ..ScenarioConfig::default()
        };
        let a = Scenario::new(config.clone()).expect("valid config").run();
        let b = Scenario::new(config).expect("valid config").run();
        assert_eq!(a.cargo_collected, b.cargo_collected);
        assert_eq!(a.beacons_collected, b.beacons_collected);
        assert_eq!(a.collisions, b.collisions);
        assert_eq!(a.idle_ticks, b.idle_ticks);
        assert_eq!(a.searches_run, b.searches_run);
    }

    #[test]
    fn hill_climbing_mode_also_runs() {
        let config = ScenarioConfig {
            ticks: 50,
            nav: NavConfig {
                use_astar: false,
                ..NavConfig::default()
            },
            ..ScenarioConfig::default()
        };
        let metrics = Scenario::new(config).expect("valid config").run();
        assert_eq!(metrics.ticks_run, 50);
    }
}
