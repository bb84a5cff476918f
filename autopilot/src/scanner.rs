//! Obstruction scanner: walks a stripe of grid cells against the live
//! world, obstructing cells whose neighborhood holds a hazard and clearing
//! cells that have gone quiet.
//!
//! Hazards, in check order: debris (movable debris also tested at its
//! predicted next-tick center), friendly structures, living rival craft,
//! and rival projectiles. Our own projectiles never obstruct, otherwise a
//! craft dodges its own muzzle flash and the path oscillates. Exempt ids
//! cover the goal objects craft are currently flying at; stale ids simply
//! never match.

use std::collections::HashSet;

use arena_core::geometry::Point;
use arena_core::world::{ObjectId, TeamId, WorldSnapshot};

use crate::grid::OccupancyGraph;

/// Clearance margin around a cell center, as a weighted sum of the craft's
/// own radius and the obstacle's. One knob for every hazard class keeps the
/// margins tunable in one place.
#[derive(Clone, Copy, Debug)]
pub struct ClearancePolicy {
    pub self_weight: f64,
    pub obstacle_weight: f64,
}

impl ClearancePolicy {
    /// Wide berth around the scanning craft; used for debris fields.
    pub const SELF_HEAVY: Self = Self {
        self_weight: 2.0,
        obstacle_weight: 1.0,
    };
    /// Wide berth around the obstacle; used for structures, craft, and
    /// projectiles.
    pub const OBSTACLE_HEAVY: Self = Self {
        self_weight: 1.0,
        obstacle_weight: 2.0,
    };

    #[inline]
    pub fn threshold(self, self_radius: f64, obstacle_radius: f64) -> f64 {
        self.self_weight * self_radius + self.obstacle_weight * obstacle_radius
    }
}

/// Per-scan parameters: whose clearance is being checked and which goal
/// objects must not count as obstructions.
pub struct ScanContext<'a> {
    pub craft_radius: f64,
    pub team: TeamId,
    pub exempt: &'a HashSet<ObjectId>,
}

/// Rescan the inclusive cell interval `[start, stop]`, toggling obstruction
/// to match the world. Tolerates arbitrary world contents.
pub fn scan_range(
    graph: &mut OccupancyGraph,
    world: &WorldSnapshot,
    ctx: &ScanContext<'_>,
    start: usize,
    stop: usize,
) {
    for index in start..=stop {
        if hazard_near(graph, world, ctx, graph.center(index)) {
            graph.obstruct(index);
        } else {
            graph.unobstruct(index);
        }
    }
}

fn hazard_near(
    graph: &OccupancyGraph,
    world: &WorldSnapshot,
    ctx: &ScanContext<'_>,
    center: Point,
) -> bool {
    let torus = graph.torus();
    let radius = ctx.craft_radius;

    for debris in &world.debris {
        if debris.collectible {
            continue;
        }
        let threshold = ClearancePolicy::SELF_HEAVY.threshold(radius, debris.radius);
        if torus.shortest_distance(debris.position(), center) <= threshold {
            return true;
        }
        if debris.movable {
            // One tick of lead; very fast debris can still skip a cell.
            let ahead = torus.wrap(debris.position().translate(debris.velocity()));
            if torus.shortest_distance(ahead, center) <= threshold {
                return true;
            }
        }
    }

    for outpost in &world.outposts {
        if ctx.exempt.contains(&outpost.id) {
            continue;
        }
        let threshold = ClearancePolicy::OBSTACLE_HEAVY.threshold(radius, outpost.radius);
        if torus.shortest_distance(outpost.position(), center) <= threshold {
            return true;
        }
    }

    for craft in &world.craft {
        if craft.team == ctx.team || !craft.alive || ctx.exempt.contains(&craft.id) {
            continue;
        }
        let threshold = ClearancePolicy::OBSTACLE_HEAVY.threshold(radius, craft.radius);
        if torus.shortest_distance(craft.position(), center) <= threshold {
            return true;
        }
    }

    for projectile in &world.projectiles {
        if projectile.firing_team == ctx.team {
            continue;
        }
        let threshold = ClearancePolicy::OBSTACLE_HEAVY.threshold(radius, projectile.radius);
        if torus.shortest_distance(projectile.position(), center) <= threshold {
            return true;
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_core::world::{
        CraftSnapshot, DebrisSnapshot, OutpostSnapshot, ProjectileSnapshot,
    };

    const US: TeamId = TeamId(0);
    const THEM: TeamId = TeamId(1);

    fn graph() -> OccupancyGraph {
        OccupancyGraph::new(10, 10, 20.0, 1.0e6)
    }

    fn debris(id: u32, x: f64, y: f64) -> DebrisSnapshot {
        DebrisSnapshot {
            id: ObjectId(id),
            x,
            y,
            vx: 0.0,
            vy: 0.0,
            radius: 10.0,
            movable: false,
            collectible: false,
        }
    }

    fn scan_all(graph: &mut OccupancyGraph, world: &WorldSnapshot, exempt: &HashSet<ObjectId>) {
        let ctx = ScanContext {
            craft_radius: 15.0,
            team: US,
            exempt,
        };
        let len = graph.len();
        scan_range(graph, world, &ctx, 0, len - 1);
    }

    #[test]
    fn debris_obstructs_and_clears_when_gone() {
        let mut graph = graph();
        let none = HashSet::new();
        let mut world = WorldSnapshot {
            debris: vec![debris(1, 50.0, 50.0)],
            ..WorldSnapshot::default()
        };
        scan_all(&mut graph, &world, &none);
        let cell = graph.cell_index(arena_core::Point::new(50.0, 50.0));
        assert!(graph.is_obstructed(cell));

        world.debris.clear();
        scan_all(&mut graph, &world, &none);
        assert!(!graph.is_obstructed(cell));
    }

    #[test]
    fn collectible_debris_never_obstructs() {
        let mut graph = graph();
        let none = HashSet::new();
        let mut cargo = debris(1, 50.0, 50.0);
        cargo.collectible = true;
        let world = WorldSnapshot {
            debris: vec![cargo],
            ..WorldSnapshot::default()
        };
        scan_all(&mut graph, &world, &none);
        for index in 0..graph.len() {
            assert!(!graph.is_obstructed(index));
        }
    }

    #[test]
    fn movable_debris_obstructs_its_predicted_cell() {
        let mut graph = graph();
        let none = HashSet::new();
        let mut rock = debris(1, 30.0, 110.0);
        rock.movable = true;
        rock.vx = 80.0;
        let world = WorldSnapshot {
            debris: vec![rock],
            ..WorldSnapshot::default()
        };
        scan_all(&mut graph, &world, &none);
        // Predicted center lands at (110, 110).
        let ahead = graph.cell_index(arena_core::Point::new(110.0, 110.0));
        assert!(graph.is_obstructed(ahead));
    }

    #[test]
    fn own_projectiles_are_ignored() {
        let mut graph = graph();
        let none = HashSet::new();
        let world = WorldSnapshot {
            projectiles: vec![
                ProjectileSnapshot {
                    id: ObjectId(1),
                    firing_team: US,
                    x: 50.0,
                    y: 50.0,
                    radius: 3.0,
                },
                ProjectileSnapshot {
                    id: ObjectId(2),
                    firing_team: THEM,
                    x: 150.0,
                    y: 150.0,
                    radius: 3.0,
                },
            ],
            ..WorldSnapshot::default()
        };
        scan_all(&mut graph, &world, &none);
        let ours = graph.cell_index(arena_core::Point::new(50.0, 50.0));
        let theirs = graph.cell_index(arena_core::Point::new(150.0, 150.0));
        assert!(!graph.is_obstructed(ours));
        assert!(graph.is_obstructed(theirs));
    }

    #[test]
    fn exempt_goal_objects_do_not_obstruct() {
        let mut graph = graph();
        let world = WorldSnapshot {
            outposts: vec![OutpostSnapshot {
                id: ObjectId(9),
                team: US,
                x: 90.0,
                y: 90.0,
                radius: 20.0,
                energy: 4000.0,
            }],
            ..WorldSnapshot::default()
        };

        let none = HashSet::new();
        scan_all(&mut graph, &world, &none);
        let cell = graph.cell_index(arena_core::Point::new(90.0, 90.0));
        assert!(graph.is_obstructed(cell));

        let exempt: HashSet<ObjectId> = [ObjectId(9)].into_iter().collect();
        scan_all(&mut graph, &world, &exempt);
        assert!(!graph.is_obstructed(cell));
    }

    #[test]
    fn stale_exempt_ids_are_inert() {
        let mut graph = graph();
        let exempt: HashSet<ObjectId> = [ObjectId(404)].into_iter().collect();
        let world = WorldSnapshot {
            debris: vec![debris(1, 50.0, 50.0)],
            ..WorldSnapshot::default()
        };
        scan_all(&mut graph, &world, &exempt);
        let cell = graph.cell_index(arena_core::Point::new(50.0, 50.0));
        assert!(graph.is_obstructed(cell));
    }

    #[test]
    fn dead_and_friendly_craft_are_not_hazards() {
        let mut graph = graph();
        let none = HashSet::new();
        let mut rival = CraftSnapshot {
            id: ObjectId(5),
            team: THEM,
            x: 150.0,
            y: 50.0,
            vx: 0.0,
            vy: 0.0,
            radius: 15.0,
            energy: 1000.0,
            alive: false,
        };
        let friendly = CraftSnapshot {
            id: ObjectId(6),
            team: US,
            alive: true,
            x: 50.0,
            y: 150.0,
            ..rival
        };
        let world = WorldSnapshot {
            craft: vec![rival, friendly],
            ..WorldSnapshot::default()
        };
        scan_all(&mut graph, &world, &none);
        for index in 0..graph.len() {
            assert!(!graph.is_obstructed(index), "cell {index}");
        }

        rival.alive = true;
        let world = WorldSnapshot {
            craft: vec![rival],
            ..WorldSnapshot::default()
        };
        scan_all(&mut graph, &world, &none);
        let cell = graph.cell_index(arena_core::Point::new(150.0, 50.0));
        assert!(graph.is_obstructed(cell));
    }
}
