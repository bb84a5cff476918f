//! Per-tick orchestration: stripe scans, path recomputation at a fixed
//! cadence, and pursuit evaluation for every friendly craft.
//!
//! The host owns the clock and the planner. Each tick it hands over the
//! world snapshot plus one task assignment per craft; the navigator answers
//! with a steering target per craft (or none, when the craft should hold
//! still this tick).

use std::collections::{HashMap, HashSet};

use arena_core::config::NavConfig;
use arena_core::constants::{AIM_AHEAD_TICKS, BRAKE_RADIUS_FACTOR};
use arena_core::error::ConfigError;
use arena_core::geometry::{Point, Torus, Vec2};
use arena_core::world::{ObjectId, TeamId, WorldSnapshot};

use crate::grid::OccupancyGraph;
use crate::pursuit::PurePursuit;
use crate::scanner::{scan_range, ScanContext};
use crate::search::{astar, hill_climb, path_length};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GoalKind {
    /// A fixed object: beacon, outpost, marker.
    Fixed,
    /// A drifting object worth leading by a tick: cargo debris.
    Drifting,
    /// A rival craft being run down; braking distance applies.
    Chase,
}

/// The goal object the planner picked for one craft.
#[derive(Clone, Copy, Debug)]
pub struct GoalObject {
    pub id: ObjectId,
    pub position: Point,
    pub velocity: Vec2,
    pub kind: GoalKind,
}

#[derive(Clone, Copy, Debug)]
pub struct TaskAssignment {
    pub craft_id: ObjectId,
    pub goal: GoalObject,
    /// Optional aim point; the command's heading is derived from it so the
    /// host PID can align the hull for shooting. Pass-through only.
    pub face_toward: Option<Point>,
}

#[derive(Clone, Copy, Debug)]
pub struct SteeringCommand {
    pub craft_id: ObjectId,
    /// `None` means hold still this tick.
    pub target: Option<Point>,
    pub heading: Option<f64>,
}

struct CraftNav {
    tracker: PurePursuit,
    path: Vec<usize>,
}

pub struct Navigator {
    config: NavConfig,
    torus: Torus,
    team: TeamId,
    graph: OccupancyGraph,
    crafts: HashMap<ObjectId, CraftNav>,
    searches_run: u64,
}

impl Navigator {
    pub fn new(team: TeamId, config: NavConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let graph = OccupancyGraph::new(
            config.grid_cols(),
            config.grid_rows(),
            config.grid_size,
            config.obstruction_multiplier,
        );
        Ok(Self {
            torus: config.torus(),
            config,
            team,
            graph,
            crafts: HashMap::new(),
            searches_run: 0,
        })
    }

    pub fn graph(&self) -> &OccupancyGraph {
        &self.graph
    }

    pub fn config(&self) -> &NavConfig {
        &self.config
    }

    /// Total searches issued so far, recomputations and goal ranking alike.
    pub fn searches_run(&self) -> u64 {
        self.searches_run
    }

    /// Last computed cell path for a craft, if any.
    pub fn path_for(&self, craft_id: ObjectId) -> Option<&[usize]> {
        self.crafts.get(&craft_id).map(|nav| nav.path.as_slice())
    }

    /// One control tick. Scans the scheduled stripe, recomputes paths when
    /// the cadence comes due, and evaluates pursuit for every assignment.
    pub fn tick(
        &mut self,
        world: &WorldSnapshot,
        assignments: &[TaskAssignment],
    ) -> Vec<SteeringCommand> {
        self.run_scheduled_scan(world, assignments);
        let recompute = world.tick % self.config.path_update_interval == 0;
        let mut commands = Vec::with_capacity(assignments.len());
        for assignment in assignments {
            commands.push(self.steer_craft(world, assignment, recompute));
        }
        self.retire_missing_craft(world);
        commands
    }

    /// Arc length of the best path between two positions; infinite when the
    /// search comes back empty. Lets planners rank goals by travel cost
    /// rather than straight-line distance.
    pub fn path_length_to(&mut self, from: Point, to: Point) -> f64 {
        let start = self.graph.cell_index(from);
        let goal = self.graph.cell_index(to);
        let path = astar(&mut self.graph, start, goal, self.config.iteration_cap);
        self.searches_run += 1;
        if path.is_empty() {
            f64::INFINITY
        } else {
            path_length(&self.graph, &path)
        }
    }

    /// Even tick scans the first half of the grid, odd tick the second, so
    /// every cell is fresh within the last two ticks of any recomputation.
    fn run_scheduled_scan(&mut self, world: &WorldSnapshot, assignments: &[TaskAssignment]) {
        let Some(probe) = world
            .craft
            .iter()
            .find(|c| c.team == self.team && c.alive)
        else {
            return;
        };
        let exempt: HashSet<ObjectId> = assignments.iter().map(|a| a.goal.id).collect();
        let ctx = ScanContext {
            craft_radius: probe.radius,
            team: self.team,
            exempt: &exempt,
        };
        let len = self.graph.len();
        let half = len / 2;
        if world.tick % 2 == 0 {
            scan_range(&mut self.graph, world, &ctx, 0, half - 1);
        } else {
            scan_range(&mut self.graph, world, &ctx, half, len - 1);
        }
    }

    fn steer_craft(
        &mut self,
        world: &WorldSnapshot,
        assignment: &TaskAssignment,
        recompute: bool,
    ) -> SteeringCommand {
        let craft_id = assignment.craft_id;
        let idle = SteeringCommand {
            craft_id,
            target: None,
            heading: None,
        };
        let Some(craft) = world.craft_by_id(craft_id) else {
            return idle;
        };
        if !craft.alive || craft.team != self.team {
            return idle;
        }
        let pos = craft.position();

        if recompute {
            let target_pos = self.resolve_goal_position(pos, craft.radius, &assignment.goal);
            let start = self.graph.cell_index(pos);
            let goal = self.graph.cell_index(target_pos);
            let path = if self.config.use_astar {
                astar(&mut self.graph, start, goal, self.config.iteration_cap)
            } else {
                hill_climb(&mut self.graph, start, goal)
            };
            self.searches_run += 1;

            let waypoints = path.iter().map(|&cell| self.graph.center(cell)).collect();
            let entry = self.crafts.entry(craft_id).or_insert_with(|| CraftNav {
                tracker: PurePursuit::new(),
                path: Vec::new(),
            });
            entry.tracker.set_path(waypoints);
            entry.path = path;
        }

        let target = self
            .crafts
            .get(&craft_id)
            .and_then(|nav| self.pursue(nav, pos));
        let heading = assignment.face_toward.map(|aim| {
            let delta = self.torus.shortest_delta(pos, aim);
            delta.y.atan2(delta.x)
        });
        SteeringCommand {
            craft_id,
            target,
            heading,
        }
    }

    /// Look-ahead evaluation with the expansion policy: start at the
    /// configured radius and widen geometrically until an intersection
    /// shows up or the retry budget runs dry.
    fn pursue(&self, nav: &CraftNav, pos: Point) -> Option<Point> {
        let mut radius = self.config.initial_lookahead();
        for _ in 0..=self.config.lookahead_retries {
            if let Some(target) = nav.tracker.desired_target(self.torus, pos, radius) {
                return Some(target);
            }
            radius *= self.config.lookahead_growth;
        }
        None
    }

    fn resolve_goal_position(&self, craft_pos: Point, craft_radius: f64, goal: &GoalObject) -> Point {
        match goal.kind {
            GoalKind::Fixed => goal.position,
            GoalKind::Drifting => self
                .torus
                .wrap(goal.position.translate(goal.velocity.scale(AIM_AHEAD_TICKS))),
            GoalKind::Chase => {
                let distance = self.torus.shortest_distance(craft_pos, goal.position);
                if distance < BRAKE_RADIUS_FACTOR * craft_radius {
                    // Close enough; steer at ourselves to bleed speed.
                    craft_pos
                } else {
                    goal.position
                }
            }
        }
    }

    fn retire_missing_craft(&mut self, world: &WorldSnapshot) {
        self.crafts
            .retain(|id, _| world.craft.iter().any(|c| c.id == *id));
    }
}
