//! End-to-end checks against the reference arena: 1600x1080 pixels,
//! 20-pixel cells, obstruction multiplier 1e6, 10-tick path cadence.

use arena_core::config::NavConfig;
use arena_core::geometry::{Point, Vec2};
use arena_core::world::{CraftSnapshot, DebrisSnapshot, ObjectId, TeamId, WorldSnapshot};
use torus_autopilot::grid::OccupancyGraph;
use torus_autopilot::nav::{GoalKind, GoalObject, Navigator, TaskAssignment};
use torus_autopilot::pursuit::PurePursuit;
use torus_autopilot::search::{astar, path_length};

const COLS: usize = 80;
const ROWS: usize = 54;
const GRID: f64 = 20.0;
const MULT: f64 = 1.0e6;

fn reference_graph() -> OccupancyGraph {
    OccupancyGraph::new(COLS, ROWS, GRID, MULT)
}

#[test]
fn open_arena_path_runs_start_to_goal() {
    let mut graph = reference_graph();
    let start = graph.cell_index(Point::new(50.0, 50.0));
    let goal = graph.cell_index(Point::new(450.0, 250.0));
    assert_eq!(start, 162);
    assert_eq!(goal, 982);

    let path = astar(&mut graph, start, goal, 1000);
    let torus = graph.torus();

    let first = graph.center(*path.first().expect("non-empty path"));
    let last = graph.center(*path.last().expect("non-empty path"));
    assert!(torus.shortest_distance(first, Point::new(50.0, 50.0)) <= GRID);
    assert!(torus.shortest_distance(last, Point::new(450.0, 250.0)) <= GRID);

    let straight = (400.0f64 * 400.0 + 200.0 * 200.0).sqrt();
    let arc = path_length(&graph, &path);
    assert!(arc >= straight - 1e-9, "arc {arc} below straight {straight}");
    assert!(
        arc <= straight * std::f64::consts::SQRT_2 + 1e-9,
        "arc {arc} exceeds sqrt(2) bound"
    );
}

#[test]
fn wall_of_obstructions_is_routed_around() {
    let mut graph = reference_graph();
    // Cells centered at x=250 (column 12) for y in [100, 900]: rows 5..=44.
    for row in 5..=44 {
        graph.obstruct(row * COLS + 12);
    }

    let start = graph.cell_index(Point::new(100.0, 500.0));
    let goal = graph.cell_index(Point::new(500.0, 500.0));
    let path = astar(&mut graph, start, goal, 10_000);

    assert_eq!(*path.first().expect("path"), start);
    assert_eq!(*path.last().expect("path"), goal);
    for &cell in &path {
        assert!(!graph.is_obstructed(cell), "path enters obstructed {cell}");
    }
    // Any crossing of the wall column happens beyond the wall's rows.
    for &cell in &path {
        let (col, row) = (cell % COLS, cell / COLS);
        if col == 12 {
            assert!(
                !(5..=44).contains(&row),
                "path crosses the wall at row {row}"
            );
        }
    }
}

#[test]
fn toroidal_wrap_shortens_the_route() {
    let mut graph = reference_graph();
    let torus = graph.torus();
    let a = Point::new(50.0, 50.0);
    let b = Point::new(1550.0, 50.0);
    assert!((torus.shortest_distance(a, b) - 100.0).abs() < 1e-9);

    let start = graph.cell_index(a);
    let goal = graph.cell_index(b);
    let path = astar(&mut graph, start, goal, 1000);

    // The route leaves through the left edge: consecutive cells jump
    // between column 0 and column 79 exactly once.
    let wraps = path
        .windows(2)
        .filter(|pair| {
            let (c0, c1) = (pair[0] % COLS, pair[1] % COLS);
            (c0 == 0 && c1 == COLS - 1) || (c0 == COLS - 1 && c1 == 0)
        })
        .count();
    assert_eq!(wraps, 1, "path {path:?}");
    let arc = path_length(&graph, &path);
    assert!((arc - 100.0).abs() < 1e-9);
}

#[test]
fn obstruction_round_trip_leaves_search_results_identical() {
    let start_pos = Point::new(310.0, 710.0);
    let goal_pos = Point::new(1210.0, 230.0);

    let mut untouched = reference_graph();
    let start = untouched.cell_index(start_pos);
    let goal = untouched.cell_index(goal_pos);
    let baseline = astar(&mut untouched, start, goal, 10_000);

    let mut cycled = reference_graph();
    assert!(cycled.obstruct(500));
    assert!(cycled.unobstruct(500));
    let path = astar(&mut cycled, start, goal, 10_000);

    assert_eq!(baseline, path);
}

#[test]
fn pursuit_tracks_the_reference_path() {
    let mut pursuit = PurePursuit::new();
    pursuit.set_path(vec![
        Point::new(100.0, 100.0),
        Point::new(200.0, 100.0),
        Point::new(300.0, 100.0),
        Point::new(400.0, 100.0),
    ]);
    let torus = reference_graph().torus();

    let target = pursuit
        .desired_target(torus, Point::new(150.0, 100.0), 80.0)
        .expect("intersection expected");
    assert!((target.x - 230.0).abs() < 1e-9);
    assert!((target.y - 100.0).abs() < 1e-9);

    let target = pursuit
        .desired_target(torus, Point::new(370.0, 100.0), 80.0)
        .expect("final waypoint expected");
    assert_eq!(target, Point::new(400.0, 100.0));
}

#[test]
fn second_half_obstacle_is_seen_before_the_next_recomputation() {
    const US: TeamId = TeamId(0);
    let mut nav = Navigator::new(US, NavConfig::default()).expect("default config");

    let craft = CraftSnapshot {
        id: ObjectId(1),
        team: US,
        x: 810.0,
        y: 610.0,
        vx: 0.0,
        vy: 0.0,
        radius: 15.0,
        energy: 5000.0,
        alive: true,
    };
    let rock = DebrisSnapshot {
        id: ObjectId(2),
        x: 810.0,
        y: 810.0,
        vx: 0.0,
        vy: 0.0,
        radius: 12.0,
        movable: false,
        collectible: false,
    };
    let goal = GoalObject {
        id: ObjectId(3),
        position: Point::new(810.0, 1010.0),
        velocity: Vec2::new(0.0, 0.0),
        kind: GoalKind::Fixed,
    };
    let tasks = [TaskAssignment {
        craft_id: ObjectId(1),
        goal,
        face_toward: None,
    }];

    let mut world = WorldSnapshot {
        tick: 0,
        craft: vec![craft],
        debris: vec![rock],
        ..WorldSnapshot::default()
    };

    // The rock sits at row 40 of 54, i.e. in the second half of the grid,
    // which the scanner visits on odd ticks.
    let rock_cell = nav.graph().cell_index(Point::new(810.0, 810.0));
    assert!(rock_cell >= nav.graph().len() / 2);

    nav.tick(&world, &tasks);
    assert!(
        !nav.graph().is_obstructed(rock_cell),
        "even tick scans the first half only"
    );

    world.tick = 1;
    nav.tick(&world, &tasks);
    assert!(
        nav.graph().is_obstructed(rock_cell),
        "appearing at tick t, marked by tick t+1"
    );

    // The next recomputation then routes clear of the rock.
    for tick in 2..=10 {
        world.tick = tick;
        nav.tick(&world, &tasks);
    }
    let path = nav.path_for(ObjectId(1)).expect("path recorded");
    assert!(!path.is_empty());
    for &cell in path {
        assert!(!nav.graph().is_obstructed(cell), "path enters {cell}");
    }
}
