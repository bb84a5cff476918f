//! Pure-pursuit tracking: steer toward the intersection of a look-ahead
//! circle centered on the craft with the waypoint polyline.
//!
//! Every segment is lifted into the craft's local frame through shortest
//! toroidal displacement, so wrap never splits a segment. Ambiguity is
//! resolved in favor of progress: within a segment the intersection nearer
//! the segment end wins, and across segments a later segment wins.

use arena_core::geometry::{Point, Torus, Vec2};

#[derive(Clone, Debug, Default)]
pub struct PurePursuit {
    waypoints: Vec<Point>,
}

impl PurePursuit {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the tracked path. Waypoints are copied positions, so later
    /// changes to the grid cannot disturb an in-flight path.
    pub fn set_path(&mut self, waypoints: Vec<Point>) {
        self.waypoints = waypoints;
    }

    pub fn waypoints(&self) -> &[Point] {
        &self.waypoints
    }

    /// The position the craft should steer toward given look-ahead
    /// `radius`. An empty path pins the craft in place; `None` means no
    /// intersection was found and the caller may retry with a wider radius.
    pub fn desired_target(&self, torus: Torus, pos: Point, radius: f64) -> Option<Point> {
        if self.waypoints.is_empty() {
            return Some(pos);
        }

        let mut target: Option<Point> = None;
        for pair in self.waypoints.windows(2) {
            let segment_start = torus.shortest_delta(pos, pair[0]);
            let segment_end = torus.shortest_delta(pos, pair[1]);
            let Some((first, second)) =
                circle_segment_intersections(segment_start, segment_end, radius)
            else {
                continue;
            };

            let mut chosen: Option<Point> = None;
            if let Some(hit) = first {
                chosen = Some(pos.translate(hit));
            }
            if let Some(hit) = second {
                let candidate = pos.translate(hit);
                let end_world = pair[1];
                let better = match chosen {
                    Some(existing) => {
                        torus.shortest_distance(candidate, end_world)
                            < torus.shortest_distance(existing, end_world)
                    }
                    None => true,
                };
                if better {
                    chosen = Some(candidate);
                }
            }
            if chosen.is_some() {
                target = chosen;
            }
        }

        // The final waypoint cannot be found by intersection once the craft
        // is inside the look-ahead circle; go straight at it.
        if let Some(&last) = self.waypoints.last() {
            if torus.shortest_distance(pos, last) <= radius {
                return Some(last);
            }
        }

        target.map(|p| torus.wrap(p))
    }
}

/// Intersections of the segment `[start, end]` with the circle of `radius`
/// centered on the origin, both expressed in the craft's local frame.
/// `None` when the segment is degenerate or the line misses the circle;
/// otherwise each slot is `Some` only when the hit lies inside the segment.
fn circle_segment_intersections(
    start: Vec2,
    end: Vec2,
    radius: f64,
) -> Option<(Option<Vec2>, Option<Vec2>)> {
    let dx = end.x - start.x;
    let dy = end.y - start.y;
    if dx == 0.0 && dy == 0.0 {
        return None;
    }

    let length_sq = dx * dx + dy * dy;
    let determinant = start.x * end.y - end.x * start.y;
    let discriminant = radius * radius * length_sq - determinant * determinant;
    if discriminant <= 0.0 {
        return None;
    }

    let root = discriminant.sqrt();
    let x1 = (determinant * dy + signum_positive(dy) * dx * root) / length_sq;
    let x2 = (determinant * dy - signum_positive(dy) * dx * root) / length_sq;
    let vertical = dy.abs() * root;
    let y1 = (-determinant * dx + vertical) / length_sq;
    let y2 = (-determinant * dx - vertical) / length_sq;

    let inside = |x: f64, y: f64| {
        (start.x.min(end.x) < x && x < start.x.max(end.x))
            || (start.y.min(end.y) < y && y < start.y.max(end.y))
    };
    let first = inside(x1, y1).then(|| Vec2::new(x1, y1));
    let second = inside(x2, y2).then(|| Vec2::new(x2, y2));
    Some((first, second))
}

/// `signum` with zero treated as positive, so a horizontal segment
/// (`dy == 0`) keeps a live radical term.
#[inline]
fn signum_positive(n: f64) -> f64 {
    if n < 0.0 {
        -1.0
    } else {
        1.0
    }
}
