//! Pointer-path geometry
//!
//! Cubic bezier evaluation and randomized path planning. Human mouse
//! movements follow curved paths, not straight lines: the planner bows the
//! curve away from the straight line by a fraction of the travel distance
//! and adds micro-jitter to every sampled point.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A 2D point. Real-valued during computation; planner output is rounded to
/// whole coordinates before it reaches the actor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance_to(&self, other: &Point) -> f64 {
        ((other.x - self.x).powi(2) + (other.y - self.y).powi(2)).sqrt()
    }

    fn rounded(self) -> Self {
        Self {
            x: self.x.round(),
            y: self.y.round(),
        }
    }
}

/// Evaluate a cubic bezier at parameter `t` given four control points.
/// Pure; all randomness lives in the caller.
pub fn cubic_bezier(t: f64, p0: Point, p1: Point, p2: Point, p3: Point) -> Point {
    let mt = 1.0 - t;
    let x = mt.powi(3) * p0.x
        + 3.0 * mt.powi(2) * t * p1.x
        + 3.0 * mt * t.powi(2) * p2.x
        + t.powi(3) * p3.x;
    let y = mt.powi(3) * p0.y
        + 3.0 * mt.powi(2) * t * p1.y
        + 3.0 * mt * t.powi(2) * p2.y
        + t.powi(3) * p3.y;
    Point::new(x, y)
}

/// Control-point displacement bounds, as a fraction of travel distance
const OFFSET_FRACTION_MIN: f64 = 0.2;
const OFFSET_FRACTION_MAX: f64 = 0.4;

/// Per-axis jitter applied to every sampled point
const JITTER: f64 = 1.0;

/// Plan a curved pointer path from `start` to `end` with `steps + 1` samples.
///
/// Two control points sit at the quarter and three-quarter positions along
/// the straight line, each displaced by a random fraction of the travel
/// distance along a direction within 45° of the perpendicular. Every sample
/// gets independent jitter in [-1, 1] per axis and is rounded to whole
/// coordinates. A zero-distance request degenerates to the same point
/// repeated with jitter only.
pub fn plan<R: Rng>(start: Point, end: Point, steps: u32, rng: &mut R) -> Vec<Point> {
    let steps = steps.max(1);
    let distance = start.distance_to(&end);
    let cp1 = control_point(start, end, 0.25, distance, rng);
    let cp2 = control_point(start, end, 0.75, distance, rng);

    let mut path = Vec::with_capacity(steps as usize + 1);
    for i in 0..=steps {
        let t = f64::from(i) / f64::from(steps);
        let mut point = cubic_bezier(t, start, cp1, cp2, end);
        point.x += rng.gen_range(-JITTER..=JITTER);
        point.y += rng.gen_range(-JITTER..=JITTER);
        path.push(point.rounded());
    }

    debug!(
        "Planned path: {} steps over {:.1} units ({:.0},{:.0}) -> ({:.0},{:.0})",
        steps, distance, start.x, start.y, end.x, end.y
    );
    path
}

/// Derive one displaced control point at longitudinal position `along`.
fn control_point<R: Rng>(start: Point, end: Point, along: f64, distance: f64, rng: &mut R) -> Point {
    let line_angle = (end.y - start.y).atan2(end.x - start.x);
    let side = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
    let angle = line_angle + side * FRAC_PI_2 + rng.gen_range(-FRAC_PI_4..=FRAC_PI_4);
    let offset = rng.gen_range(OFFSET_FRACTION_MIN..=OFFSET_FRACTION_MAX) * distance;

    Point::new(
        start.x + (end.x - start.x) * along + offset * angle.cos(),
        start.y + (end.y - start.y) * along + offset * angle.sin(),
    )
}
