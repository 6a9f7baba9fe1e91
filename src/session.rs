//! Interaction session state
//!
//! The one piece of state carried between interaction calls: the last known
//! pointer position. Each wrapped actor owns its own session, so independent
//! actors emulate without interfering with each other. Written only by the
//! motion driver; read by the next interaction primitive as its path start.

use crate::geometry::Point;

/// Pointer position assumed before any movement has been driven
const INITIAL_POSITION: Point = Point { x: 100.0, y: 100.0 };

#[derive(Debug, Clone)]
pub struct Session {
    last_pointer: Point,
}

impl Session {
    pub fn new() -> Self {
        Self {
            last_pointer: INITIAL_POSITION,
        }
    }

    /// Last known pointer position; the start point of the next planned path
    pub fn last_pointer(&self) -> Point {
        self.last_pointer
    }

    pub(crate) fn set_pointer(&mut self, point: Point) {
        self.last_pointer = point;
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
