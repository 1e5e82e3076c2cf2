//! Free-space clearing along sensor rays.
//!
//! [`GridLine`] steps an exact integer (Bresenham) line between two
//! cells, yielding every cell from origin to target inclusive. The
//! clearing rules that decide which of those cells may be freed live in
//! [`Costmap::update_dynamic_obstacles`](crate::Costmap::update_dynamic_obstacles).

use glam::UVec2;

/// Integer line iterator between two grid cells, endpoints included.
///
/// Uses the classic error-accumulator stepping, so the visited set is
/// exact and independent of floating-point rounding.
#[derive(Debug, Clone)]
pub struct GridLine {
    current: (i64, i64),
    target: (i64, i64),
    step: (i64, i64),
    error: i64,
    dx: i64,
    dy: i64,
    done: bool,
}

impl GridLine {
    pub fn new(from: UVec2, to: UVec2) -> Self {
        let current = (from.x as i64, from.y as i64);
        let target = (to.x as i64, to.y as i64);
        let dx = (target.0 - current.0).abs();
        let dy = -(target.1 - current.1).abs();
        let step = (
            if current.0 < target.0 { 1 } else { -1 },
            if current.1 < target.1 { 1 } else { -1 },
        );
        Self {
            current,
            target,
            step,
            error: dx + dy,
            dx,
            dy,
            done: false,
        }
    }
}

impl Iterator for GridLine {
    type Item = UVec2;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let cell = UVec2::new(self.current.0 as u32, self.current.1 as u32);
        if self.current == self.target {
            self.done = true;
            return Some(cell);
        }
        let doubled = 2 * self.error;
        if doubled >= self.dy {
            self.error += self.dy;
            self.current.0 += self.step.0;
        }
        if doubled <= self.dx {
            self.error += self.dx;
            self.current.1 += self.step.1;
        }
        Some(cell)
    }
}
