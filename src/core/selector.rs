//! # Directional Selector
//!
//! Pure function from (current element, direction, pool) to the next element.
//!
//! ```text
//!            up: dy < -dz
//!                 ▲
//!  left: dx < -dz ◄ ● ► right: dx > dz
//!                 ▼
//!           down: dy > dz
//! ```
//!
//! Offsets are measured center to center. Candidates inside the dead zone on
//! the movement axis are discarded, so a neighbor that is nearly collinear on
//! the other axis never counts as a move along this one.
//!
//! ## Ranking
//!
//! Survivors are ranked by their *off-axis* offset alone: `|dy|` for
//! left/right, `|dx|` for up/down. Euclidean distance is computed but never
//! consulted, and ties go to the first candidate in pool order. A far element
//! on the same row therefore beats a near one that is slightly offset, which
//! keeps repeated presses in one direction walking along a straight line.

use log::trace;

use crate::core::geometry::NavigableElement;

/// Default dead zone, in page units, on the movement axis.
pub const DEFAULT_DEAD_ZONE: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }

    fn is_horizontal(&self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    /// Whether offset `(dx, dy)` lies beyond the dead zone in this direction.
    fn admits(&self, dx: f64, dy: f64, dead_zone: f64) -> bool {
        match self {
            Direction::Left => dx < -dead_zone,
            Direction::Right => dx > dead_zone,
            Direction::Up => dy < -dead_zone,
            Direction::Down => dy > dead_zone,
        }
    }
}

/// One pool entry scored against the reference center. Lives only for the
/// duration of a single [`select`] call.
#[derive(Debug, Clone, Copy)]
struct Candidate<E> {
    element: E,
    dx: f64,
    dy: f64,
    distance: f64,
}

impl<E> Candidate<E> {
    fn off_axis(&self, direction: Direction) -> f64 {
        if direction.is_horizontal() {
            self.dy.abs()
        } else {
            self.dx.abs()
        }
    }
}

/// Picks the element to move to from `current` in `direction`, or `None`
/// when nothing lies that way.
pub fn select<E>(
    current: &NavigableElement<E>,
    direction: Direction,
    pool: &[NavigableElement<E>],
    dead_zone: f64,
) -> Option<E>
where
    E: Copy + PartialEq + std::fmt::Debug,
{
    let (cx, cy) = current.rect().center();

    pool.iter()
        .filter(|n| n.element() != current.element())
        .map(|n| {
            let (x, y) = n.rect().center();
            let (dx, dy) = (x - cx, y - cy);
            Candidate {
                element: n.element(),
                dx,
                dy,
                distance: dx.hypot(dy),
            }
        })
        .filter(|c| direction.admits(c.dx, c.dy, dead_zone))
        .inspect(|c| {
            trace!(
                "{} candidate {:?}: dx={:.1} dy={:.1} dist={:.1}",
                direction.label(),
                c.element,
                c.dx,
                c.dy,
                c.distance
            );
        })
        // min_by keeps the first of equal minima, which is the tie-break we want
        .min_by(|a, b| a.off_axis(direction).total_cmp(&b.off_axis(direction)))
        .map(|c| c.element)
}
