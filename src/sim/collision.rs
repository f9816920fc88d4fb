//! Collision detection for axis-aligned boxes and the ball
//!
//! Screen coordinates: y grows downward. Directions are classified against
//! the compass vectors in the order up (0,1), right (1,0), down (0,-1),
//! left (-1,0); the first strictly-greatest dot product wins.

use glam::Vec2;

use super::entity::{Ball, Body};

/// Face classification of a ball-box contact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    const COMPASS: [(Direction, Vec2); 4] = [
        (Direction::Up, Vec2::new(0.0, 1.0)),
        (Direction::Right, Vec2::new(1.0, 0.0)),
        (Direction::Down, Vec2::new(0.0, -1.0)),
        (Direction::Left, Vec2::new(-1.0, 0.0)),
    ];

    #[inline]
    pub fn is_horizontal(&self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }
}

/// Result of a ball-box collision check
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CollisionResult {
    Miss,
    Hit {
        direction: Direction,
        /// Vector from the ball center to the closest point on the box
        penetration: Vec2,
    },
}

impl CollisionResult {
    #[inline]
    pub fn is_hit(&self) -> bool {
        matches!(self, CollisionResult::Hit { .. })
    }
}

/// Closed-interval AABB overlap; touching edges collide
pub fn check_aabb(a: &Body, b: &Body) -> bool {
    let overlap_x =
        a.position.x + a.size.x >= b.position.x && b.position.x + b.size.x >= a.position.x;
    let overlap_y =
        a.position.y + a.size.y >= b.position.y && b.position.y + b.size.y >= a.position.y;
    overlap_x && overlap_y
}

/// Ball vs box: clamp the center offset to the box half-extents to find the
/// closest point, then compare its distance against the radius.
pub fn check_circle_aabb(ball: &Ball, aabb: &Body) -> CollisionResult {
    let center = ball.center();

    let half_extents = aabb.size / 2.0;
    let aabb_center = aabb.position + half_extents;

    let difference = center - aabb_center;
    let clamped = difference.clamp(-half_extents, half_extents);
    let closest = aabb_center + clamped;

    let offset = difference;
    let difference = closest - center;
    if difference.length() > ball.radius {
        return CollisionResult::Miss;
    }

    let direction = if difference == Vec2::ZERO {
        nearest_face(offset, half_extents)
    } else {
        vector_direction(difference)
    };
    CollisionResult::Hit {
        direction,
        penetration: difference,
    }
}

/// Face closest to a point inside the box, given as its offset from the box
/// center. Ties between axes go to the vertical faces; the exact center is `Up`.
fn nearest_face(offset: Vec2, half_extents: Vec2) -> Direction {
    if offset == Vec2::ZERO {
        return Direction::Up;
    }

    let depth = half_extents - offset.abs();
    if depth.y <= depth.x {
        if offset.y > 0.0 { Direction::Down } else { Direction::Up }
    } else if offset.x > 0.0 {
        Direction::Left
    } else {
        Direction::Right
    }
}

/// Compass direction closest to `target`.
///
/// A zero vector has no preferred direction and resolves to `Up`.
pub fn vector_direction(target: Vec2) -> Direction {
    let Some(normalized) = target.try_normalize() else {
        return Direction::Up;
    };

    let mut max = 0.0;
    let mut best = Direction::Up;
    for (direction, compass) in Direction::COMPASS {
        let dot = normalized.dot(compass);
        if dot > max {
            max = dot;
            best = direction;
        }
    }
    best
}
