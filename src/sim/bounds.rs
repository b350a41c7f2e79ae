//! Axis-aligned bounding boxes and the two screen-edge policies
//!
//! - Clamp: snap a box back inside the field (used by the ship)
//! - Wrap: teleport a point to the opposite edge (used by obstacles)

use glam::Vec2;

/// Axis-aligned rectangle in screen space (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Box of the given size centred on `center`
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size / 2.0;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Square box enclosing a circle
    pub fn from_circle(center: Vec2, radius: f32) -> Self {
        Self::from_center(center, Vec2::splat(radius * 2.0))
    }

    /// Overlap test; boxes that only share an edge do not intersect
    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }

    /// True if `other` lies entirely inside this box (edges inclusive)
    pub fn contains(&self, other: &Aabb) -> bool {
        other.min.x >= self.min.x
            && other.max.x <= self.max.x
            && other.min.y >= self.min.y
            && other.max.y <= self.max.y
    }
}

/// Snap a box centre so a box of `size` lies fully inside `[0, field]`
///
/// Each edge is checked independently against the field; a crossing edge moves
/// the centre to exactly half a box from that edge.
pub fn clamp_center(center: Vec2, size: Vec2, field: Vec2) -> Vec2 {
    let half = size / 2.0;
    let mut c = center;

    if c.x - half.x < 0.0 {
        c.x = half.x;
    }
    if c.x + half.x > field.x {
        c.x = field.x - half.x;
    }
    if c.y - half.y < 0.0 {
        c.y = half.y;
    }
    if c.y + half.y > field.y {
        c.y = field.y - half.y;
    }
    c
}

/// Wrap one coordinate across `[0, extent]`
///
/// Below zero reappears at `extent`, beyond `extent` reappears at zero.
/// Values exactly on either edge are left alone.
#[inline]
pub fn wrap_axis(value: f32, extent: f32) -> f32 {
    if value < 0.0 {
        extent
    } else if value > extent {
        0.0
    } else {
        value
    }
}

/// Wrap a point across the field edges
#[inline]
pub fn wrap_point(p: Vec2, field: Vec2) -> Vec2 {
    Vec2::new(wrap_axis(p.x, field.x), wrap_axis(p.y, field.y))
}
