//! Small pure-math helpers shared by perception, layout, and interaction.

use glam::{Mat3, Vec2, Vec3};

// ════════════════════════════════════════════════════════════════════════════
// Scalars and points
// ════════════════════════════════════════════════════════════════════════════

/// Linear interpolation: `t = 0.0` → `start`, `t = 1.0` → `end`.
pub fn lerp(start: f32, end: f32, t: f32) -> f32 {
    start * (1.0 - t) + end * t
}

/// Component-wise [`lerp`] for screen-space points.
pub fn lerp_point(start: Vec2, end: Vec2, t: f32) -> Vec2 {
    Vec2::new(lerp(start.x, end.x, t), lerp(start.y, end.y, t))
}

/// Euclidean distance between two points.
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    (a.x - b.x).hypot(a.y - b.y)
}

/// Map a normalized coordinate (0.0–1.0) onto `size` pixels.
///
/// With `mirror` set the axis is flipped, which is how a front-facing camera
/// image is shown back to the user.
pub fn to_screen(value: f32, size: f32, mirror: bool) -> f32 {
    if mirror { (1.0 - value) * size } else { value * size }
}

// ════════════════════════════════════════════════════════════════════════════
// Viewport
// ════════════════════════════════════════════════════════════════════════════

/// Pixel dimensions of the drawing surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width:  f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Viewport { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn min_side(&self) -> f32 {
        self.width.min(self.height)
    }

    /// Map a normalized point into pixels, mirroring the horizontal axis when
    /// `mirror_x` is set.
    pub fn project(&self, normalized: Vec2, mirror_x: bool) -> Vec2 {
        Vec2::new(
            to_screen(normalized.x, self.width, mirror_x),
            to_screen(normalized.y, self.height, false),
        )
    }
}

// ════════════════════════════════════════════════════════════════════════════
// 3D rotation
// ════════════════════════════════════════════════════════════════════════════

/// Rotate `p` by roll (Z axis), then pitch (X axis), then yaw (Y axis).
pub fn rotate_3d(p: Vec3, pitch: f32, yaw: f32, roll: f32) -> Vec3 {
    let m = Mat3::from_rotation_y(yaw) * Mat3::from_rotation_x(pitch) * Mat3::from_rotation_z(roll);
    m * p
}
