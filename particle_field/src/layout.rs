//! Target-position formulas for each mode.
//!
//! Everything here is a pure function of its inputs: the same particle,
//! mode, time, viewport and rotation always give the same target.

use std::f32::consts::TAU;
use std::time::Duration;

use glam::Vec2;
use hand_gesture::{rotate_3d, Viewport};

use crate::particle::Particle;

// ════════════════════════════════════════════════════════════════════════════
// Mode
// ════════════════════════════════════════════════════════════════════════════

/// The session's behavioral mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Dormant,
    IdleFormation,
    ExpandedFormation,
}

impl Mode {
    pub fn name(self) -> &'static str {
        match self {
            Mode::Dormant           => "dormant",
            Mode::IdleFormation     => "idle formation",
            Mode::ExpandedFormation => "expanded formation",
        }
    }

    /// Dormant and idle both show the rotating cube.
    pub fn uses_cube(self) -> bool {
        matches!(self, Mode::Dormant | Mode::IdleFormation)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Rotation accumulator
// ════════════════════════════════════════════════════════════════════════════

/// Accumulated rotation angles (radians).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rotation {
    pub pitch: f32,
    pub yaw:   f32,
    pub roll:  f32,
}

impl Rotation {
    /// Per-tick angular speeds of the idle cube.
    pub const SPEEDS: Rotation = Rotation { pitch: 0.005, yaw: 0.008, roll: 0.003 };

    pub fn advance(&mut self, speeds: &Rotation) {
        self.pitch += speeds.pitch;
        self.yaw   += speeds.yaw;
        self.roll  += speeds.roll;
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Parameters
// ════════════════════════════════════════════════════════════════════════════

/// Shape constants for the formations.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutParams {
    /// Half-width of the idle cube (px).
    pub cube_half_size:  f32,
    /// Perspective focal length (px).
    pub focal_length:    f32,
    /// Galaxy drift amplitude (px).
    pub drift_amplitude: f32,
    /// Galaxy drift angular rate (radians per millisecond).
    pub drift_rate:      f32,
    /// Carrier ring radius as a fraction of the viewport's shorter side.
    pub ring_fraction:   f32,
    /// Ring turn per radian of accumulated yaw.
    pub ring_spin:       f32,
}

impl Default for LayoutParams {
    fn default() -> Self {
        LayoutParams {
            cube_half_size:  180.0,
            focal_length:    1000.0,
            drift_amplitude: 10.0,
            drift_rate:      0.001,
            ring_fraction:   0.28,
            ring_spin:       0.25,
        }
    }
}

/// Stable per-particle depth inside the cube, keyed by id.
pub fn stable_depth(id: usize, cube_half_size: f32) -> f32 {
    ((id as f32 * 137.5) % (cube_half_size * 2.0)) - cube_half_size
}

/// The per-tick inputs a layout depends on.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Moment {
    pub mode:     Mode,
    /// Elapsed wall-clock time since the session started.
    pub now:      Duration,
    pub viewport: Viewport,
    pub rotation: Rotation,
}

/// Everything besides the particle itself that a target depends on.
#[derive(Clone, Copy, Debug)]
pub struct LayoutContext<'a> {
    pub mode:          Mode,
    pub now:           Duration,
    pub viewport:      Viewport,
    pub rotation:      Rotation,
    pub carrier_count: usize,
    pub params:        &'a LayoutParams,
}

// ════════════════════════════════════════════════════════════════════════════
// Formulas
// ════════════════════════════════════════════════════════════════════════════

/// Idle formation: rotate the cube point, then project it in perspective
/// around the viewport centre.
pub fn cube_target(particle: &Particle, ctx: &LayoutContext<'_>) -> Vec2 {
    let r = ctx.rotation;
    let p = rotate_3d(particle.cube_point(), r.pitch, r.yaw, r.roll);
    let focal = ctx.params.focal_length;
    let scale = focal / (focal - p.z);
    ctx.viewport.center() + Vec2::new(p.x, p.y) * scale
}

/// Expanded formation.  Carriers sit on the inner ring; everything else goes
/// to its normalized scatter point plus a time-driven drift.
pub fn galaxy_target(particle: &Particle, scatter: Vec2, ctx: &LayoutContext<'_>) -> Vec2 {
    if let Some(carrier) = particle.carrier() {
        return ring_position(carrier.slot, ctx);
    }
    let vp = ctx.viewport;
    let base = Vec2::new(scatter.x * vp.width, scatter.y * vp.height);
    let phase = ctx.now.as_secs_f32() * 1000.0 * ctx.params.drift_rate + particle.id as f32;
    base + Vec2::new(phase.sin(), phase.cos()) * ctx.params.drift_amplitude
}

/// Position of ring slot `slot` out of `ctx.carrier_count`.
pub fn ring_position(slot: usize, ctx: &LayoutContext<'_>) -> Vec2 {
    let count = ctx.carrier_count.max(1);
    let radius = ctx.viewport.min_side() * ctx.params.ring_fraction;
    let angle = slot as f32 * TAU / count as f32 + ctx.rotation.yaw * ctx.params.ring_spin;
    ctx.viewport.center() + Vec2::new(angle.cos(), angle.sin()) * radius
}

/// Target for `particle` under the context's mode.
pub fn target_for(particle: &Particle, scatter: Vec2, ctx: &LayoutContext<'_>) -> Vec2 {
    if ctx.mode.uses_cube() {
        cube_target(particle, ctx)
    } else {
        galaxy_target(particle, scatter, ctx)
    }
}
