//! Session tunables.

use std::time::Duration;

use hand_gesture::Handedness;
use particle_field::{LayoutParams, Rotation};

// ════════════════════════════════════════════════════════════════════════════
// HandRoles
// ════════════════════════════════════════════════════════════════════════════

/// Which detector label drives the cursor and which one gestures.
///
/// Camera detectors label hands as seen in a mirrored image, so with a
/// front-facing camera the "Left" label is usually the user's right hand.
/// That is the default, but it is only a convention; `swapped()` flips it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HandRoles {
    pub pointer: Handedness,
    pub gesture: Handedness,
}

impl Default for HandRoles {
    fn default() -> Self {
        HandRoles { pointer: Handedness::Left, gesture: Handedness::Right }
    }
}

impl HandRoles {
    pub fn swapped(self) -> Self {
        HandRoles { pointer: self.gesture, gesture: self.pointer }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// WakeConfig
// ════════════════════════════════════════════════════════════════════════════

/// How motion wakes the dormant session.
#[derive(Clone, Debug, PartialEq)]
pub struct WakeConfig {
    /// Energy that must be exceeded to wake.
    pub threshold: f32,
    /// Energy lost every dormant frame.
    pub decay:     f32,
    /// Displacement (px/frame) below which motion is ignored.
    pub min_speed: f32,
    /// Energy gained per pixel of displacement.
    pub gain:      f32,
}

impl Default for WakeConfig {
    fn default() -> Self {
        WakeConfig { threshold: 40.0, decay: 1.5, min_speed: 10.0, gain: 0.5 }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// SessionConfig
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Debug, PartialEq)]
pub struct SessionConfig {
    pub particle_count:  usize,
    /// Cursor easing toward the raw fingertip, per tick.
    pub smoothing:       f32,
    /// Hover time needed to open a photo.
    pub dwell:           Duration,
    /// Cursor-to-carrier distance (px) that counts as hovering.
    pub snap_distance:   f32,
    /// An open photo closes once the cursor is `close_margin × snap_distance`
    /// away from its carrier.
    pub close_margin:    f32,
    /// Particle easing in the cube formations.
    pub idle_ease:       f32,
    /// Particle easing in the galaxy.
    pub galaxy_ease:     f32,
    pub rotation_speeds: Rotation,
    pub layout:          LayoutParams,
    pub wake:            WakeConfig,
    pub roles:           HandRoles,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            particle_count:  600,
            smoothing:       0.15,
            dwell:           Duration::from_millis(500),
            snap_distance:   70.0,
            close_margin:    1.5,
            idle_ease:       0.08,
            galaxy_ease:     0.1,
            rotation_speeds: Rotation::SPEEDS,
            layout:          LayoutParams::default(),
            wake:            WakeConfig::default(),
            roles:           HandRoles::default(),
        }
    }
}

impl SessionConfig {
    /// Distance at which an open photo closes.
    pub fn close_distance(&self) -> f32 {
        self.snap_distance * self.close_margin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swapping_roles_twice_is_identity() {
        let r = HandRoles::default();
        assert_eq!(r.swapped().pointer, Handedness::Right);
        assert_eq!(r.swapped().swapped(), r);
    }

    #[test]
    fn galaxy_eases_faster_than_cube() {
        let c = SessionConfig::default();
        assert!(c.galaxy_ease > c.idle_ease);
        assert_eq!(c.close_distance(), 105.0);
    }
}
