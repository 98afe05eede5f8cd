//! Synthetic hands.
//!
//! Used by the keyboard/mouse simulation source and by tests: builds a
//! plausible 21-point hand, fingers pointing up the image, in either an open
//! or a fist pose.

use glam::Vec2;

use crate::landmark::{Hand, Handedness, Landmark, LANDMARK_COUNT, INDEX_TIP};

/// Hand pose for [`synthetic_hand`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pose {
    Open,
    Fist,
}

/// Landmark layout in hand units (1 unit = 0.01 of the image at scale 1.0),
/// relative to the wrist.  Image y grows downward, so fingers have negative y.
fn offsets(pose: Pose) -> [(f32, f32); LANDMARK_COUNT] {
    // Per finger: x column, then (MCP, PIP, DIP, TIP) heights.
    let (pip, dip, tip) = match pose {
        Pose::Open => (-12.0, -15.0, -18.0),
        Pose::Fist => (-11.0,  -8.0,  -6.0),
    };
    let thumb_tip = match pose {
        Pose::Open => (-9.0, -8.0),
        Pose::Fist => (-3.0, -7.0),
    };

    let mut out = [(0.0, 0.0); LANDMARK_COUNT];
    out[1] = (-2.0, -2.0);
    out[2] = (-5.0, -4.0);
    out[3] = (-7.0, -6.0);
    out[4] = thumb_tip;
    for (finger, x) in [-3.0_f32, -1.0, 1.0, 3.0].into_iter().enumerate() {
        let base = 5 + finger * 4;
        out[base]     = (x, -8.0);
        out[base + 1] = (x, pip);
        out[base + 2] = (x, dip);
        out[base + 3] = (x, tip);
    }
    out
}

/// Build a hand with its wrist at `wrist` (normalized coordinates).
pub fn synthetic_hand(handedness: Handedness, wrist: Vec2, pose: Pose, scale: f32) -> Hand {
    let unit = 0.01 * scale;
    let mut landmarks = [Landmark::ZERO; LANDMARK_COUNT];
    for (lm, (dx, dy)) in landmarks.iter_mut().zip(offsets(pose)) {
        *lm = wrist + Vec2::new(dx, dy) * unit;
    }
    Hand::new(handedness, landmarks)
}

/// Build a hand whose index fingertip lands exactly on `tip`.
pub fn synthetic_hand_at_tip(handedness: Handedness, tip: Vec2, pose: Pose, scale: f32) -> Hand {
    let (dx, dy) = offsets(pose)[INDEX_TIP];
    let wrist = tip - Vec2::new(dx, dy) * 0.01 * scale;
    synthetic_hand(handedness, wrist, pose, scale)
}
