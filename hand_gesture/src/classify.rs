//! Open-hand / fist classification from 21 landmarks.
//!
//! A digit is "folded" when its tip sits closer to the wrist than its middle
//! joint does (with some tolerance for the four fingers).  Three or more
//! folded digits make a fist.

use crate::geometry::distance;
use crate::landmark::{
    Hand, Landmark, LANDMARK_COUNT, WRIST,
    THUMB_IP, THUMB_TIP,
    INDEX_PIP, INDEX_TIP, MIDDLE_PIP, MIDDLE_TIP,
    RING_PIP, RING_TIP, PINKY_PIP, PINKY_TIP,
};

/// Tip-to-wrist distance must beat `FINGER_TOLERANCE × joint-to-wrist` for a
/// finger to count as extended.
pub const FINGER_TOLERANCE: f32 = 1.1;

/// Folded digits (out of 5) needed for a fist.
pub const FIST_MIN_FOLDED: usize = 3;

const FINGERS: [(usize, usize); 4] = [
    (INDEX_TIP,  INDEX_PIP),
    (MIDDLE_TIP, MIDDLE_PIP),
    (RING_TIP,   RING_PIP),
    (PINKY_TIP,  PINKY_PIP),
];

/// Discrete gesture of the gesture hand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Gesture {
    /// No gesture hand in view.
    #[default]
    None,
    Fist,
    Open,
}

/// Count folded digits (0–5).
pub fn folded_digits(landmarks: &[Landmark; LANDMARK_COUNT]) -> usize {
    let wrist = landmarks[WRIST];
    let reach = |i: usize| distance(landmarks[i], wrist);

    let fingers = FINGERS.iter()
        .filter(|&&(tip, pip)| reach(tip) < reach(pip) * FINGER_TOLERANCE)
        .count();
    let thumb = usize::from(reach(THUMB_TIP) < reach(THUMB_IP));

    fingers + thumb
}

/// Classify a set of landmarks.  Never returns [`Gesture::None`]; absence of
/// a hand is the caller's business.
pub fn classify_landmarks(landmarks: &[Landmark; LANDMARK_COUNT]) -> Gesture {
    if folded_digits(landmarks) >= FIST_MIN_FOLDED {
        Gesture::Fist
    } else {
        Gesture::Open
    }
}

/// Classify a validated hand.
pub fn classify(hand: &Hand) -> Gesture {
    classify_landmarks(&hand.landmarks)
}
