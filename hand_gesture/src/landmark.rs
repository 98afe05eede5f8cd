//! Typed hand detections.
//!
//! Detectors hand us loosely shaped data: a handedness label string and a
//! list of points.  [`RawHand`] is that shape; [`Hand`] is the validated
//! form with exactly [`LANDMARK_COUNT`] finite points and a known label.
//! Validation happens once, in [`DetectionFrame::from_raw`], and nothing
//! downstream re-checks it.

use glam::Vec2;
use thiserror::Error;

// ════════════════════════════════════════════════════════════════════════════
// Landmark indices (21-point hand model)
// ════════════════════════════════════════════════════════════════════════════

pub const LANDMARK_COUNT: usize = 21;

pub const WRIST:      usize = 0;
pub const THUMB_CMC:  usize = 1;
pub const THUMB_MCP:  usize = 2;
pub const THUMB_IP:   usize = 3;
pub const THUMB_TIP:  usize = 4;
pub const INDEX_MCP:  usize = 5;
pub const INDEX_PIP:  usize = 6;
pub const INDEX_DIP:  usize = 7;
pub const INDEX_TIP:  usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_DIP: usize = 11;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP:   usize = 13;
pub const RING_PIP:   usize = 14;
pub const RING_DIP:   usize = 15;
pub const RING_TIP:   usize = 16;
pub const PINKY_MCP:  usize = 17;
pub const PINKY_PIP:  usize = 18;
pub const PINKY_DIP:  usize = 19;
pub const PINKY_TIP:  usize = 20;

/// A normalized landmark position, both axes in 0.0–1.0 of the camera image.
pub type Landmark = Vec2;

// ════════════════════════════════════════════════════════════════════════════
// Handedness
// ════════════════════════════════════════════════════════════════════════════

/// The label a detector attaches to a hand.
///
/// This is the detector's label, not necessarily the user's physical hand:
/// camera-based detectors see a mirrored image.  Which label drives the
/// cursor is decided by the caller's role mapping.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Handedness {
    Left,
    Right,
}

impl Handedness {
    /// Parse a detector label, case-insensitively.
    pub fn from_label(label: &str) -> Result<Self, LandmarkError> {
        match label.trim().to_ascii_lowercase().as_str() {
            "left"  => Ok(Handedness::Left),
            "right" => Ok(Handedness::Right),
            _       => Err(LandmarkError::UnknownLabel(label.to_string())),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Handedness::Left  => "Left",
            Handedness::Right => "Right",
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Errors
// ════════════════════════════════════════════════════════════════════════════

/// Reasons a raw detector hand is rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LandmarkError {
    #[error("expected {LANDMARK_COUNT} landmarks, got {0}")]
    WrongCount(usize),

    #[error("landmark {0} has a non-finite coordinate")]
    NonFinite(usize),

    #[error("unknown handedness label {0:?}")]
    UnknownLabel(String),
}

// ════════════════════════════════════════════════════════════════════════════
// RawHand / Hand
// ════════════════════════════════════════════════════════════════════════════

/// One hand exactly as a detector reports it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawHand {
    pub label:     String,
    pub landmarks: Vec<(f32, f32)>,
}

/// A validated hand: a known label and 21 finite landmarks.
#[derive(Clone, Debug, PartialEq)]
pub struct Hand {
    pub handedness: Handedness,
    pub landmarks:  [Landmark; LANDMARK_COUNT],
}

impl Hand {
    pub fn new(handedness: Handedness, landmarks: [Landmark; LANDMARK_COUNT]) -> Self {
        Hand { handedness, landmarks }
    }

    pub fn landmark(&self, index: usize) -> Landmark {
        self.landmarks[index]
    }

    pub fn wrist(&self) -> Landmark {
        self.landmarks[WRIST]
    }

    pub fn index_tip(&self) -> Landmark {
        self.landmarks[INDEX_TIP]
    }
}

impl TryFrom<&RawHand> for Hand {
    type Error = LandmarkError;

    fn try_from(raw: &RawHand) -> Result<Self, Self::Error> {
        let handedness = Handedness::from_label(&raw.label)?;
        if raw.landmarks.len() != LANDMARK_COUNT {
            return Err(LandmarkError::WrongCount(raw.landmarks.len()));
        }
        let mut landmarks = [Landmark::ZERO; LANDMARK_COUNT];
        for (i, &(x, y)) in raw.landmarks.iter().enumerate() {
            if !x.is_finite() || !y.is_finite() {
                return Err(LandmarkError::NonFinite(i));
            }
            landmarks[i] = Landmark::new(x, y);
        }
        Ok(Hand { handedness, landmarks })
    }
}

// ════════════════════════════════════════════════════════════════════════════
// DetectionFrame
// ════════════════════════════════════════════════════════════════════════════

/// All hands seen in one detector frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DetectionFrame {
    pub hands: Vec<Hand>,
}

impl DetectionFrame {
    /// A frame in which nothing was detected.
    pub fn empty() -> Self {
        DetectionFrame::default()
    }

    pub fn new(hands: Vec<Hand>) -> Self {
        DetectionFrame { hands }
    }

    /// Validate raw detector output.  Malformed hands are dropped, so they
    /// read as "absent" to every consumer.
    pub fn from_raw(raw: &[RawHand]) -> Self {
        let hands = raw.iter()
            .filter_map(|r| match Hand::try_from(r) {
                Ok(h)  => Some(h),
                Err(e) => {
                    log::warn!("dropping malformed hand ({:?}): {}", r.label, e);
                    None
                }
            })
            .collect();
        DetectionFrame { hands }
    }

    /// First hand carrying the given label, if any.
    pub fn hand(&self, handedness: Handedness) -> Option<&Hand> {
        self.hands.iter().find(|h| h.handedness == handedness)
    }

    pub fn is_empty(&self) -> bool {
        self.hands.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(label: &str, n: usize) -> RawHand {
        RawHand {
            label:     label.to_string(),
            landmarks: (0..n).map(|i| (i as f32 / 40.0, 0.5)).collect(),
        }
    }

    #[test]
    fn labels_parse_case_insensitively() {
        assert_eq!(Handedness::from_label("Left"),  Ok(Handedness::Left));
        assert_eq!(Handedness::from_label("RIGHT"), Ok(Handedness::Right));
        assert!(Handedness::from_label("both").is_err());
    }

    #[test]
    fn valid_hand_converts() {
        let h = Hand::try_from(&raw("Right", 21)).unwrap();
        assert_eq!(h.handedness, Handedness::Right);
        assert_eq!(h.index_tip(), Landmark::new(8.0 / 40.0, 0.5));
    }

    #[test]
    fn short_hand_is_rejected() {
        assert_eq!(Hand::try_from(&raw("Left", 20)), Err(LandmarkError::WrongCount(20)));
    }

    #[test]
    fn nan_landmark_is_rejected() {
        let mut r = raw("Left", 21);
        r.landmarks[7].1 = f32::NAN;
        assert_eq!(Hand::try_from(&r), Err(LandmarkError::NonFinite(7)));
    }

    #[test]
    fn frame_drops_only_malformed_hands() {
        let frame = DetectionFrame::from_raw(&[raw("Left", 21), raw("Right", 3), raw("?", 21)]);
        assert_eq!(frame.hands.len(), 1);
        assert!(frame.hand(Handedness::Left).is_some());
        assert!(frame.hand(Handedness::Right).is_none());
    }
}
