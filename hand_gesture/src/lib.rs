//! # hand_gesture
//!
//! The perception-side building blocks for a hand-driven interface:
//!
//! * [`geometry`]: interpolation, distances, normalized → pixel mapping and
//!   roll/pitch/yaw rotation.
//! * [`landmark`]: the 21-point hand model, handedness labels, and
//!   [`DetectionFrame`], the validated per-frame detector result.
//! * [`classify`]: stateless open-hand / fist classification.
//! * [`synth`]: synthetic hands for simulation and tests.
//!
//! ## Quick start
//!
//! ```rust
//! use hand_gesture::{classify, synthetic_hand, Gesture, Handedness, Pose};
//! use glam::Vec2;
//!
//! let hand = synthetic_hand(Handedness::Right, Vec2::new(0.5, 0.7), Pose::Fist, 1.0);
//! assert_eq!(classify(&hand), Gesture::Fist);
//! ```

pub mod geometry;
pub mod landmark;
pub mod classify;
pub mod synth;

pub use classify::{classify, classify_landmarks, Gesture};
pub use geometry::{distance, lerp, lerp_point, rotate_3d, to_screen, Viewport};
pub use landmark::{DetectionFrame, Hand, Handedness, Landmark, LandmarkError, RawHand, LANDMARK_COUNT};
pub use synth::{synthetic_hand, synthetic_hand_at_tip, Pose};
