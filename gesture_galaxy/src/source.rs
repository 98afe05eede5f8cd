//! Hand tracking sources, from LeapMotion hardware or mouse/keyboard
//! simulation.
//!
//! The public interface is a [`DetectionFrame`] delivered over an `mpsc`
//! channel.  The session doesn't need to know whether frames came from real
//! hardware or the simulator.

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use glam::Vec2;
use hand_gesture::{synthetic_hand_at_tip, DetectionFrame, Handedness, Pose, RawHand};

use crate::config::HandRoles;

// ════════════════════════════════════════════════════════════════════════════
// HandSource trait, shared by hardware and simulation
// ════════════════════════════════════════════════════════════════════════════

/// Anything that can deliver [`DetectionFrame`]s over a channel.
pub trait HandSource: Send + 'static {
    fn run(self: Box<Self>, tx: Sender<DetectionFrame>);
}

/// Spawn a hand source on its own thread and return the receiving end.
pub fn spawn_hand_source<H: HandSource>(source: H) -> Receiver<DetectionFrame> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || Box::new(source).run(tx));
    rx
}

// ════════════════════════════════════════════════════════════════════════════
// SimHandSource: mouse/keyboard simulation (always available)
// ════════════════════════════════════════════════════════════════════════════

/// Raw input from the simulation window.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SimInput {
    Frame {
        /// Pointer fingertip in normalized camera coordinates, `None` when
        /// the mouse is outside the window.
        pointer: Option<(f32, f32)>,
        /// Gesture hand pose, `None` when hidden.
        pose:    Option<Pose>,
    },
    Quit,
}

/// Synthesizes full 21-point hands from [`SimInput`] so simulated frames go
/// through the same validation and classification as tracked ones.
pub struct SimHandSource {
    pub rx:    Receiver<SimInput>,
    pub roles: HandRoles,
}

/// Hand size of synthesized hands.
const SIM_SCALE: f32 = 1.0;
/// Where the simulated gesture hand's index tip is held.
const SIM_GESTURE_TIP: (f32, f32) = (0.8, 0.6);

impl SimHandSource {
    fn raw_frame(&self, pointer: Option<(f32, f32)>, pose: Option<Pose>) -> Vec<RawHand> {
        let mut hands = Vec::with_capacity(2);
        if let Some((x, y)) = pointer {
            hands.push(raw(self.roles.pointer, Vec2::new(x, y), Pose::Open));
        }
        if let Some(pose) = pose {
            let (x, y) = SIM_GESTURE_TIP;
            hands.push(raw(self.roles.gesture, Vec2::new(x, y), pose));
        }
        hands
    }
}

fn raw(handedness: Handedness, tip: Vec2, pose: Pose) -> RawHand {
    let hand = synthetic_hand_at_tip(handedness, tip, pose, SIM_SCALE);
    RawHand {
        label:     handedness.label().to_string(),
        landmarks: hand.landmarks.iter().map(|l| (l.x, l.y)).collect(),
    }
}

impl HandSource for SimHandSource {
    fn run(self: Box<Self>, tx: Sender<DetectionFrame>) {
        for input in &self.rx {
            let frame = match input {
                SimInput::Frame { pointer, pose } => DetectionFrame::from_raw(&self.raw_frame(pointer, pose)),
                SimInput::Quit => return,
            };
            if tx.send(frame).is_err() { return; }
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// LeapHandSource: real hardware (feature = "leap")
// ════════════════════════════════════════════════════════════════════════════

/// Hand source backed by a LeapMotion controller.
///
/// Requires the `leap` feature flag and the LeapC shared library installed.
///
/// Joint positions (millimetres above the device) are mapped onto a
/// normalized camera-like image: x across `±X_RANGE`, y from `Y_TOP` down to
/// `Y_BOTTOM`.  Labels follow the mirrored camera convention, so the user's
/// right hand is reported as "Left".
#[cfg(feature = "leap")]
pub struct LeapHandSource;

#[cfg(feature = "leap")]
impl HandSource for LeapHandSource {
    fn run(self: Box<Self>, tx: Sender<DetectionFrame>) {
        use leaprs::*;

        let mut connection = match Connection::create(ConnectionConfig::default()) {
            Ok(c)  => c,
            Err(e) => {
                log::error!("LeapC connection failed: {:?}", e);
                return;
            }
        };
        if let Err(e) = connection.open() {
            log::error!("LeapMotion device failed to open: {:?}", e);
            return;
        }
        log::info!("LeapMotion tracking started");

        loop {
            let msg = match connection.poll(100) {
                Ok(m)  => m,
                Err(_) => continue,
            };

            if let Event::Tracking(frame) = msg.event() {
                let hands: Vec<RawHand> = frame.hands().map(|h| leap_raw_hand(&h)).collect();
                if tx.send(DetectionFrame::from_raw(&hands)).is_err() {
                    return;
                }
            }
        }
    }
}

#[cfg(feature = "leap")]
fn leap_raw_hand(hand: &leaprs::Hand) -> RawHand {
    use leaprs::HandType;

    const X_RANGE:  f32 = 200.0;
    const Y_TOP:    f32 = 400.0;
    const Y_BOTTOM: f32 = 100.0;

    // Camera images are mirrored relative to the user.
    let norm = |x: f32, y: f32| {
        (1.0 - (x + X_RANGE) / (2.0 * X_RANGE), (Y_TOP - y) / (Y_TOP - Y_BOTTOM))
    };

    let digits: Vec<_> = hand.digits().collect();
    let mut landmarks = Vec::with_capacity(hand_gesture::LANDMARK_COUNT);
    if digits.len() == 5 {
        // The middle metacarpal's base stands in for the wrist.
        let wrist = digits[2].metacarpal().prev_joint();
        landmarks.push(norm(wrist.x, wrist.y));
        // Per digit: base joint, two knuckles, tip.  The thumb's metacarpal
        // has zero length in LeapC, so its chain starts at the proximal bone.
        for digit in &digits {
            let proximal     = digit.proximal().prev_joint();
            let intermediate = digit.intermediate().prev_joint();
            let distal       = digit.distal().prev_joint();
            let tip          = digit.distal().next_joint();
            landmarks.push(norm(proximal.x, proximal.y));
            landmarks.push(norm(intermediate.x, intermediate.y));
            landmarks.push(norm(distal.x, distal.y));
            landmarks.push(norm(tip.x, tip.y));
        }
    }

    let label = match hand.hand_type() {
        HandType::Left => Handedness::Right,
        _              => Handedness::Left,
    };
    RawHand { label: label.label().to_string(), landmarks }
}
