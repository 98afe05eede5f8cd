//! Turns detection frames into cursor, gesture and wake-energy updates.

use glam::Vec2;
use hand_gesture::{classify, distance, DetectionFrame, Gesture, Viewport};
use particle_field::Mode;

use crate::config::SessionConfig;
use crate::interaction::Cursor;

/// What one frame contributed, for the session to act on.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Perceived {
    pub gesture:        Gesture,
    /// Normalized wake progress; only produced while dormant.
    pub wake_progress:  Option<f32>,
    pub wake_requested: bool,
}

#[derive(Debug, Default)]
pub struct PerceptionAdapter {
    wake_energy:  f32,
    last_pointer: Option<Vec2>,
    gesture:      Gesture,
}

impl PerceptionAdapter {
    pub fn wake_energy(&self) -> f32 { self.wake_energy }

    /// Latest classified gesture-hand state.
    pub fn gesture(&self) -> Gesture { self.gesture }

    /// Apply one frame.  Updates `cursor` in place.
    pub fn ingest(
        &mut self,
        frame:    &DetectionFrame,
        mode:     Mode,
        cursor:   &mut Cursor,
        viewport: Viewport,
        cfg:      &SessionConfig,
    ) -> Perceived {
        // ── pointer hand ──────────────────────────────────────────────────
        let mut displacement = 0.0;
        match frame.hand(cfg.roles.pointer) {
            Some(hand) => {
                let tip = viewport.project(hand.index_tip(), true);
                if let Some(prev) = self.last_pointer {
                    displacement = distance(prev, tip);
                }
                self.last_pointer = Some(tip);
                cursor.raw = tip;
                cursor.active = true;
            }
            None => {
                self.last_pointer = None;
                cursor.active = false;
            }
        }

        // ── gesture hand ──────────────────────────────────────────────────
        self.gesture = frame.hand(cfg.roles.gesture).map(classify).unwrap_or_default();

        let mut out = Perceived { gesture: self.gesture, ..Perceived::default() };
        if mode == Mode::Dormant {
            let wake = &cfg.wake;
            if displacement > wake.min_speed {
                self.wake_energy += displacement * wake.gain;
            }
            self.wake_energy = (self.wake_energy - wake.decay).max(0.0);
            out.wake_progress = Some((self.wake_energy / wake.threshold).min(1.0));
            out.wake_requested = self.wake_energy > wake.threshold;
        }
        out
    }
}
