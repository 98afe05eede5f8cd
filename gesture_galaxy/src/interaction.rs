//! Cursor state and dwell-based photo selection.
//!
//! Each tick the resolver looks for the nearest carrier within snap
//! distance.  Staying on the same carrier for the dwell time opens its
//! photo; drifting well away from the open photo's carrier closes it again.
//! The close radius is wider than the snap radius so the view doesn't
//! flicker at the boundary.

use std::time::Duration;

use glam::Vec2;
use hand_gesture::{distance, lerp_point};
use particle_field::{Mode, ParticleField, PhotoHandle};

use crate::config::SessionConfig;
use crate::signal::{Signal, Signals};

// ════════════════════════════════════════════════════════════════════════════
// Cursor
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cursor {
    /// Smoothed position, what the user sees.
    pub position: Vec2,
    /// Latest fingertip position, before smoothing.
    pub raw:      Vec2,
    pub active:   bool,
}

impl Default for Cursor {
    fn default() -> Self {
        let off_screen = Vec2::new(-100.0, -100.0);
        Cursor { position: off_screen, raw: off_screen, active: false }
    }
}

impl Cursor {
    /// Ease the visible cursor toward the raw fingertip.
    pub fn smooth(&mut self, factor: f32) {
        if self.active {
            self.position = lerp_point(self.position, self.raw, factor);
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// InteractionState
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Default)]
pub struct InteractionState {
    pub cursor:   Cursor,
    hovered:      Option<usize>,
    hover_start:  Duration,
    active_photo: Option<PhotoHandle>,
}

impl InteractionState {
    /// Particle id under the cursor, if any.
    pub fn hovered(&self) -> Option<usize> { self.hovered }

    pub fn hover_start(&self) -> Duration { self.hover_start }

    pub fn active_photo(&self) -> Option<&PhotoHandle> { self.active_photo.as_ref() }

    pub fn active_photo_id(&self) -> Option<&str> {
        self.active_photo.as_ref().map(|p| p.id())
    }

    /// Close the open photo regardless of cursor distance.  Returns whether
    /// anything was open.
    pub fn force_close(&mut self, signals: &mut Signals) -> bool {
        if self.active_photo.take().is_some() {
            signals.emit(Signal::PhotoOpened(None));
            true
        } else {
            false
        }
    }

    /// Run one tick of hover / dwell / open / close resolution.
    pub fn resolve(
        &mut self,
        field:   &ParticleField,
        mode:    Mode,
        now:     Duration,
        cfg:     &SessionConfig,
        signals: &mut Signals,
    ) {
        let candidate = if mode == Mode::ExpandedFormation && self.cursor.active {
            nearest_carrier(field, self.cursor.position, cfg.snap_distance)
        } else {
            None
        };

        match candidate {
            Some(id) if self.active_photo.is_none() => {
                if self.hovered != Some(id) {
                    self.hovered = Some(id);
                    self.hover_start = now;
                    signals.emit(Signal::HoverProgress(0.0));
                } else {
                    let held = now.saturating_sub(self.hover_start).as_secs_f32();
                    let progress = (held / cfg.dwell.as_secs_f32().max(f32::EPSILON)).min(1.0);
                    signals.emit(Signal::HoverProgress(progress));
                    if progress >= 1.0 {
                        self.open(field, id, signals);
                    }
                }
            }
            None if self.active_photo.is_none() && self.hovered.is_some() => {
                self.hovered = None;
                signals.emit(Signal::HoverProgress(0.0));
            }
            _ => {}
        }

        self.check_close(field, cfg, signals);
    }

    fn open(&mut self, field: &ParticleField, id: usize, signals: &mut Signals) {
        if let Some(photo) = field.particle(id).and_then(|p| p.photo()) {
            log::info!("opening photo {:?}", photo.name());
            self.active_photo = Some(photo.clone());
            signals.emit(Signal::PhotoOpened(Some(photo.clone())));
        }
    }

    fn check_close(&mut self, field: &ParticleField, cfg: &SessionConfig, signals: &mut Signals) {
        let Some(active) = &self.active_photo else { return };

        let Some(carrier) = field.carrier_of(active.id()) else {
            // The photo left the collection.
            self.force_close(signals);
            return;
        };
        if self.cursor.active && distance(carrier.position, self.cursor.position) > cfg.close_distance() {
            log::info!("closing photo {:?}", active.name());
            self.force_close(signals);
        }
    }
}

/// Nearest carrier strictly within `snap` of `cursor`.
pub fn nearest_carrier(field: &ParticleField, cursor: Vec2, snap: f32) -> Option<usize> {
    field.carriers()
        .map(|p| (p.id, distance(p.position, cursor)))
        .filter(|&(_, d)| d < snap)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(id, _)| id)
}
