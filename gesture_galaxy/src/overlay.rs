//! Presentation-side view of the session, built only from signals.

use particle_field::{Mode, PhotoHandle};

use crate::signal::Signal;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Overlay {
    pub mode:           Mode,
    /// Wake energy while dormant, dwell progress afterwards.
    pub hover_progress: f32,
    pub active_photo:   Option<PhotoHandle>,
    pub photo_count:    usize,
}

impl Overlay {
    pub fn apply(&mut self, signal: &Signal) {
        match signal {
            Signal::ModeChanged(mode)    => self.mode = *mode,
            Signal::HoverProgress(p)     => self.hover_progress = p.clamp(0.0, 1.0),
            Signal::PhotoOpened(photo)   => self.active_photo = photo.clone(),
        }
    }

    pub fn apply_all<'a>(&mut self, signals: impl IntoIterator<Item = &'a Signal>) {
        for s in signals {
            self.apply(s);
        }
    }
}
