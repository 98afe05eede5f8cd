//! Outbound notifications for the presentation layer.
//!
//! The session never calls into the UI.  It queues [`Signal`]s and the run
//! loop drains them once per frame, the same way note events are drained
//! from a player.

use particle_field::{Mode, PhotoHandle};

#[derive(Clone, Debug, PartialEq)]
pub enum Signal {
    /// The mode changed to this value.
    ModeChanged(Mode),
    /// Wake progress while dormant, dwell progress afterwards (0.0–1.0).
    HoverProgress(f32),
    /// A photo opened (`Some`) or the open photo closed (`None`).
    PhotoOpened(Option<PhotoHandle>),
}

/// Queue of signals not yet seen by the presentation layer.
#[derive(Debug, Default)]
pub struct Signals {
    pending: Vec<Signal>,
}

impl Signals {
    pub fn emit(&mut self, signal: Signal) {
        self.pending.push(signal);
    }

    /// Take every queued signal, oldest first.
    pub fn drain(&mut self) -> Vec<Signal> {
        std::mem::take(&mut self.pending)
    }

    pub fn pending(&self) -> &[Signal] {
        &self.pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_empties_in_order() {
        let mut s = Signals::default();
        s.emit(Signal::HoverProgress(0.5));
        s.emit(Signal::ModeChanged(Mode::IdleFormation));
        assert_eq!(
            s.drain(),
            vec![Signal::HoverProgress(0.5), Signal::ModeChanged(Mode::IdleFormation)]
        );
        assert!(s.pending().is_empty());
    }
}
