//! The single owner of all interactive state.
//!
//! A `Session` is driven from one thread: [`Session::on_frame`] whenever a
//! detection frame arrives, [`Session::tick`] once per animation frame.
//! Everything the presentation layer needs to know leaves through
//! [`Session::drain_signals`].

use std::time::Duration;

use hand_gesture::{DetectionFrame, Viewport};
use particle_field::{Mode, Moment, ParticleField, PhotoHandle, Rotation};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::SessionConfig;
use crate::interaction::{Cursor, InteractionState};
use crate::mode::ModeMachine;
use crate::perception::PerceptionAdapter;
use crate::signal::{Signal, Signals};

pub struct Session {
    config:      SessionConfig,
    field:       ParticleField,
    modes:       ModeMachine,
    perception:  PerceptionAdapter,
    interaction: InteractionState,
    rotation:    Rotation,
    viewport:    Viewport,
    signals:     Signals,
    rng:         StdRng,
    photos:      Vec<PhotoHandle>,
}

impl Session {
    pub fn new(config: SessionConfig, viewport: Viewport) -> Self {
        Self::with_rng(config, viewport, StdRng::from_os_rng())
    }

    /// Deterministic session for tests and `--seed`.
    pub fn with_seed(config: SessionConfig, viewport: Viewport, seed: u64) -> Self {
        Self::with_rng(config, viewport, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: SessionConfig, viewport: Viewport, mut rng: StdRng) -> Self {
        let field = ParticleField::new(config.particle_count, viewport, config.layout.clone(), &mut rng);
        log::info!("session started with {} particles at {}x{}",
                   field.len(), viewport.width, viewport.height);
        Session {
            config,
            field,
            modes:       ModeMachine::default(),
            perception:  PerceptionAdapter::default(),
            interaction: InteractionState::default(),
            rotation:    Rotation::default(),
            viewport,
            signals:     Signals::default(),
            rng,
            photos:      Vec::new(),
        }
    }

    // ── inputs ────────────────────────────────────────────────────────────

    /// Apply one detection frame.
    pub fn on_frame(&mut self, frame: &DetectionFrame) {
        let mode = self.modes.mode();
        let seen = self.perception.ingest(
            frame, mode, &mut self.interaction.cursor, self.viewport, &self.config,
        );

        if mode == Mode::Dormant {
            if let Some(progress) = seen.wake_progress {
                self.signals.emit(Signal::HoverProgress(progress));
            }
            if seen.wake_requested && self.modes.wake(&mut self.signals) {
                log::info!("woke at energy {:.1}", self.perception.wake_energy());
            }
            return;
        }

        if self.modes.apply_gesture(seen.gesture, &mut self.signals) == Some(Mode::IdleFormation) {
            self.interaction.force_close(&mut self.signals);
        }
    }

    /// Advance one animation frame to elapsed time `now`.
    pub fn tick(&mut self, now: Duration) {
        let mode = self.modes.mode();
        self.rotation.advance(&self.config.rotation_speeds);
        self.interaction.cursor.smooth(self.config.smoothing);

        let ease = match mode {
            Mode::ExpandedFormation => self.config.galaxy_ease,
            _ => self.config.idle_ease,
        };
        let moment = Moment { mode, now, viewport: self.viewport, rotation: self.rotation };
        self.field.step(&moment, ease);

        self.interaction.resolve(&self.field, mode, now, &self.config, &mut self.signals);
    }

    pub fn resize(&mut self, viewport: Viewport) {
        if viewport != self.viewport {
            log::debug!("viewport {}x{}", viewport.width, viewport.height);
            self.viewport = viewport;
        }
    }

    /// Replace the photo collection; returns whether anything changed.
    ///
    /// Carriers are only redrawn when the ids differ from the current set.
    /// With the same ids, edited pictures are swapped in place.
    pub fn set_photos(&mut self, mut photos: Vec<PhotoHandle>) -> bool {
        let same_ids = photos.len() == self.photos.len()
            && photos.iter().zip(&self.photos).all(|(a, b)| a.id() == b.id());
        if same_ids {
            let swapped = self.field.refresh_photos(&photos);
            if swapped > 0 {
                log::info!("{} edited photos refreshed", swapped);
                self.photos = photos;
            }
            return swapped > 0;
        }

        if photos.len() > self.field.len() {
            log::warn!("only the first {} of {} photos fit on the field", self.field.len(), photos.len());
            photos.truncate(self.field.len());
        }
        if let Err(e) = self.field.assign_photos(&photos, &mut self.rng) {
            log::error!("photo assignment failed: {}", e);
            return false;
        }
        log::info!("{} photos assigned", photos.len());
        self.photos = photos;
        true
    }

    pub fn drain_signals(&mut self) -> Vec<Signal> {
        self.signals.drain()
    }

    // ── accessors ─────────────────────────────────────────────────────────

    pub fn mode(&self)        -> Mode              { self.modes.mode() }
    pub fn field(&self)       -> &ParticleField    { &self.field }
    pub fn interaction(&self) -> &InteractionState { &self.interaction }
    pub fn cursor(&self)      -> &Cursor           { &self.interaction.cursor }
    pub fn viewport(&self)    -> Viewport          { self.viewport }
    pub fn rotation(&self)    -> Rotation          { self.rotation }
    pub fn photos(&self)      -> &[PhotoHandle]    { &self.photos }
    pub fn config(&self)      -> &SessionConfig    { &self.config }
    pub fn wake_energy(&self) -> f32               { self.perception.wake_energy() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use hand_gesture::{synthetic_hand_at_tip, Handedness, Pose};
    use particle_field::PhotoImage;

    fn session(particles: usize) -> Session {
        let cfg = SessionConfig { particle_count: particles, ..SessionConfig::default() };
        Session::with_seed(cfg, Viewport::new(800.0, 600.0), 3)
    }

    fn photo(id: &str) -> PhotoHandle {
        PhotoHandle::new(id, id, PhotoImage::new(1, 1, vec![0]).unwrap())
    }

    fn gesture(pose: Pose) -> DetectionFrame {
        DetectionFrame::new(vec![synthetic_hand_at_tip(Handedness::Right, Vec2::new(0.5, 0.5), pose, 1.0)])
    }

    fn awake(particles: usize) -> Session {
        let mut s = session(particles);
        s.modes.wake(&mut s.signals);
        s.drain_signals();
        s
    }

    #[test]
    fn starts_dormant_with_idle_cursor() {
        let s = session(50);
        assert_eq!(s.mode(), Mode::Dormant);
        assert!(!s.cursor().active);
        assert_eq!(s.field().len(), 50);
    }

    #[test]
    fn dormant_frames_report_wake_progress() {
        let mut s = session(10);
        s.on_frame(&DetectionFrame::empty());
        assert_eq!(s.drain_signals(), vec![Signal::HoverProgress(0.0)]);
    }

    #[test]
    fn gestures_ignored_while_dormant() {
        let mut s = session(10);
        s.on_frame(&gesture(Pose::Open));
        assert_eq!(s.mode(), Mode::Dormant);
    }

    #[test]
    fn open_then_fist_round_trip() {
        let mut s = awake(10);
        s.on_frame(&gesture(Pose::Open));
        s.on_frame(&gesture(Pose::Open));
        s.on_frame(&gesture(Pose::Fist));
        assert_eq!(s.mode(), Mode::IdleFormation);
        assert_eq!(s.drain_signals(), vec![
            Signal::ModeChanged(Mode::ExpandedFormation),
            Signal::ModeChanged(Mode::IdleFormation),
        ]);
    }

    #[test]
    fn rotation_advances_in_every_mode() {
        let mut s = session(10);
        s.tick(Duration::from_millis(16));
        s.tick(Duration::from_millis(32));
        assert!((s.rotation().yaw - 0.016).abs() < 1e-6);
    }

    #[test]
    fn unchanged_photo_ids_do_not_reassign() {
        let mut s = session(20);
        assert!(s.set_photos(vec![photo("a"), photo("b")]));
        let before: Vec<_> = s.field().carriers().map(|p| p.id).collect();
        assert!(!s.set_photos(vec![photo("a"), photo("b")]));
        let after: Vec<_> = s.field().carriers().map(|p| p.id).collect();
        assert_eq!(before, after);
        assert!(s.set_photos(vec![photo("b"), photo("a")]));
    }

    #[test]
    fn edited_photo_under_same_id_is_swapped_in_place() {
        let mut s = session(20);
        let pic = |v| PhotoHandle::new("a", "a", PhotoImage::new(1, 1, vec![v]).unwrap());
        assert!(s.set_photos(vec![pic(1), photo("b")]));
        let before: Vec<_> = s.field().carriers().map(|p| p.id).collect();

        assert!(s.set_photos(vec![pic(2), photo("b")]));
        let after: Vec<_> = s.field().carriers().map(|p| p.id).collect();
        assert_eq!(before, after);
        assert_eq!(s.field().carrier_of("a").unwrap().photo().unwrap().image().pixel(0, 0), 2);
        assert_eq!(s.photos()[0].image().pixel(0, 0), 2);
        assert!(!s.set_photos(vec![pic(2), photo("b")]));
    }

    #[test]
    fn excess_photos_are_truncated() {
        let mut s = session(3);
        let set: Vec<_> = ["a", "b", "c", "d", "e"].into_iter().map(photo).collect();
        assert!(s.set_photos(set));
        assert_eq!(s.photos().len(), 3);
        assert_eq!(s.field().carrier_count(), 3);
    }

    #[test]
    fn empty_collection_clears_carriers() {
        let mut s = session(10);
        s.set_photos(vec![photo("a")]);
        assert!(s.set_photos(Vec::new()));
        assert_eq!(s.field().carriers().count(), 0);
    }

    #[test]
    fn galaxy_eases_with_galaxy_factor() {
        let mut s = awake(10);
        s.on_frame(&gesture(Pose::Open));
        let before: Vec<_> = s.field().particles().iter().map(|p| p.position).collect();
        let moment = Moment {
            mode:     Mode::ExpandedFormation,
            now:      Duration::from_millis(100),
            viewport: s.viewport(),
            rotation: Rotation { pitch: 0.005, yaw: 0.008, roll: 0.003 },
        };
        let targets = s.field().targets(&moment);
        s.tick(Duration::from_millis(100));
        for ((p, b), t) in s.field().particles().iter().zip(before).zip(targets) {
            assert!((p.position - (b + (t - b) * 0.1)).length() < 1e-3);
        }
    }
}
