//! Top-level application: wires the hand source, the session, the overlay
//! and the window together and drives them at ~60 fps.

use std::path::PathBuf;
use std::sync::mpsc::{Receiver, Sender, TryRecvError};
use std::time::{Duration, Instant};

use hand_gesture::{DetectionFrame, Viewport};

use crate::canvas::Frame;
use crate::config::SessionConfig;
use crate::error::AppError;
use crate::overlay::Overlay;
use crate::photos::load_photo_dir;
use crate::render::render;
use crate::session::Session;
use crate::source::{spawn_hand_source, SimInput};
use crate::visualizer::{UiCommand, Visualizer};

// ════════════════════════════════════════════════════════════════════════════
// AppConfig
// ════════════════════════════════════════════════════════════════════════════

/// Configuration for the full application.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub session:   SessionConfig,
    pub photo_dir: Option<PathBuf>,
    pub width:     usize,
    pub height:    usize,
    /// Fixed RNG seed; random when `None`.
    pub seed:      Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            session:   SessionConfig::default(),
            photo_dir: None,
            width:     1280,
            height:    720,
            seed:      None,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// App
// ════════════════════════════════════════════════════════════════════════════

/// Session plus the presentation state fed from its signals.
pub struct App {
    session:   Session,
    overlay:   Overlay,
    photo_dir: Option<PathBuf>,
}

impl App {
    pub fn new(cfg: &AppConfig, viewport: Viewport) -> Self {
        let session = match cfg.seed {
            Some(seed) => Session::with_seed(cfg.session.clone(), viewport, seed),
            None       => Session::new(cfg.session.clone(), viewport),
        };
        App { session, overlay: Overlay::default(), photo_dir: cfg.photo_dir.clone() }
    }

    /// (Re)load the photo directory, if any.  Returns whether the photo
    /// collection changed.
    pub fn load_photos(&mut self) -> Result<bool, AppError> {
        let Some(dir) = &self.photo_dir else { return Ok(false) };
        let photos = load_photo_dir(dir)?;
        let changed = self.session.set_photos(photos);
        self.overlay.photo_count = self.session.photos().len();
        Ok(changed)
    }

    pub fn handle_frame(&mut self, frame: &DetectionFrame) {
        self.session.on_frame(frame);
    }

    /// Advance the session and fold its signals into the overlay.
    pub fn tick(&mut self, now: Duration) {
        self.session.tick(now);
        for signal in self.session.drain_signals() {
            log::debug!("signal {:?}", signal);
            self.overlay.apply(&signal);
        }
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.session.resize(viewport);
    }

    pub fn draw(&self, frame: &mut Frame, now: Duration) {
        render(frame, &self.session, &self.overlay, now);
    }

    pub fn session(&self) -> &Session { &self.session }
    pub fn overlay(&self) -> &Overlay { &self.overlay }
}

// ════════════════════════════════════════════════════════════════════════════
// Hand source selection
// ════════════════════════════════════════════════════════════════════════════

#[cfg(not(feature = "leap"))]
fn hand_source(cfg: &SessionConfig) -> (Receiver<DetectionFrame>, Option<Sender<SimInput>>) {
    use crate::source::SimHandSource;

    let (sim_tx, sim_rx) = std::sync::mpsc::channel::<SimInput>();
    let frames = spawn_hand_source(SimHandSource { rx: sim_rx, roles: cfg.roles });
    log::info!("hand source: mouse/keyboard simulation");
    (frames, Some(sim_tx))
}

#[cfg(feature = "leap")]
fn hand_source(_cfg: &SessionConfig) -> (Receiver<DetectionFrame>, Option<Sender<SimInput>>) {
    use crate::source::LeapHandSource;

    log::info!("hand source: LeapMotion");
    (spawn_hand_source(LeapHandSource), None)
}

// ════════════════════════════════════════════════════════════════════════════
// run(): the main application loop
// ════════════════════════════════════════════════════════════════════════════

/// Run the full application until the window closes or the user quits.
pub fn run(cfg: AppConfig) -> Result<(), AppError> {
    let (frames, sim_tx) = hand_source(&cfg.session);
    let mut vis = Visualizer::new(cfg.width, cfg.height, sim_tx)?;

    let mut app = App::new(&cfg, vis.viewport());
    app.load_photos()?;

    let (w, h) = vis.size();
    let mut frame = Frame::new(w, h);
    let start = Instant::now();
    let mut source_alive = true;

    while vis.is_open() {
        // 1. Window input
        match vis.poll_input() {
            UiCommand::Quit => break,
            UiCommand::ReloadPhotos => {
                if let Err(e) = app.load_photos() {
                    log::warn!("photo rescan failed: {}", e);
                }
            }
            UiCommand::Continue => {}
        }

        // 2. Drain tracker frames
        while source_alive {
            match frames.try_recv() {
                Ok(f) => app.handle_frame(&f),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    log::warn!("hand source stopped; no further tracking input");
                    source_alive = false;
                }
            }
        }

        // 3. Follow window size
        let (w, h) = vis.size();
        frame.resize(w, h);
        app.resize(Viewport::new(w as f32, h as f32));

        // 4. Per-frame logic
        let now = start.elapsed();
        app.tick(now);

        // 5. Render
        app.draw(&mut frame, now);
        vis.present(&frame)?;
    }

    log::info!("window closed");
    Ok(())
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
