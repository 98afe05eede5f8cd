//! The `minifb` window: keyboard/mouse input in, framebuffer out.
//!
//! In simulation mode the window also plays the part of the hand tracker.
//! The mouse is the pointer hand's fingertip and the keys below set the
//! gesture hand:
//!
//! | Key | Effect |
//! |---|---|
//! | `O` | gesture hand open |
//! | `F` | gesture hand fist |
//! | `H` | hide the gesture hand |
//! | `R` | rescan the photo directory |
//! | `Q` / `Esc` | quit |

use std::sync::mpsc::Sender;
use std::time::Duration;

use hand_gesture::{Pose, Viewport};
use minifb::{Key, KeyRepeat, MouseMode, Window, WindowOptions};

use crate::canvas::Frame;
use crate::error::AppError;
use crate::source::SimInput;

/// What the run loop should do after polling input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UiCommand {
    Continue,
    ReloadPhotos,
    Quit,
}

pub struct Visualizer {
    window: Window,
    /// Present in simulation mode only.
    sim_tx: Option<Sender<SimInput>>,
    pose:   Option<Pose>,
}

impl Visualizer {
    pub fn new(width: usize, height: usize, sim_tx: Option<Sender<SimInput>>) -> Result<Self, AppError> {
        let mut window = Window::new(
            "Gesture Galaxy",
            width, height,
            WindowOptions {
                resize: true,
                ..WindowOptions::default()
            },
        )?;

        window.limit_update_rate(Some(Duration::from_millis(16))); // ~60fps

        Ok(Visualizer { window, sim_tx, pose: None })
    }

    pub fn is_open(&self) -> bool { self.window.is_open() }

    pub fn size(&self) -> (usize, usize) {
        let (w, h) = self.window.get_size();
        (w.max(1), h.max(1))
    }

    pub fn viewport(&self) -> Viewport {
        let (w, h) = self.size();
        Viewport::new(w as f32, h as f32)
    }

    /// Poll the keyboard and, in simulation mode, forward one synthetic
    /// tracker frame.
    pub fn poll_input(&mut self) -> UiCommand {
        if !self.window.is_open() {
            return UiCommand::Quit;
        }
        let pressed = |k: Key| self.window.is_key_pressed(k, KeyRepeat::No);

        if pressed(Key::Q) || pressed(Key::Escape) {
            if let Some(tx) = &self.sim_tx {
                let _ = tx.send(SimInput::Quit);
            }
            return UiCommand::Quit;
        }
        let reload = pressed(Key::R);

        if pressed(Key::O) {
            self.pose = Some(Pose::Open);
        } else if pressed(Key::F) {
            self.pose = Some(Pose::Fist);
        } else if pressed(Key::H) {
            self.pose = None;
        }

        if let Some(tx) = &self.sim_tx {
            let (w, h) = self.size();
            // The tracker reports camera coordinates, which perception mirrors
            // back; un-mirror here so the cursor follows the mouse.
            let pointer = self.window.get_mouse_pos(MouseMode::Discard)
                .map(|(mx, my)| (1.0 - mx / w as f32, my / h as f32));
            let _ = tx.send(SimInput::Frame { pointer, pose: self.pose });
        }

        if reload { UiCommand::ReloadPhotos } else { UiCommand::Continue }
    }

    pub fn present(&mut self, frame: &Frame) -> Result<(), AppError> {
        self.window.update_with_buffer(frame.pixels(), frame.width(), frame.height())?;
        Ok(())
    }
}
