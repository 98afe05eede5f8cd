//! # gesture_galaxy
//!
//! Hand-gesture controlled particle galaxy with photo carriers.
//!
//! ## Modes
//!
//! | Mode | Formation | Leaves on |
//! |---|---|---|
//! | Dormant | dim rotating cube | waving the pointer hand (wake energy) |
//! | Idle formation | rotating cube | gesture hand open → expanded |
//! | Expanded formation | galaxy, photos on an inner ring | gesture hand fist → idle |
//!
//! While expanded, holding the cursor on a photo carrier for the dwell time
//! opens that photo; moving well away closes it.
//!
//! ## Hands
//!
//! One hand points (its index fingertip is the cursor) and the other
//! gestures.  Roles follow the tracker's mirrored labels and can be swapped
//! with `--swap-hands`.
//!
//! ## Feature flags
//!
//! * (default): **Simulation mode**: the mouse is the pointer hand, keys
//!   drive the gesture hand (see [`visualizer`]).
//! * `leap`: **Hardware mode**: polls a real LeapMotion controller via LeapC.

pub mod config;
pub mod signal;
pub mod perception;
pub mod mode;
pub mod interaction;
pub mod session;
pub mod overlay;
pub mod canvas;
pub mod render;
pub mod source;
pub mod photos;
pub mod visualizer;
pub mod error;
pub mod app;

pub use app::{run, App, AppConfig};
pub use config::{HandRoles, SessionConfig, WakeConfig};
pub use error::AppError;
pub use session::Session;
pub use signal::Signal;
