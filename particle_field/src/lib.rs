//! # particle_field
//!
//! A fixed population of particles that flows between two formations:
//!
//! * **Cube**: each particle holds a point inside a cube volume which is
//!   rotated (roll → pitch → yaw) and projected in perspective.  Used while
//!   the session is dormant or idle.
//! * **Galaxy**: particles spread over the whole viewport with a gentle
//!   drift, while photo carriers line up on an inner ring where a cursor can
//!   reach them.
//!
//! Positions ease toward their targets every tick.  A subset of particles,
//! one per photo, carries a [`PhotoHandle`]; the subset is redrawn whenever
//! the photo collection changes.

pub mod particle;
pub mod photo;
pub mod layout;
pub mod field;

use thiserror::Error;

pub use field::ParticleField;
pub use layout::{LayoutContext, LayoutParams, Mode, Moment, Rotation};
pub use particle::{Carrier, Particle, Style, CARRIER_STYLE, PRIMARY, SECONDARY, WHITE};
pub use photo::{PhotoHandle, PhotoImage};

/// Errors raised by the field and its photo types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("{photos} photos do not fit on {particles} particles")]
    TooManyPhotos { photos: usize, particles: usize },

    #[error("pixel buffer of {len} does not match a {width}×{height} image")]
    ImageSize { width: usize, height: usize, len: usize },
}
