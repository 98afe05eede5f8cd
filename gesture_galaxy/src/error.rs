use std::io;
use std::path::PathBuf;

use particle_field::FieldError;
use thiserror::Error;

/// Errors surfaced by the application shell.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("window: {0}")]
    Window(#[from] minifb::Error),

    #[error("cannot read photo directory {path}: {source}")]
    PhotoDir { path: PathBuf, source: io::Error },

    #[error("cannot decode {path}: {source}")]
    Decode { path: PathBuf, source: image::ImageError },

    #[error(transparent)]
    Field(#[from] FieldError),
}
