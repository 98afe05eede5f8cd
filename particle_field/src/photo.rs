//! Photo handles.
//!
//! Photos are decoded elsewhere; the field only keeps a cheap shared handle
//! to each one so a carrier particle can hand it to the renderer.

use std::fmt;
use std::sync::Arc;

use crate::FieldError;

/// A decoded picture as packed `0xAARRGGBB` pixels, row-major.
#[derive(Clone, PartialEq, Eq)]
pub struct PhotoImage {
    width:  usize,
    height: usize,
    pixels: Vec<u32>,
}

impl PhotoImage {
    pub fn new(width: usize, height: usize, pixels: Vec<u32>) -> Result<Self, FieldError> {
        if width == 0 || height == 0 || pixels.len() != width * height {
            return Err(FieldError::ImageSize { width, height, len: pixels.len() });
        }
        Ok(PhotoImage { width, height, pixels })
    }

    pub fn width(&self)  -> usize { self.width }
    pub fn height(&self) -> usize { self.height }
    pub fn pixels(&self) -> &[u32] { &self.pixels }

    pub fn pixel(&self, x: usize, y: usize) -> u32 {
        self.pixels[y * self.width + x]
    }
}

impl fmt::Debug for PhotoImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PhotoImage({}×{})", self.width, self.height)
    }
}

#[derive(Debug)]
struct Photo {
    id:    String,
    name:  String,
    image: PhotoImage,
}

/// Immutable, cheaply clonable reference to an ingested photo.
#[derive(Clone, Debug)]
pub struct PhotoHandle(Arc<Photo>);

impl PhotoHandle {
    pub fn new(id: impl Into<String>, name: impl Into<String>, image: PhotoImage) -> Self {
        PhotoHandle(Arc::new(Photo { id: id.into(), name: name.into(), image }))
    }

    pub fn id(&self)    -> &str        { &self.0.id }
    pub fn name(&self)  -> &str        { &self.0.name }
    pub fn image(&self) -> &PhotoImage { &self.0.image }

    /// Same id, name and pixels.  `==` only compares ids.
    pub fn same_picture(&self, other: &PhotoHandle) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
            || (self.id() == other.id() && self.name() == other.name() && self.image() == other.image())
    }
}

/// Handles are equal when they name the same photo.
impl PartialEq for PhotoHandle {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for PhotoHandle {}
