//! A single animated point and its static attributes.

use glam::{Vec2, Vec3};

use crate::photo::PhotoHandle;

// ════════════════════════════════════════════════════════════════════════════
// Palette (ARGB)
// ════════════════════════════════════════════════════════════════════════════

pub const PRIMARY:   u32 = 0xFF00FFFF; // cyan
pub const SECONDARY: u32 = 0xFFFF00FF; // magenta
pub const WHITE:     u32 = 0xFFFFFFFF;

/// Size and color every carrier takes on.
pub const CARRIER_STYLE: Style = Style { base_size: 8.0, color: WHITE };

/// Palette a particle is born with, cycling by id.
pub fn natural_color(id: usize) -> u32 {
    match id % 3 {
        0 => PRIMARY,
        1 => SECONDARY,
        _ => WHITE,
    }
}

/// Visual attributes that a photo binding overrides.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Style {
    pub base_size: f32,
    pub color:     u32,
}

/// A particle's binding to a photo.
#[derive(Clone, Debug, PartialEq)]
pub struct Carrier {
    pub photo: PhotoHandle,
    /// Position on the galaxy's inner ring, `0..carrier_count`.
    pub slot:  usize,
}

// ════════════════════════════════════════════════════════════════════════════
// Particle
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Debug)]
pub struct Particle {
    pub id:       usize,
    /// Current screen-space position, eased every tick.
    pub position: Vec2,
    /// Fixed point inside the cube volume (x, y); `depth` completes it.
    pub anchor:   Vec2,
    pub depth:    f32,
    /// Random angle in [0, 2π) driving the twinkle.
    pub phase:    f32,
    pub style:    Style,
    natural:      Style,
    carrier:      Option<Carrier>,
}

impl Particle {
    pub fn new(id: usize, position: Vec2, anchor: Vec2, depth: f32, phase: f32, style: Style) -> Self {
        Particle {
            id,
            position,
            anchor,
            depth,
            phase,
            style,
            natural: style,
            carrier: None,
        }
    }

    /// The particle's point in the cube volume.
    pub fn cube_point(&self) -> Vec3 {
        self.anchor.extend(self.depth)
    }

    pub fn is_carrier(&self) -> bool {
        self.carrier.is_some()
    }

    pub fn carrier(&self) -> Option<&Carrier> {
        self.carrier.as_ref()
    }

    pub fn photo(&self) -> Option<&PhotoHandle> {
        self.carrier.as_ref().map(|c| &c.photo)
    }

    /// Bind a photo; the particle takes on the carrier look.
    pub fn bind(&mut self, photo: PhotoHandle, slot: usize) {
        self.carrier = Some(Carrier { photo, slot });
        self.style = CARRIER_STYLE;
    }

    /// Swap the bound photo, keeping the slot.  No-op on non-carriers.
    pub(crate) fn replace_photo(&mut self, photo: PhotoHandle) {
        if let Some(c) = &mut self.carrier {
            c.photo = photo;
        }
    }

    /// Drop any photo binding and restore the natural look.
    pub fn unbind(&mut self) {
        self.carrier = None;
        self.style = self.natural;
    }
}
