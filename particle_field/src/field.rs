//! The particle field: a fixed-size set of particles, their galaxy scatter
//! points, and the photo-carrier subset.

use std::f32::consts::TAU;

use glam::Vec2;
use hand_gesture::{lerp_point, Viewport};
use rand::seq::index;
use rand::Rng;

use crate::layout::{stable_depth, target_for, LayoutContext, LayoutParams, Moment};
use crate::particle::{natural_color, Particle, Style};
use crate::photo::PhotoHandle;
use crate::FieldError;

#[derive(Debug)]
pub struct ParticleField {
    particles: Vec<Particle>,
    /// Normalized (0.0–1.0) galaxy positions, one per particle.
    scatter:   Vec<Vec2>,
    params:    LayoutParams,
    carriers:  usize,
}

impl ParticleField {
    /// Create `count` particles inside the cube, all starting at the
    /// viewport centre.
    pub fn new<R: Rng + ?Sized>(count: usize, viewport: Viewport, params: LayoutParams, rng: &mut R) -> Self {
        let half = params.cube_half_size;
        let start = viewport.center();
        let particles = (0..count)
            .map(|id| {
                let anchor = Vec2::new(rng.random_range(-half..=half), rng.random_range(-half..=half));
                let style = Style {
                    base_size: rng.random_range(1.0..3.0),
                    color:     natural_color(id),
                };
                let phase = rng.random_range(0.0..TAU);
                Particle::new(id, start, anchor, stable_depth(id, half), phase, style)
            })
            .collect();

        let mut field = ParticleField { particles, scatter: Vec::new(), params, carriers: 0 };
        field.regenerate_scatter(rng);
        field
    }

    pub fn particles(&self) -> &[Particle] { &self.particles }
    pub fn params(&self) -> &LayoutParams { &self.params }
    pub fn len(&self) -> usize { self.particles.len() }
    pub fn is_empty(&self) -> bool { self.particles.is_empty() }
    pub fn carrier_count(&self) -> usize { self.carriers }

    pub fn particle(&self, id: usize) -> Option<&Particle> {
        self.particles.get(id)
    }

    pub fn carriers(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter().filter(|p| p.is_carrier())
    }

    /// The carrier bound to the photo with this id.
    pub fn carrier_of(&self, photo_id: &str) -> Option<&Particle> {
        self.carriers().find(|p| p.photo().is_some_and(|ph| ph.id() == photo_id))
    }

    // ── photos ────────────────────────────────────────────────────────────

    /// Rebind the carrier subset to `photos`.
    ///
    /// All existing bindings are cleared, then `photos.len()` distinct random
    /// particles each take one photo.  Galaxy scatter points are redrawn for
    /// every particle.
    pub fn assign_photos<R: Rng + ?Sized>(&mut self, photos: &[PhotoHandle], rng: &mut R) -> Result<(), FieldError> {
        if photos.len() > self.particles.len() {
            return Err(FieldError::TooManyPhotos {
                photos:    photos.len(),
                particles: self.particles.len(),
            });
        }

        for p in &mut self.particles {
            p.unbind();
        }
        let picks = index::sample(rng, self.particles.len(), photos.len());
        for (slot, (idx, photo)) in picks.iter().zip(photos).enumerate() {
            self.particles[idx].bind(photo.clone(), slot);
        }
        self.carriers = photos.len();
        self.regenerate_scatter(rng);

        log::debug!("assigned {} photos across {} particles", photos.len(), self.particles.len());
        Ok(())
    }

    /// Swap each carrier's handle for the one in `photos` at its slot when
    /// the ids agree.  Carriers, slots and scatter are left alone.  Returns
    /// how many handles changed.
    pub fn refresh_photos(&mut self, photos: &[PhotoHandle]) -> usize {
        let mut swapped = 0;
        for p in &mut self.particles {
            let Some(carrier) = p.carrier() else { continue };
            let Some(fresh) = photos.get(carrier.slot) else { continue };
            if fresh.id() == carrier.photo.id() && !fresh.same_picture(&carrier.photo) {
                p.replace_photo(fresh.clone());
                swapped += 1;
            }
        }
        swapped
    }

    fn regenerate_scatter<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.scatter = (0..self.particles.len())
            .map(|_| Vec2::new(rng.random::<f32>(), rng.random::<f32>()))
            .collect();
    }

    // ── motion ────────────────────────────────────────────────────────────

    /// Layout context for `moment` over this field.
    pub fn layout_context(&self, moment: &Moment) -> LayoutContext<'_> {
        LayoutContext {
            mode:          moment.mode,
            now:           moment.now,
            viewport:      moment.viewport,
            rotation:      moment.rotation,
            carrier_count: self.carriers,
            params:        &self.params,
        }
    }

    /// Target positions for every particle (index-aligned).  Pure: calling it
    /// twice with the same moment gives the same answer.
    pub fn targets(&self, moment: &Moment) -> Vec<Vec2> {
        let ctx = self.layout_context(moment);
        self.particles.iter()
            .zip(&self.scatter)
            .map(|(p, &s)| target_for(p, s, &ctx))
            .collect()
    }

    /// Ease every particle toward its target by `ease` (0.0–1.0).
    pub fn step(&mut self, moment: &Moment, ease: f32) {
        let targets = self.targets(moment);
        for (p, t) in self.particles.iter_mut().zip(targets) {
            p.position = lerp_point(p.position, t, ease);
        }
    }
}
