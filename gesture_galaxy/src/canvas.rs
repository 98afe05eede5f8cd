//! Software ARGB framebuffer with the handful of primitives the renderer
//! needs: blended discs, soft glows, rings, rectangles, bitmap text and a
//! scaled image blit.
//!
//! Pixels are `0xAARRGGBB`; the alpha byte of stored pixels is always 0xFF.

use glam::Vec2;
use particle_field::PhotoImage;

/// How a source colour combines with the pixel already present.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Blend {
    /// `dst + src·α`, saturating.  Overlapping particles brighten.
    Add,
    /// `dst·(1−α) + src·α`.
    Over,
}

pub struct Frame {
    width:  usize,
    height: usize,
    pixels: Vec<u32>,
}

impl Frame {
    pub fn new(width: usize, height: usize) -> Self {
        Frame { width, height, pixels: vec![0xFF000000; width * height] }
    }

    pub fn width(&self)  -> usize  { self.width }
    pub fn height(&self) -> usize  { self.height }
    pub fn pixels(&self) -> &[u32] { &self.pixels }

    pub fn pixel(&self, x: usize, y: usize) -> Option<u32> {
        (x < self.width && y < self.height).then(|| self.pixels[y * self.width + x])
    }

    /// Resize, discarding contents.
    pub fn resize(&mut self, width: usize, height: usize) {
        if (width, height) != (self.width, self.height) {
            self.width = width;
            self.height = height;
            self.pixels = vec![0xFF000000; width * height];
        }
    }

    pub fn clear(&mut self, color: u32) {
        self.pixels.fill(color | 0xFF000000);
    }

    // ── pixels ────────────────────────────────────────────────────────────

    pub fn plot(&mut self, x: i32, y: i32, color: u32, alpha: f32, blend: Blend) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        let idx = y as usize * self.width + x as usize;
        let dst = self.pixels[idx];
        self.pixels[idx] = match blend {
            Blend::Add  => add(dst, color, alpha),
            Blend::Over => over(dst, color, alpha),
        };
    }

    // ── shapes ────────────────────────────────────────────────────────────

    /// Solid disc with a one-pixel anti-aliased rim.
    pub fn fill_circle(&mut self, center: Vec2, radius: f32, color: u32, alpha: f32, blend: Blend) {
        if radius <= 0.0 || alpha <= 0.0 {
            return;
        }
        self.for_each_in_radius(center, radius + 1.0, |frame, x, y, d| {
            let coverage = (radius + 0.5 - d).clamp(0.0, 1.0);
            if coverage > 0.0 {
                frame.plot(x, y, color, alpha * coverage, blend);
            }
        });
    }

    /// Halo fading quadratically from `center` out to `radius`.
    pub fn glow(&mut self, center: Vec2, radius: f32, color: u32, alpha: f32, blend: Blend) {
        if radius <= 0.0 || alpha <= 0.0 {
            return;
        }
        self.for_each_in_radius(center, radius, |frame, x, y, d| {
            let falloff = 1.0 - d / radius;
            if falloff > 0.0 {
                frame.plot(x, y, color, alpha * falloff * falloff, blend);
            }
        });
    }

    /// Circle outline of the given stroke width.
    pub fn ring(&mut self, center: Vec2, radius: f32, width: f32, color: u32, alpha: f32) {
        let half = width / 2.0;
        self.for_each_in_radius(center, radius + half + 1.0, |frame, x, y, d| {
            let coverage = (half + 0.5 - (d - radius).abs()).clamp(0.0, 1.0);
            if coverage > 0.0 {
                frame.plot(x, y, color, alpha * coverage, Blend::Over);
            }
        });
    }

    fn for_each_in_radius(&mut self, center: Vec2, reach: f32, mut f: impl FnMut(&mut Self, i32, i32, f32)) {
        let x0 = (center.x - reach).floor().max(0.0) as i32;
        let y0 = (center.y - reach).floor().max(0.0) as i32;
        let x1 = (center.x + reach).ceil().min(self.width as f32 - 1.0) as i32;
        let y1 = (center.y + reach).ceil().min(self.height as f32 - 1.0) as i32;
        for y in y0..=y1 {
            for x in x0..=x1 {
                let d = Vec2::new(x as f32 + 0.5, y as f32 + 0.5).distance(center);
                if d <= reach {
                    f(self, x, y, d);
                }
            }
        }
    }

    /// Darken towards the corners: clear inside `inner` of the centre-to-corner
    /// distance, ramping linearly to `max_alpha` black at the corners.
    pub fn vignette(&mut self, inner: f32, max_alpha: f32) {
        let center = Vec2::new(self.width as f32, self.height as f32) / 2.0;
        let corner = center.length();
        if corner <= 0.0 || inner >= 1.0 {
            return;
        }
        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                let d = Vec2::new(x as f32 + 0.5, y as f32 + 0.5).distance(center) / corner;
                if d > inner {
                    let alpha = max_alpha * ((d - inner) / (1.0 - inner)).min(1.0);
                    self.plot(x, y, 0xFF000000, alpha, Blend::Over);
                }
            }
        }
    }

    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: u32, alpha: f32) {
        for row in y.max(0)..(y + h).min(self.height as i32) {
            for col in x.max(0)..(x + w).min(self.width as i32) {
                self.plot(col, row, color, alpha, Blend::Over);
            }
        }
    }

    pub fn draw_border(&mut self, x: i32, y: i32, w: i32, h: i32, color: u32) {
        self.fill_rect(x, y, w, 1, color, 1.0);
        self.fill_rect(x, y + h - 1, w, 1, color, 1.0);
        self.fill_rect(x, y, 1, h, color, 1.0);
        self.fill_rect(x + w - 1, y, 1, h, color, 1.0);
    }

    // ── images ────────────────────────────────────────────────────────────

    /// Nearest-neighbour blit of `image` into the `w × h` box at (`x`, `y`).
    pub fn blit_scaled(&mut self, image: &PhotoImage, x: i32, y: i32, w: i32, h: i32) {
        if w <= 0 || h <= 0 || image.width() == 0 || image.height() == 0 {
            return;
        }
        for row in 0..h {
            let sy = row as usize * image.height() / h as usize;
            for col in 0..w {
                let sx = col as usize * image.width() / w as usize;
                let src = image.pixel(sx, sy);
                let a = (src >> 24) as f32 / 255.0;
                self.plot(x + col, y + row, src, a, Blend::Over);
            }
        }
    }

    // ── text ──────────────────────────────────────────────────────────────

    /// Width in pixels of `text` at `scale`.
    pub fn text_width(text: &str, scale: i32) -> i32 {
        let n = text.chars().count() as i32;
        if n == 0 { 0 } else { (n * 4 - 1) * scale }
    }

    /// Draw `text` with the 3×5 bitmap font, each font pixel a
    /// `scale × scale` block.
    pub fn text(&mut self, text: &str, x: i32, y: i32, scale: i32, color: u32) {
        let mut cx = x;
        for ch in text.chars() {
            for (row, &bits) in char_glyph(ch).iter().enumerate() {
                for col in 0..3 {
                    if bits & (1 << (2 - col)) != 0 {
                        self.fill_rect(cx + col * scale, y + row as i32 * scale, scale, scale, color, 1.0);
                    }
                }
            }
            cx += 4 * scale;
            if cx >= self.width as i32 { break; }
        }
    }

    /// [`Frame::text`] horizontally centred on `cx`.
    pub fn text_centered(&mut self, text: &str, cx: i32, y: i32, scale: i32, color: u32) {
        self.text(text, cx - Self::text_width(text, scale) / 2, y, scale, color);
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Colour arithmetic
// ────────────────────────────────────────────────────────────────────────────

fn channels(c: u32) -> [f32; 3] {
    [((c >> 16) & 0xFF) as f32, ((c >> 8) & 0xFF) as f32, (c & 0xFF) as f32]
}

fn pack([r, g, b]: [f32; 3]) -> u32 {
    let q = |v: f32| v.round().clamp(0.0, 255.0) as u32;
    0xFF000000 | (q(r) << 16) | (q(g) << 8) | q(b)
}

fn add(dst: u32, src: u32, alpha: f32) -> u32 {
    let (d, s) = (channels(dst), channels(src));
    let a = alpha.clamp(0.0, 1.0);
    pack([d[0] + s[0] * a, d[1] + s[1] * a, d[2] + s[2] * a])
}

fn over(dst: u32, src: u32, alpha: f32) -> u32 {
    let (d, s) = (channels(dst), channels(src));
    let a = alpha.clamp(0.0, 1.0);
    pack([
        d[0] * (1.0 - a) + s[0] * a,
        d[1] * (1.0 - a) + s[1] * a,
        d[2] * (1.0 - a) + s[2] * a,
    ])
}

// ────────────────────────────────────────────────────────────────────────────
// Minimal 3×5 bitmap font
// ────────────────────────────────────────────────────────────────────────────

fn char_glyph(c: char) -> [u8; 5] {
    match c {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b001, 0b001, 0b001],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        'a' | 'A' => [0b111, 0b101, 0b111, 0b101, 0b101],
        'b' | 'B' => [0b110, 0b101, 0b110, 0b101, 0b110],
        'c' | 'C' => [0b111, 0b100, 0b100, 0b100, 0b111],
        'd' | 'D' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'e' | 'E' => [0b111, 0b100, 0b111, 0b100, 0b111],
        'f' | 'F' => [0b111, 0b100, 0b111, 0b100, 0b100],
        'g' | 'G' => [0b111, 0b100, 0b101, 0b101, 0b111],
        'h' | 'H' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'i' | 'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'j' | 'J' => [0b001, 0b001, 0b001, 0b101, 0b111],
        'k' | 'K' => [0b101, 0b101, 0b110, 0b101, 0b101],
        'l' | 'L' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'm' | 'M' => [0b101, 0b111, 0b101, 0b101, 0b101],
        'n' | 'N' => [0b111, 0b101, 0b101, 0b101, 0b101],
        'o' | 'O' => [0b111, 0b101, 0b101, 0b101, 0b111],
        'p' | 'P' => [0b111, 0b101, 0b111, 0b100, 0b100],
        'q' | 'Q' => [0b111, 0b101, 0b101, 0b111, 0b001],
        'r' | 'R' => [0b110, 0b101, 0b110, 0b101, 0b101],
        's' | 'S' => [0b111, 0b100, 0b111, 0b001, 0b111],
        't' | 'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'u' | 'U' => [0b101, 0b101, 0b101, 0b101, 0b111],
        'v' | 'V' => [0b101, 0b101, 0b101, 0b010, 0b010],
        'w' | 'W' => [0b101, 0b101, 0b101, 0b111, 0b101],
        'x' | 'X' => [0b101, 0b101, 0b010, 0b101, 0b101],
        'y' | 'Y' => [0b101, 0b101, 0b111, 0b010, 0b010],
        'z' | 'Z' => [0b111, 0b001, 0b010, 0b100, 0b111],
        '/' => [0b001, 0b001, 0b010, 0b100, 0b100],
        '-' | '_' => [0b000, 0b000, 0b111, 0b000, 0b000],
        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        ',' => [0b000, 0b000, 0b000, 0b010, 0b100],
        ':' => [0b000, 0b010, 0b000, 0b010, 0b000],
        '=' => [0b000, 0b111, 0b000, 0b111, 0b000],
        '+' => [0b000, 0b010, 0b111, 0b010, 0b000],
        '(' => [0b001, 0b010, 0b010, 0b010, 0b001],
        ')' => [0b100, 0b010, 0b010, 0b010, 0b100],
        ' ' => [0b000, 0b000, 0b000, 0b000, 0b000],
        _   => [0b000, 0b000, 0b010, 0b000, 0b000], // fallback dot
    }
}
