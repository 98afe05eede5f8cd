//! Draws one frame from the session and the overlay.  Reads only.

use std::time::Duration;

use glam::Vec2;
use particle_field::{Mode, Particle, PRIMARY, SECONDARY, WHITE};

use crate::canvas::{Blend, Frame};
use crate::overlay::Overlay;
use crate::session::Session;

// ════════════════════════════════════════════════════════════════════════════
// Look
// ════════════════════════════════════════════════════════════════════════════

const BG_COLOR:         u32 = 0xFF05050C;
const PANEL_BG:         u32 = 0xFF000000;
const HINT_COLOR:       u32 = 0xFF67E8F9;
const DIM_TEXT:         u32 = 0xFFB0B0B0;
const BAR_TRACK:        u32 = 0xFF1F2937;

const PARTICLE_ALPHA:   f32 = 0.8;
const DORMANT_DIM:      f32 = 0.35;
const IDLE_GLOW:        f32 = 4.0;
const CARRIER_SIZE:     f32 = 10.0;
const CARRIER_SIZE_HOT: f32 = 16.0;
const CARRIER_GLOW:     f32 = 15.0;
const CARRIER_GLOW_HOT: f32 = 30.0;
const LABEL_OFFSET:     f32 = 30.0;
const CURSOR_DOT:       f32 = 5.0;
const CURSOR_RING:      f32 = 20.0;
const VIGNETTE_INNER:   f32 = 0.4;
const VIGNETTE_ALPHA:   f32 = 0.8;

/// Render `session` into `frame` at elapsed time `now`.
pub fn render(frame: &mut Frame, session: &Session, overlay: &Overlay, now: Duration) {
    frame.clear(BG_COLOR);

    let mode = session.mode();
    let t_ms = now.as_secs_f32() * 1000.0;
    let hovered = session.interaction().hovered();
    let active_id = session.interaction().active_photo_id();

    for p in session.field().particles() {
        if p.is_carrier() {
            let is_hovered = hovered == Some(p.id);
            let is_active = active_id.is_some() && p.photo().map(|ph| ph.id()) == active_id;
            draw_carrier(frame, p, mode, is_hovered, is_active);
        } else {
            draw_particle(frame, p, mode, t_ms);
        }
    }

    // Hovered carrier's name, only while nothing is open.
    if active_id.is_none() {
        if let Some(p) = hovered.and_then(|id| session.field().particle(id)) {
            if let Some(photo) = p.photo() {
                let at = p.position + Vec2::new(0.0, LABEL_OFFSET);
                frame.text_centered(photo.name(), at.x as i32, at.y as i32, 2, WHITE);
            }
        }
    }

    let cursor = session.cursor();
    if cursor.active && mode != Mode::Dormant {
        let accent = if active_id.is_some() { SECONDARY } else { PRIMARY };
        frame.glow(cursor.position, CURSOR_RING + 10.0, accent, 0.25, Blend::Over);
        frame.fill_circle(cursor.position, CURSOR_DOT, WHITE, 1.0, Blend::Over);
        frame.ring(cursor.position, CURSOR_RING, 2.0, accent, 1.0);
    }

    draw_overlay(frame, overlay);
}

fn draw_particle(frame: &mut Frame, p: &Particle, mode: Mode, t_ms: f32) {
    let mut size = p.style.base_size;
    let mut alpha = PARTICLE_ALPHA;
    match mode {
        Mode::ExpandedFormation => {
            let blink = (t_ms * 0.003 + p.phase).sin() * 0.5 + 0.5;
            alpha = 0.3 + blink * 0.5;
            // Distant stars.
            if p.id % 7 == 0 {
                size *= 1.5;
                alpha *= 0.4;
            }
        }
        Mode::IdleFormation => frame.glow(p.position, size + IDLE_GLOW, p.style.color, 0.3, Blend::Add),
        Mode::Dormant => alpha *= DORMANT_DIM,
    }
    frame.fill_circle(p.position, size, p.style.color, alpha, Blend::Add);
}

fn draw_carrier(frame: &mut Frame, p: &Particle, mode: Mode, hovered: bool, active: bool) {
    let dim = if mode == Mode::Dormant { DORMANT_DIM } else { 1.0 };
    let size = if hovered || active { CARRIER_SIZE_HOT } else { CARRIER_SIZE };
    let (glow, glow_color) = if hovered {
        (CARRIER_GLOW_HOT, SECONDARY)
    } else {
        (CARRIER_GLOW, PRIMARY)
    };
    let fill = if hovered && !active { SECONDARY } else { p.style.color };

    frame.glow(p.position, size + glow, glow_color, 0.6 * dim, Blend::Add);
    frame.fill_circle(p.position, size, fill, dim, Blend::Add);
}

// ════════════════════════════════════════════════════════════════════════════
// Overlay chrome
// ════════════════════════════════════════════════════════════════════════════

fn draw_overlay(frame: &mut Frame, overlay: &Overlay) {
    frame.vignette(VIGNETTE_INNER, VIGNETTE_ALPHA);
    match overlay.mode {
        Mode::Dormant => draw_awaken(frame, overlay.hover_progress),
        Mode::IdleFormation => draw_status_panel(frame, overlay.photo_count),
        Mode::ExpandedFormation => {}
    }
    if let Some(photo) = &overlay.active_photo {
        draw_photo_modal(frame, photo, overlay.hover_progress);
    }
}

fn draw_awaken(frame: &mut Frame, progress: f32) {
    let cx = frame.width() as i32 / 2;
    let cy = frame.height() as i32 / 2;
    frame.text_centered("AWAKEN", cx, cy - 60, 8, WHITE);
    frame.text_centered("WAVE YOUR POINTING HAND TO ACTIVATE", cx, cy + 10, 2, HINT_COLOR);

    let (w, h) = (256, 8);
    let x = cx - w / 2;
    let y = cy + 40;
    frame.fill_rect(x, y, w, h, BAR_TRACK, 1.0);
    frame.fill_rect(x, y, (w as f32 * progress.clamp(0.0, 1.0)) as i32, h, PRIMARY, 1.0);
    frame.draw_border(x - 1, y - 1, w + 2, h + 2, 0xFF4B5563);
}

fn draw_status_panel(frame: &mut Frame, photo_count: usize) {
    let (x, y, w, h) = (24, 24, 300, 120);
    frame.fill_rect(x, y, w, h, PANEL_BG, 0.5);
    frame.draw_border(x, y, w, h, 0xFF333344);
    frame.text("PARTICLE CUBE", x + 14, y + 14, 3, PRIMARY);
    frame.text("OPEN HAND: EXPAND GALAXY", x + 14, y + 42, 2, DIM_TEXT);
    frame.text("FIST: BACK TO CUBE", x + 14, y + 58, 2, DIM_TEXT);
    frame.text("POINT: MOVE CURSOR", x + 14, y + 74, 2, DIM_TEXT);

    let photos = if photo_count > 0 {
        format!("{} PHOTOS LOADED", photo_count)
    } else {
        "NO PHOTOS - PRESS R TO RESCAN".to_string()
    };
    frame.text(&photos, x + 14, y + 96, 2, HINT_COLOR);
}

fn draw_photo_modal(frame: &mut Frame, photo: &particle_field::PhotoHandle, progress: f32) {
    let (fw, fh) = (frame.width() as f32, frame.height() as f32);
    frame.fill_rect(0, 0, fw as i32, fh as i32, PANEL_BG, 0.6);

    let img = photo.image();
    let (iw, ih) = (img.width() as f32, img.height() as f32);
    if iw == 0.0 || ih == 0.0 {
        return;
    }
    let scale = (fw * 0.8 / iw).min(fh * 0.7 / ih);
    let (w, h) = ((iw * scale) as i32, (ih * scale) as i32);
    let x = (fw as i32 - w) / 2;
    let y = (fh as i32 - h) / 2;

    frame.draw_border(x - 3, y - 3, w + 6, h + 6, SECONDARY);
    frame.blit_scaled(img, x, y, w, h);
    // Shrinks as the hover progress grows.
    if progress > 0.0 {
        let bar = (w as f32 * (1.0 - progress.clamp(0.0, 1.0))) as i32;
        frame.fill_rect(x, y, bar, 4, WHITE, 1.0);
    }
    frame.text_centered(photo.name(), fw as i32 / 2, y + h + 16, 3, WHITE);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SessionConfig;
    use crate::signal::Signal;
    use hand_gesture::{synthetic_hand_at_tip, DetectionFrame, Hand, Handedness, Pose, Viewport};
    use particle_field::{PhotoHandle, PhotoImage};

    const W: usize = 640;
    const H: usize = 480;

    fn ms(n: u64) -> Duration { Duration::from_millis(n) }

    fn vp() -> Viewport { Viewport::new(W as f32, H as f32) }

    fn session() -> Session {
        let cfg = SessionConfig { particle_count: 80, ..SessionConfig::default() };
        Session::with_seed(cfg, Viewport::new(320.0, 240.0), 5)
    }

    fn pointer(at: Vec2) -> Hand {
        let tip = Vec2::new(1.0 - at.x / W as f32, at.y / H as f32);
        synthetic_hand_at_tip(Handedness::Left, tip, Pose::Open, 1.0)
    }

    fn draw(s: &Session, o: &Overlay, now: Duration) -> Frame {
        let mut f = Frame::new(W, H);
        render(&mut f, s, o, now);
        f
    }

    fn expanded_overlay() -> Overlay {
        Overlay { mode: Mode::ExpandedFormation, ..Overlay::default() }
    }

    fn rgb(c: u32) -> (u32, u32, u32) {
        ((c >> 16) & 0xFF, (c >> 8) & 0xFF, c & 0xFF)
    }

    /// Woken, expanded and settled, one photo per name.
    fn galaxy(names: &[&str]) -> (Session, Duration) {
        let cfg = SessionConfig { particle_count: 120, ..SessionConfig::default() };
        let mut s = Session::with_seed(cfg, vp(), 21);
        let red = PhotoImage::new(2, 2, vec![0xFFFF0000; 4]).unwrap();
        s.set_photos(names.iter().enumerate()
            .map(|(i, name)| PhotoHandle::new(format!("p{}", i), *name, red.clone()))
            .collect());

        for i in 0..3 {
            s.on_frame(&DetectionFrame::new(vec![pointer(Vec2::new(100.0 + 60.0 * i as f32, 400.0))]));
        }
        let open = synthetic_hand_at_tip(Handedness::Right, Vec2::new(0.15, 0.6), Pose::Open, 1.0);
        s.on_frame(&DetectionFrame::new(vec![open]));
        assert_eq!(s.mode(), Mode::ExpandedFormation);

        let mut now = Duration::ZERO;
        for _ in 0..200 {
            now += ms(16);
            s.tick(now);
        }
        (s, now)
    }

    /// Hold the pointer on the slot-0 carrier, in lockstep, until `done`.
    fn hover(sessions: &mut [&mut Session], now: &mut Duration, done: impl Fn(&Session) -> bool) {
        for _ in 0..200 {
            if done(&*sessions[0]) {
                return;
            }
            let target = sessions[0].field().carriers()
                .find(|p| p.carrier().map(|c| c.slot) == Some(0))
                .map(|p| p.position)
                .unwrap();
            *now += ms(16);
            for s in sessions.iter_mut() {
                s.on_frame(&DetectionFrame::new(vec![pointer(target)]));
                s.tick(*now);
            }
        }
        panic!("hover did not settle");
    }

    #[test]
    fn dormant_frame_draws_awaken_chrome() {
        let mut s = session();
        for i in 0..30 {
            s.tick(ms(i * 16));
        }
        let mut f = Frame::new(320, 240);
        render(&mut f, &s, &Overlay::default(), ms(480));
        assert!(f.pixels().iter().any(|&p| p == WHITE));
        assert!(f.pixels().iter().any(|&p| p != BG_COLOR));
    }

    #[test]
    fn vignette_darkens_the_corners() {
        let s = session();
        let mut f = Frame::new(320, 240);
        render(&mut f, &s, &expanded_overlay(), Duration::ZERO);
        assert!(rgb(f.pixel(0, 0).unwrap()).2 < rgb(BG_COLOR).2);
    }

    #[test]
    fn modal_shows_photo_pixels() {
        let s = session();
        let red = PhotoImage::new(4, 4, vec![0xFFFF0000; 16]).unwrap();
        let mut o = Overlay::default();
        o.apply(&Signal::ModeChanged(Mode::ExpandedFormation));
        o.apply(&Signal::PhotoOpened(Some(PhotoHandle::new("r", "red", red))));
        let mut f = Frame::new(320, 240);
        render(&mut f, &s, &o, Duration::ZERO);
        assert_eq!(f.pixel(160, 120), Some(0xFFFF0000));
    }

    #[test]
    fn modal_bar_shrinks_with_progress() {
        let s = session();
        let red = PhotoImage::new(4, 4, vec![0xFFFF0000; 16]).unwrap();
        let mut o = expanded_overlay();
        o.active_photo = Some(PhotoHandle::new("r", "red", red));

        // 4×4 scaled by 84 to 336×336 at (152, 72).
        let f = draw(&s, &o, Duration::ZERO);
        assert_eq!(f.pixel(162, 73), Some(0xFFFF0000));

        o.hover_progress = 0.25;
        let f = draw(&s, &o, Duration::ZERO);
        assert_eq!(f.pixel(162, 73), Some(WHITE));
        assert_eq!(f.pixel(452, 73), Some(0xFFFF0000));
        assert_eq!(f.pixel(162, 80), Some(0xFFFF0000));
    }

    #[test]
    fn dormant_session_hides_an_active_cursor() {
        let cfg = SessionConfig { particle_count: 80, ..SessionConfig::default() };
        let mut pointed = Session::with_seed(cfg.clone(), vp(), 5);
        let mut absent = Session::with_seed(cfg, vp(), 5);
        let center = vp().center();
        for i in 1..=60 {
            pointed.on_frame(&DetectionFrame::new(vec![pointer(center)]));
            absent.on_frame(&DetectionFrame::empty());
            pointed.tick(ms(i * 16));
            absent.tick(ms(i * 16));
        }
        assert_eq!(pointed.mode(), Mode::Dormant);
        assert!(pointed.cursor().active);
        assert!(pointed.cursor().position.distance(center) < 1.0);

        let o = Overlay::default();
        assert_eq!(draw(&pointed, &o, ms(960)).pixels(), draw(&absent, &o, ms(960)).pixels());
    }

    #[test]
    fn awake_session_draws_the_cursor() {
        let (mut s, mut now) = galaxy(&[]);
        let center = vp().center();
        for _ in 0..60 {
            now += ms(16);
            s.on_frame(&DetectionFrame::new(vec![pointer(center)]));
            s.tick(now);
        }
        let c = s.cursor().position;
        let f = draw(&s, &expanded_overlay(), now);
        assert_eq!(f.pixel(c.x as usize, c.y as usize), Some(WHITE));
    }

    #[test]
    fn hovered_name_only_shows_while_nothing_is_open() {
        let (mut named, mut now) = galaxy(&["SUNSET", "DUNE"]);
        let (mut blank, _) = galaxy(&["", ""]);
        let o = expanded_overlay();

        hover(&mut [&mut named, &mut blank], &mut now, |s| s.interaction().hovered().is_some());
        assert!(named.interaction().active_photo().is_none());
        assert_ne!(draw(&named, &o, now).pixels(), draw(&blank, &o, now).pixels());

        hover(&mut [&mut named, &mut blank], &mut now, |s| s.interaction().active_photo().is_some());
        assert_eq!(draw(&named, &o, now).pixels(), draw(&blank, &o, now).pixels());
    }

    #[test]
    fn cursor_ring_turns_magenta_while_a_photo_is_open() {
        let (mut s, mut now) = galaxy(&["A"]);
        let o = expanded_overlay();
        let ring = |s: &Session, now: Duration| {
            let c = s.cursor().position;
            rgb(draw(s, &o, now).pixel((c.x + CURSOR_RING) as usize, c.y as usize).unwrap())
        };

        hover(&mut [&mut s], &mut now, |s| s.interaction().hovered().is_some());
        let (r, g, b) = ring(&s, now);
        assert!(r < 0x20 && g > 0xE0 && b > 0xE0, "expected cyan, got {:?}", (r, g, b));

        hover(&mut [&mut s], &mut now, |s| s.interaction().active_photo().is_some());
        let (r, g, b) = ring(&s, now);
        assert!(r > 0xE0 && g < 0x20 && b > 0xE0, "expected magenta, got {:?}", (r, g, b));
    }
}
