//! End-to-end session behaviour driven through synthetic detection frames.

use std::time::Duration;

use glam::Vec2;
use gesture_galaxy::{SessionConfig, Session, Signal};
use hand_gesture::{synthetic_hand_at_tip, DetectionFrame, Hand, Handedness, Pose, Viewport};
use particle_field::{Mode, PhotoHandle, PhotoImage};

const VP: Viewport = Viewport { width: 1000.0, height: 800.0 };

fn pointer(px: Vec2) -> Hand {
    // Camera coordinates are mirrored relative to the screen.
    let tip = Vec2::new(1.0 - px.x / VP.width, px.y / VP.height);
    synthetic_hand_at_tip(Handedness::Left, tip, Pose::Open, 1.0)
}

fn gesture(pose: Pose) -> Hand {
    synthetic_hand_at_tip(Handedness::Right, Vec2::new(0.15, 0.6), pose, 1.0)
}

fn frame(hands: Vec<Hand>) -> DetectionFrame {
    DetectionFrame::new(hands)
}

fn photos(n: usize) -> Vec<PhotoHandle> {
    (0..n)
        .map(|i| PhotoHandle::new(format!("photo-{}", i), format!("Photo {}", i),
                                  PhotoImage::new(2, 2, vec![0xFFFFFFFF; 4]).unwrap()))
        .collect()
}

fn mode_changes(signals: &[Signal]) -> Vec<Mode> {
    signals.iter()
        .filter_map(|s| match s { Signal::ModeChanged(m) => Some(*m), _ => None })
        .collect()
}

fn opened(signals: &[Signal]) -> Vec<Option<String>> {
    signals.iter()
        .filter_map(|s| match s {
            Signal::PhotoOpened(p) => Some(p.as_ref().map(|p| p.id().to_string())),
            _ => None,
        })
        .collect()
}

/// Wave, open the hand, and let the galaxy settle.
fn expanded_session(photo_count: usize) -> (Session, Duration) {
    let cfg = SessionConfig { particle_count: 120, ..SessionConfig::default() };
    let mut s = Session::with_seed(cfg, VP, 42);
    s.set_photos(photos(photo_count));

    let mut now = Duration::ZERO;
    for i in 0..3 {
        s.on_frame(&frame(vec![pointer(Vec2::new(100.0 + 60.0 * i as f32, 700.0))]));
    }
    s.on_frame(&frame(vec![pointer(Vec2::new(220.0, 700.0)), gesture(Pose::Open)]));
    assert_eq!(s.mode(), Mode::ExpandedFormation);

    for _ in 0..200 {
        now += Duration::from_millis(16);
        s.tick(now);
    }
    s.drain_signals();
    (s, now)
}

#[test]
fn wave_wakes_exactly_once() {
    let mut s = Session::with_seed(SessionConfig::default(), VP, 1);
    assert_eq!(s.field().len(), 600);

    let start = Vec2::new(300.0, 400.0);
    let path = [start, start + Vec2::new(50.0, 0.0), start + Vec2::new(100.0, 0.0)];
    for p in path {
        s.on_frame(&frame(vec![pointer(p)]));
    }
    for _ in 0..20 {
        s.on_frame(&frame(vec![pointer(path[2])]));
    }

    assert!(s.wake_energy() > 40.0);
    let signals = s.drain_signals();
    assert_eq!(s.mode(), Mode::IdleFormation);
    assert_eq!(mode_changes(&signals), vec![Mode::IdleFormation]);
    // Wake progress stops once awake.
    let progress = signals.iter().filter(|s| matches!(s, Signal::HoverProgress(_))).count();
    assert_eq!(progress, 3);
}

#[test]
fn stillness_never_wakes() {
    let mut s = Session::with_seed(SessionConfig::default(), VP, 2);
    for _ in 0..100 {
        s.on_frame(&frame(vec![pointer(Vec2::new(500.0, 400.0))]));
    }
    assert_eq!(s.mode(), Mode::Dormant);
    assert_eq!(s.wake_energy(), 0.0);
}

#[test]
fn repeated_open_gives_one_signal() {
    let (mut s, _) = expanded_session(0);
    for _ in 0..30 {
        s.on_frame(&frame(vec![gesture(Pose::Open)]));
    }
    assert!(mode_changes(&s.drain_signals()).is_empty());

    s.on_frame(&frame(vec![gesture(Pose::Fist)]));
    s.on_frame(&frame(vec![gesture(Pose::Fist)]));
    assert_eq!(mode_changes(&s.drain_signals()), vec![Mode::IdleFormation]);
}

#[test]
fn carriers_match_photos() {
    let (s, _) = expanded_session(5);
    let carriers: Vec<_> = s.field().carriers().collect();
    assert_eq!(carriers.len(), 5);
    let mut ids: Vec<_> = carriers.iter().map(|p| p.photo().unwrap().id().to_string()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 5);
}

/// Put the cursor on the slot-0 carrier and let it settle there.
fn hover_first_carrier(s: &mut Session, now: &mut Duration) -> (Vec2, Vec<Signal>) {
    let target = s.field().carriers()
        .find(|p| p.carrier().map(|c| c.slot) == Some(0))
        .map(|p| p.position)
        .unwrap();
    let mut signals = Vec::new();
    for _ in 0..60 {
        s.on_frame(&frame(vec![pointer(target)]));
        *now += Duration::from_millis(16);
        s.tick(*now);
        signals.extend(s.drain_signals());
    }
    (target, signals)
}

#[test]
fn dwell_opens_and_leaving_closes() {
    let (mut s, mut now) = expanded_session(4);
    let (target, signals) = hover_first_carrier(&mut s, &mut now);

    let opens = opened(&signals);
    assert_eq!(opens.len(), 1);
    let open_id = opens[0].clone().unwrap();
    assert_eq!(s.interaction().active_photo_id(), Some(open_id.as_str()));

    // Move far away from every carrier.
    let away = Vec2::new(target.x, if target.y > 400.0 { 20.0 } else { 780.0 });
    let mut after = Vec::new();
    for _ in 0..60 {
        s.on_frame(&frame(vec![pointer(away)]));
        now += Duration::from_millis(16);
        s.tick(now);
        after.extend(s.drain_signals());
    }
    assert_eq!(opened(&after), vec![None]);
    assert!(s.interaction().active_photo().is_none());
}

#[test]
fn fist_closes_open_photo() {
    let (mut s, mut now) = expanded_session(3);
    hover_first_carrier(&mut s, &mut now);
    assert!(s.interaction().active_photo().is_some());

    s.on_frame(&frame(vec![gesture(Pose::Fist)]));
    let signals = s.drain_signals();
    assert_eq!(mode_changes(&signals), vec![Mode::IdleFormation]);
    assert_eq!(opened(&signals), vec![None]);
    assert!(s.interaction().active_photo().is_none());
}

#[test]
fn photo_removed_while_open_closes_it() {
    let (mut s, mut now) = expanded_session(3);
    hover_first_carrier(&mut s, &mut now);
    assert!(s.interaction().active_photo().is_some());

    assert!(s.set_photos(Vec::new()));
    s.tick(now + Duration::from_millis(16));
    assert_eq!(opened(&s.drain_signals()), vec![None]);
}
