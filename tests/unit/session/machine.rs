use super::*;

fn cfg() -> RevealConfig {
    RevealConfig {
        stages: 4,
        max_block: 16,
        min_block: 2,
        ..RevealConfig::default()
    }
}

fn image() -> Arc<RgbaImage> {
    Arc::new(RgbaImage::from_fn(8, 8, |x, y| {
        image::Rgba([(x * 30) as u8, (y * 30) as u8, 90, 255])
    }))
}

fn step(state: SessionState, event: Event) -> (SessionState, Vec<Effect>) {
    state.transition(event)
}

fn ready() -> SessionState {
    let s = SessionState::new(&cfg(), Canvas::new(8, 8));
    let (s, _) = step(s, Event::LoadRequested);
    let (s, _) = step(s, Event::ImageLoaded(image()));
    s
}

fn counting(total_seconds: u32) -> SessionState {
    let (s, _) = step(
        ready(),
        Event::Start {
            total_seconds,
            now_ms: 0,
        },
    );
    s
}

#[test]
fn load_flow_reaches_ready_with_coarse_preview() {
    let s = SessionState::new(&cfg(), Canvas::new(8, 8));
    let (s, fx) = step(s, Event::LoadRequested);
    assert_eq!(s.phase(), Phase::Loading);
    assert_eq!(fx, vec![Effect::LoadImage]);

    let (s, fx) = step(s, Event::ImageLoaded(image()));
    assert_eq!(s.phase(), Phase::Ready);
    assert_eq!(fx, vec![Effect::PresentPixelated { block_size: 16 }]);
    assert_eq!(s.source().unwrap().canvas(), Canvas::new(8, 8));
}

#[test]
fn failed_load_returns_to_idle() {
    let s = SessionState::new(&cfg(), Canvas::new(8, 8));
    let (s, _) = step(s, Event::LoadRequested);
    let (s, fx) = step(s, Event::ImageFailed("404".into()));
    assert_eq!(s.phase(), Phase::Idle);
    assert!(fx.is_empty());
    assert!(s.source().is_none());
}

#[test]
fn surface_is_clamped_to_max() {
    let s = SessionState::new(&RevealConfig::default(), Canvas::new(4000, 500));
    assert_eq!(s.surface(), Canvas::new(1920, 500));
}

#[test]
fn start_with_zero_seconds_is_rejected() {
    let (s, fx) = step(
        ready(),
        Event::Start {
            total_seconds: 0,
            now_ms: 0,
        },
    );
    assert_eq!(s.phase(), Phase::Ready);
    assert!(fx.is_empty());
    assert_eq!(s.elapsed_fraction(), 0.0);
}

#[test]
fn start_shows_clock_and_starts_countdown() {
    let (s, fx) = step(
        ready(),
        Event::Start {
            total_seconds: 90 * 60,
            now_ms: 0,
        },
    );
    assert_eq!(s.phase(), Phase::Counting { paused: false });
    assert_eq!(
        fx,
        vec![
            Effect::ShowClock("1:30".into()),
            Effect::PresentPixelated { block_size: 16 },
            Effect::SetCountdown { running: true },
        ]
    );
}

#[test]
fn redraw_only_on_stage_change() {
    // 8 seconds, 4 stages: stage advances every 2 seconds.
    let mut s = counting(8);
    let mut draws = Vec::new();
    for i in 1..=7u64 {
        let (next, fx) = step(s, Event::ClockTick { now_ms: i * 1000 });
        s = next;
        let drew = fx
            .iter()
            .any(|e| matches!(e, Effect::PresentPixelated { .. }));
        draws.push(drew);
    }
    assert_eq!(draws, vec![false, true, false, true, false, true, false]);
    assert_eq!(s.phase(), Phase::Counting { paused: false });
}

#[test]
fn early_tick_does_not_touch_clock() {
    let s = counting(8);
    let (s, fx) = step(s, Event::ClockTick { now_ms: 300 });
    assert!(fx.is_empty());
    assert_eq!(s.countdown().unwrap().session().remaining_seconds(), 8);
}

#[test]
fn final_tick_starts_reveal() {
    let mut s = counting(2);
    let (next, _) = step(s, Event::ClockTick { now_ms: 1000 });
    s = next;
    let (s, fx) = step(s, Event::ClockTick { now_ms: 2000 });
    assert_eq!(
        s.phase(),
        Phase::Revealing {
            started_at_ms: None
        }
    );
    assert_eq!(fx.first(), Some(&Effect::ShowClock(String::new())));
    assert!(fx.contains(&Effect::SetCountdown { running: false }));
    assert_eq!(fx.last(), Some(&Effect::BeginReveal));

    // Further ticks do nothing once revealing.
    let (s, fx) = step(s, Event::ClockTick { now_ms: 3000 });
    assert!(fx.is_empty());
    assert!(matches!(s.phase(), Phase::Revealing { .. }));
}

#[test]
fn pause_and_resume_gate_ticks() {
    let s = counting(60);
    let (s, fx) = step(s, Event::Pause);
    assert_eq!(s.phase(), Phase::Counting { paused: true });
    assert_eq!(fx, vec![Effect::SetCountdown { running: false }]);

    let (s, fx) = step(s, Event::ClockTick { now_ms: 5000 });
    assert!(fx.is_empty());

    let (s, fx) = step(s, Event::Resume { now_ms: 9000 });
    assert_eq!(fx, vec![Effect::SetCountdown { running: true }]);
    let (s, _) = step(s, Event::ClockTick { now_ms: 10_000 });
    assert_eq!(s.countdown().unwrap().session().remaining_seconds(), 59);
}

fn revealing() -> SessionState {
    let s = counting(1);
    let (s, _) = step(s, Event::ClockTick { now_ms: 1000 });
    s
}

#[test]
fn first_frame_anchors_reveal_clock() {
    let s = revealing();
    let g = s.generation();
    let (s, fx) = step(
        s,
        Event::Frame {
            generation: g,
            now_ms: 5000,
        },
    );
    assert_eq!(fx, vec![Effect::PresentRevealFrame { elapsed_ms: 0 }]);
    let (_, fx) = step(
        s,
        Event::Frame {
            generation: g,
            now_ms: 5400,
        },
    );
    assert_eq!(fx, vec![Effect::PresentRevealFrame { elapsed_ms: 400 }]);
}

#[test]
fn reveal_finished_moves_to_done_once() {
    let s = revealing();
    let g = s.generation();
    let (s, fx) = step(s, Event::RevealFinished { generation: g });
    assert_eq!(s.phase(), Phase::Done);
    assert_eq!(fx, vec![Effect::NotifyComplete]);

    let (s, fx) = step(s, Event::RevealFinished { generation: g });
    assert_eq!(s.phase(), Phase::Done);
    assert!(fx.is_empty());
}

#[test]
fn start_from_done_begins_a_new_countdown() {
    let s = revealing();
    let g = s.generation();
    let (s, _) = step(s, Event::RevealFinished { generation: g });
    assert_eq!(s.phase(), Phase::Done);

    let (s, fx) = step(
        s,
        Event::Start {
            total_seconds: 60,
            now_ms: 7000,
        },
    );
    assert_eq!(s.phase(), Phase::Counting { paused: false });
    assert_eq!(
        fx,
        vec![
            Effect::ShowClock("60".into()),
            Effect::PresentPixelated { block_size: 16 },
            Effect::SetCountdown { running: true },
        ]
    );
    assert!(s.source().is_some());
    assert_eq!(s.elapsed_fraction(), 0.0);

    let (s, _) = step(s, Event::ClockTick { now_ms: 8000 });
    assert_eq!(s.countdown().unwrap().session().remaining_seconds(), 59);
}

#[test]
fn restart_invalidates_inflight_reveal() {
    let s = revealing();
    let stale = s.generation();
    let (s, fx) = step(s, Event::Restart);
    assert_eq!(s.phase(), Phase::Idle);
    assert_eq!(s.generation(), stale + 1);
    assert_eq!(
        fx,
        vec![Effect::SetCountdown { running: false }, Effect::ClearSurface]
    );
    assert!(s.source().is_none());

    let (s, fx) = step(
        s,
        Event::Frame {
            generation: stale,
            now_ms: 10,
        },
    );
    assert!(fx.is_empty());
    let (_, fx) = step(s, Event::RevealFinished { generation: stale });
    assert!(fx.is_empty());
}

#[test]
fn resize_refits_source_and_redraws() {
    let s = counting(60);
    let (s, fx) = step(s, Event::Resized(Canvas::new(5, 3)));
    assert_eq!(s.surface(), Canvas::new(5, 3));
    assert_eq!(s.source().unwrap().canvas(), Canvas::new(5, 3));
    assert_eq!(fx, vec![Effect::PresentPixelated { block_size: 16 }]);

    let (s, fx) = step(revealing(), Event::Resized(Canvas::new(4, 4)));
    assert!(fx.is_empty());
    assert_eq!(s.source().unwrap().canvas(), Canvas::new(4, 4));
}

#[test]
fn transition_is_deterministic() {
    let a = counting(10);
    let b = a.clone();
    let (a, fa) = step(a, Event::ClockTick { now_ms: 2000 });
    let (b, fb) = step(b, Event::ClockTick { now_ms: 2000 });
    assert_eq!(fa, fb);
    assert_eq!(a.phase(), b.phase());
    assert_eq!(a.countdown(), b.countdown());
}
