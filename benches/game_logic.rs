use criterion::{black_box, criterion_group, criterion_main, Criterion};
use lane_dodge::core::{compose, BcdScore, GameSnapshot, GameState, LaneLfsr, ObstacleTrack};
use lane_dodge::engine::Autopilot;
use lane_dodge::term::{FrameBuffer, GameView, Viewport};
use lane_dodge::types::{ButtonPulses, ClockConfig, GameMode, Lane, LaneMask};

fn playing_state() -> GameState {
    let mut state = GameState::new(ClockConfig::default());
    state.step(ButtonPulses::center());
    while state.mode() != GameMode::Play {
        state.step(ButtonPulses::NONE);
    }
    state
}

fn bench_step(c: &mut Criterion) {
    let mut state = playing_state();
    let mut pilot = Autopilot::default();
    let mut snap = GameSnapshot::default();

    c.bench_function("step_idle", |b| {
        let mut idle = GameState::new(ClockConfig::default());
        b.iter(|| idle.step(black_box(ButtonPulses::NONE)))
    });

    c.bench_function("step_play_autopilot", |b| {
        b.iter(|| {
            state.snapshot_into(&mut snap);
            let pulses = pilot.next_pulses(&snap);
            black_box(state.step(pulses))
        })
    });

    c.bench_function("one_second_at_6khz", |b| {
        let mut state = playing_state();
        b.iter(|| black_box(state.run_idle(6000)))
    });
}

fn bench_compose(c: &mut Criterion) {
    let mut track = ObstacleTrack::new();
    track.advance(LaneMask::from_lane(Lane::Left));
    track.advance(LaneMask::EMPTY);
    track.advance(LaneMask::from_lane(Lane::Right));
    let score = BcdScore::from_value(1234);

    c.bench_function("compose_play", |b| {
        b.iter(|| {
            compose(
                black_box(GameMode::Play),
                &score,
                black_box(Lane::Middle),
                &track,
                true,
            )
        })
    });

    c.bench_function("compose_score", |b| {
        b.iter(|| compose(black_box(GameMode::ScoreIdle), &score, Lane::Middle, &track, true))
    });
}

fn bench_lfsr(c: &mut Criterion) {
    let mut lfsr = LaneLfsr::new();
    c.bench_function("lfsr_advance", |b| {
        b.iter(|| {
            lfsr.advance();
            black_box(lfsr.lane())
        })
    });
}

fn bench_view(c: &mut Criterion) {
    let snap = playing_state().snapshot();
    let view = GameView::default();
    let vp = Viewport::new(80, 24);
    let mut fb = FrameBuffer::new(vp.width, vp.height);

    c.bench_function("render_into_80x24", |b| {
        b.iter(|| view.render_into(black_box(&snap), vp, &mut fb))
    });
}

criterion_group!(benches, bench_step, bench_compose, bench_lfsr, bench_view);
criterion_main!(benches);
