use criterion::{Criterion, black_box, criterion_group, criterion_main};
use notefall::config::SessionConfig;
use notefall::model::{Beatmap, NoteData, time_from_step};
use notefall::play::{JudgeResult, JudgeWindow, PlaySession, ScriptedInput};
use notefall::traits::{ManualClock, NullView};

fn dense_beatmap(note_count: u32) -> Beatmap {
    let notes = (0..note_count)
        .map(|i| {
            let length = if i % 7 == 0 { 8 } else { 1 };
            NoteData::new(16 + i * 2, length, (i % 4) as usize)
        })
        .collect();
    Beatmap {
        title: "Bench".to_string(),
        bpm: 160.0,
        notes,
        ..Default::default()
    }
}

fn judge_benchmark(c: &mut Criterion) {
    let window = JudgeWindow::default();
    c.bench_function("judge_window", |b| {
        let distances = [0.0f32, 0.3, 0.9, 1.4, 2.5];
        let mut i = 0;
        b.iter(|| {
            let result: Option<JudgeResult> = window.judge(black_box(distances[i % distances.len()]));
            i += 1;
            black_box(result)
        });
    });

    let map = dense_beatmap(1);
    c.bench_function("time_from_step", |b| {
        b.iter(|| time_from_step(&map, black_box(12_345)));
    });
}

fn session_benchmark(c: &mut Criterion) {
    let map = dense_beatmap(500);
    let config = SessionConfig {
        start_delay_sec: 0.0,
        ..Default::default()
    };
    let dt = 1.0 / 240.0;

    c.bench_function("autoplay_session_500_notes", |b| {
        b.iter(|| {
            let mut session = PlaySession::start(Some(map.clone()), config.clone()).unwrap();
            let mut clock = ManualClock::new(200.0);
            let mut input = ScriptedInput::autoplay(session.beatmap());
            let mut view = NullView;
            while !session.is_over() {
                session.tick(dt, &mut clock, &mut view, &mut input);
                clock.advance(dt);
            }
            black_box(session.result())
        });
    });
}

criterion_group!(benches, judge_benchmark, session_benchmark);
criterion_main!(benches);
