use notefall::model::{
    Beatmap, NoteData, last_note_end_time, note_duration, note_end_time, step_duration,
    time_from_step,
};
use proptest::prelude::*;

fn beatmap_120() -> Beatmap {
    Beatmap {
        bpm: 120.0,
        beats_per_measure: 4,
        first_beat_offset_sec: 0.0,
        steps_per_measure: 16,
        ..Default::default()
    }
}

#[test]
fn test_step_duration_at_120_bpm() {
    let map = beatmap_120();

    // 120 BPM in 4/4: one measure = 2 s, 16 steps per measure.
    assert!((step_duration(&map) - 0.125).abs() < 1e-12);
    assert!((time_from_step(&map, 16) - 2.0).abs() < 1e-12);
}

#[test]
fn test_offset_applies_to_step_zero() {
    let map = Beatmap {
        first_beat_offset_sec: 0.35,
        ..beatmap_120()
    };
    assert_eq!(time_from_step(&map, 0), 0.35);
    assert!((time_from_step(&map, 8) - 1.35).abs() < 1e-12);
}

#[test]
fn test_three_four_meter() {
    let map = Beatmap {
        bpm: 90.0,
        beats_per_measure: 3,
        steps_per_measure: 12,
        ..beatmap_120()
    };

    // One beat at 90 BPM is 2/3 s and spans 4 steps.
    assert!((time_from_step(&map, 4) - 2.0 / 3.0).abs() < 1e-12);
}

#[test]
fn test_note_duration_and_end() {
    let map = beatmap_120();
    let note = NoteData::new(16, 8, 0);

    assert!((note_duration(&map, &note) - 1.0).abs() < 1e-12);
    assert!((note_end_time(&map, &note) - 3.0).abs() < 1e-12);
}

#[test]
fn test_last_note_end_time() {
    let mut map = beatmap_120();
    assert_eq!(last_note_end_time(&map), 0.0);

    map.notes = vec![NoteData::new(0, 32, 0), NoteData::new(16, 1, 1)];
    assert!((last_note_end_time(&map) - 4.0).abs() < 1e-12);
}

proptest! {
    #[test]
    fn time_from_step_is_monotonic(
        bpm in 30.0f64..400.0,
        beats in 1u32..8,
        divisions in 1u32..12,
        offset in -2.0f64..5.0,
        a in 0u32..10_000,
        b in 0u32..10_000,
    ) {
        let map = Beatmap {
            bpm,
            beats_per_measure: beats,
            steps_per_measure: beats * divisions,
            first_beat_offset_sec: offset,
            ..Default::default()
        };
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(time_from_step(&map, lo) <= time_from_step(&map, hi));
        prop_assert_eq!(time_from_step(&map, 0), offset);
    }

    #[test]
    fn note_duration_is_never_negative(step in 0u32..5_000, length in 0u32..256) {
        let map = beatmap_120();
        let note = NoteData::new(step, length, 0);
        prop_assert!(note_duration(&map, &note) >= 0.0);
    }
}
