use super::beatmap::{Beatmap, NoteData};

/// Length of one grid step in seconds.
pub fn step_duration(beatmap: &Beatmap) -> f64 {
    let measure_len = 60.0 / beatmap.bpm * beatmap.beats_per_measure as f64;
    measure_len / beatmap.steps_per_measure as f64
}

/// Playback time (seconds) at which `step` lands.
pub fn time_from_step(beatmap: &Beatmap, step: u32) -> f64 {
    beatmap.first_beat_offset_sec + step as f64 * step_duration(beatmap)
}

/// Time at which the note should reach the judgment line.
pub fn note_hit_time(beatmap: &Beatmap, note: &NoteData) -> f64 {
    time_from_step(beatmap, note.step)
}

/// Time at which the note's tail reaches the judgment line.
pub fn note_end_time(beatmap: &Beatmap, note: &NoteData) -> f64 {
    time_from_step(beatmap, note.step.saturating_add(note.length_in_steps))
}

/// Duration spanned by the note, in seconds.
pub fn note_duration(beatmap: &Beatmap, note: &NoteData) -> f64 {
    note_end_time(beatmap, note) - note_hit_time(beatmap, note)
}

/// End time of the last note in the chart, or the first beat for an empty chart.
pub fn last_note_end_time(beatmap: &Beatmap) -> f64 {
    beatmap
        .notes
        .iter()
        .map(|n| note_end_time(beatmap, n))
        .fold(beatmap.first_beat_offset_sec, f64::max)
}
