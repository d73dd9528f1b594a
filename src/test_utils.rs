//! Test utilities for building beatmaps and driving sessions.

#[cfg(test)]
pub mod builders {
    use crate::model::{Beatmap, NoteData};

    /// Builder for test beatmaps. Defaults to 120 BPM in 4/4 with 16 steps per measure,
    /// so one step is 0.125 s.
    #[derive(Debug, Clone)]
    pub struct BeatmapBuilder {
        beatmap: Beatmap,
    }

    impl BeatmapBuilder {
        pub fn new() -> Self {
            Self {
                beatmap: Beatmap {
                    title: "Test".to_string(),
                    bpm: 120.0,
                    beats_per_measure: 4,
                    first_beat_offset_sec: 0.0,
                    steps_per_measure: 16,
                    ..Default::default()
                },
            }
        }

        pub fn bpm(mut self, bpm: f64) -> Self {
            self.beatmap.bpm = bpm;
            self
        }

        pub fn offset(mut self, offset_sec: f64) -> Self {
            self.beatmap.first_beat_offset_sec = offset_sec;
            self
        }

        /// Add a tap note.
        pub fn tap(mut self, lane: usize, step: u32) -> Self {
            self.beatmap.notes.push(NoteData::new(step, 1, lane));
            self
        }

        /// Add a long note spanning `length_in_steps`.
        pub fn long(mut self, lane: usize, step: u32, length_in_steps: u32) -> Self {
            self.beatmap
                .notes
                .push(NoteData::new(step, length_in_steps, lane));
            self
        }

        pub fn build(self) -> Beatmap {
            self.beatmap
        }
    }
}

#[cfg(test)]
pub mod input_sim {
    use crate::traits::{InputProvider, KeyEvent};

    /// Input source that never produces events.
    #[derive(Debug, Default)]
    pub struct NoInput;

    impl InputProvider for NoInput {
        fn poll_events(&mut self, _now: f64) -> Vec<KeyEvent> {
            Vec::new()
        }
    }
}
