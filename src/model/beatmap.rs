use serde::{Deserialize, Serialize};

use crate::play::SessionError;

/// A single note as authored in the beatmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteData {
    /// Grid step at which the note starts (e.g. on a 16-step grid, beat 2 = step 4).
    pub step: u32,
    /// Note length in grid steps.
    #[serde(default)]
    pub length_in_steps: u32,
    /// Lane index, 0-based.
    #[serde(default)]
    pub lane: usize,
}

impl NoteData {
    pub fn new(step: u32, length_in_steps: u32, lane: usize) -> Self {
        Self {
            step,
            length_in_steps,
            lane,
        }
    }
}

/// Tempo grid and note list of one song.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Beatmap {
    #[serde(default)]
    pub title: String,
    pub bpm: f64,
    /// Meter numerator (4 for 4/4).
    #[serde(default = "default_beats_per_measure")]
    pub beats_per_measure: u32,
    /// Offset of the first beat from the start of the audio, in seconds.
    #[serde(default)]
    pub first_beat_offset_sec: f64,
    /// Grid divisions per measure.
    #[serde(default = "default_steps_per_measure")]
    pub steps_per_measure: u32,
    /// Per-song note speed override (units/second).
    #[serde(default)]
    pub note_speed: Option<f32>,
    /// Length of the audio track in seconds, when known.
    #[serde(default)]
    pub song_length_sec: Option<f64>,
    #[serde(default)]
    pub notes: Vec<NoteData>,
}

fn default_beats_per_measure() -> u32 {
    4
}

fn default_steps_per_measure() -> u32 {
    16
}

impl Default for Beatmap {
    fn default() -> Self {
        Self {
            title: String::new(),
            bpm: 140.0,
            beats_per_measure: default_beats_per_measure(),
            first_beat_offset_sec: 0.0,
            steps_per_measure: default_steps_per_measure(),
            note_speed: None,
            song_length_sec: None,
            notes: Vec::new(),
        }
    }
}

impl Beatmap {
    /// Number of grid steps that make up one quarter note.
    pub fn steps_per_quarter_note(&self) -> u32 {
        if self.beats_per_measure == 0 {
            return 0;
        }
        self.steps_per_measure / self.beats_per_measure
    }

    /// A note longer than a quarter note is played as a hold.
    pub fn is_long_note(&self, note: &NoteData) -> bool {
        note.length_in_steps > self.steps_per_quarter_note()
    }

    /// Stable sort of the note list by start step.
    pub fn sort_notes(&mut self) {
        self.notes.sort_by_key(|n| n.step);
    }

    pub fn is_sorted(&self) -> bool {
        self.notes.windows(2).all(|w| w[0].step <= w[1].step)
    }

    /// Check the tempo grid and that every note fits in `lane_count` lanes.
    pub fn validate(&self, lane_count: usize) -> Result<(), SessionError> {
        if !self.bpm.is_finite() || self.bpm <= 0.0 {
            return Err(SessionError::InvalidBeatmap(format!(
                "bpm must be positive, got {}",
                self.bpm
            )));
        }
        if !self.first_beat_offset_sec.is_finite() {
            return Err(SessionError::InvalidBeatmap(
                "first beat offset is not a finite number".to_string(),
            ));
        }
        if self.beats_per_measure == 0 || self.steps_per_measure == 0 {
            return Err(SessionError::InvalidBeatmap(format!(
                "meter {}/{} steps is empty",
                self.beats_per_measure, self.steps_per_measure
            )));
        }
        if self.steps_per_measure % self.beats_per_measure != 0 {
            return Err(SessionError::InvalidBeatmap(format!(
                "{} steps per measure cannot be split into {} beats",
                self.steps_per_measure, self.beats_per_measure
            )));
        }
        if let Some(speed) = self.note_speed {
            if !speed.is_finite() || speed <= 0.0 {
                return Err(SessionError::InvalidBeatmap(format!(
                    "note speed must be positive, got {speed}"
                )));
            }
        }
        if let Some((index, note)) = self
            .notes
            .iter()
            .enumerate()
            .find(|(_, n)| n.lane >= lane_count)
        {
            return Err(SessionError::LaneOutOfRange {
                index,
                lane: note.lane,
                lane_count,
            });
        }
        Ok(())
    }

    pub fn long_note_count(&self) -> usize {
        self.notes.iter().filter(|n| self.is_long_note(n)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn beatmap(notes: Vec<NoteData>) -> Beatmap {
        Beatmap {
            bpm: 120.0,
            notes,
            ..Default::default()
        }
    }

    #[test]
    fn steps_per_quarter_note() {
        let map = beatmap(vec![]);
        assert_eq!(map.steps_per_quarter_note(), 4);

        let waltz = Beatmap {
            beats_per_measure: 3,
            steps_per_measure: 12,
            ..map
        };
        assert_eq!(waltz.steps_per_quarter_note(), 4);
    }

    #[test]
    fn long_note_classification() {
        let map = beatmap(vec![]);
        assert!(!map.is_long_note(&NoteData::new(0, 1, 0)));
        // Exactly a quarter note is still a tap.
        assert!(!map.is_long_note(&NoteData::new(0, 4, 0)));
        assert!(map.is_long_note(&NoteData::new(0, 5, 0)));
    }

    #[test]
    fn sort_is_stable() {
        let mut map = beatmap(vec![
            NoteData::new(8, 1, 0),
            NoteData::new(4, 1, 1),
            NoteData::new(4, 1, 2),
            NoteData::new(0, 1, 3),
        ]);
        assert!(!map.is_sorted());

        map.sort_notes();

        assert!(map.is_sorted());
        let lanes: Vec<usize> = map.notes.iter().map(|n| n.lane).collect();
        assert_eq!(lanes, vec![3, 1, 2, 0]);
    }

    #[test]
    fn validate_rejects_bad_meter() {
        let map = Beatmap {
            beats_per_measure: 3,
            steps_per_measure: 16,
            ..beatmap(vec![])
        };
        assert!(matches!(
            map.validate(4),
            Err(SessionError::InvalidBeatmap(_))
        ));
    }

    #[test]
    fn validate_rejects_zero_bpm() {
        let map = Beatmap {
            bpm: 0.0,
            ..beatmap(vec![])
        };
        assert!(map.validate(4).is_err());
    }

    #[test]
    fn validate_rejects_lane_out_of_range() {
        let map = beatmap(vec![NoteData::new(0, 1, 0), NoteData::new(4, 1, 4)]);
        match map.validate(4) {
            Err(SessionError::LaneOutOfRange {
                index,
                lane,
                lane_count,
            }) => {
                assert_eq!(index, 1);
                assert_eq!(lane, 4);
                assert_eq!(lane_count, 4);
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn deserialize_with_defaults() {
        let json = r#"{ "bpm": 120.0, "notes": [ { "step": 4, "lane": 2 } ] }"#;
        let map: Beatmap = serde_json::from_str(json).unwrap();
        assert_eq!(map.beats_per_measure, 4);
        assert_eq!(map.steps_per_measure, 16);
        assert_eq!(map.notes, vec![NoteData::new(4, 0, 2)]);
        assert!(map.note_speed.is_none());
    }
}
