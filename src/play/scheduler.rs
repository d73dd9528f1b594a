use tracing::debug;

use crate::config::SessionConfig;
use crate::model::{Beatmap, note_duration, time_from_step};

use super::Track;

/// Everything needed to place a freshly spawned note on the playfield.
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnParams {
    pub lane: usize,
    pub x: f32,
    /// Initial head position, already corrected for late spawning.
    pub head: f32,
    /// Extent of the note along the track.
    pub length: f32,
    pub speed: f32,
    pub is_long: bool,
    /// Game time at which the head should cross the judgment line.
    pub hit_time: f64,
    /// How far past its ideal spawn time the note was spawned.
    pub time_since_spawn: f64,
}

/// Decides when each beatmap note enters the playfield.
///
/// A note is due once `game_time >= hit_time - travel_time`. The cursor only moves forward, so
/// a note is never spawned twice.
#[derive(Debug, Clone)]
pub struct NoteScheduler {
    next_note_index: usize,
    travel_time: f64,
    note_speed: f32,
    track: Track,
    lane_x_positions: Vec<f32>,
}

impl NoteScheduler {
    pub fn new(config: &SessionConfig, note_speed: f32) -> Self {
        let travel_time = f64::from(config.spawn_distance()) / f64::from(note_speed);
        Self {
            next_note_index: 0,
            travel_time,
            note_speed,
            track: config.track(),
            lane_x_positions: config.lane_x_positions.clone(),
        }
    }

    /// Seconds a note head takes from the spawn position to the judgment line.
    pub fn travel_time(&self) -> f64 {
        self.travel_time
    }

    pub fn note_speed(&self) -> f32 {
        self.note_speed
    }

    pub fn next_note_index(&self) -> usize {
        self.next_note_index
    }

    pub fn is_exhausted(&self, beatmap: &Beatmap) -> bool {
        self.next_note_index >= beatmap.notes.len()
    }

    /// Spawn parameters for every note that became due at `game_time`, in beatmap order.
    pub fn due_notes(&mut self, beatmap: &Beatmap, game_time: f64) -> Vec<SpawnParams> {
        let mut due = Vec::new();
        while let Some(note) = beatmap.notes.get(self.next_note_index) {
            let hit_time = time_from_step(beatmap, note.step);
            let ideal_spawn_time = hit_time - self.travel_time;
            if game_time < ideal_spawn_time {
                break;
            }

            let time_since_spawn = (game_time - ideal_spawn_time).max(0.0);
            let length = self.note_speed * note_duration(beatmap, note) as f32;
            let head = self
                .track
                .displace(self.track.spawn, self.note_speed * time_since_spawn as f32);
            let x = self
                .lane_x_positions
                .get(note.lane)
                .copied()
                .unwrap_or_default();

            debug!(
                index = self.next_note_index,
                lane = note.lane,
                hit_time,
                late = time_since_spawn,
                "Spawning note"
            );

            due.push(SpawnParams {
                lane: note.lane,
                x,
                head,
                length,
                speed: self.note_speed,
                is_long: beatmap.is_long_note(note),
                hit_time,
                time_since_spawn,
            });
            self.next_note_index += 1;
        }
        due
    }

    pub fn reset(&mut self) {
        self.next_note_index = 0;
    }
}
