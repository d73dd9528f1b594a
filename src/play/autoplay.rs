//! Perfect-play input generation.

use std::collections::VecDeque;

use crate::model::{Beatmap, note_end_time, note_hit_time};
use crate::traits::{InputProvider, KeyEvent};

/// Longest a tap is held down.
const TAP_HOLD_SEC: f64 = 0.05;
/// How long a long note is held past its end so the tail crosses the line first.
const LONG_RELEASE_MARGIN_SEC: f64 = 0.02;
/// Gap kept between a release and the next press in the same lane.
const MIN_GAP_SEC: f64 = 1e-4;

/// Key events that hit every note of `beatmap` exactly on time.
///
/// Each note is pressed at its hit time. Taps are released shortly after; long notes are
/// held just past their end, but never past the next press in the same lane. Events are
/// sorted by time, releases before presses at equal times.
pub fn generate_autoplay_events(beatmap: &Beatmap) -> Vec<KeyEvent> {
    let mut notes: Vec<_> = beatmap.notes.iter().collect();
    notes.sort_by_key(|note| note.step);

    let mut events = Vec::with_capacity(notes.len() * 2);
    for (i, note) in notes.iter().enumerate() {
        let press = note_hit_time(beatmap, note);
        let next_press = notes[i + 1..]
            .iter()
            .find(|next| next.lane == note.lane)
            .map(|next| note_hit_time(beatmap, next));

        let release = if beatmap.is_long_note(note) {
            let release = note_end_time(beatmap, note) + LONG_RELEASE_MARGIN_SEC;
            match next_press {
                Some(next) => release.min(next - MIN_GAP_SEC),
                None => release,
            }
        } else {
            let hold = match next_press {
                Some(next) => TAP_HOLD_SEC.min((next - press) / 2.0),
                None => TAP_HOLD_SEC,
            };
            press + hold
        };

        events.push(KeyEvent::down(note.lane, press));
        events.push(KeyEvent::up(note.lane, release.max(press)));
    }

    events.sort_by(|a, b| {
        a.time_sec
            .total_cmp(&b.time_sec)
            .then(a.pressed.cmp(&b.pressed))
    });
    events
}

/// Replays a fixed list of key events by game time.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    events: VecDeque<KeyEvent>,
}

impl ScriptedInput {
    /// Events must be sorted by time.
    pub fn new(events: Vec<KeyEvent>) -> Self {
        Self {
            events: events.into(),
        }
    }

    pub fn autoplay(beatmap: &Beatmap) -> Self {
        Self::new(generate_autoplay_events(beatmap))
    }

    pub fn remaining(&self) -> usize {
        self.events.len()
    }
}

impl InputProvider for ScriptedInput {
    fn poll_events(&mut self, now: f64) -> Vec<KeyEvent> {
        let mut due = Vec::new();
        while let Some(event) = self.events.front() {
            if event.time_sec > now {
                break;
            }
            due.extend(self.events.pop_front());
        }
        due
    }
}
