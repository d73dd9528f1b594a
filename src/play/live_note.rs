//! Spawned notes moving toward the judgment line.
//!
//! Positions are measured along the travel axis. A note's `head` is the edge that reaches the
//! judgment line first (the note's start time); its `tail` trails behind by the note length.

use std::collections::BTreeMap;

use super::SpawnParams;

/// Handle to a spawned note. Issued by [`NoteField`]; never reused within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NoteId(pub u64);

/// Geometry of the travel axis shared by every lane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Track {
    pub spawn: f32,
    pub judgment_line: f32,
    pub despawn: f32,
    /// +1.0 when positions grow toward the judgment line, -1.0 when they shrink.
    direction: f32,
}

impl Track {
    pub fn new(spawn: f32, judgment_line: f32, despawn: f32) -> Self {
        let direction = if judgment_line < spawn { -1.0 } else { 1.0 };
        Self {
            spawn,
            judgment_line,
            despawn,
            direction,
        }
    }

    pub fn direction(&self) -> f32 {
        self.direction
    }

    /// Move `pos` by `amount` in the direction of travel.
    pub fn displace(&self, pos: f32, amount: f32) -> f32 {
        pos + self.direction * amount
    }

    /// `pos` is strictly beyond `boundary` in the direction of travel.
    pub fn is_past(&self, pos: f32, boundary: f32) -> bool {
        (pos - boundary) * self.direction > 0.0
    }

    /// `pos` is at or beyond `boundary` in the direction of travel.
    pub fn has_reached(&self, pos: f32, boundary: f32) -> bool {
        (pos - boundary) * self.direction >= 0.0
    }

    pub fn distance_to_line(&self, pos: f32) -> f32 {
        (pos - self.judgment_line).abs()
    }
}

/// Event reported by a live note during [`NoteField::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// A held long note's tail reached the judgment line.
    AutoRelease { id: NoteId, lane: usize },
    /// An unheld note's tail passed the despawn boundary.
    Missed { id: NoteId, lane: usize },
}

impl LifecycleEvent {
    pub fn id(&self) -> NoteId {
        match self {
            Self::AutoRelease { id, .. } | Self::Missed { id, .. } => *id,
        }
    }
}

/// A note currently on the playfield.
#[derive(Debug, Clone, PartialEq)]
pub struct LiveNote {
    pub id: NoteId,
    pub lane: usize,
    pub x: f32,
    /// Game time at which the note was spawned.
    pub spawn_time: f64,
    /// Game time at which the head should cross the judgment line.
    pub hit_time: f64,
    pub speed: f32,
    pub length: f32,
    pub is_long: bool,
    pub holding: bool,
    head: f32,
    direction: f32,
    /// Spawned during the current tick; its head already accounts for this tick's time.
    fresh: bool,
}

impl LiveNote {
    fn new(id: NoteId, params: &SpawnParams, track: &Track, spawn_time: f64) -> Self {
        Self {
            id,
            lane: params.lane,
            x: params.x,
            spawn_time,
            hit_time: params.hit_time,
            speed: params.speed,
            length: params.length,
            is_long: params.is_long,
            holding: false,
            head: params.head,
            direction: track.direction(),
            fresh: true,
        }
    }

    pub fn head(&self) -> f32 {
        self.head
    }

    pub fn tail(&self) -> f32 {
        self.head - self.direction * self.length
    }

    /// Midpoint of the note body, for renderers that position by center.
    pub fn center(&self) -> f32 {
        self.head - self.direction * self.length / 2.0
    }

    pub fn advance(&mut self, delta: f64) {
        self.head += self.direction * self.speed * delta as f32;
    }

    /// Exit condition after the latest move, auto-release taking priority.
    pub fn check(&self, track: &Track) -> Option<LifecycleEvent> {
        if self.holding {
            if track.has_reached(self.tail(), track.judgment_line) {
                return Some(LifecycleEvent::AutoRelease {
                    id: self.id,
                    lane: self.lane,
                });
            }
            return None;
        }
        if track.is_past(self.tail(), track.despawn) {
            return Some(LifecycleEvent::Missed {
                id: self.id,
                lane: self.lane,
            });
        }
        None
    }
}

/// Owner of every live note in the session.
#[derive(Debug, Default)]
pub struct NoteField {
    notes: BTreeMap<NoteId, LiveNote>,
    next_id: u64,
}

impl NoteField {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a live note from spawn parameters and return its handle.
    pub fn spawn(&mut self, params: &SpawnParams, track: &Track, now: f64) -> NoteId {
        let id = NoteId(self.next_id);
        self.next_id += 1;
        self.notes
            .insert(id, LiveNote::new(id, params, track, now));
        id
    }

    pub fn get(&self, id: NoteId) -> Option<&LiveNote> {
        self.notes.get(&id)
    }

    pub fn get_mut(&mut self, id: NoteId) -> Option<&mut LiveNote> {
        self.notes.get_mut(&id)
    }

    pub fn contains(&self, id: NoteId) -> bool {
        self.notes.contains_key(&id)
    }

    /// Take a note off the field. Returns `None` if it was already removed.
    pub fn remove(&mut self, id: NoteId) -> Option<LiveNote> {
        self.notes.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Live notes in spawn order.
    pub fn iter(&self) -> impl Iterator<Item = &LiveNote> {
        self.notes.values()
    }

    /// Number of notes spawned over the field's lifetime.
    pub fn total_spawned(&self) -> u64 {
        self.next_id
    }

    /// Move every note by `delta` seconds of game time and collect exit events.
    ///
    /// Notes spawned since the previous advance are only checked, not moved. Notes that
    /// report an event stay on the field; the caller resolves the event and removes them
    /// before the next advance.
    pub fn advance(&mut self, delta: f64, track: &Track) -> Vec<LifecycleEvent> {
        let mut events = Vec::new();
        for note in self.notes.values_mut() {
            if note.fresh {
                note.fresh = false;
            } else {
                note.advance(delta);
            }
            if let Some(event) = note.check(track) {
                events.push(event);
            }
        }
        events
    }

    /// Remove every note, in spawn order.
    pub fn drain(&mut self) -> Vec<LiveNote> {
        std::mem::take(&mut self.notes).into_values().collect()
    }
}
