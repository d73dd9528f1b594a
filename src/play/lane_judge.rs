use std::collections::VecDeque;

use tracing::{debug, warn};

use crate::config::ScoringConfig;

use super::{JudgeResult, JudgeWindow, NoteField, NoteId, ScoreState, Track};

/// What a key press on a lane did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeyDownOutcome {
    /// No note waiting in the lane.
    Empty,
    /// The head note is outside the hit window; it stays queued.
    TooFar { distance: f32 },
    /// The head note was judged and left the queue.
    Hit {
        id: NoteId,
        result: JudgeResult,
        distance: f32,
        /// The note is a long note and is now held.
        long: bool,
        points: u32,
    },
    /// The lane is already holding a long note.
    Ignored,
}

/// Per-lane queues and hold state; the only writer of the score.
///
/// Only the head of a lane queue is ever judged. A lane holds at most one note at a time.
#[derive(Debug)]
pub struct LaneJudge {
    queues: Vec<VecDeque<NoteId>>,
    holding: Vec<Option<NoteId>>,
    window: JudgeWindow,
    track: Track,
    scoring: ScoringConfig,
    score: ScoreState,
}

impl LaneJudge {
    pub fn new(lane_count: usize, window: JudgeWindow, track: Track, scoring: ScoringConfig) -> Self {
        Self {
            queues: vec![VecDeque::new(); lane_count],
            holding: vec![None; lane_count],
            window,
            track,
            scoring,
            score: ScoreState::new(),
        }
    }

    pub fn lane_count(&self) -> usize {
        self.queues.len()
    }

    /// Append a freshly spawned note to its lane queue.
    pub fn enqueue(&mut self, lane: usize, id: NoteId) {
        match self.queues.get_mut(lane) {
            Some(queue) => queue.push_back(id),
            None => warn!(lane, ?id, "Dropping note for unknown lane"),
        }
    }

    pub fn on_key_down(&mut self, lane: usize, field: &mut NoteField) -> KeyDownOutcome {
        if lane >= self.queues.len() || self.holding[lane].is_some() {
            return KeyDownOutcome::Ignored;
        }

        let queue = &mut self.queues[lane];
        let (id, head) = loop {
            let Some(&id) = queue.front() else {
                return KeyDownOutcome::Empty;
            };
            match field.get(id) {
                Some(note) => break (id, note.head()),
                None => {
                    warn!(lane, ?id, "Discarding queued note that is no longer live");
                    queue.pop_front();
                }
            }
        };

        let distance = self.track.distance_to_line(head);
        let Some(result) = self.window.judge(distance) else {
            return KeyDownOutcome::TooFar { distance };
        };

        queue.pop_front();
        let points = self.score.add_judgment(result, &self.scoring);

        let mut long = false;
        if let Some(note) = field.get_mut(id) {
            if note.is_long {
                note.holding = true;
                self.holding[lane] = Some(id);
                long = true;
            }
        }

        debug!(lane, ?id, ?result, distance, long, combo = self.score.combo, "Note judged");
        KeyDownOutcome::Hit {
            id,
            result,
            distance,
            long,
            points,
        }
    }

    /// Release a lane. Returns the held note, which the caller destroys without scoring.
    pub fn on_key_up(&mut self, lane: usize) -> Option<NoteId> {
        let id = self.holding.get_mut(lane)?.take()?;
        debug!(lane, ?id, "Long note released early");
        Some(id)
    }

    /// A note reached the despawn boundary. Counts Bad if it was still queued.
    pub fn on_timeout(&mut self, id: NoteId, lane: usize) -> bool {
        let Some(queue) = self.queues.get_mut(lane) else {
            return false;
        };
        let Some(pos) = queue.iter().position(|&queued| queued == id) else {
            return false;
        };
        if pos != 0 {
            debug!(lane, ?id, pos, "Overlapping note timed out behind the queue head");
        }
        queue.remove(pos);
        self.score.add_judgment(JudgeResult::Bad, &self.scoring);
        debug!(lane, ?id, "Note missed");
        true
    }

    /// A held note's tail reached the judgment line. Returns the bonus awarded, if the note
    /// was still held.
    pub fn on_auto_release(&mut self, lane: usize, id: NoteId) -> Option<u32> {
        let slot = self.holding.get_mut(lane)?;
        if *slot != Some(id) {
            return None;
        }
        *slot = None;
        let points = self.score.add_long_bonus(&self.scoring);
        debug!(lane, ?id, points, "Long note completed");
        Some(points)
    }

    pub fn queue_len(&self, lane: usize) -> usize {
        self.queues.get(lane).map_or(0, VecDeque::len)
    }

    pub fn queue_head(&self, lane: usize) -> Option<NoteId> {
        self.queues.get(lane)?.front().copied()
    }

    pub fn holding(&self, lane: usize) -> Option<NoteId> {
        self.holding.get(lane).copied().flatten()
    }

    pub fn is_queued(&self, id: NoteId) -> bool {
        self.queues.iter().any(|queue| queue.contains(&id))
    }

    pub fn score(&self) -> &ScoreState {
        &self.score
    }

    /// Drop every queue entry and hold. The score is kept.
    pub fn clear(&mut self) {
        self.queues.iter_mut().for_each(VecDeque::clear);
        self.holding.iter_mut().for_each(|slot| *slot = None);
    }
}
