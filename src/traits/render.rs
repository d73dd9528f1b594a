use crate::play::{JudgeResult, NoteId, SpawnParams};

/// Abstraction over whatever draws the playfield.
/// Implementations: NullView (headless), CommandRecorder (testing).
///
/// Every spawned note receives exactly one of `hit_note` or `destroy_note`.
pub trait PlayfieldView {
    fn spawn_note(&mut self, id: NoteId, params: &SpawnParams);

    /// A tap note was hit and is gone.
    fn hit_note(&mut self, id: NoteId);

    /// A long note was hit and is now held.
    fn hold_note(&mut self, id: NoteId);

    /// The note left play without a tap hit (released, auto-released, missed, session end).
    fn destroy_note(&mut self, id: NoteId);

    /// Judgment-line highlight while a lane key is down.
    fn lane_flash(&mut self, lane: usize, on: bool);

    fn judgment(&mut self, lane: usize, result: JudgeResult);

    /// Show the combo counter, or hide it with `None`.
    fn combo(&mut self, combo: Option<u32>);

    fn long_bonus(&mut self, lane: usize);

    fn score(&mut self, score: u32);
}

/// View that ignores every command.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullView;

impl PlayfieldView for NullView {
    fn spawn_note(&mut self, _id: NoteId, _params: &SpawnParams) {}
    fn hit_note(&mut self, _id: NoteId) {}
    fn hold_note(&mut self, _id: NoteId) {}
    fn destroy_note(&mut self, _id: NoteId) {}
    fn lane_flash(&mut self, _lane: usize, _on: bool) {}
    fn judgment(&mut self, _lane: usize, _result: JudgeResult) {}
    fn combo(&mut self, _combo: Option<u32>) {}
    fn long_bonus(&mut self, _lane: usize) {}
    fn score(&mut self, _score: u32) {}
}

/// A recorded view command.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewCommand {
    Spawn { id: NoteId, params: SpawnParams },
    Hit(NoteId),
    Hold(NoteId),
    Destroy(NoteId),
    LaneFlash { lane: usize, on: bool },
    Judgment { lane: usize, result: JudgeResult },
    Combo(Option<u32>),
    LongBonus(usize),
    Score(u32),
}

/// View that records every command in order.
#[derive(Debug, Default, Clone)]
pub struct CommandRecorder {
    pub commands: Vec<ViewCommand>,
}

impl CommandRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn spawned(&self) -> Vec<NoteId> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                ViewCommand::Spawn { id, .. } => Some(*id),
                _ => None,
            })
            .collect()
    }

    /// Notes that received a terminal command (hit or destroy), in order.
    pub fn finished(&self) -> Vec<NoteId> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                ViewCommand::Hit(id) | ViewCommand::Destroy(id) => Some(*id),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, pred: impl Fn(&ViewCommand) -> bool) -> usize {
        self.commands.iter().filter(|c| pred(c)).count()
    }
}

impl PlayfieldView for CommandRecorder {
    fn spawn_note(&mut self, id: NoteId, params: &SpawnParams) {
        self.commands.push(ViewCommand::Spawn {
            id,
            params: params.clone(),
        });
    }

    fn hit_note(&mut self, id: NoteId) {
        self.commands.push(ViewCommand::Hit(id));
    }

    fn hold_note(&mut self, id: NoteId) {
        self.commands.push(ViewCommand::Hold(id));
    }

    fn destroy_note(&mut self, id: NoteId) {
        self.commands.push(ViewCommand::Destroy(id));
    }

    fn lane_flash(&mut self, lane: usize, on: bool) {
        self.commands.push(ViewCommand::LaneFlash { lane, on });
    }

    fn judgment(&mut self, lane: usize, result: JudgeResult) {
        self.commands.push(ViewCommand::Judgment { lane, result });
    }

    fn combo(&mut self, combo: Option<u32>) {
        self.commands.push(ViewCommand::Combo(combo));
    }

    fn long_bonus(&mut self, lane: usize) {
        self.commands.push(ViewCommand::LongBonus(lane));
    }

    fn score(&mut self, score: u32) {
        self.commands.push(ViewCommand::Score(score));
    }
}
