use tracing::{debug, info, warn};

use crate::config::SessionConfig;
use crate::model::Beatmap;
use crate::traits::{ClockSource, InputProvider, KeyEvent, PlayfieldView};

use super::{
    JudgeResult, JudgeWindow, KeyDownOutcome, LaneJudge, LifecycleEvent, LiveNote, NoteField,
    NoteId, NoteScheduler, PlayResult, ScoreState, SessionError, Track,
};

/// Where a session is in its run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayPhase {
    /// Title card; nothing moves.
    Intro,
    /// Virtual clock runs from `-travel_time` toward zero so the first notes can approach.
    Countdown,
    /// Game time follows the audio clock.
    Playing,
    /// The song ended.
    Finished,
    Aborted,
}

impl PlayPhase {
    pub fn is_over(self) -> bool {
        matches!(self, Self::Finished | Self::Aborted)
    }
}

/// One play of one beatmap: spawns notes, moves them, judges input and keeps the score.
///
/// Driven by [`tick`](Self::tick) once per frame. Each tick runs in a fixed order: clock,
/// spawning, note movement (misses and auto-releases), then input.
#[derive(Debug)]
pub struct PlaySession {
    beatmap: Beatmap,
    config: SessionConfig,
    track: Track,
    scheduler: NoteScheduler,
    field: NoteField,
    judge: LaneJudge,
    phase: PlayPhase,
    intro_elapsed: f64,
    game_time: f64,
}

impl PlaySession {
    pub fn start(beatmap: Option<Beatmap>, config: SessionConfig) -> Result<Self, SessionError> {
        config.validate()?;
        let mut beatmap = beatmap.ok_or(SessionError::MissingBeatmap)?;
        beatmap.validate(config.lane_count)?;
        if !beatmap.is_sorted() {
            debug!("Sorting beatmap notes by step");
            beatmap.sort_notes();
        }

        let note_speed = beatmap.note_speed.unwrap_or(config.note_speed);
        let track = config.track();
        let scheduler = NoteScheduler::new(&config, note_speed);
        let judge = LaneJudge::new(
            config.lane_count,
            JudgeWindow::from_config(&config),
            track,
            config.scoring,
        );

        info!(
            title = %beatmap.title,
            notes = beatmap.notes.len(),
            bpm = beatmap.bpm,
            note_speed,
            travel_time = scheduler.travel_time(),
            "Session started"
        );

        let game_time = -scheduler.travel_time();
        Ok(Self {
            beatmap,
            config,
            track,
            scheduler,
            field: NoteField::new(),
            judge,
            phase: PlayPhase::Intro,
            intro_elapsed: 0.0,
            game_time,
        })
    }

    /// Advance the session by one frame of `dt` seconds.
    pub fn tick(
        &mut self,
        dt: f64,
        clock: &mut dyn ClockSource,
        view: &mut dyn PlayfieldView,
        input: &mut dyn InputProvider,
    ) {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        match self.phase {
            PlayPhase::Intro => {
                self.intro_elapsed += dt;
                if self.intro_elapsed >= self.config.start_delay_sec {
                    info!(travel_time = self.scheduler.travel_time(), "Countdown started");
                    self.phase = PlayPhase::Countdown;
                }
            }
            PlayPhase::Countdown => {
                let previous = self.game_time;
                self.game_time += dt;
                if self.game_time >= 0.0 {
                    self.game_time = 0.0;
                    clock.play();
                    self.phase = PlayPhase::Playing;
                    info!("Music started");
                }
                self.process_frame(self.game_time - previous, view, input);
            }
            PlayPhase::Playing => {
                if !clock.is_playing() {
                    self.finish(PlayPhase::Finished, view);
                    return;
                }
                let time = self.clamp_clock(clock.playback_time());
                let delta = time - self.game_time;
                self.game_time = time;
                self.process_frame(delta, view, input);
            }
            PlayPhase::Finished | PlayPhase::Aborted => {}
        }
    }

    /// End the session early. Stops the clock and clears the playfield.
    pub fn abort(&mut self, clock: &mut dyn ClockSource, view: &mut dyn PlayfieldView) {
        if self.phase.is_over() {
            return;
        }
        clock.stop();
        self.finish(PlayPhase::Aborted, view);
    }

    fn clamp_clock(&self, time: f64) -> f64 {
        if !time.is_finite() {
            warn!(time, game_time = self.game_time, "Clock reported a non-finite time");
            return self.game_time;
        }
        if time < self.game_time {
            warn!(time, game_time = self.game_time, "Clock went backwards; holding time");
            return self.game_time;
        }
        time.max(0.0)
    }

    fn process_frame(
        &mut self,
        delta: f64,
        view: &mut dyn PlayfieldView,
        input: &mut dyn InputProvider,
    ) {
        for params in self.scheduler.due_notes(&self.beatmap, self.game_time) {
            let id = self.field.spawn(&params, &self.track, self.game_time);
            self.judge.enqueue(params.lane, id);
            view.spawn_note(id, &params);
        }

        for event in self.field.advance(delta, &self.track) {
            match event {
                LifecycleEvent::AutoRelease { id, lane } => {
                    if self.judge.on_auto_release(lane, id).is_some() {
                        view.long_bonus(lane);
                        view.score(self.judge.score().score);
                    }
                }
                LifecycleEvent::Missed { id, lane } => {
                    if self.judge.on_timeout(id, lane) {
                        view.judgment(lane, JudgeResult::Bad);
                        view.combo(None);
                        view.score(self.judge.score().score);
                    }
                }
            }
            self.destroy(event.id(), view);
        }

        for event in input.poll_events(self.game_time) {
            self.handle_key(event, view);
        }
    }

    fn handle_key(&mut self, event: KeyEvent, view: &mut dyn PlayfieldView) {
        let lane = event.lane;
        if lane >= self.config.lane_count {
            warn!(lane, lane_count = self.config.lane_count, "Ignoring input for unknown lane");
            return;
        }

        view.lane_flash(lane, event.pressed);
        if !event.pressed {
            if let Some(id) = self.judge.on_key_up(lane) {
                self.destroy(id, view);
            }
            return;
        }

        if let KeyDownOutcome::Hit {
            id, result, long, ..
        } = self.judge.on_key_down(lane, &mut self.field)
        {
            view.judgment(lane, result);
            if long {
                view.hold_note(id);
            } else if self.field.remove(id).is_some() {
                view.hit_note(id);
            }
            let combo = self.judge.score().combo;
            if combo >= self.config.combo_display_threshold {
                view.combo(Some(combo));
            }
            view.score(self.judge.score().score);
        }
    }

    fn destroy(&mut self, id: NoteId, view: &mut dyn PlayfieldView) {
        if self.field.remove(id).is_some() {
            view.destroy_note(id);
        }
    }

    fn finish(&mut self, phase: PlayPhase, view: &mut dyn PlayfieldView) {
        for note in self.field.drain() {
            view.destroy_note(note.id);
        }
        self.judge.clear();
        self.phase = phase;

        let score = self.judge.score();
        info!(
            ?phase,
            score = score.score,
            max_combo = score.max_combo,
            excellent = score.excellent_count,
            good = score.good_count,
            bad = score.bad_count,
            "Session ended"
        );
    }

    pub fn phase(&self) -> PlayPhase {
        self.phase
    }

    pub fn is_over(&self) -> bool {
        self.phase.is_over()
    }

    /// Current game time in seconds. Negative during the intro and countdown.
    pub fn game_time(&self) -> f64 {
        self.game_time
    }

    pub fn travel_time(&self) -> f64 {
        self.scheduler.travel_time()
    }

    pub fn score(&self) -> &ScoreState {
        self.judge.score()
    }

    pub fn beatmap(&self) -> &Beatmap {
        &self.beatmap
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn live_notes(&self) -> impl Iterator<Item = &LiveNote> {
        self.field.iter()
    }

    pub fn live_note_count(&self) -> usize {
        self.field.len()
    }

    pub fn lane_queue_len(&self, lane: usize) -> usize {
        self.judge.queue_len(lane)
    }

    pub fn holding_note(&self, lane: usize) -> Option<NoteId> {
        self.judge.holding(lane)
    }

    pub fn next_note_index(&self) -> usize {
        self.scheduler.next_note_index()
    }

    pub fn result(&self) -> PlayResult {
        PlayResult::new(
            self.beatmap.title.clone(),
            self.judge.score(),
            self.beatmap.notes.len(),
            self.phase == PlayPhase::Aborted,
        )
    }
}
