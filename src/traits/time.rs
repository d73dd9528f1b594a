use std::time::{Duration, Instant};

/// Abstraction over the audio playback clock.
/// Implementations: SystemClock (wall clock), ManualClock (headless runs and testing).
pub trait ClockSource {
    /// Current playback position in seconds. Authoritative once playing.
    fn playback_time(&self) -> f64;

    /// Whether the track is still playing.
    fn is_playing(&self) -> bool;

    /// Start playback from the beginning.
    fn play(&mut self);

    /// Stop playback.
    fn stop(&mut self);
}

/// Wall-clock playback of a track with a known length.
pub struct SystemClock {
    length: Duration,
    started: Option<Instant>,
    stopped_at: Option<Duration>,
}

impl SystemClock {
    pub fn new(length_sec: f64) -> Self {
        Self {
            length: Duration::try_from_secs_f64(length_sec.max(0.0)).unwrap_or(Duration::MAX),
            started: None,
            stopped_at: None,
        }
    }

    fn elapsed(&self) -> Duration {
        match (self.started, self.stopped_at) {
            (_, Some(at)) => at,
            (Some(start), None) => start.elapsed().min(self.length),
            (None, None) => Duration::ZERO,
        }
    }
}

impl ClockSource for SystemClock {
    fn playback_time(&self) -> f64 {
        self.elapsed().as_secs_f64()
    }

    fn is_playing(&self) -> bool {
        self.started.is_some() && self.stopped_at.is_none() && self.elapsed() < self.length
    }

    fn play(&mut self) {
        self.started = Some(Instant::now());
        self.stopped_at = None;
    }

    fn stop(&mut self) {
        if self.started.is_some() && self.stopped_at.is_none() {
            self.stopped_at = Some(self.elapsed());
        }
    }
}

/// Clock advanced explicitly by the caller, for deterministic playback.
#[derive(Debug, Clone)]
pub struct ManualClock {
    time: f64,
    length: f64,
    playing: bool,
}

impl ManualClock {
    pub fn new(length_sec: f64) -> Self {
        Self {
            time: 0.0,
            length: length_sec,
            playing: false,
        }
    }

    /// Advance playback by `delta` seconds; stops at the end of the track.
    pub fn advance(&mut self, delta: f64) {
        if !self.playing {
            return;
        }
        self.time += delta;
        if self.time >= self.length {
            self.time = self.length;
            self.playing = false;
        }
    }

    /// Force the reported position, e.g. to simulate a misbehaving audio backend.
    pub fn set_time(&mut self, time: f64) {
        self.time = time;
    }

    pub fn length(&self) -> f64 {
        self.length
    }
}

impl ClockSource for ManualClock {
    fn playback_time(&self) -> f64 {
        self.time
    }

    fn is_playing(&self) -> bool {
        self.playing
    }

    fn play(&mut self) {
        self.time = 0.0;
        self.playing = self.length > 0.0;
    }

    fn stop(&mut self) {
        self.playing = false;
    }
}
