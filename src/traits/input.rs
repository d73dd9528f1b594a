/// Key state change on a lane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyEvent {
    /// Lane index (0-indexed). Key-to-lane mapping happens before this point.
    pub lane: usize,
    /// true = pressed, false = released.
    pub pressed: bool,
    /// Game time in seconds at which the event occurred.
    pub time_sec: f64,
}

impl KeyEvent {
    pub fn down(lane: usize, time_sec: f64) -> Self {
        Self {
            lane,
            pressed: true,
            time_sec,
        }
    }

    pub fn up(lane: usize, time_sec: f64) -> Self {
        Self {
            lane,
            pressed: false,
            time_sec,
        }
    }
}

/// Abstraction over input sources.
/// Implementations: ScriptedInput (autoplay and testing); device input lives outside the crate.
pub trait InputProvider {
    /// Drain key events that happened up to game time `now`.
    fn poll_events(&mut self, now: f64) -> Vec<KeyEvent>;
}
