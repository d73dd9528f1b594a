use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::play::{JudgePolicy, SessionError, Track};

/// Points awarded by the judgment engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub excellent: u32,
    pub good: u32,
    /// Awarded when a held long note is carried through the judgment line.
    pub long_bonus: u32,
    /// Awarded every `combo_bonus_interval` consecutive hits.
    pub combo_bonus: u32,
    pub combo_bonus_interval: u32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            excellent: 100,
            good: 50,
            long_bonus: 30,
            combo_bonus: 20,
            combo_bonus_interval: 10,
        }
    }
}

/// Playfield geometry, judgment tolerances and scoring for one play session.
///
/// Built by whoever starts the session (menu, CLI, test) and handed to
/// [`PlaySession::start`](crate::play::PlaySession::start).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub lane_count: usize,
    /// Horizontal position of each lane, left to right.
    pub lane_x_positions: Vec<f32>,
    /// Note travel speed in units per second.
    pub note_speed: f32,
    /// Position along the track where note heads appear.
    pub spawn_position: f32,
    pub judgment_line_position: f32,
    /// Notes whose tail passes this position are discarded as missed.
    pub despawn_position: f32,
    /// Distance from the judgment line that still counts as Excellent.
    pub hit_tolerance: f32,
    pub judge_policy: JudgePolicy,
    /// Extra distance beyond `hit_tolerance` that counts as Good (tiered policy only).
    pub good_margin: f32,
    /// Seconds the song title is shown before the countdown starts.
    pub start_delay_sec: f64,
    /// Combo count from which the combo display is shown.
    pub combo_display_threshold: u32,
    pub scoring: ScoringConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            lane_count: 4,
            lane_x_positions: vec![-3.0, -1.0, 1.0, 3.0],
            note_speed: 10.0,
            spawn_position: 50.0,
            judgment_line_position: -3.0,
            despawn_position: -20.0,
            hit_tolerance: 0.5,
            judge_policy: JudgePolicy::Tiered,
            good_margin: 1.0,
            start_delay_sec: 5.0,
            combo_display_threshold: 5,
            scoring: ScoringConfig::default(),
        }
    }
}

impl SessionConfig {
    /// Loads config from a specified path.
    /// Returns default config if file doesn't exist.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Saves config to a specified path.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Distance a note head travels from spawn to the judgment line.
    pub fn spawn_distance(&self) -> f32 {
        (self.spawn_position - self.judgment_line_position).abs()
    }

    pub fn track(&self) -> Track {
        Track::new(
            self.spawn_position,
            self.judgment_line_position,
            self.despawn_position,
        )
    }

    pub fn validate(&self) -> Result<(), SessionError> {
        if self.lane_count == 0 {
            return Err(SessionError::InvalidConfig(
                "at least one lane is required".to_string(),
            ));
        }
        if self.lane_x_positions.len() != self.lane_count {
            return Err(SessionError::InvalidConfig(format!(
                "{} lane positions given for {} lanes",
                self.lane_x_positions.len(),
                self.lane_count
            )));
        }
        if !self.note_speed.is_finite() || self.note_speed <= 0.0 {
            return Err(SessionError::InvalidConfig(format!(
                "note speed must be positive, got {}",
                self.note_speed
            )));
        }
        if self.spawn_distance() <= 0.0 || !self.spawn_distance().is_finite() {
            return Err(SessionError::InvalidConfig(
                "spawn position must differ from the judgment line".to_string(),
            ));
        }
        let track = self.track();
        if !track.is_past(self.despawn_position, self.judgment_line_position) {
            return Err(SessionError::InvalidConfig(format!(
                "despawn position {} is not beyond the judgment line {}",
                self.despawn_position, self.judgment_line_position
            )));
        }
        if self.hit_tolerance < 0.0 || self.good_margin < 0.0 {
            return Err(SessionError::InvalidConfig(
                "judgment tolerances must not be negative".to_string(),
            ));
        }
        if self.scoring.combo_bonus_interval == 0 {
            return Err(SessionError::InvalidConfig(
                "combo bonus interval must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
