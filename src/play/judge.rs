use serde::{Deserialize, Serialize};

use crate::config::SessionConfig;

/// Accuracy tier of a judged note, best to worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JudgeResult {
    Excellent,
    Good,
    /// Note left the playfield without being hit.
    Bad,
}

impl JudgeResult {
    /// Returns true if this result continues combo.
    pub fn continues_combo(self) -> bool {
        matches!(self, Self::Excellent | Self::Good)
    }
}

/// How distances outside `hit_tolerance` are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum JudgePolicy {
    /// Excellent within `hit_tolerance`, Good within the extra `good_margin`.
    #[default]
    Tiered,
    /// Only Excellent exists; anything outside `hit_tolerance` is ignored.
    Strict,
}

/// Distance windows around the judgment line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JudgeWindow {
    pub excellent: f32,
    /// Outer edge of the hit window. Equal to `excellent` under the strict policy.
    pub good: f32,
}

impl JudgeWindow {
    pub fn new(policy: JudgePolicy, hit_tolerance: f32, good_margin: f32) -> Self {
        let good = match policy {
            JudgePolicy::Tiered => hit_tolerance + good_margin,
            JudgePolicy::Strict => hit_tolerance,
        };
        Self {
            excellent: hit_tolerance,
            good,
        }
    }

    pub fn from_config(config: &SessionConfig) -> Self {
        Self::new(config.judge_policy, config.hit_tolerance, config.good_margin)
    }

    /// Judge a press by the note's distance from the judgment line.
    /// `None` means the note is too far away and the press is ignored.
    pub fn judge(&self, distance: f32) -> Option<JudgeResult> {
        let distance = distance.abs();
        if distance <= self.excellent {
            Some(JudgeResult::Excellent)
        } else if distance <= self.good {
            Some(JudgeResult::Good)
        } else {
            None
        }
    }
}

impl Default for JudgeWindow {
    fn default() -> Self {
        Self::new(JudgePolicy::Tiered, 0.5, 1.0)
    }
}
