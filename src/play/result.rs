use serde::{Deserialize, Serialize};

use super::ScoreState;

/// Final tally of a play session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayResult {
    pub title: String,
    pub score: u32,
    pub excellent_count: u32,
    pub good_count: u32,
    pub bad_count: u32,
    pub max_combo: u32,
    /// Notes in the beatmap, judged or not.
    pub total_notes: u32,
    pub aborted: bool,
}

impl PlayResult {
    pub fn new(title: impl Into<String>, score: &ScoreState, total_notes: usize, aborted: bool) -> Self {
        Self {
            title: title.into(),
            score: score.score,
            excellent_count: score.excellent_count,
            good_count: score.good_count,
            bad_count: score.bad_count,
            max_combo: score.max_combo,
            total_notes: u32::try_from(total_notes).unwrap_or(u32::MAX),
            aborted,
        }
    }

    pub fn judged_notes(&self) -> u32 {
        self.excellent_count + self.good_count + self.bad_count
    }

    /// Every note was hit without a miss.
    pub fn is_full_combo(&self) -> bool {
        !self.aborted && self.bad_count == 0 && self.max_combo == self.total_notes
    }
}

/// Result screen element revealed by [`ResultReveal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevealItem {
    Panel,
    Excellent,
    Good,
    Bad,
    MaxCombo,
    Score,
    /// "Press any key" prompt.
    Prompt,
}

/// Sound played when an element appears.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundCue {
    Attribute,
    Total,
    Jingle,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealStep {
    pub at_sec: f64,
    pub item: RevealItem,
    pub cue: SoundCue,
}

const DIM_TARGET_ALPHA: f32 = 0.7;
const DIM_DURATION_SEC: f64 = 2.0;

const TIMELINE: [RevealStep; 7] = [
    RevealStep {
        at_sec: 3.0,
        item: RevealItem::Panel,
        cue: SoundCue::Attribute,
    },
    RevealStep {
        at_sec: 3.9,
        item: RevealItem::Excellent,
        cue: SoundCue::Attribute,
    },
    RevealStep {
        at_sec: 4.8,
        item: RevealItem::Good,
        cue: SoundCue::Attribute,
    },
    RevealStep {
        at_sec: 5.7,
        item: RevealItem::Bad,
        cue: SoundCue::Attribute,
    },
    RevealStep {
        at_sec: 6.6,
        item: RevealItem::MaxCombo,
        cue: SoundCue::Attribute,
    },
    RevealStep {
        at_sec: 7.8,
        item: RevealItem::Score,
        cue: SoundCue::Total,
    },
    RevealStep {
        at_sec: 9.4,
        item: RevealItem::Prompt,
        cue: SoundCue::Jingle,
    },
];

/// Tick-driven result screen timeline: a dim overlay fades in, then the tallies appear one
/// at a time.
#[derive(Debug, Clone, Default)]
pub struct ResultReveal {
    elapsed: f64,
    next_step: usize,
}

impl ResultReveal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn timeline() -> &'static [RevealStep] {
        &TIMELINE
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Advance by `dt` seconds and return the steps that became visible, in order.
    pub fn advance(&mut self, dt: f64) -> Vec<RevealStep> {
        if dt.is_finite() && dt > 0.0 {
            self.elapsed += dt;
        }
        let mut revealed = Vec::new();
        while let Some(step) = TIMELINE.get(self.next_step) {
            if self.elapsed < step.at_sec {
                break;
            }
            revealed.push(*step);
            self.next_step += 1;
        }
        revealed
    }

    /// Reveal everything still pending.
    pub fn skip(&mut self) -> Vec<RevealStep> {
        let remaining = TIMELINE[self.next_step..].to_vec();
        self.next_step = TIMELINE.len();
        self.elapsed = self.elapsed.max(DIM_DURATION_SEC);
        remaining
    }

    pub fn dim_alpha(&self) -> f32 {
        let progress = (self.elapsed / DIM_DURATION_SEC).clamp(0.0, 1.0);
        DIM_TARGET_ALPHA * progress as f32
    }

    pub fn is_revealed(&self, item: RevealItem) -> bool {
        TIMELINE[..self.next_step].iter().any(|step| step.item == item)
    }

    pub fn is_complete(&self) -> bool {
        self.next_step >= TIMELINE.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScoringConfig;
    use crate::play::JudgeResult;

    #[test]
    fn test_result_from_score() {
        let scoring = ScoringConfig::default();
        let mut score = ScoreState::new();
        score.add_judgment(JudgeResult::Excellent, &scoring);
        score.add_judgment(JudgeResult::Good, &scoring);

        let result = PlayResult::new("Song", &score, 2, false);
        assert_eq!(result.score, 150);
        assert_eq!(result.judged_notes(), 2);
        assert!(result.is_full_combo());

        let aborted = PlayResult::new("Song", &score, 2, true);
        assert!(!aborted.is_full_combo());

        let partial = PlayResult::new("Song", &score, 3, false);
        assert!(!partial.is_full_combo());
    }

    #[test]
    fn test_result_serializes() {
        let result = PlayResult::new("Song", &ScoreState::default(), 0, false);
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"title\":\"Song\""));
        let parsed: PlayResult = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, result);
    }

    #[test]
    fn test_dim_fades_in() {
        let mut reveal = ResultReveal::new();
        assert_eq!(reveal.dim_alpha(), 0.0);
        reveal.advance(1.0);
        assert!((reveal.dim_alpha() - 0.35).abs() < 1e-6);
        reveal.advance(5.0);
        assert!((reveal.dim_alpha() - 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_timeline_order() {
        let mut reveal = ResultReveal::new();
        assert!(reveal.advance(2.9).is_empty());

        let steps = reveal.advance(0.1);
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].item, RevealItem::Panel);
        assert!(reveal.is_revealed(RevealItem::Panel));
        assert!(!reveal.is_revealed(RevealItem::Excellent));

        // A long frame reveals several steps at once.
        let steps = reveal.advance(3.0);
        let items: Vec<_> = steps.iter().map(|s| s.item).collect();
        assert_eq!(items, vec![RevealItem::Excellent, RevealItem::Good, RevealItem::Bad]);

        let steps = reveal.advance(10.0);
        assert_eq!(steps.last().map(|s| s.cue), Some(SoundCue::Jingle));
        assert!(reveal.is_complete());
        assert!(reveal.advance(1.0).is_empty());
    }

    #[test]
    fn test_score_uses_total_cue() {
        let score = ResultReveal::timeline()
            .iter()
            .find(|s| s.item == RevealItem::Score)
            .unwrap();
        assert_eq!(score.cue, SoundCue::Total);
        assert_eq!(score.at_sec, 7.8);
    }

    #[test]
    fn test_skip() {
        let mut reveal = ResultReveal::new();
        reveal.advance(4.0);
        let rest = reveal.skip();
        assert_eq!(rest.len(), 5);
        assert_eq!(rest[0].item, RevealItem::Good);
        assert!(reveal.is_complete());
        assert!((reveal.dim_alpha() - 0.7).abs() < 1e-6);
        assert!(reveal.skip().is_empty());
    }
}
