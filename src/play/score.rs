use super::JudgeResult;
use crate::config::ScoringConfig;

/// Score, combo and per-tier counts of a session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreState {
    pub score: u32,
    pub combo: u32,
    pub max_combo: u32,
    pub excellent_count: u32,
    pub good_count: u32,
    pub bad_count: u32,
}

impl ScoreState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a judgment and return the points it awarded (including any combo bonus).
    pub fn add_judgment(&mut self, result: JudgeResult, scoring: &ScoringConfig) -> u32 {
        let mut points = 0;
        match result {
            JudgeResult::Excellent => {
                self.excellent_count += 1;
                points += scoring.excellent;
            }
            JudgeResult::Good => {
                self.good_count += 1;
                points += scoring.good;
            }
            JudgeResult::Bad => {
                self.bad_count += 1;
            }
        }

        if result.continues_combo() {
            self.combo += 1;
            if scoring.combo_bonus_interval > 0 && self.combo % scoring.combo_bonus_interval == 0 {
                points += scoring.combo_bonus;
            }
        } else {
            self.combo = 0;
        }

        self.max_combo = self.max_combo.max(self.combo);
        self.score = self.score.saturating_add(points);
        points
    }

    /// Award the bonus for carrying a long note through the judgment line.
    pub fn add_long_bonus(&mut self, scoring: &ScoringConfig) -> u32 {
        self.score = self.score.saturating_add(scoring.long_bonus);
        scoring.long_bonus
    }

    /// Number of notes judged so far.
    pub fn total_notes(&self) -> u32 {
        self.excellent_count + self.good_count + self.bad_count
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points_per_tier() {
        let scoring = ScoringConfig::default();
        let mut score = ScoreState::new();

        assert_eq!(score.add_judgment(JudgeResult::Excellent, &scoring), 100);
        assert_eq!(score.add_judgment(JudgeResult::Good, &scoring), 50);
        assert_eq!(score.add_judgment(JudgeResult::Bad, &scoring), 0);
        assert_eq!(score.score, 150);
        assert_eq!(score.total_notes(), 3);
    }

    #[test]
    fn test_combo_bonus_every_tenth_hit() {
        let scoring = ScoringConfig::default();
        let mut score = ScoreState::new();

        for _ in 0..9 {
            score.add_judgment(JudgeResult::Good, &scoring);
        }
        assert_eq!(score.score, 450);

        assert_eq!(score.add_judgment(JudgeResult::Good, &scoring), 70);
        assert_eq!(score.score, 520);

        for _ in 0..10 {
            score.add_judgment(JudgeResult::Good, &scoring);
        }
        assert_eq!(score.combo, 20);
        assert_eq!(score.score, 520 + 500 + 20);
    }

    #[test]
    fn test_bad_resets_combo_not_max() {
        let scoring = ScoringConfig::default();
        let mut score = ScoreState::new();

        for _ in 0..4 {
            score.add_judgment(JudgeResult::Excellent, &scoring);
        }
        score.add_judgment(JudgeResult::Bad, &scoring);
        assert_eq!(score.combo, 0);
        assert_eq!(score.max_combo, 4);

        score.add_judgment(JudgeResult::Excellent, &scoring);
        assert_eq!(score.combo, 1);
        assert_eq!(score.max_combo, 4);
    }

    #[test]
    fn test_long_bonus() {
        let scoring = ScoringConfig::default();
        let mut score = ScoreState::new();
        assert_eq!(score.add_long_bonus(&scoring), 30);
        assert_eq!(score.score, 30);
        assert_eq!(score.combo, 0);
    }

    #[test]
    fn test_reset() {
        let scoring = ScoringConfig::default();
        let mut score = ScoreState::new();
        score.add_judgment(JudgeResult::Excellent, &scoring);
        score.reset();
        assert_eq!(score, ScoreState::default());
    }
}
