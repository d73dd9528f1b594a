use thiserror::Error;

/// Reasons a play session cannot start.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("No beatmap selected for the session")]
    MissingBeatmap,

    #[error("Invalid beatmap: {0}")]
    InvalidBeatmap(String),

    #[error("Note {index} uses lane {lane} but only {lane_count} lanes are configured")]
    LaneOutOfRange {
        index: usize,
        lane: usize,
        lane_count: usize,
    },

    #[error("Invalid session config: {0}")]
    InvalidConfig(String),
}
