// Gameplay core: spawning, note movement, judgment, scoring and the session that ties them.

pub mod autoplay;
pub mod error;
pub mod judge;
pub mod lane_judge;
pub mod live_note;
pub mod result;
pub mod scheduler;
pub mod score;
pub mod session;

pub use autoplay::{ScriptedInput, generate_autoplay_events};
pub use error::SessionError;
pub use judge::{JudgePolicy, JudgeResult, JudgeWindow};
pub use lane_judge::{KeyDownOutcome, LaneJudge};
pub use live_note::{LifecycleEvent, LiveNote, NoteField, NoteId, Track};
pub use result::{PlayResult, ResultReveal, RevealItem, RevealStep, SoundCue};
pub use scheduler::{NoteScheduler, SpawnParams};
pub use score::ScoreState;
pub use session::{PlayPhase, PlaySession};
