// Boundaries between the play core and its collaborators (audio clock, input, playfield).

pub mod input;
pub mod render;
pub mod time;

pub use input::{InputProvider, KeyEvent};
pub use render::{CommandRecorder, NullView, PlayfieldView, ViewCommand};
pub use time::{ClockSource, ManualClock, SystemClock};
