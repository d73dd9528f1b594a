// Beatmap data and step-to-time conversion.

pub mod beatmap;
pub mod beatmap_loader;
pub mod timing;

pub use beatmap::{Beatmap, NoteData};
pub use beatmap_loader::load_beatmap;
pub use timing::{
    last_note_end_time, note_duration, note_end_time, note_hit_time, step_duration,
    time_from_step,
};
