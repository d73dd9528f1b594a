use anyhow::{Context, Result};
use std::path::Path;

use super::beatmap::Beatmap;

/// Load a beatmap from a JSON file.
pub fn load_beatmap(path: &Path) -> Result<Beatmap> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read beatmap {}", path.display()))?;
    let beatmap: Beatmap = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse beatmap {}", path.display()))?;
    tracing::debug!(
        path = %path.display(),
        notes = beatmap.notes.len(),
        "loaded beatmap"
    );
    Ok(beatmap)
}
