use std::{
    ffi::OsStr,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context as _, Result};
use writing_history::{DocumentHistory, Event};

/// The name a document's outputs are derived from.
pub fn document_name(path: &Path) -> String {
    path.file_stem()
        .unwrap_or(path.as_os_str())
        .to_string_lossy()
        .into_owned()
}

/// Read the events of a `.json` document, anything else is parsed as YAML.
pub fn read_events(path: &Path) -> Result<Vec<Event>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Cannot read document from {}", path.display()))?;

    if path.extension().and_then(OsStr::to_str) == Some("json") {
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse events of {}", path.display()))
    } else {
        serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse events of {}", path.display()))
    }
}

pub fn read_lexicon(path: &Path) -> Result<Vec<String>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Cannot read lexicon from {}", path.display()))?;

    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|word| !word.is_empty())
        .map(str::to_owned)
        .collect())
}

pub fn write_history(directory: &Path, name: &str, history: &DocumentHistory) -> Result<PathBuf> {
    fs::create_dir_all(directory)
        .with_context(|| format!("Cannot create output directory {}", directory.display()))?;

    let path = directory.join(format!("{name}.history.json"));
    let contents =
        serde_json::to_string_pretty(history).context("Failed to serialize the history")?;
    fs::write(&path, contents)
        .with_context(|| format!("Failed to write history to {}", path.display()))?;

    Ok(path)
}
