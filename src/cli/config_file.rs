use std::{fs, path::Path};

use anyhow::{Context as _, Result};
use log::info;
use writing_history::PipelineConfig;

/// Load the configuration at `path`, falling back to the defaults for
/// missing fields, and write the complete configuration back.
pub fn read_or_create(path: &Path) -> Result<PipelineConfig> {
    let config = if path.exists() {
        info!("Loading configuration from '{}'", path.display());
        load_from_file(path)?
    } else {
        PipelineConfig::default()
    };

    write(&config, path)?;
    info!("Updated configuration at '{}'", path.display());

    Ok(config)
}

pub fn load_from_file(path: &Path) -> Result<PipelineConfig> {
    let contents = fs::read_to_string(path).with_context(|| {
        format!(
            "Cannot load configuration from disk from {}",
            path.display()
        )
    })?;

    serde_yaml::from_str(&contents).context("Failed to parse configuration")
}

pub fn write(config: &PipelineConfig, path: &Path) -> Result<()> {
    let contents = serde_yaml::to_string(config).context("Failed to serialize configuration")?;

    fs::write(path, contents).context("Failed to write configuration to disk")
}
