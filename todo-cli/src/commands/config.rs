use std::fs;

use anyhow::{Context, Result, anyhow};
use shared::config::{ClientConfig, ConfigFormat};

/// Generates a configuration file with default values in the current directory.
///
/// # Arguments
/// * `format` - The format of the configuration file ("yaml", "json" or "toml").
///
/// # Errors
/// Returns an error if the format is unsupported or if writing the file fails.
pub fn generate_config(format: &str) -> Result<()> {
    let format: ConfigFormat = format.parse().map_err(|err: String| anyhow!(err))?;
    let file_name = format.file_name();
    let serialized = format.render(&ClientConfig::with_defaults())?;

    fs::write(file_name, serialized)
        .with_context(|| format!("failed to write configuration file {file_name}"))?;

    println!("Configuration file '{file_name}' generated successfully.");
    Ok(())
}
