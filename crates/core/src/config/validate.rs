use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Library section exists (enforced by serde)
/// - Library root is an existing directory
/// - FFmpeg path is not empty
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if !config.library.root.is_dir() {
        return Err(ConfigError::ValidationError(format!(
            "library.root is not a directory: {}",
            config.library.root.display()
        )));
    }

    if config.clip.ffmpeg_path.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "clip.ffmpeg_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}
