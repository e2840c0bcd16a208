//! Tool configuration module.
//!
//! Handles loading and validating `photoprep.toml`. Configuration is
//! sparse: stock defaults are overridden by whatever keys the user's file
//! specifies, and unknown keys are rejected to catch typos early.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [compression]
//! budget_bytes = 1048576    # Max bytes per output photo (1 MiB)
//!
//! [crop]
//! aspect_ratio = [4, 3]     # width:height ratio for all output photos
//!
//! [main_image]
//! width = 400               # Exact main-photo output dimensions
//! height = 300
//!
//! [processing]
//! max_processes = 4         # Max parallel workers (omit for auto = CPU cores)
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::pipeline::PipelineSettings;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Tool configuration loaded from `photoprep.toml`.
///
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PrepConfig {
    /// Byte-budget settings for output JPEGs.
    pub compression: CompressionConfig,
    /// Aspect-ratio crop settings.
    pub crop: CropConfig,
    /// Main listing photo dimensions.
    pub main_image: MainImageConfig,
    /// Parallel processing settings.
    pub processing: ProcessingConfig,
}

impl PrepConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.compression.budget_bytes == 0 {
            return Err(ConfigError::Validation(
                "compression.budget_bytes must be non-zero".into(),
            ));
        }
        if self.crop.aspect_ratio[0] == 0 || self.crop.aspect_ratio[1] == 0 {
            return Err(ConfigError::Validation(
                "crop.aspect_ratio values must be non-zero".into(),
            ));
        }
        if self.main_image.width == 0 || self.main_image.height == 0 {
            return Err(ConfigError::Validation(
                "main_image dimensions must be non-zero".into(),
            ));
        }
        Ok(())
    }

    /// The pipeline settings this config describes.
    pub fn pipeline_settings(&self) -> PipelineSettings {
        PipelineSettings {
            budget_bytes: self.compression.budget_bytes,
            crop_aspect: (self.crop.aspect_ratio[0], self.crop.aspect_ratio[1]),
            main_size: (self.main_image.width, self.main_image.height),
        }
    }
}

/// Byte-budget settings for output JPEGs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompressionConfig {
    /// Maximum bytes per output photo.
    pub budget_bytes: usize,
}

impl Default for CompressionConfig {
    fn default() -> Self {
        Self {
            budget_bytes: 1_048_576,
        }
    }
}

/// Aspect-ratio crop settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CropConfig {
    /// Aspect ratio as `[width, height]`, e.g. `[4, 3]`.
    pub aspect_ratio: [u32; 2],
}

impl Default for CropConfig {
    fn default() -> Self {
        Self {
            aspect_ratio: [4, 3],
        }
    }
}

/// Main listing photo dimensions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MainImageConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for MainImageConfig {
    fn default() -> Self {
        Self {
            width: 400,
            height: 300,
        }
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel photo workers.
    /// When absent or null, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config.max_processes.map(|n| n.min(cores)).unwrap_or(cores)
}

// =============================================================================
// Config loading and validation
// =============================================================================

/// Load a `photoprep.toml` from a directory.
///
/// Returns `Ok(None)` if no `photoprep.toml` exists in the directory.
/// Returns `Err` if the file exists but contains invalid TOML.
pub fn load_raw_config(path: &Path) -> Result<Option<PrepConfig>, ConfigError> {
    let config_path = path.join("photoprep.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let config: PrepConfig = toml::from_str(&content)?;
    Ok(Some(config))
}

/// Load config from `photoprep.toml` in the given directory, falling back
/// to stock defaults when no file exists. Rejects unknown keys and
/// validates the result.
pub fn load_config(root: &Path) -> Result<PrepConfig, ConfigError> {
    let config = load_raw_config(root)?.unwrap_or_default();
    config.validate()?;
    Ok(config)
}

/// Load config from an explicit file path.
pub fn load_config_file(path: &Path) -> Result<PrepConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: PrepConfig = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `photoprep.toml` with all keys and
/// explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# photoprep Configuration
# =======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Place this file as photoprep.toml in the directory you run from, or
# point at it with --config.
#
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Compression
# ---------------------------------------------------------------------------
[compression]
# Maximum bytes per output photo. Quality drops from 100 in steps of 10;
# if even quality 10 is too large, the photo is downscaled once and
# re-encoded. 1048576 = 1 MiB.
budget_bytes = 1048576

# ---------------------------------------------------------------------------
# Crop
# ---------------------------------------------------------------------------
[crop]
# Aspect ratio as [width, height] applied to every output photo.
aspect_ratio = [4, 3]

# ---------------------------------------------------------------------------
# Main listing photo
# ---------------------------------------------------------------------------
[main_image]
# Exact output dimensions for the main photo. Gallery photos keep their
# cropped dimensions.
width = 400
height = 300

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel photo workers.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4
"##
}
