use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::processing::partition::SplitRatios;
use crate::error::{Error, Result};
use crate::types::{FailurePolicy, Interpolation, Resolution, default_extensions};

/// Resizer parameters suitable for config files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResizeParams {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Exact output dimensions; aspect ratio is not preserved
    pub resolution: Resolution,
    /// File-name suffixes that qualify, matched case-sensitively
    pub extensions: Vec<String>,
    pub interpolation: Interpolation,
    /// Quality used when the output file is a JPEG (1-100)
    pub jpeg_quality: u8,
    pub failure_policy: FailurePolicy,
}

impl Default for ResizeParams {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("data/raw/"),
            output_dir: PathBuf::from("data/resized/"),
            resolution: Resolution::default(),
            extensions: default_extensions(),
            interpolation: Interpolation::Bilinear,
            jpeg_quality: 95,
            failure_policy: FailurePolicy::Isolate,
        }
    }
}

impl ResizeParams {
    pub fn validate(&self) -> Result<()> {
        self.resolution.validate()?;
        validate_extensions(&self.extensions)?;
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(Error::InvalidArgument {
                arg: "jpeg_quality",
                value: self.jpeg_quality.to_string(),
            });
        }
        Ok(())
    }
}

/// Splitter parameters suitable for config files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitParams {
    /// Root holding one sub-directory per category
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub ratios: SplitRatios,
    pub extensions: Vec<String>,
    /// Fixed shuffle seed; None draws a fresh seed from the OS each run
    pub seed: Option<u64>,
    pub failure_policy: FailurePolicy,
}

impl Default for SplitParams {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("data/splitted/"),
            output_dir: PathBuf::from("data/split_dataset/"),
            ratios: SplitRatios::default(),
            extensions: default_extensions(),
            seed: None,
            failure_policy: FailurePolicy::FailFast,
        }
    }
}

impl SplitParams {
    pub fn validate(&self) -> Result<()> {
        self.ratios.validate()?;
        validate_extensions(&self.extensions)
    }
}

/// Both pipelines' settings, as stored in a JSON config file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    pub resize: ResizeParams,
    pub split: SplitParams,
}

impl DatasetConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }
}

fn validate_extensions(extensions: &[String]) -> Result<()> {
    if extensions.is_empty() || extensions.iter().any(|e| e.is_empty()) {
        return Err(Error::InvalidArgument {
            arg: "extensions",
            value: format!("{:?}", extensions),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_layout() {
        let resize = ResizeParams::default();
        assert_eq!(resize.input_dir, PathBuf::from("data/raw/"));
        assert_eq!(resize.output_dir, PathBuf::from("data/resized/"));
        assert_eq!(resize.resolution, Resolution::new(255, 255));
        assert_eq!(resize.extensions, vec![".jpg", ".png", ".jpeg"]);
        assert_eq!(resize.failure_policy, FailurePolicy::Isolate);

        let split = SplitParams::default();
        assert_eq!(split.input_dir, PathBuf::from("data/splitted/"));
        assert_eq!(split.output_dir, PathBuf::from("data/split_dataset/"));
        assert_eq!(split.ratios, SplitRatios::default());
        assert_eq!(split.failure_policy, FailurePolicy::FailFast);
        assert!(split.seed.is_none());
    }

    #[test]
    fn partial_config_fills_in_defaults() {
        let config = DatasetConfig::from_json_str(
            r#"{
                "resize": { "resolution": { "width": 128, "height": 64 } },
                "split": { "seed": 7, "failure_policy": "isolate" }
            }"#,
        )
        .unwrap();

        assert_eq!(config.resize.resolution, Resolution::new(128, 64));
        assert_eq!(config.resize.output_dir, PathBuf::from("data/resized/"));
        assert_eq!(config.split.seed, Some(7));
        assert_eq!(config.split.failure_policy, FailurePolicy::Isolate);
        assert_eq!(config.split.ratios, SplitRatios::default());
    }

    #[test]
    fn malformed_config_is_a_config_error() {
        let err = DatasetConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn validation_catches_bad_values() {
        let mut resize = ResizeParams::default();
        resize.jpeg_quality = 0;
        assert!(resize.validate().is_err());

        let mut split = SplitParams::default();
        split.extensions.clear();
        assert!(matches!(
            split.validate(),
            Err(Error::InvalidArgument {
                arg: "extensions",
                ..
            })
        ));
    }
}
