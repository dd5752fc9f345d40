//! Shared types and enums used across dataprep.
//! Includes `Resolution`, `Interpolation`, `FailurePolicy`, `Subset`, and
//! the default qualifying extension set.
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Extensions picked up when none are configured. Matched case-sensitively
/// against the end of the file name.
pub const DEFAULT_EXTENSIONS: [&str; 3] = [".jpg", ".png", ".jpeg"];

pub fn default_extensions() -> Vec<String> {
    DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect()
}

/// Exact output dimensions in pixels. Aspect ratio is never preserved.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn validate(&self) -> crate::Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::ZeroSize {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

impl Default for Resolution {
    fn default() -> Self {
        Self::new(255, 255)
    }
}

impl std::fmt::Display for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Parses `WIDTHxHEIGHT` (e.g. `255x255`) or a single number for a square.
impl FromStr for Resolution {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidArgument {
            arg: "size",
            value: s.to_string(),
        };
        let trimmed = s.trim();
        let (w, h) = match trimmed.split_once(['x', 'X']) {
            Some((w, h)) => (w.trim(), h.trim()),
            None => (trimmed, trimmed),
        };
        let width = w.parse::<u32>().map_err(|_| invalid())?;
        let height = h.parse::<u32>().map_err(|_| invalid())?;
        let res = Resolution::new(width, height);
        res.validate()?;
        Ok(res)
    }
}

/// Resampling filter used when resizing to the target resolution.
#[derive(
    Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Interpolation {
    Nearest,
    #[default]
    Bilinear,
    CatmullRom,
    Lanczos3,
}

impl std::fmt::Display for Interpolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Interpolation::Nearest => write!(f, "Nearest"),
            Interpolation::Bilinear => write!(f, "Bilinear"),
            Interpolation::CatmullRom => write!(f, "CatmullRom"),
            Interpolation::Lanczos3 => write!(f, "Lanczos3"),
        }
    }
}

/// What a pipeline does when a single file fails.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailurePolicy {
    /// Log the failure, record it in the report, and continue with the next file.
    Isolate,
    /// Abort the batch with the first error.
    FailFast,
}

impl std::fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailurePolicy::Isolate => write!(f, "Isolate"),
            FailurePolicy::FailFast => write!(f, "FailFast"),
        }
    }
}

/// One of the three disjoint partitions of a category.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Subset {
    Train,
    Val,
    Test,
}

impl Subset {
    /// Assignment order: train takes the head of the shuffled list, test the tail.
    pub const ALL: [Subset; 3] = [Subset::Train, Subset::Val, Subset::Test];

    pub fn dir_name(&self) -> &'static str {
        match self {
            Subset::Train => "train",
            Subset::Val => "val",
            Subset::Test => "test",
        }
    }
}

impl std::fmt::Display for Subset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.dir_name())
    }
}
