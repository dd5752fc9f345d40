use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use dataprep::{FailurePolicy, Interpolation, ResizeParams, Resolution, SplitParams};

#[derive(Parser, Debug)]
#[command(name = "dataprep", version, about = "Resize and split image classification datasets")]
pub struct CliArgs {
    /// JSON config file with optional `resize` and `split` sections
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging (RUST_LOG takes precedence when set)
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    /// Write the run report as JSON to this path
    #[arg(long, global = true)]
    pub report: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resize every image under the input tree to a fixed resolution
    Resize(ResizeArgs),
    /// Split per-category images into train/val/test subsets
    Split(SplitArgs),
}

#[derive(Args, Debug, Default)]
pub struct ResizeArgs {
    /// Input root, searched recursively [default: data/raw/]
    #[arg(short, long)]
    pub input_dir: Option<PathBuf>,

    /// Output root mirroring the input layout [default: data/resized/]
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Target resolution as WIDTHxHEIGHT, or a single number for a square [default: 255x255]
    #[arg(long)]
    pub size: Option<Resolution>,

    /// Resampling filter [default: bilinear]
    #[arg(long, value_enum)]
    pub interpolation: Option<Interpolation>,

    /// JPEG output quality, 1-100 [default: 95]
    #[arg(long)]
    pub jpeg_quality: Option<u8>,

    /// Qualifying file-name suffix, case-sensitive; repeat for several [default: .jpg .png .jpeg]
    #[arg(long = "ext")]
    pub extensions: Vec<String>,

    /// What to do when a file cannot be processed [default: isolate]
    #[arg(long, value_enum)]
    pub failure_policy: Option<FailurePolicy>,
}

impl ResizeArgs {
    /// Overlay explicitly given flags on `params`
    pub fn apply(self, mut params: ResizeParams) -> ResizeParams {
        if let Some(dir) = self.input_dir {
            params.input_dir = dir;
        }
        if let Some(dir) = self.output_dir {
            params.output_dir = dir;
        }
        if let Some(size) = self.size {
            params.resolution = size;
        }
        if let Some(interpolation) = self.interpolation {
            params.interpolation = interpolation;
        }
        if let Some(quality) = self.jpeg_quality {
            params.jpeg_quality = quality;
        }
        if !self.extensions.is_empty() {
            params.extensions = self.extensions;
        }
        if let Some(policy) = self.failure_policy {
            params.failure_policy = policy;
        }
        params
    }
}

#[derive(Args, Debug, Default)]
pub struct SplitArgs {
    /// Input root holding one directory per category [default: data/splitted/]
    #[arg(short, long)]
    pub input_dir: Option<PathBuf>,

    /// Output root for train/, val/ and test/ [default: data/split_dataset/]
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Train ratio [default: 0.70]
    #[arg(long)]
    pub train: Option<f64>,

    /// Validation ratio [default: 0.15]
    #[arg(long)]
    pub val: Option<f64>,

    /// Test ratio; test always receives the remainder [default: 0.15]
    #[arg(long)]
    pub test: Option<f64>,

    /// Shuffle seed for a reproducible split
    #[arg(long)]
    pub seed: Option<u64>,

    /// Qualifying file-name suffix, case-sensitive; repeat for several [default: .jpg .png .jpeg]
    #[arg(long = "ext")]
    pub extensions: Vec<String>,

    /// What to do when a file cannot be copied [default: fail-fast]
    #[arg(long, value_enum)]
    pub failure_policy: Option<FailurePolicy>,
}

impl SplitArgs {
    /// Overlay explicitly given flags on `params`
    pub fn apply(self, mut params: SplitParams) -> SplitParams {
        if let Some(dir) = self.input_dir {
            params.input_dir = dir;
        }
        if let Some(dir) = self.output_dir {
            params.output_dir = dir;
        }
        if let Some(train) = self.train {
            params.ratios.train = train;
        }
        if let Some(val) = self.val {
            params.ratios.val = val;
        }
        if let Some(test) = self.test {
            params.ratios.test = test;
        }
        if self.seed.is_some() {
            params.seed = self.seed;
        }
        if !self.extensions.is_empty() {
            params.extensions = self.extensions;
        }
        if let Some(policy) = self.failure_policy {
            params.failure_policy = policy;
        }
        params
    }
}
