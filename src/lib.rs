#![doc = r#"
dataprep — prepares image classification datasets for training.

Two independent batch pipelines:

- **Resize**: walk an input tree, resize every qualifying image to an exact
  resolution (aspect ratio is not preserved), and mirror the relative layout
  under an output root. Undecodable files are logged and skipped.
- **Split**: treat each sub-directory of an input root as a category,
  shuffle its images, and copy them into `{output}/{train|val|test}/{category}/`
  at fixed ratios (0.70 / 0.15 / 0.15 by default).

In practice the resize output is arranged into categories and fed to the split.

Quick start: resize a tree
--------------------------
```rust,no_run
use std::path::PathBuf;
use dataprep::{resize_directory, Resolution, ResizeParams};

fn main() -> dataprep::Result<()> {
    let params = ResizeParams {
        input_dir: PathBuf::from("data/raw"),
        output_dir: PathBuf::from("data/resized"),
        resolution: Resolution::new(224, 224),
        ..ResizeParams::default()
    };

    let report = resize_directory(&params)?;
    println!("processed={} skipped={}", report.processed, report.skipped);
    Ok(())
}
```

Split with a fixed seed
-----------------------
```rust,no_run
use dataprep::{split_directory, SplitParams};

fn main() -> dataprep::Result<()> {
    let params = SplitParams {
        seed: Some(42),
        ..SplitParams::default()
    };

    for category in split_directory(&params)?.categories {
        println!(
            "{}: train={} val={} test={}",
            category.name, category.counts.train, category.counts.val, category.counts.test
        );
    }
    Ok(())
}
```

Split counts
------------
Train and val are rounded up independently and test takes the remainder.
When the two ceilings overshoot a tiny category, counts are clamped so they
never go negative:

```rust
use dataprep::{PartitionCounts, SplitRatios};

let ten = PartitionCounts::compute(10, &SplitRatios::default());
assert_eq!((ten.train, ten.val, ten.test), (7, 2, 1));

let three = PartitionCounts::compute(3, &SplitRatios::default());
assert_eq!((three.train, three.val, three.test), (3, 0, 0));
```

Custom codecs
-------------
The resize pipeline only talks to images through [`ImageCodec`]. Pass your
own implementation to [`resize_directory_with_codec`] to change how pixels
are decoded, scaled or written.

Error handling
--------------
All public functions return `dataprep::Result<T>`. Per-file failures are
governed by [`FailurePolicy`]: `Isolate` logs them, records them in the
report and keeps going; `FailFast` returns the first one.

```rust,no_run
use dataprep::{split_directory, Error, SplitParams};

match split_directory(&SplitParams::default()) {
    Ok(report) => println!("copied {}", report.copied),
    Err(Error::Copy { from, to, .. }) => eprintln!("could not copy {from:?} to {to:?}"),
    Err(other) => eprintln!("split failed: {other}"),
}
```

Useful modules
--------------
- [`api`] — pipeline entry points and reports.
- [`core`] — parameters, pixel grid, resize and partition primitives.
- [`io`] — codec, discovery, and filesystem helpers.
- [`types`] — shared enums (`FailurePolicy`, `Interpolation`, `Subset`) and `Resolution`.
- [`error`] — crate-level `Error` and `Result`.
"#]

pub mod api;
pub mod core;
pub mod error;
pub mod io;
pub mod types;

// Curated public API surface
// Types
pub use crate::core::grid::{PixelGrid, PixelLayout};
pub use crate::core::params::{DatasetConfig, ResizeParams, SplitParams};
pub use crate::core::processing::partition::{PartitionCounts, SplitAssignment, SplitRatios};
pub use crate::error::{Error, Result};
pub use crate::types::{FailurePolicy, Interpolation, Resolution, Subset};

// Codec and discovery
pub use crate::io::codec::{ImageCodec, StandardCodec};
pub use crate::io::discover::Category;

// High-level API re-exports
pub use crate::api::{
    BatchReport, CategoryReport, FileFailure, SplitReport, plan_split, resize_directory,
    resize_directory_with_codec, resize_file, split_category, split_directory,
    split_directory_with_rng,
};
