//! I/O layer: the image codec behind the `ImageCodec` trait, input
//! discovery, filesystem primitives, and format-specific `writers`.
pub mod codec;
pub use codec::{ImageCodec, StandardCodec};

pub mod discover;
pub use discover::{
    Category, ImageListing, collect_images_recursive, list_categories, list_category_images,
};

pub mod fsops;
pub use fsops::{copy_file, ensure_dir, mirrored_path, nested_subtree};

pub mod writers;
