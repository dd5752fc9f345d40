//! Core building blocks: pipeline parameters, the in-memory pixel grid,
//! exact-size resizing and split arithmetic. These are internal primitives
//! consumed by the high-level `api` module.
pub mod grid;
pub mod params;
pub mod processing;
