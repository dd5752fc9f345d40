pub mod partition;
pub mod resize;
