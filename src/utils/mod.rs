//! Shared utilities

pub mod paths;

pub use paths::{create_dir_retrying, split_compound_ext};
