//! Argument building - raw option values in, validated payload out

mod builder;
mod raw;

pub use builder::{ArgumentMap, build_arguments};
pub use raw::{RawInput, RawValue};
