//! Common algorithms and utilities.

mod levels;
mod window_function;

pub use levels::SampleLevelExt;
pub use window_function::{fill_window, WindowFunction};
