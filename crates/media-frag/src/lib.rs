//! Temporal media-fragment addressing for playback-window control.

mod error;
mod fragment;

pub use error::{MediaFragError, Result};
pub use fragment::{TemporalFragment, strip_fragment, window_of, with_window};
