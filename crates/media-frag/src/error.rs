use std::fmt::{Display, Formatter};

/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, MediaFragError>;

/// Error type for temporal media-fragment parsing and formatting.
#[derive(Debug)]
pub enum MediaFragError {
    InvalidWindow {
        start: f64,
        end: f64,
    },
    Parse {
        context: &'static str,
        value: String,
    },
}

impl Display for MediaFragError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidWindow { start, end } => {
                write!(f, "invalid playback window {start}..{end}")
            }
            Self::Parse { context, value } => {
                write!(f, "parse error ({context}): {value}")
            }
        }
    }
}

impl std::error::Error for MediaFragError {}
