use std::fmt::{Display, Formatter};

/// Result type used by the selector crate.
pub type Result<T> = std::result::Result<T, SelectorError>;

/// Errors produced by player operations behind the trim session.
///
/// Boundary edits never error: out-of-range values are clamped and
/// not-ready mutations are silent no-ops.
#[derive(Debug)]
pub enum SelectorError {
    MediaNotLoaded,
    EmptyAddress,
    Fragment(media_frag::MediaFragError),
}

impl Display for SelectorError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MediaNotLoaded => write!(f, "no media loaded in the player"),
            Self::EmptyAddress => write!(f, "media address has no base"),
            Self::Fragment(err) => write!(f, "window fragment error: {err}"),
        }
    }
}

impl std::error::Error for SelectorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Fragment(err) => Some(err),
            _ => None,
        }
    }
}

impl From<media_frag::MediaFragError> for SelectorError {
    fn from(value: media_frag::MediaFragError) -> Self {
        Self::Fragment(value)
    }
}
