use std::fmt::{Display, Formatter};

use crate::error::{MediaFragError, Result};

/// Temporal playback window expressed as a media-fragment suffix.
///
/// Only the two-ended `t=<start>,<end>` form is supported: window
/// addressing always writes both boundaries, so open-ended fragments
/// (`t=10`, `t=,20`) are treated as parse errors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemporalFragment {
    pub start: f64,
    pub end: f64,
}

impl TemporalFragment {
    /// Creates a validated window.
    ///
    /// # Example
    /// ```
    /// use media_frag::TemporalFragment;
    ///
    /// let window = TemporalFragment::new(12.5, 97.0).expect("valid");
    /// assert_eq!(window.end, 97.0);
    /// assert!(TemporalFragment::new(5.0, 3.0).is_err());
    /// ```
    pub fn new(start: f64, end: f64) -> Result<Self> {
        if !start.is_finite() || !end.is_finite() || start < 0.0 || end < start {
            return Err(MediaFragError::InvalidWindow { start, end });
        }

        Ok(Self { start, end })
    }

    /// Parses the value of a temporal fragment, with or without the
    /// `npt:` prefix.
    ///
    /// # Example
    /// ```
    /// use media_frag::TemporalFragment;
    ///
    /// let window = TemporalFragment::parse("npt:10,20").expect("valid");
    /// assert_eq!(window.start, 10.0);
    /// ```
    pub fn parse(input: &str) -> Result<Self> {
        let value = input.strip_prefix("npt:").unwrap_or(input);
        let (start, end) = value.split_once(',').ok_or_else(|| MediaFragError::Parse {
            context: "temporal fragment",
            value: input.to_string(),
        })?;
        let start = parse_seconds(start, "window start")?;
        let end = parse_seconds(end, "window end")?;
        Self::new(start, end)
    }
}

impl Display for TemporalFragment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "t={},{}", self.start, self.end)
    }
}

fn parse_seconds(input: &str, context: &'static str) -> Result<f64> {
    let seconds: f64 = input.trim().parse().map_err(|_| MediaFragError::Parse {
        context,
        value: input.to_string(),
    })?;
    if !seconds.is_finite() {
        return Err(MediaFragError::Parse {
            context,
            value: input.to_string(),
        });
    }

    Ok(seconds)
}

/// Returns the address without its fragment suffix.
pub fn strip_fragment(address: &str) -> &str {
    match address.split_once('#') {
        Some((base, _)) => base,
        None => address,
    }
}

/// Extracts the playback window carried by an address.
///
/// Non-temporal fragments are ignored, matching how a host player treats
/// fragment dimensions it does not understand. A `t=` fragment that fails
/// to parse is an error.
///
/// # Example
/// ```
/// use media_frag::window_of;
///
/// let window = window_of("clip.mp4#t=30,45").expect("valid").expect("present");
/// assert_eq!((window.start, window.end), (30.0, 45.0));
/// assert!(window_of("clip.mp4#chapter-2").expect("valid").is_none());
/// ```
pub fn window_of(address: &str) -> Result<Option<TemporalFragment>> {
    let Some((_, fragment)) = address.split_once('#') else {
        return Ok(None);
    };
    let Some(value) = fragment.strip_prefix("t=") else {
        return Ok(None);
    };

    TemporalFragment::parse(value).map(Some)
}

/// Re-addresses `address` to the given playback window.
///
/// Any existing fragment is stripped first so repeated window changes never
/// stack fragments onto the address.
pub fn with_window(address: &str, window: TemporalFragment) -> String {
    format!("{}#{window}", strip_fragment(address))
}
