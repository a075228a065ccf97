use tracing::debug;

use crate::error::{Result, SelectorError};

/// Playback operations required from the host media element.
///
/// `seek` must preserve the play/pause state. Assigning a new address may
/// interrupt playback; the window controller reads the state first and
/// restores it afterwards.
pub trait MediaPlayer {
    /// Current playback position in seconds.
    fn position(&self) -> f64;

    /// Whether playback is paused.
    fn paused(&self) -> bool;

    /// Current source address, including any fragment suffix.
    fn address(&self) -> String;

    /// Assigns the source address.
    fn set_address(&mut self, address: &str) -> Result<()>;

    /// Moves the playback position.
    fn seek(&mut self, position: f64) -> Result<()>;

    /// Starts playback. Idempotent.
    fn play(&mut self) -> Result<()>;

    /// Pauses playback. Idempotent.
    fn pause(&mut self) -> Result<()>;
}

/// In-memory player used by the demo binaries and tests.
///
/// Reproduces the observable contract of an addressable media element:
/// assigning an address validates any window fragment, moves the position
/// to the window start and pauses playback; `play` without a source fails.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulatedPlayer {
    address: String,
    position: f64,
    paused: bool,
}

impl SimulatedPlayer {
    /// Creates a player with no source assigned.
    pub fn new() -> Self {
        Self {
            address: String::new(),
            position: 0.0,
            paused: true,
        }
    }

    /// Creates a paused player positioned at the start of `address`.
    pub fn with_address(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            position: 0.0,
            paused: true,
        }
    }

    fn ensure_loaded(&self) -> Result<()> {
        if self.address.is_empty() {
            return Err(SelectorError::MediaNotLoaded);
        }
        Ok(())
    }
}

impl Default for SimulatedPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl MediaPlayer for SimulatedPlayer {
    fn position(&self) -> f64 {
        self.position
    }

    fn paused(&self) -> bool {
        self.paused
    }

    fn address(&self) -> String {
        self.address.clone()
    }

    fn set_address(&mut self, address: &str) -> Result<()> {
        if media_frag::strip_fragment(address).is_empty() {
            return Err(SelectorError::EmptyAddress);
        }
        let window = media_frag::window_of(address)?;

        self.position = window.map(|window| window.start).unwrap_or(0.0);
        self.paused = true;
        self.address = address.to_owned();
        debug!(address, position = self.position, "source assigned");
        Ok(())
    }

    fn seek(&mut self, position: f64) -> Result<()> {
        self.ensure_loaded()?;
        self.position = position.max(0.0);
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        self.ensure_loaded()?;
        self.paused = false;
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        self.paused = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{MediaPlayer, SimulatedPlayer};
    use crate::error::SelectorError;

    #[test]
    fn assigning_an_address_pauses_and_moves_to_the_window_start() {
        let mut player = SimulatedPlayer::with_address("clip.mp4");
        player.play().expect("play");
        player.seek(50.0).expect("seek");

        player.set_address("clip.mp4#t=30,60").expect("set address");

        assert!(player.paused());
        assert_eq!(player.position(), 30.0);
    }

    #[test]
    fn assigning_a_plain_address_rewinds_to_zero() {
        let mut player = SimulatedPlayer::with_address("clip.mp4");
        player.seek(50.0).expect("seek");

        player.set_address("other.mp4").expect("set address");

        assert_eq!(player.position(), 0.0);
    }

    #[test]
    fn rejects_an_address_with_no_base() {
        let mut player = SimulatedPlayer::new();

        let result = player.set_address("#t=0,10");

        assert!(matches!(result, Err(SelectorError::EmptyAddress)));
    }

    #[test]
    fn rejects_a_malformed_window_fragment() {
        let mut player = SimulatedPlayer::with_address("clip.mp4");

        let result = player.set_address("clip.mp4#t=bogus");

        assert!(matches!(result, Err(SelectorError::Fragment(_))));
        assert_eq!(player.address(), "clip.mp4");
    }

    #[test]
    fn play_without_a_source_fails() {
        let mut player = SimulatedPlayer::new();

        assert!(matches!(player.play(), Err(SelectorError::MediaNotLoaded)));
    }

    #[test]
    fn seek_preserves_the_play_state() {
        let mut player = SimulatedPlayer::with_address("clip.mp4");
        player.play().expect("play");

        player.seek(12.0).expect("seek");

        assert!(!player.paused());
        assert_eq!(player.position(), 12.0);
    }
}
