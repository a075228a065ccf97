use tracing::debug;

use crate::error::Result;
use crate::model::RangeModel;
use crate::player::MediaPlayer;

/// Result of reapplying the playback window to the media source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedWindow {
    pub address: String,
    pub resumed: bool,
}

/// Applies the committed trim window to the player.
///
/// This is the only code allowed to assign the player's source address or
/// move its position; everything else communicates through [`RangeModel`].
#[derive(Debug)]
pub struct PlaybackWindowController<'p, M> {
    player: &'p mut M,
}

impl<'p, M> PlaybackWindowController<'p, M>
where
    M: MediaPlayer,
{
    pub fn new(player: &'p mut M) -> Self {
        Self { player }
    }

    /// Re-addresses the media source to the model's current window.
    ///
    /// The play state is read before the address is assigned and restored
    /// afterwards: reapplying a window must never leave playing media
    /// paused. Any previous window fragment is stripped before the new
    /// one is appended, and an unchanged address is not reassigned so an
    /// idempotent reapplication cannot restart the media. No-op while the
    /// model is not ready.
    pub fn apply(&mut self, model: &RangeModel) -> Result<Option<AppliedWindow>> {
        let Some(window) = model.fragment() else {
            debug!("window not applied: duration unknown");
            return Ok(None);
        };

        let address = media_frag::with_window(&self.player.address(), window);
        if address == self.player.address() {
            debug!(address = %address, "window unchanged, address not reassigned");
            return Ok(Some(AppliedWindow {
                address,
                resumed: false,
            }));
        }

        let was_playing = !self.player.paused();
        self.player.set_address(&address)?;
        if was_playing {
            self.player.play()?;
        }
        debug!(address = %address, resumed = was_playing, "window applied");

        Ok(Some(AppliedWindow {
            address,
            resumed: was_playing,
        }))
    }

    /// Moves the playback position, clamped into the active window.
    ///
    /// Seeking preserves the play/pause state per the [`MediaPlayer`]
    /// contract. Returns the position actually taken.
    pub fn seek_to(&mut self, model: &RangeModel, position: f64) -> Result<f64> {
        let target = match model.fragment() {
            Some(window) if position.is_finite() => position.clamp(window.start, window.end),
            Some(window) => window.start,
            None => position.max(0.0),
        };
        self.player.seek(target)?;
        debug!(requested = position, target, "position moved");
        Ok(target)
    }
}
