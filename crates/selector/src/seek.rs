use tracing::debug;

use crate::error::Result;
use crate::model::{Boundary, RangeModel};
use crate::player::MediaPlayer;
use crate::window::PlaybackWindowController;

/// Jump and capture operations composed over the model and the window
/// controller.
#[derive(Debug)]
pub struct SeekController<'p, M> {
    player: &'p mut M,
}

impl<'p, M> SeekController<'p, M>
where
    M: MediaPlayer,
{
    pub fn new(player: &'p mut M) -> Self {
        Self { player }
    }

    /// Seeks to the window start. No-op while the model is not ready.
    pub fn jump_to_start(&mut self, model: &RangeModel) -> Result<Option<f64>> {
        self.jump(model, Boundary::Start)
    }

    /// Seeks to the window end. No-op while the model is not ready.
    pub fn jump_to_end(&mut self, model: &RangeModel) -> Result<Option<f64>> {
        self.jump(model, Boundary::End)
    }

    /// Captures the current playback position as the given boundary.
    ///
    /// Returns the committed boundary value; refreshing the handle views
    /// and reapplying the window is the caller's post-mutation step.
    pub fn capture(&mut self, model: &mut RangeModel, boundary: Boundary) -> Option<f64> {
        let position = self.player.position();
        let committed = model.capture(boundary, position)?;
        debug!(boundary = ?boundary, position, committed, "position captured");
        Some(committed)
    }

    fn jump(&mut self, model: &RangeModel, boundary: Boundary) -> Result<Option<f64>> {
        let Some(window) = model.fragment() else {
            debug!(boundary = ?boundary, "jump ignored: duration unknown");
            return Ok(None);
        };
        let target = match boundary {
            Boundary::Start => window.start,
            Boundary::End => window.end,
        };

        PlaybackWindowController::new(self.player)
            .seek_to(model, target)
            .map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::SeekController;
    use crate::model::{Boundary, RangeModel};
    use crate::player::{MediaPlayer, SimulatedPlayer};

    fn trimmed_model() -> RangeModel {
        let mut model = RangeModel::new();
        model.set_duration(120.0);
        model.set_start(30.0);
        model.set_end(60.0);
        model
    }

    #[test]
    fn jump_to_start_seeks_to_the_window_start() {
        let mut player = SimulatedPlayer::with_address("clip.mp4");
        let model = trimmed_model();

        let position = SeekController::new(&mut player)
            .jump_to_start(&model)
            .expect("seek");

        assert_eq!(position, Some(30.0));
        assert_eq!(player.position(), 30.0);
    }

    #[test]
    fn jump_to_end_seeks_to_the_window_end() {
        let mut player = SimulatedPlayer::with_address("clip.mp4");
        let model = trimmed_model();

        let position = SeekController::new(&mut player)
            .jump_to_end(&model)
            .expect("seek");

        assert_eq!(position, Some(60.0));
        assert_eq!(player.position(), 60.0);
    }

    #[test]
    fn jump_before_metadata_is_a_no_op() {
        let mut player = SimulatedPlayer::with_address("clip.mp4");
        let model = RangeModel::new();

        let position = SeekController::new(&mut player)
            .jump_to_start(&model)
            .expect("seek");

        assert_eq!(position, None);
        assert_eq!(player.position(), 0.0);
    }

    #[test]
    fn capture_commits_the_player_position() {
        let mut player = SimulatedPlayer::with_address("clip.mp4");
        player.seek(45.0).expect("seek");
        let mut model = trimmed_model();

        let committed =
            SeekController::new(&mut player).capture(&mut model, Boundary::End);

        assert_eq!(committed, Some(45.0));
        assert_eq!(model.end(), Some(45.0));
    }

    #[test]
    fn capture_before_metadata_is_a_no_op() {
        let mut player = SimulatedPlayer::with_address("clip.mp4");
        let mut model = RangeModel::new();

        let committed =
            SeekController::new(&mut player).capture(&mut model, Boundary::Start);

        assert_eq!(committed, None);
        assert!(!model.is_ready());
    }
}
