use media_frag::TemporalFragment;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Boundary of the trim window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Boundary {
    Start,
    End,
}

/// Trim window over one timed media asset.
///
/// The model is the single source of truth for `start`, `end` and
/// `duration`: every setter normalizes against the currently committed
/// state, never against a caller's stale copy. Until the asset reports a
/// usable duration the model is not ready and boundary mutations are
/// silent no-ops.
///
/// Invariants after every mutation: `0 <= start <= end <= duration` and
/// `end - start >= min(min_gap, duration)`.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeModel {
    min_gap: f64,
    state: State,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum State {
    NotReady,
    Ready(Window),
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Window {
    duration: f64,
    start: f64,
    end: f64,
}

impl RangeModel {
    /// Creates a not-ready model with no minimum gap.
    pub fn new() -> Self {
        Self::with_min_gap(0.0)
    }

    /// Creates a not-ready model with a minimum boundary distance.
    ///
    /// A non-finite or negative gap normalizes to `0`.
    pub fn with_min_gap(min_gap: f64) -> Self {
        let min_gap = if min_gap.is_finite() && min_gap > 0.0 {
            min_gap
        } else {
            0.0
        };

        Self {
            min_gap,
            state: State::NotReady,
        }
    }

    /// Whether the asset duration is known.
    pub fn is_ready(&self) -> bool {
        matches!(self.state, State::Ready(_))
    }

    pub fn duration(&self) -> Option<f64> {
        self.window().map(|window| window.duration)
    }

    pub fn start(&self) -> Option<f64> {
        self.window().map(|window| window.start)
    }

    pub fn end(&self) -> Option<f64> {
        self.window().map(|window| window.end)
    }

    pub fn min_gap(&self) -> f64 {
        self.min_gap
    }

    /// Records the asset duration reported by the metadata-ready signal.
    ///
    /// The first usable duration transitions the model to ready with the
    /// window defaulted to the full asset. A later report re-clamps the
    /// committed window. `NaN` or negative durations are rejected and
    /// leave the model unchanged; returns whether the duration was
    /// accepted.
    pub fn set_duration(&mut self, duration: f64) -> bool {
        if !duration.is_finite() || duration < 0.0 {
            warn!(duration, "duration rejected: not a usable length");
            return false;
        }

        if let State::Ready(window) = &mut self.state {
            let gap = self.min_gap.min(duration);
            window.duration = duration;
            window.end = window.end.min(duration).max(gap);
            window.start = window.start.clamp(0.0, window.end - gap);
            debug!(
                duration,
                start = window.start,
                end = window.end,
                "duration updated, window re-clamped"
            );
        } else {
            self.state = State::Ready(Window {
                duration,
                start: 0.0,
                end: duration,
            });
            debug!(duration, "model ready, window defaulted to full asset");
        }

        true
    }

    /// Commits a new start boundary, yielding to the committed end.
    ///
    /// The value is clamped into `[0, duration]` and then against
    /// `end - min_gap`. Returns the committed start, or `None` while the
    /// duration is unknown.
    pub fn set_start(&mut self, value: f64) -> Option<f64> {
        let gap = self.effective_gap()?;
        let window = self.window_mut()?;
        if !value.is_finite() {
            debug!(value, "start edit ignored: not a finite number");
            return Some(window.start);
        }

        let committed = value.clamp(0.0, window.duration).min(window.end - gap);
        window.start = committed;
        debug!(requested = value, committed, "start committed");
        Some(committed)
    }

    /// Commits a new end boundary, yielding to the committed start.
    pub fn set_end(&mut self, value: f64) -> Option<f64> {
        let gap = self.effective_gap()?;
        let window = self.window_mut()?;
        if !value.is_finite() {
            debug!(value, "end edit ignored: not a finite number");
            return Some(window.end);
        }

        let committed = value.clamp(0.0, window.duration).max(window.start + gap);
        window.end = committed;
        debug!(requested = value, committed, "end committed");
        Some(committed)
    }

    /// Dispatches to [`Self::set_start`] or [`Self::set_end`].
    pub fn set(&mut self, boundary: Boundary, value: f64) -> Option<f64> {
        match boundary {
            Boundary::Start => self.set_start(value),
            Boundary::End => self.set_end(value),
        }
    }

    /// Commits a captured playback position as the start boundary.
    ///
    /// Unlike [`Self::set_start`], the captured boundary takes priority:
    /// the end boundary is dragged forward when needed to keep the gap,
    /// clamped to the asset.
    pub fn capture_start(&mut self, position: f64) -> Option<f64> {
        let gap = self.effective_gap()?;
        let window = self.window_mut()?;
        if !position.is_finite() {
            debug!(position, "start capture ignored: not a finite position");
            return Some(window.start);
        }

        let mut start = position.clamp(0.0, window.duration);
        if window.end - start < gap {
            window.end = (start + gap).min(window.duration);
            start = start.min(window.end - gap);
        }
        window.start = start;
        debug!(position, start, end = window.end, "start captured");
        Some(start)
    }

    /// Commits a captured playback position as the end boundary,
    /// dragging the start backward when needed to keep the gap.
    pub fn capture_end(&mut self, position: f64) -> Option<f64> {
        let gap = self.effective_gap()?;
        let window = self.window_mut()?;
        if !position.is_finite() {
            debug!(position, "end capture ignored: not a finite position");
            return Some(window.end);
        }

        let mut end = position.clamp(0.0, window.duration);
        if end - window.start < gap {
            window.start = (end - gap).max(0.0);
            end = end.max(window.start + gap);
        }
        window.end = end;
        debug!(position, start = window.start, end, "end captured");
        Some(end)
    }

    /// Dispatches to [`Self::capture_start`] or [`Self::capture_end`].
    pub fn capture(&mut self, boundary: Boundary, position: f64) -> Option<f64> {
        match boundary {
            Boundary::Start => self.capture_start(position),
            Boundary::End => self.capture_end(position),
        }
    }

    /// Returns the addressable playback-window descriptor.
    pub fn fragment(&self) -> Option<TemporalFragment> {
        let window = self.window()?;
        TemporalFragment::new(window.start, window.end).ok()
    }

    fn effective_gap(&self) -> Option<f64> {
        match self.state {
            State::Ready(window) => Some(self.min_gap.min(window.duration)),
            State::NotReady => {
                debug!("boundary mutation ignored: duration unknown");
                None
            }
        }
    }

    fn window(&self) -> Option<&Window> {
        match &self.state {
            State::Ready(window) => Some(window),
            State::NotReady => None,
        }
    }

    fn window_mut(&mut self) -> Option<&mut Window> {
        match &mut self.state {
            State::Ready(window) => Some(window),
            State::NotReady => None,
        }
    }
}

impl Default for RangeModel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::RangeModel;

    fn assert_invariants(model: &RangeModel) {
        let duration = model.duration().expect("ready model");
        let start = model.start().expect("ready model");
        let end = model.end().expect("ready model");
        assert!(0.0 <= start && start <= end && end <= duration);
        assert!(end - start >= model.min_gap().min(duration));
    }

    #[test]
    fn boundary_mutations_before_metadata_are_no_ops() {
        let mut model = RangeModel::new();

        assert_eq!(model.set_start(10.0), None);
        assert_eq!(model.set_end(20.0), None);
        assert_eq!(model.capture_start(5.0), None);
        assert!(!model.is_ready());
        assert_eq!(model.fragment(), None);
    }

    #[test]
    fn first_duration_defaults_window_to_full_asset() {
        let mut model = RangeModel::new();

        assert!(model.set_duration(120.0));

        assert_eq!(model.start(), Some(0.0));
        assert_eq!(model.end(), Some(120.0));
        assert_invariants(&model);
    }

    #[test]
    fn nan_and_negative_durations_are_rejected() {
        let mut model = RangeModel::new();

        assert!(!model.set_duration(f64::NAN));
        assert!(!model.set_duration(-3.0));
        assert!(!model.is_ready());
    }

    #[test]
    fn later_duration_report_reclamps_the_window() {
        let mut model = RangeModel::new();
        model.set_duration(120.0);
        model.set_start(60.0);

        assert!(model.set_duration(50.0));

        assert_eq!(model.start(), Some(50.0));
        assert_eq!(model.end(), Some(50.0));
        assert_invariants(&model);
    }

    #[test]
    fn set_start_clamps_into_asset_bounds() {
        let mut model = RangeModel::new();
        model.set_duration(120.0);

        assert_eq!(model.set_start(-5.0), Some(0.0));
        assert_eq!(model.set_start(300.0), Some(120.0));
        assert_invariants(&model);
    }

    #[test]
    fn set_start_is_idempotent_for_a_repeated_value() {
        let mut model = RangeModel::new();
        model.set_duration(120.0);

        let first = model.set_start(30.0);
        let second = model.set_start(30.0);

        assert_eq!(first, Some(30.0));
        assert_eq!(first, second);
    }

    #[test]
    fn set_end_yields_to_the_committed_start() {
        let mut model = RangeModel::new();
        model.set_duration(120.0);
        model.set_start(30.0);

        assert_eq!(model.set_end(20.0), Some(30.0));
        assert_invariants(&model);
    }

    #[test]
    fn gap_pushes_a_too_close_end_forward() {
        let mut model = RangeModel::with_min_gap(2.0);
        model.set_duration(10.0);
        model.set_start(5.0);

        assert_eq!(model.set_end(5.5), Some(7.0));
        assert_invariants(&model);
    }

    #[test]
    fn gap_pulls_a_too_close_start_backward() {
        let mut model = RangeModel::with_min_gap(2.0);
        model.set_duration(10.0);
        model.set_end(6.0);

        assert_eq!(model.set_start(5.0), Some(4.0));
        assert_invariants(&model);
    }

    #[test]
    fn capture_start_drags_the_end_forward() {
        let mut model = RangeModel::new();
        model.set_duration(120.0);
        model.set_start(30.0);
        model.set_end(30.0);

        assert_eq!(model.capture_start(45.0), Some(45.0));

        assert_eq!(model.end(), Some(45.0));
        assert_invariants(&model);
    }

    #[test]
    fn capture_end_drags_the_start_backward() {
        let mut model = RangeModel::with_min_gap(2.0);
        model.set_duration(10.0);
        model.set_start(5.0);

        assert_eq!(model.capture_end(0.5), Some(2.0));

        assert_eq!(model.start(), Some(0.0));
        assert_invariants(&model);
    }

    #[test]
    fn capture_near_the_asset_edge_is_capped_by_the_duration() {
        let mut model = RangeModel::with_min_gap(2.0);
        model.set_duration(10.0);

        assert_eq!(model.capture_start(9.5), Some(8.0));

        assert_eq!(model.end(), Some(10.0));
        assert_invariants(&model);
    }

    #[test]
    fn gap_wider_than_the_asset_degenerates_to_the_full_asset() {
        let mut model = RangeModel::with_min_gap(30.0);
        model.set_duration(10.0);

        assert_eq!(model.set_start(4.0), Some(0.0));
        assert_eq!(model.set_end(6.0), Some(10.0));
        assert_invariants(&model);
    }

    #[test]
    fn non_finite_edits_report_the_committed_value() {
        let mut model = RangeModel::new();
        model.set_duration(120.0);
        model.set_start(30.0);

        assert_eq!(model.set_start(f64::NAN), Some(30.0));
        assert_eq!(model.start(), Some(30.0));
    }

    #[test]
    fn negative_min_gap_normalizes_to_zero() {
        let model = RangeModel::with_min_gap(-1.0);
        assert_eq!(model.min_gap(), 0.0);
    }

    #[test]
    fn fragment_reflects_the_committed_window() {
        let mut model = RangeModel::new();
        model.set_duration(120.0);
        model.set_start(30.0);
        model.set_end(60.0);

        let fragment = model.fragment().expect("ready model");
        assert_eq!((fragment.start, fragment.end), (30.0, 60.0));
    }
}
