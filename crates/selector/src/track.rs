use serde::{Deserialize, Serialize};

use crate::model::RangeModel;

/// Proportional highlight of the trim window over the full track, as two
/// percentages of the asset duration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackSegment {
    pub start_pct: f64,
    pub end_pct: f64,
}

/// Maps the committed window to track percentages.
///
/// Returns `None` until the duration is known. A zero-length asset
/// highlights the full track, since its window equals the whole asset.
pub fn render(model: &RangeModel) -> Option<TrackSegment> {
    let duration = model.duration()?;
    let start = model.start()?;
    let end = model.end()?;

    if duration <= 0.0 {
        return Some(TrackSegment {
            start_pct: 0.0,
            end_pct: 100.0,
        });
    }

    Some(TrackSegment {
        start_pct: start / duration * 100.0,
        end_pct: end / duration * 100.0,
    })
}

#[cfg(test)]
mod tests {
    use super::render;
    use crate::model::RangeModel;

    #[test]
    fn highlights_the_window_proportionally() {
        let mut model = RangeModel::new();
        model.set_duration(200.0);
        model.set_start(50.0);
        model.set_end(150.0);

        let segment = render(&model).expect("ready model");

        assert_eq!(segment.start_pct, 25.0);
        assert_eq!(segment.end_pct, 75.0);
    }

    #[test]
    fn full_asset_window_spans_the_whole_track() {
        let mut model = RangeModel::new();
        model.set_duration(120.0);

        let segment = render(&model).expect("ready model");

        assert_eq!(segment.start_pct, 0.0);
        assert_eq!(segment.end_pct, 100.0);
    }

    #[test]
    fn zero_length_asset_spans_the_whole_track() {
        let mut model = RangeModel::new();
        model.set_duration(0.0);

        let segment = render(&model).expect("ready model");

        assert_eq!(segment.start_pct, 0.0);
        assert_eq!(segment.end_pct, 100.0);
    }

    #[test]
    fn renders_nothing_before_metadata() {
        assert_eq!(render(&RangeModel::new()), None);
    }
}
