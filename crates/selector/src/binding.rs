use tracing::debug;

use crate::model::{Boundary, RangeModel};

/// View sink receiving committed boundary values.
pub trait HandleView {
    fn present(&mut self, value: f64);
}

/// Last value presented to a view.
///
/// The concrete sink used by the session: snapshots read it back so
/// view/model consistency stays observable.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DisplayedValue(Option<f64>);

impl DisplayedValue {
    pub fn get(&self) -> Option<f64> {
        self.0
    }
}

impl HandleView for DisplayedValue {
    fn present(&mut self, value: f64) {
        self.0 = Some(value);
    }
}

/// Couples one trim boundary to its two redundant views.
///
/// Every edit routes through the model and writes the committed value
/// back into both the numeric field and the slider handle, so the views
/// never diverge from the model even when the requested value was
/// clamped. The field and slider entry points share one commit path and
/// therefore produce identical final state for identical inputs.
#[derive(Debug)]
pub struct HandleBinding<F, S> {
    boundary: Boundary,
    field: F,
    slider: S,
}

impl<F, S> HandleBinding<F, S>
where
    F: HandleView,
    S: HandleView,
{
    pub fn new(boundary: Boundary, field: F, slider: S) -> Self {
        Self {
            boundary,
            field,
            slider,
        }
    }

    pub fn boundary(&self) -> Boundary {
        self.boundary
    }

    pub fn field(&self) -> &F {
        &self.field
    }

    pub fn slider(&self) -> &S {
        &self.slider
    }

    /// Handles an edit coming from the numeric field.
    pub fn field_edited(&mut self, model: &mut RangeModel, value: f64) -> Option<f64> {
        self.commit(model, value, "field")
    }

    /// Handles an edit coming from the slider handle.
    pub fn slider_dragged(&mut self, model: &mut RangeModel, value: f64) -> Option<f64> {
        self.commit(model, value, "slider")
    }

    /// Re-presents the committed model value after an external mutation
    /// (duration change, position capture).
    pub fn refresh(&mut self, model: &RangeModel) -> Option<f64> {
        let committed = self.committed(model)?;
        self.field.present(committed);
        self.slider.present(committed);
        Some(committed)
    }

    fn commit(&mut self, model: &mut RangeModel, value: f64, entry: &'static str) -> Option<f64> {
        let committed = model.set(self.boundary, value)?;
        debug!(
            boundary = ?self.boundary,
            entry,
            requested = value,
            committed,
            "boundary edit committed"
        );
        self.field.present(committed);
        self.slider.present(committed);
        Some(committed)
    }

    fn committed(&self, model: &RangeModel) -> Option<f64> {
        match self.boundary {
            Boundary::Start => model.start(),
            Boundary::End => model.end(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DisplayedValue, HandleBinding};
    use crate::model::{Boundary, RangeModel};

    fn binding(boundary: Boundary) -> HandleBinding<DisplayedValue, DisplayedValue> {
        HandleBinding::new(boundary, DisplayedValue::default(), DisplayedValue::default())
    }

    #[test]
    fn field_and_slider_entries_produce_identical_state() {
        let mut field_model = RangeModel::new();
        field_model.set_duration(120.0);
        let mut slider_model = field_model.clone();

        let mut field_binding = binding(Boundary::Start);
        let mut slider_binding = binding(Boundary::Start);

        let via_field = field_binding.field_edited(&mut field_model, 30.0);
        let via_slider = slider_binding.slider_dragged(&mut slider_model, 30.0);

        assert_eq!(via_field, via_slider);
        assert_eq!(field_model, slider_model);
        assert_eq!(field_binding.field().get(), slider_binding.field().get());
        assert_eq!(field_binding.slider().get(), slider_binding.slider().get());
    }

    #[test]
    fn clamped_edit_writes_the_committed_value_into_both_views() {
        let mut model = RangeModel::new();
        model.set_duration(120.0);
        let mut end_binding = binding(Boundary::End);

        let committed = end_binding.field_edited(&mut model, 300.0);

        assert_eq!(committed, Some(120.0));
        assert_eq!(end_binding.field().get(), Some(120.0));
        assert_eq!(end_binding.slider().get(), Some(120.0));
    }

    #[test]
    fn edit_before_metadata_leaves_views_untouched() {
        let mut model = RangeModel::new();
        let mut start_binding = binding(Boundary::Start);

        assert_eq!(start_binding.field_edited(&mut model, 10.0), None);
        assert_eq!(start_binding.field().get(), None);
        assert_eq!(start_binding.slider().get(), None);
    }

    #[test]
    fn refresh_presents_the_model_value_after_external_mutation() {
        let mut model = RangeModel::new();
        model.set_duration(120.0);
        let mut start_binding = binding(Boundary::Start);

        model.capture_start(45.0);
        let refreshed = start_binding.refresh(&model);

        assert_eq!(refreshed, Some(45.0));
        assert_eq!(start_binding.field().get(), Some(45.0));
        assert_eq!(start_binding.slider().get(), Some(45.0));
    }
}
