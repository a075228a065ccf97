//! UI-agnostic trim range-selector engine.

pub mod api;
pub mod binding;
pub mod error;
pub mod model;
pub mod player;
pub mod seek;
pub mod track;
pub mod window;

pub use api::{
    Command, Event, HandleViews, RangeSnapshot, SessionErrorEvent, SessionErrorKind, TrimSession,
};
pub use binding::{DisplayedValue, HandleBinding, HandleView};
pub use error::{Result, SelectorError};
pub use model::{Boundary, RangeModel};
pub use player::{MediaPlayer, SimulatedPlayer};
pub use seek::SeekController;
pub use track::TrackSegment;
pub use window::{AppliedWindow, PlaybackWindowController};
