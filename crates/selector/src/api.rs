use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::binding::{DisplayedValue, HandleBinding};
use crate::error::{Result, SelectorError};
use crate::model::{Boundary, RangeModel};
use crate::player::MediaPlayer;
use crate::seek::SeekController;
use crate::track::{self, TrackSegment};
use crate::window::PlaybackWindowController;

/// Commands accepted by the trim session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// Metadata-ready signal from the host media element.
    MediaLoaded { duration: f64 },
    /// Edit of one boundary's numeric field.
    FieldEdited { boundary: Boundary, value: f64 },
    /// Drag of one boundary's slider handle.
    SliderDragged { boundary: Boundary, value: f64 },
    /// Seeks to the window start.
    JumpToStart,
    /// Seeks to the window end.
    JumpToEnd,
    /// Captures the current playback position as the start boundary.
    CaptureStart,
    /// Captures the current playback position as the end boundary.
    CaptureEnd,
    /// Window-clamped scrub.
    Seek { position: f64 },
}

/// Events emitted by the trim session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    RangeChanged(RangeSnapshot),
    WindowApplied { address: String, resumed: bool },
    PositionChanged { position: f64 },
    TrackChanged(TrackSegment),
    Error(SessionErrorEvent),
}

/// User-facing error payload emitted as an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionErrorKind {
    MediaNotLoaded,
    EmptyAddress,
    Fragment,
}

impl From<&SelectorError> for SessionErrorKind {
    fn from(value: &SelectorError) -> Self {
        match value {
            SelectorError::MediaNotLoaded => Self::MediaNotLoaded,
            SelectorError::EmptyAddress => Self::EmptyAddress,
            SelectorError::Fragment(_) => Self::Fragment,
        }
    }
}

/// User-facing error payload emitted as an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionErrorEvent {
    pub kind: SessionErrorKind,
    pub message: String,
}

impl SessionErrorEvent {
    pub fn from_error(error: &SelectorError) -> Self {
        Self {
            kind: SessionErrorKind::from(error),
            message: error.to_string(),
        }
    }
}

/// Values currently presented by one boundary's views.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HandleViews {
    pub field: f64,
    pub slider: f64,
}

/// Immutable session snapshot consumed by the UI.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeSnapshot {
    pub duration: f64,
    pub start: f64,
    pub end: f64,
    pub min_gap: f64,
    pub start_views: HandleViews,
    pub end_views: HandleViews,
}

#[derive(Debug, Clone, Copy)]
enum EditEntry {
    Field,
    Slider,
}

/// Trim range-selector session.
///
/// Owns the player, the range model and the two handle bindings, and
/// wires them per command: every committed mutation refreshes both
/// bindings, reapplies the playback window and re-renders the track.
///
/// # Example
/// ```
/// use selector::{Command, SimulatedPlayer, TrimSession};
///
/// let mut session = TrimSession::new(SimulatedPlayer::with_address("demo.mp4"));
/// let events = session
///     .handle_command(Command::MediaLoaded { duration: 120.0 })
///     .expect("load");
/// assert!(!events.is_empty());
/// ```
#[derive(Debug)]
pub struct TrimSession<M> {
    player: M,
    model: RangeModel,
    start_handles: HandleBinding<DisplayedValue, DisplayedValue>,
    end_handles: HandleBinding<DisplayedValue, DisplayedValue>,
}

impl<M> TrimSession<M>
where
    M: MediaPlayer,
{
    /// Creates a session with no minimum boundary gap.
    pub fn new(player: M) -> Self {
        Self::with_min_gap(player, 0.0)
    }

    /// Creates a session enforcing a minimum boundary distance.
    pub fn with_min_gap(player: M, min_gap: f64) -> Self {
        Self {
            player,
            model: RangeModel::with_min_gap(min_gap),
            start_handles: HandleBinding::new(
                Boundary::Start,
                DisplayedValue::default(),
                DisplayedValue::default(),
            ),
            end_handles: HandleBinding::new(
                Boundary::End,
                DisplayedValue::default(),
                DisplayedValue::default(),
            ),
        }
    }

    pub fn model(&self) -> &RangeModel {
        &self.model
    }

    pub fn player(&self) -> &M {
        &self.player
    }

    /// Applies one command and returns emitted events.
    ///
    /// Boundary commands received before the metadata-ready signal return
    /// no events.
    pub fn handle_command(&mut self, command: Command) -> Result<Vec<Event>> {
        match command {
            Command::MediaLoaded { duration } => self.media_loaded(duration),
            Command::FieldEdited { boundary, value } => {
                self.edit(boundary, value, EditEntry::Field)
            }
            Command::SliderDragged { boundary, value } => {
                self.edit(boundary, value, EditEntry::Slider)
            }
            Command::JumpToStart => self.jump(Boundary::Start),
            Command::JumpToEnd => self.jump(Boundary::End),
            Command::CaptureStart => self.capture(Boundary::Start),
            Command::CaptureEnd => self.capture(Boundary::End),
            Command::Seek { position } => self.seek(position),
        }
    }

    /// Builds the UI-facing snapshot; `None` until the media is ready.
    pub fn snapshot(&self) -> Option<RangeSnapshot> {
        Some(RangeSnapshot {
            duration: self.model.duration()?,
            start: self.model.start()?,
            end: self.model.end()?,
            min_gap: self.model.min_gap(),
            start_views: handle_views(&self.start_handles)?,
            end_views: handle_views(&self.end_handles)?,
        })
    }

    fn media_loaded(&mut self, duration: f64) -> Result<Vec<Event>> {
        if !self.model.set_duration(duration) {
            return Ok(Vec::new());
        }
        info!(duration, "media ready");
        self.after_mutation()
    }

    fn edit(&mut self, boundary: Boundary, value: f64, entry: EditEntry) -> Result<Vec<Event>> {
        let binding = match boundary {
            Boundary::Start => &mut self.start_handles,
            Boundary::End => &mut self.end_handles,
        };
        let committed = match entry {
            EditEntry::Field => binding.field_edited(&mut self.model, value),
            EditEntry::Slider => binding.slider_dragged(&mut self.model, value),
        };

        if committed.is_none() {
            return Ok(Vec::new());
        }
        self.after_mutation()
    }

    fn jump(&mut self, boundary: Boundary) -> Result<Vec<Event>> {
        let mut seek = SeekController::new(&mut self.player);
        let jumped = match boundary {
            Boundary::Start => seek.jump_to_start(&self.model)?,
            Boundary::End => seek.jump_to_end(&self.model)?,
        };

        Ok(match jumped {
            Some(position) => vec![Event::PositionChanged { position }],
            None => Vec::new(),
        })
    }

    fn capture(&mut self, boundary: Boundary) -> Result<Vec<Event>> {
        let captured = SeekController::new(&mut self.player).capture(&mut self.model, boundary);
        if captured.is_none() {
            return Ok(Vec::new());
        }
        self.after_mutation()
    }

    fn seek(&mut self, position: f64) -> Result<Vec<Event>> {
        if !self.model.is_ready() {
            debug!(position, "seek ignored: duration unknown");
            return Ok(Vec::new());
        }
        let target =
            PlaybackWindowController::new(&mut self.player).seek_to(&self.model, position)?;

        Ok(vec![Event::PositionChanged { position: target }])
    }

    /// Uniform post-mutation step: refresh both bindings, snapshot,
    /// reapply the playback window, re-render the track.
    fn after_mutation(&mut self) -> Result<Vec<Event>> {
        self.start_handles.refresh(&self.model);
        self.end_handles.refresh(&self.model);

        let mut events = Vec::with_capacity(4);
        if let Some(snapshot) = self.snapshot() {
            events.push(Event::RangeChanged(snapshot));
        }
        if let Some(applied) = PlaybackWindowController::new(&mut self.player).apply(&self.model)? {
            events.push(Event::WindowApplied {
                address: applied.address,
                resumed: applied.resumed,
            });
            events.push(Event::PositionChanged {
                position: self.player.position(),
            });
        }
        if let Some(segment) = track::render(&self.model) {
            events.push(Event::TrackChanged(segment));
        }

        Ok(events)
    }
}

fn handle_views(binding: &HandleBinding<DisplayedValue, DisplayedValue>) -> Option<HandleViews> {
    Some(HandleViews {
        field: binding.field().get()?,
        slider: binding.slider().get()?,
    })
}
