use std::sync::mpsc::TrySendError;

use iced::widget::{button, canvas, column, row, slider, text, text_input};
use iced::{Element, Subscription, Task};
use selector::{Boundary, Command, Event, RangeSnapshot, TrackSegment};

use crate::bridge::{BridgeEvent, SessionCommandSender, session_subscription};
use crate::widgets;

/// UI messages handled by the iced app update loop.
#[derive(Debug, Clone)]
pub enum Message {
    DurationInputChanged(String),
    LoadPressed,
    StartFieldChanged(String),
    EndFieldChanged(String),
    StartSliderMoved(f64),
    EndSliderMoved(f64),
    JumpToStartPressed,
    JumpToEndPressed,
    CaptureStartPressed,
    CaptureEndPressed,
    TrackClicked(f64),
    Bridge(BridgeEvent),
}

/// Root UI state for the trim selector demo.
pub struct AppState {
    session_tx: Option<SessionCommandSender>,
    snapshot: Option<RangeSnapshot>,
    track: Option<TrackSegment>,
    window_address: String,
    duration_input: String,
    start_input: String,
    end_input: String,
    position: f64,
    status: String,
    track_cache: canvas::Cache,
}

impl AppState {
    /// Boots the app and initializes the session bridge.
    pub fn boot() -> (Self, Task<Message>) {
        (
            Self {
                session_tx: None,
                snapshot: None,
                track: None,
                window_address: String::new(),
                duration_input: String::new(),
                start_input: String::new(),
                end_input: String::new(),
                position: 0.0,
                status: String::from("starting session bridge"),
                track_cache: canvas::Cache::new(),
            },
            Task::none(),
        )
    }

    /// Handles one UI message.
    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::DurationInputChanged(value) => {
                self.duration_input = value;
            }
            Message::LoadPressed => match self.duration_input.trim().parse::<f64>() {
                Ok(duration) => {
                    if self.send_command(Command::MediaLoaded { duration }) {
                        self.status = format!("metadata reported: {duration}s");
                    }
                }
                Err(_) => {
                    self.status = String::from("duration is not a number");
                }
            },
            Message::StartFieldChanged(value) => {
                self.field_changed(Boundary::Start, value);
            }
            Message::EndFieldChanged(value) => {
                self.field_changed(Boundary::End, value);
            }
            Message::StartSliderMoved(value) => {
                self.send_command(Command::SliderDragged {
                    boundary: Boundary::Start,
                    value,
                });
            }
            Message::EndSliderMoved(value) => {
                self.send_command(Command::SliderDragged {
                    boundary: Boundary::End,
                    value,
                });
            }
            Message::JumpToStartPressed => {
                if self.send_command(Command::JumpToStart) {
                    self.status = String::from("jump to start requested");
                }
            }
            Message::JumpToEndPressed => {
                if self.send_command(Command::JumpToEnd) {
                    self.status = String::from("jump to end requested");
                }
            }
            Message::CaptureStartPressed => {
                if self.send_command(Command::CaptureStart) {
                    self.status = String::from("capture start requested");
                }
            }
            Message::CaptureEndPressed => {
                if self.send_command(Command::CaptureEnd) {
                    self.status = String::from("capture end requested");
                }
            }
            Message::TrackClicked(position) => {
                self.send_command(Command::Seek { position });
            }
            Message::Bridge(BridgeEvent::Ready(sender)) => {
                self.session_tx = Some(sender);
                self.status = String::from("session ready");
            }
            Message::Bridge(BridgeEvent::Event(event)) => {
                self.apply_session_event(event);
            }
            Message::Bridge(BridgeEvent::Disconnected) => {
                self.status = String::from("session event channel closed");
                self.session_tx = None;
            }
        }

        Task::none()
    }

    fn field_changed(&mut self, boundary: Boundary, value: String) {
        let parsed = value.trim().parse::<f64>();
        match boundary {
            Boundary::Start => self.start_input = value,
            Boundary::End => self.end_input = value,
        }
        if let Ok(value) = parsed {
            self.send_command(Command::FieldEdited { boundary, value });
        }
    }

    fn send_command(&mut self, command: Command) -> bool {
        if let Some(sender) = &self.session_tx {
            match sender.try_send(command) {
                Ok(()) => true,
                Err(TrySendError::Full(_)) => {
                    self.status = String::from("session command queue is full");
                    false
                }
                Err(TrySendError::Disconnected(_)) => {
                    self.status = String::from("session command channel closed");
                    self.session_tx = None;
                    false
                }
            }
        } else {
            self.status = String::from("session is not ready");
            false
        }
    }

    fn apply_session_event(&mut self, event: Event) {
        match event {
            Event::RangeChanged(snapshot) => {
                self.start_input = format!("{}", snapshot.start_views.field);
                self.end_input = format!("{}", snapshot.end_views.field);
                self.snapshot = Some(snapshot);
            }
            Event::WindowApplied { address, resumed } => {
                self.window_address = address;
                self.status = if resumed {
                    String::from("window applied, playback resumed")
                } else {
                    String::from("window applied")
                };
            }
            Event::PositionChanged { position } => {
                self.position = position;
            }
            Event::TrackChanged(segment) => {
                self.track = Some(segment);
                self.track_cache.clear();
            }
            Event::Error(error) => {
                self.status = format!("error: {}", error.message);
            }
        }
    }

    /// Renders the UI tree.
    pub fn view(&self) -> Element<'_, Message> {
        let duration = self
            .snapshot
            .map(|snapshot| snapshot.duration)
            .unwrap_or(0.0);
        let start_value = self
            .snapshot
            .map(|snapshot| snapshot.start_views.slider)
            .unwrap_or(0.0);
        let end_value = self
            .snapshot
            .map(|snapshot| snapshot.end_views.slider)
            .unwrap_or(0.0);

        let load_row = row![
            text_input("duration in seconds", &self.duration_input)
                .on_input(Message::DurationInputChanged),
            button("Load").on_press(Message::LoadPressed),
        ]
        .spacing(12);

        let start_row = row![
            text("Start"),
            text_input("0", &self.start_input).on_input(Message::StartFieldChanged),
            slider(0.0..=duration, start_value, Message::StartSliderMoved).step(0.1),
            button("Jump").on_press(Message::JumpToStartPressed),
            button("Capture").on_press(Message::CaptureStartPressed),
        ]
        .spacing(12);

        let end_row = row![
            text("End"),
            text_input("0", &self.end_input).on_input(Message::EndFieldChanged),
            slider(0.0..=duration, end_value, Message::EndSliderMoved).step(0.1),
            button("Jump").on_press(Message::JumpToEndPressed),
            button("Capture").on_press(Message::CaptureEndPressed),
        ]
        .spacing(12);

        let controls = column![
            load_row,
            start_row,
            end_row,
            widgets::track::view(
                self.track,
                duration,
                self.position,
                &self.track_cache,
                Message::TrackClicked
            ),
            text(format!("Position: {}", self.position)),
            text(format!("Window: {}", self.window_address)),
            text(format!("Status: {}", self.status)),
        ]
        .spacing(12)
        .padding(16);

        controls.into()
    }

    /// Subscribes to bridge events emitted by the session worker thread.
    pub fn subscription(&self) -> Subscription<Message> {
        session_subscription().map(Message::Bridge)
    }

    #[cfg(test)]
    fn from_sender_for_test(session_tx: SessionCommandSender) -> Self {
        Self {
            session_tx: Some(session_tx),
            snapshot: None,
            track: None,
            window_address: String::new(),
            duration_input: String::new(),
            start_input: String::new(),
            end_input: String::new(),
            position: 0.0,
            status: String::from("idle"),
            track_cache: canvas::Cache::new(),
        }
    }
}
