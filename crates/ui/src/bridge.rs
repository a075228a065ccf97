use std::sync::mpsc;
use std::thread;

use iced::futures::{SinkExt, StreamExt, channel::mpsc as futures_mpsc, executor};
use iced::{Subscription, stream};
use selector::{Command, Event, MediaPlayer, SessionErrorEvent, SimulatedPlayer, TrimSession};

const COMMAND_CHANNEL_CAPACITY: usize = 32;
const EVENT_CHANNEL_CAPACITY: usize = 8;
const SUBSCRIPTION_CHANNEL_CAPACITY: usize = 32;

/// Source address the demo session starts from.
pub const DEMO_ADDRESS: &str = "demo.mp4";

/// Sender used by the UI thread to dispatch commands to the session thread.
pub type SessionCommandSender = mpsc::SyncSender<Command>;

/// Receiver used by the UI thread to read events emitted by the session thread.
pub type SessionEventReceiver = mpsc::Receiver<Event>;

/// Messages emitted by the session bridge subscription.
#[derive(Debug, Clone)]
pub enum BridgeEvent {
    Ready(SessionCommandSender),
    Event(Event),
    Disconnected,
}

/// Builds a subscription that starts the session bridge and forwards events.
pub fn session_subscription() -> Subscription<BridgeEvent> {
    Subscription::run(bridge_worker_stream)
}

fn bridge_worker_stream() -> impl iced::futures::Stream<Item = BridgeEvent> {
    bridge_worker_stream_with(spawn_demo_bridge)
}

fn bridge_worker_stream_with(
    spawn_bridge: fn() -> (SessionCommandSender, SessionEventReceiver),
) -> impl iced::futures::Stream<Item = BridgeEvent> {
    stream::channel(
        SUBSCRIPTION_CHANNEL_CAPACITY,
        move |mut output| async move {
            let (session_tx, session_rx) = spawn_bridge();
            let _ = output.send(BridgeEvent::Ready(session_tx)).await;

            let (forward_tx, mut forward_rx) =
                futures_mpsc::channel::<BridgeEvent>(SUBSCRIPTION_CHANNEL_CAPACITY);

            thread::spawn(move || {
                let mut forward_tx = forward_tx;
                while let Ok(event) = session_rx.recv() {
                    if executor::block_on(forward_tx.send(BridgeEvent::Event(event))).is_err() {
                        return;
                    }
                }
                let _ = executor::block_on(forward_tx.send(BridgeEvent::Disconnected));
            });

            while let Some(event) = forward_rx.next().await {
                if output.send(event).await.is_err() {
                    break;
                }
            }
        },
    )
}

/// Spawns the production bridge around the simulated demo player.
pub fn spawn_demo_bridge() -> (SessionCommandSender, SessionEventReceiver) {
    spawn_session_bridge(TrimSession::new(SimulatedPlayer::with_address(DEMO_ADDRESS)))
}

/// Spawns a bridge around any trim session.
pub fn spawn_session_bridge<M>(
    mut session: TrimSession<M>,
) -> (SessionCommandSender, SessionEventReceiver)
where
    M: MediaPlayer + Send + 'static,
{
    let (command_tx, command_rx) = mpsc::sync_channel::<Command>(COMMAND_CHANNEL_CAPACITY);
    let (event_tx, event_rx) = mpsc::sync_channel::<Event>(EVENT_CHANNEL_CAPACITY);

    thread::spawn(move || {
        while let Ok(command) = command_rx.recv() {
            match session.handle_command(command) {
                Ok(events) => {
                    for event in events {
                        if event_tx.send(event).is_err() {
                            return;
                        }
                    }
                }
                Err(error) => {
                    if event_tx
                        .send(Event::Error(SessionErrorEvent::from_error(&error)))
                        .is_err()
                    {
                        return;
                    }
                }
            }
        }
    });

    (command_tx, event_rx)
}
