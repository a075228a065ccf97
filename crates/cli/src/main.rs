use std::io::{self, BufRead, Write};

use clap::Parser;
use selector::{Command, Event, SessionErrorEvent, SimulatedPlayer, TrimSession};
use tracing::warn;

/// Headless trim-session harness: JSON commands on stdin, JSON events on
/// stdout, one per line.
#[derive(Debug, Parser)]
#[command(name = "pintrim", version, about = "Media trim range-selector harness")]
struct Args {
    /// Media source address the session starts from.
    #[arg(long, default_value = "demo.mp4")]
    address: String,

    /// Asset duration in seconds, reported as the metadata-ready signal
    /// before reading commands.
    #[arg(long)]
    duration: Option<f64>,

    /// Minimum allowed distance between the trim boundaries.
    #[arg(long, default_value_t = 0.0)]
    min_gap: f64,
}

fn main() -> io::Result<()> {
    let _ = tracing_subscriber::fmt::try_init();
    let args = Args::parse();

    let mut session =
        TrimSession::with_min_gap(SimulatedPlayer::with_address(&args.address), args.min_gap);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if let Some(duration) = args.duration {
        emit(&mut out, run(&mut session, Command::MediaLoaded { duration }))?;
    }

    for line in io::stdin().lock().lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let command: Command = match serde_json::from_str(line) {
            Ok(command) => command,
            Err(error) => {
                warn!(%error, line, "command rejected");
                continue;
            }
        };
        emit(&mut out, run(&mut session, command))?;
    }

    Ok(())
}

fn run(session: &mut TrimSession<SimulatedPlayer>, command: Command) -> Vec<Event> {
    match session.handle_command(command) {
        Ok(events) => events,
        Err(error) => vec![Event::Error(SessionErrorEvent::from_error(&error))],
    }
}

fn emit(out: &mut impl Write, events: Vec<Event>) -> io::Result<()> {
    for event in events {
        let line = serde_json::to_string(&event).map_err(io::Error::other)?;
        writeln!(out, "{line}")?;
    }
    Ok(())
}
