use std::time::Duration;

use term_input::{InputEvent, InputParser};
use tokio::io::AsyncRead;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::telnet::{TelnetEvent, TerminalInput};
use crate::ui::input::decode_key;
use crate::ui::menu::MenuIntent;

/// How long a lone ESC may wait for the rest of an escape sequence.
const ESC_TIMEOUT: Duration = Duration::from_millis(25);

const QUEUE_DEPTH: usize = 64;

#[derive(Debug)]
pub enum SessionEvent {
    Intent(MenuIntent),
    /// The client stream ended. `error` is set when it ended with a read error.
    Disconnected { error: Option<String> },
}

/// Fan-in of the session's event sources.
///
/// Each producer task pushes into one queue, so events from the same source
/// stay in order while events from different sources interleave in arrival
/// order. Producer tasks are aborted when the handler is dropped.
pub struct EventHandler {
    rx: mpsc::Receiver<SessionEvent>,
    tasks: Vec<JoinHandle<()>>,
}

impl EventHandler {
    /// Start a ticker and a reader for `input`.
    pub fn spawn<R>(input: TerminalInput<R>, tick_rate: Duration) -> Self
    where
        R: AsyncRead + Unpin + Send + 'static,
    {
        let (tx, rx) = mpsc::channel(QUEUE_DEPTH);
        let tasks = vec![
            tokio::spawn(run_ticker(tick_rate, tx.clone())),
            tokio::spawn(run_reader(input, tx)),
        ];
        Self { rx, tasks }
    }

    /// A handler with no producers; events come from the returned sender.
    pub fn channel() -> (mpsc::Sender<SessionEvent>, Self) {
        let (tx, rx) = mpsc::channel(QUEUE_DEPTH);
        (
            tx,
            Self {
                rx,
                tasks: Vec::new(),
            },
        )
    }

    /// Next event from whichever source is ready first.
    /// `None` once every producer is gone.
    pub async fn next(&mut self) -> Option<SessionEvent> {
        self.rx.recv().await
    }
}

impl Drop for EventHandler {
    fn drop(&mut self) {
        for task in &self.tasks {
            task.abort();
        }
    }
}

async fn run_ticker(tick_rate: Duration, tx: mpsc::Sender<SessionEvent>) {
    let mut interval = tokio::time::interval(tick_rate);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick fires immediately.
    interval.tick().await;
    loop {
        interval.tick().await;
        if tx.send(SessionEvent::Intent(MenuIntent::Tick)).await.is_err() {
            break;
        }
    }
}

async fn run_reader<R>(mut input: TerminalInput<R>, tx: mpsc::Sender<SessionEvent>)
where
    R: AsyncRead + Unpin,
{
    let mut parser = InputParser::new();

    let error = loop {
        let received = if parser.has_pending() {
            match tokio::time::timeout(ESC_TIMEOUT, input.recv()).await {
                Ok(received) => received,
                Err(_) => {
                    if !forward_keys(&tx, parser.flush()).await {
                        return;
                    }
                    continue;
                }
            }
        } else {
            input.recv().await
        };

        let intent = match received {
            Ok(Some(TelnetEvent::Data(bytes))) => {
                if !forward_keys(&tx, parser.feed(&bytes)).await {
                    return;
                }
                continue;
            }
            Ok(Some(TelnetEvent::WindowSize { width, height })) => {
                MenuIntent::Resize { width, height }
            }
            Ok(Some(TelnetEvent::Interrupt)) => MenuIntent::Quit,
            Ok(None) => break None,
            Err(err) => break Some(err.to_string()),
        };
        if tx.send(SessionEvent::Intent(intent)).await.is_err() {
            return;
        }
    };

    let _ = tx.send(SessionEvent::Disconnected { error }).await;
}

/// Returns false once the driver has stopped listening.
async fn forward_keys(tx: &mpsc::Sender<SessionEvent>, events: Vec<InputEvent>) -> bool {
    for InputEvent::Key(key) in events {
        let intent = decode_key(&key);
        tracing::trace!(raw = ?key.raw, ?intent, "key");
        if tx.send(SessionEvent::Intent(intent)).await.is_err() {
            return false;
        }
    }
    true
}
