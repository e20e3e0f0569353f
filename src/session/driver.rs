use std::io;

use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::session::events::{EventHandler, SessionEvent};
use crate::ui::menu::{MenuReducer, MenuState};
use crate::ui::mvi::{Control, Reducer};
use crate::ui::painter::ScreenPainter;
use crate::ui::render::render;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The client pressed a quit key.
    Quit,
    /// The client stream closed or failed.
    Disconnected,
    /// Writing to the client failed.
    WriteFailed,
}

/// Outcome of one session, for logging and tests.
#[derive(Debug)]
pub struct SessionReport {
    pub end: SessionEnd,
    pub state: MenuState,
    /// Frames successfully written, including the first one.
    pub frames: usize,
}

/// Event loop for one connection: event → reduce → render → paint → write.
pub struct SessionDriver<W> {
    state: MenuState,
    painter: ScreenPainter,
    writer: W,
    frames: usize,
}

impl<W: AsyncWrite + Unpin> SessionDriver<W> {
    pub fn new(state: MenuState, writer: W) -> Self {
        Self {
            state,
            painter: ScreenPainter::new(),
            writer,
            frames: 0,
        }
    }

    pub async fn run(mut self, events: &mut EventHandler) -> SessionReport {
        let end = self.event_loop(events).await;
        if end != SessionEnd::WriteFailed {
            self.restore_terminal().await;
        }
        tracing::debug!(?end, frames = self.frames, "session finished");
        SessionReport {
            end,
            state: self.state,
            frames: self.frames,
        }
    }

    async fn event_loop(&mut self, events: &mut EventHandler) -> SessionEnd {
        let enter = match ScreenPainter::enter() {
            Ok(bytes) => bytes,
            Err(_) => return SessionEnd::WriteFailed,
        };
        if self.write(&enter).await.is_err() || self.draw().await.is_err() {
            return SessionEnd::WriteFailed;
        }

        loop {
            let intent = match events.next().await {
                Some(SessionEvent::Intent(intent)) => intent,
                Some(SessionEvent::Disconnected { error }) => {
                    if let Some(error) = error {
                        tracing::debug!(%error, "client read failed");
                    }
                    return SessionEnd::Disconnected;
                }
                None => return SessionEnd::Disconnected,
            };

            let (state, control) = MenuReducer::reduce(self.state.clone(), intent);
            self.state = state;

            if self.draw().await.is_err() {
                return SessionEnd::WriteFailed;
            }
            if control == Control::Quit {
                return SessionEnd::Quit;
            }
        }
    }

    async fn draw(&mut self) -> io::Result<()> {
        let frame = render(&self.state);
        let bytes = self.painter.paint(&frame, self.state.viewport)?;
        self.write(&bytes).await?;
        self.frames += 1;
        Ok(())
    }

    async fn write(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.writer.write_all(bytes).await?;
        self.writer.flush().await
    }

    /// Best effort: the client may already be gone.
    async fn restore_terminal(&mut self) {
        if let Ok(bytes) = ScreenPainter::leave() {
            let _ = self.write(&bytes).await;
        }
        let _ = self.writer.shutdown().await;
    }
}
