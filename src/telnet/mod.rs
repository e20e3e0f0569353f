//! Remote terminal provider: telnet framing over any byte stream.

pub mod codec;

use std::collections::VecDeque;
use std::io;
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, ReadHalf, WriteHalf};

use crate::ui::menu::Viewport;
pub use codec::{TelnetDecoder, TelnetEvent, NEGOTIATION};

const READ_BUF: usize = 1024;

/// A negotiated client connection, split for concurrent read and write.
pub struct TerminalChannel<S> {
    pub input: TerminalInput<ReadHalf<S>>,
    pub output: WriteHalf<S>,
    /// Size from the client's first NAWS report, if it arrived in time.
    pub initial_size: Option<Viewport>,
}

/// Inbound half: yields decoded telnet events in arrival order.
pub struct TerminalInput<R> {
    reader: R,
    decoder: TelnetDecoder,
    backlog: VecDeque<TelnetEvent>,
    buf: Box<[u8]>,
}

impl<R: AsyncRead + Unpin> TerminalInput<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            decoder: TelnetDecoder::new(),
            backlog: VecDeque::new(),
            buf: vec![0u8; READ_BUF].into_boxed_slice(),
        }
    }

    /// Next event, or `None` once the client has closed the stream.
    ///
    /// Cancel safe: dropping the future never loses bytes.
    pub async fn recv(&mut self) -> io::Result<Option<TelnetEvent>> {
        loop {
            if let Some(event) = self.backlog.pop_front() {
                return Ok(Some(event));
            }
            let n = self.reader.read(&mut self.buf).await?;
            if n == 0 {
                return Ok(None);
            }
            let events = self.decoder.feed(&self.buf[..n]);
            self.backlog.extend(events);
        }
    }

    fn push_front(&mut self, event: TelnetEvent) {
        self.backlog.push_front(event);
    }
}

/// Send our option requests and wait up to `wait` for the window size.
///
/// Anything else the client sends meanwhile is kept for the session.
pub async fn handshake<S>(stream: S, wait: Duration) -> io::Result<TerminalChannel<S>>
where
    S: AsyncRead + AsyncWrite,
{
    let (reader, mut output) = tokio::io::split(stream);
    output.write_all(NEGOTIATION).await?;
    output.flush().await?;

    let mut input = TerminalInput::new(reader);
    let mut held = Vec::new();
    let mut initial_size = None;
    let deadline = tokio::time::Instant::now() + wait;

    while initial_size.is_none() {
        match tokio::time::timeout_at(deadline, input.recv()).await {
            Ok(Ok(Some(TelnetEvent::WindowSize { width, height }))) => {
                initial_size = Some(Viewport { width, height });
            }
            Ok(Ok(Some(event))) => held.push(event),
            Ok(Ok(None)) => {
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "client closed during handshake",
                ))
            }
            Ok(Err(err)) => return Err(err),
            Err(_) => break,
        }
    }

    for event in held.into_iter().rev() {
        input.push_front(event);
    }

    Ok(TerminalChannel {
        input,
        output,
        initial_size,
    })
}
