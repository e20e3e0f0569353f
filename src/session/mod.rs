//! One connected client, from handshake to goodbye.

pub mod driver;
pub mod events;

use std::io;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncWrite};

use crate::config::{Config, MenuItem};
use crate::telnet;
use crate::ui::menu::MenuState;

pub use driver::{SessionDriver, SessionEnd, SessionReport};
pub use events::{EventHandler, SessionEvent};

/// Immutable inputs shared by every session.
#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub title: Arc<str>,
    pub items: Arc<[MenuItem]>,
    pub tick_rate: Duration,
    pub handshake_timeout: Duration,
}

impl SessionSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            title: Arc::from(config.menu.title.as_str()),
            items: Arc::from(config.menu.items.clone()),
            tick_rate: config.server.tick_interval(),
            handshake_timeout: config.server.handshake_timeout(),
        }
    }
}

/// Run a complete session over `stream`.
///
/// Fails only if the telnet handshake fails; everything after that ends in
/// a [`SessionReport`].
pub async fn serve<S>(stream: S, settings: &SessionSettings) -> io::Result<SessionReport>
where
    S: AsyncRead + AsyncWrite + Send + 'static,
{
    let channel = telnet::handshake(stream, settings.handshake_timeout).await?;
    let viewport = match channel.initial_size {
        Some(size) => size,
        None => {
            tracing::debug!("no window size reported, using default until first resize");
            Default::default()
        }
    };
    tracing::debug!(width = viewport.width, height = viewport.height, "session started");

    let state = MenuState::new(settings.title.clone(), settings.items.clone(), viewport);
    let mut events = EventHandler::spawn(channel.input, settings.tick_rate);
    let report = SessionDriver::new(state, channel.output)
        .run(&mut events)
        .await;
    Ok(report)
}
