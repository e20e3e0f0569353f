use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::net::{TcpListener, TcpStream};
use tracing::Instrument;

use crate::config::Config;
use crate::session::{self, SessionSettings};
use crate::shutdown::ShutdownManager;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Invalid bind address '{addr}': {source}")]
    InvalidAddress {
        addr: String,
        #[source]
        source: std::net::AddrParseError,
    },

    #[error("Could not listen on {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("bind() must be called before run()")]
    NotBound,

    #[error("Shutdown timed out after {timeout:?} with {remaining} sessions still open")]
    ShutdownTimeout { timeout: Duration, remaining: usize },
}

/// Telnet listener handing every connection its own menu session.
pub struct MenuServer {
    pub addr: SocketAddr,
    /// Populated by bind(), consumed by run().
    listener: Option<TcpListener>,
    settings: Arc<SessionSettings>,
    shutdown: Arc<ShutdownManager>,
    shutdown_timeout: Duration,
}

impl MenuServer {
    pub fn new(config: &Config) -> Result<Self, ServerError> {
        let addr = config
            .server
            .bind_addr
            .parse()
            .map_err(|source| ServerError::InvalidAddress {
                addr: config.server.bind_addr.clone(),
                source,
            })?;
        Ok(Self {
            addr,
            listener: None,
            settings: Arc::new(SessionSettings::from_config(config)),
            shutdown: Arc::new(ShutdownManager::new()),
            shutdown_timeout: config.server.shutdown_timeout(),
        })
    }

    /// Bind the listener. With port 0 the OS picks one; `addr` is updated.
    pub async fn bind(&mut self) -> Result<SocketAddr, ServerError> {
        let listener = TcpListener::bind(self.addr)
            .await
            .map_err(|source| ServerError::Bind {
                addr: self.addr,
                source,
            })?;
        let actual = listener.local_addr().map_err(|source| ServerError::Bind {
            addr: self.addr,
            source,
        })?;
        self.addr = actual;
        self.listener = Some(listener);
        tracing::info!("Listening on {}", actual);
        Ok(actual)
    }

    pub fn shutdown_handle(&self) -> Arc<ShutdownManager> {
        self.shutdown.clone()
    }

    /// Accept until shutdown is requested, then drain sessions.
    pub async fn run(self) -> Result<(), ServerError> {
        let listener = self.listener.ok_or(ServerError::NotBound)?;

        let shutdown_requested = self.shutdown.wait_for_shutdown();
        tokio::pin!(shutdown_requested);

        loop {
            tokio::select! {
                result = &mut shutdown_requested => {
                    if let Err(err) = result {
                        tracing::error!("Signal handler failed, shutting down: {}", err);
                        self.shutdown.signal_shutdown();
                    }
                    break;
                }
                accepted = listener.accept() => match accepted {
                    Ok((stream, peer)) => {
                        spawn_session(stream, peer, self.settings.clone(), &self.shutdown);
                    }
                    Err(err) => {
                        tracing::warn!("Accept failed: {}", err);
                    }
                },
            }
        }

        drop(listener);
        tracing::info!("Stopped accepting connections");

        let remaining = self.shutdown.wait_for_sessions(self.shutdown_timeout).await;
        if remaining > 0 {
            return Err(ServerError::ShutdownTimeout {
                timeout: self.shutdown_timeout,
                remaining,
            });
        }
        Ok(())
    }
}

fn spawn_session(
    stream: TcpStream,
    peer: SocketAddr,
    settings: Arc<SessionSettings>,
    shutdown: &Arc<ShutdownManager>,
) {
    let guard = shutdown.track_session();
    let span = tracing::info_span!("session", %peer);

    tokio::spawn(
        async move {
            let _guard = guard;
            if let Err(err) = stream.set_nodelay(true) {
                tracing::debug!("set_nodelay failed: {}", err);
            }
            tracing::info!("connected");
            match session::serve(stream, &settings).await {
                Ok(report) => {
                    tracing::info!(end = ?report.end, frames = report.frames, "disconnected");
                }
                Err(err) => tracing::info!("handshake failed: {}", err),
            }
        }
        .instrument(span),
    );
}
