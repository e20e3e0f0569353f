//! Shared test utilities.

#![allow(dead_code, unused_imports)]

use parking_lot::Mutex;
use std::io;
use std::path::PathBuf;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tempfile::TempDir;
use tokio::io::AsyncWrite;

use termfolio::config::MenuItem;
use termfolio::ui::menu::{MenuState, Viewport};

pub const CONTACT_DETAIL: &str = "mail@example.com";
pub const INFO_DETAIL: &str = "I write software and enjoy tinkering with small tools in my spare time.";

pub fn items() -> Arc<[MenuItem]> {
    vec![
        MenuItem::new("info", INFO_DETAIL),
        MenuItem::new("contact", CONTACT_DETAIL),
    ]
    .into()
}

pub fn make_state() -> MenuState {
    make_state_sized(80, 24)
}

pub fn make_state_sized(width: u16, height: u16) -> MenuState {
    MenuState::new(Arc::from("test menu"), items(), Viewport { width, height })
}

/// Create a temporary config file with the given TOML content.
pub fn temp_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, content).expect("Failed to write config");
    (temp_dir, config_path)
}

pub type SpyBuffer = Arc<Mutex<Vec<u8>>>;

/// Writer that records every write as one chunk and can be told to fail.
#[derive(Clone, Default)]
pub struct SpyWriter {
    pub writes: Arc<Mutex<Vec<Vec<u8>>>>,
    pub fail: Arc<Mutex<bool>>,
}

impl SpyWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write_count(&self) -> usize {
        self.writes.lock().len()
    }

    pub fn all_output(&self) -> String {
        let bytes: Vec<u8> = self.writes.lock().concat();
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl AsyncWrite for SpyWriter {
    fn poll_write(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        if *self.fail.lock() {
            return Poll::Ready(Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed")));
        }
        self.writes.lock().push(buf.to_vec());
        Poll::Ready(Ok(buf.len()))
    }

    fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }
}
