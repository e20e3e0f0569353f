use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub menu: MenuConfig,
}

/// Listener and per-session timing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address the telnet listener binds to (host:port).
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    /// Spinner tick interval in milliseconds (default: 100).
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
    /// How long a new session waits for the client's window size (default: 500).
    #[serde(default = "default_handshake_timeout_ms")]
    pub handshake_timeout_ms: u64,
    /// Upper bound on draining sessions at shutdown (default: 30).
    #[serde(default = "default_shutdown_timeout_seconds")]
    pub shutdown_timeout_seconds: u64,
}

impl ServerConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn handshake_timeout(&self) -> Duration {
        Duration::from_millis(self.handshake_timeout_ms)
    }

    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout_seconds)
    }
}

/// What every connected client sees.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuConfig {
    /// Header text next to the spinner.
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_items")]
    pub items: Vec<MenuItem>,
}

/// One selectable line of the menu and the text revealed when it is ticked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub label: String,
    #[serde(default)]
    pub detail: String,
}

impl MenuItem {
    pub fn new(label: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            detail: detail.into(),
        }
    }
}

fn default_bind_addr() -> String {
    "0.0.0.0:23234".to_string()
}

fn default_tick_interval_ms() -> u64 {
    100
}

fn default_handshake_timeout_ms() -> u64 {
    500
}

fn default_shutdown_timeout_seconds() -> u64 {
    30
}

fn default_title() -> String {
    "termfolio".to_string()
}

fn default_items() -> Vec<MenuItem> {
    vec![
        MenuItem::new(
            "info",
            "Software engineer who likes small tools, fast feedback loops and \
             terminals that do more than they should. Most days are spent on \
             backend services; evenings go to side projects like this one.",
        ),
        MenuItem::new("contact", "hello@example.com"),
    ]
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            tick_interval_ms: default_tick_interval_ms(),
            handshake_timeout_ms: default_handshake_timeout_ms(),
            shutdown_timeout_seconds: default_shutdown_timeout_seconds(),
        }
    }
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            items: default_items(),
        }
    }
}
