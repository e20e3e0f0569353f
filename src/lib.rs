pub mod cli;
pub mod config;
pub mod logging;
pub mod server;
pub mod session;
pub mod shutdown;
pub mod telnet;
pub mod ui;
