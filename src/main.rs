use anyhow::Context;
use clap::Parser;

use termfolio::cli::Cli;
use termfolio::config::Config;
use termfolio::logging::init_tracing;
use termfolio::server::{MenuServer, ServerError};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(bind) = cli.bind {
        config.server.bind_addr = bind;
        config.validate()?;
    }

    if cli.check_config {
        println!("Config OK");
        println!("  bind_addr: {}", config.server.bind_addr);
        println!("  title: {}", config.menu.title);
        for item in &config.menu.items {
            println!("  item: {}", item.label);
        }
        return Ok(());
    }

    let mut server = MenuServer::new(&config)?;
    server
        .bind()
        .await
        .inspect_err(|err| tracing::error!("Could not start server: {}", err))
        .context("Could not start server")?;

    match server.run().await {
        Ok(()) => {
            tracing::info!("Server stopped");
            Ok(())
        }
        Err(err @ ServerError::ShutdownTimeout { .. }) => {
            tracing::error!("Could not stop server cleanly: {}", err);
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}
