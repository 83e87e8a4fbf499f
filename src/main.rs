mod app;
mod application;
mod config;
mod domain;
mod ipc;
mod transport;
mod ui;
mod utils;

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::application::{DestinationResolver, DownloadCommitter, RfdDirectoryPrompt};
use crate::config::SaverConfig;
use crate::ipc::{command_channel, CommandHost, LocalLibrary};
use crate::transport::HttpFetcher;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = SaverConfig::from_env()?;

    // The privileged side runs on its own runtime; the window gets iced's.
    let runtime = tokio::runtime::Runtime::new()?;

    let fetcher = HttpFetcher::new(&config.client_config())?;
    let committer = DownloadCommitter::new(Arc::new(fetcher));
    let library = LocalLibrary::new(config.library_directory.clone(), committer.clone());
    let host = CommandHost::new(committer, Arc::new(library));

    let (channel, rx) = command_channel(config.command_queue);
    runtime.spawn(host.serve(rx));

    let resolver = DestinationResolver::new(
        Arc::new(RfdDirectoryPrompt),
        channel,
        config.filename_policy,
        config.prompt_options(),
    );

    tracing::info!(policy = ?config.filename_policy, "starting local track saver");

    iced::application(
        move || app::SaveApp::new(resolver.clone()),
        app::update,
        app::view,
    )
    .title("Local Track Saver")
    .run()?;

    Ok(())
}
