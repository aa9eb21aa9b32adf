use clap::Parser;

mod app;
mod cli;
mod config;
mod playlist;
mod store;
#[cfg(test)]
mod tests;
mod web;
mod youtube;

use app::App;
use config::{AppPaths, Config};
use store::PlaylistStore;
use youtube::YouTubeClient;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = cli::Args::parse();

    let paths = AppPaths::resolve()?;
    let config = Config::load_with(&paths.base_path)?;

    let api_key = config.resolve_api_key();
    if api_key.is_none() {
        log::warn!("no YouTube api key configured; fetch requests will fail");
    }

    let client = YouTubeClient::new(api_key)?;
    let store = PlaylistStore::new(&paths.playlists_path);
    let app = App::new(config, client, store);

    match args.command {
        cli::Command::Serve {} => {
            web::start_daemon(app);
            Ok(())
        }

        cli::Command::Fetch { url } => {
            let (document, path) = app.fetch_and_save(&url)?;
            println!("{}", serde_json::to_string_pretty(&document)?);
            log::info!("saved to {}", path.display());
            Ok(())
        }

        cli::Command::Load { url } => {
            let (document, _) = app.load_cached(&url)?;
            println!("{}", serde_json::to_string_pretty(&document)?);
            Ok(())
        }

        cli::Command::List {} => {
            let playlists = app.list_saved()?;
            println!("{}", serde_json::to_string_pretty(&playlists)?);
            Ok(())
        }
    }
}
