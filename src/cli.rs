use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the web daemon serving the json api and the browser ui.
    Serve {},

    /// Fetch a playlist from the YouTube api and cache it locally.
    Fetch {
        /// A YouTube playlist url (anything containing a `list=` parameter).
        url: String,
    },

    /// Print a previously cached playlist without touching the api.
    Load {
        /// A YouTube playlist url (anything containing a `list=` parameter).
        url: String,
    },

    /// List the playlists cached so far.
    List {},
}
