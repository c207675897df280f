use std::{path::PathBuf, sync::Arc};

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};
use tokio::sync::Mutex;

use sptoolbox::{
    cli,
    config::{self, Settings},
    error,
    selection::Category,
    types::PkceToken,
    warning,
};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Authorize with Spotify API
    Auth,

    /// Show whether a link is a playlist or album link
    Classify(ClassifyOptions),

    /// Fetch a playlist or album and list its tracks
    Resolve(ResolveOptions),

    /// Search playlists, albums and artists
    Search(SearchOptions),

    /// List the playlists in your library
    Library,

    /// Show the signed-in Spotify user
    Whoami,

    /// Resolve two links and write them out for comparison
    Compare(CompareOptions),

    /// Interactively choose two collections to compare
    Choose(ChooseOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct ClassifyOptions {
    /// Pasted text or share link
    text: String,
}

#[derive(Parser, Debug, Clone)]
pub struct ResolveOptions {
    /// Playlist or album share link
    link: String,
}

#[derive(Parser, Debug, Clone)]
pub struct SearchOptions {
    /// Free text to search for
    query: String,

    /// Category to show (playlists, albums, artists)
    #[clap(long, short, default_value = "playlists")]
    category: Category,
}

#[derive(Parser, Debug, Clone)]
pub struct CompareOptions {
    /// Link for side A
    a: String,

    /// Link for side B
    b: String,

    /// Write the pair to this file instead of stdout
    #[clap(long, short)]
    output: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct ChooseOptions {
    /// Write the chosen pair to this file instead of stdout
    #[clap(long, short)]
    output: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

fn settings() -> Settings {
    match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => error!("Invalid configuration: {}", e),
    }
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        warning!("Cannot load environment file. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Auth => {
            let oauth_result: Arc<Mutex<Option<PkceToken>>> = Arc::new(Mutex::new(None));
            cli::auth(&settings(), Arc::clone(&oauth_result)).await;
        }
        Command::Classify(opt) => cli::classify(&opt.text),
        Command::Resolve(opt) => cli::resolve(&settings(), &opt.link).await,
        Command::Search(opt) => cli::search(&settings(), &opt.query, opt.category).await,
        Command::Library => cli::library(&settings()).await,
        Command::Whoami => cli::whoami(&settings()).await,
        Command::Compare(opt) => {
            cli::compare(&settings(), &opt.a, &opt.b, opt.output.as_deref()).await
        }
        Command::Choose(opt) => cli::choose(&settings(), opt.output.as_deref()).await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
