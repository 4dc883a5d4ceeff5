use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use spotbrainz::{cli, config, error, warning};

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

    /// Cache top tracks, recently played tracks and their albums and artists
    Fetch,

    /// Append fresh recommendations to the managed playlist
    Recommend,

    /// Drop every cached collection
    Purge,

    /// Show record counts per collection
    Info,

    /// Print a cached collection as a table
    Show(ShowOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct ShowOptions {
    /// Collection to print (tracks, albums, artists, _default)
    collection: String,

    /// Comma separated sort keys; prefix with '-' to reverse
    #[clap(long, allow_hyphen_values = true)]
    order_by: Option<String>,

    /// Maximum number of rows
    #[clap(long)]
    limit: Option<usize>,

    /// Maximum characters per cell
    #[clap(long, default_value_t = cli::DEFAULT_CELL_WIDTH)]
    width: usize,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        warning!("Cannot load environment file. Err: {}", e);
    }

    let cli = Cli::parse();

    if let Command::Completions(opt) = &cli.command {
        let mut cmd = Cli::command_for_update();
        let name = cmd.get_name().to_string();
        generate(opt.shell, &mut cmd, name, &mut std::io::stdout());
        return;
    }

    let config = config::Config::from_env();

    if matches!(cli.command, Command::Auth | Command::Fetch | Command::Recommend) {
        if let Err(e) = config.require_api_credentials() {
            error!("Invalid configuration: {}", e);
        }
    }

    match cli.command {
        Command::Auth => cli::auth(&config).await,
        Command::Fetch => cli::fetch(&config).await,
        Command::Recommend => cli::recommend(&config).await,
        Command::Purge => cli::purge(&config).await,
        Command::Info => cli::info(&config).await,
        Command::Show(opt) => {
            cli::show(
                &config,
                &opt.collection,
                opt.order_by,
                opt.limit,
                opt.width,
            )
            .await
        }
        Command::Completions(_) => {}
    }
}
