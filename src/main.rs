use clap::Parser;
use showinfo::{
    DEFAULT_BASE_URL, ProgressEvent, QueryError, ShowInformation, ShowInformationError,
    TvMazeProvider, parse_index,
};
use std::process;
use tracing_subscriber::EnvFilter;

/// Look up TV show information from TVMaze
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Name of the TV show to look up (case-insensitive)
    show: String,

    /// Season to show details for
    #[arg(short, long, value_parser = parse_cli_index)]
    season: Option<u32>,

    /// Episode within the season to show details for
    #[arg(short, long, value_parser = parse_cli_index, requires = "season")]
    episode: Option<u32>,

    /// Base URL of the TVMaze API
    #[arg(long, env = "SHOWINFO_API_URL", default_value = DEFAULT_BASE_URL)]
    api_url: String,

    /// Suppress progress output
    #[arg(short, long)]
    quiet: bool,

    /// Increase log verbosity (-v: info, -vv: debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn parse_cli_index(input: &str) -> Result<u32, String> {
    parse_index(input).map_err(|e| e.to_string())
}

/// Sets up logging to stderr; `RUST_LOG` takes precedence over `-v`
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("showinfo={}", default_level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Handles progress events and prints formatted output to stdout
fn handle_progress_event(event: ProgressEvent) {
    match event {
        ProgressEvent::Searching { query } => {
            println!("Searching TVMaze for '{}'...", query);
        }
        ProgressEvent::ShowResolved { id, name } => {
            println!("Found '{}' (TVMaze #{})", name, id);
        }
        ProgressEvent::FetchingEpisodes { .. } => {
            println!("Retrieving episode list...");
        }
        ProgressEvent::EpisodesFetched { count } => {
            println!("  {} episode(s)", count);
        }
        ProgressEvent::FetchingCast { .. } => {
            println!("Retrieving cast list...");
        }
        ProgressEvent::CastFetched { count } => {
            println!("  {} cast member(s)\n", count);
        }
    }
}

/// Formats a query result, turning query errors into printable text
fn display<T: ToString>(result: Result<T, QueryError>) -> String {
    match result {
        Ok(value) => value.to_string(),
        Err(e) => format!("N/A ({})", e),
    }
}

fn print_overview(show: &ShowInformation) {
    println!("=== {} ===\n", show.name());
    println!("{}\n", show.show_summary().unwrap_or_default());
    println!("Rating:         {}", show.rating());
    println!("Genres:         {}", show.genres_as_string());
    println!("Cast:           {}", show.cast_as_string());
    println!("Seasons:        {}", display(show.season_count()));
    println!("Episodes:       {}", show.total_episode_count());
    println!("Total runtime:  {} min", show.total_runtime_minutes());

    for (season, count) in show.season_episode_counts() {
        println!("  Season {:>2}: {} episode(s)", season, count);
    }
}

fn print_season(show: &ShowInformation, season: u32) {
    println!("=== {} - Season {} ===\n", show.name(), season);

    match show.episode_count_in_season(season) {
        Ok(count) => {
            println!("{} episode(s)\n", count);
            for episode in 1..=count as u32 {
                println!(
                    "  E{:02} {}",
                    episode,
                    display(show.episode_name(season, episode))
                );
            }
        }
        Err(e) => println!("N/A ({})", e),
    }
}

fn print_episode(show: &ShowInformation, season: u32, episode: u32) {
    println!(
        "=== {} - S{:02}E{:02} ===\n",
        show.name(),
        season,
        episode
    );

    println!("Name:     {}", display(show.episode_name(season, episode)));

    let runtime = show
        .episode_runtime(season, episode)
        .map(|runtime| match runtime {
            Some(minutes) => format!("{} min", minutes),
            None => "unknown".to_string(),
        });
    println!("Runtime:  {}", display(runtime));

    let description = show
        .episode_description(season, episode)
        .map(|description| description.unwrap_or_default());
    println!("Summary:  {}", display(description));
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let provider = TvMazeProvider::with_base_url(&cli.api_url);

    let result = if cli.quiet {
        ShowInformation::fetch(&provider, &cli.show)
    } else {
        ShowInformation::fetch_with_progress(&provider, &cli.show, handle_progress_event)
    };

    let show = match result {
        Ok(show) => show,
        Err(ShowInformationError::NotFound(_)) => {
            eprintln!("TV Show could not be found");
            process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    match (cli.season, cli.episode) {
        (Some(season), Some(episode)) => print_episode(&show, season, episode),
        (Some(season), None) => print_season(&show, season),
        _ => print_overview(&show),
    }
}
