use std::error::Error;
use std::process;
use std::time::Instant;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use showdeck::{
    CachedCatalog, CatalogApi, DEFAULT_TOP_LIMIT, OVERSCAN, SearchDebouncer, SearchState, Show,
    TvMazeClient, group_by_genre, load_show_details, top_shows, visible_window,
};

#[derive(Parser)]
#[command(name = "showdeck", version, about = "Browse, rank and search the TVMaze show catalog")]
struct Cli {
    /// Print results as JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List genre rows and the overall top shows
    Browse {
        /// Viewport width in pixels for the virtualized genre rows
        #[arg(long, default_value_t = 940)]
        viewport: u32,
    },
    /// List the top-rated shows
    Top {
        /// Number of shows to list
        #[arg(long, default_value_t = DEFAULT_TOP_LIMIT)]
        limit: usize,
    },
    /// Print details and cast for one show
    Show {
        /// The show's id
        id: u32,
    },
    /// Search shows by name
    Search {
        /// Search query (at least two characters)
        query: String,
    },
}

fn rating_label(show: &Show) -> String {
    show.rating_average()
        .map_or_else(|| "unrated".to_string(), |avg| format!("{avg:.1}"))
}

async fn run_browse<P: CatalogApi>(
    catalog: &P,
    viewport: u32,
    json: bool,
) -> Result<(), Box<dyn Error>> {
    let shows = catalog.shows().await?;
    let genres = group_by_genre(&shows);
    let top = top_shows(&shows, DEFAULT_TOP_LIMIT);

    if json {
        let payload = serde_json::json!({ "genres": genres, "top": top });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    println!("=== Top Shows ===");
    for show in &top {
        println!("  {} ({})", show.name, rating_label(show));
    }

    for (genre, bucket) in &genres {
        // Render each row the way the virtualized list would at scroll
        // offset zero: only the windowed cards, the rest as a tail count.
        let window = visible_window(bucket.len(), viewport, 0, OVERSCAN);
        println!("\n=== {} ({}) ===", genre, bucket.len());
        for show in &bucket[window.start..window.end] {
            println!("  {} ({})", show.name, rating_label(show));
        }
        if window.end < bucket.len() {
            println!("  ... {} more", bucket.len() - window.end);
        }
    }

    Ok(())
}

async fn run_top<P: CatalogApi>(catalog: &P, limit: usize, json: bool) -> Result<(), Box<dyn Error>> {
    let shows = catalog.shows().await?;
    let top = top_shows(&shows, limit);

    if json {
        println!("{}", serde_json::to_string_pretty(&top)?);
        return Ok(());
    }

    for (rank, show) in top.iter().enumerate() {
        println!("{:2}. {} ({})", rank + 1, show.name, rating_label(show));
    }

    Ok(())
}

async fn run_show<P: CatalogApi>(catalog: &P, id: u32, json: bool) -> Result<(), Box<dyn Error>> {
    let details = load_show_details(catalog, id).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&details)?);
        return Ok(());
    }

    let show = &details.show;
    println!("{} ({})", show.name, rating_label(show));
    println!("Status: {}", show.status);
    if !show.genres.is_empty() {
        println!("Genres: {}", show.genres.join(", "));
    }
    if let Some(network) = &show.network {
        println!("Network: {}", network.name);
    }
    if let Some(premiered) = &show.premiered {
        println!("Premiered: {premiered}");
    }
    if let Some(summary) = show.summary_text() {
        println!("\n{summary}");
    }
    if !details.cast.is_empty() {
        println!("\nCast:");
        for member in &details.cast {
            println!("  {} as {}", member.person.name, member.character.name);
        }
    }

    Ok(())
}

async fn run_search<P: CatalogApi>(
    catalog: &P,
    query: &str,
    json: bool,
) -> Result<(), Box<dyn Error>> {
    let mut machine = SearchDebouncer::new();
    machine.input(query, Instant::now());

    // A short query settles in Idle without arming a fetch.
    let Some(deadline) = machine.deadline() else {
        eprintln!("Query too short; give at least two characters.");
        return Ok(());
    };

    tokio::time::sleep_until(deadline.into()).await;
    if let Some(fired) = machine.fire(Instant::now()) {
        let outcome = catalog.search(&fired).await;
        machine.complete(outcome);
    }

    if machine.state() == SearchState::Errored {
        if let Some(message) = machine.error() {
            eprintln!("{message}");
        }
        process::exit(1);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(machine.results())?);
        return Ok(());
    }

    if machine.results().is_empty() {
        println!("No shows matched '{}'.", query.trim());
        return Ok(());
    }
    for show in machine.results() {
        println!("  {} ({})", show.name, rating_label(show));
    }

    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let catalog = CachedCatalog::new(TvMazeClient::new());

    let result = match cli.command {
        Command::Browse { viewport } => run_browse(&catalog, viewport, cli.json).await,
        Command::Top { limit } => run_top(&catalog, limit, cli.json).await,
        Command::Show { id } => run_show(&catalog, id, cli.json).await,
        Command::Search { query } => run_search(&catalog, &query, cli.json).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
