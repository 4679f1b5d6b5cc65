use std::path::Path;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use knockout_bracket::api::state::{AppState, Session};
use knockout_bracket::bracket::Bracket;
use knockout_bracket::config::AppConfig;
use knockout_bracket::models::{Entrant, MatchNode};

#[derive(Parser)]
#[command(name = "knockout-bracket")]
#[command(about = "Single-elimination bracket generator with third-place match")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: String,

    /// Log level (trace, debug, info, warn, error); overrides the config file
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a bracket and print it
    Generate {
        /// Seed for reproducible results
        #[arg(long)]
        seed: Option<u64>,

        /// Leave every match undecided
        #[arg(long)]
        manual: bool,

        /// Print the renderer tree as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the matches on the way from a player's first match to the final
    Search {
        /// Case-insensitive name fragment
        query: String,

        #[arg(long)]
        seed: Option<u64>,
    },

    /// Print one player's route through the bracket
    Highlight {
        /// Exact player name
        player: String,

        #[arg(long)]
        seed: Option<u64>,
    },

    /// Start the API server
    Serve {
        /// Bind address
        #[arg(long)]
        host: Option<String>,

        /// Port number
        #[arg(long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = Path::new(&cli.config);
    let mut config = AppConfig::load_or_default(config_path)
        .with_context(|| format!("loading {}", cli.config))?;
    let log_level = cli.log_level.clone().unwrap_or(config.log_level.clone());

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level));

    if cli.json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    tracing::info!("Starting knockout-bracket v{}", env!("CARGO_PKG_VERSION"));
    if !config_path.exists() {
        tracing::debug!("No config file at {:?}, using defaults", config_path);
    }

    match cli.command {
        Commands::Generate { seed, manual, json } => {
            if seed.is_some() {
                config.tournament.seed = seed;
            }
            config.tournament.manual |= manual;
            let session = Session::from_config(&config.tournament)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&session.bracket.to_view())?);
            } else {
                print_bracket(&session.bracket);
            }
        }
        Commands::Search { query, seed } => {
            if seed.is_some() {
                config.tournament.seed = seed;
            }
            let session = Session::from_config(&config.tournament)?;
            let bracket = &session.bracket;

            let leaves = bracket.search_leaves(&query);
            if leaves.is_empty() {
                println!("No player matches {:?}", query);
                return Ok(());
            }
            for leaf in leaves {
                println!("Starting match {}", leaf.id);
            }
            let path = bracket.search_path(&query);
            for node in bracket.matches().filter(|m| path.contains(&m.id)) {
                println!("  {}", describe(node));
            }
            if path.contains(&bracket.third_place().id) {
                println!("  {}", describe(bracket.third_place()));
            }
        }
        Commands::Highlight { player, seed } => {
            if seed.is_some() {
                config.tournament.seed = seed;
            }
            let session = Session::from_config(&config.tournament)?;
            let path = session.bracket.highlight_path(&player);

            if path.is_empty() {
                println!("{} is not in the bracket", player);
                return Ok(());
            }
            for node in session.bracket.all_matches().filter(|m| path.contains(&m.id)) {
                println!("{}", describe(node));
            }
            for link in &path.links {
                tracing::debug!("link {}", link);
            }
        }
        Commands::Serve { host, port } => {
            let host = host.unwrap_or(config.server.host.clone());
            let port = port.unwrap_or(config.server.port);

            let session = Session::from_config(&config.tournament)?;
            tracing::info!(
                "Session {} ready with {} matches",
                session.id,
                session.bracket.len() + 1
            );
            let state = AppState::new(session, config.tournament.clone());
            let app = knockout_bracket::api::build_router(state, &config.server.cors_origin);

            let addr = format!("{}:{}", host, port);
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!("Listening on http://{}", addr);
            axum::serve(listener, app).await?;
        }
    }

    Ok(())
}

/// One line per match: id, pairing, and result once decided.
fn describe(node: &MatchNode) -> String {
    let slot = |s: &Option<Entrant>| {
        s.as_ref()
            .map(|e| e.to_string())
            .unwrap_or_else(|| "TBD".to_string())
    };
    let mut line = format!(
        "{:<10} {} vs {}",
        node.id.as_str(),
        slot(&node.player1),
        slot(&node.player2)
    );
    if let Some(winner) = &node.winner {
        line.push_str(&format!(" -> {}", winner));
        if let Some(scoreline) = &node.scoreline {
            line.push_str(&format!(" ({})", scoreline.summary()));
        }
    }
    line
}

fn print_bracket(bracket: &Bracket) {
    for round in 1..=bracket.rounds() {
        println!("Round {}", round);
        for node in bracket.round(round) {
            println!("  {}", describe(node));
        }
    }
    println!("Third place");
    println!("  {}", describe(bracket.third_place()));

    let standings = bracket.standings();
    let show = |place: &Option<String>| place.clone().unwrap_or_else(|| "-".to_string());
    println!();
    println!("Champion:   {}", show(&standings.champion));
    println!("Runner-up:  {}", show(&standings.runner_up));
    println!("Third:      {}", show(&standings.third));
    println!("Fourth:     {}", show(&standings.fourth));
}
