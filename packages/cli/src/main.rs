use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::Level;

use game_core::session::{FixedStep, QueuedEvents};
use host::{AppConfig, GameFactories, Installer, Launcher, Registry, Store};

mod games;

#[derive(Parser)]
#[command(name = "gamebox", about = "Local host runtime for installable game plugins")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Manage local users
    User {
        #[command(subcommand)]
        action: UserAction,
    },
    /// Install a game from a zip archive
    Install { archive: PathBuf },
    /// List installed games
    Games,
    /// Play an installed game
    Play {
        game: String,
        #[arg(long)]
        user: String,
    },
    /// Show per-game statistics for a user
    Stats {
        #[arg(long)]
        user: String,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// Register a new user
    Add { name: String },
    /// List registered users
    List,
}

/// Entry points compiled into this front end.
fn builtin_factories() -> GameFactories {
    let mut factories = GameFactories::new();
    factories.register("main", Box::new(games::clicker));
    factories.register("builtin:clicker", Box::new(games::clicker));
    factories
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let cli = Cli::parse();
    let config = AppConfig::load()?;

    match cli.command {
        Command::User { action } => {
            let store = Store::connect(&config.database.url).await?;
            match action {
                UserAction::Add { name } => {
                    let user = store.create_user(&name).await?;
                    println!("Created user '{}' (id {})", user.username, user.id);
                }
                UserAction::List => {
                    for user in store.users().await? {
                        println!("{:>4}  {}", user.id, user.username);
                    }
                }
            }
        }
        Command::Install { archive } => {
            let installer = Installer::new(&config.games.games_dir)?;
            println!("{}", installer.install(&archive)?);
        }
        Command::Games => {
            let registry = Registry::new(&config.games.games_dir);
            let games = registry.list_installed()?;
            if games.is_empty() {
                println!("No games installed");
            }
            for game in games {
                println!("{:<20} {}", game.manifest.name, game.manifest);
            }
        }
        Command::Play { game, user } => {
            let store = Store::connect(&config.database.url).await?;
            let user = store.user_by_name(&user).await?;
            let registry = Registry::new(&config.games.games_dir);
            let factories = builtin_factories();
            let launcher = Launcher::new(&registry, &factories, &store, &config.language);

            let mut events = QueuedEvents::new();
            let mut clock = FixedStep::paced(60);
            let report = launcher.launch(&user, &game, &mut events, &mut clock).await?;
            println!(
                "Final score: {} ({}s played)",
                report.score, report.playtime_secs
            );
        }
        Command::Stats { user } => {
            let store = Store::connect(&config.database.url).await?;
            let user = store.user_by_name(&user).await?;
            let rows = store.stats_for(user.id).await?;
            if rows.is_empty() {
                println!("No sessions recorded for '{}'", user.username);
            }
            for row in rows {
                println!(
                    "{:<20} high score {:>6}  played {:>3}x  {:>5}s total",
                    row.game_name, row.high_score, row.times_played, row.total_playtime
                );
            }
        }
    }

    Ok(())
}
