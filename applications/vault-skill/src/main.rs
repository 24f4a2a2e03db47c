/// Music Vault Skill - voice endpoint for the Music Vault player
use clap::{Parser, Subcommand};
use std::{net::SocketAddr, path::PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vault_core::UserId;
use vault_skill::{create_router, AppState, SkillConfig};
use vault_storage::SqliteSessionStore;

#[derive(Parser)]
#[command(name = "vault-skill")]
#[command(about = "Music Vault voice-skill endpoint", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "VAULT_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Print the stored session document for a user
    Session {
        /// Voice-platform user id
        user_id: String,
    },
    /// Delete the stored session document for a user
    Reset {
        /// Voice-platform user id
        user_id: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vault_skill=info,vault_playback=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = SkillConfig::load(cli.config.as_deref())?;
    config.validate()?;

    match cli.command {
        Commands::Serve => serve(config).await?,
        Commands::Session { user_id } => show_session(&config, &user_id).await?,
        Commands::Reset { user_id } => reset_session(&config, &user_id).await?,
    }

    Ok(())
}

async fn serve(config: SkillConfig) -> anyhow::Result<()> {
    tracing::info!("Starting Music Vault skill");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);

    let state = AppState::from_config(&config).await?;
    let app = create_router(state);

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn show_session(config: &SkillConfig, user_id: &str) -> anyhow::Result<()> {
    let store = SqliteSessionStore::connect(&config.storage.database_url).await?;
    let user_id = UserId::new(user_id);

    match vault_storage::sessions::get(store.pool(), user_id.as_str()).await? {
        Some(document) => {
            println!("{}", serde_json::to_string_pretty(&document)?);
            if let Some(updated_at) =
                vault_storage::sessions::updated_at(store.pool(), user_id.as_str()).await?
            {
                println!("updated_at: {}", updated_at);
            }
        }
        None => println!("No session stored for {}", user_id),
    }

    Ok(())
}

async fn reset_session(config: &SkillConfig, user_id: &str) -> anyhow::Result<()> {
    let store = SqliteSessionStore::connect(&config.storage.database_url).await?;

    if vault_storage::sessions::delete(store.pool(), user_id).await? {
        println!("Deleted session for {}", user_id);
    } else {
        println!("No session stored for {}", user_id);
    }

    Ok(())
}
