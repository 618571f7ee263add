use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use quest_core::Database;
use quest_dashboard::api::{self, AppState};
use quest_dashboard::config::{Config, ConfigArgs};

#[derive(Parser)]
#[command(name = "questd")]
#[command(about = "Gamified task and quest tracker")]
struct Cli {
    #[command(flatten)]
    config: ConfigArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server (default)
    Serve,
    /// Create or upgrade the database schema and exit
    Migrate,
}

fn open_database(config: &Config) -> anyhow::Result<Database> {
    let db = match &config.db_path {
        Some(path) => Database::open(path)
            .with_context(|| format!("opening database at {}", path.display()))?,
        None => Database::open_default()?,
    };
    db.migrate()?;
    Ok(db)
}

async fn serve(config: Config) -> anyhow::Result<()> {
    let db = open_database(&config)?;
    let listen = config.listen;

    let app = api::create_router(AppState::new(db, config));

    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .with_context(|| format!("binding {listen}"))?;
    tracing::info!("Quest dashboard listening on http://{}", listen);

    axum::serve(listener, app).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "quest_dashboard=debug,quest_core=info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = cli.config.into_config()?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(config).await?,
        Commands::Migrate => {
            open_database(&config)?;
            tracing::info!("Database schema is up to date");
        }
    }

    Ok(())
}
