/// Userhub Server - user CRUD over HTTP
use clap::{Parser, Subcommand};
use std::sync::Arc;
use userhub_core::{CreateUser, UserStore};
use userhub_server::{api, config::ServerConfig, state::AppState};
use userhub_storage::PgUserStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "userhub-server")]
#[command(about = "User CRUD service backed by PostgreSQL", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server (default)
    Serve,
    /// Create a new user
    CreateUser {
        /// Display name
        #[arg(short, long)]
        name: String,
    },
    /// List all users
    ListUsers,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "userhub_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = ServerConfig::load()?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(config).await?,
        Commands::CreateUser { name } => create_user(config, name).await?,
        Commands::ListUsers => list_users(config).await?,
    }

    Ok(())
}

fn connect(config: &ServerConfig) -> PgUserStore {
    tracing::info!(
        host = %config.database.host,
        port = config.database.port,
        database = %config.database.database,
        "Using database"
    );
    PgUserStore::new(userhub_storage::create_pool(&config.database))
}

async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    tracing::info!("Starting Userhub Server");

    let store = connect(&config);
    let app_state = AppState::new(Arc::new(store.clone()));
    let app = api::create_router(app_state);

    let addr = config.listen_addr();
    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    store.close().await;
    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}

async fn create_user(config: ServerConfig, name: String) -> anyhow::Result<()> {
    let store = connect(&config);
    let user = store.create_user(CreateUser::new(name)).await?;
    println!("{}", serde_json::to_string(&user)?);
    store.close().await;
    Ok(())
}

async fn list_users(config: ServerConfig) -> anyhow::Result<()> {
    let store = connect(&config);
    let users = store.get_all_users().await?;
    println!("{}", serde_json::to_string(&users)?);
    store.close().await;
    Ok(())
}
