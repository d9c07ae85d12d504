use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use larder_core::{ChartRenderer, SeedFile};
use larder_server::config::Config;
use larder_server::{api, app, auth, db, seed, store, telemetry, AppState};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "larder-server", about = "Recipe catalog search service")]
struct Cli {
    /// Print the OpenAPI document and exit
    #[arg(long)]
    openapi: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Create a user who can log in to the API
    CreateUser {
        #[arg(long)]
        username: String,
        #[arg(long, env = "LARDER_PASSWORD")]
        password: String,
    },
    /// Load recipes, ingredients and bookshop records from a seed JSON file
    Import { path: PathBuf },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.openapi {
        let spec = api::openapi()
            .to_pretty_json()
            .context("Failed to serialize OpenAPI document")?;
        println!("{}", spec);
        return Ok(());
    }

    telemetry::init_telemetry();

    let config = Config::from_env()?;
    let pool = db::create_pool(&config.database_url)?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config, pool).await,
        Command::CreateUser { username, password } => create_user(&pool, &username, &password),
        Command::Import { path } => import(&pool, &path),
    }
}

async fn serve(config: Config, pool: db::DbPool) -> anyhow::Result<()> {
    let state = AppState::new(pool, ChartRenderer::new(config.chart));

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}

fn create_user(pool: &db::DbPool, username: &str, password: &str) -> anyhow::Result<()> {
    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        bail!("Username and password must not be empty");
    }

    let mut conn = pool.get()?;
    if auth::find_user_by_username(&mut conn, username)?.is_some() {
        bail!("User {} already exists", username);
    }

    let password_hash = auth::hash_password(password)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?;
    let id = auth::create_user(&mut conn, username, &password_hash)?;

    tracing::info!(user_id = id, username = %username, "created user");
    Ok(())
}

fn import(pool: &db::DbPool, path: &Path) -> anyhow::Result<()> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let seed_file =
        SeedFile::parse(&bytes).with_context(|| format!("Invalid seed file {}", path.display()))?;

    let mut conn = pool.get()?;
    let report = seed::import_seed(&mut conn, &seed_file)?;
    let total = store::count_recipes(&mut conn)?;

    println!(
        "Imported {} new and {} existing recipes ({} new ingredients, {} ingredient lines); \
         catalog now holds {} recipes",
        report.recipes_created,
        report.recipes_existing,
        report.ingredients_created,
        report.links_written,
        total
    );
    println!(
        "Added {} books and {} customers; wrote {} salespersons",
        report.books_created, report.customers_created, report.salespersons_written
    );
    Ok(())
}
