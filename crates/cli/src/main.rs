use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use favorites_core::favorites::{ListFavoritesCriteria, SortDirection};
use favorites_core::types::DbId;
use favorites_db::models::profile::Profile;
use favorites_db::repositories::ProfileRepo;
use favorites_db::services::{FavoriteToggleService, FavoritesQueryService};
use favorites_db::{DbConfig, DbPool};

/// Manage and inspect catalog favorites.
#[derive(Debug, Parser)]
#[command(name = "favorites", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Apply pending database migrations.
    Migrate,
    /// Print one page of a profile's favorites as JSON.
    List(ListArgs),
    /// Favorite a model, or un-favorite it if already favorited.
    Toggle(PairArgs),
    /// Print whether a profile currently favorites a model.
    Status(PairArgs),
}

#[derive(Debug, Args)]
struct ListArgs {
    #[arg(long)]
    profile: String,
    #[arg(long)]
    limit: Option<i64>,
    #[arg(long, allow_negative_numbers = true)]
    offset: Option<i64>,
    /// `asc` or `desc` (default `desc`).
    #[arg(long)]
    sort: Option<SortDirection>,
    #[arg(long)]
    category: Option<DbId>,
    /// Repeat to match any of several tags.
    #[arg(long = "tag")]
    tags: Vec<String>,
}

#[derive(Debug, Args)]
struct PairArgs {
    #[arg(long)]
    profile: String,
    #[arg(long)]
    model: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    let config = DbConfig::from_env().context("Failed to load database configuration")?;
    let pool = favorites_db::create_pool(&config)
        .await
        .context("Failed to connect to database")?;
    tracing::info!(max_connections = config.max_connections, "Database connection pool created");

    favorites_db::health_check(&pool)
        .await
        .context("Database health check failed")?;

    let outcome = run(cli.command, &pool).await;
    pool.close().await;
    outcome
}

async fn run(command: Command, pool: &DbPool) -> Result<()> {
    match command {
        Command::Migrate => {
            favorites_db::run_migrations(pool)
                .await
                .context("Failed to run database migrations")?;
            tracing::info!("Database migrations applied");
        }
        Command::List(args) => {
            let criteria = ListFavoritesCriteria {
                profile_id: args.profile,
                limit: args.limit,
                offset: args.offset,
                sort_direction: args.sort,
                category_id: args.category,
                tags: Some(args.tags),
            };
            let page = FavoritesQueryService::new(pool.clone())
                .list_favorites(&criteria)
                .await?;
            println!("{}", serde_json::to_string_pretty(&page)?);
        }
        Command::Toggle(args) => {
            let profile = resolve_profile(pool, &args.profile).await?;
            let result = FavoriteToggleService::new(pool.clone())
                .toggle_favorite(&profile, &args.model)
                .await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Command::Status(args) => {
            let profile = resolve_profile(pool, &args.profile).await?;
            let favorite = FavoriteToggleService::new(pool.clone())
                .current_favorite(&profile, &args.model)
                .await?;
            let body = serde_json::json!({
                "profile_id": profile.id,
                "model_id": args.model,
                "favorited": favorite.is_some(),
                "favorite": favorite,
            });
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
    }
    Ok(())
}

/// Stand-in for session resolution: the profile must already exist.
async fn resolve_profile(pool: &DbPool, id: &str) -> Result<Profile> {
    ProfileRepo::find_by_id(pool, id)
        .await?
        .with_context(|| format!("Profile {id} not found"))
}

/// Logs go to stderr so command output on stdout stays machine-readable.
/// `LOG_FORMAT=json` switches to structured JSON lines.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "favorites_cli=info,favorites_db=info".into());
    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
