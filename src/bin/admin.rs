//! CLI administration tool for short-url.
//!
//! Encodes and decodes short codes with the configured codec, and creates or
//! resolves links directly in the database without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Show the codes for some ids
//! cargo run --bin admin -- encode 1 2 1000
//!
//! # Decode a code back to its id
//! cargo run --bin admin -- decode hei
//!
//! # Create a link
//! cargo run --bin admin -- link create --url https://example.com/page
//!
//! # Resolve a code to its stored URL
//! cargo run --bin admin -- link resolve hei
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `SHORT_CODE_ALPHABET`, `SHORT_CODE_MIN_LENGTH`, `SHORT_CODE_BLOCKLIST`: must
//!   match the server, or codes will not agree
//! - `DATABASE_URL` (or `DB_*` components): required for `link` and `db` commands
//! - `BASE_URL`: prefix for printed short URLs (default: `http://localhost:3000`)

use short_url::application::services::LinkService;
use short_url::config::{self, Config};
use short_url::domain::codec::ShortCodeCodec;
use short_url::infrastructure::persistence::PgLinkRepository;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing short-url.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Print the short code for one or more ids
    Encode {
        #[arg(required = true)]
        ids: Vec<i64>,
    },

    /// Print the id behind a short code
    Decode { code: String },

    /// Create or resolve links in the database
    Link {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Link subcommands.
#[derive(Subcommand)]
enum LinkAction {
    /// Store a URL and print its short code
    Create {
        /// Destination URL (prompted for if omitted)
        #[arg(short, long)]
        url: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Print the URL stored behind a short code
    Resolve { code: String },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let codec = ShortCodeCodec::new(config::load_codec_options()?)
        .context("Invalid short code settings")?;

    match cli.command {
        Commands::Encode { ids } => encode(&codec, &ids)?,
        Commands::Decode { code } => decode(&codec, &code),
        Commands::Link { action } => {
            let pool = connect().await?;
            handle_link_action(action, pool, codec).await?;
        }
        Commands::Db { action } => {
            let pool = connect().await?;
            handle_db_action(action, &pool).await?;
        }
    }

    Ok(())
}

async fn connect() -> Result<PgPool> {
    let database_url = Config::load_database_url().context("DATABASE_URL must be set")?;

    PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")
}

fn encode(codec: &ShortCodeCodec, ids: &[i64]) -> Result<()> {
    println!("{}", "🔢 Encode".bright_blue().bold());
    println!();

    for &id in ids {
        let code = codec
            .encode_id(id)
            .with_context(|| format!("Cannot encode id {id}"))?;

        println!(
            "  {:>20}  {}",
            id.to_string().bright_black(),
            code.bright_yellow().bold()
        );
    }

    println!();

    Ok(())
}

/// Prints every id packed into a code, and whether it is the canonical code
/// for a single link id.
fn decode(codec: &ShortCodeCodec, code: &str) {
    println!("{}", "🔎 Decode".bright_blue().bold());
    println!();

    let ids = codec.decode(code);

    if ids.is_empty() {
        println!("  {} {}", code.cyan(), "→ no value".yellow());
        println!();
        return;
    }

    let rendered: Vec<String> = ids.iter().map(u64::to_string).collect();
    println!("  {} → {}", code.cyan(), rendered.join(", ").bright_white().bold());

    match codec.decode_id(code) {
        Some(id) => println!("  Link id: {}", id.to_string().green().bold()),
        None => println!("  {}", "⚠️  Not a canonical link code".yellow()),
    }

    println!();
}

/// Dispatches link commands.
async fn handle_link_action(action: LinkAction, pool: PgPool, codec: ShortCodeCodec) -> Result<()> {
    let repo = Arc::new(PgLinkRepository::new(Arc::new(pool)));
    let service = LinkService::new(repo, Arc::new(codec));

    match action {
        LinkAction::Create { url, yes } => create_link(&service, url, yes).await?,
        LinkAction::Resolve { code } => resolve_link(&service, &code).await?,
    }

    Ok(())
}

/// Creates a link with interactive prompts.
///
/// # Flow
///
/// 1. Prompt for the URL (or use provided)
/// 2. Confirm creation (unless `--yes` flag)
/// 3. Insert and print code and short URL
async fn create_link(
    service: &LinkService<PgLinkRepository>,
    url: Option<String>,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "🔗 Create Short Link".bright_blue().bold());
    println!();

    let url = match url {
        Some(u) => u,
        None => Input::new()
            .with_prompt("Destination URL")
            .with_initial_text("https://")
            .interact_text()?,
    };

    println!("  URL: {}", url.cyan());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create this link?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let link = service
        .create_short_url(&url)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create link: {}", e))?;

    let base_url =
        std::env::var("BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());

    println!();
    println!("{}", "✅ Link created successfully!".green().bold());
    println!();
    println!("  ID:        {}", link.id.to_string().bright_black());
    println!("  Code:      {}", link.code.bright_yellow().bold());
    println!(
        "  Short URL: {}",
        service.get_short_url(&base_url, &link.code).bright_cyan()
    );
    println!();

    Ok(())
}

async fn resolve_link(service: &LinkService<PgLinkRepository>, code: &str) -> Result<()> {
    let link = service
        .resolve_short_url(code)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;

    match link {
        Some(link) => {
            println!("  {} → {}", code.cyan(), link.url.bright_white().bold());
            println!(
                "  Created: {}",
                link.created_at
                    .format("%Y-%m-%d %H:%M")
                    .to_string()
                    .bright_black()
            );
        }
        None => println!("  {} {}", code.cyan(), "→ not found".yellow()),
    }

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            let links_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM links")
                .fetch_one(pool)
                .await
                .context("Table 'links' is missing; start the server once to run migrations")?;

            println!("{}", "✅ Database connection OK".green().bold());
            println!(
                "  Links: {}",
                links_count.to_string().bright_green().bold()
            );
        }
    }

    Ok(())
}
