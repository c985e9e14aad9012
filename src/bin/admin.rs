//! CLI administration tool for link-registry.
//!
//! Manages links directly against the database, without going through the
//! HTTP API. All writes go through [`LinkRegistry`], so the same validation
//! and uniqueness rules apply as for the service.
//!
//! # Usage
//!
//! ```bash
//! # List all links
//! cargo run --bin admin -- links list
//!
//! # Create a link (random code) or with a custom code
//! cargo run --bin admin -- links create https://example.com
//! cargo run --bin admin -- links create https://example.com --code promo26
//!
//! # Show or delete a link
//! cargo run --bin admin -- links show promo26
//! cargo run --bin admin -- links delete promo26
//!
//! # Totals and connectivity
//! cargo run --bin admin -- stats
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (or `DB_*` components): PostgreSQL connection

use link_registry::AppError;
use link_registry::application::services::LinkRegistry;
use link_registry::config;
use link_registry::domain::entities::LinkRecord;
use link_registry::infrastructure::persistence::PgLinkRepository;
use link_registry::server::connect_pool;
use link_registry::state::PgLinkRegistry;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use std::sync::Arc;

/// CLI tool for managing link-registry.
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
    /// Manage links
    Links {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Show totals
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Link management subcommands.
#[derive(Subcommand)]
enum LinkAction {
    /// List all links, newest first
    List,

    /// Create a new link
    Create {
        /// Target URL (must be absolute)
        url: String,

        /// Custom code, 6-8 alphanumeric characters (random if omitted)
        #[arg(short, long)]
        code: Option<String>,
    },

    /// Show a single link without counting a hit
    Show { code: String },

    /// Permanently delete a link
    Delete {
        code: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
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

    let config = config::load_from_env()?;
    let pool = connect_pool(&config).await?;
    let registry: PgLinkRegistry =
        LinkRegistry::new(Arc::new(PgLinkRepository::new(Arc::new(pool))));

    match cli.command {
        Commands::Links { action } => handle_link_action(action, &registry).await?,
        Commands::Stats => handle_stats(&registry).await?,
        Commands::Db { action } => handle_db_action(action, &registry).await?,
    }

    Ok(())
}

/// Dispatches link management commands.
async fn handle_link_action(action: LinkAction, registry: &PgLinkRegistry) -> Result<()> {
    match action {
        LinkAction::List => list_links(registry).await,
        LinkAction::Create { url, code } => create_link(registry, url, code).await,
        LinkAction::Show { code } => show_link(registry, &code).await,
        LinkAction::Delete { code, yes } => delete_link(registry, &code, yes).await,
    }
}

/// Lists all links.
///
/// # Output Format
///
/// ```text
/// 📋 Links
///
///   Code      Clicks   Created            Target
///   ──────────────────────────────────────────────────────────────
///   abc123    42       2026-01-15 10:30   https://example.com
/// ```
async fn list_links(registry: &PgLinkRegistry) -> Result<()> {
    println!("{}", "📋 Links".bright_blue().bold());
    println!();

    let links = registry
        .list()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list links: {}", e))?;

    if links.is_empty() {
        println!("{}", "  No links found".yellow());
        println!();
        println!(
            "  Create one with: {} admin -- links create <url>",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<9} {:<8} {:<18} {}",
        "Code".bright_white().bold(),
        "Clicks".bright_white().bold(),
        "Created".bright_white().bold(),
        "Target".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for link in &links {
        println!(
            "  {:<9} {:<8} {:<18} {}",
            link.code.cyan(),
            link.clicks.to_string().bright_green(),
            link.created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            link.target_url
        );
    }

    println!();
    println!("  Total: {}", links.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

async fn create_link(registry: &PgLinkRegistry, url: String, code: Option<String>) -> Result<()> {
    println!("{}", "🔗 Create Link".bright_blue().bold());
    println!();

    match registry.create(url, code).await {
        Ok(link) => {
            println!("{}", "✅ Link created successfully!".green().bold());
            println!();
            print_link(&link);
            Ok(())
        }
        Err(e @ AppError::CodeConflict { .. }) => {
            println!("{} {}", "❌".red(), e.to_string().red());
            Ok(())
        }
        Err(e) => Err(anyhow::anyhow!("Failed to create link: {}", e)),
    }
}

async fn show_link(registry: &PgLinkRegistry, code: &str) -> Result<()> {
    match registry.fetch(code).await {
        Ok(link) => {
            print_link(&link);
            Ok(())
        }
        Err(AppError::NotFound { .. }) => {
            println!("{}", format!("⚠️  Link '{}' not found", code).yellow());
            Ok(())
        }
        Err(e) => Err(anyhow::anyhow!("Database error: {}", e)),
    }
}

/// Deletes a link after confirmation (default: No).
async fn delete_link(registry: &PgLinkRegistry, code: &str, skip_confirm: bool) -> Result<()> {
    println!("{}", "🗑️  Delete Link".bright_blue().bold());
    println!();

    let link = match registry.fetch(code).await {
        Ok(link) => link,
        Err(AppError::NotFound { .. }) => {
            println!("{}", format!("⚠️  Link '{}' not found", code).yellow());
            return Ok(());
        }
        Err(e) => return Err(anyhow::anyhow!("Database error: {}", e)),
    };

    print_link(&link);
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete this link permanently?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    match registry.delete(code).await {
        Ok(deleted) => {
            println!(
                "{}",
                format!("✅ Link '{}' deleted", deleted.code).green().bold()
            );
            Ok(())
        }
        // Someone else removed it between fetch and delete.
        Err(AppError::NotFound { .. }) => {
            println!("{}", "⚠️  Link was already deleted".yellow());
            Ok(())
        }
        Err(e) => Err(anyhow::anyhow!("Failed to delete link: {}", e)),
    }
}

/// Displays link and click totals.
async fn handle_stats(registry: &PgLinkRegistry) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let links = registry
        .list()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to load links: {}", e))?;

    let total_clicks: i64 = links.iter().map(|l| l.clicks).sum();
    let never_used = links.iter().filter(|l| !l.was_accessed()).count();

    println!(
        "  Links:       {}",
        links.len().to_string().bright_green().bold()
    );
    println!(
        "  Clicks:      {}",
        total_clicks.to_string().bright_green().bold()
    );
    println!(
        "  Never used:  {}",
        never_used.to_string().bright_yellow().bold()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, registry: &PgLinkRegistry) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            registry
                .health_check()
                .await
                .map_err(|e| anyhow::anyhow!("Database check failed: {}", e))?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
    }

    Ok(())
}

fn print_link(link: &LinkRecord) {
    println!("  Code:          {}", link.code.bright_yellow().bold());
    println!("  Target:        {}", link.target_url.cyan());
    println!("  Clicks:        {}", link.clicks.to_string().bright_white());
    println!(
        "  Last accessed: {}",
        link.last_accessed
            .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
            .unwrap_or_else(|| "never".to_string())
            .bright_black()
    );
    println!(
        "  Created:       {}",
        link.created_at
            .format("%Y-%m-%d %H:%M:%S UTC")
            .to_string()
            .bright_black()
    );
}
