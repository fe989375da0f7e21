use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use briefing_client::{HackerNewsScraper, ScraperConfig};
use briefing_core::models::Article;
use briefing_core::ScrapeService;
use briefing_db::{Database, DatabaseConfig};

#[derive(Parser)]
#[command(name = "briefing", version, about = "Hacker News front-page digest")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape the front page once and print the newly stored articles
    Scrape {
        /// Courtesy pause before the fetch, in seconds
        #[arg(short, long, env = "BRIEFING_REQUEST_DELAY_SECS")]
        delay_secs: Option<u64>,
    },

    /// List stored articles, newest first
    Articles {
        /// Number of articles to show
        #[arg(short, long, default_value_t = 10)]
        limit: usize,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Logs go to stderr so stdout stays machine-readable
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("briefing=info".parse()?))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let db = connect_db().await?;

    match cli.command {
        Commands::Scrape { delay_secs } => cmd_scrape(&db, delay_secs).await?,
        Commands::Articles { limit, format } => cmd_articles(&db, limit, format).await?,
    }

    Ok(())
}

/// Connect to PostgreSQL using DATABASE_URL and apply migrations.
async fn connect_db() -> Result<Database> {
    let config = DatabaseConfig::from_env()?;
    let db = Database::connect(&config)
        .await
        .context("Failed to connect to database")?;
    db.migrate().await?;
    Ok(db)
}

async fn cmd_scrape(db: &Database, delay_secs: Option<u64>) -> Result<()> {
    let mut config = ScraperConfig::from_env()?;
    if let Some(secs) = delay_secs {
        config.request_delay = Duration::from_secs(secs);
    }

    tracing::info!(
        source = %config.source_url,
        delay_secs = config.request_delay.as_secs(),
        "Scraping front page"
    );

    let scraper = HackerNewsScraper::from_config(&config)?;
    let service = ScrapeService::new(scraper, db.article_repo());
    let articles = service
        .run_scrape()
        .await
        .context("Scraping failed")?;

    tracing::info!("{} new articles stored", articles.len());

    println!("{}", serde_json::to_string_pretty(&articles)?);

    Ok(())
}

async fn cmd_articles(db: &Database, limit: usize, format: OutputFormat) -> Result<()> {
    let articles = db.article_repo().list_recent(limit).await?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&articles)?),
        OutputFormat::Csv => write_csv(&articles)?,
        OutputFormat::Table => print_table(&articles),
    }

    Ok(())
}

fn write_csv(articles: &[Article]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(std::io::stdout());
    for article in articles {
        writer.serialize(article)?;
    }
    writer.flush()?;
    Ok(())
}

fn print_table(articles: &[Article]) {
    if articles.is_empty() {
        println!("No articles stored yet");
        return;
    }

    for article in articles {
        let status = if article.is_processed { "processed" } else { "new" };
        println!(
            "  [{}] {} {}\n      {}",
            status,
            article.created_at.format("%Y-%m-%d %H:%M:%S UTC"),
            article.title,
            article.link,
        );
    }

    println!("\nTotal: {} articles", articles.len());
}
