//! GameVault back-office CLI

use std::process;

use clap::{Args, Parser, Subcommand};
use gamevault_app::{
    context::AppContext,
    domain::{
        games::records::GameUuid,
        promotions::records::PromotionUuid,
        usage::records::{DailyUsage, GameUsage},
    },
};
use jiff::Timestamp;
use tabled::{Table, Tabled};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

#[derive(Debug, Parser)]
#[command(name = "gamevault-app", about = "GameVault back-office CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Price a game the way the storefront would.
    Quote(QuoteArgs),

    /// Report a promotion's performance over a date range.
    Performance(PerformanceArgs),
}

#[derive(Debug, Args)]
struct QuoteArgs {
    /// Game UUID
    #[arg(long)]
    game: Uuid,

    /// Point in time to price at; defaults to now
    #[arg(long)]
    at: Option<Timestamp>,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,
}

#[derive(Debug, Args)]
struct PerformanceArgs {
    /// Promotion UUID
    #[arg(long)]
    promotion: Uuid,

    /// Range start (RFC 3339)
    #[arg(long)]
    from: Timestamp,

    /// Range end (RFC 3339)
    #[arg(long)]
    to: Timestamp,

    /// Emit JSON instead of tables
    #[arg(long)]
    json: bool,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,
}

#[tokio::main]
pub async fn main() {
    let _env = dotenvy::dotenv();

    init_tracing();

    let cli = Cli::parse();

    if let Err(error) = run(cli).await {
        eprintln!("{error}");
        process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .compact()
        .init();
}

async fn run(cli: Cli) -> Result<(), String> {
    match cli.command {
        Commands::Quote(args) => quote(args).await,
        Commands::Performance(args) => performance(args).await,
    }
}

async fn quote(args: QuoteArgs) -> Result<(), String> {
    let context = connect(&args.database_url).await?;
    let at = args.at.unwrap_or_else(Timestamp::now);

    let quote = context
        .pricing
        .quote_game(GameUuid::from_uuid(args.game), at)
        .await
        .map_err(|error| format!("failed to quote game: {error}"))?;

    println!("game:      {}", quote.game_id);
    println!("base:      {}", quote.base_price);
    println!("final:     {}", quote.final_price);

    match quote.applied_promotion {
        Some(promotion) => println!("promotion: {promotion}"),
        None => println!("promotion: none"),
    }

    Ok(())
}

async fn performance(args: PerformanceArgs) -> Result<(), String> {
    let context = connect(&args.database_url).await?;

    let report = context
        .usage
        .performance(PromotionUuid::from_uuid(args.promotion), args.from, args.to)
        .await
        .map_err(|error| format!("failed to build performance report: {error}"))?;

    if args.json {
        let json = serde_json::to_string_pretty(&report)
            .map_err(|error| format!("failed to encode report: {error}"))?;

        println!("{json}");

        return Ok(());
    }

    println!("total uses:    {}", report.total_uses);
    println!("total revenue: {}", report.total_revenue);
    println!("total savings: {}", report.total_savings);

    if !report.daily_trend.is_empty() {
        let rows: Vec<DailyRow> = report.daily_trend.iter().map(DailyRow::from).collect();

        println!("\n{}", Table::new(rows));
    }

    if !report.top_games.is_empty() {
        let rows: Vec<GameRow> = report.top_games.iter().map(GameRow::from).collect();

        println!("\n{}", Table::new(rows));
    }

    Ok(())
}

async fn connect(database_url: &str) -> Result<AppContext, String> {
    AppContext::from_database_url(database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))
}

#[derive(Tabled)]
struct DailyRow {
    day: String,
    uses: i64,
    revenue: String,
    savings: String,
}

impl From<&DailyUsage> for DailyRow {
    fn from(daily: &DailyUsage) -> Self {
        Self {
            day: daily.day.to_string(),
            uses: daily.uses,
            revenue: daily.revenue.to_string(),
            savings: daily.savings.to_string(),
        }
    }
}

#[derive(Tabled)]
struct GameRow {
    title: String,
    uses: i64,
    revenue: String,
    savings: String,
}

impl From<&GameUsage> for GameRow {
    fn from(game: &GameUsage) -> Self {
        Self {
            title: game.title.clone(),
            uses: game.uses,
            revenue: game.revenue.to_string(),
            savings: game.savings.to_string(),
        }
    }
}
