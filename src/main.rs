use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use video_analytics::config::AppConfig;
use video_analytics::generator::MockDataGenerator;
use video_analytics::{
    format_float, format_number, format_percent, server, AnalyticsEngine,
};

#[derive(Parser)]
#[command(name = "video-analytics", about = "Video analytics dashboard backend")]
struct Cli {
    /// Path to a TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Seed for reproducible generated data
    #[arg(long, global = true)]
    seed: Option<u64>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    Serve(ServeArgs),
    Report(ReportArgs),
    Trend(TrendArgs),
}

#[derive(Args, Debug, Clone, Default)]
struct ServeArgs {
    #[arg(long)]
    host: Option<String>,
    #[arg(long)]
    port: Option<u16>,
    #[arg(long)]
    web_root: Option<String>,
}

#[derive(Args, Debug, Clone)]
struct ReportArgs {
    #[arg(long)]
    details: bool,
}

#[derive(Args, Debug, Clone)]
struct TrendArgs {
    #[arg(long, allow_hyphen_values = true)]
    days: Option<i64>,
}

#[tokio::main]
async fn main() {
    load_dotenv();
    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), String> {
    let cli = Cli::parse();
    let (mut config, config_path) = AppConfig::load(cli.config).map_err(|err| err.to_string())?;
    if let Some(seed) = cli.seed {
        config.generator.seed = Some(seed);
    }
    init_tracing(&config);
    if let Some(path) = config_path.filter(|path| path.exists()) {
        tracing::debug!(path = %path.display(), "loaded config file");
    }

    let command = cli.command.unwrap_or(Command::Serve(ServeArgs::default()));
    match command {
        Command::Serve(args) => run_serve(config, args).await,
        Command::Report(args) => {
            run_report(&config, args);
            Ok(())
        }
        Command::Trend(args) => {
            run_trend(&config, args);
            Ok(())
        }
    }
}

async fn run_serve(mut config: AppConfig, args: ServeArgs) -> Result<(), String> {
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(web_root) = args.web_root {
        config.server.web_root = Some(web_root);
    }
    server::serve(config).await.map_err(|err| err.to_string())
}

fn run_report(config: &AppConfig, args: ReportArgs) {
    let engine = AnalyticsEngine::new(config.benchmarks.clone());
    let mut generator = MockDataGenerator::from_config(config);
    let metrics = generator.video_metrics();
    let performance = engine.performance(&metrics);
    let engagement = engine.engagement_metrics(&metrics);

    println!("Video: {} ({})", metrics.title, metrics.id);
    println!(
        "Views: {} | likes {} | comments {} | CTR {}",
        format_number(metrics.views as f64),
        format_number(metrics.likes as f64),
        format_number(metrics.comments as f64),
        format_percent(metrics.click_through_rate)
    );
    println!(
        "Engagement rate: {} | retention {} | watch time {} h",
        format_percent(engagement.engagement_rate),
        format_percent(engagement.watch_time_percentage),
        format_float(metrics.watch_time_hours, 1)
    );
    println!(
        "Performance score: {} ({})",
        format_float(performance.overall_score, 1),
        performance.grade
    );

    if args.details {
        let breakdown = &performance.breakdown;
        println!("\nBreakdown:");
        println!("  views: {}", format_float(breakdown.views_score, 1));
        println!("  engagement: {}", format_float(breakdown.engagement_score, 1));
        println!("  watch time: {}", format_float(breakdown.watch_time_score, 1));
        println!("  ctr: {}", format_float(breakdown.ctr_score, 1));
    }

    let recommendations = engine.recommendations(&metrics);
    if !recommendations.is_empty() {
        println!("\nRecommendations:");
        for rec in recommendations {
            println!("- [{:?}] {}: {}", rec.category, rec.title, rec.description);
        }
    }
}

fn run_trend(config: &AppConfig, args: TrendArgs) {
    let days = config.trend_days(args.days);
    let mut generator = MockDataGenerator::from_config(config);
    let trend = generator.views_trend(days, Utc::now().date_naive());

    if trend.is_empty() {
        println!("No trend data for {} days", days);
        return;
    }
    println!("{:<12} {:>10} {:>12}", "date", "views", "watch time");
    for point in trend {
        println!(
            "{:<12} {:>10} {:>12}",
            point.date.format("%Y-%m-%d"),
            format_number(point.views as f64),
            format_float(point.watch_time, 1)
        );
    }
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{},tower_http=info", config.log_level())));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

fn load_dotenv() {
    let _ = dotenvy::dotenv();
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    let manifest_path = Path::new(manifest_dir).join(".env");
    let _ = dotenvy::from_path(manifest_path);
}
