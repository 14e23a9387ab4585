mod api;
mod server;

use anyhow::{bail, Context, Result};
use brand_diagnostics::calibration::{CalibrationRunner, CalibrationSample, RateTuner};
use brand_diagnostics::config::DiagnosticsConfig;
use brand_diagnostics::datasource::{build_data_source, AdsPerformanceSummary};
use brand_diagnostics::strategy::{rank_by_ice, IceCandidate};
use brand_diagnostics::{
    compare_channels, diagnose, format_float, format_number, format_percent, simulate_performance,
    BrandDiagnosticInput, CampaignStrategy, Channel, DiagnosticReport, SimulationInput,
    SimulationResult,
};
use clap::{Args, Parser, Subcommand};
use serde::de::DeserializeOwned;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "brand-diagnostics",
    about = "Brand marketing diagnostics and campaign performance simulator"
)]
struct Cli {
    /// Config file; defaults to DIAGNOSTICS_CONFIG_PATH or config/diagnostics.toml.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Simulate one campaign on one channel.
    Simulate(SimulateArgs),
    /// Simulate the same campaign on every channel, best ROAS first.
    Compare(CompareArgs),
    /// Run a full brand diagnosis from a JSON input file.
    Diagnose(DiagnoseArgs),
    /// Rank initiatives by ICE score.
    Ice(IceArgs),
    /// Fetch dashboard data from the configured data source.
    Fetch(FetchArgs),
    /// Compare simulator output against finished campaigns.
    Calibrate(CalibrateArgs),
    /// Write the default config to disk.
    InitConfig(InitConfigArgs),
    /// Serve the HTTP API.
    Serve(ServeArgs),
}

#[derive(Args, Debug, Clone)]
struct CampaignArgs {
    #[arg(long, default_value_t = 1_000_000.0)]
    budget: f64,
    #[arg(long, default_value = "conversion")]
    strategy: String,
    #[arg(long, default_value_t = 7.0)]
    creative_quality: f64,
    #[arg(long, default_value_t = 8.0)]
    targeting_precision: f64,
    #[arg(long, default_value_t = 75.0)]
    psychology_match: f64,
    #[arg(long)]
    json: bool,
}

impl CampaignArgs {
    fn to_input(&self, channel: Channel) -> Result<SimulationInput> {
        Ok(SimulationInput {
            budget: self.budget,
            channel,
            strategy: CampaignStrategy::parse(&self.strategy)?,
            creative_quality: self.creative_quality,
            targeting_precision: self.targeting_precision,
            psychology_match: self.psychology_match,
        })
    }
}

#[derive(Args, Debug, Clone)]
struct SimulateArgs {
    #[arg(long, default_value = "meta")]
    channel: String,
    #[command(flatten)]
    campaign: CampaignArgs,
}

#[derive(Args, Debug, Clone)]
struct CompareArgs {
    #[command(flatten)]
    campaign: CampaignArgs,
}

#[derive(Args, Debug, Clone)]
struct DiagnoseArgs {
    /// JSON file, or `-` for stdin.
    #[arg(long)]
    input: String,
    #[arg(long)]
    monthly_revenue: Option<f64>,
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug, Clone)]
struct IceArgs {
    /// JSON array of candidates, or `-` for stdin.
    #[arg(long)]
    input: String,
}

#[derive(Args, Debug, Clone)]
struct FetchArgs {
    #[command(subcommand)]
    target: FetchTarget,
}

#[derive(Subcommand, Debug, Clone)]
enum FetchTarget {
    Realtime {
        #[arg(long)]
        property_id: String,
    },
    Ads {
        #[arg(long)]
        account_id: String,
        #[arg(long, default_value_t = 7)]
        days: u32,
    },
}

#[derive(Args, Debug, Clone)]
struct CalibrateArgs {
    /// JSON array of finished campaigns.
    #[arg(long)]
    samples: String,
    /// Search for better base CTR/CVR and print the tuned tables.
    #[arg(long)]
    tune: bool,
}

#[derive(Args, Debug, Clone)]
struct InitConfigArgs {
    #[arg(long, default_value = "config/diagnostics.toml")]
    path: PathBuf,
    #[arg(long)]
    force: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    #[arg(long, default_value = "127.0.0.1")]
    host: String,
    #[arg(long, default_value_t = 8787)]
    port: u16,
}

#[tokio::main]
async fn main() {
    load_dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    if let Err(err) = run().await {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let (config, _) = DiagnosticsConfig::load(cli.config)?;
    let command = cli.command.unwrap_or(Command::Simulate(SimulateArgs {
        channel: "meta".to_string(),
        campaign: CampaignArgs {
            budget: 1_000_000.0,
            strategy: "conversion".to_string(),
            creative_quality: 7.0,
            targeting_precision: 8.0,
            psychology_match: 75.0,
            json: false,
        },
    }));

    match command {
        Command::Simulate(args) => run_simulate(args, &config),
        Command::Compare(args) => run_compare(args, &config),
        Command::Diagnose(args) => run_diagnose(args, &config),
        Command::Ice(args) => run_ice(args),
        Command::Fetch(args) => run_fetch(args, &config).await,
        Command::Calibrate(args) => run_calibrate(args, &config),
        Command::InitConfig(args) => run_init_config(args, &config),
        Command::Serve(args) => server::serve(args, config).await,
    }
}

fn run_simulate(args: SimulateArgs, config: &DiagnosticsConfig) -> Result<()> {
    let input = args.campaign.to_input(Channel::parse(&args.channel)?)?;
    let result = simulate_performance(&input, &config.simulation)?;

    if args.campaign.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    print_simulation(&result);
    println!(
        "Multipliers: strategy ctr x{} cvr x{} | creative x{} | targeting x{} | psychology x{}",
        format_float(result.multipliers.strategy_ctr, 2),
        format_float(result.multipliers.strategy_cvr, 2),
        format_float(result.multipliers.creative, 2),
        format_float(result.multipliers.targeting, 2),
        format_float(result.multipliers.psychology, 2)
    );
    Ok(())
}

fn run_compare(args: CompareArgs, config: &DiagnosticsConfig) -> Result<()> {
    let input = args.campaign.to_input(Channel::Meta)?;
    let results = compare_channels(&input, &config.simulation)?;

    if args.campaign.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    for (rank, result) in results.iter().enumerate() {
        println!(
            "{}. {:<10} ROAS {} | CTR {} | CVR {} | conversions {} | CPA {}",
            rank + 1,
            result.channel.label(),
            format_float(result.expected_roas, 2),
            format_percent(result.expected_ctr),
            format_percent(result.expected_cvr),
            format_number(result.expected_conversions as f64),
            format_number(result.expected_cpa)
        );
    }
    Ok(())
}

fn print_simulation(result: &SimulationResult) {
    println!(
        "{} / {} campaign, budget {}",
        result.channel.label(),
        result.strategy.label(),
        format_number(result.budget)
    );
    println!(
        "Expected CTR {} | CVR {}",
        format_percent(result.expected_ctr),
        format_percent(result.expected_cvr)
    );
    println!(
        "Impressions {} | clicks {} | conversions {}",
        format_number(result.expected_impressions as f64),
        format_number(result.expected_clicks as f64),
        format_number(result.expected_conversions as f64)
    );
    println!(
        "Revenue {} | ROAS {} | CPA {}",
        format_number(result.expected_revenue),
        format_float(result.expected_roas, 2),
        format_number(result.expected_cpa)
    );
    println!("Confidence: {}/100", result.confidence);
}

fn run_diagnose(args: DiagnoseArgs, config: &DiagnosticsConfig) -> Result<()> {
    let mut input: BrandDiagnosticInput = read_json(&args.input)?;
    if args.monthly_revenue.is_some() {
        input.monthly_revenue = args.monthly_revenue;
    }

    let report = diagnose(&input, config)?;
    info!(brand = %report.brand, overall = report.overall, "diagnosis finished");

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_report(&report);
    Ok(())
}

fn print_report(report: &DiagnosticReport) {
    println!(
        "{}: {}/100 ({})",
        report.brand,
        report.overall,
        report.grade.label()
    );

    println!("\nAreas:");
    for area in &report.areas {
        let subscores = area
            .result
            .subscores
            .iter()
            .map(|(name, score)| format!("{} {}", name, score))
            .collect::<Vec<_>>()
            .join(" | ");
        println!("  {:<12} {:>3}  {}", area.area.label(), area.health, subscores);
        for insight in &area.result.insights {
            println!("    - {}", insight);
        }
    }

    if !report.strategies.is_empty() {
        println!("\nStrategies:");
        for strategy in &report.strategies {
            let revenue = strategy
                .expected_revenue_impact
                .map(|value| format!(", ~{} revenue", format_number(value)))
                .unwrap_or_default();
            println!(
                "  [{}] {} ({}{})",
                strategy.priority.label(),
                strategy.title,
                strategy.expected_impact,
                revenue
            );
            for action in &strategy.action_items {
                println!("    - {}", action);
            }
        }
    }

    if !report.retargeting_segments.is_empty() {
        println!("\nRetargeting segments:");
        for segment in &report.retargeting_segments {
            println!(
                "  [{}] {} - {} users, ~{} revenue",
                segment.priority.label(),
                segment.name,
                format_number(segment.audience_size as f64),
                format_number(segment.expected_revenue)
            );
        }
    }
}

fn run_ice(args: IceArgs) -> Result<()> {
    let candidates: Vec<IceCandidate> = read_json(&args.input)?;
    let ranked = rank_by_ice(&candidates)?;
    for (rank, item) in ranked.iter().enumerate() {
        println!(
            "{}. [{}] {} - ICE {} ({} x {} x {})",
            rank + 1,
            item.priority.label(),
            item.name,
            item.score,
            item.impact,
            item.confidence,
            item.ease
        );
    }
    Ok(())
}

async fn run_fetch(args: FetchArgs, config: &DiagnosticsConfig) -> Result<()> {
    let source = build_data_source(&config.data_source)?;
    if source.is_mock() {
        eprintln!("Note: mock data source in use; figures are generated.");
    }

    match args.target {
        FetchTarget::Realtime { property_id } => {
            let snapshot = source.fetch_realtime(&property_id).await?;
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        }
        FetchTarget::Ads { account_id, days } => {
            let rows = source.fetch_ads_performance(&account_id, days).await?;
            let summary = AdsPerformanceSummary::from_days(&rows);
            println!(
                "{} days: spend {} | revenue {} | ROAS {} | CTR {} | CVR {} | CPA {}",
                summary.days,
                format_number(summary.spend),
                format_number(summary.revenue),
                format_float(summary.roas, 2),
                format_percent(summary.ctr),
                format_percent(summary.cvr),
                format_number(summary.cpa)
            );
        }
    }
    Ok(())
}

fn run_calibrate(args: CalibrateArgs, config: &DiagnosticsConfig) -> Result<()> {
    let samples: Vec<CalibrationSample> = read_json(&args.samples)?;
    if samples.is_empty() {
        bail!("no calibration samples in {}", args.samples);
    }

    let metrics = CalibrationRunner::new(samples.clone()).compute_metrics(&config.simulation)?;
    println!("Samples: {}", metrics.sample_count);
    println!(
        "MAE: CTR {}pp | CVR {}pp | ROAS {}",
        format_float(metrics.ctr_mae, 3),
        format_float(metrics.cvr_mae, 3),
        format_float(metrics.roas_mae, 3)
    );
    println!(
        "ROAS correlation {} | pairwise ranking accuracy {}",
        format_float(metrics.roas_correlation, 3),
        format_percent(metrics.pairwise_ranking_accuracy * 100.0)
    );

    if args.tune {
        let tuned = RateTuner::new(samples.clone()).tune(&config.simulation)?;
        let after = CalibrationRunner::new(samples).compute_metrics(&tuned)?;
        println!(
            "\nTuned MAE: CTR {}pp | CVR {}pp",
            format_float(after.ctr_mae, 3),
            format_float(after.cvr_mae, 3)
        );
        let mut tuned_config = config.clone();
        tuned_config.simulation = tuned;
        println!(
            "\n{}",
            toml::to_string_pretty(&tuned_config).context("failed to render tuned config")?
        );
    }
    Ok(())
}

fn run_init_config(args: InitConfigArgs, config: &DiagnosticsConfig) -> Result<()> {
    if args.path.exists() && !args.force {
        bail!("{} already exists (pass --force to overwrite)", args.path.display());
    }
    config.write(&args.path)?;
    println!("Wrote {}", args.path.display());
    Ok(())
}

fn read_json<T: DeserializeOwned>(source: &str) -> Result<T> {
    let contents = if source == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("failed reading stdin")?;
        buffer
    } else {
        std::fs::read_to_string(source).with_context(|| format!("failed to read {}", source))?
    };
    serde_json::from_str(&contents).with_context(|| format!("invalid JSON in {}", source))
}

fn load_dotenv() {
    let _ = dotenvy::dotenv();
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    let manifest_path = Path::new(manifest_dir).join(".env");
    let _ = dotenvy::from_path(manifest_path);
}
