//! Glowskill prospectus CLI
//!
//! Fetches revenue, KPIs and cost configuration from Xano, prints a summary and
//! writes CSV ledgers plus the self-contained HTML dashboard.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use gs_prospectus::config::{EndpointConfig, FileConfig};
use gs_prospectus::{CostMode, Scenario, XanoClient, html_report, load_dashboard, reports};

#[derive(Parser, Debug)]
#[command(name = "gs-prospectus")]
#[command(about = "Generate the Glowskill 24-month prospectus from Xano data")]
struct Args {
    /// Revenue scenario (conservative, realistic, optimistic)
    #[arg(short, long, default_value = "realistic")]
    scenario: Scenario,

    /// Cost aggregation for the summary and cost CSV (sum, average)
    #[arg(short, long, default_value = "sum")]
    mode: CostMode,

    /// Output directory for reports
    #[arg(short, long, default_value = "./output")]
    output: PathBuf,

    /// Optional config file with an [xano] section
    #[arg(short, long, env = "GS_CONFIG", default_value = "config.toml")]
    config: PathBuf,

    /// Xano API group base URL
    #[arg(long, env = "XANO_BASE")]
    base_url: Option<String>,

    /// Full revenue endpoint URL (overrides --base-url)
    #[arg(long, env = "XANO_REVENUE_URL")]
    revenue_url: Option<String>,

    /// Full KPI summary endpoint URL (overrides --base-url)
    #[arg(long, env = "XANO_KPI_URL")]
    kpi_url: Option<String>,

    /// Full cost configuration endpoint URL (overrides --base-url)
    #[arg(long, env = "XANO_COST_URL")]
    cost_url: Option<String>,

    /// Request timeout in seconds (default: none)
    #[arg(long, env = "XANO_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,

    /// Skip CSV output
    #[arg(long)]
    no_csv: bool,

    /// Skip the HTML dashboard
    #[arg(long)]
    no_html: bool,
}

impl Args {
    fn endpoint_overrides(&self) -> EndpointConfig {
        EndpointConfig {
            base: self.base_url.clone(),
            revenue_url: self.revenue_url.clone(),
            kpi_url: self.kpi_url.clone(),
            cost_url: self.cost_url.clone(),
            timeout_secs: self.timeout_secs,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    gs_prospectus::init_tracing();
    let args = Args::parse();

    let file_config = if args.config.exists() {
        FileConfig::load(&args.config)?
    } else {
        FileConfig::default()
    };
    let endpoints = args.endpoint_overrides().or(file_config.xano).resolve();

    println!("Glowskill Prospectus");
    println!("====================");
    println!("Scenario: {}", args.scenario.label());
    println!("Revenue:  {}", endpoints.revenue);
    println!("KPIs:     {}", endpoints.kpis);
    println!("Costs:    {}", endpoints.costs);
    println!();

    let client = XanoClient::new(endpoints)?;
    let snapshot = load_dashboard(&client, args.scenario).await;

    reports::print_summary(&snapshot, args.mode);

    if args.no_csv && args.no_html {
        return Ok(());
    }

    std::fs::create_dir_all(&args.output)
        .with_context(|| format!("Failed to create output directory: {}", args.output.display()))?;

    if !args.no_csv {
        for path in reports::generate_csv_reports(&args.output, &snapshot, args.mode)? {
            println!("  ✓ {}", path.display());
        }
    }

    if !args.no_html {
        let path = html_report::write_html_report(&args.output, &snapshot)?;
        println!("  ✓ {}", path.display());
    }

    Ok(())
}
