//! DreamTraffic CLI — campaign reporting, supply-path economics, VAST
//! generation, approval workflow, and simulated DSP trafficking over the
//! seeded demo campaign.

use clap::{Parser, Subcommand};
use dreamtraffic_approval::{review_creative, ApprovalWorkflow};
use dreamtraffic_core::types::PlacementType;
use dreamtraffic_core::{seed, AppConfig};
use dreamtraffic_dsp::TraffickingManager;
use dreamtraffic_metrics::{anomalous_paths, build_report};
use dreamtraffic_store::{MemoryStore, Repository};
use dreamtraffic_supply::{openrtb, ExchangeRouter, FeeStackCalculator, SspRegistry};
use dreamtraffic_vast::{InlineParams, VastGenerator, WrapperParams};
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "dreamtraffic")]
#[command(about = "AI creative to programmatic trafficking pipeline")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the seeded demo campaign and creative
    Init,

    /// Campaign report: DSP statuses, fee comparison, impression estimate
    Report {
        /// Assumed media CPM in dollars (overrides config)
        #[arg(long)]
        cpm: Option<f64>,
    },

    /// Fee stack breakdowns across all supply paths
    Fees {
        /// Aggregate per-DSP comparison instead of per-path breakdowns
        #[arg(long)]
        compare: bool,
    },

    /// List supply paths and flag anomalous fee stacks
    Paths,

    /// List registered SSPs and their capabilities
    Ssps,

    /// Generate a VAST 4.2 tag for a creative
    Vast {
        /// Creative id
        #[arg(long, default_value = "1")]
        creative: i64,

        /// Emit a Wrapper tag pointing at this URI instead of an InLine tag
        #[arg(long)]
        wrapper_uri: Option<String>,
    },

    /// Upload a creative to its target DSPs
    Traffic {
        /// Creative id
        #[arg(long, default_value = "1")]
        creative: i64,

        /// Comma-separated DSP keys (defaults to configured targets)
        #[arg(long, value_delimiter = ',')]
        dsps: Vec<String>,
    },

    /// Approval workflow operations
    Approve {
        #[command(subcommand)]
        action: ApproveAction,
    },

    /// Simulated exchange routing for a DSP
    Route {
        /// DSP key
        dsp: String,

        /// Placement: olv, stv, preroll
        #[arg(long, default_value = "olv")]
        placement: String,

        /// Also print a simulated OpenRTB bid request/response for the top route
        #[arg(long)]
        rtb: bool,
    },
}

#[derive(Subcommand)]
enum ApproveAction {
    /// Run compliance checks against DSP specs
    Check {
        #[arg(long, default_value = "1")]
        creative: i64,
    },

    /// Submit a creative for review
    Submit {
        #[arg(long, default_value = "1")]
        creative: i64,

        #[arg(long, default_value = "creative_director")]
        reviewer: String,
    },

    /// Approve a creative under review
    Approve {
        #[arg(long, default_value = "1")]
        creative: i64,

        #[arg(long, default_value = "compliance_reviewer")]
        reviewer: String,

        #[arg(long, default_value = "")]
        notes: String,
    },

    /// Send a creative back for revision
    Revise {
        #[arg(long, default_value = "1")]
        creative: i64,

        #[arg(long, default_value = "compliance_reviewer")]
        reviewer: String,

        #[arg(long, default_value = "")]
        notes: String,
    },

    /// Show the current approval status
    Status {
        #[arg(long, default_value = "1")]
        creative: i64,
    },

    /// Show the full approval audit trail
    Timeline {
        #[arg(long, default_value = "1")]
        creative: i64,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dreamtraffic=info".into()),
        )
        .init();

    let cli = Cli::parse();

    let config = AppConfig::load().unwrap_or_else(|e| {
        warn!(error = %e, "failed to load config, using defaults");
        AppConfig::default()
    });

    let store = Arc::new(MemoryStore::seeded());

    match cli.command {
        Commands::Init => cmd_init(&store),
        Commands::Report { cpm } => cmd_report(&config, &store, cpm)?,
        Commands::Fees { compare } => cmd_fees(&config, &store, compare),
        Commands::Paths => cmd_paths(&store),
        Commands::Ssps => cmd_ssps(),
        Commands::Vast {
            creative,
            wrapper_uri,
        } => cmd_vast(&config, &store, creative, wrapper_uri)?,
        Commands::Traffic { creative, dsps } => cmd_traffic(&config, store, creative, dsps)?,
        Commands::Approve { action } => cmd_approve(store, action)?,
        Commands::Route {
            dsp,
            placement,
            rtb,
        } => cmd_route(&config, &dsp, &placement, rtb)?,
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Campaign commands
// ---------------------------------------------------------------------------

fn cmd_init(store: &Arc<MemoryStore>) {
    let campaigns = store.campaigns();
    let creatives = store.creatives(None);

    println!("=== DreamTraffic Demo Pipeline ===");
    println!();
    for c in &campaigns {
        println!("  Campaign:   {} ({})", c.name, c.advertiser);
        println!("  Objective:  {}", c.objective);
        println!("  Budget:     ${:.0}", c.budget);
        println!(
            "  Flight:     {} to {}",
            c.flight_start.format("%Y-%m-%d"),
            c.flight_end.format("%Y-%m-%d")
        );
    }
    println!();
    for cr in &creatives {
        println!(
            "  Creative #{}: {} ({}s {}x{}, {})",
            cr.id, cr.name, cr.duration_seconds, cr.width, cr.height, cr.placement_type
        );
        println!("    Model:     {}", cr.model);
        println!("    Status:    {}", cr.approval_status);
        println!("    Vendors:   {}", cr.measurement_vendors.join(", "));
    }
    println!();
    println!(
        "  Supply paths: {}   DSP specs: {}",
        store.supply_paths().len(),
        store.dsp_specs().len()
    );
}

fn cmd_report(
    config: &AppConfig,
    store: &Arc<MemoryStore>,
    cpm: Option<f64>,
) -> anyhow::Result<()> {
    let campaign = store
        .campaigns()
        .into_iter()
        .next()
        .ok_or_else(|| anyhow::anyhow!("no campaign seeded"))?;
    let assumed_cpm = cpm.unwrap_or(config.fees.assumed_cpm);

    let report = build_report(
        &campaign,
        &seed::dsp_statuses(),
        &store.supply_paths(),
        &seed::measurement_vendors(),
        assumed_cpm,
    )?;

    println!("=== Campaign Report: {} ===", report.campaign_name);
    println!();
    println!("  Advertiser:        {}", report.advertiser);
    println!("  Budget:            ${:.0}", report.budget);
    println!(
        "  DSPs:              {} ({} approved)",
        report.dsp_count, report.approved_dsp_count
    );
    println!("  Supply paths:      {}", report.supply_path_count);
    println!(
        "  Est. impressions:  {:.1}M at ${:.2} CPM",
        report.estimated_impressions / 1_000_000.0,
        report.assumed_cpm
    );
    println!(
        "  Measurement CPM:   ${:.3}",
        report.total_measurement_cpm
    );
    println!();
    println!("  DSP Fee Comparison (cheapest first):");
    println!(
        "    {:<18} {:>6} {:>10} {:>12} {:>10}",
        "DSP", "Paths", "Avg Fee", "Avg Total", "Pub Net"
    );
    println!("    {}", "-".repeat(60));
    for row in &report.fee_comparison {
        println!(
            "    {:<18} {:>6} {:>9.1}% {:>11.2}% {:>9.1}%",
            row.dsp, row.path_count, row.avg_dsp_fee, row.avg_total_cost, row.avg_publisher_net
        );
    }
    if let Some(savings) = report.savings_vs_runner_up {
        println!();
        println!(
            "  Cheapest DSP saves {savings:.2} percentage points vs the runner-up"
        );
    }
    if let Some(net) = report.lowest_cost_dsp_avg_net {
        println!("  Publisher net on the cheapest DSP: {net:.1}%");
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Supply commands
// ---------------------------------------------------------------------------

fn cmd_fees(config: &AppConfig, store: &Arc<MemoryStore>, compare: bool) {
    let calc = FeeStackCalculator::new(&config.fees);
    let paths = store.supply_paths();

    if compare {
        println!("=== DSP Fee Comparison ===");
        println!();
        println!(
            "  {:<18} {:>6} {:>9} {:>11} {:>9} {:>10}",
            "DSP", "Paths", "DSP Fee", "Total Cost", "Pub Net", "Meas CPM"
        );
        println!("  {}", "-".repeat(68));
        let comparison = calc.compare_dsps(&paths);
        for row in &comparison {
            println!(
                "  {:<18} {:>6} {:>8.1}% {:>10.2}% {:>8.1}% {:>9.3}",
                row.dsp,
                row.path_count,
                row.avg_dsp_fee,
                row.avg_total_supply_cost,
                row.avg_publisher_net,
                row.avg_measurement_cpm
            );
        }
        if let [cheapest, runner_up, ..] = comparison.as_slice() {
            println!();
            println!(
                "  Lowest-cost DSP: {} ({:.2} points cheaper than {})",
                cheapest.dsp,
                runner_up.avg_total_supply_cost - cheapest.avg_total_supply_cost,
                runner_up.dsp
            );
        }
        println!();
        println!(
            "  Creative gen amortized at ${:.4}/CPM",
            calc.creative_cpm()
        );
    } else {
        for fb in calc.calculate_all(&paths) {
            println!("{}", calc.format_breakdown(&fb, config.fees.assumed_cpm));
        }
    }
}

fn cmd_paths(store: &Arc<MemoryStore>) {
    let paths = store.supply_paths();
    println!("=== Supply Paths ({}) ===", paths.len());
    println!();
    println!(
        "  {:<18} {:<14} {:<16} {:>8} {:>8} {:>8} {:>9}",
        "DSP", "Exchange", "SSP", "Fees", "Net", "Win", "Latency"
    );
    println!("  {}", "-".repeat(86));
    for p in &paths {
        let exchange = if p.exchange.is_empty() { "direct" } else { &p.exchange };
        let total = p.dsp_fee_pct + p.exchange_fee_pct + p.ssp_fee_pct;
        println!(
            "  {:<18} {:<14} {:<16} {:>7.1}% {:>7.1}% {:>7.0}% {:>7}ms",
            p.dsp,
            exchange,
            p.ssp,
            total,
            100.0 - total,
            p.win_rate * 100.0,
            p.latency_ms
        );
    }

    let anomalies = anomalous_paths(&paths);
    if !anomalies.is_empty() {
        println!();
        println!("  Anomalous paths (fees exceed 100%):");
        for p in anomalies {
            println!("    {} -> {} -> {}", p.dsp, p.exchange, p.ssp);
        }
    }
}

fn cmd_ssps() {
    println!("=== SSP Registry ===");
    println!();
    for ssp in SspRegistry::list_all() {
        let formats: Vec<String> = ssp.supported_formats.iter().map(|f| f.to_string()).collect();
        println!("  {} ({})", ssp.name, ssp.key);
        println!("    Take rate:   {:.1}%", ssp.take_rate_pct);
        println!("    Formats:     {}", formats.join(", "));
        println!("    OpenRTB:     {}", ssp.openrtb_version);
        println!(
            "    Pods:        {}   Header bidding: {}",
            yes_no(ssp.streaming_pod_support),
            yes_no(ssp.header_bidding)
        );
        println!();
    }
}

// ---------------------------------------------------------------------------
// VAST and trafficking commands
// ---------------------------------------------------------------------------

fn cmd_vast(
    config: &AppConfig,
    store: &Arc<MemoryStore>,
    creative_id: i64,
    wrapper_uri: Option<String>,
) -> anyhow::Result<()> {
    let creative = store.creative(creative_id)?;
    let generator = VastGenerator::new(&config.vast);

    let xml = match wrapper_uri {
        Some(uri) => generator.wrapper(&WrapperParams {
            vast_ad_tag_uri: uri,
            vendors: creative.measurement_vendors.clone(),
            ad_id: None,
        })?,
        None => generator.inline(&InlineParams {
            video_url: creative.video_url.clone(),
            duration_seconds: creative.duration_seconds,
            title: creative.name.clone(),
            advertiser: "Luma AI".to_string(),
            vendors: creative.measurement_vendors.clone(),
            width: creative.width,
            height: creative.height,
            bitrate_kbps: 4000,
            codec: creative.codec.clone(),
            ad_id: None,
        })?,
    };

    let hosted = format!("{}/inline/{}", config.vast.vast_base_url, creative_id);
    store.set_vast_url(creative_id, &hosted)?;
    info!(creative_id, vast_url = %hosted, "vast tag generated");

    println!("{xml}");
    Ok(())
}

fn cmd_traffic(
    config: &AppConfig,
    store: Arc<MemoryStore>,
    creative_id: i64,
    dsps: Vec<String>,
) -> anyhow::Result<()> {
    let campaign = store
        .campaigns()
        .into_iter()
        .next()
        .ok_or_else(|| anyhow::anyhow!("no campaign seeded"))?;
    let targets = if dsps.is_empty() {
        config.dsp.default_targets.clone()
    } else {
        dsps
    };

    let manager = TraffickingManager::new(store);
    let results = manager.traffic_creative(creative_id, &targets, &campaign.name)?;

    println!("=== Trafficking Results ===");
    println!();
    for r in &results {
        println!("  {} -> {}", r.dsp, r.creative_id);
        println!("    Asset:   {}", r.asset_id);
        println!("    Audit:   {}", r.audit_status);
        println!("    VAST:    {}", r.vast_url);
    }
    println!();
    println!("  {} of {} DSPs accepted the creative", results.len(), targets.len());
    Ok(())
}

// ---------------------------------------------------------------------------
// Approval commands
// ---------------------------------------------------------------------------

fn cmd_approve(store: Arc<MemoryStore>, action: ApproveAction) -> anyhow::Result<()> {
    match action {
        ApproveAction::Check { creative } => {
            let c = store.creative(creative)?;
            let report = review_creative(&c, &store.dsp_specs(), &seed::measurement_vendors());
            println!("=== Compliance Review: creative #{} ===", report.creative_id);
            println!();
            for check in &report.checks {
                let badge = match check.status {
                    dreamtraffic_core::types::CheckStatus::Pass => "PASS",
                    dreamtraffic_core::types::CheckStatus::Fail => "FAIL",
                };
                println!("  [{badge}] {:<28} {}", check.check, check.detail);
            }
            println!();
            println!(
                "  Overall: {}",
                if report.passed() { "PASS" } else { "FAIL" }
            );
        }
        ApproveAction::Submit { creative, reviewer } => {
            let workflow = ApprovalWorkflow::new(store);
            let event = workflow.submit_for_review(creative, &reviewer)?;
            println!(
                "Creative #{} moved {} -> {}",
                creative, event.from_status, event.to_status
            );
        }
        ApproveAction::Approve {
            creative,
            reviewer,
            notes,
        } => {
            let workflow = ApprovalWorkflow::new(store);
            let event = workflow.approve(creative, &reviewer, &notes)?;
            println!(
                "Creative #{} moved {} -> {}",
                creative, event.from_status, event.to_status
            );
        }
        ApproveAction::Revise {
            creative,
            reviewer,
            notes,
        } => {
            let workflow = ApprovalWorkflow::new(store);
            let event = workflow.request_revision(creative, &reviewer, &notes)?;
            println!(
                "Creative #{} moved {} -> {}",
                creative, event.from_status, event.to_status
            );
        }
        ApproveAction::Status { creative } => {
            let workflow = ApprovalWorkflow::new(store);
            println!("Creative #{}: {}", creative, workflow.status(creative)?);
        }
        ApproveAction::Timeline { creative } => {
            let workflow = ApprovalWorkflow::new(store);
            let trail = workflow.audit_trail(creative);
            println!("=== Approval Timeline: creative #{creative} ===");
            println!();
            for event in &trail {
                println!(
                    "  {}  {} -> {}  ({})",
                    event.timestamp.format("%Y-%m-%d %H:%M"),
                    event.from_status,
                    event.to_status,
                    event.reviewer
                );
                if !event.notes.is_empty() {
                    println!("      {}", event.notes);
                }
            }
            if trail.is_empty() {
                println!("  No approval events recorded.");
            }
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Exchange commands
// ---------------------------------------------------------------------------

fn cmd_route(config: &AppConfig, dsp: &str, placement: &str, rtb: bool) -> anyhow::Result<()> {
    let placement = parse_placement(placement)?;
    let router = ExchangeRouter::new(&config.exchange);
    let routes = router.route(dsp, placement);

    println!("=== Exchange Routing: {dsp} ({placement}) ===");
    println!();
    if routes.is_empty() {
        println!("  No eligible routes.");
        return Ok(());
    }
    println!(
        "  {:<16} {:<18} {:>7} {:>9} {:>8} {:>6}",
        "SSP", "T-Group", "Score", "Latency", "Win", "Fee"
    );
    println!("  {}", "-".repeat(70));
    for r in &routes {
        println!(
            "  {:<16} {:<18} {:>7.3} {:>7}ms {:>7.0}% {:>5.1}%",
            r.ssp,
            r.t_group,
            r.smartswitch_score,
            r.estimated_latency_ms,
            r.estimated_win_rate * 100.0,
            r.fee_pct
        );
    }

    if rtb {
        // Demonstrate the OpenRTB exchange for the best-scoring route.
        let best = &routes[0];
        let request = openrtb::simulate_bid_request(&best.ssp, "dt-demo-creative")?;
        let response = openrtb::simulate_bid_response(
            &best.ssp,
            "dt-demo-creative",
            "https://vast.dreamtraffic.demo/inline/1",
        );
        println!();
        println!("  Bid request ({}):", best.ssp);
        println!("{}", serde_json::to_string_pretty(&request)?);
        println!();
        println!("  Bid response:");
        println!("{}", serde_json::to_string_pretty(&response)?);
    }
    Ok(())
}

fn parse_placement(s: &str) -> anyhow::Result<PlacementType> {
    match s.to_lowercase().as_str() {
        "olv" => Ok(PlacementType::Olv),
        "stv" | "ctv" => Ok(PlacementType::Stv),
        "preroll" => Ok(PlacementType::Preroll),
        other => anyhow::bail!("unknown placement '{other}' (expected olv, stv, or preroll)"),
    }
}

fn yes_no(b: bool) -> &'static str {
    if b {
        "yes"
    } else {
        "no"
    }
}
