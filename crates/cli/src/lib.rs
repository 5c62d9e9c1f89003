//! CLI for the Migratory migration advisor.
//!
//! This crate is the adapter layer in front of the core: it parses
//! typed JSON input files, invokes the analyzer, cost model, and
//! benchmark harness, and renders the structured `ComparativeReport`
//! as JSON or markdown. The core never formats prose; all rendering
//! lives here.

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

mod input;
mod markdown;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use migratory_adapters::{HttpConnector, SimulatedStore};
use migratory_analysis::AnalyzerConfig;
use migratory_benchmarks::{Connector, RunConfig};
use migratory_core::{
    AnalysisReport, BenchmarkResult, ComparativeReport, CostEstimate, StoreKind, WorkloadProfile,
    WorkloadTemplate,
};
use migratory_pricing::PricingConstants;
use tracing::warn;

use input::AnalyzeInput;

/// Migratory CLI.
#[derive(Parser, Debug)]
#[command(name = "migratory")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,
}

/// Output rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Machine-readable JSON.
    Json,
    /// Human-readable markdown.
    Markdown,
}

/// Which store a single benchmark run targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StoreArg {
    /// The request-priced store being migrated away from.
    Source,
    /// The capacity-priced store being migrated to.
    Target,
}

impl From<StoreArg> for StoreKind {
    fn from(value: StoreArg) -> Self {
        match value {
            StoreArg::Source => StoreKind::Source,
            StoreArg::Target => StoreKind::Target,
        }
    }
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze declared operations and indexes for access anti-patterns.
    Analyze {
        /// JSON file with `operations` and `indexes` lists.
        #[arg(short, long)]
        input: PathBuf,

        /// Optional analyzer config JSON (thresholds, store limits).
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output format.
        #[arg(short, long, value_enum, default_value_t = Format::Json)]
        format: Format,
    },

    /// Estimate monthly cost for both stores from a workload profile.
    Estimate {
        /// Workload profile JSON file.
        #[arg(short, long)]
        profile: Option<PathBuf>,

        /// Named workload template to start from.
        #[arg(short, long)]
        template: Option<String>,

        /// Profile override JSON applied on top of the template.
        #[arg(short, long)]
        overrides: Option<PathBuf>,

        /// Pricing constants JSON overriding the built-in defaults.
        #[arg(long)]
        constants: Option<PathBuf>,

        /// Output format.
        #[arg(short, long, value_enum, default_value_t = Format::Json)]
        format: Format,
    },

    /// Drive one benchmark run against one store.
    Bench {
        /// Store label for the run.
        #[arg(short, long, value_enum)]
        store: StoreArg,

        /// Endpoint URL; omit to run against the built-in simulated store.
        #[arg(short, long)]
        endpoint: Option<String>,

        /// Run config JSON overriding the defaults.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output format.
        #[arg(short, long, value_enum, default_value_t = Format::Json)]
        format: Format,
    },

    /// Full pipeline: analyze, estimate, optionally benchmark, and
    /// merge everything into one comparative report.
    Report {
        /// JSON file with `operations` and `indexes` lists.
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Workload profile JSON file.
        #[arg(short, long)]
        profile: Option<PathBuf>,

        /// Named workload template to start from.
        #[arg(short, long)]
        template: Option<String>,

        /// Profile override JSON applied on top of the template.
        #[arg(short, long)]
        overrides: Option<PathBuf>,

        /// Pricing constants JSON overriding the built-in defaults.
        #[arg(long)]
        constants: Option<PathBuf>,

        /// Benchmark both stores against built-in simulated connectors.
        #[arg(long)]
        simulate: bool,

        /// Source store endpoint URL to benchmark.
        #[arg(long)]
        source_endpoint: Option<String>,

        /// Target store endpoint URL to benchmark.
        #[arg(long)]
        target_endpoint: Option<String>,

        /// Run config JSON used for both benchmark runs.
        #[arg(long)]
        run_config: Option<PathBuf>,

        /// Output format.
        #[arg(short, long, value_enum, default_value_t = Format::Markdown)]
        format: Format,
    },

    /// List the built-in workload templates.
    Templates,
}

/// Run the CLI with the given arguments.
pub async fn run() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Analyze {
            input,
            config,
            format,
        } => {
            let analyze_input: AnalyzeInput = input::read_json(&input)?;
            let config: AnalyzerConfig = match config {
                Some(path) => input::read_json(&path)?,
                None => AnalyzerConfig::default(),
            };
            let report = migratory_analysis::analyze(
                &analyze_input.operations,
                &analyze_input.indexes,
                &config,
            );
            match format {
                Format::Json => print_json(&report)?,
                Format::Markdown => println!("{}", markdown::render_analysis(&report)),
            }
            Ok(())
        }

        Commands::Estimate {
            profile,
            template,
            overrides,
            constants,
            format,
        } => {
            let profile = resolve_profile(profile, template, overrides)?;
            let constants = resolve_constants(constants)?;
            let estimates = estimate_both(&profile, &constants)?;
            match format {
                Format::Json => print_json(&estimates)?,
                Format::Markdown => println!("{}", markdown::render_estimates(&estimates)),
            }
            Ok(())
        }

        Commands::Bench {
            store,
            endpoint,
            config,
            format,
        } => {
            let run_config = resolve_run_config(config)?;
            let connector = make_connector(endpoint, store.into());
            let result = migratory_benchmarks::run(store.into(), connector, &run_config)
                .await
                .context("benchmark run failed")?;
            match format {
                Format::Json => print_json(&result)?,
                Format::Markdown => println!("{}", markdown::render_results(&[result])),
            }
            Ok(())
        }

        Commands::Report {
            input,
            profile,
            template,
            overrides,
            constants,
            simulate,
            source_endpoint,
            target_endpoint,
            run_config,
            format,
        } => {
            let analysis: Option<AnalysisReport> = match input {
                Some(path) => {
                    let analyze_input: AnalyzeInput = input::read_json(&path)?;
                    Some(migratory_analysis::analyze(
                        &analyze_input.operations,
                        &analyze_input.indexes,
                        &AnalyzerConfig::default(),
                    ))
                }
                None => None,
            };

            let estimates = if profile.is_some() || template.is_some() {
                let profile = resolve_profile(profile, template, overrides)?;
                estimate_both(&profile, &resolve_constants(constants)?)?
            } else {
                Vec::new()
            };

            let run_config = resolve_run_config(run_config)?;
            let mut targets: Vec<(StoreKind, Arc<dyn Connector>)> = Vec::new();
            if simulate {
                targets.push((StoreKind::Source, simulated_connector(StoreKind::Source)));
                targets.push((StoreKind::Target, simulated_connector(StoreKind::Target)));
            } else {
                if let Some(endpoint) = source_endpoint {
                    targets.push((StoreKind::Source, Arc::new(HttpConnector::new(endpoint))));
                }
                if let Some(endpoint) = target_endpoint {
                    targets.push((StoreKind::Target, Arc::new(HttpConnector::new(endpoint))));
                }
            }

            // Both runs share one config so their results compare
            // directly; one store failing never blocks the other.
            let mut results: Vec<BenchmarkResult> = Vec::new();
            for (store, connector) in targets {
                match migratory_benchmarks::run(store, connector, &run_config).await {
                    Ok(result) => results.push(result),
                    Err(err) => warn!(store = store.as_str(), %err, "benchmark run failed"),
                }
            }

            let report = ComparativeReport::build(analysis, &estimates, &results)
                .context("nothing to report: supply a profile, endpoints, or --simulate")?;
            match format {
                Format::Json => print_json(&report)?,
                Format::Markdown => println!("{}", markdown::render_report(&report)),
            }
            Ok(())
        }

        Commands::Templates => {
            for template in WorkloadTemplate::catalog() {
                println!("{:<20} {}", template.id, template.description);
            }
            Ok(())
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn resolve_profile(
    profile: Option<PathBuf>,
    template: Option<String>,
    overrides: Option<PathBuf>,
) -> anyhow::Result<WorkloadProfile> {
    let overrides = match overrides {
        Some(path) => input::read_json(&path)?,
        None => Default::default(),
    };
    let profile = match (profile, template) {
        (Some(path), _) => {
            let base: WorkloadProfile = input::read_json(&path)?;
            base.merged(&overrides)
        }
        (None, Some(id)) => WorkloadTemplate::by_id(&id)
            .with_context(|| format!("unknown template `{id}`"))?
            .resolve(&overrides),
        (None, None) => anyhow::bail!("supply --profile or --template"),
    };
    Ok(profile)
}

fn resolve_constants(constants: Option<PathBuf>) -> anyhow::Result<PricingConstants> {
    Ok(match constants {
        Some(path) => input::read_json(&path)?,
        None => PricingConstants::default(),
    })
}

fn resolve_run_config(config: Option<PathBuf>) -> anyhow::Result<RunConfig> {
    Ok(match config {
        Some(path) => input::read_json(&path)?,
        None => RunConfig::default(),
    })
}

fn estimate_both(
    profile: &WorkloadProfile,
    constants: &PricingConstants,
) -> anyhow::Result<Vec<CostEstimate>> {
    let source = migratory_pricing::estimate(profile, StoreKind::Source, constants)
        .context("invalid workload profile")?;
    let target = migratory_pricing::estimate(profile, StoreKind::Target, constants)
        .context("invalid workload profile")?;
    Ok(vec![source, target])
}

fn make_connector(endpoint: Option<String>, store: StoreKind) -> Arc<dyn Connector> {
    match endpoint {
        Some(url) => Arc::new(HttpConnector::new(url)),
        None => simulated_connector(store),
    }
}

/// Demo-flavored simulated stores: the source is slower and sheds load
/// under the default mix, the target is faster and never throttles.
fn simulated_connector(store: StoreKind) -> Arc<dyn Connector> {
    use migratory_adapters::{LatencyModel, ThrottlePolicy};
    use std::time::Duration;

    match store {
        StoreKind::Source => Arc::new(
            SimulatedStore::new(
                LatencyModel {
                    base: Duration::from_millis(8),
                    jitter: Duration::from_millis(6),
                },
                7,
            )
            .with_throttle(ThrottlePolicy::EveryNth { nth: 50 }),
        ),
        StoreKind::Target => Arc::new(SimulatedStore::new(
            LatencyModel {
                base: Duration::from_millis(2),
                jitter: Duration::from_millis(2),
            },
            7,
        )),
    }
}
