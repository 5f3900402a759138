//! fluidwatch CLI
//!
//! Command-line interface for the fluid scale:
//! - Watch the live dashboard
//! - Tare the scale
//! - Reset or set the container weight
//! - Check scale status

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fluidwatch::config::{generate_default_config, Config};
use fluidwatch::dashboard::controller::{reset_container_notice, tare_notice};
use fluidwatch::dashboard::units::format_weight;
use fluidwatch::{Dashboard, DisplayUnit, Poller, ScaleClient, ScaleConfig};

#[derive(Parser)]
#[command(name = "fluidwatch")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Terminal dashboard for a fluid-measurement scale")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Scale server URL (overrides config file)
    #[arg(long, global = true)]
    pub scale_url: Option<String>,

    /// Config file path (default: search standard locations)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Live dashboard: poll the scale once per second
    Watch {
        /// Display unit at startup (oz or g)
        #[arg(short, long)]
        unit: Option<String>,
        /// Poll interval in milliseconds
        #[arg(long)]
        interval_ms: Option<u64>,
    },

    /// Zero the scale
    Tare,

    /// Reset the container weight stored on the scale
    ResetContainer,

    /// Set the local container weight in grams (display only; the scale
    /// has no set-container endpoint)
    SetContainer {
        /// Container weight in grams
        grams: f64,
    },

    /// Fetch one reading and print it
    Status {
        /// Display unit (oz or g)
        #[arg(short, long)]
        unit: Option<String>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(url) = &cli.scale_url {
        config.scale.base_url = url.clone();
    }

    init_logging(&config);

    let client = ScaleClient::new(ScaleConfig {
        base_url: config.scale.base_url.clone(),
        request_timeout_ms: config.scale.request_timeout_ms,
    });

    match cli.command {
        Commands::Watch { unit, interval_ms } => {
            let unit = resolve_unit(unit.as_deref(), &config)?;
            let interval =
                Duration::from_millis(interval_ms.unwrap_or(config.dashboard.poll_interval_ms));
            let dashboard = Dashboard::new(
                unit,
                Duration::from_millis(config.dashboard.disconnect_notice_ms),
            );

            Poller::new(client, dashboard, interval).run().await;
        }

        Commands::Tare => {
            let notice = tare_notice(&client.tare().await);
            report(&notice);
        }

        Commands::ResetContainer => {
            let notice = reset_container_notice(&client.reset_container().await);
            report(&notice);
        }

        Commands::SetContainer { grams } => {
            // Mirrors the dashboard action: validated, local, never sent to
            // the scale.
            let mut dashboard = Dashboard::new(
                DisplayUnit::G,
                Duration::from_millis(config.dashboard.disconnect_notice_ms),
            );
            let notice = dashboard.set_container(grams);
            report(&notice);
        }

        Commands::Status { unit } => {
            let unit = resolve_unit(unit.as_deref(), &config)?;

            match client.measurements().await {
                Ok(m) => {
                    let label = unit.label();
                    println!("fluidwatch v{}", env!("CARGO_PKG_VERSION"));
                    println!();
                    println!("Scale: {} (connected)", client.config().base_url);
                    println!("As of: {}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S"));
                    println!();
                    println!("  Fluid weight:     {:>10} {}", format_weight(m.fluid(unit)), label);
                    println!("  Total weight:     {:>10} {}", format_weight(m.total(unit)), label);
                    println!(
                        "  Container weight: {:>10} {}",
                        format_weight(m.container(unit)),
                        label
                    );
                }
                Err(e) => {
                    eprintln!("Cannot reach scale at {}", client.config().base_url);
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            }
        }

        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)?;
                    println!("Config written to {:?}", path);
                }
                None => print!("{}", content),
            }
        }
    }

    Ok(())
}

fn init_logging(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| format!("fluidwatch={}", config.logging.level)),
    );

    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

fn resolve_unit(flag: Option<&str>, config: &Config) -> anyhow::Result<DisplayUnit> {
    match flag {
        Some(s) => DisplayUnit::parse(s)
            .ok_or_else(|| anyhow::anyhow!("Invalid unit {:?} (expected \"oz\" or \"g\")", s)),
        None => Ok(config.display.unit),
    }
}

fn report(notice: &fluidwatch::Notice) {
    if notice.is_error() {
        eprintln!("{}", notice.message);
        std::process::exit(1);
    }
    println!("{}", notice.message);
}
