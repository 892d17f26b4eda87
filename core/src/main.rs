//! CLI entry point for the llama-bridge diagnostic tool.

use anyhow::{Context, Result};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use llama_bridge::cli::Cli;
use llama_bridge::config::{Config, ReportFormat};
use llama_bridge::init;
use llama_bridge::runtime::{DeviceEnumerator, NativeRegistry};

fn main() -> Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .init();

    let cli = Cli::parse_args();

    // Load optional config; command-line flags take precedence.
    let config = if let Some(config_path) = &cli.config {
        Config::from_yaml_file(config_path)
            .with_context(|| format!("Failed to load config: {}", config_path.display()))?
    } else {
        Config::default()
    };

    let format: ReportFormat = if cli.format == "text" && config.diagnostics.format != "text" {
        config.diagnostics.format.parse()?
    } else {
        cli.format.parse()?
    };
    let with_devices = config.diagnostics.devices && !cli.no_devices;

    // Bring up the runtime once; this also installs the log filter, so any
    // warnings or errors the runtime emits from here on are visible.
    info!("Initializing runtime facade");
    init::initialize();

    let backend = init::active_backend();
    let enumerator = DeviceEnumerator::new(NativeRegistry::new());
    let gpu = enumerator.supports_gpu_offload();

    let devices: Vec<serde_json::Value> = if with_devices {
        enumerator
            .iter()
            .map(|d| {
                serde_json::json!({
                    "index": d.index,
                    "name": d.name.to_string_lossy(),
                    "description": d.description.to_string_lossy(),
                })
            })
            .collect()
    } else {
        Vec::new()
    };

    match format {
        ReportFormat::Text => {
            println!("llama-bridge v{}", env!("CARGO_PKG_VERSION"));
            println!("Backend: {}", backend);
            println!("GPU offload: {}", if gpu { "YES" } else { "NO" });
            if with_devices {
                println!("Devices: {}", enumerator.count());
                for d in enumerator.iter() {
                    println!(
                        "  [{}] {} - {}",
                        d.index,
                        d.name.to_string_lossy(),
                        d.description.to_string_lossy()
                    );
                }
            }
        }
        ReportFormat::Json | ReportFormat::Pretty => {
            let report = serde_json::json!({
                "version": env!("CARGO_PKG_VERSION"),
                "backend": backend.name(),
                "gpu_offload": gpu,
                "device_count": enumerator.count(),
                "devices": devices,
            });
            if format == ReportFormat::Pretty {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}", serde_json::to_string(&report)?);
            }
        }
    }

    Ok(())
}
