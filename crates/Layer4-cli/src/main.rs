//! Pluggable CLI - Main entry point

mod demo;

use anyhow::Context;
use clap::{Parser, Subcommand};
use pluggable_core::{
    ActivationManager, EventBus, EventKind, PluginManifest, RuntimeConfig, RuntimeEvent,
};
use pluggable_foundation::{PresetMode, RuntimeSettings};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// 이벤트 브로드캐스트 채널 크기
const EVENT_CHANNEL_CAPACITY: usize = 1024;

/// Pluggable - activation points and extension points for plugin hosts
#[derive(Parser, Debug)]
#[command(name = "pluggable")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// JSON file with a list of plugin manifests (defaults to the built-in demo plugins)
    #[arg(short, long, global = true)]
    manifests: Option<PathBuf>,

    /// Activation argument mode (resolved_points, live_registry, nothing)
    #[arg(long, global = true)]
    preset: Option<PresetMode>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List registered activation records
    Records {
        /// Print records as JSON
        #[arg(long)]
        json: bool,
    },
    /// Trigger a single activation point
    Trigger {
        /// Activation point name
        point: String,
    },
    /// Run the startup activation points, then execute an extension point
    Execute {
        /// Extension point name
        point: String,

        /// JSON value passed to the handlers
        #[arg(short, long, default_value = "null")]
        input: String,

        /// Thread the value through the handlers one at a time
        #[arg(long)]
        serial: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.debug { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    // Load configuration
    let mut settings = RuntimeSettings::load().unwrap_or_else(|e| {
        tracing::warn!("Failed to load settings: {}", e);
        RuntimeSettings::default()
    });
    if let Some(preset) = args.preset {
        settings = settings.with_preset_mode(preset);
    }

    let manifest_file = args.manifests.or_else(|| settings.manifest_file.clone());
    let manifests = load_manifests(manifest_file.as_deref())?;
    let manager = build_runtime(&settings, &manifests)?;

    match args.command {
        Command::Records { json } => records_cmd(&manager, json),
        Command::Trigger { point } => trigger_cmd(&manager, &point).await,
        Command::Execute {
            point,
            input,
            serial,
        } => execute_cmd(&manager, &settings, &point, &input, serial).await,
    }
}

/// 매니페스트 로드 (파일이 없으면 demo 플러그인)
fn load_manifests(path: Option<&Path>) -> anyhow::Result<Vec<PluginManifest>> {
    let Some(path) = path else {
        return Ok(demo::manifests());
    };

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read manifests from {}", path.display()))?;
    let manifests = PluginManifest::parse_list(&content)
        .with_context(|| format!("Invalid manifest list in {}", path.display()))?;

    tracing::info!("Loaded {} manifest(s) from {}", manifests.len(), path.display());
    Ok(manifests)
}

/// 설정에 맞춰 매니저 구성 후 활성 매니페스트 등록
fn build_runtime(
    settings: &RuntimeSettings,
    manifests: &[PluginManifest],
) -> anyhow::Result<ActivationManager> {
    let event_bus = Arc::new(EventBus::with_capacity(
        EVENT_CHANNEL_CAPACITY,
        settings.history_size(),
    ));
    tokio::spawn(log_events(event_bus.subscribe()));
    let manager = ActivationManager::new().with_event_bus(event_bus);

    manager.setup(RuntimeConfig::from_settings(
        Arc::new(demo::importer()),
        settings,
    ));

    let registered = manager.register_active(manifests)?;
    tracing::debug!("{} active plugin(s) registered", registered);

    Ok(manager)
}

/// 런타임 이벤트를 debug 로그로 출력
async fn log_events(mut events: broadcast::Receiver<RuntimeEvent>) {
    loop {
        match events.recv().await {
            Ok(event) => tracing::debug!("[{}] {} {}", event.source, event.kind, event.data),
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                tracing::debug!("Event log lagged, {} event(s) skipped", skipped);
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}

/// 이벤트 히스토리의 활성화 실패를 한 줄씩 요약
fn failure_lines(event_bus: &EventBus) -> Vec<String> {
    event_bus
        .history_by_kind(EventKind::ActivationFailed)
        .iter()
        .map(|event| {
            format!(
                "✗ {} failed on '{}': {}",
                event.data["plugin"].as_str().unwrap_or("?"),
                event.data["activation_point"].as_str().unwrap_or("?"),
                event.data["error"].as_str().unwrap_or("unknown error")
            )
        })
        .collect()
}

fn report_failures(manager: &ActivationManager) {
    for line in failure_lines(manager.event_bus()) {
        eprintln!("{}", line);
    }
}

/// List activation records
fn records_cmd(manager: &ActivationManager, json: bool) -> anyhow::Result<()> {
    let records = manager.records();

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    if records.is_empty() {
        println!("No activation records.");
        return Ok(());
    }

    println!(
        "{:<16} {:<24} {:<16} {:<9}",
        "Plugin", "Url", "Point", "Activated"
    );
    println!("{}", "-".repeat(68));
    for record in records {
        println!(
            "{:<16} {:<24} {:<16} {:<9}",
            record.plugin, record.url, record.activation_point, record.activated
        );
    }

    Ok(())
}

/// Trigger one activation point and summarize what it published
async fn trigger_cmd(manager: &ActivationManager, point: &str) -> anyhow::Result<()> {
    let invoked = match manager.trigger(point).await {
        Ok(invoked) => invoked,
        Err(e) => {
            report_failures(manager);
            return Err(e.into());
        }
    };
    println!("✓ {} plugin(s) activated on '{}'", invoked, point);

    let names = manager.extensions().names();
    if !names.is_empty() {
        println!("Extension points: {}", names.join(", "));
    }

    Ok(())
}

/// Run startup points, then execute an extension point
async fn execute_cmd(
    manager: &ActivationManager,
    settings: &RuntimeSettings,
    point: &str,
    input: &str,
    serial: bool,
) -> anyhow::Result<()> {
    let input: Value =
        serde_json::from_str(input).with_context(|| format!("Invalid JSON input: {}", input))?;

    for startup in settings.startup_points() {
        if let Err(e) = manager.trigger(&startup).await {
            report_failures(manager);
            return Err(e)
                .with_context(|| format!("Startup activation point '{}' failed", startup));
        }
    }

    let extensions = manager.extensions();
    if serial {
        let result = extensions.execute_serial(point, input).await?;
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        for output in extensions.execute(point, input).await? {
            println!("{:<16} {}", output.handler, output.value);
        }
    }

    Ok(())
}


