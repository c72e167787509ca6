//! CLI entrypoint for Quorum Ballot
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use quorum_application::{
    AuditLogger, BulkDeliveryUseCase, CompletionDetector, DeadlineScheduler, DecisionStore,
    DeliveryProgressNotifier, NoAuditLogger, NoDeliveryProgress, NotificationTransport,
    NotifyOutcomeUseCase,
};
use quorum_domain::{DecisionId, OutputFormat, StatisticsEngine};
use quorum_infrastructure::{
    ConfigLoader, FileConfig, InMemoryDecisionStore, JsonlAuditLogger, LogTransport,
    OutboxTransport, PlainSummaryRenderer, Snapshot, SnapshotRecipientResolver, TransportKind,
};
use quorum_presentation::{Cli, Command, ConsoleFormatter, ProgressReporter};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // === Configuration ===
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };
    config.validate().context("Invalid configuration")?;

    let _log_guard = init_logging(cli.verbose, &config)?;
    info!("Starting Quorum Ballot");

    if !config.output.color {
        colored::control::set_override(false);
    }
    let format = cli.output.or(config.output.format).unwrap_or_default();

    if cli.command == Command::ShowConfig {
        return show_config(&config, format);
    }

    // === Dependency Injection ===
    let app = App::build(&config, cli.quiet || format == OutputFormat::Json)?;

    match cli.command {
        Command::Stats { id } => {
            let id = DecisionId::new(id);
            let decision = app.store.get_decision(&id).await?;
            let votes = app.store.get_votes(&id).await?;
            let stats =
                StatisticsEngine::compute_outcome(&votes, &decision.voting_configuration()?);

            #[derive(Serialize)]
            struct StatsOutput<'a> {
                decision: &'a quorum_domain::Decision,
                statistics: &'a quorum_domain::AdvancedStatistics,
            }

            match format {
                OutputFormat::Text => {
                    println!("{}", ConsoleFormatter::format_statistics(&decision, &stats))
                }
                OutputFormat::Json => println!(
                    "{}",
                    ConsoleFormatter::format_json(&StatsOutput {
                        decision: &decision,
                        statistics: &stats,
                    })
                ),
            }
        }
        Command::Check { id } => {
            let report = app.detector.check_completion(&DecisionId::new(id)).await?;
            match format {
                OutputFormat::Text => println!("{}", ConsoleFormatter::format_completion(&report)),
                OutputFormat::Json => println!("{}", ConsoleFormatter::format_json(&report)),
            }
        }
        Command::Complete { id } => {
            let report = app.detector.manually_complete(&DecisionId::new(id)).await?;
            match format {
                OutputFormat::Text => println!("{}", ConsoleFormatter::format_completion(&report)),
                OutputFormat::Json => println!("{}", ConsoleFormatter::format_json(&report)),
            }
        }
        Command::Sweep => {
            let report = app.detector.check_expired_deadlines().await?;
            match format {
                OutputFormat::Text => print!("{}", ConsoleFormatter::format_sweep(&report)),
                OutputFormat::Json => println!("{}", ConsoleFormatter::format_json(&report)),
            }
        }
        Command::Watch { interval } => {
            let interval = interval
                .map(Duration::from_secs)
                .unwrap_or_else(|| config.scheduler.interval());

            let token = app.shutdown.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    info!("Interrupt received, stopping after the current sweep");
                    token.cancel();
                }
            });

            let sweeps = DeadlineScheduler::new(Arc::clone(&app.detector), interval)
                .run(app.shutdown.clone())
                .await;
            if format == OutputFormat::Text {
                println!("Stopped after {} sweep(s)", sweeps);
            }
        }
        // Handled before wiring
        Command::ShowConfig => {}
    }

    Ok(())
}

/// Wired application services
struct App {
    store: Arc<dyn DecisionStore>,
    detector: Arc<CompletionDetector>,
    /// Cancels in-flight deliveries and the watch loop
    shutdown: CancellationToken,
}

impl App {
    fn build(config: &FileConfig, quiet: bool) -> Result<Self> {
        let snapshot_path = &config.store.snapshot_path;
        let store: Arc<dyn DecisionStore> = if config.store.persist {
            Arc::new(
                InMemoryDecisionStore::open(snapshot_path)
                    .with_context(|| format!("Failed to open {}", snapshot_path.display()))?,
            )
        } else {
            Arc::new(InMemoryDecisionStore::from_snapshot(
                Snapshot::load_or_default(snapshot_path)
                    .with_context(|| format!("Failed to read {}", snapshot_path.display()))?,
            ))
        };

        let resolver = Arc::new(SnapshotRecipientResolver::from_file(snapshot_path)?);
        info!("{} member(s) in directory", resolver.member_count());

        let audit: Arc<dyn AuditLogger> = match &config.audit.path {
            Some(path) => match JsonlAuditLogger::new(path) {
                Some(logger) => Arc::new(logger),
                None => {
                    warn!("Audit logging disabled");
                    Arc::new(NoAuditLogger)
                }
            },
            None => Arc::new(NoAuditLogger),
        };

        let progress: Arc<dyn DeliveryProgressNotifier> = if quiet {
            Arc::new(NoDeliveryProgress)
        } else {
            Arc::new(ProgressReporter::new())
        };

        let shutdown = CancellationToken::new();
        let delivery = Arc::new(
            BulkDeliveryUseCase::new(
                build_transport(config)?,
                Arc::new(PlainSummaryRenderer::new(
                    config.notification.organization.clone(),
                )),
                resolver,
            )
            .with_audit_logger(Arc::clone(&audit)),
        );
        let notifier = NotifyOutcomeUseCase::new(delivery, config.delivery.to_options())
            .with_policy(config.acceptance.to_policy())
            .with_audit_logger(Arc::clone(&audit))
            .with_progress(progress)
            .with_cancellation(shutdown.clone());

        let detector = CompletionDetector::new(Arc::clone(&store))
            .with_notifier(Arc::new(notifier))
            .with_audit_logger(audit);

        Ok(Self {
            store,
            detector: Arc::new(detector),
            shutdown,
        })
    }
}

fn build_transport(config: &FileConfig) -> Result<Arc<dyn NotificationTransport>> {
    let transport = &config.transport;
    Ok(match transport.kind {
        TransportKind::Log => Arc::new(LogTransport::new()),
        TransportKind::Outbox => Arc::new(OutboxTransport::open(&transport.outbox_path)?),
        #[cfg(feature = "webhook")]
        TransportKind::Webhook => {
            let url = transport
                .webhook_url
                .clone()
                .ok_or_else(|| anyhow!("transport.webhook_url is not set"))?;
            Arc::new(quorum_infrastructure::WebhookTransport::new(
                url,
                Duration::from_secs(transport.webhook_timeout_secs),
            )?)
        }
        #[cfg(not(feature = "webhook"))]
        TransportKind::Webhook => {
            return Err(anyhow!(
                "Webhook transport requires building with the `webhook` feature"
            ));
        }
    })
}

/// Console logging from `-v`, plus daily rolling files when `[logging] directory` is set.
fn init_logging(verbose: u8, config: &FileConfig) -> Result<Option<WorkerGuard>> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };

    let console = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    let (file, guard) = match &config.logging.directory {
        Some(directory) => {
            std::fs::create_dir_all(directory)
                .with_context(|| format!("Failed to create {}", directory.display()))?;
            let appender =
                tracing_appender::rolling::daily(directory, &config.logging.file_prefix);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(level))
        .with(console)
        .with(file)
        .init();

    Ok(guard)
}

fn show_config(config: &FileConfig, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => {
            for line in ConfigLoader::config_sources() {
                println!("{}", line);
            }
            println!();
            println!("Effective configuration:");
            println!("{}", toml::to_string_pretty(config)?);
        }
        OutputFormat::Json => println!("{}", ConsoleFormatter::format_json(config)),
    }
    Ok(())
}
