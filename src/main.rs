use anyhow::Result;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;
use vmstats::config::{AppConfig, OutputFormat, SourceKind};
use vmstats::introspector::RecordedIntrospector;
use vmstats::report::SnapshotReport;
use vmstats::sysinfo_repo::SysinfoIntrospector;
use vmstats::*;

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let app_config = AppConfig::load()?;
    tracing::info!(source = ?app_config.source.kind, "{} v{}", version::NAME, version::VERSION);

    let introspector: Arc<dyn RuntimeIntrospector> = match app_config.source.kind {
        SourceKind::Process => Arc::new(SysinfoIntrospector::new()?),
        SourceKind::Recording => {
            Arc::new(RecordedIntrospector::load(&app_config.source.recording_path)?)
        }
    };

    let mut collector = SnapshotCollector::new(introspector);
    if app_config.collector.warn_on_skipped {
        collector = collector.with_diagnostics(Arc::new(|d: &Diagnostic| match d {
            Diagnostic::PoolSkipped { pool, error } => {
                tracing::warn!(pool = %pool, error = %error, "Memory pool skipped");
            }
            Diagnostic::BufferPoolsUnavailable { error } => {
                tracing::warn!(error = %error, "Buffer pools unavailable");
            }
        }));
    }

    let snapshot = collector.collect();
    match app_config.output.format {
        OutputFormat::Json if app_config.output.pretty => {
            println!("{}", serde_json::to_string_pretty(&snapshot)?)
        }
        OutputFormat::Json => println!("{}", serde_json::to_string(&snapshot)?),
        OutputFormat::Text => println!("{}", SnapshotReport(&snapshot)),
    }

    Ok(())
}
