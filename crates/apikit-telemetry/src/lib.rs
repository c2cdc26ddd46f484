//! Logging for apikit services
//!
//! Initializes the `tracing` ecosystem with a JSON-line formatter and the
//! sinks selected by [`LogConfig`]: stdout, a log file, syslog over UDP, or
//! any combination. Intended to be called once at startup.

mod syslog;

use anyhow::Context;
use apikit_config::LogConfig;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{
    Layer, Registry, layer::SubscriberExt as _, util::SubscriberInitExt as _,
};

use crate::syslog::SyslogWriter;

/// Guard that flushes the non-blocking log writers on drop
///
/// Hold it for the lifetime of the application; dropping it early loses
/// buffered log lines.
#[derive(Default)]
pub struct LoggingGuard {
    worker_guards: Vec<WorkerGuard>,
}

impl LoggingGuard {
    fn add(&mut self, guard: WorkerGuard) {
        self.worker_guards.push(guard);
    }
}

/// Initialize JSON-line logging from configuration
///
/// One formatting layer is built per configured sink (file, syslog); when
/// neither is configured, stdout is used. The minimum severity comes from
/// the configuration's level directive.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened, the syslog socket
/// cannot be set up, or the logging subsystem was already initialized
pub fn init(config: &LogConfig) -> anyhow::Result<LoggingGuard> {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_new(config.level_directive())
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let mut layers = Vec::new();
    let mut guard = LoggingGuard::default();

    if let Some(path) = &config.logfile {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("failed to open log file {}", path.display()))?;
        let (writer, worker_guard) = tracing_appender::non_blocking(file);
        guard.add(worker_guard);
        layers.push(json_layer(writer));
    }

    if config.syslog {
        let writer = SyslogWriter::connect(&config.syslog_address())
            .with_context(|| format!("failed to set up syslog to {}", config.syslog_address()))?;
        let (writer, worker_guard) = tracing_appender::non_blocking(writer);
        guard.add(worker_guard);
        layers.push(json_layer(writer));
    }

    if layers.is_empty() {
        let (writer, worker_guard) = tracing_appender::non_blocking(std::io::stdout());
        guard.add(worker_guard);
        layers.push(json_layer(writer));
    }

    tracing_subscriber::registry()
        .with(layers.with_filter(filter))
        .try_init()
        .context("logging was already initialized")?;

    Ok(guard)
}

fn json_layer(writer: NonBlocking) -> Box<dyn Layer<Registry> + Send + Sync> {
    tracing_subscriber::fmt::layer()
        .json()
        .with_writer(writer)
        .with_target(true)
        .boxed()
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Read;

    // Logging init is process-global, so everything that needs an
    // initialized subscriber lives in this one test.
    #[test]
    fn file_sink_writes_json_lines_and_reinit_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("svc.log");

        let config = LogConfig {
            logfile: Some(path.clone()),
            level: Some("warn".to_owned()),
            ..LogConfig::default()
        };

        let guard = init(&config).unwrap();
        tracing::warn!("Test message");
        tracing::info!("filtered out");
        drop(guard);

        let mut raw = String::new();
        std::fs::File::open(&path).unwrap().read_to_string(&mut raw).unwrap();

        let lines: Vec<&str> = raw.lines().collect();
        assert_eq!(lines.len(), 1);

        let line: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(line["fields"]["message"], "Test message");
        assert_eq!(line["level"], "WARN");

        // Second init must refuse: the subscriber is process-wide
        assert!(init(&LogConfig::default()).is_err());
    }
}
