use std::env;
use std::path::PathBuf;

const DEFAULT_SYSLOG_PORT: u16 = 514;

/// Environment-driven logging configuration
///
/// Read once at startup from `LOGFILE`, `LOG_TO_SYSLOG`, `LOGHOST`,
/// `LOGLEVEL`, and `DEBUG`; consumed by `apikit-telemetry` to select the
/// output sinks and minimum severity of the JSON-line logger.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogConfig {
    /// File sink path (`LOGFILE`)
    pub logfile: Option<PathBuf>,
    /// Whether to emit to syslog over UDP (`LOG_TO_SYSLOG`)
    pub syslog: bool,
    /// Syslog destination as `host[:port]` (`LOGHOST`)
    pub loghost: Option<String>,
    /// Minimum severity as a tracing level string (`LOGLEVEL`)
    pub level: Option<String>,
    /// Force debug-level logging (`DEBUG`)
    pub debug: bool,
}

impl LogConfig {
    /// Read the configuration from the process environment
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            logfile: env::var("LOGFILE").ok().filter(|v| !v.is_empty()).map(PathBuf::from),
            syslog: env::var("LOG_TO_SYSLOG").is_ok_and(|v| is_truthy(&v)),
            loghost: env::var("LOGHOST").ok().filter(|v| !v.is_empty()),
            level: env::var("LOGLEVEL").ok().filter(|v| !v.is_empty()),
            debug: env::var("DEBUG").is_ok_and(|v| is_truthy(&v)),
        }
    }

    /// Effective filter directive: `DEBUG` wins over `LOGLEVEL`, which
    /// defaults to `info`
    #[must_use]
    pub fn level_directive(&self) -> &str {
        if self.debug {
            return "debug";
        }
        self.level.as_deref().unwrap_or("info")
    }

    /// Syslog destination with defaults applied (`localhost`, port 514)
    #[must_use]
    pub fn syslog_address(&self) -> String {
        let host = self.loghost.as_deref().unwrap_or("localhost");
        if host.contains(':') {
            host.to_owned()
        } else {
            format!("{host}:{DEFAULT_SYSLOG_PORT}")
        }
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(value.to_ascii_lowercase().as_str(), "1" | "true" | "yes")
}
