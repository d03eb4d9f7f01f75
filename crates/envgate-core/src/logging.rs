use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::EnvFilter;

static LOGGING: OnceCell<()> = OnceCell::new();

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<Level> for LogLevel {
    fn from(level: Level) -> Self {
        match level {
            Level::ERROR => LogLevel::Error,
            Level::WARN => LogLevel::Warn,
            Level::INFO => LogLevel::Info,
            Level::DEBUG => LogLevel::Debug,
            _ => LogLevel::Trace,
        }
    }
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Trace => Level::TRACE,
        }
    }
}

impl LogLevel {
    /// Level used when no `--verbose` flag is given
    pub fn for_verbosity(verbose: bool) -> Self {
        if verbose {
            LogLevel::Debug
        } else {
            LogLevel::Warn
        }
    }
}

/// Initialize the global subscriber once. `RUST_LOG` directives are honoured
/// on top of the given level. Later calls are no-ops.
pub fn init_logging(level: LogLevel, verbose: bool) {
    let _ = LOGGING.get_or_init(|| {
        let tracing_level: Level = level.into();
        let builder = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env().add_directive(tracing_level.into()))
            .with_writer(std::io::stderr);

        let result = if verbose {
            builder
                .with_target(true)
                .with_ansi(true)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true)
                .with_span_events(FmtSpan::ACTIVE)
                .try_init()
        } else {
            builder
                .with_target(false)
                .with_ansi(false)
                .with_file(false)
                .with_line_number(false)
                .with_span_events(FmtSpan::NONE)
                .compact()
                .try_init()
        };

        // A subscriber installed by the host (or a test harness) takes precedence.
        let _ = result;
    });
}
