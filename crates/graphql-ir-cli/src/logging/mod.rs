
use crate::Cli;

const DEFAULT_LOG_LEVEL: tracing::Level = tracing::Level::INFO;

/// How the process-wide subscriber should be set up.
///
/// Records always go to stderr: stdout is reserved for the IR JSON.
#[derive(Debug, PartialEq)]
pub(crate) struct LoggerSettings {
    pub(crate) level: tracing::Level,
    pub(crate) warnings: Vec<String>,
}
impl LoggerSettings {
    pub(crate) fn from_cli(cli: &Cli) -> Self {
        let env_level = std::env::var("LOG_LEVEL").ok();
        Self::resolve(cli.verbose, cli.quiet, env_level.as_deref())
    }

    /// Flags win over `LOG_LEVEL`; an unrecognized `LOG_LEVEL` falls back to
    /// the default level with a warning.
    pub(crate) fn resolve(verbose: u8, quiet: bool, env_level: Option<&str>) -> Self {
        let mut warnings = vec![];
        let level = match (verbose, quiet) {
            (0, true) => tracing::Level::WARN,
            (1, _) => tracing::Level::DEBUG,
            (2.., _) => tracing::Level::TRACE,
            (0, false) => match env_level.map(str::trim) {
                None | Some("") => DEFAULT_LOG_LEVEL,
                Some(level) => match level.to_ascii_lowercase().as_str() {
                    "trace" => tracing::Level::TRACE,
                    "debug" | "verbose" => tracing::Level::DEBUG,
                    "info" => tracing::Level::INFO,
                    "warn" => tracing::Level::WARN,
                    "error" => tracing::Level::ERROR,
                    _ => {
                        warnings.push(format!(
                            "Invalid `LOG_LEVEL` environment variable value: \
                            `{level}`"
                        ));
                        DEFAULT_LOG_LEVEL
                    },
                },
            },
        };
        Self { level, warnings }
    }

    /// Install the subscriber. Returns the warnings gathered while resolving
    /// the level so they can be logged through it.
    pub(crate) fn init(self) -> Vec<String> {
        tracing_subscriber::fmt()
            .with_max_level(self.level)
            .with_writer(std::io::stderr)
            .init();
        log::trace!("Logging level set to `{}`.", self.level);
        self.warnings
    }
}
