use crate::cli::Cli;
use crate::error::{CliError, Result};
use std::fs::File;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::Subscriber;
use tracing_subscriber::{
    Layer,
    filter::{LevelFilter, Targets},
    fmt,
    prelude::*,
    registry::LookupSpan,
};

/// Environment variable whose target directives (`lewisviz=trace,warn`)
/// replace the console filter chosen by `-v` and `-q`.
pub const LOG_ENV: &str = "LEWIS_LOG";

/// Targets that follow the verbosity flags; everything else stays at warnings.
const OWN_TARGETS: [&str; 2] = ["lewis", "lewisviz"];

/// A log file records at least this much, whatever the console shows.
const FILE_LEVEL_FLOOR: LevelFilter = LevelFilter::DEBUG;

/// Where the CLI logs to and how much.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogOptions {
    pub verbosity: u8,
    pub quiet: bool,
    pub file: Option<PathBuf>,
}

impl LogOptions {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            verbosity: cli.verbose,
            quiet: cli.quiet,
            file: cli.log_file.clone(),
        }
    }

    /// `-q` keeps errors only; each `-v` adds one level above warnings.
    pub fn console_level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::ERROR;
        }
        match self.verbosity {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    }

    pub fn file_level(&self) -> LevelFilter {
        self.console_level().max(FILE_LEVEL_FLOOR)
    }

    /// Installs the global subscriber: a compact stderr layer, plus a plain
    /// text layer when a log file was requested.
    pub fn init(&self) -> Result<()> {
        let console = self.console_targets(std::env::var(LOG_ENV).ok().as_deref())?;
        let file_layer = match &self.file {
            Some(path) => Some(self.file_layer(File::create(path)?)),
            None => None,
        };

        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(std::io::stderr().is_terminal())
                    .with_target(false)
                    .compact()
                    .with_filter(console),
            )
            .with(file_layer)
            .try_init()
            .map_err(|e| CliError::Other(anyhow::anyhow!(e)))
    }

    fn console_targets(&self, env_override: Option<&str>) -> Result<Targets> {
        match env_override.map(str::trim).filter(|s| !s.is_empty()) {
            Some(directives) => directives.parse().map_err(|e| {
                CliError::Config(format!("Invalid {} value '{}': {}", LOG_ENV, directives, e))
            }),
            None => Ok(targets_at(self.console_level())),
        }
    }

    fn file_layer<S>(&self, file: File) -> impl Layer<S> + use<S>
    where
        S: Subscriber + for<'a> LookupSpan<'a>,
    {
        fmt::layer()
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .with_thread_ids(true)
            .with_target(true)
            .with_filter(targets_at(self.file_level()))
    }
}

fn targets_at(level: LevelFilter) -> Targets {
    let mut targets = Targets::new().with_default(level.min(LevelFilter::WARN));
    for target in OWN_TARGETS {
        targets = targets.with_target(target, level);
    }
    targets
}
