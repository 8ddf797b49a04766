//! Subscriber setup: JSON lines (or plain text) to the log file, level from RUST_LOG or
//! the configured default.

use crate::config::LogConfig;
use std::fs::OpenOptions;
use std::io;
use std::sync::Mutex;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

pub struct StructuredLogger;

impl StructuredLogger {
    /// Install the global subscriber. The live chart owns stdout, so records go to
    /// `config.file` (parent directories created) or to stderr when no file is set.
    pub fn init(config: &LogConfig) -> io::Result<()> {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));
        match &config.file {
            Some(path) => {
                if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
                    std::fs::create_dir_all(dir)?;
                }
                let file = OpenOptions::new().create(true).append(true).open(path)?;
                Self::install(filter, config.json, false, Mutex::new(file))
            }
            None => Self::install(filter, config.json, true, io::stderr),
        }
    }

    fn install<W>(filter: EnvFilter, json: bool, ansi: bool, writer: W) -> io::Result<()>
    where
        W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
    {
        let result = if json {
            let fmt = tracing_subscriber::fmt::layer()
                .json()
                .with_span_events(FmtSpan::NONE)
                .with_writer(writer);
            tracing_subscriber::registry().with(filter).with(fmt).try_init()
        } else {
            let fmt = tracing_subscriber::fmt::layer()
                .with_ansi(ansi)
                .with_writer(writer);
            tracing_subscriber::registry().with(filter).with(fmt).try_init()
        };
        result.map_err(|e| io::Error::new(io::ErrorKind::Other, e))
    }
}
