use gql_generator_config::log::{LogFormat, LoggingConfig};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan, time::UtcTime},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

use crate::error::CliError;

/// Logs go to stderr, so `--stdout` output stays clean.
pub fn configure_logging(config: &LoggingConfig) -> Result<(), CliError> {
    let timer = UtcTime::rfc_3339();
    let configured_filter = level_filter(&config.level)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or(configured_filter);

    let layer = match config.format {
        LogFormat::PrettyTree => tracing_tree::HierarchicalLayer::new(2)
            .with_writer(std::io::stderr)
            .with_bracketed_fields(true)
            .with_deferred_spans(false)
            .with_wraparound(25)
            .with_indent_lines(true)
            .with_timer(tracing_tree::time::Uptime::default())
            .with_thread_names(false)
            .with_thread_ids(false)
            .with_targets(false)
            .boxed(),
        LogFormat::Json => fmt::Layer::<Registry>::default()
            .json()
            .with_writer(std::io::stderr)
            .with_timer(timer)
            .with_span_events(FmtSpan::CLOSE)
            .boxed(),
        LogFormat::PrettyCompact => fmt::Layer::<Registry>::default()
            .compact()
            .with_writer(std::io::stderr)
            .with_timer(timer)
            .with_target(false)
            .boxed(),
    };

    let registry = tracing_subscriber::registry();
    let registry = registry.with(layer.boxed()).with(filter.boxed());
    registry.init();

    Ok(())
}

fn level_filter(level: &str) -> Result<EnvFilter, CliError> {
    EnvFilter::try_new(level).map_err(|source| CliError::InvalidLogLevel {
        level: level.to_string(),
        source,
    })
}
