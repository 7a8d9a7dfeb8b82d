//! Subscriber installation and structured log helpers.
//!
//! Every line carries a `component` field so registry output can be
//! filtered the same way whether it is pretty-printed or JSON.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::{TelemetryConfig, TelemetryError};

/// Build the level filter from `config.log_level`.
///
/// `RUST_LOG` is only consulted through [`TelemetryConfig::from_env`], where
/// `FS_LOG_LEVEL` takes precedence.
pub fn build_filter(config: &TelemetryConfig) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_new(&config.log_level).map_err(|e| TelemetryError::Config(e.to_string()))
}

/// Install the global subscriber.
pub fn init_logging(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let env_filter = build_filter(config)?;

    let output = if !config.console_output {
        None
    } else if config.json_logs {
        // JSON output for containers/production
        Some(
            tracing_subscriber::fmt::layer()
                .json()
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true)
                .boxed(),
        )
    } else {
        // Pretty output for development
        Some(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_ansi(true)
                .boxed(),
        )
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(output)
        .try_init()
        .map_err(|e| TelemetryError::SubscriberInit(e.to_string()))?;

    tracing::info!(
        service = %config.full_service_name(),
        json_logs = config.json_logs,
        "Logging initialized"
    );

    Ok(())
}

/// Log with a `component` field.
#[macro_export]
macro_rules! log_event {
    ($level:ident, $component:expr, $msg:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            component = $component,
            $($($field)*,)?
            $msg
        )
    };
}

/// Log an airline-related event with standard fields.
#[macro_export]
macro_rules! log_airline_event {
    ($level:ident, $msg:expr, $airline_name:expr, $owner:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            component = "airlines",
            airline = %$airline_name,
            owner = %$owner,
            $($($field)*,)?
            $msg
        )
    };
}

/// Log a flight-related event with standard fields.
#[macro_export]
macro_rules! log_flight_event {
    ($level:ident, $msg:expr, $airline_name:expr, $flight_name:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            component = "flights",
            airline = %$airline_name,
            flight = %$flight_name,
            $($($field)*,)?
            $msg
        )
    };
}
