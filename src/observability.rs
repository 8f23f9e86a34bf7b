//! This module provides observability and diagnostics for the table engine.
//!
//! Library code only talks to the `log` facade. The `log_metric!` macro renders
//! structured key-value records at debug level under the `strata::metrics`
//! target; `enable_verbose_logging` is the opt-in switch that installs an
//! `env_logger` backend for hosts that don't bring their own.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Once;

use log::LevelFilter;

use crate::error::StrataError;

/// Logs a structured key-value metric record at debug level.
///
/// # Example
/// ```
/// use strata::log_metric;
/// let rows = 4;
/// log_metric!("event" = "filter", "rows_in" = rows, "rows_out" = 2);
/// ```
#[macro_export]
macro_rules! log_metric {
    ($($key:literal = $value:expr),+ $(,)?) => {
        if $crate::__log::log_enabled!(target: "strata::metrics", $crate::__log::Level::Debug) {
            // Collect each pair as a JSON string fragment
            let mut parts = Vec::new();
            $(
                parts.push(format!("\"{}\": \"{}\"", $key, $value));
            )+
            $crate::__log::debug!(target: "strata::metrics", "STRATA_METRIC: {{ {} }}", parts.join(", "));
        }
    };
}

static INIT_LOGGER: Once = Once::new();

/// Installs an `env_logger` backend at Info level, once per process. The
/// `strata::metrics` target is let through at Debug so `log_metric!` records show.
///
/// With `log_file` set, records are appended to that file instead of stderr.
/// Later calls are no-ops, as is the first call when the host already installed
/// a logger.
pub fn enable_verbose_logging(log_file: Option<&Path>) -> Result<(), StrataError> {
    let target = match log_file {
        Some(path) => Some(OpenOptions::new().append(true).create(true).open(path)?),
        None => None,
    };

    INIT_LOGGER.call_once(|| {
        let mut builder = env_logger::Builder::new();

        builder.is_test(false);
        builder.filter_level(LevelFilter::Info);
        builder.filter_module("strata::metrics", LevelFilter::Debug);

        // Custom formatter: just print the level and message
        builder.format(|buf, record| {
            use std::io::Write;
            writeln!(buf, "[{}] {}", record.level(), record.args())?;
            buf.flush()?;
            Ok(())
        });

        if let Some(file) = target {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }

        let _ = builder.try_init();
    });
    Ok(())
}
