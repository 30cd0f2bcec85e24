//! Tracing setup: structured logging with span definitions and event types.

pub mod events;
pub mod spans;

use sleuth_core::config::ObservabilityConfig;
use tracing_subscriber::EnvFilter;

/// Build the filter: `RUST_LOG` when set and valid, otherwise `config.log_level`.
pub fn build_filter(config: &ObservabilityConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level))
}

/// Install the global subscriber.
///
/// Returns `false` if a global subscriber was already installed, in which
/// case nothing changes. Safe to call from every test.
pub fn init_tracing(config: &ObservabilityConfig) -> bool {
    let filter = build_filter(config);
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    let installed = if config.json {
        builder
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .json()
            .try_init()
            .is_ok()
    } else {
        builder.try_init().is_ok()
    };

    if installed {
        tracing::debug!(level = %config.log_level, json = config.json, "tracing initialized");
    }
    installed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_init_is_a_noop() {
        let config = ObservabilityConfig::default();
        let _ = init_tracing(&config);
        assert!(!init_tracing(&config));
    }
}
