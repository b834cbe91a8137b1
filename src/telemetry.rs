//! Opt-in `tracing` setup for hosts embedding `gantt-rs`.
//!
//! The engine only emits events. Hosts that already run a subscriber need
//! nothing from here.

/// Environment variable read by [`init_default_tracing`].
pub const LOG_ENV_VAR: &str = "GANTT_RS_LOG";

/// Filter used when [`LOG_ENV_VAR`] is unset or unparseable.
pub const DEFAULT_FILTER: &str = "gantt_rs=info";

/// Installs a compact `fmt` subscriber filtered by [`LOG_ENV_VAR`].
///
/// Returns `false` when the `telemetry` feature is off or a global
/// subscriber is already installed.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        let directives = std::env::var(LOG_ENV_VAR).unwrap_or_else(|_| DEFAULT_FILTER.to_owned());
        init_tracing(&directives)
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}

/// Installs a compact `fmt` subscriber with explicit filter directives,
/// e.g. `"gantt_rs::api=debug"`. Invalid directives fall back to
/// [`DEFAULT_FILTER`].
#[must_use]
pub fn init_tracing(directives: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_new(directives)
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_FILTER));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok()
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = directives;
        false
    }
}

#[cfg(all(test, not(feature = "telemetry")))]
mod tests {
    use super::{init_default_tracing, init_tracing};

    #[test]
    fn without_the_feature_nothing_is_installed() {
        assert!(!init_default_tracing());
        assert!(!init_tracing("gantt_rs=trace"));
    }
}
