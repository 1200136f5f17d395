use std::sync::Once;

use tracing_subscriber::{filter::Directive, fmt, EnvFilter};

static TRACING_INIT: Once = Once::new();

const DEFAULT_DIRECTIVES: [&str; 3] = [
    "budget_tracker=info",
    "tracker_core=info",
    "tracker_storage_json=info",
];

/// Initializes the global tracing subscriber. Logs go to stderr so shell output stays clean.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let env = std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_default();
        let _ = fmt()
            .with_env_filter(build_filter(&env))
            .with_writer(std::io::stderr)
            .try_init();
    });
}

/// An empty `RUST_LOG` enables `info` for every workspace crate; otherwise
/// the given directives are used as-is.
pub(crate) fn build_filter(env: &str) -> EnvFilter {
    if !env.trim().is_empty() {
        return EnvFilter::new(env);
    }
    DEFAULT_DIRECTIVES
        .iter()
        .filter_map(|raw| raw.parse::<Directive>().ok())
        .fold(EnvFilter::new(""), EnvFilter::add_directive)
}

#[cfg(test)]
mod tests {
    use tracing::Level;
    use tracing_subscriber::fmt;

    use super::build_filter;

    fn enabled_with(env: &str, check: impl Fn() -> bool) -> bool {
        let subscriber = fmt()
            .with_env_filter(build_filter(env))
            .with_writer(std::io::sink)
            .finish();
        tracing::subscriber::with_default(subscriber, check)
    }

    #[test]
    fn default_filter_keeps_workspace_warnings() {
        assert!(enabled_with("", || tracing::enabled!(
            target: "tracker_storage_json",
            Level::WARN
        )));
        assert!(enabled_with("", || tracing::enabled!(
            target: "tracker_core::time",
            Level::WARN
        )));
        assert!(enabled_with("", || tracing::enabled!(
            target: "budget_tracker::session",
            Level::INFO
        )));
    }

    #[test]
    fn default_filter_hides_debug_events() {
        assert!(!enabled_with("", || tracing::enabled!(
            target: "tracker_core::store",
            Level::DEBUG
        )));
    }

    #[test]
    fn explicit_directives_replace_the_defaults() {
        assert!(enabled_with("tracker_core=debug", || tracing::enabled!(
            target: "tracker_core::store",
            Level::DEBUG
        )));
        assert!(!enabled_with("tracker_core=debug", || tracing::enabled!(
            target: "tracker_storage_json",
            Level::WARN
        )));
    }
}
