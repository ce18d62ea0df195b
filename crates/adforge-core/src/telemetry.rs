//! Tracing setup for the `adforge` binary.
//!
//! Call [`init_tracing`] once at program start; the global subscriber can only
//! be set once per process, so later calls do nothing.

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Crates whose events follow the requested level; everything else (HTTP
/// client internals) stays at `warn`.
const ADFORGE_TARGETS: [&str; 3] = ["adforge", "adforge_core", "adforge_gen"];

/// Filter used when `RUST_LOG` is unset.
pub fn default_directives(level: Level) -> String {
    let mut directives = vec!["warn".to_string()];
    directives.extend(ADFORGE_TARGETS.iter().map(|t| format!("{t}={level}")));
    directives.join(",")
}

/// Install the global subscriber.
///
/// `json` switches to newline-delimited JSON. Output goes to stderr so CSV
/// written to stdout stays clean.
pub fn init_tracing(json: bool, level: Level) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(level)));

    let human = (!json).then(|| fmt::layer().with_target(false).with_writer(std::io::stderr));
    let structured = json.then(|| {
        fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr)
            .json()
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(human)
        .with(structured)
        .try_init()
        .ok();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_scopes_level_to_adforge() {
        assert_eq!(
            default_directives(Level::DEBUG),
            "warn,adforge=DEBUG,adforge_core=DEBUG,adforge_gen=DEBUG"
        );
    }

    #[test]
    fn init_twice_is_harmless() {
        init_tracing(false, Level::WARN);
        init_tracing(true, Level::DEBUG);
        tracing::info!(event = "test.noop");
    }
}
