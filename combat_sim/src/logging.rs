//! Log filter setup

use tracing_subscriber::EnvFilter;

/// Level used when no directives are given
pub const DEFAULT_DIRECTIVES: &str = "info";

/// Build the filter from `RUST_LOG`-style directives
///
/// Given directives are used as they are, so a global level in them wins
/// over the default. Missing or unparsable directives fall back to
/// [`DEFAULT_DIRECTIVES`].
pub fn env_filter(directives: Option<&str>) -> EnvFilter {
    match directives.map(str::trim).filter(|d| !d.is_empty()) {
        Some(directives) => EnvFilter::try_new(directives).unwrap_or_else(|err| {
            eprintln!("ignoring invalid log directives {directives:?}: {err}");
            EnvFilter::new(DEFAULT_DIRECTIVES)
        }),
        None => EnvFilter::new(DEFAULT_DIRECTIVES),
    }
}
