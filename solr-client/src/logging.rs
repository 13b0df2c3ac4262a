//! Tracing subscriber setup.

use std::env;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber.
///
/// The filter comes from `RUST_LOG` (default `info`). Setting
/// `LOG_FORMAT=json` switches to one JSON object per event.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if json_output(env::var("LOG_FORMAT").ok().as_deref()) {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn json_output(log_format: Option<&str>) -> bool {
    log_format.is_some_and(|format| format.trim().eq_ignore_ascii_case("json"))
}
