use tracing_subscriber::EnvFilter;

/// Workspace crates whose events are shown.
const CRATE_TARGETS: &[&str] = &[
    "hwmid",
    "hwmid_calendar",
    "hwmid_climatology",
    "hwmid_events",
    "hwmid_io",
    "hwmid_pipeline",
    "hwmid_stats",
];

/// `-v` count to level: none -> warn, -v -> info, -vv -> debug, more -> trace.
fn level_for(verbosity: u8) -> &'static str {
    ["warn", "info", "debug", "trace"][usize::from(verbosity.min(3))]
}

fn default_directives(verbosity: u8) -> String {
    let level = level_for(verbosity);
    CRATE_TARGETS
        .iter()
        .map(|t| format!("{t}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Install the stderr subscriber. `RUST_LOG`, when set, wins over `-v`.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbosity)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbosity >= 2)
        .init();
}
