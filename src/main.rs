use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // WARN by default, RUST_LOG=study_tracker=debug for per-record logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    study_tracker::cli::run()
}
