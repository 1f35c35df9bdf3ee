use env_logger::{Builder, Env};

/// Installs the global logger. `filter` uses the `RUST_LOG` directive syntax.
pub fn init_logging(filter: &str) {
    let mut builder = Builder::from_env(Env::default().default_filter_or("info"));
    builder.parse_filters(filter).format_timestamp_millis();

    if let Err(e) = builder.try_init() {
        eprintln!("Logger already initialised: {}", e);
    }
}
