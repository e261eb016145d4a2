/// Sets up `env_logger` with `crates` at `level`, unless `RUST_LOG` says otherwise:
///
/// ```sh
/// $> RUST_LOG=plantmorph=debug cargo run
/// ```
pub fn init_with_level(crates: &[&'static str], level: log::LevelFilter) {
    let filter = crates
        .iter()
        .map(|name| format!("{}={}", name, level.as_str().to_lowercase()))
        .collect::<Vec<_>>()
        .join(",");

    if std::env::var("RUST_LOG").is_err() {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&filter)).init();
    } else {
        env_logger::init();
    }
}

/// Info for debug builds, warnings only for release builds
pub fn init() {
    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Info
    } else {
        log::LevelFilter::Warn
    };
    init_with_level(&["plantmorph"], level);
}
