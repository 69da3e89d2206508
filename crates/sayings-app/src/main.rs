//! Main application entry point (native).

#[cfg(feature = "native")]
fn main() {
    env_logger::init();
    log::info!("Starting Sayings");

    let config = sayings_app::AppConfig::load_or_default(
        std::env::args_os().nth(1).map(std::path::PathBuf::from),
    );
    if let Err(e) = sayings_app::App::run(config) {
        log::error!("Event loop error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(not(feature = "native"))]
fn main() {
    panic!("Native feature not enabled. Use `cargo run --features native`");
}
