use std::path::Path;

use droplist::{describe, AppError, ShowcaseApp, ShowcaseConfig};

/// Showcase entry point
fn main() {
    init_logging();

    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

/// Log everything the filter lets through; the scenario picks the level later.
fn init_logging() {
    let _ = env_logger::Builder::new()
        .filter_level(log::LevelFilter::Trace)
        .parse_default_env()
        .try_init();
    log::set_max_level(log::LevelFilter::Info);
}

fn run() -> Result<(), AppError> {
    // A path argument wins over the default scenario location
    let config = match std::env::args().nth(1) {
        Some(path) => ShowcaseConfig::load_from_path(Path::new(&path))?,
        None => ShowcaseConfig::load_from_default_path().unwrap_or_default(),
    };
    log::set_max_level(config.log_level.to_level_filter());

    let mut app = ShowcaseApp::new(&config);
    app.run(&config.steps)?;
    println!("{}", describe(&app.view()));
    app.shutdown();
    Ok(())
}
