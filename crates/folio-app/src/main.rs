mod app_state;
mod cli;

use folio_config::schema::{FolioConfig, PointerMode};
use tracing_subscriber::EnvFilter;
use winit::event_loop::EventLoop;

use cli::{Args, PointerArg};

/// Load the config named on the command line, or the default one.
fn load_config(args: &Args) -> Result<FolioConfig, folio_common::ConfigError> {
    match &args.config {
        Some(path) => folio_config::load_config_from(path),
        None => folio_config::load_config(),
    }
}

/// Fold command-line overrides into the loaded config.
fn apply_overrides(config: &mut FolioConfig, args: &Args) {
    if args.no_3d {
        config.scene.enabled = false;
    }
    if let Some(pointer) = args.pointer {
        config.cursor.pointer = match pointer {
            PointerArg::Fine => PointerMode::Fine,
            PointerArg::Coarse => PointerMode::Coarse,
        };
    }
}

fn main() {
    let args = cli::parse();

    // Config is read before logging so its level can seed the filter;
    // the outcome is reported once the subscriber exists.
    let loaded = load_config(&args);

    let default_directive = match &loaded {
        Ok(config) => format!("folio={}", config.logging.level.as_directive()),
        Err(_) => "folio=info".to_string(),
    };
    let log_directive = args.log_level.clone().unwrap_or(default_directive);
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(
                log_directive
                    .parse()
                    .unwrap_or_else(|_| "folio=info".parse().unwrap()),
            ),
        )
        .init();

    tracing::info!("Folio v{} starting...", env!("CARGO_PKG_VERSION"));

    if let Some(ref path) = args.config {
        tracing::info!("Using config override: {}", path.display());
    }
    let mut config = loaded.unwrap_or_else(|e| {
        tracing::warn!("Config load failed, using defaults: {e}");
        FolioConfig::default()
    });
    apply_overrides(&mut config, &args);
    tracing::info!(
        scene = config.scene.enabled,
        cursor = config.cursor.enabled,
        pointer = ?config.cursor.pointer,
        "Config loaded"
    );

    if args.print_config {
        println!("{}", folio_config::config_to_json(&config));
        return;
    }

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            tracing::error!("Failed to create event loop: {e}");
            std::process::exit(1);
        }
    };
    let mut app = app_state::FolioApp::new(config);

    tracing::info!("Entering event loop");
    if let Err(e) = event_loop.run_app(&mut app) {
        tracing::error!("Event loop error: {e}");
    }
    tracing::info!("Shutdown complete");
}
