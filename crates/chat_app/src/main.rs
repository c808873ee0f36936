use std::path::PathBuf;

use chat_app::platform::{self, config, logging};
use chat_logging::{chat_info, chat_warn};

fn main() -> anyhow::Result<()> {
    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(config::DEFAULT_CONFIG_FILENAME));

    let loaded = config::load_config(&path);
    let settings = match &loaded {
        Ok(Some(settings)) => settings.clone(),
        _ => config::ClientConfig::default(),
    };
    logging::initialize(settings.log_destination, settings.verbose);

    match loaded {
        Ok(Some(_)) => chat_info!("loaded config from {}", path.display()),
        Ok(None) => chat_info!("no config at {}; using defaults", path.display()),
        Err(err) => chat_warn!("{}; using defaults", err),
    }

    platform::run_app(settings)
}
