#![expect(missing_docs, reason = "example")]

use pipelog::{Config, Logger, Severities};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;
    pipelog::set_default(Logger::builder().config(&config).build())?;
    pipelog::init_log_bridge(pipelog::default_logger())?;

    pipelog::info!("Listen on ", "0.0.0.0:9000");
    handle("/");
    handle("/favicon.ico");

    // Records of the `log` facade end up in the same sink.
    log::warn!("cache miss for {}", "/favicon.ico");

    pipelog::set_allowed_severities(Severities::ERROR | Severities::FATAL);
    pipelog::info!("filtered out");
    pipelog::fatal!("not actually fatal");

    pipelog::flush();
    Ok(())
}

fn handle(path: &str) {
    pipelog::info!("Incoming request from path ", path);
    if path != "/" {
        pipelog::error!("No handler for ", path);
    }
}
