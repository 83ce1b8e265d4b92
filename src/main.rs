// --- Secretaria escolar - Archivo principal ---

use secretaria::config::Config;
use secretaria::logging::init_tracing;
use secretaria::run_server;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let config = Config::from_env();
    init_tracing(config.log_json);
    for warning in &config.warnings {
        warn!("{}", warning);
    }
    info!(bind = %config.bind, data_dir = %config.data_dir.display(), "=== Secretaria escolar ===");
    run_server(config).await
}
