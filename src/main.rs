use coursemap::config::Config;
use coursemap::import::{import_sections, seed_professor_ratings};
use coursemap::run_server;
use coursemap::store::Store;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::load();
    let store = Store::open(&config.database_path).map_err(std::io::Error::other)?;

    if let Some(path) = &config.seed_sections_path {
        match import_sections(&store, path) {
            Ok(count) => info!(count, "seed sections loaded"),
            Err(e) => error!(path = %path.display(), "failed to import seed sections: {e}"),
        }
    }
    if let Err(e) = seed_professor_ratings(&store) {
        error!("failed to seed professor ratings: {e}");
    }

    run_server(config, store).await
}
