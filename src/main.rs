use std::sync::Arc;

use cellar_run::{routes::routes, Catalog, ReportCache, ServerConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ServerConfig::default();
    let catalog = Arc::new(Catalog::load(&config.catalog_path)?);
    let cache = ReportCache::new(&config.cache_dir);

    log::info!("> Listening on http://{}", config.address);
    warp::serve(routes(catalog, cache)).run(config.address).await;

    Ok(())
}
