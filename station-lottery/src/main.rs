use station_lottery::cache::{CacheConfig, CachedHeartRailsClient};
use station_lottery::config::AppConfig;
use station_lottery::heartrails::HeartRailsClient;
use station_lottery::lottery::LotteryConfig;
use station_lottery::regions::{japan_prefectures, load_catalog};
use station_lottery::web::{AppState, create_router};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("station_lottery=info")),
        )
        .init();

    let config = AppConfig::from_env().expect("Invalid configuration");

    // Load the region catalog (fail fast if a configured file is unusable)
    let catalog = match &config.regions_file {
        Some(path) => {
            let catalog = load_catalog(path).expect("Failed to load region catalog");
            info!(path = %path.display(), regions = catalog.len(), "loaded region catalog");
            catalog
        }
        None => japan_prefectures(),
    };

    let client =
        HeartRailsClient::new(config.heartrails.clone()).expect("Failed to create HeartRails client");
    let provider = CachedHeartRailsClient::new(client, &CacheConfig::default());
    let lottery_config = LotteryConfig::default();

    let state = AppState::new(provider, catalog, lottery_config);

    // Warm the line cache in the background so early nationwide draws
    // don't wait on every prefecture in turn
    let warm = state.clone();
    tokio::spawn(async move {
        let regions: Vec<String> = warm.catalog.regions().iter().map(|r| r.name.clone()).collect();
        let warmed = warm
            .provider
            .prefetch_lines(&regions, warm.config.prefetch_batch_size)
            .await;
        if warmed < regions.len() {
            warn!(warmed, total = regions.len(), "line cache partially warmed");
        } else {
            info!(warmed, "line cache warmed");
        }
    });

    let app = create_router(state, &config.static_dir);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .expect("Failed to bind");
    info!(addr = %config.bind_addr, "station lottery listening on http://{}", config.bind_addr);

    axum::serve(listener, app).await.expect("Server error");
}
