//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::CachedHeartRailsClient;
use crate::lottery::LotteryConfig;
use crate::regions::RegionCatalog;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Cached HeartRails client
    pub provider: Arc<CachedHeartRailsClient>,

    /// Regions and sub-areas offered by the form
    pub catalog: Arc<RegionCatalog>,

    /// Draw configuration
    pub config: Arc<LotteryConfig>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(
        provider: CachedHeartRailsClient,
        catalog: RegionCatalog,
        config: LotteryConfig,
    ) -> Self {
        Self {
            provider: Arc::new(provider),
            catalog: Arc::new(catalog),
            config: Arc::new(config),
        }
    }
}
