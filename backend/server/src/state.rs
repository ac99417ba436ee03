use std::sync::Arc;

use heroes::Upstream;

use super::config::Config;

pub struct AppState {
    pub config: Config,
    pub upstream: Upstream,
}

impl AppState {
    pub fn new(config: Config) -> Arc<Self> {
        let upstream = Upstream::new(&config.upstream_url, config.api_key());

        Arc::new(Self { config, upstream })
    }
}
