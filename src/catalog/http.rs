use anyhow::{Context, Result};
use reqwest::{redirect::Policy, Client, StatusCode};
use tracing::debug;

use crate::{
    catalog::{FetchError, RegionSource},
    config::SourceConfig,
    io,
    region::{Feature, RegionKind},
};

/// Region tiers served over HTTP.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
    config: SourceConfig,
}

impl HttpSource {
    pub fn new(config: SourceConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .redirect(Policy::limited(10))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client, config })
    }

    async fn get(&self, url: &str, object: &str) -> Result<Vec<Feature>, FetchError> {
        debug!(url, "fetching region data");
        let resp = self.client.get(url).send().await
            .map_err(|e| FetchError::Transport(format!("GET {url}: {e}")))?;

        match resp.status() {
            StatusCode::NOT_FOUND | StatusCode::GONE => return Err(FetchError::NotFound(url.to_string())),
            status if !status.is_success() => {
                return Err(FetchError::Status { url: url.to_string(), status: status.as_u16() })
            }
            _ => {}
        }

        let bytes = resp.bytes().await
            .map_err(|e| FetchError::Transport(format!("GET {url}: {e}")))?;
        io::read_features(&bytes, object).map_err(|e| FetchError::Parse(format!("{url}: {e:#}")))
    }
}

impl RegionSource for HttpSource {
    async fn fetch_countries(&self) -> Result<Vec<Feature>, FetchError> {
        self.get(&self.config.countries_url, &self.config.countries_object).await
    }

    async fn fetch_tier(&self, kind: RegionKind, iso3: &str) -> Result<Vec<Feature>, FetchError> {
        let template = match kind {
            RegionKind::Country => return self.fetch_countries().await,
            RegionKind::Subdivision => &self.config.admin1_url,
            RegionKind::District => &self.config.admin2_url,
        };
        let url = self.config.tier_url(template, iso3);
        self.get(&url, "").await
    }
}
