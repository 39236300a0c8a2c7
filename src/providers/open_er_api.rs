use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::core::config::ProviderConfig;
use crate::core::{Error, RateFetcher, Result};

/// Fetches latest rates from the open.er-api.com endpoint (or a compatible one).
pub struct OpenErApiFetcher {
    endpoint: String,
    client: reqwest::Client,
}

impl OpenErApiFetcher {
    pub fn new(endpoint: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("exrate/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(OpenErApiFetcher {
            endpoint: endpoint.to_string(),
            client,
        })
    }

    pub fn from_config(config: &ProviderConfig) -> Result<Self> {
        Self::new(&config.endpoint())
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl RateFetcher for OpenErApiFetcher {
    #[instrument(name = "RateFetch", skip(self), fields(endpoint = %self.endpoint))]
    async fn fetch(&self) -> Result<Vec<u8>> {
        debug!("Requesting latest rates");
        let response = self.client.get(&self.endpoint).send().await?;

        let status = response.status();
        debug!(%status, "Received rate service response");
        if !status.is_success() {
            return Err(Error::HttpStatus(status.as_u16()));
        }

        let body = response.bytes().await?;
        Ok(body.to_vec())
    }
}
