use anyhow::Context;
use sv_client::ApiClient;
use sv_config::StackviewConfig;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub client: ApiClient,
    pub config: StackviewConfig,
}

impl AppContext {
    pub fn init(config: StackviewConfig) -> anyhow::Result<Self> {
        let client = ApiClient::new(&config.api).context("failed to build API client")?;
        tracing::debug!(base_url = client.base_url(), "api client ready");
        Ok(Self { client, config })
    }
}
