use anyhow::Context;
use sv_config::StackviewConfig;

/// Load `.env` from the working directory, then the layered config.
pub fn load_config() -> anyhow::Result<StackviewConfig> {
    let config =
        StackviewConfig::load_with_dotenv().context("failed to load stackview configuration")?;
    tracing::debug!(
        base_url = %config.api.base_url,
        default_user_id = ?config.general.default_user_id,
        "configuration loaded"
    );
    Ok(config)
}
