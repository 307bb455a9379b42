use anyhow::Context;

/// Load `.env` from the working directory, then the layered config.
pub fn load_config() -> anyhow::Result<gtd_config::GtdConfig> {
    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!(path = %path.display(), "loaded dotenv file"),
        Err(error) if error.not_found() => {}
        Err(error) => return Err(error).context("failed to load .env"),
    }

    gtd_config::GtdConfig::load().context("failed to load gtd configuration")
}
