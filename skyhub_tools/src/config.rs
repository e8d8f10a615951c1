use log::*;
use soi_common::Secret;

#[derive(Debug, Clone, Default)]
pub struct SkyHubConfig {
    pub base_url: String,
    pub user_email: String,
    pub api_key: Secret<String>,
    pub account_manager_key: Secret<String>,
}

impl SkyHubConfig {
    pub fn new_from_env_or_default() -> Self {
        let base_url = std::env::var("SOI_SKYHUB_BASE_URL").unwrap_or_else(|_| {
            warn!("SOI_SKYHUB_BASE_URL not set, using https://api.skyhub.com.br as default");
            "https://api.skyhub.com.br".to_string()
        });
        let user_email = std::env::var("SOI_SKYHUB_USER_EMAIL").unwrap_or_else(|_| {
            warn!("SOI_SKYHUB_USER_EMAIL not set, using (probably useless) default");
            "integration@example.com".to_string()
        });
        let api_key = Secret::new(std::env::var("SOI_SKYHUB_API_KEY").unwrap_or_else(|_| {
            warn!("SOI_SKYHUB_API_KEY not set, using (probably useless) default");
            "00000000000000".to_string()
        }));
        let account_manager_key = Secret::new(std::env::var("SOI_SKYHUB_ACCOUNT_KEY").unwrap_or_else(|_| {
            warn!("SOI_SKYHUB_ACCOUNT_KEY not set, using (probably useless) default");
            "00000000000000".to_string()
        }));
        Self { base_url, user_email, api_key, account_manager_key }
    }
}
