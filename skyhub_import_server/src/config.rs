use std::env;

use log::*;
use skyhub_import_engine::{ShippingPolicy, StoreScope};
use skyhub_tools::SkyHubConfig;
use soi_common::parse_boolean_flag;

use crate::errors::ServerError;

const DEFAULT_SOI_HOST: &str = "127.0.0.1";
const DEFAULT_SOI_PORT: u16 = 8360;
const DEFAULT_DATABASE_URL: &str = "sqlite://data/skyhub_store.db";

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    /// Credentials and endpoint for the SkyHub marketplace API.
    pub skyhub: SkyHubConfig,
    /// The store context imports run under when the request does not name a store.
    pub store: StoreScope,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_SOI_HOST.to_string(),
            port: DEFAULT_SOI_PORT,
            database_url: String::default(),
            skyhub: SkyHubConfig::default(),
            store: StoreScope::default(),
        }
    }
}

impl ServerConfig {
    pub fn new(host: &str, port: u16) -> Self {
        Self { host: host.to_string(), port, ..Default::default() }
    }

    pub fn from_env_or_default() -> Self {
        let host = env::var("SOI_HOST").ok().unwrap_or_else(|| DEFAULT_SOI_HOST.into());
        let port = env::var("SOI_PORT")
            .map(|s| {
                s.parse::<u16>().unwrap_or_else(|e| {
                    error!(
                        "🪛️ {s} is not a valid port for SOI_PORT. {e} Using the default, {DEFAULT_SOI_PORT}, instead."
                    );
                    DEFAULT_SOI_PORT
                })
            })
            .ok()
            .unwrap_or(DEFAULT_SOI_PORT);
        let database_url = env::var("SOI_DATABASE_URL").ok().unwrap_or_else(|| {
            error!("🪛️ SOI_DATABASE_URL is not set. Using the default, {DEFAULT_DATABASE_URL}, instead.");
            DEFAULT_DATABASE_URL.to_string()
        });
        let skyhub = SkyHubConfig::new_from_env_or_default();
        let store = store_scope_from_env();
        Self { host, port, database_url, skyhub, store }
    }

    /// The scope a batch runs under. A request may name a store; everything else comes from the configured scope.
    pub fn store_scope(&self, store_id: Option<i64>) -> StoreScope {
        let mut scope = self.store.clone();
        if let Some(store_id) = store_id {
            scope.store_id = store_id;
        }
        scope
    }

    /// Pre-flight validation for the process entry point.
    pub fn validate(&self) -> Result<(), ServerError> {
        if self.database_url.is_empty() {
            return Err(ServerError::ConfigurationError("The database URL is empty".to_string()));
        }
        Ok(())
    }
}

fn env_i64(name: &str, default: i64) -> i64 {
    env::var(name)
        .map(|s| {
            s.parse::<i64>().unwrap_or_else(|e| {
                error!("🪛️ {s} is not a valid value for {name}. {e} Using the default, {default}, instead.");
                default
            })
        })
        .ok()
        .unwrap_or(default)
}

fn store_scope_from_env() -> StoreScope {
    let defaults = StoreScope::default();
    let store_id = env_i64("SOI_STORE_ID", defaults.store_id);
    let website_id = env_i64("SOI_WEBSITE_ID", defaults.website_id);
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let street_lines = env_i64("SOI_STREET_LINES", i64::from(defaults.street_lines)).clamp(1, 4) as u8;
    let default_country = env::var("SOI_DEFAULT_COUNTRY").ok().unwrap_or(defaults.default_country);
    let currency = env::var("SOI_CURRENCY").ok().unwrap_or(defaults.currency);
    let shipping_policy = env::var("SOI_SHIPPING_POLICY")
        .ok()
        .and_then(|s| {
            s.parse::<ShippingPolicy>()
                .map_err(|e| {
                    warn!("🪛️ {e}. Using the default, {}, instead.", defaults.shipping_policy);
                })
                .ok()
        })
        .unwrap_or(defaults.shipping_policy);
    let payment_method = env::var("SOI_PAYMENT_METHOD").ok().unwrap_or(defaults.payment_method);
    let use_marketplace_increment_id = parse_boolean_flag(
        env::var("SOI_USE_MARKETPLACE_INCREMENT_ID").ok(),
        defaults.use_marketplace_increment_id,
    );
    StoreScope {
        store_id,
        website_id,
        street_lines,
        default_country,
        currency,
        shipping_policy,
        payment_method,
        use_marketplace_increment_id,
        order_comment: defaults.order_comment,
    }
}
