use std::sync::Arc;

use log::*;
use reqwest::{
    header::{HeaderMap, HeaderValue},
    Client,
    Method,
    StatusCode,
};
use serde::{de::DeserializeOwned, Serialize};

use crate::{config::SkyHubConfig, data_objects::SkyHubOrder, SkyHubApiError};

/// Thin client over the SkyHub seller REST API. Authentication rides on three headers that are attached to every
/// request, so the client is cheap to clone and share.
#[derive(Clone)]
pub struct SkyHubApi {
    config: SkyHubConfig,
    client: Arc<Client>,
}

impl SkyHubApi {
    pub fn new(config: SkyHubConfig) -> Result<Self, SkyHubApiError> {
        let mut headers = HeaderMap::with_capacity(4);
        let email = HeaderValue::from_str(config.user_email.as_str())
            .map_err(|e| SkyHubApiError::Initialization(e.to_string()))?;
        headers.insert("X-User-Email", email);
        let api_key = HeaderValue::from_str(config.api_key.reveal().as_str())
            .map_err(|e| SkyHubApiError::Initialization(e.to_string()))?;
        headers.insert("X-Api-Key", api_key);
        let account_key = HeaderValue::from_str(config.account_manager_key.reveal().as_str())
            .map_err(|e| SkyHubApiError::Initialization(e.to_string()))?;
        headers.insert("X-Accountmanager-Key", account_key);
        headers.insert("Accept", HeaderValue::from_static("application/json"));
        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| SkyHubApiError::Initialization(e.to_string()))?;
        Ok(Self { config, client: Arc::new(client) })
    }

    pub async fn rest_query<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<B>,
    ) -> Result<T, SkyHubApiError> {
        let url = self.url(path);
        trace!("Sending REST query: {url}");
        let mut req = self.client.request(method, url);
        if let Some(body) = body {
            req = req.json(&body);
        }
        let response = req.send().await.map_err(|e| SkyHubApiError::RestResponseError(e.to_string()))?;
        if response.status().is_success() {
            trace!("REST query successful. {}", response.status());
            response.json::<T>().await.map_err(|e| SkyHubApiError::JsonError(e.to_string()))
        } else {
            let status = response.status().as_u16();
            let message = response.text().await.map_err(|e| SkyHubApiError::RestResponseError(e.to_string()))?;
            Err(SkyHubApiError::QueryError { status, message })
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.base_url)
    }

    /// Fetches a single order by its marketplace reference code. A 404 from the marketplace means the reference does
    /// not exist there, which callers treat as a warning rather than an error, so it maps to `Ok(None)`.
    pub async fn get_order(&self, reference: &str) -> Result<Option<SkyHubOrder>, SkyHubApiError> {
        let path = format!("/orders/{reference}");
        debug!("🛒️ Fetching order {reference}");
        match self.rest_query::<SkyHubOrder, ()>(Method::GET, &path, None).await {
            Ok(order) => {
                info!("🛒️ Fetched order {reference}");
                Ok(Some(order))
            },
            Err(SkyHubApiError::QueryError { status, .. }) if status == StatusCode::NOT_FOUND.as_u16() => {
                debug!("🛒️ Order {reference} does not exist in the marketplace");
                Ok(None)
            },
            Err(e) => Err(e),
        }
    }
}
