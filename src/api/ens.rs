use gloo_net::http::Request;
use serde::{Deserialize, Serialize};

use crate::config::{name_resolver_url, NAME_CACHE_PREFIX};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnsResolveResponse {
    pub address: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "displayName")]
    pub display_name: Option<String>,
}

/// Reverse lookup of an address to a human-readable name.
#[allow(async_fn_in_trait)]
pub trait NameLookup {
    async fn lookup(&self, address: &str) -> Result<Option<String>, String>;
}

/// Local store of names already resolved. Never invalidated.
pub trait NameCache {
    fn get(&self, address: &str) -> Option<String>;
    fn put(&self, address: &str, name: &str);
}

pub struct EnsClient {
    base_url: String,
}

impl EnsClient {
    pub fn new() -> Self {
        Self {
            base_url: name_resolver_url().trim_end_matches('/').to_string(),
        }
    }
}

impl Default for EnsClient {
    fn default() -> Self {
        Self::new()
    }
}

impl NameLookup for EnsClient {
    async fn lookup(&self, address: &str) -> Result<Option<String>, String> {
        let url = format!("{}/{}", self.base_url, address);
        log::info!("Resolving name for {}", address);

        let response = Request::get(&url)
            .send()
            .await
            .map_err(|e| format!("Name request failed: {:?}", e))?;

        if !response.ok() {
            return Err(format!("Name resolver error: {}", response.status()));
        }

        let body = response
            .json::<EnsResolveResponse>()
            .await
            .map_err(|e| format!("Failed to parse name response: {:?}", e))?;

        Ok(body.name.filter(|n| !n.is_empty()))
    }
}

/// `window.localStorage`, one key per address.
pub struct LocalStorageCache;

impl LocalStorageCache {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }
}

pub fn cache_key(address: &str) -> String {
    format!("{}{}", NAME_CACHE_PREFIX, address.to_ascii_lowercase())
}

impl NameCache for LocalStorageCache {
    fn get(&self, address: &str) -> Option<String> {
        Self::storage()?.get_item(&cache_key(address)).ok()?
    }

    fn put(&self, address: &str, name: &str) {
        if let Some(storage) = Self::storage() {
            if storage.set_item(&cache_key(address), name).is_err() {
                log::warn!("could not cache name for {}", address);
            }
        }
    }
}
