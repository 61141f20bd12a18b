use serde::Serialize;
use serde_json::{json, Value};
use serde_wasm_bindgen::from_value;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::error::{ClaimError, ProviderError};

/// Minimal EIP-1193 surface: one JSON-RPC style `request`.
#[allow(async_fn_in_trait)]
pub trait Eip1193 {
    async fn request(&self, method: &str, params: Value) -> Result<Value, ProviderError>;
}

/// `window.ethereum`, as injected by browser wallets.
#[derive(Clone, Debug)]
pub struct InjectedProvider {
    inner: JsValue,
}

impl InjectedProvider {
    /// Registers `handler` for the provider's `accountsChanged` event.
    ///
    /// The closure lives for the rest of the page.
    pub fn on_accounts_changed(&self, mut handler: impl FnMut(Vec<String>) + 'static) {
        let on_fn = match js_sys::Reflect::get(&self.inner, &JsValue::from_str("on"))
            .ok()
            .and_then(|f| f.dyn_into::<js_sys::Function>().ok())
        {
            Some(f) => f,
            None => {
                log::warn!("wallet provider has no `on`, account changes will not be tracked");
                return;
            }
        };

        let callback = Closure::<dyn FnMut(JsValue)>::new(move |accounts: JsValue| {
            let accounts: Vec<String> = from_value(accounts).unwrap_or_default();
            log::info!("wallet accounts changed: {:?}", accounts);
            handler(accounts);
        });

        if let Err(e) = on_fn.call2(
            &self.inner,
            &JsValue::from_str("accountsChanged"),
            callback.as_ref().unchecked_ref(),
        ) {
            log::warn!(
                "failed to subscribe to accountsChanged: {}",
                provider_error_from_js(e).message
            );
            return;
        }
        callback.forget();
    }
}

impl Eip1193 for InjectedProvider {
    async fn request(&self, method: &str, params: Value) -> Result<Value, ProviderError> {
        let request_fn = js_sys::Reflect::get(&self.inner, &JsValue::from_str("request"))
            .map_err(|_| ProviderError::new("request method not found"))?;
        let request_fn: js_sys::Function = request_fn
            .dyn_into()
            .map_err(|_| ProviderError::new("request is not a function"))?;

        let args = json!({ "method": method, "params": params })
            .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
            .map_err(|e| ProviderError::new(e.to_string()))?;

        let result = request_fn.call1(&self.inner, &args).map_err(provider_error_from_js)?;
        let promise: js_sys::Promise = result
            .dyn_into()
            .map_err(|_| ProviderError::new("request didn't return promise"))?;
        let value = wasm_bindgen_futures::JsFuture::from(promise)
            .await
            .map_err(provider_error_from_js)?;

        from_value(value).map_err(|e| ProviderError::new(e.to_string()))
    }
}

/// Looks up the injected provider, classifying its absence.
pub fn detect_provider() -> Result<InjectedProvider, ClaimError> {
    if let Some(inner) = injected() {
        return Ok(InjectedProvider { inner });
    }
    let user_agent = web_sys::window()
        .and_then(|w| w.navigator().user_agent().ok())
        .unwrap_or_default();
    if looks_mobile(&user_agent) {
        Err(ClaimError::MobileUnsupported)
    } else {
        Err(ClaimError::NoProviderAvailable)
    }
}

pub fn looks_mobile(user_agent: &str) -> bool {
    ["Android", "iPhone", "iPad", "iPod", "Mobile"]
        .iter()
        .any(|marker| user_agent.contains(marker))
}

fn injected() -> Option<JsValue> {
    let window = web_sys::window()?;
    let ethereum = js_sys::Reflect::get(&window, &JsValue::from_str("ethereum")).ok()?;
    if ethereum.is_undefined() || ethereum.is_null() {
        None
    } else {
        Some(ethereum)
    }
}

/// Account access granted by the wallet.
#[derive(Clone, Debug)]
pub struct WalletSigner<P> {
    provider: P,
    address: String,
}

impl<P: Eip1193> WalletSigner<P> {
    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }
}

pub struct WalletBridge;

impl WalletBridge {
    /// Prompts the wallet for account access. Waits as long as the user
    /// leaves the prompt open.
    pub async fn connect<P: Eip1193>(provider: P) -> Result<WalletSigner<P>, ClaimError> {
        let accounts = provider
            .request("eth_requestAccounts", json!([]))
            .await
            .map_err(|e| {
                log::warn!("eth_requestAccounts failed: {}", e);
                ClaimError::SignerUnavailable(e.message)
            })?;

        let address = accounts
            .as_array()
            .and_then(|a| a.first())
            .and_then(|a| a.as_str())
            .map(str::to_string)
            .ok_or_else(|| ClaimError::SignerUnavailable("wallet returned no accounts".to_string()))?;

        log::info!("wallet connected: {}", address);
        Ok(WalletSigner { provider, address })
    }
}

fn provider_error_from_js(e: JsValue) -> ProviderError {
    let code = js_sys::Reflect::get(&e, &JsValue::from_str("code"))
        .ok()
        .and_then(|c| c.as_f64())
        .map(|c| c as i64);

    if let Some(s) = e.as_string() {
        return ProviderError { code, message: s };
    }
    if let Ok(msg) = js_sys::Reflect::get(&e, &JsValue::from_str("message")) {
        if let Some(s) = msg.as_string() {
            return ProviderError { code, message: s };
        }
    }
    if let Ok(s) = js_sys::JSON::stringify(&e) {
        if let Some(s) = s.as_string() {
            return ProviderError { code, message: s };
        }
    }
    ProviderError {
        code,
        message: "request rejected".to_string(),
    }
}
