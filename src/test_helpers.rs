use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::Value;

use crate::error::ProviderError;
use crate::permit::{decode_claim, TransferAuthorization};
use crate::wallet::Eip1193;

pub const SAMPLE_CLAIM_JSON: &str = r#"{"permit":{"permitted":{"token":"0xTOKEN","amount":"0"},"nonce":"123","deadline":"999999999999"},"transferDetails":{"to":"0xBENEFICIARY","requestedAmount":"90000000000000000000"},"owner":"0xOWNER","signature":"0xSIG"}"#;

/// Same claim with parseable addresses and a 65-byte signature.
pub const SUBMITTABLE_CLAIM_JSON: &str = r#"{"permit":{"permitted":{"token":"0xe91d153e0b41518a2ce8dd3d7944fa863463a97d","amount":"90000000000000000000"},"nonce":"123","deadline":"999999999999"},"transferDetails":{"to":"0x4007ce2083c7f3e18097aeb3a39bb8ec149a341d","requestedAmount":"90000000000000000000"},"owner":"0xd9530f3fbbea11bed01dc09e79318f2f20223716","signature":"0x111111111111111111111111111111111111111111111111111111111111111122222222222222222222222222222222222222222222222222222222222222221b"}"#;

pub fn sample_authorization() -> TransferAuthorization {
    decode_claim(Some(&STANDARD.encode(SAMPLE_CLAIM_JSON))).unwrap()
}

pub fn submittable_authorization() -> TransferAuthorization {
    decode_claim(Some(&STANDARD.encode(SUBMITTABLE_CLAIM_JSON))).unwrap()
}

type Script = HashMap<String, VecDeque<Result<Value, ProviderError>>>;

/// Scripted EIP-1193 provider. Each method replays its queued responses in
/// order and then keeps repeating the last one.
#[derive(Clone, Debug, Default)]
pub struct MockProvider {
    script: Rc<RefCell<Script>>,
    calls: Rc<RefCell<Vec<(String, Value)>>>,
    fail_all: bool,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Provider whose every request errors, like a dead RPC.
    pub fn failing() -> Self {
        Self {
            fail_all: true,
            ..Self::default()
        }
    }

    pub fn respond(self, method: &str, response: Result<Value, ProviderError>) -> Self {
        self.script
            .borrow_mut()
            .entry(method.to_string())
            .or_default()
            .push_back(response);
        self
    }

    pub fn calls(&self) -> Vec<(String, Value)> {
        self.calls.borrow().clone()
    }

    pub fn called(&self, method: &str) -> bool {
        self.calls.borrow().iter().any(|(m, _)| m == method)
    }
}

impl Eip1193 for MockProvider {
    async fn request(&self, method: &str, params: Value) -> Result<Value, ProviderError> {
        self.calls.borrow_mut().push((method.to_string(), params));
        if self.fail_all {
            return Err(ProviderError::with_code(-32603, "Internal JSON-RPC error."));
        }

        let mut script = self.script.borrow_mut();
        let queue = script
            .get_mut(method)
            .ok_or_else(|| ProviderError::new(format!("unscripted method {}", method)))?;
        match queue.len() {
            0 => Err(ProviderError::new(format!("unscripted method {}", method))),
            1 => queue[0].clone(),
            _ => queue.pop_front().unwrap_or_else(|| Err(ProviderError::new("empty script"))),
        }
    }
}
