use alloy_primitives::hex;
use alloy_sol_types::SolCall;
use serde_json::json;

use crate::abi::IERC20Metadata::symbolCall;
use crate::wallet::Eip1193;

/// Reads `symbol()` from an ERC-20 contract with `eth_call`.
pub async fn fetch_symbol<P: Eip1193>(provider: &P, token: &str) -> Result<String, String> {
    let call = json!([
        { "to": token, "data": hex::encode_prefixed(symbolCall {}.abi_encode()) },
        "latest"
    ]);

    let result = provider
        .request("eth_call", call)
        .await
        .map_err(|e| format!("symbol() call failed: {}", e))?;
    let result = result
        .as_str()
        .ok_or_else(|| "symbol() returned a non-string result".to_string())?;
    let data = hex::decode(result).map_err(|e| format!("symbol() returned bad hex: {}", e))?;

    decode_symbol(&data)
}

/// Decodes an ABI `string` return, or the `bytes32` some older tokens use.
pub fn decode_symbol(data: &[u8]) -> Result<String, String> {
    if data.len() == 32 {
        let end = data.iter().position(|b| *b == 0).unwrap_or(32);
        return String::from_utf8(data[..end].to_vec())
            .map_err(|_| "bytes32 symbol is not utf-8".to_string())
            .and_then(non_empty);
    }

    symbolCall::abi_decode_returns(data, true)
        .map(|ret| ret._0)
        .map_err(|e| format!("cannot decode symbol(): {}", e))
        .and_then(non_empty)
}

fn non_empty(symbol: String) -> Result<String, String> {
    let symbol = symbol.trim().to_string();
    if symbol.is_empty() {
        Err("empty symbol".to_string())
    } else {
        Ok(symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderError;
    use crate::test_helpers::MockProvider;
    use alloy_sol_types::SolValue;

    #[test]
    fn decodes_abi_string() {
        let encoded = ("WXDAI".to_string(),).abi_encode_params();
        assert_eq!(decode_symbol(&encoded).unwrap(), "WXDAI");
    }

    #[test]
    fn decodes_bytes32_symbol() {
        let mut word = [0u8; 32];
        word[..3].copy_from_slice(b"MKR");
        assert_eq!(decode_symbol(&word).unwrap(), "MKR");
    }

    #[test]
    fn empty_return_is_error() {
        assert!(decode_symbol(&[]).is_err());
    }

    #[tokio::test]
    async fn fetches_symbol_via_eth_call() {
        let encoded = hex::encode_prefixed(("UUSD".to_string(),).abi_encode_params());
        let provider = MockProvider::new().respond("eth_call", Ok(json!(encoded)));

        let symbol = fetch_symbol(&provider, "0xe91d153e0b41518a2ce8dd3d7944fa863463a97d")
            .await
            .unwrap();
        assert_eq!(symbol, "UUSD");

        let calls = provider.calls();
        assert_eq!(calls[0].1[0]["data"], "0x95d89b41");
    }

    #[tokio::test]
    async fn provider_failure_is_error() {
        let provider =
            MockProvider::new().respond("eth_call", Err(ProviderError::new("rate limited")));
        assert!(fetch_symbol(&provider, "0x01").await.is_err());
    }
}
