// Deployment settings. Endpoints can be overridden at build time through the
// CLAIM_PORTAL_* environment variables.

/// Query parameter carrying the encoded permit.
pub const CLAIM_PARAM: &str = "claim";

/// Every token is displayed as if it had 18 decimals. Tokens with other
/// precisions will render with the wrong magnitude.
pub const DISPLAY_DECIMALS: u8 = 18;

/// Canonical Uniswap Permit2 deployment, same address on every EVM chain.
pub const PERMIT2_ADDRESS: &str = "0x000000000022D473030F116dDEE9F6B43aC78BA3";

pub const NAME_CACHE_PREFIX: &str = "claim-portal:name:";

/// Milliseconds between `eth_getTransactionReceipt` polls.
pub const RECEIPT_POLL_MS: u64 = 2000;

const DEFAULT_RPC_URL: &str = "https://rpc.gnosischain.com";
const DEFAULT_NAME_RESOLVER: &str = "https://api.ensideas.com/ens/resolve";
const DEFAULT_EXPLORER_TX: &str = "https://gnosisscan.io/tx";

/// Read-only JSON-RPC endpoint used when no wallet is injected.
pub fn rpc_url() -> &'static str {
    option_env!("CLAIM_PORTAL_RPC_URL").unwrap_or(DEFAULT_RPC_URL)
}

pub fn name_resolver_url() -> &'static str {
    option_env!("CLAIM_PORTAL_NAME_RESOLVER").unwrap_or(DEFAULT_NAME_RESOLVER)
}

pub fn explorer_tx_url(tx_hash: &str) -> String {
    let base = option_env!("CLAIM_PORTAL_EXPLORER_TX").unwrap_or(DEFAULT_EXPLORER_TX);
    format!("{}/{}", base.trim_end_matches('/'), tx_hash)
}
