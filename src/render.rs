use alloy_primitives::U256;

use crate::api::{fetch_symbol, NameCache, NameLookup};
use crate::config::DISPLAY_DECIMALS;
use crate::permit::{parse_uint, TransferAuthorization};
use crate::wallet::Eip1193;

/// Display projection of a claim. Built synchronously so the raw values are on
/// screen before any enrichment finishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimView {
    pub token: String,
    pub owner: String,
    pub beneficiary: String,
    pub permitted_amount: String,
    pub requested_amount: String,
    pub nonce: String,
    pub deadline: String,
    pub signature: String,
}

impl ClaimView {
    pub fn project(auth: &TransferAuthorization) -> Self {
        Self {
            token: auth.permit.permitted.token.clone(),
            owner: auth.owner.clone(),
            beneficiary: auth.transfer_details.to.clone(),
            permitted_amount: display_amount(&auth.permit.permitted.amount),
            requested_amount: display_amount(&auth.transfer_details.requested_amount),
            nonce: auth.permit.nonce.clone(),
            deadline: auth.permit.deadline.clone(),
            signature: auth.signature.clone(),
        }
    }
}

// Decoded claims only carry valid uint strings; anything else is shown as-is.
fn display_amount(base_units: &str) -> String {
    match parse_uint(base_units) {
        Some(value) => format_units(value, DISPLAY_DECIMALS),
        None => base_units.to_string(),
    }
}

/// Exact decimal rendering of `value / 10^decimals`, trailing zeros trimmed.
pub fn format_units(value: U256, decimals: u8) -> String {
    let scale = U256::from(10u64).pow(U256::from(decimals));
    let whole = value / scale;
    let frac = value % scale;
    if frac.is_zero() {
        return whole.to_string();
    }
    let frac = format!("{:0>width$}", frac.to_string(), width = decimals as usize);
    format!("{}.{}", whole, frac.trim_end_matches('0'))
}

// Largest timestamp a JS `Date` accepts, in seconds.
const MAX_DATE_SECONDS: u64 = 8_640_000_000_000;

/// How the permit deadline is shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeadlineDisplay {
    /// Unix seconds that fit in a JS `Date`.
    Timestamp(u64),
    /// `type(uint256).max`, the usual "never expires" deadline.
    NoExpiry,
    /// Anything else is shown verbatim.
    Raw(String),
}

pub fn deadline_display(deadline: &str) -> DeadlineDisplay {
    match parse_uint(deadline) {
        Some(value) if value == U256::MAX => DeadlineDisplay::NoExpiry,
        Some(value) => match u64::try_from(value) {
            Ok(seconds) if seconds <= MAX_DATE_SECONDS => DeadlineDisplay::Timestamp(seconds),
            _ => DeadlineDisplay::Raw(deadline.to_string()),
        },
        None => DeadlineDisplay::Raw(deadline.to_string()),
    }
}

/// `0x1234...abcd` for long addresses, unchanged otherwise.
pub fn short_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 12 {
        return address.to_string();
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

/// Best-effort name for `address`: cached value first, then the resolver.
/// Failures are logged and yield `None`.
pub async fn resolve_name<L: NameLookup, C: NameCache>(
    lookup: &L,
    cache: &C,
    address: &str,
) -> Option<String> {
    if let Some(name) = cache.get(address) {
        return Some(name);
    }
    match lookup.lookup(address).await {
        Ok(Some(name)) => {
            cache.put(address, &name);
            Some(name)
        }
        Ok(None) => None,
        Err(e) => {
            log::warn!("name lookup for {} failed: {}", address, e);
            None
        }
    }
}

/// Best-effort token symbol. Failures are logged and yield `None`.
pub async fn resolve_symbol<P: Eip1193>(provider: &P, token: &str) -> Option<String> {
    match fetch_symbol(provider, token).await {
        Ok(symbol) => Some(symbol),
        Err(e) => {
            log::warn!("symbol lookup for {} failed: {}", token, e);
            None
        }
    }
}
