use alloy_primitives::U256;
use base64::engine::general_purpose::{STANDARD, STANDARD_NO_PAD, URL_SAFE, URL_SAFE_NO_PAD};
use base64::Engine;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ClaimError, PayloadFault};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPermissions {
    pub token: String,
    pub amount: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermitTransferFrom {
    pub permitted: TokenPermissions,
    pub nonce: String,
    pub deadline: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferDetails {
    pub to: String,
    #[serde(rename = "requestedAmount")]
    pub requested_amount: String,
}

/// Signed Permit2 transfer as carried in the claim URL.
///
/// Only the shape is checked here. Signature, nonce and deadline are enforced
/// by the Permit2 contract when the claim is submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferAuthorization {
    pub permit: PermitTransferFrom,
    #[serde(rename = "transferDetails")]
    pub transfer_details: TransferDetails,
    pub owner: String,
    pub signature: String,
}

/// Decodes the raw `claim` query value into a [`TransferAuthorization`].
pub fn decode_claim(raw: Option<&str>) -> Result<TransferAuthorization, ClaimError> {
    let raw = match raw.map(str::trim) {
        Some(raw) if !raw.is_empty() => raw,
        _ => return Err(ClaimError::MalformedPayload(PayloadFault::Absent)),
    };

    let bytes = decode_base64(raw).ok_or(ClaimError::MalformedPayload(PayloadFault::Encoding))?;
    let text =
        String::from_utf8(bytes).map_err(|_| ClaimError::MalformedPayload(PayloadFault::Encoding))?;

    let value: Value = serde_json::from_str(&text)
        .map_err(|_| ClaimError::MalformedPayload(PayloadFault::Json))?;
    let authorization: TransferAuthorization =
        serde_json::from_value(value).map_err(|e| ClaimError::SchemaMismatch(e.to_string()))?;

    authorization.validate()?;
    Ok(authorization)
}

impl TransferAuthorization {
    fn validate(&self) -> Result<(), ClaimError> {
        check_uint("permit.permitted.amount", &self.permit.permitted.amount)?;
        check_uint("permit.nonce", &self.permit.nonce)?;
        check_uint("permit.deadline", &self.permit.deadline)?;
        check_uint(
            "transferDetails.requestedAmount",
            &self.transfer_details.requested_amount,
        )?;

        for (field, value) in [
            ("permit.permitted.token", &self.permit.permitted.token),
            ("transferDetails.to", &self.transfer_details.to),
            ("owner", &self.owner),
            ("signature", &self.signature),
        ] {
            if value.trim().is_empty() {
                return Err(ClaimError::SchemaMismatch(format!("{} is empty", field)));
            }
        }
        Ok(())
    }
}

/// Parses a decimal string that must fit in a uint256.
pub fn parse_uint(value: &str) -> Option<U256> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    U256::from_str_radix(value, 10).ok()
}

fn check_uint(field: &str, value: &str) -> Result<(), ClaimError> {
    parse_uint(value)
        .map(|_| ())
        .ok_or_else(|| ClaimError::SchemaMismatch(format!("{} is not a uint256: {:?}", field, value)))
}

// Query-string decoding turns '+' into ' ', and links get shared in both
// alphabets with and without padding.
fn decode_base64(raw: &str) -> Option<Vec<u8>> {
    let data = raw.replace(' ', "+");
    [&STANDARD, &STANDARD_NO_PAD, &URL_SAFE, &URL_SAFE_NO_PAD]
        .into_iter()
        .find_map(|engine| engine.decode(data.as_bytes()).ok())
}
