use std::str::FromStr;
use std::time::Duration;

use alloy_primitives::{hex, Address, Bytes, U256};
use alloy_sol_types::SolCall;
use serde_json::{json, Value};

use crate::abi::ISignatureTransfer::{
    permitTransferFromCall, PermitTransferFrom, SignatureTransferDetails, TokenPermissions,
};
use crate::config::{PERMIT2_ADDRESS, RECEIPT_POLL_MS};
use crate::error::{ClaimError, ProviderError};
use crate::permit::{parse_uint, TransferAuthorization};
use crate::wallet::{Eip1193, WalletSigner};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReceiptStatus {
    Success,
    Reverted,
}

/// ABI-encodes the Permit2 `permitTransferFrom` call for `auth`.
pub fn build_claim_calldata(auth: &TransferAuthorization) -> Result<Bytes, ClaimError> {
    let call = permitTransferFromCall {
        permit: PermitTransferFrom {
            permitted: TokenPermissions {
                token: parse_address("token", &auth.permit.permitted.token)?,
                amount: parse_amount("amount", &auth.permit.permitted.amount)?,
            },
            nonce: parse_amount("nonce", &auth.permit.nonce)?,
            deadline: parse_amount("deadline", &auth.permit.deadline)?,
        },
        transferDetails: SignatureTransferDetails {
            to: parse_address("beneficiary", &auth.transfer_details.to)?,
            requestedAmount: parse_amount(
                "requested amount",
                &auth.transfer_details.requested_amount,
            )?,
        },
        owner: parse_address("owner", &auth.owner)?,
        signature: hex::decode(auth.signature.trim())
            .map(Bytes::from)
            .map_err(|e| ClaimError::SubmissionRejected(format!("invalid signature: {}", e)))?,
    };
    Ok(call.abi_encode().into())
}

/// Sends the claim from the signer's account and waits for it to be mined.
/// Returns the transaction hash.
pub async fn submit_claim<P: Eip1193>(
    signer: &WalletSigner<P>,
    auth: &TransferAuthorization,
) -> Result<String, ClaimError> {
    let data = build_claim_calldata(auth)?;
    let tx = json!([{
        "from": signer.address(),
        "to": PERMIT2_ADDRESS,
        "data": hex::encode_prefixed(&data),
    }]);

    let hash = signer
        .provider()
        .request("eth_sendTransaction", tx)
        .await
        .map_err(send_error)?;
    let hash = hash.as_str().map(str::to_string).ok_or_else(|| {
        ClaimError::SubmissionRejected("wallet returned no transaction hash".to_string())
    })?;
    log::info!("claim transaction sent: {}", hash);

    match wait_for_receipt(signer.provider(), &hash).await? {
        ReceiptStatus::Success => {
            log::info!("claim transaction mined: {}", hash);
            Ok(hash)
        }
        ReceiptStatus::Reverted => {
            log::warn!("claim transaction reverted: {}", hash);
            Err(ClaimError::SubmissionReverted(hash))
        }
    }
}

async fn wait_for_receipt<P: Eip1193>(
    provider: &P,
    hash: &str,
) -> Result<ReceiptStatus, ClaimError> {
    loop {
        let receipt = provider
            .request("eth_getTransactionReceipt", json!([hash]))
            .await
            .map_err(|e| {
                log::error!("receipt lookup for {} failed: {}", hash, e);
                ClaimError::SubmissionRejected(e.message)
            })?;
        if let Some(status) = receipt_status(&receipt) {
            return Ok(status);
        }
        gloo_timers::future::sleep(Duration::from_millis(RECEIPT_POLL_MS)).await;
    }
}

// Receipts without a status field predate Byzantium and only exist for mined
// transactions.
fn receipt_status(receipt: &Value) -> Option<ReceiptStatus> {
    let receipt = receipt.as_object()?;
    match receipt.get("status").and_then(Value::as_str) {
        Some("0x0") | Some("0x00") => Some(ReceiptStatus::Reverted),
        _ => Some(ReceiptStatus::Success),
    }
}

fn send_error(e: ProviderError) -> ClaimError {
    if e.is_user_rejection() {
        log::info!("claim rejected in wallet");
        ClaimError::SubmissionRejected("rejected in wallet".to_string())
    } else if e.is_revert() {
        log::warn!("claim would revert: {}", e);
        ClaimError::SubmissionReverted(e.message)
    } else {
        log::error!("eth_sendTransaction failed: {}", e);
        ClaimError::SubmissionRejected(e.message)
    }
}

fn parse_address(field: &str, value: &str) -> Result<Address, ClaimError> {
    Address::from_str(value.trim()).map_err(|e| {
        ClaimError::SubmissionRejected(format!("invalid {} address {:?}: {}", field, value, e))
    })
}

fn parse_amount(field: &str, value: &str) -> Result<U256, ClaimError> {
    parse_uint(value)
        .ok_or_else(|| ClaimError::SubmissionRejected(format!("invalid {} {:?}", field, value)))
}
