use crate::buttons::ButtonState;
use crate::error::ClaimError;
use crate::permit::TransferAuthorization;
use crate::submit::submit_claim;
use crate::wallet::{Eip1193, WalletBridge};

/// One press of the claim button: wallet access, then submission.
///
/// `on_state` receives every button transition and `on_connected` the account
/// the wallet granted. A missing wallet returns before `Loading` is shown.
/// Declined account access goes back to `MakeClaim`; a failed submission ends
/// in `Invalidated`.
pub async fn run_claim<P: Eip1193>(
    provider: Result<P, ClaimError>,
    auth: &TransferAuthorization,
    mut on_state: impl FnMut(ButtonState),
    mut on_connected: impl FnMut(&str),
) -> Result<String, ClaimError> {
    let provider = provider.inspect_err(|e| log::warn!("cannot claim: {}", e))?;

    on_state(ButtonState::Loading);

    let signer = match WalletBridge::connect(provider).await {
        Ok(signer) => signer,
        Err(e) => {
            on_state(ButtonState::MakeClaim);
            return Err(e);
        }
    };
    on_connected(signer.address());

    match submit_claim(&signer, auth).await {
        Ok(hash) => {
            on_state(ButtonState::ViewClaim);
            Ok(hash)
        }
        Err(e) => {
            log::warn!("claim failed: {}", e);
            on_state(ButtonState::Invalidated);
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderError;
    use crate::test_helpers::{submittable_authorization, MockProvider};
    use serde_json::json;

    const ACCOUNT: &str = "0x4007ce2083c7f3e18097aeb3a39bb8ec149a341d";

    async fn states_for(
        provider: Result<MockProvider, ClaimError>,
    ) -> (Vec<ButtonState>, Result<String, ClaimError>) {
        let mut states = Vec::new();
        let result =
            run_claim(provider, &submittable_authorization(), |s| states.push(s), |_| {}).await;
        (states, result)
    }

    #[tokio::test]
    async fn no_wallet_never_shows_loading() {
        let (states, result) = states_for(Err(ClaimError::NoProviderAvailable)).await;
        assert!(states.is_empty());
        assert_eq!(result, Err(ClaimError::NoProviderAvailable));
        assert!(result.unwrap_err().user_message().contains("web3 browser"));
    }

    #[tokio::test]
    async fn dead_rpc_shows_loading_and_never_view_claim() {
        let (states, result) = states_for(Ok(MockProvider::failing())).await;
        assert_eq!(states.first(), Some(&ButtonState::Loading));
        assert!(!states.contains(&ButtonState::ViewClaim));
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn successful_claim_ends_in_view_claim() {
        let provider = MockProvider::new()
            .respond("eth_requestAccounts", Ok(json!([ACCOUNT])))
            .respond("eth_sendTransaction", Ok(json!("0xfeed")))
            .respond("eth_getTransactionReceipt", Ok(json!({ "status": "0x1" })));
        let (states, result) = states_for(Ok(provider)).await;
        assert_eq!(states, vec![ButtonState::Loading, ButtonState::ViewClaim]);
        assert_eq!(result, Ok("0xfeed".to_string()));
    }

    #[tokio::test]
    async fn declined_access_returns_to_make_claim() {
        let provider = MockProvider::new().respond(
            "eth_requestAccounts",
            Err(ProviderError::with_code(4001, "User rejected the request.")),
        );
        let (states, result) = states_for(Ok(provider)).await;
        assert_eq!(states, vec![ButtonState::Loading, ButtonState::MakeClaim]);
        assert!(matches!(result, Err(ClaimError::SignerUnavailable(_))));
    }

    #[tokio::test]
    async fn reverted_claim_is_invalidated() {
        let provider = MockProvider::new()
            .respond("eth_requestAccounts", Ok(json!([ACCOUNT])))
            .respond("eth_sendTransaction", Ok(json!("0xfeed")))
            .respond("eth_getTransactionReceipt", Ok(json!({ "status": "0x0" })));
        let (states, result) = states_for(Ok(provider)).await;
        assert_eq!(states, vec![ButtonState::Loading, ButtonState::Invalidated]);
        assert!(matches!(result, Err(ClaimError::SubmissionReverted(_))));
    }

    #[tokio::test]
    async fn granted_account_is_reported_before_submission_result() {
        let provider = MockProvider::new()
            .respond("eth_requestAccounts", Ok(json!([ACCOUNT])))
            .respond(
                "eth_sendTransaction",
                Err(ProviderError::with_code(4001, "User denied transaction signature.")),
            );
        let mut connected = None;
        let result = run_claim(
            Ok(provider),
            &submittable_authorization(),
            |_| {},
            |address| connected = Some(address.to_string()),
        )
        .await;
        assert_eq!(connected.as_deref(), Some(ACCOUNT));
        assert!(matches!(result, Err(ClaimError::SubmissionRejected(_))));
    }

    #[tokio::test]
    async fn declined_access_reports_no_account() {
        let provider = MockProvider::new().respond(
            "eth_requestAccounts",
            Err(ProviderError::with_code(4001, "User rejected the request.")),
        );
        let mut connected = None;
        let _ = run_claim(
            Ok(provider),
            &submittable_authorization(),
            |_| {},
            |address| connected = Some(address.to_string()),
        )
        .await;
        assert_eq!(connected, None);
    }

    #[tokio::test]
    async fn rejected_in_wallet_is_invalidated_without_resubmitting() {
        let provider = MockProvider::new()
            .respond("eth_requestAccounts", Ok(json!([ACCOUNT])))
            .respond(
                "eth_sendTransaction",
                Err(ProviderError::with_code(4001, "User denied transaction signature.")),
            );
        let (states, result) = states_for(Ok(provider.clone())).await;
        assert_eq!(states, vec![ButtonState::Loading, ButtonState::Invalidated]);
        assert!(matches!(result, Err(ClaimError::SubmissionRejected(_))));
        let sends = provider
            .calls()
            .iter()
            .filter(|(m, _)| m == "eth_sendTransaction")
            .count();
        assert_eq!(sends, 1);
    }
}
