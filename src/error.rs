use thiserror::Error;

/// Why the `claim` parameter could not be read as JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadFault {
    Absent,
    Encoding,
    Json,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClaimError {
    #[error("malformed claim payload: {0:?}")]
    MalformedPayload(PayloadFault),

    #[error("claim payload does not match permit schema: {0}")]
    SchemaMismatch(String),

    #[error("no injected wallet provider")]
    NoProviderAvailable,

    #[error("mobile browser without wallet provider")]
    MobileUnsupported,

    #[error("wallet did not grant an account: {0}")]
    SignerUnavailable(String),

    #[error("claim transaction rejected: {0}")]
    SubmissionRejected(String),

    #[error("claim transaction reverted: {0}")]
    SubmissionReverted(String),
}

impl ClaimError {
    /// Plain text shown in the toast.
    pub fn user_message(&self) -> String {
        match self {
            ClaimError::MalformedPayload(PayloadFault::Absent) => "No claim data found.".to_string(),
            ClaimError::MalformedPayload(_) | ClaimError::SchemaMismatch(_) => {
                "Invalid claim data.".to_string()
            }
            ClaimError::NoProviderAvailable => {
                "Please connect a web3 browser (e.g. MetaMask) to claim.".to_string()
            }
            ClaimError::MobileUnsupported => {
                "Mobile browsers are not supported. Open this link in your wallet app's browser."
                    .to_string()
            }
            ClaimError::SignerUnavailable(_) => "Wallet access was not granted.".to_string(),
            ClaimError::SubmissionRejected(reason) => format!("Claim failed: {}", reason),
            ClaimError::SubmissionReverted(reason) => {
                format!("Claim reverted on-chain, it may already be claimed: {}", reason)
            }
        }
    }
}

/// Failure reported by an EIP-1193 provider or a JSON-RPC endpoint.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("provider error (code {code:?}): {message}")]
pub struct ProviderError {
    pub code: Option<i64>,
    pub message: String,
}

impl ProviderError {
    pub const USER_REJECTED: i64 = 4001;
    pub const EXECUTION_REVERTED: i64 = 3;

    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }

    pub fn with_code(code: i64, message: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            message: message.into(),
        }
    }

    pub fn is_user_rejection(&self) -> bool {
        self.code == Some(Self::USER_REJECTED)
    }

    pub fn is_revert(&self) -> bool {
        self.code == Some(Self::EXECUTION_REVERTED)
            || self.message.to_ascii_lowercase().contains("execution reverted")
    }
}
