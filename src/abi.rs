//! Contract interfaces the portal calls.
use alloy_sol_types::sol;

sol! {
    /// Permit2 `ISignatureTransfer`, limited to the single-transfer redemption.
    interface ISignatureTransfer {
        struct TokenPermissions {
            address token;
            uint256 amount;
        }

        struct PermitTransferFrom {
            TokenPermissions permitted;
            uint256 nonce;
            uint256 deadline;
        }

        struct SignatureTransferDetails {
            address to;
            uint256 requestedAmount;
        }

        function permitTransferFrom(
            PermitTransferFrom memory permit,
            SignatureTransferDetails calldata transferDetails,
            address owner,
            bytes calldata signature
        ) external;
    }

    interface IERC20Metadata {
        function symbol() external view returns (string);
    }
}
