//! Personal-message signature verification.
//!
//! EOAs are checked by EIP-191 recovery. When recovery yields a different
//! address and the claimed address holds code, the contract is asked via
//! ERC-1271 instead.

use alloy::primitives::{eip191_hash_message, Address, Bytes, Signature};

use crate::blockchain::client::BlockchainClient;
use crate::blockchain::contract::{IERC1271, ERC1271_MAGIC_VALUE};
use crate::blockchain::types::{BlockchainError, BlockchainResult};

/// Recover the EOA that signed `message`, or `None` if the signature is
/// not a well-formed 65-byte hex string.
pub fn recover_signer(message: &str, signature: &str) -> Option<Address> {
    let bytes = alloy::hex::decode(signature.trim()).ok()?;
    let signature = Signature::try_from(bytes.as_slice()).ok()?;
    signature.recover_address_from_msg(message).ok()
}

/// Check that `signature` over `message` was produced by `address`.
///
/// Signatures that are not hex verify as `false` without touching the
/// node. Well-formed hex that does not recover to `address` needs an
/// `eth_getCode` lookup (and, for contracts, an ERC-1271 call), so RPC
/// failures on that path are returned as errors.
pub async fn verify_message(
    client: &BlockchainClient,
    address: Address,
    message: &str,
    signature: &str,
) -> BlockchainResult<bool> {
    let Ok(signature_bytes) = alloy::hex::decode(signature.trim()) else {
        return Ok(false);
    };
    if signature_bytes.is_empty() {
        return Ok(false);
    }

    if recover_signer(message, signature) == Some(address) {
        return Ok(true);
    }

    let code = client.get_code_at(address).await?;
    if code.is_empty() {
        return Ok(false);
    }

    let hash = eip191_hash_message(message);
    let signature_bytes = Bytes::from(signature_bytes);
    let magic = client
        .call_contract("isValidSignature", move |provider| {
            let signature = signature_bytes.clone();
            async move {
                let wallet = IERC1271::new(address, provider);
                wallet.isValidSignature(hash, signature).call().await
            }
        })
        .await;

    match magic {
        Ok(value) => Ok(value.0 == ERC1271_MAGIC_VALUE),
        Err(BlockchainError::Contract(e)) => {
            // A revert here means the contract rejected the signature.
            tracing::debug!(%address, error = %e, "ERC-1271 check failed");
            Ok(false)
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockchain::client::test_support::mocked;
    use crate::blockchain::types::{BlockchainConfig, ChainId};
    use crate::blockchain::wallet::Wallet;
    use alloy::primitives::FixedBytes;
    use alloy::providers::mock::Asserter;
    use alloy::sol_types::SolCall;

    const TEST_PRIVATE_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    fn wallet() -> Wallet {
        Wallet::from_private_key(TEST_PRIVATE_KEY, ChainId(31337)).unwrap()
    }

    #[tokio::test]
    async fn test_recover_signer_round_trip() {
        let wallet = wallet();
        let signature = wallet.sign_message_hex("start lottery").await.unwrap();
        assert_eq!(recover_signer("start lottery", &signature), Some(wallet.address()));
    }

    #[tokio::test]
    async fn test_wrong_message_recovers_other_address() {
        let wallet = wallet();
        let signature = wallet.sign_message_hex("start lottery").await.unwrap();
        assert_ne!(recover_signer("close lottery", &signature), Some(wallet.address()));
    }

    #[test]
    fn test_malformed_signature() {
        assert_eq!(recover_signer("start lottery", "0xdeadbeef"), None);
        assert_eq!(recover_signer("start lottery", "not hex"), None);
        assert_eq!(recover_signer("start lottery", ""), None);
    }

    fn client_over(asserter: &Asserter) -> BlockchainClient {
        BlockchainClient::from_providers(mocked(asserter), Vec::new(), BlockchainConfig::default())
    }

    fn magic_response(magic: [u8; 4]) -> Bytes {
        IERC1271::isValidSignatureCall::abi_encode_returns(&FixedBytes::from(magic)).into()
    }

    const CONTRACT_WALLET: Address = Address::repeat_byte(0x42);

    #[tokio::test]
    async fn test_eoa_signature_needs_no_rpc() {
        let asserter = Asserter::new();
        let wallet = wallet();
        let signature = wallet.sign_message_hex("close lottery").await.unwrap();

        let valid = verify_message(&client_over(&asserter), wallet.address(), "close lottery", &signature)
            .await
            .unwrap();
        assert!(valid);
    }

    #[tokio::test]
    async fn test_non_hex_signature_rejected_without_rpc() {
        // Nothing listens here, so any RPC would surface as an error.
        let config = BlockchainConfig {
            rpc_url: "http://127.0.0.1:1".to_string(),
            rpc_timeout_secs: 1,
            ..Default::default()
        };
        let client = BlockchainClient::new(config).await.unwrap();

        let valid = verify_message(&client, wallet().address(), "start lottery", "not hex")
            .await
            .unwrap();
        assert!(!valid);
    }

    #[tokio::test]
    async fn test_wrong_signer_without_code_is_rejected() {
        let asserter = Asserter::new();
        asserter.push_success(&Bytes::new());
        let signature = wallet().sign_message_hex("start lottery").await.unwrap();

        let valid = verify_message(&client_over(&asserter), CONTRACT_WALLET, "start lottery", &signature)
            .await
            .unwrap();
        assert!(!valid);
        // Only eth_getCode was asked.
        assert!(asserter.read_q().is_empty());
    }

    #[tokio::test]
    async fn test_contract_wallet_accepts_with_magic_value() {
        let asserter = Asserter::new();
        asserter.push_success(&Bytes::from_static(&[0x60, 0x80]));
        asserter.push_success(&magic_response(ERC1271_MAGIC_VALUE));
        let signature = wallet().sign_message_hex("start lottery").await.unwrap();

        let valid = verify_message(&client_over(&asserter), CONTRACT_WALLET, "start lottery", &signature)
            .await
            .unwrap();
        assert!(valid);
    }

    #[tokio::test]
    async fn test_contract_wallet_other_value_is_rejected() {
        let asserter = Asserter::new();
        asserter.push_success(&Bytes::from_static(&[0x60, 0x80]));
        asserter.push_success(&magic_response([0xff, 0xff, 0xff, 0xff]));
        let signature = wallet().sign_message_hex("start lottery").await.unwrap();

        let valid = verify_message(&client_over(&asserter), CONTRACT_WALLET, "start lottery", &signature)
            .await
            .unwrap();
        assert!(!valid);
    }

    #[tokio::test]
    async fn test_contract_wallet_revert_is_rejected() {
        let asserter = Asserter::new();
        asserter.push_success(&Bytes::from_static(&[0x60, 0x80]));
        asserter.push_failure_msg("execution reverted");

        let valid = verify_message(&client_over(&asserter), CONTRACT_WALLET, "start lottery", "0xdeadbeef")
            .await
            .unwrap();
        assert!(!valid);
    }
}
