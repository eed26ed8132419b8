//! Local Ed25519 account used to sign every gateway write.

use std::fmt;

use ed25519_dalek::{Signer, SigningKey, VerifyingKey};
use sha3::{Digest, Sha3_256};
use zeroize::Zeroizing;

use crate::domain::AccountAddress;

/// Authentication-key scheme byte for single Ed25519 keys.
const ED25519_SCHEME: u8 = 0x00;
const PRIVATE_KEY_PREFIX: &str = "ed25519-priv-";

/// Errors raised while loading the account private key.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccountKeyError {
    /// The key was not valid hex.
    #[error("private key must be hex encoded")]
    NotHex,
    /// The decoded key was not 32 bytes long.
    #[error("private key must be 32 bytes, got {length}")]
    WrongLength { length: usize },
}

/// Signing account derived from a raw Ed25519 private key.
pub struct LocalAccount {
    signing_key: SigningKey,
    address: AccountAddress,
}

impl LocalAccount {
    /// Load an account from a hex private key.
    ///
    /// Accepts the bare hex form as well as `0x` and `ed25519-priv-0x`
    /// prefixed forms exported by the Aptos CLI.
    ///
    /// # Examples
    /// ```
    /// use recipe_gateway::outbound::aptos::LocalAccount;
    ///
    /// let key = "01".repeat(32);
    /// let bare = LocalAccount::from_private_key_hex(&key).unwrap();
    /// let prefixed = LocalAccount::from_private_key_hex(&format!("ed25519-priv-0x{key}")).unwrap();
    /// assert_eq!(bare.address(), prefixed.address());
    /// ```
    pub fn from_private_key_hex(raw: &str) -> Result<Self, AccountKeyError> {
        let trimmed = raw.trim();
        let trimmed = trimmed.strip_prefix(PRIVATE_KEY_PREFIX).unwrap_or(trimmed);
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);
        let bytes = Zeroizing::new(hex::decode(digits).map_err(|_| AccountKeyError::NotHex)?);
        let secret: Zeroizing<[u8; 32]> =
            Zeroizing::new(bytes.as_slice().try_into().map_err(|_| {
                AccountKeyError::WrongLength {
                    length: bytes.len(),
                }
            })?);
        let signing_key = SigningKey::from_bytes(&secret);
        let address = derive_address(&signing_key.verifying_key());
        Ok(Self {
            signing_key,
            address,
        })
    }

    /// On-chain address of the account.
    pub fn address(&self) -> &AccountAddress {
        &self.address
    }

    /// `0x`-prefixed hex public key.
    pub fn public_key_hex(&self) -> String {
        format!("0x{}", hex::encode(self.signing_key.verifying_key().to_bytes()))
    }

    /// Sign `message` and return the `0x`-prefixed hex signature.
    pub fn sign_hex(&self, message: &[u8]) -> String {
        format!("0x{}", hex::encode(self.signing_key.sign(message).to_bytes()))
    }
}

impl fmt::Debug for LocalAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalAccount")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

/// Address = SHA3-256(public key || scheme byte).
fn derive_address(public_key: &VerifyingKey) -> AccountAddress {
    let mut hasher = Sha3_256::new();
    hasher.update(public_key.to_bytes());
    hasher.update([ED25519_SCHEME]);
    AccountAddress::from_bytes(hasher.finalize().into())
}

#[cfg(test)]
mod tests {
    //! Key loading and address derivation.
    use super::*;
    use rstest::rstest;

    const KEY: &str = "0101010101010101010101010101010101010101010101010101010101010101";
    const PUBLIC_KEY: &str = "0x8a88e3dd7409f195fd52db2d3cba5d72ca6709bf1d94121bf3748801b40f6f5c";
    const ADDRESS: &str = "0x7df415e5b21bdaa8b2946e8f1f4278b39904e51a69627494cd3e6f2996732fbd";

    #[rstest]
    #[case(KEY)]
    #[case("0x0101010101010101010101010101010101010101010101010101010101010101")]
    #[case("ed25519-priv-0x0101010101010101010101010101010101010101010101010101010101010101")]
    #[case("  0X0101010101010101010101010101010101010101010101010101010101010101\n")]
    fn derives_the_same_address_for_every_key_form(#[case] raw: &str) {
        let account = LocalAccount::from_private_key_hex(raw).expect("valid key");
        assert_eq!(account.address().as_str(), ADDRESS);
        assert_eq!(account.public_key_hex(), PUBLIC_KEY);
    }

    #[rstest]
    fn signs_with_the_loaded_key() {
        let account = LocalAccount::from_private_key_hex(KEY).expect("valid key");
        assert_eq!(
            account.sign_hex(b"hello"),
            "0xe1430c6ebd0d53573b5c803452174f8991ef5955e0906a09e8fdc7310459e9c8\
             2a402526748c3431fe7f0e5faafbf7e703234789734063ee42be17af16438d08"
        );
    }

    #[rstest]
    #[case("zz", AccountKeyError::NotHex)]
    #[case("0x0102", AccountKeyError::WrongLength { length: 2 })]
    fn rejects_malformed_keys(#[case] raw: &str, #[case] expected: AccountKeyError) {
        let error = LocalAccount::from_private_key_hex(raw).expect_err("invalid key");
        assert_eq!(error, expected);
    }

    #[rstest]
    fn debug_output_omits_key_material() {
        let account = LocalAccount::from_private_key_hex(KEY).expect("valid key");
        let rendered = format!("{account:?}");
        assert!(rendered.contains(ADDRESS));
        assert!(!rendered.contains(KEY));
    }
}
