use crate::error::AuthLinkError;
use crate::utils::digest::COMPRESSED_KEY_LEN;
use crate::utils::signature::RecoverableSignature;
use anchor_lang::prelude::*;
use anchor_lang::solana_program::keccak;
use anchor_lang::solana_program::secp256k1_recover::secp256k1_recover;

/// Public key material recovered from a signature
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecoveredSigner {
    pub compressed_key: [u8; COMPRESSED_KEY_LEN],
    pub eth_address: [u8; 20],
}

/// Recover the signer of `digest` using the syscall
pub fn recover_signer(
    digest: &[u8; 32],
    signature: &RecoverableSignature,
) -> Result<RecoveredSigner> {
    let recovered_pubkey = secp256k1_recover(digest, signature.recovery_id, &signature.rs())
        .map_err(|e| {
            msg!("secp256k1 recovery failed: {:?}", e);
            error!(AuthLinkError::InvalidSignature)
        })?;

    // x || y without the 0x04 tag
    let uncompressed = recovered_pubkey.to_bytes();

    Ok(RecoveredSigner {
        compressed_key: compress_pubkey(&uncompressed),
        eth_address: eth_address(&uncompressed),
    })
}

/// SEC1 compressed form: 0x02/0x03 by parity of y, followed by x
pub fn compress_pubkey(uncompressed: &[u8; 64]) -> [u8; COMPRESSED_KEY_LEN] {
    let mut compressed = [0u8; COMPRESSED_KEY_LEN];
    compressed[0] = 0x02 | (uncompressed[63] & 1);
    compressed[1..].copy_from_slice(&uncompressed[..32]);
    compressed
}

/// Ethereum address is the last 20 bytes of keccak256(pubkey)
pub fn eth_address(uncompressed: &[u8; 64]) -> [u8; 20] {
    let pubkey_hash = keccak::hash(uncompressed).to_bytes();
    let mut eth_address = [0u8; 20];
    eth_address.copy_from_slice(&pubkey_hash[12..32]);
    eth_address
}
