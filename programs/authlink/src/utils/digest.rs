use anchor_lang::prelude::*;
use anchor_lang::solana_program::keccak;

/// Header Ethereum wallets prepend to a 32-byte message under `personal_sign`
pub const PERSONAL_SIGN_PREFIX: &[u8] = b"\x19Ethereum Signed Message:\n32";

pub const COMPRESSED_KEY_LEN: usize = 33;

/// Build the raw link message: compressed key bytes, the nonce as decimal
/// digits, then the account's textual form
///
/// The key goes in as its 33 raw bytes. Clients that concatenate the key's
/// hex text instead (as the older TypeScript tooling did) produce a
/// different digest, and their links fail with `DigestMismatch`.
pub fn link_message(
    compressed_key: &[u8; COMPRESSED_KEY_LEN],
    nonce: u64,
    account_name: &Pubkey,
) -> Vec<u8> {
    let nonce_digits = nonce.to_string();
    let account_text = account_name.to_string();

    let mut message =
        Vec::with_capacity(COMPRESSED_KEY_LEN + nonce_digits.len() + account_text.len());
    message.extend_from_slice(compressed_key);
    message.extend_from_slice(nonce_digits.as_bytes());
    message.extend_from_slice(account_text.as_bytes());
    message
}

pub fn message_hash(message: &[u8]) -> [u8; 32] {
    keccak::hash(message).to_bytes()
}

/// keccak256("\x19Ethereum Signed Message:\n32" || message_hash)
pub fn personal_sign_digest(message_hash: &[u8; 32]) -> [u8; 32] {
    keccak::hashv(&[PERSONAL_SIGN_PREFIX, message_hash.as_slice()]).to_bytes()
}

/// The digest an Ethereum key holder signs to link `account_name`
pub fn build_link_digest(
    compressed_key: &[u8; COMPRESSED_KEY_LEN],
    nonce: u64,
    account_name: &Pubkey,
) -> [u8; 32] {
    let message = link_message(compressed_key, nonce, account_name);
    personal_sign_digest(&message_hash(&message))
}

/// Same as [`build_link_digest`] with the compressed key given as bare hex
pub fn build_link_digest_hex(
    compressed_key_hex: &str,
    nonce: u64,
    account_name: &Pubkey,
) -> Result<[u8; 32]> {
    let compressed_key = crate::utils::decode_hex_array::<COMPRESSED_KEY_LEN>(compressed_key_hex)?;
    Ok(build_link_digest(&compressed_key, nonce, account_name))
}
