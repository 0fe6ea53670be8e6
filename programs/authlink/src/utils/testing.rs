//! Signing helpers shared by the unit tests.

use crate::error::AuthLinkError;
use crate::utils::digest::{build_link_digest, COMPRESSED_KEY_LEN};
use crate::utils::secp::eth_address;
use crate::utils::signature::{RecoverableSignature, WIRE_SIGNATURE_LEN};
use anchor_lang::error::Error;
use anchor_lang::prelude::*;

pub const TEST_SECRET: [u8; 32] = [
    0x52, 0xb1, 0x9a, 0x2d, 0xed, 0x13, 0xf4, 0x49, 0x61, 0x67, 0x89, 0x52, 0x85, 0x26, 0x6d, 0x39,
    0x24, 0xb4, 0x1b, 0xba, 0x3b, 0x35, 0x06, 0x3b, 0x40, 0x32, 0x1e, 0x80, 0x7c, 0xaa, 0x64, 0x42,
];

pub const OTHER_SECRET: [u8; 32] = [0x11; 32];

fn public_key(secret: &[u8; 32]) -> libsecp256k1::PublicKey {
    let secret_key = libsecp256k1::SecretKey::parse(secret).unwrap();
    libsecp256k1::PublicKey::from_secret_key(&secret_key)
}

pub fn compressed_key(secret: &[u8; 32]) -> [u8; COMPRESSED_KEY_LEN] {
    public_key(secret).serialize_compressed()
}

pub fn eth_address_of(secret: &[u8; 32]) -> [u8; 20] {
    let serialized = public_key(secret).serialize();
    let mut uncompressed = [0u8; 64];
    uncompressed.copy_from_slice(&serialized[1..]);
    eth_address(&uncompressed)
}

pub fn sign_digest(secret: &[u8; 32], digest: &[u8; 32]) -> RecoverableSignature {
    let secret_key = libsecp256k1::SecretKey::parse(secret).unwrap();
    let (signature, recovery_id) =
        libsecp256k1::sign(&libsecp256k1::Message::parse(digest), &secret_key);
    let rs = signature.serialize();

    let mut r = [0u8; 32];
    let mut s = [0u8; 32];
    r.copy_from_slice(&rs[..32]);
    s.copy_from_slice(&rs[32..]);
    RecoverableSignature {
        r,
        s,
        recovery_id: recovery_id.serialize(),
    }
}

/// What an off-chain submitter produces for `(secret, nonce, account)`
pub struct SignedLink {
    pub wire_sig: [u8; WIRE_SIGNATURE_LEN],
    pub msg_digest: [u8; 32],
    pub eth_address: [u8; 20],
}

pub fn sign_link(secret: &[u8; 32], nonce: u64, account_name: &Pubkey) -> SignedLink {
    let msg_digest = build_link_digest(&compressed_key(secret), nonce, account_name);
    let eth_sig = sign_digest(secret, &msg_digest).to_eth();

    SignedLink {
        wire_sig: crate::utils::signature::eth_to_wire(&eth_sig).unwrap(),
        msg_digest,
        eth_address: eth_address_of(secret),
    }
}

pub fn assert_link_error<T: std::fmt::Debug>(result: Result<T>, expected: AuthLinkError) {
    match result {
        Ok(value) => panic!("expected {:?}, got Ok({:?})", expected, value),
        Err(Error::AnchorError(e)) => assert_eq!(
            e.error_code_number,
            u32::from(expected),
            "expected {:?}, got {}",
            expected,
            e.error_name
        ),
        Err(other) => panic!("expected {:?}, got {:?}", expected, other),
    }
}
