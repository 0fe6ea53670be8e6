use anchor_lang::prelude::*;

#[event]
pub struct LinkCreated {
    pub link: Pubkey,
    pub account_name: Pubkey,
    pub eth_address: [u8; 20],
    /// Compressed secp256k1 key the account should be permissioned with
    pub signer_key: [u8; 33],
    pub nonce: u64,
    pub linked_at: i64,
}

#[event]
pub struct LinkRebound {
    pub link: Pubkey,
    pub account_name: Pubkey,
    pub previous_eth_address: [u8; 20],
    pub eth_address: [u8; 20],
    pub signer_key: [u8; 33],
    pub nonce: u64,
    pub linked_at: i64,
}
