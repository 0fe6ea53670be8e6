use anchor_lang::prelude::*;

/// Plain view of a link, shared by every `LinkStore` implementation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LinkEntry {
    pub account_name: Pubkey,
    pub nonce: u64,
    pub eth_address: [u8; 20],
}

/// LinkRecord account binding a Solana account to an Ethereum address
#[account]
#[derive(Debug)]
pub struct LinkRecord {
    /// The account that proved control of the Ethereum key
    pub account_name: Pubkey,
    /// Nonce that was part of the signed message
    pub nonce: u64,
    /// Address derived from the recovered public key
    pub eth_address: [u8; 20],
    /// When this link was last written
    pub linked_at: i64,
    /// Bump seed for the PDA
    pub bump: u8,
}

impl LinkRecord {
    pub const SEED_PREFIX: &'static [u8] = b"link";
    pub const SPACE: usize = 8 + // discriminator
        32 + // account_name
        8 +  // nonce
        20 + // eth_address
        8 +  // linked_at
        1; // bump

    /// Get the PDA seeds for this account
    pub fn get_seeds(account_name: &Pubkey) -> [&[u8]; 2] {
        [Self::SEED_PREFIX, account_name.as_ref()]
    }

    /// `None` while the account is freshly allocated and has never been linked
    pub fn entry(&self) -> Option<LinkEntry> {
        if self.account_name == Pubkey::default() {
            return None;
        }
        Some(LinkEntry {
            account_name: self.account_name,
            nonce: self.nonce,
            eth_address: self.eth_address,
        })
    }
}
