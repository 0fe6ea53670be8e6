use anchor_lang::prelude::*;
use anchor_lang::solana_program::hash;

/// Secondary index entry, one per linked Ethereum address
#[account]
#[derive(Debug)]
pub struct AddressIndex {
    pub eth_address: [u8; 20],
    /// Account currently holding the address
    pub account_name: Pubkey,
    pub bump: u8,
}

impl AddressIndex {
    pub const SEED_PREFIX: &'static [u8] = b"eth_address";
    pub const SPACE: usize = 8 + // discriminator
        20 + // eth_address
        32 + // account_name
        1; // bump

    /// Fixed-width index key: sha256 of the raw address bytes
    pub fn checksum(eth_address: &[u8; 20]) -> [u8; 32] {
        hash::hash(eth_address).to_bytes()
    }

    pub fn get_seeds(checksum: &[u8; 32]) -> [&[u8]; 2] {
        [Self::SEED_PREFIX, &checksum[..]]
    }

    pub fn find_address(eth_address: &[u8; 20], program_id: &Pubkey) -> (Pubkey, u8) {
        let checksum = Self::checksum(eth_address);
        Pubkey::find_program_address(&Self::get_seeds(&checksum), program_id)
    }

    /// Owner of the address, if this index has been written
    pub fn holder(&self) -> Option<Pubkey> {
        if self.account_name == Pubkey::default() {
            None
        } else {
            Some(self.account_name)
        }
    }
}
