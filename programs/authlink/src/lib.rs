use anchor_lang::prelude::*;

pub mod error;
pub mod events;
pub mod instructions;
pub mod state;
pub mod utils;
pub mod verifier;

use instructions::*;

declare_id!("694aGq72YamdPoHJQ6QZt8EzENUVSTEoeZBU6QTLFrGq");

#[program]
pub mod authlink {
    use super::*;

    /// Links `account_name` to the Ethereum address that signed `msg_digest`.
    ///
    /// `msg_digest` is bare hex, `sig` the 66-byte wire signature and
    /// `address_checksum` the sha256 of the signer's address, used only to
    /// derive the address index PDA.
    pub fn create_link(
        ctx: Context<CreateLink>,
        sig: Vec<u8>,
        msg_digest: String,
        nonce: u64,
        account_name: Pubkey,
        address_checksum: [u8; 32],
    ) -> Result<()> {
        instructions::create_link(ctx, sig, msg_digest, nonce, account_name, address_checksum)
    }
}
