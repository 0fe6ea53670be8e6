use crate::error::AuthLinkError;
use crate::events::{LinkCreated, LinkRebound};
use crate::state::{AddressIndex, LinkEntry, LinkRecord};
use crate::verifier::{self, LinkStore, LinkSubmission};
use anchor_lang::prelude::*;

/// Create link instruction - proves `account_name` holds an Ethereum key and
/// records the binding in the LinkRecord and AddressIndex PDAs
pub fn create_link(
    ctx: Context<CreateLink>,
    sig: Vec<u8>,
    msg_digest: String,
    nonce: u64,
    account_name: Pubkey,
    address_checksum: [u8; 32],
) -> Result<()> {
    // 1) Decode the digest; malformed hex never reaches the verifier
    let submission = LinkSubmission::parse(sig, &msg_digest, nonce, account_name)?;

    let clock = Clock::get()?;
    let actor = ctx.accounts.authority.key();
    let link_key = ctx.accounts.link_record.key();

    // 2) Authority, signature, digest and uniqueness checks, then the write
    let mut store = PdaLinkStore {
        link_record: &mut ctx.accounts.link_record,
        link_bump: ctx.bumps.link_record,
        address_index: &mut ctx.accounts.address_index,
        index_bump: ctx.bumps.address_index,
        index_checksum: address_checksum,
        linked_at: clock.unix_timestamp,
    };
    let outcome = verifier::verify_and_link(&mut store, &actor, &submission)?;

    // 3) Release the index of the address this account no longer holds
    match outcome.previous_eth_address {
        Some(previous) if outcome.is_rebind() => {
            let stale = stale_address_index(
                ctx.accounts.previous_address_index.as_ref(),
                &previous,
                &account_name,
                ctx.program_id,
            )?;
            stale.close(ctx.accounts.authority.to_account_info())?;

            emit!(LinkRebound {
                link: link_key,
                account_name,
                previous_eth_address: previous,
                eth_address: outcome.entry.eth_address,
                signer_key: outcome.signer.compressed_key,
                nonce,
                linked_at: clock.unix_timestamp,
            });
        }
        _ => {
            emit!(LinkCreated {
                link: link_key,
                account_name,
                eth_address: outcome.entry.eth_address,
                signer_key: outcome.signer.compressed_key,
                nonce,
                linked_at: clock.unix_timestamp,
            });
        }
    }

    msg!(
        "Linked {} to 0x{} (nonce {})",
        account_name,
        hex::encode(outcome.entry.eth_address),
        nonce
    );

    Ok(())
}

/// The index a rebinding account must release: the PDA of `previous`,
/// still held by `account_name`
fn stale_address_index<'a, 'info>(
    previous_address_index: Option<&'a Account<'info, AddressIndex>>,
    previous: &[u8; 20],
    account_name: &Pubkey,
    program_id: &Pubkey,
) -> Result<&'a Account<'info, AddressIndex>> {
    let stale =
        previous_address_index.ok_or_else(|| error!(AuthLinkError::StaleAddressIndex))?;

    let (expected, _) = AddressIndex::find_address(previous, program_id);
    require_keys_eq!(stale.key(), expected, AuthLinkError::StaleAddressIndex);
    require_keys_eq!(
        stale.account_name,
        *account_name,
        AuthLinkError::StaleAddressIndex
    );
    Ok(stale)
}

/// `LinkStore` over the two PDAs passed to `create_link`.
///
/// Only the address index derived from `index_checksum` is visible, so any
/// lookup or write for another address fails instead of silently missing.
struct PdaLinkStore<'a, 'info> {
    link_record: &'a mut Account<'info, LinkRecord>,
    link_bump: u8,
    address_index: &'a mut Account<'info, AddressIndex>,
    index_bump: u8,
    index_checksum: [u8; 32],
    linked_at: i64,
}

impl PdaLinkStore<'_, '_> {
    fn check_index(&self, eth_address: &[u8; 20]) -> Result<()> {
        require!(
            AddressIndex::checksum(eth_address) == self.index_checksum,
            AuthLinkError::AddressIndexMismatch
        );
        Ok(())
    }
}

impl LinkStore for PdaLinkStore<'_, '_> {
    fn get(&self, account_name: &Pubkey) -> Result<Option<LinkEntry>> {
        Ok(self
            .link_record
            .entry()
            .filter(|entry| entry.account_name == *account_name))
    }

    fn find_by_address(&self, eth_address: &[u8; 20]) -> Result<Option<Pubkey>> {
        self.check_index(eth_address)?;
        Ok(self.address_index.holder())
    }

    fn upsert(&mut self, entry: LinkEntry) -> Result<()> {
        self.check_index(&entry.eth_address)?;

        let link_record = &mut self.link_record;
        link_record.account_name = entry.account_name;
        link_record.nonce = entry.nonce;
        link_record.eth_address = entry.eth_address;
        link_record.linked_at = self.linked_at;
        link_record.bump = self.link_bump;

        let address_index = &mut self.address_index;
        address_index.eth_address = entry.eth_address;
        address_index.account_name = entry.account_name;
        address_index.bump = self.index_bump;

        Ok(())
    }
}

#[derive(Accounts)]
#[instruction(sig: Vec<u8>, msg_digest: String, nonce: u64, account_name: Pubkey, address_checksum: [u8; 32])]
pub struct CreateLink<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,
    #[account(
        init_if_needed,
        payer = authority,
        space = LinkRecord::SPACE,
        seeds = [
            LinkRecord::SEED_PREFIX,
            account_name.as_ref(),
        ],
        bump
    )]
    pub link_record: Account<'info, LinkRecord>,
    #[account(
        init_if_needed,
        payer = authority,
        space = AddressIndex::SPACE,
        seeds = [
            AddressIndex::SEED_PREFIX,
            &address_checksum,
        ],
        bump
    )]
    pub address_index: Account<'info, AddressIndex>,
    /// Index of the address being replaced; required only when rebinding
    #[account(mut)]
    pub previous_address_index: Option<Account<'info, AddressIndex>>,
    pub system_program: Program<'info, System>,
}
