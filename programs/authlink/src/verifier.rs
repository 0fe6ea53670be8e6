use crate::error::AuthLinkError;
use crate::state::LinkEntry;
use crate::utils::decode_hex_array;
use crate::utils::digest::build_link_digest;
use crate::utils::secp::{recover_signer, RecoveredSigner};
use crate::utils::signature::RecoverableSignature;
use anchor_lang::prelude::*;

/// Storage the verifier reads and writes links through.
///
/// `get` is keyed by account, `find_by_address` goes through the secondary
/// address index and `upsert` replaces the account's link and refreshes that
/// index. Implementations never delete.
pub trait LinkStore {
    fn get(&self, account_name: &Pubkey) -> Result<Option<LinkEntry>>;
    fn find_by_address(&self, eth_address: &[u8; 20]) -> Result<Option<Pubkey>>;
    fn upsert(&mut self, entry: LinkEntry) -> Result<()>;
}

/// A decoded `create_link` request
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinkSubmission {
    /// Wire signature, expected to be 66 bytes
    pub sig: Vec<u8>,
    pub msg_digest: [u8; 32],
    pub nonce: u64,
    pub account_name: Pubkey,
}

impl LinkSubmission {
    /// Decode the hex digest; nothing else is inspected here
    pub fn parse(
        sig: Vec<u8>,
        msg_digest: &str,
        nonce: u64,
        account_name: Pubkey,
    ) -> Result<Self> {
        Ok(Self {
            sig,
            msg_digest: decode_hex_array::<32>(msg_digest)?,
            nonce,
            account_name,
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LinkOutcome {
    pub entry: LinkEntry,
    pub signer: RecoveredSigner,
    /// Address the account was bound to before this link, if any
    pub previous_eth_address: Option<[u8; 20]>,
}

impl LinkOutcome {
    /// True when the account moved to a different address
    pub fn is_rebind(&self) -> bool {
        matches!(self.previous_eth_address, Some(prev) if prev != self.entry.eth_address)
    }
}

/// Verify `submission` on behalf of `actor` and record the link.
///
/// Every check is terminal and runs before the store is written, so a
/// failure leaves the store untouched.
pub fn verify_and_link<S: LinkStore>(
    store: &mut S,
    actor: &Pubkey,
    submission: &LinkSubmission,
) -> Result<LinkOutcome> {
    let account_name = submission.account_name;

    // 1) The account being linked must authorize the transaction
    if *actor != account_name {
        msg!("missing authority of {}", account_name);
        return err!(AuthLinkError::AuthorityMismatch);
    }

    // 2) Fixed-length wire signature, rejected before any parsing
    let signature = RecoverableSignature::from_wire(&submission.sig)?;

    // 3) Recover the signing key from the supplied digest
    let signer = recover_signer(&submission.msg_digest, &signature)?;

    // 4) Rebuild digest = keccak256(prefix || keccak256(key || nonce || account))
    let expected_digest =
        build_link_digest(&signer.compressed_key, submission.nonce, &account_name);
    require!(
        expected_digest == submission.msg_digest,
        AuthLinkError::DigestMismatch
    );

    // 5) One account per Ethereum address
    if let Some(holder) = store.find_by_address(&signer.eth_address)? {
        if holder != account_name {
            msg!(
                "0x{} is linked to {}",
                hex::encode(signer.eth_address),
                holder
            );
            return err!(AuthLinkError::AddressAlreadyLinked);
        }
    }

    let previous_eth_address = store.get(&account_name)?.map(|entry| entry.eth_address);

    let entry = LinkEntry {
        account_name,
        nonce: submission.nonce,
        eth_address: signer.eth_address,
    };
    store.upsert(entry)?;

    Ok(LinkOutcome {
        entry,
        signer,
        previous_eth_address,
    })
}
