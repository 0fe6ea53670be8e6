use anchor_lang::prelude::*;

#[error_code]
pub enum AuthLinkError {
    #[msg("Missing authority of the account being linked.")]
    AuthorityMismatch,
    #[msg("Malformed binary input.")]
    MalformedInput,
    #[msg("Signature must be 66 bytes long.")]
    InvalidSignatureLength,
    #[msg("Invalid Message Digest, does not match recreated value.")]
    DigestMismatch,
    #[msg("Ethereum address already linked to a different account.")]
    AddressAlreadyLinked,
    #[msg("Signature could not be decoded or recovered.")]
    InvalidSignature,
    #[msg("Address index account was not derived from the recovered address.")]
    AddressIndexMismatch,
    #[msg("Previous address index must be supplied when rebinding.")]
    StaleAddressIndex,
}
