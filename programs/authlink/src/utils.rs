use crate::error::AuthLinkError;
use anchor_lang::prelude::*;

pub mod digest;
pub mod secp;
pub mod signature;

#[cfg(test)]
pub mod testing;

/// Decodes a fixed-size hex field the way submitters are expected to send it:
/// bare lowercase or uppercase digits, no `0x`, exactly `2 * N` characters.
pub fn decode_hex_array<const N: usize>(input: &str) -> Result<[u8; N]> {
    if input.starts_with("0x") || input.starts_with("0X") {
        msg!("Expected hex string");
        return err!(AuthLinkError::MalformedInput);
    }
    if input.len() % 2 != 0 {
        msg!("Odd number of hex digits");
        return err!(AuthLinkError::MalformedInput);
    }
    if input.len() != N * 2 {
        msg!("Binary data has incorrect size");
        return err!(AuthLinkError::MalformedInput);
    }

    let mut out = [0u8; N];
    hex::decode_to_slice(input, &mut out).map_err(|e| {
        msg!("Expected hex string: {}", e);
        error!(AuthLinkError::MalformedInput)
    })?;
    Ok(out)
}
