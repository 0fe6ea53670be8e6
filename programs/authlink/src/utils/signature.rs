use crate::error::AuthLinkError;
use anchor_lang::prelude::*;

pub const WIRE_SIGNATURE_LEN: usize = 66;
pub const ETH_SIGNATURE_LEN: usize = 65;

/// Leading byte of a wire signature for the secp256k1/keccak scheme
pub const WIRE_SIGNATURE_MARKER: u8 = 0x00;
/// Ethereum `v` = recovery id + 27
pub const ETH_V_OFFSET: u8 = 27;
/// Wire recovery byte = Ethereum `v` + 4
pub const WIRE_V_OFFSET: u8 = 4;

/// secp256k1 signature in its native (r, s, recovery parity) form
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecoverableSignature {
    pub r: [u8; 32],
    pub s: [u8; 32],
    /// 0 or 1
    pub recovery_id: u8,
}

impl RecoverableSignature {
    /// Decode the 66-byte wire layout:
    /// - 0: marker (0x00)
    /// - 1: v + 4
    /// - 2..34: r
    /// - 34..66: s
    pub fn from_wire(bytes: &[u8]) -> Result<Self> {
        require_eq!(
            bytes.len(),
            WIRE_SIGNATURE_LEN,
            AuthLinkError::InvalidSignatureLength
        );
        require!(
            bytes[0] == WIRE_SIGNATURE_MARKER,
            AuthLinkError::InvalidSignature
        );

        let recovery_id = bytes[1]
            .checked_sub(ETH_V_OFFSET + WIRE_V_OFFSET)
            .filter(|id| *id <= 1)
            .ok_or_else(|| error!(AuthLinkError::InvalidSignature))?;

        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[2..34]);
        s.copy_from_slice(&bytes[34..66]);

        Ok(Self { r, s, recovery_id })
    }

    pub fn to_wire(&self) -> [u8; WIRE_SIGNATURE_LEN] {
        let mut wire = [0u8; WIRE_SIGNATURE_LEN];
        wire[0] = WIRE_SIGNATURE_MARKER;
        wire[1] = self.v() + WIRE_V_OFFSET;
        wire[2..34].copy_from_slice(&self.r);
        wire[34..66].copy_from_slice(&self.s);
        wire
    }

    /// Decode an Ethereum `r || s || v` signature
    pub fn from_eth(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != ETH_SIGNATURE_LEN {
            msg!(
                "Ethereum signature must be {} bytes, got {}",
                ETH_SIGNATURE_LEN,
                bytes.len()
            );
            return err!(AuthLinkError::MalformedInput);
        }

        let v = bytes[64];
        if v != ETH_V_OFFSET && v != ETH_V_OFFSET + 1 {
            msg!("Unsupported Ethereum recovery byte {}", v);
            return err!(AuthLinkError::MalformedInput);
        }

        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..64]);

        Ok(Self {
            r,
            s,
            recovery_id: v - ETH_V_OFFSET,
        })
    }

    pub fn to_eth(&self) -> [u8; ETH_SIGNATURE_LEN] {
        let mut eth = [0u8; ETH_SIGNATURE_LEN];
        eth[..64].copy_from_slice(&self.rs());
        eth[64] = self.v();
        eth
    }

    pub fn v(&self) -> u8 {
        self.recovery_id + ETH_V_OFFSET
    }

    /// r,s components in the layout `secp256k1_recover` expects
    pub fn rs(&self) -> [u8; 64] {
        let mut rs = [0u8; 64];
        rs[..32].copy_from_slice(&self.r);
        rs[32..].copy_from_slice(&self.s);
        rs
    }
}

/// Convert an Ethereum signature straight into the wire layout
pub fn eth_to_wire(eth_signature: &[u8]) -> Result<[u8; WIRE_SIGNATURE_LEN]> {
    Ok(RecoverableSignature::from_eth(eth_signature)?.to_wire())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::testing::assert_link_error;

    fn sample(recovery_id: u8) -> RecoverableSignature {
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        // leading zero bytes must survive the conversion
        r[5..].copy_from_slice(&[0xab; 27]);
        s[31] = 0x01;
        RecoverableSignature { r, s, recovery_id }
    }

    #[test]
    fn wire_layout() {
        let sig = sample(1);
        let wire = sig.to_wire();

        assert_eq!(wire[0], 0x00);
        assert_eq!(wire[1], 32);
        assert_eq!(&wire[2..34], &sig.r);
        assert_eq!(&wire[34..], &sig.s);
        assert_eq!(sample(0).to_wire()[1], 31);
    }

    #[test]
    fn wire_and_eth_round_trip() {
        for recovery_id in [0u8, 1] {
            let sig = sample(recovery_id);
            assert_eq!(RecoverableSignature::from_wire(&sig.to_wire()).unwrap(), sig);
            assert_eq!(RecoverableSignature::from_eth(&sig.to_eth()).unwrap(), sig);
            assert_eq!(eth_to_wire(&sig.to_eth()).unwrap(), sig.to_wire());
        }
    }

    #[test]
    fn eth_v_byte() {
        let eth = sample(1).to_eth();
        assert_eq!(eth[64], 28);
        assert_eq!(sample(0).v(), 27);
    }

    #[test]
    fn wire_length_is_checked_first() {
        let wire = sample(0).to_wire();

        assert_link_error(
            RecoverableSignature::from_wire(&wire[1..]),
            AuthLinkError::InvalidSignatureLength,
        );

        let mut long = wire.to_vec();
        long.push(0);
        assert_link_error(
            RecoverableSignature::from_wire(&long),
            AuthLinkError::InvalidSignatureLength,
        );

        assert_link_error(
            RecoverableSignature::from_wire(&[]),
            AuthLinkError::InvalidSignatureLength,
        );
    }

    #[test]
    fn rejects_bad_marker_and_recovery_byte() {
        let mut wire = sample(0).to_wire();
        wire[0] = 0x01;
        assert_link_error(
            RecoverableSignature::from_wire(&wire),
            AuthLinkError::InvalidSignature,
        );

        for bad in [0u8, 27, 30, 33] {
            let mut wire = sample(0).to_wire();
            wire[1] = bad;
            assert_link_error(
                RecoverableSignature::from_wire(&wire),
                AuthLinkError::InvalidSignature,
            );
        }
    }

    #[test]
    fn rejects_malformed_eth_signature() {
        let eth = sample(0).to_eth();
        assert_link_error(
            RecoverableSignature::from_eth(&eth[..64]),
            AuthLinkError::MalformedInput,
        );

        let mut bad_v = eth;
        bad_v[64] = 1;
        assert_link_error(
            RecoverableSignature::from_eth(&bad_v),
            AuthLinkError::MalformedInput,
        );
    }
}
