//! SS58 address encoding
//!
//! `base58(prefix || public key || checksum)` where the checksum is taken
//! from `blake2b-512("SS58PRE" || prefix || public key)`.

use crate::network::Encryption;
use crate::{Error, Result};

/// Generic Substrate prefix, used for root keys and unknown networks
pub const GENERIC_SUBSTRATE_PREFIX: u16 = 42;

/// Largest prefix representable in the two-byte form
pub const MAX_SS58_PREFIX: u16 = 16_383;

const CHECKSUM_PREIMAGE: &[u8] = b"SS58PRE";

/// Encode a public key for display.
///
/// Ethereum keys are rendered as `0x` hex, everything else as SS58.
pub fn encode_address(public_key: &[u8], prefix: u16, encryption: Encryption) -> Result<String> {
    if public_key.is_empty() {
        return Err(Error::InvalidPublicKey("empty public key".to_string()));
    }
    match encryption {
        Encryption::Ethereum => Ok(format!("0x{}", hex::encode(public_key))),
        _ => encode_ss58(public_key, prefix),
    }
}

fn encode_ss58(public_key: &[u8], prefix: u16) -> Result<String> {
    if prefix > MAX_SS58_PREFIX {
        return Err(Error::InvalidPrefix(prefix));
    }

    let mut data = Vec::with_capacity(public_key.len() + 4);
    if prefix < 64 {
        data.push(prefix as u8);
    } else {
        let first = (((prefix & 0b0000_0000_1111_1100) as u8) >> 2) | 0b0100_0000;
        let second = ((prefix >> 8) as u8) | (((prefix & 0b0000_0000_0000_0011) as u8) << 6);
        data.push(first);
        data.push(second);
    }
    data.extend_from_slice(public_key);

    let mut state = blake2b_simd::Params::new().hash_length(64).to_state();
    state.update(CHECKSUM_PREIMAGE);
    state.update(&data);
    let hash = state.finalize();

    // 32/33-byte keys carry a two byte checksum, short account indices one
    let checksum_len = match public_key.len() {
        32 | 33 => 2,
        _ => 1,
    };
    data.extend_from_slice(&hash.as_bytes()[..checksum_len]);

    Ok(bs58::encode(data).into_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALICE: &str = "d43593c715fdd31c61141abd04a99fd6822c8558854ccde39a5684e7a56da27d";

    fn alice() -> Vec<u8> {
        hex::decode(ALICE).unwrap()
    }

    #[test]
    fn test_generic_substrate_vector() {
        let address = encode_address(&alice(), 42, Encryption::Sr25519).unwrap();
        assert_eq!(address, "5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY");
    }

    #[test]
    fn test_polkadot_vector() {
        let address = encode_address(&alice(), 0, Encryption::Sr25519).unwrap();
        assert_eq!(address, "15oF4uVJwmo4TdGW7VfQxNLavjCXviqxT9S1MgbjMNHr6Sp5");
    }

    #[test]
    fn test_two_byte_prefix_is_longer() {
        let short = encode_address(&alice(), 42, Encryption::Sr25519).unwrap();
        let long = encode_address(&alice(), 1_284, Encryption::Sr25519).unwrap();
        assert_ne!(short, long);
        assert!(long.len() > short.len());
    }

    #[test]
    fn test_prefix_out_of_range() {
        let err = encode_address(&alice(), MAX_SS58_PREFIX + 1, Encryption::Sr25519).unwrap_err();
        assert!(matches!(err, Error::InvalidPrefix(16_384)));
    }

    #[test]
    fn test_ethereum_is_hex() {
        let address = encode_address(&[0xab, 0xcd], 1, Encryption::Ethereum).unwrap();
        assert_eq!(address, "0xabcd");
    }

    #[test]
    fn test_empty_key_rejected() {
        assert!(encode_address(&[], 42, Encryption::Ed25519).is_err());
    }
}
