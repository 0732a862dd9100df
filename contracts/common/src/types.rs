//! Core Types for the REYLD token
//!
//! Addresses and fixed-point amounts shared by every module.

use core::fmt;

use borsh::{BorshDeserialize, BorshSerialize};
use primitive_types::U256;
use serde::{Deserialize, Serialize};

use crate::constants::{address::ADDRESS_LEN, genesis, token};
use crate::String;

/// Type alias for account addresses (20-byte EVM-style identifier)
pub type Address = [u8; ADDRESS_LEN];

/// The zero address. Never a valid owner or transfer target.
pub const ZERO_ADDRESS: Address = [0u8; ADDRESS_LEN];

/// Returns true if `address` is the zero address
pub fn is_zero_address(address: &Address) -> bool {
    *address == ZERO_ADDRESS
}

/// Parse a hex address, with or without a `0x` prefix.
pub fn parse_address(input: &str) -> Result<Address, hex::FromHexError> {
    let digits = input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
        .unwrap_or(input);
    let mut address = ZERO_ADDRESS;
    hex::decode_to_slice(digits, &mut address)?;
    Ok(address)
}

/// Format an address as `0x`-prefixed lowercase hex
pub fn format_address(address: &Address) -> String {
    let mut out = String::from("0x");
    out.push_str(&hex::encode(address));
    out
}

// ============ Amount ============

/// Token amount in base units (18 fractional decimal digits).
///
/// Backed by a 256-bit unsigned integer. Arithmetic is only exposed in
/// checked form so callers decide which error an overflow maps to.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Amount(pub U256);

impl Amount {
    /// Zero amount
    pub const ZERO: Amount = Amount(U256([0; 4]));

    /// Largest representable amount
    pub const MAX: Amount = Amount(U256([u64::MAX; 4]));

    /// Amount from whole tokens (scaled by 10^18). Cannot overflow 256 bits.
    pub fn from_whole(units: u64) -> Self {
        Self(U256::from(units) * U256::from(token::ONE))
    }

    /// Supply minted to the owner at construction
    pub fn initial_supply() -> Self {
        Self::from_whole(genesis::INITIAL_SUPPLY_UNITS)
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn checked_add(self, other: Amount) -> Option<Amount> {
        self.0.checked_add(other.0).map(Amount)
    }

    pub fn checked_sub(self, other: Amount) -> Option<Amount> {
        self.0.checked_sub(other.0).map(Amount)
    }

    /// Split into (whole tokens, fractional base units)
    pub fn split_decimals(&self) -> (U256, U256) {
        let one = U256::from(token::ONE);
        (self.0 / one, self.0 % one)
    }

    /// Big-endian 32-byte encoding
    pub fn to_be_bytes(&self) -> [u8; 32] {
        let mut out = [0u8; 32];
        for (i, limb) in self.0 .0.iter().rev().enumerate() {
            out[i * 8..(i + 1) * 8].copy_from_slice(&limb.to_be_bytes());
        }
        out
    }
}

impl From<u64> for Amount {
    fn from(value: u64) -> Self {
        Self(U256::from(value))
    }
}

impl From<u128> for Amount {
    fn from(value: u128) -> Self {
        Self(U256::from(value))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

// Borsh encodes the four little-endian u64 limbs.
impl BorshSerialize for Amount {
    fn serialize<W: borsh::io::Write>(&self, writer: &mut W) -> borsh::io::Result<()> {
        BorshSerialize::serialize(&self.0 .0, writer)
    }
}

impl BorshDeserialize for Amount {
    fn deserialize_reader<R: borsh::io::Read>(reader: &mut R) -> borsh::io::Result<Self> {
        let limbs = <[u64; 4]>::deserialize_reader(reader)?;
        Ok(Self(U256(limbs)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_address_with_prefix() {
        let addr = parse_address("0x0Bb18a1674044D7DfA9A72A1EE5a82f4e7f89b0E").unwrap();
        assert_eq!(addr[0], 0x0b);
        assert_eq!(addr[19], 0x0e);
        assert_eq!(
            format_address(&addr),
            "0x0bb18a1674044d7dfa9a72a1ee5a82f4e7f89b0e"
        );
    }

    #[test]
    fn test_parse_address_rejects_wrong_length() {
        assert!(parse_address("0x1234").is_err());
        assert!(parse_address("zz").is_err());
    }

    #[test]
    fn test_zero_address() {
        assert!(is_zero_address(&ZERO_ADDRESS));
        assert!(!is_zero_address(&[1u8; 20]));
    }

    #[test]
    fn test_initial_supply() {
        let expected = U256::from(10_000_000_000u64) * U256::exp10(18);
        assert_eq!(Amount::initial_supply().0, expected);
    }

    #[test]
    fn test_checked_arithmetic() {
        assert_eq!(Amount::MAX.checked_add(Amount::from(1u64)), None);
        assert_eq!(Amount::ZERO.checked_sub(Amount::from(1u64)), None);
        assert_eq!(
            Amount::from(5u64).checked_sub(Amount::from(3u64)),
            Some(Amount::from(2u64))
        );
    }

    #[test]
    fn test_split_decimals() {
        let amount = Amount::from_whole(3)
            .checked_add(Amount::from(7u64))
            .unwrap();
        let (whole, frac) = amount.split_decimals();
        assert_eq!(whole, U256::from(3u64));
        assert_eq!(frac, U256::from(7u64));
    }

    #[test]
    fn test_be_bytes() {
        let bytes = Amount::from(0x0102u64).to_be_bytes();
        assert_eq!(bytes[30], 0x01);
        assert_eq!(bytes[31], 0x02);
        assert!(bytes[..30].iter().all(|b| *b == 0));
    }

    #[test]
    fn test_borsh_limbs() {
        let amount = Amount::from_whole(42);
        let bytes = borsh::to_vec(&amount).unwrap();
        assert_eq!(bytes.len(), 32);
        assert_eq!(Amount::try_from_slice(&bytes).unwrap(), amount);
    }
}
