//! Protocol Constants
//!
//! Token metadata and the fixed genesis supply.

/// Token Metadata
pub mod token {
    /// Token name
    pub const NAME: &str = "REYLD Token";
    /// Token symbol
    pub const SYMBOL: &str = "REYLD";
    /// Decimal places (same as ether)
    pub const DECIMALS: u8 = 18;
    /// One whole token in base units (10^18)
    pub const ONE: u128 = 1_000_000_000_000_000_000;
}

/// Genesis supply configuration
pub mod genesis {
    /// Whole tokens minted to the initial owner at construction
    pub const INITIAL_SUPPLY_UNITS: u64 = 10_000_000_000;
}

/// Address configuration
pub mod address {
    /// Address width in bytes
    pub const ADDRESS_LEN: usize = 20;
}
