//! Validation Helpers for the REYLD token
//!
//! Guard functions invoked at the top of each gated operation, before any
//! state is touched.
//!
//! ```rust,ignore
//! use reyld_common::validation::{check, require_valid_address};
//!
//! check!(!state.is_paused, ReyldError::SystemPaused);
//! require_valid_address(&to, ReyldError::TRANSFER_TO_ZERO)?;
//! ```

use crate::{
    errors::{DebitOp, ReyldError, ReyldResult},
    types::{is_zero_address, Address, Amount},
};

// ============ Validation Macro ============

/// Check a condition and return an error if it fails.
#[macro_export]
macro_rules! check {
    ($condition:expr, $error:expr) => {
        if !($condition) {
            return Err($error);
        }
    };
}

pub use check;

// ============ Common Validation Helpers ============

/// Require address to not be zero.
pub fn require_valid_address(address: &Address, reason: &'static str) -> ReyldResult<()> {
    check!(!is_zero_address(address), ReyldError::InvalidAddress { reason });
    Ok(())
}

/// Balance left after debiting `requested` from `available`.
pub fn remaining_balance(available: Amount, requested: Amount, op: DebitOp) -> ReyldResult<Amount> {
    available
        .checked_sub(requested)
        .ok_or(ReyldError::InsufficientBalance {
            available,
            requested,
            op,
        })
}

/// Allowance left after spending `requested` out of `available`.
pub fn remaining_allowance(available: Amount, requested: Amount) -> ReyldResult<Amount> {
    available
        .checked_sub(requested)
        .ok_or(ReyldError::InsufficientAllowance {
            available,
            requested,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ZERO_ADDRESS;

    #[test]
    fn test_require_valid_address() {
        assert!(require_valid_address(&[7u8; 20], ReyldError::TRANSFER_TO_ZERO).is_ok());
        assert_eq!(
            require_valid_address(&ZERO_ADDRESS, ReyldError::TRANSFER_TO_ZERO),
            Err(ReyldError::InvalidAddress {
                reason: ReyldError::TRANSFER_TO_ZERO
            })
        );
    }

    #[test]
    fn test_remaining_balance() {
        let ten = Amount::from(10u64);
        assert_eq!(
            remaining_balance(ten, Amount::from(4u64), DebitOp::Transfer),
            Ok(Amount::from(6u64))
        );
        assert_eq!(remaining_balance(ten, ten, DebitOp::Transfer), Ok(Amount::ZERO));
        let result = remaining_balance(ten, Amount::from(11u64), DebitOp::Burn);
        assert!(matches!(
            result,
            Err(ReyldError::InsufficientBalance { op: DebitOp::Burn, .. })
        ));
    }

    #[test]
    fn test_remaining_allowance() {
        let result = remaining_allowance(Amount::ZERO, Amount::from(1u64));
        assert!(matches!(result, Err(ReyldError::InsufficientAllowance { .. })));
        assert_eq!(remaining_allowance(Amount::from(1u64), Amount::ZERO), Ok(Amount::from(1u64)));
    }
}
