//! Error Types for the REYLD token
//!
//! A closed set of failure kinds. The `Display` text of each variant is the
//! revert reason an external caller observes; `code()` is the stable
//! machine-readable form.

use thiserror::Error;

use crate::types::Amount;

/// Result type alias for REYLD operations
pub type ReyldResult<T> = Result<T, ReyldError>;

/// Role gate that rejected a caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    /// Owner-only operation
    Owner,
    /// Executor-only operation (burn)
    Executor,
}

impl Gate {
    /// Revert reason for a caller failing this gate
    pub fn reason(&self) -> &'static str {
        match self {
            Gate::Owner => "Ownable: caller is not the owner",
            Gate::Executor => "Only executor can call this function",
        }
    }
}

/// Balance-debiting operation that ran short
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebitOp {
    Transfer,
    Burn,
}

impl DebitOp {
    fn reason(&self) -> &'static str {
        match self {
            DebitOp::Transfer => "ERC20: transfer amount exceeds balance",
            DebitOp::Burn => "ERC20: burn amount exceeds balance",
        }
    }
}

/// Main error enum for all REYLD contract errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReyldError {
    /// Caller lacks the role required by the operation
    #[error("{}", .gate.reason())]
    Unauthorized { gate: Gate },

    /// Zero address used where a real account is required
    #[error("{reason}")]
    InvalidAddress { reason: &'static str },

    /// Value transfer attempted while the contract is paused
    #[error("Pausable: paused")]
    SystemPaused,

    /// Debit exceeds the account balance
    #[error("{}", .op.reason())]
    InsufficientBalance {
        available: Amount,
        requested: Amount,
        op: DebitOp,
    },

    /// transferFrom exceeds the remaining allowance
    #[error("ERC20: insufficient allowance")]
    InsufficientAllowance { available: Amount, requested: Amount },

    /// decreaseAllowance below zero
    #[error("ERC20: decreased allowance below zero")]
    AllowanceUnderflow { current: Amount, requested: Amount },

    /// Result would not fit in 256 bits
    #[error("arithmetic overflow")]
    ArithmeticOverflow,
}

impl ReyldError {
    /// Reason used when a transfer targets the zero address
    pub const TRANSFER_TO_ZERO: &'static str = "ERC20: transfer to the zero address";

    /// Reason used when ownership is handed to the zero address
    pub const OWNER_IS_ZERO: &'static str = "Ownable: new owner is the zero address";

    /// Returns a human-readable error code for logging/debugging
    pub fn code(&self) -> &'static str {
        match self {
            Self::Unauthorized { gate: Gate::Owner } => "E020_NOT_OWNER",
            Self::Unauthorized { gate: Gate::Executor } => "E021_NOT_EXECUTOR",
            Self::InvalidAddress { .. } => "E030_INVALID_ADDRESS",
            Self::SystemPaused => "E040_PAUSED",
            Self::InsufficientBalance { .. } => "E010_INSUFFICIENT_BALANCE",
            Self::InsufficientAllowance { .. } => "E011_INSUFFICIENT_ALLOWANCE",
            Self::AllowanceUnderflow { .. } => "E012_ALLOWANCE_UNDERFLOW",
            Self::ArithmeticOverflow => "E080_OVERFLOW",
        }
    }

    /// True if the same call can succeed later without a role change,
    /// once funds, allowance or the pause flag change
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::InsufficientBalance { .. }
                | Self::InsufficientAllowance { .. }
                | Self::SystemPaused
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_error_codes_unique() {
        let errors = [
            ReyldError::Unauthorized { gate: Gate::Owner },
            ReyldError::Unauthorized { gate: Gate::Executor },
            ReyldError::InvalidAddress { reason: ReyldError::TRANSFER_TO_ZERO },
            ReyldError::SystemPaused,
            ReyldError::InsufficientBalance {
                available: Amount::ZERO,
                requested: Amount::from(1u64),
                op: DebitOp::Transfer,
            },
            ReyldError::InsufficientAllowance {
                available: Amount::ZERO,
                requested: Amount::from(1u64),
            },
            ReyldError::AllowanceUnderflow {
                current: Amount::ZERO,
                requested: Amount::from(1u64),
            },
            ReyldError::ArithmeticOverflow,
        ];

        let codes: Vec<_> = errors.iter().map(|e| e.code()).collect();
        let unique: BTreeSet<_> = codes.iter().collect();
        assert_eq!(codes.len(), unique.len(), "Error codes must be unique");
    }

    #[test]
    fn test_recoverable_errors() {
        assert!(ReyldError::SystemPaused.is_recoverable());
        assert!(ReyldError::InsufficientAllowance {
            available: Amount::ZERO,
            requested: Amount::from(1u64),
        }
        .is_recoverable());
        assert!(!ReyldError::Unauthorized { gate: Gate::Owner }.is_recoverable());
        assert!(!ReyldError::ArithmeticOverflow.is_recoverable());
        assert!(!ReyldError::InvalidAddress { reason: ReyldError::TRANSFER_TO_ZERO }.is_recoverable());
    }

    #[test]
    fn test_revert_reasons() {
        assert_eq!(
            ReyldError::Unauthorized { gate: Gate::Executor }.to_string(),
            "Only executor can call this function"
        );
        assert_eq!(ReyldError::SystemPaused.to_string(), "Pausable: paused");
        assert_eq!(
            ReyldError::InsufficientBalance {
                available: Amount::ZERO,
                requested: Amount::from(1u64),
                op: DebitOp::Burn,
            }
            .to_string(),
            "ERC20: burn amount exceeds balance"
        );
        assert_eq!(
            ReyldError::InvalidAddress { reason: ReyldError::OWNER_IS_ZERO }.to_string(),
            "Ownable: new owner is the zero address"
        );
    }
}
