//! Emergency Module
//!
//! Process-wide pause switch. While paused, value transfers (`transfer`,
//! `transferFrom`) are rejected; approvals, allowance adjustments, burns and
//! all administrative operations keep working.

use borsh::{BorshDeserialize, BorshSerialize};
use log::info;

use crate::{
    access_control::{only_owner, AccessControlState},
    check,
    errors::{ReyldError, ReyldResult},
    types::{format_address, Address},
};

/// Pause state
#[derive(Debug, Clone, Default, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct PauseState {
    /// Whether value transfers are suspended
    pub is_paused: bool,
}

impl PauseState {
    /// Create new, unpaused state
    pub fn new() -> Self {
        Self::default()
    }
}

/// Check if the contract is paused
pub fn is_paused(state: &PauseState) -> bool {
    state.is_paused
}

/// Guard for value-transfer operations
pub fn require_not_paused(state: &PauseState) -> ReyldResult<()> {
    check!(!state.is_paused, ReyldError::SystemPaused);
    Ok(())
}

/// Pause value transfers. Re-pausing is allowed; returns true if the flag
/// actually changed.
pub fn pause(
    state: &mut PauseState,
    access: &AccessControlState,
    caller: Address,
) -> ReyldResult<bool> {
    set_paused(state, access, caller, true)
}

/// Resume value transfers. Returns true if the flag actually changed.
pub fn unpause(
    state: &mut PauseState,
    access: &AccessControlState,
    caller: Address,
) -> ReyldResult<bool> {
    set_paused(state, access, caller, false)
}

fn set_paused(
    state: &mut PauseState,
    access: &AccessControlState,
    caller: Address,
    paused: bool,
) -> ReyldResult<bool> {
    only_owner(access, &caller)?;

    let changed = state.is_paused != paused;
    state.is_paused = paused;
    if changed {
        info!(
            "{} by {}",
            if paused { "paused" } else { "unpaused" },
            format_address(&caller)
        );
    }
    Ok(changed)
}
