//! Access Control Module
//!
//! Owner singleton plus an executor allow-list.
//!
//! ## Rules
//!
//! - **Owner**: set at construction, never the zero address afterwards,
//!   transferable only by the current owner
//! - **Executors**: owner-managed set of addresses allowed to burn. The owner
//!   is not implicitly an executor.
//! - Adding a present executor or removing an absent one is a successful
//!   no-op.

use borsh::{BorshDeserialize, BorshSerialize};
use log::info;

use crate::{
    check,
    errors::{Gate, ReyldError, ReyldResult},
    types::{format_address, Address},
    validation::require_valid_address,
    BTreeSet,
};

// ============================================================================
// Types
// ============================================================================

/// Access control state
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct AccessControlState {
    /// Current owner
    pub owner: Address,
    /// Addresses permitted to burn
    pub executors: BTreeSet<Address>,
}

impl AccessControlState {
    /// Create new access control state. Fails if `owner` is the zero address.
    pub fn new(owner: Address) -> ReyldResult<Self> {
        require_valid_address(&owner, ReyldError::OWNER_IS_ZERO)?;
        Ok(Self {
            owner,
            executors: BTreeSet::new(),
        })
    }
}

// ============================================================================
// Guards
// ============================================================================

/// Require `caller` to be the current owner
pub fn only_owner(state: &AccessControlState, caller: &Address) -> ReyldResult<()> {
    check!(
        state.owner == *caller,
        ReyldError::Unauthorized { gate: Gate::Owner }
    );
    Ok(())
}

/// Require `caller` to be a current executor
pub fn only_executor(state: &AccessControlState, caller: &Address) -> ReyldResult<()> {
    check!(
        is_executor(state, caller),
        ReyldError::Unauthorized {
            gate: Gate::Executor
        }
    );
    Ok(())
}

// ============================================================================
// Core Access Control Functions
// ============================================================================

/// Check if address is an executor
pub fn is_executor(state: &AccessControlState, address: &Address) -> bool {
    state.executors.contains(address)
}

/// Hand ownership to `new_owner`. Returns the previous owner.
pub fn transfer_ownership(
    state: &mut AccessControlState,
    caller: Address,
    new_owner: Address,
) -> ReyldResult<Address> {
    only_owner(state, &caller)?;
    require_valid_address(&new_owner, ReyldError::OWNER_IS_ZERO)?;

    let previous = core::mem::replace(&mut state.owner, new_owner);
    info!(
        "ownership transferred from {} to {}",
        format_address(&previous),
        format_address(&new_owner)
    );
    Ok(previous)
}

/// Add an executor. Returns true if the set changed.
pub fn add_executor(
    state: &mut AccessControlState,
    caller: Address,
    executor: Address,
) -> ReyldResult<bool> {
    only_owner(state, &caller)?;

    let added = state.executors.insert(executor);
    if added {
        info!("executor added: {}", format_address(&executor));
    }
    Ok(added)
}

/// Remove an executor. Returns true if the set changed.
pub fn remove_executor(
    state: &mut AccessControlState,
    caller: Address,
    executor: Address,
) -> ReyldResult<bool> {
    only_owner(state, &caller)?;

    let removed = state.executors.remove(&executor);
    if removed {
        info!("executor removed: {}", format_address(&executor));
    }
    Ok(removed)
}

// ============================================================================
// Tests
// ============================================================================
