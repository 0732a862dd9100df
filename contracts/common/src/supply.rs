//! Supply Control
//!
//! Executor-gated burn. This is the only operation that changes the total
//! supply after construction; there is no mint.

use log::debug;

use crate::{
    access_control::{only_executor, AccessControlState},
    errors::ReyldResult,
    token_ops::Ledger,
    types::{format_address, Address, Amount},
};

/// Burn `amount` from the caller's balance. Returns the new total supply.
///
/// The executor gate is checked first, so a non-executor is rejected
/// regardless of its balance. Pause does not apply.
pub fn burn(
    ledger: &mut Ledger,
    access: &AccessControlState,
    caller: Address,
    amount: Amount,
) -> ReyldResult<Amount> {
    only_executor(access, &caller)?;
    let new_supply = ledger.burn(caller, amount)?;

    debug!(
        "burn {} by {}, supply now {}",
        amount,
        format_address(&caller),
        new_supply
    );
    Ok(new_supply)
}
