//! Token Operations Module
//!
//! The ledger: balances, allowances and total supply, plus the value
//! operations layered on top of them.
//!
//! ## Invariants
//!
//! - **Conservation**: the sum of all balances equals `total_supply`
//! - **Atomicity**: every check runs before the first write
//! - Zero balances and allowances are not stored; reads default to zero
//!
//! `transfer` and `transfer_from` consult the pause switch. Approvals and
//! allowance adjustments do not.

use borsh::{BorshDeserialize, BorshSerialize};
use log::debug;

use crate::{
    emergency::{require_not_paused, PauseState},
    errors::{DebitOp, ReyldError, ReyldResult},
    types::{format_address, Address, Amount},
    validation::{remaining_allowance, remaining_balance, require_valid_address},
    BTreeMap,
};

// ============================================================================
// Types
// ============================================================================

/// Ledger state
#[derive(Debug, Clone, Default, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct Ledger {
    balances: BTreeMap<Address, Amount>,
    /// Keyed by (owner, spender)
    allowances: BTreeMap<(Address, Address), Amount>,
    total_supply: Amount,
}

impl Ledger {
    /// Create a ledger with `supply` minted to `holder`
    pub fn with_genesis(holder: Address, supply: Amount) -> ReyldResult<Self> {
        let mut ledger = Self::default();
        ledger.mint(holder, supply)?;
        Ok(ledger)
    }

    pub fn balance_of(&self, account: &Address) -> Amount {
        self.balances.get(account).copied().unwrap_or_default()
    }

    pub fn allowance(&self, owner: &Address, spender: &Address) -> Amount {
        self.allowances
            .get(&(*owner, *spender))
            .copied()
            .unwrap_or_default()
    }

    pub fn total_supply(&self) -> Amount {
        self.total_supply
    }

    /// Non-zero balances in address order
    pub fn balances(&self) -> impl Iterator<Item = (&Address, &Amount)> {
        self.balances.iter()
    }

    /// Non-zero allowances in (owner, spender) order
    pub fn allowances(&self) -> impl Iterator<Item = (&(Address, Address), &Amount)> {
        self.allowances.iter()
    }

    /// Sum of all balances, `None` if it does not fit in 256 bits
    pub fn sum_of_balances(&self) -> Option<Amount> {
        self.balances
            .values()
            .try_fold(Amount::ZERO, |acc, balance| acc.checked_add(*balance))
    }

    /// True if the balances add up to the total supply
    pub fn is_conserved(&self) -> bool {
        self.sum_of_balances() == Some(self.total_supply)
    }

    /// True if no zero balance or allowance is stored
    pub fn is_canonical(&self) -> bool {
        self.balances.values().all(|amount| !amount.is_zero())
            && self.allowances.values().all(|amount| !amount.is_zero())
    }

    // ============ Raw transitions ============

    fn mint(&mut self, to: Address, amount: Amount) -> ReyldResult<()> {
        let new_supply = self
            .total_supply
            .checked_add(amount)
            .ok_or(ReyldError::ArithmeticOverflow)?;
        let new_balance = self
            .balance_of(&to)
            .checked_add(amount)
            .ok_or(ReyldError::ArithmeticOverflow)?;

        self.total_supply = new_supply;
        self.write_balance(to, new_balance);
        Ok(())
    }

    /// Move `amount` from `from` to `to`
    fn move_balance(&mut self, from: Address, to: Address, amount: Amount) -> ReyldResult<()> {
        require_valid_address(&to, ReyldError::TRANSFER_TO_ZERO)?;
        let from_balance = remaining_balance(self.balance_of(&from), amount, DebitOp::Transfer)?;

        if from == to {
            return Ok(());
        }

        let to_balance = self
            .balance_of(&to)
            .checked_add(amount)
            .ok_or(ReyldError::ArithmeticOverflow)?;

        self.write_balance(from, from_balance);
        self.write_balance(to, to_balance);
        Ok(())
    }

    /// Debit `from` and shrink the supply. Returns the new total supply.
    pub(crate) fn burn(&mut self, from: Address, amount: Amount) -> ReyldResult<Amount> {
        let available = self.balance_of(&from);
        let new_balance = remaining_balance(available, amount, DebitOp::Burn)?;
        // Conservation guarantees supply >= any single balance
        let new_supply = remaining_balance(self.total_supply, amount, DebitOp::Burn)?;

        self.write_balance(from, new_balance);
        self.total_supply = new_supply;
        Ok(new_supply)
    }

    fn write_balance(&mut self, account: Address, amount: Amount) {
        if amount.is_zero() {
            self.balances.remove(&account);
        } else {
            self.balances.insert(account, amount);
        }
    }

    fn write_allowance(&mut self, owner: Address, spender: Address, amount: Amount) {
        if amount.is_zero() {
            self.allowances.remove(&(owner, spender));
        } else {
            self.allowances.insert((owner, spender), amount);
        }
    }
}

// ============================================================================
// Core Token Functions
// ============================================================================

/// Transfer `amount` from `caller` to `to`
pub fn transfer(
    ledger: &mut Ledger,
    pause: &PauseState,
    caller: Address,
    to: Address,
    amount: Amount,
) -> ReyldResult<()> {
    require_not_paused(pause)?;
    ledger.move_balance(caller, to, amount)?;

    debug!(
        "transfer {} -> {}: {}",
        format_address(&caller),
        format_address(&to),
        amount
    );
    Ok(())
}

/// Set `caller`'s allowance for `spender`, overwriting any previous value
pub fn approve(ledger: &mut Ledger, caller: Address, spender: Address, amount: Amount) {
    ledger.write_allowance(caller, spender, amount);

    debug!(
        "approve {} for {}: {}",
        format_address(&spender),
        format_address(&caller),
        amount
    );
}

/// Raise `caller`'s allowance for `spender` by `delta`. Returns the new value.
pub fn increase_allowance(
    ledger: &mut Ledger,
    caller: Address,
    spender: Address,
    delta: Amount,
) -> ReyldResult<Amount> {
    let new_allowance = ledger
        .allowance(&caller, &spender)
        .checked_add(delta)
        .ok_or(ReyldError::ArithmeticOverflow)?;
    ledger.write_allowance(caller, spender, new_allowance);

    debug!(
        "increase allowance of {} for {} to {}",
        format_address(&spender),
        format_address(&caller),
        new_allowance
    );
    Ok(new_allowance)
}

/// Lower `caller`'s allowance for `spender` by `delta`. Returns the new value.
pub fn decrease_allowance(
    ledger: &mut Ledger,
    caller: Address,
    spender: Address,
    delta: Amount,
) -> ReyldResult<Amount> {
    let current = ledger.allowance(&caller, &spender);
    let new_allowance = current
        .checked_sub(delta)
        .ok_or(ReyldError::AllowanceUnderflow {
            current,
            requested: delta,
        })?;
    ledger.write_allowance(caller, spender, new_allowance);

    debug!(
        "decrease allowance of {} for {} to {}",
        format_address(&spender),
        format_address(&caller),
        new_allowance
    );
    Ok(new_allowance)
}

/// Move `amount` from `from` to `to` on behalf of `spender`, consuming
/// allowance. Returns the remaining allowance.
///
/// Check order: pause, recipient, balance, allowance.
pub fn transfer_from(
    ledger: &mut Ledger,
    pause: &PauseState,
    spender: Address,
    from: Address,
    to: Address,
    amount: Amount,
) -> ReyldResult<Amount> {
    require_not_paused(pause)?;
    require_valid_address(&to, ReyldError::TRANSFER_TO_ZERO)?;
    remaining_balance(ledger.balance_of(&from), amount, DebitOp::Transfer)?;
    let new_allowance = remaining_allowance(ledger.allowance(&from, &spender), amount)?;

    // Nothing is written until move_balance has succeeded
    ledger.move_balance(from, to, amount)?;
    ledger.write_allowance(from, spender, new_allowance);

    debug!(
        "transfer_from {} -> {} by {}: {}",
        format_address(&from),
        format_address(&to),
        format_address(&spender),
        amount
    );
    Ok(new_allowance)
}

// ============================================================================
// Tests
// ============================================================================
