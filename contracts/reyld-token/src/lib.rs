//! REYLD Token Contract
//!
//! Fungible token with an owner, an executor allow-list, a pause switch and
//! executor-only burns. The full supply is minted to the initial owner at
//! construction; nothing is minted afterwards.
//!
//! Every public operation takes the calling address explicitly and runs as
//! one atomic transition over `&mut self`: it either completes or fails
//! with a `ReyldError` and leaves the state untouched.
//!
//! ## Call Interface
//!
//! The `call` module exposes the same surface as an enum of calls that can
//! be CBOR-encoded, for harnesses that drive the contract through bytes.

use std::io;

use borsh::{BorshDeserialize, BorshSerialize};
use log::{info, warn};
use sha2::{Digest, Sha256};

pub mod call;


pub use call::{dispatch, execute_encoded, CallError, CallOutput, TokenCall};

use reyld_common::{
    access_control::{self, AccessControlState},
    constants::token,
    emergency::{self, PauseState},
    errors::ReyldResult,
    events::{EventLog, ReyldEvent},
    supply,
    token_ops::{self, Ledger},
    types::{format_address, parse_address, Address, Amount, ZERO_ADDRESS},
};

/// Domain tag mixed into every state digest
const DIGEST_DOMAIN: &[u8] = b"REYLD-STATE-V1";

// ============ Token State ============

/// Persistent contract state
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct TokenState {
    pub access: AccessControlState,
    pub pause: PauseState,
    pub ledger: Ledger,
}

/// The REYLD token contract
#[derive(Debug, Clone)]
pub struct ReyldToken {
    state: TokenState,
    events: EventLog,
}

impl ReyldToken {
    /// Construct the contract and mint the full supply to `initial_owner`.
    pub fn new(initial_owner: Address) -> ReyldResult<Self> {
        let access = AccessControlState::new(initial_owner)?;
        let supply = Amount::initial_supply();
        let ledger = Ledger::with_genesis(initial_owner, supply)?;

        let mut events = EventLog::new();
        events.emit(ReyldEvent::OwnershipTransferred {
            previous_owner: ZERO_ADDRESS,
            new_owner: initial_owner,
        });
        events.emit(ReyldEvent::Transfer {
            from: ZERO_ADDRESS,
            to: initial_owner,
            amount: supply,
        });

        info!(
            "{} constructed: owner {}, supply {}",
            token::SYMBOL,
            format_address(&initial_owner),
            supply
        );

        Ok(Self {
            state: TokenState {
                access,
                pause: PauseState::new(),
                ledger,
            },
            events,
        })
    }

    // ============ Metadata ============

    pub fn name(&self) -> &'static str {
        token::NAME
    }

    pub fn symbol(&self) -> &'static str {
        token::SYMBOL
    }

    pub fn decimals(&self) -> u8 {
        token::DECIMALS
    }

    // ============ Queries ============

    pub fn owner(&self) -> Address {
        self.state.access.owner
    }

    pub fn is_executor(&self, account: &Address) -> bool {
        access_control::is_executor(&self.state.access, account)
    }

    pub fn paused(&self) -> bool {
        emergency::is_paused(&self.state.pause)
    }

    pub fn total_supply(&self) -> Amount {
        self.state.ledger.total_supply()
    }

    pub fn balance_of(&self, account: &Address) -> Amount {
        self.state.ledger.balance_of(account)
    }

    pub fn allowance(&self, owner: &Address, spender: &Address) -> Amount {
        self.state.ledger.allowance(owner, spender)
    }

    /// Borrow the raw state
    pub fn state(&self) -> &TokenState {
        &self.state
    }

    /// Events recorded since construction (or the last `take_events`)
    pub fn events(&self) -> &EventLog {
        &self.events
    }

    /// Drain the recorded events
    pub fn take_events(&mut self) -> Vec<ReyldEvent> {
        std::mem::take(&mut self.events).into_events()
    }

    // ============ Access Control ============

    pub fn transfer_ownership(&mut self, caller: Address, new_owner: Address) -> ReyldResult<()> {
        let previous_owner = logged(
            "transferOwnership",
            access_control::transfer_ownership(&mut self.state.access, caller, new_owner),
        )?;
        self.events.emit(ReyldEvent::OwnershipTransferred {
            previous_owner,
            new_owner,
        });
        Ok(())
    }

    pub fn add_executor(&mut self, caller: Address, executor: Address) -> ReyldResult<()> {
        let added = logged(
            "addExecutor",
            access_control::add_executor(&mut self.state.access, caller, executor),
        )?;
        if added {
            self.events.emit(ReyldEvent::ExecutorAdded { executor });
        }
        Ok(())
    }

    pub fn remove_executor(&mut self, caller: Address, executor: Address) -> ReyldResult<()> {
        let removed = logged(
            "removeExecutor",
            access_control::remove_executor(&mut self.state.access, caller, executor),
        )?;
        if removed {
            self.events.emit(ReyldEvent::ExecutorRemoved { executor });
        }
        Ok(())
    }

    // ============ Pause ============

    pub fn pause(&mut self, caller: Address) -> ReyldResult<()> {
        let changed = logged(
            "pause",
            emergency::pause(&mut self.state.pause, &self.state.access, caller),
        )?;
        if changed {
            self.events.emit(ReyldEvent::Paused { account: caller });
        }
        Ok(())
    }

    pub fn unpause(&mut self, caller: Address) -> ReyldResult<()> {
        let changed = logged(
            "unpause",
            emergency::unpause(&mut self.state.pause, &self.state.access, caller),
        )?;
        if changed {
            self.events.emit(ReyldEvent::Unpaused { account: caller });
        }
        Ok(())
    }

    // ============ Ledger ============

    pub fn transfer(&mut self, caller: Address, to: Address, amount: Amount) -> ReyldResult<bool> {
        logged(
            "transfer",
            token_ops::transfer(&mut self.state.ledger, &self.state.pause, caller, to, amount),
        )?;
        self.events.emit(ReyldEvent::Transfer {
            from: caller,
            to,
            amount,
        });
        Ok(true)
    }

    pub fn approve(&mut self, caller: Address, spender: Address, amount: Amount) -> bool {
        token_ops::approve(&mut self.state.ledger, caller, spender, amount);
        self.events.emit(ReyldEvent::Approval {
            owner: caller,
            spender,
            amount,
        });
        true
    }

    pub fn increase_allowance(
        &mut self,
        caller: Address,
        spender: Address,
        delta: Amount,
    ) -> ReyldResult<bool> {
        let amount = logged(
            "increaseAllowance",
            token_ops::increase_allowance(&mut self.state.ledger, caller, spender, delta),
        )?;
        self.events.emit(ReyldEvent::Approval {
            owner: caller,
            spender,
            amount,
        });
        Ok(true)
    }

    pub fn decrease_allowance(
        &mut self,
        caller: Address,
        spender: Address,
        delta: Amount,
    ) -> ReyldResult<bool> {
        let amount = logged(
            "decreaseAllowance",
            token_ops::decrease_allowance(&mut self.state.ledger, caller, spender, delta),
        )?;
        self.events.emit(ReyldEvent::Approval {
            owner: caller,
            spender,
            amount,
        });
        Ok(true)
    }

    pub fn transfer_from(
        &mut self,
        caller: Address,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> ReyldResult<bool> {
        let remaining = logged(
            "transferFrom",
            token_ops::transfer_from(
                &mut self.state.ledger,
                &self.state.pause,
                caller,
                from,
                to,
                amount,
            ),
        )?;
        self.events.emit(ReyldEvent::Approval {
            owner: from,
            spender: caller,
            amount: remaining,
        });
        self.events.emit(ReyldEvent::Transfer { from, to, amount });
        Ok(true)
    }

    // ============ Supply ============

    pub fn burn(&mut self, caller: Address, amount: Amount) -> ReyldResult<()> {
        logged(
            "burn",
            supply::burn(&mut self.state.ledger, &self.state.access, caller, amount),
        )?;
        self.events.emit(ReyldEvent::Transfer {
            from: caller,
            to: ZERO_ADDRESS,
            amount,
        });
        Ok(())
    }

    // ============ Snapshots ============

    /// True if the balances add up to the total supply
    pub fn supply_is_conserved(&self) -> bool {
        self.state.ledger.is_conserved()
    }

    /// Borsh-encoded contract state
    pub fn snapshot(&self) -> io::Result<Vec<u8>> {
        borsh::to_vec(&self.state)
    }

    /// Rebuild a contract from `snapshot` bytes. The event log starts empty.
    pub fn restore(bytes: &[u8]) -> io::Result<Self> {
        let state = TokenState::try_from_slice(bytes)?;
        if state.access.owner == ZERO_ADDRESS {
            return Err(io::Error::new(io::ErrorKind::InvalidData, "snapshot owner is zero"));
        }
        if !state.ledger.is_canonical() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "snapshot stores zero balance or allowance entries",
            ));
        }
        if !state.ledger.is_conserved() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "snapshot balances do not match total supply",
            ));
        }
        Ok(Self {
            state,
            events: EventLog::new(),
        })
    }

    /// SHA-256 over a canonical encoding of the contract state
    pub fn state_digest(&self) -> [u8; 32] {
        let access = &self.state.access;
        let ledger = &self.state.ledger;

        let mut hasher = Sha256::new();
        hasher.update(DIGEST_DOMAIN);
        hasher.update(access.owner);
        hasher.update([self.state.pause.is_paused as u8]);

        hasher.update((access.executors.len() as u64).to_le_bytes());
        for executor in &access.executors {
            hasher.update(executor);
        }

        hasher.update((ledger.balances().count() as u64).to_le_bytes());
        for (account, balance) in ledger.balances() {
            hasher.update(account);
            hasher.update(balance.to_be_bytes());
        }

        hasher.update((ledger.allowances().count() as u64).to_le_bytes());
        for ((owner, spender), allowance) in ledger.allowances() {
            hasher.update(owner);
            hasher.update(spender);
            hasher.update(allowance.to_be_bytes());
        }

        hasher.update(ledger.total_supply().to_be_bytes());

        let result = hasher.finalize();
        let mut digest = [0u8; 32];
        digest.copy_from_slice(&result);
        digest
    }
}

/// Construct the contract for a hex-encoded owner address
pub fn deploy(owner: &str) -> Result<ReyldToken, CallError> {
    let owner = parse_address(owner)?;
    Ok(ReyldToken::new(owner)?)
}

/// Log a rejected call with its error code
fn logged<T>(operation: &'static str, result: ReyldResult<T>) -> ReyldResult<T> {
    if let Err(err) = &result {
        warn!(
            "{operation} rejected: {} ({err}), recoverable: {}",
            err.code(),
            err.is_recoverable()
        );
    }
    result
}
