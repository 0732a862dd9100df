//! Contract Events for the REYLD token
//!
//! Typed records of every successful state transition. Callers inspect them
//! through the contract's `EventLog`.

use crate::Vec;
use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};
use crate::types::{Address, Amount};

/// Event types for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
#[borsh(use_discriminant = true)]
#[repr(u8)]
pub enum EventType {
    // Ledger Events (0x01 - 0x1F)
    Transfer = 0x01,
    Approval = 0x02,

    // Access Control Events (0x20 - 0x3F)
    OwnershipTransferred = 0x20,
    ExecutorAdded = 0x21,
    ExecutorRemoved = 0x22,

    // Pause Events (0x40 - 0x5F)
    Paused = 0x40,
    Unpaused = 0x41,
}

/// Main event enum containing all contract events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub enum ReyldEvent {
    /// Value moved between accounts. Mint has `from` zero, burn has `to` zero.
    Transfer {
        from: Address,
        to: Address,
        amount: Amount,
    },

    /// Allowance of `spender` over `owner`'s balance set to `amount`
    Approval {
        owner: Address,
        spender: Address,
        amount: Amount,
    },

    OwnershipTransferred {
        previous_owner: Address,
        new_owner: Address,
    },

    ExecutorAdded { executor: Address },

    ExecutorRemoved { executor: Address },

    Paused { account: Address },

    Unpaused { account: Address },
}

impl ReyldEvent {
    /// Get the event type for filtering
    pub fn event_type(&self) -> EventType {
        match self {
            Self::Transfer { .. } => EventType::Transfer,
            Self::Approval { .. } => EventType::Approval,
            Self::OwnershipTransferred { .. } => EventType::OwnershipTransferred,
            Self::ExecutorAdded { .. } => EventType::ExecutorAdded,
            Self::ExecutorRemoved { .. } => EventType::ExecutorRemoved,
            Self::Paused { .. } => EventType::Paused,
            Self::Unpaused { .. } => EventType::Unpaused,
        }
    }
}

/// Event log accumulated across contract calls
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventLog {
    events: Vec<ReyldEvent>,
}

impl EventLog {
    /// Create a new empty event log
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Emit an event (add to log)
    pub fn emit(&mut self, event: ReyldEvent) {
        self.events.push(event);
    }

    /// Get all events
    pub fn events(&self) -> &[ReyldEvent] {
        &self.events
    }

    /// Take ownership of all events
    pub fn into_events(self) -> Vec<ReyldEvent> {
        self.events
    }

    /// Filter events by type
    pub fn filter_by_type(&self, event_type: EventType) -> Vec<&ReyldEvent> {
        self.events
            .iter()
            .filter(|e| e.event_type() == event_type)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_log() {
        let mut log = EventLog::new();

        log.emit(ReyldEvent::Transfer {
            from: [1u8; 20],
            to: [2u8; 20],
            amount: Amount::from_whole(100),
        });
        log.emit(ReyldEvent::Paused { account: [1u8; 20] });

        assert_eq!(log.len(), 2);
        assert!(!log.is_empty());
        assert_eq!(log.filter_by_type(EventType::Transfer).len(), 1);
        assert_eq!(
            log.into_events()[1],
            ReyldEvent::Paused { account: [1u8; 20] }
        );
    }
}
