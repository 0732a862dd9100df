//! REYLD Common Library
//!
//! Shared types, constants, and state machines for the REYLD token contract.
//!
//! The contract state is split into independent leaves that the token
//! facade composes:
//!
//! - **Access Control**: owner singleton plus executor allow-list
//! - **Emergency**: process-wide pause switch guarding value transfers
//! - **Token Ops**: balances, allowances and total supply (the ledger)
//! - **Supply**: executor-gated burn, the only supply-reducing operation
//!
//! Every operation is a single atomic transition: all checks run before
//! the first write, so a failed call leaves the state untouched.
//!
//! This crate is `no_std` compatible when the `std` feature is disabled.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

// Re-export collections for submodules based on feature
#[cfg(not(feature = "std"))]
pub use alloc::{
    collections::{BTreeMap, BTreeSet},
    string::String,
    vec::Vec,
};
#[cfg(feature = "std")]
pub use std::{
    collections::{BTreeMap, BTreeSet},
    string::String,
    vec::Vec,
};

pub mod constants;
pub mod errors;
pub mod types;
pub mod validation;
pub mod events;
pub mod access_control;
pub mod emergency;
pub mod token_ops;
pub mod supply;

// Re-exports for convenience
pub use constants::*;
pub use errors::*;
pub use types::*;
pub use events::*;
pub use access_control::*;
pub use emergency::*;
pub use token_ops::*;
pub use supply::*;
