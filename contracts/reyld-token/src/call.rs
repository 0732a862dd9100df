//! Call Interface
//!
//! Every contract operation as a serializable call, plus a dispatcher that
//! routes a call to the matching `ReyldToken` method. Calls travel as CBOR
//! so a harness can drive the contract with raw bytes.
//!
//! ## Encoding
//!
//! - **Call**: externally tagged `TokenCall` enum, CBOR via ciborium
//! - **Amounts**: `0x`-prefixed hex strings of the 256-bit value
//! - **Addresses**: 20-byte arrays

use serde::{Deserialize, Serialize};
use thiserror::Error;

use reyld_common::{
    errors::{ReyldError, ReyldResult},
    types::{Address, Amount},
};

use crate::ReyldToken;

/// A single contract call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenCall {
    // Access control
    Owner,
    TransferOwnership { new_owner: Address },
    AddExecutor { executor: Address },
    RemoveExecutor { executor: Address },
    IsExecutor { account: Address },

    // Pause
    Pause,
    Unpause,
    Paused,

    // Metadata
    Name,
    Symbol,
    Decimals,

    // Ledger
    TotalSupply,
    BalanceOf { account: Address },
    Allowance { owner: Address, spender: Address },
    Transfer { to: Address, amount: Amount },
    Approve { spender: Address, amount: Amount },
    IncreaseAllowance { spender: Address, amount: Amount },
    DecreaseAllowance { spender: Address, amount: Amount },
    TransferFrom { from: Address, to: Address, amount: Amount },

    // Supply
    Burn { amount: Amount },
}

/// Value returned by a successful call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CallOutput {
    Unit,
    Bool(bool),
    Amount(Amount),
    Address(Address),
    Text(String),
    Decimals(u8),
}

/// Errors from the byte-level call interface
#[derive(Debug, Error)]
pub enum CallError {
    #[error("failed to decode call: {0}")]
    Decode(String),

    #[error("failed to encode call: {0}")]
    Encode(String),

    #[error("invalid address: {0}")]
    Address(#[from] hex::FromHexError),

    #[error(transparent)]
    Rejected(#[from] ReyldError),
}

/// Route `call` from `caller` to the contract.
pub fn dispatch(token: &mut ReyldToken, caller: Address, call: TokenCall) -> ReyldResult<CallOutput> {
    let output = match call {
        TokenCall::Owner => CallOutput::Address(token.owner()),
        TokenCall::TransferOwnership { new_owner } => {
            token.transfer_ownership(caller, new_owner)?;
            CallOutput::Unit
        }
        TokenCall::AddExecutor { executor } => {
            token.add_executor(caller, executor)?;
            CallOutput::Unit
        }
        TokenCall::RemoveExecutor { executor } => {
            token.remove_executor(caller, executor)?;
            CallOutput::Unit
        }
        TokenCall::IsExecutor { account } => CallOutput::Bool(token.is_executor(&account)),

        TokenCall::Pause => {
            token.pause(caller)?;
            CallOutput::Unit
        }
        TokenCall::Unpause => {
            token.unpause(caller)?;
            CallOutput::Unit
        }
        TokenCall::Paused => CallOutput::Bool(token.paused()),

        TokenCall::Name => CallOutput::Text(token.name().into()),
        TokenCall::Symbol => CallOutput::Text(token.symbol().into()),
        TokenCall::Decimals => CallOutput::Decimals(token.decimals()),

        TokenCall::TotalSupply => CallOutput::Amount(token.total_supply()),
        TokenCall::BalanceOf { account } => CallOutput::Amount(token.balance_of(&account)),
        TokenCall::Allowance { owner, spender } => {
            CallOutput::Amount(token.allowance(&owner, &spender))
        }
        TokenCall::Transfer { to, amount } => CallOutput::Bool(token.transfer(caller, to, amount)?),
        TokenCall::Approve { spender, amount } => {
            CallOutput::Bool(token.approve(caller, spender, amount))
        }
        TokenCall::IncreaseAllowance { spender, amount } => {
            CallOutput::Bool(token.increase_allowance(caller, spender, amount)?)
        }
        TokenCall::DecreaseAllowance { spender, amount } => {
            CallOutput::Bool(token.decrease_allowance(caller, spender, amount)?)
        }
        TokenCall::TransferFrom { from, to, amount } => {
            CallOutput::Bool(token.transfer_from(caller, from, to, amount)?)
        }

        TokenCall::Burn { amount } => {
            token.burn(caller, amount)?;
            CallOutput::Unit
        }
    };
    Ok(output)
}

/// CBOR-encode a call
pub fn encode_call(call: &TokenCall) -> Result<Vec<u8>, CallError> {
    let mut bytes = Vec::new();
    ciborium::into_writer(call, &mut bytes).map_err(|e| CallError::Encode(e.to_string()))?;
    Ok(bytes)
}

/// Decode a CBOR call
pub fn decode_call(bytes: &[u8]) -> Result<TokenCall, CallError> {
    ciborium::from_reader(bytes).map_err(|e| CallError::Decode(e.to_string()))
}

/// Decode `bytes` and dispatch the call.
///
/// Undecodable input never reaches the contract, so the state is unchanged.
pub fn execute_encoded(
    token: &mut ReyldToken,
    caller: Address,
    bytes: &[u8],
) -> Result<CallOutput, CallError> {
    let call = decode_call(bytes)?;
    Ok(dispatch(token, caller, call)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use reyld_common::errors::Gate;

    fn owner() -> Address {
        [1u8; 20]
    }

    fn alice() -> Address {
        [0xa1; 20]
    }

    #[test]
    fn test_encode_decode_call() {
        let call = TokenCall::TransferFrom {
            from: owner(),
            to: alice(),
            amount: Amount::from_whole(7),
        };
        let bytes = encode_call(&call).unwrap();
        assert_eq!(decode_call(&bytes).unwrap(), call);
    }

    #[test]
    fn test_dispatch_queries() {
        let mut token = ReyldToken::new(owner()).unwrap();

        assert_eq!(
            dispatch(&mut token, alice(), TokenCall::Owner).unwrap(),
            CallOutput::Address(owner())
        );
        assert_eq!(
            dispatch(&mut token, alice(), TokenCall::Symbol).unwrap(),
            CallOutput::Text("REYLD".into())
        );
        assert_eq!(
            dispatch(&mut token, alice(), TokenCall::Decimals).unwrap(),
            CallOutput::Decimals(18)
        );
        assert_eq!(
            dispatch(&mut token, alice(), TokenCall::TotalSupply).unwrap(),
            CallOutput::Amount(Amount::initial_supply())
        );
    }

    #[test]
    fn test_dispatch_transfer() {
        let mut token = ReyldToken::new(owner()).unwrap();
        let call = TokenCall::Transfer {
            to: alice(),
            amount: Amount::from_whole(3),
        };

        assert_eq!(dispatch(&mut token, owner(), call).unwrap(), CallOutput::Bool(true));
        assert_eq!(token.balance_of(&alice()), Amount::from_whole(3));
    }

    #[test]
    fn test_dispatch_propagates_rejection() {
        let mut token = ReyldToken::new(owner()).unwrap();
        let result = dispatch(&mut token, alice(), TokenCall::Pause);
        assert_eq!(result, Err(ReyldError::Unauthorized { gate: Gate::Owner }));
        assert!(!token.paused());
    }

    #[test]
    fn test_execute_encoded() {
        let mut token = ReyldToken::new(owner()).unwrap();
        let bytes = encode_call(&TokenCall::AddExecutor { executor: alice() }).unwrap();

        let output = execute_encoded(&mut token, owner(), &bytes).unwrap();
        assert_eq!(output, CallOutput::Unit);
        assert!(token.is_executor(&alice()));
    }

    #[test]
    fn test_execute_garbage_bytes() {
        let mut token = ReyldToken::new(owner()).unwrap();
        let before = token.state_digest();

        let result = execute_encoded(&mut token, owner(), &[0xff, 0x00, 0x13]);
        assert!(matches!(result, Err(CallError::Decode(_))));
        assert_eq!(token.state_digest(), before);
    }
}
