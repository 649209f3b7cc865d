use thiserror::Error;

use crate::engine::Phase;
use crate::hand::EvalError;

/// Protocol violations: the caller drove the engine against its state machine.
/// These are not recoverable gameplay outcomes.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("cannot {operation} in phase {actual:?}")]
    InvalidPhase {
        operation: &'static str,
        actual: Phase,
    },
    #[error("betting round not complete")]
    RoundIncomplete,
    #[error("hand already complete")]
    HandAlreadyComplete,
    #[error("deck exhausted")]
    DeckExhausted,
    #[error("cannot start a hand with an empty {0} stack")]
    EmptyStack(&'static str),
    #[error("combined stacks of {player} and {dealer} exceed the chip range")]
    StackOverflow { player: u32, dealer: u32 },
    #[error("invalid betting config: {0}")]
    InvalidConfig(String),
    #[error(transparent)]
    Evaluation(#[from] EvalError),
}

/// Rejected gameplay input. The engine state is unchanged when one of these is returned.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ActionError {
    #[error("Not {0} turn")]
    NotYourTurn(&'static str),
    #[error("No betting round in progress")]
    NotBettingPhase,
    #[error("Cannot check - must call or fold")]
    CannotCheck,
    #[error("Raise must be at least {minimum}")]
    RaiseTooSmall { minimum: u32 },
    #[error("Raise cannot exceed {maximum}")]
    RaiseTooLarge { maximum: u32 },
    #[error("Insufficient chips")]
    InsufficientChips,
}
