use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::Card;

/// The two parties of a heads-up hand. The dealer posts the small blind and acts first
/// pre-flop; the player posts the big blind and acts first after the flop.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Participant {
    Player,
    Dealer,
}

impl Participant {
    pub fn opponent(self) -> Participant {
        match self {
            Participant::Player => Participant::Dealer,
            Participant::Dealer => Participant::Player,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Participant::Player => "player",
            Participant::Dealer => "dealer",
        }
    }
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An action submitted to the engine.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlayerAction {
    Fold,
    /// Only legal when nothing is owed.
    Check,
    /// Match the current bet, or as much of it as the stack allows.
    Call,
    /// Raise the round total to the given amount.
    Raise(u32),
    /// Commit the whole remaining stack.
    AllIn,
}

impl PlayerAction {
    pub fn kind(self) -> ActionKind {
        match self {
            PlayerAction::Fold => ActionKind::Fold,
            PlayerAction::Check => ActionKind::Check,
            PlayerAction::Call => ActionKind::Call,
            PlayerAction::Raise(_) => ActionKind::Raise,
            PlayerAction::AllIn => ActionKind::AllIn,
        }
    }
}

/// An action without its amount; what opponents get to see in an action history.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionKind {
    Fold,
    Check,
    Call,
    Raise,
    AllIn,
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ActionKind::Fold => "fold",
            ActionKind::Check => "check",
            ActionKind::Call => "call",
            ActionKind::Raise => "raise",
            ActionKind::AllIn => "all-in",
        };
        f.write_str(s)
    }
}

/// One side of the table for the duration of a hand.
#[derive(Debug, Clone, Default)]
pub(crate) struct Seat {
    pub hole: Vec<Card>,
    pub stack: u32,
    /// Chips put in during the current betting round.
    pub bet: u32,
    /// Chips put in over the whole hand.
    pub contributed: u32,
    pub acted: bool,
}

impl Seat {
    pub fn new(stack: u32) -> Self {
        Self {
            stack,
            ..Self::default()
        }
    }

    /// Moves chips from the stack into the current bet. Callers validate `amount` first.
    pub fn commit(&mut self, amount: u32) {
        let amount = amount.min(self.stack);
        self.stack -= amount;
        self.bet += amount;
        self.contributed += amount;
    }

    /// Reverses part of the current bet.
    pub fn refund(&mut self, amount: u32) {
        let amount = amount.min(self.bet);
        self.stack += amount;
        self.bet -= amount;
        self.contributed -= amount;
    }

    pub fn is_all_in(&self) -> bool {
        self.stack == 0
    }

    pub fn reset_round(&mut self) {
        self.bet = 0;
        self.acted = false;
    }
}
