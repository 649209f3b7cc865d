use rand::RngCore;

use crate::cards::{full_deck, Card};
use crate::errors::EngineError;
use crate::rng::{index_below, Lcg};

/// A shuffled 52-card deck consumed from the top (the end of the vector).
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Canonical order shuffled by an [`Lcg`] seeded with `seed`.
    /// The same seed always yields the same order.
    pub fn new_with_seed(seed: u64) -> Self {
        Self::shuffled_with(&mut Lcg::new(seed))
    }

    /// Canonical order shuffled by any generator.
    pub fn shuffled_with<R: RngCore + ?Sized>(rng: &mut R) -> Self {
        let mut cards = full_deck();
        fisher_yates(&mut cards, rng);
        Self { cards }
    }

    /// Unshuffled canonical order; mostly useful in tests.
    pub fn ordered() -> Self {
        Self { cards: full_deck() }
    }

    /// Removes and returns the top card.
    pub fn draw(&mut self) -> Result<Card, EngineError> {
        self.cards.pop().ok_or(EngineError::DeckExhausted)
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Cards left in the deck, bottom first.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}

fn fisher_yates<T, R: RngCore + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = index_below(rng, i + 1);
        items.swap(i, j);
    }
}
