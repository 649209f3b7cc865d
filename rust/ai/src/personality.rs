//! Fixed character sheets for the four dealers.

use serde::Serialize;

use crate::Difficulty;

/// Behavioural weights of a dealer, all in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Personality {
    pub difficulty: Difficulty,
    /// Name shown at the table
    pub dealer_name: &'static str,
    pub aggression: f64,
    pub bluff_frequency: f64,
    /// How strong a hand must be before the dealer continues
    pub tightness: f64,
    /// Largest pot, as a share of the stack, the dealer will bluff into
    pub risk_tolerance: f64,
    /// How much the dealer learns from the opponent's history
    pub adaptability: f64,
}

const SEEDLING: Personality = Personality {
    difficulty: Difficulty::Seedling,
    dealer_name: "Sunny",
    aggression: 0.2,
    bluff_frequency: 0.05,
    tightness: 0.6,
    risk_tolerance: 0.3,
    adaptability: 0.1,
};

const SPROUT: Personality = Personality {
    difficulty: Difficulty::Sprout,
    dealer_name: "Fern",
    aggression: 0.4,
    bluff_frequency: 0.15,
    tightness: 0.5,
    risk_tolerance: 0.5,
    adaptability: 0.3,
};

const BLOOM: Personality = Personality {
    difficulty: Difficulty::Bloom,
    dealer_name: "Rose",
    aggression: 0.7,
    bluff_frequency: 0.25,
    tightness: 0.4,
    risk_tolerance: 0.7,
    adaptability: 0.6,
};

const HARVEST: Personality = Personality {
    difficulty: Difficulty::Harvest,
    dealer_name: "Thornwood",
    aggression: 0.75,
    bluff_frequency: 0.28,
    tightness: 0.35,
    risk_tolerance: 0.8,
    adaptability: 0.9,
};

pub fn personality(difficulty: Difficulty) -> &'static Personality {
    match difficulty {
        Difficulty::Seedling => &SEEDLING,
        Difficulty::Sprout => &SPROUT,
        Difficulty::Bloom => &BLOOM,
        Difficulty::Harvest => &HARVEST,
    }
}
