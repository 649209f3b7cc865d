//! # meadow-ai: AI dealers for heads-up Hold'em
//!
//! Four difficulty tiers, each a distinct decision policy built from the same
//! primitives (hand strength, draw potential, pot odds, bluffing and raise sizing).
//!
//! ## Core Components
//!
//! - [`Difficulty`] - The closed set of tiers
//! - [`AiDealer`] - A seeded dealer of one tier
//! - [`GameContext`] - The table as the dealer sees it
//! - [`personality`] - Behavioural weights per tier
//! - [`strength`] - Hand-strength heuristics
//!
//! ## Quick Start
//!
//! ```rust
//! use meadow_ai::{create_ai_dealer, difficulty_levels, Difficulty};
//!
//! assert_eq!(difficulty_levels().len(), 4);
//! let dealer = create_ai_dealer(Difficulty::Seedling, Some(1));
//! assert_eq!(dealer.personality().dealer_name, "Sunny");
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub mod context;
pub mod dealer;
pub mod personality;
mod strategy;
pub mod strength;

pub use context::{AiDecision, AiModifiers, GameContext};
pub use dealer::AiDealer;
pub use personality::{personality, Personality};

/// Dealer difficulty, weakest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Seedling,
    Sprout,
    Bloom,
    Harvest,
}

impl Difficulty {
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Seedling => "seedling",
            Difficulty::Sprout => "sprout",
            Difficulty::Bloom => "bloom",
            Difficulty::Harvest => "harvest",
        }
    }

    /// Chance per decision that the dealer misjudges its hand.
    pub fn mistake_rate(self) -> f64 {
        match self {
            Difficulty::Seedling => 0.2,
            Difficulty::Sprout => 0.1,
            Difficulty::Bloom => 0.05,
            Difficulty::Harvest => 0.02,
        }
    }

    /// Table maximum bet, in big blinds.
    pub fn max_bet_multiplier(self) -> u32 {
        match self {
            Difficulty::Seedling => 4,
            Difficulty::Sprout => 6,
            Difficulty::Bloom => 8,
            Difficulty::Harvest => 10,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "seedling" => Ok(Difficulty::Seedling),
            "sprout" => Ok(Difficulty::Sprout),
            "bloom" => Ok(Difficulty::Bloom),
            "harvest" => Ok(Difficulty::Harvest),
            other => Err(format!(
                "unknown difficulty '{}' (expected seedling, sprout, bloom or harvest)",
                other
            )),
        }
    }
}

pub fn difficulty_levels() -> [Difficulty; 4] {
    [
        Difficulty::Seedling,
        Difficulty::Sprout,
        Difficulty::Bloom,
        Difficulty::Harvest,
    ]
}

/// Builds a dealer of the given tier. Without a seed, one is drawn from the thread RNG.
pub fn create_ai_dealer(difficulty: Difficulty, seed: Option<u64>) -> AiDealer {
    AiDealer::new(difficulty, seed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_parses_case_insensitively() {
        assert_eq!("Bloom".parse::<Difficulty>(), Ok(Difficulty::Bloom));
        assert!("diamond".parse::<Difficulty>().is_err());
    }

    #[test]
    fn mistakes_fall_as_difficulty_rises() {
        let rates: Vec<f64> = difficulty_levels().iter().map(|d| d.mistake_rate()).collect();
        assert!(rates.windows(2).all(|w| w[1] < w[0]));
    }
}
