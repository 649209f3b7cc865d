//! # meadow-engine: Heads-up Hold'em core
//!
//! A deterministic Texas Hold'em engine for one player against one dealer.
//! The same seed always produces the same deck, so every hand can be replayed.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card) and parsing
//! - [`rng`] - Seedable linear congruential generator
//! - [`deck`] - Deterministic Fisher–Yates shuffle
//! - [`hand`] - Hand evaluation and comparison
//! - [`betting`] - Bet validation, pot odds and sizing presets
//! - [`pot`] - Main/side pot allocation for all-ins
//! - [`player`] - Participants and actions
//! - [`engine`] - The hand state machine
//! - [`logger`] - HandRecord serialization to JSONL
//! - [`errors`] - Error types for engine operations
//!
//! ## Quick Start
//!
//! ```rust
//! use meadow_engine::cards::parse_cards;
//! use meadow_engine::hand::{find_best_hand, Category};
//!
//! let cards = parse_cards("Ah Kh Qh Jh Th 2c 3d").unwrap();
//! let best = find_best_hand(&cards).unwrap();
//! assert_eq!(best.category, Category::RoyalFlush);
//! ```
//!
//! ## Deterministic Gameplay
//!
//! ```rust
//! use meadow_engine::deck::Deck;
//!
//! let a = Deck::new_with_seed(42);
//! let b = Deck::new_with_seed(42);
//! assert_eq!(a.cards(), b.cards());
//! ```

pub mod betting;
pub mod cards;
pub mod deck;
pub mod engine;
pub mod errors;
pub mod hand;
pub mod logger;
pub mod player;
pub mod pot;
pub mod rng;

pub use engine::{Phase, PokerEngine, PublicEngineState, Winner};
pub use errors::{ActionError, EngineError};
