use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cards::{Card, Rank};

/// Hand categories, weakest first. The discriminant feeds [`EvaluatedHand::value`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum Category {
    HighCard = 1,
    Pair = 2,
    TwoPair = 3,
    ThreeOfAKind = 4,
    Straight = 5,
    Flush = 6,
    FullHouse = 7,
    FourOfAKind = 8,
    StraightFlush = 9,
    RoyalFlush = 10,
}

impl Category {
    pub fn name(self) -> &'static str {
        match self {
            Category::HighCard => "High Card",
            Category::Pair => "Pair",
            Category::TwoPair => "Two Pair",
            Category::ThreeOfAKind => "Three of a Kind",
            Category::Straight => "Straight",
            Category::Flush => "Flush",
            Category::FullHouse => "Full House",
            Category::FourOfAKind => "Four of a Kind",
            Category::StraightFlush => "Straight Flush",
            Category::RoyalFlush => "Royal Flush",
        }
    }

    /// Base of the strength-percentage table used by the AI.
    fn strength_base(self) -> u32 {
        match self {
            Category::HighCard => 0,
            Category::Pair => 17,
            Category::TwoPair => 35,
            Category::ThreeOfAKind => 47,
            Category::Straight => 58,
            Category::Flush => 68,
            Category::FullHouse => 78,
            Category::FourOfAKind => 88,
            Category::StraightFlush => 96,
            Category::RoyalFlush => 100,
        }
    }

    fn next(self) -> Option<Category> {
        match self {
            Category::HighCard => Some(Category::Pair),
            Category::Pair => Some(Category::TwoPair),
            Category::TwoPair => Some(Category::ThreeOfAKind),
            Category::ThreeOfAKind => Some(Category::Straight),
            Category::Straight => Some(Category::Flush),
            Category::Flush => Some(Category::FullHouse),
            Category::FullHouse => Some(Category::FourOfAKind),
            Category::FourOfAKind => Some(Category::StraightFlush),
            Category::StraightFlush => Some(Category::RoyalFlush),
            Category::RoyalFlush => None,
        }
    }
}

/// Best five-card hand.
///
/// `primary` holds the cards that define the category in tie-break order (trips before
/// the pair of a full house, the high pair before the low pair, a wheel as 5-4-3-2-A);
/// `kickers` holds the remaining cards, highest first. `primary.len() + kickers.len() == 5`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluatedHand {
    pub category: Category,
    pub primary: Vec<Card>,
    pub kickers: Vec<Card>,
    /// Total order: category, then primary ranks, then kicker ranks. Suits never count.
    pub value: u64,
}

impl EvaluatedHand {
    pub fn name(&self) -> &'static str {
        self.category.name()
    }

    /// All five cards, primary first.
    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.primary.iter().chain(self.kickers.iter())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EvalError {
    #[error("need at least 5 cards to evaluate a hand, got {0}")]
    NotEnoughCards(usize),
}

const CATEGORY_WEIGHT: u64 = 100u64.pow(5);

/// Evaluates exactly five cards.
pub fn evaluate_hand(cards: &[Card; 5]) -> EvaluatedHand {
    let mut sorted = *cards;
    sorted.sort_by(|a, b| b.rank.cmp(&a.rank));

    let flush = sorted.iter().all(|c| c.suit == sorted[0].suit);
    let straight = straight_order(&sorted);

    if flush {
        if let Some(run) = straight {
            let category = if run[0].rank == Rank::Ace {
                Category::RoyalFlush
            } else {
                Category::StraightFlush
            };
            return build(category, run.to_vec(), Vec::new());
        }
    }

    let groups = rank_groups(&sorted);
    let shape: Vec<usize> = groups.iter().map(Vec::len).collect();

    match shape.as_slice() {
        [4, 1] => return build(Category::FourOfAKind, groups[0].clone(), groups[1].clone()),
        [3, 2] => {
            let mut primary = groups[0].clone();
            primary.extend_from_slice(&groups[1]);
            return build(Category::FullHouse, primary, Vec::new());
        }
        _ => {}
    }

    if flush {
        return build(Category::Flush, sorted.to_vec(), Vec::new());
    }
    if let Some(run) = straight {
        return build(Category::Straight, run.to_vec(), Vec::new());
    }

    match shape.as_slice() {
        [3, 1, 1] => build(
            Category::ThreeOfAKind,
            groups[0].clone(),
            groups[1..].concat(),
        ),
        [2, 2, 1] => build(Category::TwoPair, groups[..2].concat(), groups[2].clone()),
        [2, 1, 1, 1] => build(Category::Pair, groups[0].clone(), groups[1..].concat()),
        _ => build(Category::HighCard, vec![sorted[0]], sorted[1..].to_vec()),
    }
}

/// Best five-card hand out of five or more cards.
///
/// Every 5-card combination is evaluated; picking cards greedily misses hands such as a
/// straight hiding behind a pair or two candidate flushes.
pub fn find_best_hand(cards: &[Card]) -> Result<EvaluatedHand, EvalError> {
    let n = cards.len();
    if n < 5 {
        return Err(EvalError::NotEnoughCards(n));
    }

    let mut best: Option<EvaluatedHand> = None;
    for a in 0..n {
        for b in a + 1..n {
            for c in b + 1..n {
                for d in c + 1..n {
                    for e in d + 1..n {
                        let hand =
                            evaluate_hand(&[cards[a], cards[b], cards[c], cards[d], cards[e]]);
                        if best.as_ref().is_none_or(|h| hand.value > h.value) {
                            best = Some(hand);
                        }
                    }
                }
            }
        }
    }
    best.ok_or(EvalError::NotEnoughCards(n))
}

pub fn compare_hands(a: &EvaluatedHand, b: &EvaluatedHand) -> Ordering {
    a.value.cmp(&b.value)
}

/// Category strength on a 0–100 scale, interpolated inside the category by the rank of
/// the leading primary card.
pub fn hand_strength_percentage(hand: &EvaluatedHand) -> u32 {
    let base = hand.category.strength_base();
    let max_bonus = match hand.category.next() {
        Some(next) => next.strength_base() - base - 1,
        None => 0,
    };
    let lead = hand.primary.first().map(|c| c.rank.value()).unwrap_or(2);
    let bonus = lead as f64 / 14.0 * max_bonus as f64;
    ((base as f64 + bonus).round() as u32).min(100)
}

/// Human-readable summary such as "Full House, Ks full of 4s" or "Straight, 5-high".
pub fn describe_hand(hand: &EvaluatedHand) -> String {
    let lead = hand.primary.first().map(|c| c.rank.label()).unwrap_or("");
    let high = hand
        .primary
        .iter()
        .map(|c| c.rank)
        .max()
        .map(Rank::label)
        .unwrap_or("");
    match hand.category {
        Category::RoyalFlush => "Royal Flush".to_string(),
        Category::StraightFlush => format!("Straight Flush, {}-high", lead),
        Category::FourOfAKind => format!("Four of a Kind, {}s", lead),
        Category::FullHouse => {
            let pair = hand.primary.get(3).map(|c| c.rank.label()).unwrap_or("");
            format!("Full House, {}s full of {}s", lead, pair)
        }
        Category::Flush => format!("Flush, {}-high", high),
        Category::Straight => format!("Straight, {}-high", lead),
        Category::ThreeOfAKind => format!("Three of a Kind, {}s", lead),
        Category::TwoPair => {
            let low = hand.primary.get(2).map(|c| c.rank.label()).unwrap_or("");
            format!("Two Pair, {}s and {}s", lead, low)
        }
        Category::Pair => format!("Pair of {}s", lead),
        Category::HighCard => format!("High Card, {}", lead),
    }
}

fn build(category: Category, primary: Vec<Card>, kickers: Vec<Card>) -> EvaluatedHand {
    let ace_low = matches!(
        category,
        Category::Straight | Category::StraightFlush
    ) && primary.first().map(|c| c.rank) == Some(Rank::Five);
    let value = hand_value(category, &primary, &kickers, ace_low);
    EvaluatedHand {
        category,
        primary,
        kickers,
        value,
    }
}

fn hand_value(category: Category, primary: &[Card], kickers: &[Card], ace_low: bool) -> u64 {
    let mut value = category as u64 * CATEGORY_WEIGHT;
    for (i, card) in primary.iter().chain(kickers.iter()).enumerate() {
        let rank = if ace_low && card.rank == Rank::Ace {
            1
        } else {
            card.rank.value() as u64
        };
        value += rank * 100u64.pow(4 - i as u32);
    }
    value
}

/// Straight order for five cards sorted high to low, if they form one.
fn straight_order(sorted: &[Card; 5]) -> Option<[Card; 5]> {
    let v: Vec<u8> = sorted.iter().map(|c| c.rank.value()).collect();
    let distinct = v.windows(2).all(|w| w[0] != w[1]);
    if !distinct {
        return None;
    }
    if v[0] - v[4] == 4 {
        return Some(*sorted);
    }
    if v == [14, 5, 4, 3, 2] {
        return Some([sorted[1], sorted[2], sorted[3], sorted[4], sorted[0]]);
    }
    None
}

/// Cards grouped by rank, larger groups first, then higher ranks first.
fn rank_groups(sorted: &[Card; 5]) -> Vec<Vec<Card>> {
    let mut groups: Vec<Vec<Card>> = Vec::new();
    for &card in sorted {
        match groups.last_mut() {
            Some(g) if g[0].rank == card.rank => g.push(card),
            _ => groups.push(vec![card]),
        }
    }
    groups.sort_by(|a, b| b.len().cmp(&a.len()).then(b[0].rank.cmp(&a[0].rank)));
    groups
}
