//! Playing cards shared by Solitaire and Blackjack.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of cards in a standard deck.
pub const DECK_SIZE: usize = 52;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

    pub fn is_red(&self) -> bool {
        matches!(self, Suit::Diamonds | Suit::Hearts)
    }

    pub fn index(&self) -> usize {
        match self {
            Suit::Clubs => 0,
            Suit::Diamonds => 1,
            Suit::Hearts => 2,
            Suit::Spades => 3,
        }
    }

    fn symbol(&self) -> char {
        match self {
            Suit::Clubs => 'C',
            Suit::Diamonds => 'D',
            Suit::Hearts => 'H',
            Suit::Spades => 'S',
        }
    }
}

/// A card. `rank` is 1 (Ace) through 13 (King).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub suit: Suit,
    pub rank: u8,
    pub face_up: bool,
}

impl Card {
    pub const ACE: u8 = 1;
    pub const KING: u8 = 13;

    /// A face-down card. Panics on a rank outside 1..=13.
    pub fn new(suit: Suit, rank: u8) -> Self {
        assert!(
            (Self::ACE..=Self::KING).contains(&rank),
            "card rank {rank} out of range"
        );
        Self {
            suit,
            rank,
            face_up: false,
        }
    }

    pub fn face_up(mut self) -> Self {
        self.face_up = true;
        self
    }

    pub fn is_red(&self) -> bool {
        self.suit.is_red()
    }

    /// Same card ignoring orientation.
    pub fn same_card(&self, other: &Card) -> bool {
        self.suit == other.suit && self.rank == other.rank
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rank = match self.rank {
            1 => "A".to_string(),
            11 => "J".to_string(),
            12 => "Q".to_string(),
            13 => "K".to_string(),
            n => n.to_string(),
        };
        write!(f, "{}{}", rank, self.suit.symbol())
    }
}

/// The 52-card deck in fixed suit-major, rank-minor order, all face down.
pub fn standard_deck() -> Vec<Card> {
    Suit::ALL
        .iter()
        .flat_map(|&suit| (Card::ACE..=Card::KING).map(move |rank| Card::new(suit, rank)))
        .collect()
}

/// In-place Fisher-Yates: walk from the last index down to 1, swapping each
/// slot with a uniformly chosen index in `[0, i]`.
pub fn shuffle<T, R: Rng>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

/// A freshly shuffled standard deck.
pub fn shuffled_deck<R: Rng>(rng: &mut R) -> Vec<Card> {
    let mut deck = standard_deck();
    shuffle(&mut deck, rng);
    deck
}
