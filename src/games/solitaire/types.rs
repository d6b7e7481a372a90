//! Solitaire data structures.

use crate::games::cards::{self, Card, DECK_SIZE};
use rand::Rng;

pub const TABLEAU_COLUMNS: usize = 7;
pub const FOUNDATION_COUNT: usize = 4;

pub const POINTS_TO_FOUNDATION: u32 = 10;
pub const POINTS_WASTE_TO_TABLEAU: u32 = 5;
pub const POINTS_FLIP: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolitaireResult {
    /// Every foundation holds Ace through King.
    Win,
    /// Player resigned.
    Loss,
}

/// Player moves. Indices outside the board make the move illegal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolitaireMove {
    /// Stock to waste, or recycle the waste when the stock is empty.
    Draw,
    WasteToTableau { to: usize },
    WasteToFoundation { foundation: usize },
    /// Move the face-up run starting at `start` in column `from`.
    TableauToTableau { from: usize, start: usize, to: usize },
    TableauToFoundation { from: usize, foundation: usize },
    FoundationToTableau { foundation: usize, to: usize },
    Resign,
}

/// Card piles are stored bottom-first: the last element is the exposed card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolitaireGame {
    pub stock: Vec<Card>,
    pub waste: Vec<Card>,
    pub foundations: [Vec<Card>; FOUNDATION_COUNT],
    pub tableau: [Vec<Card>; TABLEAU_COLUMNS],
    pub score: u32,
    /// Accepted moves, draws and recycles included.
    pub moves: u32,
    pub game_result: Option<SolitaireResult>,
}

impl SolitaireGame {
    /// Deal a freshly shuffled deck.
    pub fn new<R: Rng>(rng: &mut R) -> Self {
        Self::deal(cards::shuffled_deck(rng))
    }

    /// Deal `deck` in order: column `i` takes the next `i + 1` cards with
    /// only its last card face up, the remaining 24 form the stock. The last
    /// card of the stock is drawn first.
    pub fn deal(deck: Vec<Card>) -> Self {
        assert_eq!(deck.len(), DECK_SIZE, "solitaire needs a full deck");

        let mut cards = deck.into_iter().map(|mut c| {
            c.face_up = false;
            c
        });
        let tableau: [Vec<Card>; TABLEAU_COLUMNS] = std::array::from_fn(|col| {
            let mut column: Vec<Card> = cards.by_ref().take(col + 1).collect();
            if let Some(top) = column.last_mut() {
                top.face_up = true;
            }
            column
        });

        Self {
            stock: cards.collect(),
            waste: Vec::new(),
            foundations: Default::default(),
            tableau,
            score: 0,
            moves: 0,
            game_result: None,
        }
    }

    pub fn is_won(&self) -> bool {
        self.foundations
            .iter()
            .all(|f| f.len() == usize::from(Card::KING))
    }

    /// Cards across every pile. Always 52.
    pub fn card_count(&self) -> usize {
        self.stock.len()
            + self.waste.len()
            + self.foundations.iter().map(Vec::len).sum::<usize>()
            + self.tableau.iter().map(Vec::len).sum::<usize>()
    }

    pub fn foundation_cards(&self) -> usize {
        self.foundations.iter().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::cards::{standard_deck, Suit};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashSet;

    #[test]
    fn test_deal_layout() {
        let game = SolitaireGame::new(&mut ChaCha8Rng::seed_from_u64(5));
        for (i, column) in game.tableau.iter().enumerate() {
            assert_eq!(column.len(), i + 1);
            let (top, hidden) = column.split_last().unwrap();
            assert!(top.face_up);
            assert!(hidden.iter().all(|c| !c.face_up));
        }
        assert_eq!(game.stock.len(), 24);
        assert!(game.stock.iter().all(|c| !c.face_up));
        assert!(game.waste.is_empty());
        assert_eq!(game.foundation_cards(), 0);
    }

    #[test]
    fn test_deal_uses_every_card_once() {
        let mut rng = ChaCha8Rng::seed_from_u64(77);
        for _ in 0..10 {
            let game = SolitaireGame::new(&mut rng);
            let all: Vec<Card> = game
                .tableau
                .iter()
                .flatten()
                .chain(game.stock.iter())
                .copied()
                .collect();
            let unique: HashSet<(Suit, u8)> = all.iter().map(|c| (c.suit, c.rank)).collect();
            assert_eq!(all.len(), DECK_SIZE);
            assert_eq!(unique.len(), DECK_SIZE);
            assert_eq!(game.card_count(), DECK_SIZE);
        }
    }

    #[test]
    fn test_ordered_deal() {
        let game = SolitaireGame::deal(standard_deck());
        assert!(game.tableau[0][0].same_card(&Card::new(Suit::Clubs, 1)));
        assert!(game.tableau[1][1].same_card(&Card::new(Suit::Clubs, 3)));
        // 28 cards go to the tableau; the stock starts at the 29th.
        assert!(game.stock[0].same_card(&Card::new(Suit::Hearts, 3)));
    }

    #[test]
    #[should_panic(expected = "full deck")]
    fn test_short_deck_panics() {
        let mut deck = standard_deck();
        deck.pop();
        SolitaireGame::deal(deck);
    }
}
