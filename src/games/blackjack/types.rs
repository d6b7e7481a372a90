//! Blackjack data structures.

use crate::games::cards::{self, Card};
use rand::Rng;

/// The shoe is rebuilt before a round when fewer cards than this remain.
pub const RESHUFFLE_THRESHOLD: usize = 15;
/// Dealer draws while below this value.
pub const DEALER_STANDS_AT: u32 = 17;
pub const DEFAULT_BANKROLL: u32 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlackjackPhase {
    /// Waiting for a wager.
    Betting,
    PlayerTurn,
    /// Hole card revealed, dealer drawing.
    DealerTurn,
    /// Hand settled; only [`super::next_round`] leaves this phase.
    Resolved,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandOutcome {
    /// Natural 21 on the first two cards, paid 3:2.
    PlayerBlackjack,
    PlayerWin,
    DealerWin,
    PlayerBust,
    DealerBust,
    Push,
}

impl HandOutcome {
    /// Total returned to the bankroll for a settled `bet`, stake included.
    pub fn payout(&self, bet: u32) -> u32 {
        match self {
            Self::PlayerBlackjack => bet + bet * 3 / 2,
            Self::PlayerWin | Self::DealerBust => bet * 2,
            Self::Push => bet,
            Self::DealerWin | Self::PlayerBust => 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlackjackAction {
    Bet(u32),
    Hit,
    Stand,
    /// Double the bet, take exactly one card, then stand.
    DoubleDown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlackjackGame {
    /// Undealt cards; the last element is dealt next.
    pub deck: Vec<Card>,
    pub player: Vec<Card>,
    /// Second card stays face down until the dealer's turn.
    pub dealer: Vec<Card>,
    pub phase: BlackjackPhase,
    /// Chips not currently wagered.
    pub bankroll: u32,
    pub bet: u32,
    pub doubled: bool,
    pub outcome: Option<HandOutcome>,
    pub hands_played: u32,
    pub peak_bankroll: u32,
}

impl BlackjackGame {
    pub fn new<R: Rng>(rng: &mut R) -> Self {
        Self::with_deck(cards::shuffled_deck(rng), DEFAULT_BANKROLL)
    }

    /// Start from a prepared deck (dealt from the end).
    pub fn with_deck(deck: Vec<Card>, bankroll: u32) -> Self {
        Self {
            deck,
            player: Vec::new(),
            dealer: Vec::new(),
            phase: BlackjackPhase::Betting,
            bankroll,
            bet: 0,
            doubled: false,
            outcome: None,
            hands_played: 0,
            peak_bankroll: bankroll,
        }
    }

    /// Cards currently on the table.
    pub fn in_play(&self) -> impl Iterator<Item = &Card> {
        self.player.iter().chain(self.dealer.iter())
    }

    /// Out of chips and no hand in progress.
    pub fn is_broke(&self) -> bool {
        self.bankroll == 0 && matches!(self.phase, BlackjackPhase::Betting | BlackjackPhase::Resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payouts() {
        assert_eq!(HandOutcome::PlayerBlackjack.payout(100), 250);
        assert_eq!(HandOutcome::PlayerBlackjack.payout(15), 37);
        assert_eq!(HandOutcome::PlayerWin.payout(100), 200);
        assert_eq!(HandOutcome::DealerBust.payout(100), 200);
        assert_eq!(HandOutcome::Push.payout(100), 100);
        assert_eq!(HandOutcome::DealerWin.payout(100), 0);
        assert_eq!(HandOutcome::PlayerBust.payout(100), 0);
    }

    #[test]
    fn test_new_game_waits_for_bet() {
        use rand::SeedableRng;
        let game = BlackjackGame::new(&mut rand_chacha::ChaCha8Rng::seed_from_u64(1));
        assert_eq!(game.phase, BlackjackPhase::Betting);
        assert_eq!(game.deck.len(), cards::DECK_SIZE);
        assert_eq!(game.bankroll, DEFAULT_BANKROLL);
        assert!(!game.is_broke());
    }
}
