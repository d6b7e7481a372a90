//! Blackjack hand evaluation, dealing and settlement.

use super::types::*;
use crate::games::cards::{self, Card};
use rand::Rng;
use tracing::debug;

/// Blackjack value of one card with an Ace counted high.
pub fn card_value(card: &Card) -> u32 {
    match card.rank {
        Card::ACE => 11,
        r if r >= 10 => 10,
        r => u32::from(r),
    }
}

/// Hand total. Aces start at 11 and are demoted to 1, one at a time, while
/// the total is over 21.
pub fn hand_value(hand: &[Card]) -> u32 {
    let mut total: u32 = hand.iter().map(card_value).sum();
    let mut high_aces = hand.iter().filter(|c| c.rank == Card::ACE).count();
    while total > 21 && high_aces > 0 {
        total -= 10;
        high_aces -= 1;
    }
    total
}

/// A hand with an Ace still counted as 11.
pub fn is_soft(hand: &[Card]) -> bool {
    let hard: u32 = hand
        .iter()
        .map(|c| if c.rank == Card::ACE { 1 } else { card_value(c) })
        .sum();
    hand.iter().any(|c| c.rank == Card::ACE) && hard + 10 <= 21
}

/// Two-card 21.
pub fn is_natural(hand: &[Card]) -> bool {
    hand.len() == 2 && hand_value(hand) == 21
}

pub fn is_bust(hand: &[Card]) -> bool {
    hand_value(hand) > 21
}

/// Rebuild the shoe from every card not on the table.
fn reshuffle<R: Rng>(game: &mut BlackjackGame, rng: &mut R) {
    let on_table: Vec<Card> = game.in_play().copied().collect();
    let mut deck: Vec<Card> = cards::standard_deck()
        .into_iter()
        .filter(|c| !on_table.iter().any(|t| t.same_card(c)))
        .collect();
    cards::shuffle(&mut deck, rng);
    debug!(cards = deck.len(), "blackjack: reshuffled");
    game.deck = deck;
}

fn draw<R: Rng>(game: &mut BlackjackGame, face_up: bool, rng: &mut R) -> Card {
    if game.deck.is_empty() {
        reshuffle(game, rng);
    }
    let Some(mut card) = game.deck.pop() else {
        unreachable!("a rebuilt shoe always holds the cards off the table");
    };
    card.face_up = face_up;
    card
}

fn reveal_hole(game: &mut BlackjackGame) {
    for card in &mut game.dealer {
        card.face_up = true;
    }
}

fn settle(game: &mut BlackjackGame, outcome: HandOutcome) {
    reveal_hole(game);
    game.bankroll += outcome.payout(game.bet);
    game.peak_bankroll = game.peak_bankroll.max(game.bankroll);
    game.outcome = Some(outcome);
    game.phase = BlackjackPhase::Resolved;
    game.hands_played += 1;
    debug!(
        ?outcome,
        bet = game.bet,
        bankroll = game.bankroll,
        player = hand_value(&game.player),
        dealer = hand_value(&game.dealer),
        "blackjack: hand settled"
    );
}

/// Wager `amount` and deal. Naturals settle on the spot.
pub fn place_bet<R: Rng>(game: &BlackjackGame, amount: u32, rng: &mut R) -> BlackjackGame {
    let mut next = game.clone();
    if next.phase != BlackjackPhase::Betting || amount == 0 || amount > next.bankroll {
        return next;
    }

    if next.deck.len() < RESHUFFLE_THRESHOLD {
        reshuffle(&mut next, rng);
    }
    next.bankroll -= amount;
    next.bet = amount;
    next.doubled = false;

    let p1 = draw(&mut next, true, rng);
    let d1 = draw(&mut next, true, rng);
    let p2 = draw(&mut next, true, rng);
    let d2 = draw(&mut next, false, rng);
    next.player = vec![p1, p2];
    next.dealer = vec![d1, d2];

    match (is_natural(&next.player), is_natural(&next.dealer)) {
        (true, true) => settle(&mut next, HandOutcome::Push),
        (true, false) => settle(&mut next, HandOutcome::PlayerBlackjack),
        (false, true) => settle(&mut next, HandOutcome::DealerWin),
        (false, false) => next.phase = BlackjackPhase::PlayerTurn,
    }
    next
}

/// Take one card. Going over 21 loses immediately.
pub fn hit<R: Rng>(game: &BlackjackGame, rng: &mut R) -> BlackjackGame {
    let mut next = game.clone();
    if next.phase != BlackjackPhase::PlayerTurn {
        return next;
    }
    let card = draw(&mut next, true, rng);
    next.player.push(card);
    if is_bust(&next.player) {
        settle(&mut next, HandOutcome::PlayerBust);
    }
    next
}

/// End the player's turn and let the dealer play out.
pub fn stand<R: Rng>(game: &BlackjackGame, rng: &mut R) -> BlackjackGame {
    let mut next = game.clone();
    if next.phase != BlackjackPhase::PlayerTurn {
        return next;
    }
    next.phase = BlackjackPhase::DealerTurn;
    reveal_hole(&mut next);
    while next.phase == BlackjackPhase::DealerTurn {
        next = dealer_step(&next, rng);
    }
    next
}

/// Double the stake, take exactly one card and stand. Only on the opening
/// two cards with enough chips to match the bet.
pub fn double_down<R: Rng>(game: &BlackjackGame, rng: &mut R) -> BlackjackGame {
    let mut next = game.clone();
    if next.phase != BlackjackPhase::PlayerTurn
        || next.player.len() != 2
        || next.bankroll < next.bet
    {
        return next;
    }
    next.bankroll -= next.bet;
    next.bet *= 2;
    next.doubled = true;

    let card = draw(&mut next, true, rng);
    next.player.push(card);
    if is_bust(&next.player) {
        settle(&mut next, HandOutcome::PlayerBust);
        return next;
    }
    stand(&next, rng)
}

/// One dealer decision: draw below 17, otherwise compare and settle.
pub fn dealer_step<R: Rng>(game: &BlackjackGame, rng: &mut R) -> BlackjackGame {
    let mut next = game.clone();
    if next.phase != BlackjackPhase::DealerTurn {
        return next;
    }

    let dealer = hand_value(&next.dealer);
    if dealer < DEALER_STANDS_AT {
        let card = draw(&mut next, true, rng);
        next.dealer.push(card);
        return next;
    }

    let player = hand_value(&next.player);
    let outcome = if dealer > 21 {
        HandOutcome::DealerBust
    } else if player > dealer {
        HandOutcome::PlayerWin
    } else if player < dealer {
        HandOutcome::DealerWin
    } else {
        HandOutcome::Push
    };
    settle(&mut next, outcome);
    next
}

/// Dispatch a player action. Actions outside their phase are ignored.
pub fn process_action<R: Rng>(
    game: &BlackjackGame,
    action: BlackjackAction,
    rng: &mut R,
) -> BlackjackGame {
    match action {
        BlackjackAction::Bet(amount) => place_bet(game, amount, rng),
        BlackjackAction::Hit => hit(game, rng),
        BlackjackAction::Stand => stand(game, rng),
        BlackjackAction::DoubleDown => double_down(game, rng),
    }
}

/// Per-hand restart and the only way out of `Resolved`: clears the settled
/// hand for the next wager, keeping the shoe and bankroll.
pub fn next_round(game: &BlackjackGame) -> BlackjackGame {
    let mut next = game.clone();
    if next.phase != BlackjackPhase::Resolved {
        return next;
    }
    next.player.clear();
    next.dealer.clear();
    next.bet = 0;
    next.doubled = false;
    next.outcome = None;
    next.phase = BlackjackPhase::Betting;
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::cards::Suit;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn c(rank: u8) -> Card {
        Card::new(Suit::Hearts, rank).face_up()
    }

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(3)
    }

    /// A full deck whose next draws are `draws`, in order.
    fn stacked(draws: &[(Suit, u8)]) -> Vec<Card> {
        let wanted: Vec<Card> = draws.iter().map(|&(s, r)| Card::new(s, r)).collect();
        let mut deck: Vec<Card> = cards::standard_deck()
            .into_iter()
            .filter(|card| !wanted.iter().any(|w| w.same_card(card)))
            .collect();
        deck.extend(wanted.iter().rev());
        deck
    }

    /// Deal order is player, dealer, player, dealer, then any hits.
    fn game_with(draws: &[(Suit, u8)]) -> BlackjackGame {
        BlackjackGame::with_deck(stacked(draws), 100)
    }

    #[test]
    fn test_hand_values() {
        assert_eq!(hand_value(&[c(1), c(13)]), 21);
        assert!(is_natural(&[c(1), c(13)]));
        assert_eq!(hand_value(&[c(1), c(1), c(9)]), 21);
        assert!(!is_natural(&[c(1), c(1), c(9)]));
        assert_eq!(hand_value(&[c(1), c(1)]), 12);
        assert_eq!(hand_value(&[c(1), c(1), c(1), c(1)]), 14);
        assert_eq!(hand_value(&[c(10), c(12), c(5)]), 25);
        assert_eq!(hand_value(&[c(11), c(12)]), 20);
    }

    #[test]
    fn test_soft_hands() {
        assert!(is_soft(&[c(1), c(6)]));
        assert!(!is_soft(&[c(1), c(6), c(10)]));
        assert!(!is_soft(&[c(10), c(7)]));
    }

    #[test]
    fn test_bet_deals_and_hides_hole_card() {
        use Suit::*;
        let game = game_with(&[(Clubs, 10), (Spades, 9), (Clubs, 7), (Spades, 8)]);
        let next = place_bet(&game, 40, &mut rng());
        assert_eq!(next.phase, BlackjackPhase::PlayerTurn);
        assert_eq!(next.bankroll, 60);
        assert_eq!(hand_value(&next.player), 17);
        assert!(next.dealer[0].face_up);
        assert!(!next.dealer[1].face_up);
        assert_eq!(next.deck.len(), 48);
    }

    #[test]
    fn test_invalid_bets_are_ignored() {
        let game = game_with(&[]);
        assert_eq!(place_bet(&game, 0, &mut rng()), game);
        assert_eq!(place_bet(&game, 101, &mut rng()), game);
    }

    #[test]
    fn test_player_natural_pays_three_to_two() {
        use Suit::*;
        let game = game_with(&[(Clubs, 1), (Spades, 9), (Clubs, 13), (Spades, 8)]);
        let next = place_bet(&game, 20, &mut rng());
        assert_eq!(next.outcome, Some(HandOutcome::PlayerBlackjack));
        assert_eq!(next.phase, BlackjackPhase::Resolved);
        assert_eq!(next.bankroll, 80 + 50);
        assert!(next.dealer.iter().all(|c| c.face_up));
    }

    #[test]
    fn test_both_naturals_push() {
        use Suit::*;
        let game = game_with(&[(Clubs, 1), (Spades, 1), (Clubs, 13), (Spades, 12)]);
        let next = place_bet(&game, 20, &mut rng());
        assert_eq!(next.outcome, Some(HandOutcome::Push));
        assert_eq!(next.bankroll, 100);
    }

    #[test]
    fn test_dealer_natural_wins_immediately() {
        use Suit::*;
        let game = game_with(&[(Clubs, 9), (Spades, 1), (Clubs, 9), (Spades, 12)]);
        let next = place_bet(&game, 20, &mut rng());
        assert_eq!(next.outcome, Some(HandOutcome::DealerWin));
        assert_eq!(next.bankroll, 80);
    }

    #[test]
    fn test_player_bust_loses_without_dealer_play() {
        use Suit::*;
        let game = game_with(&[
            (Clubs, 10),
            (Spades, 6),
            (Clubs, 6),
            (Spades, 7),
            (Hearts, 10),
        ]);
        let dealt = place_bet(&game, 10, &mut rng());
        let next = hit(&dealt, &mut rng());
        assert_eq!(next.outcome, Some(HandOutcome::PlayerBust));
        assert_eq!(next.dealer.len(), 2);
        assert_eq!(next.bankroll, 90);
    }

    #[test]
    fn test_dealer_draws_to_seventeen() {
        use Suit::*;
        // Dealer 6 + 7 = 13, draws a 5 to reach 18; player stands on 19.
        let game = game_with(&[
            (Clubs, 10),
            (Spades, 6),
            (Clubs, 9),
            (Spades, 7),
            (Hearts, 5),
        ]);
        let dealt = place_bet(&game, 10, &mut rng());
        let next = stand(&dealt, &mut rng());
        assert_eq!(next.dealer.len(), 3);
        assert_eq!(hand_value(&next.dealer), 18);
        assert_eq!(next.outcome, Some(HandOutcome::PlayerWin));
        assert_eq!(next.bankroll, 110);
    }

    #[test]
    fn test_dealer_bust() {
        use Suit::*;
        let game = game_with(&[
            (Clubs, 10),
            (Spades, 10),
            (Clubs, 2),
            (Spades, 6),
            (Hearts, 10),
        ]);
        let dealt = place_bet(&game, 10, &mut rng());
        let next = stand(&dealt, &mut rng());
        assert_eq!(next.outcome, Some(HandOutcome::DealerBust));
        assert_eq!(next.bankroll, 110);
    }

    #[test]
    fn test_double_down_takes_one_card() {
        use Suit::*;
        let game = game_with(&[
            (Clubs, 6),
            (Spades, 10),
            (Clubs, 5),
            (Spades, 8),
            (Hearts, 10),
        ]);
        let dealt = place_bet(&game, 20, &mut rng());
        let next = double_down(&dealt, &mut rng());
        assert_eq!(next.player.len(), 3);
        assert!(next.doubled);
        assert_eq!(next.bet, 40);
        assert_eq!(next.outcome, Some(HandOutcome::PlayerWin));
        assert_eq!(next.bankroll, 60 + 80);
    }

    #[test]
    fn test_double_down_only_on_two_cards() {
        use Suit::*;
        let game = game_with(&[
            (Clubs, 2),
            (Spades, 10),
            (Clubs, 3),
            (Spades, 8),
            (Hearts, 4),
        ]);
        let dealt = place_bet(&game, 20, &mut rng());
        let hit_once = hit(&dealt, &mut rng());
        assert_eq!(double_down(&hit_once, &mut rng()), hit_once);
    }

    #[test]
    fn test_out_of_phase_actions_ignored() {
        let game = game_with(&[]);
        let mut r = rng();
        assert_eq!(hit(&game, &mut r), game);
        assert_eq!(stand(&game, &mut r), game);
        assert_eq!(double_down(&game, &mut r), game);
        assert_eq!(next_round(&game), game);
    }

    #[test]
    fn test_resolved_hand_is_absorbing_until_next_round() {
        use Suit::*;
        let game = game_with(&[(Clubs, 1), (Spades, 9), (Clubs, 13), (Spades, 8)]);
        let done = place_bet(&game, 20, &mut rng());
        let mut r = rng();
        for action in [
            BlackjackAction::Hit,
            BlackjackAction::Stand,
            BlackjackAction::DoubleDown,
            BlackjackAction::Bet(10),
        ] {
            assert_eq!(process_action(&done, action, &mut r), done);
        }

        let fresh = next_round(&done);
        assert_eq!(fresh.phase, BlackjackPhase::Betting);
        assert!(fresh.player.is_empty() && fresh.dealer.is_empty());
        assert_eq!(fresh.bankroll, done.bankroll);
        assert_eq!(fresh.hands_played, 1);
    }

    #[test]
    fn test_short_shoe_is_reshuffled_before_dealing() {
        let mut game = BlackjackGame::with_deck(cards::standard_deck(), 100);
        game.deck.truncate(10);
        let next = place_bet(&game, 10, &mut rng());
        assert_eq!(next.deck.len() + 4, cards::DECK_SIZE);
    }

    #[test]
    fn test_cards_never_duplicate_across_rounds() {
        let mut r = ChaCha8Rng::seed_from_u64(21);
        let mut game = BlackjackGame::new(&mut r);
        for _ in 0..40 {
            game = place_bet(&game, 10, &mut r);
            while game.phase == BlackjackPhase::PlayerTurn {
                game = if hand_value(&game.player) < 15 {
                    hit(&game, &mut r)
                } else {
                    stand(&game, &mut r)
                };
            }
            let total = game.deck.len() + game.player.len() + game.dealer.len();
            assert!(total <= cards::DECK_SIZE);
            game = next_round(&game);
            if game.is_broke() {
                break;
            }
        }
        assert!(game.hands_played > 0);
    }
}
