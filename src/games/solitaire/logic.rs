//! Solitaire move legality and transitions.

use super::types::*;
use crate::games::cards::Card;
use tracing::debug;

/// Whether `card` may be placed on a tableau column. An empty column takes
/// only a King; otherwise the exposed card must be face up, of the opposite
/// colour and exactly one rank higher.
pub fn can_place_on_tableau(card: &Card, column: &[Card]) -> bool {
    match column.last() {
        None => card.rank == Card::KING,
        Some(top) => top.face_up && top.is_red() != card.is_red() && top.rank == card.rank + 1,
    }
}

/// Whether `card` may be placed on a foundation. An empty foundation takes
/// only an Ace; otherwise same suit, exactly one rank higher.
pub fn can_place_on_foundation(card: &Card, foundation: &[Card]) -> bool {
    match foundation.last() {
        None => card.rank == Card::ACE,
        Some(top) => top.suit == card.suit && card.rank == top.rank + 1,
    }
}

/// A face-up, alternating-colour, descending run.
pub fn is_valid_run(cards: &[Card]) -> bool {
    cards.iter().all(|c| c.face_up)
        && cards
            .windows(2)
            .all(|w| w[0].is_red() != w[1].is_red() && w[0].rank == w[1].rank + 1)
}

/// Flip the exposed card of a column face up. Returns true if it flipped.
fn flip_exposed(column: &mut [Card]) -> bool {
    match column.last_mut() {
        Some(top) if !top.face_up => {
            top.face_up = true;
            true
        }
        _ => false,
    }
}

/// Apply one move. Illegal moves return an unchanged copy.
pub fn apply_move(game: &SolitaireGame, mv: SolitaireMove) -> SolitaireGame {
    let mut next = game.clone();
    if next.game_result.is_some() {
        return next;
    }

    let applied = match mv {
        SolitaireMove::Draw => draw(&mut next),
        SolitaireMove::WasteToTableau { to } => waste_to_tableau(&mut next, to),
        SolitaireMove::WasteToFoundation { foundation } => waste_to_foundation(&mut next, foundation),
        SolitaireMove::TableauToTableau { from, start, to } => {
            tableau_to_tableau(&mut next, from, start, to)
        }
        SolitaireMove::TableauToFoundation { from, foundation } => {
            tableau_to_foundation(&mut next, from, foundation)
        }
        SolitaireMove::FoundationToTableau { foundation, to } => {
            foundation_to_tableau(&mut next, foundation, to)
        }
        SolitaireMove::Resign => {
            next.game_result = Some(SolitaireResult::Loss);
            return next;
        }
    };

    if !applied {
        return game.clone();
    }

    next.moves += 1;
    if next.is_won() {
        debug!(score = next.score, moves = next.moves, "solitaire: all foundations complete");
        next.game_result = Some(SolitaireResult::Win);
    }
    next
}

fn draw(game: &mut SolitaireGame) -> bool {
    if let Some(mut card) = game.stock.pop() {
        card.face_up = true;
        game.waste.push(card);
        return true;
    }
    if game.waste.is_empty() {
        return false;
    }
    // Recycle: the waste turns over to become the stock, first-drawn on top.
    game.stock = game
        .waste
        .drain(..)
        .rev()
        .map(|mut c| {
            c.face_up = false;
            c
        })
        .collect();
    true
}

fn waste_to_tableau(game: &mut SolitaireGame, to: usize) -> bool {
    let (Some(card), Some(column)) = (game.waste.last().copied(), game.tableau.get(to)) else {
        return false;
    };
    if !can_place_on_tableau(&card, column) {
        return false;
    }
    game.waste.pop();
    game.tableau[to].push(card);
    game.score += POINTS_WASTE_TO_TABLEAU;
    true
}

fn waste_to_foundation(game: &mut SolitaireGame, foundation: usize) -> bool {
    let (Some(card), Some(pile)) = (game.waste.last().copied(), game.foundations.get(foundation))
    else {
        return false;
    };
    if !can_place_on_foundation(&card, pile) {
        return false;
    }
    game.waste.pop();
    game.foundations[foundation].push(card);
    game.score += POINTS_TO_FOUNDATION;
    true
}

fn tableau_to_tableau(game: &mut SolitaireGame, from: usize, start: usize, to: usize) -> bool {
    if from == to || from >= TABLEAU_COLUMNS || to >= TABLEAU_COLUMNS {
        return false;
    }
    let source = &game.tableau[from];
    if start >= source.len() || !is_valid_run(&source[start..]) {
        return false;
    }
    if !can_place_on_tableau(&source[start], &game.tableau[to]) {
        return false;
    }

    let run = game.tableau[from].split_off(start);
    game.tableau[to].extend(run);
    if flip_exposed(&mut game.tableau[from]) {
        game.score += POINTS_FLIP;
    }
    true
}

fn tableau_to_foundation(game: &mut SolitaireGame, from: usize, foundation: usize) -> bool {
    let (Some(column), Some(pile)) = (game.tableau.get(from), game.foundations.get(foundation))
    else {
        return false;
    };
    let Some(card) = column.last().copied() else {
        return false;
    };
    if !card.face_up || !can_place_on_foundation(&card, pile) {
        return false;
    }

    game.tableau[from].pop();
    game.foundations[foundation].push(card);
    game.score += POINTS_TO_FOUNDATION;
    if flip_exposed(&mut game.tableau[from]) {
        game.score += POINTS_FLIP;
    }
    true
}

fn foundation_to_tableau(game: &mut SolitaireGame, foundation: usize, to: usize) -> bool {
    let (Some(pile), Some(column)) = (game.foundations.get(foundation), game.tableau.get(to)) else {
        return false;
    };
    let Some(card) = pile.last().copied() else {
        return false;
    };
    if !can_place_on_tableau(&card, column) {
        return false;
    }
    game.foundations[foundation].pop();
    game.tableau[to].push(card);
    true
}

/// First foundation that accepts `card`: a same-suit pile it extends, or
/// else the first empty pile for an Ace.
pub fn foundation_for(game: &SolitaireGame, card: &Card) -> Option<usize> {
    game.foundations
        .iter()
        .position(|pile| !pile.is_empty() && can_place_on_foundation(card, pile))
        .or_else(|| {
            game.foundations
                .iter()
                .position(|pile| pile.is_empty() && can_place_on_foundation(card, pile))
        })
}

/// One automatic foundation move, waste first then tableau left to right.
fn next_foundation_move(game: &SolitaireGame) -> Option<SolitaireMove> {
    if let Some(card) = game.waste.last() {
        if let Some(foundation) = foundation_for(game, card) {
            return Some(SolitaireMove::WasteToFoundation { foundation });
        }
    }
    game.tableau.iter().enumerate().find_map(|(from, column)| {
        let card = column.last().filter(|c| c.face_up)?;
        foundation_for(game, card).map(|foundation| SolitaireMove::TableauToFoundation {
            from,
            foundation,
        })
    })
}

/// Move every card that can legally go to a foundation until none can.
pub fn auto_foundation(game: &SolitaireGame) -> SolitaireGame {
    let mut next = game.clone();
    while next.game_result.is_none() {
        let Some(mv) = next_foundation_move(&next) else {
            break;
        };
        next = apply_move(&next, mv);
    }
    next
}
