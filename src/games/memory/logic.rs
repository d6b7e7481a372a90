//! Memory flip rules.

use super::types::*;
use tracing::debug;

/// Turn any shown mismatched pair back face down.
pub fn hide_mismatch(game: &MemoryGame) -> MemoryGame {
    let mut next = game.clone();
    if let Some((a, b)) = next.mismatch.take() {
        next.cards[a].face_up = false;
        next.cards[b].face_up = false;
    }
    next
}

/// Flip the card at `index`. A pending mismatch is hidden first. Matched,
/// already shown or off-table cards are ignored.
pub fn flip(game: &MemoryGame, index: usize) -> MemoryGame {
    if game.game_result.is_some() {
        return game.clone();
    }
    let mut next = hide_mismatch(game);
    match next.cards.get(index) {
        Some(card) if !card.matched && !card.face_up => {}
        _ => return game.clone(),
    }
    next.cards[index].face_up = true;

    let Some(first) = next.first_pick.take() else {
        next.first_pick = Some(index);
        return next;
    };

    next.moves += 1;
    if next.cards[first].value == next.cards[index].value {
        next.cards[first].matched = true;
        next.cards[index].matched = true;
        next.pairs_found += 1;
        if next.pairs_found == next.total_pairs() {
            debug!(moves = next.moves, "memory: all pairs found");
            next.game_result = Some(MemoryResult::Win);
        }
    } else {
        next.mismatch = Some((first, index));
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> MemoryGame {
        MemoryGame::from_values(&[0, 1, 0, 1])
    }

    #[test]
    fn test_matching_pair() {
        let game = flip(&layout(), 0);
        assert_eq!(game.first_pick, Some(0));
        assert_eq!(game.moves, 0);
        let game = flip(&game, 2);
        assert!(game.cards[0].matched && game.cards[2].matched);
        assert_eq!(game.pairs_found, 1);
        assert_eq!(game.moves, 1);
        assert!(game.first_pick.is_none());
    }

    #[test]
    fn test_mismatch_stays_shown_until_next_flip() {
        let game = flip(&flip(&layout(), 0), 1);
        assert_eq!(game.mismatch, Some((0, 1)));
        assert!(game.cards[0].face_up && game.cards[1].face_up);

        let game = flip(&game, 3);
        assert!(!game.cards[0].face_up && !game.cards[1].face_up);
        assert!(game.mismatch.is_none());
        assert_eq!(game.first_pick, Some(3));
    }

    #[test]
    fn test_hide_mismatch() {
        let game = flip(&flip(&layout(), 0), 1);
        let hidden = hide_mismatch(&game);
        assert!(hidden.cards.iter().all(|c| !c.face_up));
        assert_eq!(hidden.moves, 1);
    }

    #[test]
    fn test_shown_or_matched_cards_are_ignored() {
        let picked = flip(&layout(), 0);
        assert_eq!(flip(&picked, 0), picked);
        assert_eq!(flip(&picked, 99), picked);

        let matched = flip(&picked, 2);
        assert_eq!(flip(&matched, 2), matched);
    }

    #[test]
    fn test_win_after_all_pairs() {
        let game = [0, 2, 1, 3].iter().fold(layout(), |g, &i| flip(&g, i));
        assert_eq!(game.game_result, Some(MemoryResult::Win));
        assert_eq!(game.moves, 2);
        assert_eq!(flip(&game, 0), game);
    }
}
