//! Typing trainer input handling and clock.

use super::types::*;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypingInput {
    Char(char),
    Backspace,
}

/// Apply one keystroke. Ignored once the passage is complete.
pub fn process_input(game: &TypingGame, input: TypingInput) -> TypingGame {
    let mut next = game.clone();
    if next.is_complete() {
        return next;
    }

    match input {
        TypingInput::Char(ch) => {
            next.started = true;
            if next.target.get(next.typed.len()) == Some(&ch) {
                next.correct_keystrokes += 1;
            } else {
                next.incorrect_keystrokes += 1;
            }
            next.typed.push(ch);
            if next.is_complete() {
                debug!(
                    wpm = next.wpm(),
                    accuracy = next.accuracy(),
                    "typing: passage complete"
                );
            }
        }
        TypingInput::Backspace => {
            next.typed.pop();
        }
    }
    next
}

/// Add `dt_ms` to the clock while a passage is in progress.
pub fn advance_clock(game: &TypingGame, dt_ms: u64) -> TypingGame {
    let mut next = game.clone();
    if next.started && !next.is_complete() {
        next.elapsed_ms += dt_ms;
    }
    next
}

/// Type a whole string, one keystroke per char.
pub fn type_str(game: &TypingGame, text: &str) -> TypingGame {
    text.chars()
        .fold(game.clone(), |g, ch| process_input(&g, TypingInput::Char(ch)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_correct_and_incorrect_keystrokes() {
        let game = type_str(&TypingGame::new("cat"), "cx");
        assert_eq!(game.correct_keystrokes, 1);
        assert_eq!(game.incorrect_keystrokes, 1);
        assert_eq!(game.cursor(), 2);
        assert_eq!(game.correct_chars(), 1);
    }

    #[test]
    fn test_backspace_fixes_mistake_but_keeps_error_count() {
        let game = type_str(&TypingGame::new("cat"), "cx");
        let game = process_input(&game, TypingInput::Backspace);
        let game = type_str(&game, "at");
        assert!(game.is_complete());
        assert_eq!(game.correct_chars(), 3);
        assert_eq!(game.incorrect_keystrokes, 1);
        assert!((game.accuracy() - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_backspace_at_start_is_harmless() {
        let game = TypingGame::new("cat");
        assert_eq!(process_input(&game, TypingInput::Backspace), game);
    }

    #[test]
    fn test_clock_runs_only_while_typing() {
        let game = TypingGame::new("ab");
        assert_eq!(advance_clock(&game, 500).elapsed_ms, 0);

        let game = advance_clock(&type_str(&game, "a"), 500);
        assert_eq!(game.elapsed_ms, 500);

        let done = advance_clock(&type_str(&game, "b"), 500);
        assert_eq!(done.elapsed_ms, 500);
        assert_eq!(process_input(&done, TypingInput::Char('z')), done);
    }

    #[test]
    fn test_wpm_over_a_minute() {
        // 9 correct chars in 30 seconds.
        let mut game = type_str(&TypingGame::new("abcdefghi"), "abcdefgh");
        game = advance_clock(&game, 30_000);
        game = type_str(&game, "i");
        assert!((game.wpm() - (9.0 / 5.0) / 0.5).abs() < 1e-9);
    }
}
