//! Snake game logic: movement, input processing, collision detection.

use super::types::*;
use crate::games::Direction;
use rand::Rng;
use tracing::debug;

/// UI-agnostic input actions for Snake.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnakeInput {
    Up,
    Down,
    Left,
    Right,
    Forfeit, // Esc
    Other,   // Any other key (cancels forfeit_pending)
}

/// Pick a uniformly random free cell for food. `None` when the snake
/// occupies every cell.
pub fn spawn_food<R: Rng>(game: &SnakeGame, rng: &mut R) -> Option<Position> {
    if game.snake.len() >= game.cell_count() {
        return None;
    }
    let free: Vec<Position> = (0..game.grid_height)
        .flat_map(|y| (0..game.grid_width).map(move |x| Position::new(x, y)))
        .filter(|p| !game.snake.contains(p))
        .collect();
    if free.is_empty() {
        return None;
    }
    Some(free[rng.gen_range(0..free.len())])
}

/// Process player input. Direction requests are buffered until the next
/// step; a request opposite to the current direction is ignored.
pub fn process_input(game: &SnakeGame, input: SnakeInput) -> SnakeGame {
    let mut next = game.clone();
    if next.game_result.is_some() {
        return next;
    }

    let requested = match input {
        SnakeInput::Up => Some(Direction::Up),
        SnakeInput::Down => Some(Direction::Down),
        SnakeInput::Left => Some(Direction::Left),
        SnakeInput::Right => Some(Direction::Right),
        SnakeInput::Forfeit => {
            if next.forfeit_pending {
                next.game_result = Some(SnakeResult::Loss); // Confirm forfeit
            } else {
                next.forfeit_pending = true;
            }
            None
        }
        SnakeInput::Other => {
            next.forfeit_pending = false;
            None
        }
    };

    if let Some(direction) = requested {
        if next.forfeit_pending {
            next.forfeit_pending = false;
        } else if direction != next.direction.opposite() {
            next.next_direction = direction;
        }
    }
    next
}

/// Single movement step. Paused while a forfeit is pending.
pub fn step_snake<R: Rng>(game: &SnakeGame, rng: &mut R) -> SnakeGame {
    let mut next = game.clone();
    if next.game_result.is_some() || next.forfeit_pending {
        return next;
    }

    next.tick_count += 1;
    next.direction = next.next_direction;
    let new_head = next.head().step(next.direction);

    if !next.in_bounds(new_head) {
        debug!(score = next.score, "snake: hit wall");
        next.game_result = Some(SnakeResult::Loss);
        return next;
    }

    // If eating, the tail stays so check the full body. Otherwise the tail
    // vacates this step, so exclude it (allows tail-chasing).
    let eating = next.food == Some(new_head);
    let collision_range = if eating {
        next.snake.len()
    } else {
        next.snake.len() - 1
    };
    if next
        .snake
        .iter()
        .take(collision_range)
        .any(|&seg| seg == new_head)
    {
        debug!(score = next.score, "snake: hit itself");
        next.game_result = Some(SnakeResult::Loss);
        return next;
    }

    next.snake.push_front(new_head);

    if !eating {
        next.snake.pop_back();
        return next;
    }

    next.score += 1;
    if next.target_score.is_some_and(|target| next.score >= target) {
        debug!(score = next.score, "snake: target reached");
        next.game_result = Some(SnakeResult::Win);
        return next;
    }

    next.food = spawn_food(&next, rng);
    if next.food.is_none() {
        debug!(score = next.score, "snake: board filled");
        next.game_result = Some(SnakeResult::Win);
    }
    next
}
