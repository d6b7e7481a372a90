//! Flappy physics, pipe scrolling, collision and scoring.

use super::types::*;
use rand::Rng;
use tracing::debug;

/// Input actions for Flappy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlappyInput {
    /// Flap (Space or Enter or Up).
    Flap,
    /// Forfeit (Esc).
    Forfeit,
    /// Any other key.
    Other,
}

/// Process player input. A flap is queued and takes effect on the next tick.
pub fn process_input(game: &FlappyGame, input: FlappyInput) -> FlappyGame {
    let mut next = game.clone();
    if next.game_result.is_some() {
        return next;
    }

    match input {
        FlappyInput::Flap => {
            if next.forfeit_pending {
                // Any non-Esc key cancels forfeit
                next.forfeit_pending = false;
                return next;
            }
            next.waiting_to_start = false;
            next.flap_queued = true;
        }
        FlappyInput::Forfeit => {
            if next.forfeit_pending {
                next.game_result = Some(FlappyResult::Loss);
            } else {
                next.forfeit_pending = true;
            }
        }
        FlappyInput::Other => next.forfeit_pending = false,
    }
    next
}

/// Spawn a pipe at `next_pipe_x` with a random gap position.
pub fn spawn_pipe<R: Rng>(game: &mut FlappyGame, rng: &mut R) {
    let half_gap = game.pipe_gap / 2;
    // Gap center kept between rows 3 and 14 so the gap never clips ceiling/ground.
    let min_center = 3 + half_gap;
    let max_center = 14u16.saturating_sub(half_gap).max(min_center);
    let gap_center = rng.gen_range(min_center..=max_center);

    game.pipes.push(Pipe {
        x: game.next_pipe_x,
        gap_center,
        passed: false,
    });
    game.next_pipe_x += game.pipe_spacing;
}

/// Whether the bird's box `[BIRD_COL, BIRD_COL + BIRD_WIDTH) x [y, y + 1)`
/// intersects any pipe outside its gap.
pub fn collides(game: &FlappyGame) -> bool {
    let bird_left = BIRD_COL as f64;
    let bird_right = bird_left + BIRD_WIDTH as f64;
    let bird_top = game.bird_y;
    let bird_bottom = game.bird_y + 1.0;

    game.pipes.iter().any(|pipe| {
        let overlaps_x = bird_right > pipe.x && bird_left < pipe.right_edge();
        if !overlaps_x {
            return false;
        }
        let (gap_top, gap_bottom) = pipe.gap_bounds(game.pipe_gap);
        bird_top < gap_top || bird_bottom > gap_bottom
    })
}

/// Whether the bird has left the playfield through the ceiling or ground.
pub fn out_of_bounds(game: &FlappyGame) -> bool {
    game.bird_y < 0.0 || game.bird_y >= GAME_HEIGHT as f64 - 1.0
}

/// One physics tick: integrate the bird, scroll pipes, then resolve
/// collisions and scoring before returning, so a colliding state is never
/// handed back as live.
pub fn step_flappy<R: Rng>(game: &FlappyGame, rng: &mut R) -> FlappyGame {
    let mut next = game.clone();
    if next.game_result.is_some() || next.waiting_to_start || next.forfeit_pending {
        return next;
    }

    next.tick_count += 1;

    if next.flap_queued {
        next.flap_queued = false;
        next.bird_velocity = next.flap_impulse;
    } else {
        next.bird_velocity = (next.bird_velocity + next.gravity).min(next.terminal_velocity);
    }
    next.bird_y += next.bird_velocity;

    if out_of_bounds(&next) {
        debug!(score = next.score, y = next.bird_y, "flappy: left playfield");
        next.game_result = Some(FlappyResult::Loss);
        return next;
    }

    let speed = next.pipe_speed;
    for pipe in &mut next.pipes {
        pipe.x -= speed;
    }
    next.next_pipe_x -= speed;

    if collides(&next) {
        debug!(score = next.score, "flappy: hit pipe");
        next.game_result = Some(FlappyResult::Loss);
        return next;
    }

    let bird_left = BIRD_COL as f64;
    let mut passed = 0;
    for pipe in &mut next.pipes {
        if !pipe.passed && pipe.right_edge() <= bird_left {
            pipe.passed = true;
            passed += 1;
        }
    }
    next.score += passed;
    if next.score >= next.target_score {
        debug!(score = next.score, "flappy: target reached");
        next.game_result = Some(FlappyResult::Win);
        return next;
    }

    next.pipes.retain(|p| p.right_edge() >= 0.0);
    while next.next_pipe_x <= GAME_WIDTH as f64 {
        spawn_pipe(&mut next, rng);
    }

    next
}
