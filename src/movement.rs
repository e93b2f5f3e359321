/// Movement & collision resolution.
///
/// Displacements are resolved one axis at a time: X fully against every
/// obstacle, then Y.  The order matters; an X clamp can change which
/// obstacles the Y pass touches.
use std::f32::consts::FRAC_1_SQRT_2;

use crate::camera;
use crate::config::GameConfig;
use crate::constants::EXIT_RADIUS;
use crate::entities::{Character, Tile};
use crate::geometry::{distance, Rect};

/// What the player's move produced for the rest of the tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MoveOutcome {
    /// Shift to apply to every world-anchored entity.
    pub scroll: (f32, f32),
    pub level_complete: bool,
}

/// Scales a two-axis displacement by √2⁄2 so a diagonal step covers the
/// same distance as an axis-aligned one.
pub fn normalize_diagonal(dx: f32, dy: f32) -> (f32, f32) {
    if dx != 0.0 && dy != 0.0 {
        (dx * FRAC_1_SQRT_2, dy * FRAC_1_SQRT_2)
    } else {
        (dx, dy)
    }
}

/// Moves `rect` by `(dx, dy)`, clamping against each obstacle it overlaps.
pub fn resolve_move<'a, I>(rect: &mut Rect, dx: f32, dy: f32, obstacles: I)
where
    I: IntoIterator<Item = &'a Rect> + Clone,
{
    rect.x += dx;
    for obstacle in obstacles.clone() {
        if obstacle.intersects(rect) {
            if dx > 0.0 {
                rect.set_right(obstacle.left());
            }
            if dx < 0.0 {
                rect.set_left(obstacle.right());
            }
        }
    }

    rect.y += dy;
    for obstacle in obstacles {
        if obstacle.intersects(rect) {
            if dy > 0.0 {
                rect.set_bottom(obstacle.top());
            }
            if dy < 0.0 {
                rect.set_top(obstacle.bottom());
            }
        }
    }
}

/// Moves a character: updates `running` and facing, optionally normalizes
/// diagonals, then resolves against the obstacles.
pub fn move_character<'a, I>(
    character: &mut Character,
    dx: f32,
    dy: f32,
    obstacles: I,
    normalize: bool,
) where
    I: IntoIterator<Item = &'a Rect> + Clone,
{
    character.running = dx != 0.0 || dy != 0.0;
    if dx < 0.0 {
        character.flip = true;
    }
    if dx > 0.0 {
        character.flip = false;
    }

    let (dx, dy) = if normalize {
        normalize_diagonal(dx, dy)
    } else {
        (dx, dy)
    };
    resolve_move(&mut character.rect, dx, dy, obstacles);
}

/// True when `rect` overlaps the exit and its center is within
/// [`EXIT_RADIUS`] of the exit's center.
pub fn reached_exit(rect: &Rect, exit: &Tile) -> bool {
    exit.rect.intersects(rect) && distance(rect.center(), exit.rect.center()) < EXIT_RADIUS
}

/// The player's move for one tick: normalized, resolved, checked against the
/// exit, then pinned inside the scroll band.
pub fn move_player<'a, I>(
    player: &mut Character,
    dx: f32,
    dy: f32,
    obstacles: I,
    exit: Option<&Tile>,
    config: &GameConfig,
) -> MoveOutcome
where
    I: IntoIterator<Item = &'a Rect> + Clone,
{
    move_character(player, dx, dy, obstacles, true);

    let level_complete = exit.is_some_and(|exit| reached_exit(&player.rect, exit));
    let scroll = camera::pin_to_scroll_band(&mut player.rect, config);

    MoveOutcome {
        scroll,
        level_complete,
    }
}
