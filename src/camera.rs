/// Camera/scroll coordination.  The player stays inside a band away from the
/// screen edges; when it would leave the band the world moves instead.
use crate::config::GameConfig;
use crate::geometry::Rect;
use crate::world::World;

/// Pins `rect` inside the scroll band and returns the scroll delta that
/// keeps the world consistent with the pin.
pub fn pin_to_scroll_band(rect: &mut Rect, config: &GameConfig) -> (f32, f32) {
    let thresh = config.scroll_thresh;
    let mut scroll = (0.0, 0.0);

    let right_edge = config.screen_width - thresh;
    if rect.right() > right_edge {
        scroll.0 = right_edge - rect.right();
        rect.set_right(right_edge);
    }
    if rect.left() < thresh {
        scroll.0 = thresh - rect.left();
        rect.set_left(thresh);
    }

    let bottom_edge = config.screen_height - thresh;
    if rect.bottom() > bottom_edge {
        scroll.1 = bottom_edge - rect.bottom();
        rect.set_bottom(bottom_edge);
    }
    if rect.top() < thresh {
        scroll.1 = thresh - rect.top();
        rect.set_top(thresh);
    }

    scroll
}

/// Shifts every world-anchored entity by the scroll delta: tiles, enemies
/// (alive or not), items other than pinned HUD decorations, projectiles and
/// damage popups.  The player is already pinned and is left alone.
pub fn apply_scroll(world: &mut World, scroll: (f32, f32)) {
    let (dx, dy) = scroll;
    if dx == 0.0 && dy == 0.0 {
        return;
    }

    world.map.scroll(dx, dy);
    for enemy in &mut world.enemies {
        enemy.rect.translate(dx, dy);
    }
    for item in world.items.iter_mut().filter(|item| !item.pinned) {
        item.rect.translate(dx, dy);
    }
    for projectile in &mut world.projectiles {
        projectile.rect.translate(dx, dy);
    }
    for popup in &mut world.popups {
        popup.x += dx;
        popup.y += dy;
    }
}
