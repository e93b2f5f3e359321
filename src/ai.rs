/// Enemy AI: line of sight, distance gating, chase, contact damage and boss
/// fireballs.
///
/// Enemies are shifted by the camera before this pass runs, so distances are
/// measured against the player's already-pinned position.
use tracing::debug;

use crate::config::GameConfig;
use crate::constants::{CONTACT_DAMAGE, FIREBALL_COOLDOWN_MS};
use crate::entities::{Character, GameEvent, Projectile};
use crate::geometry::{distance, Rect};
use crate::movement::move_character;

/// True unless some obstacle clips the segment between the two points.
pub fn line_of_sight_clear<'a, I>(from: (f32, f32), to: (f32, f32), obstacles: I) -> bool
where
    I: IntoIterator<Item = &'a Rect>,
{
    !obstacles
        .into_iter()
        .any(|obstacle| obstacle.clips_segment(from, to))
}

/// One sign-based step per axis toward `target`.  Not normalized, so a
/// diagonal chase closes faster than a straight one.
pub fn chase_step(from: (f32, f32), target: (f32, f32), speed: f32) -> (f32, f32) {
    let step = |own: f32, goal: f32| {
        if own > goal {
            -speed
        } else if own < goal {
            speed
        } else {
            0.0
        }
    };
    (step(from.0, target.0), step(from.1, target.1))
}

/// Runs one enemy for one tick.  May damage the player directly and may
/// return a fireball for the projectile list.
pub fn think<'a, I>(
    enemy: &mut Character,
    player: &mut Character,
    obstacles: I,
    config: &GameConfig,
    now: u64,
    events: &mut Vec<GameEvent>,
) -> Option<Projectile>
where
    I: IntoIterator<Item = &'a Rect> + Clone,
{
    if !enemy.alive {
        return None;
    }

    let own = enemy.rect.center();
    let target = player.rect.center();
    let clear = line_of_sight_clear(own, target, obstacles.clone());
    let dist = distance(own, target);

    let (ai_dx, ai_dy) = if clear && dist > config.enemy_range_to_player {
        chase_step(own, target, config.enemy_speed)
    } else {
        (0.0, 0.0)
    };

    let mut fireball = None;
    if !enemy.stunned {
        move_character(enemy, ai_dx, ai_dy, obstacles, false);

        if dist < config.attack_range && !player.in_hit_cooldown() {
            player.apply_damage(CONTACT_DAMAGE);
            player.register_hit(now);
            events.push(GameEvent::PlayerHurt {
                damage: CONTACT_DAMAGE,
            });
        }

        if enemy.boss
            && dist < config.boss_fireball_range
            && now.saturating_sub(enemy.last_attack) >= FIREBALL_COOLDOWN_MS
        {
            let (x, y) = enemy.rect.center();
            debug!(x, y, dist, "boss casts fireball");
            fireball = Some(Projectile::fireball(x, y, target.0, target.1, config));
            enemy.last_attack = now;
            events.push(GameEvent::FireballCast);
        }
    }

    enemy.process_stun(now);
    fireball
}
