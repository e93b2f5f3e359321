/// Projectile subsystem: the player's bow, arrows and boss fireballs.
///
/// Both projectile kinds share one struct and one update pass.  Spent
/// projectiles are flagged `expired` during the pass and compacted once at
/// the end of it.
use rand::Rng;
use tracing::debug;

use crate::config::GameConfig;
use crate::constants::{
    ARROW_BASE_DAMAGE, ARROW_DAMAGE_SPREAD, ARROW_SIZE, FIREBALL_DAMAGE, FIREBALL_SIZE,
    POPUP_JITTER, SHOT_COOLDOWN_MS,
};
use crate::entities::{
    Character, DamagePopup, GameEvent, Projectile, ProjectileKind, TickInput,
};
use crate::geometry::Rect;

/// Angle in degrees from `from` to `to`, counter-clockwise from +x with the
/// screen's downward y flipped to point up.
pub fn aim_angle(from: (f32, f32), to: (f32, f32)) -> f32 {
    let x_dist = to.0 - from.0;
    let y_dist = -(to.1 - from.1);
    y_dist.atan2(x_dist).to_degrees()
}

/// Screen-space velocity for a launch angle.
pub fn velocity(angle: f32, speed: f32) -> (f32, f32) {
    let radians = angle.to_radians();
    (radians.cos() * speed, -(radians.sin() * speed))
}

impl Projectile {
    pub fn arrow(x: f32, y: f32, angle: f32, config: &GameConfig) -> Self {
        let (dx, dy) = velocity(angle, config.arrow_speed);
        Projectile {
            kind: ProjectileKind::Arrow,
            rect: Rect::from_center(x, y, ARROW_SIZE, ARROW_SIZE),
            dx,
            dy,
            angle,
            expired: false,
        }
    }

    /// Aimed once at cast time; fireballs do not home.
    pub fn fireball(x: f32, y: f32, target_x: f32, target_y: f32, config: &GameConfig) -> Self {
        let angle = aim_angle((x, y), (target_x, target_y));
        let (dx, dy) = velocity(angle, config.fireball_speed);
        Projectile {
            kind: ProjectileKind::Fireball,
            rect: Rect::from_center(x, y, FIREBALL_SIZE, FIREBALL_SIZE),
            dx,
            dy,
            angle,
            expired: false,
        }
    }

    pub fn advance(&mut self) {
        self.rect.translate(self.dx, self.dy);
    }

    pub fn is_off_screen(&self, config: &GameConfig) -> bool {
        self.rect.right() < 0.0
            || self.rect.left() > config.screen_width
            || self.rect.bottom() < 0.0
            || self.rect.top() > config.screen_height
    }

    pub fn is_expired(&self) -> bool {
        self.expired
    }
}

/// The player's bow.  Follows the player and aims at the pointer.
#[derive(Clone, Debug, PartialEq)]
pub struct Weapon {
    pub angle: f32,
    pub center: (f32, f32),
    /// Debounce: one arrow per press of the fire button.
    fired: bool,
    last_shot: u64,
}

impl Weapon {
    pub fn new(now: u64) -> Self {
        Weapon {
            angle: 0.0,
            center: (0.0, 0.0),
            fired: false,
            last_shot: now,
        }
    }

    pub fn is_fired(&self) -> bool {
        self.fired
    }

    /// Re-aims and returns a new arrow when the fire button is held, was
    /// released since the last shot, and the shot cooldown has elapsed.
    pub fn update(
        &mut self,
        player: &Character,
        input: &TickInput,
        config: &GameConfig,
        now: u64,
    ) -> Option<Projectile> {
        self.center = player.rect.center();
        self.angle = aim_angle(self.center, input.pointer);

        let mut arrow = None;
        if input.fire && !self.fired && now.saturating_sub(self.last_shot) >= SHOT_COOLDOWN_MS {
            arrow = Some(Projectile::arrow(
                self.center.0,
                self.center.1,
                self.angle,
                config,
            ));
            self.fired = true;
            self.last_shot = now;
        }
        if !input.fire {
            self.fired = false;
        }
        arrow
    }
}

/// Randomized arrow damage: base ± spread.
pub fn roll_arrow_damage(rng: &mut impl Rng) -> i32 {
    ARROW_BASE_DAMAGE + rng.gen_range(-ARROW_DAMAGE_SPREAD..=ARROW_DAMAGE_SPREAD)
}

/// Advances one arrow and resolves walls, screen bounds and at most one
/// living enemy.  A wall spends the arrow but an enemy overlapping it in
/// the same tick is still struck.
fn update_arrow<'a, I>(
    arrow: &mut Projectile,
    obstacles: I,
    enemies: &mut [Character],
    popups: &mut Vec<DamagePopup>,
    config: &GameConfig,
    rng: &mut impl Rng,
    events: &mut Vec<GameEvent>,
) where
    I: IntoIterator<Item = &'a Rect>,
{
    arrow.advance();

    if obstacles
        .into_iter()
        .any(|obstacle| obstacle.intersects(&arrow.rect))
    {
        arrow.expired = true;
    }
    if arrow.is_off_screen(config) {
        arrow.expired = true;
        return;
    }

    let struck = enemies
        .iter_mut()
        .find(|enemy| enemy.alive && enemy.rect.intersects(&arrow.rect));
    if let Some(enemy) = struck {
        let damage = roll_arrow_damage(rng);
        enemy.apply_damage(damage);
        enemy.hit = true;
        arrow.expired = true;

        let x = enemy.rect.centerx() + rng.gen_range(-POPUP_JITTER..=POPUP_JITTER) as f32;
        let y = enemy.rect.top();
        popups.push(DamagePopup {
            x,
            y,
            damage,
            age: 0,
        });
        debug!(damage, health = enemy.health, kind = enemy.kind, "arrow hit");
        events.push(GameEvent::HitLanded { damage, x, y });
    }
}

/// Advances one fireball; it hits the player only outside the player's
/// hit-cooldown window.
fn update_fireball(
    fireball: &mut Projectile,
    player: &mut Character,
    config: &GameConfig,
    now: u64,
    events: &mut Vec<GameEvent>,
) {
    fireball.advance();

    if fireball.is_off_screen(config) {
        fireball.expired = true;
        return;
    }
    if fireball.rect.intersects(&player.rect) && !player.in_hit_cooldown() {
        player.register_hit(now);
        player.apply_damage(FIREBALL_DAMAGE);
        fireball.expired = true;
        events.push(GameEvent::PlayerHurt {
            damage: FIREBALL_DAMAGE,
        });
    }
}

/// Projectile pass over the live set, followed by compaction.
#[allow(clippy::too_many_arguments)]
pub fn update_projectiles<'a, I>(
    projectiles: &mut Vec<Projectile>,
    obstacles: I,
    player: &mut Character,
    enemies: &mut [Character],
    popups: &mut Vec<DamagePopup>,
    config: &GameConfig,
    now: u64,
    rng: &mut impl Rng,
    events: &mut Vec<GameEvent>,
) where
    I: IntoIterator<Item = &'a Rect> + Clone,
{
    for projectile in projectiles.iter_mut() {
        match projectile.kind {
            ProjectileKind::Arrow => update_arrow(
                projectile,
                obstacles.clone(),
                enemies,
                popups,
                config,
                rng,
                events,
            ),
            ProjectileKind::Fireball => update_fireball(projectile, player, config, now, events),
        }
    }
    projectiles.retain(|projectile| !projectile.is_expired());
}
