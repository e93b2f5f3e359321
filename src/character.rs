/// Character simulation: construction, health, hit pulses and the
/// Idle/Running animation state machine.
use crate::constants::{
    ANIMATION_COOLDOWN_MS, BOSS_HEALTH, BOSS_KIND, BOSS_SIZE, ENEMY_HEALTH, HIT_COOLDOWN_MS,
    PLAYER_HEALTH, PLAYER_KIND, SPECIES_COUNT, STUN_COOLDOWN_MS, TILE_SIZE,
};
use crate::entities::{Action, Character, DrawPose};
use crate::geometry::Rect;

/// Tilt applied to a dead enemy's sprite.
const DEATH_POSE_ROTATION: f32 = 30.0;

/// Frame counts per species and action, so the core can wrap animation
/// indices without knowing anything about images.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnimationTable {
    frames: [[usize; 2]; SPECIES_COUNT],
}

impl AnimationTable {
    pub fn uniform(frames: usize) -> Self {
        AnimationTable {
            frames: [[frames.max(1); 2]; SPECIES_COUNT],
        }
    }

    pub fn with_frames(mut self, kind: u8, action: Action, frames: usize) -> Self {
        if let Some(row) = self.frames.get_mut(kind as usize) {
            row[action.index()] = frames.max(1);
        }
        self
    }

    /// Unknown species fall back to a single frame.
    pub fn frames(&self, kind: u8, action: Action) -> usize {
        self.frames
            .get(kind as usize)
            .map(|row| row[action.index()])
            .unwrap_or(1)
    }
}

impl Default for AnimationTable {
    fn default() -> Self {
        Self::uniform(4)
    }
}

impl Character {
    /// `size` scales the tile-sized hitbox (2 for bosses).  One pixel is
    /// shaved off so a character fits through a one-tile corridor.
    pub fn new(kind: u8, cx: f32, cy: f32, health: i32, boss: bool, size: f32, now: u64) -> Self {
        let side = TILE_SIZE * size - 1.0;
        Character {
            kind,
            boss,
            rect: Rect::from_center(cx, cy, side, side),
            flip: false,
            health,
            max_health: health,
            alive: true,
            action: Action::Idle,
            running: false,
            frame_index: 0,
            update_time: now,
            hit: false,
            last_hit: now,
            last_attack: now,
            stunned: false,
            score: 0,
        }
    }

    pub fn player(cx: f32, cy: f32, now: u64) -> Self {
        Self::new(PLAYER_KIND, cx, cy, PLAYER_HEALTH, false, 1.0, now)
    }

    pub fn enemy(kind: u8, cx: f32, cy: f32, now: u64) -> Self {
        Self::new(kind, cx, cy, ENEMY_HEALTH, false, 1.0, now)
    }

    pub fn boss(cx: f32, cy: f32, now: u64) -> Self {
        Self::new(BOSS_KIND, cx, cy, BOSS_HEALTH, true, BOSS_SIZE, now)
    }

    pub fn is_player(&self) -> bool {
        self.kind == PLAYER_KIND
    }

    /// Player only: damage of the hit kind is ignored while this is set.
    pub fn in_hit_cooldown(&self) -> bool {
        self.hit
    }

    /// Floors health at zero; zero health kills for good.
    pub fn clamp_health(&mut self) {
        if self.health <= 0 {
            self.health = 0;
            self.alive = false;
        }
    }

    pub fn apply_damage(&mut self, amount: i32) {
        self.health -= amount;
        self.clamp_health();
    }

    /// Heals up to `max_health`.  Returns false when already at full health
    /// or dead.
    pub fn heal(&mut self, amount: i32) -> bool {
        if !self.alive || self.health >= self.max_health {
            return false;
        }
        self.health = (self.health + amount).min(self.max_health);
        true
    }

    /// Starts the player's invulnerability window.
    pub fn register_hit(&mut self, now: u64) {
        self.hit = true;
        self.last_hit = now;
    }

    /// Enemy side of a hit pulse: any pending hit stuns and re-idles the
    /// enemy, whether or not it was already stunned.  The stun lifts once
    /// the window since the last hit has passed.
    pub fn process_stun(&mut self, now: u64) {
        if self.hit {
            self.hit = false;
            self.last_hit = now;
            self.stunned = true;
            self.running = false;
            self.update_action(Action::Idle, now);
        }
        if now.saturating_sub(self.last_hit) > STUN_COOLDOWN_MS {
            self.stunned = false;
        }
    }

    /// Switching action restarts the animation from its first frame.
    pub fn update_action(&mut self, action: Action, now: u64) {
        if action != self.action {
            self.action = action;
            self.frame_index = 0;
            self.update_time = now;
        }
    }

    /// Per-tick bookkeeping: health clamp, player hit-window expiry, action
    /// selection and time-based frame advance.
    pub fn update(&mut self, now: u64, animations: &AnimationTable) {
        self.clamp_health();

        if self.is_player() && self.hit && now.saturating_sub(self.last_hit) > HIT_COOLDOWN_MS {
            self.hit = false;
        }

        let action = if self.running {
            Action::Running
        } else {
            Action::Idle
        };
        self.update_action(action, now);

        let frames = animations.frames(self.kind, self.action);
        if now.saturating_sub(self.update_time) > ANIMATION_COOLDOWN_MS {
            self.frame_index += 1;
            self.update_time = now;
        }
        self.frame_index %= frames;
    }

    pub fn draw_pose(&self) -> DrawPose {
        if !self.alive && !self.is_player() {
            DrawPose {
                flip_horizontal: false,
                flip_vertical: true,
                rotation_degrees: DEATH_POSE_ROTATION,
            }
        } else {
            DrawPose {
                flip_horizontal: self.flip,
                flip_vertical: false,
                rotation_degrees: 0.0,
            }
        }
    }
}
