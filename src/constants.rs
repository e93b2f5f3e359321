/// Fixed tuning values.  The runtime-adjustable subset is mirrored in
/// [`crate::config::GameConfig`], whose defaults come from here.

// ── Screen & map ──────────────────────────────────────────────────────────────

pub const FPS: u32 = 60;
pub const SCREEN_WIDTH: f32 = 800.0;
pub const SCREEN_HEIGHT: f32 = 800.0;
pub const SCALE: f32 = 3.0;
pub const TILE_SIZE: f32 = 16.0 * SCALE;

/// Map bounds a level grid may not exceed.
pub const ROWS: usize = 150;
pub const COLUMNS: usize = 150;

/// Pixel band near each screen edge past which the camera scrolls instead of
/// the player moving.
pub const SCROLL_THRESH: f32 = 200.0;

// ── Tile codes ────────────────────────────────────────────────────────────────

pub const TILE_TYPES: i32 = 18;
pub const TILE_EMPTY: i32 = -1;
pub const TILE_FLOOR: i32 = 0;
pub const TILE_OBSTACLE: i32 = 7;
pub const TILE_EXIT: i32 = 8;
pub const TILE_COIN: i32 = 9;
pub const TILE_POTION: i32 = 10;
pub const TILE_PLAYER: i32 = 11;
pub const TILE_ENEMY_FIRST: i32 = 12;
pub const TILE_ENEMY_LAST: i32 = 16;
pub const TILE_BOSS: i32 = 17;

// ── Characters ────────────────────────────────────────────────────────────────

pub const PLAYER_KIND: u8 = 0;
pub const BOSS_KIND: u8 = 6;
pub const SPECIES_COUNT: usize = 7;

pub const PLAYER_HEALTH: i32 = 100;
pub const ENEMY_HEALTH: i32 = 100;
pub const BOSS_HEALTH: i32 = 400;
pub const BOSS_SIZE: f32 = 2.0;

pub const SPEED: f32 = 5.0;
pub const ENEMY_SPEED: f32 = 4.0;

/// Enemies stop closing in once this near the player.
pub const ENEMY_RANGE_TO_PLAYER: f32 = 50.0;
pub const ATTACK_RANGE: f32 = 60.0;
pub const BOSS_FIREBALL_RANGE: f32 = 500.0;
pub const CONTACT_DAMAGE: i32 = 10;

/// Player counts as standing on the exit within this distance of its center.
pub const EXIT_RADIUS: f32 = 25.0;

// ── Timers (milliseconds) ─────────────────────────────────────────────────────

pub const ANIMATION_COOLDOWN_MS: u64 = 70;
pub const ITEM_ANIMATION_COOLDOWN_MS: u64 = 150;
pub const HIT_COOLDOWN_MS: u64 = 1000;
pub const STUN_COOLDOWN_MS: u64 = 150;
pub const FIREBALL_COOLDOWN_MS: u64 = 700;
pub const SHOT_COOLDOWN_MS: u64 = 100;

// ── Projectiles ───────────────────────────────────────────────────────────────

pub const ARROW_SPEED: f32 = 10.0;
pub const FIREBALL_SPEED: f32 = 3.0;
pub const ARROW_SIZE: f32 = 12.0;
pub const FIREBALL_SIZE: f32 = 16.0;
pub const ARROW_BASE_DAMAGE: i32 = 10;
pub const ARROW_DAMAGE_SPREAD: i32 = 5;
pub const FIREBALL_DAMAGE: i32 = 10;

// ── Items ─────────────────────────────────────────────────────────────────────

pub const ITEM_SIZE: f32 = 8.0 * SCALE;
pub const COIN_FRAMES: usize = 4;
pub const POTION_HEAL: i32 = 10;
pub const SCORE_COIN_X: f32 = SCREEN_WIDTH - 115.0;
pub const SCORE_COIN_Y: f32 = 23.0;

// ── Damage popups ─────────────────────────────────────────────────────────────

pub const POPUP_LIFETIME: u32 = 60;
pub const POPUP_RISE: f32 = 2.0;
pub const POPUP_JITTER: i32 = 10;

// ── Screen fades ──────────────────────────────────────────────────────────────

pub const INTRO_FADE_SPEED: f32 = 4.0;
pub const DEATH_FADE_SPEED: f32 = 4.0;
