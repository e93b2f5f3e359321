/// World entity types, kept as plain data.
///
/// Behaviour lives in the subsystem modules (`character`, `ai`,
/// `projectile`, `items`, `world`), which add `impl` blocks to these types.
use crate::geometry::Rect;

// ── Tiles ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TileKind {
    /// Decorative, never collides.
    Floor,
    /// Blocks characters and arrows.
    Obstacle,
    /// Level-completion trigger.
    Exit,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Tile {
    /// Visual code handed to the renderer.  Spawn markers are rewritten to
    /// the plain floor code at load time.
    pub code: i32,
    pub kind: TileKind,
    pub rect: Rect,
    pub column: usize,
    pub row: usize,
}

// ── Characters ────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Idle,
    Running,
}

impl Action {
    pub fn index(self) -> usize {
        match self {
            Action::Idle => 0,
            Action::Running => 1,
        }
    }
}

/// Player or enemy.  Dead characters stay in their list, inert.
#[derive(Clone, Debug, PartialEq)]
pub struct Character {
    /// Species index 0–6; 0 is the player.
    pub kind: u8,
    pub boss: bool,
    pub rect: Rect,
    /// Facing left.
    pub flip: bool,
    pub health: i32,
    pub max_health: i32,
    pub alive: bool,
    pub action: Action,
    /// Moved during the current tick.
    pub running: bool,
    pub frame_index: usize,
    pub update_time: u64,
    /// Player: inside the invulnerability window.  Enemy: unprocessed hit
    /// pulse, turned into a stun on the next AI pass.
    pub hit: bool,
    pub last_hit: u64,
    pub last_attack: u64,
    pub stunned: bool,
    pub score: u32,
}

/// How the renderer should orient a character's current frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawPose {
    pub flip_horizontal: bool,
    pub flip_vertical: bool,
    pub rotation_degrees: f32,
}

// ── Items ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ItemKind {
    Coin,
    Potion,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Item {
    pub kind: ItemKind,
    pub rect: Rect,
    pub frame_index: usize,
    pub update_time: u64,
    /// HUD decoration: ignores scroll and can never be collected.
    pub pinned: bool,
    pub collected: bool,
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProjectileKind {
    /// Player's shot.  Stopped by walls, hits the first living enemy.
    Arrow,
    /// Boss shot.  Passes over walls, hits the player.
    Fireball,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Projectile {
    pub kind: ProjectileKind,
    pub rect: Rect,
    pub dx: f32,
    pub dy: f32,
    /// Launch angle in degrees, counter-clockwise from +x.  Rotation hint
    /// for the renderer.
    pub angle: f32,
    pub expired: bool,
}

/// Floating damage number shown above a struck enemy.
#[derive(Clone, Debug, PartialEq)]
pub struct DamagePopup {
    pub x: f32,
    pub y: f32,
    pub damage: i32,
    /// Ticks since spawn.
    pub age: u32,
}

// ── Tick I/O ──────────────────────────────────────────────────────────────────

/// Per-tick input from the input collaborator.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TickInput {
    /// Movement intent per axis, each in −1..=1 (screen axes, +y is down).
    pub move_x: i8,
    pub move_y: i8,
    /// Fire button held.
    pub fire: bool,
    /// Pointer position in screen pixels.
    pub pointer: (f32, f32),
}

/// Discrete notifications for the audio layer and anyone else listening.
#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    ShotFired,
    HitLanded { damage: i32, x: f32, y: f32 },
    FireballCast,
    PlayerHurt { damage: i32 },
    CoinCollected,
    PotionUsed,
    LevelCompleted { next_level: u32 },
    PlayerDied,
}

/// Values the HUD collaborator displays.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hud {
    pub health: i32,
    pub max_health: i32,
    pub score: u32,
    pub level: u32,
}
