/// Tick orchestration and the level lifecycle.
///
/// `step_world` runs one simulation tick over a `World` in a fixed order:
/// player move → scroll propagation → enemy AI → character update → bow →
/// projectiles → damage popups → items.  `GameSession` wraps it with the
/// menu/fade/death/restart state machine and owns the injected clock and
/// level source.
use rand::Rng;
use tracing::{info, warn};

use crate::ai;
use crate::camera;
use crate::character::AnimationTable;
use crate::clock::Clock;
use crate::config::GameConfig;
use crate::constants::{DEATH_FADE_SPEED, INTRO_FADE_SPEED, POPUP_LIFETIME, POPUP_RISE};
use crate::entities::{DamagePopup, GameEvent, Hud, TickInput};
use crate::error::LevelError;
use crate::items::update_items;
use crate::level::LevelSource;
use crate::movement::{move_player, MoveOutcome};
use crate::projectile::{update_projectiles, Weapon};
use crate::world::World;

// ── Single tick ───────────────────────────────────────────────────────────────

/// Drifts popups upward and drops the ones past their lifetime.
pub fn update_popups(popups: &mut Vec<DamagePopup>) {
    for popup in popups.iter_mut() {
        popup.y -= POPUP_RISE;
        popup.age += 1;
    }
    popups.retain(|popup| popup.age <= POPUP_LIFETIME);
}

/// Advances the world by one tick.  Events are appended to `events`.
#[allow(clippy::too_many_arguments)]
pub fn step_world(
    world: &mut World,
    weapon: &mut Weapon,
    input: &TickInput,
    config: &GameConfig,
    animations: &AnimationTable,
    now: u64,
    rng: &mut impl Rng,
    events: &mut Vec<GameEvent>,
) -> MoveOutcome {
    // ── 1. Player movement & collision ───────────────────────────────────────
    let dx = f32::from(input.move_x.signum()) * config.player_speed;
    let dy = f32::from(input.move_y.signum()) * config.player_speed;
    let outcome = move_player(
        &mut world.player,
        dx,
        dy,
        world.map.obstacles(),
        world.map.exit(),
        config,
    );

    // ── 2. Scroll propagation ────────────────────────────────────────────────
    camera::apply_scroll(world, outcome.scroll);

    // ── 3. Enemy AI ──────────────────────────────────────────────────────────
    for enemy in &mut world.enemies {
        if let Some(fireball) = ai::think(
            enemy,
            &mut world.player,
            world.map.obstacles(),
            config,
            now,
            events,
        ) {
            world.projectiles.push(fireball);
        }
    }

    // ── 4. Character animation / health ──────────────────────────────────────
    for enemy in world.enemies.iter_mut().filter(|enemy| enemy.alive) {
        enemy.update(now, animations);
    }
    world.player.update(now, animations);

    // ── 5. Bow ───────────────────────────────────────────────────────────────
    if let Some(arrow) = weapon.update(&world.player, input, config, now) {
        world.projectiles.push(arrow);
        events.push(GameEvent::ShotFired);
    }

    // ── 6. Projectiles ───────────────────────────────────────────────────────
    update_projectiles(
        &mut world.projectiles,
        world.map.obstacles(),
        &mut world.player,
        &mut world.enemies,
        &mut world.popups,
        config,
        now,
        rng,
        events,
    );

    // ── 7. Damage popups ─────────────────────────────────────────────────────
    update_popups(&mut world.popups);

    // ── 8. Items ─────────────────────────────────────────────────────────────
    update_items(&mut world.items, &mut world.player, now, events);

    outcome
}

// ── Lifecycle ─────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Phase {
    /// Waiting for the start action.
    Menu,
    /// Level just loaded.  The simulation runs under the fade.
    IntroFade { progress: f32 },
    Playing,
    /// Player died; the world is frozen while the fade plays.
    DeathFade { progress: f32 },
    /// Death fade finished, waiting for the restart action.
    AwaitingRestart,
    /// No further level could be loaded.
    Finished,
}

impl Phase {
    /// Phases in which the world is simulated.
    pub fn is_simulating(self) -> bool {
        matches!(self, Phase::IntroFade { .. } | Phase::Playing)
    }
}

/// One run of the game: the active world, the bow (kept across levels),
/// the lifecycle phase and the collaborators injected at construction.
pub struct GameSession<C: Clock, L: LevelSource> {
    config: GameConfig,
    clock: C,
    levels: L,
    animations: AnimationTable,
    world: World,
    weapon: Weapon,
    phase: Phase,
    paused: bool,
    events: Vec<GameEvent>,
}

impl<C: Clock, L: LevelSource> GameSession<C, L> {
    /// Loads `config.start_level` and parks the session in the menu.
    pub fn new(config: GameConfig, clock: C, levels: L) -> Result<Self, LevelError> {
        let now = clock.now_ms();
        let level = config.start_level;
        let world = Self::build_world(&levels, level, &config, now)?;
        Ok(GameSession {
            config,
            clock,
            levels,
            animations: AnimationTable::default(),
            world,
            weapon: Weapon::new(now),
            phase: Phase::Menu,
            paused: false,
            events: Vec::new(),
        })
    }

    pub fn with_animations(mut self, animations: AnimationTable) -> Self {
        self.animations = animations;
        self
    }

    fn build_world(
        levels: &L,
        level: u32,
        config: &GameConfig,
        now: u64,
    ) -> Result<World, LevelError> {
        let grid = levels.load(level)?;
        let world = World::from_grid(level, &grid, config, now)?;
        info!(level, enemies = world.enemies.len(), "level loaded");
        Ok(world)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn weapon(&self) -> &Weapon {
        &self.weapon
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn hud(&self) -> Hud {
        self.world.hud()
    }

    /// Menu → intro fade.
    pub fn start(&mut self) {
        if self.phase == Phase::Menu {
            self.phase = Phase::IntroFade { progress: 0.0 };
        }
    }

    /// Pausing is only possible while the world is being simulated, which
    /// includes the intro fade as well as normal play.
    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused && self.phase.is_simulating();
    }

    pub fn toggle_pause(&mut self) {
        self.set_paused(!self.paused);
    }

    /// Runs one tick of whatever the current phase does and returns the
    /// events it produced.  A level-load failure on level completion moves
    /// the session to `Finished` and is returned to the caller.
    pub fn tick(
        &mut self,
        input: &TickInput,
        rng: &mut impl Rng,
    ) -> Result<&[GameEvent], LevelError> {
        self.events.clear();
        if self.paused {
            return Ok(&self.events);
        }

        match self.phase {
            Phase::Menu | Phase::AwaitingRestart | Phase::Finished => {}
            Phase::DeathFade { progress } => {
                let progress = progress + DEATH_FADE_SPEED;
                self.phase = if progress >= self.config.screen_width {
                    Phase::AwaitingRestart
                } else {
                    Phase::DeathFade { progress }
                };
            }
            Phase::IntroFade { .. } | Phase::Playing => self.simulate(input, rng)?,
        }
        Ok(&self.events)
    }

    fn simulate(&mut self, input: &TickInput, rng: &mut impl Rng) -> Result<(), LevelError> {
        let now = self.clock.now_ms();
        let outcome = step_world(
            &mut self.world,
            &mut self.weapon,
            input,
            &self.config,
            &self.animations,
            now,
            rng,
            &mut self.events,
        );

        if let Phase::IntroFade { progress } = self.phase {
            let progress = progress + INTRO_FADE_SPEED;
            self.phase = if progress >= self.config.screen_width {
                Phase::Playing
            } else {
                Phase::IntroFade { progress }
            };
        }

        // Dying on the exit tile still counts as a death.
        if !self.world.player.alive {
            info!(level = self.world.level, score = self.world.player.score, "player died");
            self.events.push(GameEvent::PlayerDied);
            self.phase = Phase::DeathFade { progress: 0.0 };
            self.paused = false;
        } else if outcome.level_complete {
            self.complete_level(now)?;
        }
        Ok(())
    }

    /// Moves to the next level, carrying health and score forward and
    /// keeping the bow.
    fn complete_level(&mut self, now: u64) -> Result<(), LevelError> {
        let next_level = self.world.level + 1;
        let mut world = match Self::build_world(&self.levels, next_level, &self.config, now) {
            Ok(world) => world,
            Err(err) => {
                warn!(next_level, error = %err, "cannot load next level, ending run");
                self.phase = Phase::Finished;
                return Err(err);
            }
        };
        world.player.health = self.world.player.health;
        world.player.score = self.world.player.score;
        info!(
            next_level,
            health = world.player.health,
            score = world.player.score,
            "level complete"
        );

        self.world = world;
        self.phase = Phase::IntroFade { progress: 0.0 };
        self.events.push(GameEvent::LevelCompleted { next_level });
        Ok(())
    }

    /// Reloads the current level with the spawn defaults for health and
    /// score.  Only acts once the death fade has finished; returns whether a
    /// restart happened.
    pub fn restart(&mut self) -> Result<bool, LevelError> {
        if self.phase != Phase::AwaitingRestart {
            return Ok(false);
        }
        let now = self.clock.now_ms();
        let level = self.world.level;
        self.world = Self::build_world(&self.levels, level, &self.config, now)?;
        self.phase = Phase::IntroFade { progress: 0.0 };
        info!(level, "level restarted");
        Ok(true)
    }
}
