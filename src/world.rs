/// The world aggregate: tile map plus every entity collection for one level.
use tracing::{debug, warn};

use crate::config::GameConfig;
use crate::constants::{
    SCORE_COIN_X, SCORE_COIN_Y, SCREEN_WIDTH, TILE_BOSS, TILE_COIN, TILE_EMPTY, TILE_ENEMY_FIRST,
    TILE_ENEMY_LAST, TILE_EXIT, TILE_FLOOR, TILE_OBSTACLE, TILE_PLAYER, TILE_POTION, TILE_SIZE,
};
use crate::entities::{
    Character, DamagePopup, Hud, Item, ItemKind, Projectile, Tile, TileKind,
};
use crate::error::LevelError;
use crate::geometry::Rect;
use crate::level::LevelGrid;

/// Static map tiles, with the obstacle subset and the exit indexed into them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TileMap {
    tiles: Vec<Tile>,
    obstacle_indices: Vec<usize>,
    exit_index: Option<usize>,
}

impl TileMap {
    pub fn push(&mut self, tile: Tile) {
        let index = self.tiles.len();
        match tile.kind {
            TileKind::Obstacle => self.obstacle_indices.push(index),
            // A later exit replaces an earlier one.
            TileKind::Exit => self.exit_index = Some(index),
            TileKind::Floor => {}
        }
        self.tiles.push(tile);
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn obstacles(&self) -> impl Iterator<Item = &Rect> + Clone + '_ {
        self.obstacle_indices
            .iter()
            .map(move |&index| &self.tiles[index].rect)
    }

    pub fn obstacle_count(&self) -> usize {
        self.obstacle_indices.len()
    }

    pub fn exit(&self) -> Option<&Tile> {
        self.exit_index.map(|index| &self.tiles[index])
    }

    pub fn scroll(&mut self, dx: f32, dy: f32) {
        for tile in &mut self.tiles {
            tile.rect.translate(dx, dy);
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct World {
    pub level: u32,
    pub map: TileMap,
    pub player: Character,
    pub enemies: Vec<Character>,
    pub items: Vec<Item>,
    pub projectiles: Vec<Projectile>,
    pub popups: Vec<DamagePopup>,
}

impl World {
    /// Builds a fresh world from a level grid.  Spawn markers become plain
    /// floor tiles with an entity placed on top.  Fails if the grid has no
    /// player spawn.
    pub fn from_grid(
        level: u32,
        grid: &LevelGrid,
        config: &GameConfig,
        now: u64,
    ) -> Result<Self, LevelError> {
        let mut map = TileMap::default();
        let mut player = None;
        let mut enemies = Vec::new();
        let mut items = vec![Item::score_coin(
            SCORE_COIN_X + (config.screen_width - SCREEN_WIDTH),
            SCORE_COIN_Y,
            now,
        )];

        for (row, column, code) in grid.cells() {
            if code == TILE_EMPTY {
                continue;
            }
            let x = column as f32 * TILE_SIZE;
            let y = row as f32 * TILE_SIZE;

            let mut kind = TileKind::Floor;
            let mut visual = code;
            match code {
                TILE_OBSTACLE => kind = TileKind::Obstacle,
                TILE_EXIT => kind = TileKind::Exit,
                TILE_COIN => {
                    items.push(Item::new(ItemKind::Coin, x, y, now));
                    visual = TILE_FLOOR;
                }
                TILE_POTION => {
                    items.push(Item::new(ItemKind::Potion, x, y, now));
                    visual = TILE_FLOOR;
                }
                TILE_PLAYER => {
                    if player.is_some() {
                        warn!(level, row, column, "duplicate player spawn, keeping the last one");
                    }
                    player = Some(Character::player(x, y, now));
                    visual = TILE_FLOOR;
                }
                TILE_ENEMY_FIRST..=TILE_ENEMY_LAST => {
                    let species = (code - TILE_PLAYER) as u8;
                    enemies.push(Character::enemy(species, x, y, now));
                    visual = TILE_FLOOR;
                }
                TILE_BOSS => {
                    enemies.push(Character::boss(x, y, now));
                    visual = TILE_FLOOR;
                }
                _ => {}
            }

            map.push(Tile {
                code: visual,
                kind,
                rect: Rect::from_center(x, y, TILE_SIZE, TILE_SIZE),
                column,
                row,
            });
        }

        let player = player.ok_or(LevelError::MissingPlayer)?;
        debug!(
            level,
            tiles = map.tiles().len(),
            obstacles = map.obstacle_count(),
            enemies = enemies.len(),
            items = items.len() - 1,
            has_exit = map.exit().is_some(),
            "world built"
        );

        Ok(World {
            level,
            map,
            player,
            enemies,
            items,
            projectiles: Vec::new(),
            popups: Vec::new(),
        })
    }

    pub fn hud(&self) -> Hud {
        Hud {
            health: self.player.health,
            max_health: self.player.max_health,
            score: self.player.score,
            level: self.level,
        }
    }

    pub fn living_enemies(&self) -> impl Iterator<Item = &Character> {
        self.enemies.iter().filter(|enemy| enemy.alive)
    }
}
