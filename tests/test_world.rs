use std::fs;
use std::path::Path;

use dungeon_archer::camera::apply_scroll;
use dungeon_archer::config::GameConfig;
use dungeon_archer::entities::*;
use dungeon_archer::error::LevelError;
use dungeon_archer::level::*;
use dungeon_archer::world::World;

const SMALL_ROOM: &str = "\
7,7,7,7
7,11,9,7
7,10,12,7
7,17,8,-1
";

fn build(text: &str) -> Result<World, LevelError> {
    let grid = LevelGrid::parse(text)?;
    World::from_grid(1, &grid, &GameConfig::default(), 0)
}

// ── Grid parsing ──────────────────────────────────────────────────────────────

#[test]
fn parse_reads_rows_and_ignores_blank_lines() {
    let grid = LevelGrid::parse("7, 7 ,7\n\n0,11,-1\n").unwrap();
    assert_eq!(grid.rows(), 2);
    assert_eq!(grid.columns(), 3);
    assert_eq!(grid.get(1, 1), 11);
    assert_eq!(grid.get(1, 2), -1);
    assert_eq!(grid.get(9, 9), -1);
}

#[test]
fn parse_rejects_garbage_and_unknown_codes() {
    assert!(matches!(
        LevelGrid::parse("7,x,7"),
        Err(LevelError::Parse { row: 0, column: 1, .. })
    ));
    assert!(matches!(
        LevelGrid::parse("7,7\n7,18"),
        Err(LevelError::UnknownTileCode { row: 1, column: 1, code: 18 })
    ));
    assert!(matches!(
        LevelGrid::parse("-2"),
        Err(LevelError::UnknownTileCode { code: -2, .. })
    ));
}

#[test]
fn oversized_grid_is_rejected() {
    let wide = vec![vec![0; 151]];
    assert!(matches!(
        LevelGrid::new(wide),
        Err(LevelError::TooLarge { columns: 151, .. })
    ));
}

// ── World construction ────────────────────────────────────────────────────────

#[test]
fn spawn_markers_become_entities_on_floor() {
    let world = build(SMALL_ROOM).unwrap();

    assert_eq!(world.player.rect.center(), (48.0, 48.0));
    assert_eq!(world.player.health, 100);

    assert_eq!(world.enemies.len(), 2);
    let grunt = &world.enemies[0];
    assert_eq!(grunt.kind, 1);
    assert!(!grunt.boss);
    assert_eq!(grunt.rect.center(), (96.0, 96.0));
    let boss = &world.enemies[1];
    assert!(boss.boss);
    assert_eq!(boss.kind, 6);
    assert_eq!(boss.health, 400);

    // Score coin first, then the placed coin and potion.
    assert_eq!(world.items.len(), 3);
    assert!(world.items[0].pinned);
    assert_eq!(world.items[1].kind, ItemKind::Coin);
    assert_eq!(world.items[1].rect.center(), (96.0, 48.0));
    assert_eq!(world.items[2].kind, ItemKind::Potion);

    for tile in world.map.tiles() {
        if (tile.row, tile.column) == (1, 1) || (tile.row, tile.column) == (2, 2) {
            assert_eq!(tile.code, 0);
            assert_eq!(tile.kind, TileKind::Floor);
        }
    }
}

#[test]
fn obstacles_exit_and_empty_cells() {
    let world = build(SMALL_ROOM).unwrap();

    // 16 cells, one empty.
    assert_eq!(world.map.tiles().len(), 15);
    assert_eq!(world.map.obstacle_count(), 9);
    assert!(world.map.obstacles().all(|rect| rect.w == 48.0));

    let exit = world.map.exit().expect("exit");
    assert_eq!((exit.row, exit.column), (3, 2));
    assert_eq!(exit.rect.center(), (96.0, 144.0));
}

#[test]
fn level_without_player_fails() {
    assert!(matches!(build("7,7\n7,8"), Err(LevelError::MissingPlayer)));
}

#[test]
fn last_player_spawn_wins() {
    let world = build("11,0,11").unwrap();
    assert_eq!(world.player.rect.center(), (96.0, 0.0));
}

#[test]
fn hud_reflects_player() {
    let mut world = build(SMALL_ROOM).unwrap();
    world.player.score = 7;
    world.player.health = 40;
    assert_eq!(
        world.hud(),
        Hud {
            health: 40,
            max_health: 100,
            score: 7,
            level: 1
        }
    );
}

// ── Scroll propagation ────────────────────────────────────────────────────────

#[test]
fn scroll_moves_world_but_not_player_or_score_coin() {
    let mut world = build(SMALL_ROOM).unwrap();
    world.projectiles.push(Projectile::arrow(10.0, 10.0, 0.0, &GameConfig::default()));
    world.popups.push(DamagePopup {
        x: 5.0,
        y: 5.0,
        damage: 7,
        age: 0,
    });
    world.enemies[0].apply_damage(100);
    let before = world.clone();

    apply_scroll(&mut world, (3.0, -2.0));

    assert_eq!(world.player, before.player);
    assert_eq!(world.items[0], before.items[0]);
    assert_eq!(world.items[1].rect.x, before.items[1].rect.x + 3.0);
    assert_eq!(world.enemies[0].rect.y, before.enemies[0].rect.y - 2.0);
    assert_eq!(world.enemies[1].rect.x, before.enemies[1].rect.x + 3.0);
    assert_eq!(world.projectiles[0].rect.x, before.projectiles[0].rect.x + 3.0);
    assert_eq!((world.popups[0].x, world.popups[0].y), (8.0, 3.0));
    for (now, then) in world.map.tiles().iter().zip(before.map.tiles()) {
        assert_eq!(now.rect.x, then.rect.x + 3.0);
        assert_eq!(now.rect.y, then.rect.y - 2.0);
    }
}

// ── Level sources ─────────────────────────────────────────────────────────────

#[test]
fn dir_source_reads_numbered_csv_files() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("level1_data.csv"), SMALL_ROOM).unwrap();
    let source = DirLevelSource::new(dir.path());

    assert_eq!(source.path_for(4), dir.path().join("level4_data.csv"));
    let grid = source.load(1).unwrap();
    assert_eq!(grid.rows(), 4);
    assert!(matches!(source.load(2), Err(LevelError::NotFound { level: 2 })));
}

#[test]
fn dir_source_surfaces_bad_data() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("level1_data.csv"), "7,99").unwrap();
    let source = DirLevelSource::new(dir.path());
    assert!(matches!(
        source.load(1),
        Err(LevelError::UnknownTileCode { code: 99, .. })
    ));
}

#[test]
fn in_memory_source_serves_inserted_levels() {
    let grid = LevelGrid::parse(SMALL_ROOM).unwrap();
    let mut source = InMemoryLevels::new().with_level(1, grid.clone());
    source.insert(3, grid.clone());
    assert_eq!(source.load(1).unwrap(), grid);
    assert_eq!(source.load(3).unwrap(), grid);
    assert!(matches!(source.load(2), Err(LevelError::NotFound { level: 2 })));
}

#[test]
fn shipped_levels_are_playable() {
    let source = DirLevelSource::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("levels"));
    let cfg = GameConfig::default();
    for level in 1..=3 {
        let grid = source.load(level).unwrap();
        let world = World::from_grid(level, &grid, &cfg, 0).unwrap();
        assert!(world.map.exit().is_some(), "level {level} has no exit");
        assert!(!world.enemies.is_empty(), "level {level} has no enemies");
    }
    let last = World::from_grid(3, &source.load(3).unwrap(), &cfg, 0).unwrap();
    assert!(last.enemies.iter().any(|enemy| enemy.boss));
}
