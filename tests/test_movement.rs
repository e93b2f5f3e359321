use dungeon_archer::config::GameConfig;
use dungeon_archer::entities::*;
use dungeon_archer::geometry::Rect;
use dungeon_archer::movement::*;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn no_obstacles() -> Vec<Rect> {
    Vec::new()
}

fn exit_tile_at(cx: f32, cy: f32) -> Tile {
    Tile {
        code: 8,
        kind: TileKind::Exit,
        rect: Rect::from_center(cx, cy, 48.0, 48.0),
        column: 0,
        row: 0,
    }
}

// ── Diagonal normalization ───────────────────────────────────────────────────

#[test]
fn diagonal_step_matches_axis_step() {
    let cfg = GameConfig::default();
    let speed = cfg.player_speed;
    let obstacles = no_obstacles();

    for (sx, sy) in [(1.0, 1.0), (1.0, -1.0), (-1.0, 1.0), (-1.0, -1.0)] {
        let mut player = Character::player(400.0, 400.0, 0);
        let before = player.rect.center();
        move_character(&mut player, sx * speed, sy * speed, &obstacles, true);
        let after = player.rect.center();
        let step = (after.0 - before.0).hypot(after.1 - before.1);
        assert!((step - speed).abs() < 1e-4, "diagonal step {step} != {speed}");
    }

    let mut player = Character::player(400.0, 400.0, 0);
    move_character(&mut player, speed, 0.0, &obstacles, true);
    assert_eq!(player.rect.centerx() - 400.0, speed);
}

#[test]
fn normalize_leaves_single_axis_alone() {
    assert_eq!(normalize_diagonal(5.0, 0.0), (5.0, 0.0));
    assert_eq!(normalize_diagonal(0.0, -4.0), (0.0, -4.0));
    let (dx, dy) = normalize_diagonal(4.0, 4.0);
    assert!((dx - 4.0 * std::f32::consts::FRAC_1_SQRT_2).abs() < 1e-6);
    assert_eq!(dx, dy);
}

#[test]
fn unnormalized_move_keeps_full_components() {
    let mut enemy = Character::enemy(1, 400.0, 400.0, 0);
    move_character(&mut enemy, 4.0, 4.0, &no_obstacles(), false);
    assert_eq!(enemy.rect.center(), (404.0, 404.0));
}

// ── Axis-separated resolution ────────────────────────────────────────────────

#[test]
fn moving_right_clamps_to_obstacle_left_edge() {
    let wall = vec![Rect::new(50.0, 0.0, 48.0, 48.0)];
    let mut rect = Rect::new(0.0, 0.0, 47.0, 47.0);
    resolve_move(&mut rect, 5.0, 0.0, &wall);
    assert_eq!(rect.right(), 50.0);
    assert!(!rect.intersects(&wall[0]));
}

#[test]
fn moving_left_clamps_to_obstacle_right_edge() {
    let wall = vec![Rect::new(0.0, 0.0, 48.0, 48.0)];
    let mut rect = Rect::new(50.0, 0.0, 47.0, 47.0);
    resolve_move(&mut rect, -5.0, 0.0, &wall);
    assert_eq!(rect.left(), 48.0);
    assert!(!rect.intersects(&wall[0]));
}

#[test]
fn moving_down_and_up_clamp_on_y() {
    let floor = vec![Rect::new(0.0, 50.0, 48.0, 48.0)];
    let mut rect = Rect::new(0.0, 0.0, 47.0, 47.0);
    resolve_move(&mut rect, 0.0, 5.0, &floor);
    assert_eq!(rect.bottom(), 50.0);

    let ceiling = vec![Rect::new(0.0, 0.0, 48.0, 48.0)];
    let mut rect = Rect::new(0.0, 50.0, 47.0, 47.0);
    resolve_move(&mut rect, 0.0, -5.0, &ceiling);
    assert_eq!(rect.top(), 48.0);
}

#[test]
fn diagonal_into_wall_slides_along_it() {
    // Wall directly to the right; X is blocked, Y still moves.
    let wall = vec![Rect::new(48.0, -100.0, 48.0, 300.0)];
    let mut rect = Rect::new(0.0, 0.0, 47.0, 47.0);
    resolve_move(&mut rect, 5.0, 5.0, &wall);
    assert_eq!(rect.right(), 48.0);
    assert_eq!(rect.top(), 5.0);
}

#[test]
fn x_is_resolved_before_y() {
    // Obstacle sits diagonally below-right.  Moving X first puts the rect
    // beside it without overlap; then the Y move overlaps and clamps on Y.
    let block = vec![Rect::new(50.0, 50.0, 48.0, 48.0)];
    let mut rect = Rect::new(0.0, 0.0, 47.0, 47.0);
    resolve_move(&mut rect, 5.0, 5.0, &block);
    assert_eq!(rect.left(), 5.0);
    assert_eq!(rect.bottom(), 50.0);
}

#[test]
fn resolved_rect_never_overlaps_single_obstacle() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..500 {
        let obstacle = Rect::new(
            rng.gen_range(-60..=60) as f32,
            rng.gen_range(-60..=60) as f32,
            48.0,
            48.0,
        );
        let mut rect = Rect::new(0.0, 0.0, 47.0, 47.0);
        if rect.intersects(&obstacle) {
            continue;
        }
        let dx = rng.gen_range(-5..=5) as f32;
        let dy = rng.gen_range(-5..=5) as f32;
        resolve_move(&mut rect, dx, dy, std::slice::from_ref(&obstacle));
        assert!(
            !rect.intersects(&obstacle),
            "overlap after ({dx}, {dy}) against {obstacle:?}: {rect:?}"
        );
    }
}

#[test]
fn wall_row_blocks_without_overlap() {
    let walls: Vec<Rect> = (0..5)
        .map(|i| Rect::new(i as f32 * 48.0, 100.0, 48.0, 48.0))
        .collect();
    let mut rect = Rect::new(60.0, 50.0, 47.0, 47.0);
    for _ in 0..10 {
        resolve_move(&mut rect, 0.0, 5.0, &walls);
    }
    assert_eq!(rect.bottom(), 100.0);
    assert!(walls.iter().all(|wall| !rect.intersects(wall)));
}

// ── Character flags ──────────────────────────────────────────────────────────

#[test]
fn moving_sets_running_and_facing() {
    let obstacles = no_obstacles();
    let mut player = Character::player(400.0, 400.0, 0);
    move_character(&mut player, -5.0, 0.0, &obstacles, true);
    assert!(player.running);
    assert!(player.flip);

    move_character(&mut player, 0.0, 5.0, &obstacles, true);
    assert!(player.running);
    assert!(player.flip); // vertical movement keeps facing

    move_character(&mut player, 5.0, 0.0, &obstacles, true);
    assert!(!player.flip);

    move_character(&mut player, 0.0, 0.0, &obstacles, true);
    assert!(!player.running);
}

// ── Scroll band ──────────────────────────────────────────────────────────────

#[test]
fn crossing_right_band_scrolls_world_left() {
    let cfg = GameConfig::default();
    let mut player = Character::player(574.5, 400.0, 0); // right edge at 598
    let outcome = move_player(&mut player, 5.0, 0.0, &no_obstacles(), None, &cfg);
    assert_eq!(outcome.scroll, (-3.0, 0.0));
    assert_eq!(player.rect.right(), 600.0);
    assert!(!outcome.level_complete);
}

#[test]
fn crossing_left_and_top_bands_scroll_world_right_and_down() {
    let cfg = GameConfig::default();
    let mut player = Character::player(225.5, 225.5, 0); // left/top edge at 202
    let outcome = move_player(&mut player, -5.0, -5.0, &no_obstacles(), None, &cfg);
    let shift = 200.0 - (202.0 - 5.0 * std::f32::consts::FRAC_1_SQRT_2);
    assert!((outcome.scroll.0 - shift).abs() < 1e-3);
    assert!((outcome.scroll.1 - shift).abs() < 1e-3);
    assert_eq!(player.rect.left(), 200.0);
    assert_eq!(player.rect.top(), 200.0);
}

#[test]
fn inside_band_no_scroll() {
    let cfg = GameConfig::default();
    let mut player = Character::player(400.0, 400.0, 0);
    let outcome = move_player(&mut player, 5.0, 0.0, &no_obstacles(), None, &cfg);
    assert_eq!(outcome.scroll, (0.0, 0.0));
    assert_eq!(player.rect.centerx(), 405.0);
}

// ── Exit detection ───────────────────────────────────────────────────────────

#[test]
fn standing_near_exit_center_completes_level() {
    let cfg = GameConfig::default();
    let exit = exit_tile_at(415.0, 400.0);
    let mut player = Character::player(400.0, 400.0, 0);
    let outcome = move_player(&mut player, 0.0, 0.0, &no_obstacles(), Some(&exit), &cfg);
    assert!(outcome.level_complete);
}

#[test]
fn overlapping_exit_edge_is_not_enough() {
    let cfg = GameConfig::default();
    let exit = exit_tile_at(440.0, 400.0); // overlaps, but 40 px away
    let mut player = Character::player(400.0, 400.0, 0);
    let outcome = move_player(&mut player, 0.0, 0.0, &no_obstacles(), Some(&exit), &cfg);
    assert!(!outcome.level_complete);
}

#[test]
fn exit_check_runs_even_when_blocked() {
    let cfg = GameConfig::default();
    let exit = exit_tile_at(400.0, 400.0);
    let wall = vec![Rect::new(424.0, 300.0, 48.0, 200.0)];
    let mut player = Character::player(400.0, 400.0, 0);
    let outcome = move_player(&mut player, 5.0, 0.0, &wall, Some(&exit), &cfg);
    assert_eq!(player.rect.right(), 424.0);
    assert!(outcome.level_complete);
}
