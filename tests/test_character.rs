use dungeon_archer::character::AnimationTable;
use dungeon_archer::entities::*;

// ── Construction ──────────────────────────────────────────────────────────────

#[test]
fn player_spawns_with_full_health_at_center() {
    let p = Character::player(240.0, 96.0, 0);
    assert!(p.is_player());
    assert_eq!(p.health, 100);
    assert_eq!(p.max_health, 100);
    assert!(p.alive);
    assert_eq!(p.rect.center(), (240.0, 96.0));
    assert_eq!(p.rect.w, 47.0);
    assert_eq!(p.action, Action::Idle);
}

#[test]
fn boss_is_double_sized_with_extra_health() {
    let b = Character::boss(400.0, 400.0, 0);
    assert!(b.boss);
    assert_eq!(b.kind, 6);
    assert_eq!(b.health, 400);
    assert_eq!(b.rect.w, 95.0);
    assert_eq!(b.rect.h, 95.0);
    assert_eq!(b.rect.center(), (400.0, 400.0));
}

// ── Health ────────────────────────────────────────────────────────────────────

#[test]
fn health_never_goes_negative_and_death_is_final() {
    for damage in [0, 1, 50, 99, 100, 101, 150, 1000] {
        let mut e = Character::enemy(2, 0.0, 0.0, 0);
        e.apply_damage(damage);
        assert!(e.health >= 0);
        assert_eq!(e.alive, e.health > 0, "damage {damage}");
    }

    let mut e = Character::enemy(2, 0.0, 0.0, 0);
    e.apply_damage(120);
    assert_eq!(e.health, 0);
    assert!(!e.alive);
    assert!(!e.heal(10));
    e.update(1000, &AnimationTable::default());
    assert!(!e.alive);
    assert_eq!(e.health, 0);
}

#[test]
fn update_clamps_health_set_out_of_band() {
    let mut p = Character::player(0.0, 0.0, 0);
    p.health = -7;
    p.update(10, &AnimationTable::default());
    assert_eq!(p.health, 0);
    assert!(!p.alive);
}

#[test]
fn heal_is_capped_at_max() {
    let mut p = Character::player(0.0, 0.0, 0);
    p.health = 95;
    assert!(p.heal(10));
    assert_eq!(p.health, 100);
    assert!(!p.heal(10));
    assert_eq!(p.health, 100);
}

// ── Player hit cooldown ──────────────────────────────────────────────────────

#[test]
fn player_hit_window_expires_after_one_second() {
    let anims = AnimationTable::default();
    let mut p = Character::player(0.0, 0.0, 0);
    p.register_hit(2000);
    assert!(p.in_hit_cooldown());

    p.update(2500, &anims);
    assert!(p.hit);
    p.update(3000, &anims);
    assert!(p.hit, "exactly 1000 ms is still inside the window");
    p.update(3001, &anims);
    assert!(!p.hit);
}

#[test]
fn enemy_hit_is_not_cleared_by_update() {
    let mut e = Character::enemy(1, 0.0, 0.0, 0);
    e.hit = true;
    e.update(5000, &AnimationTable::default());
    assert!(e.hit);
}

// ── Enemy stun ───────────────────────────────────────────────────────────────

#[test]
fn hit_stuns_and_idles_enemy() {
    let mut e = Character::enemy(1, 0.0, 0.0, 0);
    e.running = true;
    e.action = Action::Running;
    e.frame_index = 2;
    e.hit = true;

    e.process_stun(1000);
    assert!(e.stunned);
    assert!(!e.hit);
    assert!(!e.running);
    assert_eq!(e.action, Action::Idle);
    assert_eq!(e.frame_index, 0);
    assert_eq!(e.last_hit, 1000);
}

#[test]
fn stun_lifts_after_window() {
    let mut e = Character::enemy(1, 0.0, 0.0, 0);
    e.hit = true;
    e.process_stun(1000);

    e.process_stun(1150);
    assert!(e.stunned);
    e.process_stun(1151);
    assert!(!e.stunned);
}

#[test]
fn hit_during_stun_restarts_window() {
    let mut e = Character::enemy(1, 0.0, 0.0, 0);
    e.hit = true;
    e.process_stun(1000);

    e.hit = true;
    e.process_stun(1100);
    assert_eq!(e.last_hit, 1100);

    e.process_stun(1200);
    assert!(e.stunned);
    e.process_stun(1251);
    assert!(!e.stunned);
}

// ── Animation ────────────────────────────────────────────────────────────────

#[test]
fn frame_advances_only_after_cooldown() {
    let anims = AnimationTable::default();
    let mut p = Character::player(0.0, 0.0, 0);

    p.update(70, &anims);
    assert_eq!(p.frame_index, 0);
    p.update(71, &anims);
    assert_eq!(p.frame_index, 1);
    assert_eq!(p.update_time, 71);
}

#[test]
fn repeated_update_at_same_time_is_idempotent() {
    let anims = AnimationTable::default();
    let mut p = Character::player(0.0, 0.0, 0);
    p.update(100, &anims);
    let after_first = p.clone();
    p.update(100, &anims);
    assert_eq!(p, after_first);
}

#[test]
fn frame_index_wraps_to_table_length() {
    let anims = AnimationTable::uniform(2);
    let mut p = Character::player(0.0, 0.0, 0);
    let mut seen = Vec::new();
    for now in [100, 200, 300, 400] {
        p.update(now, &anims);
        seen.push(p.frame_index);
    }
    assert_eq!(seen, vec![1, 0, 1, 0]);
}

#[test]
fn switching_action_restarts_animation() {
    let anims = AnimationTable::default();
    let mut p = Character::player(0.0, 0.0, 0);
    p.update(100, &anims);
    assert_eq!(p.frame_index, 1);

    p.running = true;
    p.update(120, &anims);
    assert_eq!(p.action, Action::Running);
    assert_eq!(p.frame_index, 0);
    assert_eq!(p.update_time, 120);
}

#[test]
fn per_species_frame_counts() {
    let anims = AnimationTable::uniform(4).with_frames(3, Action::Running, 6);
    assert_eq!(anims.frames(3, Action::Running), 6);
    assert_eq!(anims.frames(3, Action::Idle), 4);
    assert_eq!(anims.frames(0, Action::Running), 4);
    assert_eq!(anims.frames(42, Action::Idle), 1);
}

// ── Draw pose ────────────────────────────────────────────────────────────────

#[test]
fn dead_enemy_is_drawn_tipped_over() {
    let mut e = Character::enemy(4, 0.0, 0.0, 0);
    e.flip = true;
    assert_eq!(
        e.draw_pose(),
        DrawPose {
            flip_horizontal: true,
            flip_vertical: false,
            rotation_degrees: 0.0
        }
    );

    e.apply_damage(100);
    let pose = e.draw_pose();
    assert!(pose.flip_vertical);
    assert!(!pose.flip_horizontal);
    assert_eq!(pose.rotation_degrees, 30.0);
}
