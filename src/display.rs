/// Terminal renderer for the game session.
///
/// Reads the session through shared references only and queues crossterm
/// commands.  The pixel screen is scaled down to whatever cell grid the
/// terminal offers.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use dungeon_archer::clock::Clock;
use dungeon_archer::compute::{GameSession, Phase};
use dungeon_archer::entities::{Hud, ItemKind, ProjectileKind, TileKind};
use dungeon_archer::geometry::Rect;
use dungeon_archer::level::LevelSource;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkRed;
const C_FLOOR: Color = Color::DarkGrey;
const C_WALL: Color = Color::Grey;
const C_EXIT: Color = Color::Yellow;
const C_COIN: Color = Color::Yellow;
const C_POTION: Color = Color::Magenta;
const C_PLAYER: Color = Color::White;
const C_ENEMY: Color = Color::Green;
const C_BOSS: Color = Color::Red;
const C_DEAD: Color = Color::DarkGrey;
const C_ARROW: Color = Color::Cyan;
const C_FIREBALL: Color = Color::Red;
const C_POPUP: Color = Color::Red;
const C_HUD: Color = Color::White;
const C_HEART: Color = Color::Red;
const C_HINT: Color = Color::DarkGrey;
const C_FADE_INTRO: Color = Color::Black;
const C_FADE_DEATH: Color = Color::Magenta;

/// One glyph per species; index 0 is the player.
const SPECIES_GLYPHS: [char; 7] = ['@', 'i', 's', 'g', 'm', 'z', 'D'];

// ── Viewport ──────────────────────────────────────────────────────────────────

/// Maps screen pixels to terminal cells and back.  Row 0 is the HUD, row 1
/// and row `height-2` are borders, the last row holds the controls hint.
#[derive(Clone, Copy, Debug)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
    screen_width: f32,
    screen_height: f32,
}

impl Viewport {
    pub fn new(width: u16, height: u16, screen_width: f32, screen_height: f32) -> Self {
        Viewport {
            width,
            height,
            screen_width,
            screen_height,
        }
    }

    fn inner_cols(&self) -> u16 {
        self.width.saturating_sub(2).max(1)
    }

    fn inner_rows(&self) -> u16 {
        self.height.saturating_sub(4).max(1)
    }

    fn col_for(&self, px: f32) -> Option<u16> {
        if !(0.0..self.screen_width).contains(&px) {
            return None;
        }
        Some((px / self.screen_width * f32::from(self.inner_cols())) as u16)
    }

    fn row_for(&self, py: f32) -> Option<u16> {
        if !(0.0..self.screen_height).contains(&py) {
            return None;
        }
        Some((py / self.screen_height * f32::from(self.inner_rows())) as u16)
    }

    /// Play-area cell (0-based, inside the border) for a pixel.
    fn cell_for(&self, px: f32, py: f32) -> Option<(u16, u16)> {
        Some((self.col_for(px)?, self.row_for(py)?))
    }

    /// Pixel at the middle of a terminal cell, for pointer input.
    pub fn pixel_for_terminal_cell(&self, column: u16, row: u16) -> (f32, f32) {
        let col = f32::from(column.saturating_sub(1).min(self.inner_cols() - 1));
        let row = f32::from(row.saturating_sub(2).min(self.inner_rows() - 1));
        (
            (col + 0.5) / f32::from(self.inner_cols()) * self.screen_width,
            (row + 0.5) / f32::from(self.inner_rows()) * self.screen_height,
        )
    }

    /// Play-area cells covered by a rectangle, clipped to the screen.
    fn cells_covering(&self, rect: &Rect) -> Option<(u16, u16, u16, u16)> {
        let left = rect.left().max(0.0);
        let right = (rect.right() - 0.01).min(self.screen_width - 0.01);
        let top = rect.top().max(0.0);
        let bottom = (rect.bottom() - 0.01).min(self.screen_height - 0.01);
        if left > right || top > bottom {
            return None;
        }
        let (c0, r0) = self.cell_for(left, top)?;
        let (c1, r1) = self.cell_for(right, bottom)?;
        Some((c0, r0, c1, r1))
    }
}

/// Off-screen glyph buffer for the play area.
struct Canvas {
    cols: usize,
    cells: Vec<(char, Color)>,
}

impl Canvas {
    fn new(viewport: &Viewport) -> Self {
        let cols = viewport.inner_cols() as usize;
        let rows = viewport.inner_rows() as usize;
        Canvas {
            cols,
            cells: vec![(' ', C_FLOOR); cols * rows],
        }
    }

    fn put(&mut self, col: u16, row: u16, glyph: char, color: Color) {
        if col as usize >= self.cols {
            return;
        }
        let index = row as usize * self.cols + col as usize;
        if let Some(cell) = self.cells.get_mut(index) {
            *cell = (glyph, color);
        }
    }

    fn fill(&mut self, area: (u16, u16, u16, u16), glyph: char, color: Color) {
        let (c0, r0, c1, r1) = area;
        for row in r0..=r1 {
            for col in c0..=c1 {
                self.put(col, row, glyph, color);
            }
        }
    }

    fn rows(&self) -> impl Iterator<Item = &[(char, Color)]> {
        self.cells.chunks(self.cols)
    }
}

// ── Public entry points ───────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W, C, L>(
    out: &mut W,
    session: &GameSession<C, L>,
    viewport: &Viewport,
) -> std::io::Result<()>
where
    W: Write,
    C: Clock,
    L: LevelSource,
{
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, viewport)?;
    draw_hud(out, &session.hud(), viewport)?;
    draw_world(out, session, viewport)?;
    draw_overlay(out, session, viewport)?;
    draw_controls_hint(out, viewport)?;

    // Park the cursor on the hint row.
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, viewport.height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

/// Title screen.
pub fn render_menu<W: Write>(out: &mut W, viewport: &Viewport) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let lines: &[(&str, Color)] = &[
        ("D U N G E O N   A R C H E R", Color::Red),
        ("", C_HINT),
        ("[Enter] Start      [Q] Quit", C_HUD),
        ("", C_HINT),
        ("W A S D : Move   Mouse : Aim / Shoot   Esc : Pause", C_HINT),
    ];
    let top = (viewport.height / 2).saturating_sub(lines.len() as u16 / 2);
    for (i, (text, color)) in lines.iter().enumerate() {
        centered(out, viewport, top + i as u16, text, *color)?;
    }
    out.queue(style::ResetColor)?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, viewport: &Viewport) -> std::io::Result<()> {
    let w = viewport.width as usize;
    let h = viewport.height;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(viewport.width.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

/// Five hearts of 20 health each, with a half heart for a remainder.
fn hearts(hud: &Hud) -> String {
    let mut text = String::new();
    let mut half_drawn = false;
    for i in 0..5 {
        if hud.health >= (i + 1) * 20 {
            text.push('♥');
        } else if hud.health % 20 > 0 && !half_drawn {
            text.push('♡');
            half_drawn = true;
        } else {
            text.push('·');
        }
    }
    text
}

fn draw_hud<W: Write>(out: &mut W, hud: &Hud, viewport: &Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HEART))?;
    out.queue(Print(hearts(hud)))?;

    let level_str = format!("Map: {}", hud.level);
    let lx = (viewport.width / 2).saturating_sub(level_str.len() as u16 / 2);
    out.queue(cursor::MoveTo(lx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD))?;
    out.queue(Print(&level_str))?;

    let score_str = format!("$ x {}", hud.score);
    let rx = viewport
        .width
        .saturating_sub(score_str.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_COIN))?;
    out.queue(Print(&score_str))?;
    Ok(())
}

// ── Play area ─────────────────────────────────────────────────────────────────

fn draw_world<W, C, L>(
    out: &mut W,
    session: &GameSession<C, L>,
    viewport: &Viewport,
) -> std::io::Result<()>
where
    W: Write,
    C: Clock,
    L: LevelSource,
{
    let world = session.world();
    let mut canvas = Canvas::new(viewport);

    for tile in world.map.tiles() {
        let Some(area) = viewport.cells_covering(&tile.rect) else {
            continue;
        };
        let (glyph, color) = match tile.kind {
            TileKind::Obstacle => ('█', C_WALL),
            TileKind::Exit => ('▒', C_EXIT),
            TileKind::Floor => ('·', C_FLOOR),
        };
        canvas.fill(area, glyph, color);
    }

    // The pinned score coin lives in the HUD row, not the play area.
    for item in world.items.iter().filter(|item| !item.pinned) {
        let (cx, cy) = item.rect.center();
        if let Some((col, row)) = viewport.cell_for(cx, cy) {
            match item.kind {
                ItemKind::Coin => canvas.put(col, row, '$', C_COIN),
                ItemKind::Potion => canvas.put(col, row, '!', C_POTION),
            }
        }
    }

    for enemy in &world.enemies {
        let (cx, cy) = enemy.rect.center();
        let Some((col, row)) = viewport.cell_for(cx, cy) else {
            continue;
        };
        let glyph = SPECIES_GLYPHS
            .get(enemy.kind as usize)
            .copied()
            .unwrap_or('?');
        let color = if !enemy.alive {
            C_DEAD
        } else if enemy.boss {
            C_BOSS
        } else {
            C_ENEMY
        };
        // Bosses fill their larger hitbox so they read as big.
        if enemy.boss && enemy.alive {
            if let Some(area) = viewport.cells_covering(&enemy.rect) {
                canvas.fill(area, glyph, color);
            }
        } else if enemy.draw_pose().flip_vertical {
            canvas.put(col, row, 'x', color);
        } else {
            canvas.put(col, row, glyph, color);
        }
    }

    let player = &world.player;
    let (px, py) = player.rect.center();
    if let Some((col, row)) = viewport.cell_for(px, py) {
        canvas.put(col, row, SPECIES_GLYPHS[0], C_PLAYER);
    }

    for projectile in &world.projectiles {
        let (cx, cy) = projectile.rect.center();
        if let Some((col, row)) = viewport.cell_for(cx, cy) {
            match projectile.kind {
                ProjectileKind::Arrow => canvas.put(col, row, arrow_glyph(projectile.angle), C_ARROW),
                ProjectileKind::Fireball => canvas.put(col, row, '●', C_FIREBALL),
            }
        }
    }

    for popup in &world.popups {
        if let Some((col, row)) = viewport.cell_for(popup.x, popup.y) {
            for (i, digit) in popup.damage.to_string().chars().enumerate() {
                canvas.put(col + i as u16, row, digit, C_POPUP);
            }
        }
    }

    for (row, cells) in canvas.rows().enumerate() {
        out.queue(cursor::MoveTo(1, 2 + row as u16))?;
        let mut current = None;
        for &(glyph, color) in cells {
            if current != Some(color) {
                out.queue(style::SetForegroundColor(color))?;
                current = Some(color);
            }
            out.queue(Print(glyph))?;
        }
    }
    Ok(())
}

/// Closest of eight line glyphs for a flight angle.
fn arrow_glyph(angle: f32) -> char {
    let octant = ((angle.rem_euclid(180.0) + 22.5) / 45.0) as u32 % 4;
    match octant {
        0 => '─',
        1 => '╱',
        2 => '│',
        _ => '╲',
    }
}

// ── Phase overlays ────────────────────────────────────────────────────────────

fn draw_overlay<W, C, L>(
    out: &mut W,
    session: &GameSession<C, L>,
    viewport: &Viewport,
) -> std::io::Result<()>
where
    W: Write,
    C: Clock,
    L: LevelSource,
{
    let mid = viewport.height / 2;
    if session.is_paused() {
        centered(out, viewport, mid, "PAUSED — [Esc] Resume  [Q] Quit", C_HUD)?;
        return Ok(());
    }
    match session.phase() {
        Phase::IntroFade { progress } => {
            let screen = session.config().screen_width;
            // Curtains open from the middle as the fade progresses.
            let open = (progress / screen * f32::from(viewport.width)) as u16;
            let curtain = (viewport.width / 2).saturating_sub(open);
            if curtain > 0 {
                out.queue(style::SetForegroundColor(C_FADE_INTRO))?;
                for row in 2..viewport.height.saturating_sub(2) {
                    out.queue(cursor::MoveTo(0, row))?;
                    out.queue(Print("█".repeat(curtain as usize)))?;
                    out.queue(cursor::MoveTo(viewport.width - curtain, row))?;
                    out.queue(Print("█".repeat(curtain as usize)))?;
                }
            }
        }
        Phase::DeathFade { progress } => {
            let screen = session.config().screen_height;
            let rows = (progress / screen * f32::from(viewport.height)) as u16;
            out.queue(style::SetForegroundColor(C_FADE_DEATH))?;
            for row in 0..rows.min(viewport.height) {
                out.queue(cursor::MoveTo(0, row))?;
                out.queue(Print("█".repeat(viewport.width as usize)))?;
            }
        }
        Phase::AwaitingRestart => {
            centered(out, viewport, mid, "YOU DIED — [R] Restart  [Q] Quit", C_HEART)?;
        }
        Phase::Finished => {
            let text = format!("DUNGEON CLEARED — final score {}", session.hud().score);
            centered(out, viewport, mid, &text, C_COIN)?;
            centered(out, viewport, mid + 1, "[Q] Quit", C_HINT)?;
        }
        Phase::Menu | Phase::Playing => {}
    }
    Ok(())
}

fn draw_controls_hint<W: Write>(out: &mut W, viewport: &Viewport) -> std::io::Result<()> {
    let hint = "WASD:Move  Mouse:Aim/Shoot  Esc:Pause  Q:Quit";
    centered(out, viewport, viewport.height.saturating_sub(1), hint, C_HINT)
}

fn centered<W: Write>(
    out: &mut W,
    viewport: &Viewport,
    row: u16,
    text: &str,
    color: Color,
) -> std::io::Result<()> {
    let x = (viewport.width / 2).saturating_sub(text.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(x, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(text))?;
    Ok(())
}
