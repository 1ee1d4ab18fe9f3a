//! Terminal host: crossterm rendering and keyboard input.
//!
//! The 800x600 logical field is squeezed onto whatever terminal we get.
//! No game logic lives here; this module only turns frames into terminal
//! commands and key events into game events.

use std::io::Write;
use std::path::Path;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{self, Event as TermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    style::{self, Color, Print},
    terminal, QueueableCommand,
};
use glam::Vec2;

use chopper_strike::compute::SUPPLY_ZONE_TOP;
use chopper_strike::entities::{Enemy, Level, FIELD_HEIGHT, FIELD_WIDTH, MAX_ENEMIES, DEPOT_CAPACITY};
use chopper_strike::game::Ending;
use chopper_strike::platform::{load_visual_file, Event, Frame, Key, KeyKind, Platform, Visual, Visuals};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_AMMO: Color = Color::Yellow;
const C_HUD_DEPOT: Color = Color::Cyan;
const C_HUD_DINOS: Color = Color::Red;
const C_VEHICLE: Color = Color::White;
const C_PROJECTILE: Color = Color::Cyan;
const C_ENEMY: Color = Color::Green;
const C_HEAD: Color = Color::Red;
const C_SUPPLY: Color = Color::DarkYellow;
const C_HINT: Color = Color::DarkGrey;

/// How long the game-over box stays up when no key is pressed.
const GAME_OVER_LINGER: Duration = Duration::from_secs(3);

pub struct TerminalPlatform<W: Write> {
    out: W,
    rx: mpsc::Receiver<TermEvent>,
    level: Level,
    visuals: Visuals,
}

impl<W: Write> TerminalPlatform<W> {
    /// Spawns a thread dedicated to blocking event reads, forwarding them
    /// through a channel so the game loop never blocks on I/O.
    pub fn new(out: W, level: Level) -> Self {
        let (tx, rx) = mpsc::channel::<TermEvent>();
        thread::spawn(move || {
            while let Ok(ev) = event::read() {
                if tx.send(ev).is_err() {
                    break; // receiver dropped, program exiting
                }
            }
        });
        Self {
            out,
            rx,
            level,
            visuals: Visuals::default(),
        }
    }

    /// Load all sprites from `dir`.
    pub fn load_visuals(&mut self, dir: &Path) {
        let vehicle = self.load_visual(&dir.join("helicopter.txt"), 1.0);
        let projectile = self.load_visual(&dir.join("missile.txt"), 1.0);
        let enemy = self.load_visual(&dir.join("dinosaur.txt"), 1.0);
        self.visuals = Visuals { vehicle, projectile, enemy };
    }

    /// Draw the game-over box over the last frame and wait for a key (or a
    /// few seconds).
    pub fn show_ending(&mut self, frame: &Frame, ending: Ending) -> std::io::Result<()> {
        if ending == Ending::Closed {
            return Ok(());
        }
        self.present(frame)?;
        draw_game_over(&mut self.out, ending)?;
        self.out.flush()?;

        let deadline = Instant::now() + GAME_OVER_LINGER;
        while Instant::now() < deadline {
            if let Ok(TermEvent::Key(KeyEvent { kind: KeyEventKind::Press, .. })) =
                self.rx.recv_timeout(Duration::from_millis(50))
            {
                break;
            }
        }
        Ok(())
    }
}

fn translate(ev: TermEvent) -> Option<Event> {
    let TermEvent::Key(KeyEvent { code, kind, modifiers, .. }) = ev else {
        return None;
    };
    let kind = match kind {
        KeyEventKind::Press => KeyKind::Press,
        KeyEventKind::Repeat => KeyKind::Repeat,
        KeyEventKind::Release => KeyKind::Release,
    };
    let key = match code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc if kind == KeyKind::Press => {
            return Some(Event::Close)
        }
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => return Some(Event::Close),
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Key::Up,
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Key::Down,
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Key::Left,
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Key::Right,
        KeyCode::Char(' ') => Key::Fire,
        _ => return None,
    };
    Some(Event::Key { key, kind })
}

impl<W: Write> Platform for TerminalPlatform<W> {
    fn load_visual(&mut self, path: &Path, scale: f32) -> Visual {
        load_visual_file(path, scale)
    }

    fn poll_events(&mut self) -> Vec<Event> {
        self.rx.try_iter().filter_map(translate).collect()
    }

    fn present(&mut self, frame: &Frame) -> std::io::Result<()> {
        render(&mut self.out, frame, self.level, &self.visuals)
    }
}

// ── Field projection ──────────────────────────────────────────────────────────

/// Maps logical field coordinates onto terminal cells inside the border.
#[derive(Clone, Copy, Debug)]
struct Viewport {
    width: u16,
    height: u16,
}

impl Viewport {
    fn current() -> std::io::Result<Self> {
        let (width, height) = terminal::size()?;
        Ok(Self { width, height })
    }

    fn cols(&self) -> f32 {
        self.width.saturating_sub(2).max(1) as f32
    }

    fn rows(&self) -> f32 {
        self.height.saturating_sub(4).max(1) as f32
    }

    /// Terminal cell for a field position, or `None` if it falls outside
    /// the drawable area.
    fn cell(&self, at: Vec2) -> Option<(u16, u16)> {
        if at.x < 0.0 || at.y < 0.0 || at.x >= FIELD_WIDTH || at.y >= FIELD_HEIGHT {
            return None;
        }
        let col = 1 + (at.x / FIELD_WIDTH * self.cols()) as u16;
        let row = 2 + (at.y / FIELD_HEIGHT * self.rows()) as u16;
        Some((col, row))
    }
}

// ── Frame ──────────────────────────────────────────────────────────────────────

/// Render one complete frame.
fn render<W: Write>(out: &mut W, frame: &Frame, level: Level, visuals: &Visuals) -> std::io::Result<()> {
    let view = Viewport::current()?;
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out, view)?;
    draw_supply_zone(out, view)?;
    draw_hud(out, view, frame, level)?;

    for enemy in frame.enemies.iter().filter(|e| e.active) {
        draw_enemy(out, view, enemy, &visuals.enemy)?;
    }
    for projectile in frame.projectiles.iter().filter(|p| p.active) {
        draw_sprite(out, view, projectile.position, &visuals.projectile, C_PROJECTILE)?;
    }
    draw_sprite(out, view, frame.vehicle.position, &visuals.vehicle, C_VEHICLE)?;
    draw_controls_hint(out, view)?;

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, view.height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, view: Viewport) -> std::io::Result<()> {
    let w = view.width as usize;
    let h = view.height;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    out.queue(cursor::MoveTo(0, h.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in 2..h.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(view.width.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

fn draw_supply_zone<W: Write>(out: &mut W, view: Viewport) -> std::io::Result<()> {
    let Some((_, row)) = view.cell(Vec2::new(0.0, SUPPLY_ZONE_TOP)) else {
        return Ok(());
    };
    out.queue(cursor::MoveTo(1, row))?;
    out.queue(style::SetForegroundColor(C_SUPPLY))?;
    out.queue(Print("┄".repeat(view.width.saturating_sub(2) as usize)))?;
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, view: Viewport, frame: &Frame, level: Level) -> std::io::Result<()> {
    let counters = &frame.counters;

    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_AMMO))?;
    out.queue(Print(format!("Missiles:{}/{}", counters.vehicle_ammo, frame.vehicle_capacity)))?;
    out.queue(style::SetForegroundColor(C_HUD_DEPOT))?;
    out.queue(Print(format!("  Depot:{}/{}", counters.depot_ammo, DEPOT_CAPACITY)))?;

    let level_str = format!("[ {} ]", level.to_string().to_uppercase());
    let level_color = match level {
        Level::Easy => Color::Green,
        Level::Medium => Color::Yellow,
        Level::Hard => Color::Red,
    };
    let lx = (view.width / 2).saturating_sub(level_str.len() as u16 / 2);
    out.queue(cursor::MoveTo(lx, 0))?;
    out.queue(style::SetForegroundColor(level_color))?;
    out.queue(Print(&level_str))?;

    let dinos = format!("Dinos:{}/{}", counters.active_enemies, MAX_ENEMIES);
    let rx = view.width.saturating_sub(dinos.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_DINOS))?;
    out.queue(Print(&dinos))?;

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

/// Draw a sprite with its top-left at `at`. Blank sprites draw nothing.
fn draw_sprite<W: Write>(
    out: &mut W,
    view: Viewport,
    at: Vec2,
    visual: &Visual,
    color: Color,
) -> std::io::Result<()> {
    let Some((col, row)) = view.cell(at) else {
        return Ok(());
    };
    out.queue(style::SetForegroundColor(color))?;
    for (i, line) in visual.rows.iter().enumerate() {
        let y = row + i as u16;
        if y >= view.height.saturating_sub(2) {
            break;
        }
        out.queue(cursor::MoveTo(col, y))?;
        out.queue(Print(line))?;
    }
    Ok(())
}

fn draw_enemy<W: Write>(out: &mut W, view: Viewport, enemy: &Enemy, visual: &Visual) -> std::io::Result<()> {
    draw_sprite(out, view, enemy.position, visual, C_ENEMY)?;

    // The head is always marked so the player can line up a shot.
    if let Some((col, row)) = view.cell(enemy.head().min) {
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(C_HEAD))?;
        out.queue(Print("●"))?;
    }
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, view: Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, view.height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("WASD / arrows : Fly   SPACE : Fire   reload below the line   Q : Quit"))?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(out: &mut W, ending: Ending) -> std::io::Result<()> {
    let view = Viewport::current()?;
    let reason = match ending {
        Ending::Collision => "The helicopter went down",
        Ending::Overrun => "The Earth is doomed",
        Ending::Closed => "",
    };

    let lines: &[(&str, Color)] = &[
        ("╔════════════════════╗", Color::Red),
        ("║    GAME  OVER      ║", Color::Red),
        ("╚════════════════════╝", Color::Red),
        (reason, Color::Yellow),
    ];

    let cx = view.width / 2;
    let start_row = (view.height / 2).saturating_sub(lines.len() as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }
    out.queue(style::ResetColor)?;
    Ok(())
}
