//! Software-rendered visualizer using `minifb`.
//!
//! The window is the (virtual) camera frame, so landmark pixels are drawn
//! where they are.  Layout:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  Mode: NUMBER 2                                  FPS: 60 │
//! │  Num1: 3                                                 │
//! │  Op: +                          hand skeleton            │
//! │  Num2: 4                                                 │
//! │  Result: -                                               │
//! │  Gesture: Number 2: 4                                    │
//! │ ┌──────────────┐                                         │
//! │ │FINGER STATES │                                         │
//! │ │Thumb: DOWN   │                                         │
//! │ │...           │                                         │
//! │ └──────────────┘                                         │
//! │  key legend                                              │
//! └──────────────────────────────────────────────────────────┘
//! ```

use std::sync::mpsc::Sender;
use std::time::Duration;

use gesture_calc::{DisplaySnapshot, Operator};
use hand_landmarks::{Finger, FingerVector, Point2D, HAND_SKELETON, TIP_IDS};
use minifb::{Key, KeyRepeat, Window, WindowOptions};

use crate::error::AppError;
use crate::source::{SimInput, SimKey};

// ════════════════════════════════════════════════════════════════════════════
// Layout constants
// ════════════════════════════════════════════════════════════════════════════

const BG_COLOR:      u32 = 0xFF1A1A2E;
const BONE_COLOR:    u32 = 0xFFFF00FF;  // magenta connections
const JOINT_COLOR:   u32 = 0xFF00FF00;
const TIP_COLOR:     u32 = 0xFF0000FF;
const PANEL_COLOR:   u32 = 0xFF000000;
const UP_COLOR:      u32 = 0xFF00FF00;
const DOWN_COLOR:    u32 = 0xFFFF0000;
const TITLE_COLOR:   u32 = 0xFFFFFF00;
const FPS_COLOR:     u32 = 0xFF00FF00;
const LEGEND_COLOR:  u32 = 0xFF888888;
const NO_HAND_COLOR: u32 = 0xFF666688;

/// Read-out colours: Mode, Num1, Op, Num2, Result, Gesture.
const READOUT_COLORS: [u32; 6] = [
    0xFFFFFF00,
    0xFF00C800,
    0xFFC800C8,
    0xFFFF9600,
    0xFF6464FF,
    0xFFFFFFFF,
];

const READOUT_SCALE: usize = 3;
const PANEL_SCALE:   usize = 2;
const LEGEND: &str = "0-5 NUMBER  A S X D = + - * /  T I M R P FINGER  H HAND  Q QUIT";

/// Window keys and the simulated hand action each one triggers.
const KEY_MAP: [(Key, SimKey); 17] = [
    (Key::Key0, SimKey::Digit(0)),
    (Key::Key1, SimKey::Digit(1)),
    (Key::Key2, SimKey::Digit(2)),
    (Key::Key3, SimKey::Digit(3)),
    (Key::Key4, SimKey::Digit(4)),
    (Key::Key5, SimKey::Digit(5)),
    (Key::A,    SimKey::Operator(Operator::Add)),
    (Key::S,    SimKey::Operator(Operator::Subtract)),
    (Key::X,    SimKey::Operator(Operator::Multiply)),
    (Key::D,    SimKey::Operator(Operator::Divide)),
    (Key::T,    SimKey::Toggle(Finger::Thumb)),
    (Key::I,    SimKey::Toggle(Finger::Index)),
    (Key::M,    SimKey::Toggle(Finger::Middle)),
    (Key::R,    SimKey::Toggle(Finger::Ring)),
    (Key::P,    SimKey::Toggle(Finger::Pinky)),
    (Key::H,    SimKey::ToggleHand),
    (Key::Q,    SimKey::Quit),
];

// ════════════════════════════════════════════════════════════════════════════
// Visualizer
// ════════════════════════════════════════════════════════════════════════════

pub struct Visualizer {
    window: Window,
    buf:    Vec<u32>,
    width:  usize,
    height: usize,
    sim_tx: Sender<SimInput>,
}

impl Visualizer {
    pub fn new(sim_tx: Sender<SimInput>, width: usize, height: usize) -> Result<Self, AppError> {
        let mut window = Window::new(
            "Virtual Calculator",
            width, height,
            WindowOptions {
                resize: false,
                ..WindowOptions::default()
            },
        )?;

        window.limit_update_rate(Some(Duration::from_millis(16))); // ~60fps

        Ok(Visualizer {
            window,
            buf: vec![BG_COLOR; width * height],
            width,
            height,
            sim_tx,
        })
    }

    /// Returns false when the window should close.
    pub fn is_open(&self) -> bool { self.window.is_open() }

    /// Poll keyboard inputs and translate to SimInput events.
    pub fn poll_input(&mut self) -> bool {
        if !self.window.is_open() { return false; }

        if self.window.is_key_pressed(Key::Escape, KeyRepeat::No) {
            let _ = self.sim_tx.send(SimInput::KeyDown(SimKey::Quit));
            return false;
        }
        for (key, sim) in KEY_MAP {
            if self.window.is_key_pressed(key, KeyRepeat::No) {
                let _ = self.sim_tx.send(SimInput::KeyDown(sim));
                if sim == SimKey::Quit { return false; }
            }
        }
        true
    }

    /// Render one frame.
    pub fn render(
        &mut self,
        snapshot: &DisplaySnapshot,
        hand:     Option<&[Point2D]>,
        fingers:  Option<FingerVector>,
        fps:      u32,
    ) {
        self.buf.fill(BG_COLOR);

        // ── Hand skeleton ─────────────────────────────────────────────────
        match hand {
            Some(points) if !points.is_empty() => self.draw_hand(points),
            _ => {
                let msg = "NO HAND";
                let x = self.width.saturating_sub(text_width(msg, PANEL_SCALE)) / 2;
                self.draw_label(msg, x, self.height / 2, PANEL_SCALE, NO_HAND_COLOR);
            }
        }

        // ── Calculator read-out ───────────────────────────────────────────
        let line_h = 8 * READOUT_SCALE + 4;
        for (i, (line, color)) in snapshot.lines().iter().zip(READOUT_COLORS).enumerate() {
            self.draw_label(line, 10, 12 + i * line_h, READOUT_SCALE, color);
        }

        // ── Finger states ─────────────────────────────────────────────────
        if let Some(v) = fingers {
            self.draw_finger_panel(v);
        }

        // ── FPS ───────────────────────────────────────────────────────────
        let fps_text = format!("FPS: {}", fps);
        let fx = self.width.saturating_sub(text_width(&fps_text, PANEL_SCALE) + 10);
        self.draw_label(&fps_text, fx, 12, PANEL_SCALE, FPS_COLOR);

        // ── Key legend ────────────────────────────────────────────────────
        self.draw_label(LEGEND, 10, self.height.saturating_sub(16), PANEL_SCALE, LEGEND_COLOR);

        self.window.update_with_buffer(&self.buf, self.width, self.height).ok();
    }

    // ── Hand ──────────────────────────────────────────────────────────────

    fn draw_hand(&mut self, points: &[Point2D]) {
        let (w, h) = (self.width, self.height);
        let px = |i: usize| points.get(i).and_then(|&p| pixel(p, w, h));

        for (a, b) in HAND_SKELETON {
            if let (Some(pa), Some(pb)) = (px(a), px(b)) {
                for (x, y) in line_points(pa, pb) {
                    self.fill_disc(x, y, 1, BONE_COLOR);
                }
            }
        }
        for i in 0..points.len() {
            let Some((x, y)) = px(i) else { continue };
            if TIP_IDS.contains(&i) {
                self.fill_disc(x, y, 8, TIP_COLOR);
            } else {
                self.fill_disc(x, y, 4, JOINT_COLOR);
            }
        }
    }

    // ── Finger panel ──────────────────────────────────────────────────────

    fn draw_finger_panel(&mut self, fingers: FingerVector) {
        let row_h = 8 * PANEL_SCALE;
        let panel_h = row_h * 6 + 16;
        let panel_w = 190;
        let x = 10;
        let y = self.height.saturating_sub(panel_h + 30);

        self.shade_rect(x, y, panel_w, panel_h, PANEL_COLOR, 0.5);
        self.draw_label("FINGER STATES", x + 10, y + 8, PANEL_SCALE, TITLE_COLOR);
        for (i, (finger, up)) in fingers.iter().enumerate() {
            let (state, color) = if up { ("UP", UP_COLOR) } else { ("DOWN", DOWN_COLOR) };
            let line = format!("{}: {}", finger.name(), state);
            self.draw_label(&line, x + 10, y + 8 + (i + 1) * row_h, PANEL_SCALE, color);
        }
    }

    // ── Primitive drawing helpers ─────────────────────────────────────────

    /// Blend a rectangle of `color` over what is already drawn.
    fn shade_rect(&mut self, x: usize, y: usize, w: usize, h: usize, color: u32, alpha: f32) {
        for row in y..(y + h).min(self.height) {
            for col in x..(x + w).min(self.width) {
                let idx = row * self.width + col;
                self.buf[idx] = blend(self.buf[idx], color, alpha);
            }
        }
    }

    fn set_pixel(&mut self, x: isize, y: isize, color: u32) {
        if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
            self.buf[y as usize * self.width + x as usize] = color;
        }
    }

    fn fill_disc(&mut self, cx: isize, cy: isize, r: isize, color: u32) {
        for dy in -r..=r {
            for dx in -r..=r {
                if dx * dx + dy * dy <= r * r {
                    self.set_pixel(cx + dx, cy + dy, color);
                }
            }
        }
    }

    /// Minimal bitmap font: 3×5 glyphs, each bit drawn as a `scale`-sized block.
    fn draw_label(&mut self, text: &str, x: usize, y: usize, scale: usize, color: u32) {
        let mut cx = x;
        for ch in text.chars() {
            let glyph = char_glyph(ch);
            for (row, &bits) in glyph.iter().enumerate() {
                for col in 0..3usize {
                    if bits & (1 << (2 - col)) != 0 {
                        for sy in 0..scale {
                            for sx in 0..scale {
                                self.set_pixel(
                                    (cx + col * scale + sx) as isize,
                                    (y + row * scale + sy) as isize,
                                    color,
                                );
                            }
                        }
                    }
                }
            }
            cx += 4 * scale; // 3 wide + 1 gap
            if cx + 4 * scale > self.width { break; }
        }
    }
}

/// Pixel width of `text` at `scale`.
fn text_width(text: &str, scale: usize) -> usize {
    text.chars().count() * 4 * scale
}

/// Pixel position of a landmark, or `None` when it lies more than one frame
/// size outside the frame (or is not finite).  Keeps line walks bounded.
fn pixel(p: Point2D, width: usize, height: usize) -> Option<(isize, isize)> {
    let reach = |v: f32, size: usize| {
        let size = size as f32;
        v.is_finite() && v >= -size && v <= 2.0 * size
    };
    (reach(p.x, width) && reach(p.y, height)).then(|| (p.x.round() as isize, p.y.round() as isize))
}

/// Integer points on the segment `a`–`b` (Bresenham), both ends included.
fn line_points(a: (isize, isize), b: (isize, isize)) -> Vec<(isize, isize)> {
    let (mut x, mut y) = a;
    let dx = (b.0 - x).abs();
    let dy = -(b.1 - y).abs();
    let sx = if x < b.0 { 1 } else { -1 };
    let sy = if y < b.1 { 1 } else { -1 };
    let mut err = dx + dy;
    let mut out = Vec::with_capacity((dx - dy) as usize + 1);
    loop {
        out.push((x, y));
        if (x, y) == b { break; }
        let e2 = 2 * err;
        if e2 >= dy { err += dy; x += sx; }
        if e2 <= dx { err += dx; y += sy; }
    }
    out
}

// ────────────────────────────────────────────────────────────────────────────
// Minimal 3×5 bitmap font
// ────────────────────────────────────────────────────────────────────────────

const FALLBACK_GLYPH: [u8; 5] = [0b000, 0b000, 0b010, 0b000, 0b000];

fn char_glyph(c: char) -> [u8; 5] {
    match c {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b001, 0b001, 0b001],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        'a' | 'A' => [0b111, 0b101, 0b111, 0b101, 0b101],
        'b' | 'B' => [0b110, 0b101, 0b110, 0b101, 0b110],
        'c' | 'C' => [0b111, 0b100, 0b100, 0b100, 0b111],
        'd' | 'D' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'e' | 'E' => [0b111, 0b100, 0b111, 0b100, 0b111],
        'f' | 'F' => [0b111, 0b100, 0b111, 0b100, 0b100],
        'g' | 'G' => [0b111, 0b100, 0b101, 0b101, 0b111],
        'h' | 'H' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'i' | 'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'j' | 'J' => [0b001, 0b001, 0b001, 0b101, 0b111],
        'k' | 'K' => [0b101, 0b101, 0b110, 0b101, 0b101],
        'l' | 'L' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'm' | 'M' => [0b101, 0b111, 0b101, 0b101, 0b101],
        'n' | 'N' => [0b111, 0b101, 0b101, 0b101, 0b101],
        'o' | 'O' => [0b111, 0b101, 0b101, 0b101, 0b111],
        'p' | 'P' => [0b111, 0b101, 0b111, 0b100, 0b100],
        'q' | 'Q' => [0b111, 0b101, 0b101, 0b111, 0b001],
        'r' | 'R' => [0b110, 0b101, 0b110, 0b101, 0b101],
        's' | 'S' => [0b111, 0b100, 0b111, 0b001, 0b111],
        't' | 'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'u' | 'U' => [0b101, 0b101, 0b101, 0b101, 0b111],
        'v' | 'V' => [0b101, 0b101, 0b101, 0b010, 0b010],
        'w' | 'W' => [0b101, 0b101, 0b101, 0b111, 0b101],
        'x' | 'X' => [0b101, 0b101, 0b010, 0b101, 0b101],
        'y' | 'Y' => [0b101, 0b101, 0b111, 0b010, 0b010],
        'z' | 'Z' => [0b111, 0b001, 0b010, 0b100, 0b111],
        '/' => [0b001, 0b001, 0b010, 0b100, 0b100],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        ',' => [0b000, 0b000, 0b000, 0b010, 0b100],
        ':' => [0b000, 0b010, 0b000, 0b010, 0b000],
        '=' => [0b000, 0b111, 0b000, 0b111, 0b000],
        '+' => [0b000, 0b010, 0b111, 0b010, 0b000],
        '*' => [0b000, 0b101, 0b010, 0b101, 0b000],
        '(' => [0b010, 0b100, 0b100, 0b100, 0b010],
        ')' => [0b010, 0b001, 0b001, 0b001, 0b010],
        ' ' => [0b000, 0b000, 0b000, 0b000, 0b000],
        _   => FALLBACK_GLYPH,
    }
}

/// Alpha-blend two ARGB colors. `t` = 0.0 → all `a`, `t` = 1.0 → all `b`.
fn blend(a: u32, b: u32, t: f32) -> u32 {
    let t = t.clamp(0.0, 1.0);
    let lerp = |ca: u32, cb: u32| (ca as f32 * (1.0-t) + cb as f32 * t) as u32;
    let ar = (a >> 16) & 0xFF; let br = (b >> 16) & 0xFF;
    let ag = (a >>  8) & 0xFF; let bg = (b >>  8) & 0xFF;
    let ab =  a        & 0xFF; let bb =  b        & 0xFF;
    0xFF000000 | (lerp(ar,br) << 16) | (lerp(ag,bg) << 8) | lerp(ab,bb)
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
