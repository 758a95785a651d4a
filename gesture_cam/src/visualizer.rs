//! Software-rendered overlay window using `minifb`.
//!
//! Layout:
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │ THUMBS UP                                    │  label (green / red when no hand)
//! │                                              │
//! │                 o  o                         │
//! │              o  |  |  o                      │  hand skeleton
//! │               \ |  | /   o                   │
//! │                 wrist                        │
//! │ 1=fist 2=palm 3=thumb 4=victory ... q=quit   │  key legend
//! └──────────────────────────────────────────────┘
//! ```
//!
//! The window also doubles as the input device for the simulator: number
//! keys select a pose, `Q` / `Esc` or closing the window raise the stop
//! signal.

use minifb::{Key, KeyRepeat, Window, WindowOptions};
use std::sync::mpsc::Sender;

use hand_gesture::{GestureLabel, HandLandmarks, Landmark, HAND_CONNECTIONS};

use crate::app::{FrameOverlay, StopSignal};
use crate::sim::{SimInput, SimPose};
use crate::source::LandmarkFrame;

// ════════════════════════════════════════════════════════════════════════════
// Layout constants
// ════════════════════════════════════════════════════════════════════════════

pub const WIN_W:     usize = 640;
pub const WIN_H:     usize = 480;
const LABEL_X:       usize = 10;
const LABEL_Y:       usize = 20;
const LABEL_SCALE:   usize = 4;
const LEGEND_Y:      usize = WIN_H - 14;
const JOINT_RADIUS:  isize = 3;
const OFFSCREEN:     f32   = 0.25;   // how far past the edge a point may be drawn
const BG_COLOR:      u32   = 0xFF101418;
const BONE_COLOR:    u32   = 0xFFE0E0E0;
const JOINT_COLOR:   u32   = 0xFFFF3030;
const HAND_TEXT:     u32   = 0xFF00FF00;  // green
const NO_HAND_TEXT:  u32   = 0xFFFF0000;  // red
const LEGEND_COLOR:  u32   = 0xFF888888;

const SIM_LEGEND: &str = "1=fist 2=palm 3=thumb 4=victory 5=ok 6=point 0=hide  q=quit";
const LEGEND:     &str = "q=quit";

// ════════════════════════════════════════════════════════════════════════════
// Visualizer
// ════════════════════════════════════════════════════════════════════════════

pub struct Visualizer {
    window: Window,
    buf:    Vec<u32>,
    /// Present in simulation mode only.
    sim_tx: Option<Sender<SimInput>>,
    stop:   StopSignal,
}

impl Visualizer {
    pub fn new(sim_tx: Option<Sender<SimInput>>, stop: StopSignal) -> Result<Self, minifb::Error> {
        let mut window = Window::new(
            "Hand Gesture Recognition",
            WIN_W, WIN_H,
            WindowOptions {
                resize: false,
                ..WindowOptions::default()
            },
        )?;

        window.limit_update_rate(Some(std::time::Duration::from_millis(33))); // ~30fps

        Ok(Visualizer {
            window,
            buf: vec![BG_COLOR; WIN_W * WIN_H],
            sim_tx,
            stop,
        })
    }

    /// Translate key presses into simulator input / stop requests.
    fn poll_input(&mut self) {
        if !self.window.is_open()
            || self.window.is_key_pressed(Key::Q, KeyRepeat::No)
            || self.window.is_key_pressed(Key::Escape, KeyRepeat::No)
        {
            self.stop.raise();
            return;
        }

        let Some(tx) = &self.sim_tx else { return };

        let bindings = [
            (Key::Key1, SimInput::Show(SimPose::Fist)),
            (Key::Key2, SimInput::Show(SimPose::OpenPalm)),
            (Key::Key3, SimInput::Show(SimPose::ThumbsUp)),
            (Key::Key4, SimInput::Show(SimPose::Victory)),
            (Key::Key5, SimInput::Show(SimPose::Ok)),
            (Key::Key6, SimInput::Show(SimPose::Pointing)),
            (Key::Key0, SimInput::Hide),
        ];
        for (key, input) in bindings {
            if self.window.is_key_pressed(key, KeyRepeat::No) {
                let _ = tx.send(input);
            }
        }
    }

    // ── Hand ──────────────────────────────────────────────────────────────

    fn draw_hand(&mut self, hand: &HandLandmarks) {
        for (a, b) in HAND_CONNECTIONS {
            let (x0, y0) = to_px(hand.point(a));
            let (x1, y1) = to_px(hand.point(b));
            self.draw_line(x0, y0, x1, y1, BONE_COLOR);
        }
        for p in hand.iter() {
            let (x, y) = to_px(p);
            self.fill_disc(x, y, JOINT_RADIUS, JOINT_COLOR);
        }
    }

    // ── Primitive drawing helpers ─────────────────────────────────────────

    fn set_pixel(&mut self, x: isize, y: isize, color: u32) {
        if x >= 0 && y >= 0 && (x as usize) < WIN_W && (y as usize) < WIN_H {
            self.buf[y as usize * WIN_W + x as usize] = color;
        }
    }

    /// Bresenham.
    fn draw_line(&mut self, x0: isize, y0: isize, x1: isize, y1: isize, color: u32) {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let (mut x, mut y, mut err) = (x0, y0, dx + dy);
        loop {
            self.set_pixel(x, y, color);
            if x == x1 && y == y1 { break; }
            let e2 = 2 * err;
            if e2 >= dy { err += dy; x += sx; }
            if e2 <= dx { err += dx; y += sy; }
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

    /// 3×5 bitmap font, each dot drawn as a `scale`×`scale` block.
    fn draw_label(&mut self, text: &str, x: usize, y: usize, scale: usize, color: u32) {
        let mut cx = x;
        for ch in text.chars() {
            if cx + 4 * scale > WIN_W { break; }
            let glyph = char_glyph(ch);
            for (row, &bits) in glyph.iter().enumerate() {
                for col in 0..3usize {
                    if bits & (1 << (2 - col)) == 0 { continue; }
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
            cx += 4 * scale; // 3 wide + 1 gap
        }
    }
}

impl FrameOverlay<LandmarkFrame> for Visualizer {
    fn render(&mut self, _frame: &LandmarkFrame, label: GestureLabel, hand: Option<&HandLandmarks>) {
        self.buf.fill(BG_COLOR);

        if let Some(hand) = hand {
            self.draw_hand(hand);
        }

        let color = if hand.is_some() { HAND_TEXT } else { NO_HAND_TEXT };
        self.draw_label(label.display_name(), LABEL_X, LABEL_Y, LABEL_SCALE, color);

        let legend = if self.sim_tx.is_some() { SIM_LEGEND } else { LEGEND };
        self.draw_label(legend, LABEL_X, LEGEND_Y, 2, LEGEND_COLOR);

        self.window.update_with_buffer(&self.buf, WIN_W, WIN_H).ok();
        self.poll_input();
    }
}

/// Normalized → window pixels, pinned to a band just around the window so a
/// wild coordinate cannot turn into a huge line walk.  NaN lands on 0.
fn to_px(p: &Landmark) -> (isize, isize) {
    let clamp = |v: f32| v.clamp(-OFFSCREEN, 1.0 + OFFSCREEN);
    ((clamp(p.x) * WIN_W as f32) as isize, (clamp(p.y) * WIN_H as f32) as isize)
}

// ────────────────────────────────────────────────────────────────────────────
// Minimal 3×5 bitmap font
// ────────────────────────────────────────────────────────────────────────────

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
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        '=' => [0b000, 0b111, 0b000, 0b111, 0b000],
        ' ' => [0b000, 0b000, 0b000, 0b000, 0b000],
        _   => [0b000, 0b000, 0b010, 0b000, 0b000], // fallback dot
    }
}
