// Window + software overlay utilities for the drawing host.
// What you see:
// 1) A resizable window showing the canvas (flattened onto white).
// 2) A thin circle that follows the mouse, sized like the current brush.

use freehand::PixelBuffer;
use minifb::{Key, KeyRepeat, MouseButton, MouseMode, ScaleMode, Window, WindowOptions};

use super::error::Error;

/// Pixels ready for minifb: each entry is 0x00RRGGBB.
#[derive(Clone)]
pub struct FrameBuffer {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<u32>,
}

impl FrameBuffer {
    /// Flatten a canvas frame onto white and pack it for the window.
    pub fn from_canvas(frame: &PixelBuffer) -> Self {
        let pixels = frame
            .pixels()
            .iter()
            .map(|p| {
                let [r, g, b] = p.over_white();
                ((r as u32) << 16) | ((g as u32) << 8) | b as u32
            })
            .collect();
        Self { width: frame.width(), height: frame.height(), pixels }
    }
}

pub struct Drawer {
    window: Window,
}

impl Drawer {
    /// Open a resizable window; the canvas sits in its upper-left corner
    /// at 1:1 so mouse coordinates are canvas coordinates.
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self, Error> {
        let opts = WindowOptions {
            resize: true,
            scale_mode: ScaleMode::UpperLeft,
            ..WindowOptions::default()
        };
        let mut window =
            Window::new(title, width, height, opts).map_err(|e| Error::WindowInit(e.to_string()))?;
        window.set_target_fps(60);
        Ok(Self { window })
    }

    pub fn present(&mut self, framebuffer: &FrameBuffer) -> Result<(), Error> {
        self.window
            .update_with_buffer(&framebuffer.pixels, framebuffer.width, framebuffer.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))
    }

    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    pub fn esc_pressed(&self) -> bool {
        self.window.is_key_down(Key::Escape)
    }

    /// Current inner size; the canvas is resized to follow it.
    pub fn size(&self) -> (usize, usize) {
        self.window.get_size()
    }

    pub fn set_title(&mut self, title: &str) {
        self.window.set_title(title);
    }

    /// Mouse position in canvas coordinates, None while outside the window.
    pub fn mouse_pos(&self) -> Option<(f32, f32)> {
        self.window.get_mouse_pos(MouseMode::Discard)
    }

    pub fn left_mouse_down(&self) -> bool {
        self.window.get_mouse_down(MouseButton::Left)
    }

    pub fn pressed_once(&self, key: Key) -> bool {
        self.window.is_key_pressed(key, KeyRepeat::No)
    }

    /// Index 0..=8 for the number row key pressed this frame, if any.
    pub fn palette_key(&self) -> Option<usize> {
        const KEYS: [Key; 9] = [
            Key::Key1,
            Key::Key2,
            Key::Key3,
            Key::Key4,
            Key::Key5,
            Key::Key6,
            Key::Key7,
            Key::Key8,
            Key::Key9,
        ];
        KEYS.iter().position(|&k| self.pressed_once(k))
    }
}

/* ---------- Software overlay: brush outline ---------- */

#[inline]
fn put_pixel(fb: &mut FrameBuffer, x: i32, y: i32, color: u32) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as usize, y as usize);
    if x >= fb.width || y >= fb.height {
        return;
    }
    fb.pixels[y * fb.width + x] = color;
}

/// Midpoint circle outline centered at (cx, cy). Radius below 1 draws a dot.
pub fn draw_brush_outline(fb: &mut FrameBuffer, cx: i32, cy: i32, radius: i32, color: u32) {
    if radius < 1 {
        put_pixel(fb, cx, cy, color);
        return;
    }
    let (mut x, mut y) = (radius, 0);
    let mut err = 1 - radius;
    while x >= y {
        for (dx, dy) in [(x, y), (y, x), (-y, x), (-x, y), (-x, -y), (-y, -x), (y, -x), (x, -y)] {
            put_pixel(fb, cx + dx, cy + dy, color);
        }
        y += 1;
        if err < 0 {
            err += 2 * y + 1;
        } else {
            x -= 1;
            err += 2 * (y - x) + 1;
        }
    }
}
