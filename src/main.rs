// What you SEE:
// • A white canvas filling the window; hold Left Mouse to draw.
// • P pen, E eraser, F fill bucket. 1-9 pick a palette color, [ and ] change width.
// • B paints the whole canvas with the current color, C clears it.
// • U or Z undoes, Y or R redoes, S saves a PNG (named by artwork_name if configured). ESC quits.
// • The title bar shows the active tool, color, width and history depth.

mod host;

use freehand::{Canvas, Point};
use host::config::HostConfig;
use host::draw::{Drawer, FrameBuffer, draw_brush_outline};
use host::error::Error;
use host::save::save_snapshot;
use host::tools::{Tool, ToolState};
use log::{error, info, warn};
use minifb::Key;

const CURSOR_COLOR: u32 = 0x00_80_80_80;

fn main() -> Result<(), Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let cfg = HostConfig::load()?;
    let mut tools = ToolState::from_config(&cfg)?;
    let mut drawer = Drawer::new("freehand", cfg.width, cfg.height)?;
    let mut canvas = Canvas::with_max_dimension(cfg.width as i64, cfg.height as i64, cfg.max_dimension)?;
    info!("canvas ready at {}x{}", canvas.width(), canvas.height());

    let mut was_down = false;
    let mut title = String::new();

    while drawer.is_open() && !drawer.esc_pressed() {
        /* 1) Keep the canvas the size of the window (a new size starts a fresh drawing). */
        let (w, h) = drawer.size();
        if w > 0 && h > 0 && (w, h) != (canvas.width(), canvas.height()) {
            match canvas.resize(w as i64, h as i64) {
                Ok(()) => info!("window resized, new {w}x{h} canvas"),
                Err(e) => warn!("keeping {}x{} canvas: {e}", canvas.width(), canvas.height()),
            }
        }

        /* 2) Keyboard: tools, history, save. */
        handle_keys(&drawer, &mut canvas, &mut tools, &cfg);

        /* 3) Mouse: strokes and fills. */
        let down = drawer.left_mouse_down();
        let pos = drawer.mouse_pos();
        handle_pointer(&mut canvas, &tools, pos, down, was_down);
        was_down = down;

        /* 4) Committed drawing + live stroke, then the brush outline on top. */
        let mut screen = FrameBuffer::from_canvas(&canvas.frame());
        if let Some((mx, my)) = pos {
            let r = tools.cursor_radius().round() as i32;
            draw_brush_outline(&mut screen, mx.round() as i32, my.round() as i32, r, CURSOR_COLOR);
        }

        /* 5) Title bar status, only touched when it changes. */
        let status = status_line(&tools, &canvas);
        if status != title {
            drawer.set_title(&status);
            title = status;
        }

        drawer.present(&screen)?;
    }

    Ok(())
}

fn handle_keys(drawer: &Drawer, canvas: &mut Canvas, tools: &mut ToolState, cfg: &HostConfig) {
    if drawer.pressed_once(Key::P) {
        tools.tool = Tool::Pen;
    }
    if drawer.pressed_once(Key::E) {
        tools.tool = Tool::Eraser;
    }
    if drawer.pressed_once(Key::F) {
        tools.tool = Tool::Fill;
    }
    if let Some(slot) = drawer.palette_key() {
        if !tools.pick(slot) {
            warn!("palette has no color {}", slot + 1);
        }
    }
    if drawer.pressed_once(Key::LeftBracket) {
        tools.thinner();
    }
    if drawer.pressed_once(Key::RightBracket) {
        tools.wider();
    }

    if drawer.pressed_once(Key::B) {
        if let Err(e) = canvas.paint(tools.color) {
            warn!("paint ignored: {e}");
        }
    }
    if drawer.pressed_once(Key::C) {
        canvas.clear();
    }
    if (drawer.pressed_once(Key::U) || drawer.pressed_once(Key::Z)) && !canvas.undo() {
        info!("nothing to undo");
    }
    if (drawer.pressed_once(Key::Y) || drawer.pressed_once(Key::R)) && !canvas.redo() {
        info!("nothing to redo");
    }
    if drawer.pressed_once(Key::S) {
        if let Err(e) = save_snapshot(&canvas.snapshot(), &cfg.save_dir, cfg.artwork_name.as_deref()) {
            error!("{e}");
        }
    }
}

/// Turn mouse button edges into gesture calls. Positions outside the window
/// are skipped; releasing anywhere still commits the stroke.
fn handle_pointer(canvas: &mut Canvas, tools: &ToolState, pos: Option<(f32, f32)>, down: bool, was_down: bool) {
    let point = pos.map(|(x, y)| Point::new(x, y));

    match (was_down, down) {
        (false, true) => {
            let Some(p) = point else { return };
            let result = match tools.brush() {
                Some(brush) => canvas.begin_stroke(p, brush),
                None => canvas.fill(p, tools.color).map(|n| info!("filled {n} pixels")),
            };
            if let Err(e) = result {
                warn!("press at ({:.1}, {:.1}) ignored: {e}", p.x, p.y);
            }
        }
        (true, true) => {
            let Some(p) = point else { return };
            let moved = canvas
                .pending_stroke()
                .and_then(|s| s.points().last())
                .is_some_and(|last| *last != p);
            if moved {
                if let Err(e) = canvas.extend_stroke(p) {
                    warn!("move ignored: {e}");
                }
            }
        }
        (true, false) => {
            // nothing pending after a fill, or after a resize/clear mid-drag
            if canvas.pending_stroke().is_some() {
                if let Err(e) = canvas.end_stroke() {
                    warn!("release ignored: {e}");
                }
            }
        }
        (false, false) => {}
    }
}

fn status_line(tools: &ToolState, canvas: &Canvas) -> String {
    let what = match tools.tool {
        Tool::Eraser => format!("{} {:.0}px", tools.tool.label(), tools.brush().map_or(0.0, |b| b.width)),
        Tool::Fill => format!("{} {}", tools.tool.label(), tools.color),
        Tool::Pen => format!("{} {} {:.0}px", tools.tool.label(), tools.color, tools.width),
    };
    format!(
        "freehand | {what} | undo {} redo {}",
        canvas.history().undo_len(),
        canvas.history().redo_len()
    )
}
