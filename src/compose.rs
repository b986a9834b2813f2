// Composition: turns committed edits (and the live stroke) into pixels.
//
// A stroke is rasterized into a coverage mask first, one value in [0,1] per
// pixel, taking the max over all of its segments. The mask is then applied
// once: pen blends the brush color source-over, eraser pulls alpha toward 0.
// Applying once keeps a stroke from darkening its own joints.

use crate::history::Edit;
use crate::pixel_buffer::PixelBuffer;
use crate::stroke::Stroke;
use crate::types::{Point, Rgba, StrokeMode};

/// Copy `base`, draw `edits` in order, then the in-progress stroke on top.
pub fn render(base: &PixelBuffer, edits: &[Edit], pending: Option<&Stroke>) -> PixelBuffer {
    let mut frame = base.clone();
    for edit in edits {
        apply_edit(&mut frame, edit);
    }
    if let Some(stroke) = pending {
        apply_stroke(&mut frame, stroke);
    }
    frame
}

/// Draw a single committed edit onto `buffer`.
pub fn apply_edit(buffer: &mut PixelBuffer, edit: &Edit) {
    match edit {
        Edit::Stroke(stroke) => apply_stroke(buffer, stroke),
        Edit::Fill(patch) => patch.apply(buffer),
        Edit::Paint(color) => paint_over(buffer, *color),
    }
}

/// Whole-canvas paint, blended source-over at full coverage. An opaque color
/// replaces everything; a translucent one tints what is already there.
pub fn paint_over(buffer: &mut PixelBuffer, color: Rgba) {
    for px in buffer.pixels_mut() {
        *px = blend_over(*px, color, 1.0);
    }
}

pub fn apply_stroke(buffer: &mut PixelBuffer, stroke: &Stroke) {
    let Some(mask) = Coverage::rasterize(stroke, buffer.width(), buffer.height()) else {
        return; // entirely off the canvas
    };
    let color = stroke.color();
    let mode = stroke.mode();
    let buf_w = buffer.width();
    let pixels = buffer.pixels_mut();

    for my in 0..mask.h {
        let row = (mask.y0 + my) * buf_w + mask.x0;
        for mx in 0..mask.w {
            let c = mask.values[my * mask.w + mx];
            if c <= 0.0 {
                continue;
            }
            let px = &mut pixels[row + mx];
            *px = match mode {
                StrokeMode::Pen => blend_over(*px, color, c),
                StrokeMode::Eraser => erase(*px, c),
            };
        }
    }
}

/// Source-over with straight alpha. Full coverage of an opaque color is an
/// exact overwrite, so stroke interiors never carry rounding noise.
#[inline]
fn blend_over(dst: Rgba, src: Rgba, coverage: f32) -> Rgba {
    let sa = (src.a as f32 / 255.0) * coverage;
    if sa >= 1.0 {
        return src;
    }
    if sa <= 0.0 {
        return dst;
    }
    let da = dst.a as f32 / 255.0;
    let keep = da * (1.0 - sa);
    let oa = sa + keep;
    if oa <= 0.0 {
        return Rgba::TRANSPARENT;
    }
    let mix = |s: u8, d: u8| ((s as f32 * sa + d as f32 * keep) / oa).round().clamp(0.0, 255.0) as u8;
    Rgba::new(
        mix(src.r, dst.r),
        mix(src.g, dst.g),
        mix(src.b, dst.b),
        (oa * 255.0).round().clamp(0.0, 255.0) as u8,
    )
}

/// Scale alpha by (1 - coverage). Fully erased pixels collapse to TRANSPARENT
/// so an erased area is one exact color for the fill bucket.
#[inline]
fn erase(dst: Rgba, coverage: f32) -> Rgba {
    if coverage >= 1.0 {
        return Rgba::TRANSPARENT;
    }
    let a = (dst.a as f32 * (1.0 - coverage)).round().clamp(0.0, 255.0) as u8;
    if a == 0 {
        Rgba::TRANSPARENT
    } else {
        Rgba { a, ..dst }
    }
}

/// Per-pixel coverage over the stroke's clipped bounding box.
struct Coverage {
    x0: usize,
    y0: usize,
    w: usize,
    h: usize,
    values: Vec<f32>, // w * h, row-major
}

impl Coverage {
    fn rasterize(stroke: &Stroke, buf_w: usize, buf_h: usize) -> Option<Self> {
        let radius = stroke.width() / 2.0;
        let points = stroke.points();
        let (x0, y0, x1, y1) = clip_box(points, radius, buf_w, buf_h)?;
        let (w, h) = (x1 - x0 + 1, y1 - y0 + 1);
        let mut mask = Self { x0, y0, w, h, values: vec![0.0; w * h] };

        match points {
            [only] => mask.stamp_segment(*only, *only, radius, buf_w, buf_h),
            _ => {
                for pair in points.windows(2) {
                    mask.stamp_segment(pair[0], pair[1], radius, buf_w, buf_h);
                }
            }
        }
        Some(mask)
    }

    /// Raise coverage around the segment a-b (round caps) to at least its
    /// antialiased value: 1 inside `radius - 0.5`, fading to 0 at `radius + 0.5`.
    fn stamp_segment(&mut self, a: Point, b: Point, radius: f32, buf_w: usize, buf_h: usize) {
        let Some((sx0, sy0, sx1, sy1)) = clip_box(&[a, b], radius, buf_w, buf_h) else {
            return;
        };
        for y in sy0..=sy1 {
            for x in sx0..=sx1 {
                let d = distance_to_segment(Point::new(x as f32, y as f32), a, b);
                let c = (radius + 0.5 - d).clamp(0.0, 1.0);
                if c <= 0.0 {
                    continue;
                }
                let i = (y - self.y0) * self.w + (x - self.x0);
                if c > self.values[i] {
                    self.values[i] = c;
                }
            }
        }
    }
}

/// Inclusive pixel box covering `points` grown by `radius` plus one pixel of
/// antialiasing, clipped to the buffer. None when nothing lands on it.
fn clip_box(points: &[Point], radius: f32, buf_w: usize, buf_h: usize) -> Option<(usize, usize, usize, usize)> {
    let grow = radius + 1.0;
    let (mut lx, mut ly) = (f32::INFINITY, f32::INFINITY);
    let (mut hx, mut hy) = (f32::NEG_INFINITY, f32::NEG_INFINITY);
    for p in points {
        lx = lx.min(p.x);
        ly = ly.min(p.y);
        hx = hx.max(p.x);
        hy = hy.max(p.y);
    }
    let x0 = (lx - grow).floor().max(0.0);
    let y0 = (ly - grow).floor().max(0.0);
    let x1 = (hx + grow).ceil().min(buf_w as f32 - 1.0);
    let y1 = (hy + grow).ceil().min(buf_h as f32 - 1.0);
    if x0 > x1 || y0 > y1 {
        return None;
    }
    Some((x0 as usize, y0 as usize, x1 as usize, y1 as usize))
}

/// Measured in f64: a finite but far-off endpoint (say 1e20) would overflow
/// the squared length in f32 and collapse the segment to its first point.
#[inline]
fn distance_to_segment(p: Point, a: Point, b: Point) -> f32 {
    let (ax, ay) = (a.x as f64, a.y as f64);
    let (abx, aby) = (b.x as f64 - ax, b.y as f64 - ay);
    let (apx, apy) = (p.x as f64 - ax, p.y as f64 - ay);
    let len2 = abx * abx + aby * aby;
    let t = if len2 > 0.0 {
        ((apx * abx + apy * aby) / len2).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let (dx, dy) = (apx - t * abx, apy - t * aby);
    (dx * dx + dy * dy).sqrt() as f32
}
