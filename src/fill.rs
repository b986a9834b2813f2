// Paint-bucket flood fill: exact color match, 4-connected, breadth-first.
// The result is recorded as a patch (the indices that changed) so it can be
// replayed onto a rebuilt buffer without searching again.

use std::collections::VecDeque;

use crate::error::{CanvasError, Result};
use crate::pixel_buffer::PixelBuffer;
use crate::types::{Point, Rgba};

/// Pixels one fill replaced, in visit order, plus the color they became.
/// Indices are u32: a buffer never holds more than `u32::MAX` pixels, and a
/// big fill kept in history costs half the memory of usize indices.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FillPatch {
    pub seed: (i64, i64),
    pub color: Rgba,
    pub indices: Vec<u32>,
}

impl FillPatch {
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Stamp the patch onto a buffer of the same size.
    pub fn apply(&self, buffer: &mut PixelBuffer) {
        let pixels = buffer.pixels_mut();
        for &i in &self.indices {
            if let Some(p) = pixels.get_mut(i as usize) {
                *p = self.color;
            }
        }
    }
}

/// Replace the region around `seed` that has exactly the seed's color.
///
/// The seed is rounded to the nearest pixel. Returns `Ok(None)` when the seed
/// already has `color` (nothing to do). The buffer is only written once the
/// whole region is known, so callers never see a partial fill.
pub fn flood_fill(buffer: &mut PixelBuffer, seed: Point, color: Rgba) -> Result<Option<FillPatch>> {
    let (sx, sy) = seed.to_pixel();
    let start = buffer
        .index_of(sx, sy)
        .ok_or(CanvasError::OutOfBounds { x: sx, y: sy })?;

    let target = buffer.pixels()[start];
    if target == color {
        log::trace!("fill at ({sx}, {sy}) is a no-op, already {color}");
        return Ok(None);
    }

    let indices = region(buffer, start, target);
    let patch = FillPatch { seed: (sx, sy), color, indices };
    patch.apply(buffer);
    log::trace!("filled {} pixels from ({sx}, {sy}) with {color}", patch.len());
    Ok(Some(patch))
}

/// Breadth-first walk over 4-neighbours whose color is exactly `target`.
/// Neighbour order is right, left, down, up.
fn region(buffer: &PixelBuffer, start: usize, target: Rgba) -> Vec<u32> {
    let w = buffer.width();
    let h = buffer.height();
    let pixels = buffer.pixels();

    // visited doubles as "already queued"; each pixel enters the queue once
    let mut visited = vec![false; pixels.len()];
    let mut queue = VecDeque::new();
    let mut out = Vec::new();

    visited[start] = true;
    queue.push_back(start);

    while let Some(i) = queue.pop_front() {
        out.push(i as u32);
        let (x, y) = (i % w, i / w);

        let mut visit = |n: usize| {
            if !visited[n] && pixels[n] == target {
                visited[n] = true;
                queue.push_back(n);
            }
        };
        if x + 1 < w {
            visit(i + 1);
        }
        if x > 0 {
            visit(i - 1);
        }
        if y + 1 < h {
            visit(i + w);
        }
        if y > 0 {
            visit(i - w);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    const RED: Rgba = Rgba::opaque(255, 0, 0);
    const BLUE: Rgba = Rgba::opaque(0, 0, 255);

    fn solid(w: i64, h: i64, color: Rgba) -> PixelBuffer {
        let mut buf = PixelBuffer::new(w, h).unwrap();
        buf.fill_all(color);
        buf
    }

    #[test]
    fn fills_whole_uniform_buffer() {
        let mut buf = solid(10, 10, RED);
        let patch = flood_fill(&mut buf, Point::new(5.0, 5.0), BLUE).unwrap().unwrap();
        assert_eq!(patch.len(), 100);
        assert_eq!(patch.indices[0], 55);
        assert!(buf.pixels().iter().all(|p| *p == BLUE));

        // second call touches nothing
        let again = flood_fill(&mut buf, Point::new(5.0, 5.0), BLUE).unwrap();
        assert!(again.is_none());
    }

    #[test]
    fn stops_at_a_wall() {
        // column 2 is a black wall splitting the buffer
        let mut buf = solid(5, 3, Rgba::WHITE);
        for y in 0..3 {
            buf.set(2, y, Rgba::BLACK).unwrap();
        }
        let patch = flood_fill(&mut buf, Point::new(0.0, 0.0), RED).unwrap().unwrap();
        assert_eq!(patch.len(), 6);
        for y in 0..3 {
            assert_eq!(buf.get(1, y).unwrap(), RED);
            assert_eq!(buf.get(2, y).unwrap(), Rgba::BLACK);
            assert_eq!(buf.get(3, y).unwrap(), Rgba::WHITE);
        }
    }

    #[test]
    fn diagonal_neighbours_do_not_connect() {
        // white at (0,0) and (1,1) touch only at a corner
        let mut buf = solid(2, 2, Rgba::BLACK);
        buf.set(0, 0, Rgba::WHITE).unwrap();
        buf.set(1, 1, Rgba::WHITE).unwrap();
        let patch = flood_fill(&mut buf, Point::new(0.0, 0.0), BLUE).unwrap().unwrap();
        assert_eq!(patch.indices, vec![0]);
        assert_eq!(buf.get(1, 1).unwrap(), Rgba::WHITE);
    }

    #[test]
    fn exact_match_only() {
        // an almost-white pixel is a boundary
        let mut buf = solid(3, 1, Rgba::WHITE);
        buf.set(1, 0, Rgba::opaque(254, 255, 255)).unwrap();
        let patch = flood_fill(&mut buf, Point::new(0.0, 0.0), RED).unwrap().unwrap();
        assert_eq!(patch.len(), 1);
        assert_eq!(buf.get(2, 0).unwrap(), Rgba::WHITE);
    }

    #[test]
    fn seed_is_rounded_and_bounds_checked() {
        let mut buf = solid(4, 4, Rgba::WHITE);
        assert_eq!(
            flood_fill(&mut buf, Point::new(3.6, 0.0), RED),
            Err(CanvasError::OutOfBounds { x: 4, y: 0 })
        );
        assert!(buf.pixels().iter().all(|p| *p == Rgba::WHITE));

        let patch = flood_fill(&mut buf, Point::new(3.4, 0.2), RED).unwrap().unwrap();
        assert_eq!(patch.seed, (3, 0));
    }

    #[test]
    fn deterministic_visit_order() {
        let mut a = solid(6, 4, Rgba::WHITE);
        let mut b = a.clone();
        let pa = flood_fill(&mut a, Point::new(2.0, 1.0), RED).unwrap().unwrap();
        let pb = flood_fill(&mut b, Point::new(2.0, 1.0), RED).unwrap().unwrap();
        assert_eq!(pa.indices, pb.indices);

        let mut sorted = pa.indices.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), 24, "every pixel visited exactly once");
    }

    #[test]
    fn patch_replays_onto_fresh_copy() {
        let mut buf = solid(5, 5, Rgba::WHITE);
        buf.set(2, 2, Rgba::BLACK).unwrap();
        let before = buf.clone();
        let patch = flood_fill(&mut buf, Point::new(0.0, 0.0), BLUE).unwrap().unwrap();

        let mut replay = before;
        patch.apply(&mut replay);
        assert_eq!(replay, buf);
    }
}
