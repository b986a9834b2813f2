// End-to-end behaviour of the canvas through its public operations.

use freehand::{Brush, Canvas, CanvasError, Point, Rgba};
use test_log::test;

const RED: Rgba = Rgba::opaque(255, 0, 0);
const BLUE: Rgba = Rgba::opaque(0, 0, 255);
const GREEN: Rgba = Rgba::opaque(0, 200, 0);

/// Deterministic xorshift32 so "random" drawings are the same every run.
struct Rng32 {
    state: u32,
}

impl Rng32 {
    fn from_seed(seed: u32) -> Self {
        Self { state: seed | 1 }
    }

    fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    fn range(&mut self, min: f32, max: f32) -> f32 {
        let unit = (self.next_u32() >> 8) as f32 / (1u32 << 24) as f32;
        min + (max - min) * unit
    }
}

fn line(canvas: &mut Canvas, points: &[(f32, f32)], brush: Brush) {
    let (x, y) = points[0];
    canvas.begin_stroke(Point::new(x, y), brush).unwrap();
    for &(x, y) in &points[1..] {
        canvas.extend_stroke(Point::new(x, y)).unwrap();
    }
    canvas.end_stroke().unwrap();
}

/// A mix of pens, erasers and fills scattered over the canvas.
fn scribble(canvas: &mut Canvas, rng: &mut Rng32, edits: usize) {
    let (w, h) = (canvas.width() as f32, canvas.height() as f32);
    let palette = [RED, BLUE, GREEN, Rgba::new(20, 20, 20, 140)];
    for _ in 0..edits {
        match rng.next_u32() % 5 {
            0 => {
                let seed = Point::new(rng.range(0.0, w - 1.0), rng.range(0.0, h - 1.0));
                let color = palette[(rng.next_u32() % 4) as usize];
                canvas.fill(seed, color).unwrap();
            }
            kind => {
                let n = 1 + (rng.next_u32() % 6) as usize;
                let pts: Vec<(f32, f32)> = (0..n)
                    .map(|_| (rng.range(-4.0, w + 4.0), rng.range(-4.0, h + 4.0)))
                    .collect();
                let width = rng.range(0.5, 7.0);
                let brush = if kind == 1 {
                    Brush::eraser(width)
                } else {
                    Brush::pen(palette[(rng.next_u32() % 4) as usize], width)
                };
                line(canvas, &pts, brush);
            }
        }
    }
}

fn all_white(canvas: &Canvas) -> bool {
    canvas.snapshot().pixels().all(|p| p.0 == [255, 255, 255])
}

#[test]
fn uniform_red_buffer_fills_blue_then_noops() {
    let mut canvas = Canvas::new(10, 10).unwrap();
    canvas.paint(RED).unwrap();

    assert_eq!(canvas.fill(Point::new(5.0, 5.0), BLUE), Ok(100));
    assert!(canvas.buffer().pixels().iter().all(|p| *p == BLUE));

    let before = canvas.buffer().clone();
    let undo_depth = canvas.history().undo_len();
    assert_eq!(canvas.fill(Point::new(5.0, 5.0), BLUE), Ok(0));
    assert_eq!(canvas.buffer(), &before);
    assert_eq!(canvas.history().undo_len(), undo_depth);
}

#[test]
fn pen_line_on_row_zero_then_undo() {
    let mut canvas = Canvas::new(10, 10).unwrap();
    line(&mut canvas, &[(0.0, 0.0), (9.0, 0.0)], Brush::pen(BLUE, 1.0));

    let snap = canvas.snapshot();
    for x in 0..10 {
        assert_eq!(snap.get_pixel(x, 0).0, [0, 0, 255]);
        for y in 1..10 {
            assert_eq!(snap.get_pixel(x, y).0, [255, 255, 255]);
        }
    }

    assert!(canvas.undo());
    assert!(all_white(&canvas));
}

#[test]
fn live_buffer_matches_replay() {
    let mut rng = Rng32::from_seed(0xC0FFEE);
    let mut canvas = Canvas::new(48, 32).unwrap();
    for round in 0..6 {
        scribble(&mut canvas, &mut rng, 8);
        assert_eq!(canvas.buffer(), &canvas.replay(), "diverged after round {round}");
        if round % 2 == 1 {
            canvas.undo();
            canvas.undo();
            assert_eq!(canvas.buffer(), &canvas.replay());
            canvas.redo();
            assert_eq!(canvas.buffer(), &canvas.replay());
        }
    }
}

#[test]
fn undo_then_redo_restores_the_commit() {
    let mut rng = Rng32::from_seed(7);
    let mut canvas = Canvas::new(32, 32).unwrap();
    scribble(&mut canvas, &mut rng, 10);

    for brush in [Brush::pen(RED, 5.0), Brush::eraser(9.0)] {
        line(&mut canvas, &[(3.0, 3.0), (20.0, 25.0), (28.0, 4.0)], brush);
        let committed = canvas.buffer().clone();

        assert!(canvas.undo());
        assert!(canvas.redo());
        assert_eq!(canvas.buffer(), &committed);
    }

    canvas.fill(Point::new(0.0, 31.0), GREEN).unwrap();
    let committed = canvas.buffer().clone();
    canvas.undo();
    canvas.redo();
    assert_eq!(canvas.buffer(), &committed);
}

#[test]
fn new_commit_discards_redo() {
    let mut canvas = Canvas::new(12, 12).unwrap();
    line(&mut canvas, &[(0.0, 0.0), (11.0, 11.0)], Brush::pen(RED, 2.0));
    canvas.undo();
    line(&mut canvas, &[(0.0, 11.0), (11.0, 0.0)], Brush::pen(BLUE, 2.0));

    let before = canvas.buffer().clone();
    assert!(!canvas.can_redo());
    assert!(!canvas.redo());
    assert_eq!(canvas.buffer(), &before);
    assert_eq!(canvas.history().undo_len(), 1);
}

#[test]
fn empty_history_undo_redo_are_noops() {
    let mut canvas = Canvas::new(5, 5).unwrap();
    assert!(!canvas.can_undo());
    assert!(!canvas.undo());
    assert!(!canvas.redo());
    assert!(all_white(&canvas));
}

#[test]
fn fill_stays_inside_its_region() {
    let mut canvas = Canvas::new(20, 20).unwrap();
    // a closed box: four opaque lines
    let wall = Brush::pen(Rgba::BLACK, 2.0);
    line(&mut canvas, &[(5.0, 5.0), (14.0, 5.0), (14.0, 14.0), (5.0, 14.0), (5.0, 5.0)], wall);
    let before = canvas.buffer().clone();
    let seed_color = canvas.pixel(10, 10).unwrap();

    let touched = canvas.fill(Point::new(10.0, 10.0), RED).unwrap();
    assert!(touched > 0);

    let after = canvas.buffer();
    let mut changed = 0;
    for (i, (b, a)) in before.pixels().iter().zip(after.pixels()).enumerate() {
        if b != a {
            changed += 1;
            assert_eq!(*b, seed_color, "pixel {i} did not have the seed color");
            let (x, y) = (i % 20, i / 20);
            assert!((6..14).contains(&x) && (6..14).contains(&y), "fill leaked to ({x}, {y})");
        }
    }
    assert_eq!(changed, touched);
    // outside the box is still white
    assert_eq!(canvas.pixel(0, 0).unwrap(), Rgba::WHITE);
    assert_eq!(canvas.pixel(19, 19).unwrap(), Rgba::WHITE);
}

#[test]
fn erased_area_flattens_white_and_fills_solid() {
    let mut canvas = Canvas::new(16, 16).unwrap();
    canvas.paint(RED).unwrap();
    line(&mut canvas, &[(8.0, 0.0), (8.0, 15.0)], Brush::eraser(3.0));

    assert_eq!(canvas.pixel(8, 8).unwrap(), Rgba::TRANSPARENT);
    assert_eq!(canvas.snapshot().get_pixel(8, 8).0, [255, 255, 255]);

    let touched = canvas.fill(Point::new(8.0, 8.0), BLUE).unwrap();
    assert_eq!(touched, 16 * 3);
    assert_eq!(canvas.pixel(8, 8).unwrap(), BLUE);
    assert_eq!(canvas.snapshot().get_pixel(8, 8).0, [0, 0, 255]);
    assert_eq!(canvas.pixel(5, 5).unwrap(), RED);
}

#[test]
fn errors_leave_everything_as_it_was() {
    let mut canvas = Canvas::new(8, 8).unwrap();
    line(&mut canvas, &[(1.0, 1.0), (6.0, 6.0)], Brush::pen(RED, 2.0));
    canvas.undo();
    let before = canvas.buffer().clone();

    assert!(matches!(canvas.resize(-1, 8), Err(CanvasError::InvalidDimensions { .. })));
    assert_eq!(canvas.fill(Point::new(8.4, 0.0), RED), Err(CanvasError::OutOfBounds { x: 8, y: 0 }));
    assert_eq!(
        canvas.begin_stroke(Point::new(1.0, 1.0), Brush::pen(RED, -2.0)),
        Err(CanvasError::InvalidWidth(-2.0))
    );
    assert_eq!(canvas.end_stroke(), Err(CanvasError::NotRecording));

    assert_eq!(canvas.buffer(), &before);
    assert!(canvas.can_redo());
}
