//! Freehand drawing core: an in-memory raster canvas with antialiased
//! pen/eraser strokes, an exact-color flood fill and undo/redo history.
//!
//! The host feeds pointer input in canvas-local coordinates and reads back
//! either a live [`PixelBuffer`] frame or a flattened RGB snapshot.
//!
//! ```
//! use freehand::{Brush, Canvas, Point, Rgba};
//!
//! let mut canvas = Canvas::new(10, 10).unwrap();
//! canvas.begin_stroke(Point::new(0.0, 0.0), Brush::pen(Rgba::BLACK, 1.0)).unwrap();
//! canvas.extend_stroke(Point::new(9.0, 0.0)).unwrap();
//! canvas.end_stroke().unwrap();
//! assert_eq!(canvas.snapshot().get_pixel(4, 0).0, [0, 0, 0]);
//!
//! canvas.undo();
//! assert_eq!(canvas.snapshot().get_pixel(4, 0).0, [255, 255, 255]);
//! ```

pub mod canvas;
pub mod compose;
pub mod error;
pub mod fill;
pub mod history;
pub mod pixel_buffer;
pub mod stroke;
pub mod types;

pub use canvas::{Canvas, Phase};
pub use error::CanvasError;
pub use fill::FillPatch;
pub use history::{Edit, HistoryStack};
pub use pixel_buffer::{DEFAULT_MAX_DIMENSION, PixelBuffer};
pub use stroke::{Stroke, StrokeRecorder};
pub use types::{Brush, Point, Rgba, StrokeMode};
