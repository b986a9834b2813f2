// Canvas errors, hand-written so the core pulls in no error crates.
// A call that returns one of these has left the canvas exactly as it was.
use std::fmt::{self, Display};

#[derive(Debug, Clone, PartialEq)]
pub enum CanvasError {
    InvalidDimensions { width: i64, height: i64 }, // resize with a zero/negative/oversized extent
    OutOfBounds { x: i64, y: i64 },                // pixel access or fill seed off the buffer
    AlreadyRecording,                              // a gesture is already in progress
    NotRecording,                                  // extend/finish without a gesture
    InvalidWidth(f32),                             // brush width not finite and > 0
    NonFinitePoint,                                // NaN or infinite pointer coordinate
}

impl Display for CanvasError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CanvasError::InvalidDimensions { width, height } => {
                write!(f, "invalid canvas dimensions {width}x{height}")
            }
            CanvasError::OutOfBounds { x, y } => write!(f, "pixel ({x}, {y}) is outside the canvas"),
            CanvasError::AlreadyRecording => write!(f, "a stroke is already being recorded"),
            CanvasError::NotRecording => write!(f, "no stroke is being recorded"),
            CanvasError::InvalidWidth(w) => write!(f, "stroke width must be positive, got {w}"),
            CanvasError::NonFinitePoint => write!(f, "pointer coordinate is not finite"),
        }
    }
}

impl std::error::Error for CanvasError {}

pub type Result<T> = std::result::Result<T, CanvasError>;
