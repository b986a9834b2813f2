// Host-side failures. Canvas misuse never ends up here; the main loop logs
// those and keeps going.
use std::fmt::{self, Display};

#[derive(Debug)]
pub enum Error {
    WindowInit(String),   // Creating the window failed
    WindowUpdate(String), // Pushing a frame to the window failed
    Config(String),       // Reading/parsing/validating the config file failed
    Save(String),         // Writing a PNG snapshot failed
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::WindowInit(s) => write!(f, "Window init error: {s}"),
            Error::WindowUpdate(s) => write!(f, "Window update error: {s}"),
            Error::Config(s) => write!(f, "Config error: {s}"),
            Error::Save(s) => write!(f, "Save error: {s}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<freehand::CanvasError> for Error {
    fn from(e: freehand::CanvasError) -> Self {
        // only reachable while setting up the canvas for a new window size
        Error::WindowInit(format!("canvas: {e}"))
    }
}
