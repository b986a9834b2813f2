// Everything the window host needs that the canvas core doesn't.

pub mod config;
pub mod draw;
pub mod error;
pub mod save;
pub mod tools;
