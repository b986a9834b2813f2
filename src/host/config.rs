// Host settings: window size, brush defaults, palette, where saves go.
// Read from the JSON file named by $FREEHAND_CONFIG; every field is optional.

use std::path::{Path, PathBuf};

use freehand::Rgba;
use serde::Deserialize;

use super::error::Error;

pub const CONFIG_ENV: &str = "FREEHAND_CONFIG";

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct HostConfig {
    /// Initial window size in pixels.
    pub width: usize,
    pub height: usize,
    /// Largest canvas side accepted on resize.
    pub max_dimension: u32,
    /// Starting pen width, and the range `[`/`]` can move it in.
    pub stroke_width: f32,
    pub min_stroke_width: f32,
    pub max_stroke_width: f32,
    pub width_step: f32,
    /// The eraser is drawn this many times wider than the pen.
    pub eraser_scale: f32,
    /// `#RRGGBB` or `#RRGGBBAA`; keys 1-9 pick the first nine entries.
    pub palette: Vec<String>,
    pub save_dir: PathBuf,
    /// Name for saved artworks (sanitised, `_1`, `_2`... on collision).
    /// Unset means a timestamped `artwork_YYYYmmdd_HHMMSS` name.
    pub artwork_name: Option<String>,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            max_dimension: freehand::DEFAULT_MAX_DIMENSION,
            stroke_width: 20.0,
            min_stroke_width: 10.0,
            max_stroke_width: 120.0,
            width_step: 5.0,
            eraser_scale: 2.5,
            palette: [
                "#000000", // black
                "#FF0000", // red
                "#0000FF", // blue
                "#00FF00", // green
                "#FFFF00", // yellow
                "#FF9800", // orange
                "#9C27B0", // purple
                "#E91E63", // pink
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            save_dir: PathBuf::from("artworks"),
            artwork_name: None,
        }
    }
}

impl HostConfig {
    /// Defaults, overridden by the file in $FREEHAND_CONFIG when set.
    pub fn load() -> Result<Self, Error> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::from_file(Path::new(&path)),
            None => {
                log::info!("{CONFIG_ENV} not set, using default configuration");
                Ok(Self::default())
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, Error> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("read {}: {e}", path.display())))?;
        let cfg = Self::from_json(&text)?;
        log::info!("configuration loaded from {}", path.display());
        Ok(cfg)
    }

    pub fn from_json(text: &str) -> Result<Self, Error> {
        let cfg: Self =
            serde_json::from_str(text).map_err(|e| Error::Config(format!("parse: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> Result<(), Error> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::Config("window width and height must be positive".into()));
        }
        if !(self.min_stroke_width > 0.0 && self.min_stroke_width <= self.max_stroke_width) {
            return Err(Error::Config(format!(
                "stroke width range {}..{} is empty or non-positive",
                self.min_stroke_width, self.max_stroke_width
            )));
        }
        if !(self.eraser_scale > 0.0) {
            return Err(Error::Config(format!("eraser_scale must be positive, got {}", self.eraser_scale)));
        }
        if self.palette.is_empty() {
            return Err(Error::Config("palette needs at least one color".into()));
        }
        self.palette_colors().map(|_| ())
    }

    pub fn palette_colors(&self) -> Result<Vec<Rgba>, Error> {
        self.palette
            .iter()
            .map(|s| Rgba::from_hex(s).ok_or_else(|| Error::Config(format!("bad palette color {s:?}"))))
            .collect()
    }
}
