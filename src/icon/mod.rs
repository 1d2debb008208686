//! Icon generation
//!
//! Draws the letter "V" on two 1024x1024 canvases:
//! - `app_icon.png`: orange background, dark orange drop shadow, white letter
//! - `app_icon_foreground.png`: transparent background, white letter only
//!
//! Every routine resolves its own font and owns its own canvas.

mod bitmap_font;
mod canvas;
mod font;

use std::path::{Path, PathBuf};

use thiserror::Error;

use canvas::{Canvas, GlyphPlacement, TextShape};
use font::FontSource;

use crate::settings::Settings;

pub const ICON_SIZE: u32 = 1024;
pub const GLYPH: &str = "V";

/// Raise the glyph above true center to balance its visual weight
pub const VERTICAL_LIFT: f32 = 50.0;

pub const APP_ICON_FONT_SIZE: f32 = 600.0;
pub const FOREGROUND_FONT_SIZE: f32 = 500.0;

pub const BACKGROUND_COLOR: (u8, u8, u8) = (0xff, 0x50, 0x01);
pub const SHADOW_COLOR: (u8, u8, u8) = (0xcc, 0x40, 0x01);
pub const GLYPH_COLOR: (u8, u8, u8) = (0xff, 0xff, 0xff);
pub const SHADOW_OFFSET: (f32, f32) = (8.0, 8.0);

pub const APP_ICON_FILE: &str = "app_icon.png";
pub const FOREGROUND_FILE: &str = "app_icon_foreground.png";

/// Errors that can occur while producing icon files
#[derive(Debug, Error)]
pub enum IconError {
    #[error("I/O error at {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode {}", .path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Cannot allocate a {0}x{0} canvas")]
    Canvas(u32),

    #[error("Invalid settings file {}: {message}", .path.display())]
    Config { path: PathBuf, message: String },
}

impl IconError {
    fn from_image(path: &Path, err: image::ImageError) -> Self {
        match err {
            image::ImageError::IoError(source) => IconError::Io {
                path: path.to_path_buf(),
                source,
            },
            source => IconError::Encode {
                path: path.to_path_buf(),
                source,
            },
        }
    }
}

/// Paths written by a full run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedIcons {
    pub app_icon: PathBuf,
    pub foreground: PathBuf,
}

pub struct IconGenerator {
    output_dir: PathBuf,
    fonts: FontSource,
}

impl IconGenerator {
    pub fn new(settings: &Settings) -> Self {
        Self {
            output_dir: settings.output_dir.clone(),
            fonts: FontSource::from_settings(settings),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Create the output directory and any missing parents
    pub fn prepare_output_dir(&self) -> Result<(), IconError> {
        std::fs::create_dir_all(&self.output_dir).map_err(|source| IconError::Io {
            path: self.output_dir.clone(),
            source,
        })
    }

    /// Write both icons. No rollback: a failure in the second leaves the first.
    pub fn generate_all(&self) -> Result<GeneratedIcons, IconError> {
        self.prepare_output_dir()?;
        let app_icon = self.create_app_icon()?;
        let foreground = self.create_adaptive_icon_foreground()?;
        Ok(GeneratedIcons {
            app_icon,
            foreground,
        })
    }

    /// Opaque icon with a drop-shadowed letter
    pub fn create_app_icon(&self) -> Result<PathBuf, IconError> {
        let mut canvas = Canvas::opaque(ICON_SIZE, BACKGROUND_COLOR)?;
        let font = self.fonts.resolve(APP_ICON_FONT_SIZE);

        if let Some(shape) = TextShape::layout(&font, GLYPH) {
            let placement = place(&shape);
            canvas.draw_text(&shape, placement, SHADOW_OFFSET, SHADOW_COLOR);
            canvas.draw_text(&shape, placement, (0.0, 0.0), GLYPH_COLOR);
        }

        self.save(&canvas, APP_ICON_FILE)
    }

    /// Transparent adaptive-icon foreground, letter only
    pub fn create_adaptive_icon_foreground(&self) -> Result<PathBuf, IconError> {
        let mut canvas = Canvas::transparent(ICON_SIZE)?;
        let font = self.fonts.resolve(FOREGROUND_FONT_SIZE);

        if let Some(shape) = TextShape::layout(&font, GLYPH) {
            canvas.draw_text(&shape, place(&shape), (0.0, 0.0), GLYPH_COLOR);
        }

        self.save(&canvas, FOREGROUND_FILE)
    }

    fn save(&self, canvas: &Canvas, file_name: &str) -> Result<PathBuf, IconError> {
        let path = self.output_dir.join(file_name);
        canvas.save_png(&path)?;

        tracing::info!(
            path = %path.display(),
            side = canvas.side(),
            background = ?canvas.background(),
            "Wrote icon"
        );
        println!("[OK] Created {}", path.display());
        Ok(path)
    }
}

fn place(shape: &TextShape) -> GlyphPlacement {
    let placement =
        GlyphPlacement::center(ICON_SIZE, shape.width(), shape.height(), VERTICAL_LIFT);
    let (ink_x, ink_y) = shape.ink_offset();
    tracing::debug!(
        width = shape.width(),
        height = shape.height(),
        ink_x,
        ink_y,
        x = placement.x,
        y = placement.y,
        "Placed glyph"
    );
    placement
}
