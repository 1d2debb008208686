//! Font resolution and text outlines
//!
//! The primary font is a scalable outline font, looked up first as a file and
//! then in the system font database. When neither works the built-in bitmap
//! font is used instead. Resolution never fails.

use std::path::{Path, PathBuf};

use tiny_skia::PathBuilder;
use ttf_parser::{Face, GlyphId, OutlineBuilder};
use usvg::fontdb;

use super::bitmap_font;
use crate::settings::Settings;

/// Where outline fonts are looked up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontSource {
    pub path: PathBuf,
    pub family: String,
    pub system_fonts: bool,
}

impl FontSource {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            path: settings.font_path.clone(),
            family: settings.font_family.clone(),
            system_fonts: settings.system_fonts,
        }
    }

    /// Resolve a font at `px_size`, falling back to the bitmap font
    pub fn resolve(&self, px_size: f32) -> GlyphFont {
        match self.load_outline(px_size) {
            Some(font) => font,
            None => {
                tracing::warn!(
                    path = %self.path.display(),
                    family = %self.family,
                    "Outline font unavailable, using built-in bitmap font"
                );
                GlyphFont::Bitmap
            }
        }
    }

    fn load_outline(&self, px_size: f32) -> Option<GlyphFont> {
        if let Some(font) = OutlineFont::from_file(&self.path, px_size) {
            tracing::debug!(path = %self.path.display(), px_size, "Loaded font file");
            return Some(GlyphFont::Outline(font));
        }

        if !self.system_fonts {
            return None;
        }

        let font = OutlineFont::from_system(&self.family, px_size)?;
        tracing::debug!(family = %self.family, px_size, "Loaded system font");
        Some(GlyphFont::Outline(font))
    }
}

/// A resolved font ready to lay out text
#[derive(Debug, Clone)]
pub enum GlyphFont {
    Outline(OutlineFont),
    /// Fixed-size fallback, see [`bitmap_font`]
    Bitmap,
}

impl GlyphFont {
    pub fn is_fallback(&self) -> bool {
        matches!(self, GlyphFont::Bitmap)
    }

    /// Lay out `text` as a single fill path
    ///
    /// Returns `None` when the text produces no ink.
    pub fn text_path(&self, text: &str) -> Option<tiny_skia::Path> {
        match self {
            GlyphFont::Outline(font) => font.text_path(text),
            GlyphFont::Bitmap => bitmap_font::text_path(text),
        }
    }
}

/// Font file bytes plus the pixel size to render at
#[derive(Clone)]
pub struct OutlineFont {
    data: Vec<u8>,
    index: u32,
    px_size: f32,
}

impl std::fmt::Debug for OutlineFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutlineFont")
            .field("bytes", &self.data.len())
            .field("index", &self.index)
            .field("px_size", &self.px_size)
            .finish()
    }
}

impl OutlineFont {
    /// Wrap raw font bytes, rejecting anything ttf-parser cannot read
    pub fn from_data(data: Vec<u8>, index: u32, px_size: f32) -> Option<Self> {
        if let Err(e) = Face::parse(&data, index) {
            tracing::debug!(error = %e, "Font data rejected");
            return None;
        }
        Some(Self {
            data,
            index,
            px_size,
        })
    }

    fn from_file(path: &Path, px_size: f32) -> Option<Self> {
        let data = match std::fs::read(path) {
            Ok(data) => data,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "Font file not readable");
                return None;
            }
        };
        Self::from_data(data, 0, px_size)
    }

    fn from_system(family: &str, px_size: f32) -> Option<Self> {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();

        let families = [fontdb::Family::Name(family)];
        let query = fontdb::Query {
            families: &families,
            weight: fontdb::Weight::BOLD,
            ..fontdb::Query::default()
        };
        let id = db.query(&query)?;
        let (data, index) = db.with_face_data(id, |data, index| (data.to_vec(), index))?;
        Self::from_data(data, index, px_size)
    }

    /// Outline of `text` with the origin at the pen start on the ascender line
    fn text_path(&self, text: &str) -> Option<tiny_skia::Path> {
        let face = Face::parse(&self.data, self.index).ok()?;
        let scale = self.px_size / f32::from(face.units_per_em());

        let mut sink = PathSink {
            builder: PathBuilder::new(),
            scale,
            ascent: f32::from(face.ascender()),
            pen_x: 0.0,
        };

        for c in text.chars() {
            let glyph = face.glyph_index(c).unwrap_or(GlyphId(0));
            face.outline_glyph(glyph, &mut sink);
            let advance = face.glyph_hor_advance(glyph).unwrap_or(0);
            sink.pen_x += f32::from(advance) * scale;
        }

        sink.builder.finish()
    }
}

/// Feeds font outlines into a tiny-skia path, flipping to y-down pixels
///
/// y = 0 is the ascender line, so ink of a capital starts below it.
struct PathSink {
    builder: PathBuilder,
    scale: f32,
    ascent: f32,
    pen_x: f32,
}

impl PathSink {
    fn map(&self, x: f32, y: f32) -> (f32, f32) {
        (self.pen_x + x * self.scale, (self.ascent - y) * self.scale)
    }
}

impl OutlineBuilder for PathSink {
    fn move_to(&mut self, x: f32, y: f32) {
        let (x, y) = self.map(x, y);
        self.builder.move_to(x, y);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let (x, y) = self.map(x, y);
        self.builder.line_to(x, y);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        let (x1, y1) = self.map(x1, y1);
        let (x, y) = self.map(x, y);
        self.builder.quad_to(x1, y1, x, y);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        let (x1, y1) = self.map(x1, y1);
        let (x2, y2) = self.map(x2, y2);
        let (x, y) = self.map(x, y);
        self.builder.cubic_to(x1, y1, x2, y2, x, y);
    }

    fn close(&mut self) {
        self.builder.close();
    }
}
