//! Square raster canvas, glyph placement and PNG output

use std::path::Path;

use image::{ImageFormat, RgbImage, RgbaImage};
use tiny_skia::{Color, FillRule, Paint, Pixmap, Rect, Transform};

use super::font::GlyphFont;
use super::IconError;

/// Text laid out under a font
///
/// The path origin is the text origin: pen start on the ascender line.
/// `bounds` is the tight ink box measured from that origin.
#[derive(Debug, Clone)]
pub struct TextShape {
    path: tiny_skia::Path,
    bounds: Rect,
    anti_alias: bool,
}

impl TextShape {
    /// Returns `None` when the text has no ink (empty or blank)
    pub fn layout(font: &GlyphFont, text: &str) -> Option<Self> {
        // bitmap cells stay crisp
        Self::from_path(font.text_path(text)?, !font.is_fallback())
    }

    fn from_path(path: tiny_skia::Path, anti_alias: bool) -> Option<Self> {
        let bounds = path.compute_tight_bounds()?;
        Some(Self {
            path,
            bounds,
            anti_alias,
        })
    }

    pub fn width(&self) -> f32 {
        self.bounds.width()
    }

    pub fn height(&self) -> f32 {
        self.bounds.height()
    }

    /// Offset of the ink box from the text origin
    pub fn ink_offset(&self) -> (f32, f32) {
        (self.bounds.left(), self.bounds.top())
    }
}

/// Where the text origin goes on the canvas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphPlacement {
    pub x: f32,
    pub y: f32,
}

impl GlyphPlacement {
    /// Center a `width` x `height` ink box, then raise it by `lift` pixels
    ///
    /// The result is used as the text origin, so the ink lands further
    /// right and down by its own offset from that origin.
    pub fn center(canvas_side: u32, width: f32, height: f32, lift: f32) -> Self {
        let side = canvas_side as f32;
        Self {
            x: (side - width) / 2.0,
            y: (side - height) / 2.0 - lift,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Background {
    Opaque,
    Transparent,
}

pub struct Canvas {
    pixmap: Pixmap,
    background: Background,
}

impl Canvas {
    /// Fully opaque canvas, saved without an alpha channel
    pub fn opaque(side: u32, color: (u8, u8, u8)) -> Result<Self, IconError> {
        let mut pixmap = Pixmap::new(side, side).ok_or(IconError::Canvas(side))?;
        pixmap.fill(Color::from_rgba8(color.0, color.1, color.2, 255));
        Ok(Self {
            pixmap,
            background: Background::Opaque,
        })
    }

    /// Fully transparent canvas, saved with an alpha channel
    pub fn transparent(side: u32) -> Result<Self, IconError> {
        let pixmap = Pixmap::new(side, side).ok_or(IconError::Canvas(side))?;
        Ok(Self {
            pixmap,
            background: Background::Transparent,
        })
    }

    pub fn side(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn background(&self) -> Background {
        self.background
    }

    /// Fill `text` with its origin at `placement` shifted by `offset`
    pub fn draw_text(
        &mut self,
        text: &TextShape,
        placement: GlyphPlacement,
        offset: (f32, f32),
        color: (u8, u8, u8),
    ) {
        let mut paint = Paint::default();
        paint.set_color_rgba8(color.0, color.1, color.2, 255);
        paint.anti_alias = text.anti_alias;

        let transform = Transform::from_translate(
            placement.x + offset.0,
            placement.y + offset.1,
        );
        self.pixmap
            .fill_path(&text.path, &paint, FillRule::Winding, transform, None);
    }

    /// Straight-alpha RGBA value at `(x, y)`
    #[cfg(test)]
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.side() || y >= self.side() {
            return None;
        }
        let c = self.pixmap.pixel(x, y)?.demultiply();
        Some([c.red(), c.green(), c.blue(), c.alpha()])
    }

    /// Encode as PNG, replacing any existing file
    pub fn save_png(&self, path: &Path) -> Result<(), IconError> {
        let result = match self.background {
            Background::Opaque => self.to_rgb_image().save_with_format(path, ImageFormat::Png),
            Background::Transparent => {
                self.to_rgba_image().save_with_format(path, ImageFormat::Png)
            }
        };
        result.map_err(|e| IconError::from_image(path, e))
    }

    fn to_rgb_image(&self) -> RgbImage {
        let side = self.side();
        let mut img = RgbImage::new(side, side);
        for (dst, src) in img.pixels_mut().zip(self.pixmap.pixels()) {
            let c = src.demultiply();
            *dst = image::Rgb([c.red(), c.green(), c.blue()]);
        }
        img
    }

    fn to_rgba_image(&self) -> RgbaImage {
        let side = self.side();
        let mut img = RgbaImage::new(side, side);
        for (dst, src) in img.pixels_mut().zip(self.pixmap.pixels()) {
            let c = src.demultiply();
            *dst = image::Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
        }
        img
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: (u8, u8, u8) = (255, 255, 255);

    #[test]
    fn test_center_placement() {
        let p = GlyphPlacement::center(1024, 100.0, 200.0, 50.0);
        assert_eq!(p, GlyphPlacement { x: 462.0, y: 362.0 });
    }

    #[test]
    fn test_center_placement_without_lift() {
        let p = GlyphPlacement::center(1024, 1024.0, 1024.0, 0.0);
        assert_eq!(p, GlyphPlacement { x: 0.0, y: 0.0 });
    }

    #[test]
    fn test_center_placement_fractional() {
        let p = GlyphPlacement::center(1024, 11.0, 15.0, 50.0);
        assert_eq!(p.x, 506.5);
        assert_eq!(p.y, 454.5);
    }

    #[test]
    fn test_opaque_canvas_fill() {
        let canvas = Canvas::opaque(16, (0xff, 0x50, 0x01)).unwrap();
        assert_eq!(canvas.side(), 16);
        assert_eq!(canvas.pixel(0, 0), Some([0xff, 0x50, 0x01, 255]));
        assert_eq!(canvas.pixel(15, 15), Some([0xff, 0x50, 0x01, 255]));
        assert_eq!(canvas.pixel(16, 0), None);
    }

    #[test]
    fn test_pixel_outside_canvas() {
        let canvas = Canvas::transparent(16).unwrap();
        assert_eq!(canvas.pixel(16, 0), None);
        assert_eq!(canvas.pixel(0, 16), None);
        assert_eq!(canvas.pixel(u32::MAX, u32::MAX), None);
        assert!(canvas.pixel(15, 0).is_some());
    }

    #[test]
    fn test_ink_keeps_its_offset_from_origin() {
        // a 4x4 square sitting 3 right and 5 below the text origin
        let mut pb = tiny_skia::PathBuilder::new();
        pb.push_rect(Rect::from_xywh(3.0, 5.0, 4.0, 4.0).unwrap());
        let shape = TextShape::from_path(pb.finish().unwrap(), false).unwrap();
        assert_eq!((shape.width(), shape.height()), (4.0, 4.0));

        let mut canvas = Canvas::transparent(64).unwrap();
        canvas.draw_text(&shape, GlyphPlacement { x: 10.0, y: 20.0 }, (0.0, 0.0), WHITE);

        assert_eq!(canvas.pixel(13, 25), Some([255, 255, 255, 255]));
        assert_eq!(canvas.pixel(16, 28), Some([255, 255, 255, 255]));
        assert_eq!(canvas.pixel(12, 25).map(|p| p[3]), Some(0));
        assert_eq!(canvas.pixel(13, 24).map(|p| p[3]), Some(0));
        assert_eq!(canvas.pixel(10, 20).map(|p| p[3]), Some(0));
    }

    #[test]
    fn test_transparent_canvas_is_clear() {
        let canvas = Canvas::transparent(16).unwrap();
        assert_eq!(canvas.background(), Background::Transparent);
        assert_eq!(canvas.pixel(0, 0).map(|p| p[3]), Some(0));
    }

    #[test]
    fn test_zero_sized_canvas_is_an_error() {
        assert!(matches!(Canvas::transparent(0), Err(IconError::Canvas(0))));
    }

    #[test]
    fn test_draw_text_lands_at_placement() {
        let shape = TextShape::layout(&GlyphFont::Bitmap, "V").unwrap();
        let mut canvas = Canvas::transparent(64).unwrap();
        canvas.draw_text(&shape, GlyphPlacement { x: 10.0, y: 20.0 }, (0.0, 0.0), WHITE);

        // top-left cell of the V is lit, the pixel just above it is not
        assert_eq!(canvas.pixel(10, 20), Some([255, 255, 255, 255]));
        assert_eq!(canvas.pixel(10, 19).map(|p| p[3]), Some(0));
        assert_eq!(canvas.pixel(0, 0).map(|p| p[3]), Some(0));
    }

    #[test]
    fn test_draw_text_offset() {
        let shape = TextShape::layout(&GlyphFont::Bitmap, "V").unwrap();
        let mut canvas = Canvas::transparent(64).unwrap();
        canvas.draw_text(&shape, GlyphPlacement { x: 10.0, y: 20.0 }, (8.0, 8.0), WHITE);

        assert_eq!(canvas.pixel(10, 20).map(|p| p[3]), Some(0));
        assert_eq!(canvas.pixel(18, 28), Some([255, 255, 255, 255]));
    }

    #[test]
    fn test_blank_text_has_no_shape() {
        assert!(TextShape::layout(&GlyphFont::Bitmap, " ").is_none());
    }

    #[test]
    fn test_save_png_color_types() {
        let dir = tempfile::tempdir().unwrap();
        let opaque = dir.path().join("opaque.png");
        let clear = dir.path().join("clear.png");

        Canvas::opaque(8, WHITE).unwrap().save_png(&opaque).unwrap();
        Canvas::transparent(8).unwrap().save_png(&clear).unwrap();

        assert_eq!(image::open(&opaque).unwrap().color(), image::ColorType::Rgb8);
        assert_eq!(image::open(&clear).unwrap().color(), image::ColorType::Rgba8);
    }

    #[test]
    fn test_save_png_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("icon.png");

        let err = Canvas::transparent(8).unwrap().save_png(&path).unwrap_err();
        assert!(matches!(err, IconError::Io { .. }));
    }
}
