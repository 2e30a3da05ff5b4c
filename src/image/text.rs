use crate::color::{Color, WHITE, to_hex_color};
use crate::error::Result;
use crate::image::raster::from_pixmap;
use crate::image::svg::{parse_tree, render_tree};
use image::RgbaImage;
use resvg::usvg;
use resvg::usvg::fontdb;
use std::sync::{Arc, OnceLock};

pub const TEXT_SIZE_RATIO: f32 = 0.45;

const FALLBACK_ASCENDER: f32 = 0.8;
const FALLBACK_DESCENDER: f32 = -0.2;

// Vertical font metrics in em units. The ascender is positive (above the
// baseline), the descender negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontMetrics {
    pub ascender: f32,
    pub descender: f32,
}

impl Default for FontMetrics {
    fn default() -> Self {
        Self {
            ascender: FALLBACK_ASCENDER,
            descender: FALLBACK_DESCENDER,
        }
    }
}

impl FontMetrics {
    pub fn centered_baseline(&self, center: f32, font_size: f32) -> f32 {
        center + (self.ascender + self.descender) * font_size / 2.0
    }
}

fn system_fonts() -> Arc<fontdb::Database> {
    static FONTS: OnceLock<Arc<fontdb::Database>> = OnceLock::new();
    FONTS
        .get_or_init(|| {
            let mut db = fontdb::Database::new();
            db.load_system_fonts();
            log::debug!("loaded {} font faces for initials", db.len());
            Arc::new(db)
        })
        .clone()
}

#[derive(Clone)]
pub struct TextRasterizer {
    fonts: Arc<fontdb::Database>,
    metrics: FontMetrics,
    color: Color,
}

impl TextRasterizer {
    pub fn new(fonts: Arc<fontdb::Database>) -> Self {
        let metrics = sans_serif_metrics(&fonts).unwrap_or_default();
        Self {
            fonts,
            metrics,
            color: WHITE,
        }
    }

    pub fn system() -> Self {
        Self::new(system_fonts())
    }

    pub fn metrics(&self) -> FontMetrics {
        self.metrics
    }

    pub fn rasterize(&self, text: &str, background: Color, width: u32, height: u32) -> Result<RgbaImage> {
        let font_size = width as f32 * TEXT_SIZE_RATIO;
        let svg = self.text_svg(text, background, width, height, font_size);

        let options = usvg::Options {
            fontdb: Arc::clone(&self.fonts),
            ..usvg::Options::default()
        };
        let label = format!("text '{text}'");
        let tree = parse_tree(&label, svg.as_bytes(), &options)?;
        let pixmap = render_tree(&label, &tree, 1.0, width, height)?;
        Ok(from_pixmap(&pixmap))
    }

    fn text_svg(&self, text: &str, background: Color, width: u32, height: u32, font_size: f32) -> String {
        let [r, g, b, a] = background.0;
        let baseline = self.metrics.centered_baseline(height as f32 / 2.0, font_size);
        format!(
            r##"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">
<rect x="0" y="0" width="{width}" height="{height}" fill="#{r:02x}{g:02x}{b:02x}" fill-opacity="{opacity}"/>
<text x="{cx}" y="{baseline}" font-family="sans-serif" font-size="{font_size}" fill="{fill}" text-anchor="middle">{text}</text>
</svg>"##,
            opacity = a as f32 / 255.0,
            cx = width as f32 / 2.0,
            fill = to_hex_color(self.color),
            text = escape_xml(text),
        )
    }
}

fn sans_serif_metrics(db: &fontdb::Database) -> Option<FontMetrics> {
    let id = db.query(&fontdb::Query {
        families: &[fontdb::Family::SansSerif],
        weight: fontdb::Weight::NORMAL,
        stretch: fontdb::Stretch::Normal,
        style: fontdb::Style::Normal,
    })?;
    db.with_face_data(id, |data, index| {
        let face = ttf_parser::Face::parse(data, index).ok()?;
        let units_per_em = face.units_per_em() as f32;
        if units_per_em <= 0.0 {
            return None;
        }
        Some(FontMetrics {
            ascender: face.ascender() as f32 / units_per_em,
            descender: face.descender() as f32 / units_per_em,
        })
    })
    .flatten()
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

impl std::fmt::Debug for TextRasterizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextRasterizer")
            .field("faces", &self.fonts.len())
            .field("metrics", &self.metrics)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    // Most cases run without fonts and only cover the background and the
    // baseline math. Glyph placement is checked against the system fonts and
    // skipped when no sans-serif face is installed.
    use super::*;
    use image::Rgba;

    fn ink_bounds(bitmap: &RgbaImage) -> Option<(u32, u32, u32, u32)> {
        let mut bounds: Option<(u32, u32, u32, u32)> = None;
        for (x, y, pixel) in bitmap.enumerate_pixels() {
            if pixel[0] < 128 {
                continue;
            }
            bounds = Some(match bounds {
                None => (x, y, x, y),
                Some((left, top, right, bottom)) => {
                    (left.min(x), top.min(y), right.max(x), bottom.max(y))
                }
            });
        }
        bounds
    }

    fn empty_rasterizer() -> TextRasterizer {
        TextRasterizer::new(Arc::new(fontdb::Database::new()))
    }

    #[test]
    fn baseline_sits_below_center() {
        let metrics = FontMetrics::default();
        let baseline = metrics.centered_baseline(50.0, 20.0);
        assert!((baseline - 56.0).abs() < 1e-4);
    }

    #[test]
    fn missing_fonts_fall_back_to_default_metrics() {
        assert_eq!(empty_rasterizer().metrics(), FontMetrics::default());
    }

    #[test]
    fn background_fills_the_whole_bitmap() {
        let color = Rgba([0x33, 0x66, 0x99, 0xff]);
        let bitmap = empty_rasterizer()
            .rasterize("AB", color, 40, 30)
            .expect("text bitmap should render");
        assert_eq!(bitmap.dimensions(), (40, 30));
        assert_eq!(*bitmap.get_pixel(0, 0), color);
        assert_eq!(*bitmap.get_pixel(39, 29), color);
    }

    #[test]
    fn markup_in_text_is_escaped() {
        assert_eq!(escape_xml("<a&b>"), "&lt;a&amp;b&gt;");
        let bitmap = empty_rasterizer()
            .rasterize("</text>", Rgba([0, 0, 0, 255]), 10, 10)
            .expect("escaped text should still parse");
        assert_eq!(bitmap.dimensions(), (10, 10));
    }

    #[test]
    fn glyph_is_centered_with_system_fonts() {
        let rasterizer = TextRasterizer::system();
        if sans_serif_metrics(&rasterizer.fonts).is_none() {
            eprintln!("no sans-serif face installed, glyph placement not checked");
            return;
        }
        let (width, height) = (100, 100);
        let bitmap = rasterizer
            .rasterize("H", Rgba([0, 0, 0, 255]), width, height)
            .expect("text bitmap should render");
        let (left, top, right, bottom) = ink_bounds(&bitmap).expect("glyph should leave ink");

        let ink_center_x = (left + right + 1) as f32 / 2.0;
        assert!(
            (ink_center_x - width as f32 / 2.0).abs() <= 3.0,
            "ink spans x {left}..={right}"
        );

        let font_size = width as f32 * TEXT_SIZE_RATIO;
        let metrics = rasterizer.metrics();
        let baseline = metrics.centered_baseline(height as f32 / 2.0, font_size);
        let em_top = baseline - metrics.ascender * font_size;
        let em_bottom = baseline - metrics.descender * font_size;
        assert!(((em_top + em_bottom) / 2.0 - height as f32 / 2.0).abs() < 1e-3);
        assert!(
            (bottom as f32 + 1.0 - baseline).abs() <= 2.0,
            "ink bottom {bottom}, baseline {baseline}"
        );
        assert!(top as f32 >= em_top - 1.0, "ink top {top} above the ascender {em_top}");
    }
}
