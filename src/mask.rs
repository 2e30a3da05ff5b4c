use crate::geometry::Rect;
use crate::image::raster::to_pixmap;
use crate::layout::SharedRaster;
use crate::paintable::{Bounds, ColorFilter, Opacity, Paintable, with_layer};
use crate::shape::{self, ShapeMode};
use resvg::tiny_skia::{
    self, FillRule, FilterQuality, GradientStop, Paint, Path, Pattern, PixmapMut, RadialGradient,
    Shader, SpreadMode, Transform,
};

const VIGNETTE_SQUASH: f32 = 0.7;
const VIGNETTE_RADIUS_SCALE: f32 = 1.3;
const VIGNETTE_EDGE_ALPHA: u8 = 0x7f;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaskStyle {
    pub shape: ShapeMode,
    pub corner_radius: f32,
    pub margin: f32,
    pub vignette: bool,
}

#[derive(Debug)]
pub struct MaskDrawable {
    raster: SharedRaster,
    style: MaskStyle,
    content: Rect,
    vignette: Option<Shader<'static>>,
    alpha: u8,
    color_filter: Option<ColorFilter>,
}

impl MaskDrawable {
    pub fn new(raster: SharedRaster, style: MaskStyle) -> Self {
        Self {
            raster,
            style,
            content: Rect::from_size(0.0, 0.0),
            vignette: None,
            alpha: u8::MAX,
            color_filter: None,
        }
    }

    pub fn style(&self) -> MaskStyle {
        self.style
    }

    pub fn content(&self) -> Rect {
        self.content
    }

    fn outline(&self) -> Option<Path> {
        let rect = self.content;
        match self.style.shape {
            ShapeMode::Circle => {
                shape::circle(rect.center_x(), rect.center_y(), rect.width() / 2.0)
            }
            ShapeMode::Arc => shape::half_disc(rect),
            ShapeMode::RoundedRect => {
                shape::rounded_rect(rect, self.style.corner_radius, self.style.corner_radius)
            }
        }
    }
}

fn vignette_shader(rect: Rect) -> Option<Shader<'static>> {
    let cx = rect.center_x();
    let cy = rect.center_y();
    let radius = rect.width() / 2.0 * VIGNETTE_RADIUS_SCALE;
    if radius <= 0.0 {
        return None;
    }
    let edge = tiny_skia::Color::from_rgba8(0, 0, 0, VIGNETTE_EDGE_ALPHA);
    let clear = tiny_skia::Color::from_rgba8(0, 0, 0, 0);

    // Gradient space is stretched vertically so the circle lands on an
    // ellipse centered on the content.
    let center = tiny_skia::Point::from_xy(cx, cy / VIGNETTE_SQUASH);
    RadialGradient::new(
        center,
        center,
        radius,
        vec![
            GradientStop::new(0.0, clear),
            GradientStop::new(0.7, clear),
            GradientStop::new(1.0, edge),
        ],
        SpreadMode::Pad,
        Transform::from_scale(1.0, VIGNETTE_SQUASH),
    )
}

impl Paintable for MaskDrawable {
    fn resize(&mut self, bounds: Bounds) {
        self.content = bounds.to_rect().inset(self.style.margin);
        self.vignette = if self.style.vignette {
            vignette_shader(self.content)
        } else {
            None
        };
    }

    fn paint(&self, canvas: &mut PixmapMut<'_>) {
        if self.content.is_empty() || self.opacity() == Opacity::Transparent {
            return;
        }
        let Some(outline) = self.outline() else {
            return;
        };
        let raster = self.raster.borrow();
        let Some(pixmap) = to_pixmap(&raster) else {
            return;
        };

        with_layer(canvas, self.alpha, self.color_filter, |target| {
            let mut paint = Paint::default();
            paint.anti_alias = true;
            paint.shader = Pattern::new(
                pixmap.as_ref(),
                SpreadMode::Pad,
                FilterQuality::Nearest,
                1.0,
                Transform::from_translate(self.content.left, self.content.top),
            );
            target.fill_path(&outline, &paint, FillRule::Winding, Transform::identity(), None);

            if let Some(vignette) = &self.vignette {
                paint.shader = vignette.clone();
                target.fill_path(&outline, &paint, FillRule::Winding, Transform::identity(), None);
            }
        });
    }

    fn opacity(&self) -> Opacity {
        if self.alpha == 0 {
            Opacity::Transparent
        } else {
            Opacity::Translucent
        }
    }

    fn set_alpha(&mut self, alpha: u8) {
        self.alpha = alpha;
    }

    fn set_color_filter(&mut self, filter: Option<ColorFilter>) {
        self.color_filter = filter;
    }
}
