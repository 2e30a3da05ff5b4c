use crate::color::{Color, RED, to_skia};
use crate::error::{AvatarError, Result};
use crate::geometry::Rect;
use crate::image::raster::to_pixmap;
use crate::image::svg::vector_to_bitmap;
use crate::paintable::{Bounds, ColorFilter, Paintable, with_layer};
use crate::shape::{self, ShapeMode};
use image::RgbaImage;
use resvg::tiny_skia::{FillRule, Paint, Pixmap, PixmapMut, PixmapPaint, Transform};

pub const BADGE_RADIUS: f32 = 5.0;
// Horizontal corner radius of the rounded-rect mark, in pixels.
pub const BADGE_CORNER_RADIUS: f32 = 5.0;
pub const BADGE_OFFSET_RATIO: f32 = 0.4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BadgeStyle {
    pub shape: ShapeMode,
    pub color: Color,
    pub density: f32,
}

impl Default for BadgeStyle {
    fn default() -> Self {
        Self {
            shape: ShapeMode::Circle,
            color: RED,
            density: 1.0,
        }
    }
}

// The drawing origin is the center of the bounds: the icon is drawn at
// `(-w/2, -h/2)` and the mark is positioned relative to that origin.
pub struct BadgeDrawable {
    icon: Pixmap,
    icon_rect: Rect,
    style: BadgeStyle,
    bounds: Bounds,
    show_badge: bool,
    invalidated: bool,
    alpha: u8,
    color_filter: Option<ColorFilter>,
}

impl BadgeDrawable {
    pub fn new(icon: &RgbaImage, style: BadgeStyle) -> Result<Self> {
        let pixmap = to_pixmap(icon).ok_or_else(|| AvatarError::Allocation {
            label: "badge icon".to_string(),
            width: icon.width(),
            height: icon.height(),
        })?;
        Ok(Self {
            icon_rect: Rect::from_size(0.0, 0.0),
            icon: pixmap,
            style,
            bounds: Bounds::default(),
            show_badge: false,
            invalidated: false,
            alpha: u8::MAX,
            color_filter: None,
        })
    }

    pub fn from_svg(label: &str, svg_data: &[u8], tint: Color, style: BadgeStyle) -> Result<Self> {
        let icon = vector_to_bitmap(label, svg_data, None, tint, style.density)?;
        Self::new(&icon, style)
    }

    pub fn show_badge(&self) -> bool {
        self.show_badge
    }

    pub fn set_show_badge(&mut self, show: bool) {
        self.show_badge = show;
        self.invalidated = true;
    }

    pub fn take_invalidation(&mut self) -> bool {
        std::mem::take(&mut self.invalidated)
    }

    pub fn icon_size(&self) -> (u32, u32) {
        (self.icon.width(), self.icon.height())
    }

    fn origin(&self) -> Transform {
        let rect = self.bounds.to_rect();
        Transform::from_translate(rect.center_x(), rect.center_y())
    }

    fn paint_mark(&self, canvas: &mut PixmapMut<'_>) {
        let rect = self.icon_rect;
        let density = self.style.density;
        let path = match self.style.shape {
            ShapeMode::Circle => {
                let offset = rect.width() * BADGE_OFFSET_RATIO;
                shape::circle(offset, offset, BADGE_RADIUS * density)
            }
            ShapeMode::Arc => shape::half_disc(rect),
            ShapeMode::RoundedRect => {
                shape::rounded_rect(rect, BADGE_CORNER_RADIUS, BADGE_CORNER_RADIUS * density)
            }
        };
        let Some(path) = path else {
            return;
        };

        let mut paint = Paint::default();
        paint.anti_alias = true;
        paint.set_color(to_skia(self.style.color));
        let origin = self.origin();
        with_layer(canvas, self.alpha, self.color_filter, |target| {
            target.fill_path(&path, &paint, FillRule::Winding, origin, None);
        });
    }
}

impl Paintable for BadgeDrawable {
    fn resize(&mut self, bounds: Bounds) {
        self.bounds = bounds;
        self.icon_rect = Rect::from_size(self.icon.width() as f32, self.icon.height() as f32);
    }

    fn paint(&self, canvas: &mut PixmapMut<'_>) {
        let half_w = self.icon_rect.width() / 2.0;
        let half_h = self.icon_rect.height() / 2.0;
        canvas.draw_pixmap(
            0,
            0,
            self.icon.as_ref(),
            &PixmapPaint::default(),
            self.origin().pre_translate(-half_w, -half_h),
            None,
        );
        if self.show_badge {
            self.paint_mark(canvas);
        }
    }

    fn set_alpha(&mut self, alpha: u8) {
        self.alpha = alpha;
    }

    fn set_color_filter(&mut self, filter: Option<ColorFilter>) {
        self.color_filter = filter;
    }
}
